/// X11 window implementation with Cairo surface.

use crate::core::types::KeyEvent;
use crate::field::container::Container;
use crate::platform::error::PlatformError;
use std::ffi::CString;
use std::os::raw::{c_char, c_int};
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};
use x11::{keysym, xlib};

/// Events the rest of the app cares about.
#[derive(Debug, Clone)]
pub enum WindowEvent {
    Resized { width: i32, height: i32 },
    Visibility(bool),
    Key(KeyEvent),
}

// Set by the temporary error handler installed while probing a foreign window
static X_ERROR_SEEN: AtomicBool = AtomicBool::new(false);

unsafe extern "C" fn record_x_error(
    _display: *mut xlib::Display,
    _event: *mut xlib::XErrorEvent,
) -> c_int {
    X_ERROR_SEEN.store(true, Ordering::SeqCst);
    0
}

pub struct WindowX11 {
    display: *mut xlib::Display,
    window: xlib::Window,
    width: i32,
    height: i32,
    scale: f64,
    wm_delete_window: xlib::Atom,
    should_close: bool,
    screen: i32,
    // Created here (destroyed on drop) vs. borrowed from another client
    owned: bool,

    pending_events: Vec<WindowEvent>,
}

impl WindowX11 {
    fn open_display() -> Result<Self, PlatformError> {
        let display = unsafe { xlib::XOpenDisplay(ptr::null()) };
        if display.is_null() {
            return Err(PlatformError::DisplayUnavailable);
        }
        Ok(Self {
            display,
            window: 0,
            width: 0,
            height: 0,
            scale: 1.0,
            wm_delete_window: 0,
            should_close: false,
            screen: unsafe { xlib::XDefaultScreen(display) },
            owned: false,
            pending_events: Vec::new(),
        })
    }

    /// Create and map a new top-level window.
    pub fn create(width: i32, height: i32, title: &str) -> Result<Self, PlatformError> {
        let mut win = Self::open_display()?;

        unsafe {
            let root = xlib::XRootWindow(win.display, win.screen);

            win.window = xlib::XCreateSimpleWindow(
                win.display,
                root,
                0,
                0,
                width as u32,
                height as u32,
                0,
                xlib::XBlackPixel(win.display, win.screen),
                xlib::XBlackPixel(win.display, win.screen),
            );
            win.owned = true;
            win.width = width;
            win.height = height;

            // Set window title
            if let Ok(title_c) = CString::new(title) {
                xlib::XStoreName(win.display, win.window, title_c.as_ptr());
            }

            xlib::XSelectInput(
                win.display,
                win.window,
                xlib::ExposureMask
                    | xlib::KeyPressMask
                    | xlib::StructureNotifyMask
                    | xlib::VisibilityChangeMask,
            );

            // WM_DELETE_WINDOW protocol
            win.wm_delete_window = xlib::XInternAtom(
                win.display,
                b"WM_DELETE_WINDOW\0".as_ptr() as *const c_char,
                xlib::False,
            );
            xlib::XSetWMProtocols(
                win.display,
                win.window,
                &mut win.wm_delete_window as *mut _,
                1,
            );

            xlib::XMapWindow(win.display, win.window);
            xlib::XFlush(win.display);
        }

        Ok(win)
    }

    /// Draw into an existing window owned by another client, such as the one a
    /// screensaver daemon hands out.
    pub fn attach(window_id: u64) -> Result<Self, PlatformError> {
        let mut win = Self::open_display()?;
        let window = window_id as xlib::Window;

        let attrs = unsafe {
            let mut attrs: xlib::XWindowAttributes = std::mem::zeroed();

            // A bad id raises an asynchronous X error, which would abort the
            // process under the default handler.
            xlib::XSync(win.display, xlib::False);
            X_ERROR_SEEN.store(false, Ordering::SeqCst);
            let previous = xlib::XSetErrorHandler(Some(record_x_error));
            let status = xlib::XGetWindowAttributes(win.display, window, &mut attrs);
            xlib::XSync(win.display, xlib::False);
            xlib::XSetErrorHandler(previous);

            if status == 0 || X_ERROR_SEEN.load(Ordering::SeqCst) {
                return Err(PlatformError::WindowNotFound(window_id));
            }
            attrs
        };

        win.window = window;
        win.width = attrs.width;
        win.height = attrs.height;

        unsafe {
            xlib::XSelectInput(
                win.display,
                win.window,
                xlib::ExposureMask | xlib::StructureNotifyMask | xlib::VisibilityChangeMask,
            );
            xlib::XFlush(win.display);
        }

        if attrs.map_state != xlib::IsViewable {
            win.pending_events.push(WindowEvent::Visibility(false));
        }

        Ok(win)
    }

    /// Physical pixels per logical pixel reported to the particle field.
    pub fn set_scale(&mut self, scale: f64) {
        if scale > 0.0 {
            self.scale = scale;
        }
    }

    /// Create a Cairo context for the current window using cairo-sys FFI.
    pub fn create_cairo_context(&self) -> Result<cairo::Context, PlatformError> {
        unsafe {
            let visual = xlib::XDefaultVisual(self.display, self.screen);

            let surface_ptr = cairo_sys::cairo_xlib_surface_create(
                self.display,
                self.window,
                visual,
                self.width,
                self.height,
            );

            if surface_ptr.is_null() {
                return Err(PlatformError::SurfaceUnavailable);
            }

            let cr_ptr = cairo_sys::cairo_create(surface_ptr);
            // Surface is now referenced by the context, release our ref
            cairo_sys::cairo_surface_destroy(surface_ptr);

            if cr_ptr.is_null() {
                return Err(PlatformError::SurfaceUnavailable);
            }

            // Wrap the raw pointer in cairo-rs Context (takes ownership)
            Ok(cairo::Context::from_raw_full(cr_ptr))
        }
    }

    /// Process pending X11 events. Returns false if window should close.
    pub fn poll_events(&mut self) -> bool {
        if self.should_close {
            return false;
        }

        unsafe {
            while xlib::XPending(self.display) > 0 {
                let mut event: xlib::XEvent = std::mem::zeroed();
                xlib::XNextEvent(self.display, &mut event);

                match event.get_type() {
                    xlib::Expose => {}
                    xlib::KeyPress => {
                        let mut key = event.key;
                        let sym = xlib::XLookupKeysym(&mut key, 0);
                        self.pending_events.push(WindowEvent::Key(KeyEvent {
                            keysym: sym as u32,
                            pressed: true,
                            ctrl: key.state & xlib::ControlMask != 0,
                        }));
                    }
                    xlib::ConfigureNotify => {
                        let configure = event.configure;
                        if configure.width != self.width || configure.height != self.height {
                            self.width = configure.width;
                            self.height = configure.height;
                            self.pending_events.push(WindowEvent::Resized {
                                width: configure.width,
                                height: configure.height,
                            });
                        }
                    }
                    xlib::VisibilityNotify => {
                        let visible = event.visibility.state != xlib::VisibilityFullyObscured;
                        self.pending_events.push(WindowEvent::Visibility(visible));
                    }
                    xlib::MapNotify => self.pending_events.push(WindowEvent::Visibility(true)),
                    xlib::UnmapNotify => self.pending_events.push(WindowEvent::Visibility(false)),
                    xlib::DestroyNotify => {
                        self.should_close = true;
                        return false;
                    }
                    xlib::ClientMessage => {
                        let cm = event.client_message;
                        if cm.data.get_long(0) as xlib::Atom == self.wm_delete_window {
                            self.should_close = true;
                            return false;
                        }
                    }
                    _ => {}
                }
            }
        }

        !self.should_close
    }

    /// Drain pending events.
    pub fn take_events(&mut self) -> Vec<WindowEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn flush(&self) {
        unsafe {
            xlib::XFlush(self.display);
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}

impl Container for WindowX11 {
    fn css_size(&self) -> (f64, f64) {
        (self.width as f64 / self.scale, self.height as f64 / self.scale)
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.scale
    }

    fn viewport_width(&self) -> f64 {
        self.width as f64 / self.scale
    }
}

/// Whether a key press asks the app to quit (Ctrl+Q or Escape).
pub fn is_quit_key(event: &KeyEvent) -> bool {
    event.pressed
        && (event.keysym == keysym::XK_Escape
            || (event.ctrl && event.keysym == keysym::XK_q))
}

impl Drop for WindowX11 {
    fn drop(&mut self) {
        unsafe {
            if !self.display.is_null() {
                if self.owned {
                    xlib::XDestroyWindow(self.display, self.window);
                }
                xlib::XCloseDisplay(self.display);
            }
        }
    }
}
