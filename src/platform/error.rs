use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("cannot open X11 display")]
    DisplayUnavailable,
    #[error("X11 window 0x{0:x} not found")]
    WindowNotFound(u64),
    #[error("cannot create a Cairo surface for the window")]
    SurfaceUnavailable,
}
