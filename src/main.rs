mod core;
mod field;
mod hud;
mod platform;

use crate::core::config::{self, FieldConfig};
use crate::core::types::Color;
use crate::field::driver::FrameDriver;
use crate::field::particle_field::ParticleField;
use crate::hud::Hud;
use crate::platform::error::PlatformError;
use crate::platform::renderer::Renderer;
use crate::platform::renderer_cairo::RendererCairo;
use crate::platform::window_x11::{is_quit_key, WindowEvent, WindowX11};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

#[derive(Debug, PartialEq)]
struct Args {
    window_id: Option<u64>,
    width: i32,
    height: i32,
    scale: f64,
    hud: bool,
    seed: Option<u64>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            window_id: None,
            width: 1280,
            height: 720,
            scale: 1.0,
            hud: false,
            seed: None,
        }
    }
}

/// Accepts `0x`-prefixed hex (as xwininfo prints) or decimal.
fn parse_window_id(s: &str) -> Option<u64> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

fn parse_size(s: &str) -> Option<(i32, i32)> {
    let (w, h) = s.split_once('x')?;
    let w: i32 = w.parse().ok()?;
    let h: i32 = h.parse().ok()?;
    (w > 0 && h > 0).then_some((w, h))
}

fn parse_args<I: IntoIterator<Item = String>>(argv: I) -> Args {
    let mut args = Args::default();

    let argv: Vec<String> = argv.into_iter().collect();
    let mut i = 0;
    while i < argv.len() {
        match argv[i].as_str() {
            "--window-id" if i + 1 < argv.len() => {
                i += 1;
                args.window_id = parse_window_id(&argv[i]);
            }
            "--size" if i + 1 < argv.len() => {
                i += 1;
                if let Some((w, h)) = parse_size(&argv[i]) {
                    args.width = w;
                    args.height = h;
                }
            }
            "--scale" if i + 1 < argv.len() => {
                i += 1;
                if let Ok(scale) = argv[i].parse::<f64>() {
                    if scale > 0.0 {
                        args.scale = scale;
                    }
                }
            }
            "--seed" if i + 1 < argv.len() => {
                i += 1;
                args.seed = argv[i].parse().ok();
            }
            "--hud" => args.hud = true,
            _ => {}
        }
        i += 1;
    }

    args
}

/// Fill in what the environment provides and the command line left unset.
fn apply_env(args: &mut Args, screensaver_window: Option<String>, scale: Option<String>) {
    if args.window_id.is_none() {
        args.window_id = screensaver_window.as_deref().and_then(parse_window_id);
    }
    if args.scale == 1.0 {
        if let Some(s) = scale.and_then(|s| s.parse::<f64>().ok()).filter(|s| *s > 0.0) {
            args.scale = s;
        }
    }
}

fn main() {
    env_logger::init();

    let mut args = parse_args(std::env::args().skip(1));
    apply_env(
        &mut args,
        std::env::var("XSCREENSAVER_WINDOW").ok(),
        std::env::var("NETFIELD_SCALE").ok(),
    );

    // Create or attach the window
    let window = match args.window_id {
        Some(id) => WindowX11::attach(id),
        None => WindowX11::create(args.width, args.height, "Netfield"),
    };
    let mut window = match window {
        Ok(window) => window,
        Err(PlatformError::WindowNotFound(id)) => {
            // Nothing to draw into
            log::debug!("Window 0x{:x} not found; nothing to do", id);
            return;
        }
        Err(e) => {
            eprintln!("netfield: {}", e);
            std::process::exit(1);
        }
    };
    window.set_scale(args.scale);

    // Create renderer
    let cr = match window.create_cairo_context() {
        Ok(cr) => cr,
        Err(e) => {
            log::debug!("{}; particle field disabled", e);
            return;
        }
    };
    let mut renderer = RendererCairo::new(cr, Color::from_hex(config::BG_COLOR, 1.0));

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let Some(mut field) = ParticleField::mount(Some(&window), FieldConfig::default(), rng) else {
        return;
    };
    let mut hud = args
        .hud
        .then(|| Hud::new(field.points().len(), Instant::now()));

    let token = CancellationToken::new();
    let driver = FrameDriver::new(Duration::from_millis(config::FRAME_INTERVAL_MS));

    // Main loop
    let frames = driver.run(&token, |now| {
        if !window.poll_events() {
            token.cancel();
            return;
        }

        for event in window.take_events() {
            match event {
                WindowEvent::Resized { width, height } => {
                    log::trace!("Window resized to {}x{}", width, height);
                    field.notify_resize(now);
                    if let Ok(cr) = window.create_cairo_context() {
                        renderer.set_context(cr);
                    }
                }
                WindowEvent::Visibility(visible) => field.set_visible(visible),
                WindowEvent::Key(key) if is_quit_key(&key) => token.cancel(),
                WindowEvent::Key(_) => {}
            }
        }

        if field.poll_resize(&window, now) {
            if let Some(hud) = hud.as_mut() {
                hud.restart(field.points().len(), now);
            }
        }

        if !field.is_visible() {
            return;
        }

        // Render
        renderer.begin_frame(window.width(), window.height());
        field.frame(&renderer);
        if let Some(hud) = &hud {
            hud.render(&renderer, field.link_count(), now);
        }
        renderer.end_frame();

        window.flush();
    });

    log::info!("Exiting after {} frames", frames);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_defaults() {
        assert_eq!(parse_args(Vec::new()), Args::default());
    }

    #[test]
    fn test_parse_all_flags() {
        let args = parse_args(argv(&[
            "--window-id",
            "0x3a00007",
            "--size",
            "640x480",
            "--scale",
            "2",
            "--hud",
            "--seed",
            "9",
        ]));
        assert_eq!(
            args,
            Args {
                window_id: Some(0x3a00007),
                width: 640,
                height: 480,
                scale: 2.0,
                hud: true,
                seed: Some(9),
            }
        );
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        let args = parse_args(argv(&["--size", "0x480", "--scale", "-1", "--window-id", "nope"]));
        assert_eq!(args, Args::default());
    }

    #[test]
    fn test_window_id_formats() {
        assert_eq!(parse_window_id("0x1A"), Some(26));
        assert_eq!(parse_window_id("0X1a"), Some(26));
        assert_eq!(parse_window_id("26"), Some(26));
        assert_eq!(parse_window_id(""), None);
    }

    #[test]
    fn test_env_fills_unset_values_only() {
        let mut args = Args::default();
        apply_env(&mut args, Some("0x10".to_string()), Some("1.5".to_string()));
        assert_eq!(args.window_id, Some(16));
        assert_eq!(args.scale, 1.5);

        let mut args = parse_args(argv(&["--window-id", "5", "--scale", "3"]));
        apply_env(&mut args, Some("0x10".to_string()), Some("1.5".to_string()));
        assert_eq!(args.window_id, Some(5));
        assert_eq!(args.scale, 3.0);
    }
}
