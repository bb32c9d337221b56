/// Visual and behavioral constants.

// --- Visual colors (hex) ---
pub const BG_COLOR: u32 = 0x0B1120;
pub const POINT_COLOR: u32 = 0x2563EB;
pub const LINK_COLOR: u32 = 0x2563EB;
pub const TEXT_PRIMARY: u32 = 0xE6EDF3;

// --- Point field ---
pub const MOBILE_BREAKPOINT: f64 = 768.0;
pub const POINT_COUNT_MOBILE: usize = 25;
pub const POINT_COUNT_DESKTOP: usize = 50;
pub const VELOCITY_MAX: f64 = 0.25;
pub const RADIUS_MIN: f64 = 1.0;
pub const RADIUS_MAX: f64 = 3.0;

// --- Links ---
pub const LINK_DISTANCE: f64 = 100.0;
pub const LINK_ALPHA: f64 = 0.5;
pub const LINK_WIDTH: f64 = 1.0;

// --- Timing ---
pub const RESIZE_DEBOUNCE_MS: u64 = 250;
pub const FRAME_INTERVAL_MS: u64 = 16;
pub const COUNTER_DURATION_MS: f64 = 1200.0;

// --- HUD ---
pub const HUD_TEXT_SIZE: f64 = 14.0;
pub const HUD_MARGIN: f64 = 16.0;

/// Tunables for one particle field, defaulting to the constants above.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    pub mobile_breakpoint: f64,
    pub count_mobile: usize,
    pub count_desktop: usize,
    pub velocity_max: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    pub link_distance: f64,
    pub link_alpha: f64,
    pub resize_debounce_ms: u64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: MOBILE_BREAKPOINT,
            count_mobile: POINT_COUNT_MOBILE,
            count_desktop: POINT_COUNT_DESKTOP,
            velocity_max: VELOCITY_MAX,
            radius_min: RADIUS_MIN,
            radius_max: RADIUS_MAX,
            link_distance: LINK_DISTANCE,
            link_alpha: LINK_ALPHA,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
        }
    }
}
