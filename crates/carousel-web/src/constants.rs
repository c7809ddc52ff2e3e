// Host-side constants for the web front-end. Engine tuning lives in
// `carousel_core::constants`; these only cover DOM wiring, the demo item set
// and WebAudio voicing.

// DOM ids
pub const CANVAS_ID: &str = "app-canvas";
pub const DETAIL_OVERLAY_ID: &str = "detail-overlay";
pub const DETAIL_IMAGE_ID: &str = "detail-image";
pub const DETAIL_CAPTION_ID: &str = "detail-caption";
pub const DETAIL_CLOSE_ID: &str = "detail-close";

// Demo item set used until `set_items` is called
pub const DEFAULT_ITEM_COUNT: usize = 12;
pub const MAX_ITEM_COUNT: usize = 64;
pub const ITEMS_QUERY_KEY: &str = "items";

// Background clear colour (linear)
pub const CLEAR_RGB: [f64; 3] = [0.015, 0.02, 0.035];

// Drone voice
pub const DRONE_SMOOTHING_TAU_SEC: f64 = 0.12; // setTargetAtTime time constant
pub const DRONE_LOWPASS_HZ: f32 = 900.0;
pub const MASTER_GAIN: f32 = 0.6;

// Selection chirp
pub const CHIRP_START_HZ: f32 = 880.0;
pub const CHIRP_END_HZ: f32 = 1760.0;
pub const CHIRP_PEAK_GAIN: f32 = 0.18;
pub const CHIRP_ATTACK_SEC: f64 = 0.01;
pub const CHIRP_DURATION_SEC: f64 = 0.12;
