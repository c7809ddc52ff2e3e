// Shared interaction/visual tuning constants used by both web and native frontends.

// Input mapping
pub const DEAD_ZONE_CENTER: f32 = 0.5; // horizontal center of the cursor space
pub const DEAD_ZONE_HALF_WIDTH: f32 = 0.15; // no scrolling inside 0.5 ± this
pub const MAX_SCROLL_SPEED: f32 = 0.2; // radians added to the scroll target per frame at the border
pub const SPEED_EASING_EXPONENT: f32 = 0.6; // < 1 eases near the dead-zone edge
pub const PITCH_SPAN: f32 = 1.5; // y in [0,1] maps to pitch in [-0.75, 0.75]
pub const ROLL_SPAN: f32 = 0.5; // x in [0,1] maps to roll in [0.25, -0.25]

// Smoothing (per-frame lerp factors)
pub const SCROLL_DAMPING: f32 = 0.1;
pub const TILT_DAMPING: f32 = 0.05;
pub const ITEM_DAMPING: f32 = 0.1;
pub const GLOW_DAMPING: f32 = 0.1;

// Ring layout
pub const RING_RADIUS: f32 = 6.0;
pub const CARD_WIDTH: f32 = 2.4;
pub const CARD_HEIGHT: f32 = 1.8;
// Shift scroll by whole turns once it drifts this many turns from zero
pub const SCROLL_REBASE_TURNS: f32 = 64.0;

// Per-item targets: (scale, depth offset)
pub const SELECTED_SCALE: f32 = 1.3;
pub const SELECTED_Z: f32 = 2.5;
pub const RECEDED_SCALE: f32 = 0.8;
pub const RECEDED_Z: f32 = -1.0;
pub const HOVER_SCALE: f32 = 1.15;
pub const HOVER_Z: f32 = 0.5;
pub const IDLE_SCALE: f32 = 1.0;
pub const IDLE_Z: f32 = 0.0;

// Pinch selection
pub const ACTIVATION_MIN: f32 = 0.2; // central activation rectangle, both axes
pub const ACTIVATION_MAX: f32 = 0.8;
pub const PINCH_COOLDOWN_MS: f64 = 1000.0;

// Swipe-to-close
pub const SWIPE_DOWN_THRESHOLD: f32 = 0.03; // per-frame increase of y
pub const SWIPE_COOLDOWN_MS: f64 = 800.0;

// HUD ring
pub const HUD_ROTATION_PER_SPEED: f32 = 0.5; // ring rotation integrates -speed * this per frame

// Audio drone
pub const DRONE_BASE_HZ: f32 = 60.0;
pub const DRONE_HZ_PER_SPEED: f32 = 2000.0;
pub const DRONE_BASE_GAIN: f32 = 0.02;
pub const DRONE_GAIN_PER_SPEED: f32 = 0.15;

// Camera
pub const CAMERA_Z: f32 = 9.0; // eye distance in front of the ring's front item
pub const CAMERA_FOV_DEG: f32 = 50.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;
