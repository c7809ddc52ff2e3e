//! Platform-independent core of the pinch carousel.
//!
//! The web and native frontends feed a [`CursorSample`] into
//! [`Carousel::tick`] every animation frame and draw what comes back.

pub mod camera;
pub mod config;
pub mod constants;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod layout;
pub mod outputs;
pub mod picking;
pub mod selection;
pub mod smoothing;

#[cfg(feature = "gpu")]
pub mod render;

pub static CAROUSEL_WGSL: &str = include_str!("../shaders/carousel.wgsl");
pub static HUD_WGSL: &str = include_str!("../shaders/hud.wgsl");

pub use camera::{CameraRig, Ray};
pub use config::CarouselConfig;
pub use cursor::CursorSample;
pub use engine::{Carousel, CarouselEvent, FrameInput, FrameOutput, GalleryState};
pub use error::ConfigError;
pub use layout::{ItemPlacement, ItemStatus};
pub use outputs::{AudioSink, DroneParams, HudParams, NullAudio};
