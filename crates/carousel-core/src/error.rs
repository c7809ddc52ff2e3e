use thiserror::Error;

/// Reasons a [`CarouselConfig`](crate::CarouselConfig) is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} must lie in (0, 1), got {value}")]
    DampingOutOfRange { field: &'static str, value: f32 },
    #[error("dead zone half-width must lie in (0, 0.5), got {0}")]
    DeadZone(f32),
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("activation rectangle [{min}, {max}] must be a non-empty range inside [0, 1]")]
    ActivationRect { min: f32, max: f32 },
}
