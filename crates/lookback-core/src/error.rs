use thiserror::Error;

/// Problems found in an authored timeline.
///
/// The page validates its timeline once at mount; per-frame evaluation never
/// fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimelineError {
    #[error("phase span must be positive, got {span}")]
    NonPositiveSpan { span: f32 },
    #[error("{what} must be finite, got {value}")]
    NonFinite { what: &'static str, value: f32 },
    #[error("{what} starts at {start}, outside the progress domain [0, {max}]")]
    OutOfDomain {
        what: &'static str,
        start: f32,
        max: f32,
    },
    #[error("{what} must lie in [0, 1], got {value}")]
    NotUnit { what: &'static str, value: f32 },
}
