#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClockError {
    #[error("surface has no drawable area ({width}x{height})")]
    EmptySurface { width: f32, height: f32 },
    #[error("invalid pixel ratio {0}")]
    InvalidPixelRatio(f32),
}
