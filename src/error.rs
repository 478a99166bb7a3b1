//! Errors raised while building scenes and rendering frames
use crate::vector::Vec3;
use thiserror::Error;

/// Malformed geometry or camera configuration hit while rendering a frame.
/// Any of these aborts the whole frame.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Cannot normalize a vector of zero length.")]
    ZeroNorm,
    #[error("Point {position:?} lies on the camera plane (z == 0).")]
    DegenerateProjection { position: Vec3 },
}

/// Invalid parameters passed when constructing a scene
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Side length must be finite and at least 1, got {0}.")]
    InvalidSideLength(f64),
    #[error("Sampling step must be finite and positive, got {0}.")]
    InvalidStep(f64),
    #[error("Side length {side_length} sampled every {step} gives more points than fit in memory.")]
    TooManySamples { side_length: f64, step: f64 },
    #[error("Screen must be at least 1x1, got {width}x{height}.")]
    EmptyScreen { width: usize, height: usize },
    #[error("Projection distance must be finite and positive, got {0}.")]
    InvalidProjectionDistance(f64),
    #[error("Depth range must satisfy 0 <= znear < zfar, got {znear}..{zfar}.")]
    InvalidDepthRange { znear: f64, zfar: f64 },
}
