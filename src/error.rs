//! Error types for rendering and model decoding

use std::io;

use thiserror::Error;

/// Contract violations detected while rendering.
///
/// These indicate a caller bug rather than recoverable runtime state,
/// so nothing in the pipeline retries after one is returned.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("attribute size mismatch: {0} vs {1}")]
    AttributeSizeMismatch(u8, u8),
    #[error("attribute count mismatch: {0} vs {1}")]
    AttributeCountMismatch(u8, u8),
    #[error("capacity of {0} exceeded")]
    CapacityExceeded(usize),
    #[error("vertex has a w component of zero")]
    ZeroW,
    #[error("invalid pixel coordinate ({0}, {1})")]
    InvalidPixelCoordinate(i64, i64),
    #[error("either a color buffer, depth buffer or both must be present")]
    NoRenderTarget,
    #[error("color buffer is {0}x{1} but depth buffer is {2}x{3}")]
    DimensionMismatch(u32, u32, u32, u32),
    #[error("{kind} index {index} out of range for {len} entries")]
    IndexOutOfRange { kind: &'static str, index: usize, len: usize },
    #[error("clipping produced {0} vertices, at least 3 are required")]
    DegenerateClip(usize),
    #[error("invalid {width}x{height} image with {channels} channels")]
    InvalidImage { width: u32, height: u32, channels: u32 },
    #[error("image data is {actual} bytes but {expected} are required")]
    ImageDataLength { expected: usize, actual: usize },
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Failures while decoding the binary model format.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unexpected end of data at offset {offset}, {needed} more bytes needed")]
    Truncated { offset: usize, needed: usize },
    #[error("{what} count {count} exceeds the {remaining} bytes remaining")]
    CountExceedsBuffer { what: &'static str, count: usize, remaining: usize },
    #[error("{kind} index {index} out of range for {len} entries")]
    InvalidIndex { kind: &'static str, index: usize, len: usize },
    #[error("image {index} is malformed: {source}")]
    InvalidImage { index: usize, source: RenderError },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type DecodeResult<T> = Result<T, DecodeError>;
