use thiserror::Error;

/// Errors raised while rasterizing an export.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    #[error("generated SVG could not be parsed: {0}")]
    Svg(String),

    #[error("scale must be positive and finite, got {0}")]
    InvalidScale(f32),

    #[error("failed to allocate a {width}x{height} surface for PNG export")]
    Allocation { width: u32, height: u32 },

    #[error("failed to encode PNG output: {0}")]
    Encode(String),
}
