#![deny(missing_docs)]
//! RGB sample and grid types consumed and produced by the convolution engine.

/// Error types for the image module.
pub mod error;

/// RGB grid representation.
pub mod grid;

/// Conversions between grids and interleaved 8-bit buffers.
pub mod ops;

/// Three channel floating point sample.
pub mod pixel;

pub use crate::error::ImageError;
pub use crate::grid::{Grid, ImageSize};
pub use crate::pixel::Rgb;
