//! Filter operations
//!
//! This module provides the kernel bank and the convolution engine.

/// Filter errors
mod error;
pub use error::FilterError;

/// Filter kernels
pub mod kernels;
pub use kernels::{get_kernel, Kernel, KernelType, ParseKernelTypeError};

/// Filter operations
mod ops;
pub use ops::*;
