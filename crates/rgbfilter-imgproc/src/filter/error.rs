use rgbfilter_image::ImageError;

use crate::parallel::ParallelError;

/// Errors that can occur while filtering a grid.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// The source or destination grid cannot be filtered.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ImageError),

    /// The worker pool for the requested execution strategy is unavailable.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
