/// An error type for the image module.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// Error when the grid has no rows or no columns.
    #[error("Image has no rows or no columns")]
    EmptyImage,

    /// Error when a row of the decoded grid differs in length from the first one.
    #[error("Row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },

    /// Error when the data length does not match the grid size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two images that must share a shape do not.
    #[error("Image size ({0}x{1}) does not match the expected size ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),
}
