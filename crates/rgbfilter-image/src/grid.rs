use std::ops;

use crate::{error::ImageError, pixel::Rgb};

/// Grid size in samples
///
/// The width is the number of columns and the height the number of rows.
///
/// # Examples
///
/// ```
/// use rgbfilter_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Width of the grid in samples
    pub width: usize,
    /// Height of the grid in samples
    pub height: usize,
}

impl ImageSize {
    /// Number of samples covered by this size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// A dense, rectangular grid of [`Rgb`] samples.
///
/// Samples are stored row-major in a single buffer and addressed by
/// `(row, col)`. Every row has the same length by construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    size: ImageSize,
    data: Vec<Rgb>,
}

impl Grid {
    /// Create a new grid from row-major sample data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the grid in samples.
    /// * `data` - The samples of the grid, row after row.
    ///
    /// # Errors
    ///
    /// If the length of the data does not match the grid size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use rgbfilter_image::{Grid, ImageSize, Rgb};
    ///
    /// let grid = Grid::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![Rgb::default(); 10 * 20],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(grid.cols(), 10);
    /// assert_eq!(grid.rows(), 20);
    /// ```
    pub fn new(size: ImageSize, data: Vec<Rgb>) -> Result<Self, ImageError> {
        if data.len() != size.area() {
            return Err(ImageError::InvalidChannelShape(data.len(), size.area()));
        }

        Ok(Self { size, data })
    }

    /// Create a new grid with every sample set to `val`.
    pub fn from_size_val(size: ImageSize, val: Rgb) -> Result<Self, ImageError> {
        Grid::new(size, vec![val; size.area()])
    }

    /// Create a grid from nested rows, as produced by a decoder.
    ///
    /// # Errors
    ///
    /// * [`ImageError::EmptyImage`] if there are no rows or the first row is empty.
    /// * [`ImageError::RaggedRows`] if any row differs in length from the first.
    ///
    /// # Examples
    ///
    /// ```
    /// use rgbfilter_image::{Grid, ImageError, Rgb};
    ///
    /// let grid = Grid::from_rows(vec![vec![Rgb::splat(1.0); 3]; 2]).unwrap();
    /// assert_eq!((grid.rows(), grid.cols()), (2, 3));
    ///
    /// let ragged = Grid::from_rows(vec![vec![Rgb::default(); 3], vec![Rgb::default(); 2]]);
    /// assert!(matches!(ragged, Err(ImageError::RaggedRows { row: 1, .. })));
    /// ```
    pub fn from_rows(rows: Vec<Vec<Rgb>>) -> Result<Self, ImageError> {
        let expected = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(ImageError::EmptyImage),
        };

        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != expected)
        {
            return Err(ImageError::RaggedRows {
                row,
                expected,
                found,
            });
        }

        let size = ImageSize {
            width: expected,
            height: rows.len(),
        };

        Grid::new(size, rows.into_iter().flatten().collect())
    }

    /// Get the size of the grid in samples.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of rows of the grid.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the number of columns of the grid.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the width of the grid in samples.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the grid in samples.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Whether the grid has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.size.area() == 0
    }

    /// Get the sample at `(row, col)`, or `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&Rgb> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        self.data.get(row * self.cols() + col)
    }

    /// Get a mutable reference to the sample at `(row, col)`.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Rgb> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        let cols = self.cols();
        self.data.get_mut(row * cols + col)
    }

    /// Get one row of the grid.
    pub fn row(&self, row: usize) -> Option<&[Rgb]> {
        if row >= self.rows() {
            return None;
        }
        let start = row * self.cols();
        Some(&self.data[start..start + self.cols()])
    }

    /// Iterate over the rows of the grid.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Rgb]> {
        // chunks_exact panics on zero, an empty grid has no rows anyway
        self.data.chunks_exact(self.cols().max(1))
    }

    /// The samples of the grid in row-major order.
    pub fn as_slice(&self) -> &[Rgb] {
        &self.data
    }

    /// The samples of the grid in row-major order.
    pub fn as_slice_mut(&mut self) -> &mut [Rgb] {
        &mut self.data
    }

    /// Split the grid back into nested rows for an encoder.
    pub fn into_rows(self) -> Vec<Vec<Rgb>> {
        self.iter_rows().map(<[Rgb]>::to_vec).collect()
    }
}

impl ops::Index<(usize, usize)> for Grid {
    type Output = Rgb;

    fn index(&self, (row, col): (usize, usize)) -> &Rgb {
        assert!(
            row < self.rows() && col < self.cols(),
            "index ({row}, {col}) out of bounds for grid of {}",
            self.size
        );
        &self.data[row * self.cols() + col]
    }
}

impl ops::IndexMut<(usize, usize)> for Grid {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Rgb {
        assert!(
            row < self.rows() && col < self.cols(),
            "index ({row}, {col}) out of bounds for grid of {}",
            self.size
        );
        let cols = self.cols();
        &mut self.data[row * cols + col]
    }
}

#[cfg(test)]
mod tests {
    use crate::{Grid, ImageError, ImageSize, Rgb};

    #[test]
    fn image_size() {
        let image_size: ImageSize = [10, 20].into();
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(image_size.area(), 200);
        assert_eq!(
            image_size.to_string(),
            "ImageSize { width: 10, height: 20 }"
        );
    }

    #[test]
    fn grid_smoke() -> Result<(), ImageError> {
        let grid = Grid::from_size_val([4, 3].into(), Rgb::splat(1.0))?;
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.as_slice().len(), 12);
        assert!(!grid.is_empty());
        Ok(())
    }

    #[test]
    fn grid_new_rejects_wrong_length() {
        let res = Grid::new([2, 2].into(), vec![Rgb::default(); 3]);
        assert_eq!(res, Err(ImageError::InvalidChannelShape(3, 4)));
    }

    #[test]
    fn grid_zero_size_is_constructible_but_empty() -> Result<(), ImageError> {
        let grid = Grid::new([0, 5].into(), vec![])?;
        assert!(grid.is_empty());
        assert_eq!(grid.iter_rows().count(), 0);
        Ok(())
    }

    #[test]
    fn grid_row_major_indexing() -> Result<(), ImageError> {
        let data = (0..6).map(|v| Rgb::splat(v as f32)).collect();
        let mut grid = Grid::new([3, 2].into(), data)?;

        assert_eq!(grid.get(1, 0), Some(&Rgb::splat(3.0)));
        assert_eq!(grid[(0, 2)], Rgb::splat(2.0));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 3), None);
        assert_eq!(grid.row(1), Some(&[Rgb::splat(3.0), Rgb::splat(4.0), Rgb::splat(5.0)][..]));
        assert_eq!(grid.row(2), None);

        grid[(1, 1)] = Rgb::new(1.0, 2.0, 3.0);
        if let Some(px) = grid.get_mut(0, 0) {
            *px += Rgb::splat(10.0);
        }
        assert_eq!(grid.get(1, 1), Some(&Rgb::new(1.0, 2.0, 3.0)));
        assert_eq!(grid.get(0, 0), Some(&Rgb::splat(10.0)));
        Ok(())
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn grid_index_out_of_bounds_panics() {
        let grid = Grid::from_size_val([2, 2].into(), Rgb::default()).unwrap();
        let _ = grid[(2, 0)];
    }

    #[test]
    fn grid_from_rows_roundtrips_nested_layout() -> Result<(), ImageError> {
        let rows = vec![
            vec![Rgb::splat(1.0), Rgb::splat(2.0)],
            vec![Rgb::splat(3.0), Rgb::splat(4.0)],
            vec![Rgb::splat(5.0), Rgb::splat(6.0)],
        ];
        let grid = Grid::from_rows(rows.clone())?;
        assert_eq!(grid.size(), ImageSize { width: 2, height: 3 });
        assert_eq!(grid[(2, 1)], Rgb::splat(6.0));
        assert_eq!(grid.into_rows(), rows);
        Ok(())
    }

    #[test]
    fn grid_from_rows_rejects_empty() {
        assert_eq!(Grid::from_rows(vec![]), Err(ImageError::EmptyImage));
        assert_eq!(
            Grid::from_rows(vec![vec![], vec![]]),
            Err(ImageError::EmptyImage)
        );
    }

    #[test]
    fn grid_from_rows_rejects_ragged() {
        let rows = vec![
            vec![Rgb::default(); 4],
            vec![Rgb::default(); 4],
            vec![Rgb::default(); 5],
        ];
        assert_eq!(
            Grid::from_rows(rows),
            Err(ImageError::RaggedRows {
                row: 2,
                expected: 4,
                found: 5
            })
        );
    }
}
