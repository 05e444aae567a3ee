use rgbfilter_image::{Grid, ImageError, Rgb};

use super::{get_kernel, FilterError, Kernel, KernelType};
use crate::parallel::{par_iter_indexed, ExecutionStrategy};

/// Apply a square kernel to every sample of a grid.
///
/// Each output sample is the weighted sum of the `N x N` neighborhood centred
/// on it, computed independently per channel. Neighbors outside the grid are
/// skipped: border samples get fewer taps and are not renormalized, so blur
/// kernels darken the border. No clamping or rounding is applied.
///
/// # Arguments
///
/// * `src` - The source grid with shape (H, W).
/// * `dst` - The destination grid with shape (H, W).
/// * `kernel` - The kernel to apply.
/// * `kernel_type` - The filter that selected `kernel`. [`KernelType::None`]
///   returns immediately without touching `dst`.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
///
/// # Errors
///
/// [`FilterError::InvalidInput`] if `src` is empty or `dst` differs in size.
/// Nothing is written to `dst` in that case.
///
/// # Example
///
/// ```rust
/// use rgbfilter_image::{Grid, Rgb};
/// use rgbfilter_imgproc::filter::{filter, KernelType};
///
/// let src = Grid::from_size_val([5, 5].into(), Rgb::new(10.0, 20.0, 30.0)).unwrap();
/// let mut dst = Grid::from_size_val(src.size(), Rgb::default()).unwrap();
///
/// let kernel_type = KernelType::Identity;
/// filter(&src, &mut dst, &kernel_type.kernel(), kernel_type).unwrap();
///
/// assert_eq!(dst, src);
/// ```
pub fn filter<const N: usize>(
    src: &Grid,
    dst: &mut Grid,
    kernel: &Kernel<N>,
    kernel_type: KernelType,
) -> Result<(), FilterError> {
    filter_with_strategy(src, dst, kernel, kernel_type, ExecutionStrategy::default())
}

/// Apply a square kernel to every sample of a grid with an explicit strategy.
///
/// Same contract as [`filter`]; `strategy` only decides how rows are
/// scheduled, the result is identical for every strategy.
pub fn filter_with_strategy<const N: usize>(
    src: &Grid,
    dst: &mut Grid,
    kernel: &Kernel<N>,
    kernel_type: KernelType,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError> {
    if kernel_type == KernelType::None {
        log::debug!("no filter requested, skipping");
        return Ok(());
    }

    check_shapes(src, dst)?;

    log::debug!(
        "applying {:?} ({}x{}) to {} with {:?}",
        kernel_type,
        N,
        N,
        src.size(),
        strategy
    );

    par_iter_indexed(dst.as_slice_mut(), src.cols(), strategy, |row, col, out| {
        *out = convolve_at(src, kernel, row, col);
    })?;

    Ok(())
}

/// Filter a grid with a kernel from the bank into a newly allocated grid.
///
/// For [`KernelType::None`] the result is a copy of `src`.
///
/// # Errors
///
/// [`FilterError::InvalidInput`] if `src` is empty, before anything is allocated.
///
/// # Example
///
/// ```rust
/// use rgbfilter_image::{Grid, Rgb};
/// use rgbfilter_imgproc::filter::{filtered, KernelType};
///
/// let src = Grid::from_size_val([6, 4].into(), Rgb::splat(1.0)).unwrap();
/// let dst = filtered(&src, KernelType::Laplacian).unwrap();
///
/// assert_eq!(dst.size(), src.size());
/// assert_eq!(filtered(&src, KernelType::None).unwrap(), src);
/// ```
pub fn filtered(src: &Grid, kernel_type: KernelType) -> Result<Grid, FilterError> {
    if src.is_empty() {
        return Err(ImageError::EmptyImage.into());
    }

    if kernel_type == KernelType::None {
        log::debug!("no filter requested, passing the source through");
        return Ok(src.clone());
    }

    let mut dst = Grid::from_size_val(src.size(), Rgb::default())?;
    filter(src, &mut dst, &get_kernel(kernel_type), kernel_type)?;
    Ok(dst)
}

fn check_shapes(src: &Grid, dst: &Grid) -> Result<(), ImageError> {
    if src.is_empty() {
        return Err(ImageError::EmptyImage);
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            dst.cols(),
            dst.rows(),
            src.cols(),
            src.rows(),
        ));
    }

    Ok(())
}

/// Weighted sum of the neighborhood of `(row, col)`; out of bounds taps are skipped.
fn convolve_at<const N: usize>(src: &Grid, kernel: &Kernel<N>, row: usize, col: usize) -> Rgb {
    let mut acc = Rgb::default();
    for (dk, dl, weight) in kernel.iter_taps() {
        let (Some(r), Some(c)) = (row.checked_add_signed(dk), col.checked_add_signed(dl)) else {
            continue;
        };
        if let Some(px) = src.get(r, c) {
            acc += *px * weight;
        }
    }
    acc
}
