use std::{fmt, str::FromStr};

/// Identifier of a filter in the kernel bank.
///
/// `None` means that no filtering is requested. It is not the same as a
/// kernel full of zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelType {
    /// 5x5 binomial approximation of a gaussian blur.
    GaussianBlur,
    /// 5x5 uniform average.
    BoxBlur,
    /// Sharpening against a gaussian blurred estimate.
    UnsharpMasking,
    /// Discrete laplacian, extracts edges.
    Laplacian,
    /// Reproduces the input.
    Identity,
    /// Filtering is skipped.
    None,
}

impl KernelType {
    /// Every identifier, in declaration order.
    pub const ALL: [KernelType; 6] = [
        KernelType::GaussianBlur,
        KernelType::BoxBlur,
        KernelType::UnsharpMasking,
        KernelType::Laplacian,
        KernelType::Identity,
        KernelType::None,
    ];

    /// Caption describing the image this filter produces.
    pub fn title(&self) -> &'static str {
        match self {
            KernelType::GaussianBlur => "Gaussian filtered image",
            KernelType::BoxBlur => "Box filtered image",
            KernelType::UnsharpMasking => "Unsharp masked image",
            KernelType::Laplacian => "Laplacian filtered image",
            KernelType::Identity => "Identity filtered image",
            KernelType::None => "Original image",
        }
    }

    /// The 5x5 coefficients of this filter. See [`get_kernel`].
    pub fn kernel(&self) -> Kernel<5> {
        get_kernel(*self)
    }
}

impl fmt::Display for KernelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Error returned when a filter name is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown filter `{0}`, expected one of: gaussian, box, unsharp, laplacian, identity, none")]
pub struct ParseKernelTypeError(
    /// The rejected name.
    pub String,
);

impl FromStr for KernelType {
    type Err = ParseKernelTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "gaussian" | "gaussian_blur" => Ok(KernelType::GaussianBlur),
            "box" | "box_blur" => Ok(KernelType::BoxBlur),
            "unsharp" | "unsharp_masking" => Ok(KernelType::UnsharpMasking),
            "laplacian" => Ok(KernelType::Laplacian),
            "identity" => Ok(KernelType::Identity),
            "none" => Ok(KernelType::None),
            _ => Err(ParseKernelTypeError(s.to_string())),
        }
    }
}

/// A square `N x N` matrix of convolution coefficients.
///
/// `N` must be odd so that the kernel has a centre tap; an even `N` fails to
/// compile. The centre `(N / 2, N / 2)` is aligned with the output sample.
///
/// # Example
///
/// ```rust
/// use rgbfilter_imgproc::filter::kernels::{Kernel, IDENTITY_5X5};
///
/// assert_eq!(IDENTITY_5X5.size(), 5);
/// assert_eq!(IDENTITY_5X5.center(), 2);
/// assert_eq!(IDENTITY_5X5.get(2, 2), 1.0);
/// assert_eq!(Kernel::<3>::zeros().sum(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel<const N: usize>([[f32; N]; N]);

impl<const N: usize> Kernel<N> {
    const ODD_SIZE: () = assert!(N % 2 == 1, "kernel size must be odd");

    /// Create a kernel from its rows of coefficients.
    pub const fn new(coefficients: [[f32; N]; N]) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::ODD_SIZE;
        Self(coefficients)
    }

    /// A kernel with every coefficient set to zero.
    pub const fn zeros() -> Self {
        Self::new([[0.0; N]; N])
    }

    /// Side length of the kernel.
    pub const fn size(&self) -> usize {
        N
    }

    /// Index of the centre tap on both axes.
    pub const fn center(&self) -> usize {
        N / 2
    }

    /// Coefficient at row `k`, column `l`.
    ///
    /// # Panics
    ///
    /// Panics if `k` or `l` is not below `N`.
    pub fn get(&self, k: usize, l: usize) -> f32 {
        self.0[k][l]
    }

    /// Sum of all coefficients.
    pub fn sum(&self) -> f32 {
        self.0.iter().flatten().sum()
    }

    /// The coefficients, row by row.
    pub fn as_rows(&self) -> &[[f32; N]; N] {
        &self.0
    }

    /// Iterate over `(dk, dl, weight)`, with offsets relative to the centre tap.
    pub fn iter_taps(&self) -> impl Iterator<Item = (isize, isize, f32)> + '_ {
        let half = (N / 2) as isize;
        self.0.iter().enumerate().flat_map(move |(k, row)| {
            row.iter()
                .enumerate()
                .map(move |(l, &w)| (k as isize - half, l as isize - half, w))
        })
    }
}

//                  1   4   6   4   1
//                  4  16  24  16   4
//    1 / 256   *   6  24  36  24   6
//                  4  16  24  16   4
//                  1   4   6   4   1
/// 5x5 gaussian blur, the outer product of `[1, 4, 6, 4, 1]` scaled by 1/256.
pub const GAUSSIAN_BLUR_5X5: Kernel<5> = Kernel::new([
    [1.0 / 256.0, 4.0 / 256.0, 6.0 / 256.0, 4.0 / 256.0, 1.0 / 256.0],
    [4.0 / 256.0, 16.0 / 256.0, 24.0 / 256.0, 16.0 / 256.0, 4.0 / 256.0],
    [6.0 / 256.0, 24.0 / 256.0, 36.0 / 256.0, 24.0 / 256.0, 6.0 / 256.0],
    [4.0 / 256.0, 16.0 / 256.0, 24.0 / 256.0, 16.0 / 256.0, 4.0 / 256.0],
    [1.0 / 256.0, 4.0 / 256.0, 6.0 / 256.0, 4.0 / 256.0, 1.0 / 256.0],
]);

/// 5x5 box blur, 1/25 everywhere.
pub const BOX_BLUR_5X5: Kernel<5> = Kernel::new([[1.0 / 25.0; 5]; 5]);

//                   1     4     6     4    1
//                   4    16    24    16    4
//    -1 / 256   *   6    24  -476    24    6
//                   4    16    24    16    4
//                   1     4     6     4    1
/// 5x5 unsharp masking, `2 * identity - gaussian`.
pub const UNSHARP_MASKING_5X5: Kernel<5> = Kernel::new([
    [-1.0 / 256.0, -4.0 / 256.0, -6.0 / 256.0, -4.0 / 256.0, -1.0 / 256.0],
    [-4.0 / 256.0, -16.0 / 256.0, -24.0 / 256.0, -16.0 / 256.0, -4.0 / 256.0],
    [-6.0 / 256.0, -24.0 / 256.0, 476.0 / 256.0, -24.0 / 256.0, -6.0 / 256.0],
    [-4.0 / 256.0, -16.0 / 256.0, -24.0 / 256.0, -16.0 / 256.0, -4.0 / 256.0],
    [-1.0 / 256.0, -4.0 / 256.0, -6.0 / 256.0, -4.0 / 256.0, -1.0 / 256.0],
]);

/// 5x5 laplacian, -1 everywhere except 24 at the centre.
pub const LAPLACIAN_5X5: Kernel<5> = Kernel::new([
    [-1.0, -1.0, -1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0, -1.0, -1.0],
    [-1.0, -1.0, 24.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0, -1.0, -1.0],
]);

/// 5x5 identity, 1 at the centre.
pub const IDENTITY_5X5: Kernel<5> = Kernel::new([
    [0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0],
]);

/// Look up the 5x5 kernel of a filter.
///
/// [`KernelType::None`] maps to an all-zero kernel; the engine never applies it.
///
/// # Example
///
/// ```rust
/// use rgbfilter_imgproc::filter::{get_kernel, kernels, KernelType};
///
/// assert_eq!(get_kernel(KernelType::BoxBlur), kernels::BOX_BLUR_5X5);
/// assert_eq!(get_kernel(KernelType::None).sum(), 0.0);
/// ```
pub fn get_kernel(kernel_type: KernelType) -> Kernel<5> {
    match kernel_type {
        KernelType::GaussianBlur => GAUSSIAN_BLUR_5X5,
        KernelType::BoxBlur => BOX_BLUR_5X5,
        KernelType::UnsharpMasking => UNSHARP_MASKING_5X5,
        KernelType::Laplacian => LAPLACIAN_5X5,
        KernelType::Identity => IDENTITY_5X5,
        KernelType::None => Kernel::zeros(),
    }
}

/// Row `N - 1` of Pascal's triangle.
fn binomial_row<const N: usize>() -> [f32; N] {
    let mut row = [0.0f32; N];
    row[0] = 1.0;
    for n in 1..N {
        for i in (1..=n).rev() {
            row[i] += row[i - 1];
        }
    }
    row
}

/// Create an `N x N` binomial (gaussian-like) blur kernel.
///
/// The outer product of a Pascal row with itself, normalized to sum 1. For
/// `N = 5` this is [`GAUSSIAN_BLUR_5X5`].
pub fn binomial_kernel<const N: usize>() -> Kernel<N> {
    let row = binomial_row::<N>();
    let norm = row.iter().sum::<f32>().powi(2);

    let mut data = [[0.0; N]; N];
    for (k, out) in data.iter_mut().enumerate() {
        for (l, w) in out.iter_mut().enumerate() {
            *w = row[k] * row[l] / norm;
        }
    }
    Kernel::new(data)
}

/// Create an `N x N` box blur kernel.
pub fn box_kernel<const N: usize>() -> Kernel<N> {
    Kernel::new([[1.0 / (N * N) as f32; N]; N])
}

/// Create an `N x N` identity kernel.
pub fn identity_kernel<const N: usize>() -> Kernel<N> {
    let mut data = [[0.0; N]; N];
    data[N / 2][N / 2] = 1.0;
    Kernel::new(data)
}

/// Create an `N x N` laplacian kernel: -1 everywhere, `N * N - 1` at the centre.
pub fn laplacian_kernel<const N: usize>() -> Kernel<N> {
    let mut data = [[-1.0; N]; N];
    data[N / 2][N / 2] = (N * N - 1) as f32;
    Kernel::new(data)
}

/// Create an `N x N` unsharp masking kernel, `2 * identity - binomial`.
pub fn unsharp_kernel<const N: usize>() -> Kernel<N> {
    let blur = binomial_kernel::<N>();
    let mut data = blur.0.map(|row| row.map(|w| -w));
    data[N / 2][N / 2] += 2.0;
    Kernel::new(data)
}
