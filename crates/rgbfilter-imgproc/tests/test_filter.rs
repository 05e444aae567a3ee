use approx::assert_relative_eq;
use rand::Rng;

use rgbfilter_image::{Grid, ImageError, ImageSize, Rgb};
use rgbfilter_imgproc::{
    filter::{self, kernels, FilterError, KernelType},
    parallel::ExecutionStrategy,
};

fn random_grid(size: ImageSize) -> Result<Grid, ImageError> {
    let mut rng = rand::rng();
    let data = (0..size.area())
        .map(|_| {
            Rgb::new(
                rng.random_range(-10.0..300.0),
                rng.random_range(0.0..1.0),
                rng.random_range(0.0..255.0),
            )
        })
        .collect();
    Grid::new(size, data)
}

#[test]
fn identity_preservation() -> Result<(), FilterError> {
    for size in [[1, 1], [3, 2], [5, 5], [17, 9]] {
        let src = random_grid(size.into())?;
        let mut dst = Grid::from_size_val(src.size(), Rgb::default())?;
        filter::filter(&src, &mut dst, &kernels::IDENTITY_5X5, KernelType::Identity)?;
        assert_eq!(dst, src);
    }
    Ok(())
}

#[test]
fn none_is_a_no_op() -> Result<(), FilterError> {
    let src = random_grid([8, 6].into())?;
    let sentinel = Grid::from_size_val(src.size(), Rgb::new(1.0, 2.0, 3.0))?;

    for kernel_type in KernelType::ALL {
        let mut dst = sentinel.clone();
        filter::filter(&src, &mut dst, &kernel_type.kernel(), KernelType::None)?;
        assert_eq!(dst, sentinel);
    }
    Ok(())
}

#[test]
fn box_blur_interior_averaging_and_border_dimming() -> Result<(), FilterError> {
    let value = Rgb::new(10.0, 20.0, 30.0);
    let src = Grid::from_size_val([9, 7].into(), value)?;
    let dst = filter::filtered(&src, KernelType::BoxBlur)?;

    for r in 2..src.rows() - 2 {
        for c in 2..src.cols() - 2 {
            let px = dst[(r, c)];
            assert_relative_eq!(px.r, value.r, epsilon = 1e-4);
            assert_relative_eq!(px.g, value.g, epsilon = 1e-4);
            assert_relative_eq!(px.b, value.b, epsilon = 1e-4);
        }
    }

    // only the 3x3 lower right block of taps is in bounds at (0, 0)
    let corner = dst[(0, 0)];
    assert_relative_eq!(corner.r, value.r * 9.0 / 25.0, epsilon = 1e-4);
    assert_relative_eq!(corner.g, value.g * 9.0 / 25.0, epsilon = 1e-4);
    assert_relative_eq!(corner.b, value.b * 9.0 / 25.0, epsilon = 1e-4);
    assert!(corner.g < dst[(3, 3)].g);

    // an edge sample away from the corners has 3x5 taps
    assert_relative_eq!(dst[(0, 3)].r, value.r * 15.0 / 25.0, epsilon = 1e-4);
    Ok(())
}

#[test]
fn laplacian_of_uniform_interior_is_zero() -> Result<(), FilterError> {
    let src = Grid::from_size_val([6, 6].into(), Rgb::splat(5.0))?;
    let dst = filter::filtered(&src, KernelType::Laplacian)?;

    assert_relative_eq!(dst[(2, 2)].r, 0.0, epsilon = 1e-4);
    assert_relative_eq!(dst[(3, 3)].b, 0.0, epsilon = 1e-4);
    // missing taps leave a positive response on the border
    assert_relative_eq!(dst[(0, 0)].g, 5.0 * (24.0 - 8.0), epsilon = 1e-4);
    Ok(())
}

#[test]
fn unsharp_masking_keeps_uniform_interior_and_sharpens_a_step() -> Result<(), FilterError> {
    let src = Grid::from_size_val([7, 7].into(), Rgb::splat(100.0))?;
    let dst = filter::filtered(&src, KernelType::UnsharpMasking)?;
    assert_relative_eq!(dst[(3, 3)].r, 100.0, epsilon = 1e-3);

    // vertical step: left half dark, right half bright
    let rows = (0..7)
        .map(|_| {
            (0..8)
                .map(|c| Rgb::splat(if c < 4 { 0.0 } else { 100.0 }))
                .collect()
        })
        .collect();
    let step = Grid::from_rows(rows)?;
    let sharp = filter::filtered(&step, KernelType::UnsharpMasking)?;
    assert!(sharp[(3, 3)].r < 0.0, "dark side undershoots");
    assert!(sharp[(3, 4)].r > 100.0, "bright side overshoots");
    Ok(())
}

#[test]
fn shape_preservation() -> Result<(), FilterError> {
    for size in [[1, 1], [1, 9], [9, 1], [4, 4], [13, 6]] {
        let src = random_grid(size.into())?;
        for kernel_type in KernelType::ALL {
            let dst = filter::filtered(&src, kernel_type)?;
            assert_eq!(dst.rows(), src.rows());
            assert_eq!(dst.cols(), src.cols());
        }
    }
    Ok(())
}

#[test]
fn strategies_agree() -> Result<(), FilterError> {
    let src = random_grid([31, 19].into())?;
    let kernel = kernels::GAUSSIAN_BLUR_5X5;

    let mut reference = Grid::from_size_val(src.size(), Rgb::default())?;
    filter::filter_with_strategy(
        &src,
        &mut reference,
        &kernel,
        KernelType::GaussianBlur,
        ExecutionStrategy::Serial,
    )?;

    for strategy in [
        ExecutionStrategy::ParallelRows,
        ExecutionStrategy::ParallelElements,
        ExecutionStrategy::Fixed(3),
    ] {
        let mut dst = Grid::from_size_val(src.size(), Rgb::default())?;
        filter::filter_with_strategy(&src, &mut dst, &kernel, KernelType::GaussianBlur, strategy)?;
        assert_eq!(dst, reference, "{strategy:?}");
    }
    Ok(())
}

#[test]
fn rejection_of_malformed_input() {
    assert_eq!(Grid::from_rows(vec![]), Err(ImageError::EmptyImage));
    assert_eq!(
        Grid::from_rows(vec![vec![Rgb::default(); 3], vec![Rgb::default(); 1]]),
        Err(ImageError::RaggedRows {
            row: 1,
            expected: 3,
            found: 1
        })
    );

    let empty = Grid::new([0, 3].into(), vec![]).unwrap();
    let mut dst = empty.clone();
    assert_eq!(
        filter::filter(&empty, &mut dst, &kernels::BOX_BLUR_5X5, KernelType::BoxBlur),
        Err(FilterError::InvalidInput(ImageError::EmptyImage))
    );
    assert_eq!(
        filter::filtered(&empty, KernelType::GaussianBlur),
        Err(FilterError::InvalidInput(ImageError::EmptyImage))
    );
}

#[test]
fn outputs_are_not_clamped() -> Result<(), FilterError> {
    let mut src = Grid::from_size_val([5, 5].into(), Rgb::splat(255.0))?;
    src[(2, 2)] = Rgb::splat(0.0);
    let dst = filter::filtered(&src, KernelType::Laplacian)?;

    // 24 * 0 - 24 * 255
    assert_relative_eq!(dst[(2, 2)].r, -24.0 * 255.0, epsilon = 1e-2);
    Ok(())
}
