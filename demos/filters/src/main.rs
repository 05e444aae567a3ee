use argh::FromArgs;
use std::path::PathBuf;

use rgbfilter::{
    image::ops,
    imgproc::{
        filter::{self, KernelType},
        parallel::ExecutionStrategy,
    },
};

#[derive(FromArgs)]
/// Apply a 5x5 convolution filter to an image
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to write the filtered image to
    #[argh(option, short = 'o')]
    output_path: PathBuf,

    /// filter to apply: gaussian, box, unsharp, laplacian, identity, none (default: gaussian)
    #[argh(option, short = 'f', default = "KernelType::GaussianBlur")]
    filter: KernelType,

    /// number of worker threads, 0 runs serially (default: global pool)
    #[argh(option, short = 't')]
    threads: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // read the image
    let rgb = image::open(&args.image_path)?.to_rgb8();
    let size = [rgb.width() as usize, rgb.height() as usize].into();
    let src = ops::from_rgb8(size, rgb.as_raw())?;

    let strategy = match args.threads {
        None => ExecutionStrategy::default(),
        Some(0) => ExecutionStrategy::Serial,
        Some(n) => ExecutionStrategy::Fixed(n),
    };

    // the no-op filter writes the input back unchanged
    let mut dst = src.clone();
    filter::filter_with_strategy(
        &src,
        &mut dst,
        &args.filter.kernel(),
        args.filter,
        strategy,
    )?;

    let out = image::RgbImage::from_raw(rgb.width(), rgb.height(), ops::to_rgb8(&dst))
        .ok_or("filtered buffer does not match the image size")?;
    out.save(&args.output_path)?;

    log::info!(
        "{} written to {}",
        args.filter,
        args.output_path.display()
    );

    Ok(())
}
