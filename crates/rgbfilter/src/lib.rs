#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use rgbfilter_image as image;

#[doc(inline)]
pub use rgbfilter_imgproc as imgproc;
