use image::{DynamicImage, ImageBuffer, Pixel};
use ndarray::Array3;

use crate::balance::{BalanceParams, ColorBalancer};
use crate::element::Element;
use crate::error::{BalanceError, Result};

/// Balance an `image` buffer, viewed as `(height, width, channels)`.
///
/// Every channel, alpha included, shares the same pair of thresholds.
pub fn balance_image_buffer<P>(
    img: &ImageBuffer<P, Vec<P::Subpixel>>,
    params: &BalanceParams,
) -> Result<ImageBuffer<P, Vec<P::Subpixel>>>
where
    P: Pixel,
    P::Subpixel: Element,
{
    let (w, h) = img.dimensions();
    let channels = P::CHANNEL_COUNT as usize;
    let shape = (h as usize, w as usize, channels);
    let expected = shape.0 * shape.1 * shape.2;
    let mismatch = |actual: usize| BalanceError::ShapeMismatch {
        shape: vec![shape.0, shape.1, shape.2],
        expected,
        actual,
    };

    let raw = img.as_raw();
    let view = ndarray::ArrayView3::from_shape(shape, &raw[..expected.min(raw.len())])
        .map_err(|_| mismatch(raw.len()))?;

    let balanced: Array3<P::Subpixel> = ColorBalancer::new(params.clone())?.apply(&view)?;
    let pixels: Vec<P::Subpixel> = balanced.iter().copied().collect();
    let len = pixels.len();
    ImageBuffer::from_raw(w, h, pixels).ok_or_else(|| mismatch(len))
}

/// Balance any [`DynamicImage`] in its own sample type.
pub fn balance_dynamic_image(img: &DynamicImage, params: &BalanceParams) -> Result<DynamicImage> {
    let out = match img {
        DynamicImage::ImageLuma8(b) => DynamicImage::ImageLuma8(balance_image_buffer(b, params)?),
        DynamicImage::ImageLumaA8(b) => {
            DynamicImage::ImageLumaA8(balance_image_buffer(b, params)?)
        }
        DynamicImage::ImageRgb8(b) => DynamicImage::ImageRgb8(balance_image_buffer(b, params)?),
        DynamicImage::ImageRgba8(b) => DynamicImage::ImageRgba8(balance_image_buffer(b, params)?),
        DynamicImage::ImageLuma16(b) => {
            DynamicImage::ImageLuma16(balance_image_buffer(b, params)?)
        }
        DynamicImage::ImageLumaA16(b) => {
            DynamicImage::ImageLumaA16(balance_image_buffer(b, params)?)
        }
        DynamicImage::ImageRgb16(b) => DynamicImage::ImageRgb16(balance_image_buffer(b, params)?),
        DynamicImage::ImageRgba16(b) => {
            DynamicImage::ImageRgba16(balance_image_buffer(b, params)?)
        }
        DynamicImage::ImageRgb32F(b) => {
            DynamicImage::ImageRgb32F(balance_image_buffer(b, params)?)
        }
        DynamicImage::ImageRgba32F(b) => {
            DynamicImage::ImageRgba32F(balance_image_buffer(b, params)?)
        }
        other => {
            return Err(BalanceError::UnsupportedElementType(format!(
                "{:?}",
                other.color()
            )))
        }
    };
    Ok(out)
}
