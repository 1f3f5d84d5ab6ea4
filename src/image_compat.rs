//! Conversions to and from the `image` crate

use crate::error::RenderResult;
use crate::color::ColorRgba;
use crate::pixels::ColorBuffer;
use crate::texture::Image;

pub trait ImageColorBuffer {
    /// Copy the buffer into an RGBA image, or `None` if the dimensions are inconsistent
    fn copy_to_image(&self) -> Option<image::RgbaImage>;
}

impl ImageColorBuffer for ColorBuffer {
    fn copy_to_image(&self) -> Option<image::RgbaImage> {
        let mut res = Vec::with_capacity(self.as_slice().len() * 4);

        for color in self.as_slice() {
            res.extend_from_slice(&color.to_array());
        }

        image::RgbaImage::from_raw(self.width(), self.height(), res)
    }
}

/// Build a texture from any decoded image, keeping all four channels
pub fn texture_from_image(image: &image::DynamicImage) -> RenderResult<Image> {
    let rgba = image.to_rgba8();

    let colors: Vec<ColorRgba> = rgba.pixels().map(|p| ColorRgba::from(p.0)).collect();

    Image::from_colors(rgba.width(), rgba.height(), &colors)
}
