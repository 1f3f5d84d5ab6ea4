//! Images used as textures by model shaders

use crate::error::{RenderError, RenderResult};
use crate::color::ColorRgba;

/// Raw 8-bit image with interleaved channels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl Image {
    /// Fails with `InvalidImage` if either dimension is zero or `channels` is not between
    /// one and four, or `ImageDataLength` if `data` does not hold exactly
    /// `width * height * channels` bytes.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> RenderResult<Image> {
        if width == 0 || height == 0 || channels == 0 || channels > 4 {
            return Err(RenderError::InvalidImage { width, height, channels: channels as u32 });
        }

        let expected = width as usize * height as usize * channels as usize;

        if data.len() != expected {
            return Err(RenderError::ImageDataLength { expected, actual: data.len() });
        }

        Ok(Image { width, height, channels, data })
    }

    /// Build an RGBA image from a slice of colors
    pub fn from_colors(width: u32, height: u32, colors: &[ColorRgba]) -> RenderResult<Image> {
        let data = colors.iter().flat_map(|c| c.to_array().to_vec()).collect();

        Image::new(width, height, 4, data)
    }

    #[inline(always)]
    pub fn width(&self) -> u32 { self.width }

    #[inline(always)]
    pub fn height(&self) -> u32 { self.height }

    #[inline(always)]
    pub fn channels(&self) -> u8 { self.channels }

    #[inline]
    pub fn data(&self) -> &[u8] { &self.data }

    /// Channels of the pixel at `(x, y)`
    pub fn at(&self, x: u32, y: u32) -> RenderResult<&[u8]> {
        if x >= self.width || y >= self.height {
            return Err(RenderError::InvalidPixelCoordinate(x as i64, y as i64));
        }

        let channels = self.channels as usize;
        let start = (y as usize * self.width as usize + x as usize) * channels;

        Ok(&self.data[start..start + channels])
    }

    /// Nearest-sample lookup at normalized coordinates.
    ///
    /// Coordinates are clamped to `[0, 1]`, so interpolation error at the edge of
    /// a texture never produces an out-of-range read.
    pub fn sample(&self, u: f32, v: f32) -> RenderResult<&[u8]> {
        let x = nearest(u, self.width);
        let y = nearest(v, self.height);

        self.at(x, y)
    }

    /// Nearest-sample lookup expanded to RGBA
    pub fn texel(&self, u: f32, v: f32) -> RenderResult<ColorRgba> {
        let pixel = self.sample(u, v)?;

        Ok(match pixel {
            &[l] => ColorRgba::new(l, l, l, 255),
            &[l, a] => ColorRgba::new(l, l, l, a),
            &[r, g, b] => ColorRgba::new(r, g, b, 255),
            &[r, g, b, a] => ColorRgba::new(r, g, b, a),
            _ => unreachable!("images have one to four channels"),
        })
    }
}

#[inline]
fn nearest(coord: f32, size: u32) -> u32 {
    let coord = if coord.is_nan() { 0.0 } else { coord.max(0.0).min(1.0) };

    (coord * (size.max(1) as f32 - 1.0)).round() as u32
}
