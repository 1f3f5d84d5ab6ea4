//! RGBA color type used by color buffers and shaders

pub mod blend;
pub mod helper;

pub use self::blend::{Blend, DefaultBlend, AlphaBlend};

/// 8-bit per channel RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct ColorRgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColorRgba {
    pub const TRANSPARENT: ColorRgba = ColorRgba::new(0, 0, 0, 0);
    pub const BLACK: ColorRgba = ColorRgba::new(0, 0, 0, 255);
    pub const WHITE: ColorRgba = ColorRgba::new(255, 255, 255, 255);
    pub const RED: ColorRgba = ColorRgba::new(255, 0, 0, 255);
    pub const GREEN: ColorRgba = ColorRgba::new(0, 255, 0, 255);
    pub const BLUE: ColorRgba = ColorRgba::new(0, 0, 255, 255);
    /// Placeholder color for geometry without a material
    pub const MAGENTA: ColorRgba = ColorRgba::new(255, 0, 255, 255);

    #[inline(always)]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> ColorRgba {
        ColorRgba { r, g, b, a }
    }

    /// Copy the color, but with the given alpha channel value
    #[inline]
    pub fn with_alpha(self, a: u8) -> ColorRgba {
        ColorRgba { a, ..self }
    }

    /// Channels in RGBA order
    #[inline]
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Per-channel wrapping addition of the RGB channels, keeping this color's alpha
    #[inline]
    pub fn wrapping_add_rgb(self, other: ColorRgba) -> ColorRgba {
        ColorRgba {
            r: self.r.wrapping_add(other.r),
            g: self.g.wrapping_add(other.g),
            b: self.b.wrapping_add(other.b),
            a: self.a,
        }
    }
}

impl From<[u8; 4]> for ColorRgba {
    #[inline]
    fn from([r, g, b, a]: [u8; 4]) -> ColorRgba {
        ColorRgba { r, g, b, a }
    }
}

impl From<ColorRgba> for [u8; 4] {
    #[inline]
    fn from(color: ColorRgba) -> [u8; 4] {
        color.to_array()
    }
}
