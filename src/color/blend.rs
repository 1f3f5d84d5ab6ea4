//! Defines color blending trait and standard blend functions

use super::ColorRgba;
use super::helper::mul_alpha;

/// Defines some kind of color blending function
pub trait Blend {
    /// The first parameter is the existing value in the color buffer,
    /// the second is the color produced by the pixel shader.
    ///
    /// The returned color is stored in the color buffer.
    fn blend(&self, old: ColorRgba, new: ColorRgba) -> ColorRgba;
}

impl<F> Blend for F where F: Fn(ColorRgba, ColorRgba) -> ColorRgba {
    #[inline]
    fn blend(&self, old: ColorRgba, new: ColorRgba) -> ColorRgba {
        self(old, new)
    }
}

/// Replaces the existing color with the shaded one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBlend;

impl Blend for DefaultBlend {
    #[inline(always)]
    fn blend(&self, _: ColorRgba, new: ColorRgba) -> ColorRgba { new }
}

/// Alpha-over blending, `new.rgb * new.a + old.rgb * (1 - new.a)`.
///
/// The resulting alpha is `new.a + old.a * (1 - new.a)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlphaBlend;

impl Blend for AlphaBlend {
    fn blend(&self, old: ColorRgba, new: ColorRgba) -> ColorRgba {
        let inverse = 255 - new.a;

        let channel = |n: u8, o: u8| mul_alpha(n, new.a).saturating_add(mul_alpha(o, inverse));

        ColorRgba {
            r: channel(new.r, old.r),
            g: channel(new.g, old.g),
            b: channel(new.b, old.b),
            a: new.a.saturating_add(mul_alpha(old.a, inverse)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_blend_replaces() {
        assert_eq!(DefaultBlend.blend(ColorRgba::RED, ColorRgba::BLUE), ColorRgba::BLUE);
    }

    #[test]
    fn test_alpha_blend_endpoints() {
        let old = ColorRgba::new(10, 20, 30, 255);

        assert_eq!(AlphaBlend.blend(old, ColorRgba::GREEN), ColorRgba::GREEN);
        assert_eq!(AlphaBlend.blend(old, ColorRgba::GREEN.with_alpha(0)), old);
    }

    #[test]
    fn test_alpha_blend_half() {
        let mixed = AlphaBlend.blend(ColorRgba::BLACK, ColorRgba::WHITE.with_alpha(128));

        assert!(mixed.r >= 127 && mixed.r <= 129);
        assert_eq!(mixed.a, 255);
    }

    #[test]
    fn test_closure_blend() {
        let keep_old = |old: ColorRgba, _: ColorRgba| old;

        assert_eq!(keep_old.blend(ColorRgba::RED, ColorRgba::BLUE), ColorRgba::RED);
    }
}
