//! Fixed-point channel helpers

/// Multiply an 8-bit channel by an 8-bit alpha, treating `255` as one.
///
/// Rounds to nearest, so `mul_alpha(255, 255) == 255` and `mul_alpha(x, 0) == 0`.
#[inline]
pub fn mul_alpha(channel: u8, alpha: u8) -> u8 {
    let product = channel as u32 * alpha as u32 + 128;

    ((product + (product >> 8)) >> 8) as u8
}
