//! Scalar YUV to RGB conversion, BT.601 limited ("studio") range.
//!
//! Luma uses the 16..=235 active range, chroma 16..=240. The integer
//! coefficients are the broadcast-standard ones:
//!
//! ```text
//! C = Y - 16
//! D = U - 128
//! E = V - 128
//! R = clip((298 * C           + 409 * E + 128) >> 8)
//! G = clip((298 * C - 100 * D - 208 * E + 128) >> 8)
//! B = clip((298 * C + 516 * D           + 128) >> 8)
//! ```

/// Convert one (Y, U, V) sample triple into (R, G, B)
pub fn yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let c = i32::from(y) - 16;
    let d = i32::from(u) - 128;
    let e = i32::from(v) - 128;

    [
        clip((298 * c + 409 * e + 128) >> 8),
        clip((298 * c - 100 * d - 208 * e + 128) >> 8),
        clip((298 * c + 516 * d + 128) >> 8),
    ]
}

/// Grayscale value of a pixel given its luma sample.
///
/// The Y plane already is the grayscale image, so this is the identity; any
/// additional transform here would be wrong.
pub fn luma_to_gray(y: u8) -> u8 {
    y
}

/// Saturate instead of wrapping, out of gamut values land on 0 or 255
fn clip(z: i32) -> u8 {
    z.clamp(0, 255) as u8
}
