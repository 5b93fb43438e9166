pub const PI: f32 = core::f32::consts::PI;

/// Clamps `val` into `[min, max]`.
///
/// Unlike `f32::clamp` this never panics on `min > max`; the lower bound is
/// checked first.
#[inline]
pub fn clamp(val: f32, min: f32, max: f32) -> f32 {
    if val < min {
        min
    } else if val > max {
        max
    } else {
        val
    }
}

/// Degrees to radians.
#[inline]
pub fn rad(deg: f32) -> f32 {
    deg * (PI / 180.0)
}

/// Radians to degrees.
#[inline]
pub fn deg(rad: f32) -> f32 {
    rad * (180.0 / PI)
}
