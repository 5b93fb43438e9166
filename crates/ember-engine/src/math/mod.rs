//! Vector and matrix math.
//!
//! `Vec4` and `Mat4` arithmetic runs on four-lane SIMD kernels (SSE on
//! x86_64, scalar elsewhere). `Vec2`/`Vec3` are plain scalar code.
//!
//! Conventions:
//! - matrices are column-major
//! - `lerp(a, b, t)` returns `t * a + (1 - t) * b`, so `t = 1` selects `a`
//! - normalizing a zero-length vector is a caller error (NaN result)

mod mat4;
mod scalar;
mod simd;
mod vec2;
mod vec3;
mod vec4;

pub use mat4::Mat4;
pub use scalar::{clamp, deg, rad, PI};
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;
