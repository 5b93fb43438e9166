use core::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use bytemuck::{Pod, Zeroable};

use super::simd;
use super::{Vec3, Vec4, PI};

/// Column-major 4x4 matrix.
///
/// `cols[c]` is column `c`; element `(row r, col c)` is `cols[c].r-th lane`.
/// The memory layout matches a WGSL `mat4x4<f32>` so it uploads as-is.
///
/// Composition note: `a *= b` stores `b * a` (the right operand is applied
/// *after* the existing transform). `translate`, `rotate` and `scale` chain
/// through `*=`, so `Mat4::scaling(s).translate(d)` scales first, then
/// translates.
#[repr(C, align(16))]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    pub cols: [Vec4; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4::diagonal(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self { cols: [c0, c1, c2, c3] }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    #[inline]
    pub const fn diagonal(d0: f32, d1: f32, d2: f32, d3: f32) -> Self {
        Self::from_cols(
            Vec4::new(d0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, d1, 0.0, 0.0),
            Vec4::new(0.0, 0.0, d2, 0.0),
            Vec4::new(0.0, 0.0, 0.0, d3),
        )
    }

    #[inline]
    pub const fn diagonal_splat(d: f32) -> Self {
        Self::diagonal(d, d, d, d)
    }

    pub const fn translation(d: Vec3) -> Self {
        Self::from_cols(
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(d.x, d.y, d.z, 1.0),
        )
    }

    /// Rotation of `angle` radians about `axis` (normalized internally).
    pub fn rotation(mut axis: Vec3, angle: f32) -> Self {
        axis.normalize();
        let Vec3 { x, y, z } = axis;

        let (st, ct) = angle.sin_cos();
        let k = 1.0 - ct;

        Self::from_cols(
            Vec4::new(x * x * k + ct, x * y * k + z * st, x * z * k - y * st, 0.0),
            Vec4::new(y * x * k - z * st, y * y * k + ct, y * z * k + x * st, 0.0),
            Vec4::new(z * x * k + y * st, z * y * k - x * st, z * z * k + ct, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        )
    }

    #[inline]
    pub const fn scaling(s: Vec3) -> Self {
        Self::diagonal(s.x, s.y, s.z, 1.0)
    }

    /// OpenGL-style perspective projection. `fov` is the full vertical
    /// field of view in **degrees**.
    pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let cot = 1.0 / (fov * PI / 360.0).tan();

        let mut m = Self::default();
        m.cols[0].x = cot / aspect;
        m.cols[1].y = cot;
        m.cols[2].z = (near + far) / (near - far);
        m.cols[2].w = -1.0;
        m.cols[3].z = (2.0 * near * far) / (near - far);
        m
    }

    /// Orthographic projection.
    ///
    /// The `[1][1]` entry is assigned twice and the depth term `2 / (near - far)`
    /// wins, so the vertical scale is *not* `2 / (top - bottom)` and `[2][2]`
    /// stays zero. Existing callers depend on this exact output.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let mut m = Self::default();
        m.cols[0].x = 2.0 / (right - left);
        m.cols[1].y = 2.0 / (top - bottom);
        m.cols[1].y = 2.0 / (near - far);
        m.cols[3].w = 1.0;

        m.cols[3].x = (left + right) / (left - right);
        m.cols[3].y = (bottom + top) / (bottom - top);
        m.cols[3].z = (far + near) / (near - far);
        m
    }

    /// View matrix looking from `eye` towards `center`.
    ///
    /// The side vector is `forward x up` and is not renormalized, so `up`
    /// should be perpendicular to the view direction.
    pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Self {
        let f = (center - eye).unit();
        let s = f.cross(up);
        let u = s.cross(f);

        Self::from_cols(
            Vec4::new(s.x, u.x, -f.x, 0.0),
            Vec4::new(s.y, u.y, -f.y, 0.0),
            Vec4::new(s.z, u.z, -f.z, 0.0),
            Vec4::new(-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0),
        )
    }

    /// `self = translation(d) * self`
    #[inline]
    pub fn translate(&mut self, d: Vec3) -> &mut Self {
        *self *= Self::translation(d);
        self
    }

    /// `self = rotation(axis, angle) * self`
    #[inline]
    pub fn rotate(&mut self, axis: Vec3, angle: f32) -> &mut Self {
        *self *= Self::rotation(axis, angle);
        self
    }

    /// `self = scaling(s) * self`
    #[inline]
    pub fn scale(&mut self, s: Vec3) -> &mut Self {
        *self *= Self::scaling(s);
        self
    }

    /// Returns the transpose.
    pub fn transposed(&self) -> Self {
        let c = &self.cols;
        Self::from_cols(
            Vec4::new(c[0].x, c[1].x, c[2].x, c[3].x),
            Vec4::new(c[0].y, c[1].y, c[2].y, c[3].y),
            Vec4::new(c[0].z, c[1].z, c[2].z, c[3].z),
            Vec4::new(c[0].w, c[1].w, c[2].w, c[3].w),
        )
    }

    /// Element at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.cols[col].to_array()[row]
    }

    #[inline]
    pub fn to_cols_array(&self) -> [[f32; 4]; 4] {
        self.cols.map(Vec4::to_array)
    }

    fn map_cols(&self, f: impl Fn([f32; 4]) -> [f32; 4]) -> Self {
        Self { cols: self.cols.map(|c| Vec4::from_array(f(c.to_array()))) }
    }

    fn zip_cols(&self, rhs: &Self, f: impl Fn([f32; 4], [f32; 4]) -> [f32; 4]) -> Self {
        let mut out = Self::default();
        for i in 0..4 {
            out.cols[i] = Vec4::from_array(f(self.cols[i].to_array(), rhs.cols[i].to_array()));
        }
        out
    }
}

impl Add for Mat4 {
    type Output = Mat4;
    #[inline]
    fn add(self, rhs: Mat4) -> Mat4 {
        self.zip_cols(&rhs, simd::add)
    }
}

impl Sub for Mat4 {
    type Output = Mat4;
    #[inline]
    fn sub(self, rhs: Mat4) -> Mat4 {
        self.zip_cols(&rhs, simd::sub)
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    #[inline]
    fn mul(self, v: Vec4) -> Vec4 {
        let cols = self.to_cols_array();
        Vec4::from_array(simd::combine_columns(&cols, v.to_array()))
    }
}

/// Transforms a point (`w = 1`) and drops the resulting `w`.
impl Mul<Vec3> for Mat4 {
    type Output = Vec3;
    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        let r = self * Vec4::new(v.x, v.y, v.z, 1.0);
        Vec3::new(r.x, r.y, r.z)
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, rhs: Mat4) -> Mat4 {
        Mat4 { cols: rhs.cols.map(|c| self * c) }
    }
}

impl Mul<f32> for Mat4 {
    type Output = Mat4;
    #[inline]
    fn mul(self, s: f32) -> Mat4 {
        self.map_cols(|c| simd::scale(c, s))
    }
}

impl AddAssign for Mat4 {
    #[inline]
    fn add_assign(&mut self, rhs: Mat4) {
        *self = *self + rhs;
    }
}

impl SubAssign for Mat4 {
    #[inline]
    fn sub_assign(&mut self, rhs: Mat4) {
        *self = *self - rhs;
    }
}

/// `a *= b` computes `b * a`.
impl MulAssign for Mat4 {
    #[inline]
    fn mul_assign(&mut self, rhs: Mat4) {
        *self = rhs * *self;
    }
}

impl MulAssign<f32> for Mat4 {
    #[inline]
    fn mul_assign(&mut self, s: f32) {
        *self = *self * s;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn approx_eq(a: &Mat4, b: &Mat4) -> bool {
        a.to_cols_array()
            .iter()
            .flatten()
            .zip(b.to_cols_array().iter().flatten())
            .all(|(x, y)| (x - y).abs() < EPS)
    }

    fn approx_vec3(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    // ── identity ──────────────────────────────────────────────────────────

    #[test]
    fn identity_times_vec4_is_unchanged() {
        let v = Vec4::new(1.5, -2.0, 3.25, 0.5);
        assert_eq!(Mat4::identity() * v, v);
    }

    #[test]
    fn identity_times_matrix_is_unchanged() {
        let m = Mat4::rotation(Vec3::new(1.0, 1.0, 0.0), 0.7);
        assert!(approx_eq(&(Mat4::IDENTITY * m), &m));
        assert!(approx_eq(&(m * Mat4::IDENTITY), &m));
    }

    // ── translation ───────────────────────────────────────────────────────

    #[test]
    fn translation_then_inverse_is_identity() {
        let d = Vec3::new(3.0, -7.5, 0.25);
        let m = Mat4::translation(d) * Mat4::translation(-d);
        assert!(approx_eq(&m, &Mat4::IDENTITY));
    }

    #[test]
    fn translation_moves_points_not_directions() {
        let m = Mat4::translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m * Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m * Vec4::new(1.0, 0.0, 0.0, 0.0), Vec4::new(1.0, 0.0, 0.0, 0.0));
    }

    // ── composition order ─────────────────────────────────────────────────

    #[test]
    fn mul_assign_pre_multiplies() {
        let a = Mat4::scaling(Vec3::new(2.0, 2.0, 2.0));
        let b = Mat4::translation(Vec3::new(1.0, 0.0, 0.0));
        let mut m = a;
        m *= b;
        assert_eq!(m, b * a);
        assert_ne!(m, a * b);
    }

    #[test]
    fn scale_then_translate_chain() {
        let mut m = Mat4::scaling(Vec3::new(2.0, 2.0, 1.0));
        m.translate(Vec3::new(1.0, 0.0, 0.0));
        // Scaled first, translated second.
        assert_eq!(m * Vec3::new(1.0, 1.0, 0.0), Vec3::new(3.0, 2.0, 0.0));
    }

    // ── rotation ──────────────────────────────────────────────────────────

    #[test]
    fn rotation_quarter_turn_about_z() {
        let m = Mat4::rotation(Vec3::new(0.0, 0.0, 5.0), PI / 2.0);
        assert!(approx_vec3(m * Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn rotate_chains_through_mul_assign() {
        let mut m = Mat4::identity();
        m.rotate(Vec3::new(0.0, 0.0, 1.0), PI / 2.0).rotate(Vec3::new(0.0, 0.0, 1.0), PI / 2.0);
        assert!(approx_vec3(m * Vec3::new(1.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)));
    }

    // ── arithmetic ────────────────────────────────────────────────────────

    #[test]
    fn add_sub_and_scalar_mul() {
        let a = Mat4::diagonal_splat(2.0);
        let b = Mat4::IDENTITY;
        assert_eq!(a + b, Mat4::diagonal_splat(3.0));
        assert_eq!(a - b, Mat4::IDENTITY);
        assert_eq!(b * 4.0, Mat4::diagonal_splat(4.0));

        let mut c = a;
        c += b;
        c -= b;
        c *= 0.5;
        assert_eq!(c, Mat4::IDENTITY);
    }

    #[test]
    fn transposed_swaps_rows_and_columns() {
        let m = Mat4::translation(Vec3::new(1.0, 2.0, 3.0));
        let t = m.transposed();
        assert_eq!(t.get(3, 0), 1.0);
        assert_eq!(t.get(0, 3), 0.0);
        assert_eq!(t.transposed(), m);
    }

    // ── projections ───────────────────────────────────────────────────────

    #[test]
    fn perspective_uses_degrees() {
        let m = Mat4::perspective(90.0, 2.0, 1.0, 3.0);
        assert!((m.get(1, 1) - 1.0).abs() < EPS);
        assert!((m.get(0, 0) - 0.5).abs() < EPS);
        assert_eq!(m.get(3, 2), -1.0);
        assert_eq!(m.get(2, 2), -2.0);
        assert_eq!(m.get(2, 3), -3.0);
    }

    #[test]
    fn orthographic_vertical_term_is_overwritten_by_depth_term() {
        let m = Mat4::orthographic(-2.0, 2.0, -1.0, 1.0, 0.5, 4.5);
        assert_eq!(m.get(0, 0), 0.5);
        // 2 / (near - far), not 2 / (top - bottom) = 1.
        assert_eq!(m.get(1, 1), -0.5);
        assert_eq!(m.get(2, 2), 0.0);
        assert_eq!(m.get(0, 3), 0.0);
        assert_eq!(m.get(1, 3), 0.0);
        assert_eq!(m.get(2, 3), -1.25);
        assert_eq!(m.get(3, 3), 1.0);
    }

    #[test]
    fn look_at_maps_eye_to_origin_and_target_down_negative_z() {
        let eye = Vec3::new(0.0, 0.0, 5.0);
        let m = Mat4::look_at(eye, Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        let fwd = m * Vec4::new(0.0, 0.0, -1.0, 0.0);
        assert!(approx_vec3(Vec3::new(fwd.x, fwd.y, fwd.z), Vec3::new(0.0, 0.0, -1.0)));
        assert!(approx_vec3(m * eye, Vec3::ZERO));
        assert_eq!(m.get(2, 3), -5.0);
        assert_eq!(m.get(3, 3), 1.0);
    }

    #[test]
    fn layout_matches_gpu_mat4() {
        assert_eq!(core::mem::size_of::<Mat4>(), 64);
        let m = Mat4::translation(Vec3::new(7.0, 8.0, 9.0));
        let bytes: &[f32] = bytemuck::cast_slice(core::slice::from_ref(&m));
        assert_eq!(&bytes[12..16], &[7.0, 8.0, 9.0, 1.0]);
    }
}
