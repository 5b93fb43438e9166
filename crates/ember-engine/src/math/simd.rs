//! Four-lane `f32` kernels backing `Vec4` and `Mat4`.
//!
//! On x86_64 these lower to SSE instructions (always available on that
//! target). Every other target gets a scalar loop with identical results.

pub(crate) type Lanes = [f32; 4];

#[cfg(target_arch = "x86_64")]
mod imp {
    use core::arch::x86_64::{
        __m128, _mm_add_ps, _mm_div_ps, _mm_loadu_ps, _mm_mul_ps, _mm_set1_ps, _mm_storeu_ps,
        _mm_sub_ps,
    };

    use super::Lanes;

    #[inline(always)]
    fn load(a: &Lanes) -> __m128 {
        // SAFETY: `a` points at four contiguous f32s; unaligned load has no
        // alignment requirement. SSE is part of the x86_64 baseline.
        unsafe { _mm_loadu_ps(a.as_ptr()) }
    }

    #[inline(always)]
    fn store(v: __m128) -> Lanes {
        let mut out = [0.0f32; 4];
        // SAFETY: `out` has room for exactly four f32s.
        unsafe { _mm_storeu_ps(out.as_mut_ptr(), v) };
        out
    }

    #[inline]
    pub fn add(a: Lanes, b: Lanes) -> Lanes {
        // SAFETY: SSE is part of the x86_64 baseline.
        store(unsafe { _mm_add_ps(load(&a), load(&b)) })
    }

    #[inline]
    pub fn sub(a: Lanes, b: Lanes) -> Lanes {
        // SAFETY: SSE is part of the x86_64 baseline.
        store(unsafe { _mm_sub_ps(load(&a), load(&b)) })
    }

    #[inline]
    pub fn mul(a: Lanes, b: Lanes) -> Lanes {
        // SAFETY: SSE is part of the x86_64 baseline.
        store(unsafe { _mm_mul_ps(load(&a), load(&b)) })
    }

    #[inline]
    pub fn scale(a: Lanes, s: f32) -> Lanes {
        // SAFETY: SSE is part of the x86_64 baseline.
        store(unsafe { _mm_mul_ps(load(&a), _mm_set1_ps(s)) })
    }

    #[inline]
    pub fn div_scalar(a: Lanes, s: f32) -> Lanes {
        // SAFETY: SSE is part of the x86_64 baseline.
        store(unsafe { _mm_div_ps(load(&a), _mm_set1_ps(s)) })
    }

    #[inline]
    pub fn blend(a: Lanes, wa: f32, b: Lanes, wb: f32) -> Lanes {
        // SAFETY: SSE is part of the x86_64 baseline.
        store(unsafe {
            _mm_add_ps(
                _mm_mul_ps(load(&a), _mm_set1_ps(wa)),
                _mm_mul_ps(load(&b), _mm_set1_ps(wb)),
            )
        })
    }

    #[inline]
    pub fn combine_columns(cols: &[Lanes; 4], w: Lanes) -> Lanes {
        // SAFETY: SSE is part of the x86_64 baseline.
        store(unsafe {
            let mut acc = _mm_mul_ps(load(&cols[0]), _mm_set1_ps(w[0]));
            acc = _mm_add_ps(acc, _mm_mul_ps(load(&cols[1]), _mm_set1_ps(w[1])));
            acc = _mm_add_ps(acc, _mm_mul_ps(load(&cols[2]), _mm_set1_ps(w[2])));
            _mm_add_ps(acc, _mm_mul_ps(load(&cols[3]), _mm_set1_ps(w[3])))
        })
    }
}

#[cfg(not(target_arch = "x86_64"))]
mod imp {
    use super::Lanes;

    #[inline]
    fn map2(a: Lanes, b: Lanes, f: impl Fn(f32, f32) -> f32) -> Lanes {
        [f(a[0], b[0]), f(a[1], b[1]), f(a[2], b[2]), f(a[3], b[3])]
    }

    #[inline]
    pub fn add(a: Lanes, b: Lanes) -> Lanes {
        map2(a, b, |x, y| x + y)
    }

    #[inline]
    pub fn sub(a: Lanes, b: Lanes) -> Lanes {
        map2(a, b, |x, y| x - y)
    }

    #[inline]
    pub fn mul(a: Lanes, b: Lanes) -> Lanes {
        map2(a, b, |x, y| x * y)
    }

    #[inline]
    pub fn scale(a: Lanes, s: f32) -> Lanes {
        a.map(|x| x * s)
    }

    #[inline]
    pub fn div_scalar(a: Lanes, s: f32) -> Lanes {
        a.map(|x| x / s)
    }

    #[inline]
    pub fn blend(a: Lanes, wa: f32, b: Lanes, wb: f32) -> Lanes {
        map2(a, b, |x, y| x * wa + y * wb)
    }

    #[inline]
    pub fn combine_columns(cols: &[Lanes; 4], w: Lanes) -> Lanes {
        let mut acc = scale(cols[0], w[0]);
        acc = add(acc, scale(cols[1], w[1]));
        acc = add(acc, scale(cols[2], w[2]));
        add(acc, scale(cols[3], w[3]))
    }
}

pub(crate) use imp::{add, blend, combine_columns, div_scalar, mul, scale, sub};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lanewise_ops() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [4.0, 3.0, 2.0, 1.0];
        assert_eq!(add(a, b), [5.0; 4]);
        assert_eq!(sub(a, b), [-3.0, -1.0, 1.0, 3.0]);
        assert_eq!(mul(a, b), [4.0, 6.0, 6.0, 4.0]);
        assert_eq!(scale(a, 2.0), [2.0, 4.0, 6.0, 8.0]);
        assert_eq!(div_scalar(a, 2.0), [0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn every_kernel_matches_per_lane_arithmetic() {
        let a = [-1.5, 0.1, 3.25e6, f32::MIN_POSITIVE];
        let b = [7.0, -0.3, 1.0e-3, 2.0];
        let lanes = |f: &dyn Fn(usize) -> f32| [f(0), f(1), f(2), f(3)];
        assert_eq!(sub(a, b), lanes(&|i| a[i] - b[i]));
        assert_eq!(mul(a, b), lanes(&|i| a[i] * b[i]));
        assert_eq!(scale(a, -0.7), lanes(&|i| a[i] * -0.7));
        assert_eq!(div_scalar(a, 3.0), lanes(&|i| a[i] / 3.0));
        assert_eq!(blend(a, 0.3, b, 0.6), lanes(&|i| a[i] * 0.3 + b[i] * 0.6));
    }

    #[test]
    fn blend_weights_each_side() {
        let a = [10.0, 0.0, 0.0, 0.0];
        let b = [0.0, 10.0, 0.0, 0.0];
        assert_eq!(blend(a, 0.25, b, 0.75), [2.5, 7.5, 0.0, 0.0]);
    }

    #[test]
    fn combine_columns_is_matrix_vector_product() {
        let cols = [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 2.0, 0.0, 0.0],
            [0.0, 0.0, 3.0, 0.0],
            [5.0, 6.0, 7.0, 1.0],
        ];
        assert_eq!(combine_columns(&cols, [1.0, 1.0, 1.0, 1.0]), [6.0, 8.0, 10.0, 1.0]);
    }
}
