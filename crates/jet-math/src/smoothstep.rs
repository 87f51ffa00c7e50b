//! Bounded cubic blending kernel.
//!
//! `smoothstep` maps the normalized distance from a transition edge,
//! `x = (r − r_edge) / half_width`, onto a weight that is 1 inside, 0 outside
//! and C¹ across the band `[-1, 1]`.

/// Cubic step: 1 at x ≤ −1, ½ at 0, 0 at x ≥ 1, zero slope at ±1.
#[inline]
pub fn smoothstep(x: f64) -> f64 {
    let modx = x.clamp(-1.0, 1.0);
    0.5 - modx * (3.0 - modx * modx) / 4.0
}

/// Linear blend `(inner − outer)·w + outer`.
#[inline]
pub fn blend(inner: f64, outer: f64, weight: f64) -> f64 {
    (inner - outer) * weight + outer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothstep_anchor_values() {
        assert!((smoothstep(-1.0) - 1.0).abs() < 1e-15);
        assert!((smoothstep(0.0) - 0.5).abs() < 1e-15);
        assert!(smoothstep(1.0).abs() < 1e-15);
    }

    #[test]
    fn test_smoothstep_saturates() {
        assert_eq!(smoothstep(-7.5), 1.0);
        assert_eq!(smoothstep(3.2), 0.0);
    }

    #[test]
    fn test_smoothstep_flat_at_band_edges() {
        let h = 1e-6;
        for x in [-1.0, 1.0] {
            let fd = (smoothstep(x + h) - smoothstep(x - h)) / (2.0 * h);
            assert!(fd.abs() < 1e-5, "slope at {x} = {fd}");
        }
    }

    #[test]
    fn test_smoothstep_steepest_at_midpoint() {
        let h = 1e-6;
        let slope = |x: f64| (smoothstep(x + h) - smoothstep(x - h)) / (2.0 * h);
        assert!((slope(0.0) + 0.75).abs() < 1e-6);
        for &x in &[-0.9, -0.4, 0.3, 0.75] {
            assert!(slope(x) < 0.0 && slope(x) > slope(0.0));
        }
    }

    #[test]
    fn test_blend_endpoints() {
        assert_eq!(blend(3.0, 1.0, 1.0), 3.0);
        assert_eq!(blend(3.0, 1.0, 0.0), 1.0);
        assert!((blend(3.0, 1.0, 0.5) - 2.0).abs() < 1e-15);
    }
}
