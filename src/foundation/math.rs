pub(crate) fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Normalized position of `v` within `[a, b]`, clamped.
///
/// Degenerate spans (`b <= a`) become a step at `a`.
pub(crate) fn inverse_lerp_clamped(a: f64, b: f64, v: f64) -> f64 {
    if b <= a {
        return if v >= a { 1.0 } else { 0.0 };
    }
    clamp01((v - a) / (b - a))
}
