//! Mean and reduced-quantity helpers.

/// Harmonic mean `2ab / (a + b)`.
///
/// Returns `0.0` when both inputs are zero, so a frictionless material
/// paired with itself stays frictionless instead of producing NaN.
#[inline]
pub fn harmonic_mean(a: f64, b: f64) -> f64 {
    let sum = a + b;
    if sum == 0.0 {
        0.0
    } else {
        2.0 * a * b / sum
    }
}

/// Reduced quantity `ab / (a + b)` (effective radius, effective mass).
///
/// Callers must reject non-positive inputs beforehand.
#[inline]
pub fn reduced(a: f64, b: f64) -> f64 {
    a * b / (a + b)
}
