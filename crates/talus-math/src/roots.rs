//! JKR contact-radius root finder.
//!
//! For an adhesive Hertzian contact (Johnson–Kendall–Roberts), the
//! overlap `δ` and the contact radius `a` are related by
//!
//! ```text
//! δ = a² / R − √(2π w a / E)
//! ```
//!
//! `f(a) = a²/R − √(k a) − δ` with `k = 2πw/E` is convex on `a > 0` and
//! increasing for `a > a_c`, the radius at which the neck becomes
//! unstable. Newton iteration started to the right of the root on the
//! stable branch therefore decreases monotonically onto it.

/// Solver for the stable-branch JKR contact radius.
#[derive(Debug, Clone, Copy)]
pub struct JkrRadiusSolver {
    /// Effective radius `R`.
    pub effective_radius: f64,
    /// Effective Young's modulus `E`.
    pub effective_modulus: f64,
    /// Work of adhesion `w`.
    pub work_of_adhesion: f64,
}

impl JkrRadiusSolver {
    const MAX_ITERATIONS: u32 = 64;
    const RELATIVE_TOLERANCE: f64 = 1.0e-14;

    pub fn new(effective_radius: f64, effective_modulus: f64, work_of_adhesion: f64) -> Self {
        Self {
            effective_radius,
            effective_modulus,
            work_of_adhesion,
        }
    }

    fn k(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.work_of_adhesion / self.effective_modulus
    }

    /// Radius at which `dδ/da = 0`; the neck snaps below it.
    pub fn critical_radius(&self) -> f64 {
        (self.effective_radius * self.effective_radius * self.k() / 16.0).cbrt()
    }

    /// Most negative overlap the adhesive neck can sustain.
    pub fn critical_overlap(&self) -> f64 {
        let ac = self.critical_radius();
        ac * ac / self.effective_radius - (self.k() * ac).sqrt()
    }

    fn residual(&self, a: f64, overlap: f64) -> f64 {
        a * a / self.effective_radius - (self.k() * a).sqrt() - overlap
    }

    /// Solves for the contact radius at `overlap`.
    ///
    /// `warm_start` is the radius from the previous step; it is used only
    /// when it lies on the stable branch to the right of the root.
    /// Returns `None` when `overlap` is below the critical overlap and no
    /// stable neck exists.
    pub fn solve(&self, overlap: f64, warm_start: f64) -> Option<f64> {
        let r = self.effective_radius;

        if self.work_of_adhesion <= 0.0 {
            return (overlap >= 0.0).then(|| (r * overlap).sqrt());
        }

        if overlap < self.critical_overlap() {
            return None;
        }

        let k = self.k();
        let ac = self.critical_radius();

        // a_H + 2(R²k)^(1/3) satisfies f ≥ 0 for every admissible δ.
        let hertz_radius = (r * overlap.max(0.0)).sqrt();
        let upper = hertz_radius + 2.0 * (r * r * k).cbrt();

        let warm = warm_start > ac && warm_start < upper;
        let mut a = if warm && self.residual(warm_start, overlap) >= 0.0 {
            warm_start
        } else {
            upper
        };

        for _ in 0..Self::MAX_ITERATIONS {
            let f = self.residual(a, overlap);
            let df = 2.0 * a / r - 0.5 * (k / a).sqrt();
            if df <= 0.0 {
                break;
            }
            let step = f / df;
            a -= step;
            if step.abs() <= Self::RELATIVE_TOLERANCE * a {
                break;
            }
        }

        Some(a.max(ac))
    }
}
