//! Engine defaults and numeric tolerances.

/// Default neighborhood margin. The squared fine-search threshold is
/// `(margin * largest_diameter)²`.
pub const DEFAULT_NEIGHBORHOOD_MARGIN: f64 = 1.3;

/// Default characteristic impact velocity for the linear law (m/s).
pub const DEFAULT_CHARACTERISTIC_VELOCITY: f64 = 1.0;

/// Default DMT cut-off gap (meters).
pub const DEFAULT_DMT_CUTOFF: f64 = 1.0e-7;

/// Ratio of tangential to normal stiffness for the linear law.
pub const LINEAR_TANGENTIAL_STIFFNESS_RATIO: f64 = 2.0 / 7.0;

/// Epsilon below which vectors are treated as zero.
pub const EPSILON: f64 = 1.0e-14;
