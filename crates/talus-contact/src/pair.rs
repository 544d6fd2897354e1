//! Contact pair data types.

use serde::{Deserialize, Serialize};
use talus_math::DVec3;

/// History carried by a contact from one step to the next.
///
/// Zero on creation. Only the force model replaces it, and only with the
/// value it computed for the current step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactHistory {
    /// Accumulated tangential displacement of the owner relative to the
    /// partner at the contact point (m).
    pub tangential_overlap: DVec3,
    /// Rolling-resistance torque applied to the owner last step (N·m).
    pub rolling_torque: DVec3,
    /// JKR contact-radius estimate (m); zero while no adhesive neck exists.
    pub contact_radius: f64,
}

impl ContactHistory {
    /// True for a freshly created (or reset) history.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// A tracked pair: the periodic offset it was admitted under, and its
/// history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactPair {
    /// Offset subtracted from the partner's position. Zero for
    /// non-periodic categories.
    pub periodic_offset: DVec3,
    /// Mutable contact history.
    pub history: ContactHistory,
}

impl ContactPair {
    /// Fresh pair with zero history.
    pub fn new(periodic_offset: DVec3) -> Self {
        Self {
            periodic_offset,
            history: ContactHistory::default(),
        }
    }

    /// Whether this pair was admitted under `offset`.
    #[inline]
    pub fn has_offset(&self, offset: DVec3) -> bool {
        self.periodic_offset == offset
    }
}
