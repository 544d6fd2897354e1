//! Pair categories: ownership × periodicity.
//!
//! A rank owns its *local* particles and holds read-only *ghost* copies
//! of nearby particles owned elsewhere. Periodic categories pair a
//! particle with the image of another across a periodic boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which particle buffers receive a pair's contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accumulation {
    /// Both particles are local: equal and opposite contributions.
    Both,
    /// Only the owner is local; the partner's owner computes its half.
    OwnerOnly,
    /// Only the partner is local.
    PartnerOnly,
}

/// Ownership and periodicity class of a contact pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairCategory {
    /// Two local particles.
    LocalLocal,
    /// Local owner, ghost partner.
    LocalGhost,
    /// Two local particles across a periodic boundary.
    LocalLocalPeriodic,
    /// Local owner, periodic image of a ghost partner.
    LocalGhostPeriodic,
    /// Ghost owner, periodic image of a local partner.
    GhostLocalPeriodic,
}

impl PairCategory {
    /// Every category, in evaluation order.
    pub const ALL: [PairCategory; 5] = [
        PairCategory::LocalLocal,
        PairCategory::LocalGhost,
        PairCategory::LocalLocalPeriodic,
        PairCategory::LocalGhostPeriodic,
        PairCategory::GhostLocalPeriodic,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::LocalLocal => "local_local",
            Self::LocalGhost => "local_ghost",
            Self::LocalLocalPeriodic => "local_local_periodic",
            Self::LocalGhostPeriodic => "local_ghost_periodic",
            Self::GhostLocalPeriodic => "ghost_local_periodic",
        }
    }

    /// Whether the partner is seen through a periodic offset.
    pub fn is_periodic(self) -> bool {
        matches!(
            self,
            Self::LocalLocalPeriodic | Self::LocalGhostPeriodic | Self::GhostLocalPeriodic
        )
    }

    /// Which side(s) of the pair this rank accumulates into.
    pub fn accumulation(self) -> Accumulation {
        match self {
            Self::LocalLocal | Self::LocalLocalPeriodic => Accumulation::Both,
            Self::LocalGhost | Self::LocalGhostPeriodic => Accumulation::OwnerOnly,
            Self::GhostLocalPeriodic => Accumulation::PartnerOnly,
        }
    }

    /// Whether `(a, b)` and `(b, a)` name the same contact.
    pub fn is_symmetric(self) -> bool {
        self.accumulation() == Accumulation::Both
    }
}

impl fmt::Display for PairCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
