//! Pair registry — persistent per-pair contact state.
//!
//! One ordered map per [`PairCategory`], from owner id to a map from
//! partner id to [`ContactPair`]. Ordered maps give a deterministic
//! iteration order, so force accumulation is reproducible run to run.
//!
//! Symmetric categories are keyed with the smaller id as owner: either
//! orientation reaches the same pair. Swapping a periodic pair negates its
//! offset, so the partner's image is unchanged relative to the owner.

use std::collections::BTreeMap;

use talus_math::DVec3;
use talus_types::{ParticleId, TalusResult};

use crate::category::PairCategory;
use crate::pair::ContactPair;

/// Partner id → pair, for one owner.
pub type PartnerMap = BTreeMap<ParticleId, ContactPair>;

/// Owner id → partners, for one category.
pub type CategoryMap = BTreeMap<ParticleId, PartnerMap>;

/// Registry of tracked contact pairs, partitioned by category.
#[derive(Debug, Clone, Default)]
pub struct PairRegistry {
    categories: [CategoryMap; 5],
}

impl PairRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a zero-history, non-periodic pair if absent.
    ///
    /// Returns `true` if a pair was inserted. Existing history is never
    /// overwritten.
    pub fn upsert(
        &mut self,
        category: PairCategory,
        owner: ParticleId,
        partner: ParticleId,
    ) -> bool {
        self.upsert_with_offset(category, owner, partner, DVec3::ZERO)
    }

    /// Inserts a zero-history pair admitted under `periodic_offset` if
    /// absent. Returns `true` if a pair was inserted.
    pub fn upsert_with_offset(
        &mut self,
        category: PairCategory,
        owner: ParticleId,
        partner: ParticleId,
        periodic_offset: DVec3,
    ) -> bool {
        let (owner, partner, periodic_offset) =
            canonical(category, owner, partner, periodic_offset);
        let partners = self.categories[category.index()].entry(owner).or_default();
        match partners.entry(partner) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(ContactPair::new(periodic_offset));
                true
            }
        }
    }

    /// Removes a pair. Returns `true` if it was tracked.
    pub fn erase(
        &mut self,
        category: PairCategory,
        owner: ParticleId,
        partner: ParticleId,
    ) -> bool {
        let (owner, partner, _) = canonical(category, owner, partner, DVec3::ZERO);
        let map = &mut self.categories[category.index()];
        let Some(partners) = map.get_mut(&owner) else {
            return false;
        };
        let removed = partners.remove(&partner).is_some();
        if partners.is_empty() {
            map.remove(&owner);
        }
        removed
    }

    /// Looks up a pair. Symmetric categories accept either orientation.
    pub fn get(
        &self,
        category: PairCategory,
        owner: ParticleId,
        partner: ParticleId,
    ) -> Option<&ContactPair> {
        let (owner, partner, _) = canonical(category, owner, partner, DVec3::ZERO);
        self.categories[category.index()]
            .get(&owner)
            .and_then(|partners| partners.get(&partner))
    }

    pub fn get_mut(
        &mut self,
        category: PairCategory,
        owner: ParticleId,
        partner: ParticleId,
    ) -> Option<&mut ContactPair> {
        let (owner, partner, _) = canonical(category, owner, partner, DVec3::ZERO);
        self.categories[category.index()]
            .get_mut(&owner)
            .and_then(|partners| partners.get_mut(&partner))
    }

    pub fn contains(&self, category: PairCategory, owner: ParticleId, partner: ParticleId) -> bool {
        self.get(category, owner, partner).is_some()
    }

    /// Visits every tracked pair of `category`.
    pub fn for_each(
        &self,
        category: PairCategory,
        mut f: impl FnMut(ParticleId, ParticleId, &ContactPair),
    ) {
        for (owner, partner, pair) in self.iter(category) {
            f(owner, partner, pair);
        }
    }

    /// Visits every tracked pair of `category` mutably.
    pub fn for_each_mut(
        &mut self,
        category: PairCategory,
        mut f: impl FnMut(ParticleId, ParticleId, &mut ContactPair),
    ) {
        for (owner, partner, pair) in self.iter_mut(category) {
            f(owner, partner, pair);
        }
    }

    /// Iterates `(owner, partner, pair)` in owner-then-partner order.
    pub fn iter(
        &self,
        category: PairCategory,
    ) -> impl Iterator<Item = (ParticleId, ParticleId, &ContactPair)> {
        self.categories[category.index()].iter().flat_map(|(&owner, partners)| {
            partners
                .iter()
                .map(move |(&partner, pair)| (owner, partner, pair))
        })
    }

    /// Mutable counterpart of [`iter`](Self::iter), same order.
    pub fn iter_mut(
        &mut self,
        category: PairCategory,
    ) -> impl Iterator<Item = (ParticleId, ParticleId, &mut ContactPair)> {
        self.categories[category.index()].iter_mut().flat_map(|(&owner, partners)| {
            partners
                .iter_mut()
                .map(move |(&partner, pair)| (owner, partner, pair))
        })
    }

    /// Keeps only pairs for which `keep` returns `Ok(true)`.
    ///
    /// Stops deciding at the first error: pairs not yet visited are kept
    /// and the error is returned.
    pub fn try_retain(
        &mut self,
        category: PairCategory,
        mut keep: impl FnMut(ParticleId, ParticleId, &ContactPair) -> TalusResult<bool>,
    ) -> TalusResult<usize> {
        let mut removed = 0;
        let mut failure = None;
        let map = &mut self.categories[category.index()];

        for (&owner, partners) in map.iter_mut() {
            partners.retain(|&partner, pair| {
                if failure.is_some() {
                    return true;
                }
                match keep(owner, partner, &*pair) {
                    Ok(true) => true,
                    Ok(false) => {
                        removed += 1;
                        false
                    }
                    Err(e) => {
                        failure = Some(e);
                        true
                    }
                }
            });
        }
        map.retain(|_, partners| !partners.is_empty());

        match failure {
            Some(e) => Err(e),
            None => Ok(removed),
        }
    }

    /// Distinct periodic offsets among the tracked pairs of `category`.
    pub fn offsets(&self, category: PairCategory) -> Vec<DVec3> {
        let mut offsets: Vec<DVec3> = Vec::new();
        for (_, _, pair) in self.iter(category) {
            if !offsets.iter().any(|&o| pair.has_offset(o)) {
                offsets.push(pair.periodic_offset);
            }
        }
        offsets
    }

    /// Raw owner map of `category`, for parallel traversal.
    pub(crate) fn category_map(&self, category: PairCategory) -> &CategoryMap {
        &self.categories[category.index()]
    }

    /// Number of pairs tracked in `category`.
    pub fn len(&self, category: PairCategory) -> usize {
        self.categories[category.index()].values().map(BTreeMap::len).sum()
    }

    /// Number of pairs tracked across all categories.
    pub fn total_len(&self) -> usize {
        PairCategory::ALL.iter().map(|&c| self.len(c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(BTreeMap::is_empty)
    }

    /// Drops every pair of `category`.
    pub fn clear(&mut self, category: PairCategory) {
        self.categories[category.index()].clear();
    }

    /// Drops every pair.
    pub fn clear_all(&mut self) {
        for map in &mut self.categories {
            map.clear();
        }
    }
}

/// Storage key of a pair: symmetric categories put the smaller id first.
fn canonical(
    category: PairCategory,
    owner: ParticleId,
    partner: ParticleId,
    periodic_offset: DVec3,
) -> (ParticleId, ParticleId, DVec3) {
    if category.is_symmetric() && partner < owner {
        let offset = if category.is_periodic() { -periodic_offset } else { periodic_offset };
        (partner, owner, offset)
    } else {
        (owner, partner, periodic_offset)
    }
}
