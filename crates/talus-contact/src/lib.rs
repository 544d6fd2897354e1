//! # talus-contact
//!
//! Particle-particle contact engine for discrete-element simulation.
//!
//! Each step flows through four stages:
//! 1. **Broad phase** (external) — a spatial index proposes candidate pairs
//!    per [`PairCategory`]; [`BroadPhase`] is the seam it plugs into.
//! 2. **Fine search** — [`fine_search`] prunes tracked pairs that moved
//!    apart and admits candidates inside the neighborhood threshold.
//! 3. **Force model** — [`ContactForceModel`] evaluates one pair under the
//!    configured normal-force and rolling-resistance laws.
//! 4. **Engine** — [`ContactForceEngine`] drives both over every category
//!    and accumulates forces and torques into caller-owned buffers.
//!
//! Per-pair history lives in the [`PairRegistry`], keyed by stable
//! [`ParticleId`](talus_types::ParticleId)s so that particles can be
//! exchanged or reallocated between steps without dangling state.

pub mod broad;
pub mod category;
pub mod config;
pub mod engine;
pub mod fine_search;
pub mod forces;
pub mod model;
pub mod pair;
pub mod particle;
pub mod registry;

pub use broad::{BroadPhase, CandidateLists, CandidateSet};
pub use category::{Accumulation, PairCategory};
pub use config::{ContactModelConfig, NormalForceLaw, RollingResistanceLaw};
pub use engine::{ContactForceEngine, ForceSummary, StepReport};
pub use fine_search::{fine_search, FineSearchStats};
pub use forces::ForceBuffers;
pub use model::{ContactForce, ContactForceModel, ContactOutcome};
pub use pair::{ContactHistory, ContactPair};
pub use particle::{Particle, ParticleContainer};
pub use registry::PairRegistry;
