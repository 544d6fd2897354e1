//! Benchmark runner — drives a scenario through the contact engine and
//! collects metrics.

use std::time::Instant;

use talus_contact::{BroadPhase, ContactForceEngine, ForceBuffers, ParticleContainer, StepReport};
use talus_material::EffectivePropertiesTable;
use talus_telemetry::{EventBus, EventKind, SimulationEvent};
use talus_types::TalusResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};
use crate::spatial_hash::SpatialHash;

/// Metrics plus the final particle state of a run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub metrics: BenchmarkMetrics,
    pub particles: ParticleContainer,
}

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Run a single scenario without telemetry.
    pub fn run(scenario: &Scenario) -> TalusResult<RunOutput> {
        let mut bus = EventBus::new();
        bus.set_enabled(false);
        Self::run_with_bus(scenario, &mut bus)
    }

    /// Run a single scenario, emitting step events into `bus`.
    ///
    /// Each step resets the force buffers, rebuilds the spatial hash,
    /// runs the engine and integrates with semi-implicit Euler.
    pub fn run_with_bus(scenario: &Scenario, bus: &mut EventBus) -> TalusResult<RunOutput> {
        let mut particles = ParticleContainer::from_particles(scenario.particles.iter().copied())?;
        let table = EffectivePropertiesTable::from_database(&scenario.materials)?;
        let mut engine = ContactForceEngine::new(scenario.config.clone(), table)?;

        let threshold = engine.neighborhood_threshold(&particles);
        let mut broad = SpatialHash::new(threshold.sqrt());
        if let Some(length) = scenario.periodic_length {
            broad = broad.with_periodic_x(length)?;
        }

        tracing::info!(
            scenario = scenario.kind.name(),
            kernel = engine.model().name(),
            particles = particles.len(),
            broad_phase = broad.name(),
            parallel = scenario.parallel,
            "starting benchmark"
        );

        let initial_ke = kinetic_energy(&particles);
        let mut buffers = ForceBuffers::zeros(particles.len());
        let mut step_times: Vec<f64> = Vec::with_capacity(scenario.timesteps as usize);
        let mut max_tracked = 0;
        let mut max_contacts = 0;
        let mut max_overlap: f64 = 0.0;

        let total_start = Instant::now();

        for step in 0..scenario.timesteps {
            let step_start = Instant::now();
            let step_id = u64::from(step);
            bus.emit(SimulationEvent::new(
                step_id,
                EventKind::StepBegin {
                    sim_time: f64::from(step) * scenario.dt,
                },
            ));

            buffers.reset(particles.len());
            broad.update(&particles)?;
            let candidates = broad.candidates();

            let report = if scenario.parallel {
                let search = engine.update_contacts(&particles, &candidates, threshold)?;
                let forces = engine.compute_forces_parallel(&particles, scenario.dt, &mut buffers)?;
                StepReport {
                    search,
                    forces,
                    wall_time_ms: 0.0,
                }
            } else {
                engine.step(&particles, &candidates, scenario.dt, &mut buffers)?
            };

            integrate(&mut particles, &buffers, scenario);

            for stats in &report.search {
                bus.emit(SimulationEvent::new(
                    step_id,
                    EventKind::FineSearch {
                        category: stats.category.name().to_string(),
                        pruned: stats.pruned,
                        admitted: stats.admitted,
                        tracked: stats.tracked,
                    },
                ));
            }
            bus.emit(SimulationEvent::new(
                step_id,
                EventKind::ContactForces {
                    pairs_evaluated: report.forces.pairs_evaluated,
                    pairs_in_contact: report.forces.pairs_in_contact,
                    max_overlap: report.forces.max_overlap,
                },
            ));
            bus.emit(SimulationEvent::new(
                step_id,
                EventKind::Energy {
                    kinetic: kinetic_energy(&particles),
                },
            ));

            max_tracked = max_tracked.max(engine.registry().total_len());
            max_contacts = max_contacts.max(report.forces.pairs_in_contact);
            max_overlap = max_overlap.max(report.forces.max_overlap);

            let wall_time = step_start.elapsed().as_secs_f64();
            step_times.push(wall_time);
            bus.emit(SimulationEvent::new(step_id, EventKind::StepEnd { wall_time }));
            bus.flush();
        }

        let total_wall_time = total_start.elapsed().as_secs_f64();
        bus.finish();

        let avg_step = if step_times.is_empty() {
            0.0
        } else {
            step_times.iter().sum::<f64>() / step_times.len() as f64
        };
        let min_step = step_times.iter().copied().fold(f64::MAX, f64::min);
        let max_step = step_times.iter().copied().fold(0.0, f64::max);

        let metrics = BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            kernel: engine.model().name().to_string(),
            particle_count: particles.len(),
            timesteps: scenario.timesteps,
            total_wall_time,
            avg_step_time: avg_step,
            min_step_time: if step_times.is_empty() { 0.0 } else { min_step },
            max_step_time: max_step,
            max_tracked_pairs: max_tracked,
            max_contacts,
            max_overlap,
            initial_kinetic_energy: initial_ke,
            final_kinetic_energy: kinetic_energy(&particles),
        };

        tracing::info!(
            scenario = %metrics.scenario,
            wall_time_s = metrics.total_wall_time,
            max_contacts = metrics.max_contacts,
            "benchmark complete"
        );

        Ok(RunOutput { metrics, particles })
    }

    /// Run all scenarios and return metrics for each.
    pub fn run_all(parallel: bool) -> TalusResult<Vec<BenchmarkMetrics>> {
        let mut results = Vec::new();
        for &kind in ScenarioKind::all() {
            let scenario = Scenario::from_kind(kind)?.with_parallel(parallel);
            results.push(Self::run(&scenario)?.metrics);
        }
        Ok(results)
    }
}

/// Semi-implicit Euler: velocities from the accumulated forces, then
/// positions from the new velocities. Periodic positions wrap into
/// `[0, L)`.
fn integrate(particles: &mut ParticleContainer, buffers: &ForceBuffers, scenario: &Scenario) {
    let dt = scenario.dt;
    for (slot, p) in particles.iter_mut().enumerate() {
        let inertia = p.moment_of_inertia();
        p.velocity += buffers.force[slot] / p.mass * dt;
        p.angular_velocity += buffers.torque[slot] / inertia * dt;
        p.position += p.velocity * dt;
        if let Some(length) = scenario.periodic_length {
            p.position.x = p.position.x.rem_euclid(length);
        }
    }
}

/// Translational plus rotational kinetic energy.
pub fn kinetic_energy(particles: &ParticleContainer) -> f64 {
    particles
        .iter()
        .map(|p| {
            let translational = 0.5 * p.mass * p.velocity.length_squared();
            translational + 0.5 * p.moment_of_inertia() * p.angular_velocity.length_squared()
        })
        .sum()
}
