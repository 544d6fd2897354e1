//! CLI command implementations.

use talus_bench::{BenchmarkMetrics, BenchmarkRunner, Scenario, ScenarioKind};
use talus_contact::{ContactForceModel, ContactModelConfig, NormalForceLaw, RollingResistanceLaw};
use talus_material::{EffectivePropertiesTable, MaterialDatabase};
use talus_telemetry::{EventBus, TracingSink};

fn load_config(path: &str) -> Result<ContactModelConfig, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(ContactModelConfig::from_toml_str(&content)?)
}

/// Run benchmark suite.
pub fn benchmark(
    scenario_name: &str,
    config_path: Option<&str>,
    parallel: bool,
    telemetry: bool,
    output_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Talus Benchmark Suite");
    println!("═════════════════════");
    println!();

    let config = match config_path {
        Some(path) => {
            let config = load_config(path)?;
            println!("Config: {path} ({}+{})", config.normal_law, config.rolling_law);
            println!();
            Some(config)
        }
        None => None,
    };

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        match ScenarioKind::from_name(scenario_name) {
            Some(kind) => vec![kind],
            None => {
                let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
                eprintln!("Unknown scenario: {scenario_name}");
                eprintln!("Available: {}, all", available.join(", "));
                return Err("Unknown scenario".into());
            }
        }
    };

    let mut all_metrics = Vec::new();

    for &kind in &scenarios {
        let mut scenario = Scenario::from_kind(kind)?.with_parallel(parallel);
        if let Some(ref config) = config {
            scenario = scenario.with_config(config.clone());
        }

        println!(
            "Running: {} ({} particles, {} steps, dt {:.1e}s)",
            kind.name(),
            scenario.particles.len(),
            scenario.timesteps,
            scenario.dt,
        );

        let mut bus = EventBus::new();
        if telemetry {
            bus.add_sink(Box::new(TracingSink::default()));
        } else {
            bus.set_enabled(false);
        }
        let metrics = BenchmarkRunner::run_with_bus(&scenario, &mut bus)
            .map_err(|e| format!("Benchmark failed: {e}"))?
            .metrics;

        println!("  Kernel:        {}", metrics.kernel);
        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg step:      {:.4}ms", metrics.avg_step_time * 1000.0);
        println!("  Max contacts:  {}", metrics.max_contacts);
        println!("  Max overlap:   {:.4e}m", metrics.max_overlap);
        println!(
            "  KE:            {:.6e} → {:.6e} J",
            metrics.initial_kinetic_energy, metrics.final_kinetic_energy
        );
        println!();

        all_metrics.push(metrics);
    }

    let csv = BenchmarkMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }

    Ok(())
}

/// Validate a contact model config and the preset material table.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Talus Validator");
    println!("───────────────");
    println!();

    println!("Validating config: {path}");
    let config = load_config(path)?;
    let model = ContactForceModel::new(&config)?;
    println!("  Kernel:              {}", model.name());
    println!("  Neighborhood margin: {}", config.neighborhood_margin);
    if config.normal_law == NormalForceLaw::HertzDmt {
        println!("  DMT cutoff:          {:e}m", config.dmt_cutoff);
    }
    if config.normal_law == NormalForceLaw::Linear {
        println!("  Characteristic vel.: {}m/s", config.characteristic_velocity);
    }

    let table = EffectivePropertiesTable::from_database(&MaterialDatabase::with_defaults())?;
    table.validate()?;
    println!("  Preset materials:    {} (all pairs valid)", table.material_count());

    println!("✅ Config is valid.");
    Ok(())
}

/// List every normal × rolling law combination.
pub fn laws() -> Result<(), Box<dyn std::error::Error>> {
    println!("Talus Contact Laws");
    println!("──────────────────");
    println!();

    for normal in NormalForceLaw::ALL {
        let tag = if normal.is_adhesive() { " (adhesive)" } else { "" };
        println!("{normal}{tag}");
        for rolling in RollingResistanceLaw::ALL {
            let config = ContactModelConfig::with_laws(normal, rolling);
            let model = ContactForceModel::new(&config)?;
            println!("  {}", model.name());
        }
    }
    Ok(())
}

/// List the preset materials.
pub fn materials() -> Result<(), Box<dyn std::error::Error>> {
    println!("Talus Material Presets");
    println!("──────────────────────");
    println!();

    let db = MaterialDatabase::with_defaults();
    println!(
        "{:<16} {:>10} {:>10} {:>6} {:>6} {:>6} {:>8}",
        "name", "density", "E (Pa)", "ν", "e", "μ", "γ (J/m²)"
    );
    for (_, m) in db.iter() {
        println!(
            "{:<16} {:>10.1} {:>10.2e} {:>6.2} {:>6.2} {:>6.2} {:>8.3}",
            m.name,
            m.density,
            m.youngs_modulus,
            m.poisson_ratio,
            m.restitution,
            m.friction,
            m.surface_energy
        );
    }
    Ok(())
}
