//! Integration tests for talus-contact force laws.

use std::f64::consts::PI;

use approx::assert_relative_eq;
use talus_contact::model::{
    hertz_normal_force, linear_normal_force, rotate_into_plane, ContactKinematics, Linear,
    SlidingPolicy, TangentialSpring,
};
use talus_contact::{
    ContactHistory, ContactForceModel, ContactModelConfig, NormalForceLaw, Particle,
    RollingResistanceLaw,
};
use talus_material::EffectiveProperties;
use talus_math::{DVec3, JkrRadiusSolver};
use talus_types::{MaterialId, ParticleId, TalusError};

const DT: f64 = 1.0e-5;

fn props(work_of_adhesion: f64) -> EffectiveProperties {
    let log_e = 0.5_f64.ln();
    EffectiveProperties {
        youngs_modulus: 1.0e7,
        shear_modulus: 4.0e6,
        restitution: 0.5,
        damping_ratio: log_e / (log_e * log_e + PI * PI).sqrt(),
        friction: 0.5,
        rolling_friction: 0.1,
        rolling_viscous_damping: 0.05,
        work_of_adhesion,
    }
}

/// Two unit-mass spheres of radius 0.5 along x with the given overlap.
fn pair(overlap: f64) -> (Particle, Particle) {
    let a = Particle::new(ParticleId(1), DVec3::ZERO, 0.5, 1.0, MaterialId(0));
    let b = Particle::new(
        ParticleId(2),
        DVec3::new(1.0 - overlap, 0.0, 0.0),
        0.5,
        1.0,
        MaterialId(0),
    );
    (a, b)
}

fn model(normal: NormalForceLaw, rolling: RollingResistanceLaw) -> ContactForceModel {
    ContactForceModel::new(&ContactModelConfig::with_laws(normal, rolling)).unwrap()
}

fn all_combinations() -> impl Iterator<Item = (NormalForceLaw, RollingResistanceLaw)> {
    NormalForceLaw::ALL
        .into_iter()
        .flat_map(|n| RollingResistanceLaw::ALL.into_iter().map(move |r| (n, r)))
}

// ─── Closed-Form Tests ────────────────────────────────────────

#[test]
fn linear_force_exactness() {
    assert_eq!(linear_normal_force(1000.0, 0.0, 0.001, 0.0), 1.0);
}

#[test]
fn linear_damping_opposes_approach() {
    // Approaching (vn < 0) adds repulsion.
    assert!(linear_normal_force(1000.0, 5.0, 0.001, -0.1) > 1.0);
    assert!(linear_normal_force(1000.0, 5.0, 0.001, 0.1) < 1.0);
}

#[test]
fn hertz_elastic_force_closed_form() {
    let f = hertz_normal_force(1.0e7, 0.25, 0.01);
    assert_relative_eq!(f, 4.0 / 3.0 * 1.0e7 * 0.5 * 1.0e-3, max_relative = 1e-12);
    assert_eq!(hertz_normal_force(1.0e7, 0.25, 0.0), 0.0);
    assert_eq!(hertz_normal_force(1.0e7, 0.25, -0.01), 0.0);
}

#[test]
fn linear_stiffness_formula() {
    let (a, b) = pair(0.01);
    let kin = ContactKinematics::new(&a, &b, DVec3::ZERO).unwrap();
    let p = props(0.0);
    let law = Linear {
        characteristic_velocity: 2.0,
    };
    let scale = 0.25_f64.sqrt() * 1.0e7;
    let expected = 16.0 / 15.0 * scale * (15.0 / 16.0 * 0.5 * 4.0 / scale).powf(0.2);
    assert_relative_eq!(law.normal_stiffness(&kin, &p), expected, max_relative = 1e-12);
}

// ─── Kinematics Tests ─────────────────────────────────────────

#[test]
fn kinematics_geometry_and_velocity() {
    let (a, mut b) = pair(0.01);
    b.velocity = DVec3::new(-1.0, 0.5, 0.0);
    let kin = ContactKinematics::new(&a, &b, DVec3::ZERO).unwrap();

    assert_relative_eq!(kin.normal.x, 1.0);
    assert_relative_eq!(kin.overlap, 0.01, epsilon = 1e-15);
    assert_relative_eq!(kin.effective_radius, 0.25);
    assert_relative_eq!(kin.effective_mass, 0.5);
    // v = vA − vB = (1, −0.5, 0): approaching at 1 m/s.
    assert_relative_eq!(kin.normal_velocity, -1.0);
    assert_relative_eq!(kin.tangential_velocity.y, -0.5);
}

#[test]
fn kinematics_apply_periodic_offset() {
    let a = Particle::new(ParticleId(1), DVec3::new(0.1, 0.0, 0.0), 0.5, 1.0, MaterialId(0));
    let b = Particle::new(ParticleId(2), DVec3::new(9.2, 0.0, 0.0), 0.5, 1.0, MaterialId(0));
    let kin = ContactKinematics::new(&a, &b, DVec3::new(10.0, 0.0, 0.0)).unwrap();
    assert_relative_eq!(kin.normal.x, -1.0);
    assert_relative_eq!(kin.overlap, 0.1, epsilon = 1e-12);
}

#[test]
fn coincident_centres_are_degenerate() {
    let (a, _) = pair(0.0);
    let b = Particle::new(ParticleId(2), a.position, a.radius, a.mass, a.material);
    let result = ContactKinematics::new(&a, &b, DVec3::ZERO);
    assert!(matches!(result, Err(TalusError::NumericalDegeneracy(_))));
}

#[test]
fn non_positive_mass_is_degenerate() {
    let (a, mut b) = pair(0.01);
    b.mass = 0.0;
    let m = model(NormalForceLaw::Hertz, RollingResistanceLaw::None);
    let result = m.evaluate(&ContactHistory::default(), &a, &b, DVec3::ZERO, &props(0.0), DT);
    assert!(matches!(result, Err(TalusError::NumericalDegeneracy(_))));
}

#[test]
fn non_positive_timestep_rejected() {
    let (a, b) = pair(0.01);
    let m = model(NormalForceLaw::Hertz, RollingResistanceLaw::None);
    let result = m.evaluate(&ContactHistory::default(), &a, &b, DVec3::ZERO, &props(0.0), 0.0);
    assert!(matches!(result, Err(TalusError::InvalidConfig(_))));
}

// ─── Law Property Tests ───────────────────────────────────────

#[test]
fn zero_overlap_gives_zero_normal_force_for_every_law() {
    let (a, mut b) = pair(0.0);
    b.velocity = DVec3::new(-0.3, 0.2, 0.0);
    for (normal, rolling) in all_combinations() {
        let out = model(normal, rolling)
            .evaluate(&ContactHistory::default(), &a, &b, DVec3::ZERO, &props(0.05), DT)
            .unwrap();
        assert_eq!(out.force.normal_force, 0.0, "{normal}+{rolling}");
        assert_eq!(out.force.tangential_force, DVec3::ZERO, "{normal}+{rolling}");
        assert_eq!(out.force.rolling_torque, DVec3::ZERO, "{normal}+{rolling}");
    }
}

#[test]
fn newtons_third_law_for_every_combination() {
    let (mut a, mut b) = pair(0.005);
    a.velocity = DVec3::new(0.4, 0.1, -0.2);
    a.angular_velocity = DVec3::new(0.0, 3.0, 1.0);
    b.velocity = DVec3::new(-0.2, 0.0, 0.3);
    b.angular_velocity = DVec3::new(-2.0, 0.0, 0.5);

    for (normal, rolling) in all_combinations() {
        let out = model(normal, rolling)
            .evaluate(&ContactHistory::default(), &a, &b, DVec3::ZERO, &props(0.05), DT)
            .unwrap();
        let f = out.force;
        assert!(f.in_contact, "{normal}+{rolling}");
        assert_eq!(f.force_on_a() + f.force_on_b(), DVec3::ZERO, "{normal}+{rolling}");
        // Repulsive along −n on A.
        assert!(f.force_on_a().x < 0.0, "{normal}+{rolling}");
    }
}

#[test]
fn separated_pair_resets_history() {
    let (a, b) = pair(-0.1);
    let history = ContactHistory {
        tangential_overlap: DVec3::new(0.0, 1.0e-4, 0.0),
        rolling_torque: DVec3::new(0.0, 0.0, 1.0),
        contact_radius: 0.0,
    };
    for (normal, rolling) in all_combinations() {
        let out = model(normal, rolling)
            .evaluate(&history, &a, &b, DVec3::ZERO, &props(0.05), DT)
            .unwrap();
        assert!(!out.force.in_contact);
        assert!(out.history.is_zero(), "{normal}+{rolling}");
    }
}

#[test]
fn hertz_force_decreases_monotonically_with_overlap() {
    let m = model(NormalForceLaw::Hertz, RollingResistanceLaw::None);
    let p = props(0.0);
    let mut previous = f64::INFINITY;
    for step in 0..=10 {
        let overlap = 0.01 * f64::from(10 - step) / 10.0;
        let (a, b) = pair(overlap);
        let out = m
            .evaluate(&ContactHistory::default(), &a, &b, DVec3::ZERO, &p, DT)
            .unwrap();
        let force = out.force.normal_force;
        if step == 0 {
            assert!(force > 0.0);
        }
        assert!(force < previous, "overlap {overlap}: {force} !< {previous}");
        previous = force;
    }
    assert_eq!(previous, 0.0);
}

#[test]
fn hertz_force_matches_closed_form_at_rest() {
    let (a, b) = pair(0.01);
    let out = model(NormalForceLaw::HertzMindlinLimitOverlap, RollingResistanceLaw::None)
        .evaluate(&ContactHistory::default(), &a, &b, DVec3::ZERO, &props(0.0), DT)
        .unwrap();
    assert_relative_eq!(
        out.force.normal_force,
        hertz_normal_force(1.0e7, 0.25, 0.01),
        max_relative = 1e-9
    );
}

// ─── DMT Tests ────────────────────────────────────────────────

#[test]
fn dmt_adhesion_is_exactly_zero_beyond_cutoff() {
    let (a, b) = pair(-1.0e-6);
    let out = model(NormalForceLaw::HertzDmt, RollingResistanceLaw::None)
        .evaluate(&ContactHistory::default(), &a, &b, DVec3::ZERO, &props(0.1), DT)
        .unwrap();
    assert_eq!(out.force.adhesive_force, 0.0);
    assert_eq!(out.force.force_on_a(), DVec3::ZERO);
}

#[test]
fn dmt_adhesion_attracts_within_cutoff() {
    let (a, b) = pair(-5.0e-8);
    let out = model(NormalForceLaw::HertzDmt, RollingResistanceLaw::None)
        .evaluate(&ContactHistory::default(), &a, &b, DVec3::ZERO, &props(0.1), DT)
        .unwrap();
    assert!(out.force.adhesive_force < 0.0);
    assert_relative_eq!(out.force.adhesive_force, -2.0 * PI * 0.1 * 0.25, max_relative = 1e-12);
    assert!(!out.force.in_contact);
    assert!(out.history.is_zero());
    // A is pulled towards B.
    assert!(out.force.force_on_a().x > 0.0);
}

#[test]
fn dmt_without_surface_energy_has_no_adhesion() {
    let (a, b) = pair(-5.0e-8);
    let out = model(NormalForceLaw::HertzDmt, RollingResistanceLaw::None)
        .evaluate(&ContactHistory::default(), &a, &b, DVec3::ZERO, &props(0.0), DT)
        .unwrap();
    assert_eq!(out.force.adhesive_force, 0.0);
}

#[test]
fn dmt_in_contact_adds_adhesion_to_hertz() {
    let (a, b) = pair(0.01);
    let out = model(NormalForceLaw::HertzDmt, RollingResistanceLaw::None)
        .evaluate(&ContactHistory::default(), &a, &b, DVec3::ZERO, &props(0.1), DT)
        .unwrap();
    assert!(out.force.in_contact);
    assert_relative_eq!(
        out.force.normal_force,
        hertz_normal_force(1.0e7, 0.25, 0.01),
        max_relative = 1e-9
    );
    assert!(out.force.adhesive_force < 0.0);
}

// ─── JKR Tests ────────────────────────────────────────────────

#[test]
fn jkr_without_adhesion_reduces_to_hertz() {
    let (mut a, b) = pair(0.01);
    a.velocity = DVec3::new(0.2, 0.1, 0.0);
    let p = props(0.0);
    let history = ContactHistory::default();

    let jkr = model(NormalForceLaw::HertzJkr, RollingResistanceLaw::None)
        .evaluate(&history, &a, &b, DVec3::ZERO, &p, DT)
        .unwrap();
    let hertz = model(NormalForceLaw::HertzMindlinLimitOverlap, RollingResistanceLaw::None)
        .evaluate(&history, &a, &b, DVec3::ZERO, &p, DT)
        .unwrap();

    assert_eq!(jkr.force.adhesive_force, 0.0);
    assert_relative_eq!(jkr.force.normal_force, hertz.force.normal_force, max_relative = 1e-12);
    assert_relative_eq!(
        jkr.force.tangential_force.y,
        hertz.force.tangential_force.y,
        max_relative = 1e-9
    );
    assert_relative_eq!(
        jkr.history.tangential_overlap.y,
        hertz.history.tangential_overlap.y,
        max_relative = 1e-12
    );
}

#[test]
fn jkr_neck_persists_into_negative_overlap() {
    let p = props(0.1);
    let m = model(NormalForceLaw::HertzJkr, RollingResistanceLaw::None);
    let critical =
        JkrRadiusSolver::new(0.25, p.youngs_modulus, p.work_of_adhesion).critical_overlap();
    assert!(critical < 0.0);

    let (a, b) = pair(1.0e-4);
    let touching = m
        .evaluate(&ContactHistory::default(), &a, &b, DVec3::ZERO, &p, DT)
        .unwrap();
    assert!(touching.history.contact_radius > 0.0);
    assert!(touching.force.adhesive_force < 0.0);

    let (a, b) = pair(0.5 * critical);
    let stretched = m.evaluate(&touching.history, &a, &b, DVec3::ZERO, &p, DT).unwrap();
    assert!(stretched.force.in_contact);
    assert_eq!(stretched.force.normal_force, 0.0);
    assert!(stretched.force.adhesive_force < 0.0);
    assert!(stretched.history.contact_radius > 0.0);

    // Never touched: no force across the same gap.
    let fresh = m
        .evaluate(&ContactHistory::default(), &a, &b, DVec3::ZERO, &p, DT)
        .unwrap();
    assert!(!fresh.force.in_contact);
    assert_eq!(fresh.force.adhesive_force, 0.0);

    // Past the critical overlap the neck snaps.
    let (a, b) = pair(2.0 * critical);
    let snapped = m.evaluate(&stretched.history, &a, &b, DVec3::ZERO, &p, DT).unwrap();
    assert!(!snapped.force.in_contact);
    assert!(snapped.history.is_zero());
    assert_eq!(snapped.force.force_on_a(), DVec3::ZERO);
}

#[test]
fn jkr_total_force_matches_closed_form() {
    let p = props(0.1);
    let (a, b) = pair(1.0e-4);
    let out = model(NormalForceLaw::HertzJkr, RollingResistanceLaw::None)
        .evaluate(&ContactHistory::default(), &a, &b, DVec3::ZERO, &p, DT)
        .unwrap();
    let radius = out.history.contact_radius;
    let a3 = radius.powi(3);
    let expected = 4.0 * 1.0e7 * a3 / (3.0 * 0.25) - (8.0 * PI * 0.1 * 1.0e7 * a3).sqrt();
    assert_relative_eq!(
        out.force.normal_force + out.force.adhesive_force,
        expected,
        max_relative = 1e-9
    );
}

// ─── Tangential Tests ─────────────────────────────────────────

fn sliding_kinematics() -> ContactKinematics {
    let (mut a, b) = pair(0.01);
    a.velocity = DVec3::new(0.0, 1.0, 0.0);
    ContactKinematics::new(&a, &b, DVec3::ZERO).unwrap()
}

fn spring(policy: SlidingPolicy) -> TangentialSpring {
    TangentialSpring {
        stiffness: 1000.0,
        damping: 10.0,
        policy,
    }
}

#[test]
fn tangential_spring_below_limit() {
    let kin = sliding_kinematics();
    let out =
        spring(SlidingPolicy::ClipOverlap).update(DVec3::new(0.0, 0.01, 0.0), &kin, 100.0, 1.0e-3);
    assert!(!out.sliding);
    assert_relative_eq!(out.overlap.y, 0.011, max_relative = 1e-12);
    assert_relative_eq!(out.force.y, -21.0, max_relative = 1e-12);
}

#[test]
fn sliding_policies_clip_force_to_limit() {
    let kin = sliding_kinematics();
    let previous = DVec3::new(0.0, 0.01, 0.0);

    let clip_force = spring(SlidingPolicy::ClipForce).update(previous, &kin, 5.0, 1.0e-3);
    let rescale = spring(SlidingPolicy::RescaleBoth).update(previous, &kin, 5.0, 1.0e-3);
    let clip_overlap = spring(SlidingPolicy::ClipOverlap).update(previous, &kin, 5.0, 1.0e-3);

    for out in [clip_force, rescale, clip_overlap] {
        assert!(out.sliding);
        assert_relative_eq!(out.force.y, -5.0, max_relative = 1e-12);
    }
    assert_relative_eq!(clip_force.overlap.y, 0.011, max_relative = 1e-12);
    assert_relative_eq!(rescale.overlap.y, 0.005, max_relative = 1e-12);
    assert_relative_eq!(clip_overlap.overlap.y, -0.005, max_relative = 1e-12);
}

#[test]
fn rotate_into_plane_preserves_magnitude() {
    let rotated = rotate_into_plane(DVec3::new(1.0, 1.0, 0.0), DVec3::X);
    assert_relative_eq!(rotated.length(), 2.0_f64.sqrt(), max_relative = 1e-12);
    assert_relative_eq!(rotated.dot(DVec3::X), 0.0);
    assert_eq!(rotate_into_plane(DVec3::X, DVec3::X), DVec3::ZERO);
}

#[test]
fn hertz_family_respects_coulomb_limit() {
    let (mut a, b) = pair(0.01);
    a.velocity = DVec3::new(0.0, 100.0, 0.0);
    let p = props(0.0);
    for normal in [
        NormalForceLaw::Hertz,
        NormalForceLaw::HertzMindlinLimitForce,
        NormalForceLaw::HertzMindlinLimitOverlap,
    ] {
        let out = model(normal, RollingResistanceLaw::None)
            .evaluate(&ContactHistory::default(), &a, &b, DVec3::ZERO, &p, DT)
            .unwrap();
        let limit = p.friction * out.force.normal_force.abs();
        assert_relative_eq!(out.force.tangential_force.length(), limit, max_relative = 1e-9);
        // Tangential force opposes A's sliding direction.
        assert!(out.force.tangential_force.y < 0.0);
    }
}

#[test]
fn limit_force_keeps_accumulating_displacement() {
    let (mut a, b) = pair(0.01);
    a.velocity = DVec3::new(0.0, 100.0, 0.0);
    let out = model(NormalForceLaw::HertzMindlinLimitForce, RollingResistanceLaw::None)
        .evaluate(&ContactHistory::default(), &a, &b, DVec3::ZERO, &props(0.0), DT)
        .unwrap();
    assert_relative_eq!(out.history.tangential_overlap.y, 100.0 * DT, max_relative = 1e-12);
}

// ─── Rolling Resistance Tests ─────────────────────────────────

#[test]
fn constant_rolling_opposes_relative_rotation() {
    let (mut a, b) = pair(0.01);
    a.angular_velocity = DVec3::new(0.0, 0.0, 2.0);
    let out = model(NormalForceLaw::Hertz, RollingResistanceLaw::Constant)
        .evaluate(&ContactHistory::default(), &a, &b, DVec3::ZERO, &props(0.0), DT)
        .unwrap();
    let expected = -0.1 * 0.25 * out.force.normal_force.abs();
    assert_relative_eq!(out.force.rolling_torque.z, expected, max_relative = 1e-12);
    assert_eq!(out.history.rolling_torque, out.force.rolling_torque);
}

#[test]
fn viscous_rolling_scales_with_rolling_speed() {
    let (mut a, b) = pair(0.01);
    a.angular_velocity = DVec3::new(0.0, 0.0, 2.0);
    let out = model(NormalForceLaw::Hertz, RollingResistanceLaw::Viscous)
        .evaluate(&ContactHistory::default(), &a, &b, DVec3::ZERO, &props(0.0), DT)
        .unwrap();
    // |R*(ωr × n)| = 0.25 · 2
    let expected = -0.05 * 0.25 * out.force.normal_force.abs() * 0.5;
    assert_relative_eq!(out.force.rolling_torque.z, expected, max_relative = 1e-12);
}

#[test]
fn rolling_torque_vanishes_without_rotation() {
    let (a, b) = pair(0.01);
    for rolling in RollingResistanceLaw::ALL {
        let out = model(NormalForceLaw::Hertz, rolling)
            .evaluate(&ContactHistory::default(), &a, &b, DVec3::ZERO, &props(0.0), DT)
            .unwrap();
        assert_eq!(out.force.rolling_torque, DVec3::ZERO);
    }
}

#[test]
fn rolling_torque_applied_with_opposite_sign_to_partner() {
    // Counter-rotating spheres: no slip at the contact point, pure rolling.
    let (mut a, mut b) = pair(0.01);
    a.angular_velocity = DVec3::new(0.0, 0.0, 2.0);
    b.angular_velocity = DVec3::new(0.0, 0.0, -2.0);
    let out = model(NormalForceLaw::Hertz, RollingResistanceLaw::Constant)
        .evaluate(&ContactHistory::default(), &a, &b, DVec3::ZERO, &props(0.0), DT)
        .unwrap();
    let f = out.force;
    assert_eq!(f.tangential_force, DVec3::ZERO);
    assert!(f.rolling_torque.z < 0.0);
    assert_relative_eq!(f.torque_on_a().z, f.rolling_torque.z, max_relative = 1e-12);
    assert_relative_eq!(f.torque_on_b().z, -f.rolling_torque.z, max_relative = 1e-12);
}

// ─── Configuration Tests ──────────────────────────────────────

#[test]
fn law_names_parse() {
    for law in NormalForceLaw::ALL {
        assert_eq!(law.name().parse::<NormalForceLaw>().unwrap(), law);
    }
    for law in RollingResistanceLaw::ALL {
        assert_eq!(law.name().parse::<RollingResistanceLaw>().unwrap(), law);
    }
    assert!(matches!(
        "hooke".parse::<NormalForceLaw>(),
        Err(TalusError::InvalidConfig(_))
    ));
}

#[test]
fn kernel_names_combine_both_laws() {
    let m = ContactForceModel::new(&ContactModelConfig::adhesive()).unwrap();
    assert_eq!(m.name(), "hertz_jkr+viscous");
    let m = ContactForceModel::new(&ContactModelConfig::default()).unwrap();
    assert_eq!(m.name(), "hertz_mindlin_limit_overlap+constant");
}

#[test]
fn config_toml_round_trip() {
    let config = ContactModelConfig::adhesive();
    let text = config.to_toml_string().unwrap();
    assert!(text.contains("normal_law = \"hertz_jkr\""));
    let recovered = ContactModelConfig::from_toml_str(&text).unwrap();
    assert_eq!(recovered, config);
}

#[test]
fn config_toml_fills_defaults() {
    let source = "normal_law = \"linear\"\nrolling_law = \"none\"\n";
    let config = ContactModelConfig::from_toml_str(source).unwrap();
    assert_eq!(config.normal_law, NormalForceLaw::Linear);
    assert_eq!(config.neighborhood_margin, ContactModelConfig::default().neighborhood_margin);
}

#[test]
fn config_rejects_invalid_parameters() {
    let mut config =
        ContactModelConfig::with_laws(NormalForceLaw::HertzDmt, RollingResistanceLaw::None);
    config.dmt_cutoff = 0.0;
    assert!(matches!(ContactForceModel::new(&config), Err(TalusError::InvalidConfig(_))));

    let mut config =
        ContactModelConfig::with_laws(NormalForceLaw::Linear, RollingResistanceLaw::None);
    config.characteristic_velocity = -1.0;
    assert!(config.validate().is_err());

    let config = ContactModelConfig {
        neighborhood_margin: 0.5,
        ..Default::default()
    };
    assert!(config.validate().is_err());

    assert!(ContactModelConfig::from_toml_str("normal_law = \"hooke\"").is_err());
}

#[test]
fn neighborhood_threshold_is_squared() {
    let config = ContactModelConfig::default();
    assert_relative_eq!(config.neighborhood_threshold(0.5), 1.69, max_relative = 1e-12);
}
