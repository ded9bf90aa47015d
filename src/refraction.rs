use rand::Rng;
use serde::{ Serialize, Deserialize };

use crate::config::TaskConfig;

/// Ratio `sin(theta_refracted)` predicted by Snell's law, before clamping.
///
/// For `n_from * sin(theta_from) = n_to * sin(theta_to)`, this returns
/// `n_from * sin(theta_from) / n_to`.
pub fn snell_ratio(theta_incident: f64, n_from: f64, n_to: f64) -> f64 {
    (n_from * theta_incident.sin()) / n_to
}

/// Computes the refracted angle (radians) of a ray crossing from a medium with
/// index `n_from` into one with index `n_to`.
///
/// Ratios above 1.0 are clamped, so total internal reflection is reported as
/// grazing refraction (`PI / 2`) instead of an error. The result always lies
/// in `[0, PI / 2]` for incident angles in that range.
pub fn refract(theta_incident: f64, n_from: f64, n_to: f64) -> f64 {
    let sin_t = snell_ratio(theta_incident, n_from, n_to).min(1.0);
    sin_t.asin()
}

/// An angle stored in both degrees and radians.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    pub degrees: f64,
    pub radians: f64,
}

impl Angle {
    pub fn from_degrees(degrees: f64) -> Angle {
        Angle { degrees, radians: degrees.to_radians() }
    }

    pub fn from_radians(radians: f64) -> Angle {
        Angle { degrees: radians.to_degrees(), radians }
    }
}

/// Task variant tag. Only one variant exists for now.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Default,
}

impl Default for TaskKind {
    fn default() -> TaskKind {
        TaskKind::Default
    }
}

/// The physical parameters of one task.
///
/// Created once per task and never mutated; every frame of that task is
/// rendered from the same sample.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicsSample {
    pub n_glass: f64,
    pub n_air: f64,
    pub theta_incident: Angle,
    pub theta_refracted: Angle,
    pub kind: TaskKind,
}

impl PhysicsSample {
    /// Builds a sample for a ray entering glass from air at
    /// `theta_incident_deg` degrees from the normal.
    pub fn new(n_glass: f64, n_air: f64, theta_incident_deg: f64)
        -> PhysicsSample {
        let theta_incident = Angle::from_degrees(theta_incident_deg);
        let theta_refracted = Angle::from_radians(
            refract(theta_incident.radians, n_air, n_glass)
        );

        PhysicsSample {
            n_glass,
            n_air,
            theta_incident,
            theta_refracted,
            kind: TaskKind::Default,
        }
    }

    /// Draws a sample from the configured ranges.
    ///
    /// The glass index is drawn before the incident angle, so a given seed
    /// always produces the same sequence of samples.
    pub fn sample<R: Rng>(rng: &mut R, config: &TaskConfig)
        -> PhysicsSample {
        let n_glass = rng.gen_range(config.n_glass_min..=config.n_glass_max);
        let theta = rng.gen_range(config.theta_min..=config.theta_max);

        PhysicsSample::new(n_glass, config.n_air, theta)
    }
}

#[cfg(test)]
use rand::{ rngs::StdRng, SeedableRng };

#[test]
fn refract_matches_worked_example() {
    let s = PhysicsSample::new(1.5, 1.0, 30.0);

    let expected = (0.5f64 / 1.5).asin().to_degrees();
    assert!((s.theta_refracted.degrees - expected).abs() < 1e-9);
    assert!((s.theta_refracted.degrees - 19.47).abs() < 0.01);
}

#[test]
fn refract_normal_incidence_is_zero() {
    assert_eq!(refract(0.0, 1.0, 1.5), 0.0);
}

#[test]
fn refract_clamps_to_grazing() {
    // Glass to air past the critical angle
    let theta = refract(60f64.to_radians(), 1.5, 1.0);
    assert!((theta - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    assert!(theta.is_finite());
}

#[test]
fn sampled_refraction_obeys_snell() {
    let mut rng = StdRng::seed_from_u64(7);
    let config = TaskConfig::default();

    for _ in 0..2000 {
        let s = PhysicsSample::sample(&mut rng, &config);

        assert!(s.n_glass >= 1.3 && s.n_glass <= 2.0);
        assert!(s.theta_incident.degrees >= 5.0
            && s.theta_incident.degrees <= 80.0);

        let lhs = s.n_air * s.theta_incident.radians.sin();
        let rhs = s.n_glass * s.theta_refracted.radians.sin();
        assert!((lhs - rhs).abs() < 1e-6);
        assert!((s.theta_refracted.radians.sin()
            - s.theta_incident.radians.sin() / s.n_glass).abs() < 1e-6);

        // Denser medium bends toward the normal
        assert!(s.theta_refracted.radians <= s.theta_incident.radians);
        assert!(s.theta_refracted.radians >= 0.0
            && s.theta_refracted.radians <= std::f64::consts::FRAC_PI_2);
    }
}

#[test]
fn clamp_unreachable_for_configured_ranges() {
    let config = TaskConfig::default();

    // Worst case: thinnest glass at the steepest angle
    let worst = snell_ratio(config.theta_max.to_radians(), config.n_air,
        config.n_glass_min);
    assert!(worst <= 1.0);

    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..2000 {
        let s = PhysicsSample::sample(&mut rng, &config);
        assert!(snell_ratio(s.theta_incident.radians, s.n_air, s.n_glass) <= 1.0);
    }
}

#[test]
fn sample_is_reproducible_per_seed() {
    let config = TaskConfig::default();
    let a = PhysicsSample::sample(&mut StdRng::seed_from_u64(42), &config);
    let b = PhysicsSample::sample(&mut StdRng::seed_from_u64(42), &config);

    assert_eq!(a, b);
}
