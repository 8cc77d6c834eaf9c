//! Aerodynamic drag on the spinning rotor.

use std::f64::consts::PI;

use crate::models::electromechanical::bldc::core::DomainError;

/// Air density, kg/m³.
const AIR_DENSITY: f64 = 1.2041;

/// Air kinematic viscosity, m²/s.
const AIR_KINEMATIC_VISCOSITY: f64 = 2.075e-5;

/// Radial air gap over rotor radius.
const GAP_RATIO: f64 = 0.05;

const SKIN_FRICTION_GUESS: f64 = 0.01;
const SKIN_FRICTION_REL_TOL: f64 = 1e-3;
const SKIN_FRICTION_MAX_ITERS: usize = 100;

/// Windage loss model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Windage {
    /// No windage loss.
    #[default]
    Neglected,

    /// Turbulent Couette drag on the rotor surface plus disk drag on both end faces.
    Aerodynamic,
}

/// Rotor dimensions in SI units.
pub(super) struct Rotor {
    pub(super) diameter: f64,
    pub(super) length: f64,
    pub(super) core_radius_ratio: f64,
    /// Shaft speed, rad/s.
    pub(super) speed: f64,
}

impl Windage {
    /// Windage loss for the rotor, W.
    pub(super) fn loss(self, rotor: &Rotor) -> Result<f64, DomainError> {
        match self {
            Self::Neglected => Ok(0.0),
            Self::Aerodynamic => aerodynamic_loss(rotor),
        }
    }
}

fn aerodynamic_loss(rotor: &Rotor) -> Result<f64, DomainError> {
    let r = rotor.diameter / 2.0;
    let w = rotor.speed;
    let rotational_reynolds = r * r * w / AIR_KINEMATIC_VISCOSITY;

    let c_f = skin_friction(rotational_reynolds * GAP_RATIO)?;
    let cylinder = c_f * PI * AIR_DENSITY * w.powi(3) * r.powi(4) * rotor.length;

    let c_disk = 0.08 / GAP_RATIO.powf(0.167) / rotational_reynolds.powf(0.25);
    let faces = c_disk
        * AIR_DENSITY
        * w.powi(3)
        * r.powi(5)
        * (1.0 - rotor.core_radius_ratio.powi(5));

    let loss = cylinder + faces;
    if !loss.is_finite() {
        return Err(DomainError::NonPhysical {
            quantity: "windage loss",
            value: loss,
        });
    }
    Ok(loss)
}

/// Solves `1/√c_f = 2.04 + 1.768·ln(Re·√c_f)` by fixed-point iteration.
fn skin_friction(reynolds: f64) -> Result<f64, DomainError> {
    let mut c_f = SKIN_FRICTION_GUESS;

    for _ in 0..SKIN_FRICTION_MAX_ITERS {
        let next = (2.04 + 1.768 * (reynolds * c_f.sqrt()).ln()).powi(-2);
        let change = (next - c_f) / next;
        c_f = next;

        if change.abs() <= SKIN_FRICTION_REL_TOL {
            return Ok(c_f);
        }
    }

    Err(DomainError::WindageNotConverged {
        iters: SKIN_FRICTION_MAX_ITERS,
    })
}
