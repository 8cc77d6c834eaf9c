//! Motor geometry, mass, torque limits, and losses from design parameters.
//!
//! Sizing follows the scaling laws in Gladin, Ali, Collins, "Conceptual
//! Modeling of Electric and Hybrid-Electric Propulsion for UAS Applications",
//! Georgia Tech, 2015. The regression constants are reproduced exactly.

mod windage;

pub use windage::Windage;

use std::f64::consts::PI;

use uom::si::{
    angular_velocity::{radian_per_second, revolution_per_minute},
    electrical_resistance::ohm,
    f64::{AngularVelocity, ElectricalResistance, Length, Mass, Power, Torque, Volume},
    length::meter,
    mass::kilogram,
    power::watt,
    torque::newton_meter,
    volume::{cubic_meter, cubic_millimeter},
};

use super::{DesignParameters, DomainError, parameters::positive};

/// Hysteresis loss coefficient.
const K_HYSTERESIS: f64 = 0.0275;

/// Eddy current loss coefficient.
const K_EDDY: f64 = 0.0000183;

/// Excess loss coefficient.
const K_EXCESS: f64 = 0.0000277;

/// Peak flux density in the stator iron, T.
const PEAK_FLUX_DENSITY: f64 = 1.22;

/// Stator iron density, kg/m³.
const STATOR_DENSITY: f64 = 7650.0;

/// Static electrical loading per amp of max current, A/m per A.
const LOADING_PER_AMP: f64 = 688.7;

/// Geometry, mass, torque limits, and losses of a sized motor.
///
/// Depends only on the design parameters and operating speed, so it is
/// identical for every no-load current guess during a solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingState {
    /// Maximum shaft speed.
    pub max_speed: AngularVelocity,

    /// Base speed, where the motor reaches its torque limit.
    pub base_speed: AngularVelocity,

    /// Operating shaft speed.
    pub operating_speed: AngularVelocity,

    /// Torque limit at base speed.
    pub max_torque: Torque,

    /// Torque at maximum speed.
    pub torque: Torque,

    /// Diameter-squared times length, proportional to torque capacity.
    pub d2l: Volume,

    /// Rotor diameter.
    pub diameter: Length,

    /// Stack length.
    pub length: Length,

    /// Cylindrical envelope volume, `π/4·d²·l`.
    pub volume: Volume,

    /// Total motor mass.
    pub mass: Mass,

    /// Mass of the stator iron core.
    pub iron_core_mass: Mass,

    /// Coil turns per phase.
    pub coil_turns: f64,

    /// Iron (hysteresis, eddy, and excess) loss at operating speed.
    pub iron_loss: Power,

    /// Total winding resistance across all phases.
    pub winding_resistance: ElectricalResistance,

    /// Aerodynamic loss at operating speed.
    pub windage_loss: Power,

    /// Shaft power at operating speed.
    pub mech_power: Power,
}

/// Sizes a motor for the given design parameters at an operating speed.
///
/// # Errors
///
/// Returns a [`DomainError`] if a design parameter or the speed is out of
/// range, if the torque limit is non-physical, or if the windage model fails.
pub fn size(
    params: &DesignParameters,
    speed: AngularVelocity,
    windage: Windage,
) -> Result<SizingState, DomainError> {
    let p = params.scalars()?;
    let speed_rpm = positive("speed", speed)?.get::<revolution_per_minute>();

    let w_max = p.max_rpm * 2.0 * PI / 60.0;
    let w_base = p.kappa * w_max;

    let max_torque = p.design_power / w_base;
    if !max_torque.is_finite() || max_torque <= 0.0 {
        return Err(DomainError::NonPhysical {
            quantity: "max torque",
            value: max_torque,
        });
    }
    let torque = p.design_power / w_max;

    // Mechanical power needs the operating speed first.
    let w_operating = speed_rpm * 2.0 * PI / 60.0;
    let mech_power = w_operating * torque;

    let d2l = 293722.0 * max_torque.powf(0.7592);
    let diameter = (d2l / p.length_to_diameter).powf(1.0 / 3.0) / 1000.0;
    let length = diameter * p.length_to_diameter;
    let volume = PI / 4.0 * diameter.powi(2) * length;
    let mass = 0.0000070646 * d2l.powf(0.9386912061);

    let iron = IronCore::new(diameter, length, p.core_radius_ratio);
    let iron_loss = iron.loss(speed_rpm * p.pole_pairs / 60.0);

    let winding = Winding::new(p.max_current, p.n_phases, diameter);

    let windage_loss = windage.loss(&windage::Rotor {
        diameter,
        length,
        core_radius_ratio: p.core_radius_ratio,
        speed: w_operating,
    })?;

    Ok(SizingState {
        max_speed: AngularVelocity::new::<radian_per_second>(w_max),
        base_speed: AngularVelocity::new::<radian_per_second>(w_base),
        operating_speed: AngularVelocity::new::<radian_per_second>(w_operating),
        max_torque: Torque::new::<newton_meter>(max_torque),
        torque: Torque::new::<newton_meter>(torque),
        d2l: Volume::new::<cubic_millimeter>(d2l),
        diameter: Length::new::<meter>(diameter),
        length: Length::new::<meter>(length),
        volume: Volume::new::<cubic_meter>(volume),
        mass: Mass::new::<kilogram>(mass),
        iron_core_mass: Mass::new::<kilogram>(iron.mass),
        coil_turns: winding.turns,
        iron_loss: Power::new::<watt>(iron_loss),
        winding_resistance: ElectricalResistance::new::<ohm>(winding.resistance),
        windage_loss: Power::new::<watt>(windage_loss),
        mech_power: Power::new::<watt>(mech_power),
    })
}

/// Annular stator iron core.
struct IronCore {
    mass: f64,
}

impl IronCore {
    fn new(diameter: f64, length: f64, core_radius_ratio: f64) -> Self {
        let volume =
            PI * length * (diameter / 2.0).powi(2) * (1.0 - core_radius_ratio.powi(2));
        Self {
            mass: STATOR_DENSITY * volume,
        }
    }

    /// Steinmetz-style iron loss at electrical frequency `freq` (Hz), W.
    fn loss(&self, freq: f64) -> f64 {
        let b = PEAK_FLUX_DENSITY;
        (K_HYSTERESIS * b.powi(2) * freq
            + K_EDDY * (b * freq).powi(2)
            + K_EXCESS * (b * freq).powf(1.5))
            * self.mass
    }
}

/// Stator winding sized from the static electrical loading.
struct Winding {
    turns: f64,
    resistance: f64,
}

impl Winding {
    fn new(max_current: f64, n_phases: f64, diameter: f64) -> Self {
        let loading = LOADING_PER_AMP * max_current;
        let turns = loading * PI * diameter / max_current / n_phases / 2.0;

        // Conductor resistance fit against wire gauge sized for the max current.
        let resistance_per_km_per_turn = 48.8387296964863 * max_current.powf(-1.00112597971171);
        let turn_length = diameter * 3.14159;
        let resistance_per_turn = resistance_per_km_per_turn * turn_length / 1000.0;

        Self {
            turns,
            resistance: resistance_per_turn * turns * n_phases,
        }
    }
}
