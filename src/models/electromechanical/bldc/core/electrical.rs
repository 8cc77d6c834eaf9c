//! Terminal quantities from the equivalent circuit of a sized motor.

use std::f64::consts::PI;

use uom::si::{
    angular_velocity::radian_per_second,
    electric_current::ampere,
    electric_potential::volt,
    electrical_resistance::ohm,
    f64::{ElectricCurrent, ElectricPotential, Frequency, Power},
    frequency::hertz,
    power::watt,
    torque::newton_meter,
};

use super::{DesignParameters, DomainError, SizingState};

/// RPM per rad/s.
const RPM_PER_RAD_S: f64 = 30.0 / PI;

/// Current, voltage, and power at the operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectricalState {
    /// No-load current these quantities were evaluated at.
    pub no_load_current: ElectricCurrent,

    /// Line current.
    pub current: ElectricCurrent,

    /// Current per phase.
    pub phase_current: ElectricCurrent,

    /// Terminal voltage.
    pub voltage: ElectricPotential,

    /// Phase voltage.
    pub phase_voltage: ElectricPotential,

    /// Electrical frequency.
    pub frequency: Frequency,

    /// Electrical power required: shaft power plus all losses.
    pub power_input: Power,

    /// Resistive loss in the windings.
    pub copper_loss: Power,

    /// Speed constant `k_v`, RPM per volt.
    pub voltage_constant: f64,

    /// Torque constant `k_t`, N·m per amp.
    pub torque_constant: f64,
}

/// Evaluates the motor's terminal quantities at a trial no-load current.
///
/// # Errors
///
/// Returns [`DomainError::NoLoadCurrentTooHigh`] if `no_load_current` is not
/// strictly below the max current (or is not finite), and
/// [`DomainError::InvalidParameter`] if a design parameter is out of range.
pub fn evaluate(
    params: &DesignParameters,
    sizing: &SizingState,
    no_load_current: ElectricCurrent,
) -> Result<ElectricalState, DomainError> {
    let p = params.scalars()?;
    let i0 = no_load_current.get::<ampere>();

    if !i0.is_finite() || i0 >= p.max_current {
        return Err(DomainError::NoLoadCurrentTooHigh {
            max_current: params.max_current,
            no_load_current,
        });
    }

    let max_torque = sizing.max_torque.get::<newton_meter>();
    let torque = sizing.torque.get::<newton_meter>();
    let resistance = sizing.winding_resistance.get::<ohm>();
    let w_operating = sizing.operating_speed.get::<radian_per_second>();

    let k_v = (p.max_current - i0) / max_torque * RPM_PER_RAD_S;
    let k_t = RPM_PER_RAD_S / k_v;

    let current = i0 + torque / k_t;
    let copper_loss = current.powi(2) * resistance;
    let power_input = sizing.mech_power.get::<watt>()
        + sizing.windage_loss.get::<watt>()
        + sizing.iron_loss.get::<watt>()
        + copper_loss;

    let voltage = current * resistance + w_operating / (k_v / RPM_PER_RAD_S);
    let frequency = w_operating / PI * p.pole_pairs / 60.0;

    Ok(ElectricalState {
        no_load_current,
        current: ElectricCurrent::new::<ampere>(current),
        phase_current: ElectricCurrent::new::<ampere>(current / p.n_phases),
        voltage: ElectricPotential::new::<volt>(voltage),
        phase_voltage: ElectricPotential::new::<volt>(voltage * (3.0_f64 / 2.0).sqrt()),
        frequency: Frequency::new::<hertz>(frequency),
        power_input: Power::new::<watt>(power_input),
        copper_loss: Power::new::<watt>(copper_loss),
        voltage_constant: k_v,
        torque_constant: k_t,
    })
}
