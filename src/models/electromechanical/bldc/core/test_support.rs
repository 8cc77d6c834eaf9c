use uom::si::{
    angular_velocity::revolution_per_minute,
    electric_current::ampere,
    f64::{AngularVelocity, ElectricCurrent, Power, Ratio},
    power::watt,
    ratio::ratio,
};

use super::DesignParameters;

/// 110 kW, 450 A motor with a hollow core.
pub(super) fn large_motor() -> DesignParameters {
    DesignParameters {
        max_speed: AngularVelocity::new::<revolution_per_minute>(2500.0),
        design_power: Power::new::<watt>(110_000.0),
        max_current: ElectricCurrent::new::<ampere>(450.0),
        n_phases: 3.0,
        speed: AngularVelocity::new::<revolution_per_minute>(1900.0),
        kappa: Ratio::new::<ratio>(0.5),
        pole_pairs: 6.0,
        length_to_diameter: Ratio::new::<ratio>(0.83),
        core_radius_ratio: Ratio::new::<ratio>(0.7),
    }
}

/// 0.394 hp, 42 A motor with a solid core.
pub(super) fn small_motor() -> DesignParameters {
    DesignParameters {
        max_speed: AngularVelocity::new::<revolution_per_minute>(3500.0),
        design_power: Power::new::<watt>(0.394 * 746.0),
        max_current: ElectricCurrent::new::<ampere>(42.0),
        n_phases: 3.0,
        speed: AngularVelocity::new::<revolution_per_minute>(1900.0),
        kappa: Ratio::new::<ratio>(1.0 / 1.75),
        pole_pairs: 6.0,
        length_to_diameter: Ratio::new::<ratio>(0.83),
        core_radius_ratio: Ratio::new::<ratio>(0.0),
    }
}
