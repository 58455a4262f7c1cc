//! Isentropic flow from the combustion chamber to the nozzle exit.
//!
//! [`Nozzle::solve`] takes the total mass flow from the combustion step and
//! walks it through the inlet, the sonic throat ("star") plane and the exit,
//! producing the momentum thrust `ṁ·(v_exit − v_inlet)`. Pressure thrust is
//! not included.

mod error;
mod geometry;
mod isentropic;
mod snapshot;

use hybrid_core::{
    constraint::StrictlyPositive,
    units::{self, TemperatureOps},
};
use hybrid_thermo::{
    PropertyError,
    fluid::GasMixture,
    model::{IdealGasMixture, StateFrom, ThermodynamicProperties},
};
use log::trace;
use serde::Deserialize;
use uom::si::{
    angle::{degree, radian},
    f64::{
        Angle, Area, Force, Length, MassRate, Pressure, TemperatureInterval,
        ThermodynamicTemperature, Velocity,
    },
    mass_rate::kilogram_per_second,
    pressure::{megapascal, pascal},
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    temperature_interval,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

use crate::ConfigError;

pub use error::NozzleError;
pub use geometry::{NozzleGeometry, area_to_diameter, diameter_to_area};
pub use isentropic::{area_ratio, exit_mach};
pub use snapshot::{FlowStation, MixtureSnapshot, StationProperties};

/// Nozzle dimensions and the back pressure it exhausts to.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct NozzleConfig {
    #[serde(deserialize_with = "units::deserialize")]
    pub inlet_diameter: Length,
    /// Half-angle of the diverging section.
    #[serde(deserialize_with = "units::deserialize")]
    pub half_angle: Angle,
    #[serde(deserialize_with = "units::deserialize")]
    pub exit_pressure: Pressure,
    #[serde(default)]
    pub geometry: NozzleGeometry,
}

/// Combustion chamber conditions feeding the nozzle.
///
/// Held fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChamberConfig {
    #[serde(deserialize_with = "units::deserialize")]
    pub temperature: ThermodynamicTemperature,
    #[serde(deserialize_with = "units::deserialize")]
    pub pressure: Pressure,
    #[serde(skip, default = "GasMixture::combustion_products")]
    pub composition: GasMixture,
}

impl Default for ChamberConfig {
    fn default() -> Self {
        Self {
            temperature: ThermodynamicTemperature::new::<kelvin>(3000.0),
            pressure: Pressure::new::<megapascal>(3.447),
            composition: GasMixture::combustion_products(),
        }
    }
}

/// The full flow solution for one mass flow rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NozzleSolution {
    pub inlet_velocity: Velocity,
    pub inlet_mach: f64,
    pub throat_area: Area,
    pub throat_diameter: Length,
    /// Stagnation temperature of the chamber flow.
    pub naught_temperature: ThermodynamicTemperature,
    pub star_temperature: ThermodynamicTemperature,
    pub star_pressure: Pressure,
    pub star_velocity: Velocity,
    /// Unity when the throat is sonic.
    pub star_mach: f64,
    pub exit_mach: f64,
    pub exit_area: Area,
    pub exit_diameter: Length,
    pub diffuser_length: Length,
    pub exit_velocity: Velocity,
    pub thrust: Force,
}

/// A converging-diverging nozzle and the gas states along it.
///
/// The chamber snapshot is fixed at construction. The star and exit
/// snapshots start as copies of it and are re-evaluated on every solve.
#[derive(Debug, Clone)]
pub struct Nozzle<M = IdealGasMixture> {
    thermo: M,
    inlet_area: Area,
    half_angle: Angle,
    exit_pressure: Pressure,
    geometry: NozzleGeometry,
    chamber: MixtureSnapshot,
    star: MixtureSnapshot,
    exit: MixtureSnapshot,
    chamber_properties: StationProperties,
}

impl Nozzle {
    /// Builds a nozzle using the ideal-gas mixture model.
    ///
    /// # Errors
    ///
    /// See [`Nozzle::with_model`].
    pub fn new(nozzle: &NozzleConfig, chamber: &ChamberConfig) -> Result<Self, ConfigError> {
        Self::with_model(IdealGasMixture, nozzle, chamber)
    }
}

impl<M> Nozzle<M>
where
    M: ThermodynamicProperties<GasMixture>
        + StateFrom<
            GasMixture,
            (GasMixture, ThermodynamicTemperature, Pressure),
            Error = PropertyError,
        >,
{
    /// Builds a nozzle evaluated with the given property model.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a dimension or pressure is not positive,
    /// the half-angle is outside (0°, 90°), or the chamber state cannot be
    /// evaluated.
    pub fn with_model(
        thermo: M,
        nozzle: &NozzleConfig,
        chamber: &ChamberConfig,
    ) -> Result<Self, ConfigError> {
        let inlet_diameter = StrictlyPositive::new(nozzle.inlet_diameter)
            .map_err(ConfigError::constraint("nozzle.inlet_diameter"))?;
        let exit_pressure = StrictlyPositive::new(nozzle.exit_pressure)
            .map_err(ConfigError::constraint("nozzle.exit_pressure"))?;
        let half_angle = nozzle.half_angle.get::<degree>();
        if !(half_angle > 0.0 && half_angle < 90.0) {
            return Err(ConfigError::Invalid {
                field: "nozzle.half_angle",
                reason: format!("must lie strictly between 0 and 90 degrees, got {half_angle}"),
            });
        }
        nozzle.geometry.validate()?;

        let state = thermo
            .state_from((
                chamber.composition.clone(),
                chamber.temperature,
                chamber.pressure,
            ))
            .map_err(ConfigError::property("chamber state"))?;
        let chamber_snapshot = MixtureSnapshot::new(FlowStation::Chamber, state);
        let chamber_properties = chamber_snapshot
            .properties(&thermo)
            .map_err(ConfigError::property("chamber properties"))?;

        Ok(Self {
            inlet_area: diameter_to_area(inlet_diameter.into_inner()),
            half_angle: nozzle.half_angle,
            exit_pressure: exit_pressure.into_inner(),
            geometry: nozzle.geometry,
            star: chamber_snapshot.copy_to(FlowStation::Star),
            exit: chamber_snapshot.copy_to(FlowStation::Exit),
            chamber: chamber_snapshot,
            chamber_properties,
            thermo,
        })
    }

    #[must_use]
    pub fn geometry(&self) -> NozzleGeometry {
        self.geometry
    }

    #[must_use]
    pub fn chamber_properties(&self) -> &StationProperties {
        &self.chamber_properties
    }

    /// Returns the gas state currently held for a station.
    #[must_use]
    pub fn snapshot(&self, station: FlowStation) -> &MixtureSnapshot {
        match station {
            FlowStation::Chamber => &self.chamber,
            FlowStation::Star => &self.star,
            FlowStation::Exit => &self.exit,
        }
    }

    /// Solves the flow chain for a total mass flow rate.
    ///
    /// Zero mass flow is valid and produces zero inlet velocity, zero throat
    /// and exit areas in ideal mode, and zero thrust.
    ///
    /// # Errors
    ///
    /// - [`NozzleError::InvalidFlowState`] for a negative or non-finite mass
    ///   flow, a supersonic inlet, or any non-physical intermediate.
    /// - [`NozzleError::Property`] if the star or exit state cannot be evaluated.
    pub fn solve(&mut self, mass_flow_rate: MassRate) -> Result<NozzleSolution, NozzleError> {
        let mdot = mass_flow_rate.get::<kilogram_per_second>();
        if !(mdot.is_finite() && mdot >= 0.0) {
            return Err(NozzleError::invalid(
                "mass_flow_rate",
                format!("must be finite and non-negative, got {mdot} kg/s"),
            ));
        }

        let chamber = self.chamber_properties;
        let k = chamber.heat_capacity_ratio;

        let inlet_velocity: Velocity = mass_flow_rate / (chamber.density * self.inlet_area);
        let inlet_mach = (inlet_velocity / chamber.speed_of_sound).get::<ratio>();
        if inlet_mach >= 1.0 {
            return Err(NozzleError::invalid(
                "inlet_mach",
                format!("inlet flow is supersonic (Mach {inlet_mach})"),
            ));
        }

        let throat_area = match self.geometry {
            NozzleGeometry::Ideal => self.inlet_area * area_ratio(k, inlet_mach, 1.0)?,
            NozzleGeometry::Hardware {
                throat_diameter, ..
            } => diameter_to_area(throat_diameter),
        };

        let v_in = inlet_velocity.get::<meter_per_second>();
        let cp = chamber.cp.get::<joule_per_kilogram_kelvin>();
        let naught_temperature = chamber
            .temperature
            .plus(TemperatureInterval::new::<temperature_interval::kelvin>(
                v_in * v_in / (2.0 * cp),
            ));
        let t0 = naught_temperature.get::<kelvin>();

        let star_temperature =
            ThermodynamicTemperature::new::<kelvin>(isentropic::star_temperature(k, t0)?);
        let star_pressure = Pressure::new::<pascal>(isentropic::star_pressure(
            k,
            chamber.pressure.get::<pascal>(),
        )?);
        self.star
            .reevaluate(&self.thermo, star_temperature, star_pressure)
            .map_err(NozzleError::property(FlowStation::Star))?;
        let star = self
            .star
            .properties(&self.thermo)
            .map_err(NozzleError::property(FlowStation::Star))?;
        let k_star = star.heat_capacity_ratio;

        let star_velocity = Velocity::new::<meter_per_second>(isentropic::sonic_velocity(
            k_star,
            star.gas_constant.get::<joule_per_kilogram_kelvin>(),
            star_temperature.get::<kelvin>(),
        )?);
        let star_mach = (star_velocity / star.speed_of_sound).get::<ratio>();

        let exit_mach = isentropic::exit_mach(
            k_star,
            chamber.pressure.get::<pascal>(),
            self.exit_pressure.get::<pascal>(),
        )?;

        let (throat_diameter, exit_area, exit_diameter, diffuser_length) = match self.geometry {
            NozzleGeometry::Ideal => {
                let exit_area = throat_area * area_ratio(k, 1.0, exit_mach)?;
                let throat_diameter = area_to_diameter(throat_area);
                let exit_diameter = area_to_diameter(exit_area);
                let diffuser_length = (exit_diameter - throat_diameter)
                    / (2.0 * self.half_angle.get::<radian>().tan());
                (throat_diameter, exit_area, exit_diameter, diffuser_length)
            }
            NozzleGeometry::Hardware {
                throat_diameter,
                exit_diameter,
                diffuser_length,
            } => (
                throat_diameter,
                diameter_to_area(exit_diameter),
                exit_diameter,
                diffuser_length,
            ),
        };

        // Only the pressure moves at the exit; the mixture keeps the chamber temperature.
        self.exit
            .reevaluate(&self.thermo, chamber.temperature, self.exit_pressure)
            .map_err(NozzleError::property(FlowStation::Exit))?;
        let exit = self
            .exit
            .properties(&self.thermo)
            .map_err(NozzleError::property(FlowStation::Exit))?;
        let exit_velocity = exit_mach * exit.speed_of_sound;

        let thrust: Force = mass_flow_rate * (exit_velocity - inlet_velocity);
        if !thrust.value.is_finite() {
            return Err(NozzleError::invalid("thrust", "thrust is not finite"));
        }
        trace!(
            "nozzle: Mi = {inlet_mach:.5}, Me = {exit_mach:.4}, thrust = {:.3} N",
            thrust.value
        );

        Ok(NozzleSolution {
            inlet_velocity,
            inlet_mach,
            throat_area,
            throat_diameter,
            naught_temperature,
            star_temperature,
            star_pressure,
            star_velocity,
            star_mach,
            exit_mach,
            exit_area,
            exit_diameter,
            diffuser_length,
            exit_velocity,
            thrust,
        })
    }
}
