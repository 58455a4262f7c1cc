//! Motor configuration.
//!
//! A [`MotorConfig`] is an immutable description of one motor and one run.
//! It is passed to [`Motor::new`](crate::Motor::new), which validates every
//! value while building the components.
//!
//! Configurations can also be read from TOML, where each dimensioned value is
//! a string carrying its unit:
//!
//! ```toml
//! time_step = "0.01 s"
//!
//! [oxidizer]
//! injector_mass_flow_rate = "0.0274 kg/s"
//! injector_count = 1
//!
//! [oxidizer.load.liquid]
//! volume = "0.4139 L"
//! temperature = "70 °F"
//! ```

use hybrid_core::{constraint::ConstraintError, units};
use hybrid_thermo::PropertyError;
use serde::Deserialize;
use thiserror::Error;
use uom::si::{
    angle::degree,
    f64::{Angle, Length, MassDensity, MassRate, Pressure, ThermodynamicTemperature, Time, Volume},
    length::inch,
    mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second,
    pressure::atmosphere,
    thermodynamic_temperature::degree_fahrenheit,
    time::second,
    volume::liter,
};

use crate::{
    combustion::{GrainConfig, IterationConfig, RegressionLaw},
    nozzle::{ChamberConfig, NozzleConfig, NozzleGeometry},
    oxidizer::{OxidizerConfig, OxidizerLoad},
};

/// Complete description of a motor and the time step used to simulate it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MotorConfig {
    #[serde(deserialize_with = "units::deserialize")]
    pub time_step: Time,
    pub oxidizer: OxidizerConfig,
    pub grain: GrainConfig,
    pub regression: RegressionLaw,
    #[serde(default)]
    pub iteration: IterationConfig,
    pub nozzle: NozzleConfig,
    #[serde(default)]
    pub chamber: ChamberConfig,
}

impl MotorConfig {
    /// The baseline nitrous oxide hybrid.
    ///
    /// A 15 in grain with a 1.0 in port inside a 1.75 in outer diameter, fed
    /// by a 0.4139 L charge of liquid N₂O at 70 °F through one 0.0274 kg/s
    /// injector, exhausting through an ideal nozzle to 1 atm.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            time_step: Time::new::<second>(0.01),
            oxidizer: OxidizerConfig {
                load: OxidizerLoad::Liquid {
                    volume: Volume::new::<liter>(0.4139),
                    temperature: ThermodynamicTemperature::new::<degree_fahrenheit>(70.0),
                },
                injector_mass_flow_rate: MassRate::new::<kilogram_per_second>(0.0274),
                injector_count: 1,
            },
            grain: GrainConfig {
                port_diameter: Length::new::<inch>(1.0),
                port_length: Length::new::<inch>(15.0),
                outer_diameter: Length::new::<inch>(1.75),
                fuel_density: MassDensity::new::<kilogram_per_cubic_meter>(3957.0),
            },
            regression: RegressionLaw {
                a: 0.05,
                n: 0.65,
                m: -0.2,
            },
            iteration: IterationConfig::default(),
            nozzle: NozzleConfig {
                inlet_diameter: Length::new::<inch>(1.45),
                half_angle: Angle::new::<degree>(15.0),
                exit_pressure: Pressure::new::<atmosphere>(1.0),
                geometry: NozzleGeometry::Ideal,
            },
            chamber: ChamberConfig::default(),
        }
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid TOML, a field
    /// is missing, or a unit string has the wrong dimension.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse { source })
    }

    /// Returns a copy with the oxidizer stored at a different ambient temperature.
    ///
    /// Has no effect when the oxidizer load is given directly as a mass.
    #[must_use]
    pub fn with_external_temperature(mut self, temperature: ThermodynamicTemperature) -> Self {
        if let OxidizerLoad::Liquid {
            temperature: current,
            ..
        } = &mut self.oxidizer.load
        {
            *current = temperature;
        }
        self
    }

    /// Returns a copy using the given nozzle geometry.
    #[must_use]
    pub fn with_nozzle_geometry(mut self, geometry: NozzleGeometry) -> Self {
        self.nozzle.geometry = geometry;
        self
    }
}

/// Errors raised while turning a [`MotorConfig`] into components.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A value violates its numeric constraint.
    #[error("invalid {field}: {source}")]
    Constraint {
        field: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// A value is outside the range the model supports.
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    /// A thermodynamic property needed for construction could not be evaluated.
    #[error("thermodynamic model failed: {context}")]
    Property {
        context: &'static str,
        #[source]
        source: PropertyError,
    },

    /// The configuration text could not be parsed.
    #[error("failed to parse motor configuration")]
    Parse {
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Returns a mapper wrapping a constraint violation for the named field.
    pub(crate) fn constraint(field: &'static str) -> impl FnOnce(ConstraintError) -> Self {
        move |source| Self::Constraint { field, source }
    }

    /// Returns a mapper wrapping a property failure with context.
    pub(crate) fn property(context: &'static str) -> impl FnOnce(PropertyError) -> Self {
        move |source| Self::Property { context, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{length::meter, thermodynamic_temperature::kelvin};

    const MOTOR_TOML: &str = r#"
        time_step = "10 ms"

        [oxidizer]
        injector_mass_flow_rate = "0.0274 kg/s"
        injector_count = 1

        [oxidizer.load.liquid]
        volume = "0.4139 L"
        temperature = "70 °F"

        [grain]
        port_diameter = "1.0 in"
        port_length = "15 in"
        outer_diameter = "1.75 in"
        fuel_density = "3957 kg/m³"

        [regression]
        a = 0.05
        n = 0.65
        m = -0.2

        [nozzle]
        inlet_diameter = "1.45 in"
        half_angle = "15 °"
        exit_pressure = "1 atm"
        geometry = "ideal"
    "#;

    #[test]
    fn toml_matches_reference() {
        let parsed = MotorConfig::from_toml_str(MOTOR_TOML).unwrap();
        let reference = MotorConfig::reference();

        assert_relative_eq!(parsed.time_step.get::<second>(), 0.01);
        assert_relative_eq!(
            parsed.grain.port_length.get::<meter>(),
            reference.grain.port_length.get::<meter>()
        );
        assert_relative_eq!(
            parsed.nozzle.half_angle.get::<degree>(),
            15.0,
            epsilon = 1e-12
        );
        assert_eq!(parsed.regression, reference.regression);
        assert_eq!(parsed.iteration, IterationConfig::default());
        assert_eq!(parsed.nozzle.geometry, NozzleGeometry::Ideal);
        assert_relative_eq!(
            parsed.chamber.temperature.get::<kelvin>(),
            reference.chamber.temperature.get::<kelvin>()
        );
    }

    #[test]
    fn hardware_nozzle_from_toml() {
        let text = MOTOR_TOML.replace(
            r#"geometry = "ideal""#,
            r#"
            [nozzle.geometry.hardware]
            throat_diameter = "4.5 mm"
            exit_diameter = "10.2 mm"
            diffuser_length = "10.6 mm"
            "#,
        );
        let parsed = MotorConfig::from_toml_str(&text).unwrap();

        match parsed.nozzle.geometry {
            NozzleGeometry::Hardware {
                throat_diameter, ..
            } => assert_relative_eq!(throat_diameter.get::<meter>(), 0.0045),
            NozzleGeometry::Ideal => panic!("expected hardware geometry"),
        }
    }

    #[test]
    fn mismatched_unit_is_rejected() {
        let text = MOTOR_TOML.replace(r#"port_length = "15 in""#, r#"port_length = "15 kg""#);
        let err = MotorConfig::from_toml_str(&text).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("unit `kg` measures mass, expected length"));
    }

    #[test]
    fn external_temperature_override() {
        let warm = MotorConfig::reference()
            .with_external_temperature(ThermodynamicTemperature::new::<degree_fahrenheit>(90.0));

        match warm.oxidizer.load {
            OxidizerLoad::Liquid { temperature, .. } => {
                assert_relative_eq!(temperature.get::<degree_fahrenheit>(), 90.0, epsilon = 1e-9);
            }
            OxidizerLoad::Mass { .. } => panic!("expected a liquid load"),
        }
    }
}
