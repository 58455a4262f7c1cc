use std::f64::consts::PI;

use hybrid_core::{constraint::StrictlyPositive, units};
use serde::Deserialize;
use uom::si::f64::{Area, Length, MassDensity};

use crate::ConfigError;

/// Fuel grain dimensions and material.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GrainConfig {
    /// Initial bore diameter.
    #[serde(deserialize_with = "units::deserialize")]
    pub port_diameter: Length,
    #[serde(deserialize_with = "units::deserialize")]
    pub port_length: Length,
    /// The bore burns through once it grows past this diameter.
    #[serde(deserialize_with = "units::deserialize")]
    pub outer_diameter: Length,
    #[serde(deserialize_with = "units::deserialize")]
    pub fuel_density: MassDensity,
}

/// A cylindrical fuel grain with a single circular port.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelGrain {
    pub(super) port_diameter: Length,
    port_length: Length,
    outer_diameter: Length,
    fuel_density: MassDensity,
}

impl FuelGrain {
    /// Builds a grain from its configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any dimension or the density is not
    /// strictly positive, or the outer diameter does not exceed the port.
    pub fn new(config: &GrainConfig) -> Result<Self, ConfigError> {
        let port_diameter = StrictlyPositive::new(config.port_diameter)
            .map_err(ConfigError::constraint("grain.port_diameter"))?
            .into_inner();
        let port_length = StrictlyPositive::new(config.port_length)
            .map_err(ConfigError::constraint("grain.port_length"))?
            .into_inner();
        let outer_diameter = StrictlyPositive::new(config.outer_diameter)
            .map_err(ConfigError::constraint("grain.outer_diameter"))?
            .into_inner();
        let fuel_density = StrictlyPositive::new(config.fuel_density)
            .map_err(ConfigError::constraint("grain.fuel_density"))?
            .into_inner();

        if outer_diameter <= port_diameter {
            return Err(ConfigError::Invalid {
                field: "grain.outer_diameter",
                reason: "must exceed the initial port diameter".to_string(),
            });
        }

        Ok(Self {
            port_diameter,
            port_length,
            outer_diameter,
            fuel_density,
        })
    }

    /// Current bore diameter.
    #[must_use]
    pub fn port_diameter(&self) -> Length {
        self.port_diameter
    }

    #[must_use]
    pub fn port_length(&self) -> Length {
        self.port_length
    }

    #[must_use]
    pub fn outer_diameter(&self) -> Length {
        self.outer_diameter
    }

    #[must_use]
    pub fn fuel_density(&self) -> MassDensity {
        self.fuel_density
    }

    /// Burning surface of the bore, `π·D·L`.
    ///
    /// Both the mass flux and the fuel mass flow are taken over this area.
    #[must_use]
    pub fn port_surface_area(&self) -> Area {
        PI * self.port_diameter * self.port_length
    }

    /// Whether the bore has grown past the outer diameter.
    #[must_use]
    pub fn is_burned_through(&self) -> bool {
        self.port_diameter > self.outer_diameter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{area::square_meter, length::meter, mass_density::kilogram_per_cubic_meter};

    fn config() -> GrainConfig {
        GrainConfig {
            port_diameter: Length::new::<meter>(0.0254),
            port_length: Length::new::<meter>(0.34),
            outer_diameter: Length::new::<meter>(0.04445),
            fuel_density: MassDensity::new::<kilogram_per_cubic_meter>(3957.0),
        }
    }

    #[test]
    fn burning_surface() {
        let grain = FuelGrain::new(&config()).unwrap();
        // π · 0.0254 m · 0.34 m ≈ 0.02713 m²
        assert_relative_eq!(
            grain.port_surface_area().get::<square_meter>(),
            PI * 0.0254 * 0.34
        );
        assert!(!grain.is_burned_through());
    }

    #[test]
    fn rejects_bad_geometry() {
        let thin = GrainConfig {
            outer_diameter: Length::new::<meter>(0.0254),
            ..config()
        };
        assert!(matches!(
            FuelGrain::new(&thin),
            Err(ConfigError::Invalid { .. })
        ));

        let massless = GrainConfig {
            fuel_density: MassDensity::new::<kilogram_per_cubic_meter>(0.0),
            ..config()
        };
        assert!(matches!(
            FuelGrain::new(&massless),
            Err(ConfigError::Constraint {
                field: "grain.fuel_density",
                ..
            })
        ));
    }
}
