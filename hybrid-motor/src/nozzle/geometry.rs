use std::f64::consts::PI;

use hybrid_core::{constraint::StrictlyPositive, units};
use serde::Deserialize;
use uom::si::{
    area::square_meter,
    f64::{Area, Length},
    length::meter,
};

use crate::{ConfigError, StepRecord};

/// How the nozzle's throat, exit and diffuser are sized.
///
/// The choice is made once per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NozzleGeometry {
    /// Sized every step from the flow solution so the throat is exactly sonic.
    #[default]
    Ideal,

    /// Fixed dimensions of a physical nozzle.
    Hardware {
        #[serde(deserialize_with = "units::deserialize")]
        throat_diameter: Length,
        #[serde(deserialize_with = "units::deserialize")]
        exit_diameter: Length,
        #[serde(deserialize_with = "units::deserialize")]
        diffuser_length: Length,
    },
}

impl NozzleGeometry {
    /// Proposes fixed hardware from an ideal-nozzle run.
    ///
    /// Averages the throat diameter, exit diameter and diffuser length over
    /// every recorded step except the last two, which reflect the tail-off
    /// as the tank empties. Returns `None` with fewer than three records.
    #[must_use]
    pub fn suggested(records: &[StepRecord]) -> Option<Self> {
        let steady = records.len().checked_sub(2).filter(|&n| n > 0)?;
        let rows = &records[..steady];

        #[allow(clippy::cast_precision_loss)]
        let count = rows.len() as f64;
        let mean = |field: fn(&StepRecord) -> Length| {
            Length::new::<meter>(rows.iter().map(|r| field(r).get::<meter>()).sum::<f64>() / count)
        };

        Some(Self::Hardware {
            throat_diameter: mean(|r| r.nozzle.throat_diameter),
            exit_diameter: mean(|r| r.nozzle.exit_diameter),
            diffuser_length: mean(|r| r.nozzle.diffuser_length),
        })
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if let Self::Hardware {
            throat_diameter,
            exit_diameter,
            diffuser_length,
        } = *self
        {
            StrictlyPositive::new(throat_diameter)
                .map_err(ConfigError::constraint("nozzle.geometry.throat_diameter"))?;
            StrictlyPositive::new(exit_diameter)
                .map_err(ConfigError::constraint("nozzle.geometry.exit_diameter"))?;
            StrictlyPositive::new(diffuser_length)
                .map_err(ConfigError::constraint("nozzle.geometry.diffuser_length"))?;
            if exit_diameter < throat_diameter {
                return Err(ConfigError::Invalid {
                    field: "nozzle.geometry",
                    reason: "exit diameter must not be smaller than the throat".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Cross-sectional area of a circle of diameter `d`, `π·d²/4`.
#[must_use]
pub fn diameter_to_area(diameter: Length) -> Area {
    let d = diameter.get::<meter>();
    Area::new::<square_meter>(PI * d * d / 4.0)
}

/// Diameter of a circle with the given area, `sqrt(4·A/π)`.
#[must_use]
pub fn area_to_diameter(area: Area) -> Length {
    Length::new::<meter>((4.0 * area.get::<square_meter>() / PI).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::length::{inch, millimeter};

    #[test]
    fn area_and_diameter_are_inverse() {
        let inlet = Length::new::<inch>(1.45);
        let area = diameter_to_area(inlet);

        // π·(0.03683 m)²/4 ≈ 1.0653e-3 m²
        assert_relative_eq!(area.get::<square_meter>(), 1.0653e-3, max_relative = 1e-4);
        assert_relative_eq!(
            area_to_diameter(area).get::<meter>(),
            inlet.get::<meter>(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn hardware_dimensions_must_be_positive() {
        let good = NozzleGeometry::Hardware {
            throat_diameter: Length::new::<millimeter>(4.5),
            exit_diameter: Length::new::<millimeter>(10.2),
            diffuser_length: Length::new::<millimeter>(10.6),
        };
        assert!(good.validate().is_ok());
        assert!(NozzleGeometry::Ideal.validate().is_ok());

        let zero_throat = NozzleGeometry::Hardware {
            throat_diameter: Length::new::<millimeter>(0.0),
            exit_diameter: Length::new::<millimeter>(10.2),
            diffuser_length: Length::new::<millimeter>(10.6),
        };
        assert!(matches!(
            zero_throat.validate(),
            Err(ConfigError::Constraint {
                field: "nozzle.geometry.throat_diameter",
                ..
            })
        ));

        let converging = NozzleGeometry::Hardware {
            throat_diameter: Length::new::<millimeter>(10.2),
            exit_diameter: Length::new::<millimeter>(4.5),
            diffuser_length: Length::new::<millimeter>(10.6),
        };
        assert!(matches!(converging.validate(), Err(ConfigError::Invalid { .. })));
    }
}
