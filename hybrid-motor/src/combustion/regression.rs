use hybrid_core::units::{self, MassFlux};
use serde::Deserialize;
use uom::si::{
    f64::{Length, MassRate, Velocity},
    length::meter,
    mass_rate::kilogram_per_second,
    velocity::millimeter_per_second,
};

/// Empirical fuel regression correlation `r = a·G^n·L^m`.
///
/// The constants are bound to one unit convention: mass flux `G` in
/// kg/(m²·s) and port length `L` in meters give a regression rate in mm/s.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RegressionLaw {
    pub a: f64,
    pub n: f64,
    pub m: f64,
}

impl RegressionLaw {
    /// Returns the radial regression rate for a mass flux and port length.
    #[must_use]
    pub fn regression_rate(&self, mass_flux: MassFlux, port_length: Length) -> Velocity {
        let g = mass_flux.value;
        let l = port_length.get::<meter>();
        Velocity::new::<millimeter_per_second>(self.a * g.powf(self.n) * l.powf(self.m))
    }

    /// Checks that the constants describe a usable correlation.
    ///
    /// # Errors
    ///
    /// Returns a description of the first offending constant.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.a.is_finite() || self.a < 0.0 {
            return Err("a must be finite and non-negative");
        }
        if !self.n.is_finite() || self.n <= 0.0 {
            return Err("n must be finite and positive");
        }
        if !self.m.is_finite() {
            return Err("m must be finite");
        }
        Ok(())
    }
}

/// Settings for the per-step mass flow fixed-point iteration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct IterationConfig {
    /// Stop once successive total mass flow iterates differ by less than this.
    #[serde(deserialize_with = "units::deserialize")]
    pub precision: MassRate,
    pub max_iters: usize,
}

impl Default for IterationConfig {
    fn default() -> Self {
        Self {
            precision: MassRate::new::<kilogram_per_second>(1e-6),
            max_iters: 100,
        }
    }
}

impl IterationConfig {
    /// Validates the tolerance and iteration cap.
    ///
    /// # Errors
    ///
    /// Returns an error if the precision is not positive and finite or the
    /// iteration cap is zero.
    pub fn validate(&self) -> Result<(), &'static str> {
        let precision = self.precision.get::<kilogram_per_second>();
        if !precision.is_finite() || precision <= 0.0 {
            return Err("precision must be finite and positive");
        }
        if self.max_iters == 0 {
            return Err("max_iters must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{area::square_meter, f64::Area, velocity::meter_per_second};

    #[test]
    fn regression_rate_in_millimeters_per_second() {
        let law = RegressionLaw {
            a: 0.05,
            n: 0.65,
            m: -0.2,
        };

        // G = 0.0384 kg/s / 0.02713 m² ≈ 1.4154 kg/m²·s, L = 0.34 m
        // r = 0.05 · 1.4154^0.65 · 0.34^-0.2 ≈ 0.05 · 1.2534 · 1.2408 ≈ 0.07776 mm/s
        let flux = MassRate::new::<kilogram_per_second>(0.0384) / Area::new::<square_meter>(0.02713);
        let rate = law.regression_rate(flux, Length::new::<meter>(0.34));

        assert_relative_eq!(rate.get::<millimeter_per_second>(), 0.077_76, max_relative = 1e-3);
        assert_relative_eq!(rate.get::<meter_per_second>(), 7.776e-5, max_relative = 1e-3);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn no_flux_no_regression() {
        let law = RegressionLaw {
            a: 0.05,
            n: 0.65,
            m: -0.2,
        };
        let flux = MassRate::new::<kilogram_per_second>(0.0) / Area::new::<square_meter>(0.02);
        let rate = law.regression_rate(flux, Length::new::<meter>(0.34));
        assert_eq!(rate.get::<meter_per_second>(), 0.0);
    }

    #[test]
    fn validation() {
        let good = RegressionLaw {
            a: 0.05,
            n: 0.65,
            m: -0.2,
        };
        assert!(good.validate().is_ok());
        assert!(RegressionLaw { n: 0.0, ..good }.validate().is_err());
        assert!(RegressionLaw { a: f64::NAN, ..good }.validate().is_err());

        assert!(IterationConfig::default().validate().is_ok());
        let no_iters = IterationConfig {
            max_iters: 0,
            ..IterationConfig::default()
        };
        assert!(no_iters.validate().is_err());
    }
}
