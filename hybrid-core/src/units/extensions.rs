use uom::si::f64::{TemperatureInterval, ThermodynamicTemperature};
use uom::si::{
    temperature_interval::kelvin as delta_kelvin, thermodynamic_temperature::kelvin as abs_kelvin,
};

/// Extension methods for `ThermodynamicTemperature`.
pub trait TemperatureOps {
    /// Computes the difference `self - other` as a `TemperatureInterval`.
    ///
    /// Inputs may use any supported temperature units, with values internally
    /// converted to kelvin for calculation.
    fn minus(self, other: Self) -> TemperatureInterval;

    /// Offsets an absolute temperature by an interval.
    #[must_use]
    fn plus(self, interval: TemperatureInterval) -> Self;
}

impl TemperatureOps for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }

    fn plus(self, interval: TemperatureInterval) -> Self {
        ThermodynamicTemperature::new::<abs_kelvin>(
            self.get::<abs_kelvin>() + interval.get::<delta_kelvin>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        temperature_interval::degree_celsius as delta_celsius,
        thermodynamic_temperature::{degree_celsius, degree_fahrenheit},
    };

    #[test]
    fn subtract_temperatures() {
        let t1 = ThermodynamicTemperature::new::<abs_kelvin>(2700.0);
        let t2 = ThermodynamicTemperature::new::<abs_kelvin>(3000.0);

        assert_relative_eq!(t2.minus(t1).get::<delta_kelvin>(), 300.0);
        assert_relative_eq!(t1.minus(t2).get::<delta_celsius>(), -300.0);

        // 21.1111 °C and 70 °F are the same temperature.
        let t_in_c = ThermodynamicTemperature::new::<degree_celsius>(190.0 / 9.0);
        let t_in_f = ThermodynamicTemperature::new::<degree_fahrenheit>(70.0);
        assert_relative_eq!(
            t_in_f.minus(t_in_c).get::<delta_kelvin>(),
            0.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn stagnation_offset() {
        // Chamber temperature plus a small dynamic temperature rise.
        let chamber = ThermodynamicTemperature::new::<abs_kelvin>(3000.0);
        let rise = TemperatureInterval::new::<delta_kelvin>(0.026);

        assert_relative_eq!(chamber.plus(rise).get::<abs_kelvin>(), 3000.026);
    }
}
