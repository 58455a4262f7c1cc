//! Fuel grain regression and the per-step mass flow solve.
//!
//! Total mass flow and fuel regression depend on each other: the regression
//! rate is driven by the total mass flux, and the fuel it releases adds to
//! that flux. [`CombustionChamber::solve_mass_flow`] resolves the pair by
//! fixed-point iteration starting from the oxidizer flow alone.

mod error;
mod grain;
mod regression;

use hybrid_core::units::MassFlux;
use log::{debug, trace};
use uom::{
    ConstZero,
    si::{
        f64::{Length, MassRate, Time, Velocity},
        mass_rate::kilogram_per_second,
        ratio::ratio,
    },
};

use crate::ConfigError;

pub use error::{CombustionError, UndefinedRatio};
pub use grain::{FuelGrain, GrainConfig};
pub use regression::{IterationConfig, RegressionLaw};

/// A converged solution of the mass flow iteration.
///
/// `total_mass_flux`, `regression_rate` and `fuel_mass_flow_rate` belong to
/// the iterate that produced `total_mass_flow_rate`, which therefore equals
/// `fuel_mass_flow_rate` plus the oxidizer flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowSolution {
    pub total_mass_flow_rate: MassRate,
    pub total_mass_flux: MassFlux,
    pub regression_rate: Velocity,
    pub fuel_mass_flow_rate: MassRate,
    pub iterations: usize,
    /// Change between the last two iterates.
    pub residual: MassRate,
}

/// Outputs of one completed combustion step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombustionStep {
    pub flow: FlowSolution,
    /// Port diameter after this step's regression.
    pub port_diameter: Length,
    /// `None` until the ratio has been defined at least once.
    pub oxidizer_fuel_ratio: Option<f64>,
}

/// The fuel grain together with its regression law and iteration settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CombustionChamber {
    grain: FuelGrain,
    law: RegressionLaw,
    iteration: IterationConfig,
    oxidizer_fuel_ratio: Option<f64>,
}

impl CombustionChamber {
    /// Builds a chamber from validated parts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the regression constants or the
    /// iteration settings are unusable.
    pub fn new(
        grain: FuelGrain,
        law: RegressionLaw,
        iteration: IterationConfig,
    ) -> Result<Self, ConfigError> {
        law.validate().map_err(|reason| ConfigError::Invalid {
            field: "regression",
            reason: reason.to_string(),
        })?;
        iteration.validate().map_err(|reason| ConfigError::Invalid {
            field: "iteration",
            reason: reason.to_string(),
        })?;

        Ok(Self {
            grain,
            law,
            iteration,
            oxidizer_fuel_ratio: None,
        })
    }

    #[must_use]
    pub fn grain(&self) -> &FuelGrain {
        &self.grain
    }

    /// The most recent defined oxidizer/fuel ratio.
    #[must_use]
    pub fn oxidizer_fuel_ratio(&self) -> Option<f64> {
        self.oxidizer_fuel_ratio
    }

    /// Solves for the self-consistent total mass flow at the current port diameter.
    ///
    /// Starting from `guess`, each iteration computes the mass flux over the
    /// port surface, the regression rate, and the resulting fuel flow, then
    /// sets the new total to fuel plus oxidizer. Iteration stops once the
    /// change falls below the configured precision.
    ///
    /// This does not modify the grain.
    ///
    /// # Errors
    ///
    /// - [`CombustionError::NonConvergence`] if the cap is reached first.
    /// - [`CombustionError::NonFiniteIterate`] if an iterate is NaN or infinite.
    pub fn solve_mass_flow(
        &self,
        oxidizer_mass_flow_rate: MassRate,
        guess: MassRate,
    ) -> Result<FlowSolution, CombustionError> {
        let area = self.grain.port_surface_area();
        let port_length = self.grain.port_length();
        let fuel_density = self.grain.fuel_density();

        let mut total = guess;
        let mut delta = MassRate::new::<kilogram_per_second>(f64::INFINITY);

        for iteration in 1..=self.iteration.max_iters {
            let total_mass_flux: MassFlux = total / area;
            let regression_rate = self.law.regression_rate(total_mass_flux, port_length);
            let fuel_mass_flow_rate: MassRate = fuel_density * regression_rate * area;
            let next = fuel_mass_flow_rate + oxidizer_mass_flow_rate;

            if !next.value.is_finite() {
                return Err(CombustionError::NonFiniteIterate { iteration });
            }

            delta = (next - total).abs();
            total = next;
            trace!(
                "iteration {iteration}: total = {:e} kg/s, delta = {:e} kg/s",
                total.get::<kilogram_per_second>(),
                delta.get::<kilogram_per_second>(),
            );

            if delta < self.iteration.precision {
                return Ok(FlowSolution {
                    total_mass_flow_rate: total,
                    total_mass_flux,
                    regression_rate,
                    fuel_mass_flow_rate,
                    iterations: iteration,
                    residual: delta,
                });
            }
        }

        Err(CombustionError::NonConvergence {
            iterations: self.iteration.max_iters,
            last_total: total,
            delta,
        })
    }

    /// Runs one combustion step.
    ///
    /// Solves the mass flow starting from the oxidizer flow, widens the port
    /// by `2·r·Δt`, and updates the oxidizer/fuel ratio. The ratio keeps its
    /// previous value when the fuel flow is zero.
    ///
    /// # Errors
    ///
    /// Returns any error from [`solve_mass_flow`](Self::solve_mass_flow), or
    /// [`CombustionError::BurnThrough`] if the widened port exceeds the grain's
    /// outer diameter. Burn-through is terminal.
    pub fn step(
        &mut self,
        oxidizer_mass_flow_rate: MassRate,
        dt: Time,
    ) -> Result<CombustionStep, CombustionError> {
        let flow = self.solve_mass_flow(oxidizer_mass_flow_rate, oxidizer_mass_flow_rate)?;

        self.grain.port_diameter += 2.0 * flow.regression_rate * dt;

        match oxidizer_fuel_ratio(oxidizer_mass_flow_rate, flow.fuel_mass_flow_rate) {
            Ok(value) => self.oxidizer_fuel_ratio = Some(value),
            Err(err) => debug!("{err}, holding O/F at {:?}", self.oxidizer_fuel_ratio),
        }

        if self.grain.is_burned_through() {
            return Err(CombustionError::BurnThrough {
                port_diameter: self.grain.port_diameter(),
                outer_diameter: self.grain.outer_diameter(),
            });
        }

        Ok(CombustionStep {
            flow,
            port_diameter: self.grain.port_diameter(),
            oxidizer_fuel_ratio: self.oxidizer_fuel_ratio,
        })
    }
}

/// Computes the oxidizer/fuel mass ratio.
///
/// # Errors
///
/// Returns [`UndefinedRatio`] when the fuel flow is exactly zero.
pub fn oxidizer_fuel_ratio(
    oxidizer_mass_flow_rate: MassRate,
    fuel_mass_flow_rate: MassRate,
) -> Result<f64, UndefinedRatio> {
    if fuel_mass_flow_rate == MassRate::ZERO {
        return Err(UndefinedRatio);
    }
    Ok((oxidizer_mass_flow_rate / fuel_mass_flow_rate).get::<ratio>())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{length::meter, time::second, velocity::meter_per_second};

    use crate::test_utils::{scenario_chamber, scenario_config};

    fn kg_s(value: f64) -> MassRate {
        MassRate::new::<kilogram_per_second>(value)
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn zero_oxidizer_flow_converges_to_zero_in_one_iteration() {
        let chamber = scenario_chamber();
        let solution = chamber.solve_mass_flow(kg_s(0.0), kg_s(0.0)).unwrap();

        assert_eq!(solution.iterations, 1);
        assert_eq!(solution.total_mass_flow_rate, kg_s(0.0));
        assert_eq!(solution.fuel_mass_flow_rate, kg_s(0.0));
        assert_eq!(solution.regression_rate.get::<meter_per_second>(), 0.0);
    }

    #[test]
    fn converged_flow_matches_hand_calculation() {
        let chamber = scenario_chamber();
        let solution = chamber.solve_mass_flow(kg_s(0.03), kg_s(0.03)).unwrap();

        // Fuel adds roughly 28% to the oxidizer flow for the scenario grain:
        // A = π·0.0254·0.34 ≈ 0.02713 m², G ≈ 1.415 kg/m²·s, r ≈ 7.78e-5 m/s,
        // ṁ_f = 3957·7.77e-5·0.02713 ≈ 0.00834 kg/s.
        assert_relative_eq!(
            solution.total_mass_flow_rate.get::<kilogram_per_second>(),
            0.0384,
            max_relative = 5e-3
        );
        assert_relative_eq!(
            solution.total_mass_flow_rate.get::<kilogram_per_second>(),
            (solution.fuel_mass_flow_rate + kg_s(0.03)).get::<kilogram_per_second>(),
            max_relative = 1e-12
        );
        assert!(solution.residual < chamber.iteration.precision);
        assert!(solution.iterations > 1);
    }

    #[test]
    fn converged_iterate_is_a_fixed_point() {
        let chamber = scenario_chamber();
        let first = chamber.solve_mass_flow(kg_s(0.03), kg_s(0.03)).unwrap();
        let again = chamber
            .solve_mass_flow(kg_s(0.03), first.total_mass_flow_rate)
            .unwrap();

        assert_eq!(again.iterations, 1);
        let change = (again.total_mass_flow_rate - first.total_mass_flow_rate).abs();
        assert!(change < chamber.iteration.precision);
    }

    #[test]
    fn port_grows_by_twice_the_regression_rate() {
        let mut chamber = scenario_chamber();
        let dt = Time::new::<second>(0.01);
        let before = chamber.grain().port_diameter();

        let step = chamber.step(kg_s(0.03), dt).unwrap();

        let expected_rate = chamber
            .law
            .regression_rate(step.flow.total_mass_flux, chamber.grain().port_length());
        let growth = step.port_diameter - before;
        assert_relative_eq!(
            growth.get::<meter>(),
            (2.0 * expected_rate * dt).get::<meter>(),
            max_relative = 1e-12
        );
        assert_eq!(step.port_diameter, chamber.grain().port_diameter());

        // Growth continues monotonically.
        let next = chamber.step(kg_s(0.03), dt).unwrap();
        assert!(next.port_diameter > step.port_diameter);
    }

    #[test]
    fn burn_through_is_reported() {
        let config = scenario_config();
        let reference = scenario_chamber();
        let dt = config.time_step;
        let rate = reference
            .solve_mass_flow(kg_s(0.03), kg_s(0.03))
            .unwrap()
            .regression_rate;

        // Outer wall halfway through the first step's growth.
        let mut grain_config = config.grain;
        grain_config.outer_diameter = grain_config.port_diameter + rate * dt;
        let grain = FuelGrain::new(&grain_config).unwrap();
        let mut chamber =
            CombustionChamber::new(grain, config.regression, config.iteration).unwrap();

        match chamber.step(kg_s(0.03), dt) {
            Err(CombustionError::BurnThrough {
                port_diameter,
                outer_diameter,
            }) => assert!(port_diameter > outer_diameter),
            other => panic!("expected burn-through, got {other:?}"),
        }
    }

    #[test]
    fn iteration_cap_is_reported() {
        let config = scenario_config();
        let iteration = IterationConfig {
            max_iters: 1,
            ..config.iteration
        };
        let grain = FuelGrain::new(&config.grain).unwrap();
        let chamber = CombustionChamber::new(grain, config.regression, iteration).unwrap();

        match chamber.solve_mass_flow(kg_s(0.03), kg_s(0.03)) {
            Err(CombustionError::NonConvergence {
                iterations,
                last_total,
                delta,
            }) => {
                assert_eq!(iterations, 1);
                assert!(last_total > kg_s(0.03));
                assert!(delta > iteration.precision);
            }
            other => panic!("expected non-convergence, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_guess_is_an_error() {
        let chamber = scenario_chamber();
        assert_eq!(
            chamber.solve_mass_flow(kg_s(0.03), kg_s(f64::NAN)),
            Err(CombustionError::NonFiniteIterate { iteration: 1 })
        );
    }

    #[test]
    fn ratio_is_held_when_fuel_flow_is_zero() {
        let mut chamber = scenario_chamber();
        let dt = Time::new::<second>(0.01);

        let first = chamber.step(kg_s(0.03), dt).unwrap();
        let held = first.oxidizer_fuel_ratio.unwrap();
        assert_relative_eq!(
            held,
            0.03 / first.flow.fuel_mass_flow_rate.get::<kilogram_per_second>(),
            max_relative = 1e-12
        );

        // A grain that no longer regresses releases no fuel.
        chamber.law.a = 0.0;
        let second_step = chamber.step(kg_s(0.03), dt).unwrap();

        assert_eq!(second_step.flow.fuel_mass_flow_rate, kg_s(0.0));
        assert_eq!(second_step.oxidizer_fuel_ratio, Some(held));
        assert_eq!(chamber.oxidizer_fuel_ratio(), Some(held));
    }

    #[test]
    fn ratio_stays_undefined_until_fuel_flows() {
        let mut chamber = scenario_chamber();
        chamber.law.a = 0.0;

        let step = chamber.step(kg_s(0.03), Time::new::<second>(0.01)).unwrap();
        assert_eq!(step.oxidizer_fuel_ratio, None);
        assert_eq!(oxidizer_fuel_ratio(kg_s(0.03), kg_s(0.0)), Err(UndefinedRatio));
    }
}
