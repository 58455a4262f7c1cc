//! Isentropic ideal-gas flow relations.
//!
//! Plain `f64` functions in SI units. Each checks its own domain and reports
//! a violation as [`NozzleError::InvalidFlowState`] instead of returning NaN.

use super::NozzleError;

/// Area ratio `A_to / A_from` between two Mach numbers of the same isentropic flow.
///
/// `(M_from/M_to)·sqrt(((1 + g·M_to²)/(1 + g·M_from²))^((k+1)/(k−1)))` with `g = (k−1)/2`.
/// With `from_mach = 0` the ratio is zero.
///
/// # Errors
///
/// Fails if `k ≤ 1`, `to_mach ≤ 0`, `from_mach < 0`, or the result is not finite.
pub fn area_ratio(k: f64, from_mach: f64, to_mach: f64) -> Result<f64, NozzleError> {
    check_heat_capacity_ratio("area_ratio", k)?;
    if !(to_mach.is_finite() && to_mach > 0.0) {
        return Err(NozzleError::invalid(
            "area_ratio",
            format!("target Mach must be positive, got {to_mach}"),
        ));
    }
    if !(from_mach.is_finite() && from_mach >= 0.0) {
        return Err(NozzleError::invalid(
            "area_ratio",
            format!("source Mach must be non-negative, got {from_mach}"),
        ));
    }

    let g = 0.5 * (k - 1.0);
    let base = (1.0 + g * to_mach * to_mach) / (1.0 + g * from_mach * from_mach);
    let ratio = from_mach / to_mach * base.powf((k + 1.0) / (k - 1.0)).sqrt();
    finite("area_ratio", ratio)
}

/// Sonic-plane temperature `T* = 2·T0/(k+1)`, kelvin.
///
/// # Errors
///
/// Fails if `k ≤ 1`.
pub fn star_temperature(k: f64, naught_temperature: f64) -> Result<f64, NozzleError> {
    check_heat_capacity_ratio("star_temperature", k)?;
    finite("star_temperature", 2.0 * naught_temperature / (k + 1.0))
}

/// Sonic-plane pressure `P* = Pc·(2/(k+1))^(k/(k−1))`, pascals.
///
/// # Errors
///
/// Fails if `k ≤ 1`.
pub fn star_pressure(k: f64, chamber_pressure: f64) -> Result<f64, NozzleError> {
    check_heat_capacity_ratio("star_pressure", k)?;
    finite(
        "star_pressure",
        chamber_pressure * (2.0 / (k + 1.0)).powf(k / (k - 1.0)),
    )
}

/// Ideal-gas sound speed `sqrt(k·R·T)`, m/s.
///
/// # Errors
///
/// Fails if `k·R·T` is not positive and finite.
pub fn sonic_velocity(k: f64, gas_constant: f64, temperature: f64) -> Result<f64, NozzleError> {
    let radicand = k * gas_constant * temperature;
    if !(radicand.is_finite() && radicand > 0.0) {
        return Err(NozzleError::invalid(
            "star_velocity",
            format!("k·R·T must be positive, got {radicand}"),
        ));
    }
    Ok(radicand.sqrt())
}

/// Exit Mach number of a full expansion from `chamber_pressure` to `exit_pressure`.
///
/// `sqrt(2)·sqrt(Pc·(Pc/Pe)^(−1/k) − Pe) / sqrt(k·Pe − Pe)`, which equals the
/// textbook `sqrt(2/(k−1)·((Pc/Pe)^((k−1)/k) − 1))`.
///
/// # Errors
///
/// Fails on a non-positive denominator, a negative radicand (chamber below
/// exit pressure), or a subsonic result. A nozzle that does not reach Mach 1
/// at its throat has no diverging solution.
pub fn exit_mach(k: f64, chamber_pressure: f64, exit_pressure: f64) -> Result<f64, NozzleError> {
    let denominator = k * exit_pressure - exit_pressure;
    if !(denominator.is_finite() && denominator > 0.0) {
        return Err(NozzleError::invalid(
            "exit_mach",
            format!("denominator k·Pe − Pe must be positive, got {denominator}"),
        ));
    }

    let radicand =
        chamber_pressure * (chamber_pressure / exit_pressure).powf(-1.0 / k) - exit_pressure;
    if !radicand.is_finite() || radicand < 0.0 {
        return Err(NozzleError::invalid(
            "exit_mach",
            format!(
                "negative radicand {radicand} (chamber pressure {chamber_pressure} Pa, \
                 exit pressure {exit_pressure} Pa)"
            ),
        ));
    }

    let mach = finite(
        "exit_mach",
        2.0_f64.sqrt() * radicand.sqrt() / denominator.sqrt(),
    )?;
    if mach < 1.0 {
        return Err(NozzleError::invalid(
            "exit_mach",
            format!("pressure ratio too small to choke the throat, exit Mach {mach}"),
        ));
    }
    Ok(mach)
}

fn check_heat_capacity_ratio(quantity: &'static str, k: f64) -> Result<(), NozzleError> {
    if k.is_finite() && k > 1.0 {
        Ok(())
    } else {
        Err(NozzleError::invalid(
            quantity,
            format!("ratio of specific heats must exceed 1, got {k}"),
        ))
    }
}

fn finite(quantity: &'static str, value: f64) -> Result<f64, NozzleError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NozzleError::invalid(quantity, format!("{value} is not finite")))
    }
}
