use std::fmt;

use hybrid_core::units::Impulse;
use uom::{
    ConstZero,
    si::{
        f64::{Force, Length, Time},
        force::newton,
    },
};

use super::StepRecord;

/// Totals over the recorded steps of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Time of the last recorded step.
    pub burn_time: Time,
    /// Sum of `thrust·Δt` over the recorded steps.
    pub total_impulse: Impulse,
    /// Average thrust per recorded step.
    pub mean_thrust: Force,
    pub peak_thrust: Force,
    /// `None` when no step was recorded.
    pub final_port_diameter: Option<Length>,
    pub motor_class: MotorClass,
}

impl RunSummary {
    /// Summarizes the records of a run taken with a fixed time step.
    #[must_use]
    pub fn from_records(records: &[StepRecord], time_step: Time) -> Self {
        let mut total_impulse = Impulse::ZERO;
        let mut thrust_sum = Force::ZERO;
        let mut peak_thrust = Force::ZERO;

        for record in records {
            let thrust = record.thrust();
            total_impulse += thrust * time_step;
            thrust_sum += thrust;
            if thrust > peak_thrust {
                peak_thrust = thrust;
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let mean_thrust = if records.is_empty() {
            Force::ZERO
        } else {
            thrust_sum / records.len() as f64
        };

        Self {
            burn_time: records.last().map_or(Time::ZERO, |r| r.time),
            total_impulse,
            mean_thrust,
            peak_thrust,
            final_port_diameter: records.last().map(StepRecord::port_diameter),
            motor_class: MotorClass::from_impulse(total_impulse),
        }
    }

    /// Class letter followed by the mean thrust in newtons, e.g. `J83`.
    #[must_use]
    pub fn designation(&self) -> String {
        format!("{}{:.0}", self.motor_class, self.mean_thrust.get::<newton>().round())
    }
}

/// Total impulse class of a motor.
///
/// Each class covers impulses below its upper limit and at or above the
/// previous class's limit. The limits double from 0.3125 N·s for `1/8A`
/// up to 40 960 N·s for `O`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MotorClass {
    EighthA,
    QuarterA,
    HalfA,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    BeyondO,
}

impl MotorClass {
    const LIMITED: [(Self, f64); 18] = [
        (Self::EighthA, 0.3125),
        (Self::QuarterA, 0.625),
        (Self::HalfA, 1.25),
        (Self::A, 2.5),
        (Self::B, 5.0),
        (Self::C, 10.0),
        (Self::D, 20.0),
        (Self::E, 40.0),
        (Self::F, 80.0),
        (Self::G, 160.0),
        (Self::H, 320.0),
        (Self::I, 640.0),
        (Self::J, 1280.0),
        (Self::K, 2560.0),
        (Self::L, 5120.0),
        (Self::M, 10240.0),
        (Self::N, 20480.0),
        (Self::O, 40960.0),
    ];

    /// Classifies a total impulse.
    #[must_use]
    pub fn from_impulse(impulse: Impulse) -> Self {
        let newton_seconds = impulse.value;
        Self::LIMITED
            .iter()
            .find(|(_, limit)| newton_seconds < *limit)
            .map_or(Self::BeyondO, |(class, _)| *class)
    }

    /// Upper impulse limit in N·s, exclusive; `None` for [`MotorClass::BeyondO`].
    #[must_use]
    pub fn upper_limit(self) -> Option<f64> {
        Self::LIMITED
            .iter()
            .find(|(class, _)| *class == self)
            .map(|(_, limit)| *limit)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::EighthA => "1/8A",
            Self::QuarterA => "1/4A",
            Self::HalfA => "1/2A",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
            Self::H => "H",
            Self::I => "I",
            Self::J => "J",
            Self::K => "K",
            Self::L => "L",
            Self::M => "M",
            Self::N => "N",
            Self::O => "O",
            Self::BeyondO => ">O",
        }
    }
}

impl fmt::Display for MotorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{momentum::kilogram_meter_per_second, time::second};

    fn newton_seconds(value: f64) -> Impulse {
        Impulse::new::<kilogram_meter_per_second>(value)
    }

    #[test]
    fn class_boundaries_are_exclusive() {
        assert_eq!(MotorClass::from_impulse(newton_seconds(0.0)), MotorClass::EighthA);
        assert_eq!(MotorClass::from_impulse(newton_seconds(0.3125)), MotorClass::QuarterA);
        assert_eq!(MotorClass::from_impulse(newton_seconds(1.0)), MotorClass::HalfA);
        assert_eq!(MotorClass::from_impulse(newton_seconds(1280.0)), MotorClass::K);
        assert_eq!(MotorClass::from_impulse(newton_seconds(40_959.9)), MotorClass::O);
        assert_eq!(MotorClass::from_impulse(newton_seconds(40_960.0)), MotorClass::BeyondO);
    }

    #[test]
    fn labels_and_limits() {
        assert_eq!(MotorClass::HalfA.to_string(), "1/2A");
        assert_eq!(MotorClass::BeyondO.to_string(), ">O");
        assert_eq!(MotorClass::BeyondO.upper_limit(), None);
        assert_relative_eq!(MotorClass::J.upper_limit().unwrap(), 1280.0);
    }

    #[test]
    fn empty_run_summary() {
        let summary = RunSummary::from_records(&[], Time::new::<second>(0.01));

        assert_eq!(summary.total_impulse, Impulse::ZERO);
        assert_eq!(summary.mean_thrust, Force::ZERO);
        assert_eq!(summary.final_port_diameter, None);
        assert_eq!(summary.motor_class, MotorClass::EighthA);
        assert_eq!(summary.designation(), "1/8A0");
    }
}
