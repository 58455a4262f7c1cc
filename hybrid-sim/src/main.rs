//! Runs a hybrid motor simulation and prints a summary of each run.
//!
//! ```sh
//! RUST_LOG=info cargo run -p hybrid-sim -- hybrid-sim/motor.toml
//! ```
//!
//! The motor is first run with an ideal nozzle. The averaged ideal geometry
//! becomes a fixed hardware nozzle, which is then run once per storage
//! temperature listed under `[sweep]`.

use std::{fs, path::PathBuf, process::ExitCode};

use hybrid_core::units::{QuantityParseError, parse_quantity};
use hybrid_motor::{ConfigError, Motor, MotorConfig, RunReport, nozzle::NozzleGeometry};
use log::{error, info};
use serde::Deserialize;
use thiserror::Error;
use uom::si::{
    f64::ThermodynamicTemperature,
    force::newton,
    length::{inch, millimeter},
    thermodynamic_temperature::degree_fahrenheit,
    time::second,
};

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid [sweep] table")]
    Sweep(#[source] toml::de::Error),

    #[error("invalid external temperature")]
    Temperature(#[source] QuantityParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("the ideal run recorded too few steps to size a nozzle")]
    NoSuggestion,
}

#[derive(Debug, Default, Deserialize)]
struct SweepFile {
    #[serde(default)]
    sweep: Sweep,
}

#[derive(Debug, Default, Deserialize)]
struct Sweep {
    #[serde(default)]
    external_temperatures: Vec<String>,
}

fn load(path: Option<PathBuf>) -> Result<(MotorConfig, Vec<ThermodynamicTemperature>), CliError> {
    let Some(path) = path else {
        info!("no motor file given, using the reference motor");
        let storage = ThermodynamicTemperature::new::<degree_fahrenheit>(70.0);
        return Ok((MotorConfig::reference(), vec![storage]));
    };

    let text = fs::read_to_string(&path).map_err(|source| CliError::Read {
        path: path.clone(),
        source,
    })?;
    let config = MotorConfig::from_toml_str(&text)?;
    let sweep: SweepFile = toml::from_str(&text).map_err(CliError::Sweep)?;
    let temperatures = sweep
        .sweep
        .external_temperatures
        .iter()
        .map(|t| parse_quantity(t))
        .collect::<Result<Vec<_>, _>>()
        .map_err(CliError::Temperature)?;

    Ok((config, temperatures))
}

fn print_report(label: &str, report: &RunReport) {
    let summary = &report.summary;
    println!(
        "{label}: {} ({:?}), {} steps, burn {:.2} s, impulse {:.1} N·s, \
         mean {:.1} N, peak {:.1} N",
        summary.designation(),
        report.termination,
        report.records.len(),
        summary.burn_time.get::<second>(),
        summary.total_impulse.value,
        summary.mean_thrust.get::<newton>(),
        summary.peak_thrust.get::<newton>(),
    );
    if let Some(port) = summary.final_port_diameter {
        println!("  final port diameter {:.3} in", port.get::<inch>());
    }
}

fn run() -> Result<(), CliError> {
    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let (config, temperatures) = load(path)?;

    let ideal = Motor::new(&config)?.run();
    print_report("ideal nozzle", &ideal);

    let geometry = NozzleGeometry::suggested(&ideal.records).ok_or(CliError::NoSuggestion)?;
    if let NozzleGeometry::Hardware {
        throat_diameter,
        exit_diameter,
        diffuser_length,
    } = geometry
    {
        println!(
            "suggested nozzle: throat {:.2} mm, exit {:.2} mm, diffuser {:.2} mm",
            throat_diameter.get::<millimeter>(),
            exit_diameter.get::<millimeter>(),
            diffuser_length.get::<millimeter>(),
        );
    }

    for temperature in temperatures {
        let hardware = config
            .clone()
            .with_nozzle_geometry(geometry)
            .with_external_temperature(temperature);
        let report = Motor::new(&hardware)?.run();
        let label = format!(
            "suggested nozzle at {:.0} °F",
            temperature.get::<degree_fahrenheit>()
        );
        print_report(&label, &report);
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                error!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
