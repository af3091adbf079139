//! BLDC motor simulation CLI.
//!
//! Provides three modes of operation:
//! - `run`: Simulate one motor for N steps and print a summary
//! - `sweep`: Run the same motor under several load torques in parallel
//! - `info`: Print crate versions and available presets

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bldc_actuator_core::presets;
use bldc_core::prelude::*;
use bldc_record::series::PlotSeries;
use bldc_sim::{load_torque_grid, run_sweep, RunStats, SimulatorBuilder, DEFAULT_STEPS};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Three-phase BLDC motor simulator.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one motor and print run statistics.
    Run {
        #[command(flatten)]
        source: ParamSource,

        /// Number of integration steps.
        #[arg(short = 'n', long, default_value_t = DEFAULT_STEPS)]
        steps: u64,

        /// Print the plot series as JSON instead of the summary.
        #[arg(long)]
        series: bool,
    },

    /// Run one simulation per load torque and print a table.
    Sweep {
        #[command(flatten)]
        source: ParamSource,

        /// Number of integration steps per run.
        #[arg(short = 'n', long, default_value_t = DEFAULT_STEPS)]
        steps: u64,

        /// Load torques to sweep (Nm), comma separated.
        #[arg(short, long, value_delimiter = ',', default_values_t = [0.0, 0.001, 0.002, 0.005])]
        loads: Vec<f64>,
    },

    /// Print crate information.
    Info,
}

/// Where motor parameters come from.
#[derive(Args)]
struct ParamSource {
    /// TOML parameter file.
    #[arg(short, long, conflicts_with = "preset")]
    params: Option<PathBuf>,

    /// Built-in preset name (see `info`).
    #[arg(long, default_value = "reference")]
    preset: String,
}

impl ParamSource {
    fn load(&self) -> Result<MotorParameters, BldcError> {
        if let Some(path) = &self.params {
            info!(path = %path.display(), "Loading parameters");
            return Ok(MotorParameters::from_file(path)?);
        }
        presets::by_name(&self.preset).ok_or_else(|| {
            ConfigError::InvalidValue {
                field: "preset".into(),
                message: format!(
                    "unknown preset '{}' (expected one of: {})",
                    self.preset,
                    presets::NAMES.join(", ")
                ),
            }
            .into()
        })
    }
}

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Bldc(#[from] BldcError),

    #[error("failed to serialize series: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

fn write_params(out: &mut impl Write, p: &MotorParameters) -> io::Result<()> {
    let e = &p.electrical;
    let m = &p.mechanical;
    writeln!(out, "parameters:")?;
    writeln!(out, "  coil_inductance        {:>12.4e} H", e.coil_inductance)?;
    writeln!(out, "  coil_resistance        {:>12.4e} ohm", e.coil_resistance)?;
    writeln!(out, "  input_voltage          {:>12.4e} V", e.input_voltage)?;
    writeln!(out, "  bemf_constant          {:>12.4e} V/(rad/s)", e.bemf_constant)?;
    writeln!(out, "  num_pole_pairs         {:>12}", e.num_pole_pairs)?;
    writeln!(out, "  commutation_phase_diff {:>12.4e} deg", e.commutation_phase_diff)?;
    writeln!(out, "  damping_ratio          {:>12.4e} Nm/(rad/s)", m.damping_ratio)?;
    writeln!(out, "  rotational_inertia     {:>12.4e} kg m^2", m.rotational_inertia)?;
    writeln!(out, "  static_friction        {:>12.4e} Nm", m.static_friction)?;
    writeln!(out, "  stribeck_friction      {:>12.4e} Nm", m.stribeck_friction)?;
    writeln!(out, "  min_velocity           {:>12.4e} rad/s", m.min_velocity)?;
    writeln!(out, "  load_torque            {:>12.4e} Nm", m.load_torque)?;
    writeln!(out, "  dynamics_timestep      {:>12.4e} s", p.dt())
}

fn run_single(
    source: &ParamSource,
    steps: u64,
    series: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let params = source.load()?;
    info!(
        pole_pairs = params.electrical.num_pole_pairs,
        input_voltage = params.electrical.input_voltage,
        inductance = params.electrical.coil_inductance,
        resistance = params.electrical.coil_resistance,
        dt = params.dt(),
        steps,
        "Resolved motor parameters"
    );
    if !series {
        write_params(out, &params)?;
        writeln!(out)?;
    }

    let mut sim = SimulatorBuilder::new()
        .with_params(params)
        .with_history_capacity(usize::try_from(steps).unwrap_or(0))
        .build()?;
    sim.run(steps).map_err(BldcError::from)?;

    if series {
        let plot = PlotSeries::from_history(sim.history());
        serde_json::to_writer(&mut *out, &plot)?;
        writeln!(out)?;
        return Ok(());
    }

    let stats = RunStats::from_history(sim.history(), sim.params());
    let state = sim.state();
    writeln!(out, "{stats}")?;
    writeln!(out)?;
    writeln!(out, "final state:")?;
    for phase in Phase::ALL {
        writeln!(out, "  i_{phase}  {:>12.6} A", state.currents.get(phase))?;
    }
    writeln!(out, "  theta {:>12.6} rad", state.angular_position)?;
    writeln!(out, "  omega {:>12.6} rad/s", state.angular_velocity)?;
    Ok(())
}

fn run_load_sweep(source: &ParamSource, steps: u64, loads: &[f64]) -> Result<(), BldcError> {
    let base = source.load()?;
    let grid = load_torque_grid(&base, loads);
    let outcomes = run_sweep(&grid, steps);

    println!(
        "{:>10}  {:>14}  {:>12}  {:>12}",
        "load [Nm]", "final [rad/s]", "peak [A]", "revs"
    );
    for o in &outcomes {
        let load = o.params.mechanical.load_torque;
        match &o.result {
            Ok(s) => println!(
                "{load:>10.4}  {:>14.4}  {:>12.4}  {:>12.4}",
                s.final_velocity, s.peak_current, s.revolutions
            ),
            Err(e) => println!("{load:>10.4}  error: {e}"),
        }
    }
    Ok(())
}

fn run_info() {
    println!("bldc v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("crates:");
    println!("  bldc-core          {}", env!("CARGO_PKG_VERSION"));
    println!("  bldc-actuator-core {}", env!("CARGO_PKG_VERSION"));
    println!("  bldc-record        {}", env!("CARGO_PKG_VERSION"));
    println!("  bldc-sim           {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("presets:");
    for name in presets::NAMES {
        if let Some(p) = presets::by_name(name) {
            println!(
                "  {name:<10} P={} Vb={} V L={} H R={} ohm dt={} s",
                p.electrical.num_pole_pairs,
                p.electrical.input_voltage,
                p.electrical.coil_inductance,
                p.electrical.coil_resistance,
                p.dt()
            );
        }
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();

    let result = match cli.command {
        Some(Commands::Run {
            source,
            steps,
            series,
        }) => run_single(&source, steps, series, &mut stdout),
        Some(Commands::Sweep {
            source,
            steps,
            loads,
        }) => run_load_sweep(&source, steps, &loads).map_err(CliError::from),
        Some(Commands::Info) => {
            run_info();
            Ok(())
        }
        None => {
            // Default: reference preset for the default step count
            let source = ParamSource {
                params: None,
                preset: "reference".into(),
            };
            run_single(&source, DEFAULT_STEPS, false, &mut stdout)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_defaults_to_reference_preset() {
        let cli = Cli::try_parse_from(["bldc", "run"]).unwrap();
        let Some(Commands::Run { source, steps, series }) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(steps, DEFAULT_STEPS);
        assert!(!series);
        assert_eq!(source.load().unwrap(), presets::reference());
    }

    #[test]
    fn sweep_parses_load_list() {
        let cli = Cli::try_parse_from(["bldc", "sweep", "--loads", "0,0.01", "-n", "10"]).unwrap();
        let Some(Commands::Sweep { loads, steps, .. }) = cli.command else {
            panic!("expected sweep");
        };
        assert_eq!(loads, vec![0.0, 0.01]);
        assert_eq!(steps, 10);
    }

    fn file_source(name: &str, text: &str) -> ParamSource {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, text).unwrap();
        ParamSource {
            params: Some(path),
            preset: "reference".into(),
        }
    }

    #[test]
    fn run_prints_parameters_before_stats() {
        let source = ParamSource {
            params: None,
            preset: "reference".into(),
        };
        let mut out = Vec::new();
        run_single(&source, 100, false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let params_at = text.find("parameters:").unwrap();
        let stats_at = text.find("steps:").unwrap();
        assert!(params_at < stats_at);
        assert!(text.contains("num_pole_pairs"));
        assert!(text.contains("final state:"));
    }

    #[test]
    fn series_output_is_json() {
        let source = ParamSource {
            params: None,
            preset: "reference".into(),
        };
        let mut out = Vec::new();
        run_single(&source, 10, true, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["time"].as_array().unwrap().len(), 11);
    }

    #[test]
    fn divergence_report_includes_last_valid_state() {
        let source = file_source(
            "bldc_app_unstable.toml",
            "dynamics_timestep = 1e-5\n\
             [electrical]\n\
             coil_inductance = 1e-12\ncoil_resistance = 0.4\ninput_voltage = 1e6\n\
             bemf_constant = 0.02\nnum_pole_pairs = 4\n\
             [mechanical]\n\
             damping_ratio = 1e-5\nrotational_inertia = 2e-5\n",
        );
        let err = run_single(&source, DEFAULT_STEPS, false, &mut Vec::new()).unwrap_err();
        let CliError::Bldc(BldcError::Simulation(SimError::Diverged { last_valid, .. })) = &err
        else {
            panic!("expected divergence, got {err:?}");
        };
        let report = err.to_string();
        assert!(report.contains("last valid state"), "{report}");
        assert!(report.contains(&last_valid.to_string()), "{report}");
    }

    #[test]
    fn unknown_preset_is_config_error() {
        let source = ParamSource {
            params: None,
            preset: "turbine".into(),
        };
        let err = source.load().unwrap_err();
        assert!(matches!(err, BldcError::Config(ConfigError::InvalidValue { .. })));
        assert!(err.to_string().contains("reference"));
    }
}
