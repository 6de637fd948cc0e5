use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use et_engine::EngineModel;
use et_scenario::Scenario;
use et_sim::{AmbientSweep, Outcome, SuperheatReport, run_ambient_sweep, run_superheat};

#[derive(Parser)]
#[command(name = "et-cli")]
#[command(about = "enginetherm CLI - engine superheat simulation tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a superheat simulation
    Run {
        /// Path to a scenario file (YAML or JSON); stock engine if omitted
        scenario_path: Option<PathBuf>,
        /// Ambient temperature in °C (skips the interactive prompt)
        #[arg(long)]
        ambient: Option<f64>,
        /// Override the scenario's step budget
        #[arg(long)]
        budget: Option<u32>,
        /// Write the recorded step trace as CSV to this file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Suppress the greeting banner and prompt text
        #[arg(long)]
        quiet: bool,
    },
    /// Validate scenario file syntax and structure
    Validate {
        /// Path to the scenario file
        scenario_path: PathBuf,
    },
    /// Run one simulation per point of an ambient temperature sweep
    Sweep {
        /// Path to a scenario file (YAML or JSON); stock engine if omitted
        scenario_path: Option<PathBuf>,
        /// First ambient grid point in °C
        #[arg(long)]
        start: f64,
        /// Last ambient grid point in °C
        #[arg(long)]
        end: f64,
        /// Number of grid points
        #[arg(long, default_value_t = 11)]
        points: usize,
        /// Override the scenario's step budget
        #[arg(long)]
        budget: Option<u32>,
    },
    /// Write the stock scenario to a file as a starting point
    Init {
        /// Destination path (.yaml or .json)
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// CLI error type wrapping errors from the backend crates.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Scenario error: {0}")]
    Scenario(#[from] et_scenario::ScenarioError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] et_sim::SimError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    // Initialize tracing; logs go to stderr, results and CSV go to stdout
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            scenario_path,
            ambient,
            budget,
            csv,
            quiet,
        } => cmd_run(scenario_path.as_deref(), ambient, budget, csv.as_deref(), quiet),
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Sweep {
            scenario_path,
            start,
            end,
            points,
            budget,
        } => cmd_sweep(scenario_path.as_deref(), start, end, points, budget),
        Commands::Init { path, force } => cmd_init(&path, force),
    }
}

fn cmd_run(
    scenario_path: Option<&Path>,
    ambient: Option<f64>,
    budget: Option<u32>,
    csv: Option<&Path>,
    quiet: bool,
) -> CliResult<()> {
    let mut scenario = load_scenario(scenario_path)?;
    if let Some(budget_steps) = budget {
        scenario.run.budget_steps = budget_steps;
    }

    let ambient_c = match ambient {
        Some(value) => value,
        None => prompt_ambient(&mut io::stdin().lock(), quiet)?,
    };

    let (engine, profile, opts) = scenario.build(ambient_c)?;
    let report = run_superheat(&engine, &profile, &opts)?;

    print_report(&scenario.name, &engine, &report);

    if let Some(path) = csv {
        export_trace_csv(&report, path)?;
    }

    Ok(())
}

fn cmd_validate(scenario_path: &Path) -> CliResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    load_scenario(Some(scenario_path))?;
    println!("✓ Scenario is valid");
    Ok(())
}

fn cmd_sweep(
    scenario_path: Option<&Path>,
    start: f64,
    end: f64,
    points: usize,
    budget: Option<u32>,
) -> CliResult<()> {
    let mut scenario = load_scenario(scenario_path)?;
    if let Some(budget_steps) = budget {
        scenario.run.budget_steps = budget_steps;
    }

    // The build ambient is a placeholder; every sweep point re-screens its
    // own grid temperature.
    let (engine, profile, opts) = scenario.build(0.0)?;
    let sweep = AmbientSweep::new(start, end, points)?;
    let results = run_ambient_sweep(&engine, &profile, &sweep, &opts)?;

    println!(
        "Sweep of \"{}\": {} points from {} °C to {} °C, budget {} steps",
        scenario.name, points, start, end, opts.budget_steps
    );
    println!(
        "{:>12} {:>12} {:>10} {:>14}",
        "requested", "effective", "steps", "final temp"
    );
    for point in &results {
        let steps = match point.report.outcome {
            Outcome::Superheated { after_steps } => after_steps.to_string(),
            Outcome::NeverSuperheated => "-".to_string(),
        };
        println!(
            "{:>12.1} {:>12.1} {:>10} {:>11.2} °C",
            point.requested_c, point.ambient_c, steps, point.report.final_temp_c
        );
    }

    Ok(())
}

fn cmd_init(path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::InvalidInput(format!(
            "{} already exists (pass --force to overwrite)",
            path.display()
        )));
    }

    let scenario = Scenario::stock();
    if path.extension().is_some_and(|ext| ext == "json") {
        et_scenario::save_json(path, &scenario)?;
    } else {
        et_scenario::save_yaml(path, &scenario)?;
    }

    println!("✓ Wrote stock scenario to {}", path.display());
    Ok(())
}

fn load_scenario(path: Option<&Path>) -> CliResult<Scenario> {
    match path {
        Some(path) => {
            let scenario = if path.extension().is_some_and(|ext| ext == "json") {
                et_scenario::load_json(path)?
            } else {
                et_scenario::load_yaml(path)?
            };
            Ok(scenario)
        }
        None => Ok(Scenario::stock()),
    }
}

/// Greeting plus one ambient temperature read from `input`. A line that
/// does not parse as a number is not fatal: the run proceeds at 0 °C, with
/// a notice on stderr even under `--quiet`.
fn prompt_ambient(input: &mut impl io::BufRead, quiet: bool) -> CliResult<f64> {
    if !quiet {
        println!("||=========================================||");
        println!("||        Engine thermal simulation        ||");
        println!("||      time-to-superheat calculator       ||");
        println!("||=========================================||");
        print!("\nInput ambient temperature in °C (the engine starts at ambient): ");
        io::stdout().flush()?;
    }

    let mut line = String::new();
    input.read_line(&mut line)?;
    let trimmed = line.trim();

    match trimmed.parse::<f64>() {
        Ok(value) => Ok(value),
        Err(_) => {
            eprintln!(
                "Could not read \"{}\" as a temperature; running with 0 °C.",
                trimmed
            );
            Ok(0.0)
        }
    }
}

fn print_report(name: &str, engine: &EngineModel, report: &SuperheatReport) {
    match report.outcome {
        Outcome::Superheated { after_steps } => {
            println!("\nEngine \"{}\" overheated after {} time units.", name, after_steps);
            println!("  Ambient temperature:       {} °C", engine.ambient_temp_c());
            println!("  Temperature at start:      {} °C", report.start_temp_c);
            println!("  Temperature at superheat:  {:.2} °C", report.final_temp_c);
        }
        Outcome::NeverSuperheated => {
            println!(
                "\nEngine \"{}\" did not overheat within {} time units.",
                name, report.budget_steps
            );
            println!("  Final temperature:         {:.2} °C", report.final_temp_c);
        }
    }
}

fn export_trace_csv(report: &SuperheatReport, path: &Path) -> CliResult<()> {
    // Build CSV
    let mut csv = String::from("step,temp_c,velocity,torque,segment\n");
    for snapshot in &report.trace.steps {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            snapshot.step, snapshot.temp_c, snapshot.velocity, snapshot.torque, snapshot.segment
        ));
    }

    std::fs::write(path, csv)?;
    println!(
        "✓ Exported {} recorded steps to {}",
        report.trace.steps.len(),
        path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_parses_padded_number() {
        let mut input = " 21.5 \n".as_bytes();
        assert_eq!(prompt_ambient(&mut input, true).unwrap(), 21.5);

        let mut input = "-7\n".as_bytes();
        assert_eq!(prompt_ambient(&mut input, true).unwrap(), -7.0);
    }

    #[test]
    fn prompt_falls_back_to_zero_on_junk() {
        let mut input = "warm\n".as_bytes();
        assert_eq!(prompt_ambient(&mut input, true).unwrap(), 0.0);
    }

    #[test]
    fn prompt_falls_back_to_zero_on_empty_input() {
        let mut input = "".as_bytes();
        assert_eq!(prompt_ambient(&mut input, true).unwrap(), 0.0);
    }
}
