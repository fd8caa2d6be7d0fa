//! # Cable Sizer CLI
//!
//! Command-line front end for `cable_core`: size a single circuit from
//! flags or interactive prompts, look up the minimum safe size for a load,
//! browse the catalog, and manage `.cbl` cable schedules.

mod errors;
mod file_io;
mod interactive;
mod output;
mod schedule;

use std::io;
use std::path::{Path, PathBuf};
use std::process;

use cable_core::calculations::ampacity::{find_minimum_safe_size, AmpacityConditions};
use cable_core::derating::InstallationMethod;
use cable_core::materials::{ConductorMaterial, WireType};
use cable_core::units::{AmbientTemperature, TemperatureUnit};
use cable_core::{calculate, CalcError, Catalog, EngineSettings, SizingInput};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::errors::{CliError, CliResult};
use crate::file_io::{load_schedule, load_settings, save_schedule};
use crate::schedule::CableSchedule;

#[derive(Parser)]
#[command(name = "cable_cli")]
#[command(about = "DC cable sizing: voltage drop, ampacity and fuse selection", long_about = None)]
#[command(version)]
struct Cli {
    /// Log engine decisions to stderr (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Size one circuit
    Size {
        #[command(flatten)]
        circuit: CircuitArgs,

        #[command(flatten)]
        limits: LimitArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Exit with error code if the result carries any warning
        #[arg(long)]
        strict: bool,
    },

    /// Size circuits by answering prompts
    Prompt {
        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Smallest metric and AWG size that carries a load current
    MinSize {
        /// Load current (A)
        #[arg(long)]
        current: f64,

        #[command(flatten)]
        environment: EnvironmentArgs,

        #[command(flatten)]
        limits: LimitArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// List materials, installation methods, wire types, sizes and fuses
    Catalog {
        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Create, extend and run cable schedules (.cbl)
    Schedule {
        #[command(subcommand)]
        command: ScheduleCommands,
    },
}

#[derive(Subcommand)]
enum ScheduleCommands {
    /// Create an empty schedule file
    New {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(long, default_value = "")]
        engineer: String,

        #[arg(long, default_value = "")]
        job_id: String,

        /// Vessel, vehicle or installation name
        #[arg(long, default_value = "")]
        vessel: String,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Add a circuit to a schedule
    Add {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        circuit: CircuitArgs,
    },

    /// Remove a circuit from a schedule by its id
    Remove {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(value_name = "ID")]
        id: Uuid,
    },

    /// Size every circuit in a schedule
    Run {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

/// Conditions around the conductor
#[derive(Args, Clone)]
struct EnvironmentArgs {
    /// Conductor material (copper, aluminum)
    #[arg(long, default_value = "copper", value_parser = parse_material)]
    material: ConductorMaterial,

    /// Ambient temperature
    #[arg(long, default_value_t = 20.0, allow_negative_numbers = true)]
    ambient: f64,

    /// Unit of --ambient (C or F)
    #[arg(long, default_value = "C", value_parser = parse_unit)]
    unit: TemperatureUnit,

    /// Installation method (air, conduit, isolated)
    #[arg(long, default_value = "air", value_parser = parse_installation)]
    installation: InstallationMethod,

    /// Insulation type (flry, flry-a, flry-b, thhn, thwn, xlpe, pvc, silicone, generic)
    #[arg(long, default_value = "generic", value_parser = parse_wire_type)]
    wire_type: WireType,
}

impl EnvironmentArgs {
    fn ambient(&self) -> AmbientTemperature {
        AmbientTemperature {
            value: self.ambient,
            unit: self.unit,
        }
    }
}

/// One circuit
#[derive(Args, Clone)]
struct CircuitArgs {
    /// Circuit label
    #[arg(long, default_value = "")]
    label: String,

    /// System voltage (V)
    #[arg(long)]
    voltage: f64,

    /// Load current (A)
    #[arg(long)]
    current: f64,

    /// One-way cable length (m)
    #[arg(long)]
    length: f64,

    /// Maximum voltage drop (%); defaults to the configured default
    #[arg(long)]
    drop: Option<f64>,

    /// Count both conductors of the loop
    #[arg(long)]
    round_trip: bool,

    #[command(flatten)]
    environment: EnvironmentArgs,
}

impl CircuitArgs {
    fn to_input(&self, settings: &EngineSettings) -> SizingInput {
        SizingInput {
            label: self.label.clone(),
            voltage_v: self.voltage,
            current_a: self.current,
            length_m: self.length,
            max_drop_percent: self.drop.unwrap_or(settings.default_drop_percent),
            round_trip: self.round_trip,
            material: self.environment.material,
            ambient: self.environment.ambient(),
            installation: self.environment.installation,
            wire_type: self.environment.wire_type,
        }
    }
}

/// Engine limits
#[derive(Args, Clone)]
struct LimitArgs {
    /// JSON settings file (any subset of the engine settings)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the system voltage ceiling (V)
    #[arg(long)]
    max_voltage: Option<f64>,
}

impl LimitArgs {
    /// Defaults, then the config file, then flags.
    fn settings(&self) -> CliResult<EngineSettings> {
        let mut settings = match &self.config {
            Some(path) => load_settings(path)?,
            None => EngineSettings::default(),
        };
        if let Some(max_voltage) = self.max_voltage {
            settings = settings.with_max_voltage(max_voltage);
        }
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for scripts
    Json,
}

fn parse_material(s: &str) -> Result<ConductorMaterial, String> {
    ConductorMaterial::from_str_flexible(s).map_err(|e| e.to_string())
}

fn parse_unit(s: &str) -> Result<TemperatureUnit, String> {
    TemperatureUnit::from_str_flexible(s).map_err(|e| e.to_string())
}

fn parse_installation(s: &str) -> Result<InstallationMethod, String> {
    InstallationMethod::from_str_flexible(s).map_err(|e| e.to_string())
}

fn parse_wire_type(s: &str) -> Result<WireType, String> {
    WireType::from_str_flexible(s).map_err(|e| e.to_string())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Size {
            circuit,
            limits,
            format,
            strict,
        } => handle_size(&circuit, &limits, format, strict),
        Commands::Prompt { limits } => handle_prompt(&limits),
        Commands::MinSize {
            current,
            environment,
            limits,
            format,
        } => handle_min_size(current, &environment, &limits, format),
        Commands::Catalog { format } => output::print_catalog(&mut io::stdout().lock(), Catalog::builtin(), format)
            .map(|()| 0)
            .map_err(CliError::from),
        Commands::Schedule { command } => match command {
            ScheduleCommands::New {
                file,
                engineer,
                job_id,
                vessel,
                limits,
            } => handle_schedule_new(&file, engineer, job_id, vessel, &limits),
            ScheduleCommands::Add { file, circuit } => handle_schedule_add(&file, &circuit),
            ScheduleCommands::Remove { file, id } => handle_schedule_remove(&file, &id),
            ScheduleCommands::Run { file, format } => handle_schedule_run(&file, format),
        },
    };

    let exit_code = result.unwrap_or_else(|e| report_error(&e));
    process::exit(exit_code);
}

/// Print an error (human message plus JSON body) to stderr.
fn report_error(e: &CliError) -> i32 {
    eprintln!("Error [{}]: {}", e.error_code(), e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
    1
}

fn handle_size(circuit: &CircuitArgs, limits: &LimitArgs, format: OutputFormat, strict: bool) -> CliResult<i32> {
    let settings = limits.settings()?;
    let input = circuit.to_input(&settings);
    debug!(?settings, "sizing single circuit");

    let result = calculate(&input, &settings, Catalog::builtin())?;
    output::print_sizing(&mut io::stdout().lock(), &input, &result, format)?;
    Ok(if strict && !result.warnings().is_empty() { 1 } else { 0 })
}

fn handle_prompt(limits: &LimitArgs) -> CliResult<i32> {
    let settings = limits.settings()?;
    let stdin = io::stdin();
    let mut prompter = interactive::Prompter::new(stdin.lock(), io::stdout().lock());
    prompter.run(&settings, Catalog::builtin())?;
    Ok(0)
}

fn handle_min_size(
    current: f64,
    environment: &EnvironmentArgs,
    limits: &LimitArgs,
    format: OutputFormat,
) -> CliResult<i32> {
    let settings = limits.settings()?;
    if !current.is_finite() || current <= 0.0 {
        return Err(CalcError::invalid_input("current_a", current.to_string(), "Current must be positive").into());
    }

    let conditions = AmpacityConditions {
        material: environment.material,
        installation: environment.installation,
        ambient_c: environment.ambient().to_celsius().value(),
        wire_type: environment.wire_type,
        caution_ratio: settings.caution_ratio,
    };
    let catalog = Catalog::builtin();
    let margin = settings.ampacity_safety_margin;
    let metric = find_minimum_safe_size(current, &conditions, catalog.metric_sizes(), margin, catalog)?;
    let awg = find_minimum_safe_size(current, &conditions, catalog.awg_sizes(), margin, catalog)?;

    output::print_min_size(&mut io::stdout().lock(), current, &conditions, &metric, &awg, format)?;
    Ok(0)
}

fn handle_schedule_new(
    file: &Path,
    engineer: String,
    job_id: String,
    vessel: String,
    limits: &LimitArgs,
) -> CliResult<i32> {
    let mut schedule = CableSchedule::new(engineer, job_id, vessel);
    schedule.settings = limits.settings()?;
    save_schedule(&schedule, file)?;

    println!("Created schedule {}", file.display());
    Ok(0)
}

fn handle_schedule_add(file: &Path, circuit: &CircuitArgs) -> CliResult<i32> {
    let mut schedule = load_schedule(file)?;
    let input = circuit.to_input(&schedule.settings);
    input.validate(&schedule.settings)?;
    let id = schedule.add_circuit(input);
    save_schedule(&schedule, file)?;

    println!("Added circuit {} ({} in schedule)", id, schedule.circuit_count());
    Ok(0)
}

fn handle_schedule_remove(file: &Path, id: &Uuid) -> CliResult<i32> {
    let mut schedule = load_schedule(file)?;
    match schedule.remove_circuit(id) {
        Some(circuit) => {
            save_schedule(&schedule, file)?;
            println!("Removed circuit '{}' ({} in schedule)", circuit.label, schedule.circuit_count());
            Ok(0)
        }
        None => Err(CalcError::invalid_input("id", id.to_string(), "No circuit with this id in the schedule").into()),
    }
}

fn handle_schedule_run(file: &Path, format: OutputFormat) -> CliResult<i32> {
    let schedule = load_schedule(file)?;
    let outcomes = schedule.run_all(Catalog::builtin());
    output::print_schedule(&mut io::stdout().lock(), &schedule, &outcomes, format)?;

    Ok(if outcomes.iter().any(|o| o.result.is_err()) { 1 } else { 0 })
}
