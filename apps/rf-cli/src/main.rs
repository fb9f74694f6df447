use clap::{Parser, Subcommand};
use rf_core::Compartment;
use rf_project::{Catalog, ProjectError};
use rf_sim::{RunSummary, SimError, SimOptions, Simulation, run_sim};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rf-cli")]
#[command(about = "RefSim CLI - refrigeration appliance thermal simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List appliance and compressor types in a catalog
    List {
        /// Catalog file (YAML or JSON); defaults to the built-in catalog
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Validate a catalog file
    Validate {
        /// Path to the catalog file (YAML or JSON)
        catalog_path: PathBuf,
    },
    /// Run a closed-loop simulation and print a summary
    Run {
        /// Appliance type key
        #[arg(long, default_value = "house_refrigerator")]
        appliance: String,
        /// Compressor type key; defaults to the appliance's compressor
        #[arg(long)]
        compressor: Option<String>,
        /// Control mode: ON_OFF or VCC
        #[arg(long, default_value = "ON_OFF")]
        mode: String,
        /// Time step in seconds
        #[arg(long, default_value_t = 60.0)]
        dt: f64,
        /// Simulated duration in hours
        #[arg(long, default_value_t = 24.0)]
        hours: f64,
        /// Ambient temperature override (°C)
        #[arg(long)]
        ambient: Option<f64>,
        /// Catalog file (YAML or JSON); defaults to the built-in catalog
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Write the recorded samples as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write the summary and samples as JSON
        #[arg(long)]
        json: Option<PathBuf>,
        /// Record every N-th tick
        #[arg(long, default_value_t = 1)]
        record_every: usize,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List { catalog } => cmd_list(catalog.as_deref()),
        Commands::Validate { catalog_path } => cmd_validate(&catalog_path),
        Commands::Run {
            appliance,
            compressor,
            mode,
            dt,
            hours,
            ambient,
            catalog,
            csv,
            json,
            record_every,
        } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let mut sim =
                Simulation::from_catalog(&catalog, &appliance, compressor.as_deref(), &mode)?;
            if let Some(t) = ambient {
                sim.set_ambient_temperature(t)?;
            }
            let opts = SimOptions {
                dt_s: dt,
                t_end_s: hours * 3600.0,
                record_every,
                ..SimOptions::default()
            };
            cmd_run(&mut sim, &opts, csv.as_deref(), json.as_deref())
        }
    }
}

fn load_catalog(path: Option<&Path>) -> CliResult<Catalog> {
    tracing::debug!(?path, "loading catalog");
    let catalog = match path {
        None => Catalog::builtin()?,
        Some(p) if p.extension().is_some_and(|e| e == "json") => rf_project::load_json(p)?,
        Some(p) => rf_project::load_yaml(p)?,
    };
    Ok(catalog)
}

fn cmd_list(path: Option<&Path>) -> CliResult<()> {
    let catalog = load_catalog(path)?;

    println!("Appliances:");
    for a in &catalog.appliances {
        let compartments = Compartment::ALL
            .iter()
            .filter(|&&c| a.compartment(c).is_modeled())
            .count();
        println!(
            "  {} - {} ({} compartment(s), setpoint {:.1} °C, compressor {})",
            a.id, a.name, compartments, a.compartment_1.setpoint_c, a.compressor
        );
    }

    println!("Compressors:");
    for c in &catalog.compressors {
        println!(
            "  {} - {} ({:.0}-{:.0} rpm, on/off {:.0} rpm)",
            c.id, c.name, c.min_speed_rpm, c.max_speed_rpm, c.on_off_speed_rpm
        );
    }
    Ok(())
}

fn cmd_validate(path: &Path) -> CliResult<()> {
    println!("Validating catalog: {}", path.display());
    let catalog = load_catalog(Some(path))?;
    println!(
        "✓ Catalog is valid ({} appliances, {} compressors)",
        catalog.appliances.len(),
        catalog.compressors.len()
    );
    Ok(())
}

fn cmd_run(
    sim: &mut Simulation,
    opts: &SimOptions,
    csv: Option<&Path>,
    json: Option<&Path>,
) -> CliResult<()> {
    println!(
        "Running {} / {} in {} mode",
        sim.config().id,
        sim.compressor().id,
        sim.mode()
    );
    println!(
        "  dt = {:.1} s, duration = {:.2} h",
        opts.dt_s,
        opts.t_end_s / 3600.0
    );

    let record = run_sim(sim, opts)?;
    let summary = RunSummary::from_record(&record)?;

    println!("✓ Simulation completed");
    println!("  Energy: {:.3} kWh", summary.energy_kwh);
    println!("  Mean power: {:.1} W", summary.mean_power_w);
    println!("  Duty cycle: {:.1} %", summary.duty_cycle * 100.0);
    println!(
        "  Cabinet 1 (settled): mean {:.2} °C, range [{:.2}, {:.2}] °C",
        summary.cabinet_1.mean_c, summary.cabinet_1.min_c, summary.cabinet_1.max_c
    );
    if sim.config().compartment_2.is_modeled() {
        println!(
            "  Cabinet 2 (settled): mean {:.2} °C, range [{:.2}, {:.2}] °C",
            summary.cabinet_2.mean_c, summary.cabinet_2.min_c, summary.cabinet_2.max_c
        );
    }

    if let Some(path) = csv {
        std::fs::write(path, record.to_csv())?;
        println!(
            "✓ Exported {} samples to {}",
            record.samples.len(),
            path.display()
        );
    }
    if let Some(path) = json {
        let doc = serde_json::json!({
            "appliance": sim.config().id,
            "compressor": sim.compressor().id,
            "mode": sim.mode().as_str(),
            "summary": summary,
            "samples": record.samples,
        });
        std::fs::write(path, serde_json::to_string_pretty(&doc)?)?;
        println!("✓ Exported summary and samples to {}", path.display());
    }
    Ok(())
}
