use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use wf_engine::report::{self, format_minutes};
use wf_engine::{Results, TruckClass};
use wf_project::Scenario;

mod error;

use error::{AppError, AppResult};

#[derive(Parser)]
#[command(name = "wf-cli")]
#[command(about = "WaterFlow CLI - fireground water supply and relay shuttle calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the water balance for a scenario
    Calc {
        /// Path to the scenario file (YAML, or JSON by extension)
        scenario_path: PathBuf,
        /// Print the full result snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the plain-text summary report
    Report {
        /// Path to the scenario file
        scenario_path: PathBuf,
    },
    /// Validate a scenario file
    Validate {
        /// Path to the scenario file
        scenario_path: PathBuf,
    },
    /// Write a scenario with the initial form values
    Init {
        /// Where to write the scenario
        scenario_path: PathBuf,
        /// Scenario name
        #[arg(long, default_value = "New scenario")]
        name: String,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Calc {
            scenario_path,
            json,
        } => cmd_calc(&scenario_path, json),
        Commands::Report { scenario_path } => cmd_report(&scenario_path),
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Init {
            scenario_path,
            name,
            force,
        } => cmd_init(&scenario_path, &name, force),
    }
}

fn cmd_calc(scenario_path: &Path, json: bool) -> AppResult<()> {
    let scenario = wf_project::load(scenario_path)?;
    info!(name = %scenario.name, "calculating scenario");
    let results = scenario.calculate();

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_summary(&scenario, &results);
    }
    Ok(())
}

fn cmd_report(scenario_path: &Path) -> AppResult<()> {
    let scenario = wf_project::load(scenario_path)?;
    println!("{}", report::render(&scenario.calculate()));
    Ok(())
}

fn cmd_validate(scenario_path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = wf_project::load(scenario_path)?;
    println!("✓ Scenario '{}' is valid", scenario.name);
    Ok(())
}

fn cmd_init(scenario_path: &Path, name: &str, force: bool) -> AppResult<()> {
    if scenario_path.exists() && !force {
        return Err(AppError::Exists {
            path: scenario_path.to_path_buf(),
        });
    }
    wf_project::save(scenario_path, &Scenario::new(name))?;
    println!("✓ Wrote {}", scenario_path.display());
    Ok(())
}

fn print_summary(scenario: &Scenario, r: &Results) {
    println!("Scenario: {}", scenario.name);
    println!();
    println!("Demand:          {:>8.0} gpm", r.demand);
    println!("Frontline:       {:>8.0} gpm", r.frontline());
    println!("Relay:           {:>8.0} gpm", r.relay());
    println!("Net shortfall:   {:>8.0} gpm", r.net());
    println!("Coverage:        {:>8.0} %", r.coverage());
    println!(
        "Tank endurance:  {}",
        report::format_endurance(&r.balance.endurance())
    );

    println!();
    println!("Relay fleet:");
    println!(
        "  {:<7} {:>6} {:>8} {:>8} {:>8} {:>10} {:>10}",
        "class", "active", "drive", "fill", "cycle", "ideal gpm", "eff gpm"
    );
    for class in TruckClass::ALL {
        let m = r.modules.get(class);
        let q = r.fleet.per_class.get(class);
        println!(
            "  {:<7} {:>6} {:>8} {:>8} {:>8} {:>10.1} {:>10.1}",
            class.to_string(),
            scenario.state.fleet.get(class),
            format_minutes(m.drive_min),
            format_minutes(m.fill_min),
            format_minutes(m.cycle_min),
            q.ideal_gpm,
            q.effective_gpm
        );
        println!("          {}", r.diagnostics.source_status.get(class));
    }

    println!();
    println!(
        "Intake:          {:>8.0} gpm (nominal {:.0})",
        r.sources.intake_eff, r.sources.intake_nominal
    );
    println!("Fleet demand:    {:>8.0} gpm", r.fleet.total_demand);
    println!("Compression:     {:>8.0} %", r.compression() * 100.0);
    println!(
        "Hydrant use:     {:>8.0} %",
        r.diagnostics.utilization_frac * 100.0
    );
    println!(
        "Source refill:   {:>8} min",
        format_minutes(r.fleet.source_fill_min)
    );
    println!(
        "Arrival interval:{:>8} min",
        format_minutes(r.fleet.overall_interval_min)
    );
    println!(
        "Hydrant idle:    {:>8} min",
        format_minutes(r.fleet.hydrant_idle_min)
    );

    let slices = r.supply_breakdown();
    if !slices.is_empty() {
        println!();
        println!("Supply breakdown:");
        for slice in slices {
            println!("  {:<8} {:>8} gpm", slice.kind.label(), slice.gpm);
        }
    }

    println!();
    println!("{}", r.messages.bottleneck);
    println!("{}", r.messages.hydrant_status);
    println!("{}", r.messages.two_phase);
}
