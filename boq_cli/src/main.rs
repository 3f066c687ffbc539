//! # Plancost CLI
//!
//! Command-line front end for `boq_core`: estimate a plan file or a built-in
//! template, compare regions, export a PDF bill of quantities, and save or
//! inspect `.boq` plan documents.
//!
//! A plan argument is either a path to a plan JSON file or `template:NAME`.

mod config;
mod logging;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use boq_core::document::PlanDocument;
use boq_core::errors::CalcError;
use boq_core::estimate::{calculate, compare_regions, PlanEstimate};
use boq_core::file_io::{load_document_with_lock_check, load_plan, save_document, FileLock};
use boq_core::pdf::render_estimate_pdf;
use boq_core::plan::Plan;
use boq_core::templates;

use crate::config::Settings;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List built-in plan templates
    Templates,

    /// Print the bill of quantities for a plan
    Estimate {
        plan: String,
        #[arg(long)]
        location: Option<String>,
        /// Print the full estimate as JSON
        #[arg(long)]
        json: bool,
    },

    /// Price one plan in several locations
    Compare {
        plan: String,
        #[arg(required = true)]
        locations: Vec<String>,
    },

    /// Export the bill of quantities as PDF
    Pdf {
        plan: String,
        output: PathBuf,
        #[arg(long)]
        location: Option<String>,
    },

    /// Estimate a plan and save it as a .boq document
    Save {
        plan: String,
        output: PathBuf,
        #[arg(long)]
        location: Option<String>,
    },

    /// Show a saved .boq document
    Show { file: PathBuf },
}

/// Resolve a plan argument. `--location` overrides whatever the plan file says.
fn resolve_plan(arg: &str, location: Option<&str>, settings: &Settings) -> Result<Plan> {
    let mut plan = match arg.strip_prefix("template:") {
        Some(name) => templates::get(name, location.unwrap_or(&settings.default_location))?,
        None => load_plan(Path::new(arg))?,
    };
    if let Some(location) = location {
        plan.location = location.to_string();
    }
    Ok(plan)
}

fn run(cli: Cli, settings: &Settings) -> Result<()> {
    match cli.command {
        Command::Templates => {
            for info in templates::list() {
                println!("{:<16} {}", info.name, info.description);
            }
        }

        Command::Estimate { plan, location, json } => {
            let plan = resolve_plan(&plan, location.as_deref(), settings)?;
            let result = calculate(&plan, &settings.load_price_book()?)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_estimate(&result);
            }
        }

        Command::Compare { plan, locations } => {
            let plan = resolve_plan(&plan, None, settings)?;
            let book = settings.load_price_book()?;
            let rows = compare_regions(&plan, &book, &locations)?;

            println!("{:<16} {:>6} {:>16} {:>16}", "Location", "Index", "Materials", "Total");
            for row in rows {
                println!(
                    "{:<16} {:>6.2} {:>16.0} {:>16.0}",
                    row.location, row.multiplier, row.total_materials_cost, row.total_project_cost
                );
            }
        }

        Command::Pdf { plan, output, location } => {
            let plan = resolve_plan(&plan, location.as_deref(), settings)?;
            let result = calculate(&plan, &settings.load_price_book()?)?;
            let bytes = render_estimate_pdf(&result, &plan.name, &settings.owner)?;
            std::fs::write(&output, bytes).with_context(|| format!("writing {}", output.display()))?;
            tracing::info!(path = %output.display(), "PDF written");
        }

        Command::Save { plan, output, location } => {
            let plan = resolve_plan(&plan, location.as_deref(), settings)?;
            let mut doc = PlanDocument::new(settings.owner.clone(), plan);
            doc.recalculate(&settings.load_price_book()?)?;

            let lock = FileLock::acquire(&output, settings.owner.clone())?;
            save_document(&doc, &output)?;
            drop(lock);

            println!("Saved {} ({})", output.display(), doc.meta.plan_id);
        }

        Command::Show { file } => {
            let (doc, lock) = load_document_with_lock_check(&file)?;
            println!("Title:    {}", doc.meta.title);
            println!("Plan ID:  {}", doc.meta.plan_id);
            println!("Owner:    {}", doc.meta.owner_id);
            println!("Modified: {}", doc.meta.modified.format("%Y-%m-%d %H:%M UTC"));
            if let Some(lock) = lock {
                println!("Locked by {} on {} since {}", lock.user_id, lock.machine, lock.locked_at);
            }
            println!();
            match &doc.estimate {
                Some(result) => print_estimate(result),
                None => println!("No estimate stored. Run `save` again to compute one."),
            }
        }
    }
    Ok(())
}

fn print_estimate(result: &PlanEstimate) {
    let plan = &result.plan;
    println!("═══════════════════════════════════════════════════════════════");
    println!("  BILL OF QUANTITIES: {}", plan.name);
    println!("═══════════════════════════════════════════════════════════════");
    println!();
    println!("  Location:   {} (index {:.2})", plan.location, result.region_multiplier);
    println!(
        "  Methods:    {} / {} / {} / {}",
        plan.foundation_type.display_name(),
        plan.wall_type.display_name(),
        plan.roofing_type.display_name(),
        plan.finishing_level.display_name()
    );
    println!(
        "  Size:       {} floor(s), {} room(s), {:.2} m² floor, {:.2} m² built, {:.2} m² wall",
        result.floor_count,
        result.room_count,
        result.total_floor_area_m2,
        result.total_built_area_m2,
        result.total_wall_area_m2
    );

    for stage in &result.stages {
        println!();
        println!("  {}. {} ({} days)", stage.order, stage.name, stage.duration_days);
        println!("  ───────────────────────────────────────────────────────────");
        for item in &stage.items {
            println!(
                "  {:<28} {:>7} {:<6} {:>12.0} {:>14.0}",
                item.name(),
                item.quantity(),
                item.unit(),
                item.unit_price(),
                item.total_price()
            );
        }
        println!("  {:<56} {:>14.0}", "Stage total", stage.total_cost);
    }

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  Materials:  {:>16.0} {}", result.total_materials_cost, result.currency);
    println!("  Labor:      {:>16.0} {}", result.labor_cost, result.currency);
    println!("  TOTAL:      {:>16.0} {}", result.total_project_cost, result.currency);
    println!("  Duration:   {:>16} days", result.total_duration_days);
    println!("═══════════════════════════════════════════════════════════════");
}

fn main() {
    dotenvy::dotenv().ok();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            std::process::exit(1);
        }
    };
    logging::init_logging(settings.log_format);

    let cli = Cli::parse();
    if let Err(e) = run(cli, &settings) {
        eprintln!("Error: {:#}", e);
        if let Some(calc) = e.downcast_ref::<CalcError>() {
            if let Ok(json) = serde_json::to_string_pretty(calc) {
                eprintln!("{}", json);
            }
        }
        std::process::exit(1);
    }
}
