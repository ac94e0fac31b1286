use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use cutplan_core::{plan_job, render_svg, JobPlan, PlanRequest, ShoppingPlan, StockPanel};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cutplan")]
#[command(about = "Panel cut planner - work out which stock panels to buy and how to cut them", long_about = None)]
struct Cli {
    /// Log level for diagnostics on stderr (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan the stock panels and cut layouts for a job
    Plan {
        /// Job file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the plan (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Stock panel catalog replacing the built-in one (YAML or JSON list)
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Sheet price per square metre, for the material estimate
        #[arg(short, long)]
        price_per_sqm: Option<f64>,
    },

    /// Generate SVG cut diagrams from a plan
    Svg {
        /// Plan file written by `plan` (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output SVG file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Plan {
            input,
            output,
            catalog,
            price_per_sqm,
        } => {
            plan_command(input, output, catalog, price_per_sqm)?;
        }
        Commands::Svg { input, output } => {
            svg_command(input, output)?;
        }
    }

    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads YAML for `.yaml`/`.yml` files and JSON otherwise.
fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    );

    let document = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML in {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display()))?
    };
    Ok(document)
}

fn plan_command(
    input: PathBuf,
    output: Option<PathBuf>,
    catalog: Option<PathBuf>,
    price_per_sqm: Option<f64>,
) -> Result<()> {
    println!("{}", "🔍 Loading job...".bright_blue());

    let mut request: PlanRequest = read_document(&input)?;
    if let Some(catalog) = catalog {
        let panels: Vec<StockPanel> = read_document(&catalog)?;
        debug!("Loaded {} stock panels from {}", panels.len(), catalog.display());
        request.stock_panels = Some(panels);
    }
    if price_per_sqm.is_some() {
        request.price_per_sqm = price_per_sqm;
    }

    println!(
        "  {} pieces to cut in {}",
        request.pieces.len().to_string().bright_white().bold(),
        request.material.to_string().bright_white()
    );
    println!();

    println!("{}", "🚀 Planning panels...".bright_blue());

    let job = plan_job(&request)?;

    println!();
    if job.plan.is_complete() {
        println!("{}", "✅ Plan complete!".bright_green().bold());
    } else {
        println!("{}", "⚠️  Plan is partial".bright_yellow().bold());
    }
    println!();

    print_summary(&job);

    let json = serde_json::to_string_pretty(&job.plan)?;
    if let Some(output_path) = output {
        std::fs::write(&output_path, json)?;
        println!(
            "💾 Saved plan to {}",
            output_path.display().to_string().bright_white()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn print_summary(job: &JobPlan) {
    println!("{}", "🛒 Shopping list:".bright_yellow().bold());
    for line in &job.purchase_list {
        println!(
            "    • {} x {} ({}, {}mm {}) - {:.2} m²",
            line.quantity.to_string().bright_white().bold(),
            line.panel_name.bright_white(),
            line.panel_size,
            line.thickness_mm,
            line.material,
            line.total_area_sqm
        );
    }
    println!();
    println!(
        "  Total panels: {}",
        job.plan.total_panels.to_string().bright_white().bold()
    );
    println!(
        "  Total waste: {}",
        format!("{:.1}%", job.plan.waste_percentage()).bright_white()
    );
    println!(
        "  Overall efficiency: {}",
        format!("{:.1}%", job.plan.overall_efficiency * 100.0).bright_white()
    );

    if let Some(estimate) = &job.estimate {
        println!(
            "  Panels cost: {} (waste {})",
            format!("{:.2}", estimate.panels_cost).bright_white(),
            format!("{:.2}", estimate.waste_cost).bright_white()
        );
    }

    for group in &job.plan.groups {
        for panel in &group.panels {
            println!();
            println!(
                "  {} #{} - {:.1}% waste",
                group.stock_panel.name.bright_cyan(),
                panel.layout.panel_number,
                panel.stats.waste_percentage
            );
            for entry in panel.cut_list() {
                let rotated = if entry.rotated { " (R)" } else { "" };
                println!(
                    "    • {} x {} {}x{} cm at ({}, {}){}",
                    entry.quantity,
                    entry.piece_name,
                    entry.width_cm,
                    entry.height_cm,
                    entry.x,
                    entry.y,
                    rotated
                );
            }
        }
    }

    if !job.plan.issues.is_empty() {
        println!();
        println!("  {}", "Not planned:".bright_red().bold());
        for issue in &job.plan.issues {
            println!("    • {}", issue.to_string().bright_red());
        }
    }

    println!();
}

fn svg_command(input: PathBuf, output: PathBuf) -> Result<()> {
    println!("{}", "🔍 Loading plan...".bright_blue());

    let plan: ShoppingPlan = read_document(&input)?;

    println!("{}", "🎨 Generating SVG...".bright_blue());

    let svg = render_svg(&plan)?;
    std::fs::write(&output, svg)?;

    println!();
    println!(
        "{} Saved SVG to {}",
        "✅".bright_green(),
        output.display().to_string().bright_white()
    );

    Ok(())
}
