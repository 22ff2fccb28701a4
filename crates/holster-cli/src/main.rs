//! holster CLI - parametric remote-holster generator front end
//!
//! Replaces the host application's parameter dialog: loads parameters from
//! a TOML file, validates them, and either prints the derived construction
//! plan or replays it against the built-in synthetic kernel for a step
//! trace.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use build_engine::build;
use holster_types::{HolsterParams, SketchCurve, StepKind};
use kernel_api::MockKernel;

#[derive(Parser)]
#[command(name = "holster")]
#[command(about = "Parametric TV-remote holster generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive and print the construction plan without touching a kernel
    Plan {
        /// TOML parameter file; built-in defaults when omitted
        params: Option<PathBuf>,
        /// Print the plan as JSON instead of a step listing
        #[arg(long)]
        json: bool,
        /// Override the holster name from the parameter file
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Replay the plan against the synthetic kernel and print the trace
    Check {
        /// TOML parameter file; built-in defaults when omitted
        params: Option<PathBuf>,
        /// Override the holster name from the parameter file
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Print a starter parameter file with the default values
    Defaults,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Plan { params, json, name } => {
            let params = load_params(params.as_deref(), name)?;
            params.validate()?;
            let plan = holster_planner::plan(&params);
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print_plan(&plan);
            }
        }
        Commands::Check { params, name } => {
            let params = load_params(params.as_deref(), name)?;
            let mut kernel = MockKernel::new();
            let report = build(&params, &mut kernel).context("build failed")?;
            for trace in &report.steps {
                match trace.edges_selected {
                    Some(n) => println!("{:<22} {} [{} edge(s)]", trace.stage.to_string(), trace.detail, n),
                    None => println!("{:<22} {}", trace.stage.to_string(), trace.detail),
                }
            }
            println!("ok: '{}' built through {}", report.name, report.stage_reached);
        }
        Commands::Defaults => {
            print!("{}", toml::to_string_pretty(&HolsterParams::default())?);
        }
    }

    Ok(())
}

fn load_params(path: Option<&Path>, name: Option<String>) -> Result<HolsterParams> {
    let mut params = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("cannot parse {}", path.display()))?
        }
        None => HolsterParams::default(),
    };
    if let Some(name) = name {
        params.name = name;
    }
    Ok(params)
}

fn print_plan(plan: &holster_types::BuildPlan) {
    println!("plan for '{}': {} steps", plan.name, plan.steps.len());
    for step in &plan.steps {
        match &step.kind {
            StepKind::Sketch { plane, curves } => {
                println!("  {:<22} sketch on {plane:?}", step.stage.to_string());
                for curve in curves {
                    match curve {
                        SketchCurve::Rectangle { p0, p1 } => println!(
                            "  {:<22}   rect ({:.3}, {:.3}, {:.3}) - ({:.3}, {:.3}, {:.3})",
                            "", p0.x, p0.y, p0.z, p1.x, p1.y, p1.z
                        ),
                        SketchCurve::Circle { center, radius } => println!(
                            "  {:<22}   circle r={:.3} at ({:.3}, {:.3}, {:.3})",
                            "", radius, center.x, center.y, center.z
                        ),
                    }
                }
            }
            StepKind::Extrude { distance, op, .. } => {
                println!(
                    "  {:<22} extrude {distance:+.3} ({op:?})",
                    step.stage.to_string()
                );
            }
            StepKind::Fillet { selector, radius } => {
                let what = if selector.filters.is_empty() {
                    "every edge".to_string()
                } else {
                    format!("{} filter(s)", selector.filters.len())
                };
                println!(
                    "  {:<22} fillet r={radius:.3} on {what}",
                    step.stage.to_string()
                );
            }
        }
    }
}
