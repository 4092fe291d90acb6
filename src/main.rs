use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use periodic_review::io::{demand, reporting};
use periodic_review::{simulate, PolicyParameters};

/// Periodic review (order-up-to) inventory simulation.
#[derive(Debug, Parser)]
#[command(name = "periodic-review", version, about)]
struct Args {
    /// CSV file with daily demand (header row, chronological order).
    /// A seeded synthetic series is used when omitted.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Demand column header (defaults to the first column).
    #[arg(long)]
    column: Option<String>,

    /// Share of the series held out for the simulation, in percent.
    #[arg(long, default_value_t = 70.0)]
    test_pct: f64,

    /// Delivery lead time in days.
    #[arg(long, default_value_t = 3)]
    lead_time: usize,

    /// Review cycle in days.
    #[arg(long, default_value_t = 7)]
    review_cycle: usize,

    /// Allowed stockout probability per cycle, in percent.
    #[arg(long, default_value_t = 5.0)]
    stockout_pct: f64,

    /// Transport cost per order.
    #[arg(long, default_value_t = 140_000.0)]
    ordering_cost: f64,

    /// Holding cost per unit and day.
    #[arg(long, default_value_t = 3.0)]
    holding_cost: f64,

    /// Cost per unit of lost demand.
    #[arg(long, default_value_t = 1_000.0)]
    shortage_cost: f64,

    /// Where to write the period table.
    #[arg(short, long, default_value = "simulation_results.csv")]
    output: PathBuf,

    /// Seed for the synthetic demand series.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // 1. LOAD DEMAND
    let series = match &args.input {
        Some(path) => demand::load_demand_csv(path, args.column.as_deref())
            .with_context(|| format!("failed to load demand from {}", path.display()))?,
        None => {
            info!(seed = args.seed, "no input file, generating a synthetic series");
            demand::generate_normal_demand(365, 20.0, 6.0, args.seed)
                .context("failed to generate demand")?
        }
    };
    info!(observations = series.len(), "demand loaded");

    // 2. SPLIT
    let (training, test) = demand::chronological_split(&series, args.test_pct / 100.0)
        .context("failed to split demand into training and test data")?;

    // 3. POLICY
    let policy = PolicyParameters {
        lead_time_days: args.lead_time,
        review_cycle_days: args.review_cycle,
        target_service_level: 1.0 - args.stockout_pct / 100.0,
        ordering_cost: args.ordering_cost,
        holding_cost_per_unit_per_day: args.holding_cost,
        shortage_cost_per_unit: args.shortage_cost,
    };

    // 4. RUN
    let outcome = simulate(&training, &test, &policy).context("simulation failed")?;

    // 5. EXPORT
    reporting::write_period_log(&args.output, &outcome.records)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!("\n=== Simulation Summary ===");
    for line in reporting::render_summary(&outcome.derived, &outcome.summary) {
        println!("{line}");
    }

    Ok(())
}
