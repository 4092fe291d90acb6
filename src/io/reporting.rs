// src/io/reporting.rs

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::model::record::{PeriodRecord, SimulationSummary};
use crate::strategy::estimation::DerivedParameters;

/// Writes the period table to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/run_1.csv").
/// * `records` - Day 0 plus one record per simulated day.
pub fn write_period_log<P: AsRef<Path>>(file_path: P, records: &[PeriodRecord]) -> Result<()> {
    let file = std::fs::File::create(file_path.as_ref())?;
    write_period_table(file, records)?;

    info!(
        rows = records.len(),
        path = %file_path.as_ref().display(),
        "period table exported"
    );
    Ok(())
}

/// Serializes the period table as CSV (header row + one row per record).
pub fn write_period_table<W: Write>(writer: W, records: &[PeriodRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Whole units with thousands separators, rounded toward zero.
pub fn format_units(value: f64) -> String {
    let whole = value.trunc() as i64;
    let digits = whole.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if whole < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// A rate in [0, 1] as a percentage with one decimal.
pub fn format_percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Human-readable summary lines: stock figures, service levels and costs.
///
/// Values are only rounded here; the engine keeps full precision.
pub fn render_summary(derived: &DerivedParameters, summary: &SimulationSummary) -> Vec<String> {
    vec![
        format!("Safety stock:            {} units", format_units(summary.safety_stock)),
        format!(
            "Order-up-to level:       {} units",
            format_units(derived.order_up_to_level)
        ),
        format!(
            "Average inventory:       {} units",
            format_units(summary.average_inventory_level)
        ),
        format!(
            "Cycle service level:     {}",
            format_percent(summary.cycle_service_level)
        ),
        format!("Item fill rate:          {}", format_percent(summary.item_fill_rate)),
        format!(
            "Ordering cost:           {}",
            format_units(summary.ordering_cost_total)
        ),
        format!(
            "Holding cost:            {}",
            format_units(summary.inventory_cost_total)
        ),
        format!(
            "Shortage cost:           {}",
            format_units(summary.shortage_cost_total)
        ),
        format!(
            "Total logistics cost:    {}",
            format_units(summary.total_logistics_cost())
        ),
    ]
}
