//! Terminal front-end for the fetch → clean → join → aggregate cycle.

use std::time::Instant;

use fire_map_analytics::breakdown::{
    coverage_totals, incident_hectares_correlation, municipality_impact, top_causes,
};
use fire_map_analytics::pipeline::aggregate_by_municipality;
use fire_map_geography::CoordinateLookup;
use fire_map_source::clean::clean_rows;
use fire_map_source::{FetchOptions, IncidentSource as _, registry};

/// Causes printed after the municipality table.
const TOP_CAUSES_LIMIT: usize = 10;

/// Fetches and aggregates incidents, printing the municipality table,
/// KPI summary, and breakdowns.
///
/// # Errors
///
/// Returns an error when the coordinate lookup cannot be loaded (a
/// configuration error, since there is nothing geographic to print without
/// it) or when the source is unreachable.
pub async fn run_sync(
    options: &FetchOptions,
    top: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();

    let Some(source) = registry::find_source("boyaca_incendios") else {
        return Err("source boyaca_incendios missing from the embedded registry".into());
    };
    let lookup = CoordinateLookup::load()?;

    log::info!("Syncing source: {} ({})", source.name, source.id);
    let rows = source.fetch_rows(options).await?;
    let (records, clean) = clean_rows(&rows, &source.fields);
    let report = aggregate_by_municipality(&records, &lookup, clean)?;

    println!();
    println!("{}", source.name);
    println!("{}", "─".repeat(source.name.chars().count()));
    println!("Total incidents:        {}", report.summary.total_incidents);
    println!(
        "Affected hectares:      {:.1}",
        report.summary.total_hectares
    );
    println!(
        "Mapped municipalities:  {}",
        report.aggregates.len()
    );
    println!(
        "Unmatched:              {} municipalities / {} incidents",
        report.summary.unmatched_municipality_count, report.summary.unmatched_incidents
    );
    println!("Dropped rows:           {}", report.summary.dropped_row_count);

    println!();
    println!(
        "{:<28} {:>9} {:>12} {:>12}",
        "Municipality", "Incidents", "Hectares", "Class"
    );
    for aggregate in report.aggregates.iter().take(top) {
        println!(
            "{:<28} {:>9} {:>12.1} {:>12}",
            aggregate.municipality,
            aggregate.incident_count,
            aggregate.total_hectares,
            aggregate.color_class
        );
    }
    if report.aggregates.len() > top {
        println!("... and {} more", report.aggregates.len() - top);
    }

    if !report.unmatched.is_empty() {
        println!();
        println!("Without coordinates: {}", report.unmatched.join(", "));
    }

    let causes = top_causes(&records, TOP_CAUSES_LIMIT);
    if !causes.is_empty() {
        println!();
        println!("{:<40} {:>9}", "Cause", "Incidents");
        for cause in &causes {
            println!("{:<40} {:>9}", cause.cause, cause.count);
        }
    }

    println!();
    println!("{:<20} {:>14}", "Coverage group", "Hectares");
    for total in coverage_totals(&records) {
        println!("{:<20} {:>14.1}", total.label, total.total_hectares);
    }

    let impacts = municipality_impact(&records);
    if let Some(stats) = incident_hectares_correlation(&impacts) {
        println!();
        println!(
            "Incidents/hectares correlation: {:.3} across {} municipalities",
            stats.coefficient, stats.municipality_count
        );
    }

    log::info!("Sync finished in {:.1?}", start.elapsed());
    Ok(())
}

/// Prints the configured data sources with their license metadata.
pub fn list_sources() {
    for source in registry::all_sources() {
        println!("{} ({})", source.name, source.id);
        if let Some(department) = &source.department {
            println!("  department:  {department}");
        }
        println!("  license:     {}", source.license.license_type);
        if let Some(attribution) = &source.license.attribution_text {
            println!("  attribution: {attribution}");
        }
    }
}
