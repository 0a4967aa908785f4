//! Join-and-aggregate over cleaned incident records.
//!
//! Groups incidents by normalized municipality, joins each group
//! against the coordinate lookup (exact match only), and produces the
//! per-municipality aggregates with percentile color classes. The
//! transformation is pure: identical inputs produce byte-identical
//! output, and row order never matters because every aggregate is
//! commutative.

use std::collections::{BTreeMap, BTreeSet};

use fire_map_analytics_models::{AggregateReport, AggregateSummary, MunicipalityAggregate};
use fire_map_fire_models::ColorClass;
use fire_map_geography::CoordinateLookup;
use fire_map_source_models::{CleanReport, IncidentRecord};

use crate::PipelineError;

/// Per-group accumulation before the join.
#[derive(Default)]
struct GroupStats {
    count: u64,
    hectares_sum: f64,
    hectares_known: u64,
}

/// Runs the join-and-aggregate pipeline over a filtered incident set.
///
/// The `clean` report carries the dropped-row count from the cleaning
/// pass into the summary KPIs. Municipalities absent from the lookup
/// are excluded from the geographic aggregates, counted once per
/// distinct name, and listed in the report for diagnostics; their rows
/// still count toward `total_incidents` and `total_hectares`.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyLookup`] when the coordinate lookup
/// has no entries. That is a configuration error, distinct from the valid
/// empty result produced by an empty incident set.
pub fn aggregate_by_municipality(
    records: &[IncidentRecord],
    lookup: &CoordinateLookup,
    clean: CleanReport,
) -> Result<AggregateReport, PipelineError> {
    if lookup.is_empty() {
        return Err(PipelineError::EmptyLookup);
    }

    let mut groups: BTreeMap<&str, GroupStats> = BTreeMap::new();
    let mut total_hectares = 0.0;

    for record in records {
        let stats = groups.entry(record.municipality.as_str()).or_default();
        stats.count += 1;
        if let Some(hectares) = record.affected_hectares {
            stats.hectares_sum += hectares;
            stats.hectares_known += 1;
            total_hectares += hectares;
        }
    }

    let mut matched: Vec<(&str, &fire_map_geography::CoordinateEntry, &GroupStats)> =
        Vec::with_capacity(groups.len());
    let mut unmatched: BTreeSet<&str> = BTreeSet::new();
    let mut matched_incidents = 0;

    for (municipality, stats) in &groups {
        if let Some(entry) = lookup.get(municipality) {
            matched.push((municipality, entry, stats));
            matched_incidents += stats.count;
        } else {
            unmatched.insert(municipality);
        }
    }

    for municipality in &unmatched {
        log::warn!("Municipality {municipality} has no coordinate entry; excluded from map views");
    }

    // Rank ascending by (count, name), the documented deterministic
    // tie-break, and assign the percentile class per rank.
    matched.sort_by(|a, b| a.2.count.cmp(&b.2.count).then_with(|| a.0.cmp(b.0)));
    let total = matched.len() as u64;

    let mut aggregates: Vec<MunicipalityAggregate> = matched
        .iter()
        .enumerate()
        .map(|(index, (_municipality, entry, stats))| {
            MunicipalityAggregate {
                municipality: entry.municipality.clone(),
                department: entry.department.clone(),
                latitude: entry.latitude,
                longitude: entry.longitude,
                key: entry.key.clone(),
                incident_count: stats.count,
                total_hectares: stats.hectares_sum,
                hectares_known: stats.hectares_known,
                color_class: ColorClass::from_rank(index as u64 + 1, total),
            }
        })
        .collect();

    // Present highest-frequency municipalities first.
    aggregates.sort_by(|a, b| {
        b.incident_count
            .cmp(&a.incident_count)
            .then_with(|| a.municipality.cmp(&b.municipality))
    });

    let total_incidents = records.len() as u64;
    let summary = AggregateSummary {
        total_incidents,
        matched_incidents,
        unmatched_incidents: total_incidents - matched_incidents,
        unmatched_municipality_count: unmatched.len() as u64,
        dropped_row_count: clean.dropped_rows,
        total_hectares,
    };

    Ok(AggregateReport {
        aggregates,
        summary,
        unmatched: unmatched.into_iter().map(String::from).collect(),
    })
}
