//! Non-geographic breakdown tables and statistics.
//!
//! These run over ALL cleaned records, matched or not; only the
//! map-bound aggregates require a coordinate match. Each function is a
//! pure transformation over its input slice.

use std::collections::BTreeMap;

use fire_map_analytics_models::{
    CauseCount, CorrelationStats, CoverageAreaTotal, MunicipalityImpact,
};
use fire_map_fire_models::CoverageGroup;
use fire_map_source_models::IncidentRecord;

/// Counts incidents per reported cause, descending, keeping the top
/// `limit` causes. Ties break by cause name ascending; records without
/// a cause are not counted.
#[must_use]
pub fn top_causes(records: &[IncidentRecord], limit: usize) -> Vec<CauseCount> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        if let Some(cause) = record.cause.as_deref() {
            *counts.entry(cause).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<CauseCount> = counts
        .into_iter()
        .map(|(cause, count)| CauseCount {
            cause: cause.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.cause.cmp(&b.cause)));
    ranked.truncate(limit);
    ranked
}

/// Total affected hectares per coverage group across the filtered set.
///
/// Every group is present in the result (zero when no area was
/// reported), in declaration order, matching the reference dashboard's
/// coverage summary table.
#[must_use]
pub fn coverage_totals(records: &[IncidentRecord]) -> Vec<CoverageAreaTotal> {
    let mut totals: BTreeMap<CoverageGroup, f64> = CoverageGroup::all()
        .iter()
        .map(|group| (*group, 0.0))
        .collect();

    for record in records {
        for (group, area) in &record.coverage {
            if let Some(total) = totals.get_mut(group) {
                *total += area;
            }
        }
    }

    CoverageGroup::all()
        .iter()
        .map(|group| CoverageAreaTotal {
            group: *group,
            label: group.label().to_string(),
            total_hectares: totals.get(group).copied().unwrap_or(0.0),
        })
        .collect()
}

/// Per-municipality impact statistics over rows with a known affected
/// area, ordered by incident count descending (name ascending on ties).
///
/// Municipalities whose known rows sum to zero hectares are omitted,
/// matching the reference dashboard's correlation table.
#[must_use]
pub fn municipality_impact(records: &[IncidentRecord]) -> Vec<MunicipalityImpact> {
    struct Impact<'a> {
        count: u64,
        hectares: f64,
        causes: BTreeMap<&'a str, u64>,
    }

    let mut by_municipality: BTreeMap<&str, Impact<'_>> = BTreeMap::new();

    for record in records {
        let Some(hectares) = record.affected_hectares else {
            continue;
        };
        let impact = by_municipality
            .entry(record.municipality.as_str())
            .or_insert_with(|| Impact {
                count: 0,
                hectares: 0.0,
                causes: BTreeMap::new(),
            });
        impact.count += 1;
        impact.hectares += hectares;
        if let Some(cause) = record.cause.as_deref() {
            *impact.causes.entry(cause).or_insert(0) += 1;
        }
    }

    let mut impacts: Vec<MunicipalityImpact> = by_municipality
        .into_iter()
        .filter(|(_, impact)| impact.hectares > 0.0)
        .map(|(municipality, impact)| {
            // Mode of the cause counts; the comparator prefers the
            // alphabetically-first name on ties.
            let top_cause = impact
                .causes
                .iter()
                .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
                .map(|(cause, _)| (*cause).to_string());
            #[allow(clippy::cast_precision_loss)]
            let mean_hectares = impact.hectares / impact.count as f64;
            MunicipalityImpact {
                municipality: municipality.to_string(),
                incident_count: impact.count,
                total_hectares: impact.hectares,
                mean_hectares,
                top_cause,
            }
        })
        .collect();

    impacts.sort_by(|a, b| {
        b.incident_count
            .cmp(&a.incident_count)
            .then_with(|| a.municipality.cmp(&b.municipality))
    });
    impacts
}

/// Pearson correlation between incident counts and total hectares
/// across municipalities.
///
/// Returns `None` with fewer than two municipalities or when either
/// series has zero variance. The coefficient is undefined there, and
/// "no correlation available" must stay distinguishable from zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn incident_hectares_correlation(impacts: &[MunicipalityImpact]) -> Option<CorrelationStats> {
    let n = impacts.len();
    if n < 2 {
        return None;
    }

    let counts: Vec<f64> = impacts.iter().map(|i| i.incident_count as f64).collect();
    let hectares: Vec<f64> = impacts.iter().map(|i| i.total_hectares).collect();

    let mean_x = counts.iter().sum::<f64>() / n as f64;
    let mean_y = hectares.iter().sum::<f64>() / n as f64;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in counts.iter().zip(&hectares) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some(CorrelationStats {
        coefficient: covariance / (var_x.sqrt() * var_y.sqrt()),
        municipality_count: n as u64,
    })
}
