#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The canonical cleaned incident record format.
//!
//! The raw Socrata rows are heterogeneous maps of optional string
//! fields; cleaning produces [`IncidentRecord`] values that the
//! join-and-aggregate pipeline consumes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use fire_map_fire_models::CoverageGroup;
use serde::{Deserialize, Serialize};

/// A vegetation fire incident normalized to the canonical schema.
///
/// Text keys (`municipality`, `department`, `cause`) are already trimmed
/// and case-folded, so they can be used directly as join and group-by
/// keys. `affected_hectares` is `None` when the source value was missing
/// or unparseable; unknown and zero are distinct and must never be
/// conflated in aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    /// Normalized municipality name. Non-empty for every admitted record.
    pub municipality: String,
    /// Normalized department name. May be empty when the source omits it.
    pub department: String,
    /// When the fire was reported. `None` when the source record has a
    /// missing or unparseable date field.
    pub reported_at: Option<DateTime<Utc>>,
    /// Normalized fire cause category, if reported.
    pub cause: Option<String>,
    /// Total affected area in hectares. `None` when unknown, never zero.
    pub affected_hectares: Option<f64>,
    /// Affected area per vegetation coverage group, rolled up from the
    /// dataset's per-coverage-type hectare columns. Groups with no
    /// reported area are absent.
    pub coverage: BTreeMap<CoverageGroup, f64>,
}

impl IncidentRecord {
    /// Returns the coverage group with the largest affected area for
    /// this record, or `None` when no coverage columns were populated.
    ///
    /// Ties resolve to the group declared first in [`CoverageGroup`],
    /// keeping the result deterministic.
    #[must_use]
    pub fn dominant_coverage(&self) -> Option<CoverageGroup> {
        let mut best: Option<(CoverageGroup, f64)> = None;
        for group in CoverageGroup::all() {
            let Some(area) = self.coverage.get(group) else {
                continue;
            };
            match best {
                Some((_, best_area)) if *area <= best_area => {}
                _ => best = Some((*group, *area)),
            }
        }
        best.map(|(group, _)| group)
    }
}

/// Counters produced by a cleaning pass over raw rows.
///
/// `dropped_rows` covers rows rejected for an unusable municipality;
/// rejected rows are counted for observability, never silently ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanReport {
    /// Rows that survived cleaning.
    pub parsed_rows: u64,
    /// Rows rejected for a missing or empty municipality.
    pub dropped_rows: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_coverage(coverage: &[(CoverageGroup, f64)]) -> IncidentRecord {
        IncidentRecord {
            municipality: "TUNJA".to_string(),
            department: "BOYACÁ".to_string(),
            reported_at: None,
            cause: None,
            affected_hectares: None,
            coverage: coverage.iter().copied().collect(),
        }
    }

    #[test]
    fn dominant_coverage_picks_largest_area() {
        let record = record_with_coverage(&[
            (CoverageGroup::Forests, 2.0),
            (CoverageGroup::Pastures, 11.5),
            (CoverageGroup::Other, 0.25),
        ]);
        assert_eq!(record.dominant_coverage(), Some(CoverageGroup::Pastures));
    }

    #[test]
    fn dominant_coverage_tie_resolves_to_declaration_order() {
        let record = record_with_coverage(&[
            (CoverageGroup::Crops, 3.0),
            (CoverageGroup::Forests, 3.0),
        ]);
        assert_eq!(record.dominant_coverage(), Some(CoverageGroup::Forests));
    }

    #[test]
    fn dominant_coverage_empty_is_none() {
        assert_eq!(record_with_coverage(&[]).dominant_coverage(), None);
    }
}
