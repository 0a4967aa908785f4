#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types produced by the join-and-aggregate pipeline.
//!
//! These are the contract between the pipeline and the presentation
//! layer: per-municipality aggregates, KPI summary counts, and the
//! non-geographic breakdown tables. Everything here is derived data,
//! recomputed whenever the filtered incident set changes and never
//! persisted.

use chrono::NaiveDate;
use fire_map_fire_models::{ColorClass, CoverageGroup};
use serde::{Deserialize, Serialize};

/// One row per municipality present after the coordinate join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MunicipalityAggregate {
    /// Municipality display name from the reference table.
    pub municipality: String,
    /// Department from the reference table.
    pub department: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// DANE municipality code (opaque, display only).
    pub key: String,
    /// Number of incidents in the group.
    pub incident_count: u64,
    /// Sum of affected hectares over rows where the value is known.
    /// Rows with an unknown area are excluded from the sum, not counted
    /// as zero.
    pub total_hectares: f64,
    /// Number of rows contributing to `total_hectares`.
    pub hectares_known: u64,
    /// Percentile class of `incident_count` within the filtered set.
    pub color_class: ColorClass,
}

/// KPI summary counts accompanying the aggregates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSummary {
    /// All cleaned incidents in the filtered set.
    pub total_incidents: u64,
    /// Incidents whose municipality matched the coordinate table.
    pub matched_incidents: u64,
    /// Incidents excluded from the geographic aggregates.
    pub unmatched_incidents: u64,
    /// Distinct municipalities with no coordinate entry, counted once
    /// per name, not once per row.
    pub unmatched_municipality_count: u64,
    /// Raw rows rejected during cleaning.
    pub dropped_row_count: u64,
    /// Affected hectares across the whole filtered set (matched or
    /// not), summing only known values.
    pub total_hectares: f64,
}

/// The full pipeline output: aggregates, KPIs, and join diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    /// Per-municipality aggregates, ordered by incident count
    /// descending, municipality name ascending.
    pub aggregates: Vec<MunicipalityAggregate>,
    /// KPI summary counts.
    pub summary: AggregateSummary,
    /// Distinct normalized municipality names that had incidents but no
    /// coordinate entry, in name order.
    pub unmatched: Vec<String>,
}

/// In-memory filter parameters for re-slicing an already-fetched set.
///
/// Percentile classes are relative to the visible data, so the pipeline
/// reruns on every change to these values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    /// Keep only incidents from this department.
    pub department: Option<String>,
    /// Keep only incidents reported on or after this date.
    pub date_from: Option<NaiveDate>,
    /// Keep only incidents reported on or before this date.
    pub date_to: Option<NaiveDate>,
    /// Keep only incidents whose dominant coverage is this group.
    pub coverage: Option<CoverageGroup>,
}

impl FilterParams {
    /// `true` when no filter value is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.department.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
            && self.coverage.is_none()
    }
}

/// Incident count for one fire cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CauseCount {
    /// Normalized cause label.
    pub cause: String,
    /// Number of incidents reporting this cause.
    pub count: u64,
}

/// Total affected area for one coverage group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageAreaTotal {
    /// The coverage group.
    pub group: CoverageGroup,
    /// Spanish display label.
    pub label: String,
    /// Total affected hectares across the filtered set.
    pub total_hectares: f64,
}

/// Per-municipality impact statistics over rows with a known affected
/// area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MunicipalityImpact {
    /// Normalized municipality name.
    pub municipality: String,
    /// Number of incidents with a known affected area.
    pub incident_count: u64,
    /// Sum of known affected hectares.
    pub total_hectares: f64,
    /// Mean affected hectares per incident with a known area.
    pub mean_hectares: f64,
    /// Most frequent cause among those incidents, name-ascending on
    /// ties.
    pub top_cause: Option<String>,
}

/// Pearson correlation between incident counts and total hectares
/// across municipalities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationStats {
    /// Correlation coefficient in [-1, 1].
    pub coefficient: f64,
    /// Number of municipalities the coefficient was computed over.
    pub municipality_count: u64,
}
