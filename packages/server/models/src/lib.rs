#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the fire map server.
//!
//! These types are serialized to JSON for the REST API. They wrap the
//! pipeline's result types with presentation concerns (the non-fatal
//! `notice` field) and are kept separate so the API contract can evolve
//! independently.

use chrono::NaiveDate;
use fire_map_analytics_models::{
    AggregateReport, AggregateSummary, CauseCount, CorrelationStats, CoverageAreaTotal,
    MunicipalityAggregate, MunicipalityImpact,
};
use serde::{Deserialize, Serialize};

/// `GET /api/health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Always `true` when the server is responding.
    pub healthy: bool,
    /// Crate version string.
    pub version: String,
}

/// Query parameters shared by the data endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateQueryParams {
    /// Department filter (matched case-insensitively).
    pub department: Option<String>,
    /// Start date, inclusive (ISO 8601 date).
    pub from: Option<NaiveDate>,
    /// End date, inclusive (ISO 8601 date).
    pub to: Option<NaiveDate>,
    /// Coverage group filter (e.g., `PASTURES`); unknown values are
    /// ignored.
    pub coverage: Option<String>,
    /// Maximum number of rows to fetch from the source.
    pub limit: Option<u64>,
}

/// `GET /api/aggregates` response: the map feature payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAggregateResponse {
    /// Per-municipality aggregates for the marker and density maps.
    pub aggregates: Vec<MunicipalityAggregate>,
    /// KPI summary counts.
    pub summary: AggregateSummary,
    /// Distinct municipalities with incidents but no coordinates.
    pub unmatched: Vec<String>,
    /// Non-fatal notice (e.g., the data source was unavailable and an
    /// empty state is shown).
    pub notice: Option<String>,
}

impl ApiAggregateResponse {
    /// Wraps a pipeline report for the API, with no notice.
    #[must_use]
    pub fn from_report(report: AggregateReport) -> Self {
        Self {
            aggregates: report.aggregates,
            summary: report.summary,
            unmatched: report.unmatched,
            notice: None,
        }
    }

    /// The empty "no data available this cycle" state.
    #[must_use]
    pub fn empty_with_notice(notice: String) -> Self {
        Self {
            aggregates: Vec::new(),
            summary: AggregateSummary::default(),
            unmatched: Vec::new(),
            notice: Some(notice),
        }
    }
}

/// `GET /api/causes` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCausesResponse {
    /// Top causes, descending by count.
    pub causes: Vec<CauseCount>,
    /// Non-fatal notice.
    pub notice: Option<String>,
}

/// `GET /api/coverage` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCoverageResponse {
    /// Affected area per coverage group.
    pub coverage: Vec<CoverageAreaTotal>,
    /// Non-fatal notice.
    pub notice: Option<String>,
}

/// `GET /api/correlation` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCorrelationResponse {
    /// Pearson correlation, when defined.
    pub correlation: Option<CorrelationStats>,
    /// Per-municipality impact rows behind the scatter view.
    pub impacts: Vec<MunicipalityImpact>,
    /// Non-fatal notice.
    pub notice: Option<String>,
}
