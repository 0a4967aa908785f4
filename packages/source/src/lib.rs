#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Incident data source fetching and normalization logic.
//!
//! The fire incident dataset lives on a Socrata open-data portal; this
//! crate fetches it page by page, cleans the heterogeneous raw rows into
//! [`fire_map_source_models::IncidentRecord`] values, and exposes the
//! [`IncidentSource`] trait so the pipeline can be driven from stub data
//! in tests.

pub mod clean;
pub mod coverage_mapping;
pub mod parsing;
pub mod registry;
pub mod retry;
pub mod socrata;
pub mod source_def;

use async_trait::async_trait;
use chrono::NaiveDate;

/// Errors that can occur while fetching raw incident data.
///
/// Callers treat either variant as "no data available this cycle"; a
/// fetch failure must never take the presentation layer down with it.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The remote source could not be reached (connection, timeout).
    #[error("data source unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// The source responded, but the body was not what we expected.
    #[error("malformed response: {message}")]
    MalformedResponse {
        /// Description of what failed to parse.
        message: String,
    },

    /// I/O error (file read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SourceError {
    /// Classifies a transport error: connection-level failures are
    /// `Unreachable`, everything else is a malformed response.
    #[must_use]
    pub fn from_transport(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() || e.is_request() {
            Self::Unreachable(e)
        } else {
            Self::MalformedResponse {
                message: e.to_string(),
            }
        }
    }
}

/// Filters for a fetch operation.
///
/// All fields are optional; a source that returns fewer rows than the
/// limit is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Only fetch records for this department.
    pub department: Option<String>,
    /// Only fetch records reported on or after this date.
    pub date_from: Option<NaiveDate>,
    /// Only fetch records reported on or before this date.
    pub date_to: Option<NaiveDate>,
    /// Maximum number of records to fetch.
    pub limit: Option<u64>,
}

/// Trait that all incident data sources implement.
///
/// The production implementation is the config-driven Socrata fetcher in
/// [`source_def::SourceDefinition`]; tests substitute in-memory stubs.
#[async_trait]
pub trait IncidentSource: Send + Sync {
    /// Returns a unique identifier for this source.
    fn id(&self) -> &str;

    /// Returns the human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetches raw rows from the source, honoring the given filters.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the source is unreachable or the
    /// response cannot be parsed.
    async fn fetch_rows(
        &self,
        options: &FetchOptions,
    ) -> Result<Vec<serde_json::Value>, SourceError>;
}
