//! Config-driven incident data source definition.
//!
//! [`SourceDefinition`] captures everything unique about a dataset in a
//! serializable config struct loaded from TOML at compile time: the API
//! endpoint, pagination parameters, column names, and licensing
//! metadata. A single generic Socrata fetcher handles the actual
//! download.

use async_trait::async_trait;
use serde::Deserialize;

use crate::socrata::{SocrataFetch, fetch_socrata};
use crate::{FetchOptions, IncidentSource, SourceError};

/// A complete, config-driven incident data source definition.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceDefinition {
    /// Unique identifier (e.g., `"boyaca_incendios"`).
    pub id: String,
    /// Human-readable dataset name.
    pub name: String,
    /// Department the dataset covers, if scoped to one.
    pub department: Option<String>,
    /// Licensing and usage metadata for this data source.
    pub license: LicenseInfo,
    /// How to fetch raw data from the API.
    pub fetcher: FetcherConfig,
    /// Column name mappings for cleaning.
    pub fields: FieldMapping,
}

/// Licensing and usage restrictions for a data source.
///
/// Every source must document its license explicitly, so we always know
/// what we can and cannot do with the data.
#[derive(Debug, Clone, Deserialize)]
pub struct LicenseInfo {
    /// License type identifier (e.g., `"open_data"`).
    pub license_type: String,
    /// Whether attribution is required when using this data.
    pub attribution_required: bool,
    /// Verbatim attribution text to display when required.
    pub attribution_text: Option<String>,
}

/// How to fetch raw data from the source API.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FetcherConfig {
    /// Socrata SODA API (`$limit`/`$offset`/`$order`/`$where`).
    Socrata {
        /// Base Socrata API URL.
        api_url: String,
        /// Date column for ordering and `$where` filtering.
        date_column: String,
        /// Department column for `$where` filtering.
        department_column: String,
        /// Records per page.
        page_size: u64,
    },
}

/// Column names holding the fields the cleaner extracts.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldMapping {
    /// Municipality name column.
    pub municipality: String,
    /// Department name column.
    pub department: String,
    /// Report date columns, tried in order; the first parseable value
    /// wins. The portal has shipped this column under more than one name.
    pub dates: Vec<String>,
    /// Fire cause column.
    pub cause: String,
    /// Total affected hectares column.
    pub hectares: String,
}

/// Parses a [`SourceDefinition`] from TOML text.
///
/// # Errors
///
/// Returns a `toml` deserialization error if the config is malformed.
pub fn parse_source_toml(text: &str) -> Result<SourceDefinition, toml::de::Error> {
    toml::from_str(text)
}

#[async_trait]
impl IncidentSource for SourceDefinition {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_rows(
        &self,
        options: &FetchOptions,
    ) -> Result<Vec<serde_json::Value>, SourceError> {
        match &self.fetcher {
            FetcherConfig::Socrata {
                api_url,
                date_column,
                department_column,
                page_size,
            } => {
                let config = SocrataFetch {
                    api_url,
                    date_column,
                    department_column,
                    label: &self.name,
                    page_size: *page_size,
                };
                fetch_socrata(&config, options).await
            }
        }
    }
}
