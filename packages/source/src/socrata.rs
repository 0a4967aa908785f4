//! Shared Socrata SODA API fetcher.
//!
//! Handles paginated fetching from any Socrata dataset using the
//! `$limit`, `$offset`, `$order`, and `$where` query parameters. A page
//! shorter than requested ends the fetch; partial results from the
//! portal are normal, not an error.

use std::fmt::Write as _;

use crate::retry::send_json;
use crate::{FetchOptions, SourceError};

/// Configuration for a Socrata fetch operation.
pub struct SocrataFetch<'a> {
    /// Base API URL (e.g., `"https://www.datos.gov.co/resource/ryr5-rs2a.json"`).
    pub api_url: &'a str,
    /// The date column name for ordering and `$where` filtering.
    pub date_column: &'a str,
    /// The department column name for `$where` filtering.
    pub department_column: &'a str,
    /// Label for log messages.
    pub label: &'a str,
    /// Page size for pagination.
    pub page_size: u64,
}

/// Fetches rows from a Socrata dataset with pagination, honoring the
/// department/date filters and the overall row limit.
///
/// # Errors
///
/// Returns [`SourceError`] if the portal is unreachable after retries or
/// a response body is not the expected JSON array.
#[allow(clippy::future_not_send)]
pub async fn fetch_socrata(
    config: &SocrataFetch<'_>,
    options: &FetchOptions,
) -> Result<Vec<serde_json::Value>, SourceError> {
    let client = reqwest::Client::new();
    let mut all_rows: Vec<serde_json::Value> = Vec::new();
    let mut offset: u64 = 0;
    let fetch_limit = options.limit.unwrap_or(u64::MAX);
    let where_clause = build_where(config, options);

    loop {
        let remaining = fetch_limit.saturating_sub(offset);
        if remaining == 0 {
            break;
        }
        let page_limit = remaining.min(config.page_size);

        let mut url = format!(
            "{}?$limit={}&$offset={}&$order={} DESC",
            config.api_url, page_limit, offset, config.date_column
        );
        if let Some(filter) = &where_clause {
            write!(url, "&$where={filter}").unwrap();
        }

        log::info!(
            "Fetching {} data: offset={offset}, limit={page_limit}",
            config.label
        );
        let body = send_json(|| client.get(&url)).await?;
        let Some(rows) = body.as_array() else {
            return Err(SourceError::MalformedResponse {
                message: "expected a JSON array of rows".to_string(),
            });
        };

        let count = rows.len() as u64;
        if count == 0 {
            break;
        }

        all_rows.extend(rows.iter().cloned());
        offset += count;

        if count < page_limit {
            break;
        }
    }

    log::info!("Downloaded {} {} rows total", all_rows.len(), config.label);
    Ok(all_rows)
}

/// Builds the `$where` clause for the active filters, or `None` when no
/// filter is set. Single quotes in values are doubled per SoQL string
/// escaping.
fn build_where(config: &SocrataFetch<'_>, options: &FetchOptions) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();

    if let Some(department) = &options.department {
        let escaped = department.trim().to_uppercase().replace('\'', "''");
        parts.push(format!("upper({}) = '{escaped}'", config.department_column));
    }
    if let Some(from) = options.date_from {
        parts.push(format!(
            "{} >= '{}T00:00:00'",
            config.date_column,
            from.format("%Y-%m-%d")
        ));
    }
    if let Some(to) = options.date_to {
        parts.push(format!(
            "{} <= '{}T23:59:59'",
            config.date_column,
            to.format("%Y-%m-%d")
        ));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" AND "))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn config() -> SocrataFetch<'static> {
        SocrataFetch {
            api_url: "https://www.datos.gov.co/resource/ryr5-rs2a.json",
            date_column: "fecha_reporte",
            department_column: "departamento",
            label: "Boyacá",
            page_size: 5000,
        }
    }

    #[test]
    fn no_filters_means_no_where_clause() {
        assert_eq!(build_where(&config(), &FetchOptions::default()), None);
    }

    #[test]
    fn department_filter_is_case_folded_and_escaped() {
        let options = FetchOptions {
            department: Some("boyacá ".to_string()),
            ..FetchOptions::default()
        };
        assert_eq!(
            build_where(&config(), &options).unwrap(),
            "upper(departamento) = 'BOYACÁ'"
        );

        let options = FetchOptions {
            department: Some("O'Higgins".to_string()),
            ..FetchOptions::default()
        };
        assert_eq!(
            build_where(&config(), &options).unwrap(),
            "upper(departamento) = 'O''HIGGINS'"
        );
    }

    #[test]
    fn date_bounds_cover_whole_days() {
        let options = FetchOptions {
            date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            date_to: NaiveDate::from_ymd_opt(2024, 6, 30),
            ..FetchOptions::default()
        };
        assert_eq!(
            build_where(&config(), &options).unwrap(),
            "fecha_reporte >= '2024-01-01T00:00:00' AND fecha_reporte <= '2024-06-30T23:59:59'"
        );
    }
}
