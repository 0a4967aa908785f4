//! Source registry. Loads source definitions from embedded TOML configs.
//!
//! Each `.toml` file in `packages/source/sources/` is baked into the
//! binary at compile time via [`include_str!`]. Adding another
//! department's dataset is a matter of creating a new TOML file and
//! adding it to the list below.

use crate::source_def::{SourceDefinition, parse_source_toml};

/// TOML configs embedded at compile time.
const SOURCE_TOMLS: &[(&str, &str)] = &[("boyaca", include_str!("../sources/boyaca.toml"))];

/// Total number of configured sources (used in tests).
#[cfg(test)]
const EXPECTED_SOURCE_COUNT: usize = 1;

/// Returns all configured source definitions, parsed from embedded TOML.
///
/// # Panics
///
/// Panics if any TOML config is malformed (this is a compile-time
/// guarantee since the configs are embedded).
#[must_use]
pub fn all_sources() -> Vec<SourceDefinition> {
    SOURCE_TOMLS
        .iter()
        .map(|(name, toml)| {
            parse_source_toml(toml).unwrap_or_else(|e| panic!("Failed to parse {name}.toml: {e}"))
        })
        .collect()
}

/// Returns the source with the given ID, if configured.
#[must_use]
pub fn find_source(id: &str) -> Option<SourceDefinition> {
    all_sources().into_iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use crate::source_def::FetcherConfig;

    use super::*;

    #[test]
    fn loads_all_sources() {
        let sources = all_sources();
        assert_eq!(sources.len(), EXPECTED_SOURCE_COUNT);
    }

    #[test]
    fn boyaca_source_is_fully_configured() {
        let source = find_source("boyaca_incendios").unwrap();
        assert_eq!(source.department.as_deref(), Some("Boyacá"));
        assert!(source.license.attribution_required);

        let FetcherConfig::Socrata {
            api_url,
            date_column,
            page_size,
            ..
        } = &source.fetcher;
        assert!(api_url.contains("ryr5-rs2a"));
        assert_eq!(date_column, "fecha_reporte");
        assert_eq!(*page_size, 5000);

        assert_eq!(source.fields.municipality, "municipio");
        assert_eq!(source.fields.dates.len(), 2);
    }

    #[test]
    fn unknown_source_id_is_none() {
        assert!(find_source("nope").is_none());
    }
}
