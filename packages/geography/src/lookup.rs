//! The static municipality coordinate lookup.
//!
//! A small reference table mapping each municipality to its coordinates
//! and DANE code. The default table is baked into the binary at compile
//! time; deployments can point `FIRE_MAP_COORDINATES` at an alternative
//! CSV with the same columns.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::normalize::normalize_municipality;

/// Default coordinate table embedded at compile time.
const EMBEDDED_COORDINATES: &str = include_str!("../data/coordenadas_municipios.csv");

/// Environment variable naming an override CSV path.
pub const COORDINATES_ENV: &str = "FIRE_MAP_COORDINATES";

/// Errors raised while loading the coordinate reference table.
///
/// Any of these is a configuration error: the lookup is a startup input,
/// so a failure here disables map features rather than a single request.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// File could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// The table parsed but contained no usable rows.
    #[error("coordinate table is empty")]
    Empty,

    /// A latitude or longitude was outside its valid range.
    #[error("invalid coordinates for {municipality}: ({latitude}, {longitude})")]
    InvalidCoordinate {
        /// Normalized municipality name of the offending row.
        municipality: String,
        /// Latitude as read.
        latitude: f64,
        /// Longitude as read.
        longitude: f64,
    },

    /// Two rows normalized to the same municipality key.
    #[error("duplicate municipality after normalization: {municipality}")]
    DuplicateMunicipality {
        /// The colliding normalized name.
        municipality: String,
    },
}

/// One row of the coordinate reference table.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateEntry {
    /// Municipality name as listed in the reference table (display form).
    pub municipality: String,
    /// Department the municipality belongs to.
    pub department: String,
    /// Latitude in decimal degrees, range [-90, 90].
    pub latitude: f64,
    /// Longitude in decimal degrees, range [-180, 180].
    pub longitude: f64,
    /// DANE municipality code, kept opaque and used for display only.
    pub key: String,
}

/// Raw CSV row shape (`municipio,departamento,lat,lon,codigo_dane`).
#[derive(Debug, Deserialize)]
struct CoordinateRow {
    municipio: String,
    departamento: String,
    lat: f64,
    lon: f64,
    codigo_dane: String,
}

/// Immutable map from normalized municipality name to its coordinates.
///
/// Loaded once at process start and shared read-only from then on. An
/// empty table fails construction; "no reference data" must stay
/// distinguishable from "no incidents matched".
#[derive(Debug, Clone)]
pub struct CoordinateLookup {
    entries: BTreeMap<String, CoordinateEntry>,
}

impl CoordinateLookup {
    /// Loads the lookup from the `FIRE_MAP_COORDINATES` override path if
    /// set, otherwise from the embedded default table.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the override file cannot be read or
    /// either table fails validation.
    pub fn load() -> Result<Self, LookupError> {
        if let Ok(path) = std::env::var(COORDINATES_ENV) {
            log::info!("Loading coordinate table from {path}");
            return Self::from_path(Path::new(&path));
        }
        Self::from_reader(EMBEDDED_COORDINATES.as_bytes())
    }

    /// Loads the lookup from a CSV file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the file cannot be read or fails
    /// validation.
    pub fn from_path(path: &Path) -> Result<Self, LookupError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parses and validates the lookup from CSV bytes with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] on malformed CSV, out-of-range
    /// coordinates, duplicate keys, or an empty table.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LookupError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut entries = BTreeMap::new();

        for row in csv_reader.deserialize() {
            let row: CoordinateRow = row?;
            let key = normalize_municipality(&row.municipio);
            if key.is_empty() {
                continue;
            }

            if !(-90.0..=90.0).contains(&row.lat) || !(-180.0..=180.0).contains(&row.lon) {
                return Err(LookupError::InvalidCoordinate {
                    municipality: key,
                    latitude: row.lat,
                    longitude: row.lon,
                });
            }

            let entry = CoordinateEntry {
                municipality: row.municipio.trim().to_string(),
                department: row.departamento.trim().to_string(),
                latitude: row.lat,
                longitude: row.lon,
                key: row.codigo_dane.trim().to_string(),
            };

            if entries.insert(key.clone(), entry).is_some() {
                return Err(LookupError::DuplicateMunicipality { municipality: key });
            }
        }

        if entries.is_empty() {
            return Err(LookupError::Empty);
        }

        log::info!("Loaded {} municipality coordinate entries", entries.len());
        Ok(Self { entries })
    }

    /// Looks up an entry by an already-normalized municipality name.
    /// Exact match only, no fuzzy matching.
    #[must_use]
    pub fn get(&self, normalized_municipality: &str) -> Option<&CoordinateEntry> {
        self.entries.get(normalized_municipality)
    }

    /// Number of municipalities in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: an empty lookup cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in normalized-key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CoordinateEntry)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table_loads_and_contains_known_municipalities() {
        let lookup = CoordinateLookup::from_reader(EMBEDDED_COORDINATES.as_bytes()).unwrap();
        assert!(lookup.len() > 50);

        let tunja = lookup.get("TUNJA").unwrap();
        assert_eq!(tunja.department, "Boyacá");
        assert_eq!(tunja.key, "15001");
        assert!((tunja.latitude - 5.5353).abs() < 1e-6);

        assert!(lookup.get("VILLA DE LEYVA").is_some());
        assert!(lookup.get("CHIQUINQUIRÁ").is_some());
        // Display-form names are not keys.
        assert!(lookup.get("Tunja").is_none());
    }

    #[test]
    fn empty_table_is_a_configuration_error() {
        let err = CoordinateLookup::from_reader("municipio,departamento,lat,lon,codigo_dane\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, LookupError::Empty));
    }

    #[test]
    fn out_of_range_latitude_is_rejected() {
        let csv = "municipio,departamento,lat,lon,codigo_dane\nTunja,Boyacá,95.0,-73.36,15001\n";
        let err = CoordinateLookup::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LookupError::InvalidCoordinate { .. }));
    }

    #[test]
    fn duplicate_key_after_normalization_is_rejected() {
        let csv = "municipio,departamento,lat,lon,codigo_dane\n\
                   Tunja,Boyacá,5.53,-73.36,15001\n\
                   TUNJA ,Boyacá,5.54,-73.37,15001\n";
        let err = CoordinateLookup::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LookupError::DuplicateMunicipality { municipality } if municipality == "TUNJA"
        ));
    }

    #[test]
    fn blank_municipality_rows_are_skipped() {
        let csv = "municipio,departamento,lat,lon,codigo_dane\n\
                   ,Boyacá,5.53,-73.36,15000\n\
                   Tunja,Boyacá,5.53,-73.36,15001\n";
        let lookup = CoordinateLookup::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(lookup.len(), 1);
    }
}
