//! Cleaning and normalization of raw incident rows.
//!
//! Turns the heterogeneous Socrata rows into canonical
//! [`IncidentRecord`] values. A row without a usable municipality after
//! normalization cannot participate in any join or group-by, so it is
//! dropped and counted, never silently ignored and never defaulted to a
//! placeholder. All other field failures degrade the field, not the row.

use fire_map_geography::normalize::{normalize_municipality, normalize_text_key};
use fire_map_source_models::{CleanReport, IncidentRecord};

use crate::coverage_mapping::coverage_by_group;
use crate::parsing::{parse_hectares, parse_socrata_date, parse_text};
use crate::source_def::FieldMapping;

/// Cleans a batch of raw rows into canonical incident records.
///
/// Returns the surviving records plus a [`CleanReport`] with the
/// rejected-row count for the observability KPIs.
#[must_use]
pub fn clean_rows(
    rows: &[serde_json::Value],
    fields: &FieldMapping,
) -> (Vec<IncidentRecord>, CleanReport) {
    let mut records = Vec::with_capacity(rows.len());
    let mut report = CleanReport::default();

    for row in rows {
        let Some(object) = row.as_object() else {
            log::debug!("Rejecting non-object row: {row}");
            report.dropped_rows += 1;
            continue;
        };

        let municipality = object
            .get(&fields.municipality)
            .and_then(serde_json::Value::as_str)
            .map(normalize_municipality)
            .unwrap_or_default();
        if municipality.is_empty() {
            log::debug!("Rejecting row with unusable municipality");
            report.dropped_rows += 1;
            continue;
        }

        let department = object
            .get(&fields.department)
            .and_then(serde_json::Value::as_str)
            .map(normalize_text_key)
            .unwrap_or_default();

        // First parseable date column wins; a row with no parseable
        // date keeps a null date rather than being rejected.
        let reported_at = fields.dates.iter().find_map(|column| {
            object
                .get(column)
                .and_then(serde_json::Value::as_str)
                .and_then(parse_socrata_date)
        });

        let cause = parse_text(object.get(&fields.cause)).map(|c| normalize_text_key(&c));
        let affected_hectares = parse_hectares(object.get(&fields.hectares));
        let coverage = coverage_by_group(object);

        records.push(IncidentRecord {
            municipality,
            department,
            reported_at,
            cause,
            affected_hectares,
            coverage,
        });
    }

    report.parsed_rows = records.len() as u64;
    log::info!(
        "Cleaned {} of {} raw rows ({} dropped)",
        report.parsed_rows,
        rows.len(),
        report.dropped_rows
    );

    (records, report)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fields() -> FieldMapping {
        FieldMapping {
            municipality: "municipio".to_string(),
            department: "departamento".to_string(),
            dates: vec!["fecha_reporte".to_string(), "fecha_del_reporte".to_string()],
            cause: "causa_del_incendio".to_string(),
            hectares: "rea_total_afectada_ha".to_string(),
        }
    }

    #[test]
    fn municipality_variants_normalize_to_one_key() {
        let rows = vec![
            json!({"municipio": " Tunja ", "rea_total_afectada_ha": "10"}),
            json!({"municipio": "TUNJA", "rea_total_afectada_ha": "bad"}),
            json!({"municipio": "Duitama", "rea_total_afectada_ha": "5"}),
        ];
        let (records, report) = clean_rows(&rows, &fields());

        assert_eq!(report.dropped_rows, 0);
        assert_eq!(report.parsed_rows, 3);
        assert_eq!(records[0].municipality, "TUNJA");
        assert_eq!(records[1].municipality, "TUNJA");
        assert_eq!(records[2].municipality, "DUITAMA");
        assert_eq!(records[0].affected_hectares, Some(10.0));
        assert_eq!(records[1].affected_hectares, None);
        assert_eq!(records[2].affected_hectares, Some(5.0));
    }

    #[test]
    fn rows_without_municipality_are_dropped_and_counted() {
        let rows = vec![
            json!({"municipio": "   ", "rea_total_afectada_ha": "1"}),
            json!({"departamento": "Boyacá"}),
            json!("not an object"),
            json!({"municipio": "Paipa"}),
        ];
        let (records, report) = clean_rows(&rows, &fields());

        assert_eq!(records.len(), 1);
        assert_eq!(report.parsed_rows, 1);
        assert_eq!(report.dropped_rows, 3);
    }

    #[test]
    fn first_parseable_date_column_wins() {
        let rows = vec![
            json!({
                "municipio": "Tunja",
                "fecha_reporte": "2024-02-10T00:00:00.000",
                "fecha_del_reporte": "2023-01-01T00:00:00.000",
            }),
            json!({
                "municipio": "Tunja",
                "fecha_reporte": "not a date",
                "fecha_del_reporte": "2023-01-01T00:00:00.000",
            }),
            json!({"municipio": "Tunja", "fecha_reporte": "garbled"}),
        ];
        let (records, _) = clean_rows(&rows, &fields());

        assert_eq!(
            records[0].reported_at.unwrap().to_string(),
            "2024-02-10 00:00:00 UTC"
        );
        assert_eq!(
            records[1].reported_at.unwrap().to_string(),
            "2023-01-01 00:00:00 UTC"
        );
        assert_eq!(records[2].reported_at, None);
    }

    #[test]
    fn cause_is_trimmed_and_case_folded() {
        let rows = vec![
            json!({"municipio": "Tunja", "causa_del_incendio": " quema de cobertura vegetal "}),
            json!({"municipio": "Tunja", "causa_del_incendio": ""}),
        ];
        let (records, _) = clean_rows(&rows, &fields());

        assert_eq!(
            records[0].cause.as_deref(),
            Some("QUEMA DE COBERTURA VEGETAL")
        );
        assert_eq!(records[1].cause, None);
    }

    #[test]
    fn coverage_columns_roll_up_per_group() {
        use fire_map_fire_models::CoverageGroup;

        let rows = vec![json!({
            "municipio": "Aquitania",
            "pastos_limpios_ha": "8.0",
            "pastos_enmalezados_ha": "2.0",
            "bosque_seco_ha": "0.5",
        })];
        let (records, _) = clean_rows(&rows, &fields());

        assert_eq!(
            records[0].coverage.get(&CoverageGroup::Pastures),
            Some(&10.0)
        );
        assert_eq!(records[0].coverage.get(&CoverageGroup::Forests), Some(&0.5));
        assert_eq!(records[0].dominant_coverage(), Some(CoverageGroup::Pastures));
    }
}
