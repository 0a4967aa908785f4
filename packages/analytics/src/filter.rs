//! In-memory re-slicing of an already-fetched incident set.
//!
//! The dashboard changes filters far more often than the source data
//! changes, so the filtered set is recomputed locally and fed back
//! through the pipeline; percentile classes are relative to the
//! visible data, never a global constant.

use chrono::NaiveDate;
use fire_map_analytics_models::FilterParams;
use fire_map_geography::normalize_text_key;
use fire_map_source_models::IncidentRecord;

/// Applies the filter parameters to a cleaned incident set.
///
/// A record with no date is kept unless a date bound is active; the
/// date only becomes required when the filter requires it.
#[must_use]
pub fn apply_filters(records: &[IncidentRecord], filter: &FilterParams) -> Vec<IncidentRecord> {
    let department_key = filter.department.as_deref().map(normalize_text_key);

    records
        .iter()
        .filter(|record| {
            if let Some(department) = &department_key
                && record.department != *department
            {
                return false;
            }
            if !date_in_range(record, filter.date_from, filter.date_to) {
                return false;
            }
            if let Some(group) = filter.coverage
                && record.dominant_coverage() != Some(group)
            {
                return false;
            }
            true
        })
        .cloned()
        .collect()
}

/// Date check: records without a date fail only when a bound is set.
fn date_in_range(
    record: &IncidentRecord,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    let Some(reported_at) = record.reported_at else {
        return false;
    };
    let date = reported_at.date_naive();
    if let Some(from) = from
        && date < from
    {
        return false;
    }
    if let Some(to) = to
        && date > to
    {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{Datelike, TimeZone, Utc};
    use fire_map_fire_models::CoverageGroup;

    use super::*;

    fn record(department: &str, day: Option<u32>) -> IncidentRecord {
        IncidentRecord {
            municipality: "TUNJA".to_string(),
            department: department.to_string(),
            reported_at: day
                .map(|d| Utc.with_ymd_and_hms(2024, 3, d, 0, 0, 0).unwrap()),
            cause: None,
            affected_hectares: None,
            coverage: BTreeMap::new(),
        }
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let records = vec![record("BOYACÁ", Some(1)), record("BOYACÁ", None)];
        let kept = apply_filters(&records, &FilterParams::default());
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn department_filter_is_case_insensitive() {
        let records = vec![record("BOYACÁ", None), record("CASANARE", None)];
        let filter = FilterParams {
            department: Some(" boyacá ".to_string()),
            ..FilterParams::default()
        };
        let kept = apply_filters(&records, &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].department, "BOYACÁ");
    }

    #[test]
    fn date_bounds_exclude_undated_records_only_when_active() {
        let records = vec![
            record("BOYACÁ", Some(5)),
            record("BOYACÁ", Some(20)),
            record("BOYACÁ", None),
        ];
        let filter = FilterParams {
            date_from: NaiveDate::from_ymd_opt(2024, 3, 10),
            ..FilterParams::default()
        };
        let kept = apply_filters(&records, &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].reported_at.unwrap().date_naive().day(), 20);
    }

    #[test]
    fn inclusive_date_range_keeps_boundary_days() {
        let records = vec![record("BOYACÁ", Some(10)), record("BOYACÁ", Some(15))];
        let filter = FilterParams {
            date_from: NaiveDate::from_ymd_opt(2024, 3, 10),
            date_to: NaiveDate::from_ymd_opt(2024, 3, 15),
            ..FilterParams::default()
        };
        assert_eq!(apply_filters(&records, &filter).len(), 2);
    }

    #[test]
    fn coverage_filter_matches_dominant_group() {
        let mut pasture = record("BOYACÁ", None);
        pasture.coverage.insert(CoverageGroup::Pastures, 9.0);
        pasture.coverage.insert(CoverageGroup::Forests, 1.0);
        let mut forest = record("BOYACÁ", None);
        forest.coverage.insert(CoverageGroup::Forests, 2.0);
        let bare = record("BOYACÁ", None);

        let filter = FilterParams {
            coverage: Some(CoverageGroup::Pastures),
            ..FilterParams::default()
        };
        let kept = apply_filters(&[pasture, forest, bare], &filter);
        assert_eq!(kept.len(), 1);
    }
}
