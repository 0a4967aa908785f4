#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Vegetation fire taxonomy types shared across the fire-map system.
//!
//! Defines the percentile color classes used to rank municipalities by
//! incident frequency, and the vegetation coverage groups that the
//! dataset's per-coverage-type hectare columns roll up into.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Percentile color class for a municipality, assigned by its incident
/// count's rank within the currently filtered set.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ColorClass {
    /// Below the 40th percentile.
    Low,
    /// 40th to 60th percentile.
    Medium,
    /// 60th to 80th percentile.
    MediumHigh,
    /// Top 20% of the filtered set.
    High,
}

impl ColorClass {
    /// Assigns a class from a municipality's 1-based rank in an
    /// ascending sort of the filtered set of `total` municipalities.
    ///
    /// The sort that produces `rank` must be deterministic (ties broken
    /// by municipality name, ascending), so repeated runs on identical
    /// input yield identical classes. A municipality is `High` when its
    /// rank is strictly inside the top 20%: for counts `[1,2,3,4,5]`
    /// only the highest count is `High`. A set of one is `High`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `rank` is zero or exceeds `total`.
    #[must_use]
    pub const fn from_rank(rank: u64, total: u64) -> Self {
        debug_assert!(rank >= 1 && rank <= total);
        if 5 * rank > 4 * total {
            Self::High
        } else if 5 * rank > 3 * total {
            Self::MediumHigh
        } else if 5 * rank > 2 * total {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Returns all variants of this enum, lowest class first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::MediumHigh, Self::High]
    }
}

/// Top-level vegetation coverage groupings.
///
/// The source dataset reports affected area across dozens of
/// coverage-type columns; these groups roll them up for display.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CoverageGroup {
    /// Natural, planted, and fragmented forest cover
    Forests,
    /// Transitory and permanent crops
    Crops,
    /// Clean, managed, and mosaic pasture cover
    Pastures,
    /// Urban fabric, industrial, and recreational zones
    Urban,
    /// Páramos, burned zones, bare soil, and remaining cover types
    Other,
}

impl CoverageGroup {
    /// Human-readable Spanish label used by the reference dashboards.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Forests => "Bosques",
            Self::Crops => "Cultivos",
            Self::Pastures => "Pastos",
            Self::Urban => "Zonas urbanas",
            Self::Other => "Otras coberturas",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Forests,
            Self::Crops,
            Self::Pastures,
            Self::Urban,
            Self::Other,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_count_only_is_high_for_five_distinct_counts() {
        // Counts [1,2,3,4,5] ranked ascending: only rank 5 lands in the
        // top 20%.
        let classes: Vec<ColorClass> = (1..=5).map(|r| ColorClass::from_rank(r, 5)).collect();
        assert_eq!(
            classes,
            vec![
                ColorClass::Low,
                ColorClass::Low,
                ColorClass::Medium,
                ColorClass::MediumHigh,
                ColorClass::High,
            ]
        );
    }

    #[test]
    fn single_municipality_is_high() {
        assert_eq!(ColorClass::from_rank(1, 1), ColorClass::High);
    }

    #[test]
    fn two_municipalities_split_high_and_medium() {
        assert_eq!(ColorClass::from_rank(2, 2), ColorClass::High);
        assert_eq!(ColorClass::from_rank(1, 2), ColorClass::Medium);
    }

    #[test]
    fn ten_ranks_fill_every_class() {
        let classes: Vec<ColorClass> = (1..=10).map(|r| ColorClass::from_rank(r, 10)).collect();
        assert_eq!(&classes[..4], &[ColorClass::Low; 4]);
        assert_eq!(&classes[4..6], &[ColorClass::Medium; 2]);
        assert_eq!(&classes[6..8], &[ColorClass::MediumHigh; 2]);
        assert_eq!(&classes[8..], &[ColorClass::High; 2]);
    }

    #[test]
    fn class_string_roundtrip() {
        for class in ColorClass::all() {
            let parsed: ColorClass = class.to_string().parse().unwrap();
            assert_eq!(parsed, *class);
        }
        assert_eq!(
            "MEDIUM_HIGH".parse::<ColorClass>().unwrap(),
            ColorClass::MediumHigh
        );
    }

    #[test]
    fn coverage_group_labels_are_distinct() {
        let labels: Vec<&str> = CoverageGroup::all().iter().map(|g| g.label()).collect();
        let mut deduped = labels.clone();
        deduped.dedup();
        assert_eq!(labels.len(), deduped.len());
    }
}
