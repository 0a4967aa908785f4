//! Vegetation coverage column mapping.
//!
//! The dataset spreads affected area across dozens of per-coverage-type
//! hectare columns (one per land-cover class in the source's
//! nomenclature). This module maps each column to its roll-up
//! [`CoverageGroup`] and sums a raw row's area per group.

use std::collections::BTreeMap;

use fire_map_fire_models::CoverageGroup;

use crate::parsing::parse_hectares;

/// Forest cover columns.
const FOREST_COLUMNS: &[&str] = &[
    "bosque_denso_alto_de_tierra",
    "bosque_denso_alto_inundable",
    "bosque_denso_bajo_de_tierra",
    "bosque_denso_bajo_inundable",
    "bosque_abierto_alto_de_tierra",
    "bosque_abierto_alto_inundable",
    "bosque_abierto_bajo_de_tierra",
    "bosque_abierto_bajo_inundable",
    "bosque_fragmentado_ha",
    "bosque_de_galer_a_o_ripario",
    "bosque_natural_denso_ha",
    "bosque_intervenido_ha",
    "bosque_plantado_ha",
    "bosque_seco_ha",
];

/// Crop cover columns, transitory and permanent.
const CROP_COLUMNS: &[&str] = &[
    "cultivos_ha",
    "otros_cultivos_transitorios",
    "cereales_ha",
    "oleaginosas_y_leguminosas",
    "hortalizas_ha",
    "tub_rculos_ha",
    "otros_cultivos_permanentes",
    "caf_ha",
    "cacao_ha",
    "ca_a_ha",
    "pl_tano_y_banano_ha",
    "tabaco_ha",
    "palma_de_aceite_ha",
    "papaya_ha",
    "mango_ha",
    "cultivos_agroforestales_ha",
    "cultivos_confinados_ha",
];

/// Pasture and pasture-mosaic columns.
const PASTURE_COLUMNS: &[&str] = &[
    "pastos_limpios_ha",
    "pastos_arbolados_ha",
    "pastos_enmalezados_ha",
    "mosaico_de_pastos_y_cultivos",
    "mosaico_de_cultivos_pastos",
    "mosaico_de_pastos_con_espacios",
    "pastos_mejorados_ha",
    "pastos_manejados_ha",
    "sabanas_y_pastizales_ha",
    "sabanas_pastizales_ha",
];

/// Urban fabric and infrastructure columns.
const URBAN_COLUMNS: &[&str] = &[
    "tejido_urbano_contin_o_ha",
    "tejido_urbano_discontinuo",
    "zonas_industriales_o",
    "zonas_portuarias_ha",
    "aeropuertos_ha",
    "zonas_de_disposici_n_de",
    "zonas_verdes_urbanas_y_o",
    "instalaciones_recreativas",
];

/// Remaining cover types reported by the dataset.
const OTHER_COLUMNS: &[&str] = &[
    "zonas_quemadas_ha",
    "paramos_ha",
    "vegetaci_n_seca_ha",
    "vegetaci_n_acu_tica_sobre",
    "tierras_desnudas_y_degradadas",
    "afloramientos_rocosos_ha",
];

/// Returns the roll-up group for a dataset coverage column, or `None`
/// for columns that are not coverage areas (dates, text fields, etc.).
#[must_use]
pub fn coverage_group_for_column(column: &str) -> Option<CoverageGroup> {
    if FOREST_COLUMNS.contains(&column) {
        return Some(CoverageGroup::Forests);
    }
    if CROP_COLUMNS.contains(&column) {
        return Some(CoverageGroup::Crops);
    }
    if PASTURE_COLUMNS.contains(&column) {
        return Some(CoverageGroup::Pastures);
    }
    if URBAN_COLUMNS.contains(&column) {
        return Some(CoverageGroup::Urban);
    }
    if OTHER_COLUMNS.contains(&column) {
        return Some(CoverageGroup::Other);
    }
    None
}

/// Sums a raw row's coverage columns per group.
///
/// Unparseable column values are skipped the same way an unparseable
/// total is nulled: absence of data is not zero area, and a group with
/// no parsed columns is absent from the result.
#[must_use]
pub fn coverage_by_group(
    row: &serde_json::Map<String, serde_json::Value>,
) -> BTreeMap<CoverageGroup, f64> {
    let mut totals: BTreeMap<CoverageGroup, f64> = BTreeMap::new();

    for (column, value) in row {
        let Some(group) = coverage_group_for_column(column) else {
            continue;
        };
        let Some(area) = parse_hectares(Some(value)) else {
            continue;
        };
        *totals.entry(group).or_insert(0.0) += area;
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_columns_map_to_groups() {
        assert_eq!(
            coverage_group_for_column("bosque_fragmentado_ha"),
            Some(CoverageGroup::Forests)
        );
        assert_eq!(
            coverage_group_for_column("caf_ha"),
            Some(CoverageGroup::Crops)
        );
        assert_eq!(
            coverage_group_for_column("pastos_limpios_ha"),
            Some(CoverageGroup::Pastures)
        );
        assert_eq!(
            coverage_group_for_column("aeropuertos_ha"),
            Some(CoverageGroup::Urban)
        );
        assert_eq!(
            coverage_group_for_column("paramos_ha"),
            Some(CoverageGroup::Other)
        );
    }

    #[test]
    fn non_coverage_columns_are_unmapped() {
        assert_eq!(coverage_group_for_column("municipio"), None);
        assert_eq!(coverage_group_for_column("fecha_reporte"), None);
        assert_eq!(coverage_group_for_column("rea_total_afectada_ha"), None);
    }

    #[test]
    fn no_column_is_claimed_by_two_groups() {
        let lists = [
            FOREST_COLUMNS,
            CROP_COLUMNS,
            PASTURE_COLUMNS,
            URBAN_COLUMNS,
            OTHER_COLUMNS,
        ];
        let mut seen = std::collections::BTreeSet::new();
        for list in lists {
            for column in list {
                assert!(seen.insert(*column), "{column} appears in two groups");
            }
        }
    }

    #[test]
    fn row_rollup_sums_per_group_and_skips_bad_values() {
        let row = serde_json::json!({
            "municipio": "Tunja",
            "bosque_seco_ha": "2.5",
            "bosque_plantado_ha": "1.5",
            "pastos_limpios_ha": "10",
            "cereales_ha": "not-a-number",
        });
        let totals = coverage_by_group(row.as_object().unwrap());
        assert_eq!(totals.get(&CoverageGroup::Forests), Some(&4.0));
        assert_eq!(totals.get(&CoverageGroup::Pastures), Some(&10.0));
        assert_eq!(totals.get(&CoverageGroup::Crops), None);
    }
}
