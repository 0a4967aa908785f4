//! Join-key normalization for municipality names.
//!
//! Applied symmetrically to incident rows and coordinate reference rows,
//! so that "Tunja", "tunja " and "TUNJA" compare equal everywhere a
//! municipality is matched or grouped.

/// Normalizes a free-text field for use as a group-by key.
///
/// Trims surrounding whitespace and upper-cases the remainder. Accented
/// characters are preserved: the reference table and the incident
/// dataset both spell names with accents, and stripping them is a match
/// policy change, not a cleanup.
#[must_use]
pub fn normalize_text_key(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Normalizes a municipality name, the sole join key between incident
/// rows and the coordinate reference table.
#[must_use]
pub fn normalize_municipality(raw: &str) -> String {
    normalize_text_key(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn casing_and_padding_variants_collapse() {
        assert_eq!(normalize_municipality("Tunja"), "TUNJA");
        assert_eq!(normalize_municipality(" tunja "), "TUNJA");
        assert_eq!(normalize_municipality("TUNJA"), "TUNJA");
    }

    #[test]
    fn accents_are_preserved() {
        assert_eq!(normalize_municipality("Chiquinquirá"), "CHIQUINQUIRÁ");
        assert_eq!(normalize_municipality("soatá"), "SOATÁ");
    }

    #[test]
    fn whitespace_only_normalizes_to_empty() {
        assert_eq!(normalize_municipality("   "), "");
        assert_eq!(normalize_municipality(""), "");
    }

    #[test]
    fn interior_spacing_is_kept() {
        assert_eq!(
            normalize_municipality(" villa de leyva "),
            "VILLA DE LEYVA"
        );
    }
}
