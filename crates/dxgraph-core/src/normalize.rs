//! Input normalization for raw, comma-separated symptom strings.

use crate::types::SymptomSet;

/// Split `raw` on commas, trim each piece and drop the empty ones.
///
/// Order of appearance and duplicates are kept for display; the engine
/// collapses them when it builds a [`SymptomSet`].
pub fn normalize(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize `raw` into a symptom set, or `None` if nothing is left.
pub fn symptom_set(raw: &str) -> Option<SymptomSet> {
    SymptomSet::new(normalize(raw)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_drops_empty_pieces() {
        assert_eq!(normalize(" fever ,, cough "), vec!["fever", "cough"]);
    }

    #[test]
    fn blank_input_normalizes_to_nothing() {
        assert!(normalize("").is_empty());
        assert!(normalize("   ").is_empty());
        assert!(normalize(" , ,\t,").is_empty());
        assert!(symptom_set(",,").is_none());
    }

    #[test]
    fn keeps_order_and_duplicates() {
        assert_eq!(normalize("cough,fever,cough"), vec!["cough", "fever", "cough"]);
        assert_eq!(symptom_set("cough,fever,cough").unwrap().len(), 2);
    }

    #[test]
    fn inner_whitespace_and_case_are_preserved() {
        assert_eq!(normalize("Sore Throat, runny  nose"), vec!["Sore Throat", "runny  nose"]);
    }
}
