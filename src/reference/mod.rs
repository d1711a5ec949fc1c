// src/reference/mod.rs
pub mod cn_codes;
pub mod corrections;
pub mod countries;

use std::collections::{HashMap, HashSet};

use crate::utils::error::ReferenceError;
use countries::CountryRow;

pub const DEFAULT_MIN_VARIETIES: usize = 3;

/// Immutable reference data injected into the resolver and record store.
/// Built once at process start; never mutated during parsing.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    countries: Vec<CountryRow>,
    cn_codes: Vec<(&'static str, &'static [&'static str])>,
    transcription_errors: HashMap<&'static str, &'static str>,
    ignore_continuations: HashSet<&'static str>,
    duplicate_country_docs: HashSet<&'static str>,
    dont_ignore_docs: HashSet<&'static str>,
    multi_section_docs: HashSet<&'static str>,
    filtered_noise: HashSet<&'static str>,
    /// Minimum varieties a document must resolve unless on the
    /// don't-ignore allow-list.
    pub min_varieties: usize,
}

impl ReferenceTables {
    /// Builds the built-in tables, validating that no two country rows
    /// collide on their 2-letter or 3-digit representation.
    pub fn builtin() -> Result<Self, ReferenceError> {
        let countries = countries::COUNTRIES.to_vec();
        Self::validate_countries(&countries)?;
        Ok(Self {
            countries,
            cn_codes: cn_codes::CN_CODES.to_vec(),
            transcription_errors: corrections::TRANSCRIPTION_ERRORS.iter().copied().collect(),
            ignore_continuations: corrections::IGNORE_CONTINUATIONS.iter().copied().collect(),
            duplicate_country_docs: corrections::KNOWN_DUPLICATE_COUNTRY.iter().copied().collect(),
            dont_ignore_docs: corrections::DONT_IGNORE.iter().copied().collect(),
            multi_section_docs: corrections::MULTI_SECTION_DOCS.iter().copied().collect(),
            filtered_noise: corrections::FILTERED_NOISE.iter().copied().collect(),
            min_varieties: DEFAULT_MIN_VARIETIES,
        })
    }

    fn validate_countries(rows: &[CountryRow]) -> Result<(), ReferenceError> {
        let mut seen2 = HashSet::new();
        let mut seen3 = HashSet::new();
        let mut dup2 = Vec::new();
        let mut dup3 = Vec::new();
        for row in rows {
            if !seen2.insert(row.alpha2) {
                dup2.push(row.alpha2);
            }
            if !seen3.insert(row.digit3) {
                dup3.push(row.digit3);
            }
        }
        if !dup2.is_empty() {
            return Err(ReferenceError::DuplicateAlpha2(dup2.join(", ")));
        }
        if !dup3.is_empty() {
            return Err(ReferenceError::DuplicateDigit3(dup3.join(", ")));
        }
        Ok(())
    }

    pub fn countries(&self) -> &[CountryRow] {
        &self.countries
    }

    pub fn country_by_alpha2(&self, code: &str) -> Option<&CountryRow> {
        self.countries.iter().find(|r| r.alpha2 == code)
    }

    pub fn country_by_digit3(&self, code: &str) -> Option<&CountryRow> {
        self.countries.iter().find(|r| r.digit3 == code)
    }

    /// Exact lookup of a written form against the commodity table,
    /// yielding the canonical variety code.
    pub fn find_variety(&self, form: &str) -> Option<&'static str> {
        self.cn_codes
            .iter()
            .find(|(_, forms)| forms.iter().any(|f| *f == form))
            .map(|(canonical, _)| *canonical)
    }

    /// Whether any known written form contains `fragment` as a substring.
    /// Used to decide if a partial code is worth buffering.
    pub fn any_form_contains(&self, fragment: &str) -> bool {
        self.cn_codes
            .iter()
            .any(|(_, forms)| forms.iter().any(|f| f.contains(fragment)))
    }

    pub fn transcription_fix(&self, text: &str) -> Option<&'static str> {
        self.transcription_errors.get(text).copied()
    }

    pub fn is_continuation(&self, text: &str) -> bool {
        self.ignore_continuations.contains(text)
    }

    pub fn allows_duplicate_country(&self, doc_id: &str) -> bool {
        self.duplicate_country_docs.contains(doc_id)
    }

    pub fn is_dont_ignore(&self, doc_id: &str) -> bool {
        self.dont_ignore_docs.contains(doc_id)
    }

    pub fn is_multi_section(&self, doc_id: &str) -> bool {
        self.multi_section_docs.contains(doc_id)
    }

    pub fn is_noise(&self, text: &str) -> bool {
        self.filtered_noise.contains(text)
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_load() {
        let tables = ReferenceTables::builtin().unwrap();
        assert!(tables.countries().len() > 30);
        assert_eq!(tables.min_varieties, DEFAULT_MIN_VARIETIES);
    }

    #[test]
    fn country_table_has_no_collisions() {
        // the load-time invariant itself
        assert!(ReferenceTables::validate_countries(countries::COUNTRIES).is_ok());
    }

    #[test]
    fn duplicate_rows_are_rejected() {
        let mut rows = countries::COUNTRIES.to_vec();
        rows.push(CountryRow { alpha2: "FR", digit3: "777", key: "Francia" });
        assert!(matches!(
            ReferenceTables::validate_countries(&rows),
            Err(ReferenceError::DuplicateAlpha2(_))
        ));

        let mut rows = countries::COUNTRIES.to_vec();
        rows.push(CountryRow { alpha2: "XX", digit3: "204", key: "Maroc" });
        assert!(matches!(
            ReferenceTables::validate_countries(&rows),
            Err(ReferenceError::DuplicateDigit3(_))
        ));
    }

    #[test]
    fn variety_lookup_resolves_forms_to_canonical() {
        let tables = ReferenceTables::builtin().unwrap();
        assert_eq!(tables.find_variety("08052070"), Some("08052070"));
        assert_eq!(
            tables.find_variety("08052030.08052050.08052070.08052090"),
            Some("08052030.08052050.08052070.08052090")
        );
        assert_eq!(tables.find_variety("080930"), Some("08093031.08093039"));
        assert_eq!(tables.find_variety("99999999"), None);
    }

    #[test]
    fn partial_codes_match_composite_substrings() {
        let tables = ReferenceTables::builtin().unwrap();
        assert!(tables.any_form_contains("08052030.080520"));
        assert!(tables.any_form_contains("08081092.0808"));
        assert!(!tables.any_form_contains("123456"));
    }
}
