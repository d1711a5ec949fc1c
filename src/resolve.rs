// src/resolve.rs

// --- Imports ---
use crate::normalize::{check_date, trim_to_code_chars};
use crate::reference::countries::{DIGIT3_TRANSCRIPTION_FIX, MAGHREB_CODE, MAGHREB_MEMBERS};
use crate::reference::ReferenceTables;
use crate::utils::error::ParseError;

/// Where a resolved country code points: one country, or the fixed member
/// set of a trade-bloc group reported under a single code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryTarget {
    Single(String),
    Group(Vec<String>),
}

impl CountryTarget {
    pub fn keys(&self) -> Vec<&str> {
        match self {
            CountryTarget::Single(k) => vec![k.as_str()],
            CountryTarget::Group(ks) => ks.iter().map(String::as_str).collect(),
        }
    }
}

/// Outcome of one variety-resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarietyLookup {
    /// Canonical variety resolved; any partial buffer is consumed.
    Match(String),
    /// Candidate is a plausible partial code; carry it as the new buffer.
    Buffered(String),
    /// Known continuation remnant; consume without buffering.
    Discarded,
    /// Benign non-match (date, prose, stray text); buffer untouched.
    NoMatch,
}

/// Resolves normalized fragments to canonical country keys and variety
/// codes against the injected reference tables.
pub struct CodeResolver<'a> {
    tables: &'a ReferenceTables,
}

impl<'a> CodeResolver<'a> {
    pub fn new(tables: &'a ReferenceTables) -> Self {
        Self { tables }
    }

    /// Resolves a fragment to a country target. `Ok(None)` means the text
    /// is not country-shaped at all; a fragment that looks like a real
    /// code but matches nothing known is an `UnresolvableCode`.
    pub fn resolve_country(&self, text: &str) -> Result<Option<CountryTarget>, ParseError> {
        // Greek capitals standing in for Latin letters on older scans
        let txt: String = text
            .replace('\u{039c}', "M")
            .replace('\u{039a}', "K")
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        if txt.len() == 2 {
            if let Some(row) = self.tables.country_by_alpha2(&txt) {
                return Ok(Some(CountryTarget::Single(row.key.to_string())));
            }
            if txt.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(ParseError::UnresolvableCode(format!(
                    "possible 2-letter country code {txt} missed"
                )));
            }
        } else if txt.len() == 3 {
            let lookup = if txt == DIGIT3_TRANSCRIPTION_FIX.0 {
                DIGIT3_TRANSCRIPTION_FIX.1
            } else {
                txt.as_str()
            };
            if let Some(row) = self.tables.country_by_digit3(lookup) {
                return Ok(Some(CountryTarget::Single(row.key.to_string())));
            }
            if txt == MAGHREB_CODE {
                return Ok(Some(CountryTarget::Group(
                    MAGHREB_MEMBERS.iter().map(|m| m.to_string()).collect(),
                )));
            }
            if txt.chars().all(|c| c.is_ascii_digit()) {
                return Err(ParseError::UnresolvableCode(format!(
                    "possible 3-digit country code {txt} missed"
                )));
            }
        }
        // any other shape is noise, not an error
        Ok(None)
    }

    /// Resolves a fragment (possibly continuing a buffered partial code)
    /// to a canonical variety code, trying the documented fallbacks in
    /// fixed order.
    pub fn resolve_variety(&self, text: &str, partial: &str) -> Result<VarietyLookup, ParseError> {
        let combined = format!("{partial}{text}");

        // 1–2: direct lookup of the fragment, then of the buffered form
        if let Some(v) = self.direct_lookup(text) {
            return Ok(VarietyLookup::Match(v.to_string()));
        }
        if let Some(v) = self.direct_lookup(&combined) {
            return Ok(VarietyLookup::Match(v.to_string()));
        }

        // 3: known transcription errors, then resolve the corrected text
        if let Some(corrected) = self
            .tables
            .transcription_fix(text)
            .or_else(|| self.tables.transcription_fix(&combined))
        {
            let trimmed = trim_to_code_chars(corrected);
            if let Some(v) = self.tables.find_variety(&trimmed) {
                return Ok(VarietyLookup::Match(v.to_string()));
            }
            if !trimmed.is_empty() && self.tables.any_form_contains(&trimmed) {
                // correction restored only the head of a composite code
                return Ok(VarietyLookup::Buffered(trimmed));
            }
            return Ok(VarietyLookup::Discarded);
        }

        // 4: trailing remnant of a code already consumed
        if self.tables.is_continuation(text) || self.tables.is_continuation(&combined) {
            return Ok(VarietyLookup::Discarded);
        }

        // 5: dates inside the table body are benign
        if check_date(text).is_some() {
            return Ok(VarietyLookup::NoMatch);
        }

        // 6–7: candidate made only of code characters — either the head
        // of a code split across fragments, or a genuine mystery
        if combined.chars().all(|c| c.is_ascii_digit() || c == '.') {
            let trimmed = trim_to_code_chars(&combined);
            if !trimmed.is_empty() && self.tables.any_form_contains(&trimmed) {
                return Ok(VarietyLookup::Buffered(trimmed));
            }
            if combined.len() > 3 {
                return Err(ParseError::UnresolvableCode(format!(
                    "{combined} does not match any known variety"
                )));
            }
        }
        Ok(VarietyLookup::NoMatch)
    }

    fn direct_lookup(&self, text: &str) -> Option<&'static str> {
        let trimmed = trim_to_code_chars(text);
        // two or three code characters would be a country code, not a CN code
        if trimmed.len() == 2 || trimmed.len() == 3 {
            return None;
        }
        self.tables.find_variety(&trimmed)
    }
}
