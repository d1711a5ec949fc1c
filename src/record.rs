// src/record.rs

// --- Imports ---
use std::collections::BTreeMap;

use serde::Serialize;

use crate::reference::ReferenceTables;
use crate::resolve::CountryTarget;
use crate::utils::error::ParseError;

/// Per-variety price table: canonical country key → price string.
pub type SivRecord = BTreeMap<String, String>;

/// The finalized result of parsing one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRecord {
    pub document_id: String,
    pub journal_date: Option<String>,
    pub varieties: BTreeMap<String, SivRecord>,
}

/// Accumulates the single in-progress `DocumentRecord` for a document.
/// Duplicate handling consults the per-document allow-lists; validation
/// runs once at finalization.
pub struct RecordStore<'a> {
    tables: &'a ReferenceTables,
    doc: DocumentRecord,
    current: Option<String>,
}

impl<'a> RecordStore<'a> {
    pub fn new(tables: &'a ReferenceTables, doc_id: &str) -> Self {
        Self {
            tables,
            doc: DocumentRecord {
                document_id: doc_id.to_string(),
                journal_date: None,
                varieties: BTreeMap::new(),
            },
            current: None,
        }
    }

    pub fn set_journal_date(&mut self, date: String) {
        self.doc.journal_date = Some(date);
    }

    pub fn has_open_variety(&self) -> bool {
        self.current.is_some()
    }

    /// Opens a fresh record for `variety`, which becomes the target of
    /// subsequent `set_entry` calls. Re-registering is only allowed for
    /// documents that define one variety across disjoint table sections.
    pub fn register_variety(&mut self, variety: &str) -> Result<(), ParseError> {
        if self.doc.varieties.contains_key(variety) {
            if !self.tables.is_multi_section(&self.doc.document_id) {
                return Err(ParseError::DuplicateVariety(variety.to_string()));
            }
            tracing::debug!(variety, "reusing record across table sections");
        } else {
            self.doc.varieties.insert(variety.to_string(), SivRecord::new());
        }
        self.current = Some(variety.to_string());
        Ok(())
    }

    /// Writes a (country, value) pair into the open record, fanning a
    /// group target out into its member countries.
    pub fn set_entry(&mut self, target: &CountryTarget, value: &str) -> Result<(), ParseError> {
        let variety = match &self.current {
            Some(v) => v.clone(),
            None => {
                return Err(ParseError::UnresolvableCode(
                    "country entry before any variety is open".to_string(),
                ))
            }
        };
        let allow_duplicate = self.tables.allows_duplicate_country(&self.doc.document_id);
        let record = match self.doc.varieties.get_mut(&variety) {
            Some(r) => r,
            None => {
                return Err(ParseError::UnresolvableCode(format!(
                    "no open record for variety {variety}"
                )))
            }
        };
        for key in target.keys() {
            match record.get(key).cloned() {
                None => {
                    record.insert(key.to_string(), value.to_string());
                }
                Some(existing) if allow_duplicate => {
                    let kept = lower_price(&existing, value).to_string();
                    tracing::debug!(
                        variety = %variety,
                        country = key,
                        kept = %kept,
                        "duplicate country allowed, keeping lower price"
                    );
                    record.insert(key.to_string(), kept);
                }
                Some(_) => {
                    return Err(ParseError::DuplicateKey {
                        variety,
                        country: key.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Validates the accumulated record and hands it over. A suspiciously
    /// short variety list usually means a correction document or a bad
    /// parse, unless the document is known-good.
    pub fn finalize(self) -> Result<DocumentRecord, ParseError> {
        let found = self.doc.varieties.len();
        if found < self.tables.min_varieties && !self.tables.is_dont_ignore(&self.doc.document_id)
        {
            return Err(ParseError::ThresholdViolation {
                found,
                minimum: self.tables.min_varieties,
            });
        }
        Ok(self.doc)
    }
}

fn lower_price<'v>(a: &'v str, b: &'v str) -> &'v str {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) if y < x => b,
        _ => a,
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> ReferenceTables {
        ReferenceTables::builtin().unwrap()
    }

    fn single(key: &str) -> CountryTarget {
        CountryTarget::Single(key.to_string())
    }

    #[test]
    fn accumulates_entries_per_variety() {
        let tables = tables();
        let mut store = RecordStore::new(&tables, "31996R0001");
        store.register_variety("07020000").unwrap();
        store.set_entry(&single("Morocco"), "95.5").unwrap();
        store.register_variety("08053010").unwrap();
        store.set_entry(&single("Turkey"), "88.0").unwrap();
        store.register_variety("08061010").unwrap();
        store.set_entry(&single("Chile"), "70.2").unwrap();
        let doc = store.finalize().unwrap();
        assert_eq!(doc.varieties["07020000"]["Morocco"], "95.5");
        assert_eq!(doc.varieties["08053010"]["Turkey"], "88.0");
    }

    #[test]
    fn group_target_fans_out_to_members() {
        let tables = tables();
        let mut store = RecordStore::new(&tables, "31996R0001");
        store.register_variety("07020000").unwrap();
        let group = CountryTarget::Group(vec![
            "Algeria".to_string(),
            "Morocco".to_string(),
            "Tunisia".to_string(),
        ]);
        store.set_entry(&group, "61.0").unwrap();
        assert_eq!(store.doc.varieties["07020000"].len(), 3);
        assert!(store.doc.varieties["07020000"].values().all(|v| v == "61.0"));
    }

    #[test]
    fn duplicate_variety_is_fatal_unless_allowlisted() {
        let tables = tables();
        let mut store = RecordStore::new(&tables, "31996R0001");
        store.register_variety("07020000").unwrap();
        assert_eq!(
            store.register_variety("07020000"),
            Err(ParseError::DuplicateVariety("07020000".to_string()))
        );

        // 31995R0063 defines varieties across disjoint sections
        let mut store = RecordStore::new(&tables, "31995R0063");
        store.register_variety("07020000").unwrap();
        store.set_entry(&single("Morocco"), "95.5").unwrap();
        store.register_variety("07020000").unwrap();
        store.set_entry(&single("Turkey"), "88.0").unwrap();
        assert_eq!(store.doc.varieties["07020000"].len(), 2);
    }

    #[test]
    fn duplicate_country_is_fatal_unless_allowlisted() {
        let tables = tables();
        let mut store = RecordStore::new(&tables, "31996R0001");
        store.register_variety("08091000").unwrap();
        store.set_entry(&single("Other origins"), "104.0").unwrap();
        assert_eq!(
            store.set_entry(&single("Other origins"), "93.3"),
            Err(ParseError::DuplicateKey {
                variety: "08091000".to_string(),
                country: "Other origins".to_string(),
            })
        );
    }

    #[test]
    fn allowlisted_duplicate_country_keeps_the_lower_price() {
        let tables = tables();
        // 32001R1366 publishes a duplicate for 999 on 08091000
        let mut store = RecordStore::new(&tables, "32001R1366");
        store.register_variety("08091000").unwrap();
        store.set_entry(&single("Other origins"), "104.0").unwrap();
        store.set_entry(&single("Other origins"), "93.3").unwrap();
        assert_eq!(store.doc.varieties["08091000"]["Other origins"], "93.3");
        store.set_entry(&single("Other origins"), "120.5").unwrap();
        assert_eq!(store.doc.varieties["08091000"]["Other origins"], "93.3");
    }

    #[test]
    fn short_variety_list_is_fatal_unless_allowlisted() {
        let tables = tables();
        let mut store = RecordStore::new(&tables, "31996R0001");
        store.register_variety("07020000").unwrap();
        assert_eq!(
            store.finalize().err(),
            Some(ParseError::ThresholdViolation { found: 1, minimum: 3 })
        );

        // 32000R0404 has only one variety but is verified valid
        let mut store = RecordStore::new(&tables, "32000R0404");
        store.register_variety("07020000").unwrap();
        assert!(store.finalize().is_ok());
    }

    #[test]
    fn entry_before_variety_is_an_error() {
        let tables = tables();
        let mut store = RecordStore::new(&tables, "31996R0001");
        assert!(matches!(
            store.set_entry(&single("Morocco"), "95.5"),
            Err(ParseError::UnresolvableCode(_))
        ));
    }
}
