// src/walkers/html.rs

// --- Imports ---
use crate::fragment::{ClassHint, NormalizedFragment};
use crate::normalize::classify;
use crate::record::{DocumentRecord, RecordStore};
use crate::reference::ReferenceTables;
use crate::resolve::{CodeResolver, CountryTarget, VarietyLookup};
use crate::utils::error::ParseError;

/// Per-cell cursor: what the walker has seen since the last completed
/// (country, value) pair or variety header.
#[derive(Debug, Default)]
struct Cursor {
    raw_key: Option<String>,
    key: Option<CountryTarget>,
    value: Option<String>,
    new_variety: bool,
}

/// Walks a linear sequence of class-hinted table cells. A `code` cell is
/// either a short country head or a new variety header; values arrive in
/// `num` cells, or as the second `text` cell after a country name.
pub fn walk(
    fragments: &[NormalizedFragment],
    tables: &ReferenceTables,
    doc_id: &str,
    is_correction: bool,
) -> Result<DocumentRecord, ParseError> {
    if is_correction {
        tracing::info!(doc_id, "document amends an earlier listing, marking for manual review");
        return Err(ParseError::DocumentIsCorrection);
    }

    let resolver = CodeResolver::new(tables);
    let mut store = RecordStore::new(tables, doc_id);
    let mut cursor = Cursor::default();

    for frag in fragments {
        let txt = frag.text.as_str();
        match frag.class_hint {
            Some(ClassHint::Code) => {
                if classify(txt).is_short_code {
                    cursor.raw_key = Some(txt.to_string());
                } else {
                    // start of a new variety section
                    cursor = Cursor { new_variety: true, ..Cursor::default() };
                }
            }
            Some(ClassHint::Num) => cursor.value = Some(txt.to_string()),
            Some(ClassHint::Text) => {
                if cursor.raw_key.is_none() {
                    cursor.raw_key = Some(txt.to_string());
                } else {
                    cursor.value = Some(txt.to_string());
                }
            }
            None => {
                tracing::trace!(text = txt, "cell without class hint skipped");
                continue;
            }
        }

        if cursor.new_variety {
            match resolver.resolve_variety(txt, "")? {
                VarietyLookup::Match(variety) => {
                    tracing::debug!(doc_id, variety = %variety, "new variety section");
                    store.register_variety(&variety)?;
                    cursor.new_variety = false;
                }
                _ => {
                    return Err(ParseError::UnresolvableCode(format!(
                        "unknown variety code: {txt}"
                    )))
                }
            }
        } else if let Some(value) = cursor.value.take() {
            let key = cursor.key.take().ok_or_else(|| {
                ParseError::UnresolvableCode(format!("value {value} with no pending country"))
            })?;
            store.set_entry(&key, &value)?;
            cursor.raw_key = None;
        } else if let Some(raw) = cursor.raw_key.as_deref() {
            if cursor.key.is_none() {
                match resolver.resolve_country(raw)? {
                    Some(target) => cursor.key = Some(target),
                    None => {
                        return Err(ParseError::UnresolvableCode(format!(
                            "unknown country code: {raw}"
                        )))
                    }
                }
            }
        } else {
            return Err(ParseError::UnresolvableCode(format!(
                "cell {txt} fits no expected table position"
            )));
        }
    }

    store.finalize()
}
