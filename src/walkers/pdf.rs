// src/walkers/pdf.rs

// --- Imports ---
use crate::fragment::{MergedToken, RawFragment};
use crate::normalize::{check_date, classify, normalize};
use crate::reconcile;
use crate::record::{DocumentRecord, RecordStore};
use crate::reference::ReferenceTables;
use crate::resolve::{CodeResolver, CountryTarget, VarietyLookup};
use crate::utils::error::ParseError;

// --- Constants ---
/// A horizontal jump wider than this means the next token belongs to an
/// unrelated column; any accumulated partial code must not bridge it.
const PARTIAL_RESET_GAP: f64 = 20.0;

/// The literal heading the commodity-code column; normalization strips
/// its interior space.
const TABLE_START_SENTINEL: &str = "CNcode";

/// Strict per-document phase order of the PDF walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    SeekingDate,
    SeekingTableStart,
    Extracting,
    Done,
}

/// The walker's full state between tokens. `step` consumes a state and a
/// token and produces the next state; the walk is a fold over the stream.
#[derive(Debug, Clone)]
struct State {
    phase: Phase,
    partial: String,
    country: Option<CountryTarget>,
    seeking_value: bool,
    seeking_variety: bool,
    prev_text: String,
    last_right: Option<f64>,
}

impl State {
    fn initial() -> Self {
        Self {
            phase: Phase::SeekingDate,
            partial: String::new(),
            country: None,
            seeking_value: false,
            seeking_variety: true,
            prev_text: String::new(),
            last_right: None,
        }
    }
}

/// Walks a PDF document: reconcile the raw spans into reading order, find
/// the journal date, find the top of the SIV table, then extract
/// (variety, country, value) triples until the stream or the table ends.
pub fn walk(
    fragments: &[RawFragment],
    tables: &ReferenceTables,
    doc_id: &str,
) -> Result<DocumentRecord, ParseError> {
    let tokens = reconcile::reconcile(fragments, tables)?;
    tracing::debug!(doc_id, tokens = tokens.len(), "reconciled PDF spans");

    let resolver = CodeResolver::new(tables);
    let mut store = RecordStore::new(tables, doc_id);
    let mut state = State::initial();

    for token in &tokens {
        state = step(state, token, &resolver, &mut store)?;
        if state.phase == Phase::Done {
            break;
        }
    }

    match state.phase {
        Phase::SeekingDate => Err(ParseError::MissingDate),
        Phase::SeekingTableStart => Err(ParseError::MissingTableStart),
        _ => store.finalize(),
    }
}

fn step(
    mut state: State,
    token: &MergedToken,
    resolver: &CodeResolver<'_>,
    store: &mut RecordStore<'_>,
) -> Result<State, ParseError> {
    let txt = normalize(&token.text);
    match state.phase {
        Phase::SeekingDate => {
            // everything before the journal date is masthead noise
            if let Some(date) = check_date(&txt) {
                tracing::debug!(date = %date, "journal date found");
                store.set_journal_date(date);
                state.phase = Phase::SeekingTableStart;
            }
        }
        Phase::SeekingTableStart => {
            // the header may be split across two tokens
            let spanning = format!("{}{}", state.prev_text, txt);
            if txt.eq_ignore_ascii_case(TABLE_START_SENTINEL)
                || spanning.eq_ignore_ascii_case(TABLE_START_SENTINEL)
            {
                tracing::debug!("start of SIV table found");
                state.phase = Phase::Extracting;
            }
        }
        Phase::Extracting => {
            if let Some(last_right) = state.last_right {
                if last_right + PARTIAL_RESET_GAP < token.left {
                    state.partial.clear();
                }
            }
            if txt.to_ascii_lowercase().contains("nomenclature") {
                // footnote text marking the end of the table
                state.phase = Phase::Done;
            } else {
                extract(&mut state, &txt, resolver, store)?;
            }
        }
        Phase::Done => {}
    }
    state.prev_text = txt;
    state.last_right = Some(token.right);
    Ok(state)
}

fn extract(
    state: &mut State,
    txt: &str,
    resolver: &CodeResolver<'_>,
    store: &mut RecordStore<'_>,
) -> Result<(), ParseError> {
    if state.seeking_value && classify(txt).looks_numeric {
        if let Some(country) = state.country.take() {
            store.set_entry(&country, txt)?;
            state.seeking_value = false;
            state.seeking_variety = true;
            return Ok(());
        }
    }

    if store.has_open_variety() && state.country.is_none() {
        let candidate = format!("{}{}", state.partial, txt);
        if let Some(target) = resolver.resolve_country(&candidate)? {
            tracing::trace!(country = ?target, "country head resolved");
            state.partial.clear();
            state.country = Some(target);
            state.seeking_value = true;
        }
    }

    if state.seeking_variety && state.country.is_none() {
        match resolver.resolve_variety(txt, &state.partial)? {
            VarietyLookup::Match(variety) => {
                tracing::debug!(variety = %variety, "variety record opened");
                state.partial.clear();
                store.register_variety(&variety)?;
                state.seeking_variety = false;
            }
            VarietyLookup::Buffered(partial) => state.partial = partial,
            VarietyLookup::Discarded => state.partial.clear(),
            VarietyLookup::NoMatch => {}
        }
    }
    Ok(())
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::Geometry;

    // lays tokens out on consecutive rows, one token per row, so that no
    // neighbor merging interferes with the token stream under test
    fn rows(texts: &[&str]) -> Vec<RawFragment> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let top = 10.0 + 20.0 * i as f64;
                RawFragment::pdf(
                    *text,
                    Geometry { page: 1, top, left: 10.0, bottom: top + 8.0, right: 60.0 },
                )
            })
            .collect()
    }

    fn permissive_tables() -> ReferenceTables {
        let mut tables = ReferenceTables::builtin().unwrap();
        tables.min_varieties = 1;
        tables
    }

    #[test]
    fn full_document_walk() {
        let tables = permissive_tables();
        let frags = rows(&[
            "Commission Regulation (EC)",
            "15. 3.96",
            "CN code",
            "08055010",
            "FR",
            "95,5",
            "nomenclature of the goods",
        ]);
        let doc = walk(&frags, &tables, "31996R0500").unwrap();
        assert_eq!(doc.journal_date.as_deref(), Some("15/3/1996"));
        assert_eq!(doc.varieties["08055010"]["France"], "95.5");
    }

    #[test]
    fn tokens_before_the_date_are_ignored() {
        let tables = permissive_tables();
        let frags = rows(&[
            "08055010", // looks like a variety but the table has not started
            "1.2.97",
            "CN code",
            "08055010",
            "204",
            "61,0",
        ]);
        let doc = walk(&frags, &tables, "31997R0001").unwrap();
        assert_eq!(doc.journal_date.as_deref(), Some("1/2/1997"));
        assert_eq!(doc.varieties["08055010"]["Morocco"], "61.0");
    }

    #[test]
    fn missing_date_is_fatal() {
        let tables = permissive_tables();
        let frags = rows(&["CN code", "08055010", "FR", "95,5"]);
        assert_eq!(
            walk(&frags, &tables, "31996R0500").err(),
            Some(ParseError::MissingDate)
        );
    }

    #[test]
    fn missing_table_start_is_fatal() {
        let tables = permissive_tables();
        let frags = rows(&["15. 3.96", "08055010", "FR", "95,5"]);
        assert_eq!(
            walk(&frags, &tables, "31996R0500").err(),
            Some(ParseError::MissingTableStart)
        );
    }

    #[test]
    fn table_header_split_across_two_tokens_is_found() {
        let tables = permissive_tables();
        let frags = rows(&["15. 3.96", "CN", "code", "08055010", "FR", "95,5"]);
        let doc = walk(&frags, &tables, "31996R0500").unwrap();
        assert_eq!(doc.varieties["08055010"]["France"], "95.5");
    }

    #[test]
    fn variety_code_split_across_tokens_resolves() {
        let tables = permissive_tables();
        let mut frags = rows(&["15. 3.96", "CN code"]);
        // two halves of one composite code, adjacent on the same row but
        // too far apart to merge into a single token
        frags.push(RawFragment::pdf(
            "08092041.0809",
            Geometry { page: 1, top: 100.0, left: 10.0, bottom: 108.0, right: 60.0 },
        ));
        frags.push(RawFragment::pdf(
            "2049",
            Geometry { page: 1, top: 100.0, left: 70.0, bottom: 108.0, right: 90.0 },
        ));
        frags.extend(rows(&["624", "87,1"]).into_iter().map(|mut f| {
            if let Some(g) = f.geometry.as_mut() {
                g.top += 110.0;
                g.bottom += 110.0;
            }
            f
        }));
        let doc = walk(&frags, &tables, "31996R0500").unwrap();
        assert_eq!(doc.varieties["08092041.08092049"]["Israel"], "87.1");
    }

    #[test]
    fn wide_gap_resets_the_partial_buffer() {
        let tables = permissive_tables();
        let mut frags = rows(&["15. 3.96", "CN code"]);
        frags.push(RawFragment::pdf(
            "08092041.0809", // head of a composite, then the table jumps columns
            Geometry { page: 1, top: 100.0, left: 10.0, bottom: 108.0, right: 60.0 },
        ));
        frags.push(RawFragment::pdf(
            "08055010",
            Geometry { page: 1, top: 100.0, left: 200.0, bottom: 108.0, right: 260.0 },
        ));
        frags.extend(rows(&["FR", "95,5"]).into_iter().map(|mut f| {
            if let Some(g) = f.geometry.as_mut() {
                g.top += 110.0;
                g.bottom += 110.0;
                g.left += 200.0;
                g.right += 200.0;
            }
            f
        }));
        let doc = walk(&frags, &tables, "31996R0500").unwrap();
        assert_eq!(doc.varieties.len(), 1);
        assert_eq!(doc.varieties["08055010"]["France"], "95.5");
    }

    #[test]
    fn dates_inside_the_table_are_benign() {
        let tables = permissive_tables();
        let frags = rows(&[
            "15. 3.96",
            "CN code",
            "08055010",
            "20.3.96", // validity date column
            "FR",
            "95,5",
        ]);
        let doc = walk(&frags, &tables, "31996R0500").unwrap();
        assert_eq!(doc.varieties["08055010"]["France"], "95.5");
    }

    #[test]
    fn duplicate_country_follows_the_allow_list() {
        let tables = permissive_tables();
        let body = [
            "15. 3.96",
            "CN code",
            "08091000",
            "999",
            "104,0",
            "999",
            "93,3",
        ];

        // 32001R1366 publishes 999 twice on 08091000 and is allow-listed
        let frags = rows(&body);
        let doc = walk(&frags, &tables, "32001R1366").unwrap();
        assert_eq!(doc.varieties["08091000"]["Other origins"], "93.3");

        assert_eq!(
            walk(&frags, &tables, "31996R0500").err(),
            Some(ParseError::DuplicateKey {
                variety: "08091000".to_string(),
                country: "Other origins".to_string(),
            })
        );
    }

    #[test]
    fn extraction_stops_at_the_nomenclature_footnote() {
        let tables = permissive_tables();
        let frags = rows(&[
            "15. 3.96",
            "CN code",
            "08055010",
            "FR",
            "95,5",
            "nomenclature",
            "08053010", // past the sentinel, must not be parsed
            "TR",
            "47,4",
        ]);
        let doc = walk(&frags, &tables, "31996R0500").unwrap();
        assert_eq!(doc.varieties.len(), 1);
    }

    #[test]
    fn threshold_violation_on_short_documents() {
        let tables = ReferenceTables::builtin().unwrap();
        let frags = rows(&["15. 3.96", "CN code", "08055010", "FR", "95,5"]);
        assert_eq!(
            walk(&frags, &tables, "31996R0500").err(),
            Some(ParseError::ThresholdViolation { found: 1, minimum: 3 })
        );
    }
}
