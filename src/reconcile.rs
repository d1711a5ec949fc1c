// src/reconcile.rs

// --- Imports ---
use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::fragment::{MergedToken, RawFragment};
use crate::normalize::normalize;
use crate::reference::ReferenceTables;
use crate::utils::error::ParseError;

// --- Constants ---
/// Spans whose tops are within this band belong to the same text row.
pub const ROW_TOLERANCE: f64 = 7.4;
/// Horizontal gap band within which adjacent spans are glued with no separator.
pub const SMALL_GAP: f64 = 1.2;
/// Horizontal gap band within which adjacent spans are joined with a space.
pub const WORD_GAP: f64 = 7.2;

// --- Regex Patterns (Lazy Static) ---
// The currency-per-quantity column header; an even count on one page means
// the table is laid out in two columns.
static UNIT_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\(?\s*(ecu|eur)\s*/\s*100\s*kg\s*\)?")
        .expect("Failed to compile UNIT_HEADER_RE")
});

/// Reorders geometry-tagged fragments into reading order, merges adjacent
/// fragments into words and phrases, and splits two-column pages. Pages are
/// processed independently and concatenated in page order.
pub fn reconcile(
    fragments: &[RawFragment],
    tables: &ReferenceTables,
) -> Result<Vec<MergedToken>, ParseError> {
    let mut pages: BTreeMap<u32, Vec<MergedToken>> = BTreeMap::new();
    for frag in fragments {
        let geom = match frag.geometry {
            Some(g) => g,
            None => {
                tracing::warn!(text = %frag.text, "PDF fragment without geometry dropped");
                continue;
            }
        };
        pages.entry(geom.page).or_default().push(MergedToken {
            text: frag.text.clone(),
            top: geom.top,
            left: geom.left,
            bottom: geom.bottom,
            right: geom.right,
        });
    }

    let mut out = Vec::new();
    for (page, spans) in pages {
        tracing::trace!(page, spans = spans.len(), "reconciling page");
        out.extend(reconcile_page(spans, tables)?);
    }
    Ok(out)
}

fn reconcile_page(
    spans: Vec<MergedToken>,
    tables: &ReferenceTables,
) -> Result<Vec<MergedToken>, ParseError> {
    let sorted = reading_order(spans);
    let kept: Vec<MergedToken> = sorted
        .into_iter()
        .filter(|s| {
            let norm = normalize(&s.text);
            !norm.is_empty() && !tables.is_noise(&norm)
        })
        .collect();
    let merged = merge_neighbors(kept);
    split_columns(merged)
}

/// Sorts spans into reading order: rows are clustered by vertical
/// proximity, rows run top-to-bottom, spans within a row left-to-right.
fn reading_order(mut spans: Vec<MergedToken>) -> Vec<MergedToken> {
    spans.sort_by(|a, b| a.top.total_cmp(&b.top));
    let mut out: Vec<MergedToken> = Vec::with_capacity(spans.len());
    let mut row: Vec<MergedToken> = Vec::new();
    let mut row_top = f64::NEG_INFINITY;
    for span in spans {
        if !row.is_empty() && span.top - row_top > ROW_TOLERANCE {
            row.sort_by(|a, b| a.left.total_cmp(&b.left));
            out.append(&mut row);
        }
        if row.is_empty() {
            row_top = span.top;
        }
        row.push(span);
    }
    row.sort_by(|a, b| a.left.total_cmp(&b.left));
    out.append(&mut row);
    out
}

/// Glues each span onto the previous output token when the horizontal gap
/// and vertical overlap say they form one word (no separator) or one
/// phrase (single space); otherwise starts a new token.
fn merge_neighbors(spans: Vec<MergedToken>) -> Vec<MergedToken> {
    let mut out: Vec<MergedToken> = Vec::with_capacity(spans.len());
    let mut previous: Option<MergedToken> = None;
    for span in spans {
        let joint = previous.as_ref().and_then(|prev| {
            let same_row = span.top < prev.mid() && span.bottom > prev.mid();
            if !same_row || span.left <= prev.right - SMALL_GAP {
                None
            } else if span.left < prev.right + SMALL_GAP {
                Some("")
            } else if span.left < prev.right + WORD_GAP {
                Some(" ")
            } else {
                None
            }
        });
        match (joint, out.last_mut()) {
            (Some(sep), Some(last)) => {
                last.text.push_str(sep);
                last.text.push_str(&span.text);
                last.right = span.right;
            }
            _ => out.push(span.clone()),
        }
        previous = Some(span);
    }
    out
}

/// Detects a two-column page layout from the count of unit-header tokens.
/// An even, nonzero count splits the page at the right column's header
/// edge; an odd count is a layout this reconciler does not understand.
fn split_columns(merged: Vec<MergedToken>) -> Result<Vec<MergedToken>, ParseError> {
    let mut header_lefts: Vec<f64> = merged
        .iter()
        .filter(|t| UNIT_HEADER_RE.is_match(&t.text))
        .map(|t| t.left)
        .collect();
    if header_lefts.is_empty() {
        return Ok(merged);
    }
    if header_lefts.len() % 2 != 0 {
        tracing::warn!(headers = header_lefts.len(), "odd unit-header count");
        return Err(ParseError::UnsupportedColumnLayout);
    }
    header_lefts.sort_by(f64::total_cmp);
    let boundary = header_lefts[header_lefts.len() / 2];

    let (left, right): (Vec<MergedToken>, Vec<MergedToken>) = merged
        .into_iter()
        .partition(|t| t.left < boundary - SMALL_GAP);
    tracing::debug!(left = left.len(), right = right.len(), "two-column page split");
    let mut out = reading_order(left);
    out.extend(reading_order(right));
    Ok(out)
}
