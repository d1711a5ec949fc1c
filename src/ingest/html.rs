// src/ingest/html.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::fragment::{ClassHint, RawFragment};
use crate::utils::error::IngestError;

// --- CSS Selectors (Lazy Static) ---
// The three table-cell classes carrying SIV data on EUR-Lex HTML pages.
static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".tbl-cod, .tbl-num, .tbl-txt").expect("Failed to compile CELL_SELECTOR")
});

static DATE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".hd-date").expect("Failed to compile DATE_SELECTOR"));

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".doc-ti").expect("Failed to compile TITLE_SELECTOR"));

// --- Regex Patterns (Lazy Static) ---
// Titles of documents that amend or correct an earlier SIV listing.
static CORRECTION_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(amending|correcting|corrigendum)\b")
        .expect("Failed to compile CORRECTION_TITLE_RE")
});

/// Everything the binary needs from one saved HTML document page.
#[derive(Debug)]
pub struct HtmlDocument {
    pub fragments: Vec<RawFragment>,
    pub journal_date: Option<String>,
    /// Title heuristic: the document amends an earlier listing and should
    /// go to manual review instead of being parsed.
    pub is_correction: bool,
}

/// Extracts the SIV table cells, the journal date and the correction flag
/// from a saved EUR-Lex HTML page.
pub fn ingest_html(html: &str) -> Result<HtmlDocument, IngestError> {
    let document = Html::parse_document(html);

    let mut fragments = Vec::new();
    for element in document.select(&CELL_SELECTOR) {
        if let Some(hint) = class_hint(&element) {
            fragments.push(RawFragment::html(element_text(&element), hint));
        }
    }
    if fragments.is_empty() {
        return Err(IngestError::NoCells);
    }

    let journal_date = document.select(&DATE_SELECTOR).next().map(|el| {
        element_text(&el)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .replace('.', "/")
    });

    let title = document
        .select(&TITLE_SELECTOR)
        .map(|el| element_text(&el))
        .collect::<Vec<_>>()
        .join(" ");
    let is_correction = CORRECTION_TITLE_RE.is_match(&title);

    tracing::debug!(
        cells = fragments.len(),
        date = journal_date.as_deref().unwrap_or("-"),
        is_correction,
        "HTML document ingested"
    );
    Ok(HtmlDocument { fragments, journal_date, is_correction })
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn class_hint(element: &ElementRef<'_>) -> Option<ClassHint> {
    for class in element.value().classes() {
        match class {
            "tbl-cod" => return Some(ClassHint::Code),
            "tbl-num" => return Some(ClassHint::Num),
            "tbl-txt" => return Some(ClassHint::Text),
            _ => {}
        }
    }
    None
}
