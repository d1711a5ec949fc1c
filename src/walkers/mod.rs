// src/walkers/mod.rs
pub mod html;
pub mod pdf;

use crate::fragment::{NormalizedFragment, RawFragment};
use crate::record::DocumentRecord;
use crate::reference::ReferenceTables;
use crate::utils::error::ParseError;

/// Parses an HTML-table document from its class-hinted cell fragments.
/// `is_correction` is the caller's title heuristic: corrections of earlier
/// SIV listings are routed to manual review, not parsed.
pub fn parse_html_document(
    fragments: &[NormalizedFragment],
    tables: &ReferenceTables,
    doc_id: &str,
    is_correction: bool,
) -> Result<DocumentRecord, ParseError> {
    html::walk(fragments, tables, doc_id, is_correction)
}

/// Parses a PDF document from its geometry-tagged text fragments.
pub fn parse_pdf_document(
    fragments: &[RawFragment],
    tables: &ReferenceTables,
    doc_id: &str,
) -> Result<DocumentRecord, ParseError> {
    pdf::walk(fragments, tables, doc_id)
}
