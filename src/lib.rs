// src/lib.rs
//! Extraction of Standard Import Value (SIV) tables from rendered EUR-Lex
//! documents. The core turns a stream of raw text fragments — HTML table
//! cells or geometry-tagged PDF text spans — into a validated
//! [`DocumentRecord`] mapping commodity codes to per-country prices.

pub mod fragment;
pub mod ingest;
pub mod normalize;
pub mod reconcile;
pub mod record;
pub mod reference;
pub mod resolve;
pub mod storage;
pub mod utils;
pub mod walkers;

pub use fragment::{ClassHint, Geometry, MergedToken, NormalizedFragment, RawFragment};
pub use record::{DocumentRecord, SivRecord};
pub use reference::ReferenceTables;
pub use utils::error::ParseError;
pub use walkers::{parse_html_document, parse_pdf_document};
