// src/ingest/mod.rs
pub mod html;
pub mod pdf;

pub use html::{ingest_html, HtmlDocument};
pub use pdf::ingest_span_dump;
