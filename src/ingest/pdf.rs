// src/ingest/pdf.rs

// --- Imports ---
use serde::Deserialize;

use crate::fragment::{Geometry, RawFragment};
use crate::utils::error::IngestError;

/// One rendered text-layer span as dumped by the rendering driver.
#[derive(Debug, Deserialize)]
pub struct SpanDump {
    pub page: u32,
    pub text: String,
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

/// Deserializes a JSON span dump into geometry-tagged fragments.
pub fn ingest_span_dump(json: &str) -> Result<Vec<RawFragment>, IngestError> {
    let spans: Vec<SpanDump> = serde_json::from_str(json)?;
    tracing::debug!(spans = spans.len(), "span dump ingested");
    Ok(spans
        .into_iter()
        .map(|s| {
            RawFragment::pdf(
                s.text,
                Geometry {
                    page: s.page,
                    top: s.top,
                    left: s.left,
                    bottom: s.bottom,
                    right: s.right,
                },
            )
        })
        .collect())
}
