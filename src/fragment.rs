// src/fragment.rs
use serde::{Deserialize, Serialize};

/// Bounding box of a rendered text span, in the rendering driver's
/// geometry units, plus the page the span was rendered on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub page: u32,
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Geometry {
    /// Vertical midline of the span, used for same-row tests.
    pub fn mid(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
}

/// Structural class of an HTML table cell, taken from the cell's CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassHint {
    /// `.tbl-cod` — CN code or country-code column
    Code,
    /// `.tbl-num` — numeric price column
    Num,
    /// `.tbl-txt` — free-text column (country names/codes, sometimes values)
    Text,
}

/// One atomic unit of text as exposed by the rendering collaborator.
/// PDF fragments carry `geometry`; HTML fragments carry `class_hint`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFragment {
    pub text: String,
    pub geometry: Option<Geometry>,
    pub class_hint: Option<ClassHint>,
}

impl RawFragment {
    pub fn html(text: impl Into<String>, hint: ClassHint) -> Self {
        Self {
            text: text.into(),
            geometry: None,
            class_hint: Some(hint),
        }
    }

    pub fn pdf(text: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            text: text.into(),
            geometry: Some(geometry),
            class_hint: None,
        }
    }
}

/// A `RawFragment` whose text has been through `normalize()`.
/// Geometry and class hint are carried through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFragment {
    pub text: String,
    pub geometry: Option<Geometry>,
    pub class_hint: Option<ClassHint>,
}

impl NormalizedFragment {
    pub fn from_raw(raw: &RawFragment) -> Self {
        Self {
            text: crate::normalize::normalize(&raw.text),
            geometry: raw.geometry,
            class_hint: raw.class_hint,
        }
    }
}

/// One or more adjacent PDF fragments merged into a word or phrase by the
/// span reconciler. The envelope spans all merged fragments.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedToken {
    pub text: String,
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl MergedToken {
    pub fn mid(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
}
