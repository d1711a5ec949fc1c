// src/reference/corrections.rs

/// Known garbled variety codes and the text they should have read as.
/// Keyed on the normalized fragment (or buffered-plus-fragment) text.
pub const TRANSCRIPTION_ERRORS: &[(&str, &str)] = &[
    ("080903", "080930"),
    ("08089100", "07099100"),
    ("07071000", "07091000"),
    ("08052030.08052050.08052070.", "08052030.08052050.08052070.08052090"),
    ("07029070", "07020000"),
    ("308081020.08081050.08081090", "08081020.08081050.08081090"),
    ("07020005", "07070005"),
    ("8052011", "08052011"),
    (")92041.0809", "08092041.0809"),
    (")92041.08092049", "08092041.08092049"),
    ("193031.0809", "08093031.0809"),
    ("193031.08093039", "08093031.08093039"),
    ("0702015", "07020015"),
    ("0707001.0", "07070010"),
    ("07099073.", "07099073"),
    ("080810.51.08081053.", "08081051.08081053."),
    ("080810.51.08081053.08081059", "08081051.08081053.08081059"),
    ("080.51001.0805", "08051001.0805"),
    ("080.51001.08051005.", "08051001.08051005."),
    ("080.51001.08051005.08051009", "08051001.08051005.08051009"),
    ("08081092.0808109408081098", "08081092.08081094.08081098"),
    ("Of081092.0808", "08081092.0808"),
    ("Of081092.08081094.", "08081092.08081094."),
    ("Of081092.08081094.08081098", "08081092.08081094.08081098"),
];

/// Trailing remnants of a variety definition continued from a previous
/// line; matched text is consumed without buffering.
pub const IGNORE_CONTINUATIONS: &[&str] = &[
    "08052070.08052090",
    "08052090",
    "08081092.08081094.212",
];

/// Documents known to publish the same country twice within one variety;
/// the lower of the two prices is kept.
pub const KNOWN_DUPLICATE_COUNTRY: &[&str] = &["32001R1366", "31997R1887"];

/// Documents with a suspiciously short but verified-valid variety list.
pub const DONT_IGNORE: &[&str] = &[
    "32000R0404",
    "32000R0162",
    "31995R0030",
    "31995R0027",
    "31995R0026",
    "31995R0015",
    "31995R0005",
    "31995R0004",
];

/// Documents defining one variety across multiple disjoint table sections;
/// re-registering the variety reuses the existing record.
pub const MULTI_SECTION_DOCS: &[&str] = &[
    "31995R0063",
    "31995R0055",
    "31995R0045",
    "31995R0039",
    "31995R0030",
    "31995R0027",
    "31995R0026",
    "31995R0015",
    "31995R0005",
    "31995R0004",
];

/// Isolated characters the OCR scatters over the page; dropped before
/// span merging.
pub const FILTERED_NOISE: &[&str] = &["I", "II", "l", "j", "\\", "-", "\u{00bb}", "'"];
