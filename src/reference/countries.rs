// src/reference/countries.rs

/// One row of the country lookup table: the 2-letter code used in older
/// documents, the 3-digit geonomenclature code, and the canonical key the
/// extracted records are stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryRow {
    pub alpha2: &'static str,
    pub digit3: &'static str,
    pub key: &'static str,
}

const fn row(alpha2: &'static str, digit3: &'static str, key: &'static str) -> CountryRow {
    CountryRow { alpha2, digit3, key }
}

/// Origins appearing in the SIV regulations of the 1990s and 2000s.
pub const COUNTRIES: &[CountryRow] = &[
    row("FR", "001", "France"),
    row("NL", "003", "Netherlands"),
    row("DE", "004", "Germany"),
    row("IT", "005", "Italy"),
    row("GB", "006", "United Kingdom"),
    row("IE", "007", "Ireland"),
    row("DK", "008", "Denmark"),
    row("GR", "009", "Greece"),
    row("PT", "010", "Portugal"),
    row("ES", "011", "Spain"),
    row("CH", "039", "Switzerland"),
    row("TR", "052", "Turkey"),
    row("EE", "053", "Estonia"),
    row("LV", "054", "Latvia"),
    row("LT", "055", "Lithuania"),
    row("DD", "058", "German Democratic Republic"),
    row("PL", "060", "Poland"),
    row("CS", "061", "Czechoslovakia"),
    row("HU", "064", "Hungary"),
    row("RO", "066", "Romania"),
    row("BG", "068", "Bulgaria"),
    row("AL", "070", "Albania"),
    row("MK", "096", "North Macedonia"),
    row("MA", "204", "Morocco"),
    row("DZ", "208", "Algeria"),
    row("TN", "212", "Tunisia"),
    row("EG", "220", "Egypt"),
    row("ZA", "390", "South Africa"),
    row("US", "400", "United States"),
    row("CA", "404", "Canada"),
    row("MX", "412", "Mexico"),
    row("BR", "508", "Brazil"),
    row("CL", "512", "Chile"),
    row("UY", "524", "Uruguay"),
    row("AR", "528", "Argentina"),
    row("CY", "600", "Cyprus"),
    row("LB", "604", "Lebanon"),
    row("IL", "624", "Israel"),
    row("JO", "628", "Jordan"),
    row("AU", "800", "Australia"),
    row("NZ", "804", "New Zealand"),
    row("ZZ", "999", "Other origins"),
];

/// Reserved code for the Maghreb trade agreement: one reported value
/// covering Algeria, Morocco and Tunisia.
pub const MAGHREB_CODE: &str = "MGB";

pub const MAGHREB_MEMBERS: &[&str] = &["Algeria", "Morocco", "Tunisia"];

/// Documented transcription fix: `036` is consistently a garbled `039`.
pub const DIGIT3_TRANSCRIPTION_FIX: (&str, &str) = ("036", "039");
