// src/normalize.rs

// --- Known OCR transcription garbage ---
// Literal substrings observed in rendered documents, each standing for the
// value on the right. Applied once per input, before the generic cleanup.
const LITERAL_FIXUPS: &[(&str, &str)] = &[
    ("134,7 ,", "134.7"),
    ("5.5,1", "55.1"),
    ("69f 9", "69.9"),
    ("77?", "77,9"),
    ("77\u{03b2}", "77,9"),
    ("55,6.", "55.6"),
    ("1ob,U", "186.0"),
    ("MZ", "512"),
    ("U/ UZUU3i", "07020035"),
    ("Ujz", "052"),
    ("4Z,4\u{00ad}", "47.4"),
    ("u7p", "119.8"),
    ("106 , S", "106.8"),
    ("55, S", "55.8"),
    ("0S8", "068"),
    ("57?", "57.9"),
    ("sip", "51.9"),
    ("54,8 .", "54.8"),
    ("61)0", "61.0"),
    ("87,1 ,", "87.1"),
    ("69 'j", "69.1"),
    ("53 8", "53.8"),
];

/// Cleans one raw text fragment: known-garble substitution, whitespace
/// removal, decimal-separator unification, script-confusable substitution,
/// and removal of non-ASCII remnants. Idempotent.
pub fn normalize(text: &str) -> String {
    let mut txt = text.to_string();
    for (from, to) in LITERAL_FIXUPS {
        txt = txt.replacen(from, to, 1);
    }
    // Greek Mu-Kappa rendered in place of Latin MK
    txt = txt.replace("\u{039c}\u{039a}", "MK");
    txt = txt.replace('\u{2018}', "");
    if txt.starts_with(". ") {
        txt.drain(..2);
    }
    txt.retain(|c| !c.is_whitespace());
    txt = txt.replace('>', ".").replace(',', ".");
    while txt.contains("..") {
        txt = txt.replace("..", ".");
    }
    txt = txt.replace('\u{00df}', ".9");
    txt = txt.replace('-', "");
    txt.retain(|c| c.is_ascii());
    txt
}

/// Pure shape classification of a normalized fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Two or three characters: could be a country code rather than a CN code.
    pub is_short_code: bool,
    pub looks_numeric: bool,
    pub looks_date_shaped: bool,
}

pub fn classify(text: &str) -> Classification {
    Classification {
        is_short_code: text.len() == 2 || text.len() == 3,
        looks_numeric: !text.is_empty() && text.parse::<f64>().is_ok(),
        looks_date_shaped: check_date(text).is_some(),
    }
}

/// Strips a normalized fragment down to digits and periods, the alphabet of
/// CN codes. Used for partial commodity-code accumulation.
pub fn trim_to_code_chars(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect()
}

/// Looks for a journal date in the form D.M.Y (already whitespace-free).
/// Day must be <= 31, month <= 12, and the year either a two-digit value
/// >= 57 (expanded to 19xx) or a four-digit value >= 1957. Returns the
/// canonical `d/m/yyyy` rendering on a match.
pub fn check_date(text: &str) -> Option<String> {
    let parts: Vec<&str> = text.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let mut nums = [0u32; 3];
    for (i, p) in parts.iter().enumerate() {
        if p.is_empty() || !p.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        nums[i] = p.parse().ok()?;
        if nums[i] == 0 {
            return None;
        }
    }
    let (day, month, year) = (nums[0], nums[1], nums[2]);
    if day > 31 || month > 12 {
        return None;
    }
    let year = match year {
        57..=99 => 1900 + year,
        y if y >= 1957 && y <= 9999 => y,
        _ => return None,
    };
    Some(format!("{}/{}/{}", day, month, year))
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_unifies_separators() {
        assert_eq!(normalize("95,5"), "95.5");
        assert_eq!(normalize("15. 3.96"), "15.3.96");
        assert_eq!(normalize("08052030 . 08052050"), "08052030.08052050");
    }

    #[test]
    fn normalize_fixes_known_garbles() {
        assert_eq!(normalize("77?"), "77.9");
        assert_eq!(normalize("1ob,U"), "186.0");
        assert_eq!(normalize("\u{039c}\u{039a}"), "MK");
        assert_eq!(normalize("53 8"), "53.8");
    }

    #[test]
    fn normalize_strips_non_ascii() {
        assert_eq!(normalize("95\u{00bb}.5"), "95.5");
        assert_eq!(normalize("4Z,4\u{00ad}"), "47.4");
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "95,5", "15. 3.96", "77?", "1ob,U", "MZ", "08052030 . 08052050",
            "4Z,4\u{00ad}", "61)0", "CN code", "nomenclature", "",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn classify_shapes() {
        assert!(classify("FR").is_short_code);
        assert!(classify("052").is_short_code);
        assert!(!classify("08052070").is_short_code);
        assert!(classify("95.5").looks_numeric);
        assert!(!classify("CNcode").looks_numeric);
        assert!(classify("31.12.96").looks_date_shaped);
    }

    #[test]
    fn trims_to_code_alphabet() {
        assert_eq!(trim_to_code_chars("Of081092.0808"), "081092.0808");
        assert_eq!(trim_to_code_chars("FR"), "");
    }

    #[test]
    fn date_check_accepts_plausible_journal_dates() {
        assert_eq!(check_date("31.12.96"), Some("31/12/1996".to_string()));
        assert_eq!(check_date("15.3.96"), Some("15/3/1996".to_string()));
        assert_eq!(check_date("1.1.1997"), Some("1/1/1997".to_string()));
    }

    #[test]
    fn date_check_rejects_implausible_shapes() {
        assert_eq!(check_date("31.12.40"), None); // ambiguous two-digit year
        assert_eq!(check_date("32.1.96"), None);
        assert_eq!(check_date("1.13.96"), None);
        assert_eq!(check_date("31.12"), None);
        assert_eq!(check_date("a.b.c"), None);
        assert_eq!(check_date("1.1.1900"), None);
        assert_eq!(check_date("0.1.96"), None);
    }
}
