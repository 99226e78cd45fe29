//! Query normalization
//!
//! Search text is compared in a canonical form: lower-cased, without the
//! trailing `*` wildcard some clients append, and with diacritics folded to
//! their base letters. The same folding is applied to catalog text so that
//! `Café`, `cafe` and `CAFE*` all find the same entities.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Wildcard marker that clients append to "search everything" queries
const WILDCARD: char = '*';

/// Normalize a raw client query for dispatch to the data source
pub fn normalize(raw: &str) -> String {
    let folded = fold_accents(&raw.to_lowercase());
    folded.trim_end_matches(WILDCARD).to_string()
}

/// Fold accented characters to their unaccented base form
///
/// Letters that carry a combining mark after canonical decomposition lose
/// the mark. Letters that do not decompose (`ß`, `ø`, ...) are transliterated.
pub fn fold_accents(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.nfd().filter(|c| !is_combining_mark(*c)) {
        match transliterate(c) {
            Some(replacement) => folded.push_str(replacement),
            None => folded.push(c),
        }
    }
    folded
}

fn transliterate(c: char) -> Option<&'static str> {
    let replacement = match c {
        'ß' => "ss",
        'æ' => "ae",
        'Æ' => "AE",
        'œ' => "oe",
        'Œ' => "OE",
        'ø' => "o",
        'Ø' => "O",
        'ł' => "l",
        'Ł' => "L",
        'đ' | 'ð' => "d",
        'Đ' | 'Ð' => "D",
        'þ' => "th",
        'Þ' => "TH",
        'ı' => "i",
        _ => return None,
    };
    Some(replacement)
}

/// Split normalized text into the words used for prefix matching
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_case_and_accents_converge() {
        assert_eq!(normalize("Café*"), "cafe");
        assert_eq!(normalize("cafe"), "cafe");
        assert_eq!(normalize("CAFE*"), "cafe");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in [
            "Beatles**",
            "Sigur Rós",
            "Motörhead*",
            "Ærøskøbing",
            "straße",
            "abc*\u{301}",
        ] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_only_trailing_wildcards_are_stripped() {
        assert_eq!(normalize("abc**"), "abc");
        assert_eq!(normalize("*abc"), "*abc");
        assert_eq!(normalize("*"), "");
    }

    #[test]
    fn test_wildcard_followed_by_combining_mark() {
        assert_eq!(normalize("abc*\u{301}"), "abc");
        assert_eq!(normalize("Café*\u{301}"), "cafe");
    }

    #[test]
    fn test_non_decomposable_letters() {
        assert_eq!(normalize("Straße"), "strasse");
        assert_eq!(normalize("Ærøskøbing"), "aeroskobing");
        assert_eq!(normalize("Łódź"), "lodz");
    }

    #[test]
    fn test_fold_accents_preserves_case() {
        assert_eq!(fold_accents("Beyoncé"), "Beyonce");
    }

    #[test]
    fn test_words() {
        let collected: Vec<_> = words("sgt. pepper's lonely-hearts").collect();
        assert_eq!(collected, vec!["sgt", "pepper", "s", "lonely", "hearts"]);
    }
}
