//! Text normalization and tokenization.
//!
//! Every comparison in the retrieval core happens on normalized text: NFKD
//! decomposed, stripped to ASCII, lowercased and trimmed.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Spanish function words never used as query terms.
pub const STOPWORDS: [&str; 15] = [
    "de", "la", "el", "los", "las", "y", "o", "en", "del", "por", "para", "con", "que", "cual",
    "cuál",
];

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-z0-9]{3,}").expect("token regex must compile"))
}

/// Fold diacritics, case and surrounding whitespace.
///
/// Non-ASCII code points that do not decompose to ASCII are dropped.
///
/// ```
/// use latam_knowledge::normalize::normalize;
///
/// assert_eq!(normalize("  México "), "mexico");
/// ```
pub fn normalize(text: &str) -> String {
    let folded: String = text.nfkd().filter(char::is_ascii).collect();
    folded.to_ascii_lowercase().trim().to_string()
}

/// Extract significant terms: runs of at least three ASCII alphanumerics
/// from the normalized text, minus stopwords.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    token_re()
        .find_iter(&normalized)
        .map(|m| m.as_str())
        .filter(|token| !STOPWORDS.contains(token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_folds_diacritics() {
        assert_eq!(normalize("México"), "mexico");
        assert_eq!(normalize("México"), normalize("mexico"));
        assert_eq!(normalize("Perú"), "peru");
        assert_eq!(normalize("Año Económico"), "ano economico");
    }

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Inflación EN Chile\n"), "inflacion en chile");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_normalize_drops_non_decomposable() {
        assert_eq!(normalize("¿Qué?"), "que?");
        assert_eq!(normalize("日本"), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "¿Cuál es la inflación en Argentina?",
            "  São Paulo  ",
            "Ñandú ÀÉÎÕÜ",
            "ﬁnanzas ① ²",
            "mixed\tWhite   space ",
            "",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_tokenize_keeps_significant_terms() {
        assert_eq!(tokenize("de la casa"), vec!["casa"]);
        assert_eq!(
            tokenize("¿Cuál es la inflación en Argentina?"),
            vec!["inflacion", "argentina"]
        );
    }

    #[test]
    fn test_tokenize_splits_on_punctuation_and_length() {
        assert_eq!(tokenize("PIB-2024, tasa: 3.5%"), vec!["pib", "2024", "tasa"]);
        assert!(tokenize("a ab 12").is_empty());
    }

    #[test]
    fn test_tokenize_stopwords_only_is_empty() {
        let all = STOPWORDS.join(" ");
        assert!(tokenize(&all).is_empty());
        assert!(tokenize("para con que del por Cuál los las").is_empty());
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokenize("").is_empty());
    }
}
