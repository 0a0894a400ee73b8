//! Output filter for generated answers.
//!
//! Provider and model names are rewritten to a neutral self-reference so
//! answers never leak which backend produced them.

use regex::Regex;
use std::sync::OnceLock;

const REPLACEMENT: &str = "este asistente";

fn vendor_terms() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(chatgpt|openai|gpt-?\d*|api)\b").expect("valid vendor term regex")
    })
}

/// Rewrite vendor terms line by line, then trim the result.
pub fn sanitize_answer(text: &str) -> String {
    let re = vendor_terms();
    text.lines()
        .map(|line| re.replace_all(line, REPLACEMENT))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_vendor_terms() {
        let out = sanitize_answer("Segun OpenAI y la API de GPT-4, ChatGPT dice algo.");
        assert_eq!(
            out,
            "Segun este asistente y la este asistente de este asistente, este asistente dice algo."
        );
    }

    #[test]
    fn leaves_words_containing_terms() {
        let text = "La apicultura y la capital crecen.";
        assert_eq!(sanitize_answer(text), text);
    }

    #[test]
    fn matches_gpt_without_hyphen() {
        assert_eq!(sanitize_answer("gpt4o no, gpt4 si"), "gpt4o no, este asistente si");
    }

    #[test]
    fn preserves_lines_and_trims() {
        let out = sanitize_answer("\n- Dato uno [S1]\r\n- Dato dos via api [S2]\n\n");
        assert_eq!(out, "- Dato uno [S1]\n- Dato dos via este asistente [S2]");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(sanitize_answer(""), "");
        assert_eq!(sanitize_answer("   \n  "), "");
    }
}
