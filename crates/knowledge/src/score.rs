//! Lexical relevance scoring.
//!
//! Scores are additive integers with no length normalization:
//! - [`TOKEN_MATCH_WEIGHT`] per distinct question token found in the document
//! - [`TOPIC_MATCH_WEIGHT`] per topic triggered by the question that the
//!   document's topic contains
//! - [`COUNTRY_MATCH_WEIGHT`] once if a requested country is a document country

use crate::domain::DomainTables;
use crate::normalize::{normalize, tokenize};
use crate::scope::detect_in_normalized;
use crate::types::Document;

pub const TOKEN_MATCH_WEIGHT: u32 = 2;
pub const TOPIC_MATCH_WEIGHT: u32 = 4;
pub const COUNTRY_MATCH_WEIGHT: u32 = 6;

/// Normalized title, content, topic, countries and tags joined by spaces.
pub fn searchable_text(doc: &Document) -> String {
    let countries = doc.country.join(" ");
    let tags = doc.tags.join(" ");
    normalize(&format!(
        "{} {} {} {} {}",
        doc.title, doc.content, doc.topic, countries, tags
    ))
}

/// Everything derived from the question that scoring needs, computed once
/// per retrieval instead of once per document.
#[derive(Debug, Clone)]
pub struct QueryProfile<'t> {
    tokens: Vec<String>,
    countries: Vec<String>,
    topics: Vec<&'t str>,
}

impl<'t> QueryProfile<'t> {
    pub fn new(question: &str, tables: &'t DomainTables) -> Self {
        let text = normalize(question);

        let mut tokens: Vec<String> = Vec::new();
        for token in tokenize(question) {
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }

        let topics = tables
            .topics
            .iter()
            .filter(|rule| rule.keywords.iter().any(|k| text.contains(k.as_str())))
            .map(|rule| rule.topic.as_str())
            .collect();

        Self {
            tokens,
            countries: detect_in_normalized(&text, &tables.countries),
            topics,
        }
    }

    /// Distinct question tokens in first-occurrence order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Countries detected in the question.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Topic names whose keywords appear in the question.
    pub fn topics(&self) -> &[&'t str] {
        &self.topics
    }

    pub fn score(&self, doc: &Document) -> u32 {
        let mut score = 0;

        let doc_text = searchable_text(doc);
        let token_hits = self
            .tokens
            .iter()
            .filter(|token| doc_text.contains(token.as_str()))
            .count() as u32;
        score += token_hits * TOKEN_MATCH_WEIGHT;

        if !self.topics.is_empty() {
            let doc_topic = normalize(&doc.topic);
            let topic_hits = self
                .topics
                .iter()
                .filter(|topic| doc_topic.contains(**topic))
                .count() as u32;
            score += topic_hits * TOPIC_MATCH_WEIGHT;
        }

        if !self.countries.is_empty() {
            let doc_countries: Vec<String> = doc.country.iter().map(|c| normalize(c)).collect();
            if self.countries.iter().any(|c| doc_countries.contains(c)) {
                score += COUNTRY_MATCH_WEIGHT;
            }
        }

        score
    }
}

/// Score one document against a question.
pub fn score_document(question: &str, doc: &Document, tables: &DomainTables) -> u32 {
    QueryProfile::new(question, tables).score(doc)
}
