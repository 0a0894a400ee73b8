//! HTTP request and response bodies.

use latam_knowledge::{DataSource, Document};
use serde::{Deserialize, Serialize};

/// Minimum question length, in characters, after trimming.
pub const MIN_QUESTION_CHARS: usize = 2;

pub const RETRIEVAL_MODE: &str = "lexical";
pub const EVIDENCE_MODE: &str = "strict-context";

/// A prior conversation turn. Accepted for client compatibility; the
/// answer is built from the current question only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// The trimmed question, or a validation message.
    /// The trimmed question. The minimum length applies to the raw text.
    pub fn validated_question(&self) -> Result<&str, String> {
        if self.question.chars().count() < MIN_QUESTION_CHARS {
            return Err(format!(
                "question must have at least {} characters",
                MIN_QUESTION_CHARS
            ));
        }
        Ok(self.question.trim())
    }
}

/// Citation entry for a document used as evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceItem {
    pub id: String,
    pub title: String,
    pub topic: String,
    pub source_name: String,
    pub source_url: String,
    pub as_of_date: String,
}

impl From<&Document> for SourceItem {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            title: doc.title.clone(),
            topic: doc.topic.clone(),
            source_name: doc.source_name.clone(),
            source_url: doc.source_url.clone(),
            as_of_date: doc.as_of_date.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    pub sources: Vec<SourceItem>,
    pub country_scope: Vec<String>,
    pub data_cutoff: String,
    pub retrieval_mode: String,
    pub evidence_mode: String,
    pub llm_runtime: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub kb_items: usize,
    pub llm_enabled: bool,
    pub llm_provider: String,
    pub llm_model: String,
    pub kb_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesResponse {
    pub sources: Vec<DataSource>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(question: &str) -> ChatRequest {
        ChatRequest {
            question: question.to_string(),
            messages: Vec::new(),
        }
    }

    #[test]
    fn question_is_trimmed() {
        assert_eq!(request("  Chile?  ").validated_question(), Ok("Chile?"));
    }

    #[test]
    fn short_questions_rejected() {
        assert!(request("").validated_question().is_err());
        assert!(request("a").validated_question().is_err());
        assert!(request("é").validated_question().is_err());
        assert!(request("ok").validated_question().is_ok());
    }

    #[test]
    fn length_counts_surrounding_whitespace() {
        assert_eq!(request("  a   ").validated_question(), Ok("a"));
        assert_eq!(request(" é").validated_question(), Ok("é"));
    }

    #[test]
    fn messages_default_to_empty() {
        let req: ChatRequest = serde_json::from_str(r#"{"question": "Peru"}"#).unwrap();
        assert!(req.messages.is_empty());
    }

    #[test]
    fn source_item_copies_citation_fields() {
        let doc = Document {
            id: "ar-1".to_string(),
            title: "Inflacion".to_string(),
            topic: "economia".to_string(),
            source_name: "INDEC".to_string(),
            source_url: "https://indec.gob.ar".to_string(),
            as_of_date: "2024-06-01".to_string(),
            ..Document::default()
        };

        let item = SourceItem::from(&doc);
        assert_eq!(item.id, "ar-1");
        assert_eq!(item.source_name, "INDEC");
        assert_eq!(item.as_of_date, "2024-06-01");
    }
}
