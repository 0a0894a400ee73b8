//! Ask command handler.
//!
//! Runs one question through the same pipeline as `POST /v1/chat`.

use crate::chat::ChatService;
use crate::models::{ChatRequest, ChatResponse};
use clap::Args;
use latam_core::{config::AppConfig, AppError, AppResult};

/// Ask a question about Latin America and the Caribbean
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Output the full response as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let request = ChatRequest {
            question: self.question.clone(),
            messages: Vec::new(),
        };
        let question = request.validated_question().map_err(AppError::Config)?;

        let chat = ChatService::from_config(config)?;
        let response = chat.answer(question).await;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            println!("{}", render_text(&response));
        }

        Ok(())
    }
}

/// Plain-text rendering: the answer, then the numbered sources.
fn render_text(response: &ChatResponse) -> String {
    let mut out = response.answer.clone();

    if !response.sources.is_empty() {
        out.push_str("\n\nFuentes:");
        for (i, source) in response.sources.iter().enumerate() {
            out.push_str(&format!("\n[S{}] {}", i + 1, source.title));
            if !source.source_name.is_empty() {
                out.push_str(&format!(" ({})", source.source_name));
            }
            if !source.source_url.is_empty() {
                out.push_str(&format!(" {}", source.source_url));
            }
        }
        out.push_str(&format!("\nFecha de corte: {}", response.data_cutoff));
    }

    out
}
