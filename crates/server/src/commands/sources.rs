//! Sources command handler.

use clap::Args;
use latam_core::{config::AppConfig, AppResult};
use latam_knowledge::{DomainTables, KnowledgeBase};

use crate::models::SourcesResponse;

/// List the distinct data sources of the knowledge base
#[derive(Args, Debug)]
pub struct SourcesCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SourcesCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing sources command");

        let knowledge =
            KnowledgeBase::load(&config.kb_path, DomainTables::from_overrides(&config.domain))?;
        let sources = knowledge.sources();

        if self.json {
            let output = SourcesResponse { sources };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        if sources.is_empty() {
            println!("No sources in {}", config.kb_path.display());
            return Ok(());
        }

        for source in &sources {
            if source.url.is_empty() {
                println!("{}  {}", source.id, source.name);
            } else {
                println!("{}  {}  {}", source.id, source.name, source.url);
            }
        }

        Ok(())
    }
}
