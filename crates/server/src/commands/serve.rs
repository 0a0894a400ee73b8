//! Serve command handler.

use crate::chat::ChatService;
use crate::server::{run_server, AppState};
use clap::Args;
use latam_core::{config::AppConfig, AppResult};

/// Run the HTTP API
#[derive(Args, Debug)]
pub struct ServeCommand {
    /// Address to listen on (overrides LATAM_BIND and the config file)
    #[arg(long)]
    pub bind: Option<String>,
}

impl ServeCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let bind_addr = self.bind.as_deref().unwrap_or(&config.bind_addr);
        tracing::info!("Executing serve command on {}", bind_addr);

        let chat = ChatService::from_config(config)?;
        let state = AppState {
            chat,
            kb_path: config.kb_path.display().to_string(),
        };

        run_server(bind_addr, state).await
    }
}
