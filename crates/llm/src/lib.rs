//! LLM integration crate for the LATAM Agent.
//!
//! This crate provides a provider-agnostic abstraction for the answer
//! generation call. The rest of the workspace only sees the [`LlmClient`]
//! trait, so tests can inject a stub and never touch the network.
//!
//! # Providers
//! - **OpenAI**: chat completions API (default, requires an API key)
//! - **Ollama**: local LLM runtime
//!
//! # Example
//! ```no_run
//! use latam_llm::{LlmClient, LlmRequest, providers::OllamaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new();
//! let request = LlmRequest::new("Hola", "llama3.2");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::{create_client, ClientOptions};
pub use providers::{OllamaClient, OpenAiClient};
pub use types::ProviderType;
