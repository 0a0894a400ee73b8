//! Prompt system for the LATAM Agent.
//!
//! This crate provides structured prompt management with:
//! - YAML-based prompt definitions (with an embedded answer prompt)
//! - Handlebars template rendering

pub mod builder;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::{build_answer_prompt, build_prompt};
pub use loader::{embedded_answer_prompt, load_answer_prompt, load_prompt, ANSWER_PROMPT_ID};
pub use types::{
    BuiltPrompt, BuiltPromptMetadata, GenerationSettings, PromptBehavior, PromptDefinition,
    PromptOutputSpec,
};
