//! Command handlers for the LATAM Agent CLI.

pub mod ask;
pub mod serve;
pub mod sources;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use serve::ServeCommand;
pub use sources::SourcesCommand;
