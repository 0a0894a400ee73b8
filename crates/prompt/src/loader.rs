//! Prompt loader for YAML prompt definitions.
//!
//! Definitions are looked up as `<dir>/<id>.yml`. The answer prompt ships
//! embedded in the binary so the service runs without a prompts directory.

use crate::types::PromptDefinition;
use latam_core::{AppError, AppResult};
use std::path::Path;

/// Identifier of the grounded answer prompt.
pub const ANSWER_PROMPT_ID: &str = "latam.answer";

const EMBEDDED_ANSWER_PROMPT: &str = include_str!("../prompts/latam.answer.yml");

/// Load a prompt definition by ID from a prompts directory.
///
/// # Example
/// ```no_run
/// use latam_prompt::load_prompt;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let prompt = load_prompt(Path::new("prompts"), "latam.answer")?;
/// println!("Loaded prompt: {}", prompt.title);
/// # Ok(())
/// # }
/// ```
pub fn load_prompt(prompts_dir: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    let prompt_file = prompts_dir.join(format!("{}.yml", prompt_id));

    tracing::debug!("Loading prompt from: {:?}", prompt_file);

    if !prompt_file.exists() {
        return Err(AppError::Prompt(format!(
            "Prompt file not found: {:?}",
            prompt_file
        )));
    }

    let contents = std::fs::read_to_string(&prompt_file).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to read prompt file {:?}: {}",
            prompt_file, e
        ))
    })?;

    let definition = parse_prompt(&contents)
        .map_err(|e| AppError::Prompt(format!("{:?}: {}", prompt_file, e)))?;

    if definition.id != prompt_id {
        tracing::warn!(
            file_id = %prompt_id,
            declared_id = %definition.id,
            "Prompt id does not match its file name"
        );
    }

    tracing::info!("Loaded prompt: {} ({})", definition.id, definition.title);

    Ok(definition)
}

/// Load the answer prompt, preferring an override in `prompts_dir`.
///
/// Falls back to the embedded definition when no directory is configured or
/// the directory has no `latam.answer.yml`. A file that exists but fails to
/// parse is an error.
pub fn load_answer_prompt(prompts_dir: Option<&Path>) -> AppResult<PromptDefinition> {
    if let Some(dir) = prompts_dir {
        if dir.join(format!("{}.yml", ANSWER_PROMPT_ID)).exists() {
            return load_prompt(dir, ANSWER_PROMPT_ID);
        }
        tracing::debug!(dir = ?dir, "No answer prompt override, using embedded definition");
    }

    embedded_answer_prompt()
}

/// The answer prompt compiled into the binary.
pub fn embedded_answer_prompt() -> AppResult<PromptDefinition> {
    parse_prompt(EMBEDDED_ANSWER_PROMPT)
}

fn parse_prompt(contents: &str) -> AppResult<PromptDefinition> {
    let definition: PromptDefinition = serde_yaml::from_str(contents)
        .map_err(|e| AppError::Prompt(format!("Failed to parse prompt YAML: {}", e)))?;

    validate_prompt(&definition)?;
    Ok(definition)
}

/// Validate a prompt definition.
fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    if def.id.is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if def.title.is_empty() {
        return Err(AppError::Prompt("Prompt title cannot be empty".to_string()));
    }

    if def.template.is_empty() {
        return Err(AppError::Prompt(
            "Prompt template cannot be empty".to_string(),
        ));
    }

    if !def.api_version.contains('.') {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    Ok(())
}
