//! Prompt builder for rendering templates.

use crate::types::{BuiltPrompt, PromptDefinition};
use handlebars::Handlebars;
use latam_core::{AppError, AppResult};
use std::collections::HashMap;

/// Build a prompt from a definition and input variables.
///
/// The template is rendered with Handlebars (no HTML escaping) and the
/// definition's system instructions are attached when non-empty.
///
/// # Example
/// ```no_run
/// use latam_prompt::{build_prompt, PromptDefinition};
/// use std::collections::HashMap;
///
/// # fn example(def: PromptDefinition) -> Result<(), Box<dyn std::error::Error>> {
/// let mut vars = HashMap::new();
/// vars.insert("question".to_string(), "Inflacion en Chile".to_string());
///
/// let built = build_prompt(&def, vars)?;
/// println!("User prompt: {}", built.user);
/// # Ok(())
/// # }
/// ```
pub fn build_prompt(
    definition: &PromptDefinition,
    variables: HashMap<String, String>,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", definition.id);

    let user = render_template(&definition.template, &variables)?;

    let system = if definition.system.trim().is_empty() {
        None
    } else {
        Some(definition.system.trim().to_string())
    };

    Ok(BuiltPrompt::new(
        system,
        user,
        definition.generation.clone(),
        definition.id.clone(),
        variables,
    ))
}

/// Build the answer prompt from a question, its context block and cutoff.
pub fn build_answer_prompt(
    definition: &PromptDefinition,
    question: &str,
    context: &str,
    cutoff: &str,
) -> AppResult<BuiltPrompt> {
    let variables = HashMap::from([
        ("question".to_string(), question.to_string()),
        ("context".to_string(), context.to_string()),
        ("cutoff".to_string(), cutoff.to_string()),
    ]);
    build_prompt(definition, variables)
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text output
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    let rendered = handlebars
        .render("prompt", &variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))?;

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::embedded_answer_prompt;
    use crate::types::{GenerationSettings, PromptBehavior, PromptOutputSpec};

    fn create_test_definition(system: &str) -> PromptDefinition {
        PromptDefinition {
            id: "test.prompt".to_string(),
            title: "Test".to_string(),
            api_version: "1.0".to_string(),
            created_by: "test".to_string(),
            behavior: PromptBehavior {
                tone: "neutral".to_string(),
                style: "concise".to_string(),
            },
            system: system.to_string(),
            template: "Pregunta: {{question}}".to_string(),
            generation: GenerationSettings {
                temperature: Some(0.1),
                max_tokens: None,
            },
            output: PromptOutputSpec {
                format: "markdown".to_string(),
            },
        }
    }

    #[test]
    fn test_render_simple_template() {
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "Hola".to_string());

        let result = render_template("Pregunta: {{question}}", &vars).unwrap();
        assert_eq!(result, "Pregunta: Hola");
    }

    #[test]
    fn test_render_does_not_escape() {
        let mut vars = HashMap::new();
        vars.insert("context".to_string(), "PIB & deuda <2024> \"real\"".to_string());

        let result = render_template("{{context}}", &vars).unwrap();
        assert_eq!(result, "PIB & deuda <2024> \"real\"");
    }

    #[test]
    fn test_render_template_missing_variable() {
        let vars = HashMap::new();
        let result = render_template("Pregunta: {{missing}}", &vars).unwrap();
        assert_eq!(result, "Pregunta: ");
    }

    #[test]
    fn test_build_prompt_attaches_system() {
        let def = create_test_definition("  Solo LATAM.  ");
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "Inflacion".to_string());

        let built = build_prompt(&def, vars).unwrap();
        assert_eq!(built.user, "Pregunta: Inflacion");
        assert_eq!(built.system.as_deref(), Some("Solo LATAM."));
        assert_eq!(built.generation.temperature, Some(0.1));
        assert_eq!(built.metadata.source_prompt_id, "test.prompt");
    }

    #[test]
    fn test_build_prompt_blank_system_is_none() {
        let def = create_test_definition("   ");
        let built = build_prompt(&def, HashMap::new()).unwrap();
        assert!(built.system.is_none());
    }

    #[test]
    fn test_answer_prompt_layout() {
        let def = embedded_answer_prompt().unwrap();
        let context = "[S1] [economia] Inflacion | Paises: argentina | Fecha: 2024-06-01 | Fuente: INDEC | Sube";

        let built =
            build_answer_prompt(&def, "Inflacion en Argentina?", context, "2024-06-01").unwrap();

        assert_eq!(
            built.user,
            format!(
                "Pregunta: Inflacion en Argentina?\n\nContexto:\n{}\n\nFecha de corte: 2024-06-01.",
                context
            )
        );
        assert!(built.system.is_some());
    }
}
