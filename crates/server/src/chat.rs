//! Chat orchestration: scope guard, evidence retrieval, grounded generation.
//!
//! Every question ends in exactly one of four states (refused, no evidence,
//! generation failed, answered). Generation failures are reported in the
//! response body, never as transport errors.

use crate::models::{ChatResponse, SourceItem, EVIDENCE_MODE, RETRIEVAL_MODE};
use crate::sanitize::sanitize_answer;
use latam_core::{AppConfig, AppError, AppResult};
use latam_knowledge::{DomainTables, Evidence, KnowledgeBase, NO_CUTOFF};
use latam_llm::{create_client, ClientOptions, LlmClient, LlmRequest};
use latam_prompt::{build_answer_prompt, load_answer_prompt, PromptDefinition};
use std::sync::Arc;
use std::time::Instant;

pub const OUT_OF_SCOPE_MESSAGE: &str =
    "Este asistente solo responde consultas de Latinoamerica y el Caribe.";
pub const NO_EVIDENCE_MESSAGE: &str =
    "No hay evidencia suficiente en la base LATAM para responder esa pregunta.";
pub const GENERATION_FAILED_MESSAGE: &str =
    "No se pudo generar respuesta con el proveedor de lenguaje. Verifica credenciales y conectividad.";
pub const EMPTY_OUTPUT_MESSAGE: &str =
    "No hay salida valida del modelo para esta consulta con la evidencia disponible.";

/// Terminal state of one chat request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Refused,
    NoEvidence,
    GenerationFailed,
    Answered,
}

impl Outcome {
    fn runtime_tag(self, provider: &str) -> String {
        match self {
            Outcome::Refused => format!("{}:latam-guard", provider),
            Outcome::NoEvidence => format!("{}:no-evidence", provider),
            Outcome::GenerationFailed => format!("{}:error-runtime", provider),
            Outcome::Answered => provider.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct ChatService {
    knowledge: Arc<KnowledgeBase>,
    llm: Option<Arc<dyn LlmClient>>,
    prompt: Arc<PromptDefinition>,
    provider: String,
    model: String,
    top_k: usize,
}

impl ChatService {
    /// `llm` is `None` when the provider has no usable credentials; such
    /// requests end as generation failures.
    pub fn new(
        knowledge: Arc<KnowledgeBase>,
        llm: Option<Arc<dyn LlmClient>>,
        prompt: PromptDefinition,
        provider: impl Into<String>,
        model: impl Into<String>,
        top_k: usize,
    ) -> Self {
        Self {
            knowledge,
            llm,
            prompt: Arc::new(prompt),
            provider: provider.into().to_lowercase(),
            model: model.into(),
            top_k,
        }
    }

    /// Load the knowledge base and answer prompt and connect the provider.
    ///
    /// A provider that cannot be built (typically a missing API key) is
    /// logged and left disabled rather than failing startup.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let tables = DomainTables::from_overrides(&config.domain);
        let knowledge = KnowledgeBase::load(&config.kb_path, tables)?;
        tracing::info!(
            path = ?config.kb_path,
            documents = knowledge.len(),
            "Knowledge base loaded"
        );

        let prompt = load_answer_prompt(config.prompts_dir.as_deref())?;

        let llm = match create_client(&ClientOptions::from_config(config)) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!(provider = %config.provider, error = %e, "Language model disabled");
                None
            }
        };

        Ok(Self::new(
            Arc::new(knowledge),
            llm,
            prompt,
            config.provider.as_str(),
            config.model.as_str(),
            config.max_context_docs,
        ))
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn llm_enabled(&self) -> bool {
        self.llm.is_some()
    }

    /// Answer one already-validated question.
    pub async fn answer(&self, question: &str) -> ChatResponse {
        let started = Instant::now();
        let question = question.trim();
        let scope = self.knowledge.assess_scope(question);
        let country_scope = scope.countries.clone();
        if !scope.is_allowed() {
            tracing::info!(
                in_region = scope.in_region,
                excluded = scope.excluded,
                "Question refused by scope guard"
            );
            return self.respond(Outcome::Refused, OUT_OF_SCOPE_MESSAGE, None, country_scope);
        }

        let evidence = match self.knowledge.gather_evidence(question, self.top_k) {
            Some(evidence) => evidence,
            None => {
                tracing::info!("No document scored for question");
                return self.respond(
                    Outcome::NoEvidence,
                    NO_EVIDENCE_MESSAGE,
                    None,
                    country_scope,
                );
            }
        };

        tracing::debug!(
            documents = evidence.documents.len(),
            cutoff = %evidence.cutoff,
            "Evidence gathered"
        );

        let response = match self.generate(question, &evidence).await {
            Ok(output) => {
                let output = output.trim();
                let answer = if output.is_empty() {
                    tracing::warn!("Model returned empty output");
                    EMPTY_OUTPUT_MESSAGE.to_string()
                } else {
                    sanitize_answer(output)
                };
                self.respond(Outcome::Answered, &answer, Some(&evidence), country_scope)
            }
            Err(e) => {
                tracing::error!(error = %e, "Answer generation failed");
                self.respond(
                    Outcome::GenerationFailed,
                    GENERATION_FAILED_MESSAGE,
                    Some(&evidence),
                    country_scope,
                )
            }
        };

        tracing::info!(
            runtime = %response.llm_runtime,
            sources = response.sources.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Chat request completed"
        );
        response
    }

    async fn generate(&self, question: &str, evidence: &Evidence) -> AppResult<String> {
        let client = self.llm.as_ref().ok_or_else(|| {
            AppError::Llm(format!(
                "No credentials configured for provider {}",
                self.provider
            ))
        })?;

        let built = build_answer_prompt(&self.prompt, question, &evidence.context, &evidence.cutoff)?;

        let mut request = LlmRequest::new(built.user, &self.model);
        if let Some(system) = built.system {
            request = request.with_system(system);
        }
        if let Some(temperature) = built.generation.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(max_tokens) = built.generation.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        let response = client.complete(&request).await?;
        tracing::debug!(
            "Token usage - Prompt: {}, Completion: {}, Total: {}",
            response.usage.prompt_tokens,
            response.usage.completion_tokens,
            response.usage.total_tokens
        );
        Ok(response.content)
    }

    fn respond(
        &self,
        outcome: Outcome,
        answer: &str,
        evidence: Option<&Evidence>,
        country_scope: Vec<String>,
    ) -> ChatResponse {
        let (sources, data_cutoff) = match evidence {
            Some(evidence) => (
                evidence.documents.iter().map(SourceItem::from).collect(),
                evidence.cutoff.clone(),
            ),
            None => (Vec::new(), NO_CUTOFF.to_string()),
        };

        ChatResponse {
            answer: answer.to_string(),
            sources,
            country_scope,
            data_cutoff,
            retrieval_mode: RETRIEVAL_MODE.to_string(),
            evidence_mode: EVIDENCE_MODE.to_string(),
            llm_runtime: outcome.runtime_tag(&self.provider),
        }
    }
}
