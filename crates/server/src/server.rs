//! HTTP surface: health, chat and sources routes.

use crate::chat::ChatService;
use crate::models::{ChatRequest, ChatResponse, HealthResponse, SourcesResponse};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use latam_core::{AppError, AppResult};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub chat: ChatService,
    pub kb_path: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/chat", post(chat_handler))
        .route("/v1/sources", get(list_sources))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(bind_addr: &str, state: AppState) -> AppResult<()> {
    let addr: SocketAddr = bind_addr
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid bind address {}: {}", bind_addr, e)))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, router(state))
        .await
        .map_err(|e| AppError::Server(e.to_string()))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        kb_items: state.chat.knowledge().len(),
        llm_enabled: state.chat.llm_enabled(),
        llm_provider: state.chat.provider().to_string(),
        llm_model: state.chat.model().to_string(),
        kb_path: state.kb_path.clone(),
    })
}

async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload?;
    let question = request
        .validated_question()
        .map_err(ApiError::unprocessable)?;

    Ok(Json(state.chat.answer(question).await))
}

async fn list_sources(State(state): State<AppState>) -> Json<SourcesResponse> {
    Json(SourcesResponse {
        sources: state.chat.knowledge().sources(),
    })
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn unprocessable(message: String) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self {
            status: value.status(),
            message: value.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        tracing::debug!(status = %self.status, error = %self.message, "Rejected request");
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::test_support::{service, StubClient};
    use crate::chat::{NO_EVIDENCE_MESSAGE, OUT_OF_SCOPE_MESSAGE};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState {
            chat: service(Some(StubClient::replying("- Inflacion alta [S1]"))),
            kb_path: "data/knowledge_base.json".to_string(),
        })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    fn post_chat(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/v1/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_reports_state() {
        let (status, body) = send(app(), get_request("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["kb_items"], 3);
        assert_eq!(body["llm_enabled"], true);
        assert_eq!(body["llm_provider"], "openai");
        assert_eq!(body["llm_model"], "gpt-4o-mini");
        assert_eq!(body["kb_path"], "data/knowledge_base.json");
    }

    #[tokio::test]
    async fn health_without_credentials() {
        let app = router(AppState {
            chat: service(None),
            kb_path: "kb.json".to_string(),
        });

        let (_, body) = send(app, get_request("/health")).await;
        assert_eq!(body["llm_enabled"], false);
    }

    #[tokio::test]
    async fn chat_answers_with_citations() {
        let (status, body) = send(
            app(),
            post_chat(r#"{"question": "Inflación en Argentina", "messages": [{"role": "user", "content": "hola"}]}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], "- Inflacion alta [S1]");
        assert_eq!(body["llm_runtime"], "openai");
        assert_eq!(body["retrieval_mode"], "lexical");
        assert_eq!(body["evidence_mode"], "strict-context");
        assert_eq!(body["country_scope"][0], "argentina");
        assert_eq!(body["sources"][0]["id"], "ar-inflacion");
        assert_eq!(body["sources"][0]["source_name"], "INDEC");
        assert_eq!(body["data_cutoff"], "2024-04-01");
    }

    #[tokio::test]
    async fn chat_refuses_out_of_region() {
        let (status, body) = send(app(), post_chat(r#"{"question": "Inflación en Japón"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], OUT_OF_SCOPE_MESSAGE);
        assert_eq!(body["llm_runtime"], "openai:latam-guard");
        assert_eq!(body["sources"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn chat_without_evidence() {
        let (_, body) = send(app(), post_chat(r#"{"question": "Caribe xyzzy"}"#)).await;

        assert_eq!(body["answer"], NO_EVIDENCE_MESSAGE);
        assert_eq!(body["llm_runtime"], "openai:no-evidence");
        assert_eq!(body["data_cutoff"], "no-disponible");
    }

    #[tokio::test]
    async fn short_question_is_unprocessable() {
        let (status, body) = send(app(), post_chat(r#"{"question": "x"}"#)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("at least 2"));
    }

    #[tokio::test]
    async fn padded_short_question_reaches_scope_guard() {
        let (status, body) = send(app(), post_chat(r#"{"question": "  x "}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["llm_runtime"], "openai:latam-guard");
    }

    #[tokio::test]
    async fn malformed_body_is_rejected_with_error_json() {
        let (status, body) = send(app(), post_chat("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, body) = send(app(), post_chat(r#"{"messages": []}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn sources_are_distinct() {
        let (status, body) = send(app(), get_request("/v1/sources")).await;

        assert_eq!(status, StatusCode::OK);
        let sources = body["sources"].as_array().unwrap();
        assert_eq!(sources.len(), 3);
        assert_eq!(sources[0]["id"], "indec");
        assert_eq!(sources[0]["url"], "https://www.indec.gob.ar");
        assert_eq!(sources[2]["name"], "Cochilco");
        assert_eq!(sources[2]["url"], "");
    }
}
