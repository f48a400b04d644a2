//! HTTP relay for SageBot.
//!
//! Holds the completion credential server-side so clients never see it.
//! Exposes:
//! - `POST /chat`: persona prompt + completion, returns `{response}`
//! - `POST /v1/ask`: same, plus the topic gate and sectioned output
//! - `GET /personas`, `GET /health`
//!
//! Built on Axum; every route answers CORS preflight.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::extract::rejection::JsonRejection;
use axum::{
    Router,
    extract::State,
    http::{HeaderName, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{error, info, warn};

use sagebot_config::AppConfig;
use sagebot_core::error::{CompletionError, EMPTY_REPLY_FALLBACK};
use sagebot_core::persona::{self, Persona};
use sagebot_core::prompt::{LanguageHint, build_prompt};
use sagebot_core::provider::{CompletionRequest, CompletionService};
use sagebot_core::sections::{SectionedReply, parse_sections};
use sagebot_core::session::{ChatSession, Submission};

/// Request bodies above this size are rejected.
const BODY_LIMIT: usize = 64 * 1024;

/// Shared state for the relay. Immutable once built.
pub struct RelayState {
    pub config: AppConfig,
    pub service: Arc<dyn CompletionService>,
}

type SharedState = Arc<RelayState>;

/// Build the relay router with CORS, body limit and trace layers.
pub fn build_router(state: SharedState) -> Router {
    let cors = cors_layer(&state.config.gateway.allowed_origins);

    Router::new()
        .route("/health", get(health_handler))
        .route("/personas", get(personas_handler))
        .route("/chat", post(chat_handler))
        .route("/v1/ask", post(ask_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() || origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(origin = %o, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}

/// Start the relay HTTP server.
pub async fn start(
    config: AppConfig,
    service: Arc<dyn CompletionService>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let provider = service.name().to_string();
    let app = build_router(Arc::new(RelayState { config, service }));

    info!(addr = %addr, provider = %provider, "Relay starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Payloads ---

#[derive(Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    persona: Option<String>,
}

impl ChatRequest {
    fn persona(&self) -> &'static Persona {
        persona::lookup(self.persona.as_deref().unwrap_or_default())
    }
}

#[derive(Serialize)]
struct ChatResponse {
    response: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct AskResponse {
    accepted: bool,
    persona: &'static str,
    response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sections: Option<SectionedReply>,
}

fn error_response(message: impl Into<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Unwrap the JSON body and require a non-blank message.
fn read_message(
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<(String, &'static Persona), Response> {
    let Json(request) = payload.map_err(|e| error_response(e.body_text()))?;
    let persona = request.persona();
    match request.message {
        Some(message) if !message.trim().is_empty() => Ok((message, persona)),
        _ => Err(error_response("Message is required")),
    }
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct PersonaSummary {
    id: &'static str,
    name: &'static str,
    greeting: &'static str,
    suggestions: &'static [&'static str],
}

async fn personas_handler() -> Json<Vec<PersonaSummary>> {
    Json(
        persona::all()
            .iter()
            .map(|p| PersonaSummary {
                id: p.id.as_str(),
                name: p.name,
                greeting: p.greeting,
                suggestions: p.suggestions,
            })
            .collect(),
    )
}

async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let (message, persona) = match read_message(payload) {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    info!(persona = %persona.id, message_len = message.len(), "Relay message received");

    let prompt = build_prompt(&message, persona, LanguageHint::detect(&message));
    let request = CompletionRequest {
        prompt: &prompt,
        text: &message,
        persona: persona.id,
    };

    match state.service.complete(request).await {
        Ok(text) if !text.trim().is_empty() => Json(ChatResponse { response: text }).into_response(),
        Ok(_) | Err(CompletionError::EmptyReply) => Json(ChatResponse {
            response: EMPTY_REPLY_FALLBACK.to_string(),
        })
        .into_response(),
        Err(e) => {
            error!(error = %e, "Completion failed");
            error_response(e.relay_message())
        }
    }
}

async fn ask_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let (message, persona) = match read_message(payload) {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    let mut session = ChatSession::new(persona);
    let pending = match session.submit(&message) {
        Ok(Submission::Pending(pending)) => pending,
        Ok(Submission::Rejected(reply)) => {
            info!(persona = %persona.id, "Off-topic message rejected");
            return Json(AskResponse {
                accepted: false,
                persona: persona.id.as_str(),
                response: reply.content,
                sections: None,
            })
            .into_response();
        }
        Err(e) => return error_response(e.to_string()),
    };

    info!(persona = %persona.id, message_len = message.len(), "Relay question accepted");

    let result = state.service.complete(pending.request()).await;
    match result {
        Ok(text) if !text.trim().is_empty() => Json(AskResponse {
            accepted: true,
            persona: persona.id.as_str(),
            sections: Some(parse_sections(&text, persona)),
            response: text,
        })
        .into_response(),
        Ok(_) | Err(CompletionError::EmptyReply) => Json(AskResponse {
            accepted: true,
            persona: persona.id.as_str(),
            response: EMPTY_REPLY_FALLBACK.to_string(),
            sections: None,
        })
        .into_response(),
        Err(e) => {
            error!(error = %e, "Completion failed");
            error_response(e.relay_message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Returns a fixed result and records the prompts it was sent.
    struct StubService {
        reply: Result<String, CompletionError>,
        prompts: Mutex<Vec<String>>,
    }

    impl StubService {
        fn new(reply: Result<String, CompletionError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionService for StubService {
        fn name(&self) -> &str {
            "stub"
        }

        async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, CompletionError> {
            self.prompts.lock().unwrap().push(request.prompt.to_string());
            self.reply.clone()
        }
    }

    fn app(service: Arc<StubService>) -> Router {
        build_router(Arc::new(RelayState {
            config: AppConfig::default(),
            service,
        }))
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let app = app(StubService::new(Ok(String::new())));
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn personas_endpoint_lists_all_four() {
        let app = app(StubService::new(Ok(String::new())));
        let req = Request::builder().uri("/personas").body(Body::empty()).unwrap();

        let body = json_body(app.oneshot(req).await.unwrap()).await;
        let ids: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, ["health", "study", "business", "scripts"]);
    }

    #[tokio::test]
    async fn chat_returns_reply_and_uses_health_prompt_by_default() {
        let stub = StubService::new(Ok("1. a 2. b 3. c 4. d".into()));
        let app = app(stub.clone());

        let response = app
            .oneshot(post_json("/chat", serde_json::json!({ "message": "I have a cough" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["response"], "1. a 2. b 3. c 4. d");

        let prompts = stub.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("I have a cough"));
        assert!(prompts[0].contains("Respond in English."));
    }

    #[tokio::test]
    async fn chat_prompt_follows_telugu_input() {
        let stub = StubService::new(Ok("ok".into()));
        let app = app(stub.clone());

        app.oneshot(post_json("/chat", serde_json::json!({ "message": "నాకు తలనొప్పి ఉంది" })))
            .await
            .unwrap();
        assert!(stub.prompts()[0].contains("Telugu"));
    }

    #[tokio::test]
    async fn chat_does_not_gate_topics() {
        let stub = StubService::new(Ok("Knead the dough.".into()));
        let app = app(stub.clone());

        let response = app
            .oneshot(post_json(
                "/chat",
                serde_json::json!({ "message": "What's a good pizza recipe?" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(stub.prompts().len(), 1);
    }

    #[tokio::test]
    async fn missing_message_is_an_error() {
        let stub = StubService::new(Ok("unused".into()));
        let app = app(stub.clone());

        let response = app
            .oneshot(post_json("/chat", serde_json::json!({ "message": "   " })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"], "Message is required");
        assert!(stub.prompts().is_empty());
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let app = app(StubService::new(Ok("unused".into())));
        let req = Request::builder()
            .method("POST")
            .uri("/chat")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json_body(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn upstream_status_maps_to_relay_message() {
        let stub = StubService::new(Err(CompletionError::Status {
            status: 403,
            body: "denied".into(),
        }));
        let response = app(stub)
            .oneshot(post_json("/chat", serde_json::json!({ "message": "fever" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await["error"],
            "API authentication failed. Please try again later."
        );
    }

    #[tokio::test]
    async fn empty_reply_uses_fallback_text() {
        let stub = StubService::new(Err(CompletionError::EmptyReply));
        let response = app(stub)
            .oneshot(post_json("/chat", serde_json::json!({ "message": "fever" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["response"], EMPTY_REPLY_FALLBACK);
    }

    #[tokio::test]
    async fn ask_rejects_off_topic_without_calling_service() {
        let stub = StubService::new(Ok("unused".into()));
        let response = app(stub.clone())
            .oneshot(post_json(
                "/v1/ask",
                serde_json::json!({ "message": "What's a good pizza recipe?", "persona": "health" }),
            ))
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["accepted"], false);
        assert_eq!(body["response"], persona::get(sagebot_core::PersonaId::Health).rejection);
        assert!(body.get("sections").is_none());
        assert!(stub.prompts().is_empty());
    }

    #[tokio::test]
    async fn ask_returns_named_sections() {
        let stub = StubService::new(Ok(
            "1. Possible viral infection 2. Rest and hydration 3. If fever exceeds 103°F 4. Not a diagnosis"
                .into(),
        ));
        let response = app(stub)
            .oneshot(post_json(
                "/v1/ask",
                serde_json::json!({ "message": "I have a headache and mild fever" }),
            ))
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["accepted"], true);
        assert_eq!(body["persona"], "health");
        assert_eq!(body["sections"]["conditions"], "Possible viral infection");
        assert_eq!(body["sections"]["care"], "Rest and hydration");
        assert_eq!(body["sections"]["attention"], "If fever exceeds 103°F");
        assert_eq!(body["sections"]["disclaimer"], "Not a diagnosis");
    }

    #[tokio::test]
    async fn ask_unknown_persona_falls_back_to_health() {
        let stub = StubService::new(Ok("plain answer".into()));
        let response = app(stub)
            .oneshot(post_json(
                "/v1/ask",
                serde_json::json!({ "message": "my back has pain", "persona": "astrology" }),
            ))
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["persona"], "health");
        assert_eq!(body["sections"]["disclaimer"], "plain answer");
    }

    #[tokio::test]
    async fn preflight_allows_client_headers() {
        let app = app(StubService::new(Ok(String::new())));
        let req = Request::builder()
            .method("OPTIONS")
            .uri("/chat")
            .header("origin", "https://app.example.com")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "apikey, x-client-info")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            HeaderValue::from_static("*")
        );
        let allowed = response.headers()["access-control-allow-headers"]
            .to_str()
            .unwrap()
            .to_string();
        assert!(allowed.contains("apikey"));
        assert!(allowed.contains("x-client-info"));
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let stub = StubService::new(Ok("unused".into()));
        let big = "a".repeat(BODY_LIMIT + 1);
        let response = app(stub.clone())
            .oneshot(post_json("/chat", serde_json::json!({ "message": big })))
            .await
            .unwrap();
        assert_ne!(response.status(), StatusCode::OK);
        assert!(stub.prompts().is_empty());
    }
}
