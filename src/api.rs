//! HTTP surface — REST endpoints for classification and file upload.
//!
//! Validation problems surface as 400s with a `detail` body. A degraded
//! remote backend never produces an error here: the orchestrator already
//! converted it into a local fallback.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

use crate::classify::Processor;
use crate::classify::types::Category;
use crate::config::AppConfig;
use crate::error::ExtractError;
use crate::extract::{self, FileKind};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<Processor>,
}

/// Build the Axum router.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/classificar", post(classificar))
        .route("/upload", post(upload))
        .with_state(state)
}

/// CORS layer for the front-end.
///
/// Local deployments allow only the known front-end origins; with the remote
/// backend enabled the service is assumed hosted and accepts any origin.
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.ai_enabled() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let mut origins = vec![HeaderValue::from_static("http://localhost:5173")];
    if let Some(extra) = &config.cors_extra_origin
        && let Ok(origin) = extra.parse()
    {
        origins.push(origin);
    }
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

// ── Request/response shapes ─────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct EmailPayload {
    #[serde(default)]
    pub texto: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl EmailPayload {
    /// Effective text: `texto` when non-empty, else subject + body joined.
    fn effective_text(&self) -> Option<String> {
        if let Some(texto) = self.texto.as_deref()
            && !texto.trim().is_empty()
        {
            return Some(texto.to_string());
        }
        let joined = format!(
            "{} {}",
            self.subject.as_deref().unwrap_or(""),
            self.body.as_deref().unwrap_or("")
        );
        let joined = joined.trim();
        (!joined.is_empty()).then(|| joined.to_string())
    }
}

#[derive(Debug, Serialize)]
struct ClassifyResponse {
    categoria: Category,
    resposta_sugerida: String,
    usou_ai: bool,
}

#[derive(Debug, Serialize)]
struct UploadResponse {
    arquivo: String,
    categoria: Category,
    resposta_sugerida: String,
    usou_ai: bool,
}

#[derive(Debug, Serialize)]
struct RootResponse {
    mensagem: &'static str,
    usou_ai: bool,
}

// ── Errors ──────────────────────────────────────────────────────────

/// Client-visible validation error.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }
}

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedExtension(_) => {
                Self::bad_request("Envie apenas .txt, .pdf ou .csv")
            }
            ExtractError::Unreadable { .. } => {
                Self::bad_request("Arquivo sem conteúdo legível.")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "detail": self.detail })),
        )
            .into_response()
    }
}

// ── Handlers ────────────────────────────────────────────────────────

async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        mensagem: "API funcionando com IA gratuita!",
        usou_ai: state.processor.ai_enabled(),
    })
}

async fn classificar(
    State(state): State<AppState>,
    Json(payload): Json<EmailPayload>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let texto = payload
        .effective_text()
        .ok_or_else(|| ApiError::bad_request("Envie 'texto' ou 'subject'/'body' no JSON."))?;

    let outcome = state.processor.classify(&texto).await;
    info!(
        categoria = %outcome.classification.category,
        usou_ai = outcome.used_ai,
        chars = texto.chars().count(),
        "Text classified"
    );

    Ok(Json(ClassifyResponse {
        categoria: outcome.classification.category,
        resposta_sugerida: outcome.classification.reply,
        usou_ai: outcome.used_ai,
    }))
}

async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file: Option<(String, FileKind, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Upload inválido: {e}")))?
    {
        let Some(name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let kind = FileKind::from_filename(&name)
            .ok_or_else(|| ExtractError::UnsupportedExtension(name.clone()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Upload inválido: {e}")))?;
        file = Some((name, kind, bytes.to_vec()));
        break;
    }

    let (arquivo, kind, bytes) =
        file.ok_or_else(|| ApiError::bad_request("Envie um arquivo no campo 'file'."))?;

    let conteudo = extract::extract_text(kind, &bytes).inspect_err(|e| {
        warn!(arquivo = %arquivo, error = %e, "Upload extraction failed");
    })?;
    if conteudo.trim().is_empty() {
        return Err(ApiError::bad_request("Arquivo sem conteúdo legível."));
    }

    let outcome = state.processor.classify(&conteudo).await;
    info!(
        arquivo = %arquivo,
        kind = kind.label(),
        categoria = %outcome.classification.category,
        usou_ai = outcome.used_ai,
        "File classified"
    );

    Ok(Json(UploadResponse {
        arquivo,
        categoria: outcome.classification.category,
        resposta_sugerida: outcome.classification.reply,
        usou_ai: outcome.used_ai,
    }))
}
