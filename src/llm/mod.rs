//! Remote classification backend.
//!
//! `GroqClassifier` calls Groq's OpenAI-compatible chat completions API with
//! a prompt that demands a strict JSON verdict, then parses it into a
//! [`Classification`]. Every failure mode maps to an [`LlmError`] so the
//! orchestrator can fall back to the rules engine.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use tracing::debug;

use crate::classify::types::{Category, Classification};
use crate::config::RemoteConfig;
use crate::error::LlmError;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Max tokens for the verdict call (kept tight — runs on every request).
const MAX_COMPLETION_TOKENS: u32 = 300;

/// How much of the input we send to the model.
const MAX_INPUT_CHARS: usize = 4000;

/// A remote backend that classifies text, or fails trying.
///
/// No other side channel: the orchestrator treats any error as a signal to
/// fall back locally.
#[async_trait]
pub trait RemoteClassifier: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Classify a text blob remotely.
    async fn classify(&self, text: &str) -> Result<Classification, LlmError>;
}

/// Groq chat-completions classifier.
pub struct GroqClassifier {
    client: reqwest::Client,
    config: RemoteConfig,
}

impl GroqClassifier {
    pub fn new(config: RemoteConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl RemoteClassifier for GroqClassifier {
    fn name(&self) -> &str {
        "groq"
    }

    async fn classify(&self, text: &str) -> Result<Classification, LlmError> {
        let body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": MAX_COMPLETION_TOKENS,
            "messages": [
                { "role": "system", "content": verdict_system_prompt() },
                { "role": "user", "content": verdict_user_prompt(text) },
            ],
        });

        let response = self
            .client
            .post(GROQ_API_URL)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let completion: ChatCompletionResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::InvalidResponse {
                provider: "groq".into(),
                reason: "completion has no message content".into(),
            })?;

        debug!(model = %self.config.model, "Groq verdict received");
        parse_verdict(&content)
    }
}

// ── Prompt construction ─────────────────────────────────────────────

fn verdict_system_prompt() -> &'static str {
    "Você é um classificador de emails de uma equipe de atendimento.\n\
     Classifique a mensagem como \"Produtivo\" (exige ação ou resposta da equipe)\n\
     ou \"Improdutivo\" (conteúdo social ou promocional, sem ação necessária)\n\
     e sugira uma resposta curta e cordial em português.\n\n\
     Responda APENAS com um objeto JSON:\n\
     {\"categoria\": \"Produtivo\" ou \"Improdutivo\", \"resposta\": \"...\"}"
}

fn verdict_user_prompt(text: &str) -> String {
    let preview: String = text.chars().take(MAX_INPUT_CHARS).collect();
    format!("Mensagem:\n{preview}")
}

// ── Response parsing ────────────────────────────────────────────────

#[derive(Debug, serde::Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, serde::Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, serde::Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Model verdict structure.
#[derive(Debug, serde::Deserialize)]
struct Verdict {
    categoria: String,
    #[serde(default)]
    resposta: String,
}

/// Parse the model output into a `Classification`.
fn parse_verdict(raw: &str) -> Result<Classification, LlmError> {
    let json_str = extract_json_object(raw);
    let verdict: Verdict =
        serde_json::from_str(&json_str).map_err(|e| LlmError::InvalidResponse {
            provider: "groq".into(),
            reason: format!("JSON parse error: {e}"),
        })?;

    let category =
        Category::parse(&verdict.categoria).ok_or_else(|| LlmError::InvalidResponse {
            provider: "groq".into(),
            reason: format!("unknown category: '{}'", verdict.categoria),
        })?;

    if verdict.resposta.trim().is_empty() {
        return Err(LlmError::InvalidResponse {
            provider: "groq".into(),
            reason: "empty suggested reply".into(),
        });
    }

    Ok(Classification::new(category, verdict.resposta))
}

/// Extract a JSON object from model output (handles markdown wrapping).
fn extract_json_object(text: &str) -> String {
    let trimmed = text.trim();

    // Already a JSON object
    if trimmed.starts_with('{') {
        return trimmed.to_string();
    }

    // Wrapped in a markdown code block
    if let Some(start) = trimmed.find("```json") {
        let after = &trimmed[start + 7..];
        if let Some(end) = after.find("```") {
            return after[..end].trim().to_string();
        }
    }

    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        if let Some(end) = after.find("```") {
            let inner = after[..end].trim();
            if inner.starts_with('{') {
                return inner.to_string();
            }
        }
    }

    // Try to find object bounds
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}'))
        && end > start
    {
        return trimmed[start..=end].to_string();
    }

    trimmed.to_string()
}
