//! Startup configuration.
//!
//! Read from the environment exactly once in `main` and passed into the API
//! state by value — never consulted again during request handling.

use std::time::Duration;

use secrecy::SecretString;
use tracing::warn;

/// Remote backend (Groq) settings.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Groq API key.
    pub api_key: SecretString,
    /// Chat completion model name.
    pub model: String,
    /// Upper bound on a single remote classification call.
    pub timeout: Duration,
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Remote backend settings. `None` means the rules engine answers
    /// every request directly.
    pub remote: Option<RemoteConfig>,
    /// HTTP listen port.
    pub port: u16,
    /// Extra CORS origin allowed besides the local dev front-end.
    pub cors_extra_origin: Option<String>,
}

impl AppConfig {
    /// Read configuration from environment variables.
    ///
    /// `USE_AI` enables the remote backend, but only when a key is present
    /// in `GROQ_KEY` or `GROQ_API_KEY`. A set flag with a missing key
    /// disables the remote path with a warning instead of leaving the
    /// service half-configured.
    pub fn from_env() -> Self {
        let use_ai = std::env::var("USE_AI")
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        let api_key = std::env::var("GROQ_KEY")
            .or_else(|_| std::env::var("GROQ_API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty());

        let model =
            std::env::var("GROQ_MODEL").unwrap_or_else(|_| "llama3-8b-8192".to_string());

        let timeout_secs: u64 = std::env::var("REMOTE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(15);

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8000);

        let cors_extra_origin = std::env::var("CORS_EXTRA_ORIGIN")
            .ok()
            .filter(|o| !o.trim().is_empty());

        let remote = resolve_remote(
            use_ai,
            api_key,
            model,
            Duration::from_secs(timeout_secs),
        );

        Self {
            remote,
            port,
            cors_extra_origin,
        }
    }

    /// Whether the remote backend is configured.
    pub fn ai_enabled(&self) -> bool {
        self.remote.is_some()
    }
}

/// Decide whether the remote backend can actually be used.
fn resolve_remote(
    use_ai: bool,
    api_key: Option<String>,
    model: String,
    timeout: Duration,
) -> Option<RemoteConfig> {
    match (use_ai, api_key) {
        (true, Some(key)) => Some(RemoteConfig {
            api_key: SecretString::from(key),
            model,
            timeout,
        }),
        (true, None) => {
            warn!("USE_AI is set but GROQ_KEY/GROQ_API_KEY is missing; remote backend disabled");
            None
        }
        (false, _) => None,
    }
}

/// Parse a boolean-ish environment value ("1", "true", "yes").
fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_values() {
        assert!(is_truthy("1"));
        assert!(is_truthy("true"));
        assert!(is_truthy("TRUE"));
        assert!(is_truthy("Yes"));
        assert!(is_truthy(" yes "));
    }

    #[test]
    fn falsy_values() {
        assert!(!is_truthy("0"));
        assert!(!is_truthy("false"));
        assert!(!is_truthy(""));
        assert!(!is_truthy("on"));
    }

    #[test]
    fn remote_enabled_with_flag_and_key() {
        let remote = resolve_remote(
            true,
            Some("gsk-test".into()),
            "llama3-8b-8192".into(),
            Duration::from_secs(15),
        );
        assert!(remote.is_some());
        assert_eq!(remote.unwrap().model, "llama3-8b-8192");
    }

    #[test]
    fn flag_without_key_disables_remote() {
        // Misconfiguration must resolve to local mode, not a per-request failure.
        let remote = resolve_remote(true, None, "m".into(), Duration::from_secs(15));
        assert!(remote.is_none());
    }

    #[test]
    fn no_flag_means_local_mode() {
        let remote = resolve_remote(
            false,
            Some("gsk-test".into()),
            "m".into(),
            Duration::from_secs(15),
        );
        assert!(remote.is_none());
    }
}
