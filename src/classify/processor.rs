//! Classification orchestrator — picks a backend and guarantees a result.
//!
//! At most one remote attempt per request, bounded by a timeout. Any remote
//! failure is logged and answered by the rules engine; the caller never sees
//! the remote path degrade.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::classify::rules;
use crate::classify::types::ClassifyOutcome;
use crate::llm::RemoteClassifier;

/// Default bound on a remote classification call.
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(15);

/// Classification orchestrator.
///
/// Constructed once at startup from [`crate::config::AppConfig`] and shared
/// across requests; holds no mutable state.
pub struct Processor {
    remote: Option<Arc<dyn RemoteClassifier>>,
    remote_timeout: Duration,
}

impl Processor {
    /// Rules engine only — no remote backend.
    pub fn local_only() -> Self {
        Self {
            remote: None,
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }

    /// Remote backend with local fallback.
    pub fn with_remote(remote: Arc<dyn RemoteClassifier>, timeout: Duration) -> Self {
        Self {
            remote: Some(remote),
            remote_timeout: timeout,
        }
    }

    /// Whether a remote backend is configured.
    pub fn ai_enabled(&self) -> bool {
        self.remote.is_some()
    }

    /// Classify a text blob, never failing.
    ///
    /// `used_ai` reflects the code path actually taken: false whenever the
    /// rules engine produced the answer, even if a remote backend is
    /// configured.
    pub async fn classify(&self, text: &str) -> ClassifyOutcome {
        let Some(remote) = &self.remote else {
            return ClassifyOutcome {
                classification: rules::classify(text),
                used_ai: false,
            };
        };

        match tokio::time::timeout(self.remote_timeout, remote.classify(text)).await {
            Ok(Ok(classification)) => {
                debug!(provider = remote.name(), "Remote classification used");
                ClassifyOutcome {
                    classification,
                    used_ai: true,
                }
            }
            Ok(Err(e)) => {
                warn!(
                    provider = remote.name(),
                    error = %e,
                    "Remote classification failed, falling back to rules engine"
                );
                ClassifyOutcome {
                    classification: rules::classify(text),
                    used_ai: false,
                }
            }
            Err(_) => {
                warn!(
                    provider = remote.name(),
                    timeout_secs = self.remote_timeout.as_secs(),
                    "Remote classification timed out, falling back to rules engine"
                );
                ClassifyOutcome {
                    classification: rules::classify(text),
                    used_ai: false,
                }
            }
        }
    }
}
