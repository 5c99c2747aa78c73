use std::sync::Arc;

use crate::audit::AuditLog;
use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The external generation service. Production: `OpenAiClient`; tests
    /// substitute a scripted generator.
    pub generator: Arc<dyn TextGenerator>,
    /// The one shared mutable resource: the append-only audit log.
    pub audit: AuditLog,
    /// Startup configuration, kept for handlers that grow config needs.
    /// Only read during startup today.
    #[allow(dead_code)]
    pub config: Config,
}
