//! services/api/src/web/state.rs
//!
//! Defines the application state shared by every handler.

use crate::config::Config;
use crate::fixtures::SeedDocument;
use edustream_core::{
    assistant::AiAssistant, catalog::Catalog, ports::CompletionService, session::ViewerSession,
};
use std::sync::Arc;
use tokio::sync::Mutex;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
///
/// The viewer session is only ever locked for the duration of one intent; the
/// lock is never held while an AI request is in flight.
pub struct AppState {
    pub config: Arc<Config>,
    pub assistant: AiAssistant,
    pub session: Mutex<ViewerSession>,
}

impl AppState {
    pub fn new(config: Arc<Config>, completions: Arc<dyn CompletionService>, seed: SeedDocument) -> Self {
        let assistant = AiAssistant::new(completions).with_timeout(config.ai_timeout);
        let session = ViewerSession::new(Catalog::new(seed.courses), seed.user);
        Self { config, assistant, session: Mutex::new(session) }
    }
}
