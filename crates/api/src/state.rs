use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::EvidenceStore;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vigia_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Evidence object store (attendance sheets, photos, documents).
    pub evidence_store: Arc<dyn EvidenceStore>,
    /// Centralized event bus for publishing domain events.
    pub event_bus: Arc<vigia_events::EventBus>,
}
