//! Event-to-notification routing engine.
//!
//! [`NotificationRouter`] subscribes to the domain event bus and routes each
//! event to affected users: OSH staff of the event's company get a persisted
//! notification row plus a WebSocket push, and every connection scoped to
//! the company receives a change frame so open dashboards re-fetch their
//! summaries.

use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::broadcast;
use vigia_core::roles::{ROLE_COMPANY_ADMIN, ROLE_OSH_RESPONSIBLE};
use vigia_core::types::DbId;
use vigia_db::repositories::{EventRepo, NotificationRepo};
use vigia_db::DbPool;
use vigia_events::DomainEvent;

use crate::ws::WsManager;

/// Routes domain events to user notifications.
pub struct NotificationRouter {
    pool: DbPool,
    ws_manager: Arc<WsManager>,
}

impl NotificationRouter {
    /// Create a new router with the given database pool and WebSocket manager.
    pub fn new(pool: DbPool, ws_manager: Arc<WsManager>) -> Self {
        Self { pool, ws_manager }
    }

    /// Run the main routing loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](vigia_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<DomainEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.route_event(&event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to route event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    /// Route a single event to all affected users.
    async fn route_event(&self, event: &DomainEvent) -> Result<(), sqlx::Error> {
        let Some(company_id) = event.company_id else {
            // Platform-level events carry no tenant; nothing to fan out.
            return Ok(());
        };

        // Persist a notification row for each OSH staff member, except the
        // actor (they performed the change themselves).
        if let Some(event_id) = self.find_latest_event_id(&event.event_type).await {
            for user_id in self.get_osh_staff_ids(company_id).await? {
                if Some(user_id) == event.actor_user_id {
                    continue;
                }
                NotificationRepo::create(&self.pool, event_id, user_id)
                    .await
                    .ok();
                self.push_notification(user_id, event).await;
            }
        }

        // Company-wide change frame: open dashboards re-fetch on receipt.
        let frame = serde_json::json!({
            "type": "change",
            "event_type": event.event_type,
            "entity_type": event.source_entity_type,
            "entity_id": event.source_entity_id,
            "timestamp": event.timestamp,
        });
        self.ws_manager
            .send_to_company(company_id, Message::Text(frame.to_string().into()))
            .await;

        Ok(())
    }

    /// Query all active OSH staff of a company.
    async fn get_osh_staff_ids(&self, company_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT u.id FROM users u \
             JOIN roles r ON u.role_id = r.id \
             WHERE u.company_id = $1 AND u.is_active = true AND r.name IN ($2, $3)",
        )
        .bind(company_id)
        .bind(ROLE_COMPANY_ADMIN)
        .bind(ROLE_OSH_RESPONSIBLE)
        .fetch_all(&self.pool)
        .await
    }

    /// Look up the most recent persisted event row matching the given type name.
    ///
    /// The persistence service writes events asynchronously, so there is a
    /// small window where the row may not exist yet. In that case `None` is
    /// returned and the notification is skipped.
    async fn find_latest_event_id(&self, event_type: &str) -> Option<DbId> {
        EventRepo::find_latest_by_type(&self.pool, event_type)
            .await
            .ok()
            .flatten()
            .map(|row| row.id)
    }

    /// Push a notification frame to all of a user's connections.
    async fn push_notification(&self, user_id: DbId, event: &DomainEvent) {
        let msg = serde_json::json!({
            "type": "notification",
            "event_type": event.event_type,
            "payload": event.payload,
            "timestamp": event.timestamp,
        });
        self.ws_manager
            .send_to_user(user_id, Message::Text(msg.to_string().into()))
            .await;
    }
}
