//! Vigia event bus and durable event log.
//!
//! Building blocks for the platform-wide change-notification channel:
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`DomainEvent`] -- the canonical domain event envelope.
//! - [`EventPersistence`] -- background service that durably writes every
//!   event to the `events` table.
//!
//! Ordering between independent subscribers is not guaranteed and must not
//! be relied upon.

pub mod bus;
pub mod persistence;

pub use bus::{DomainEvent, EventBus};
pub use persistence::EventPersistence;
