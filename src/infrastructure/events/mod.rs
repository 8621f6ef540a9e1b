//! Event bus for decoupled communication between modules.
//!
//! Services hand domain events to the [`EventPublisher`], which stores the
//! serialized envelope and then broadcasts the event to every subscribed
//! listener.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::domain::events::{serialize_event, DomainEvent, EventRepository};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Event bus for broadcasting events
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a new event bus with specified capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Emit an event
    pub fn emit(&self, event: DomainEvent) {
        // Ignore send errors (no receivers)
        let _ = self.sender.send(event);
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

/// Persists events and forwards them to the bus.
#[derive(Clone)]
pub struct EventPublisher {
    store: Arc<dyn EventRepository>,
    bus: Arc<EventBus>,
}

impl EventPublisher {
    pub fn new(store: Arc<dyn EventRepository>, bus: Arc<EventBus>) -> Self {
        Self { store, bus }
    }

    /// Store the event envelope, then broadcast the event.
    pub async fn publish(&self, event: DomainEvent) -> Result<(), AppError> {
        let envelope = serialize_event(&event)?;
        self.store.append(&envelope).await?;

        tracing::debug!(
            event_type = %envelope.event_type,
            aggregate_id = %envelope.aggregate_id,
            "Domain event published"
        );
        metrics::record_event_published(envelope.event_type.as_str());

        self.bus.emit(event);
        Ok(())
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }
}
