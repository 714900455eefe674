use crate::domain::model::CartUpdateEvent;
use crate::domain::ports::CartEventPublisher;
use tokio::sync::broadcast;

#[derive(Debug, Clone, PartialEq)]
pub struct PublishedEvent {
    pub name: String,
    pub payload: CartUpdateEvent,
}

/// Page-wide event bus backed by a tokio broadcast channel.
#[derive(Debug, Clone)]
pub struct BroadcastPublisher {
    sender: broadcast::Sender<PublishedEvent>,
}

impl BroadcastPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
        self.sender.subscribe()
    }
}

impl CartEventPublisher for BroadcastPublisher {
    fn publish(&self, event: &str, payload: &CartUpdateEvent) {
        let published = PublishedEvent {
            name: event.to_string(),
            payload: payload.clone(),
        };
        // No subscribers is not an error for a best-effort channel.
        match self.sender.send(published) {
            Ok(receivers) => tracing::debug!(event, receivers, "Published cart event"),
            Err(_) => tracing::debug!(event, "No listeners for cart event"),
        }
    }
}
