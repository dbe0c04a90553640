use tokio::sync::broadcast;

use crate::modules::support::domain::SupportEvent;

/// 事件总线
///
/// 进程内广播，没有订阅者时事件直接丢弃
pub struct EventBus {
    sender: broadcast::Sender<SupportEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn publish(&self, event: SupportEvent) {
        match &event {
            SupportEvent::MoodLogFailed(e) => {
                tracing::warn!("[EventBus] {} for {}: {}", event.event_type(), e.user, e.error);
            }
            SupportEvent::TranslationDegraded(e) => {
                tracing::warn!("[EventBus] {} for {}: {}", event.event_type(), e.user, e.error);
            }
            _ => {
                tracing::debug!("[EventBus] Publishing event: {}", event.event_type());
            }
        }
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SupportEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
