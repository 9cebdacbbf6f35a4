use tokio::sync::mpsc::UnboundedSender;

use crate::domain::OutboundEvent;

/// Fire-and-forget channel towards the host.
///
/// A closed receiver means nobody is listening (the host went away); that is
/// expected and never reported as an error.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: UnboundedSender<OutboundEvent>,
}

impl Notifier {
    pub fn new(tx: UnboundedSender<OutboundEvent>) -> Self {
        Self { tx }
    }

    pub fn send(&self, event: OutboundEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!(target: "host", "outbound channel closed; event dropped");
        }
    }
}
