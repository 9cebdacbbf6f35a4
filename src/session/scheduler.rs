use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

use super::events::PageEvent;

/// Delivers page events back to the session after a delay.
///
/// Scheduled events are never cancelled. Two passes may land back to back
/// when navigations outrun the delay; passes are idempotent so the page
/// settles on the latest settings either way. Events scheduled for a session
/// that has since been replaced are dropped with its receiver.
#[derive(Debug, Clone)]
pub struct PassScheduler {
    tx: UnboundedSender<PageEvent>,
}

impl PassScheduler {
    pub fn new(tx: UnboundedSender<PageEvent>) -> Self {
        Self { tx }
    }

    pub fn schedule(&self, delay: Duration, event: PageEvent) {
        tracing::debug!(
            target: "scheduler",
            delay_ms = delay.as_millis() as u64,
            ?event,
            "event scheduled"
        );
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let _ = tx.send(event);
        });
    }
}
