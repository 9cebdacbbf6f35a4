use std::fmt;

use tokio::sync::watch;

/// Why the host loop is stopping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Interrupt,
    Terminate,
    HostClosed,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StopReason::Interrupt => "interrupt",
            StopReason::Terminate => "terminate",
            StopReason::HostClosed => "host closed",
        })
    }
}

/// Broadcasts the first stop request to every listener.
#[derive(Clone)]
pub struct Shutdown {
    sender: watch::Sender<Option<StopReason>>,
}

#[derive(Clone)]
pub struct ShutdownListener {
    receiver: watch::Receiver<Option<StopReason>>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }

    pub fn subscribe(&self) -> ShutdownListener {
        ShutdownListener {
            receiver: self.sender.subscribe(),
        }
    }

    /// Later reasons never overwrite the first one.
    pub fn trigger(&self, reason: StopReason) {
        self.sender.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(reason);
            true
        });
    }
}

impl ShutdownListener {
    pub async fn notified(&mut self) -> StopReason {
        loop {
            if let Some(reason) = *self.receiver.borrow_and_update() {
                return reason;
            }
            if self.receiver.changed().await.is_err() {
                return StopReason::HostClosed;
            }
        }
    }
}

pub fn install_signal_handlers(shutdown: Shutdown) {
    let interrupt = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!(target: "lifecycle", "ctrl-c received");
            interrupt.trigger(StopReason::Interrupt);
        }
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut sig) => {
                    sig.recv().await;
                    tracing::info!(target: "lifecycle", "SIGTERM received");
                    shutdown.trigger(StopReason::Terminate);
                }
                Err(err) => {
                    tracing::warn!(
                        target: "lifecycle",
                        error = %err,
                        "SIGTERM handler unavailable"
                    );
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn listeners_receive_the_reason() {
        let shutdown = Shutdown::new();
        let mut listener = shutdown.subscribe();
        let waiter = tokio::spawn(async move { listener.notified().await });
        shutdown.trigger(StopReason::Terminate);
        assert_eq!(waiter.await.unwrap(), StopReason::Terminate);
    }

    #[tokio::test]
    async fn first_reason_wins_for_late_subscribers() {
        let shutdown = Shutdown::new();
        shutdown.trigger(StopReason::Interrupt);
        shutdown.trigger(StopReason::HostClosed);
        assert_eq!(shutdown.subscribe().notified().await, StopReason::Interrupt);
    }
}
