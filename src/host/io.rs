use tokio::{
    io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader},
    sync::mpsc::{UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};

use super::commands::{parse_line, HostCommand};
use crate::domain::OutboundEvent;

/// Reads JSON lines from stdin until EOF. Bad lines are logged and skipped.
pub fn spawn_stdin_reader(tx: UnboundedSender<HostCommand>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match parse_line(&line) {
                    Ok(Some(command)) => {
                        if tx.send(command).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(err) => {
                        tracing::warn!(
                            target: "host",
                            error = %err,
                            line = %line,
                            "ignoring malformed command"
                        );
                    }
                },
                Ok(None) => {
                    tracing::info!(target: "host", "stdin closed");
                    break;
                }
                Err(err) => {
                    tracing::error!(target: "host", error = %err, "failed to read stdin");
                    break;
                }
            }
        }
    })
}

/// Writes one JSON object per outbound event to stdout.
pub fn spawn_stdout_writer(mut rx: UnboundedReceiver<OutboundEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut stdout = io::stdout();
        while let Some(event) = rx.recv().await {
            let mut line = match serde_json::to_vec(&event) {
                Ok(line) => line,
                Err(err) => {
                    tracing::error!(
                        target: "host",
                        error = %err,
                        ?event,
                        "failed to encode event"
                    );
                    continue;
                }
            };
            line.push(b'\n');
            if let Err(err) = stdout.write_all(&line).await {
                tracing::debug!(
                    target: "host",
                    error = %err,
                    "stdout closed; dropping events"
                );
                break;
            }
            let _ = stdout.flush().await;
        }
    })
}
