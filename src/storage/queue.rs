//! # Save Queue
//!
//! A single writer for the task list. Callers hand over snapshots without
//! waiting; one background task writes them in the order they were queued,
//! so the last value on the device is always the last mutation.
//!
//! Snapshots that pile up while a write is in flight are coalesced: only the
//! newest one is written.
//!
//! Write failures are logged and dropped. There is no retry.

use log::{debug, warn};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::PersistenceAdapter;

enum SaveCommand {
    Write(Vec<String>),
    Flush(oneshot::Sender<()>),
}

pub struct SaveQueue {
    tx: mpsc::UnboundedSender<SaveCommand>,
    worker: JoinHandle<()>,
}

impl SaveQueue {
    /// Start the writer task. Must be called from within a tokio runtime.
    pub fn spawn(adapter: PersistenceAdapter) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_writer(adapter, rx));
        Self { tx, worker }
    }

    /// Queue a snapshot for writing. Never blocks.
    pub fn enqueue(&self, tasks: Vec<String>) {
        debug!("Queueing save of {} tasks", tasks.len());
        if self.tx.send(SaveCommand::Write(tasks)).is_err() {
            warn!("Save queue closed, dropping snapshot");
        }
    }

    /// Wait until every snapshot queued before this call has been written.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(SaveCommand::Flush(ack_tx)).is_err() {
            warn!("Save queue closed, nothing to flush");
            return;
        }
        let _ = ack_rx.await;
    }

    /// Write whatever is still queued, then stop the writer.
    pub async fn shutdown(self) {
        let Self { tx, worker } = self;
        drop(tx);
        if let Err(e) = worker.await {
            warn!("Save queue worker ended abnormally: {}", e);
        }
    }
}

async fn run_writer(adapter: PersistenceAdapter, mut rx: mpsc::UnboundedReceiver<SaveCommand>) {
    while let Some(command) = rx.recv().await {
        match command {
            SaveCommand::Write(mut tasks) => {
                // Coalesce with whatever else is already waiting, stopping at a flush
                let mut acks = Vec::new();
                let mut skipped = 0usize;
                while let Ok(next) = rx.try_recv() {
                    match next {
                        SaveCommand::Write(newer) => {
                            tasks = newer;
                            skipped += 1;
                        }
                        SaveCommand::Flush(ack) => {
                            acks.push(ack);
                            break;
                        }
                    }
                }
                if skipped > 0 {
                    debug!("Coalesced {} queued saves", skipped);
                }

                match adapter.save(&tasks).await {
                    Ok(()) => debug!(
                        "Saved {} tasks to {} store",
                        tasks.len(),
                        adapter.store_name()
                    ),
                    Err(e) => warn!("Failed to save tasks: {}", e),
                }

                for ack in acks {
                    let _ = ack.send(());
                }
            }
            SaveCommand::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
    debug!("Save queue drained");
}
