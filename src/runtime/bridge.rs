//! Runtime bridge: connects the synchronous TUI thread with the Tokio worker

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use tokio::runtime::Builder;

use crate::data::{RecordSource, Snapshot};
use crate::domain::RecordKind;
use crate::runtime::worker::run_async_worker;

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCommand {
    /// Fetch a collection. Supersedes any in-flight fetch of the same kind.
    Fetch { seq: u64, kind: RecordKind },
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the async worker to the TUI
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeEvent {
    Loaded { seq: u64, snapshot: Snapshot },
    Failed {
        seq: u64,
        kind: RecordKind,
        message: String,
    },
}

impl RuntimeEvent {
    pub fn seq(&self) -> u64 {
        match self {
            RuntimeEvent::Loaded { seq, .. } | RuntimeEvent::Failed { seq, .. } => *seq,
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            RuntimeEvent::Loaded { snapshot, .. } => snapshot.kind(),
            RuntimeEvent::Failed { kind, .. } => *kind,
        }
    }
}

/// Bridge between the sync TUI thread and the async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: Sender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    /// Spawn the worker thread with its own Tokio runtime
    pub fn new(source: Arc<dyn RecordSource>) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();

        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .context("failed to create Tokio runtime")?;

        thread::Builder::new()
            .name("agencia-runtime".to_string())
            .spawn(move || {
                runtime.block_on(run_async_worker(source, cmd_rx, evt_tx));
            })
            .context("failed to spawn runtime thread")?;

        Ok(Self { cmd_tx, evt_rx })
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("worker channel closed"))
    }

    pub fn fetch(&self, seq: u64, kind: RecordKind) -> anyhow::Result<()> {
        self.send(RuntimeCommand::Fetch { seq, kind })
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        self.evt_rx.try_iter().collect()
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}
