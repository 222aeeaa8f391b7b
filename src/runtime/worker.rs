//! Async worker: services fetch requests against a record source

use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use futures::future::{AbortHandle, AbortRegistration, Abortable};

use crate::data::RecordSource;
use crate::domain::RecordKind;
use crate::runtime::bridge::{RuntimeCommand, RuntimeEvent};

const COMMAND_POLL: Duration = Duration::from_millis(10);

/// Run the worker loop until `Shutdown` or until the bridge goes away.
pub async fn run_async_worker(
    source: Arc<dyn RecordSource>,
    cmd_rx: Receiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) {
    tracing::info!(source = %source.describe(), "refresh worker started");
    let mut in_flight: HashMap<RecordKind, AbortHandle> = HashMap::new();

    loop {
        match cmd_rx.try_recv() {
            Ok(RuntimeCommand::Shutdown) | Err(TryRecvError::Disconnected) => break,
            Ok(RuntimeCommand::Fetch { seq, kind }) => {
                if let Some(previous) = in_flight.remove(&kind) {
                    previous.abort();
                    tracing::debug!(?kind, seq, "aborted superseded fetch");
                }
                let (handle, registration) = AbortHandle::new_pair();
                in_flight.insert(kind, handle);
                spawn_fetch(Arc::clone(&source), seq, kind, registration, evt_tx.clone());
            }
            Err(TryRecvError::Empty) => tokio::time::sleep(COMMAND_POLL).await,
        }
    }

    for (_, handle) in in_flight.drain() {
        handle.abort();
    }
    tracing::info!("refresh worker stopped");
}

fn spawn_fetch(
    source: Arc<dyn RecordSource>,
    seq: u64,
    kind: RecordKind,
    registration: AbortRegistration,
    evt_tx: Sender<RuntimeEvent>,
) {
    tracing::debug!(?kind, seq, "fetch issued");
    tokio::spawn(async move {
        let fetch = async { source.fetch(kind).await };
        let event = match Abortable::new(fetch, registration).await {
            Err(_aborted) => return,
            Ok(Ok(snapshot)) => {
                tracing::debug!(?kind, seq, records = snapshot.len(), "fetch completed");
                RuntimeEvent::Loaded { seq, snapshot }
            }
            Ok(Err(err)) => {
                tracing::warn!(?kind, seq, error = %err, "fetch failed");
                RuntimeEvent::Failed {
                    seq,
                    kind,
                    message: err.to_string(),
                }
            }
        };
        let _ = evt_tx.send(event);
    });
}
