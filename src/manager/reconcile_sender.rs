use flume::{Sender, TrySendError};
use tracing::{debug, error, warn};

use crate::{adapter::NfcStateChange, classifier::EventChannel, wire::NfcEvent};

use super::NfcReconcileMessage;

/// What the listener thread hands to the host reconciler in one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileBatch {
    Single(NfcReconcileMessage),
    Many(Vec<NfcReconcileMessage>),
}

/// Queue from the engine to the host listener thread, never blocks the caller
#[derive(Debug, Clone)]
pub struct ReconcileSender {
    sender: Sender<ReconcileBatch>,
}

impl ReconcileSender {
    pub fn new(sender: Sender<ReconcileBatch>) -> Self {
        Self { sender }
    }

    pub fn state_changed(&self, change: NfcStateChange) {
        self.send(ReconcileBatch::Single(NfcReconcileMessage::StateChanged(change)));
    }

    /// Generic `nfcEvent` first, then the kind's own channel, in one batch
    pub fn discovered(&self, event: NfcEvent) {
        let specific = event.kind.channel();
        let generic = NfcReconcileMessage::Discovered {
            channel: EventChannel::NfcEvent,
            event: event.clone(),
        };

        self.send(ReconcileBatch::Many(vec![
            generic,
            NfcReconcileMessage::Discovered { channel: specific, event },
        ]));
    }

    /// A full queue hands the batch to a task that waits for room
    fn send(&self, batch: ReconcileBatch) {
        debug!("send: {batch:?}");

        match self.sender.try_send(batch) {
            Ok(()) => {}
            Err(TrySendError::Full(batch)) => {
                warn!("reconcile queue is full, sending async");

                let sender = self.sender.clone();
                tagkit_tokio::task::spawn(async move {
                    if let Err(error) = sender.send_async(batch).await {
                        error!("unable to send reconcile message: {error}");
                    }
                });
            }
            Err(TrySendError::Disconnected(_)) => {
                error!("unable to send reconcile message, listener is gone");
            }
        }
    }
}
