//! Push-based document lifecycle feed
//!
//! Each document has a watch channel holding its latest snapshot. A
//! subscription is a receiver on that channel: the first `recv` resolves
//! immediately with the lookup result, later calls resolve when the backend
//! publishes a newer record. Every delivered value is a full snapshot that
//! replaces prior state, never a delta, and snapshots are never reordered.

use recibo_core::models::ReceiptDocument;
use tokio::sync::watch;
use uuid::Uuid;

/// Handle for one subscriber observing one document.
///
/// Dropping the handle unsubscribes. A snapshot published after the drop is
/// simply not delivered anywhere; nothing panics and no stale callback runs.
pub struct DocumentSubscription {
    document_id: Uuid,
    rx: watch::Receiver<Option<ReceiptDocument>>,
    delivered_initial: bool,
}

impl DocumentSubscription {
    pub(crate) fn new(document_id: Uuid, rx: watch::Receiver<Option<ReceiptDocument>>) -> Self {
        DocumentSubscription {
            document_id,
            rx,
            delivered_initial: false,
        }
    }

    pub fn document_id(&self) -> Uuid {
        self.document_id
    }

    /// Latest snapshot without waiting. `None` means the id does not resolve.
    pub fn snapshot(&self) -> Option<ReceiptDocument> {
        self.rx.borrow().clone()
    }

    /// Wait for the next snapshot.
    ///
    /// The first call resolves immediately with the lookup result, so a
    /// consumer can distinguish "not found" from "nothing delivered yet".
    /// Later calls resolve when the record changes. Returns `None` only when
    /// the backend side of the channel is gone.
    pub async fn recv(&mut self) -> Option<Option<ReceiptDocument>> {
        if !self.delivered_initial {
            self.delivered_initial = true;
            return Some(self.rx.borrow_and_update().clone());
        }

        match self.rx.changed().await {
            Ok(()) => Some(self.rx.borrow_and_update().clone()),
            Err(_) => None,
        }
    }
}

/// Backend-side publisher for one document's feed.
pub(crate) struct DocumentFeed {
    tx: watch::Sender<Option<ReceiptDocument>>,
}

impl DocumentFeed {
    pub(crate) fn new(initial: Option<ReceiptDocument>) -> Self {
        let (tx, _rx) = watch::channel(initial);
        DocumentFeed { tx }
    }

    /// Publish a full snapshot. Publishing with zero live subscribers is a
    /// no-op, not an error.
    pub(crate) fn publish(&self, snapshot: ReceiptDocument) {
        self.tx.send_replace(Some(snapshot));
    }

    pub(crate) fn subscribe(&self, document_id: Uuid) -> DocumentSubscription {
        DocumentSubscription::new(document_id, self.tx.subscribe())
    }
}
