//! Snapshot streaming of queue contents
//!
//! [`Queue::stream`] copies the contents once, under the lock, and hands them
//! to a background producer that feeds a bounded channel. The stream is
//! finite, one-shot and reflects the queue as it was at the time of the call;
//! later inserts and removals are not seen. Callers that need live consistency
//! must serialise streaming against mutation themselves.
//!
//! Production happens on a tokio task when a runtime is available and on a
//! dedicated thread otherwise, so the stream can be consumed from async code
//! (`recv`, or as a `futures::Stream`) and from plain threads (`blocking_recv`).

use crate::queue::facade::Queue;
use futures::Stream;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::{broadcast, mpsc};

/// Channel capacity used by [`Queue::stream_default`]
pub const DEFAULT_STREAM_BUFFER: usize = 16;

/// Cooperative cancellation for a running stream producer
#[derive(Debug, Clone)]
pub struct CancelHandle {
    cancel_tx: broadcast::Sender<()>,
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    fn new() -> Self {
        let (cancel_tx, _) = broadcast::channel(1);
        Self {
            cancel_tx,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<()> {
        self.cancel_tx.subscribe()
    }

    /// Stop the producer before its next emission
    ///
    /// Items already in the channel can still be received.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        let _ = self.cancel_tx.send(());
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Receiving end of a queue snapshot stream
///
/// Dropping the stream cancels the producer.
#[derive(Debug)]
pub struct ElementStream<T> {
    rx: mpsc::Receiver<T>,
    cancel: CancelHandle,
}

impl<T: Send + 'static> ElementStream<T> {
    pub(crate) fn spawn(items: Vec<T>, buffer: usize) -> Self {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        let cancel = CancelHandle::new();
        let producer_cancel = cancel.clone();
        let total = items.len();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let cancel_rx = cancel.subscribe();
                handle.spawn(produce(items, tx, producer_cancel, cancel_rx));
            }
            Err(_) => {
                std::thread::spawn(move || produce_blocking(items, tx, producer_cancel));
            }
        }

        log::debug!("streaming {} element(s) through a buffer of {}", total, buffer.max(1));
        Self { rx, cancel }
    }
}

impl<T> ElementStream<T> {
    /// Next content, or `None` once the snapshot is exhausted or the producer stopped
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Blocking variant of [`recv`](Self::recv); must not be called from async code
    pub fn blocking_recv(&mut self) -> Option<T> {
        self.rx.blocking_recv()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }
}

impl<T> Stream for ElementStream<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

impl<T> Drop for ElementStream<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn produce<T>(
    items: Vec<T>,
    tx: mpsc::Sender<T>,
    cancel: CancelHandle,
    mut cancel_rx: broadcast::Receiver<()>,
) {
    for item in items {
        if cancel.is_cancelled() {
            log::debug!("stream producer cancelled");
            return;
        }
        tokio::select! {
            biased;
            _ = cancel_rx.recv() => {
                log::debug!("stream producer cancelled while waiting for capacity");
                return;
            }
            sent = tx.send(item) => {
                if sent.is_err() {
                    // receiver gone
                    return;
                }
            }
        }
    }
}

fn produce_blocking<T>(items: Vec<T>, tx: mpsc::Sender<T>, cancel: CancelHandle) {
    for item in items {
        if cancel.is_cancelled() {
            log::debug!("stream producer cancelled");
            return;
        }
        if tx.blocking_send(item).is_err() {
            return;
        }
    }
}

impl<T: Clone + Send + 'static> Queue<T> {
    /// Stream a snapshot of the contents in buffer order
    ///
    /// `buffer` is the channel capacity; 0 is treated as 1.
    pub fn stream(&self, buffer: usize) -> ElementStream<T> {
        ElementStream::spawn(self.all_elements(), buffer)
    }

    pub fn stream_default(&self) -> ElementStream<T> {
        self.stream(DEFAULT_STREAM_BUFFER)
    }
}
