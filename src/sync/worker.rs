//! Background uploads
//!
//! The payload is serialized before the worker starts, so edits made while an
//! upload is in flight never leak into it. Cancellation is advisory: a job
//! that has not reached the transport yet is skipped, one already sending runs
//! to completion and its result is reported as cancelled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::error::TransportError;

use super::transport::{Transport, UploadAck};

/// Final state of a background upload
#[derive(Debug)]
pub enum SyncStatus {
    Completed(UploadAck),
    Failed(TransportError),
    /// Cancelled before or while sending; the remote may or may not have the file
    Cancelled,
}

/// Handle to an upload running on a worker thread
#[derive(Debug)]
pub struct SyncHandle {
    path: String,
    cancel: Arc<AtomicBool>,
    rx: Receiver<Result<UploadAck, TransportError>>,
    thread: Option<JoinHandle<()>>,
    status: Option<SyncStatus>,
}

impl SyncHandle {
    /// Start uploading `payload` on a new thread
    pub fn spawn(transport: Arc<dyn Transport>, payload: Vec<u8>, path: String) -> Self {
        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));

        let worker_cancel = Arc::clone(&cancel);
        let worker_path = path.clone();
        let thread = std::thread::spawn(move || {
            if worker_cancel.load(Ordering::SeqCst) {
                tracing::debug!(path = %worker_path, "upload cancelled before start");
                return;
            }
            let result = transport.upload(&payload, &worker_path);
            let _ = tx.send(result);
        });

        Self {
            path,
            cancel,
            rx,
            thread: Some(thread),
            status: None,
        }
    }

    /// Canonical path being uploaded
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Request cancellation; local history is never affected
    pub fn cancel(&self) {
        tracing::warn!(path = %self.path, "upload cancellation requested");
        self.cancel.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    /// Non-blocking poll; `None` while the upload is still running
    pub fn try_result(&mut self) -> Option<&SyncStatus> {
        if self.status.is_none() {
            match self.rx.try_recv() {
                Ok(result) => self.finish(Some(result)),
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => self.finish(None),
            }
        }
        self.status.as_ref()
    }

    /// Block until the upload finishes
    pub fn wait(mut self) -> SyncStatus {
        if let Some(status) = self.status.take() {
            return status;
        }
        let result = self.rx.recv().ok();
        self.finish(result);
        self.status.take().unwrap_or(SyncStatus::Cancelled)
    }

    fn finish(&mut self, result: Option<Result<UploadAck, TransportError>>) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::warn!(path = %self.path, "upload worker panicked");
            }
        }

        let status = match result {
            _ if self.is_cancelled() => SyncStatus::Cancelled,
            Some(Ok(ack)) => {
                tracing::info!(path = %ack.path, bytes = ack.bytes, "upload completed");
                SyncStatus::Completed(ack)
            }
            Some(Err(e)) => {
                tracing::warn!(path = %self.path, "upload failed: {}", e);
                SyncStatus::Failed(e)
            }
            None => SyncStatus::Cancelled,
        };
        self.status = Some(status);
    }
}
