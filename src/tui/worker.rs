//! Background thread that talks to the notes service.
//!
//! The event loop must keep drawing while a request is in flight, so network
//! calls run here, one at a time and in submission order. Responses come back
//! over a channel the loop drains between frames.
//!
//! Dropping the worker never waits on the network: an idle thread is joined,
//! a busy one is left to finish on its own when the process exits.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::api::{NotesApi, NotesClient, Request, Response};

pub struct Worker {
    requests: Option<Sender<Request>>,
    responses: Receiver<Response>,
    handle: Option<JoinHandle<()>>,
    /// Requests submitted but not yet executed to completion
    pending: Arc<AtomicUsize>,
}

impl Worker {
    /// Starts the worker thread, which owns `client` until the worker is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn<A: NotesApi + 'static>(client: NotesClient<A>) -> Result<Self> {
        let (request_tx, request_rx) = mpsc::channel::<Request>();
        let (response_tx, response_rx) = mpsc::channel::<Response>();
        let pending = Arc::new(AtomicUsize::new(0));
        let worker_pending = Arc::clone(&pending);

        let handle = thread::Builder::new()
            .name("notes-worker".to_string())
            .spawn(move || {
                for request in request_rx {
                    debug!(?request, "executing request");
                    let response = client.execute(request);
                    worker_pending.fetch_sub(1, Ordering::SeqCst);
                    if response_tx.send(response).is_err() {
                        break;
                    }
                }
                debug!("notes worker stopped");
            })
            .context("Failed to spawn notes worker")?;

        Ok(Self {
            requests: Some(request_tx),
            responses: response_rx,
            handle: Some(handle),
            pending,
        })
    }

    /// Queues a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker thread has exited.
    pub fn submit(&self, request: Request) -> Result<()> {
        let sender = self.requests.as_ref().context("notes worker is shut down")?;
        self.pending.fetch_add(1, Ordering::SeqCst);
        sender.send(request).map_err(|err| {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            anyhow::Error::new(err).context("notes worker is not running")
        })
    }

    /// Number of submitted requests the thread has not finished.
    fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Returns a finished response if one is ready.
    pub fn try_recv(&self) -> Option<Response> {
        match self.responses.try_recv() {
            Ok(response) => Some(response),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Waits up to `timeout` for a response.
    #[cfg(test)]
    fn recv_timeout(&self, timeout: std::time::Duration) -> Option<Response> {
        self.responses.recv_timeout(timeout).ok()
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // closing the request channel ends the thread's loop
        self.requests.take();
        let Some(handle) = self.handle.take() else {
            return;
        };
        let pending = self.pending();
        if pending == 0 {
            let _ = handle.join();
        } else {
            warn!(pending, "exiting with requests in flight; not waiting for the service");
        }
    }
}
