//! Graceful shutdown of the HTTP listener.
//!
//! `HttpServer::run` holds a receiver and stops accepting connections once
//! it fires. Requests already in flight run to completion, including a bulk
//! generation or a forward still waiting on its upstream.

use std::future::Future;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::lifecycle::signals;

/// Shutdown trigger shared by a server and whoever decides it should stop.
///
/// Receivers must subscribe before `trigger`; a late subscriber never
/// sees the request.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver to pass to `HttpServer::run`.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every subscribed server to stop. Returns how many were notified.
    pub fn trigger(&self) -> usize {
        let notified = self.tx.send(()).unwrap_or(0);
        tracing::debug!(listeners = notified, "Shutdown triggered");
        notified
    }

    /// Trigger once `event` resolves.
    pub fn trigger_when<F>(self, event: F) -> JoinHandle<usize>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(async move {
            event.await;
            self.trigger()
        })
    }

    /// Trigger on the first SIGINT or SIGTERM.
    pub fn trigger_on_signal(self) -> JoinHandle<usize> {
        self.trigger_when(signals::wait_for_signal())
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
