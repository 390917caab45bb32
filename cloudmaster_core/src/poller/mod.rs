/*
* Refresh loop.
*
* A cancellable repeating task that re-fetches a backend's vm list on a
* fixed period and publishes each outcome on a channel. Every consumer
* starts its own timer, there is no shared fan-out state between views.
*/
use crate::rest::RestClient;
use crate::vm::Vm;

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

// Error Handling
use log::trace;

/// One refresh outcome: the new full list, or the failure message to
/// surface. The previously delivered list stays valid after a failure.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PollEvent {
    Refresh(Vec<Vm>),
    Failed(String),
}

pub struct Poller;

pub struct PollHandle {
    rx: mpsc::Receiver<PollEvent>,
    timer: JoinHandle<()>,
}

impl Poller {
    /// Start a refresh loop against one backend.
    /// The first tick fires one full period after start; the eager
    /// initial fetch is the caller's own one-shot call.
    pub fn start(client: RestClient, period: Duration) -> PollHandle {
        let (tx, rx) = mpsc::channel(32);

        let timer = tokio::spawn(async move {
            let mut clock = interval_at(Instant::now() + period, period);
            loop {
                tokio::select! {
                    _ = tx.closed() => break,
                    _ = clock.tick() => {
                        // No in-flight guard: a slow request may overlap
                        // the next tick. The timer never waits on it.
                        let client = client.clone();
                        let tx = tx.clone();
                        tokio::spawn(async move {
                            let event = match client.list().await {
                                Ok(vms) => PollEvent::Refresh(vms),
                                Err(e) => PollEvent::Failed(e.to_string()),
                            };
                            let _ = tx.send(event).await;
                        });
                    }
                }
            }
            trace!("Refresh loop stopped.");
        });

        PollHandle { rx, timer }
    }
}

impl PollHandle {
    /// Next refresh outcome. None once the loop is stopped and drained.
    pub async fn recv(&mut self) -> Option<PollEvent> {
        self.rx.recv().await
    }
    /// Stop scheduling ticks. In-flight requests run to completion on
    /// their own tasks.
    pub fn stop(&self) {
        self.timer.abort();
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.timer.abort();
    }
}
