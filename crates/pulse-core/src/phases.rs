//! Cosmetic progress messages shown while a search is in flight.
//!
//! The messages advance on a fixed timer and say nothing about real request
//! progress. The ticker runs as its own task and is aborted as soon as the
//! search settles, whichever way it settles.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Messages in display order. The last one holds until the search settles.
pub const PHASES: [&str; 4] = [
    "Initializing sensors...",
    "Scanning social media...",
    "Analyzing sentiment...",
    "Synthesizing perspectives...",
];

pub const DEFAULT_PHASE_INTERVAL: Duration = Duration::from_millis(1500);

/// A running phase ticker. Aborted on [`PhaseTicker::stop`] or drop.
pub struct PhaseTicker {
    handle: JoinHandle<()>,
}

impl PhaseTicker {
    /// Spawn a ticker that reports the first phase immediately and then one
    /// more phase per `interval`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(interval: Duration, mut on_phase: F) -> Self
    where
        F: FnMut(&'static str) + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut phases = PHASES.iter();
            if let Some(first) = phases.next() {
                on_phase(first);
            }
            for phase in phases {
                tokio::time::sleep(interval).await;
                on_phase(phase);
            }
        });
        Self { handle }
    }

    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for PhaseTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Await `work` while a [`PhaseTicker`] reports phases through `on_phase`.
///
/// The ticker is torn down when `work` completes, and also if this future is
/// dropped before that.
pub async fn with_phases<W, F>(interval: Duration, on_phase: F, work: W) -> W::Output
where
    W: Future,
    F: FnMut(&'static str) + Send + 'static,
{
    let ticker = PhaseTicker::spawn(interval, on_phase);
    let output = work.await;
    ticker.stop();
    output
}
