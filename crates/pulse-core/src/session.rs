//! Last-request-wins search session.
//!
//! A session owns the single in-memory result slot. Each search takes a
//! ticket; starting a new search aborts the previous in-flight one, and a
//! search whose ticket is no longer the newest when it settles is discarded
//! instead of overwriting a later result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::AbortHandle;

use crate::analyze::{analyze, ModelCollaborator};
use crate::error::{PulseError, UpstreamError};
use crate::types::{PulseResult, Topic};

#[derive(Debug, Default)]
pub struct SearchSession {
    generation: AtomicU64,
    in_flight: Mutex<Option<(u64, AbortHandle)>>,
    latest: Mutex<Option<Arc<PulseResult>>>,
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one search for `raw_topic` and publish its result to the slot.
    ///
    /// The topic is validated before anything else, so an empty topic never
    /// reaches the collaborator. On success the slot is replaced wholesale;
    /// on failure it is left as it was.
    ///
    /// # Errors
    ///
    /// - [`PulseError::EmptyTopic`] for an empty topic.
    /// - [`PulseError::Superseded`] if a newer search started before this one
    ///   settled.
    /// - Any error from [`analyze`].
    pub async fn search(
        &self,
        model: Arc<dyn ModelCollaborator>,
        raw_topic: &str,
    ) -> Result<Arc<PulseResult>, PulseError> {
        let topic = Topic::parse(raw_topic)?;
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(ticket, topic = %topic, "search started");

        let task = tokio::spawn(async move { analyze(model.as_ref(), &topic).await });
        {
            let mut in_flight = self.in_flight.lock().await;
            if let Some((current, _)) = in_flight.as_ref() {
                if *current > ticket {
                    task.abort();
                    return Err(PulseError::Superseded);
                }
            }
            if let Some((previous, handle)) = in_flight.replace((ticket, task.abort_handle())) {
                tracing::debug!(previous, ticket, "aborting superseded search");
                handle.abort();
            }
        }

        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => return Err(PulseError::Superseded),
            Err(e) => {
                return Err(UpstreamError::new(format!("search task failed: {e}")).into());
            }
        };

        let mut slot = self.latest.lock().await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, "discarding stale search outcome");
            return Err(PulseError::Superseded);
        }
        let result = Arc::new(outcome?);
        *slot = Some(Arc::clone(&result));
        Ok(result)
    }

    /// The most recent successful result, if any.
    pub async fn latest(&self) -> Option<Arc<PulseResult>> {
        self.latest.lock().await.clone()
    }
}
