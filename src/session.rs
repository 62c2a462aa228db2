//! Submission pipeline and per-session result state
//!
//! `DiagnosisSession` runs form → case → credential → client and turns whatever happens
//! into a `SubmissionResult`. Callers observe the loading flag and the latest result
//! through a watch channel. Transport errors never escape this module.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::case::{build_case, FormState};
use crate::client::{ClientError, DiagnosisClient};

/// Shown whenever the server gives no usable detail
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to get diagnosis. Please try again.";

/// Outcome handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum SubmissionResult {
    /// Diagnosis body exactly as received
    Success(Value),
    /// Human-readable failure message
    Failure(String),
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Normalize a client outcome
    pub fn from_outcome(outcome: Result<Value, ClientError>) -> Self {
        match outcome {
            Ok(body) => Self::Success(body),
            Err(e) => Self::Failure(failure_message(&e)),
        }
    }
}

fn failure_message(error: &ClientError) -> String {
    error
        .detail()
        .map(str::to_string)
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
}

/// What the presentation layer renders
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub loading: bool,
    pub result: Option<SubmissionResult>,
}

/// How responses that settle out of order are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseOrdering {
    /// Every settled response overwrites the state, whichever was dispatched last
    #[default]
    LastWriteWins,
    /// Only the most recently dispatched submission may update the state
    LatestOnly,
}

pub struct DiagnosisSession {
    client: DiagnosisClient,
    ordering: ResponseOrdering,
    state_tx: watch::Sender<SessionState>,
    issued: AtomicU64,
}

/// Clears the loading flag when a submission ends, including when its future is dropped
struct LoadingGuard<'a> {
    session: &'a DiagnosisSession,
    ticket: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.session.may_apply(self.ticket) {
            self.session.state_tx.send_modify(|state| state.loading = false);
        }
    }
}

impl DiagnosisSession {
    pub fn new(client: DiagnosisClient) -> Self {
        Self::with_ordering(client, ResponseOrdering::default())
    }

    pub fn with_ordering(client: DiagnosisClient, ordering: ResponseOrdering) -> Self {
        let (state_tx, _) = watch::channel(SessionState::default());
        Self {
            client,
            ordering,
            state_tx,
            issued: AtomicU64::new(0),
        }
    }

    pub fn ordering(&self) -> ResponseOrdering {
        self.ordering
    }

    pub fn client(&self) -> &DiagnosisClient {
        &self.client
    }

    /// Receive every loading/result change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SessionState {
        self.state_tx.borrow().clone()
    }

    fn may_apply(&self, ticket: u64) -> bool {
        match self.ordering {
            ResponseOrdering::LastWriteWins => true,
            ResponseOrdering::LatestOnly => self.issued.load(Ordering::SeqCst) == ticket,
        }
    }

    /// Run one submission.
    ///
    /// Each call sends its own request; concurrent calls are not coalesced. The returned
    /// result is this call's outcome even if it was too stale to be published.
    pub async fn submit(&self, form: &FormState) -> SubmissionResult {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        self.state_tx.send_modify(|state| {
            state.loading = true;
            state.result = None;
        });
        let _guard = LoadingGuard {
            session: self,
            ticket,
        };

        let case = build_case(form);
        let credential = form.credential();
        let header = credential.header();

        info!(
            "Submission #{} dispatched: case {}, ai assistance {}",
            ticket,
            case.case_id,
            credential
                .provider()
                .map(|p| p.display_name())
                .unwrap_or("off")
        );

        let outcome = self.client.analyze(&case, header.as_ref()).await;
        if let Err(ref e) = outcome {
            warn!("Submission #{} failed: {}", ticket, e);
        }
        let result = SubmissionResult::from_outcome(outcome);

        if self.may_apply(ticket) {
            let published = result.clone();
            self.state_tx.send_modify(|state| state.result = Some(published));
            debug!("Submission #{} settled: success={}", ticket, result.is_success());
        } else {
            debug!("Submission #{} settled after a newer dispatch; discarded", ticket);
        }

        result
    }
}
