// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Submits a Request and waits for the controller to report a terminal condition

use crate::constants::{exit_codes, API_GROUP};
use crate::error::{CourierError, Result};
use crate::types::{ConditionReason, Request};
use kube::{api::PostParams, Api};
use std::fmt;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Final verdict of a synchronous submission
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    Succeeded,
    Failed,
    Rejected,
    TimedOut,
}

impl PollOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            PollOutcome::Succeeded => exit_codes::SUCCEEDED,
            PollOutcome::Failed => exit_codes::FAILED,
            PollOutcome::Rejected => exit_codes::REJECTED,
            PollOutcome::TimedOut => exit_codes::ERROR,
        }
    }
}

impl fmt::Display for PollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PollOutcome::Succeeded => "succeeded",
            PollOutcome::Failed => "failed",
            PollOutcome::Rejected => "rejected",
            PollOutcome::TimedOut => "timed out",
        };
        f.write_str(s)
    }
}

/// Result of a successful submission
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    /// Name assigned by the API server
    pub name: String,
    /// `None` when the caller did not wait for completion
    pub outcome: Option<PollOutcome>,
}

impl Submission {
    pub fn exit_code(&self) -> u8 {
        self.outcome
            .map_or(exit_codes::SUCCEEDED, |outcome| outcome.exit_code())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum PollState {
    /// No status, or the controller has not settled on a single condition
    Pending,
    /// The controller reports the request as running
    Observing,
    Terminal { outcome: PollOutcome, message: String },
}

pub struct CompletionPoller {
    api: Api<Request>,
    interval: Duration,
}

impl CompletionPoller {
    pub fn new(api: Api<Request>, interval: Duration) -> Self {
        Self { api, interval }
    }

    /// Submit the request once and, when `sync` is set, wait for its outcome
    pub async fn submit_and_await(
        &self,
        request: &Request,
        sync: bool,
        timeout: Duration,
    ) -> Result<Submission> {
        let name = self.submit(request).await?;

        if !sync {
            info!("Request {} submitted, not waiting for completion", name);
            return Ok(Submission {
                name,
                outcome: None,
            });
        }

        let outcome = self.await_completion(&name, timeout).await?;
        Ok(Submission {
            name,
            outcome: Some(outcome),
        })
    }

    /// Create the Request and return the name the API server generated for it
    #[instrument(skip(self, request), fields(request = %request.spec.request))]
    pub async fn submit(&self, request: &Request) -> Result<String> {
        let created = self
            .api
            .create(&PostParams::default(), request)
            .await
            .map_err(|e| {
                if let kube::Error::Api(err) = &e {
                    if err.code == 404 {
                        error!(
                            "Request resource not served, is the {} CRD installed?",
                            API_GROUP
                        );
                    }
                }
                CourierError::SubmissionError(e)
            })?;

        let name = created.metadata.name.ok_or_else(|| {
            CourierError::ProtocolError(
                "created request has no name in its metadata".to_string(),
            )
        })?;

        info!(
            "Submitted request '{}' as {} with {} parameter(s)",
            request.spec.request,
            name,
            request.spec.params.len()
        );
        Ok(name)
    }

    /// Poll the Request status at a fixed interval until it reaches a terminal
    /// condition or `timeout` elapses
    #[instrument(skip(self))]
    pub async fn await_completion(&self, name: &str, timeout: Duration) -> Result<PollOutcome> {
        let started = Instant::now();
        let mut state = PollState::Pending;

        info!(
            "Waiting up to {}s for request {} to complete...",
            timeout.as_secs(),
            name
        );

        loop {
            let remaining = timeout.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                warn!(
                    "Timed out after {}s waiting for request {} (last state: {:?})",
                    timeout.as_secs(),
                    name,
                    state
                );
                return Ok(PollOutcome::TimedOut);
            }

            // A hung read must not outlive the deadline
            let Ok(observed) = tokio::time::timeout(remaining, self.observe(name)).await else {
                warn!(
                    "Timed out after {}s waiting for request {} while reading its status",
                    timeout.as_secs(),
                    name
                );
                return Ok(PollOutcome::TimedOut);
            };

            if let Some(next) = observed? {
                if next != state {
                    debug!("Request {} moved from {:?} to {:?}", name, state, next);
                }
                if let PollState::Terminal { outcome, message } = &next {
                    info!("Request {} {}: {}", name, outcome, message);
                    return Ok(*outcome);
                }
                if next == PollState::Observing && state != PollState::Observing {
                    info!("Request {} is running", name);
                }
                state = next;
            }

            let remaining = timeout.saturating_sub(started.elapsed());
            sleep(self.interval.min(remaining)).await;
        }
    }

    /// Read the current state of the request. `None` means the read failed
    /// transiently and the previous state still holds.
    async fn observe(&self, name: &str) -> Result<Option<PollState>> {
        let request = match self.api.get(name).await {
            Ok(request) => request,
            Err(kube::Error::Api(err)) if err.code == 404 => {
                return Err(CourierError::ProtocolError(format!(
                    "request {} disappeared while waiting for it to complete",
                    name
                )));
            }
            Err(kube::Error::SerdeError(e)) => {
                return Err(CourierError::ProtocolError(format!(
                    "request {} does not match the expected shape: {}",
                    name, e
                )));
            }
            Err(e) => {
                warn!("Failed to read status of request {}: {}, retrying", name, e);
                return Ok(None);
            }
        };

        if !request.has_status() {
            return Ok(Some(PollState::Pending));
        }

        let Some(condition) = request.settled_condition() else {
            debug!("Request {} has not settled on a single condition yet", name);
            return Ok(Some(PollState::Pending));
        };

        let outcome = match condition.known_reason() {
            Some(ConditionReason::Running) => return Ok(Some(PollState::Observing)),
            Some(ConditionReason::Succeeded) => PollOutcome::Succeeded,
            Some(ConditionReason::Failed) => PollOutcome::Failed,
            Some(ConditionReason::Rejected) => PollOutcome::Rejected,
            None => {
                return Err(CourierError::ProtocolError(format!(
                    "request {} has unknown condition reason '{}'",
                    name, condition.reason
                )));
            }
        };

        Ok(Some(PollState::Terminal {
            outcome,
            message: condition.message_or_empty().to_string(),
        }))
    }
}
