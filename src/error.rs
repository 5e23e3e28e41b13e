// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::exit_codes;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CourierError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Invalid request: {0}")]
    ValidationError(String),

    #[error("Request submission failed: {0}")]
    SubmissionError(#[source] kube::Error),

    #[error("Unexpected response from the API server: {0}")]
    ProtocolError(String),
}

impl CourierError {
    /// Exit code reported for this error. Never collides with a business outcome.
    pub fn exit_code(&self) -> u8 {
        exit_codes::ERROR
    }
}

pub type Result<T> = std::result::Result<T, CourierError>;
