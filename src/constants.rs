// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// API group of the Request custom resource
pub const API_GROUP: &str = "courier.geeko.me";

/// Environment variables read by `Config::from_env`
pub mod env {
    /// Namespace to submit requests to (optional)
    pub const NAMESPACE: &str = "COURIER_NAMESPACE";
    /// Seconds between status checks (optional)
    pub const POLL_INTERVAL_SECS: &str = "COURIER_POLL_INTERVAL_SECS";
}

/// Completion polling configuration
pub mod poll {
    /// Fixed interval in seconds between status checks
    pub const INTERVAL_SECS: u64 = 5;
    /// Default time in seconds to wait for a terminal condition
    pub const DEFAULT_TIMEOUT_SECS: u64 = 600;
}

/// Process exit codes observed by CI pipelines
pub mod exit_codes {
    pub const SUCCEEDED: u8 = 0;
    pub const FAILED: u8 = 21;
    pub const REJECTED: u8 = 22;
    /// Timeout, submission failure or protocol violation
    pub const ERROR: u8 = 1;
}
