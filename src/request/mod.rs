// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Building, submitting and awaiting Request resources.

pub mod builder;
pub mod poller;

pub use builder::{build_request, parse_params};
pub use poller::{CompletionPoller, PollOutcome, Submission};
