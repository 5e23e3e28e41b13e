// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Custom resource types served by the request controller.

pub mod request;

pub use request::{Condition, ConditionReason, Request, RequestSpec, RequestStatus};
