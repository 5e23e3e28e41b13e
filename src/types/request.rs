// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[kube(group = "courier.geeko.me", version = "v1alpha1", kind = "Request")]
#[kube(namespaced)]
#[kube(status = "RequestStatus")]
#[kube(shortname = "req")]
#[serde(rename_all = "camelCase")]
pub struct RequestSpec {
    /// Kind of work requested, e.g. "release"
    pub request: String,
    /// Opaque parameters handed to the controller as-is
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl Request {
    /// The condition snapshot, but only once the controller has settled on a
    /// single authoritative condition
    pub fn settled_condition(&self) -> Option<&Condition> {
        match self.status.as_ref()?.conditions.as_deref()? {
            [condition] => Some(condition),
            _ => None,
        }
    }

    /// Whether the controller has written any status yet
    pub fn has_status(&self) -> bool {
        self.status.is_some()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<Time>,
}

impl Condition {
    /// Interpret the free-form reason, `None` when the controller used a reason we don't know
    pub fn known_reason(&self) -> Option<ConditionReason> {
        match self.reason.as_str() {
            "Running" => Some(ConditionReason::Running),
            "Succeeded" => Some(ConditionReason::Succeeded),
            "Failed" => Some(ConditionReason::Failed),
            "Rejected" => Some(ConditionReason::Rejected),
            _ => None,
        }
    }

    pub fn message_or_empty(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}

/// Reasons the request controller writes into its condition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConditionReason {
    Running,
    Succeeded,
    Failed,
    Rejected,
}
