// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes client creation and Request API scoping

use crate::error::Result;
use crate::types::Request;
use kube::{Api, Client};
use tracing::{debug, info, instrument};

/// Create a Kubernetes client from the ambient kubeconfig or in-cluster config
#[instrument]
pub async fn connect() -> Result<Client> {
    let client = Client::try_default().await?;
    info!(
        "Connected to Kubernetes cluster (default namespace: {})",
        client.default_namespace()
    );
    Ok(client)
}

/// Scope the Request API to `namespace`, or to the client's default namespace
pub fn request_api(client: Client, namespace: Option<&str>) -> Api<Request> {
    match namespace {
        Some(namespace) => {
            debug!("Submitting requests to namespace {}", namespace);
            Api::namespaced(client, namespace)
        }
        None => Api::default_namespaced(client),
    }
}
