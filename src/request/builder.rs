// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Builds the Request custom resource submitted to the cluster

use crate::error::{CourierError, Result};
use crate::types::{Request, RequestSpec};
use kube::api::ObjectMeta;
use std::collections::BTreeMap;

/// Build a Request resource from a request name and `key=value` parameters.
///
/// The API server appends a unique suffix to `<name>-` when the resource is
/// created. Duplicate keys are allowed and the last occurrence wins.
pub fn build_request<S: AsRef<str>>(
    name: &str,
    params: &[S],
    namespace: Option<&str>,
) -> Result<Request> {
    if name.is_empty() {
        return Err(CourierError::ValidationError(
            "request name must not be empty".to_string(),
        ));
    }

    let params = parse_params(params)?;

    Ok(Request {
        metadata: ObjectMeta {
            generate_name: Some(format!("{}-", name)),
            namespace: namespace.map(str::to_string),
            ..Default::default()
        },
        spec: RequestSpec {
            request: name.to_string(),
            params,
        },
        status: None,
    })
}

/// Fold `key=value` entries into a map, later keys overwriting earlier ones
pub fn parse_params<S: AsRef<str>>(params: &[S]) -> Result<BTreeMap<String, String>> {
    let mut parsed = BTreeMap::new();

    for param in params {
        let (key, value) = parse_param(param.as_ref())?;
        parsed.insert(key.to_string(), value.to_string());
    }

    Ok(parsed)
}

fn parse_param(param: &str) -> Result<(&str, &str)> {
    let Some((key, value)) = param.split_once('=') else {
        return Err(CourierError::ValidationError(format!(
            "parameter '{}' is not of the form key=value",
            param
        )));
    };

    if key.is_empty() {
        return Err(CourierError::ValidationError(format!(
            "parameter '{}' has an empty key",
            param
        )));
    }

    Ok((key, value))
}
