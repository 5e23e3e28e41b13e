// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{env as env_vars, poll};
use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;

/// Client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace to submit requests to; the kubeconfig default is used when unset
    pub namespace: Option<String>,
    pub poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            namespace: None,
            poll_interval: Duration::from_secs(poll::INTERVAL_SECS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let namespace = env::var(env_vars::NAMESPACE)
            .ok()
            .filter(|ns| !ns.is_empty());
        let poll_interval = parse_poll_interval(env::var(env_vars::POLL_INTERVAL_SECS).ok())?;

        Ok(Config {
            namespace,
            poll_interval,
        })
    }

    /// Command line namespace takes precedence over the environment
    pub fn with_namespace(mut self, namespace: Option<String>) -> Self {
        if namespace.is_some() {
            self.namespace = namespace;
        }
        self
    }
}

fn parse_poll_interval(value: Option<String>) -> Result<Duration> {
    let Some(value) = value else {
        return Ok(Duration::from_secs(poll::INTERVAL_SECS));
    };

    let secs: u64 = value.trim().parse().with_context(|| {
        format!(
            "{} must be a whole number of seconds, got '{}'",
            env_vars::POLL_INTERVAL_SECS,
            value
        )
    })?;
    if secs == 0 {
        bail!("{} must be greater than zero", env_vars::POLL_INTERVAL_SECS);
    }

    Ok(Duration::from_secs(secs))
}
