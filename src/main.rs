// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{error, level_filters::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use courier::config::Config;
use courier::constants::{exit_codes, poll::DEFAULT_TIMEOUT_SECS};
use courier::error::CourierError;
use courier::kubernetes::{connect, request_api};
use courier::request::{build_request, CompletionPoller};

/// Submit a Request to the cluster and wait for its controller to finish it
///
/// Exit codes: 0 succeeded, 21 failed, 22 rejected, 1 timeout or error.
#[derive(Parser, Debug)]
#[command(name = "courier", version)]
struct Args {
    /// Name of the request, e.g. "release"
    request: String,

    /// Request parameter, may be repeated; later keys override earlier ones
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// Wait for the request to reach a terminal condition
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    sync: bool,

    /// Seconds to wait for a terminal condition
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    /// Namespace to submit the request to (defaults to COURIER_NAMESPACE, then the kubeconfig namespace)
    #[arg(short, long)]
    namespace: Option<String>,

    /// Print the request manifest instead of submitting it
    #[arg(long)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level, args.log_json);

    match run(args).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("{:#}", e);
            let code = e
                .downcast_ref::<CourierError>()
                .map_or(exit_codes::ERROR, CourierError::exit_code);
            ExitCode::from(code)
        }
    }
}

async fn run(args: Args) -> Result<u8> {
    let config = Config::from_env()
        .context("Failed to load configuration")?
        .with_namespace(args.namespace);

    let request = build_request(&args.request, &args.params, config.namespace.as_deref())?;

    if args.dry_run {
        let manifest = serde_yaml::to_string(&request).context("Failed to render request")?;
        std::io::stdout()
            .write_all(manifest.as_bytes())
            .context("Failed to write request manifest")?;
        return Ok(exit_codes::SUCCEEDED);
    }

    let client = connect().await?;
    let api = request_api(client, config.namespace.as_deref());
    let poller = CompletionPoller::new(api, config.poll_interval);

    let submission = poller
        .submit_and_await(&request, args.sync, Duration::from_secs(args.timeout))
        .await?;

    Ok(submission.exit_code())
}

fn init_logging(level: &str, json: bool) {
    let default_level = level.parse::<LevelFilter>().unwrap_or(LevelFilter::INFO);
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
