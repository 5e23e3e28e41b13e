// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Prints the Request CustomResourceDefinition for installing on a cluster

use courier::types::Request;
use kube::CustomResourceExt;
use std::io::{self, Write};

fn main() -> anyhow::Result<()> {
    let crd = serde_yaml::to_string(&Request::crd())?;

    let mut stdout = io::stdout();
    stdout.write_all(b"---\n")?;
    stdout.write_all(crd.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
