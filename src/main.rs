// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sample_operator::config::Config;
use sample_operator::kubernetes::create_context;
use sample_operator::operator::Operator;
use sample_operator::shutdown::wait_for_signal;

/// Registers the Sample resource and reports on every new Sample
#[derive(Parser, Debug)]
#[command(name = "sample-operator", version, about, long_about = None)]
struct Args {
    /// Path to the kubeconfig file, used when not running inside a cluster
    /// [default: $HOME/.kube/config]
    #[arg(long)]
    kubeconfig: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing, RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Getting kubernetes context");
    let config = Config::from_env(args.kubeconfig).context("failed to create context")?;
    let (context, samples) = create_context(&config)
        .await
        .context("failed to create context")?;

    let operator = Operator::start(&context, samples).await?;
    operator.run_until(wait_for_signal()).await;

    Ok(())
}
