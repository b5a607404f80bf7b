// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Operator lifecycle: registration, watch start and shutdown.

use crate::constants::NAMESPACE_ALL;
use crate::controllers::{SampleController, WatchState};
use crate::kubernetes::{create_custom_resources, Context, SampleClient};
use crate::shutdown::ShutdownReason;
use crate::types::sample_resource;
use crate::watch::StopSignal;
use anyhow::{Context as _, Result};
use std::future::Future;
use tracing::{info, warn};

/// A running operator: the Sample resource is registered and being watched
pub struct Operator {
    controller: SampleController,
    stop: StopSignal,
}

impl Operator {
    /// Register the Sample resource and start watching it in every namespace
    pub async fn start(context: &Context, samples: SampleClient) -> Result<Self> {
        // Create and wait for CRD resources
        info!("Registering the sample resource");
        create_custom_resources(context, &[sample_resource()])
            .await
            .context("failed to create custom resource")?;

        let stop = StopSignal::new();

        info!("Watching the sample resource");
        let controller = SampleController::new(samples);
        // The watch task is detached; it ends on its own once `stop` closes
        controller
            .start_watch(NAMESPACE_ALL, &stop)
            .context("failed to start watching the sample resource")?;

        Ok(Self { controller, stop })
    }

    /// Wait for `shutdown`, then close the stop signal
    pub async fn run_until<F>(&self, shutdown: F) -> ShutdownReason
    where
        F: Future<Output = ShutdownReason>,
    {
        let reason = shutdown.await;
        info!("shutdown signal received ({}), exiting...", reason);

        if !self.stop.close() {
            warn!("Stop signal was already closed");
        }
        reason
    }

    pub fn state(&self) -> WatchState {
        self.controller.state()
    }

    pub fn stop_signal(&self) -> &StopSignal {
        &self.stop
    }
}
