// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Termination signal handling

use std::fmt;
use tokio::signal;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    SigInt,
    SigTerm,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownReason::SigInt => write!(f, "SIGINT"),
            ShutdownReason::SigTerm => write!(f, "SIGTERM"),
        }
    }
}

/// Wait for SIGINT or SIGTERM
pub async fn wait_for_signal() -> ShutdownReason {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to register ctrl-c handler: {}", e);
            std::future::pending::<()>().await;
        }
        ShutdownReason::SigInt
    };

    #[cfg(unix)]
    let term = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to register SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
        ShutdownReason::SigTerm
    };

    #[cfg(not(unix))]
    let term = std::future::pending::<ShutdownReason>();

    tokio::select! {
        reason = ctrl_c => reason,
        reason = term => reason,
    }
}
