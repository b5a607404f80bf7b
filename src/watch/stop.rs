// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::sync::Arc;
use tokio::sync::watch;

/// One-shot, broadcast cancellation.
///
/// Clones share the same state. Closing is idempotent; listeners only ever
/// observe it.
#[derive(Clone, Debug)]
pub struct StopSignal {
    closed: Arc<watch::Sender<bool>>,
}

impl StopSignal {
    pub fn new() -> Self {
        let (closed, _) = watch::channel(false);
        Self {
            closed: Arc::new(closed),
        }
    }

    /// Close the signal. Returns true only for the call that closed it.
    pub fn close(&self) -> bool {
        self.closed.send_if_modified(|closed| {
            if *closed {
                false
            } else {
                *closed = true;
                true
            }
        })
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    /// Resolves once the signal is closed
    pub async fn closed(&self) {
        let mut rx = self.closed.subscribe();
        // The sender lives as long as `self`, so this cannot fail
        let _ = rx.wait_for(|closed| *closed).await;
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}
