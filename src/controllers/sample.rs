// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Sample controller - watches Sample resources and checks their type metadata.

use crate::error::{OperatorError, Result};
use crate::kubernetes::SampleClient;
use crate::types::{SampleObject, TypeIdentity};
use crate::watch::{ResourceEventHandler, ResourceWatcher, StopSignal};
use kube::ResourceExt;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

/// Lifecycle of a controller's watch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    /// Constructed, not watching yet
    Idle,
    Watching,
    /// The stop signal closed and the watch ended; terminal
    Stopped,
}

pub struct SampleController {
    samples: SampleClient,
    state: Arc<watch::Sender<WatchState>>,
}

impl SampleController {
    pub fn new(samples: SampleClient) -> Self {
        let (state, _) = watch::channel(WatchState::Idle);
        Self {
            samples,
            state: Arc::new(state),
        }
    }

    pub fn state(&self) -> WatchState {
        *self.state.borrow()
    }

    /// Start watching Samples in `namespace` (empty for all namespaces).
    ///
    /// Returns as soon as the background watch is spawned. The watch runs
    /// until `stop` is closed; its errors are logged, never returned.
    #[instrument(skip(self, stop))]
    pub fn start_watch(&self, namespace: &str, stop: &StopSignal) -> Result<JoinHandle<()>> {
        let started = self.state.send_if_modified(|state| {
            if *state == WatchState::Idle {
                *state = WatchState::Watching;
                true
            } else {
                false
            }
        });
        if !started {
            return Err(OperatorError::AlreadyWatching);
        }

        let watcher = ResourceWatcher::new(self.samples.api(namespace), SampleHandler);
        let stop = stop.clone();
        let state = self.state.clone();

        Ok(tokio::spawn(async move {
            watcher.watch(stop).await;
            state.send_replace(WatchState::Stopped);
            info!("Stopped watching the sample resource");
        }))
    }
}

/// Checks every newly observed Sample for type metadata
pub struct SampleHandler;

impl ResourceEventHandler<SampleObject> for SampleHandler {
    fn on_add(&self, obj: &SampleObject) {
        // Never hold on to the cache's copy
        let sample = obj.clone();

        match observe(&sample) {
            observation @ Observation::Valid { .. } => info!("{}", observation),
            observation @ Observation::MissingTypeMeta { .. } => {
                warn!(sample = %sample.name_any(), "{}", observation)
            }
        }
    }
}

/// Result of checking a Sample's type metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    Valid { kind: String },
    /// No kind was sent; carries a rendering of the object
    MissingTypeMeta { found: String },
}

pub fn observe(sample: &SampleObject) -> Observation {
    match sample.type_kind() {
        "" => Observation::MissingTypeMeta {
            found: format!("{:?}", sample),
        },
        kind => Observation::Valid {
            kind: kind.to_string(),
        },
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Observation::Valid { kind } => write!(f, "All good, Kind is {}.", kind),
            Observation::MissingTypeMeta { found } => {
                write!(f, "Oh no! Missing TypeMeta: found: {}", found)
            }
        }
    }
}
