// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::watch::informer::{Informer, ResourceEventHandler};
use crate::watch::stop::StopSignal;
use futures::StreamExt;
use kube::{Api, Resource};
use kube_runtime::{watcher, WatchStreamExt};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tracing::{debug, warn};

/// Watches one resource type and feeds its events to a handler set
pub struct ResourceWatcher<K, H> {
    api: Api<K>,
    informer: Informer<K, H>,
}

impl<K, H> ResourceWatcher<K, H>
where
    K: Resource + Clone + DeserializeOwned + Debug + Send + 'static,
    H: ResourceEventHandler<K>,
{
    pub fn new(api: Api<K>, handler: H) -> Self {
        Self {
            api,
            informer: Informer::new(handler),
        }
    }

    /// Run until `stop` is closed or the watch stream ends.
    ///
    /// Stream errors are logged and retried with backoff.
    pub async fn watch(mut self, stop: StopSignal) {
        let stream = watcher(self.api.clone(), watcher::Config::default()).default_backoff();
        let mut stream = std::pin::pin!(stream);
        let mut stopped = std::pin::pin!(stop.closed());

        loop {
            tokio::select! {
                _ = &mut stopped => {
                    debug!("Stop signal closed, ending watch");
                    break;
                }
                event = stream.next() => match event {
                    Some(Ok(event)) => self.informer.process(event),
                    Some(Err(e)) => warn!("Watch error: {}", e),
                    None => {
                        debug!("Watch stream ended");
                        break;
                    }
                },
            }
        }
    }
}
