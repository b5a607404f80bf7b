// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube_runtime::watcher::Event;
use kube::Resource;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Callbacks for changes to watched objects.
///
/// Only `on_add` is required; leaving out the others ignores those events.
/// Objects are borrowed from the informer cache.
pub trait ResourceEventHandler<K>: Send {
    fn on_add(&self, obj: &K);

    fn on_update(&self, _old: &K, _new: &K) {}

    fn on_delete(&self, _obj: &K) {}
}

/// Identity of an object within a resource type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    pub namespace: Option<String>,
    pub name: String,
}

impl ObjectKey {
    pub fn from_resource<K: Resource>(obj: &K) -> Self {
        let meta = obj.meta();
        Self {
            namespace: meta.namespace.clone(),
            name: meta.name.clone().unwrap_or_default(),
        }
    }
}

/// Turns raw watcher events into add/update/delete callbacks.
///
/// An object seen for the first time is an add, a known one an update.
/// Objects missing from a relist are deleted once the relist completes.
pub struct Informer<K, H> {
    handler: H,
    cache: HashMap<ObjectKey, K>,
    relisted: Option<HashSet<ObjectKey>>,
}

impl<K, H> Informer<K, H>
where
    K: Resource,
    H: ResourceEventHandler<K>,
{
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            cache: HashMap::new(),
            relisted: None,
        }
    }

    pub fn process(&mut self, event: Event<K>) {
        match event {
            Event::Init => {
                trace!("Relist started");
                self.relisted = Some(HashSet::new());
            }
            Event::InitApply(obj) => {
                if let Some(seen) = self.relisted.as_mut() {
                    seen.insert(ObjectKey::from_resource(&obj));
                }
                self.upsert(obj);
            }
            Event::InitDone => {
                let Some(seen) = self.relisted.take() else {
                    return;
                };
                let gone: Vec<ObjectKey> = self
                    .cache
                    .keys()
                    .filter(|key| !seen.contains(*key))
                    .cloned()
                    .collect();
                for key in gone {
                    if let Some(old) = self.cache.remove(&key) {
                        self.handler.on_delete(&old);
                    }
                }
                trace!("Relist done, {} objects cached", self.cache.len());
            }
            Event::Apply(obj) => self.upsert(obj),
            Event::Delete(obj) => {
                self.cache.remove(&ObjectKey::from_resource(&obj));
                self.handler.on_delete(&obj);
            }
        }
    }

    fn upsert(&mut self, obj: K) {
        match self.cache.entry(ObjectKey::from_resource(&obj)) {
            Entry::Occupied(mut entry) => {
                let old = entry.insert(obj);
                self.handler.on_update(&old, entry.get());
            }
            Entry::Vacant(entry) => {
                let new = entry.insert(obj);
                self.handler.on_add(new);
            }
        }
    }

    pub fn get(&self, key: &ObjectKey) -> Option<&K> {
        self.cache.get(key)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
