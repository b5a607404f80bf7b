// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Generic watch primitive: a watcher stream dispatched to add/update/delete
//! handlers through a local object cache, stopped by a shared signal.

pub mod informer;
pub mod stop;
pub mod watcher;

pub use informer::{Informer, ObjectKey, ResourceEventHandler};
pub use stop::StopSignal;
pub use watcher::ResourceWatcher;
