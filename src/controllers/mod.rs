// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Controllers reacting to watched custom resources.

pub mod sample;

pub use sample::{SampleController, SampleHandler, WatchState};
