// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster access: context construction and custom resource registration.

pub mod client;
pub mod crd;

pub use client::{create_context, Context, SampleClient};
pub use crd::{create_custom_resources, wait_for_established};
