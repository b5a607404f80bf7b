// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Custom resource types and their registration descriptors.

pub mod descriptor;
pub mod sample;

pub use descriptor::CustomResourceDescriptor;
pub use sample::{sample_resource, Sample, SampleObject, SampleSpec, TypeIdentity};
