// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::descriptor::CustomResourceDescriptor;
use kube::core::{NotUsed, Object};
use kube::CustomResource;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(
    group = "myproject.io",
    version = "v1alpha1",
    kind = "Sample",
    plural = "samples",
    shortname = "sample"
)]
#[kube(namespaced)]
#[serde(rename_all = "camelCase")]
pub struct SampleSpec {
    #[serde(default)]
    pub hello: String,
}

/// A Sample as delivered by the API server, type metadata included.
///
/// The derived [`Sample`] drops `apiVersion`/`kind` on deserialization, so
/// watches use this shape to see what the server actually sent.
pub type SampleObject = Object<SampleSpec, NotUsed>;

/// Descriptor for the Sample resource
pub fn sample_resource() -> CustomResourceDescriptor {
    CustomResourceDescriptor::of::<Sample>()
}

/// Access to the `kind` carried in an object's type metadata
pub trait TypeIdentity {
    /// The observed kind, empty when the server sent none
    fn type_kind(&self) -> &str;
}

impl<P: Clone, U: Clone> TypeIdentity for Object<P, U> {
    fn type_kind(&self) -> &str {
        self.types.as_ref().map(|t| t.kind.as_str()).unwrap_or("")
    }
}
