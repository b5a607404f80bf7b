// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::{core::ApiResource, CustomResourceExt};

/// Static description of a custom resource type, used both to register it
/// with the API server and to build watches on its instances.
#[derive(Clone, Debug)]
pub struct CustomResourceDescriptor {
    pub group: String,
    pub version: String,
    pub kind: String,
    pub plural: String,
    pub singular: String,
    pub namespaced: bool,
    definition: CustomResourceDefinition,
}

impl CustomResourceDescriptor {
    /// Describe a type generated by `#[derive(CustomResource)]`
    pub fn of<K: CustomResourceExt>() -> Self {
        Self::from_definition(K::crd())
    }

    /// Build a descriptor from a definition, using its storage version
    pub fn from_definition(definition: CustomResourceDefinition) -> Self {
        let spec = &definition.spec;
        let version = spec
            .versions
            .iter()
            .find(|v| v.storage)
            .or_else(|| spec.versions.first())
            .map(|v| v.name.clone())
            .unwrap_or_default();
        let singular = spec
            .names
            .singular
            .clone()
            .unwrap_or_else(|| spec.names.kind.to_lowercase());

        Self {
            group: spec.group.clone(),
            version,
            kind: spec.names.kind.clone(),
            plural: spec.names.plural.clone(),
            singular,
            namespaced: spec.scope == "Namespaced",
            definition,
        }
    }

    /// Name of the CustomResourceDefinition object: `<plural>.<group>`
    pub fn crd_name(&self) -> String {
        format!("{}.{}", self.plural, self.group)
    }

    pub fn api_version(&self) -> String {
        format!("{}/{}", self.group, self.version)
    }

    /// Dynamic type information for building an `Api` over instances
    pub fn api_resource(&self) -> ApiResource {
        ApiResource {
            group: self.group.clone(),
            version: self.version.clone(),
            api_version: self.api_version(),
            kind: self.kind.clone(),
            plural: self.plural.clone(),
        }
    }

    pub fn definition(&self) -> &CustomResourceDefinition {
        &self.definition
    }
}
