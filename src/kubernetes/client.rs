// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster credential resolution and API client construction

use crate::config::{Config, CredentialSource};
use crate::constants::NAMESPACE_ALL;
use crate::error::{OperatorError, Result};
use crate::types::{sample_resource, SampleObject};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::{
    config::{KubeConfigOptions, Kubeconfig},
    core::ApiResource,
    Api, Client, Config as KConfig,
};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Handles shared by the registrar and the controllers
#[derive(Clone)]
pub struct Context {
    /// Core cluster API
    pub client: Client,
    /// API extension endpoint for CustomResourceDefinitions
    pub crds: Api<CustomResourceDefinition>,
    /// Interval between registration polls
    pub interval: Duration,
    /// Upper bound on waiting for a registration to be established
    pub timeout: Duration,
}

impl Context {
    pub fn new(client: Client, interval: Duration, timeout: Duration) -> Self {
        Self {
            crds: Api::all(client.clone()),
            client,
            interval,
            timeout,
        }
    }
}

/// Typed client for Sample resources
#[derive(Clone)]
pub struct SampleClient {
    client: Client,
    resource: ApiResource,
}

impl SampleClient {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            resource: sample_resource().api_resource(),
        }
    }

    /// Samples in `namespace`, or in every namespace for [`NAMESPACE_ALL`]
    pub fn api(&self, namespace: &str) -> Api<SampleObject> {
        if namespace == NAMESPACE_ALL {
            Api::all_with(self.client.clone(), &self.resource)
        } else {
            Api::namespaced_with(self.client.clone(), namespace, &self.resource)
        }
    }

    pub fn api_resource(&self) -> &ApiResource {
        &self.resource
    }
}

/// Resolve credentials and build the context and the Sample client.
///
/// No request is sent to the cluster here.
#[instrument(skip(config), fields(credentials = ?config.credentials))]
pub async fn create_context(config: &Config) -> Result<(Context, SampleClient)> {
    let client_config = load_client_config(&config.credentials).await?;
    debug!("Using cluster at {}", client_config.cluster_url);

    let client = Client::try_from(client_config)
        .map_err(|e| OperatorError::KubeconfigError(format!("Failed to create client: {}", e)))?;

    let context = Context::new(
        client.clone(),
        config.poll_interval,
        config.registration_timeout,
    );
    Ok((context, SampleClient::new(client)))
}

async fn load_client_config(source: &CredentialSource) -> Result<KConfig> {
    match source {
        CredentialSource::InCluster => {
            info!("Using in-cluster configuration");
            KConfig::incluster().map_err(|e| OperatorError::InClusterConfigError(e.to_string()))
        }
        CredentialSource::Kubeconfig(path) => {
            info!("Using kubeconfig at {}", path.display());
            let kubeconfig = tokio::fs::read_to_string(path).await.map_err(|e| {
                OperatorError::KubeconfigError(format!(
                    "Failed to read kubeconfig {}: {}",
                    path.display(),
                    e
                ))
            })?;
            create_config_from_kubeconfig(&kubeconfig, path).await
        }
    }
}

/// Create a client configuration from kubeconfig contents
async fn create_config_from_kubeconfig(kubeconfig: &str, path: &Path) -> Result<KConfig> {
    let kubeconfig_parsed: Kubeconfig = serde_yaml::from_str(kubeconfig).map_err(|e| {
        OperatorError::KubeconfigError(format!(
            "Failed to parse kubeconfig {}: {}",
            path.display(),
            e
        ))
    })?;

    KConfig::from_custom_kubeconfig(kubeconfig_parsed, &KubeConfigOptions::default())
        .await
        .map_err(|e| OperatorError::KubeconfigError(format!("Failed to create config: {}", e)))
}
