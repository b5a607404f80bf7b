// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OperatorError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Failed to load in-cluster config: {0}")]
    InClusterConfigError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to register custom resource {name}: {message}")]
    RegistrationError { name: String, message: String },

    #[error("Name conflict for custom resource {name}: {reason}")]
    NameConflict { name: String, reason: String },

    #[error("Custom resource {name} not established after {timeout:?}")]
    RegistrationTimeout { name: String, timeout: Duration },

    #[error("Controller is already watching")]
    AlreadyWatching,
}

pub type Result<T> = std::result::Result<T, OperatorError>;
