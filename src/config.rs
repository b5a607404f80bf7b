// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{crd, env as vars};
use crate::error::{OperatorError, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where cluster credentials come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Service account token and CA mounted into the pod
    InCluster,
    /// A kubeconfig file on the local filesystem
    Kubeconfig(PathBuf),
}

/// Operator configuration loaded from environment variables and flags
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: CredentialSource,
    /// Interval between reads of a definition waiting to be established
    pub poll_interval: Duration,
    /// Upper bound on waiting for a definition to be established
    pub registration_timeout: Duration,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// `kubeconfig` is the value of the `--kubeconfig` flag and is only
    /// consulted when not running inside a cluster.
    pub fn from_env(kubeconfig: Option<PathBuf>) -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), kubeconfig)
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F, kubeconfig: Option<PathBuf>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let in_cluster = in_cluster_config_available(
            lookup(vars::SERVICE_HOST).as_deref(),
            lookup(vars::SERVICE_PORT).as_deref(),
        );

        let credentials = if in_cluster {
            CredentialSource::InCluster
        } else {
            let path = match kubeconfig {
                Some(path) => path,
                None => {
                    let home = home_dir(&lookup).ok_or_else(|| {
                        OperatorError::ConfigError(
                            "no --kubeconfig given and no home directory to look for one"
                                .to_string(),
                        )
                    })?;
                    default_kubeconfig_path(&home)
                }
            };
            CredentialSource::Kubeconfig(path)
        };

        let poll_interval = Duration::from_millis(parse_or(
            &lookup,
            vars::POLL_INTERVAL_MS,
            crd::POLL_INTERVAL_MILLIS,
        )?);
        let registration_timeout = Duration::from_secs(parse_or(
            &lookup,
            vars::REGISTRATION_TIMEOUT_SECS,
            crd::REGISTRATION_TIMEOUT_SECS,
        )?);

        if poll_interval.is_zero() {
            return Err(OperatorError::ConfigError(format!(
                "{} must be greater than zero",
                vars::POLL_INTERVAL_MS
            )));
        }

        Ok(Config {
            credentials,
            poll_interval,
            registration_timeout,
        })
    }
}

/// True iff both service host and port are set and non-empty
pub fn in_cluster_config_available(host: Option<&str>, port: Option<&str>) -> bool {
    matches!((host, port), (Some(h), Some(p)) if !h.is_empty() && !p.is_empty())
}

/// Home directory from `HOME`, falling back to `USERPROFILE` on Windows
pub fn home_dir<F>(lookup: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(vars::HOME)
        .filter(|h| !h.is_empty())
        .or_else(|| lookup(vars::USERPROFILE).filter(|h| !h.is_empty()))
        .map(PathBuf::from)
}

pub fn default_kubeconfig_path(home: &Path) -> PathBuf {
    home.join(".kube").join("config")
}

fn parse_or<F>(lookup: &F, key: &str, default: u64) -> Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e| {
            OperatorError::ConfigError(format!("{} has invalid value '{}': {}", key, raw, e))
        }),
        None => Ok(default),
    }
}
