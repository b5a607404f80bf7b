// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// The operator name used as field manager on API writes
pub const OPERATOR_NAME: &str = "sample-operator";

/// Environment variables consulted at startup
pub mod env {
    /// Set by the kubelet for every pod, together with `SERVICE_PORT`
    pub const SERVICE_HOST: &str = "KUBERNETES_SERVICE_HOST";
    pub const SERVICE_PORT: &str = "KUBERNETES_SERVICE_PORT";
    pub const HOME: &str = "HOME";
    /// Windows fallback for `HOME`
    pub const USERPROFILE: &str = "USERPROFILE";
    pub const POLL_INTERVAL_MS: &str = "SAMPLE_OPERATOR_POLL_INTERVAL_MS";
    pub const REGISTRATION_TIMEOUT_SECS: &str = "SAMPLE_OPERATOR_REGISTRATION_TIMEOUT_SECS";
}

/// CRD registration polling configuration
pub mod crd {
    /// Interval between reads of a definition waiting to be established
    pub const POLL_INTERVAL_MILLIS: u64 = 500;
    /// Upper bound on the whole registration wait
    pub const REGISTRATION_TIMEOUT_SECS: u64 = 60;
}

/// Watching every namespace
pub const NAMESPACE_ALL: &str = "";
