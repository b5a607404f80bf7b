// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Custom resource registration

use crate::constants::OPERATOR_NAME;
use crate::error::{OperatorError, Result};
use crate::kubernetes::client::Context;
use crate::types::CustomResourceDescriptor;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::api::PostParams;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, instrument, warn};

const ESTABLISHED: &str = "Established";
const NAMES_ACCEPTED: &str = "NamesAccepted";

/// Register every resource and wait until each one is established.
///
/// Definitions that already exist are left as they are.
#[instrument(skip_all, fields(count = resources.len()))]
pub async fn create_custom_resources(
    context: &Context,
    resources: &[CustomResourceDescriptor],
) -> Result<()> {
    for resource in resources {
        create_custom_resource(context, resource).await?;
    }

    for resource in resources {
        wait_for_established(context, resource).await?;
    }

    Ok(())
}

#[instrument(skip_all, fields(crd = %resource.crd_name()))]
async fn create_custom_resource(
    context: &Context,
    resource: &CustomResourceDescriptor,
) -> Result<()> {
    let name = resource.crd_name();
    let pp = PostParams {
        field_manager: Some(OPERATOR_NAME.to_string()),
        ..Default::default()
    };

    match context.crds.create(&pp, resource.definition()).await {
        Ok(_) => {
            info!("Created custom resource {}", name);
            Ok(())
        }
        Err(kube::Error::Api(err)) if err.code == 409 => {
            info!("Custom resource {} already exists", name);
            Ok(())
        }
        Err(e) => Err(OperatorError::RegistrationError {
            name,
            message: e.to_string(),
        }),
    }
}

/// Poll the definition until it is established or the context timeout elapses
#[instrument(skip_all, fields(crd = %resource.crd_name()))]
pub async fn wait_for_established(
    context: &Context,
    resource: &CustomResourceDescriptor,
) -> Result<()> {
    let name = resource.crd_name();

    let poll = async {
        loop {
            match context.crds.get(&name).await {
                Ok(crd) => {
                    if is_established(&crd)? {
                        info!("Custom resource {} is established", name);
                        return Ok::<(), OperatorError>(());
                    }
                    debug!(
                        "Custom resource {} not yet established, waiting {:?}...",
                        name, context.interval
                    );
                }
                Err(e) => {
                    warn!(
                        "Error reading custom resource {}: {}, retrying in {:?}...",
                        name, e, context.interval
                    );
                }
            }

            sleep(context.interval).await;
        }
    };

    timeout(context.timeout, poll)
        .await
        .map_err(|_| OperatorError::RegistrationTimeout {
            name: name.clone(),
            timeout: context.timeout,
        })?
}

/// Whether a definition reports `Established=True`.
///
/// A `NamesAccepted=False` condition means the names clash with another
/// definition and waiting will not help.
pub fn is_established(crd: &CustomResourceDefinition) -> Result<bool> {
    let Some(conditions) = crd.status.as_ref().and_then(|s| s.conditions.as_ref()) else {
        return Ok(false);
    };

    for condition in conditions {
        match condition.type_.as_str() {
            ESTABLISHED if condition.status == "True" => return Ok(true),
            NAMES_ACCEPTED if condition.status == "False" => {
                return Err(OperatorError::NameConflict {
                    name: crd.metadata.name.clone().unwrap_or_default(),
                    reason: condition.reason.clone().unwrap_or_default(),
                })
            }
            _ => {}
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{already_exists_json, crd_json, forbidden_json, MockService};
    use crate::types::sample_resource;
    use std::time::Duration;

    const CRDS_PATH: &str = "/apis/apiextensions.k8s.io/v1/customresourcedefinitions";
    const SAMPLE_CRD_PATH: &str =
        "/apis/apiextensions.k8s.io/v1/customresourcedefinitions/samples.myproject.io";

    fn make_context(mock: MockService, timeout: Duration) -> Context {
        Context::new(mock.into_client(), Duration::from_millis(10), timeout)
    }

    fn make_crd(conditions: &[(&str, &str)]) -> CustomResourceDefinition {
        serde_json::from_str(&crd_json(&sample_resource(), conditions)).unwrap()
    }

    #[test]
    fn test_is_established_without_status() {
        let crd = sample_resource().definition().clone();
        assert!(!is_established(&crd).unwrap());
    }

    #[test]
    fn test_is_established_true() {
        let crd = make_crd(&[("NamesAccepted", "True"), ("Established", "True")]);
        assert!(is_established(&crd).unwrap());
    }

    #[test]
    fn test_is_established_false() {
        let crd = make_crd(&[("NamesAccepted", "True"), ("Established", "False")]);
        assert!(!is_established(&crd).unwrap());
    }

    #[test]
    fn test_is_established_name_conflict() {
        let crd = make_crd(&[("NamesAccepted", "False")]);
        let err = is_established(&crd).unwrap_err();
        assert!(matches!(err, OperatorError::NameConflict { .. }));
    }

    #[tokio::test]
    async fn test_create_custom_resources_registers_and_waits() {
        let resource = sample_resource();
        let mock = MockService::new()
            .on_post(CRDS_PATH, 201, &crd_json(&resource, &[]))
            .on_get(SAMPLE_CRD_PATH, 200, &crd_json(&resource, &[("Established", "True")]));
        let context = make_context(mock, Duration::from_secs(5));

        create_custom_resources(&context, &[resource]).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_custom_resources_when_already_registered() {
        let resource = sample_resource();
        let mock = MockService::new()
            .on_post(CRDS_PATH, 409, &already_exists_json(&resource.crd_name()))
            .on_get(SAMPLE_CRD_PATH, 200, &crd_json(&resource, &[("Established", "True")]));
        let context = make_context(mock, Duration::from_secs(5));

        create_custom_resources(&context, &[resource]).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_custom_resources_rejected() {
        let resource = sample_resource();
        let mock = MockService::new().on_post(CRDS_PATH, 403, &forbidden_json());
        let context = make_context(mock, Duration::from_secs(5));

        let err = create_custom_resources(&context, &[resource]).await.unwrap_err();
        assert!(matches!(err, OperatorError::RegistrationError { .. }));
    }

    #[tokio::test]
    async fn test_wait_for_established_times_out() {
        let resource = sample_resource();
        let mock = MockService::new().on_get(SAMPLE_CRD_PATH, 200, &crd_json(&resource, &[]));
        let context = make_context(mock, Duration::from_millis(100));

        let err = wait_for_established(&context, &resource).await.unwrap_err();
        assert!(matches!(err, OperatorError::RegistrationTimeout { .. }));
    }

    #[tokio::test]
    async fn test_wait_for_established_retries_read_errors_until_timeout() {
        let resource = sample_resource();
        let context = make_context(MockService::new(), Duration::from_millis(100));

        let err = wait_for_established(&context, &resource).await.unwrap_err();
        assert!(matches!(err, OperatorError::RegistrationTimeout { .. }));
    }

    #[tokio::test]
    async fn test_wait_for_established_name_conflict() {
        let resource = sample_resource();
        let mock = MockService::new().on_get(
            SAMPLE_CRD_PATH,
            200,
            &crd_json(&resource, &[("NamesAccepted", "False")]),
        );
        let context = make_context(mock, Duration::from_secs(5));

        let err = wait_for_established(&context, &resource).await.unwrap_err();
        assert!(matches!(err, OperatorError::NameConflict { .. }));
    }
}
