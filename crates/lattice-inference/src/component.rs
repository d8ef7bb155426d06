//! Shared component contract
//!
//! Every component variant (each explainer runtime today) is its own data type
//! implementing [`ComponentImplementation`]. Callers drive the same linear
//! lifecycle for all of them: `apply_defaults` once, `validate`, then
//! `container` as many times as needed.

use k8s_openapi::api::core::v1::{Container, ResourceRequirements};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};

use crate::config::InferenceServicesConfig;
use crate::{Error, Result};

/// Capabilities shared by all component spec variants
pub trait ComponentImplementation {
    /// Fill in platform defaults in place. Idempotent and infallible.
    fn apply_defaults(&mut self, config: &InferenceServicesConfig);

    /// Return the first invalid field, if any. Never mutates.
    fn validate(&self) -> Result<()>;

    /// Storage URI of the pretrained artifact, present only when set
    fn storage_uri(&self) -> Option<&str>;

    /// Resource requirements of the embedded container override
    fn resource_requirements(&self) -> Option<&ResourceRequirements>;

    /// Materialize the runnable container.
    ///
    /// Expects `apply_defaults` and `validate` to have run; identical inputs
    /// always produce an identical container.
    fn container(
        &self,
        metadata: &ObjectMeta,
        extensions: &ComponentExtensionSpec,
        config: &InferenceServicesConfig,
    ) -> Container;
}

/// Scaling and rollout settings shared by every component
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentExtensionSpec {
    /// Minimum number of replicas (0 allows scale to zero)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_replicas: Option<i32>,

    /// Maximum number of replicas (0 means unbounded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_replicas: Option<i32>,

    /// Desired in-flight requests per container; rendered as the worker count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_concurrency: Option<i64>,

    /// Request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,

    /// Percentage of traffic routed to the latest revision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canary_traffic_percent: Option<i64>,
}

impl ComponentExtensionSpec {
    /// Validate replica bounds, concurrency and canary percentage.
    pub fn validate(&self, component: &str) -> Result<()> {
        let field = |name: &str| format!("{}.{}", component, name);

        if let Some(min) = self.min_replicas {
            if min < 0 {
                return Err(Error::validation_for_field(
                    component,
                    field("minReplicas"),
                    "minReplicas cannot be less than 0",
                ));
            }
        }

        if let Some(max) = self.max_replicas {
            if max < 0 {
                return Err(Error::validation_for_field(
                    component,
                    field("maxReplicas"),
                    "maxReplicas cannot be less than 0",
                ));
            }
            let min = self.min_replicas.unwrap_or(0);
            if max != 0 && min > max {
                return Err(Error::validation_for_field(
                    component,
                    field("maxReplicas"),
                    format!(
                        "minReplicas ({}) cannot be greater than maxReplicas ({})",
                        min, max
                    ),
                ));
            }
        }

        if let Some(concurrency) = self.container_concurrency {
            if concurrency < 0 {
                return Err(Error::validation_for_field(
                    component,
                    field("containerConcurrency"),
                    "containerConcurrency cannot be less than 0",
                ));
            }
        }

        if let Some(percent) = self.canary_traffic_percent {
            if !(0..=100).contains(&percent) {
                return Err(Error::validation_for_field(
                    component,
                    field("canaryTrafficPercent"),
                    format!("canaryTrafficPercent must be between 0 and 100, got {}", percent),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn empty_extensions_are_valid() {
        assert!(ComponentExtensionSpec::default().validate("explainer").is_ok());
    }

    #[test]
    fn unbounded_max_allows_any_min() {
        let ext = ComponentExtensionSpec {
            min_replicas: Some(3),
            max_replicas: Some(0),
            ..Default::default()
        };
        assert!(ext.validate("explainer").is_ok());
    }

    #[rstest]
    #[case::negative_min(Some(-1), None, None, None, "explainer.minReplicas")]
    #[case::negative_max(None, Some(-2), None, None, "explainer.maxReplicas")]
    #[case::min_above_max(Some(5), Some(2), None, None, "explainer.maxReplicas")]
    #[case::negative_concurrency(None, None, Some(-4), None, "explainer.containerConcurrency")]
    #[case::canary_over_100(None, None, None, Some(101), "explainer.canaryTrafficPercent")]
    #[case::canary_negative(None, None, None, Some(-1), "explainer.canaryTrafficPercent")]
    fn rejects_invalid_extensions(
        #[case] min_replicas: Option<i32>,
        #[case] max_replicas: Option<i32>,
        #[case] container_concurrency: Option<i64>,
        #[case] canary_traffic_percent: Option<i64>,
        #[case] field: &str,
    ) {
        let ext = ComponentExtensionSpec {
            min_replicas,
            max_replicas,
            container_concurrency,
            canary_traffic_percent,
            ..Default::default()
        };
        let err = ext.validate("explainer").unwrap_err();
        assert_eq!(err.field(), Some(field));
    }

    #[test]
    fn deserializes_camel_case_fields() {
        let ext: ComponentExtensionSpec = serde_json::from_str(
            r#"{"minReplicas": 1, "maxReplicas": 3, "containerConcurrency": 5}"#,
        )
        .unwrap();
        assert_eq!(ext.min_replicas, Some(1));
        assert_eq!(ext.max_replicas, Some(3));
        assert_eq!(ext.container_concurrency, Some(5));
        assert!(ext.timeout.is_none());
    }
}
