//! AIX360 explainer spec

use std::collections::HashMap;
use std::fmt;

use k8s_openapi::api::core::v1::{Container, ResourceRequirements};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    default_explainer, image_reference, predictor_args, push_config_args, ExplainerKind,
    EXPLAINER_COMPONENT,
};
use crate::component::{ComponentExtensionSpec, ComponentImplementation};
use crate::config::InferenceServicesConfig;
use crate::constants::{
    ARGUMENT_EXPLAINER_TYPE, ARGUMENT_STORAGE_URI, DEFAULT_MODEL_LOCAL_MOUNT_PATH,
    INFERENCE_SERVICE_CONTAINER_NAME,
};
use crate::storage::{deserialize_non_empty, validate_storage_uri};
use crate::Result;

/// AIX explanation algorithm.
///
/// Unknown values are kept verbatim so newer runtimes can add algorithms
/// without a platform release.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum AixExplainerType {
    /// LIME explanations for image classifiers
    #[default]
    LimeImages,
    /// Any other algorithm name understood by the runtime
    Other(String),
}

impl AixExplainerType {
    /// Wire representation passed to `--explainer_type`
    pub fn as_str(&self) -> &str {
        match self {
            Self::LimeImages => "LimeImages",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for AixExplainerType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "LimeImages" => Self::LimeImages,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for AixExplainerType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<AixExplainerType> for String {
    fn from(value: AixExplainerType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for AixExplainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration of an AIX360 explanation server
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AixExplainerSpec {
    /// Explanation algorithm
    #[serde(rename = "type")]
    pub type_: AixExplainerType,

    /// Location of a trained explanation artifact
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_non_empty"
    )]
    pub storage_uri: Option<String>,

    /// Runtime image tag; defaults to the configured version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_version: Option<String>,

    /// Container overrides. Only `name` and `resources` feed the rendered container.
    #[serde(flatten)]
    pub container: Container,

    /// Extra runtime flags, rendered as `--<key> <value>`
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub config: HashMap<String, String>,
}

impl ComponentImplementation for AixExplainerSpec {
    fn apply_defaults(&mut self, config: &InferenceServicesConfig) {
        default_explainer(
            ExplainerKind::Aix,
            &mut self.container,
            &mut self.runtime_version,
            config,
        );
    }

    fn validate(&self) -> Result<()> {
        validate_storage_uri(
            self.storage_uri(),
            EXPLAINER_COMPONENT,
            "explainer.aix.storageUri",
        )
    }

    fn storage_uri(&self) -> Option<&str> {
        self.storage_uri.as_deref().filter(|uri| !uri.is_empty())
    }

    fn resource_requirements(&self) -> Option<&ResourceRequirements> {
        self.container.resources.as_ref()
    }

    fn container(
        &self,
        metadata: &ObjectMeta,
        extensions: &ComponentExtensionSpec,
        config: &InferenceServicesConfig,
    ) -> Container {
        let mut args = predictor_args(metadata, extensions);
        if self.storage_uri().is_some() {
            args.push(ARGUMENT_STORAGE_URI.to_string());
            args.push(DEFAULT_MODEL_LOCAL_MOUNT_PATH.to_string());
        }
        args.push(ARGUMENT_EXPLAINER_TYPE.to_string());
        args.push(self.type_.to_string());
        push_config_args(&mut args, &self.config);

        let image = image_reference(
            ExplainerKind::Aix,
            self.runtime_version.as_deref(),
            config,
        );
        debug!(explainer = "aix", image = %image, args = ?args, "materialized explainer container");

        Container {
            name: INFERENCE_SERVICE_CONTAINER_NAME.to_string(),
            image: Some(image),
            resources: self.container.resources.clone(),
            args: Some(args),
            ..Default::default()
        }
    }
}
