//! Adversarial Robustness Toolbox explainer spec
//!
//! ART runs attacks against the predictor instead of loading an explanation
//! artifact, so the storage URI is validated but never rendered.

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
use crate::constants::{ARGUMENT_ADVERSARY_TYPE, INFERENCE_SERVICE_CONTAINER_NAME};
use crate::storage::{deserialize_non_empty, validate_storage_uri};
use crate::Result;

/// ART adversarial attack
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum ArtExplainerType {
    /// Square attack (black-box, score-based)
    #[default]
    SquareAttack,
    /// Any other attack name understood by the runtime
    Other(String),
}

impl ArtExplainerType {
    /// Wire representation passed to `--adversary_type`
    pub fn as_str(&self) -> &str {
        match self {
            Self::SquareAttack => "SquareAttack",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for ArtExplainerType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SquareAttack" => Self::SquareAttack,
            _ => Self::Other(value),
        }
    }
}

impl From<ArtExplainerType> for String {
    fn from(value: ArtExplainerType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ArtExplainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration of an ART adversarial explainer
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArtExplainerSpec {
    /// Attack to run
    #[serde(rename = "type")]
    pub type_: ArtExplainerType,

    /// Location of a trained artifact (unused by the runtime today)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_non_empty"
    )]
    pub storage_uri: Option<String>,

    /// Runtime image tag; defaults to the configured version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_version: Option<String>,

    /// Container overrides
    #[serde(flatten)]
    pub container: Container,

    /// Extra runtime flags, rendered as `--<key> <value>`
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub config: HashMap<String, String>,
}

impl ComponentImplementation for ArtExplainerSpec {
    fn apply_defaults(&mut self, config: &InferenceServicesConfig) {
        default_explainer(
            ExplainerKind::Art,
            &mut self.container,
            &mut self.runtime_version,
            config,
        );
    }

    fn validate(&self) -> Result<()> {
        validate_storage_uri(
            self.storage_uri(),
            EXPLAINER_COMPONENT,
            "explainer.art.storageUri",
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
        args.push(ARGUMENT_ADVERSARY_TYPE.to_string());
        args.push(self.type_.to_string());
        push_config_args(&mut args, &self.config);

        let image = image_reference(
            ExplainerKind::Art,
            self.runtime_version.as_deref(),
            config,
        );
        debug!(explainer = "art", image = %image, args = ?args, "materialized explainer container");

        Container {
            name: INFERENCE_SERVICE_CONTAINER_NAME.to_string(),
            image: Some(image),
            resources: self.container.resources.clone(),
            args: Some(args),
            ..Default::default()
        }
    }
}
