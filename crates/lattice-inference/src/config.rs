//! Ambient configuration for inference components
//!
//! Image coordinates and default versions live in the `inferenceservice-config`
//! ConfigMap. Each top-level key holds a JSON document; this module only reads
//! the `explainers` key:
//!
//! ```json
//! {
//!   "aix": { "image": "kfserving/aix-explainer", "defaultImageVersion": "0.2.2" },
//!   "art": { "image": "kfserving/art-explainer", "defaultImageVersion": "0.2.2" }
//! }
//! ```

use std::path::Path;

use k8s_openapi::api::core::v1::ConfigMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{EXPLAINER_CONFIG_KEY_NAME, INFERENCE_SERVICE_CONFIG_MAP_NAME};
use crate::explainer::ExplainerKind;
use crate::{Error, Result};

/// Image coordinates for one explainer runtime
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExplainerConfig {
    /// Image repository without a tag
    #[serde(rename = "image")]
    pub container_image: String,

    /// Tag used when a spec does not pin `runtimeVersion`
    pub default_image_version: String,
}

impl ExplainerConfig {
    /// Create an explainer config entry
    pub fn new(container_image: impl Into<String>, default_image_version: impl Into<String>) -> Self {
        Self {
            container_image: container_image.into(),
            default_image_version: default_image_version.into(),
        }
    }
}

/// Per-runtime explainer configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ExplainersConfig {
    /// AIX360 explainer runtime
    #[serde(default)]
    pub aix: ExplainerConfig,

    /// Adversarial Robustness Toolbox runtime
    #[serde(default)]
    pub art: ExplainerConfig,
}

impl ExplainersConfig {
    /// Image coordinates for the given explainer runtime
    pub fn for_kind(&self, kind: ExplainerKind) -> &ExplainerConfig {
        match kind {
            ExplainerKind::Aix => &self.aix,
            ExplainerKind::Art => &self.art,
        }
    }
}

/// Configuration shared by all inference service components
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct InferenceServicesConfig {
    /// Explainer runtime images
    #[serde(default)]
    pub explainers: ExplainersConfig,
}

impl InferenceServicesConfig {
    /// Parse the configuration out of the `inferenceservice-config` ConfigMap.
    pub fn from_config_map(config_map: &ConfigMap) -> Result<Self> {
        let name = config_map
            .metadata
            .name
            .as_deref()
            .unwrap_or(INFERENCE_SERVICE_CONFIG_MAP_NAME);

        let raw = config_map
            .data
            .as_ref()
            .and_then(|data| data.get(EXPLAINER_CONFIG_KEY_NAME))
            .ok_or_else(|| {
                Error::config_for_key(
                    EXPLAINER_CONFIG_KEY_NAME,
                    format!("ConfigMap {} has no '{}' key", name, EXPLAINER_CONFIG_KEY_NAME),
                )
            })?;

        let explainers: ExplainersConfig = serde_json::from_str(raw).map_err(|e| {
            Error::config_for_key(
                EXPLAINER_CONFIG_KEY_NAME,
                format!("unable to parse explainer config in {}: {}", name, e),
            )
        })?;

        debug!(
            config_map = %name,
            aix_image = %explainers.aix.container_image,
            art_image = %explainers.art.container_image,
            "loaded explainer configuration"
        );

        Ok(Self { explainers })
    }

    /// Load a ConfigMap manifest (YAML or JSON) from disk and parse it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config_map: ConfigMap = serde_yaml::from_str(&contents)?;
        Self::from_config_map(&config_map)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    use super::*;

    fn config_map(data: Option<BTreeMap<String, String>>) -> ConfigMap {
        ConfigMap {
            metadata: ObjectMeta {
                name: Some(INFERENCE_SERVICE_CONFIG_MAP_NAME.to_string()),
                namespace: Some("lattice-system".to_string()),
                ..Default::default()
            },
            data,
            ..Default::default()
        }
    }

    #[test]
    fn parses_explainers_key() {
        let mut data = BTreeMap::new();
        data.insert(
            "explainers".to_string(),
            r#"{
                "aix": {"image": "kfserving/aix-explainer", "defaultImageVersion": "0.2.2"},
                "art": {"image": "kfserving/art-explainer", "defaultImageVersion": "0.2.1"}
            }"#
            .to_string(),
        );

        let config = InferenceServicesConfig::from_config_map(&config_map(Some(data))).unwrap();
        assert_eq!(
            config.explainers.aix,
            ExplainerConfig::new("kfserving/aix-explainer", "0.2.2")
        );
        assert_eq!(config.explainers.art.default_image_version, "0.2.1");
    }

    #[test]
    fn missing_runtime_falls_back_to_empty_coordinates() {
        let mut data = BTreeMap::new();
        data.insert(
            "explainers".to_string(),
            r#"{"alibi": {"image": "seldonio/alibiexplainer", "defaultImageVersion": "0.4.0"},
                "aix": {"image": "kfserving/aix-explainer", "defaultImageVersion": "latest"}}"#
                .to_string(),
        );
        let config = InferenceServicesConfig::from_config_map(&config_map(Some(data))).unwrap();
        assert_eq!(config.explainers.art, ExplainerConfig::default());
        assert_eq!(config.explainers.aix.default_image_version, "latest");
    }

    #[test]
    fn missing_data_is_config_error() {
        let err = InferenceServicesConfig::from_config_map(&config_map(None)).unwrap_err();
        assert!(matches!(err, Error::Config { key: Some(ref k), .. } if k == "explainers"));
    }

    #[test]
    fn malformed_json_is_config_error() {
        let mut data = BTreeMap::new();
        data.insert("explainers".to_string(), "{not json".to_string());
        let err = InferenceServicesConfig::from_config_map(&config_map(Some(data))).unwrap_err();
        assert!(err.to_string().contains("unable to parse explainer config"));
    }

    #[test]
    fn for_kind_selects_runtime() {
        let explainers = ExplainersConfig {
            aix: ExplainerConfig::new("aix", "2"),
            art: ExplainerConfig::new("art", "3"),
        };
        assert_eq!(explainers.for_kind(ExplainerKind::Aix).container_image, "aix");
        assert_eq!(explainers.for_kind(ExplainerKind::Art).default_image_version, "3");
    }
}
