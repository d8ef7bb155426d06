//! Explainer component specs
//!
//! An inference service declares at most one explainer. The explainer block
//! names exactly one runtime (`aix` or `art`) next to the shared scaling
//! settings:
//!
//! ```yaml
//! containerConcurrency: 5
//! aix:
//!   type: LimeImages
//!   storageUri: gs://bucket/explainer
//!   config:
//!     num_samples: "100"
//! ```

mod aix;
mod art;

use std::collections::HashMap;
use std::fmt;

use k8s_openapi::api::core::v1::Container;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::component::{ComponentExtensionSpec, ComponentImplementation};
use crate::config::InferenceServicesConfig;
use crate::constants::{
    predictor_host, ARGUMENT_HTTP_PORT, ARGUMENT_MODEL_NAME, ARGUMENT_PREDICTOR_HOST,
    ARGUMENT_WORKERS, INFERENCE_SERVICE_CONTAINER_NAME, INFERENCE_SERVICE_DEFAULT_HTTP_PORT,
};
use crate::resources::set_resource_requirement_defaults;
use crate::{Error, Result};

pub use aix::{AixExplainerSpec, AixExplainerType};
pub use art::{ArtExplainerSpec, ArtExplainerType};

/// Component name used in validation errors and field paths
pub(crate) const EXPLAINER_COMPONENT: &str = "explainer";

/// Explainer runtimes known to the platform
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExplainerKind {
    /// AIX360 explanation server
    Aix,
    /// Adversarial Robustness Toolbox server
    Art,
}

impl ExplainerKind {
    /// Key of this runtime in the explainer block and the ConfigMap
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aix => "aix",
            Self::Art => "art",
        }
    }
}

impl fmt::Display for ExplainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Explainer block
// =============================================================================

/// Explainer block of an inference service
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExplainerSpec {
    /// AIX360 explainer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aix: Option<AixExplainerSpec>,

    /// Adversarial Robustness Toolbox explainer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub art: Option<ArtExplainerSpec>,

    /// Scaling settings shared with the other components
    #[serde(flatten)]
    pub extensions: ComponentExtensionSpec,
}

impl ExplainerSpec {
    /// Runtimes configured in this block, in declaration order
    pub fn kinds(&self) -> Vec<ExplainerKind> {
        let mut kinds = Vec::new();
        if self.aix.is_some() {
            kinds.push(ExplainerKind::Aix);
        }
        if self.art.is_some() {
            kinds.push(ExplainerKind::Art);
        }
        kinds
    }

    /// The single configured runtime.
    pub fn kind(&self) -> Result<ExplainerKind> {
        match self.kinds().as_slice() {
            [kind] => Ok(*kind),
            [] => Err(Error::validation_for_field(
                EXPLAINER_COMPONENT,
                EXPLAINER_COMPONENT,
                "exactly one of [aix, art] must be specified, got none",
            )),
            kinds => Err(Error::validation_for_field(
                EXPLAINER_COMPONENT,
                EXPLAINER_COMPONENT,
                format!(
                    "exactly one of [aix, art] must be specified, got [{}]",
                    kinds
                        .iter()
                        .map(ExplainerKind::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            )),
        }
    }

    /// The single configured runtime as a component implementation
    pub fn implementation(&self) -> Result<&dyn ComponentImplementation> {
        let kind = self.kind()?;
        let implementation: Option<&dyn ComponentImplementation> = match kind {
            ExplainerKind::Aix => self.aix.as_ref().map(|s| s as &dyn ComponentImplementation),
            ExplainerKind::Art => self.art.as_ref().map(|s| s as &dyn ComponentImplementation),
        };
        implementation.ok_or_else(|| missing_runtime(kind))
    }

    /// Mutable access to the single configured runtime
    pub fn implementation_mut(&mut self) -> Result<&mut dyn ComponentImplementation> {
        let kind = self.kind()?;
        let implementation: Option<&mut dyn ComponentImplementation> = match kind {
            ExplainerKind::Aix => self
                .aix
                .as_mut()
                .map(|s| s as &mut dyn ComponentImplementation),
            ExplainerKind::Art => self
                .art
                .as_mut()
                .map(|s| s as &mut dyn ComponentImplementation),
        };
        implementation.ok_or_else(|| missing_runtime(kind))
    }

    /// Validate the block: exactly one runtime, scaling settings, then the runtime itself.
    pub fn validate(&self) -> Result<()> {
        let implementation = self.implementation()?;
        self.extensions.validate(EXPLAINER_COMPONENT)?;
        implementation.validate()
    }

    /// Run the full lifecycle (default, validate, materialize) for the configured runtime.
    pub fn materialize(
        &mut self,
        metadata: &ObjectMeta,
        config: &InferenceServicesConfig,
    ) -> Result<Container> {
        self.implementation_mut()?.apply_defaults(config);
        self.validate()?;
        let container = self
            .implementation()?
            .container(metadata, &self.extensions, config);
        Ok(container)
    }
}

fn missing_runtime(kind: ExplainerKind) -> Error {
    Error::validation_for_field(
        EXPLAINER_COMPONENT,
        format!("{}.{}", EXPLAINER_COMPONENT, kind),
        format!("explainer runtime '{}' is not configured", kind),
    )
}

// =============================================================================
// Shared rendering helpers
// =============================================================================

/// Defaulting shared by every explainer runtime.
pub(crate) fn default_explainer(
    kind: ExplainerKind,
    container: &mut Container,
    runtime_version: &mut Option<String>,
    config: &InferenceServicesConfig,
) {
    container.name = INFERENCE_SERVICE_CONTAINER_NAME.to_string();
    if runtime_version.is_none() {
        let version = &config.explainers.for_kind(kind).default_image_version;
        debug!(explainer = %kind, version = %version, "defaulting runtime version");
        *runtime_version = Some(version.clone());
    }
    set_resource_requirement_defaults(container.resources.get_or_insert_with(Default::default));
}

/// Leading arguments every explainer receives: model name, predictor host,
/// HTTP port and (when set) the worker count.
pub(crate) fn predictor_args(
    metadata: &ObjectMeta,
    extensions: &ComponentExtensionSpec,
) -> Vec<String> {
    let name = metadata.name.as_deref().unwrap_or_default();
    let namespace = metadata.namespace.as_deref().unwrap_or_default();

    let mut args = vec![
        ARGUMENT_MODEL_NAME.to_string(),
        name.to_string(),
        ARGUMENT_PREDICTOR_HOST.to_string(),
        predictor_host(name, namespace),
        ARGUMENT_HTTP_PORT.to_string(),
        INFERENCE_SERVICE_DEFAULT_HTTP_PORT.to_string(),
    ];
    if let Some(concurrency) = extensions.container_concurrency {
        args.push(ARGUMENT_WORKERS.to_string());
        args.push(concurrency.to_string());
    }
    args
}

/// Append user settings as `--<key> <value>` pairs, keys sorted byte-wise.
///
/// `HashMap` iteration order varies between runs; the sort keeps the
/// rendered container stable for reconciliation diffs.
pub(crate) fn push_config_args(args: &mut Vec<String>, config: &HashMap<String, String>) {
    let mut keys: Vec<&String> = config.keys().collect();
    keys.sort();
    for key in keys {
        args.push(format!("--{}", key));
        args.push(config[key].clone());
    }
}

/// `<image>:<runtimeVersion>` for the given runtime.
pub(crate) fn image_reference(
    kind: ExplainerKind,
    runtime_version: Option<&str>,
    config: &InferenceServicesConfig,
) -> String {
    let explainer_config = config.explainers.for_kind(kind);
    let version = match runtime_version {
        Some(version) => version,
        None => {
            warn!(
                explainer = %kind,
                "materializing explainer without runtime version; using configured default"
            );
            explainer_config.default_image_version.as_str()
        }
    };
    format!("{}:{}", explainer_config.container_image, version)
}
