//! Platform constants shared by every component spec.
//!
//! The argument flags form a versioned interface with the explainer runtimes;
//! renaming any of them breaks the images that consume them.

/// Reserved name for the primary container slot of a component pod
pub const INFERENCE_SERVICE_CONTAINER_NAME: &str = "kfserving-container";

/// Path where the storage initializer places downloaded model artifacts
pub const DEFAULT_MODEL_LOCAL_MOUNT_PATH: &str = "/mnt/models";

/// Default HTTP port served by every inference component
pub const INFERENCE_SERVICE_DEFAULT_HTTP_PORT: &str = "8080";

/// Name of the ConfigMap holding per-component image coordinates
pub const INFERENCE_SERVICE_CONFIG_MAP_NAME: &str = "inferenceservice-config";

/// Key of the explainer section inside the inference service ConfigMap
pub const EXPLAINER_CONFIG_KEY_NAME: &str = "explainers";

/// Default CPU request and limit applied when unset
pub const DEFAULT_CPU: &str = "1";

/// Default memory request and limit applied when unset
pub const DEFAULT_MEMORY: &str = "2Gi";

// =============================================================================
// Argument flags
// =============================================================================

/// Flag carrying the owning inference service name
pub const ARGUMENT_MODEL_NAME: &str = "--model_name";

/// Flag carrying the address of the sibling predictor service
pub const ARGUMENT_PREDICTOR_HOST: &str = "--predictor_host";

/// Flag carrying the HTTP port
pub const ARGUMENT_HTTP_PORT: &str = "--http_port";

/// Flag carrying the worker count derived from container concurrency
pub const ARGUMENT_WORKERS: &str = "--workers";

/// Flag carrying the local path of the fetched explanation artifact
pub const ARGUMENT_STORAGE_URI: &str = "--storage_uri";

/// Flag selecting the AIX explanation algorithm
pub const ARGUMENT_EXPLAINER_TYPE: &str = "--explainer_type";

/// Flag selecting the ART adversarial attack
pub const ARGUMENT_ADVERSARY_TYPE: &str = "--adversary_type";

/// Name of the predictor service belonging to an inference service
pub fn default_predictor_service_name(name: &str) -> String {
    format!("{}-predictor", name)
}

/// In-cluster host of the predictor service (`<service>.<namespace>`)
pub fn predictor_host(name: &str, namespace: &str) -> String {
    format!("{}.{}", default_predictor_service_name(name), namespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predictor_host_joins_service_and_namespace() {
        assert_eq!(predictor_host("mnist", "default"), "mnist-predictor.default");
    }

    #[test]
    fn predictor_service_name_has_suffix() {
        assert_eq!(default_predictor_service_name("flowers"), "flowers-predictor");
    }
}
