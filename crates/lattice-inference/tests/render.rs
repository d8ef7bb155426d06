//! End-to-end rendering of explainer blocks from manifests on disk

use std::path::PathBuf;

use clap::Parser;
use k8s_openapi::api::core::v1::Container;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use lattice_inference::cli::{load_explainer, Cli};
use lattice_inference::{ComponentImplementation, Error, InferenceServicesConfig};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn metadata() -> ObjectMeta {
    ObjectMeta {
        name: Some("mnist".to_string()),
        namespace: Some("default".to_string()),
        ..Default::default()
    }
}

#[test]
fn materializes_aix_explainer_from_manifests() {
    let mut explainer = load_explainer(&fixture("aix-explainer.yaml")).unwrap();
    let config = InferenceServicesConfig::from_file(fixture("inferenceservice-config.yaml")).unwrap();

    let container = explainer.materialize(&metadata(), &config).unwrap();

    assert_eq!(container.name, "kfserving-container");
    assert_eq!(
        container.image.as_deref(),
        Some("kfserving/aix-explainer:v1.2.3")
    );
    assert_eq!(
        container.args.unwrap(),
        vec![
            "--model_name",
            "mnist",
            "--predictor_host",
            "mnist-predictor.default",
            "--http_port",
            "8080",
            "--workers",
            "5",
            "--storage_uri",
            "/mnt/models",
            "--explainer_type",
            "image-based",
            "--a",
            "1",
            "--b",
            "2",
        ]
    );

    let resources = container.resources.unwrap();
    let limits = resources.limits.unwrap();
    assert_eq!(limits["memory"], Quantity("4Gi".to_string()));
    assert_eq!(limits["cpu"], Quantity("1".to_string()));
    let requests = resources.requests.unwrap();
    assert_eq!(requests["memory"], Quantity("2Gi".to_string()));
}

#[test]
fn repeated_materialization_is_identical() {
    let config = InferenceServicesConfig::from_file(fixture("inferenceservice-config.yaml")).unwrap();

    let mut first = load_explainer(&fixture("aix-explainer.yaml")).unwrap();
    let mut second = load_explainer(&fixture("aix-explainer.yaml")).unwrap();
    let a = first.materialize(&metadata(), &config).unwrap();
    let b = second.materialize(&metadata(), &config).unwrap();
    assert_eq!(a, b);

    // A second pass over an already-defaulted spec changes nothing
    let c = first.materialize(&metadata(), &config).unwrap();
    assert_eq!(a, c);
    assert_eq!(
        first.aix.as_ref().unwrap().storage_uri(),
        Some("gs://bucket/model")
    );
}

#[test]
fn invalid_storage_uri_fails_validation() {
    let explainer = load_explainer(&fixture("invalid-explainer.yaml")).unwrap();
    let err = explainer.validate().unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    assert_eq!(err.field(), Some("explainer.aix.storageUri"));
}

#[test]
fn render_command_prints_container_yaml() {
    let explainer = fixture("aix-explainer.yaml");
    let config = fixture("inferenceservice-config.yaml");
    let cli = Cli::try_parse_from([
        "lattice-inference",
        "render",
        "--explainer",
        explainer.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--name",
        "mnist",
    ])
    .unwrap();

    let output = cli.run().unwrap();
    let container: Container = serde_yaml::from_str(&output).unwrap();
    assert_eq!(container.name, "kfserving-container");
    assert!(container
        .args
        .unwrap()
        .windows(2)
        .any(|w| w[0] == "--storage_uri" && w[1] == "/mnt/models"));
}

#[test]
fn validate_command_reports_failure() {
    let explainer = fixture("invalid-explainer.yaml");
    let cli = Cli::try_parse_from([
        "lattice-inference",
        "validate",
        "--explainer",
        explainer.to_str().unwrap(),
    ])
    .unwrap();

    assert!(cli.run().is_err());
}
