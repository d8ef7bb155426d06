//! Component specs for Lattice inference services
//!
//! Turns the declarative explainer block of an inference service into a
//! concrete Kubernetes `Container`. Each explainer variant implements
//! [`ComponentImplementation`]:
//! - `default` fills in the reserved container name, runtime version and resources
//! - `validate` reports the first invalid field
//! - `container` renders image, resources and a deterministic argument vector
//!
//! # Usage
//!
//! ```rust,ignore
//! let container = explainer.materialize(&metadata, &config)?;
//! ```

#![deny(missing_docs)]

pub mod cli;
pub mod component;
pub mod config;
pub mod constants;
pub mod error;
pub mod explainer;
pub mod resources;
pub mod storage;
pub mod telemetry;

pub use component::{ComponentExtensionSpec, ComponentImplementation};
pub use config::{ExplainerConfig, ExplainersConfig, InferenceServicesConfig};
pub use error::Error;
pub use explainer::{
    AixExplainerSpec, AixExplainerType, ArtExplainerSpec, ArtExplainerType, ExplainerKind,
    ExplainerSpec,
};

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;
