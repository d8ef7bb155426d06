//! Storage URI handling for pretrained artifacts
//!
//! Artifacts are fetched into the pod by the storage initializer before the
//! component starts, so validation only has to guarantee the URI is one the
//! initializer understands.

use serde::{Deserialize, Deserializer};

use crate::{Error, Result};

/// URI prefixes the storage initializer can download from
pub const SUPPORTED_STORAGE_URI_PREFIXES: &[&str] = &[
    "gs://",
    "s3://",
    "pvc://",
    "file://",
    "https://",
    "http://",
    "hdfs://",
    "webhdfs://",
];

/// Validate an optional storage URI.
///
/// Accepted forms:
/// - absent (nothing to fetch)
/// - a supported prefix followed by a non-empty location
/// - an absolute local path
pub fn validate_storage_uri(uri: Option<&str>, component: &str, field: &str) -> Result<()> {
    let Some(uri) = uri else {
        return Ok(());
    };

    if uri.chars().any(char::is_whitespace) {
        return Err(unsupported(uri, component, field));
    }

    for prefix in SUPPORTED_STORAGE_URI_PREFIXES {
        if let Some(rest) = uri.strip_prefix(prefix) {
            if rest.is_empty() {
                return Err(Error::validation_for_field(
                    component,
                    field,
                    format!("storageUri [{}] has no location after '{}'", uri, prefix),
                ));
            }
            return Ok(());
        }
    }

    if uri.starts_with('/') && !uri.contains("://") {
        return Ok(());
    }

    Err(unsupported(uri, component, field))
}

fn unsupported(uri: &str, component: &str, field: &str) -> Error {
    Error::validation_for_field(
        component,
        field,
        format!(
            "storageUri must be one of: [{}] or an absolute local path. StorageUri [{}] is not supported.",
            SUPPORTED_STORAGE_URI_PREFIXES.join(", "),
            uri
        ),
    )
}

/// Deserialize an optional string, mapping `""` to `None`.
pub(crate) fn deserialize_non_empty<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
