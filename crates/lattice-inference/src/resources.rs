//! Platform-wide resource defaults for component containers

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::ResourceRequirements;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

use crate::constants::{DEFAULT_CPU, DEFAULT_MEMORY};

fn default_resource_list() -> [(&'static str, &'static str); 2] {
    [("cpu", DEFAULT_CPU), ("memory", DEFAULT_MEMORY)]
}

/// Fill unset cpu/memory requests and limits with platform defaults.
///
/// Quantities the user set are kept as-is, and so are any other resource
/// names (e.g. `nvidia.com/gpu`). Calling this repeatedly is a no-op.
pub fn set_resource_requirement_defaults(requirements: &mut ResourceRequirements) {
    fill_defaults(requirements.requests.get_or_insert_with(BTreeMap::new));
    fill_defaults(requirements.limits.get_or_insert_with(BTreeMap::new));
}

fn fill_defaults(list: &mut BTreeMap<String, Quantity>) {
    for (name, quantity) in default_resource_list() {
        list.entry(name.to_string())
            .or_insert_with(|| Quantity(quantity.to_string()));
    }
}
