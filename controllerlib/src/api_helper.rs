use std::fmt::Debug;

use async_trait::async_trait;
use kube::api::{Api, Patch, PatchParams};
use kube::Resource;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Map, Value};

use crate::errors::PatchError;
use crate::helper::{PatchHelper, PatchOptions};

const PATCHABLE_METADATA: [&str; 4] = ["labels", "annotations", "finalizers", "ownerReferences"];
const SKIPPED_TOP_LEVEL: [&str; 4] = ["apiVersion", "kind", "metadata", "status"];

/// `PatchHelper` that sends JSON merge patches through a kube `Api<K>`.
///
/// Each call sends the object's mutable surface (spec and selected
/// metadata) and then, if there is anything to write, its status to the
/// status subresource. Both bodies carry `metadata.resourceVersion`, so a
/// write built from an outdated copy is rejected with a 409 instead of
/// overwriting newer state. Retries are left to the caller.
#[derive(Clone)]
pub struct ApiPatchHelper<K> {
    api: Api<K>,
    params: PatchParams,
}

impl<K> ApiPatchHelper<K> {
    pub fn new(api: Api<K>) -> Self {
        ApiPatchHelper {
            api,
            params: PatchParams::default(),
        }
    }

    pub fn with_params(mut self, params: PatchParams) -> Self {
        self.params = params;
        self
    }
}

#[async_trait]
impl<K> PatchHelper<K> for ApiPatchHelper<K>
where
    K: Resource + Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn patch(&self, object: &K, options: &PatchOptions) -> Result<(), PatchError> {
        let name = object
            .meta()
            .name
            .clone()
            .ok_or(PatchError::MissingName)?;
        let generation = object.meta().generation;
        let value = serde_json::to_value(object)?;

        let object_patch = build_object_patch(&value);
        let patched = self
            .api
            .patch(&name, &self.params, &Patch::Merge(&object_patch))
            .await?;

        // the first write bumps resourceVersion, the status write must use the new one
        let resource_version = patched.meta().resource_version.clone();
        if let Some(status_patch) =
            build_status_patch(&value, generation, resource_version.as_deref(), options)
        {
            self.api
                .patch_status(&name, &self.params, &Patch::Merge(&status_patch))
                .await?;
        }

        Ok(())
    }
}

/// Merge patch for everything but the status subresource, guarded by the
/// object's `metadata.resourceVersion` when it has one.
pub fn build_object_patch(object: &Value) -> Value {
    let mut patch = Map::new();

    let mut metadata = Map::new();
    if let Some(source) = object.get("metadata").and_then(Value::as_object) {
        for key in PATCHABLE_METADATA {
            if let Some(field) = source.get(key) {
                metadata.insert(key.to_string(), field.clone());
            }
        }
        if let Some(resource_version) = source.get("resourceVersion") {
            metadata.insert("resourceVersion".to_string(), resource_version.clone());
        }
    }
    patch.insert("metadata".to_string(), Value::Object(metadata));

    if let Some(fields) = object.as_object() {
        for (key, field) in fields {
            if !SKIPPED_TOP_LEVEL.contains(&key.as_str()) {
                patch.insert(key.clone(), field.clone());
            }
        }
    }

    Value::Object(patch)
}

/// Merge patch for the status subresource, or `None` when there is nothing
/// to write. `resource_version` becomes the write precondition.
pub fn build_status_patch(
    object: &Value,
    generation: Option<i64>,
    resource_version: Option<&str>,
    options: &PatchOptions,
) -> Option<Value> {
    let mut status = match object.get("status") {
        Some(Value::Object(status)) => status.clone(),
        _ if options.include_status_observed_generation => Map::new(),
        _ => return None,
    };

    if options.include_status_observed_generation {
        if let Some(generation) = generation {
            status.insert("observedGeneration".to_string(), json!(generation));
        }
    }

    if status.is_empty() {
        return None;
    }
    match resource_version {
        Some(resource_version) => Some(json!({
            "metadata": { "resourceVersion": resource_version },
            "status": status,
        })),
        None => Some(json!({ "status": status })),
    }
}
