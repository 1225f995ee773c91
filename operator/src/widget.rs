use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_REPLICAS: i32 = 100;

#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, PartialEq, JsonSchema)]
#[kube(
    group = "controllerlib.io",
    version = "v1",
    kind = "Widget",
    namespaced,
    status = "WidgetStatus",
    shortname = "wd"
)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSpec {
    pub message: String,
    #[serde(default)]
    pub replicas: i32,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WidgetStatus {
    pub phase: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    #[error("spec.message must not be empty")]
    EmptyMessage,

    #[error("spec.replicas must be between 0 and 100, got {0}")]
    ReplicasOutOfRange(i32),
}

pub fn validate_spec(spec: &WidgetSpec) -> Result<(), SpecError> {
    if spec.message.trim().is_empty() {
        return Err(SpecError::EmptyMessage);
    }
    if !(0..=MAX_REPLICAS).contains(&spec.replicas) {
        return Err(SpecError::ReplicasOutOfRange(spec.replicas));
    }
    Ok(())
}

/// Status to write for this pass. `observedGeneration` is carried over;
/// the patch helper advances it only when the pass succeeded.
pub fn desired_status(
    previous: Option<&WidgetStatus>,
    spec_error: Option<&SpecError>,
) -> WidgetStatus {
    let observed_generation = previous.and_then(|s| s.observed_generation);
    match spec_error {
        None => WidgetStatus {
            phase: "Ready".to_string(),
            message: None,
            observed_generation,
        },
        Some(err) => WidgetStatus {
            phase: "Invalid".to_string(),
            message: Some(err.to_string()),
            observed_generation,
        },
    }
}
