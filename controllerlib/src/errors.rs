use std::fmt;

use thiserror::Error;

/// Reasons an `InstanceOpts` is rejected before any patch is attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstanceError {
    #[error("Controller name empty")]
    ControllerNameEmpty,

    #[error("Object name empty")]
    RequestEmpty,

    #[error("Object is nil")]
    ObjectMissing,
}

/// Failure reported by a `PatchHelper`.
#[derive(Error, Debug)]
pub enum PatchError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Object has no metadata.name, cannot patch it")]
    MissingName,

    #[error("Failed to serialize object for patching: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Kube(#[from] kube::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PatchError {
    /// True when the target object no longer exists on the server.
    ///
    /// An API status counts only when its message says "not found", so a
    /// route-level 404 such as a missing status subresource stays a failure.
    /// Errors carrying no type information are matched on their rendered
    /// message.
    pub fn is_not_found(&self) -> bool {
        match self {
            PatchError::NotFound(_) => true,
            PatchError::Kube(kube::Error::Api(response)) => response.message.contains("not found"),
            PatchError::MissingName | PatchError::Serialize(_) => false,
            PatchError::Kube(_) | PatchError::Other(_) => self.to_string().contains("not found"),
        }
    }
}

/// Several errors folded into one value. Absent errors are dropped on
/// construction, so the list only holds real failures.
#[derive(Debug, Default)]
pub struct AggregateError {
    errors: Vec<anyhow::Error>,
}

impl AggregateError {
    pub fn new<I>(errors: I) -> Self
    where
        I: IntoIterator<Item = Option<anyhow::Error>>,
    {
        AggregateError {
            errors: errors.into_iter().flatten().collect(),
        }
    }

    pub fn errors(&self) -> &[anyhow::Error] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => Ok(()),
            [single] => write!(f, "{}", single),
            _ => write!(f, "[{}]", self.messages().join(", ")),
        }
    }
}

impl std::error::Error for AggregateError {}

/// Typed failure of `try_patch_instance`.
#[derive(Error, Debug)]
pub enum PatchInstanceError {
    #[error("Invalid instance options: {0}")]
    Invalid(#[from] InstanceError),

    #[error("Error patching object instance: {0}")]
    Failed(AggregateError),
}
