use std::fmt;

use crate::errors::InstanceError;
use crate::helper::PatchHelper;

/// Everything one `patch_instance` call needs. Built right before the call
/// and consumed by it.
pub struct InstanceOpts<'a, K> {
    /// Name of the calling controller.
    pub controller: String,
    /// Identifies the reconciled object, usually `namespace/name`.
    pub request: String,
    pub object: Option<&'a K>,
    /// The caller's reconciliation error so far, if any.
    pub error: Option<anyhow::Error>,
    pub helper: &'a dyn PatchHelper<K>,
}

impl<'a, K> InstanceOpts<'a, K> {
    pub fn new(
        controller: impl Into<String>,
        request: impl Into<String>,
        object: &'a K,
        helper: &'a dyn PatchHelper<K>,
    ) -> Self {
        InstanceOpts {
            controller: controller.into(),
            request: request.into(),
            object: Some(object),
            error: None,
            helper,
        }
    }

    pub fn with_error(mut self, error: Option<anyhow::Error>) -> Self {
        self.error = error;
        self
    }

    pub fn validate(&self) -> Result<(), InstanceError> {
        if self.controller.is_empty() {
            return Err(InstanceError::ControllerNameEmpty);
        }
        if self.request.is_empty() {
            return Err(InstanceError::RequestEmpty);
        }
        if self.object.is_none() {
            return Err(InstanceError::ObjectMissing);
        }
        Ok(())
    }

    pub(crate) fn validated_object(&self) -> Result<&'a K, InstanceError> {
        self.validate()?;
        self.object.ok_or(InstanceError::ObjectMissing)
    }
}

impl<K> fmt::Debug for InstanceOpts<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceOpts")
            .field("controller", &self.controller)
            .field("request", &self.request)
            .field("object", &self.object.is_some())
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PatchError;
    use crate::helper::PatchOptions;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    struct NoopHelper;

    #[async_trait]
    impl PatchHelper<String> for NoopHelper {
        async fn patch(&self, _object: &String, _options: &PatchOptions) -> Result<(), PatchError> {
            Ok(())
        }
    }

    #[test]
    fn test_validate_ok() {
        let object = "obj".to_string();
        let opts = InstanceOpts::new("c1", "r1", &object, &NoopHelper);
        assert_eq!(opts.validate(), Ok(()));
    }

    #[test]
    fn test_validate_empty_controller() {
        let object = "obj".to_string();
        let opts = InstanceOpts::new("", "r1", &object, &NoopHelper);
        assert_eq!(opts.validate(), Err(InstanceError::ControllerNameEmpty));
    }

    #[test]
    fn test_validate_empty_request() {
        let object = "obj".to_string();
        let opts = InstanceOpts::new("c1", "", &object, &NoopHelper);
        assert_eq!(opts.validate(), Err(InstanceError::RequestEmpty));
    }

    #[test]
    fn test_validate_missing_object() {
        let opts: InstanceOpts<'_, String> = InstanceOpts {
            controller: "c1".to_string(),
            request: "r1".to_string(),
            object: None,
            error: None,
            helper: &NoopHelper,
        };
        assert_eq!(opts.validate(), Err(InstanceError::ObjectMissing));
    }

    #[test]
    fn test_validate_checks_controller_first() {
        let opts: InstanceOpts<'_, String> = InstanceOpts {
            controller: String::new(),
            request: String::new(),
            object: None,
            error: None,
            helper: &NoopHelper,
        };
        assert_eq!(opts.validate(), Err(InstanceError::ControllerNameEmpty));
    }
}
