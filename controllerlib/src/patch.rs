use crate::errors::{AggregateError, PatchInstanceError};
use crate::helper::PatchOptions;
use crate::instance::InstanceOpts;
use crate::logger::Logger;

/// What happened to a patch attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    Patched,
    /// The object was deleted before the patch landed.
    ObjectNotFound,
}

/// Patches `opts.object` once through `opts.helper` and reports the outcome.
///
/// `status.observedGeneration` is only requested when `opts.error` is `None`,
/// so a failing reconciliation does not mark the generation as handled. A
/// not-found response is treated as success-like. Any other failure is
/// combined with `opts.error` into an `AggregateError`. Every branch is
/// logged through `logger`.
pub async fn try_patch_instance<K>(
    logger: Logger<'_>,
    opts: InstanceOpts<'_, K>,
) -> Result<PatchOutcome, PatchInstanceError> {
    let object = match opts.validated_object() {
        Ok(object) => object,
        Err(err) => {
            let message = err.to_string();
            logger.error(
                format_args!("Invalid instance options"),
                &[("error", message.as_str())],
            );
            return Err(err.into());
        }
    };
    let InstanceOpts {
        controller,
        request,
        error,
        helper,
        ..
    } = opts;
    let tags = [
        ("requestInfo", request.as_str()),
        ("controller", controller.as_str()),
    ];

    logger.info(format_args!("Patching object instance"), &tags);

    let options = if error.is_none() {
        PatchOptions::default().with_status_observed_generation()
    } else {
        PatchOptions::default()
    };

    let patch_err = match helper.patch(object, &options).await {
        Ok(()) => {
            logger.info(format_args!("Object instance patched"), &tags);
            return Ok(PatchOutcome::Patched);
        }
        Err(e) => e,
    };

    logger.debug(format_args!("Checking error type"), &[]);
    let patch_message = patch_err.to_string();
    if patch_err.is_not_found() {
        logger.info(
            format_args!("Object not found, returning"),
            &[("error", patch_message.as_str())],
        );
        return Ok(PatchOutcome::ObjectNotFound);
    }

    let aggregate = AggregateError::new([Some(anyhow::Error::new(patch_err)), error]);
    let aggregate_message = aggregate.to_string();
    logger.error(
        format_args!("Error patching object instance"),
        &[
            ("requestInfo", request.as_str()),
            ("controller", controller.as_str()),
            ("err", patch_message.as_str()),
            ("aggregate", aggregate_message.as_str()),
        ],
    );
    Err(PatchInstanceError::Failed(aggregate))
}

/// Fire-and-forget form of `try_patch_instance`: outcomes are only visible
/// in the logs.
pub async fn patch_instance<K>(logger: Logger<'_>, opts: InstanceOpts<'_, K>) {
    let _ = try_patch_instance(logger, opts).await;
}
