mod api_helper;
mod errors;
mod helper;
mod instance;
mod logger;
mod patch;

pub use api_helper::{build_object_patch, build_status_patch, ApiPatchHelper};
pub use errors::{AggregateError, InstanceError, PatchError, PatchInstanceError};
pub use helper::{PatchHelper, PatchOptions};
pub use instance::InstanceOpts;
pub use logger::Logger;
pub use patch::{patch_instance, try_patch_instance, PatchOutcome};
