mod abort;
mod async_resource;
mod controller;
mod dependencies;
mod mounted;
mod options;

pub use abort::{AbortCoordinator, LoadContext};
pub use async_resource::{create_resource, use_async_resource, ResourceLoader, UseAsyncResource};
pub use controller::{Loader, ResourceController, StateWriter};
pub use dependencies::{Dependencies, Dependency};
pub use mounted::MountTracker;
pub use options::{FailureCallback, ResourceOptions, SuccessCallback, DEFAULT_SKIP_LOADING_FOR};
