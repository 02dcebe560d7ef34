//! Asynchronous resources for Dioxus.
//!
//! [`use_async_resource`](helper_hooks::use_async_resource) runs an async load
//! function and exposes its progress as a [`Resource`](resource::Resource)
//! signal: `Initial` until a load is requested, `Loading` once it has been
//! running for longer than a short delay, then `Success` or `Failure`.
//! Superseded runs can be aborted, and nothing is written after the owning
//! component is gone.
//!
//! The [`components`] render content depending on the state of a resource,
//! either directly (`Initial`, `Loading`, `Success`, `Failure`, `Match`) or
//! bound to one resource through
//! [`get_state_components`](components::get_state_components).
pub mod components;
pub mod errors;
pub mod helper_hooks;
pub mod resource;
pub mod utils;

pub mod prelude {
    pub use super::components::{
        get_state_components, resolve_view, Failure, FailureProps, Initial, InitialProps, Loading,
        LoadingProps, Match, MatchProps, Slot, StateComponents, States, Success, SuccessProps,
        ViewFn,
    };
    pub use super::errors::{Aborted, StatesError};
    pub use super::helper_hooks::{
        create_resource, use_async_resource, Dependencies, LoadContext, ResourceLoader,
        ResourceOptions, UseAsyncResource,
    };
    pub use super::resource::{Resource, Settled, Tag};
    pub use super::utils::CCStr;
}
