/// Misuse of the [`States`](crate::components::States) set of a `Match`
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StatesError {
    #[error("a Match needs at least one state to match against")]
    Empty,
}

/// Returned by [`LoadContext::abortable`](crate::helper_hooks::LoadContext::abortable)
/// when the run was superseded or cancelled before the load completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("load aborted")]
pub struct Aborted;
