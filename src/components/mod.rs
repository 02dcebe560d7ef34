mod bound;
mod state;
mod view;

pub use bound::{get_state_components, StateComponents};
pub use state::{
    Failure, FailureProps, Initial, InitialProps, Loading, LoadingProps, Match, MatchProps, States,
    Success, SuccessProps,
};
pub use view::{resolve_view, Slot, ViewFn};
