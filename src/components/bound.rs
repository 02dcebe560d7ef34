use dioxus::prelude::*;

use crate::resource::Resource;

use super::{
    state::{
        Failure, FailureProps, Initial, InitialProps, Loading, LoadingProps, Match, MatchProps,
        States, Success, SuccessProps,
    },
    view::Slot,
};

/// The state components with `of` already bound to one resource
#[derive(Debug, Clone, PartialEq)]
pub struct StateComponents<D, E> {
    of: Resource<D, E>,
}

/// Binds the state components to `resource`.
///
/// # Examples
///
/// ```rust,ignore
/// let state = get_state_components(fortune.resource());
/// rsx! {
///     {state.loading(Slot::children(rsx! { "Loading..." }))}
///     {state.failure(Slot::render(|error: CCStr| rsx! { "Error: {error}" }))}
/// }
/// ```
pub fn get_state_components<D, E>(resource: Resource<D, E>) -> StateComponents<D, E> {
    StateComponents { of: resource }
}

impl<D, E> StateComponents<D, E>
where
    D: Clone + PartialEq + 'static,
    E: Clone + PartialEq + 'static,
{
    pub fn resource(&self) -> &Resource<D, E> {
        &self.of
    }

    pub fn initial(&self, slot: Slot<()>) -> Element {
        Initial(InitialProps {
            of: self.of.clone(),
            render: slot.render,
            view: slot.view,
            children: slot.children,
        })
    }

    pub fn loading(&self, slot: Slot<()>) -> Element {
        Loading(LoadingProps {
            of: self.of.clone(),
            render: slot.render,
            view: slot.view,
            children: slot.children,
        })
    }

    pub fn success(&self, slot: Slot<D>) -> Element {
        Success(SuccessProps {
            of: self.of.clone(),
            render: slot.render,
            view: slot.view,
            children: slot.children,
        })
    }

    pub fn failure(&self, slot: Slot<E>) -> Element {
        Failure(FailureProps {
            of: self.of.clone(),
            render: slot.render,
            view: slot.view,
            children: slot.children,
        })
    }

    pub fn matching(&self, states: impl Into<States>, slot: Slot<Resource<D, E>>) -> Element {
        Match(MatchProps {
            of: self.of.clone(),
            states: states.into(),
            render: slot.render,
            view: slot.view,
            children: slot.children,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{resource::Tag, utils::CCStr};

    fn page(resource: Resource<u32, CCStr>) -> String {
        let state = get_state_components(resource);
        dioxus_ssr::render_element(rsx! {
            {state.matching(
                States::new(Tag::Initial, [Tag::Loading]),
                Slot::children(rsx! { "waiting" }),
            )}
            {state.loading(Slot::view(|_| rsx! { "spinner" }))}
            {state.success(Slot::render(|value: u32| rsx! { "value {value}" }))}
            {state.failure(Slot::render(|error: CCStr| rsx! { "error {error}" }))}
        })
    }

    #[test]
    fn bound_components_follow_the_resource() {
        let html = page(Resource::Initial);
        assert!(html.contains("waiting"));
        assert!(!html.contains("spinner"));

        let html = page(Resource::Loading);
        assert!(html.contains("waiting"));
        assert!(html.contains("spinner"));

        let html = page(Resource::Success(3));
        assert!(html.contains("value 3"));
        assert!(!html.contains("waiting"));

        let html = page(Resource::Failure(CCStr::from("nope")));
        assert!(html.contains("error nope"));
        assert!(!html.contains("value"));
    }

    #[test]
    fn initial_slot_with_constant_children() {
        let state = get_state_components(Resource::<u32, CCStr>::Initial);
        let html = dioxus_ssr::render_element(state.initial(Slot::children(rsx! { "idle" })));
        assert!(html.contains("idle"));
        assert_eq!(state.resource(), &Resource::Initial);
    }
}
