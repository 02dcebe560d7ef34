//! Stateless components that show their content only when a [`Resource`] is
//! in a given state.
//!
//! Every component takes the resource to look at (`of`) and up to three ways
//! to describe its content, used in this order:
//! 1. `render`: a callback receiving the payload, always wins
//! 2. `view`: the "children as a function" callback
//! 3. `children`: constant children
//!
//! When the resource is not in the expected state the component renders an
//! empty fragment.
//!
//! # Examples
//!
//! ```rust,ignore
//! rsx! {
//!     Loading::<u32, CCStr> { of: resource.clone(), "Loading..." }
//!     Success::<u32, CCStr> {
//!         of: resource.clone(),
//!         render: ViewFn::new(|count: u32| rsx! { "{count} items" }),
//!     }
//! }
//! ```
use dioxus::prelude::*;

use crate::{
    errors::StatesError,
    resource::{Resource, Tag},
};

use super::view::{show, ViewFn};

#[derive(Props, Clone, PartialEq)]
pub struct InitialProps<D: Clone + PartialEq + 'static, E: Clone + PartialEq + 'static> {
    pub of: Resource<D, E>,
    pub render: Option<ViewFn<()>>,
    pub view: Option<ViewFn<()>>,
    #[props(default = VNode::empty())]
    pub children: Element,
}

/// Shows its content while the resource was not requested yet
#[allow(non_snake_case)]
pub fn Initial<D: Clone + PartialEq + 'static, E: Clone + PartialEq + 'static>(
    props: InitialProps<D, E>,
) -> Element {
    show(
        props.of.is_initial().then_some(()),
        &props.render,
        &props.view,
        &props.children,
    )
}

#[derive(Props, Clone, PartialEq)]
pub struct LoadingProps<D: Clone + PartialEq + 'static, E: Clone + PartialEq + 'static> {
    pub of: Resource<D, E>,
    pub render: Option<ViewFn<()>>,
    pub view: Option<ViewFn<()>>,
    #[props(default = VNode::empty())]
    pub children: Element,
}

/// Shows its content while a load is visibly in flight
#[allow(non_snake_case)]
pub fn Loading<D: Clone + PartialEq + 'static, E: Clone + PartialEq + 'static>(
    props: LoadingProps<D, E>,
) -> Element {
    show(
        props.of.is_loading().then_some(()),
        &props.render,
        &props.view,
        &props.children,
    )
}

#[derive(Props, Clone, PartialEq)]
pub struct SuccessProps<D: Clone + PartialEq + 'static, E: Clone + PartialEq + 'static> {
    pub of: Resource<D, E>,
    pub render: Option<ViewFn<D>>,
    pub view: Option<ViewFn<D>>,
    #[props(default = VNode::empty())]
    pub children: Element,
}

/// Shows its content, fed with the loaded value, once the load succeeded
#[allow(non_snake_case)]
pub fn Success<D: Clone + PartialEq + 'static, E: Clone + PartialEq + 'static>(
    props: SuccessProps<D, E>,
) -> Element {
    show(
        props.of.value().cloned(),
        &props.render,
        &props.view,
        &props.children,
    )
}

#[derive(Props, Clone, PartialEq)]
pub struct FailureProps<D: Clone + PartialEq + 'static, E: Clone + PartialEq + 'static> {
    pub of: Resource<D, E>,
    pub render: Option<ViewFn<E>>,
    pub view: Option<ViewFn<E>>,
    #[props(default = VNode::empty())]
    pub children: Element,
}

/// Shows its content, fed with the error, once the load failed
#[allow(non_snake_case)]
pub fn Failure<D: Clone + PartialEq + 'static, E: Clone + PartialEq + 'static>(
    props: FailureProps<D, E>,
) -> Element {
    show(
        props.of.error().cloned(),
        &props.render,
        &props.view,
        &props.children,
    )
}

/// A non-empty set of [`Tag`]s for [`Match`].
///
/// # Examples
///
/// ```rust
/// use async_resource::prelude::*;
///
/// let waiting = States::new(Tag::Initial, [Tag::Loading]);
/// assert!(waiting.contains(Tag::Loading));
/// assert_eq!(States::try_from(Vec::<Tag>::new()), Err(StatesError::Empty));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct States(Vec<Tag>);

impl States {
    pub fn new(first: Tag, rest: impl IntoIterator<Item = Tag>) -> Self {
        let mut tags = vec![first];
        for tag in rest {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        Self(tags)
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.0.contains(&tag)
    }

    pub fn tags(&self) -> &[Tag] {
        &self.0
    }
}

impl From<Tag> for States {
    fn from(tag: Tag) -> Self {
        Self::new(tag, [])
    }
}

impl TryFrom<Vec<Tag>> for States {
    type Error = StatesError;

    fn try_from(tags: Vec<Tag>) -> Result<Self, Self::Error> {
        let mut tags = tags.into_iter();
        match tags.next() {
            Some(first) => Ok(Self::new(first, tags)),
            None => Err(StatesError::Empty),
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct MatchProps<D: Clone + PartialEq + 'static, E: Clone + PartialEq + 'static> {
    pub of: Resource<D, E>,
    pub states: States,
    pub render: Option<ViewFn<Resource<D, E>>>,
    pub view: Option<ViewFn<Resource<D, E>>>,
    #[props(default = VNode::empty())]
    pub children: Element,
}

/// Shows its content, fed with the whole resource, when the resource is in
/// any of `states`
#[allow(non_snake_case)]
pub fn Match<D: Clone + PartialEq + 'static, E: Clone + PartialEq + 'static>(
    props: MatchProps<D, E>,
) -> Element {
    show(
        props
            .states
            .contains(props.of.tag())
            .then(|| props.of.clone()),
        &props.render,
        &props.view,
        &props.children,
    )
}
