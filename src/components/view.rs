use dioxus::prelude::*;

use crate::utils::{CheapClone, EqCheapClone};

/// A view callback from a payload to an [`Element`].
///
/// Compared by pointer, so props holding one stay comparable: a clone is equal
/// to its original, two separately built callbacks never are.
pub struct ViewFn<T>(EqCheapClone<dyn Fn(T) -> Element>);

impl<T> ViewFn<T> {
    pub fn new(f: impl Fn(T) -> Element + 'static) -> Self {
        let f: CheapClone<dyn Fn(T) -> Element> = CheapClone::new(f);
        Self(f.into())
    }

    pub fn call(&self, payload: T) -> Element {
        (*self.0)(payload)
    }
}
impl<T> Clone for ViewFn<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}
impl<T> PartialEq for ViewFn<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<T> core::fmt::Debug for ViewFn<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ViewFn")
    }
}

/// Picks the view of a matched payload.
///
/// The renderer always wins, then the children callback, then the constant
/// children. `None` means there is nothing to show.
///
/// # Examples
///
/// ```rust
/// use async_resource::components::resolve_view;
///
/// let shown = resolve_view(
///     42,
///     None::<fn(u32) -> String>,
///     Some(|v: u32| format!("value {v}")),
///     Some("constant".to_string()),
/// );
/// assert_eq!(shown.as_deref(), Some("value 42"));
/// ```
pub fn resolve_view<T, V>(
    payload: T,
    render: Option<impl FnOnce(T) -> V>,
    view: Option<impl FnOnce(T) -> V>,
    children: Option<V>,
) -> Option<V> {
    if let Some(render) = render {
        return Some(render(payload));
    }
    if let Some(view) = view {
        return Some(view(payload));
    }
    children
}

/// Element-level [`resolve_view`]: an empty fragment when nothing matched
pub(super) fn show<T>(
    payload: Option<T>,
    render: &Option<ViewFn<T>>,
    view: &Option<ViewFn<T>>,
    children: &Element,
) -> Element {
    let Some(payload) = payload else {
        return rsx! {};
    };
    let render = render.as_ref().map(|f| move |payload| f.call(payload));
    let view = view.as_ref().map(|f| move |payload| f.call(payload));
    resolve_view(payload, render, view, Some(children.clone()))
        .unwrap_or_else(|| rsx! {})
}

/// What one bound state component shows: see [`StateComponents`](super::StateComponents)
pub struct Slot<T: 'static> {
    pub render: Option<ViewFn<T>>,
    pub view: Option<ViewFn<T>>,
    pub children: Element,
}

impl<T: 'static> Default for Slot<T> {
    fn default() -> Self {
        Self {
            render: None,
            view: None,
            children: VNode::empty(),
        }
    }
}

impl<T: 'static> Slot<T> {
    pub fn render(f: impl Fn(T) -> Element + 'static) -> Self {
        Self::default().with_render(f)
    }
    pub fn view(f: impl Fn(T) -> Element + 'static) -> Self {
        Self::default().with_view(f)
    }
    pub fn children(children: Element) -> Self {
        Self::default().with_children(children)
    }

    pub fn with_render(mut self, f: impl Fn(T) -> Element + 'static) -> Self {
        self.render = Some(ViewFn::new(f));
        self
    }
    pub fn with_view(mut self, f: impl Fn(T) -> Element + 'static) -> Self {
        self.view = Some(ViewFn::new(f));
        self
    }
    pub fn with_children(mut self, children: Element) -> Self {
        self.children = children;
        self
    }
}
