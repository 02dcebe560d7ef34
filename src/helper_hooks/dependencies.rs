use std::{any::Any, rc::Rc};

/// A value that can take part in a [`Dependencies`] list.
///
/// Implemented for every `PartialEq + 'static` type; two dependencies are the
/// same when they have the same concrete type and compare equal.
pub trait Dependency: Any {
    fn same_as(&self, other: &dyn Dependency) -> bool;
    fn as_any(&self) -> &dyn Any;
}

impl<T: PartialEq + 'static> Dependency for T {
    fn same_as(&self, other: &dyn Dependency) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| other == self)
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Ordered list of values whose change re-triggers the automatic run.
///
/// Compared element by element, each element with its own `PartialEq`.
///
/// # Examples
///
/// ```rust
/// use async_resource::dependencies;
///
/// let before = dependencies![1u32, "wallet"];
/// assert_eq!(before, dependencies![1u32, "wallet"]);
/// assert_ne!(before, dependencies![5u32, "wallet"]);
/// ```
#[derive(Clone, Default)]
pub struct Dependencies(Vec<Rc<dyn Dependency>>);

impl Dependencies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<T: PartialEq + 'static>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    pub fn push<T: PartialEq + 'static>(&mut self, value: T) {
        self.0.push(Rc::new(value));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for Dependencies {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(other.0.iter())
                .all(|(a, b)| a.as_ref().same_as(b.as_ref()))
    }
}

impl core::fmt::Debug for Dependencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Dependencies({} values)", self.0.len())
    }
}

/// Builds a [`Dependencies`] list from a sequence of expressions
#[macro_export]
macro_rules! dependencies {
    ($($dep:expr),* $(,)?) => {
        $crate::helper_hooks::Dependencies::new()$(.with($dep))*
    };
}
