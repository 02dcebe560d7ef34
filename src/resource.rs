//! # Resource
//!
//! The lifecycle value of an asynchronous load: not started, in flight,
//! succeeded with data or failed with an error.
//!
//! A [`Resource`] is immutable. Every transition produces a new value that
//! replaces the previous one, so consumers only ever read it.

/// The discriminant of a [`Resource`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tag {
    Initial,
    Loading,
    Success,
    Failure,
}
impl Tag {
    pub const ALL: [Tag; 4] = [Tag::Initial, Tag::Loading, Tag::Success, Tag::Failure];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Initial => "initial",
            Tag::Loading => "loading",
            Tag::Success => "success",
            Tag::Failure => "failure",
        }
    }
}
impl core::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of an asynchronous load.
///
/// # Examples
///
/// ```rust
/// use async_resource::prelude::*;
///
/// let resource: Resource<u32, String> = Resource::Success(42);
/// assert!(resource.is_success());
/// assert_eq!(resource.tag(), Tag::Success);
/// assert_eq!(resource.get_or_else(|| 0), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource<D, E> {
    /// Nothing was requested yet (or the resource was reset)
    Initial,
    /// A load is in flight and took longer than the anti-flicker delay
    Loading,
    /// The last load succeeded
    Success(D),
    /// The last load failed
    Failure(E),
}

impl<D, E> Default for Resource<D, E> {
    fn default() -> Self {
        Resource::Initial
    }
}

impl<D, E> Resource<D, E> {
    pub fn tag(&self) -> Tag {
        match self {
            Resource::Initial => Tag::Initial,
            Resource::Loading => Tag::Loading,
            Resource::Success(_) => Tag::Success,
            Resource::Failure(_) => Tag::Failure,
        }
    }

    pub fn is_initial(&self) -> bool {
        matches!(self, Resource::Initial)
    }
    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }
    pub fn is_success(&self) -> bool {
        matches!(self, Resource::Success(_))
    }
    pub fn is_failure(&self) -> bool {
        matches!(self, Resource::Failure(_))
    }

    /// Returns the success payload, if any
    pub fn value(&self) -> Option<&D> {
        match self {
            Resource::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the failure payload, if any
    pub fn error(&self) -> Option<&E> {
        match self {
            Resource::Failure(error) => Some(error),
            _ => None,
        }
    }

    /// Consumes the resource and returns the success payload or the fallback
    pub fn get_or_else<F: FnOnce() -> D>(self, fallback: F) -> D {
        match self {
            Resource::Success(value) => value,
            _ => fallback(),
        }
    }

    pub fn as_ref(&self) -> Resource<&D, &E> {
        match self {
            Resource::Initial => Resource::Initial,
            Resource::Loading => Resource::Loading,
            Resource::Success(value) => Resource::Success(value),
            Resource::Failure(error) => Resource::Failure(error),
        }
    }

    pub fn map<U, F: FnOnce(D) -> U>(self, f: F) -> Resource<U, E> {
        match self {
            Resource::Initial => Resource::Initial,
            Resource::Loading => Resource::Loading,
            Resource::Success(value) => Resource::Success(f(value)),
            Resource::Failure(error) => Resource::Failure(error),
        }
    }

    pub fn map_err<U, F: FnOnce(E) -> U>(self, f: F) -> Resource<D, U> {
        match self {
            Resource::Initial => Resource::Initial,
            Resource::Loading => Resource::Loading,
            Resource::Success(value) => Resource::Success(value),
            Resource::Failure(error) => Resource::Failure(f(error)),
        }
    }
}

impl<D, E> From<Result<D, E>> for Resource<D, E> {
    fn from(value: Result<D, E>) -> Self {
        match value {
            Ok(value) => Resource::Success(value),
            Err(error) => Resource::Failure(error),
        }
    }
}

/// The outcome of a single run, once the load function settled.
///
/// This is what awaiting a run resolves to, whether or not the owning
/// component was still alive to receive the new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Settled<D, E> {
    Success(D),
    Failure(E),
}
impl<D, E> Settled<D, E> {
    pub fn is_success(&self) -> bool {
        matches!(self, Settled::Success(_))
    }
    pub fn into_result(self) -> Result<D, E> {
        match self {
            Settled::Success(value) => Ok(value),
            Settled::Failure(error) => Err(error),
        }
    }
}
impl<D, E> From<Result<D, E>> for Settled<D, E> {
    fn from(value: Result<D, E>) -> Self {
        match value {
            Ok(value) => Settled::Success(value),
            Err(error) => Settled::Failure(error),
        }
    }
}
impl<D, E> From<Settled<D, E>> for Resource<D, E> {
    fn from(value: Settled<D, E>) -> Self {
        match value {
            Settled::Success(value) => Resource::Success(value),
            Settled::Failure(error) => Resource::Failure(error),
        }
    }
}
