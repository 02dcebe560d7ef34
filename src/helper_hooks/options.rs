use std::{rc::Rc, time::Duration};

use crate::resource::Resource;

use super::dependencies::Dependencies;

/// Default delay before a run shows [`Resource::Loading`]
pub const DEFAULT_SKIP_LOADING_FOR: Duration = Duration::from_millis(150);

pub type SuccessCallback<D> = Rc<dyn Fn(&D)>;
pub type FailureCallback<E> = Rc<dyn Fn(&E)>;

/// Configuration of a load site.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use async_resource::{dependencies, prelude::*};
///
/// let wallet_id = 5u32;
/// let options: ResourceOptions<u32, String, String> = ResourceOptions::default()
///     .with_params(wallet_id)
///     .with_dependencies(dependencies![wallet_id])
///     .with_skip_loading_for(Duration::ZERO)
///     .with_on_success(|name: &String| log::info!("loaded {name}"));
/// assert!(options.cancellable());
/// ```
pub struct ResourceOptions<P, D, E> {
    pub(super) cancellable: bool,
    pub(super) chain: Resource<P, ()>,
    pub(super) defer: bool,
    pub(super) dependencies: Dependencies,
    pub(super) on_failure: Option<FailureCallback<E>>,
    pub(super) on_success: Option<SuccessCallback<D>>,
    pub(super) params: Option<P>,
    pub(super) skip_loading_for: Duration,
}

impl<P, D, E> Default for ResourceOptions<P, D, E> {
    fn default() -> Self {
        Self {
            cancellable: true,
            chain: Resource::Initial,
            defer: false,
            dependencies: Dependencies::new(),
            on_failure: None,
            on_success: None,
            params: None,
            skip_loading_for: DEFAULT_SKIP_LOADING_FOR,
        }
    }
}

impl<P, D, E> ResourceOptions<P, D, E> {
    /// Abort the previous in-flight run before starting a new one
    pub fn with_cancellable(mut self, cancellable: bool) -> Self {
        self.cancellable = cancellable;
        self
    }

    /// Takes the params of the automatic run from an upstream resource,
    /// as long as that resource is in its success state
    pub fn with_chain<X>(mut self, upstream: &Resource<P, X>) -> Self
    where
        P: Clone,
    {
        self.chain = upstream.as_ref().map(P::clone).map_err(|_| ());
        self
    }

    /// Do not run automatically on mount or on dependency change
    pub fn with_defer(mut self, defer: bool) -> Self {
        self.defer = defer;
        self
    }

    pub fn with_dependencies(mut self, dependencies: Dependencies) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_on_failure(mut self, on_failure: impl Fn(&E) + 'static) -> Self {
        self.on_failure = Some(Rc::new(on_failure));
        self
    }

    pub fn with_on_success(mut self, on_success: impl Fn(&D) + 'static) -> Self {
        self.on_success = Some(Rc::new(on_success));
        self
    }

    pub fn with_params(mut self, params: P) -> Self {
        self.params = Some(params);
        self
    }

    /// `Duration::ZERO` shows the loading state immediately
    pub fn with_skip_loading_for(mut self, skip_loading_for: Duration) -> Self {
        self.skip_loading_for = skip_loading_for;
        self
    }

    pub fn cancellable(&self) -> bool {
        self.cancellable
    }
    pub fn deferred(&self) -> bool {
        self.defer
    }
    pub fn skip_loading_for(&self) -> Duration {
        self.skip_loading_for
    }
    pub fn dependencies(&self) -> &Dependencies {
        &self.dependencies
    }
}

impl<P: Clone, D, E> ResourceOptions<P, D, E> {
    /// Params of an automatic run: the chained success value, else `params`
    pub(super) fn automatic_params(&self) -> Option<P> {
        self.chain.value().cloned().or_else(|| self.params.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = ResourceOptions::<u8, u8, u8>::default();
        assert!(options.cancellable());
        assert!(!options.deferred());
        assert_eq!(options.skip_loading_for(), Duration::from_millis(150));
        assert!(options.dependencies().is_empty());
        assert_eq!(options.automatic_params(), None);
    }

    #[test]
    fn chain_success_wins_over_params() {
        let upstream: Resource<u8, String> = Resource::Success(9);
        let options = ResourceOptions::<u8, u8, u8>::default()
            .with_params(1)
            .with_chain(&upstream);
        assert_eq!(options.automatic_params(), Some(9));
    }

    #[test]
    fn pending_chain_falls_back_to_params() {
        for upstream in [
            Resource::<u8, String>::Initial,
            Resource::Loading,
            Resource::Failure("boom".to_string()),
        ] {
            let options = ResourceOptions::<u8, u8, u8>::default()
                .with_params(1)
                .with_chain(&upstream);
            assert_eq!(options.automatic_params(), Some(1));
        }
    }
}
