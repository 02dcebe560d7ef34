use std::{cell::RefCell, future::Future, pin::pin, rc::Rc};

use futures_util::future::{self, Either, FutureExt, LocalBoxFuture};
use uuid::Uuid;

use crate::resource::{Resource, Settled};

use super::{
    abort::{AbortCoordinator, LoadContext},
    dependencies::Dependencies,
    mounted::MountTracker,
    options::ResourceOptions,
};

/// Where a controller writes the resource state.
///
/// In a component this is the `Signal` of the hook; anything else that can
/// receive a new value works too.
pub trait StateWriter<T> {
    fn write_state(&mut self, value: T);
}

type LoadFn<P, D, E> = dyn Fn(Option<P>, LoadContext) -> LocalBoxFuture<'static, Result<D, E>>;

/// A type-erased load function: `(params, context) -> Future<Result<D, E>>`
pub struct Loader<P, D, E>(Rc<LoadFn<P, D, E>>);

impl<P, D, E> Loader<P, D, E> {
    pub fn new<F, Fut>(load: F) -> Self
    where
        F: Fn(Option<P>, LoadContext) -> Fut + 'static,
        Fut: Future<Output = Result<D, E>> + 'static,
    {
        Self(Rc::new(move |params, ctx| load(params, ctx).boxed_local()))
    }

    pub(crate) fn call(
        &self,
        params: Option<P>,
        ctx: LoadContext,
    ) -> LocalBoxFuture<'static, Result<D, E>> {
        (self.0)(params, ctx)
    }
}
impl<P, D, E> Clone for Loader<P, D, E> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

struct ControllerInner<P, D, E, W> {
    loader: RefCell<Loader<P, D, E>>,
    options: RefCell<ResourceOptions<P, D, E>>,
    abort: AbortCoordinator,
    mounted: MountTracker,
    writer: RefCell<W>,
    seen_dependencies: RefCell<Option<Dependencies>>,
}

/// Drives the [`Resource`] of one load site through its transitions.
///
/// The controller is the only writer of the state. Clones share the same
/// inner state, so a clone can be moved into a spawned run or an event
/// handler.
///
/// Borrows of the inner cells are never held while user code (the load
/// function, `on_success`, `on_failure`) runs, so these callbacks may call
/// back into the controller.
pub struct ResourceController<P, D, E, W> {
    inner: Rc<ControllerInner<P, D, E, W>>,
}
impl<P, D, E, W> Clone for ResourceController<P, D, E, W> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<P, D, E, W> ResourceController<P, D, E, W>
where
    P: Clone + 'static,
    D: Clone + 'static,
    E: Clone + 'static,
    W: StateWriter<Resource<D, E>> + 'static,
{
    pub fn new(loader: Loader<P, D, E>, options: ResourceOptions<P, D, E>, writer: W) -> Self {
        Self {
            inner: Rc::new(ControllerInner {
                loader: RefCell::new(loader),
                options: RefCell::new(options),
                abort: AbortCoordinator::new(),
                mounted: MountTracker::new(),
                writer: RefCell::new(writer),
                seen_dependencies: RefCell::new(None),
            }),
        }
    }

    /// Replaces the load function and options used by the next runs
    pub fn configure(&self, loader: Loader<P, D, E>, options: ResourceOptions<P, D, E>) {
        *self.inner.loader.borrow_mut() = loader;
        *self.inner.options.borrow_mut() = options;
    }

    /// Starts a load.
    ///
    /// Params resolve to `params`, else the chained success value, else the
    /// `params` option. Nothing happens until the returned future is polled.
    /// It resolves to the outcome of this run even if the owner was torn down
    /// in the meantime; only the state writes and callbacks are skipped then.
    pub fn run(&self, params: Option<P>) -> impl Future<Output = Settled<D, E>> + 'static {
        let this = self.clone();
        async move { this.execute(params).await }
    }

    async fn execute(self, params: Option<P>) -> Settled<D, E> {
        let run_id = Uuid::new_v4();
        let (cancellable, skip_loading_for, params, loader) = {
            let options = self.inner.options.borrow();
            (
                options.cancellable,
                options.skip_loading_for,
                params.or_else(|| options.automatic_params()),
                self.inner.loader.borrow().clone(),
            )
        };
        log::debug!("run {run_id} - start");

        if cancellable {
            self.inner.abort.abort();
            self.inner.abort.renew();
        }

        if skip_loading_for.is_zero() {
            self.write(Resource::Loading);
        }

        let load = loader.call(params, LoadContext::new(self.inner.abort.token()));
        let result = if skip_loading_for.is_zero() {
            load.await
        } else {
            let delay = pin!(tokio::time::sleep(skip_loading_for));
            match future::select(load, delay).await {
                Either::Left((result, _)) => result,
                Either::Right(((), load)) => {
                    log::debug!(
                        "run {run_id} - pending after {skip_loading_for:?}, showing loading"
                    );
                    self.write(Resource::Loading);
                    load.await
                }
            }
        };

        match result {
            Ok(value) => {
                log::debug!("run {run_id} - success");
                if self.inner.mounted.is_mounted() {
                    let on_success = self.inner.options.borrow().on_success.clone();
                    if let Some(on_success) = on_success {
                        on_success(&value);
                    }
                    self.write(Resource::Success(value.clone()));
                } else {
                    log::debug!("run {run_id} - settled after teardown, state left untouched");
                }
                Settled::Success(value)
            }
            Err(error) => {
                log::warn!("run {run_id} - load failed");
                if self.inner.mounted.is_mounted() {
                    let on_failure = self.inner.options.borrow().on_failure.clone();
                    if let Some(on_failure) = on_failure {
                        on_failure(&error);
                    }
                    self.write(Resource::Failure(error.clone()));
                } else {
                    log::debug!("run {run_id} - settled after teardown, state left untouched");
                }
                Settled::Failure(error)
            }
        }
    }

    /// Signals the token of the current run, leaving the state as is
    pub fn cancel(&self) {
        log::debug!("cancel");
        self.inner.abort.abort();
    }

    /// Signals the token of the current run and goes back to `Initial`
    pub fn reset(&self) {
        log::debug!("reset");
        self.inner.abort.abort();
        self.write(Resource::Initial);
    }

    /// The automatic-run trigger.
    ///
    /// On the first call, and on every call where the dependencies differ
    /// from the previous ones, returns the run to perform unless the site is
    /// deferred.
    pub fn activate(&self) -> Option<impl Future<Output = Settled<D, E>> + 'static> {
        let (changed, defer, params) = {
            let options = self.inner.options.borrow();
            let mut seen = self.inner.seen_dependencies.borrow_mut();
            let changed = seen.as_ref() != Some(&options.dependencies);
            if changed {
                *seen = Some(options.dependencies.clone());
            }
            (changed, options.defer, options.automatic_params())
        };
        if !changed {
            return None;
        }
        if defer {
            log::debug!("activate - deferred, no automatic run");
            return None;
        }
        Some(self.run(params))
    }

    /// Marks the owner as gone: later settlements no longer touch the state
    pub fn teardown(&self) {
        log::debug!("teardown");
        self.inner.mounted.unmount();
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.is_mounted()
    }

    fn write(&self, resource: Resource<D, E>) {
        if self.inner.mounted.is_mounted() {
            self.inner.writer.borrow_mut().write_state(resource);
        }
    }
}
