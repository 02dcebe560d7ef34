use dioxus::prelude::*;

use std::future::Future;

use crate::resource::{Resource, Settled};

use super::{
    abort::LoadContext,
    controller::{Loader, ResourceController, StateWriter},
    options::ResourceOptions,
};

impl<T: 'static> StateWriter<T> for Signal<T> {
    fn write_state(&mut self, value: T) {
        self.set(value);
    }
}

type SignalController<P, D, E> = ResourceController<P, D, E, Signal<Resource<D, E>>>;

/// Drives an asynchronous load through a [`Resource`] signal.
///
/// Unlike the Dioxus `use_resource`, the future does not re-run reactively:
/// it runs on mount and whenever the dependencies of `options` change (unless
/// `defer` is set), and on every explicit [`UseAsyncResource::run`].
///
/// The load function and options given on each render replace the previous
/// ones, so callbacks always see the latest captured values.
///
/// # Examples
///
/// ```rust,ignore
/// #[component]
/// fn Fortune(id: u32) -> Element {
///     let fortune = use_async_resource(
///         |id: Option<u32>, _ctx| async move { fetch_fortune(id.unwrap_or_default()).await },
///         ResourceOptions::default()
///             .with_params(id)
///             .with_dependencies(dependencies![id]),
///     );
///     let state = get_state_components(fortune.resource());
///     rsx! {
///         {state.loading(Slot::children(rsx! { "Loading..." }))}
///         {state.success(Slot::render(|text: CCStr| rsx! { p { "{text}" } }))}
///     }
/// }
/// ```
pub fn use_async_resource<P, D, E, F, Fut>(
    load: F,
    options: ResourceOptions<P, D, E>,
) -> UseAsyncResource<P, D, E>
where
    P: Clone + 'static,
    D: Clone + 'static,
    E: Clone + 'static,
    F: Fn(Option<P>, LoadContext) -> Fut + 'static,
    Fut: Future<Output = Result<D, E>> + 'static,
{
    let resource = use_signal(|| Resource::Initial);
    let loader = Loader::new(load);
    let controller = use_hook(|| {
        log::debug!("use_async_resource - start");
        ResourceController::new(loader.clone(), ResourceOptions::default(), resource)
    });
    use_drop({
        let controller = controller.clone();
        move || controller.teardown()
    });

    controller.configure(loader, options);
    if let Some(run) = controller.activate() {
        spawn(async move {
            run.await;
        });
    }

    UseAsyncResource {
        resource,
        controller,
    }
}

/// Handle returned by [`use_async_resource`]
pub struct UseAsyncResource<P: 'static, D: 'static, E: 'static> {
    resource: Signal<Resource<D, E>>,
    controller: SignalController<P, D, E>,
}
impl<P: 'static, D: 'static, E: 'static> Clone for UseAsyncResource<P, D, E> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource,
            controller: self.controller.clone(),
        }
    }
}
impl<P: 'static, D: 'static, E: 'static> PartialEq for UseAsyncResource<P, D, E> {
    fn eq(&self, other: &Self) -> bool {
        self.resource == other.resource
    }
}

impl<P, D, E> UseAsyncResource<P, D, E>
where
    P: Clone + 'static,
    D: Clone + 'static,
    E: Clone + 'static,
{
    /// Current state; reading it subscribes the calling scope
    pub fn resource(&self) -> Resource<D, E> {
        self.resource.read().clone()
    }

    pub fn signal(&self) -> ReadOnlySignal<Resource<D, E>> {
        self.resource.into()
    }

    /// Starts a load and resolves to its outcome
    pub fn run(&self, params: Option<P>) -> impl Future<Output = Settled<D, E>> + 'static {
        self.controller.run(params)
    }

    /// Starts a load in the background, as a task of the current scope
    pub fn start(&self, params: Option<P>) -> Task {
        let run = self.controller.run(params);
        spawn(async move {
            run.await;
        })
    }

    pub fn cancel(&self) {
        self.controller.cancel()
    }

    pub fn reset(&self) {
        self.controller.reset()
    }
}

impl<P: 'static, D: 'static, E: 'static> From<UseAsyncResource<P, D, E>>
    for ReadOnlySignal<Resource<D, E>>
{
    fn from(val: UseAsyncResource<P, D, E>) -> Self {
        val.resource.into()
    }
}

/// A load function bound once, reusable as a hook in many components.
///
/// # Examples
///
/// ```rust,ignore
/// let fortunes = create_resource(|id: Option<u32>, _ctx| fetch_fortune(id));
/// // in a component
/// let fortune = fortunes.use_resource(ResourceOptions::default().with_params(3));
/// ```
pub struct ResourceLoader<P, D, E>(Loader<P, D, E>);
impl<P, D, E> Clone for ResourceLoader<P, D, E> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

pub fn create_resource<P, D, E, F, Fut>(load: F) -> ResourceLoader<P, D, E>
where
    F: Fn(Option<P>, LoadContext) -> Fut + 'static,
    Fut: Future<Output = Result<D, E>> + 'static,
{
    ResourceLoader(Loader::new(load))
}

impl<P, D, E> ResourceLoader<P, D, E>
where
    P: Clone + 'static,
    D: Clone + 'static,
    E: Clone + 'static,
{
    /// Runs [`use_async_resource`] with the bound load function
    pub fn use_resource(&self, options: ResourceOptions<P, D, E>) -> UseAsyncResource<P, D, E> {
        let loader = self.0.clone();
        use_async_resource(move |params, ctx| loader.call(params, ctx), options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{
        cell::{Cell, RefCell},
        time::Duration,
    };

    use tokio::time::{timeout_at, Instant};

    use crate::{
        components::{get_state_components, Slot},
        dependencies,
        utils::{async_sleep, CCStr},
    };

    type Outcome = Settled<u32, CCStr>;

    thread_local! {
        static LOAD_CALLS: RefCell<Vec<Option<u32>>> = const { RefCell::new(Vec::new()) };
        static SUCCESSES: Cell<u32> = const { Cell::new(0) };
        static LATE_OUTCOMES: RefCell<Vec<Outcome>> = const { RefCell::new(Vec::new()) };
    }

    fn load_calls() -> Vec<Option<u32>> {
        LOAD_CALLS.with(|calls| calls.borrow().clone())
    }

    fn answer(params: Option<u32>, _ctx: LoadContext) -> impl Future<Output = Result<u32, CCStr>> {
        LOAD_CALLS.with(|calls| calls.borrow_mut().push(params));
        async move { Ok(params.unwrap_or(42)) }
    }

    fn slow_answer(
        params: Option<u32>,
        _ctx: LoadContext,
    ) -> impl Future<Output = Result<u32, CCStr>> {
        LOAD_CALLS.with(|calls| calls.borrow_mut().push(params));
        async move {
            async_sleep(100).await;
            Ok(params.unwrap_or(1))
        }
    }

    fn count_success(_: &u32) {
        SUCCESSES.with(|successes| successes.set(successes.get() + 1));
    }

    fn view(resource: Resource<u32, CCStr>) -> Element {
        let state = get_state_components(resource);
        rsx! {
            {state.initial(Slot::children(rsx! { "initial" }))}
            {state.loading(Slot::children(rsx! { "loading" }))}
            {state.success(Slot::render(|value: u32| rsx! { "success {value}" }))}
        }
    }

    fn deferred_app() -> Element {
        let answer = use_async_resource(answer, ResourceOptions::default().with_defer(true));
        view(answer.resource())
    }

    fn eager_app() -> Element {
        let answer = use_async_resource(answer, ResourceOptions::default().with_params(7));
        view(answer.resource())
    }

    fn bound_app() -> Element {
        let answers = use_hook(|| create_resource(answer));
        let answer = answers.use_resource(ResourceOptions::default());
        view(answer.resource())
    }

    #[component]
    fn Answer(id: u32) -> Element {
        let answer = use_async_resource(
            answer,
            ResourceOptions::default()
                .with_params(id)
                .with_dependencies(dependencies![id]),
        );
        view(answer.resource())
    }

    fn changing_id_app() -> Element {
        let mut id = use_signal(|| 1u32);
        use_hook(move || {
            spawn(async move {
                async_sleep(10).await;
                id.set(5);
            })
        });
        rsx! {
            Answer { id: id() }
        }
    }

    /// Loads on mount, then starts a second run from a task that outlives it
    #[component]
    fn Outlived() -> Element {
        let answer = use_async_resource(
            slow_answer,
            ResourceOptions::default().with_on_success(count_success),
        );
        let late_run = answer.clone();
        use_hook(move || {
            spawn_forever(async move {
                async_sleep(150).await;
                let settled = late_run.run(Some(2)).await;
                LATE_OUTCOMES.with(|outcomes| outcomes.borrow_mut().push(settled));
            })
        });
        view(answer.resource())
    }

    fn unmounting_app() -> Element {
        let mut shown = use_signal(|| true);
        use_hook(move || {
            spawn(async move {
                async_sleep(200).await;
                shown.set(false);
            })
        });
        rsx! {
            if shown() {
                Outlived {}
            }
        }
    }

    /// Runs the tasks of `dom` and re-renders for `span` of virtual time
    async fn drive(dom: &mut VirtualDom, span: Duration) {
        let deadline = Instant::now() + span;
        while timeout_at(deadline, dom.wait_for_work()).await.is_ok() {
            dom.render_immediate_to_vec();
        }
    }

    /// Polls the tasks of `dom` and re-renders until nothing happens for a while
    async fn settle(dom: &mut VirtualDom) {
        for _ in 0..10 {
            if tokio::time::timeout(Duration::from_millis(50), dom.wait_for_work())
                .await
                .is_err()
            {
                break;
            }
            dom.render_immediate_to_vec();
        }
    }

    #[tokio::test]
    async fn deferred_resource_stays_initial() {
        let mut dom = VirtualDom::new(deferred_app);
        dom.rebuild_in_place();
        settle(&mut dom).await;

        assert!(dioxus_ssr::render(&dom).contains("initial"));
        assert!(load_calls().is_empty());
    }

    #[tokio::test]
    async fn mounted_resource_loads_with_its_params() {
        let mut dom = VirtualDom::new(eager_app);
        dom.rebuild_in_place();
        settle(&mut dom).await;

        let html = dioxus_ssr::render(&dom);
        assert!(html.contains("success 7"), "{html}");
        assert!(!html.contains("initial"), "{html}");
        assert_eq!(load_calls(), vec![Some(7)]);
    }

    #[tokio::test]
    async fn created_resource_runs_the_bound_load() {
        let mut dom = VirtualDom::new(bound_app);
        dom.rebuild_in_place();
        settle(&mut dom).await;

        assert!(dioxus_ssr::render(&dom).contains("success 42"));
        assert_eq!(load_calls(), vec![None]);
    }

    #[tokio::test(start_paused = true)]
    async fn changed_dependencies_rerun_with_new_params() {
        let mut dom = VirtualDom::new(changing_id_app);
        dom.rebuild_in_place();
        drive(&mut dom, Duration::from_secs(1)).await;

        let html = dioxus_ssr::render(&dom);
        assert!(html.contains("success 5"), "{html}");
        assert_eq!(load_calls(), vec![Some(1), Some(5)]);
    }

    #[tokio::test(start_paused = true)]
    async fn unmounted_component_ignores_late_settlements() {
        let mut dom = VirtualDom::new(unmounting_app);
        dom.rebuild_in_place();
        drive(&mut dom, Duration::from_secs(1)).await;

        assert_eq!(load_calls(), vec![None, Some(2)]);
        assert_eq!(SUCCESSES.with(Cell::get), 1);
        assert_eq!(
            LATE_OUTCOMES.with(|outcomes| outcomes.borrow().clone()),
            vec![Settled::Success(2)]
        );
        assert!(!dioxus_ssr::render(&dom).contains("success"));
    }
}
