#![windows_subsystem = "windows"]
use std::{cell::Cell, rc::Rc};

use dioxus::prelude::*;

use async_resource::{
    prelude::{Resource, *},
    utils::{async_sleep, log_error_ccstr},
};

static TITLE: &str = "Fortune teller";

static FORTUNES: [&str; 4] = [
    "A journey of a thousand miles begins with a cancelled request.",
    "You will soon be rendered twice.",
    "Patience: the spinner only shows after 150 ms.",
    "Good things come to those who await.",
];

/// Simulated remote call: slow, and every third call fails
async fn fetch_fortune(call: u32, ctx: LoadContext) -> Result<CCStr, CCStr> {
    log::debug!("fetch_fortune - call={call}");
    ctx.abortable(async_sleep(800))
        .await
        .map_err(log_error_ccstr)?;
    if call % 3 == 0 {
        return Err(CCStr::from("the fortune teller is out for lunch"));
    }
    Ok(CCStr::from(FORTUNES[call as usize % FORTUNES.len()]))
}

#[allow(non_snake_case)]
fn App() -> Element {
    log::debug!("App reload");

    let calls = use_hook(|| Rc::new(Cell::new(0u32)));
    let fortune = use_async_resource(
        move |_: Option<()>, ctx| {
            calls.set(calls.get() + 1);
            fetch_fortune(calls.get(), ctx)
        },
        ResourceOptions::default()
            .with_defer(true)
            .with_on_success(|text: &CCStr| log::info!("new fortune: {text}"))
            .with_on_failure(|error: &CCStr| log::warn!("no fortune: {error}")),
    );

    let resource: Resource<CCStr, CCStr> = fortune.resource();
    let state = get_state_components(resource.clone());

    rsx! {
        document::Title { "{TITLE}" }

        div { id: "app",
            h1 { "{TITLE}" }
            {state.matching(
                States::new(Tag::Initial, [Tag::Loading]),
                Slot::children(rsx! {
                    button {
                        disabled: resource.is_loading(),
                        onclick: {
                            let fortune = fortune.clone();
                            move |_| {
                                fortune.start(None);
                            }
                        },
                        "Tell me my fortune!"
                    }
                    {state.loading(Slot::children(rsx! {
                        p { "Loading..." }
                        button {
                            onclick: {
                                let fortune = fortune.clone();
                                move |_| fortune.cancel()
                            },
                            "Never mind"
                        }
                    }))}
                }),
            )}
            Failure::<CCStr, CCStr> {
                of: resource.clone(),
                render: ViewFn::new({
                    let fortune = fortune.clone();
                    move |error: CCStr| {
                        let fortune = fortune.clone();
                        rsx! {
                            p { "Oops! {error}" }
                            button { onclick: move |_| fortune.reset(), "Start over" }
                        }
                    }
                }),
            }
            {state.success(Slot::render({
                let fortune = fortune.clone();
                move |text: CCStr| {
                    let fortune = fortune.clone();
                    rsx! {
                        div {
                            h2 { "Nice" }
                            blockquote { "{text}" }
                            button {
                                onclick: move |_| {
                                    fortune.start(None);
                                },
                                "Tell me more!"
                            }
                        }
                    }
                }
            }))}
        }
    }
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,async_resource=debug"),
    )
    .format_timestamp_micros()
    .init();

    log::info!("starting app");
    launch();
}

#[cfg(feature = "desktop")]
fn launch() {
    use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
    LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_menu(None).with_window(
                WindowBuilder::new()
                    .with_title(TITLE)
                    .with_inner_size(LogicalSize::new(640, 480))
                    .with_resizable(true),
            ),
        )
        .launch(App)
}

#[cfg(not(feature = "desktop"))]
fn launch() {
    dioxus::launch(App)
}
