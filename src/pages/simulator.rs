//! Simulator Page
//!
//! Sidebar with the course outline, the simulator's blocks in order and,
//! once every block is done, the banner leading to the next step.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use simulator_core::models::Simulator;
use simulator_core::sequencing::{resolve_next_step, NextStep};
use simulator_core::{flows, CacheTag, CourseBackend};
use web_sys::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::components::{BlockItem, CompletionBanner, SimulatorSidebar};
use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

/// Delay before scrolling, so freshly rendered blocks have a layout
const SCROLL_DELAY_MS: u32 = 50;

fn scroll_to_block(user_block_id: u64) {
    let Some(element) = document().get_element_by_id(&format!("block-{}", user_block_id)) else {
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::End);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

#[component]
pub fn SimulatorPage(lesson_id: u64, simulator_id: u64) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let simulator = RwSignal::new(None::<Simulator>);
    let menu_open = RwSignal::new(false);
    let advancing = RwSignal::new(false);

    // Load simulator on mount and whenever an answer invalidates it
    Effect::new(move |_| {
        let version = ctx.version(CacheTag::Simulator);
        if !ctx.is_authenticated() {
            return;
        }
        let backend = ctx.backend();
        spawn_local(async move {
            log::debug!("loading simulator {} (version {})", simulator_id, version);
            match backend.simulator(simulator_id).await {
                Ok(loaded) => {
                    let last_block = loaded.blocks().last().map(|b| b.id);
                    let _ = simulator.try_set(Some(loaded));
                    if let Some(id) = last_block.filter(|_| version > 0) {
                        TimeoutFuture::new(SCROLL_DELAY_MS).await;
                        scroll_to_block(id);
                    }
                }
                Err(err) => ctx.report(&err.into()),
            }
        });
    });

    let next_step = Memo::new(move |_| {
        store
            .lessons()
            .with(|lessons| resolve_next_step(lessons.as_deref()?, lesson_id, simulator_id))
    });

    let go_next = move |step: NextStep| {
        if advancing.get_untracked() {
            return;
        }
        advancing.set(true);
        spawn_local(async move {
            let result = flows::advance(&ctx.backend(), step).await;
            let _ = advancing.try_set(false);
            match result {
                Ok(transition) => {
                    ctx.invalidate(transition.invalidates);
                    if let Some(route) = transition.route {
                        ctx.navigate(route);
                    }
                }
                Err(err) => ctx.report(&err),
            }
        });
    };

    let ready = move || {
        store.course().with(Option::is_some)
            && store.lessons().with(Option::is_some)
            && simulator.with(Option::is_some)
    };

    view! {
        <Show when=ready fallback=|| view! { <div class="loading full-screen">"Загрузка..."</div> }>
            <div class="simulator-layout">
                <header class="mobile-header">
                    <button type="button" class="menu-btn" aria-label="Открыть меню" on:click=move |_| menu_open.update(|o| *o = !*o)>
                        "☰"
                    </button>
                    <span class="course-name">{move || store.course().with(|c| c.as_ref().map(|c| c.name.clone()))}</span>
                </header>

                <SimulatorSidebar lesson_id=lesson_id simulator_id=simulator_id open=menu_open />

                <main class="simulator-main">
                    <div class="simulator-content">
                        <h1 class="simulator-title">{move || simulator.with(|s| s.as_ref().map(|s| s.name.clone()))}</h1>
                        <Show
                            when=move || simulator.with(|s| s.as_ref().is_some_and(|s| !s.blocks().is_empty()))
                            fallback=|| view! { <div class="empty-simulator">"Вы еще не начали этот симулятор"</div> }
                        >
                            <div class="block-list">
                                <For
                                    each=move || simulator.with(|s| s.as_ref().map(|s| s.blocks().to_vec()).unwrap_or_default())
                                    key=|block| (block.id, block.is_completed, block.answer.clone())
                                    children=move |user_block| view! { <BlockItem user_block=user_block /> }
                                />
                            </div>
                        </Show>
                        {move || {
                            let completed = simulator.with(|s| s.as_ref().is_some_and(|s| s.is_completed()));
                            let step = next_step.get().filter(|_| completed)?;
                            Some(view! {
                                <CompletionBanner
                                    step=step
                                    pending=advancing
                                    on_next=move || go_next(step)
                                />
                            })
                        }}
                    </div>
                </main>
            </div>
        </Show>
    }
}
