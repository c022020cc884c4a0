//! Simulator Sidebar Component
//!
//! Course title and progress, then every lesson with its simulators.
//! Lessons expand on click; the current one starts expanded.

use leptos::prelude::*;
use simulator_core::models::Lesson;
use simulator_core::Route;

use super::progress_bar::ProgressBar;
use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn SimulatorSidebar(lesson_id: u64, simulator_id: u64, open: RwSignal<bool>) -> impl IntoView {
    let store = use_app_store();
    let expanded = RwSignal::new(vec![lesson_id]);

    let progress = Signal::derive(move || {
        store.course_user().with(|u| u.as_ref().map(|u| u.progress_percent()).unwrap_or(0))
    });

    view! {
        <Show when=move || open.get()>
            <div class="sidebar-overlay" on:click=move |_| open.set(false)></div>
        </Show>
        <aside class=move || if open.get() { "simulator-sidebar open" } else { "simulator-sidebar" }>
            <button type="button" class="sidebar-close" aria-label="Закрыть меню" on:click=move |_| open.set(false)>
                "×"
            </button>
            {move || store.course().get().map(|course| view! {
                {course.logo.map(|logo| view! { <img class="course-logo" src=logo alt=course.name.clone() /> })}
                <h2 class="course-name">{course.name}</h2>
            })}
            <div class="course-progress">
                <ProgressBar percent=progress />
                <span class="caption">{move || format!("{}% завершено", progress.get())}</span>
            </div>
            <nav class="lesson-nav">
                <For
                    each=move || store.lessons().get().unwrap_or_default()
                    key=|lesson| (lesson.id, lesson.is_completed(), lesson.is_available)
                    children=move |lesson| view! {
                        <LessonLink
                            lesson=lesson
                            current_lesson=lesson_id
                            current_simulator=simulator_id
                            expanded=expanded
                            open=open
                        />
                    }
                />
            </nav>
        </aside>
    }
}

#[component]
fn LessonLink(
    lesson: Lesson,
    current_lesson: u64,
    current_simulator: u64,
    expanded: RwSignal<Vec<u64>>,
    open: RwSignal<bool>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let id = lesson.id;
    let is_expanded = move || expanded.with(|ids| ids.contains(&id));
    let toggle = move |_| {
        expanded.update(|ids| match ids.iter().position(|l| *l == id) {
            Some(index) => {
                ids.remove(index);
            }
            None => ids.push(id),
        })
    };

    let mut marker = String::from("lesson-marker");
    if lesson.is_completed() {
        marker.push_str(" completed");
    } else if id == current_lesson {
        marker.push_str(" active");
    }
    if !lesson.is_available {
        marker.push_str(" locked");
    }
    let title_class = match (id == current_lesson, lesson.is_available) {
        (_, false) => "lesson-title locked",
        (true, true) => "lesson-title active",
        (false, true) => "lesson-title",
    };
    let simulators = lesson.simulators.clone();

    view! {
        <div class="lesson-link">
            <div class="lesson-header" on:click=toggle>
                <span class=marker>
                    {if lesson.is_completed() { "✓" } else if !lesson.is_available { "🔒" } else { "" }}
                </span>
                <span class=title_class>{lesson.name.clone()}</span>
                <span class=move || if is_expanded() { "chevron expanded" } else { "chevron" }>"›"</span>
            </div>
            <Show when=is_expanded>
                <div class="simulator-links">
                    {simulators
                        .iter()
                        .map(|simulator| {
                            let simulator_id = simulator.id;
                            let active = id == current_lesson && simulator_id == current_simulator;
                            view! {
                                <a
                                    href=Route::simulator(id, simulator_id).path()
                                    class=if active { "simulator-link active" } else { "simulator-link" }
                                    on:click=move |ev| {
                                        ev.prevent_default();
                                        open.set(false);
                                        ctx.navigate(Route::simulator(id, simulator_id));
                                    }
                                >
                                    {simulator.name.clone()}
                                </a>
                            }
                        })
                        .collect_view()}
                </div>
            </Show>
        </div>
    }
}
