//! Home Page
//!
//! Welcome, the course card with overall progress and the lesson grid.

use leptos::prelude::*;
use leptos::task::spawn_local;
use simulator_core::flows;
use simulator_core::models::Lesson;
use simulator_core::Route;

use crate::components::ProgressBar;
use crate::context::AppContext;
use crate::store::{store_find_lesson, use_app_store, AppStateStoreFields};

/// Caption under a lesson card
fn lesson_status(lesson: &Lesson) -> Option<String> {
    match &lesson.user {
        Some(user) if user.completed => Some("Урок пройден".to_string()),
        Some(user) => Some(format!(
            "Пройдено симуляторов {}/{}",
            user.completed_simulators_count,
            lesson.simulators.len()
        )),
        None if !lesson.is_available => Some("Вам недоступен этот урок".to_string()),
        None => None,
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let pending = RwSignal::new(false);

    let open_lesson = move |lesson: Lesson| {
        if pending.get_untracked() {
            return;
        }
        pending.set(true);
        spawn_local(async move {
            let result = flows::enter_lesson(&ctx.backend(), &lesson).await;
            let _ = pending.try_set(false);
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

    // The course card button picks up where the user left off
    let resume_course = move |_| {
        let last = store.course_user().with_untracked(|u| u.as_ref().and_then(|u| u.last_lesson_id));
        let lesson = last
            .and_then(|id| store_find_lesson(&store, id))
            .or_else(|| {
                store.lessons().with_untracked(|lessons| {
                    lessons.as_ref()?.iter().find(|l| l.is_available && !l.is_completed()).cloned()
                })
            });
        match lesson {
            Some(lesson) => open_lesson(lesson),
            None => log::debug!("no lesson to resume"),
        }
    };

    let ready = move || {
        store.course().with(Option::is_some)
            && store.course_user().with(Option::is_some)
            && store.profile().with(Option::is_some)
            && store.lessons().with(Option::is_some)
    };

    view! {
        <Show when=ready fallback=|| view! { <div class="loading">"Загрузка..."</div> }>
            <header class="page-header">
                {move || store.course().get().and_then(|course| course.logo.map(|logo| view! {
                    <img class="course-logo" src=logo alt=course.name.clone() />
                }))}
                <a
                    href=Route::Profile.path()
                    class="profile-link"
                    on:click=move |ev| {
                        ev.prevent_default();
                        ctx.navigate(Route::Profile);
                    }
                >
                    "Профиль"
                </a>
            </header>
            <div class="home-content">
                <h1 class="welcome">
                    {move || {
                        let name = store.profile().with(|p| p.as_ref().and_then(|p| p.first_name.clone()));
                        format!("Добро пожаловать, {}!", name.unwrap_or_default())
                    }}
                </h1>
                {move || store.course().get().map(|course| view! {
                    <div class="course-card">
                        <h2>{course.name}</h2>
                        <p class="caption">{course.description}</p>
                        <div class="course-card-footer">
                            <ProgressBar percent=Signal::derive(move || {
                                store.course_user().with(|u| u.as_ref().map(|u| u.progress_percent()).unwrap_or(0))
                            }) />
                            <button
                                type="button"
                                class="start-btn"
                                aria-label="Продолжить"
                                disabled=move || pending.get()
                                on:click=resume_course
                            >
                                "›"
                            </button>
                        </div>
                    </div>
                })}
                <h5 class="section-title">"Программа обучения"</h5>
                <div class="lesson-grid">
                    <For
                        each=move || store.lessons().get().unwrap_or_default()
                        key=|lesson| (lesson.id, lesson.user.clone().map(|u| (u.completed, u.completed_simulators_count)))
                        children=move |lesson| {
                            let status = lesson_status(&lesson);
                            let available = lesson.is_available;
                            let clicked = lesson.clone();
                            view! {
                                <div class=if available { "lesson-card" } else { "lesson-card locked" }>
                                    {match lesson.image.clone() {
                                        Some(image) => view! {
                                            <img class="lesson-image" src=image alt=lesson.name.clone() />
                                        }
                                        .into_any(),
                                        None => view! { <div class="lesson-image placeholder"></div> }.into_any(),
                                    }}
                                    <h6>{lesson.name.clone()}</h6>
                                    <p class="lesson-description">{lesson.description.clone()}</p>
                                    <div class="lesson-footer">
                                        <p class="caption">{status}</p>
                                        <button
                                            type="button"
                                            class="start-btn small"
                                            aria-label="Открыть урок"
                                            disabled=move || !available || pending.get()
                                            on:click=move |_| open_lesson(clicked.clone())
                                        >
                                            "›"
                                        </button>
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>
            </div>
        </Show>
    }
}
