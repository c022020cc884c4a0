//! Simulator Frontend App
//!
//! Loads shared data, applies the access guard and switches pages by route.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use simulator_core::{guard, CacheTag, CourseBackend, Route};

use crate::config::Config;
use crate::context::AppContext;
use crate::pages::{CharacterPage, HomePage, LoginPage, ProfilePage, RegisterPage, SimulatorPage};
use crate::router;
use crate::store::{store_clear_user_data, AppState, AppStateStoreFields};

#[component]
pub fn App(config: Config) -> impl IntoView {
    let ctx = AppContext::new(config, Route::parse(&router::current_location()));
    let store = Store::new(AppState::default());

    // Provide context to all children
    provide_context(ctx);
    provide_context(store);
    router::listen(ctx.route);

    // Course is public: login and register show its name
    Effect::new(move |_| {
        let _ = ctx.version(CacheTag::Course);
        let backend = ctx.backend();
        spawn_local(async move {
            match backend.course().await {
                Ok(course) => store.course().set(Some(course)),
                Err(err) => ctx.report(&err.into()),
            }
        });
    });

    // User profile, drives the onboarding guard
    Effect::new(move |_| {
        let _ = ctx.version(CacheTag::User);
        if !ctx.is_authenticated() {
            store_clear_user_data(&store);
            return;
        }
        let backend = ctx.backend();
        spawn_local(async move {
            match backend.user_info().await {
                Ok(profile) => store.profile().set(Some(profile)),
                Err(err) => ctx.report(&err.into()),
            }
        });
    });

    Effect::new(move |_| {
        let _ = ctx.version(CacheTag::CourseUser);
        if !ctx.is_authenticated() {
            return;
        }
        let backend = ctx.backend();
        spawn_local(async move {
            match backend.course_user().await {
                Ok(course_user) => store.course_user().set(Some(course_user)),
                Err(err) => ctx.report(&err.into()),
            }
        });
    });

    Effect::new(move |_| {
        let _ = ctx.version(CacheTag::Lessons);
        if !ctx.is_authenticated() {
            return;
        }
        let backend = ctx.backend();
        spawn_local(async move {
            match backend.lessons().await {
                Ok(lessons) => {
                    log::debug!("loaded {} lessons", lessons.len());
                    store.lessons().set(Some(lessons));
                }
                Err(err) => ctx.report(&err.into()),
            }
        });
    });

    // Access guard: re-evaluated on route, session and profile changes
    Effect::new(move |_| {
        let route = ctx.route.get();
        let has_token = ctx.is_authenticated();
        let decision = store.profile().with(|profile| guard::evaluate_route(&route, has_token, profile.as_ref()));
        if let Some(target) = decision.redirect() {
            log::info!("redirecting {} to {}", route.path(), target.path());
            ctx.redirect(target);
        }
    });

    view! {
        <div class="app-layout">
            {move || match ctx.route.get() {
                Route::Home => view! { <HomePage /> }.into_any(),
                Route::Login { from } => view! { <LoginPage from=from /> }.into_any(),
                Route::Register => view! { <RegisterPage /> }.into_any(),
                Route::Character => view! { <CharacterPage /> }.into_any(),
                Route::Profile => view! { <ProfilePage /> }.into_any(),
                Route::Simulator { lesson_id, simulator_id } => {
                    view! { <SimulatorPage lesson_id=lesson_id simulator_id=simulator_id /> }.into_any()
                }
                Route::NotFound(path) => view! {
                    <div class="not-found">
                        <h1>"404"</h1>
                        <p>{format!("Страница {} не найдена", path)}</p>
                        <a
                            href=Route::Home.path()
                            on:click=move |ev| {
                                ev.prevent_default();
                                ctx.navigate(Route::Home);
                            }
                        >
                            "На главную"
                        </a>
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}
