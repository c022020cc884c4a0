//! Character Page
//!
//! Onboarding: users without a name create their character here first.

use leptos::prelude::*;
use simulator_core::forms::CharacterForm;
use simulator_core::Route;

use crate::components::CharacterFormView;
use crate::context::AppContext;

#[component]
pub fn CharacterPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <div class="auth-page">
            <div class="auth-card wide">
                <h1>"Создание персонажа"</h1>
                <p class="auth-subtitle">"Заполните форму для создания вашего персонажа"</p>
                <CharacterFormView
                    initial=CharacterForm::default()
                    submit_label="Создать персонажа"
                    on_saved=move || ctx.navigate(Route::Home)
                />
            </div>
        </div>
    }
}
