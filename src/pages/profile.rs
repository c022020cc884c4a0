//! Profile Page
//!
//! Account details, character editing and logout.

use leptos::prelude::*;
use simulator_core::forms::{CharacterForm, Sex};
use simulator_core::models::UserProfile;
use simulator_core::Route;

use crate::components::CharacterFormView;
use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

fn form_from_profile(profile: &UserProfile) -> CharacterForm {
    CharacterForm {
        first_name: profile.first_name.clone().unwrap_or_default(),
        last_name: profile.last_name.clone().unwrap_or_default(),
        sex: match profile.sex.as_deref() {
            Some("female") => Sex::Female,
            _ => Sex::Male,
        },
        avatar: profile.avatar.clone(),
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let saved = RwSignal::new(false);

    view! {
        <div class="profile-page">
            <header class="page-header">
                <a
                    href=Route::Home.path()
                    on:click=move |ev| {
                        ev.prevent_default();
                        ctx.navigate(Route::Home);
                    }
                >
                    "← На главную"
                </a>
                <button type="button" class="logout-btn" on:click=move |_| ctx.sign_out()>
                    "Выйти"
                </button>
            </header>
            {move || match store.profile().get() {
                None => view! { <div class="loading">"Загрузка..."</div> }.into_any(),
                Some(profile) => view! {
                    <div class="profile-card">
                        <h1>"Профиль персонажа"</h1>
                        <p class="caption">{profile.email.clone()}</p>
                        <p class="auth-subtitle">"Вы можете изменить данные вашего персонажа"</p>
                        <CharacterFormView
                            initial=form_from_profile(&profile)
                            submit_label="Сохранить изменения"
                            on_saved=move || saved.set(true)
                        />
                        <Show when=move || saved.get()>
                            <p class="form-success">"Изменения сохранены"</p>
                        </Show>
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}
