//! Character Form Component
//!
//! Name fields, sex chips and the avatar grid. Used for onboarding and for
//! editing the character on the profile page.

use leptos::prelude::*;
use leptos::task::spawn_local;
use simulator_core::flows;
use simulator_core::forms::{avatar_src, avatars, CharacterForm, Sex};
use simulator_core::{Endpoint, Error};

use super::form_field::{field_message, form_message, FormField};
use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn CharacterFormView(
    initial: CharacterForm,
    #[prop(into)] submit_label: String,
    #[prop(into)] on_saved: Callback<()>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let first_name = RwSignal::new(initial.first_name.clone());
    let last_name = RwSignal::new(initial.last_name.clone());
    let form = RwSignal::new(initial);
    let error = RwSignal::new(None::<Error>);
    let pending = RwSignal::new(false);

    let current = move || {
        let mut current = form.get();
        current.first_name = first_name.get();
        current.last_name = last_name.get();
        current
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let form = untrack(current);
        pending.set(true);
        spawn_local(async move {
            let result = flows::create_character(&ctx.backend(), &form).await;
            let _ = pending.try_set(false);
            match result {
                Ok(saved) => {
                    let _ = error.try_set(None);
                    // The guard checks this profile on the next navigation
                    store.profile().update(|profile| {
                        if let Some(profile) = profile {
                            profile.apply_character(&saved);
                        }
                    });
                    ctx.invalidate(Endpoint::CreateCharacter.invalidates());
                    on_saved.run(());
                }
                Err(err) => {
                    ctx.report(&err);
                    let _ = error.try_set(Some(err));
                }
            }
        });
    };

    let field_error = move |field: &'static str| {
        Signal::derive(move || error.with(|e| e.as_ref().and_then(|e| field_message(e, field))))
    };

    view! {
        <form class="character-form" on:submit=submit>
            <FormField
                id="first-name"
                label="Имя"
                input_type="text"
                placeholder="Введите ваше имя"
                value=first_name
                error=field_error("first_name")
            />
            <FormField
                id="last-name"
                label="Фамилия"
                input_type="text"
                placeholder="Введите вашу фамилию"
                value=last_name
                error=field_error("last_name")
            />

            <div class="form-section">
                <span class="form-label">"Ваш пол"</span>
                <div class="chips">
                    {[Sex::Male, Sex::Female]
                        .into_iter()
                        .map(|sex| view! {
                            <button
                                type="button"
                                class=move || if form.with(|f| f.sex == sex) { "chip active" } else { "chip" }
                                on:click=move |_| form.update(|f| f.set_sex(sex))
                            >
                                {sex.label()}
                            </button>
                        })
                        .collect_view()}
                </div>
            </div>

            <div class="form-section">
                <span class="form-label">"Выберите ваш аватар"</span>
                <div class="avatar-grid">
                    {move || {
                        avatars(form.with(|f| f.sex))
                            .iter()
                            .map(|key| {
                                let key = *key;
                                let selected = move || form.with(|f| f.avatar.as_deref() == Some(key));
                                view! {
                                    <button
                                        type="button"
                                        class=move || if selected() { "avatar-choice selected" } else { "avatar-choice" }
                                        on:click=move |_| form.update(|f| f.avatar = Some(key.to_string()))
                                    >
                                        <img src=avatar_src(key) alt=key />
                                    </button>
                                }
                            })
                            .collect_view()
                    }}
                </div>
                {move || {
                    error
                        .with(|e| e.as_ref().and_then(|e| field_message(e, "avatar")))
                        .map(|message| view! { <p class="field-error">{message}</p> })
                }}
            </div>

            {move || error.with(|e| e.as_ref().and_then(form_message)).map(|message| view! {
                <p class="form-error">{message}</p>
            })}

            <button
                type="submit"
                class="primary-btn full-width"
                disabled=move || pending.get() || !current().is_valid()
            >
                {submit_label}
            </button>
        </form>
    }
}
