//! Register Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use simulator_core::forms::RegisterForm;
use simulator_core::{flows, Error, Route};

use crate::components::{field_message, form_message, FormField};
use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let password_confirmation = RwSignal::new(String::new());
    let error = RwSignal::new(None::<Error>);
    let pending = RwSignal::new(false);

    let form = move || RegisterForm {
        username: username.get(),
        password: password.get(),
        password_confirmation: password_confirmation.get(),
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let form = untrack(form);
        pending.set(true);
        spawn_local(async move {
            let result = flows::sign_up(&ctx.backend(), &form).await;
            let _ = pending.try_set(false);
            match result {
                Ok(token) => {
                    ctx.sign_in(&token);
                    ctx.navigate(Route::Home);
                }
                Err(err) => {
                    log::info!("registration failed: {}", err);
                    let _ = error.try_set(Some(err));
                }
            }
        });
    };

    // Mismatch is shown as soon as both fields are filled
    let confirmation_error = Signal::derive(move || {
        let local = form();
        if !local.password_confirmation.is_empty() && local.password != local.password_confirmation {
            return Some("Пароли не совпадают".to_string());
        }
        error.with(|e| e.as_ref().and_then(|e| field_message(e, "password_confirmation")))
    });
    let field_error = move |field: &'static str| {
        Signal::derive(move || error.with(|e| e.as_ref().and_then(|e| field_message(e, field))))
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Создание аккаунта"</h1>
                {move || store.course().get().map(|course| view! {
                    <p class="auth-subtitle">"Добро пожаловать на курс " <b>{course.name}</b></p>
                })}
                <form class="auth-form" on:submit=submit>
                    <FormField
                        id="email"
                        label="Email"
                        input_type="email"
                        placeholder="Ваш email"
                        value=username
                        error=field_error("username")
                    />
                    <FormField
                        id="password"
                        label="Пароль"
                        input_type="password"
                        placeholder="••••••••"
                        value=password
                        error=field_error("password")
                    />
                    <FormField
                        id="re-password"
                        label="Повторите пароль"
                        input_type="password"
                        placeholder="••••••••"
                        value=password_confirmation
                        error=confirmation_error
                    />
                    {move || error.with(|e| e.as_ref().and_then(form_message)).map(|message| view! {
                        <p class="form-error">{message}</p>
                    })}
                    <button
                        type="submit"
                        class="primary-btn full-width"
                        disabled=move || pending.get() || form().validate().is_err()
                    >
                        "Создать аккаунт"
                    </button>
                </form>
                <p class="auth-switch">
                    "Уже есть аккаунт? "
                    <a
                        href=Route::Login { from: None }.path()
                        on:click=move |ev| {
                            ev.prevent_default();
                            ctx.navigate(Route::Login { from: None });
                        }
                    >
                        "Войти"
                    </a>
                </p>
            </div>
        </div>
    }
}
