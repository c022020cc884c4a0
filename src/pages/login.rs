//! Login Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use simulator_core::forms::LoginForm;
use simulator_core::{flows, Error, Route};

use crate::components::{field_message, form_message, FormField};
use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn LoginPage(from: Option<String>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<Error>);
    let pending = RwSignal::new(false);

    let after_login = from.map(|path| Route::parse(&path)).unwrap_or(Route::Home);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let form = LoginForm { username: username.get_untracked(), password: password.get_untracked() };
        let target = after_login.clone();
        pending.set(true);
        spawn_local(async move {
            let result = flows::sign_in(&ctx.backend(), &form).await;
            let _ = pending.try_set(false);
            match result {
                Ok(token) => {
                    ctx.sign_in(&token);
                    ctx.navigate(target);
                }
                Err(err) => {
                    log::info!("login failed: {}", err);
                    let _ = error.try_set(Some(err));
                }
            }
        });
    };

    let field_error = move |field: &'static str| {
        Signal::derive(move || error.with(|e| e.as_ref().and_then(|e| field_message(e, field))))
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Вход в аккаунт"</h1>
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
                    {move || error.with(|e| e.as_ref().and_then(form_message)).map(|message| view! {
                        <p class="form-error">{message}</p>
                    })}
                    <button
                        type="submit"
                        class="primary-btn full-width"
                        disabled=move || pending.get() || username.with(String::is_empty) || password.with(String::is_empty)
                    >
                        {move || if pending.get() { "Загрузка..." } else { "Войти" }}
                    </button>
                </form>
                <p class="auth-switch">
                    "Нет аккаунта? "
                    <a
                        href=Route::Register.path()
                        on:click=move |ev| {
                            ev.prevent_default();
                            ctx.navigate(Route::Register);
                        }
                    >
                        "Зарегистрироваться"
                    </a>
                </p>
            </div>
        </div>
    }
}
