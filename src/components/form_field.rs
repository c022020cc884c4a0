//! Form Field Component
//!
//! Labeled input with an inline error line, plus the messages shown for
//! validation and server errors.

use leptos::prelude::*;
use simulator_core::{ApiError, Error, ValidationError};

/// Labeled text input bound to `value`
#[component]
pub fn FormField(
    #[prop(into)] id: String,
    #[prop(into)] label: String,
    #[prop(into)] input_type: String,
    #[prop(into, optional)] placeholder: String,
    value: RwSignal<String>,
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class=move || if error.get().is_some() { "form-field has-error" } else { "form-field" }>
            <label for=id.clone()>{label}</label>
            <input
                id=id
                type=input_type
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            {move || error.get().map(|message| view! { <p class="field-error">{message}</p> })}
        </div>
    }
}

pub fn validation_message(err: &ValidationError) -> String {
    match err {
        ValidationError::MissingField(_) => "Заполните это поле".to_string(),
        ValidationError::PasswordMismatch => "Пароли не совпадают".to_string(),
        ValidationError::EmptyAnswer => "Введите ответ".to_string(),
        ValidationError::AlreadySubmitted => "Ответ уже отправлен".to_string(),
    }
}

/// Message for a form input, if `err` concerns it
pub fn field_message(err: &Error, field: &str) -> Option<String> {
    match err {
        Error::Validation(err @ ValidationError::MissingField(name)) if *name == field => Some(validation_message(err)),
        Error::Validation(err @ ValidationError::PasswordMismatch) if field == "password_confirmation" => {
            Some(validation_message(err))
        }
        Error::Api(ApiError::Fields(fields)) => fields.get(field).map(str::to_string),
        _ => None,
    }
}

/// Message for the form as a whole (errors not tied to one input)
pub fn form_message(err: &Error) -> Option<String> {
    match err {
        Error::Validation(_) => None,
        Error::Api(ApiError::Fields(fields)) => fields.general.clone(),
        Error::Api(ApiError::Unauthorized(_)) => Some("Неверный email или пароль".to_string()),
        Error::Api(ApiError::Network(_)) => Some("Нет соединения с сервером".to_string()),
        Error::Api(other) => Some(other.to_string()),
    }
}
