//! Answer Option Component
//!
//! One choice button. In review mode it is read-only and colored by result.

use leptos::prelude::*;
use simulator_core::answer::AnswerStatus;

#[component]
pub fn AnswerOption(
    #[prop(into)] label: String,
    /// Result coloring; `Some` puts the option in review mode
    status: Option<AnswerStatus>,
    #[prop(into)] selected: Signal<bool>,
    #[prop(into)] disabled: Signal<bool>,
    #[prop(into)] on_click: Callback<()>,
) -> impl IntoView {
    let reviewing = status.is_some();
    let class = move || match status {
        Some(status) => format!("answer-option result {}", status.css_class()),
        None if selected.get() => "answer-option selected".to_string(),
        None => "answer-option".to_string(),
    };

    view! {
        <button
            type="button"
            class=class
            disabled=move || reviewing || disabled.get()
            on:click=move |_| on_click.run(())
        >
            {label}
        </button>
    }
}
