use leptos::prelude::*;

/// Horizontal bar filled to `percent` (0-100)
#[component]
pub fn ProgressBar(#[prop(into)] percent: Signal<u32>) -> impl IntoView {
    view! {
        <div class="progress">
            <div class="progress-fill" style:width=move || format!("{}%", percent.get().min(100))></div>
        </div>
    }
}
