//! Completion Banner Component
//!
//! Shown under a completed simulator with the way forward.

use leptos::prelude::*;
use simulator_core::sequencing::NextStep;

struct BannerText {
    title: &'static str,
    description: &'static str,
    button: Option<&'static str>,
}

fn banner_text(step: &NextStep) -> BannerText {
    match step {
        NextStep::NextSimulator { .. } => BannerText {
            title: "Поздравляю, вы прошли главу!",
            description: "Отличная работа! Переходите к следующей главе.",
            button: Some("Перейти к следующей"),
        },
        NextStep::NextLesson { .. } => BannerText {
            title: "Поздравляю, вы завершили урок!",
            description: "Превосходно! Вы готовы к следующему уроку.",
            button: Some("Перейти к следующему уроку"),
        },
        NextStep::CourseCompleted => BannerText {
            title: "Вы завершили курс!",
            description: "Поздравляем! Вы успешно прошли весь курс. Великолепная работа!",
            button: None,
        },
    }
}

#[component]
pub fn CompletionBanner(
    step: NextStep,
    #[prop(into)] pending: Signal<bool>,
    #[prop(into)] on_next: Callback<()>,
) -> impl IntoView {
    let text = banner_text(&step);

    view! {
        <div class="completion-banner">
            <h2>{text.title}</h2>
            <p>{text.description}</p>
            {text.button.map(|label| view! {
                <button
                    type="button"
                    class="primary-btn"
                    disabled=move || pending.get()
                    on:click=move |_| on_next.run(())
                >
                    {label}
                </button>
            })}
        </div>
    }
}
