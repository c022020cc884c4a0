//! Answer Field Component
//!
//! Renders the control a block asks for and sends the answer once. A failed
//! request leaves the controls enabled with a retry hint.

use leptos::prelude::*;
use leptos::task::spawn_local;
use simulator_core::answer::{sends_on_key, AnswerControl, AnswerPayload, AnswerReview, AnswerSelection, FreeTextDraft};
use simulator_core::flows;
use simulator_core::submission::SubmissionState;
use simulator_core::ValidationError;

use super::answer_option::AnswerOption;
use crate::context::AppContext;

const LOADING_LABEL: &str = "Загрузка...";

#[component]
pub fn AnswerField(
    user_block_id: u64,
    control: AnswerControl,
    /// Rendered inside a task frame
    framed: bool,
    #[prop(optional)] review: Option<AnswerReview>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let state = RwSignal::new(SubmissionState::default());
    let selection = RwSignal::new(AnswerSelection::new());
    let draft = RwSignal::new(FreeTextDraft::default());

    let reviewing = review.is_some();
    let locked = Signal::derive(move || reviewing || !state.with(|s| s.accepts_input()));
    let pending = move || state.with(|s| s.is_pending());

    let submit = move |payload: Result<AnswerPayload, ValidationError>| {
        let request = match state.try_update(|s| flows::prepare_submission(s, payload)) {
            Some(Ok(request)) => request,
            Some(Err(err)) => {
                log::debug!("answer for block {} not sent: {}", user_block_id, err);
                return;
            }
            None => return,
        };
        spawn_local(async move {
            let result = flows::send_answer(&ctx.backend(), &request).await;
            let _ = state.try_update(|s| s.settle(&result));
            match result {
                Ok(tags) => {
                    let _ = draft.try_update(|d| d.set(""));
                    ctx.invalidate(tags);
                }
                Err(err) => ctx.report(&err),
            }
        });
    };

    let body = match control {
        AnswerControl::Button { label } => {
            let answer = label.clone();
            view! {
                <button
                    type="button"
                    class="primary-btn"
                    disabled=move || locked.get()
                    on:click=move |_| submit(Ok(AnswerPayload::single(user_block_id, answer.clone())))
                >
                    {move || if pending() { LOADING_LABEL.to_string() } else { label.clone() }}
                </button>
            }
            .into_any()
        }
        AnswerControl::SingleChoice { options } => view! {
            <div class="answer-options">
                {options
                    .into_iter()
                    .enumerate()
                    .map(|(index, option)| {
                        let status = review.as_ref().and_then(|r| r.status(&option, index));
                        let answer = option.clone();
                        view! {
                            <AnswerOption
                                label=option
                                status=status
                                selected=Signal::stored(false)
                                disabled=locked
                                on_click=move || submit(Ok(AnswerPayload::single(user_block_id, answer.clone())))
                            />
                        }
                    })
                    .collect_view()}
            </div>
        }
        .into_any(),
        AnswerControl::MultipleChoice { options } => view! {
            <div class="answer-options multiple">
                {options
                    .into_iter()
                    .enumerate()
                    .map(|(index, option)| {
                        let status = review.as_ref().and_then(|r| r.status(&option, index));
                        let key = option.clone();
                        let toggled = option.clone();
                        view! {
                            <AnswerOption
                                label=option
                                status=status
                                selected=Signal::derive(move || selection.with(|s| s.contains(&key)))
                                disabled=locked
                                on_click=move || selection.update(|s| s.toggle(&toggled))
                            />
                        }
                    })
                    .collect_view()}
            </div>
            <Show when=move || !reviewing && !selection.with(|s| s.is_empty())>
                <button
                    type="button"
                    class="primary-btn submit-answers"
                    disabled=move || locked.get()
                    on:click=move |_| submit(selection.with_untracked(|s| s.to_payload(user_block_id)))
                >
                    {move || if pending() { LOADING_LABEL } else { "Отправить ответы" }}
                </button>
            </Show>
        }
        .into_any(),
        AnswerControl::FreeText => view! {
            <div class="text-answer">
                <textarea
                    rows="1"
                    placeholder="Введите ваш ответ..."
                    disabled=move || locked.get()
                    prop:value=move || draft.with(|d| d.text().to_string())
                    on:input=move |ev| draft.update(|d| d.set(event_target_value(&ev)))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if sends_on_key(&ev.key(), ev.shift_key()) {
                            ev.prevent_default();
                            submit(draft.with_untracked(|d| d.to_payload(user_block_id)));
                        }
                    }
                ></textarea>
                <button
                    type="button"
                    class="send-btn"
                    aria-label="Отправить"
                    disabled=move || locked.get() || draft.with(|d| d.submission().is_none())
                    on:click=move |_| submit(draft.with_untracked(|d| d.to_payload(user_block_id)))
                >
                    "➤"
                </button>
            </div>
        }
        .into_any(),
        AnswerControl::None => ().into_any(),
    };

    view! {
        <div class=if framed { "answer-field framed" } else { "answer-field" }>
            {body}
            {move || {
                state.with(|s| s.error().map(|message| view! {
                    <p class="answer-error">
                        {format!("Не удалось отправить ответ: {}. Попробуйте ещё раз.", message)}
                    </p>
                }))
            }}
        </div>
    }
}
