//! Block Item Component
//!
//! One simulator block: speaker bubble, task frame, answer section and the
//! user's own reply.

use leptos::prelude::*;
use simulator_core::block::{AnswerSection, BlockLayout, Speaker};
use simulator_core::forms::avatar_src;
use simulator_core::models::UserBlock;
use simulator_core::rich_text::TrustedHtml;

use super::answer_field::AnswerField;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn BlockItem(user_block: UserBlock) -> impl IntoView {
    let layout = BlockLayout::of(&user_block);
    let user_block_id = user_block.id;
    let text = TrustedHtml::sanitize(&user_block.block.text).into_inner();

    let message = match layout.speaker {
        Speaker::Character(character) => {
            let src = avatar_src(&character.image);
            view! {
                <div class="message character-message">
                    <img class="avatar" src=src alt=character.name.clone() />
                    <div class="bubble">
                        <div class="bubble-header">
                            <span class="speaker-name">{format!("{},", character.name)}</span>
                            <span class="speaker-role">{character.role}</span>
                        </div>
                        <div class="bubble-text" inner_html=text></div>
                    </div>
                </div>
            }
            .into_any()
        }
        Speaker::Narrator => view! { <div class="message text-message" inner_html=text></div> }.into_any(),
    };

    let (framed_answer, trailing_answer) = match layout.answer {
        AnswerSection::Input { control, framed: true } => {
            (Some(view! { <AnswerField user_block_id=user_block_id control=control framed=true /> }.into_any()), None)
        }
        AnswerSection::Input { control, framed: false } => {
            (None, Some(view! { <AnswerField user_block_id=user_block_id control=control framed=false /> }.into_any()))
        }
        AnswerSection::Review { control, review: Some(review) } => {
            (Some(view! { <AnswerField user_block_id=user_block_id control=control framed=true review=review /> }.into_any()), None)
        }
        AnswerSection::Review { control, review: None } => {
            (Some(view! { <AnswerField user_block_id=user_block_id control=control framed=true /> }.into_any()), None)
        }
        AnswerSection::Hidden => (None, None),
    };

    let after = layout.text_after_answer.map(|after| {
        view! { <div class="text-after-answer" inner_html=TrustedHtml::sanitize(&after).into_inner()></div> }
    });

    let in_frame = layout.label.is_some();
    let reply = layout.user_reply.map(|answer| view! { <UserReply answer=answer /> });
    let (framed_reply, trailing_reply) = if in_frame { (reply, None) } else { (None, reply) };

    let content = view! {
        {message}
        {framed_answer}
        {framed_reply}
        {after}
    };

    view! {
        <div class="block-item" id=format!("block-{}", user_block_id)>
            {match layout.label {
                Some(label) => view! {
                    <div class="block-frame">
                        <div class="block-tag">{label}</div>
                        {content}
                    </div>
                }
                .into_any(),
                None => content.into_any(),
            }}
            {trailing_reply}
            {trailing_answer}
        </div>
    }
}

/// The user's submitted answer as a chat bubble
#[component]
fn UserReply(answer: String) -> impl IntoView {
    let store = use_app_store();
    let html = TrustedHtml::from_markdown(&answer).into_inner();

    move || {
        let profile = store.profile().get()?;
        let name = profile.full_name()?;
        let src = profile.avatar.as_deref().map(avatar_src);
        let html = html.clone();
        Some(view! {
            <div class="message user-message">
                <div class="bubble">
                    <div class="bubble-header">
                        <span class="speaker-name">{format!("{},", name)}</span>
                        <span class="speaker-role">"Это вы"</span>
                    </div>
                    <div class="bubble-text" inner_html=html></div>
                </div>
                {src.map(|src| view! { <img class="avatar" src=src alt=name.clone() /> })}
            </div>
        })
    }
}
