//! Block Layout
//!
//! What a single user block shows: its frame label, who is speaking, the
//! answer section and the user's own reply bubble.

use crate::answer::{AnswerControl, AnswerReview};
use crate::models::{Character, CheckType, UserBlock};

/// Frame label used for task blocks without an explicit tag
pub const TASK_LABEL: &str = "Задание";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Speaker {
    Character(Character),
    Narrator,
}

/// Answer section of a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerSection {
    /// Interactive control (inside the frame for tasks, below the message otherwise)
    Input { control: AnswerControl, framed: bool },
    /// Completed task with per-option results
    Review { control: AnswerControl, review: Option<AnswerReview> },
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLayout {
    pub label: Option<String>,
    pub speaker: Speaker,
    pub answer: AnswerSection,
    /// The user's submitted text rendered as a chat bubble
    pub user_reply: Option<String>,
    pub text_after_answer: Option<String>,
}

impl BlockLayout {
    pub fn of(user_block: &UserBlock) -> Self {
        let block = &user_block.block;
        let check_type = block.check_type;

        let label = block
            .tag
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| check_type.map(|_| TASK_LABEL.to_string()));

        let speaker = match &block.character {
            Some(character) => Speaker::Character(character.clone()),
            None => Speaker::Narrator,
        };

        let control = AnswerControl::for_block(user_block);
        let answer = match check_type {
            Some(CheckType::GptCheck) if user_block.is_completed => AnswerSection::Hidden,
            Some(CheckType::GptCheck) => AnswerSection::Input { control, framed: true },
            Some(_) if user_block.is_completed => {
                AnswerSection::Review { control, review: AnswerReview::of(user_block) }
            }
            Some(_) => AnswerSection::Input { control, framed: true },
            None if user_block.is_completed => AnswerSection::Hidden,
            None => AnswerSection::Input { control, framed: false },
        };

        let shows_reply = user_block.is_completed
            && block.show_user_answer
            && matches!(check_type, None | Some(CheckType::GptCheck));
        let user_reply = user_block
            .answer
            .clone()
            .filter(|a| shows_reply && !a.trim().is_empty());

        Self {
            label,
            speaker,
            answer,
            user_reply,
            text_after_answer: block.text_after_answer.clone().filter(|t| !t.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Block, CompleteType, OptionProcessing};

    fn user_block(check_type: Option<CheckType>, completed: bool) -> UserBlock {
        UserBlock {
            id: 1,
            is_completed: completed,
            block: Block {
                id: 10,
                text: "Hello".into(),
                complete_type: if check_type.is_some() { CompleteType::Answers } else { CompleteType::Text },
                is_task: check_type.is_some(),
                next_button_text: None,
                answer_options: Some(vec!["A".into(), "B".into()]),
                character: None,
                tag: None,
                check_type,
                answers_options_processing: Some(vec![
                    OptionProcessing { is_correct: true },
                    OptionProcessing { is_correct: false },
                ]),
                text_after_answer: None,
                show_user_answer: true,
            },
            answer: completed.then(|| "A".to_string()),
            is_correct: None,
        }
    }

    #[test]
    fn test_task_block_is_labeled_and_framed() {
        let layout = BlockLayout::of(&user_block(Some(CheckType::SingleChoice), false));
        assert_eq!(layout.label.as_deref(), Some(TASK_LABEL));
        assert!(matches!(layout.answer, AnswerSection::Input { framed: true, .. }));
        assert_eq!(layout.user_reply, None);
    }

    #[test]
    fn test_completed_task_shows_review() {
        let layout = BlockLayout::of(&user_block(Some(CheckType::SingleChoice), true));
        let AnswerSection::Review { review: Some(review), .. } = layout.answer else {
            panic!("expected review");
        };
        assert_eq!(review.user_answers, vec!["A".to_string()]);
    }

    #[test]
    fn test_plain_block_reply_bubble() {
        let open = BlockLayout::of(&user_block(None, false));
        assert!(matches!(open.answer, AnswerSection::Input { control: AnswerControl::FreeText, framed: false }));

        let done = BlockLayout::of(&user_block(None, true));
        assert_eq!(done.answer, AnswerSection::Hidden);
        assert_eq!(done.user_reply.as_deref(), Some("A"));
        assert_eq!(done.label, None);
    }

    #[test]
    fn test_character_speaks_block() {
        let character = Character { id: 2, name: "Olga".into(), role: "HR".into(), image: "woman1".into() };
        let mut spoken = user_block(None, false);
        spoken.block.character = Some(character.clone());

        assert_eq!(BlockLayout::of(&spoken).speaker, Speaker::Character(character));
        assert_eq!(BlockLayout::of(&user_block(None, false)).speaker, Speaker::Narrator);
    }

    #[test]
    fn test_gpt_check_has_no_controls() {
        let layout = BlockLayout::of(&user_block(Some(CheckType::GptCheck), true));
        assert_eq!(layout.answer, AnswerSection::Hidden);
        assert_eq!(layout.user_reply.as_deref(), Some("A"));
    }
}
