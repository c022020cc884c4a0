//! Answer Handling
//!
//! Which answer control a block needs, the selection value object for
//! multiple choice, free-text drafts, and the per-option result statuses
//! shown once a block is completed.

use crate::error::ValidationError;
use crate::models::{CheckType, CompleteType, CompleteBlockRequest, OptionProcessing, UserBlock};

/// Delimiter the backend uses inside a submitted answer string
pub const ANSWER_DELIMITER: &str = ", ";

const DEFAULT_BUTTON_LABEL: &str = "Далее";

/// Control rendered for a block awaiting (or showing) an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerControl {
    Button { label: String },
    SingleChoice { options: Vec<String> },
    MultipleChoice { options: Vec<String> },
    FreeText,
    None,
}

impl AnswerControl {
    pub fn for_block(user_block: &UserBlock) -> Self {
        let block = &user_block.block;
        match block.complete_type {
            CompleteType::Button => AnswerControl::Button {
                label: block
                    .next_button_text
                    .clone()
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_BUTTON_LABEL.to_string()),
            },
            CompleteType::Answers => match &block.answer_options {
                Some(options) if block.check_type == Some(CheckType::MultipleChoice) => {
                    AnswerControl::MultipleChoice { options: options.clone() }
                }
                Some(options) => AnswerControl::SingleChoice { options: options.clone() },
                None => AnswerControl::None,
            },
            CompleteType::Text => AnswerControl::FreeText,
        }
    }
}

/// Structured answer for one user block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerPayload {
    pub user_block_id: u64,
    pub answers: Vec<String>,
}

impl AnswerPayload {
    pub fn single(user_block_id: u64, answer: impl Into<String>) -> Self {
        Self { user_block_id, answers: vec![answer.into()] }
    }

    /// Answer string as sent to the backend
    pub fn wire_answer(&self) -> String {
        self.answers.join(ANSWER_DELIMITER)
    }

    pub fn to_request(&self) -> CompleteBlockRequest {
        CompleteBlockRequest { answer: self.wire_answer(), id: self.user_block_id }
    }
}

/// Options picked so far for a multiple-choice block, in selection order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSelection {
    selected: Vec<String>,
}

impl AnswerSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the option if absent, remove it otherwise
    pub fn toggle(&mut self, option: &str) {
        match self.selected.iter().position(|s| s == option) {
            Some(index) => {
                self.selected.remove(index);
            }
            None => self.selected.push(option.to_string()),
        }
    }

    pub fn contains(&self, option: &str) -> bool {
        self.selected.iter().any(|s| s == option)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn options(&self) -> &[String] {
        &self.selected
    }

    pub fn to_payload(&self, user_block_id: u64) -> Result<AnswerPayload, ValidationError> {
        if self.selected.is_empty() {
            return Err(ValidationError::EmptyAnswer);
        }
        Ok(AnswerPayload { user_block_id, answers: self.selected.clone() })
    }
}

/// Text typed into a free-text answer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreeTextDraft {
    text: String,
}

impl FreeTextDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Trimmed text, or `None` when there is nothing to send
    pub fn submission(&self) -> Option<String> {
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    pub fn to_payload(&self, user_block_id: u64) -> Result<AnswerPayload, ValidationError> {
        self.submission()
            .map(|text| AnswerPayload::single(user_block_id, text))
            .ok_or(ValidationError::EmptyAnswer)
    }
}

/// Enter sends, Shift+Enter inserts a newline
pub fn sends_on_key(key: &str, shift: bool) -> bool {
    key == "Enter" && !shift
}

/// Split a submitted answer back into options.
///
/// Known options are matched longest first so option text containing the
/// delimiter survives the round trip; unknown text falls back to a split.
pub fn decode_answers(answer: &str, options: &[String]) -> Vec<String> {
    if answer.is_empty() {
        return Vec::new();
    }
    let mut by_length: Vec<&String> = options.iter().filter(|o| !o.is_empty()).collect();
    by_length.sort_by_key(|o| std::cmp::Reverse(o.len()));

    let mut decoded = Vec::new();
    let mut rest = answer;
    while !rest.is_empty() {
        let matched = by_length.iter().find(|option| {
            rest.strip_prefix(option.as_str())
                .is_some_and(|tail| tail.is_empty() || tail.starts_with(ANSWER_DELIMITER))
        });
        let (item, tail) = match matched {
            Some(option) => (option.to_string(), &rest[option.len()..]),
            None => match rest.find(ANSWER_DELIMITER) {
                Some(at) => (rest[..at].trim().to_string(), &rest[at..]),
                None => (rest.trim().to_string(), ""),
            },
        };
        decoded.push(item);
        rest = tail.strip_prefix(ANSWER_DELIMITER).unwrap_or(tail);
    }
    decoded
}

/// Result coloring of one option: was it picked, and is it correct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStatus {
    SelectedCorrect,
    SelectedWrong,
    NotSelectedCorrect,
    NotSelectedWrong,
}

impl AnswerStatus {
    pub fn css_class(&self) -> &'static str {
        match self {
            AnswerStatus::SelectedCorrect => "selected-correct",
            AnswerStatus::SelectedWrong => "selected-wrong",
            AnswerStatus::NotSelectedCorrect => "not-selected-correct",
            AnswerStatus::NotSelectedWrong => "not-selected-wrong",
        }
    }
}

pub fn answer_status(
    option: &str,
    index: usize,
    user_answers: &[String],
    processing: Option<&[OptionProcessing]>,
) -> Option<AnswerStatus> {
    let processing = processing?;
    let selected = user_answers.iter().any(|a| a == option);
    let correct = processing.get(index).is_some_and(|p| p.is_correct);
    Some(match (selected, correct) {
        (true, true) => AnswerStatus::SelectedCorrect,
        (true, false) => AnswerStatus::SelectedWrong,
        (false, true) => AnswerStatus::NotSelectedCorrect,
        (false, false) => AnswerStatus::NotSelectedWrong,
    })
}

pub fn classify_options(
    options: &[String],
    user_answers: &[String],
    processing: Option<&[OptionProcessing]>,
) -> Vec<Option<AnswerStatus>> {
    options
        .iter()
        .enumerate()
        .map(|(index, option)| answer_status(option, index, user_answers, processing))
        .collect()
}

/// Read-only data of a completed block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerReview {
    pub user_answers: Vec<String>,
    pub processing: Vec<OptionProcessing>,
}

impl AnswerReview {
    /// Present only when the block is completed with both an answer and processing data
    pub fn of(user_block: &UserBlock) -> Option<Self> {
        if !user_block.is_completed {
            return None;
        }
        let answer = user_block.answer.as_deref().filter(|a| !a.is_empty())?;
        let processing = user_block.block.answers_options_processing.clone()?;
        let options = user_block.block.answer_options.as_deref().unwrap_or_default();
        Some(Self { user_answers: decode_answers(answer, options), processing })
    }

    pub fn status(&self, option: &str, index: usize) -> Option<AnswerStatus> {
        answer_status(option, index, &self.user_answers, Some(&self.processing))
    }
}
