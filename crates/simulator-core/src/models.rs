//! Backend Models
//!
//! Data structures matching the course API JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Course data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: u64,
    pub name: String,
    pub description: String,
    /// Palette keyed by color role ("primary", "secondary", ...)
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    pub logo: Option<String>,
    pub favicon: Option<String>,
}

/// Per-user progress on the course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseUser {
    pub id: u64,
    pub completed: bool,
    #[serde(rename = "lastLessonId")]
    pub last_lesson_id: Option<u64>,
    /// Percent, 0-100
    pub progress: Option<u32>,
}

impl CourseUser {
    pub fn progress_percent(&self) -> u32 {
        self.progress.unwrap_or(0).min(100)
    }
}

/// Simulator stub as listed inside a lesson
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorStub {
    pub id: u64,
    pub name: String,
}

/// Per-user state of a lesson
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonUser {
    /// Lesson-user id, required to start a simulator inside the lesson
    pub id: Option<u64>,
    pub completed: bool,
    pub last_simulator: Option<u64>,
    #[serde(default)]
    pub completed_simulators_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: u64,
    pub name: String,
    pub description: String,
    #[serde(rename = "courseId")]
    pub course_id: Option<u64>,
    pub image: Option<String>,
    pub is_available: bool,
    /// Ordered; array position is the authoritative sequence
    #[serde(default)]
    pub simulators: Vec<SimulatorStub>,
    pub user: Option<LessonUser>,
}

impl Lesson {
    pub fn is_completed(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.completed)
    }

    pub fn first_simulator(&self) -> Option<&SimulatorStub> {
        self.simulators.first()
    }

    pub fn contains_simulator(&self, simulator_id: u64) -> bool {
        self.simulators.iter().any(|s| s.id == simulator_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorUser {
    pub completed: bool,
    pub started: bool,
    #[serde(default)]
    pub blocks: Vec<UserBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulator {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub user: Option<SimulatorUser>,
}

impl Simulator {
    pub fn is_completed(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.completed)
    }

    pub fn blocks(&self) -> &[UserBlock] {
        self.user.as_ref().map(|u| u.blocks.as_slice()).unwrap_or_default()
    }
}

/// How a block is completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompleteType {
    Button,
    Text,
    Answers,
}

/// How an answer is checked by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckType {
    SingleChoice,
    MultipleChoice,
    GptCheck,
}

/// Character speaking a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    pub role: String,
    /// Avatar key or absolute image URL
    pub image: String,
}

/// Correctness of one answer option, revealed after completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionProcessing {
    pub is_correct: bool,
}

/// Block template (static content)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: u64,
    /// Rich text (HTML), sanitised before rendering
    pub text: String,
    pub complete_type: CompleteType,
    #[serde(default)]
    pub is_task: bool,
    pub next_button_text: Option<String>,
    pub answer_options: Option<Vec<String>>,
    pub character: Option<Character>,
    pub tag: Option<String>,
    pub check_type: Option<CheckType>,
    pub answers_options_processing: Option<Vec<OptionProcessing>>,
    pub text_after_answer: Option<String>,
    #[serde(default)]
    pub show_user_answer: bool,
}

/// A block bound to the current user's progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBlock {
    pub id: u64,
    pub is_completed: bool,
    pub block: Block,
    pub answer: Option<String>,
    pub is_correct: Option<bool>,
}

/// Profile returned by `/user_info`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
    pub sex: Option<String>,
}

fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl UserProfile {
    /// Onboarding is complete once both names are set
    pub fn has_character(&self) -> bool {
        filled(&self.first_name).is_some() && filled(&self.last_name).is_some()
    }

    /// Take over a character the backend just accepted
    pub fn apply_character(&mut self, character: &CharacterRequest) {
        self.first_name = Some(character.first_name.clone());
        self.last_name = Some(character.last_name.clone());
        self.sex = Some(character.sex.clone());
        self.avatar = Some(character.avatar.clone());
    }

    pub fn full_name(&self) -> Option<String> {
        match (filled(&self.first_name), filled(&self.last_name)) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            _ => None,
        }
    }
}

// ========================
// Request / Response Bodies
// ========================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRequest {
    pub first_name: String,
    pub last_name: String,
    pub sex: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartLessonResponse {
    pub last_simulator_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteBlockRequest {
    pub answer: String,
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetCurrentLessonRequest {
    pub lesson_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartSimulatorRequest {
    pub lesson_user_id: Option<u64>,
}
