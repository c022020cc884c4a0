//! Backend Interface
//!
//! The course REST API as an async trait, the endpoint table and which
//! cached resources each mutation invalidates.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{
    CharacterRequest, CompleteBlockRequest, Course, CourseUser, Credentials, Lesson, SessionToken, Simulator,
    StartLessonResponse, UserProfile,
};

/// Families of cached queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CacheTag {
    User,
    Course,
    CourseUser,
    Lessons,
    Simulator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Course,
    CourseUser,
    SetCurrentLesson,
    Lessons,
    StartLesson(u64),
    Simulator(u64),
    StartSimulator(u64),
    CompleteBlock(u64),
    Login,
    Register,
    UserInfo,
    CreateCharacter,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Course | Endpoint::CourseUser | Endpoint::Lessons | Endpoint::Simulator(_) | Endpoint::UserInfo => {
                Method::Get
            }
            Endpoint::CompleteBlock(_) => Method::Patch,
            _ => Method::Post,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Endpoint::Course => "/course".to_string(),
            Endpoint::CourseUser => "/course/user".to_string(),
            Endpoint::SetCurrentLesson => "/course/current_lesson".to_string(),
            Endpoint::Lessons => "/lessons".to_string(),
            Endpoint::StartLesson(id) => format!("/lessons/{}/start", id),
            Endpoint::Simulator(id) => format!("/simulator/{}", id),
            Endpoint::StartSimulator(id) => format!("/simulators/{}/start", id),
            Endpoint::CompleteBlock(user_block_id) => format!("/user_blocks/{}/complete", user_block_id),
            Endpoint::Login => "/login".to_string(),
            Endpoint::Register => "/register".to_string(),
            Endpoint::UserInfo => "/user_info".to_string(),
            Endpoint::CreateCharacter => "/create_character".to_string(),
        }
    }

    /// Cached resources that are stale once this call succeeds
    pub fn invalidates(&self) -> &'static [CacheTag] {
        match self {
            Endpoint::SetCurrentLesson => &[CacheTag::CourseUser],
            Endpoint::StartLesson(_) | Endpoint::StartSimulator(_) => &[CacheTag::Lessons],
            Endpoint::CompleteBlock(_) => &[CacheTag::Simulator, CacheTag::Lessons, CacheTag::CourseUser],
            Endpoint::Login | Endpoint::Register | Endpoint::CreateCharacter => &[CacheTag::User],
            _ => &[],
        }
    }
}

/// Course REST API
///
/// Futures are not `Send`: the implementation runs on the browser event loop.
#[async_trait(?Send)]
pub trait CourseBackend {
    async fn course(&self) -> Result<Course, ApiError>;

    async fn course_user(&self) -> Result<CourseUser, ApiError>;

    async fn set_current_lesson(&self, lesson_id: u64) -> Result<(), ApiError>;

    async fn lessons(&self) -> Result<Vec<Lesson>, ApiError>;

    async fn start_lesson(&self, lesson_id: u64) -> Result<StartLessonResponse, ApiError>;

    async fn simulator(&self, simulator_id: u64) -> Result<Simulator, ApiError>;

    async fn start_simulator(&self, simulator_id: u64, lesson_user_id: Option<u64>) -> Result<(), ApiError>;

    async fn complete_block(&self, request: &CompleteBlockRequest) -> Result<(), ApiError>;

    async fn login(&self, credentials: &Credentials) -> Result<SessionToken, ApiError>;

    async fn register(&self, credentials: &Credentials) -> Result<SessionToken, ApiError>;

    async fn user_info(&self) -> Result<UserProfile, ApiError>;

    async fn create_character(&self, request: &CharacterRequest) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::CompleteBlock(42).path(), "/user_blocks/42/complete");
        assert_eq!(Endpoint::CompleteBlock(42).method(), Method::Patch);
        assert_eq!(Endpoint::StartSimulator(3).path(), "/simulators/3/start");
        assert_eq!(Endpoint::Simulator(3).path(), "/simulator/3");
        assert_eq!(Endpoint::StartLesson(9).method(), Method::Post);
        assert_eq!(Endpoint::UserInfo.method(), Method::Get);
    }

    #[test]
    fn test_mutations_invalidate_their_resources() {
        assert!(Endpoint::CompleteBlock(1).invalidates().contains(&CacheTag::Simulator));
        assert_eq!(Endpoint::StartLesson(1).invalidates(), &[CacheTag::Lessons]);
        assert_eq!(Endpoint::SetCurrentLesson.invalidates(), &[CacheTag::CourseUser]);
        assert!(Endpoint::Lessons.invalidates().is_empty());
    }
}
