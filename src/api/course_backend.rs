use async_trait::async_trait;
use simulator_core::models::{
    CharacterRequest, CompleteBlockRequest, Course, CourseUser, Credentials, Lesson, SessionToken,
    SetCurrentLessonRequest, Simulator, StartLessonResponse, StartSimulatorRequest, UserProfile,
};
use simulator_core::{ApiError, CourseBackend, Endpoint};

use super::HttpBackend;

#[async_trait(?Send)]
impl CourseBackend for HttpBackend {
    async fn course(&self) -> Result<Course, ApiError> {
        self.get(Endpoint::Course).await
    }

    async fn course_user(&self) -> Result<CourseUser, ApiError> {
        self.get(Endpoint::CourseUser).await
    }

    async fn set_current_lesson(&self, lesson_id: u64) -> Result<(), ApiError> {
        self.execute(Endpoint::SetCurrentLesson, Some(&SetCurrentLessonRequest { lesson_id }))
            .await
    }

    async fn lessons(&self) -> Result<Vec<Lesson>, ApiError> {
        self.get(Endpoint::Lessons).await
    }

    async fn start_lesson(&self, lesson_id: u64) -> Result<StartLessonResponse, ApiError> {
        let response = self.call::<()>(Endpoint::StartLesson(lesson_id), None).await?;
        response.json().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn simulator(&self, simulator_id: u64) -> Result<Simulator, ApiError> {
        self.get(Endpoint::Simulator(simulator_id)).await
    }

    async fn start_simulator(&self, simulator_id: u64, lesson_user_id: Option<u64>) -> Result<(), ApiError> {
        self.execute(Endpoint::StartSimulator(simulator_id), Some(&StartSimulatorRequest { lesson_user_id }))
            .await
    }

    async fn complete_block(&self, request: &CompleteBlockRequest) -> Result<(), ApiError> {
        self.execute(Endpoint::CompleteBlock(request.id), Some(request)).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<SessionToken, ApiError> {
        self.send(Endpoint::Login, credentials).await
    }

    async fn register(&self, credentials: &Credentials) -> Result<SessionToken, ApiError> {
        self.send(Endpoint::Register, credentials).await
    }

    async fn user_info(&self) -> Result<UserProfile, ApiError> {
        self.get(Endpoint::UserInfo).await
    }

    async fn create_character(&self, request: &CharacterRequest) -> Result<(), ApiError> {
        self.execute(Endpoint::CreateCharacter, Some(request)).await
    }
}
