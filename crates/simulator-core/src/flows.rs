//! User Flows
//!
//! Request orchestration behind the pages: answering a block, moving on
//! after a simulator, entering a lesson, signing in and onboarding. Each flow
//! reports the cache tags its mutation made stale.

use crate::answer::AnswerPayload;
use crate::backend::{CacheTag, CourseBackend, Endpoint};
use crate::error::{Error, Result, ValidationError};
use crate::forms::{CharacterForm, LoginForm, RegisterForm};
use crate::models::{CharacterRequest, CompleteBlockRequest, Lesson, SessionToken};
use crate::route::Route;
use crate::sequencing::{lesson_entry, LessonEntry, NextStep, PreAction};
use crate::session::{Session, TokenStore};
use crate::submission::SubmissionState;

/// Where to go after a flow, and what to reload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub route: Option<Route>,
    pub invalidates: &'static [CacheTag],
}

impl Transition {
    fn stay() -> Self {
        Self { route: None, invalidates: &[] }
    }
}

// ========================
// Answers
// ========================

/// Validate the answer and mark the block as pending.
///
/// Nothing is sent when the answer is empty or one is already in flight.
pub fn prepare_submission(
    state: &mut SubmissionState,
    payload: std::result::Result<AnswerPayload, ValidationError>,
) -> std::result::Result<CompleteBlockRequest, ValidationError> {
    let payload = payload?;
    state.begin()?;
    Ok(payload.to_request())
}

pub async fn send_answer<B: CourseBackend + ?Sized>(
    backend: &B,
    request: &CompleteBlockRequest,
) -> Result<&'static [CacheTag]> {
    log::debug!("completing user block {}", request.id);
    match backend.complete_block(request).await {
        Ok(()) => Ok(Endpoint::CompleteBlock(request.id).invalidates()),
        Err(err) => {
            log::warn!("completing user block {} failed: {}", request.id, err);
            Err(err.into())
        }
    }
}

impl SubmissionState {
    /// Record the outcome of a sent answer
    pub fn settle<T>(&mut self, result: &Result<T>) {
        match result {
            Ok(_) => self.succeed(),
            Err(err) => self.fail(err.to_string()),
        }
    }
}

// ========================
// Navigation
// ========================

/// Run the pre-action of `step`, then hand back its target
pub async fn advance<B: CourseBackend + ?Sized>(backend: &B, step: NextStep) -> Result<Transition> {
    let invalidates = match step.pre_action() {
        Some(PreAction::StartSimulator { simulator_id, lesson_user_id }) => {
            log::debug!("starting simulator {}", simulator_id);
            backend.start_simulator(simulator_id, lesson_user_id).await?;
            Endpoint::StartSimulator(simulator_id).invalidates()
        }
        Some(PreAction::StartLesson { lesson_id }) => {
            log::debug!("starting lesson {}", lesson_id);
            backend.start_lesson(lesson_id).await?;
            Endpoint::StartLesson(lesson_id).invalidates()
        }
        None => &[],
    };
    Ok(Transition { route: step.target(), invalidates })
}

/// Open a lesson from the course overview
pub async fn enter_lesson<B: CourseBackend + ?Sized>(backend: &B, lesson: &Lesson) -> Result<Transition> {
    match lesson_entry(lesson) {
        LessonEntry::Start { lesson_id } => {
            let started = backend.start_lesson(lesson_id).await?;
            let simulator_id = started
                .last_simulator_id
                .or_else(|| lesson.first_simulator().map(|s| s.id));
            Ok(Transition {
                route: simulator_id.map(|id| Route::simulator(lesson_id, id)),
                invalidates: Endpoint::StartLesson(lesson_id).invalidates(),
            })
        }
        LessonEntry::Resume { lesson_id, simulator_id } => {
            let invalidates = match backend.set_current_lesson(lesson_id).await {
                Ok(()) => Endpoint::SetCurrentLesson.invalidates(),
                Err(err @ crate::error::ApiError::Unauthorized(_)) => return Err(err.into()),
                Err(err) => {
                    log::warn!("recording current lesson {} failed: {}", lesson_id, err);
                    &[]
                }
            };
            Ok(Transition { route: Some(Route::simulator(lesson_id, simulator_id)), invalidates })
        }
        LessonEntry::Locked => {
            log::debug!("lesson {} is locked", lesson.id);
            Ok(Transition::stay())
        }
    }
}

// ========================
// Session & Onboarding
// ========================

pub async fn sign_in<B: CourseBackend + ?Sized>(backend: &B, form: &LoginForm) -> Result<SessionToken> {
    let credentials = form.validate()?;
    Ok(backend.login(&credentials).await?)
}

pub async fn sign_up<B: CourseBackend + ?Sized>(backend: &B, form: &RegisterForm) -> Result<SessionToken> {
    let credentials = form.validate()?;
    Ok(backend.register(&credentials).await?)
}

/// Save the character and hand back what was stored, so the loaded profile
/// can take it over before the refetch lands
pub async fn create_character<B: CourseBackend + ?Sized>(
    backend: &B,
    form: &CharacterForm,
) -> Result<CharacterRequest> {
    let request = form.validate()?;
    backend.create_character(&request).await?;
    Ok(request)
}

/// Drop the session on 401/403 so the access guard sends the user to login.
/// Returns whether the session was cleared.
pub fn handle_auth_failure<S: TokenStore>(session: &mut Session<S>, err: &Error) -> bool {
    if err.is_unauthorized() && session.is_authenticated() {
        log::warn!("{}; signing out", err);
        session.sign_out();
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use async_trait::async_trait;

    use super::*;
    use crate::answer::{AnswerSelection, FreeTextDraft};
    use crate::error::ApiError;
    use crate::forms::Sex;
    use crate::models::{
        CharacterRequest, Course, CourseUser, Credentials, LessonUser, Simulator, SimulatorStub,
        StartLessonResponse, UserProfile,
    };
    use crate::session::MemoryTokenStore;

    /// Records every call; fails the next call when `fail_with` is set
    #[derive(Default)]
    struct MockBackend {
        calls: RefCell<Vec<String>>,
        fail_with: RefCell<Option<ApiError>>,
        last_simulator_id: Option<u64>,
    }

    impl MockBackend {
        fn record(&self, call: String) -> std::result::Result<(), ApiError> {
            self.calls.borrow_mut().push(call);
            match self.fail_with.borrow_mut().take() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn token() -> SessionToken {
            SessionToken { access_token: "token-1".into(), token_type: "bearer".into() }
        }
    }

    #[async_trait(?Send)]
    impl CourseBackend for MockBackend {
        async fn course(&self) -> std::result::Result<Course, ApiError> {
            unimplemented!()
        }

        async fn course_user(&self) -> std::result::Result<CourseUser, ApiError> {
            unimplemented!()
        }

        async fn set_current_lesson(&self, lesson_id: u64) -> std::result::Result<(), ApiError> {
            self.record(format!("set_current_lesson {}", lesson_id))
        }

        async fn lessons(&self) -> std::result::Result<Vec<Lesson>, ApiError> {
            unimplemented!()
        }

        async fn start_lesson(&self, lesson_id: u64) -> std::result::Result<StartLessonResponse, ApiError> {
            self.record(format!("start_lesson {}", lesson_id))?;
            Ok(StartLessonResponse { last_simulator_id: self.last_simulator_id })
        }

        async fn simulator(&self, _simulator_id: u64) -> std::result::Result<Simulator, ApiError> {
            unimplemented!()
        }

        async fn start_simulator(&self, simulator_id: u64, lesson_user_id: Option<u64>) -> std::result::Result<(), ApiError> {
            self.record(format!("start_simulator {} {:?}", simulator_id, lesson_user_id))
        }

        async fn complete_block(&self, request: &CompleteBlockRequest) -> std::result::Result<(), ApiError> {
            self.record(format!("complete_block {} {}", request.id, request.answer))
        }

        async fn login(&self, credentials: &Credentials) -> std::result::Result<SessionToken, ApiError> {
            self.record(format!("login {}", credentials.username))?;
            Ok(Self::token())
        }

        async fn register(&self, credentials: &Credentials) -> std::result::Result<SessionToken, ApiError> {
            self.record(format!("register {}", credentials.username))?;
            Ok(Self::token())
        }

        async fn user_info(&self) -> std::result::Result<UserProfile, ApiError> {
            unimplemented!()
        }

        async fn create_character(&self, request: &CharacterRequest) -> std::result::Result<(), ApiError> {
            self.record(format!("create_character {} {}", request.first_name, request.avatar))
        }
    }

    fn lesson(id: u64, simulators: &[u64], user: Option<LessonUser>) -> Lesson {
        Lesson {
            id,
            name: format!("Lesson {}", id),
            description: String::new(),
            course_id: None,
            image: None,
            is_available: true,
            simulators: simulators.iter().map(|&id| SimulatorStub { id, name: String::new() }).collect(),
            user,
        }
    }

    #[tokio::test]
    async fn test_empty_free_text_sends_nothing() {
        let backend = MockBackend::default();
        let mut state = SubmissionState::default();

        let result = prepare_submission(&mut state, FreeTextDraft::new("   ").to_payload(5));
        assert_eq!(result, Err(ValidationError::EmptyAnswer));
        assert!(backend.calls().is_empty());
        assert_eq!(state, SubmissionState::Idle);

        let request = prepare_submission(&mut state, FreeTextDraft::new(" ok ").to_payload(5)).unwrap();
        assert!(state.is_pending());
        let result = send_answer(&backend, &request).await;
        state.settle(&result);
        assert!(result.is_ok());
        assert_eq!(backend.calls(), vec!["complete_block 5 ok".to_string()]);
        assert_eq!(state, SubmissionState::Submitted);
    }

    #[tokio::test]
    async fn test_answer_submitted_once() {
        let backend = MockBackend::default();
        let mut state = SubmissionState::default();
        let mut selection = AnswerSelection::new();
        selection.toggle("A");
        selection.toggle("C");

        let request = prepare_submission(&mut state, selection.to_payload(9)).unwrap();
        assert_eq!(
            prepare_submission(&mut state, selection.to_payload(9)),
            Err(ValidationError::AlreadySubmitted)
        );

        let result = send_answer(&backend, &request).await;
        state.settle(&result);
        assert!(result.unwrap().contains(&CacheTag::Simulator));

        let again = prepare_submission(&mut state, selection.to_payload(9));
        assert_eq!(again, Err(ValidationError::AlreadySubmitted));
        assert_eq!(backend.calls(), vec!["complete_block 9 A, C".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_answer_can_be_retried() {
        let backend = MockBackend::default();
        *backend.fail_with.borrow_mut() = Some(ApiError::Network("offline".into()));
        let mut state = SubmissionState::default();

        let payload = || Ok(AnswerPayload::single(3, "Далее"));
        let request = prepare_submission(&mut state, payload()).unwrap();
        let result = send_answer(&backend, &request).await;
        state.settle(&result);
        assert!(result.is_err());
        assert_eq!(state.error(), Some("Network error: offline"));

        let request = prepare_submission(&mut state, payload()).unwrap();
        let result = send_answer(&backend, &request).await;
        state.settle(&result);
        assert!(result.is_ok());
        assert_eq!(backend.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_advance_runs_pre_action_first() {
        let backend = MockBackend::default();
        let step = NextStep::NextSimulator { lesson_id: 1, simulator_id: 11, lesson_user_id: Some(4) };
        let transition = advance(&backend, step).await.unwrap();
        assert_eq!(transition.route, Some(Route::simulator(1, 11)));
        assert_eq!(transition.invalidates, &[CacheTag::Lessons]);
        assert_eq!(backend.calls(), vec!["start_simulator 11 Some(4)".to_string()]);

        let done = advance(&backend, NextStep::CourseCompleted).await.unwrap();
        assert_eq!(done.route, None);
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_advance_stops_when_pre_action_fails() {
        let backend = MockBackend::default();
        *backend.fail_with.borrow_mut() = Some(ApiError::Status { status: 500, message: None });
        let result = advance(&backend, NextStep::NextLesson { lesson_id: 2, simulator_id: 20 }).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_enter_new_lesson_uses_returned_simulator() {
        let backend = MockBackend { last_simulator_id: Some(21), ..Default::default() };
        let transition = enter_lesson(&backend, &lesson(2, &[20, 21], None)).await.unwrap();
        assert_eq!(transition.route, Some(Route::simulator(2, 21)));
        assert_eq!(backend.calls(), vec!["start_lesson 2".to_string()]);
    }

    #[tokio::test]
    async fn test_resume_lesson_survives_bookkeeping_failure() {
        let backend = MockBackend::default();
        *backend.fail_with.borrow_mut() = Some(ApiError::Network("offline".into()));
        let user = LessonUser { id: Some(1), completed: false, last_simulator: Some(11), completed_simulators_count: 1 };
        let transition = enter_lesson(&backend, &lesson(1, &[10, 11], Some(user))).await.unwrap();
        assert_eq!(transition.route, Some(Route::simulator(1, 11)));
        assert!(transition.invalidates.is_empty());
    }

    #[tokio::test]
    async fn test_sign_up_validates_before_calling() {
        let backend = MockBackend::default();
        let form = RegisterForm {
            username: "a@b.c".into(),
            password: "one".into(),
            password_confirmation: "two".into(),
        };
        assert_eq!(sign_up(&backend, &form).await, Err(Error::Validation(ValidationError::PasswordMismatch)));
        assert!(backend.calls().is_empty());

        let form = RegisterForm { password_confirmation: "one".into(), ..form };
        let token = sign_up(&backend, &form).await.unwrap();

        let mut session = Session::restore(MemoryTokenStore::new());
        session.sign_in(&token);
        assert_eq!(session.token(), Some("token-1"));
    }

    #[tokio::test]
    async fn test_sign_in_surfaces_field_errors() {
        let backend = MockBackend::default();
        let mut fields = crate::error::FieldErrors::default();
        fields.fields.insert("password".into(), "wrong password".into());
        *backend.fail_with.borrow_mut() = Some(ApiError::Fields(fields));

        let form = LoginForm { username: "a@b.c".into(), password: "x".into() };
        let err = sign_in(&backend, &form).await.unwrap_err();
        assert_eq!(err.field_errors().and_then(|f| f.get("password")), Some("wrong password"));
    }

    #[tokio::test]
    async fn test_create_character() {
        let backend = MockBackend::default();
        let form = CharacterForm {
            first_name: "Anna".into(),
            last_name: "Petrova".into(),
            sex: Sex::Female,
            avatar: Some("woman2".into()),
        };
        let saved = create_character(&backend, &form).await.unwrap();
        assert_eq!(backend.calls(), vec!["create_character Anna woman2".to_string()]);

        let mut profile = UserProfile {
            username: "anna".into(),
            email: "anna@example.com".into(),
            first_name: None,
            last_name: None,
            avatar: None,
            sex: None,
        };
        assert!(!profile.has_character());
        profile.apply_character(&saved);
        assert_eq!(profile.full_name().as_deref(), Some("Anna Petrova"));
        assert_eq!(crate::guard::evaluate_route(&Route::Home, true, Some(&profile)).redirect(), None);
    }

    #[test]
    fn test_unauthorized_clears_session() {
        let mut session = Session::restore(MemoryTokenStore::with_token("stale"));
        assert!(!handle_auth_failure(&mut session, &ApiError::Network("x".into()).into()));
        assert!(session.is_authenticated());

        assert!(handle_auth_failure(&mut session, &ApiError::Unauthorized(401).into()));
        assert!(!session.is_authenticated());
        assert!(!handle_auth_failure(&mut session, &ApiError::Unauthorized(401).into()));
    }
}
