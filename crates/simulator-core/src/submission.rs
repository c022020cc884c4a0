//! Answer Submission State
//!
//! One block accepts one answer. A request in flight blocks further
//! submissions; a failed request can be retried.

use crate::error::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    Failed(String),
    Submitted,
}

impl SubmissionState {
    /// Move to `Pending`; refused while pending or once submitted
    pub fn begin(&mut self) -> Result<(), ValidationError> {
        match self {
            SubmissionState::Idle | SubmissionState::Failed(_) => {
                *self = SubmissionState::Pending;
                Ok(())
            }
            SubmissionState::Pending | SubmissionState::Submitted => Err(ValidationError::AlreadySubmitted),
        }
    }

    pub fn succeed(&mut self) {
        *self = SubmissionState::Submitted;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        *self = SubmissionState::Failed(message.into());
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionState::Pending)
    }

    /// Controls stay interactive only while nothing is in flight or done
    pub fn accepts_input(&self) -> bool {
        matches!(self, SubmissionState::Idle | SubmissionState::Failed(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
