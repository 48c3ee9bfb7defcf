use super::{
    estimator::Estimate,
    prompts::{IMAGE_PROCESSING_FAILED, MISSING_IMAGE_MESSAGE, UNSUPPORTED_IMAGE_MESSAGE},
};
use crate::{Error, Result, payload::ImagePayload};
use tracing::{debug, info, warn};
use uuid::Uuid;

// Submission states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Processing,
    Completed,
    Failed,
}

// Submission events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionEvent {
    Submit,
    Answered,
    Rejected,
    Reset,
}

/// Why an upload never reached the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingImage,
    UnsupportedImage,
    InvalidImage,
}

impl Rejection {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingImage => MISSING_IMAGE_MESSAGE,
            Self::UnsupportedImage => UNSUPPORTED_IMAGE_MESSAGE,
            Self::InvalidImage => IMAGE_PROCESSING_FAILED,
        }
    }
}

// Submission context (request-scoped values)
#[derive(Debug, Clone)]
pub struct SubmissionContext {
    pub request_id: Uuid,
    pub prompt: String,
    pub preview: Option<ImagePayload>,
    pub estimate: Option<Estimate>,
    pub rejection: Option<Rejection>,
    pub last_error: Option<String>,
}

impl SubmissionContext {
    pub fn new(request_id: Uuid, prompt: String) -> Self {
        Self {
            request_id,
            prompt,
            preview: None,
            estimate: None,
            rejection: None,
            last_error: None,
        }
    }

    pub fn set_rejection(&mut self, error: Error) {
        self.rejection = Some(match error {
            Error::MissingImage => Rejection::MissingImage,
            Error::UnsupportedImageType(_) => Rejection::UnsupportedImage,
            _ => Rejection::InvalidImage,
        });
        self.last_error = Some(error.to_string());
    }
}

// idle -> processing -> (completed | failed) -> idle
pub struct SubmissionStateMachine {
    state: SubmissionState,
    pub context: SubmissionContext,
}

impl SubmissionStateMachine {
    pub fn new(request_id: Uuid, prompt: String) -> Self {
        debug!("Creating submission FSM for request {}", request_id);
        Self {
            state: SubmissionState::Idle,
            context: SubmissionContext::new(request_id, prompt),
        }
    }

    pub fn current_state(&self) -> SubmissionState {
        self.state
    }

    pub fn transition(&mut self, event: SubmissionEvent) -> Result<()> {
        let old_state = self.state;

        let new_state = match (old_state, event) {
            (SubmissionState::Idle, SubmissionEvent::Submit) => SubmissionState::Processing,
            (SubmissionState::Processing, SubmissionEvent::Answered) => SubmissionState::Completed,
            (SubmissionState::Processing, SubmissionEvent::Rejected) => SubmissionState::Failed,
            (SubmissionState::Completed | SubmissionState::Failed, SubmissionEvent::Reset) => {
                SubmissionState::Idle
            }
            _ => {
                warn!(
                    "Invalid FSM transition from {:?} with event {:?}",
                    old_state, event
                );
                return Err(Error::InvalidTransition {
                    current: format!("{:?}", old_state),
                    requested: format!("{:?}", event),
                });
            }
        };

        info!(
            request_id = %self.context.request_id,
            "Submission state transition: {:?} -> {:?} (event: {:?})",
            old_state, new_state, event
        );

        self.state = new_state;
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.state,
            SubmissionState::Completed | SubmissionState::Failed
        )
    }

    /// Hands out the finished context and returns the machine to `Idle`.
    pub fn finish(&mut self) -> Result<SubmissionContext> {
        if !self.is_terminal() {
            return Err(Error::fsm(format!(
                "Submission {} is still {:?}",
                self.context.request_id, self.state
            )));
        }
        self.transition(SubmissionEvent::Reset)?;
        let fresh = SubmissionContext::new(self.context.request_id, String::new());
        Ok(std::mem::replace(&mut self.context, fresh))
    }
}
