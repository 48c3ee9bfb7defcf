use super::{
    fsm::{SubmissionEvent, SubmissionStateMachine},
    prompts::{CALORIE_INSTRUCTION, NO_VALID_RESPONSE, REFUSAL_FALLBACK, is_refusal},
};
use crate::{
    Result,
    llm::{GenerateContentRequest, LlmClient, Part},
    payload::{self, ImagePayload, UploadedImage},
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Outcome of a single model call. Always displayable.
#[derive(Debug, Clone, PartialEq)]
pub enum Estimate {
    Answer(String),
    Refused,
    NoCandidates,
    Failed(String),
}

impl Estimate {
    pub fn display_text(&self) -> String {
        match self {
            Self::Answer(text) => text.clone(),
            Self::Refused => REFUSAL_FALLBACK.to_string(),
            Self::NoCandidates => NO_VALID_RESPONSE.to_string(),
            Self::Failed(description) => format!("Error: {}", description),
        }
    }

    pub fn is_answer(&self) -> bool {
        matches!(self, Self::Answer(_))
    }
}

/// One form submission as received by the shell.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub prompt: String,
    pub upload: Option<UploadedImage>,
}

pub struct CalorieEstimator {
    llm_client: Box<dyn LlmClient>,
    instruction: String,
}

impl CalorieEstimator {
    pub fn new(llm_client: Box<dyn LlmClient>) -> Self {
        Self {
            llm_client,
            instruction: CALORIE_INSTRUCTION.to_string(),
        }
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Sends prompt, image and instruction to the model and classifies the reply.
    pub async fn estimate(&self, prompt: &str, payload: &[ImagePayload]) -> Estimate {
        let Some(image) = payload.first().filter(|p| !p.is_empty()) else {
            warn!("Refusing to call the model with an empty image payload");
            return Estimate::Failed("image payload is empty".to_string());
        };

        // Gemini rejects empty text parts, so a blank prompt is left out.
        let mut parts = Vec::with_capacity(3);
        if !prompt.trim().is_empty() {
            parts.push(Part::text(prompt));
        }
        parts.push(Part::from(image));
        parts.push(Part::text(self.instruction.as_str()));

        let request = GenerateContentRequest::from_parts(parts);

        let response = match self.llm_client.generate_content(request).await {
            Ok(response) => response,
            Err(e) => {
                error!("Model call failed: {}", e);
                return Estimate::Failed(e.to_string());
            }
        };

        if response.candidates.is_empty() {
            warn!(
                "Model returned no candidates (block reason: {:?})",
                response
                    .prompt_feedback
                    .as_ref()
                    .and_then(|f| f.block_reason.as_deref())
            );
            return Estimate::NoCandidates;
        }

        match response.first_text() {
            Some(text) if text.trim().is_empty() => {
                warn!("First candidate carried an empty text part");
                Estimate::NoCandidates
            }
            Some(text) if is_refusal(text) => {
                info!("Model declined to estimate, substituting fallback message");
                Estimate::Refused
            }
            Some(text) => {
                debug!("Model answered with {} characters", text.len());
                Estimate::Answer(text.to_string())
            }
            None => {
                warn!("First candidate has no text part");
                Estimate::NoCandidates
            }
        }
    }

    /// Runs one submission through normalization and estimation.
    ///
    /// The returned machine is in `Completed` or `Failed`; rejected uploads never reach the model.
    pub async fn process(
        &self,
        request_id: Uuid,
        submission: Submission,
    ) -> Result<SubmissionStateMachine> {
        let mut fsm = SubmissionStateMachine::new(request_id, submission.prompt);
        fsm.transition(SubmissionEvent::Submit)?;

        let payload = match payload::normalize(submission.upload.as_ref()) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Submission {} rejected: {}", request_id, e);
                fsm.context.set_rejection(e);
                fsm.transition(SubmissionEvent::Rejected)?;
                return Ok(fsm);
            }
        };

        let estimate = self.estimate(&fsm.context.prompt, &payload).await;
        info!(
            "Submission {} finished, answer: {}",
            request_id,
            estimate.is_answer()
        );

        fsm.context.preview = payload.into_iter().next();
        fsm.context.estimate = Some(estimate);
        fsm.transition(SubmissionEvent::Answered)?;

        Ok(fsm)
    }
}
