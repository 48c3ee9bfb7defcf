use crate::{analysis::SubmissionContext, payload::ImagePayload};

/// Everything the page needs to render one response.
#[derive(Debug, Clone, Default)]
pub struct PageView {
    pub config_error: Option<String>,
    pub prompt: String,
    pub preview: Option<ImagePayload>,
    pub response: Option<String>,
    pub error: Option<String>,
}

impl PageView {
    pub fn unconfigured(message: impl Into<String>) -> Self {
        Self {
            config_error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn is_disabled(&self) -> bool {
        self.config_error.is_some()
    }
}

impl From<SubmissionContext> for PageView {
    fn from(context: SubmissionContext) -> Self {
        let (response, error) = match (&context.estimate, context.rejection) {
            (Some(estimate), _) => (Some(estimate.display_text()), None),
            (None, Some(rejection)) => (None, Some(rejection.message().to_string())),
            (None, None) => (None, None),
        };

        Self {
            config_error: None,
            prompt: context.prompt,
            preview: context.preview,
            response,
            error,
        }
    }
}
