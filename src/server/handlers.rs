use super::{page, types::PageView};
use crate::{
    Error, Result,
    analysis::{CalorieEstimator, Rejection, Submission, SubmissionContext},
    config::{GeminiConfig, MISSING_API_KEY_MESSAGE},
    llm::GeminiClient,
    payload::UploadedImage,
};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub estimator: Option<Arc<CalorieEstimator>>,
    pub config_error: Option<String>,
}

impl AppState {
    pub fn new(estimator: CalorieEstimator) -> Self {
        Self {
            estimator: Some(Arc::new(estimator)),
            config_error: None,
        }
    }

    pub fn unconfigured(message: impl Into<String>) -> Self {
        Self {
            estimator: None,
            config_error: Some(message.into()),
        }
    }

    /// Builds the Gemini-backed estimator, or records why it cannot exist.
    pub fn from_config(config: &GeminiConfig) -> Self {
        let api_key = match config.credentials() {
            Ok(api_key) => api_key,
            Err(e) => {
                error!("{}", e);
                return Self::unconfigured(MISSING_API_KEY_MESSAGE);
            }
        };

        let client = GeminiClient::new(config, api_key);
        info!("Using Gemini model {}", client.model());

        let mut estimator = CalorieEstimator::new(Box::new(client));
        if let Some(instruction) = config
            .instruction
            .as_deref()
            .filter(|i| !i.trim().is_empty())
        {
            estimator = estimator.with_instruction(instruction);
        }

        Self::new(estimator)
    }

    fn page(&self) -> PageView {
        match &self.config_error {
            Some(message) => PageView::unconfigured(message.clone()),
            None => PageView::default(),
        }
    }
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(page::render(&state.page()))
}

pub async fn estimate(State(state): State<AppState>, multipart: Multipart) -> Response {
    let request_id = Uuid::new_v4();

    let Some(estimator) = state.estimator.clone() else {
        warn!("Submission {} received without API credentials", request_id);
        return render(StatusCode::SERVICE_UNAVAILABLE, &state.page());
    };

    let submission = match read_submission(multipart).await {
        Ok(submission) => submission,
        Err(e) => {
            warn!("Failed to read submission {}: {}", request_id, e);
            let status = match &e {
                Error::Multipart(e) => e.status(),
                _ => StatusCode::BAD_REQUEST,
            };
            return render(status, &state.page().with_error(format!("Error: {}", e)));
        }
    };

    info!(
        "Processing submission {} (prompt: {} chars, image: {})",
        request_id,
        submission.prompt.len(),
        submission.upload.is_some()
    );

    let prompt = submission.prompt.clone();
    let context = match run_submission(&estimator, request_id, submission).await {
        Ok(context) => context,
        Err(e) => {
            error!("Submission {} failed: {}", request_id, e);
            let view = state
                .page()
                .with_prompt(prompt)
                .with_error(format!("Error: {}", e));
            return render(StatusCode::INTERNAL_SERVER_ERROR, &view);
        }
    };

    let status = status_for(&context);
    render(status, &PageView::from(context))
}

async fn run_submission(
    estimator: &CalorieEstimator,
    request_id: Uuid,
    submission: Submission,
) -> Result<SubmissionContext> {
    let mut fsm = estimator.process(request_id, submission).await?;
    fsm.finish()
}

/// Collects the `prompt` and `image` fields of the form.
pub async fn read_submission(mut multipart: Multipart) -> Result<Submission> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "prompt" => {
                submission.prompt = field.text().await?;
            }
            "image" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;

                // Browsers post an empty file part when nothing was picked.
                if bytes.is_empty() {
                    debug!("Ignoring empty image field");
                    continue;
                }

                let mut upload = UploadedImage::new(bytes.to_vec());
                if let Some(file_name) = file_name.filter(|n| !n.is_empty()) {
                    upload = upload.with_file_name(file_name);
                }
                if let Some(content_type) = content_type {
                    upload = upload.with_content_type(content_type);
                }
                submission.upload = Some(upload);
            }
            other => {
                debug!("Ignoring unexpected form field: {}", other);
            }
        }
    }

    Ok(submission)
}

fn status_for(context: &SubmissionContext) -> StatusCode {
    match context.rejection {
        None => StatusCode::OK,
        Some(Rejection::MissingImage) => StatusCode::BAD_REQUEST,
        Some(Rejection::UnsupportedImage) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        Some(Rejection::InvalidImage) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn render(status: StatusCode, view: &PageView) -> Response {
    (status, Html(page::render(view))).into_response()
}
