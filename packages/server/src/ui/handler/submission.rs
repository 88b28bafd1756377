//! Job order submission endpoint.
//!
//! Parses the form (multipart with photos, JSON, or urlencoded), validates the
//! photo count, hands the job order to the use case and turns the outcome into
//! a `{status, message, details?}` JSON response.

use std::{any::Any, sync::Arc};

use axum::{
    Form, Json,
    extract::{FromRequest, Multipart, Request, State, multipart::MultipartError},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    domain::{Attachment, JobOrder, RelayError},
    infrastructure::dto::http::{JobOrderRequestDto, SubmissionResponseDto},
    ui::state::AppState,
    usecase::SubmitJobOrderError,
};

/// Multipart field name carrying photo attachments
pub const PHOTO_FIELD: &str = "photos";

/// MIME type used when a photo part carries none (or a non-image one)
const DEFAULT_PHOTO_MIME: &str = "image/jpeg";

const SUCCESS_MESSAGE: &str = "✅ Request sent successfully! We will contact you soon.";
const DELIVERY_FAILED_MESSAGE: &str = "Failed to send message to Telegram";
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
const INVALID_REQUEST_MESSAGE: &str = "Invalid job order request";

/// Job order form as received, before validation
#[derive(Debug)]
pub struct JobOrderForm {
    request: JobOrderRequestDto,
    photos: Vec<Attachment>,
}

/// Rejection for bodies that cannot be read as a job order form
#[derive(Debug, Error)]
pub enum JobOrderFormRejection {
    /// Unreadable body; carries the status chosen by the underlying extractor (400, 413, ...)
    #[error("{message}")]
    Malformed { status: StatusCode, message: String },

    #[error("unsupported content type '{0}'")]
    UnsupportedContentType(String),
}

impl JobOrderFormRejection {
    fn malformed(status: StatusCode, message: String) -> Self {
        Self::Malformed { status, message }
    }
}

impl IntoResponse for JobOrderFormRejection {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Malformed { status, .. } => *status,
            Self::UnsupportedContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        };
        tracing::warn!("Rejected job order request: {}", self);
        (
            status,
            Json(SubmissionResponseDto::error(
                INVALID_REQUEST_MESSAGE,
                self.to_string(),
            )),
        )
            .into_response()
    }
}

impl<S> FromRequest<S> for JobOrderForm
where
    S: Send + Sync,
{
    type Rejection = JobOrderFormRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| JobOrderFormRejection::malformed(e.status(), e.body_text()))?;
            read_multipart(multipart).await
        } else if content_type.starts_with("application/json") {
            let Json(request) = Json::<JobOrderRequestDto>::from_request(req, state)
                .await
                .map_err(|e| JobOrderFormRejection::malformed(e.status(), e.body_text()))?;
            Ok(Self {
                request,
                photos: Vec::new(),
            })
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(request) = Form::<JobOrderRequestDto>::from_request(req, state)
                .await
                .map_err(|e| JobOrderFormRejection::malformed(e.status(), e.body_text()))?;
            Ok(Self {
                request,
                photos: Vec::new(),
            })
        } else {
            Err(JobOrderFormRejection::UnsupportedContentType(content_type))
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<JobOrderForm, JobOrderFormRejection> {
    let mut request = JobOrderRequestDto::default();
    let mut photos = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();

        if name != PHOTO_FIELD {
            let value = field.text().await.map_err(malformed)?;
            request.set_field(&name, value);
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let mime_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(malformed)?;

        // ファイル未選択の input は空のパートとして送られてくる
        if bytes.is_empty() {
            continue;
        }

        let index = photos.len();
        photos.push(Attachment::new(
            file_name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| format!("photo{}.jpg", index)),
            mime_type
                .filter(|m| m.starts_with("image/"))
                .unwrap_or_else(|| DEFAULT_PHOTO_MIME.to_string()),
            bytes.to_vec(),
        ));
    }

    Ok(JobOrderForm { request, photos })
}

fn malformed(error: MultipartError) -> JobOrderFormRejection {
    JobOrderFormRejection::malformed(error.status(), error.body_text())
}

/// `POST /api/job-orders`
pub async fn submit_job_order(
    State(state): State<Arc<AppState>>,
    form: JobOrderForm,
) -> Response {
    let JobOrderForm {
        mut request,
        photos,
    } = form;
    let photo_url = request.photo_url.take();

    let job_order = match JobOrder::new(request.into(), photo_url, photos) {
        Ok(job_order) => job_order,
        Err(e) => {
            tracing::warn!("Rejected job order: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(SubmissionResponseDto::error(
                    INVALID_REQUEST_MESSAGE,
                    e.to_string(),
                )),
            )
                .into_response();
        }
    };

    match state.submit_job_order_usecase.execute(job_order).await {
        Ok(()) => (
            StatusCode::OK,
            Json(SubmissionResponseDto::success(SUCCESS_MESSAGE)),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(error: SubmitJobOrderError) -> Response {
    let (status, body) = match error {
        SubmitJobOrderError::Relay(RelayError::Upstream { status, body }) => {
            let status = StatusCode::from_u16(status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (
                status,
                SubmissionResponseDto::error(DELIVERY_FAILED_MESSAGE, body),
            )
        }
        SubmitJobOrderError::Relay(other) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            SubmissionResponseDto::error(DELIVERY_FAILED_MESSAGE, other.to_string()),
        ),
        SubmitJobOrderError::Internal(details) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            SubmissionResponseDto::error(INTERNAL_ERROR_MESSAGE, details),
        ),
    };

    (status, Json(body)).into_response()
}

/// Response for a panic caught by `CatchPanicLayer`
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("Handler panicked: {}", details);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(SubmissionResponseDto::error(INTERNAL_ERROR_MESSAGE, details)),
    )
        .into_response()
}
