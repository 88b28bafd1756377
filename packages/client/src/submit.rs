//! Job order submission over HTTP.

use std::path::{Path, PathBuf};

use clap::Args;
use jobrelay_server::{infrastructure::dto::http::SubmissionResponseDto, ui::PHOTO_FIELD};
use reqwest::multipart::{Form, Part};

use crate::{
    domain::{api_url, check_photo_count, mime_for_path},
    error::ClientError,
};

const JOB_ORDERS_PATH: &str = "/api/job-orders";

/// Job order fields and photos collected from the command line
#[derive(Args, Debug, Clone, Default)]
pub struct JobOrderDraft {
    /// Requester name
    #[arg(long)]
    pub name: Option<String>,

    /// Contact number
    #[arg(long)]
    pub contact: Option<String>,

    /// Requester status
    #[arg(long)]
    pub status: Option<String>,

    /// Unit ("Other..." uses --other-unit)
    #[arg(long)]
    pub unit: Option<String>,

    /// Free-text unit used when --unit is "Other..."
    #[arg(long)]
    pub other_unit: Option<String>,

    /// Location
    #[arg(long)]
    pub location: Option<String>,

    /// Issue description
    #[arg(long)]
    pub issue: Option<String>,

    /// Public photo URL, used when no photo file is attached
    #[arg(long)]
    pub photo_url: Option<String>,

    /// Photo file to attach (repeatable, up to 10)
    #[arg(long = "photo")]
    pub photos: Vec<PathBuf>,
}

impl JobOrderDraft {
    fn text_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("name", &self.name),
            ("contact", &self.contact),
            ("status", &self.status),
            ("unit", &self.unit),
            ("otherUnit", &self.other_unit),
            ("location", &self.location),
            ("issue", &self.issue),
            ("photoUrl", &self.photo_url),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
        .collect()
    }
}

async fn photo_part(path: &Path) -> Result<Part, ClientError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ClientError::ReadPhoto {
            path: path.to_path_buf(),
            source,
        })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo.jpg".to_string());
    Ok(Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime_for_path(path))?)
}

/// Build the multipart form posted to the relay
pub async fn build_form(draft: &JobOrderDraft) -> Result<Form, ClientError> {
    check_photo_count(draft.photos.len())?;

    let mut form = Form::new();
    for (name, value) in draft.text_fields() {
        form = form.text(name, value.to_string());
    }
    for path in &draft.photos {
        form = form.part(PHOTO_FIELD, photo_part(path).await?);
    }
    Ok(form)
}

/// Submit a job order to the relay
///
/// # Errors
///
/// * `ClientError::TooManyPhotos` / `ClientError::ReadPhoto` before anything is sent
/// * `ClientError::Http` on transport failures
/// * `ClientError::Rejected` when the relay answers with a non-success status
pub async fn submit_job_order(
    client: &reqwest::Client,
    base_url: &str,
    draft: &JobOrderDraft,
) -> Result<SubmissionResponseDto, ClientError> {
    let form = build_form(draft).await?;
    let url = api_url(base_url, JOB_ORDERS_PATH);
    tracing::info!(
        "Submitting job order to {} with {} photo(s)",
        url,
        draft.photos.len()
    );

    let response = client.post(&url).multipart(form).send().await?;
    let status = response.status();

    if !status.is_success() {
        // プロキシなどが返す JSON 以外のエラー本文もそのまま伝える
        let text = response.text().await.unwrap_or_default();
        return Err(match serde_json::from_str::<SubmissionResponseDto>(&text) {
            Ok(body) => ClientError::Rejected {
                status: status.as_u16(),
                message: body.message,
                details: body.details,
            },
            Err(_) => ClientError::Rejected {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
                details: Some(text).filter(|t| !t.trim().is_empty()),
            },
        });
    }
    Ok(response.json().await?)
}
