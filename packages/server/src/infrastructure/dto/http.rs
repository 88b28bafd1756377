//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

/// Job order fields as posted by the web form.
///
/// Every field is optional; missing fields become empty strings and are
/// rendered as "Not specified" by the formatter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobOrderRequestDto {
    pub name: String,
    pub contact: String,
    pub status: String,
    pub unit: String,
    pub other_unit: String,
    pub location: String,
    pub issue: String,
    pub photo_url: Option<String>,
}

impl JobOrderRequestDto {
    /// Set a text field by its form name. Unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "name" => self.name = value,
            "contact" => self.contact = value,
            "status" => self.status = value,
            "unit" => self.unit = value,
            "otherUnit" => self.other_unit = value,
            "location" => self.location = value,
            "issue" => self.issue = value,
            "photoUrl" => self.photo_url = Some(value),
            _ => tracing::debug!("Ignoring unknown form field '{}'", name),
        }
    }
}

/// Outcome of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Success,
    Error,
}

/// Response body of `POST /api/job-orders`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResponseDto {
    pub status: SubmissionStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<String>,
}

impl SubmissionResponseDto {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: SubmissionStatus::Success,
            message: message.into(),
            details: None,
        }
    }

    pub fn error(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            status: SubmissionStatus::Error,
            message: message.into(),
            details: Some(details.into()),
        }
    }
}

/// Response body of `GET /api/visitor-count`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorCountDto {
    pub count: u64,
}
