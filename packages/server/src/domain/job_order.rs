//! ジョブオーダー（修理依頼）エンティティ
//!
//! 1 リクエストの間だけ存在する一時的なモデルです。
//! 境界（UI 層）で検証されたものだけがユースケースに渡されます。

use super::{error::DomainError, value_object::Attachment};

/// 1 件の依頼に添付できる写真の最大枚数（Telegram のアルバム上限）
pub const MAX_ATTACHMENTS: usize = 10;

/// 未入力のフィールドに表示する文言
pub const NOT_SPECIFIED: &str = "Not specified";

/// `unit` がこの値のとき、`other_unit` の自由入力を機器名として使う
pub const OTHER_UNIT_SENTINEL: &str = "Other...";

/// フォームの入力値（未送信のフィールドは空文字列）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobOrderFields {
    pub name: String,
    pub contact: String,
    pub status: String,
    pub unit: String,
    pub other_unit: String,
    pub location: String,
    pub issue: String,
}

/// 検証済みのジョブオーダー
#[derive(Debug, Clone)]
pub struct JobOrder {
    fields: JobOrderFields,
    photo_url: Option<String>,
    attachments: Vec<Attachment>,
}

impl JobOrder {
    /// 添付枚数を検証してジョブオーダーを生成
    ///
    /// # Errors
    ///
    /// 添付が [`MAX_ATTACHMENTS`] 枚を超える場合 `DomainError::TooManyAttachments`
    pub fn new(
        fields: JobOrderFields,
        photo_url: Option<String>,
        attachments: Vec<Attachment>,
    ) -> Result<Self, DomainError> {
        if attachments.len() > MAX_ATTACHMENTS {
            return Err(DomainError::TooManyAttachments {
                count: attachments.len(),
                max: MAX_ATTACHMENTS,
            });
        }

        let photo_url = photo_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        Ok(Self {
            fields,
            photo_url,
            attachments,
        })
    }

    pub fn fields(&self) -> &JobOrderFields {
        &self.fields
    }

    pub fn photo_url(&self) -> Option<&str> {
        self.photo_url.as_deref()
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// フィールド・写真 URL・添付に分解
    pub fn into_parts(self) -> (JobOrderFields, Option<String>, Vec<Attachment>) {
        (self.fields, self.photo_url, self.attachments)
    }
}
