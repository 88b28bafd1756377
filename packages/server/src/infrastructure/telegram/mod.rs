//! Telegram Bot API を使った Notifier 実装
//!
//! ## 責務
//!
//! - 配送方法（テキスト・写真・アルバム）ごとの API 呼び出し
//! - 写真を含む場合は multipart、テキストのみの場合は JSON で送信
//! - 成功以外のレスポンスを `RelayError::Upstream` に変換
//!
//! リトライは行いません。タイムアウトは `reqwest::Client` 側で設定します。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::{
    domain::{Attachment, Delivery, Notifier, PhotoSource, RelayError},
    infrastructure::dto::telegram::{
        InputMediaPhoto, PARSE_MODE_HTML, SendMessageRequest, SendPhotoUrlRequest,
    },
};

/// Telegram Bot API のデフォルトの URL
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Telegram Bot API クライアント
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// 既存の `reqwest::Client` から TelegramNotifier を作成
    pub fn new(
        client: reqwest::Client,
        api_base: impl Into<String>,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }

    /// リクエスト全体に制限時間を設けた TelegramNotifier を作成
    ///
    /// # Errors
    ///
    /// HTTP クライアントの初期化（TLS バックエンドなど）に失敗した場合
    pub fn with_timeout(
        api_base: impl Into<String>,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::new(client, api_base, bot_token, chat_id))
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.bot_token, method)
    }

    /// `sendMessage`: テキストのみ（JSON）
    async fn send_text(&self, text: &str) -> Result<(), RelayError> {
        let body = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
            parse_mode: PARSE_MODE_HTML,
        };

        let response = self
            .client
            .post(self.endpoint("sendMessage"))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        check_response("sendMessage", response).await
    }

    /// `sendPhoto`: 写真の URL を渡す（JSON）
    async fn send_photo_url(&self, caption: &str, url: &str) -> Result<(), RelayError> {
        let body = SendPhotoUrlRequest {
            chat_id: &self.chat_id,
            photo: url,
            caption,
            parse_mode: PARSE_MODE_HTML,
        };

        let response = self
            .client
            .post(self.endpoint("sendPhoto"))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        check_response("sendPhoto", response).await
    }

    /// `sendPhoto`: 写真をアップロード（multipart）
    async fn send_photo_upload(
        &self,
        caption: &str,
        attachment: Attachment,
    ) -> Result<(), RelayError> {
        let form = Form::new()
            .text("chat_id", self.chat_id.clone())
            .text("caption", caption.to_string())
            .text("parse_mode", PARSE_MODE_HTML)
            .part("photo", photo_part(attachment)?);

        let response = self
            .client
            .post(self.endpoint("sendPhoto"))
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        check_response("sendPhoto", response).await
    }

    /// `sendMediaGroup`: 複数の写真をまとめてアップロード（multipart）
    ///
    /// キャプションは先頭の写真にだけ付けます。
    async fn send_media_group(
        &self,
        caption: &str,
        photos: Vec<Attachment>,
    ) -> Result<(), RelayError> {
        let mut media = Vec::with_capacity(photos.len());
        let mut parts = Vec::with_capacity(photos.len());

        for (index, photo) in photos.into_iter().enumerate() {
            let part_name = format!("photo{}", index);
            let descriptor = InputMediaPhoto::attached(&part_name);
            media.push(if index == 0 {
                descriptor.with_caption(caption)
            } else {
                descriptor
            });
            parts.push((part_name, photo_part(photo)?));
        }

        let media_json = serde_json::to_string(&media)
            .map_err(|e| RelayError::InvalidRequest(e.to_string()))?;

        let form = parts.into_iter().fold(
            Form::new()
                .text("chat_id", self.chat_id.clone())
                .text("media", media_json),
            |form, (name, part)| form.part(name, part),
        );

        let response = self
            .client
            .post(self.endpoint("sendMediaGroup"))
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        check_response("sendMediaGroup", response).await
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn deliver(&self, delivery: Delivery) -> Result<(), RelayError> {
        match delivery {
            Delivery::Text { text } => self.send_text(text.as_str()).await,
            Delivery::Photo {
                caption,
                photo: PhotoSource::Url(url),
            } => self.send_photo_url(caption.as_str(), &url).await,
            Delivery::Photo {
                caption,
                photo: PhotoSource::Upload(attachment),
            } => self.send_photo_upload(caption.as_str(), attachment).await,
            Delivery::Album { caption, photos } => {
                self.send_media_group(caption.as_str(), photos).await
            }
        }
    }
}

fn photo_part(attachment: Attachment) -> Result<Part, RelayError> {
    let file_name = attachment.file_name().to_string();
    let mime_type = attachment.mime_type().to_string();
    Part::bytes(attachment.into_bytes())
        .file_name(file_name)
        .mime_str(&mime_type)
        .map_err(|e| RelayError::InvalidRequest(format!("invalid MIME type '{}': {}", mime_type, e)))
}

// URL にはボットトークンが含まれるため、エラーから取り除く
fn transport_error(error: reqwest::Error) -> RelayError {
    if error.is_timeout() {
        RelayError::Timeout
    } else {
        RelayError::Transport(error.without_url().to_string())
    }
}

async fn check_response(method: &str, response: reqwest::Response) -> Result<(), RelayError> {
    let status = response.status();
    if status.is_success() {
        tracing::debug!("Telegram {} succeeded with status {}", method, status);
        return Ok(());
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Failed to read Telegram error body: {}", e);
            String::new()
        }
    };
    tracing::error!("Telegram API error on {} ({}): {}", method, status, body);

    Err(RelayError::Upstream {
        status: status.as_u16(),
        body,
    })
}
