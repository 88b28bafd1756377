//! Telegram Bot API request bodies.
//!
//! Only the fields this relay sends are modelled.

use serde::Serialize;

/// Rendering mode sent with every text and caption
pub const PARSE_MODE_HTML: &str = "HTML";

/// `sendMessage` (JSON)
#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
    pub parse_mode: &'a str,
}

/// `sendPhoto` with a photo URL (JSON)
#[derive(Debug, Serialize)]
pub struct SendPhotoUrlRequest<'a> {
    pub chat_id: &'a str,
    pub photo: &'a str,
    pub caption: &'a str,
    pub parse_mode: &'a str,
}

/// One entry of the `media` field of `sendMediaGroup`
#[derive(Debug, Serialize)]
pub struct InputMediaPhoto {
    pub r#type: &'static str,
    /// `attach://<part name>` reference to a multipart file part
    pub media: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
}

impl InputMediaPhoto {
    pub fn attached(part_name: &str) -> Self {
        Self {
            r#type: "photo",
            media: format!("attach://{}", part_name),
            caption: None,
            parse_mode: None,
        }
    }

    pub fn with_caption(mut self, caption: &str) -> Self {
        self.caption = Some(caption.to_string());
        self.parse_mode = Some(PARSE_MODE_HTML);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncaptioned_media_omits_caption_fields() {
        // テスト項目: キャプションなしのメディアには caption / parse_mode が含まれない
        // given (前提条件):
        let media = InputMediaPhoto::attached("photo1");

        // when (操作):
        let json = serde_json::to_value(&media).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            serde_json::json!({"type": "photo", "media": "attach://photo1"})
        );
    }

    #[test]
    fn test_captioned_media_sets_parse_mode() {
        // テスト項目: キャプション付きのメディアには parse_mode も付く
        // given (前提条件):
        let media = InputMediaPhoto::attached("photo0").with_caption("hello");

        // when (操作):
        let json = serde_json::to_value(&media).unwrap();

        // then (期待する結果):
        assert_eq!(json["caption"], "hello");
        assert_eq!(json["parse_mode"], "HTML");
    }
}
