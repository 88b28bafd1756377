//! 配送経路の選択
//!
//! 添付枚数に応じて、テキスト・写真 1 枚・アルバムのいずれか 1 つの
//! 配送方法を決めます。

use super::{formatter::FormattedMessage, value_object::Attachment};

/// 写真の指定方法
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    /// バイナリをアップロードする（multipart）
    Upload(Attachment),
    /// 公開 URL を渡して API 側に取得させる（JSON）
    Url(String),
}

/// メッセージング API に対する 1 回分の配送
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// 添付なし: テキストメッセージ
    Text { text: FormattedMessage },
    /// 添付 1 枚（または写真 URL）: キャプション付きの写真
    Photo {
        caption: FormattedMessage,
        photo: PhotoSource,
    },
    /// 添付 2 枚以上: 先頭の写真だけにキャプションを付けたアルバム
    Album {
        caption: FormattedMessage,
        photos: Vec<Attachment>,
    },
}

impl Delivery {
    /// 添付枚数から配送方法を選ぶ
    ///
    /// 添付が無く写真 URL だけが指定されている場合は URL 指定の写真送信になります。
    pub fn route(
        message: FormattedMessage,
        photo_url: Option<String>,
        mut attachments: Vec<Attachment>,
    ) -> Self {
        match attachments.len() {
            0 => match photo_url {
                Some(url) => Self::Photo {
                    caption: message,
                    photo: PhotoSource::Url(url),
                },
                None => Self::Text { text: message },
            },
            1 => Self::Photo {
                caption: message,
                photo: PhotoSource::Upload(attachments.remove(0)),
            },
            _ => Self::Album {
                caption: message,
                photos: attachments,
            },
        }
    }

    /// ログ用の配送方法名
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Photo { .. } => "photo",
            Self::Album { .. } => "album",
        }
    }
}
