//! 値オブジェクト

use std::fmt;

use uuid::Uuid;

/// リアルタイム接続を識別する ID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// 新しい接続 ID を生成（UUID v4）
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 訪問者数
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VisitorCount(u64);

impl VisitorCount {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// 1 増やした値を返す（u64 の上限で飽和）
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// 添付写真（バイナリ + メタデータ）
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    file_name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: String, mime_type: String, bytes: Vec<u8>) -> Self {
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

// バイナリ本体はログに出さない
impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
