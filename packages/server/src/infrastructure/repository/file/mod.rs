//! File-backed VisitorCounter 実装
//!
//! 訪問者数を `{"count": <整数>}` という JSON ファイルに永続化します。
//!
//! ## 不変条件
//!
//! - `increment` は内部の Mutex で直列化され、更新が失われない
//! - ファイルへの書き込みが成功してからメモリ上の値を更新する
//!   （永続化された値がメモリ上の値より遅れることはない）
//! - 起動時にファイルが存在しない・壊れている場合は 0 から始め、次の書き込みで上書きする

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::domain::{CounterError, VisitorCount, VisitorCounter};

/// 永続化レコード
#[derive(Debug, Serialize, Deserialize)]
struct CounterRecord {
    count: u64,
}

/// JSON ファイルに永続化される訪問者カウンタ
pub struct FileVisitorCounter {
    path: PathBuf,
    /// 書き込みの直列化と、永続化済みの値
    persisted: Mutex<u64>,
    /// `current()` 用のスナップショット
    snapshot: AtomicU64,
}

impl FileVisitorCounter {
    /// 永続化ファイルから現在値を読み込んでカウンタを作成
    ///
    /// 読み込みやパースに失敗しても起動は止めず、0 から始めます。
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let count = read_count(&path).await;
        tracing::info!(
            "Visitor counter loaded from '{}': {}",
            path.display(),
            count
        );

        Self {
            path,
            persisted: Mutex::new(count),
            snapshot: AtomicU64::new(count),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl VisitorCounter for FileVisitorCounter {
    async fn increment(&self) -> Result<VisitorCount, CounterError> {
        let mut persisted = self.persisted.lock().await;
        let next = VisitorCount::new(*persisted).next();

        write_count(&self.path, next.value()).await?;

        *persisted = next.value();
        self.snapshot.store(next.value(), Ordering::Release);
        tracing::debug!("Visitor count incremented to {}", next.value());

        Ok(next)
    }

    fn current(&self) -> VisitorCount {
        VisitorCount::new(self.snapshot.load(Ordering::Acquire))
    }
}

async fn read_count(path: &Path) -> u64 {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(
                "No visitor counter file at '{}', starting from 0",
                path.display()
            );
            return 0;
        }
        Err(e) => {
            tracing::warn!(
                "Failed to read visitor counter file '{}': {}. Starting from 0",
                path.display(),
                e
            );
            return 0;
        }
    };

    match serde_json::from_str::<CounterRecord>(&content) {
        Ok(record) => record.count,
        Err(e) => {
            tracing::warn!(
                "Corrupt visitor counter file '{}': {}. Starting from 0",
                path.display(),
                e
            );
            0
        }
    }
}

/// 一時ファイルに書いてから rename し、途中で落ちても壊れたファイルを残さない
async fn write_count(path: &Path, count: u64) -> Result<(), CounterError> {
    let json = serde_json::to_vec(&CounterRecord { count })?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");
    let tmp_path = PathBuf::from(tmp_path);

    tokio::fs::write(&tmp_path, &json).await?;
    tokio::fs::rename(&tmp_path, path).await?;

    Ok(())
}
