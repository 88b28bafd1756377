//! Repository 実装
//!
//! - `file`: JSON ファイルに訪問者数を永続化する実装

pub mod file;

pub use file::FileVisitorCounter;
