//! Message formatting utilities for client display.

use jobrelay_server::infrastructure::dto::http::{SubmissionResponseDto, SubmissionStatus};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a visitor count update
    ///
    /// # Arguments
    ///
    /// * `count` - The visitor count pushed by the relay
    /// * `received_at` - RFC 3339 timestamp of when the update arrived
    pub fn format_visitor_count(count: u64, received_at: &str) -> String {
        format!("[{}] visitors: {}", received_at, count)
    }

    /// Format the relay's answer to a submission
    pub fn format_submission(response: &SubmissionResponseDto) -> String {
        let marker = match response.status {
            SubmissionStatus::Success => "OK",
            SubmissionStatus::Error => "FAILED",
        };
        match &response.details {
            Some(details) => format!("{}: {} ({})", marker, response.message, details),
            None => format!("{}: {}", marker, response.message),
        }
    }

    /// Format a text frame that is not a known event
    pub fn format_raw_message(text: &str) -> String {
        format!("[raw] {}", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_visitor_count() {
        // テスト項目: 受信時刻と訪問者数が 1 行で表示される
        // given (前提条件):
        let received_at = "2025-08-12T22:18:00+09:00";

        // when (操作):
        let line = MessageFormatter::format_visitor_count(42, received_at);

        // then (期待する結果):
        assert_eq!(line, "[2025-08-12T22:18:00+09:00] visitors: 42");
    }

    #[test]
    fn test_format_failed_submission_includes_details() {
        // テスト項目: 失敗レスポンスは details を括弧書きで含む
        // given (前提条件):
        let response = SubmissionResponseDto::error("Failed to send message to Telegram", "bad request");

        // when (操作):
        let line = MessageFormatter::format_submission(&response);

        // then (期待する結果):
        assert_eq!(line, "FAILED: Failed to send message to Telegram (bad request)");
    }

    #[test]
    fn test_format_successful_submission() {
        // テスト項目: 成功レスポンスはメッセージのみ表示される
        // given (前提条件):
        let response = SubmissionResponseDto::success("Request sent");

        // when (操作):
        let line = MessageFormatter::format_submission(&response);

        // then (期待する結果):
        assert_eq!(line, "OK: Request sent");
    }
}
