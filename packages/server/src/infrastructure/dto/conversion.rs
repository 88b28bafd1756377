//! Conversion logic between DTOs and domain models.

use crate::domain::{JobOrderFields, VisitorCount};
use crate::infrastructure::dto::{http, websocket};

// ========================================
// DTO → Domain Model
// ========================================

impl From<http::JobOrderRequestDto> for JobOrderFields {
    fn from(dto: http::JobOrderRequestDto) -> Self {
        Self {
            name: dto.name,
            contact: dto.contact,
            status: dto.status,
            unit: dto.unit,
            other_unit: dto.other_unit,
            location: dto.location,
            issue: dto.issue,
        }
    }
}

// ========================================
// Domain Model → DTO
// ========================================

impl From<VisitorCount> for http::VisitorCountDto {
    fn from(count: VisitorCount) -> Self {
        Self {
            count: count.value(),
        }
    }
}

impl From<VisitorCount> for websocket::VisitorCountMessage {
    fn from(count: VisitorCount) -> Self {
        Self {
            r#type: websocket::MessageType::VisitorCount,
            count: count.value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_order_request_to_fields() {
        // テスト項目: リクエスト DTO がフォームの入力値に変換される
        // given (前提条件):
        let dto = http::JobOrderRequestDto {
            name: "Jane Doe".to_string(),
            unit: "Other...".to_string(),
            other_unit: "Projector".to_string(),
            photo_url: Some("https://example.com/a.jpg".to_string()),
            ..Default::default()
        };

        // when (操作):
        let fields: JobOrderFields = dto.into();

        // then (期待する結果):
        assert_eq!(fields.name, "Jane Doe");
        assert_eq!(fields.unit, "Other...");
        assert_eq!(fields.other_unit, "Projector");
        assert_eq!(fields.contact, "");
    }

    #[test]
    fn test_visitor_count_to_dtos() {
        // テスト項目: 訪問者数が HTTP / WebSocket の DTO に変換される
        // given (前提条件):
        let count = VisitorCount::new(5);

        // when (操作):
        let http_dto: http::VisitorCountDto = count.into();
        let ws_dto: websocket::VisitorCountMessage = count.into();

        // then (期待する結果):
        assert_eq!(http_dto.count, 5);
        assert_eq!(ws_dto.count, 5);
        assert_eq!(ws_dto.r#type, websocket::MessageType::VisitorCount);
    }
}
