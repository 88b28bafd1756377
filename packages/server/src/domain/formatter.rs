//! Message Formatter
//!
//! ジョブオーダーを通知用の文字列に整形する純粋関数。
//! 時刻は呼び出し側から渡されるため、同じ入力からは常に同じ出力が得られます。

use chrono::{DateTime, FixedOffset};
use jobrelay_shared::time::format_request_time;

use super::job_order::{JobOrderFields, NOT_SPECIFIED, OTHER_UNIT_SENTINEL};

/// 整形済みの通知メッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedMessage(String);

impl FormattedMessage {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// ジョブオーダーを通知メッセージに整形
///
/// 1 行目が受付時刻入りのヘッダ、空行を挟んで各フィールドが
/// 固定の順序・ラベル・記号で 1 行ずつ続きます。
///
/// 入力値は HTML エスケープせずにそのまま埋め込みます。送信時の
/// `parse_mode` は HTML のため、`<` や `&` を含む入力は Telegram 側で
/// 400 として拒否され、その結果が送信元に返ります。
pub fn format_job_order(
    fields: &JobOrderFields,
    requested_at: &DateTime<FixedOffset>,
) -> FormattedMessage {
    let lines = [
        format!("Job Order Request ({})", format_request_time(requested_at)),
        String::new(),
        format!("👤 Name: {}", or_not_specified(&fields.name)),
        format!("📞 Contact Number: {}", or_not_specified(&fields.contact)),
        format!("📝 Status: {}", or_not_specified(&fields.status)),
        format!("📺 Unit: {}", unit_value(fields)),
        format!("📍 Location: {}", or_not_specified(&fields.location)),
        format!("⚠️ Issue: {}", or_not_specified(&fields.issue)),
    ];

    FormattedMessage(lines.join("\n"))
}

/// "Other..." が選ばれていれば自由入力、そうでなければ選択値
fn unit_value(fields: &JobOrderFields) -> &str {
    if fields.unit == OTHER_UNIT_SENTINEL {
        or_not_specified(&fields.other_unit)
    } else {
        or_not_specified(&fields.unit)
    }
}

fn or_not_specified(value: &str) -> &str {
    match value.trim() {
        "" => NOT_SPECIFIED,
        trimmed => trimmed,
    }
}
