//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, FixedOffset, Local, TimeZone};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Current wall-clock time in the server's local offset
    fn now(&self) -> DateTime<FixedOffset>;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: DateTime<FixedOffset>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time
    pub fn new(fixed_time: DateTime<FixedOffset>) -> Self {
        Self { fixed_time }
    }

    /// Create a fixed clock from calendar fields at the given UTC offset (hours)
    ///
    /// Returns `None` when the fields do not form a valid date/time.
    pub fn from_ymd_hm(
        offset_hours: i32,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
    ) -> Option<Self> {
        let offset = FixedOffset::east_opt(offset_hours * 3600)?;
        let fixed_time = offset
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()?;
        Some(Self::new(fixed_time))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.fixed_time
    }
}

/// Render a time as `<Month> <Day>, <Year> <Hour>:<Minute> <AM|PM>`
///
/// e.g. `August 12, 2025 10:18 PM`
pub fn format_request_time<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    time.format("%B %-d, %Y %-I:%M %p").to_string()
}

/// Current local time in RFC 3339 format, seconds precision
pub fn now_local_rfc3339() -> String {
    Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_increasing_times() {
        // テスト項目: SystemClock が呼び出すたびに単調増加する時刻を返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let time1 = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let time2 = clock.now();

        // then (期待する結果):
        assert!(time2 >= time1);
    }

    #[test]
    fn test_fixed_clock_returns_fixed_time() {
        // テスト項目: FixedClock が何度呼ばれても固定された時刻を返す
        // given (前提条件):
        let clock = FixedClock::from_ymd_hm(9, 2025, 8, 12, 22, 18).unwrap();

        // when (操作):
        let time1 = clock.now();
        let time2 = clock.now();

        // then (期待する結果):
        assert_eq!(time1, time2);
        assert_eq!(time1.to_rfc3339(), "2025-08-12T22:18:00+09:00");
    }

    #[test]
    fn test_fixed_clock_rejects_invalid_fields() {
        // テスト項目: 存在しない日付では FixedClock を作れない
        // given (前提条件):

        // when (操作):
        let clock = FixedClock::from_ymd_hm(0, 2025, 2, 30, 10, 0);

        // then (期待する結果):
        assert!(clock.is_none());
    }

    #[test]
    fn test_format_request_time_evening() {
        // テスト項目: 午後の時刻が 12 時間表記 + PM で整形される
        // given (前提条件):
        let clock = FixedClock::from_ymd_hm(0, 2025, 8, 12, 22, 18).unwrap();

        // when (操作):
        let result = format_request_time(&clock.now());

        // then (期待する結果):
        assert_eq!(result, "August 12, 2025 10:18 PM");
    }

    #[test]
    fn test_format_request_time_morning_pads_minutes() {
        // テスト項目: 午前の時刻で分が 2 桁に揃えられ、日と時は 0 埋めされない
        // given (前提条件):
        let clock = FixedClock::from_ymd_hm(0, 2024, 1, 5, 9, 7).unwrap();

        // when (操作):
        let result = format_request_time(&clock.now());

        // then (期待する結果):
        assert_eq!(result, "January 5, 2024 9:07 AM");
    }

    #[test]
    fn test_format_request_time_midnight_and_noon() {
        // テスト項目: 0 時は 12 AM、12 時は 12 PM と表記される
        // given (前提条件):
        let midnight = FixedClock::from_ymd_hm(0, 2025, 3, 1, 0, 30).unwrap();
        let noon = FixedClock::from_ymd_hm(0, 2025, 3, 1, 12, 0).unwrap();

        // when (操作):
        let midnight_str = format_request_time(&midnight.now());
        let noon_str = format_request_time(&noon.now());

        // then (期待する結果):
        assert_eq!(midnight_str, "March 1, 2025 12:30 AM");
        assert_eq!(noon_str, "March 1, 2025 12:00 PM");
    }
}
