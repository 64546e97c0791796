//! 时间工具函数 — 业务时区转换
//!
//! 所有日期/时间字符串解析统一在 API handler 层完成，
//! 预订引擎只接收 `NaiveDate` / `NaiveTime`。

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 解析时间字符串 (HH:MM or HH:MM:SS)
pub fn parse_time(time: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .map_err(|_| AppError::validation(format!("Invalid time format: {}", time)))
}

/// 今天的日期 (业务时区)
pub fn today(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_time_accepts_both_precisions() {
        assert_eq!(
            parse_time("19:00").unwrap(),
            NaiveTime::from_hms_opt(19, 0, 0).unwrap()
        );
        assert_eq!(
            parse_time("19:00:30").unwrap(),
            NaiveTime::from_hms_opt(19, 0, 30).unwrap()
        );
        assert!(parse_time("25:00").is_err());
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("2024-06-01").is_ok());
        assert!(parse_date("01/06/2024").is_err());
    }
}
