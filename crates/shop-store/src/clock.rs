//! 日期來源

use chrono::{NaiveDate, Utc};

/// 提供「今天」的日期（不含時間）
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// 系統時鐘（UTC 日期）
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// 固定日期（測試與重播使用）
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
