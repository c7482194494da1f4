//! 密集日序列模型

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 序列鍵：(帳戶, SKU)
///
/// 帳戶為 None 時代表跨帳戶彙總的序列。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeriesKey {
    /// 銷售帳戶
    pub account: Option<String>,

    /// 標準 SKU
    pub sku: String,
}

impl SeriesKey {
    /// 創建帳戶範圍的序列鍵
    pub fn new(account: String, sku: String) -> Self {
        Self {
            account: Some(account),
            sku,
        }
    }

    /// 創建跨帳戶（彙總）序列鍵
    pub fn global(sku: String) -> Self {
        Self { account: None, sku }
    }
}

/// 密集日序列
///
/// 自起始日起每個連續日曆天恰好一個值，無缺口。密集性由構造保證：
/// 第 i 個值對應 `start_date + i` 天，相鄰兩點必然恰差一天。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    /// 起始日
    start_date: NaiveDate,

    /// 每日數值（索引即日偏移）
    values: Vec<Decimal>,
}

impl DailySeries {
    /// 創建新的密集日序列
    pub fn new(start_date: NaiveDate, values: Vec<Decimal>) -> Self {
        Self { start_date, values }
    }

    /// 起始日
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// 最末日（空序列回傳 None）
    pub fn last_date(&self) -> Option<NaiveDate> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.date_at(self.values.len() - 1))
        }
    }

    /// 第 i 天對應的日期
    pub fn date_at(&self, index: usize) -> NaiveDate {
        self.start_date + Duration::days(index as i64)
    }

    /// 序列長度（天數）
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 檢查序列是否為空
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 每日數值
    pub fn values(&self) -> &[Decimal] {
        &self.values
    }

    /// 以 (日期, 數值) 形式迭代
    pub fn points(&self) -> impl Iterator<Item = (NaiveDate, Decimal)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (self.date_at(i), *v))
    }

    /// 數值總和
    pub fn total(&self) -> Decimal {
        self.values.iter().copied().sum()
    }
}
