//! 時間序列重建
//!
//! 將逐筆 (鍵, 日期, 數值) 列彙總為每鍵一條密集日序列：
//! 同 (鍵, 日期) 的數值相加，範圍內缺漏的日曆天補 0。

use std::collections::BTreeMap;

use chrono::NaiveDate;
use forecast_core::{DailySeries, SeriesKey};
use rust_decimal::Decimal;

/// 時間序列重建器
pub struct TimeSeriesBuilder;

impl TimeSeriesBuilder {
    /// 逐鍵重建：每鍵使用自身觀測範圍 [min_date, max_date]
    pub fn build(rows: &[(SeriesKey, NaiveDate, Decimal)]) -> BTreeMap<SeriesKey, DailySeries> {
        Self::group_by_key(rows)
            .into_iter()
            .map(|(key, points)| {
                let start = *points.keys().next().expect("分組不可能為空");
                let end = *points.keys().next_back().expect("分組不可能為空");
                (key, Self::densify(&points, start, end))
            })
            .collect()
    }

    /// 全域範圍重建：所有鍵共用全域 [min_date, max_date]
    ///
    /// 銷售管線必須使用此模式，讓每條 (帳戶, SKU) 序列落在同一條
    /// 日曆軸上（自身觀測範圍外補 0），下游預測與關聯才能對齊。
    pub fn build_global(
        rows: &[(SeriesKey, NaiveDate, Decimal)],
    ) -> BTreeMap<SeriesKey, DailySeries> {
        let Some(start) = rows.iter().map(|(_, date, _)| *date).min() else {
            return BTreeMap::new();
        };
        let end = rows
            .iter()
            .map(|(_, date, _)| *date)
            .max()
            .expect("非空輸入必有最大日期");

        Self::group_by_key(rows)
            .into_iter()
            .map(|(key, points)| (key, Self::densify(&points, start, end)))
            .collect()
    }

    /// 按鍵分組並彙總同日數值
    fn group_by_key(
        rows: &[(SeriesKey, NaiveDate, Decimal)],
    ) -> BTreeMap<SeriesKey, BTreeMap<NaiveDate, Decimal>> {
        let mut grouped: BTreeMap<SeriesKey, BTreeMap<NaiveDate, Decimal>> = BTreeMap::new();
        for (key, date, value) in rows {
            *grouped
                .entry(key.clone())
                .or_default()
                .entry(*date)
                .or_insert(Decimal::ZERO) += *value;
        }
        grouped
    }

    /// 將彙總點攤平為 [start, end] 間每日一值的密集序列
    fn densify(points: &BTreeMap<NaiveDate, Decimal>, start: NaiveDate, end: NaiveDate) -> DailySeries {
        let mut values = Vec::new();
        let mut current = start;

        while current <= end {
            values.push(points.get(&current).copied().unwrap_or(Decimal::ZERO));
            current = current.succ_opt().expect("日期溢出");
        }

        DailySeries::new(start, values)
    }
}
