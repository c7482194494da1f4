//! 預測與庫存推演結果模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 預測期長度（天）
pub const FORECAST_HORIZON_DAYS: u32 = 360;

/// 單日銷售預測值
///
/// 預測列屬於可整批重建的衍生快取（先刪後寫），不配置事件ID：
/// 對相同輸入重跑必須產生完全相同的列。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// 標準 SKU
    pub sku: String,

    /// 銷售帳戶
    pub account: String,

    /// 未來日期（嚴格晚於該序列最末歷史日）
    pub date: NaiveDate,

    /// 預測數量（恆 ≥ 0）
    pub predicted_units: Decimal,
}

impl ForecastPoint {
    /// 創建新的預測點（負值一律壓至 0）
    pub fn new(sku: String, account: String, date: NaiveDate, predicted_units: Decimal) -> Self {
        Self {
            sku,
            account,
            date,
            predicted_units: predicted_units.max(Decimal::ZERO),
        }
    }
}

/// 單日剩餘庫存推演值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryProjectionPoint {
    /// 標準 SKU
    pub sku: String,

    /// 未來日期
    pub date: NaiveDate,

    /// 推演剩餘庫存（恆 ≥ 0）
    pub remaining_units: Decimal,
}

impl InventoryProjectionPoint {
    /// 創建新的庫存推演點（負值一律壓至 0）
    pub fn new(sku: String, date: NaiveDate, remaining_units: Decimal) -> Self {
        Self {
            sku,
            date,
            remaining_units: remaining_units.max(Decimal::ZERO),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_point_clamps_negative() {
        let point = ForecastPoint::new(
            "ABC123".to_string(),
            "Braza".to_string(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            Decimal::from(-3),
        );

        assert_eq!(point.predicted_units, Decimal::ZERO);
    }

    #[test]
    fn test_projection_point_clamps_negative() {
        let point = InventoryProjectionPoint::new(
            "ABC123".to_string(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            Decimal::from(-1),
        );

        assert_eq!(point.remaining_units, Decimal::ZERO);
    }

    #[test]
    fn test_horizon_length() {
        assert_eq!(FORECAST_HORIZON_DAYS, 360);
    }
}
