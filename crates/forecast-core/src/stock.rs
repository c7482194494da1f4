//! 庫存快照模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::sku::SkuToken;

/// 單筆在庫快照
///
/// 與銷售不同，庫存不累積歷史：每次匯入整批取代既有快照，
/// 僅最新一批有效。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockReading {
    /// 快照ID
    pub id: Uuid,

    /// 標準 SKU
    pub sku: String,

    /// 件數乘數（來自 SKU 標記）
    pub item_multiplier: u32,

    /// 在庫數量（允許小數）
    pub stock_units: Decimal,

    /// 快照日期
    pub date: NaiveDate,
}

impl StockReading {
    /// 創建新的庫存快照
    pub fn new(sku: String, item_multiplier: u32, stock_units: Decimal, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            sku,
            item_multiplier,
            stock_units,
            date,
        }
    }

    /// 由解析後的 SKU 標記創建快照
    ///
    /// 標準 SKU 缺失或為空字串時回傳 None（整列剔除）。
    pub fn from_token(token: &SkuToken, stock_units: Decimal, date: NaiveDate) -> Option<Self> {
        let sku = token.canonical.as_deref()?.trim();
        if sku.is_empty() {
            return None;
        }

        Some(Self::new(
            sku.to_string(),
            token.multiplier_or_zero(),
            stock_units,
            date,
        ))
    }
}
