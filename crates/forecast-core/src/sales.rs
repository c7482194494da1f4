//! 銷售事件模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::sku::SkuToken;

/// 單筆觀測到的銷售
///
/// 相同 (帳戶, SKU, 日期) 的多筆事件為可加總關係。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesEvent {
    /// 事件ID
    pub id: Uuid,

    /// 銷售帳戶（通路）
    pub account: String,

    /// 標準 SKU
    pub sku: String,

    /// 銷售日期
    pub date: NaiveDate,

    /// 銷售數量
    pub units: Decimal,

    /// 件數乘數（來自 SKU 標記）
    pub item_multiplier: u32,

    /// 總件數 = 數量 × 乘數
    pub total_units: Decimal,
}

impl SalesEvent {
    /// 創建新的銷售事件（總件數由數量與乘數推導）
    pub fn new(
        account: String,
        sku: String,
        date: NaiveDate,
        units: Decimal,
        item_multiplier: u32,
    ) -> Self {
        let total_units = units * Decimal::from(item_multiplier);
        Self {
            id: Uuid::new_v4(),
            account,
            sku,
            date,
            units,
            item_multiplier,
            total_units,
        }
    }

    /// 由解析後的 SKU 標記創建事件
    ///
    /// 標準 SKU 缺失或為空字串時回傳 None（整列剔除）。
    pub fn from_token(
        account: String,
        token: &SkuToken,
        date: NaiveDate,
        units: Decimal,
    ) -> Option<Self> {
        let sku = token.canonical.as_deref()?.trim();
        if sku.is_empty() {
            return None;
        }

        Some(Self::new(
            account,
            sku.to_string(),
            date,
            units,
            token.multiplier_or_zero(),
        ))
    }

    /// 建構器模式：覆寫總件數
    ///
    /// 彙總多筆事件後，總件數為逐筆相加而非 數量 × 乘數。
    pub fn with_total_units(mut self, total_units: Decimal) -> Self {
        self.total_units = total_units;
        self
    }
}
