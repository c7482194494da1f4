//! 庫存消耗推演

use chrono::NaiveDate;
use forecast_core::InventoryProjectionPoint;
use rust_decimal::Decimal;

/// 庫存消耗推演器
pub struct DepletionSimulator;

impl DepletionSimulator {
    /// 以起始庫存對照逐日預測需求，推演每日剩餘庫存
    ///
    /// 第 0 天帶出起始庫存本身，其後每日扣除當日需求；扣到不足時
    /// 壓在 0 並維持在 0（需求已在上游保證非負，庫存只減不增）。
    /// 空需求序列回傳空推演（視為無資料，不是錯誤），
    /// 輸出長度恆等於需求序列長度。
    pub fn simulate(
        sku: &str,
        starting_stock: Decimal,
        demand: &[Decimal],
        start_date: NaiveDate,
    ) -> Vec<InventoryProjectionPoint> {
        let mut projection = Vec::with_capacity(demand.len());
        let mut remaining = starting_stock.max(Decimal::ZERO);
        let mut current = start_date;

        for (i, &daily_demand) in demand.iter().enumerate() {
            if i > 0 {
                if remaining - daily_demand >= Decimal::ZERO {
                    remaining -= daily_demand;
                } else {
                    remaining = Decimal::ZERO;
                }
            }

            projection.push(InventoryProjectionPoint::new(
                sku.to_string(),
                current,
                remaining,
            ));
            current = current.succ_opt().expect("日期溢出");
        }

        projection
    }
}
