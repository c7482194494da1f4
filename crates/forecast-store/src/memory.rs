//! 記憶體儲存庫實作

use std::collections::BTreeSet;

use chrono::NaiveDate;
use forecast_core::{ForecastPoint, Result, SalesEvent, SeriesKey, StockReading};
use rust_decimal::Decimal;

use crate::repository::ForecastRepository;

/// 記憶體儲存庫
///
/// 供測試、示例與不需要資料庫的嵌入場景使用。
/// `replace_forecast` 沿用預設的先刪後寫，在單執行緒下即為原子。
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    sales: Vec<SalesEvent>,
    stock: Vec<StockReading>,
    forecasts: Vec<ForecastPoint>,
}

impl InMemoryRepository {
    /// 創建空的儲存庫
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存銷售列數
    pub fn sales_len(&self) -> usize {
        self.sales.len()
    }

    /// 既存庫存快照列數
    pub fn stock_len(&self) -> usize {
        self.stock.len()
    }

    /// 既存預測列
    pub fn forecasts(&self) -> &[ForecastPoint] {
        &self.forecasts
    }
}

impl ForecastRepository for InMemoryRepository {
    fn record_sales(&mut self, events: &[SalesEvent]) -> Result<()> {
        self.sales.extend_from_slice(events);
        Ok(())
    }

    fn replace_stock(&mut self, readings: &[StockReading]) -> Result<()> {
        tracing::debug!("庫存快照整批取代：{} → {} 筆", self.stock.len(), readings.len());
        self.stock = readings.to_vec();
        Ok(())
    }

    fn sales_keys(&self) -> Result<Vec<SeriesKey>> {
        let keys: BTreeSet<SeriesKey> = self
            .sales
            .iter()
            .map(|event| SeriesKey::new(event.account.clone(), event.sku.clone()))
            .collect();
        Ok(keys.into_iter().collect())
    }

    fn read_history(&self, sku: &str, account: Option<&str>) -> Result<Vec<(NaiveDate, Decimal)>> {
        let mut rows: Vec<(NaiveDate, Decimal)> = self
            .sales
            .iter()
            .filter(|event| event.sku == sku)
            .filter(|event| account.map_or(true, |wanted| event.account == wanted))
            .map(|event| (event.date, event.units))
            .collect();
        rows.sort_by_key(|&(date, _)| date);
        Ok(rows)
    }

    fn read_forecast(
        &self,
        sku: &str,
        account: Option<&str>,
    ) -> Result<Vec<(NaiveDate, Decimal)>> {
        let mut rows: Vec<(NaiveDate, Decimal)> = self
            .forecasts
            .iter()
            .filter(|point| point.sku == sku)
            .filter(|point| account.map_or(true, |wanted| point.account == wanted))
            .map(|point| (point.date, point.predicted_units))
            .collect();
        rows.sort_by_key(|&(date, _)| date);
        Ok(rows)
    }

    fn read_stock(&self, sku: &str) -> Result<Option<(NaiveDate, Decimal)>> {
        Ok(self
            .stock
            .iter()
            .filter(|reading| reading.sku == sku)
            .max_by_key(|reading| reading.date)
            .map(|reading| (reading.date, reading.stock_units)))
    }

    fn delete_forecast(&mut self, sku: &str, account: &str) -> Result<()> {
        self.forecasts
            .retain(|point| !(point.sku == sku && point.account == account));
        Ok(())
    }

    fn write_forecast(&mut self, rows: &[ForecastPoint]) -> Result<()> {
        self.forecasts.extend_from_slice(rows);
        Ok(())
    }
}
