//! 預測儲存庫介面
//!
//! 核心管線唯一的持久化接縫：銷售歷史與庫存快照由外部匯入層寫入，
//! 預測列由計算層以先刪後寫方式置換。所有讀取一律回傳日期遞增的列。

use chrono::NaiveDate;
use forecast_core::{ForecastPoint, Result, SalesEvent, SeriesKey, StockReading};
use rust_decimal::Decimal;

/// 預測儲存庫
///
/// 同步介面：核心為單執行緒批次管線，阻塞 I/O 由實作自行處理。
pub trait ForecastRepository {
    /// 追加銷售列（歷史累積，不覆蓋既有列）
    fn record_sales(&mut self, events: &[SalesEvent]) -> Result<()>;

    /// 整批取代庫存快照（舊快照全數作廢）
    fn replace_stock(&mut self, readings: &[StockReading]) -> Result<()>;

    /// 列出既有銷售資料中不重複的 (帳戶, SKU) 組合
    fn sales_keys(&self) -> Result<Vec<SeriesKey>>;

    /// 讀取歷史銷售 (日期, 數量)，可選帳戶過濾，日期遞增
    fn read_history(&self, sku: &str, account: Option<&str>) -> Result<Vec<(NaiveDate, Decimal)>>;

    /// 讀取既存預測 (日期, 預測數量)，可選帳戶過濾，日期遞增
    fn read_forecast(&self, sku: &str, account: Option<&str>)
        -> Result<Vec<(NaiveDate, Decimal)>>;

    /// 讀取該 SKU 最新一筆庫存快照 (日期, 在庫數量)
    fn read_stock(&self, sku: &str) -> Result<Option<(NaiveDate, Decimal)>>;

    /// 刪除該 (SKU, 帳戶) 既存的全部預測列
    fn delete_forecast(&mut self, sku: &str, account: &str) -> Result<()>;

    /// 寫入預測列
    fn write_forecast(&mut self, rows: &[ForecastPoint]) -> Result<()>;

    /// 以刪除+寫入整批置換該 (SKU, 帳戶) 的預測列
    ///
    /// 預設實作為先刪後寫。交易式儲存應覆寫為原子操作：寫入失敗時
    /// 必須保留置換前的既存列，不可停在已刪未寫的中間狀態。
    fn replace_forecast(&mut self, sku: &str, account: &str, rows: &[ForecastPoint]) -> Result<()> {
        self.delete_forecast(sku, account)?;
        self.write_forecast(rows)
    }
}
