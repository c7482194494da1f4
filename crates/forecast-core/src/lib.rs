//! # Forecast Core
//!
//! 核心資料模型與類型定義

pub mod projection;
pub mod sales;
pub mod series;
pub mod sku;
pub mod stock;

// Re-export 主要類型
pub use projection::{ForecastPoint, InventoryProjectionPoint, FORECAST_HORIZON_DAYS};
pub use sales::SalesEvent;
pub use series::{DailySeries, SeriesKey};
pub use sku::SkuToken;
pub use stock::StockReading;

/// 預測引擎錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("SKU 標記格式異常: {0}")]
    MalformedSkuToken(String),

    #[error("歷史資料不足: {0}")]
    InsufficientHistory(String),

    #[error("儲存庫讀取失敗: {0}")]
    RepositoryReadFailure(String),

    #[error("儲存庫寫入失敗: {0}")]
    RepositoryWriteFailure(String),

    #[error("無效的日期: {0}")]
    InvalidDate(String),

    #[error("計算錯誤: {0}")]
    CalculationError(String),

    #[error("其他錯誤: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ForecastError>;
