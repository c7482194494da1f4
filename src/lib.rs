//! # Forecast
//!
//! 零售銷售預測與庫存消耗推演引擎：SKU 標記解析、時間序列重建、
//! 二次趨勢預測與逐日庫存消耗推演。

pub use forecast_calc::{
    DepletionSimulator, ForecastRunResult, ForecastRunner, ForecastWarning, KeyOutcome,
    QuadraticTrend, TimeSeriesBuilder, WarningSeverity,
};
pub use forecast_core::*;
pub use forecast_store::{ForecastRepository, InMemoryRepository};
