//! # Forecast Calculation Engine
//!
//! 核心預測計算引擎

pub mod builder;
pub mod depletion;
pub mod runner;
pub mod trend;

// Re-export 主要類型
pub use builder::TimeSeriesBuilder;
pub use depletion::DepletionSimulator;
pub use runner::ForecastRunner;
pub use trend::QuadraticTrend;

use serde::Serialize;

/// 批次預測結果
#[derive(Debug, Clone, Serialize)]
pub struct ForecastRunResult {
    /// 逐鍵執行結果
    pub outcomes: Vec<KeyOutcome>,

    /// 警告信息
    pub warnings: Vec<ForecastWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl ForecastRunResult {
    /// 創建空的批次結果
    pub fn empty() -> Self {
        Self {
            outcomes: Vec::new(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: ForecastWarning) {
        self.warnings.push(warning);
    }

    /// 成功鍵數量
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// 失敗鍵數量
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// 單一 (帳戶, SKU) 鍵的執行結果
#[derive(Debug, Clone, Serialize)]
pub struct KeyOutcome {
    /// 銷售帳戶
    pub account: String,

    /// 標準 SKU
    pub sku: String,

    /// 寫入的預測列數（失敗時為 0）
    pub rows_written: usize,

    /// 失敗原因（成功時為 None）
    pub failure: Option<String>,
}

impl KeyOutcome {
    /// 創建成功結果
    pub fn success(account: String, sku: String, rows_written: usize) -> Self {
        Self {
            account,
            sku,
            rows_written,
            failure: None,
        }
    }

    /// 創建失敗結果
    pub fn failed(account: String, sku: String, message: String) -> Self {
        Self {
            account,
            sku,
            rows_written: 0,
            failure: Some(message),
        }
    }

    /// 檢查是否成功
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// 預測警告
#[derive(Debug, Clone, Serialize)]
pub struct ForecastWarning {
    pub sku: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl ForecastWarning {
    pub fn new(sku: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            sku,
            message,
            severity,
        }
    }

    pub fn info(sku: String, message: String) -> Self {
        Self::new(sku, message, WarningSeverity::Info)
    }

    pub fn warning(sku: String, message: String) -> Self {
        Self::new(sku, message, WarningSeverity::Warning)
    }

    pub fn error(sku: String, message: String) -> Self {
        Self::new(sku, message, WarningSeverity::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}
