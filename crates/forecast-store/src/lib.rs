//! # Forecast Store
//!
//! 預測儲存庫介面與記憶體實作

pub mod memory;
pub mod repository;

// Re-export 主要類型
pub use memory::InMemoryRepository;
pub use repository::ForecastRepository;
