//! SKU 標記解析
//!
//! 原始 SKU 欄位混雜了乘數編碼（如 `"0-ABC123"`），解析後拆成
//! (乘數, 標準 SKU) 兩個欄位。

use serde::{Deserialize, Serialize};

/// 解析後的 SKU 標記
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuToken {
    /// 件數乘數（形狀不符或輸入缺失時為 None）
    pub multiplier: Option<u32>,

    /// 標準 SKU（輸入缺失時為 None）
    pub canonical: Option<String>,
}

impl SkuToken {
    /// 解析單一 SKU 標記
    ///
    /// 規則：
    /// - 缺失值 → `(None, None)`
    /// - 去空白後以連字號拆成恰好兩段 → 第一段為乘數候選，第二段為標準 SKU；
    ///   乘數大於 1 或無法解析為整數時一律壓回 0（上游編碼雜訊）
    /// - 其他形狀（0、1、3 段以上）→ `(None, 原字串去空白)`
    ///
    /// 不論輸入多畸形都不回傳錯誤，僅記錄診斷日誌。
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self {
                multiplier: None,
                canonical: None,
            };
        };

        let trimmed = raw.trim();
        let parts: Vec<&str> = trimmed.split('-').collect();

        if parts.len() == 2 {
            let head = parts[0].trim();
            let multiplier = match head.parse::<u32>() {
                Ok(m) if m > 1 => {
                    tracing::debug!("SKU 乘數 {} 大於 1，壓回 0: {}", m, trimmed);
                    0
                }
                Ok(m) => m,
                Err(_) => {
                    tracing::debug!("SKU 乘數無法解析，壓回 0: {}", trimmed);
                    0
                }
            };

            Self {
                multiplier: Some(multiplier),
                canonical: Some(parts[1].trim().to_string()),
            }
        } else {
            Self {
                multiplier: None,
                canonical: Some(trimmed.to_string()),
            }
        }
    }

    /// 解析以空白分隔的多標記欄位（一格可能塞了多個 SKU）
    pub fn parse_all(raw: &str) -> Vec<Self> {
        raw.split_whitespace()
            .map(|token| Self::parse(Some(token)))
            .collect()
    }

    /// 獲取乘數，未知時視為 0
    pub fn multiplier_or_zero(&self) -> u32 {
        self.multiplier.unwrap_or(0)
    }
}
