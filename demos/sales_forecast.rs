//! 銷售預測示例

use chrono::{Duration, NaiveDate};
use forecast_calc::ForecastRunner;
use forecast_core::{SalesEvent, SkuToken};
use forecast_store::{ForecastRepository, InMemoryRepository};
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== 銷售預測示例 ===\n");

    // 解析混雜乘數的原始 SKU 欄位
    for raw in ["0-ABC123", "3-ABC123", "ABC123"] {
        let token = SkuToken::parse(Some(raw));
        println!(
            "SKU 標記 {:10} → 乘數 {:?}, 標準 SKU {:?}",
            raw, token.multiplier, token.canonical
        );
    }

    // 準備 14 天銷售事件（兩個帳戶共用同一 SKU）
    let start = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
    let mut events = Vec::new();
    for i in 0..14 {
        let date = start + Duration::days(i);
        events.push(SalesEvent::new(
            "Braza".to_string(),
            "ABC123".to_string(),
            date,
            Decimal::from(5 + (i % 3)),
            0,
        ));
        events.push(SalesEvent::new(
            "Gab".to_string(),
            "ABC123".to_string(),
            date,
            Decimal::from(2),
            0,
        ));
    }

    let mut runner = ForecastRunner::new(InMemoryRepository::new());
    let rows = runner.ingest_sales(&events)?;
    println!("\n已匯入銷售：{} 列（全域日曆軸補零後）", rows);

    let result = runner.forecast_all()?;
    println!("\n批次結果（JSON）:");
    println!("{}", serde_json::to_string_pretty(&result)?);

    let forecast = runner.repo().read_forecast("ABC123", Some("Braza"))?;
    println!("\nBraza / ABC123 預測 {} 天，前 5 天：", forecast.len());
    for (date, predicted) in forecast.iter().take(5) {
        println!("  {} → {:.2}", date, predicted);
    }

    Ok(())
}
