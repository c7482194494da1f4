//! 庫存消耗推演示例

use chrono::{Duration, NaiveDate};
use forecast_calc::ForecastRunner;
use forecast_core::{SalesEvent, StockReading};
use forecast_store::InMemoryRepository;
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== 庫存消耗推演示例 ===\n");

    // 21 天平穩銷售歷史：每日 10 件
    let start = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
    let events: Vec<SalesEvent> = (0..21)
        .map(|i| {
            SalesEvent::new(
                "Braza".to_string(),
                "ABC123".to_string(),
                start + Duration::days(i),
                Decimal::from(10),
                0,
            )
        })
        .collect();

    let mut runner = ForecastRunner::new(InMemoryRepository::new());
    runner.ingest_sales(&events)?;
    runner.forecast_sku("ABC123", None)?;

    // 今日庫存快照：300 件
    let snapshot_date = start + Duration::days(21);
    runner.ingest_stock(
        &[StockReading::new(
            "ABC123".to_string(),
            0,
            Decimal::from(300),
            snapshot_date,
        )],
        snapshot_date,
    )?;

    let projection = runner.project_stock("ABC123")?;
    println!("推演 {} 天，前 5 天：", projection.len());
    for point in projection.iter().take(5) {
        println!("  {} → 剩餘 {:.2}", point.date, point.remaining_units);
    }

    match projection.iter().find(|point| point.remaining_units == Decimal::ZERO) {
        Some(point) => println!("\n預計 {} 售罄", point.date),
        None => println!("\n推演期內不會售罄"),
    }

    Ok(())
}
