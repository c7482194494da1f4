//! 集成測試

use chrono::{Duration, NaiveDate};
use forecast_calc::ForecastRunner;
use forecast_core::{ForecastPoint, SalesEvent, SkuToken, StockReading, FORECAST_HORIZON_DAYS};
use forecast_store::{ForecastRepository, InMemoryRepository};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).unwrap()
}

fn flat_sales(account: &str, sku: &str, start: NaiveDate, days: i64, per_day: i64) -> Vec<SalesEvent> {
    (0..days)
        .map(|i| {
            SalesEvent::new(
                account.to_string(),
                sku.to_string(),
                start + Duration::days(i),
                Decimal::from(per_day),
                0,
            )
        })
        .collect()
}

#[test]
fn test_flat_history_forecasts_flat_line() {
    // 場景：連續 7 天每日賣 5 件
    // 平穩序列的二次配適 t 與 t² 係數趨近 0，未來 360 天預測應貼近 5

    // 1. 匯入銷售
    let mut runner = ForecastRunner::new(InMemoryRepository::new());
    runner
        .ingest_sales(&flat_sales("Braza", "ABC123", date(10, 1), 7, 5))
        .unwrap();

    // 2. 產生預測
    runner.forecast_sku("ABC123", None).unwrap();

    // 3. 驗證結果
    let forecast = runner.repo().read_forecast("ABC123", Some("Braza")).unwrap();
    assert_eq!(forecast.len(), FORECAST_HORIZON_DAYS as usize);

    // 自最末歷史日（10/7）次日起連續 360 天
    assert_eq!(forecast[0].0, date(10, 8));
    assert!(forecast
        .windows(2)
        .all(|w| w[1].0 - w[0].0 == Duration::days(1)));

    for &(_, predicted) in &forecast {
        let predicted = predicted.to_f64().unwrap();
        assert!(
            (predicted - 5.0).abs() < 0.01,
            "預測值 {} 偏離 5",
            predicted
        );
        assert!(predicted >= 0.0);
    }
}

#[test]
fn test_sku_token_normalization_rules() {
    // 乘數恰為 0/1 保留，大於 1 或非數字壓回 0，無連字號視為標準形
    let token = SkuToken::parse(Some("0-ABC123"));
    assert_eq!(token.multiplier, Some(0));
    assert_eq!(token.canonical.as_deref(), Some("ABC123"));

    let token = SkuToken::parse(Some("3-ABC123"));
    assert_eq!(token.multiplier, Some(0));
    assert_eq!(token.canonical.as_deref(), Some("ABC123"));

    let token = SkuToken::parse(Some("ABC123"));
    assert_eq!(token.multiplier, None);
    assert_eq!(token.canonical.as_deref(), Some("ABC123"));
}

#[test]
fn test_gaps_filled_through_ingestion() {
    // 場景：10/1 與 10/4 各一筆，中間兩天無觀測
    let mut runner = ForecastRunner::new(InMemoryRepository::new());
    let events = vec![
        SalesEvent::new(
            "Braza".to_string(),
            "ABC123".to_string(),
            date(10, 1),
            Decimal::from(5),
            0,
        ),
        SalesEvent::new(
            "Braza".to_string(),
            "ABC123".to_string(),
            date(10, 4),
            Decimal::from(3),
            0,
        ),
    ];
    runner.ingest_sales(&events).unwrap();

    // 匯入後歷史為 4 天密集序列，缺日補 0
    let history = runner.repo().read_history("ABC123", Some("Braza")).unwrap();
    assert_eq!(history.len(), 4);
    assert_eq!(history[1], (date(10, 2), Decimal::ZERO));
    assert_eq!(history[2], (date(10, 3), Decimal::ZERO));
}

#[test]
fn test_stock_depletion_end_to_end() {
    // 場景：起始庫存 100，既存預測每日 10 → 第 10 天歸零且不再回升

    // 1. 寫入平穩預測（自 11/1 起每日 10）
    let mut repo = InMemoryRepository::new();
    let forecast_start = date(11, 1);
    let rows: Vec<ForecastPoint> = (0..FORECAST_HORIZON_DAYS as i64)
        .map(|i| {
            ForecastPoint::new(
                "ABC123".to_string(),
                "Braza".to_string(),
                forecast_start + Duration::days(i),
                Decimal::from(10),
            )
        })
        .collect();
    repo.write_forecast(&rows).unwrap();

    // 2. 匯入庫存快照
    let mut runner = ForecastRunner::new(repo);
    runner
        .ingest_stock(
            &[StockReading::new(
                "ABC123".to_string(),
                0,
                Decimal::from(100),
                date(10, 31),
            )],
            date(10, 31),
        )
        .unwrap();

    // 3. 推演
    let projection = runner.project_stock("ABC123").unwrap();

    assert_eq!(projection.len(), FORECAST_HORIZON_DAYS as usize);
    assert_eq!(projection[0].remaining_units, Decimal::from(100));
    assert_eq!(projection[10].remaining_units, Decimal::ZERO);
    for point in &projection[10..] {
        assert_eq!(point.remaining_units, Decimal::ZERO);
    }

    // 需求非負下逐日不增
    for window in projection.windows(2) {
        assert!(window[1].remaining_units <= window[0].remaining_units);
    }
}

#[test]
fn test_sales_to_depletion_pipeline() {
    // 場景：平穩銷售 → 預測 → 快照 50 件 → 應在兩週內售罄

    let mut runner = ForecastRunner::new(InMemoryRepository::new());
    runner
        .ingest_sales(&flat_sales("Braza", "ABC123", date(10, 1), 14, 5))
        .unwrap();
    runner.forecast_sku("ABC123", None).unwrap();

    let snapshot_date = date(10, 15);
    runner
        .ingest_stock(
            &[StockReading::new(
                "ABC123".to_string(),
                0,
                Decimal::from(50),
                snapshot_date,
            )],
            snapshot_date,
        )
        .unwrap();

    let projection = runner.project_stock("ABC123").unwrap();
    assert_eq!(projection.len(), FORECAST_HORIZON_DAYS as usize);

    // 每日約 5 件、庫存 50：兩週內必然歸零
    let depleted = projection
        .iter()
        .position(|point| point.remaining_units == Decimal::ZERO)
        .expect("推演期內應售罄");
    assert!(depleted <= 14, "第 {} 天才售罄", depleted);

    for point in &projection {
        assert!(point.remaining_units >= Decimal::ZERO);
    }
}

#[test]
fn test_rerun_produces_identical_rows() {
    // 場景：同樣輸入重跑兩次，先刪後寫保證持久化列完全一致

    let mut runner = ForecastRunner::new(InMemoryRepository::new());
    runner
        .ingest_sales(&flat_sales("Braza", "ABC123", date(10, 1), 7, 5))
        .unwrap();
    runner
        .ingest_sales(&flat_sales("Gab", "XYZ999", date(10, 1), 7, 3))
        .unwrap();

    let first = runner.forecast_all().unwrap();
    assert_eq!(first.failed(), 0);
    let rows_after_first = runner.repo().forecasts().to_vec();
    assert_eq!(rows_after_first.len(), 2 * FORECAST_HORIZON_DAYS as usize);

    let second = runner.forecast_all().unwrap();
    assert_eq!(second.failed(), 0);

    assert_eq!(runner.repo().forecasts(), rows_after_first.as_slice());
}

#[test]
fn test_multi_account_batch_run() {
    // 場景：多帳戶多 SKU 批次，各鍵獨立產出各自的 360 列

    let mut runner = ForecastRunner::new(InMemoryRepository::new());
    let mut events = Vec::new();
    events.extend(flat_sales("Braza", "ABC123", date(10, 1), 7, 5));
    events.extend(flat_sales("Gab", "ABC123", date(10, 1), 7, 2));
    events.extend(flat_sales("Prodoo", "XYZ999", date(10, 3), 5, 8));
    runner.ingest_sales(&events).unwrap();

    let result = runner.forecast_all().unwrap();

    assert_eq!(result.outcomes.len(), 3);
    assert_eq!(result.succeeded(), 3);
    assert!(result.calculation_time_ms.is_some());

    for (account, sku) in [("Braza", "ABC123"), ("Gab", "ABC123"), ("Prodoo", "XYZ999")] {
        let forecast = runner.repo().read_forecast(sku, Some(account)).unwrap();
        assert_eq!(
            forecast.len(),
            FORECAST_HORIZON_DAYS as usize,
            "{}/{}",
            account,
            sku
        );
        assert!(forecast
            .iter()
            .all(|&(_, predicted)| predicted >= Decimal::ZERO));
    }
}
