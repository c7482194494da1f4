//! 批次預測執行器
//!
//! 串接儲存庫、時間序列重建、二次趨勢模型與庫存消耗推演，
//! 對多個 (帳戶, SKU) 鍵批次執行並收集逐鍵結果。

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{Duration, NaiveDate};
use forecast_core::{
    DailySeries, ForecastError, ForecastPoint, InventoryProjectionPoint, Result, SalesEvent,
    SeriesKey, StockReading, FORECAST_HORIZON_DAYS,
};
use forecast_store::ForecastRepository;
use rayon::prelude::*;
use rust_decimal::Decimal;

use crate::{
    DepletionSimulator, ForecastRunResult, ForecastWarning, KeyOutcome, QuadraticTrend,
    TimeSeriesBuilder,
};

/// 預測執行器
pub struct ForecastRunner<R: ForecastRepository> {
    /// 預測儲存庫
    repo: R,
}

impl<R: ForecastRepository> ForecastRunner<R> {
    /// 創建新的預測執行器
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// 獲取儲存庫引用
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// 取回儲存庫所有權
    pub fn into_repo(self) -> R {
        self.repo
    }

    /// 匯入銷售事件
    ///
    /// 先彙總（同 (帳戶, SKU, 日期) 的數量、總件數、乘數各自相加），
    /// 再以全域日曆軸重建密集序列（觀測範圍外補 0），最後逐日寫入
    /// 儲存庫。回傳寫入的列數。
    pub fn ingest_sales(&mut self, events: &[SalesEvent]) -> Result<usize> {
        if events.is_empty() {
            return Ok(0);
        }

        tracing::info!("開始匯入銷售事件：{} 筆", events.len());

        // Step 1: 攤平為 (鍵, 日期, 數量) 列
        let unit_rows: Vec<(SeriesKey, NaiveDate, Decimal)> = events
            .iter()
            .map(|event| {
                (
                    SeriesKey::new(event.account.clone(), event.sku.clone()),
                    event.date,
                    event.units,
                )
            })
            .collect();

        // 總件數與乘數沿用同一組鍵/日期逐欄彙總
        let mut extras: BTreeMap<(SeriesKey, NaiveDate), (Decimal, u32)> = BTreeMap::new();
        for event in events {
            let entry = extras
                .entry((
                    SeriesKey::new(event.account.clone(), event.sku.clone()),
                    event.date,
                ))
                .or_insert((Decimal::ZERO, 0));
            entry.0 += event.total_units;
            entry.1 += event.item_multiplier;
        }

        // Step 2: 全域日曆軸重建
        let series = TimeSeriesBuilder::build_global(&unit_rows);

        // Step 3: 攤平為逐日銷售列寫入儲存庫
        let mut dense_events = Vec::new();
        for (series_key, daily) in &series {
            let account = series_key.account.clone().unwrap_or_default();
            for (date, units) in daily.points() {
                let (total_units, multiplier) = extras
                    .get(&(series_key.clone(), date))
                    .copied()
                    .unwrap_or((Decimal::ZERO, 0));

                dense_events.push(
                    SalesEvent::new(
                        account.clone(),
                        series_key.sku.clone(),
                        date,
                        units,
                        multiplier,
                    )
                    .with_total_units(total_units),
                );
            }
        }

        self.repo.record_sales(&dense_events)?;
        tracing::info!("銷售匯入完成：寫入 {} 列", dense_events.len());
        Ok(dense_events.len())
    }

    /// 匯入庫存快照
    ///
    /// 同 SKU 的多列相加（同品項分散在多個帳戶檔案），
    /// 再整批取代既有快照。回傳快照中的 SKU 數。
    pub fn ingest_stock(
        &mut self,
        readings: &[StockReading],
        snapshot_date: NaiveDate,
    ) -> Result<usize> {
        tracing::info!("開始匯入庫存快照：{} 筆", readings.len());

        let mut merged: BTreeMap<String, (Decimal, u32)> = BTreeMap::new();
        for reading in readings {
            let entry = merged
                .entry(reading.sku.clone())
                .or_insert((Decimal::ZERO, 0));
            entry.0 += reading.stock_units;
            entry.1 += reading.item_multiplier;
        }

        let snapshot: Vec<StockReading> = merged
            .into_iter()
            .map(|(sku, (stock_units, multiplier))| {
                StockReading::new(sku, multiplier, stock_units, snapshot_date)
            })
            .collect();

        let count = snapshot.len();
        self.repo.replace_stock(&snapshot)?;
        tracing::info!("庫存快照已整批取代：{} 個 SKU", count);
        Ok(count)
    }

    /// 對單一 SKU（可選帳戶過濾）配適曲線並寫入 360 天預測
    ///
    /// 曲線對過濾範圍內的歷史（同日跨帳戶相加）配適一次；範圍內每個
    /// (帳戶, SKU) 組各得一段錨定在自身最末歷史日次日起的 360 列
    /// 未來日期，預測數值序列各組共用。寫入前先刪除該組既存預測列。
    pub fn forecast_sku(&mut self, sku: &str, account: Option<&str>) -> Result<Vec<ForecastPoint>> {
        // Step 1: 讀取歷史並重建密集序列
        let series = self.load_history_series(sku, account)?;

        // Step 2: 配適二次趨勢並投影
        let trend = QuadraticTrend::fit(&series);
        let magnitudes = trend.project(&series);
        tracing::debug!(
            "SKU {} 配適係數: β0={:.4} β1={:.4} β2={:.4}",
            sku,
            trend.beta0,
            trend.beta1,
            trend.beta2
        );

        // Step 3: 對每個符合過濾的 (帳戶, SKU) 組寫入各自錨定的預測段
        let accounts = self.matching_accounts(sku, account)?;
        let mut written = Vec::new();

        for group_account in accounts {
            let history = self.repo.read_history(sku, Some(&group_account))?;
            let Some(&(last_date, _)) = history.last() else {
                continue;
            };

            let rows = Self::anchor_rows(sku, &group_account, last_date, &magnitudes);
            self.repo.replace_forecast(sku, &group_account, &rows)?;
            written.extend(rows);
        }

        tracing::debug!("SKU {} 預測寫入完成：{} 列", sku, written.len());
        Ok(written)
    }

    /// 對儲存庫中每個 (帳戶, SKU) 組合批次執行預測
    ///
    /// 逐鍵配適與投影在執行緒池並行（純計算、無共享狀態），讀取與
    /// 寫入維持循序，確保單鍵的刪除+寫入不被交錯。單鍵失敗記入
    /// 逐鍵結果並繼續，不中斷其他鍵。
    pub fn forecast_all(&mut self) -> Result<ForecastRunResult> {
        let start_time = Instant::now();
        let keys = self.repo.sales_keys()?;
        tracing::info!("開始批次預測：{} 個 (帳戶, SKU) 組合", keys.len());

        let mut result = ForecastRunResult::empty();

        // Step 1: 循序讀取各鍵歷史
        let mut fit_inputs: Vec<(String, String, DailySeries)> = Vec::new();
        for series_key in keys {
            let Some(account) = series_key.account.clone() else {
                continue;
            };
            match self.load_history_series(&series_key.sku, Some(&account)) {
                Ok(series) => fit_inputs.push((account, series_key.sku, series)),
                Err(err) => {
                    tracing::warn!("鍵 ({}, {}) 略過: {}", account, series_key.sku, err);
                    result.add_warning(ForecastWarning::warning(
                        series_key.sku.clone(),
                        err.to_string(),
                    ));
                    result
                        .outcomes
                        .push(KeyOutcome::failed(account, series_key.sku, err.to_string()));
                }
            }
        }

        // Step 2: 並行配適與投影
        let fitted: Vec<(String, String, NaiveDate, Vec<Decimal>)> = fit_inputs
            .par_iter()
            .map(|(account, sku, series)| {
                let trend = QuadraticTrend::fit(series);
                let magnitudes = trend.project(series);
                let last_date = series.last_date().expect("非空歷史必有最末日");
                (account.clone(), sku.clone(), last_date, magnitudes)
            })
            .collect();

        // Step 3: 循序寫入（單鍵的刪除+寫入為臨界區）
        for (account, sku, last_date, magnitudes) in fitted {
            let rows = Self::anchor_rows(&sku, &account, last_date, &magnitudes);
            match self.repo.replace_forecast(&sku, &account, &rows) {
                Ok(()) => result
                    .outcomes
                    .push(KeyOutcome::success(account, sku, rows.len())),
                Err(err) => {
                    tracing::warn!("鍵 ({}, {}) 寫入失敗: {}", account, sku, err);
                    result.add_warning(ForecastWarning::error(sku.clone(), err.to_string()));
                    result
                        .outcomes
                        .push(KeyOutcome::failed(account, sku, err.to_string()));
                }
            }
        }

        result.calculation_time_ms = Some(start_time.elapsed().as_millis());
        tracing::info!(
            "批次預測完成：成功 {} 鍵，失敗 {} 鍵，耗時 {:?}",
            result.succeeded(),
            result.failed(),
            start_time.elapsed()
        );
        Ok(result)
    }

    /// 以最新庫存快照對照既存預測，推演未來 360 天剩餘庫存
    ///
    /// 推演視窗錨定在既存預測最早日期的次日（而非庫存快照日），
    /// 重跑無須重讀銷售歷史；該 SKU 跨帳戶的預測需求同日相加，
    /// 視窗外補 0。無既存預測時回傳空推演（不是錯誤）。
    pub fn project_stock(&self, sku: &str) -> Result<Vec<InventoryProjectionPoint>> {
        // Step 1: 最新庫存快照
        let Some((snapshot_date, stock_units)) = self.repo.read_stock(sku)? else {
            return Err(ForecastError::InsufficientHistory(format!(
                "SKU '{}' 不在庫存快照中",
                sku
            )));
        };

        // Step 2: 既存預測（跨帳戶同日相加）
        let forecast = self.repo.read_forecast(sku, None)?;
        if forecast.is_empty() {
            tracing::debug!("SKU {} 無既存預測，回傳空推演", sku);
            return Ok(Vec::new());
        }

        let mut demand_by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        for &(date, predicted) in &forecast {
            *demand_by_date.entry(date).or_insert(Decimal::ZERO) += predicted;
        }

        // Step 3: 錨定推演視窗並攤平需求向量（視窗外補 0）
        let earliest = *demand_by_date.keys().next().expect("非空預測必有最早日");
        let window_start = earliest + Duration::days(1);

        let demand: Vec<Decimal> = (0..FORECAST_HORIZON_DAYS as i64)
            .map(|offset| {
                let date = window_start + Duration::days(offset);
                demand_by_date.get(&date).copied().unwrap_or(Decimal::ZERO)
            })
            .collect();

        tracing::debug!(
            "SKU {} 庫存推演：快照日 {}，起始庫存 {}，視窗自 {} 起 {} 天",
            sku,
            snapshot_date,
            stock_units,
            window_start,
            FORECAST_HORIZON_DAYS
        );

        // Step 4: 逐日消耗推演
        Ok(DepletionSimulator::simulate(
            sku,
            stock_units,
            &demand,
            window_start,
        ))
    }

    /// 讀取歷史並重建密集序列（同日跨帳戶相加）
    fn load_history_series(&self, sku: &str, account: Option<&str>) -> Result<DailySeries> {
        let history = self.repo.read_history(sku, account)?;
        if history.is_empty() {
            return Err(ForecastError::InsufficientHistory(match account {
                Some(wanted) => format!("SKU '{}' 帳戶 '{}' 無歷史銷售", sku, wanted),
                None => format!("SKU '{}' 無歷史銷售", sku),
            }));
        }

        let series_key = SeriesKey::global(sku.to_string());
        let rows: Vec<(SeriesKey, NaiveDate, Decimal)> = history
            .iter()
            .map(|&(date, quantity)| (series_key.clone(), date, quantity))
            .collect();

        let mut series = TimeSeriesBuilder::build(&rows);
        Ok(series.remove(&series_key).expect("非空歷史必有序列"))
    }

    /// 過濾範圍內持有該 SKU 的帳戶清單
    fn matching_accounts(&self, sku: &str, account: Option<&str>) -> Result<Vec<String>> {
        let mut accounts: Vec<String> = self
            .repo
            .sales_keys()?
            .into_iter()
            .filter(|series_key| series_key.sku == sku)
            .filter_map(|series_key| series_key.account)
            .filter(|candidate| account.map_or(true, |wanted| candidate == wanted))
            .collect();
        accounts.sort();
        accounts.dedup();
        Ok(accounts)
    }

    /// 自最末歷史日的次日起產生 360 列預測
    fn anchor_rows(
        sku: &str,
        account: &str,
        last_date: NaiveDate,
        magnitudes: &[Decimal],
    ) -> Vec<ForecastPoint> {
        magnitudes
            .iter()
            .enumerate()
            .map(|(i, &predicted)| {
                ForecastPoint::new(
                    sku.to_string(),
                    account.to_string(),
                    last_date + Duration::days(i as i64 + 1),
                    predicted,
                )
            })
            .collect()
    }
}
