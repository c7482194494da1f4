//! 二次趨勢模型
//!
//! 對密集日序列配適 value ≈ β₀ + β₁·t + β₂·t²（普通最小平方法，
//! 含截距、無正則化），再自序列末端向未來投影。

use forecast_core::{DailySeries, FORECAST_HORIZON_DAYS};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 高斯消去的奇異判定閾值
const PIVOT_EPSILON: f64 = 1e-9;

/// 二次趨勢模型（最小平方法配適結果）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticTrend {
    /// 常數項
    pub beta0: f64,

    /// 一次項係數
    pub beta1: f64,

    /// 二次項係數
    pub beta2: f64,
}

impl QuadraticTrend {
    /// 對序列配適模型
    ///
    /// 每個點取日索引 t = 0, 1, 2, …，以 [1, t, t²] 為特徵解正規方程。
    /// 退化輸入（不足 3 天、正規矩陣奇異）退回常數模型（β₀ = 平均值），
    /// 不視為錯誤；全零序列因此配適出水平零線。
    pub fn fit(series: &DailySeries) -> Self {
        let values: Vec<f64> = series
            .values()
            .iter()
            .map(|v| v.to_f64().unwrap_or(0.0))
            .collect();

        Self::fit_values(&values)
    }

    fn fit_values(values: &[f64]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self::constant(0.0);
        }

        let mean = values.iter().sum::<f64>() / n as f64;
        if n < 3 {
            return Self::constant(mean);
        }

        // 正規方程 A·β = b 的冪和：s[k] = Σtᵏ（k = 0..4）
        let mut s = [0.0f64; 5];
        let mut b = [0.0f64; 3];

        for (i, &y) in values.iter().enumerate() {
            let t = i as f64;
            let mut power = 1.0;
            for sum in s.iter_mut() {
                *sum += power;
                power *= t;
            }
            b[0] += y;
            b[1] += t * y;
            b[2] += t * t * y;
        }

        let a = [[s[0], s[1], s[2]], [s[1], s[2], s[3]], [s[2], s[3], s[4]]];

        match solve_3x3(a, b) {
            Some([beta0, beta1, beta2]) => Self { beta0, beta1, beta2 },
            None => Self::constant(mean),
        }
    }

    /// 常數模型（退化情形的後備）
    fn constant(mean: f64) -> Self {
        Self {
            beta0: mean,
            beta1: 0.0,
            beta2: 0.0,
        }
    }

    /// 以日索引求預測值
    pub fn predict(&self, t: f64) -> f64 {
        self.beta0 + self.beta1 * t + self.beta2 * t * t
    }

    /// 自序列最末日的次日起投影 360 天，負值一律壓至 0
    pub fn project(&self, series: &DailySeries) -> Vec<Decimal> {
        self.project_days(series.len(), FORECAST_HORIZON_DAYS as usize)
    }

    /// 自日索引 first_t 起投影 horizon 天
    pub fn project_days(&self, first_t: usize, horizon: usize) -> Vec<Decimal> {
        (first_t..first_t + horizon)
            .map(|t| {
                let predicted = self.predict(t as f64).max(0.0);
                Decimal::try_from(predicted).unwrap_or(Decimal::ZERO)
            })
            .collect()
    }
}

/// 解 3×3 線性方程組（部分樞軸高斯消去），奇異時回傳 None
fn solve_3x3(mut a: [[f64; 3]; 3], mut b: [f64; 3]) -> Option<[f64; 3]> {
    for col in 0..3 {
        // 選該行絕對值最大的樞軸列
        let pivot_row = (col..3).max_by(|&x, &y| a[x][col].abs().total_cmp(&a[y][col].abs()))?;
        if a[pivot_row][col].abs() < PIVOT_EPSILON {
            return None;
        }

        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in (col + 1)..3 {
            let factor = a[row][col] / a[col][col];
            for k in col..3 {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    // 回代
    let mut x = [0.0f64; 3];
    for row in (0..3).rev() {
        let mut sum = b[row];
        for k in (row + 1)..3 {
            sum -= a[row][k] * x[k];
        }
        x[row] = sum / a[row][row];
    }

    Some(x)
}
