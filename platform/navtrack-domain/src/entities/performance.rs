use crate::value_objects::daily_record::DailyRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ANNUALIZATION_FACTOR: f64 = 252.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerfConfig {
    /// Trading periods per year used to scale daily statistics.
    pub annualization_factor: f64,
}

impl Default for PerfConfig {
    fn default() -> Self {
        Self {
            annualization_factor: DEFAULT_ANNUALIZATION_FACTOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub observations: usize,
    pub total_return: f64,
    pub annualized_return: f64,
    pub annualized_volatility: f64,
    pub sharpe: f64,
    pub max_drawdown: f64,
}

/// Output of [`compute_perf`]. Every series has one entry per input record,
/// aligned with `dates`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceReport {
    pub dates: Vec<NaiveDate>,
    pub returns: Vec<f64>,
    pub nav: Vec<f64>,
    pub drawdown: Vec<f64>,
    pub summary: SummaryStatistics,
}

impl PerformanceReport {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Turns a daily equity/cashflow history into cashflow-adjusted returns, a NAV
/// curve starting at 1.0, its drawdown series and the summary statistics.
///
/// The input is copied and sorted by date, so callers may pass records in any
/// order. Degenerate numbers (zero prior equity, non-finite inputs) propagate
/// as NaN/inf; the only guard is the Sharpe ratio, which is NaN when
/// volatility is not strictly positive.
pub fn compute_perf(records: &[DailyRecord], config: &PerfConfig) -> PerformanceReport {
    let mut records = records.to_vec();
    records.sort_by_key(|record| record.date);

    let dates: Vec<NaiveDate> = records.iter().map(|record| record.date).collect();
    let returns = daily_returns(&records);
    let nav = nav_curve(&returns);
    let drawdown = drawdown_series(&nav);

    let factor = config.annualization_factor;
    let observations = records.len();
    let final_nav = nav.last().copied().unwrap_or(1.0);
    let total_return = final_nav - 1.0;
    let annualized_return = final_nav.powf(factor / observations.max(1) as f64) - 1.0;
    let annualized_volatility = population_std(&returns) * factor.sqrt();
    let sharpe = if annualized_volatility > 0.0 {
        annualized_return / annualized_volatility
    } else {
        f64::NAN
    };

    let summary = SummaryStatistics {
        start: dates.first().copied(),
        end: dates.last().copied(),
        observations,
        total_return,
        annualized_return,
        annualized_volatility,
        sharpe,
        max_drawdown: max_drawdown(&drawdown),
    };

    PerformanceReport {
        dates,
        returns,
        nav,
        drawdown,
        summary,
    }
}

/// Cashflow-adjusted daily returns. The first entry is 0 because it has no
/// prior equity to compare against. A 0/0 day (no prior equity and no net
/// change) also counts as 0; division by zero with a real change stays ±inf.
pub fn daily_returns(records: &[DailyRecord]) -> Vec<f64> {
    let mut returns = Vec::with_capacity(records.len());
    if records.is_empty() {
        return returns;
    }
    returns.push(0.0);
    for pair in records.windows(2) {
        let prev = pair[0].equity;
        let curr = &pair[1];
        let ret = (curr.equity - prev - curr.net_cashflow()) / prev;
        returns.push(if ret.is_nan() { 0.0 } else { ret });
    }
    returns
}

pub fn nav_curve(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(1.0f64, |nav, ret| {
            *nav *= 1.0 + ret;
            Some(*nav)
        })
        .collect()
}

/// Decline of each NAV value from the running peak, as a non-positive fraction.
pub fn drawdown_series(nav: &[f64]) -> Vec<f64> {
    let mut peak: Option<f64> = None;
    nav.iter()
        .map(|value| {
            // NaN never becomes the peak; later values keep measuring against
            // the last real high.
            if !value.is_nan() && peak.map_or(true, |p| *value > p) {
                peak = Some(*value);
            }
            match peak {
                Some(p) => value / p - 1.0,
                None => f64::NAN,
            }
        })
        .collect()
}

/// Most negative drawdown; 0 for an empty series.
pub fn max_drawdown(drawdown: &[f64]) -> f64 {
    if drawdown.is_empty() {
        return 0.0;
    }
    drawdown
        .iter()
        .copied()
        .filter(|value| !value.is_nan())
        .fold(None, |acc: Option<f64>, value| {
            Some(acc.map_or(value, |current| current.min(value)))
        })
        .unwrap_or(f64::NAN)
}

/// Standard deviation with divisor `n`.
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values
        .iter()
        .map(|value| {
            let diff = value - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;
    var.sqrt()
}
