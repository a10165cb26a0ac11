use crate::entities::performance::SummaryStatistics;
use serde::Serialize;

/// Token shown wherever a statistic is not a number.
pub const NAN_TOKEN: &str = "nan";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub metric: &'static str,
    pub value: String,
}

/// Human-facing rendering of the summary statistics, one row per metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplaySummary {
    pub period: String,
    pub total_return: String,
    pub annualized_return: String,
    pub annualized_volatility: String,
    pub sharpe: String,
    pub max_drawdown: String,
}

impl DisplaySummary {
    pub fn from_summary(summary: &SummaryStatistics) -> Self {
        Self {
            period: period_label(summary),
            total_return: format_pct(summary.total_return),
            annualized_return: format_pct(summary.annualized_return),
            annualized_volatility: format_pct(summary.annualized_volatility),
            sharpe: format_ratio(summary.sharpe),
            max_drawdown: format_pct(summary.max_drawdown),
        }
    }

    pub fn rows(&self) -> Vec<DisplayRow> {
        [
            ("Period", &self.period),
            ("Total Return", &self.total_return),
            ("Annualized Return", &self.annualized_return),
            ("Annualized Volatility", &self.annualized_volatility),
            ("Sharpe", &self.sharpe),
            ("Max Drawdown", &self.max_drawdown),
        ]
        .into_iter()
        .map(|(metric, value)| DisplayRow {
            metric,
            value: value.clone(),
        })
        .collect()
    }
}

pub fn period_label(summary: &SummaryStatistics) -> String {
    match (summary.start, summary.end) {
        (Some(start), Some(end)) => format!("{start} → {end}"),
        _ => "-".to_string(),
    }
}

pub fn format_pct(value: f64) -> String {
    match non_finite_token(value) {
        Some(token) => token.to_string(),
        None => format!("{:.2}%", value * 100.0),
    }
}

pub fn format_ratio(value: f64) -> String {
    match non_finite_token(value) {
        Some(token) => token.to_string(),
        None => format!("{value:.2}"),
    }
}

fn non_finite_token(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some(NAN_TOKEN)
    } else if value == f64::INFINITY {
        Some("inf")
    } else if value == f64::NEG_INFINITY {
        Some("-inf")
    } else {
        None
    }
}
