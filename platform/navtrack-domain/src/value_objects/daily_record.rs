use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// End-of-day account snapshot with the external cashflows booked that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub equity: f64,
    pub deposit: f64,
    pub withdrawal: f64,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, equity: f64, deposit: f64, withdrawal: f64) -> Self {
        Self {
            date,
            equity,
            deposit,
            withdrawal,
        }
    }

    /// Net external cash moved into the account (deposits minus withdrawals).
    pub fn net_cashflow(&self) -> f64 {
        self.deposit - self.withdrawal
    }
}
