use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One calendar month of hospital financials, from the
/// `hospital_financial_metrics` sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub year: i32,
    pub month: u32,
    pub date: Option<DateTime<Utc>>,
    pub total_revenue: f64,
    pub operating_expenses: f64,
    pub net_profit: f64,
    /// Fraction (0.18 = 18%); reports scale to percent.
    pub profit_margin: f64,
    /// Fraction, same convention as `profit_margin`.
    pub bed_occupancy_rate: f64,
    pub average_daily_census: f64,
}

impl FinancialRecord {
    /// Chronological sort key: the parsed date when present, otherwise the
    /// first of the record's `year`/`month` columns.
    pub fn sort_key(&self) -> NaiveDate {
        self.date
            .map(|d| d.date_naive())
            .or_else(|| NaiveDate::from_ymd_opt(self.year, self.month, 1))
            .unwrap_or(NaiveDate::MIN)
    }

    /// `(year, month)` for the trend label, preferring the parsed date.
    pub fn label_period(&self) -> (i32, u32) {
        match self.date {
            Some(d) => (d.year(), d.month()),
            None => (self.year, self.month),
        }
    }
}
