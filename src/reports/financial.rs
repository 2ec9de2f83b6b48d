//! Financial report: monthly trend line plus revenue by department.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::FinancialRecord;
use crate::reports::{in_report_years, month_label, pct_str};
use crate::store::HospitalData;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReport {
    pub monthly_trends: Vec<TrendPoint>,
    pub revenue_by_department: Vec<DepartmentRevenue>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub month: String,
    /// Millions.
    pub revenue: f64,
    /// Millions.
    pub profit: f64,
    pub profit_margin: f64,
    pub occupancy_rate: f64,
}

/// Field names stay snake_case — that is what the dashboard UI binds to.
#[derive(Debug, Serialize)]
pub struct DepartmentRevenue {
    pub department: String,
    /// Millions.
    pub revenue: f64,
    pub total_visits: usize,
    pub avg_revenue_per_visit: i64,
    pub revenue_percentage: String,
}

pub fn financial_report(data: &HospitalData) -> FinancialReport {
    FinancialReport {
        monthly_trends: monthly_trends(&data.financial),
        revenue_by_department: revenue_by_department(data),
    }
}

fn monthly_trends(records: &[FinancialRecord]) -> Vec<TrendPoint> {
    let mut sorted: Vec<&FinancialRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.sort_key());
    sorted
        .into_iter()
        .map(|r| {
            let (year, month) = r.label_period();
            TrendPoint {
                month: month_label(year, month),
                revenue: r.total_revenue / 1_000_000.0,
                profit: r.net_profit / 1_000_000.0,
                profit_margin: r.profit_margin * 100.0,
                occupancy_rate: r.bed_occupancy_rate * 100.0,
            }
        })
        .collect()
}

fn revenue_by_department(data: &HospitalData) -> Vec<DepartmentRevenue> {
    #[derive(Default)]
    struct Acc {
        revenue: f64,
        visits: usize,
    }

    let mut by_dept: HashMap<&str, Acc> = HashMap::new();
    for v in &data.visits {
        // No date or unparsable date → excluded.
        let Some(year) = v.year() else { continue };
        if !in_report_years(year) || !v.is_completed() {
            continue;
        }
        let acc = by_dept.entry(v.department_or_unknown()).or_default();
        acc.revenue += v.total_cost;
        acc.visits += 1;
    }

    let total_millions: f64 = by_dept.values().map(|a| a.revenue).sum::<f64>() / 1_000_000.0;

    let mut rows: Vec<DepartmentRevenue> = by_dept
        .into_iter()
        .map(|(dept, acc)| {
            let millions = acc.revenue / 1_000_000.0;
            DepartmentRevenue {
                department: dept.to_string(),
                revenue: millions,
                total_visits: acc.visits,
                avg_revenue_per_visit: if acc.visits > 0 {
                    (acc.revenue / acc.visits as f64).round() as i64
                } else {
                    0
                },
                revenue_percentage: pct_str(millions, total_millions),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.revenue
            .partial_cmp(&a.revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.department.cmp(&b.department))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testutil::visit;
    use chrono::{TimeZone, Utc};

    fn record(year: i32, month: u32, revenue: f64, profit: f64) -> FinancialRecord {
        FinancialRecord {
            year,
            month,
            date: Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single(),
            total_revenue: revenue,
            operating_expenses: revenue - profit,
            net_profit: profit,
            profit_margin: if revenue > 0.0 { profit / revenue } else { 0.0 },
            bed_occupancy_rate: 0.75,
            average_daily_census: 0.0,
        }
    }

    #[test]
    fn trends_sort_ascending_and_scale_to_millions() {
        let data = HospitalData {
            financial: vec![
                record(2024, 3, 12_000_000.0, 3_000_000.0),
                record(2024, 1, 8_000_000.0, 2_000_000.0),
            ],
            ..HospitalData::default()
        };
        let trends = financial_report(&data).monthly_trends;
        assert_eq!(trends[0].month, "Jan 2024");
        assert_eq!(trends[0].revenue, 8.0);
        assert_eq!(trends[0].profit, 2.0);
        assert_eq!(trends[1].month, "Mar 2024");
        assert_eq!(trends[1].profit_margin, 25.0);
        assert_eq!(trends[1].occupancy_rate, 75.0);
    }

    #[test]
    fn end_to_end_revenue_scenario() {
        // Two completed Cardiology visits, one cancelled Neurology visit.
        let data = HospitalData {
            visits: vec![
                visit("Cardiology", 1000.0, Some("Completed"), Some((2024, 1, 5))),
                visit("Cardiology", 2000.0, Some("Completed"), Some((2024, 2, 10))),
                visit("Neurology", 1000.0, Some("Cancelled"), Some((2024, 1, 15))),
            ],
            ..HospitalData::default()
        };
        let rows = financial_report(&data).revenue_by_department;
        assert_eq!(rows.len(), 1);
        let cardio = &rows[0];
        assert_eq!(cardio.department, "Cardiology");
        assert!((cardio.revenue - 0.003).abs() < 1e-12);
        assert_eq!(cardio.total_visits, 2);
        assert_eq!(cardio.avg_revenue_per_visit, 1500);
        assert_eq!(cardio.revenue_percentage, "100.0");
    }

    #[test]
    fn year_window_boundaries_are_inclusive() {
        let data = HospitalData {
            visits: vec![
                visit("A", 100.0, None, Some((2021, 12, 31))),
                visit("A", 100.0, None, Some((2022, 1, 1))),
                visit("A", 100.0, None, Some((2025, 1, 1))),
            ],
            ..HospitalData::default()
        };
        let rows = financial_report(&data).revenue_by_department;
        assert_eq!(rows[0].total_visits, 1);
    }

    #[test]
    fn dateless_and_missing_department_visits() {
        let data = HospitalData {
            visits: vec![
                visit("A", 100.0, None, None), // no date → dropped
                {
                    let mut v = visit("x", 250.0, None, Some((2023, 6, 1)));
                    v.department = None;
                    v
                },
            ],
            ..HospitalData::default()
        };
        let rows = financial_report(&data).revenue_by_department;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].department, "Unknown");
        assert_eq!(rows[0].total_visits, 1);
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let data = HospitalData {
            visits: vec![
                visit("A", 1000.0, None, Some((2023, 1, 1))),
                visit("B", 2000.0, None, Some((2023, 2, 1))),
                visit("C", 4000.0, None, Some((2023, 3, 1))),
            ],
            ..HospitalData::default()
        };
        let rows = financial_report(&data).revenue_by_department;
        let sum: f64 = rows
            .iter()
            .map(|r| r.revenue_percentage.parse::<f64>().unwrap())
            .sum();
        assert!((sum - 100.0).abs() <= 0.1, "sum was {sum}");
    }

    #[test]
    fn zero_total_revenue_renders_literal_zero_percentages() {
        let data = HospitalData {
            visits: vec![
                visit("A", 0.0, None, Some((2023, 1, 1))),
                visit("B", 0.0, None, Some((2023, 2, 1))),
            ],
            ..HospitalData::default()
        };
        for row in financial_report(&data).revenue_by_department {
            assert_eq!(row.revenue_percentage, "0");
        }
    }

    #[test]
    fn sorts_descending_by_revenue() {
        let data = HospitalData {
            visits: vec![
                visit("Small", 100.0, None, Some((2023, 1, 1))),
                visit("Big", 9000.0, None, Some((2023, 1, 1))),
            ],
            ..HospitalData::default()
        };
        let rows = financial_report(&data).revenue_by_department;
        assert_eq!(rows[0].department, "Big");
        assert_eq!(rows[1].department, "Small");
    }
}
