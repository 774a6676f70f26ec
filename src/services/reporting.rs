//! Weekly diet reporting: aggregates a trailing 7-day window of diet logs
//! into totals and a per-day breakdown. Nothing is persisted; the summary is
//! recomputed on every call.

use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;
use sqlx::PgPool;
use std::collections::BTreeMap;

use crate::database::models::DietLog;
use crate::database::repository::diet_logs;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MacroTotals {
    pub calories: i64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyBreakdown {
    pub date: NaiveDate,
    pub calories: i64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub meals: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklySummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub meals_logged: usize,
    pub totals: MacroTotals,
    pub average_daily_calories: f64,
    pub daily: Vec<DailyBreakdown>,
}

/// Summary over the trailing 7 days for one user. Zero logs yields zeroed
/// aggregates, never an error.
pub async fn weekly_diet_summary(
    pool: &PgPool,
    tenant_id: i32,
    user_id: i32,
) -> Result<WeeklySummary, sqlx::Error> {
    let now = Utc::now();
    let cutoff = now - Duration::days(7);
    let logs = diet_logs::since(pool, tenant_id, user_id, cutoff).await?;
    Ok(summarize(&logs, cutoff.date_naive(), now.date_naive()))
}

/// Pure aggregation pass over an already-fetched window of logs
fn summarize(logs: &[DietLog], start_date: NaiveDate, end_date: NaiveDate) -> WeeklySummary {
    let mut totals = MacroTotals { calories: 0, protein_g: 0.0, carbs_g: 0.0, fat_g: 0.0 };
    let mut by_day: BTreeMap<NaiveDate, DailyBreakdown> = BTreeMap::new();

    for log in logs {
        let day = log.logged_at.date_naive();
        let entry = by_day.entry(day).or_insert(DailyBreakdown {
            date: day,
            calories: 0,
            protein_g: 0.0,
            carbs_g: 0.0,
            fat_g: 0.0,
            meals: 0,
        });

        let calories = i64::from(log.calories.unwrap_or(0));
        let protein = log.protein_g.unwrap_or(0.0);
        let carbs = log.carbs_g.unwrap_or(0.0);
        let fat = log.fat_g.unwrap_or(0.0);

        entry.calories += calories;
        entry.protein_g += protein;
        entry.carbs_g += carbs;
        entry.fat_g += fat;
        entry.meals += 1;

        totals.calories += calories;
        totals.protein_g += protein;
        totals.carbs_g += carbs;
        totals.fat_g += fat;
    }

    let days_with_data = by_day.len();
    let average_daily_calories = if days_with_data == 0 {
        0.0
    } else {
        totals.calories as f64 / days_with_data as f64
    };

    // Newest day first, matching the log listing order
    let daily: Vec<DailyBreakdown> = by_day.into_values().rev().collect();

    WeeklySummary {
        start_date,
        end_date,
        meals_logged: logs.len(),
        totals,
        average_daily_calories,
        daily,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};

    fn log_at(ts: DateTime<Utc>, calories: i32, protein: f64) -> DietLog {
        DietLog {
            id: 0,
            tenant_id: 1,
            user_id: 1,
            meal_name: "meal".to_string(),
            food_items: None,
            calories: Some(calories),
            protein_g: Some(protein),
            carbs_g: Some(10.0),
            fat_g: Some(5.0),
            logged_at: ts,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_summarize_zero_logs_returns_zeroed_aggregates() {
        let summary = summarize(&[], date(2026, 8, 23), date(2026, 8, 30));

        assert_eq!(summary.meals_logged, 0);
        assert_eq!(summary.totals.calories, 0);
        assert_eq!(summary.average_daily_calories, 0.0);
        assert!(summary.daily.is_empty());
    }

    #[test]
    fn test_summarize_groups_by_day_newest_first() {
        let logs = vec![
            log_at(Utc.with_ymd_and_hms(2026, 8, 28, 8, 0, 0).unwrap(), 400, 20.0),
            log_at(Utc.with_ymd_and_hms(2026, 8, 28, 19, 0, 0).unwrap(), 600, 30.0),
            log_at(Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap(), 500, 25.0),
        ];
        let summary = summarize(&logs, date(2026, 8, 23), date(2026, 8, 30));

        assert_eq!(summary.meals_logged, 3);
        assert_eq!(summary.totals.calories, 1500);
        assert_eq!(summary.totals.protein_g, 75.0);
        assert_eq!(summary.daily.len(), 2);
        // Newest day first
        assert_eq!(summary.daily[0].date, date(2026, 8, 29));
        assert_eq!(summary.daily[0].calories, 500);
        assert_eq!(summary.daily[1].date, date(2026, 8, 28));
        assert_eq!(summary.daily[1].calories, 1000);
        assert_eq!(summary.daily[1].meals, 2);
    }

    #[test]
    fn test_summarize_average_over_days_with_data() {
        let logs = vec![
            log_at(Utc.with_ymd_and_hms(2026, 8, 28, 8, 0, 0).unwrap(), 1000, 0.0),
            log_at(Utc.with_ymd_and_hms(2026, 8, 29, 8, 0, 0).unwrap(), 2000, 0.0),
        ];
        let summary = summarize(&logs, date(2026, 8, 23), date(2026, 8, 30));
        assert_eq!(summary.average_daily_calories, 1500.0);
    }

    #[test]
    fn test_summarize_missing_macros_count_as_zero() {
        let mut log = log_at(Utc.with_ymd_and_hms(2026, 8, 29, 8, 0, 0).unwrap(), 300, 0.0);
        log.calories = None;
        log.protein_g = None;
        log.carbs_g = None;
        log.fat_g = None;

        let summary = summarize(&[log], date(2026, 8, 23), date(2026, 8, 30));
        assert_eq!(summary.totals.calories, 0);
        assert_eq!(summary.meals_logged, 1);
    }
}
