//! Ingestion stage
//!
//! Validates and normalizes the two raw daily records into their canonical
//! shape. Purely shape/type validation; no metric or alert logic here.

use crate::error::AnalysisError;
use crate::models::{DailyRecord, Ingested, RawDailyRecord};
use crate::Result;
use tracing::debug;

/// Validate both records. Fatal on failure: the whole run aborts and the
/// error names the offending field (e.g. `today.customers`).
pub fn ingest(today: &RawDailyRecord, yesterday: &RawDailyRecord) -> Result<Ingested> {
    let today = validate_record(today, "today")?;
    let yesterday = validate_record(yesterday, "yesterday")?;

    debug!(
        today_revenue = today.revenue,
        yesterday_revenue = yesterday.revenue,
        "Ingestion complete"
    );

    Ok(Ingested { today, yesterday })
}

fn validate_record(raw: &RawDailyRecord, day: &str) -> Result<DailyRecord> {
    let revenue = money_field(raw.revenue, day, "revenue")?;
    let cost = money_field(raw.cost, day, "cost")?;
    let marketing_cost = money_field(raw.marketing_cost, day, "marketing_cost")?;
    let customers = customers_field(raw.customers, day)?;

    Ok(DailyRecord {
        revenue,
        cost,
        customers,
        marketing_cost,
    })
}

/// Monetary fields: missing defaults to 0, negative or non-finite rejected.
fn money_field(value: Option<f64>, day: &str, name: &str) -> Result<f64> {
    let value = value.unwrap_or(0.0);
    if !value.is_finite() {
        return Err(AnalysisError::validation(
            format!("{}.{}", day, name),
            "must be a finite number",
        ));
    }
    if value < 0.0 {
        return Err(AnalysisError::validation(
            format!("{}.{}", day, name),
            format!("must not be negative (got {})", value),
        ));
    }
    Ok(value)
}

/// Customer count: a non-negative integer. Values like 12.5 are rejected
/// rather than truncated.
fn customers_field(value: Option<f64>, day: &str) -> Result<u32> {
    let value = value.unwrap_or(0.0);
    let field = format!("{}.customers", day);

    if !value.is_finite() {
        return Err(AnalysisError::validation(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(AnalysisError::validation(
            field,
            format!("must not be negative (got {})", value),
        ));
    }
    if value.fract() != 0.0 {
        return Err(AnalysisError::validation(
            field,
            format!("must be a whole number (got {})", value),
        ));
    }
    if value > u32::MAX as f64 {
        return Err(AnalysisError::validation(field, "is out of range"));
    }

    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_records_pass() {
        let today = RawDailyRecord::new(12000.0, 8000.0, 150.0, 2000.0);
        let yesterday = RawDailyRecord::new(10000.0, 7500.0, 120.0, 1800.0);

        let ingested = ingest(&today, &yesterday).unwrap();
        assert_eq!(ingested.today.revenue, 12000.0);
        assert_eq!(ingested.today.customers, 150);
        assert_eq!(ingested.yesterday.marketing_cost, 1800.0);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let empty = RawDailyRecord::default();
        let ingested = ingest(&empty, &empty).unwrap();
        assert_eq!(ingested.today.revenue, 0.0);
        assert_eq!(ingested.today.cost, 0.0);
        assert_eq!(ingested.today.customers, 0);
        assert_eq!(ingested.today.marketing_cost, 0.0);
    }

    #[test]
    fn test_negative_revenue_rejected() {
        let bad = RawDailyRecord::new(-1.0, 0.0, 0.0, 0.0);
        let err = ingest(&bad, &RawDailyRecord::default()).unwrap_err();
        assert!(err.to_string().contains("today.revenue"));
    }

    #[test]
    fn test_negative_marketing_cost_rejected_on_yesterday() {
        let bad = RawDailyRecord::new(100.0, 50.0, 10.0, -5.0);
        let err = ingest(&RawDailyRecord::default(), &bad).unwrap_err();
        assert!(err.to_string().contains("yesterday.marketing_cost"));
    }

    #[test]
    fn test_fractional_customers_rejected() {
        let bad = RawDailyRecord::new(100.0, 50.0, 12.5, 10.0);
        let err = ingest(&bad, &RawDailyRecord::default()).unwrap_err();
        assert!(err.to_string().contains("today.customers"));
        assert!(err.to_string().contains("whole number"));
    }

    #[test]
    fn test_nan_rejected() {
        let bad = RawDailyRecord::new(f64::NAN, 0.0, 0.0, 0.0);
        assert!(ingest(&bad, &RawDailyRecord::default()).is_err());
    }
}
