//! Metric stage
//!
//! Computes all derived financial and customer metrics from the two
//! validated records. Total over validated input: every zero-denominator
//! case yields 0 or an undefined sentinel, never an error. This is a
//! reporting path, not a place to abort the run.

use crate::models::{Computed, Ingested, Metrics};
use tracing::debug;

/// Compute the full metric set at full precision.
pub fn compute(state: Ingested) -> Computed {
    let Ingested { today, yesterday } = state;

    let today_profit = today.revenue - today.cost;
    let yesterday_profit = yesterday.revenue - yesterday.cost;

    let today_roi = ratio_pct(today_profit, today.cost);
    let yesterday_roi = ratio_pct(yesterday_profit, yesterday.cost);
    let profit_margin = ratio_pct(today_profit, today.revenue);

    let today_cac = cac(today.marketing_cost, today.customers);
    let yesterday_cac = cac(yesterday.marketing_cost, yesterday.customers);

    let cac_change = match (today_cac, yesterday_cac) {
        (Some(t), Some(y)) if y > 0.0 => (t - y) / y * 100.0,
        _ => 0.0,
    };

    let revenue_change = change_pct(today.revenue, yesterday.revenue);
    let cost_change = change_pct(today.cost, yesterday.cost);
    let customer_growth = change_pct(today.customers as f64, yesterday.customers as f64);

    // Profit can legitimately be negative, so the change is taken against
    // its magnitude.
    let profit_change = if yesterday_profit != 0.0 {
        (today_profit - yesterday_profit) / yesterday_profit.abs() * 100.0
    } else {
        0.0
    };

    let metrics = Metrics {
        today_profit,
        yesterday_profit,
        today_roi,
        yesterday_roi,
        profit_margin,
        today_cac,
        yesterday_cac,
        revenue_change,
        cost_change,
        profit_change,
        cac_change,
        customer_growth,
    };

    debug!(
        today_profit = metrics.today_profit,
        today_roi = metrics.today_roi,
        revenue_change = metrics.revenue_change,
        "Metrics computed"
    );

    Computed {
        today,
        yesterday,
        metrics,
    }
}

/// `numerator / denominator * 100`, 0 when the denominator is not positive.
fn ratio_pct(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

/// Day-over-day percentage change, 0 when the yesterday value is 0.
fn change_pct(today: f64, yesterday: f64) -> f64 {
    if yesterday != 0.0 {
        (today - yesterday) / yesterday * 100.0
    } else {
        0.0
    }
}

/// Customer acquisition cost. Undefined (`None`) when no customers were
/// acquired, rather than a divide-by-zero or infinity.
fn cac(marketing_cost: f64, customers: u32) -> Option<f64> {
    if customers > 0 {
        Some(marketing_cost / customers as f64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailyRecord;

    fn record(revenue: f64, cost: f64, customers: u32, marketing_cost: f64) -> DailyRecord {
        DailyRecord {
            revenue,
            cost,
            customers,
            marketing_cost,
        }
    }

    fn sample() -> Ingested {
        Ingested {
            today: record(12000.0, 8000.0, 150, 2000.0),
            yesterday: record(10000.0, 7500.0, 120, 1800.0),
        }
    }

    #[test]
    fn test_sample_day_metrics() {
        let m = compute(sample()).metrics;

        assert_eq!(m.today_profit, 4000.0);
        assert_eq!(m.yesterday_profit, 2500.0);
        assert!((m.today_roi - 50.0).abs() < 1e-9);
        assert!((m.today_cac.unwrap() - 13.333333333).abs() < 1e-6);
        assert!((m.revenue_change - 20.0).abs() < 1e-9);
        assert!((m.customer_growth - 25.0).abs() < 1e-9);
        assert!((m.profit_margin - 33.333333333).abs() < 1e-6);
    }

    #[test]
    fn test_zero_cost_gives_zero_roi() {
        let state = Ingested {
            today: record(1000.0, 0.0, 10, 100.0),
            yesterday: record(500.0, 0.0, 5, 50.0),
        };

        let m = compute(state).metrics;
        assert_eq!(m.today_roi, 0.0);
        assert_eq!(m.yesterday_roi, 0.0);
    }

    #[test]
    fn test_zero_customers_gives_undefined_cac() {
        let state = Ingested {
            today: record(1000.0, 500.0, 0, 100.0),
            yesterday: record(1000.0, 500.0, 0, 100.0),
        };

        let m = compute(state).metrics;
        assert_eq!(m.today_cac, None);
        assert_eq!(m.yesterday_cac, None);
        // Undefined on either side means no change signal.
        assert_eq!(m.cac_change, 0.0);
    }

    #[test]
    fn test_zero_yesterday_revenue_gives_zero_change() {
        let state = Ingested {
            today: record(1000.0, 500.0, 10, 100.0),
            yesterday: record(0.0, 0.0, 0, 0.0),
        };

        let m = compute(state).metrics;
        assert_eq!(m.revenue_change, 0.0);
        assert_eq!(m.cost_change, 0.0);
        assert_eq!(m.customer_growth, 0.0);
        assert_eq!(m.profit_change, 0.0);
    }

    #[test]
    fn test_profit_change_uses_magnitude_of_yesterday() {
        let state = Ingested {
            today: record(1000.0, 500.0, 10, 100.0),
            yesterday: record(500.0, 1000.0, 10, 100.0),
        };

        // Yesterday -500, today +500: a 200% swing against |yesterday|.
        let m = compute(state).metrics;
        assert!((m.profit_change - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_full_precision_retained() {
        let state = Ingested {
            today: record(1000.0, 300.0, 3, 100.0),
            yesterday: record(900.0, 300.0, 3, 100.0),
        };

        let m = compute(state).metrics;
        // 100/3 is not representable at one decimal; the raw value survives.
        assert!((m.today_cac.unwrap() - 33.333333333).abs() < 1e-6);
    }
}
