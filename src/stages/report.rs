//! Report stage
//!
//! Pure aggregation of everything the earlier stages accumulated. The only
//! new work is rendering (rounding, percent strings) and the two derived
//! fields: `profit_loss_status` and `action_priority`.

use crate::models::{
    Advised, Alert, AlertPriority, BusinessSummary, KeyMetrics, ProfitLossStatus, Report,
};
use tracing::debug;

/// Assemble the final report. Terminal: nothing downstream reads past this.
pub fn assemble(state: Advised) -> Report {
    let Advised {
        today,
        yesterday: _,
        metrics,
        alerts,
        recommendations,
    } = state;

    let action_priority = derive_action_priority(&alerts);

    let report = Report {
        business_summary: BusinessSummary {
            date: "today".to_string(),
            profit_loss_status: profit_loss_status(metrics.today_profit),
            total_profit: metrics.today_profit,
            revenue: today.revenue,
            cost: today.cost,
            customers: today.customers,
        },
        key_metrics: KeyMetrics {
            cac_today: metrics.today_cac.map(round2),
            roi_today: round1(metrics.today_roi),
            profit_margin: round1(metrics.profit_margin),
            revenue_change: percent(metrics.revenue_change),
            cost_change: percent(metrics.cost_change),
            profit_change: percent(metrics.profit_change),
            cac_change: percent(metrics.cac_change),
            customer_growth: percent(metrics.customer_growth),
        },
        alerts,
        recommendations,
        action_priority,
    };

    debug!(
        status = %report.business_summary.profit_loss_status,
        action_priority = %report.action_priority,
        "Report assembled"
    );

    report
}

fn profit_loss_status(profit: f64) -> ProfitLossStatus {
    if profit > 0.0 {
        ProfitLossStatus::Positive
    } else if profit < 0.0 {
        ProfitLossStatus::Negative
    } else {
        ProfitLossStatus::Breakeven
    }
}

/// Highest priority among fired alerts; `low` when none fired.
fn derive_action_priority(alerts: &[Alert]) -> AlertPriority {
    alerts
        .iter()
        .map(|a| a.priority)
        .max()
        .unwrap_or(AlertPriority::Low)
}

/// Percentage fields render as strings with one decimal and a trailing `%`.
fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
