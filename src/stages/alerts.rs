//! Alert stage
//!
//! A literal, ordered rule table evaluated against the unrounded metrics.
//! Every matching rule appends one alert; nothing short-circuits and no
//! alert suppresses another. Output order is table order, not severity.

use crate::config::AlertThresholds;
use crate::models::{Alert, AlertKind, AlertPriority, Computed, Evaluated, Metrics};
use tracing::debug;

/// One row of the rule table. `trigger` returns the triggering value when
/// the rule fires so the message template can embed it.
struct AlertRule {
    kind: AlertKind,
    priority: AlertPriority,
    trigger: fn(&Metrics, &AlertThresholds) -> Option<f64>,
    message: fn(f64) -> String,
}

/// The fixed rule set, in evaluation order.
static RULES: &[AlertRule] = &[
    AlertRule {
        kind: AlertKind::Critical,
        priority: AlertPriority::High,
        trigger: |m, _| (m.today_profit <= 0.0).then_some(m.today_profit),
        message: |v| format!("You have losses today (profit: ${:.2})", v),
    },
    AlertRule {
        kind: AlertKind::Warning,
        priority: AlertPriority::Medium,
        trigger: |m, t| (m.cac_change > t.cac_change_pct).then_some(m.cac_change),
        message: |v| format!("Customer acquisition cost increased by {:.1}%", v),
    },
    AlertRule {
        kind: AlertKind::Alert,
        priority: AlertPriority::Medium,
        trigger: |m, t| m.today_cac.filter(|cac| *cac > t.cac_ceiling),
        message: |v| format!("Customer acquisition cost is higher than optimal (${:.2})", v),
    },
    AlertRule {
        kind: AlertKind::Urgent,
        priority: AlertPriority::High,
        trigger: |m, t| (m.revenue_change < t.revenue_drop_pct).then_some(m.revenue_change),
        message: |v| format!("Revenue decreased by {:.1}%", v.abs()),
    },
    AlertRule {
        kind: AlertKind::LowRoi,
        priority: AlertPriority::Medium,
        trigger: |m, t| (m.today_roi < t.roi_floor_pct).then_some(m.today_roi),
        message: |v| format!("Return on investment is only {:.1}%", v),
    },
];

/// Evaluate every rule in table order. An empty result is a valid outcome.
pub fn evaluate(state: Computed, thresholds: &AlertThresholds) -> Evaluated {
    let Computed {
        today,
        yesterday,
        metrics,
    } = state;

    let alerts: Vec<Alert> = RULES
        .iter()
        .filter_map(|rule| {
            (rule.trigger)(&metrics, thresholds).map(|value| Alert {
                kind: rule.kind,
                message: (rule.message)(value),
                priority: rule.priority,
            })
        })
        .collect();

    debug!(alert_count = alerts.len(), "Alert rules evaluated");

    Evaluated {
        today,
        yesterday,
        metrics,
        alerts,
    }
}
