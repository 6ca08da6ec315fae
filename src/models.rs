//! Core data models for the analytics pipeline

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

//
// ================= Input Records =================
//

/// Raw, caller-supplied daily record before validation.
///
/// All fields optional; missing ones default to 0 during ingestion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDailyRecord {
    pub revenue: Option<f64>,
    pub cost: Option<f64>,
    pub customers: Option<f64>,
    pub marketing_cost: Option<f64>,
}

impl RawDailyRecord {
    pub fn new(revenue: f64, cost: f64, customers: f64, marketing_cost: f64) -> Self {
        Self {
            revenue: Some(revenue),
            cost: Some(cost),
            customers: Some(customers),
            marketing_cost: Some(marketing_cost),
        }
    }
}

/// A validated daily record. Immutable after ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub revenue: f64,
    pub cost: f64,
    pub customers: u32,
    pub marketing_cost: f64,
}

//
// ================= Metrics =================
//

/// All derived metrics, kept at full precision.
///
/// Rounding happens only when the report is rendered; alert rules compare
/// against the unrounded values here to avoid boundary flicker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub today_profit: f64,
    pub yesterday_profit: f64,
    pub today_roi: f64,
    pub yesterday_roi: f64,
    pub profit_margin: f64,
    /// `None` means undefined (zero customers), not zero.
    pub today_cac: Option<f64>,
    pub yesterday_cac: Option<f64>,
    pub revenue_change: f64,
    pub cost_change: f64,
    pub profit_change: f64,
    pub cac_change: f64,
    pub customer_growth: f64,
}

//
// ================= Alerts =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    Critical,
    Warning,
    Alert,
    Urgent,
    LowRoi,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    Low,
    Medium,
    High,
}

/// One triggered alert entry. Order in `alerts` follows rule-table order,
/// not priority.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub priority: AlertPriority,
}

//
// ================= Stage States =================
//

// Each stage consumes the previous stage's output type and returns a
// successor carrying strictly more fields, so every field has exactly one
// writer and later stages cannot lose earlier state.

/// Output of the ingestion stage: two validated records.
#[derive(Debug, Clone)]
pub struct Ingested {
    pub today: DailyRecord,
    pub yesterday: DailyRecord,
}

/// Output of the metric stage.
#[derive(Debug, Clone)]
pub struct Computed {
    pub today: DailyRecord,
    pub yesterday: DailyRecord,
    pub metrics: Metrics,
}

/// Output of the alert stage. An empty `alerts` list is valid.
#[derive(Debug, Clone)]
pub struct Evaluated {
    pub today: DailyRecord,
    pub yesterday: DailyRecord,
    pub metrics: Metrics,
    pub alerts: Vec<Alert>,
}

/// Output of the recommendation stage.
#[derive(Debug, Clone)]
pub struct Advised {
    pub today: DailyRecord,
    pub yesterday: DailyRecord,
    pub metrics: Metrics,
    pub alerts: Vec<Alert>,
    pub recommendations: Vec<String>,
}

//
// ================= Report =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProfitLossStatus {
    Positive,
    Negative,
    Breakeven,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BusinessSummary {
    pub date: String,
    pub profit_loss_status: ProfitLossStatus,
    pub total_profit: f64,
    pub revenue: f64,
    pub cost: f64,
    pub customers: u32,
}

/// Rendered metric values: percentage fields as `"20.0%"` strings, plain
/// numbers (CAC, ROI, margin) as numbers. An undefined CAC serializes as null.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyMetrics {
    pub cac_today: Option<f64>,
    pub roi_today: f64,
    pub profit_margin: f64,
    pub revenue_change: String,
    pub cost_change: String,
    pub profit_change: String,
    pub cac_change: String,
    pub customer_growth: String,
}

/// The final structured report, the only value returned from a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub business_summary: BusinessSummary,
    pub key_metrics: KeyMetrics,
    pub alerts: Vec<Alert>,
    pub recommendations: Vec<String>,
    pub action_priority: AlertPriority,
}

//
// ================= AlertPriority Ordering =================
//

impl PartialOrd for AlertPriority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AlertPriority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl AlertPriority {
    fn rank(&self) -> u8 {
        match self {
            AlertPriority::Low => 0,
            AlertPriority::Medium => 1,
            AlertPriority::High => 2,
        }
    }
}

impl fmt::Display for AlertPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlertPriority::Low => "low",
            AlertPriority::Medium => "medium",
            AlertPriority::High => "high",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for ProfitLossStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProfitLossStatus::Positive => "positive",
            ProfitLossStatus::Negative => "negative",
            ProfitLossStatus::Breakeven => "breakeven",
        };
        write!(f, "{}", s)
    }
}
