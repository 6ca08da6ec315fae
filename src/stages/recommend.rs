//! Recommendation stage
//!
//! Builds a prompt from the accumulated state, delegates to the language
//! model, and normalizes the response into discrete recommendation strings.
//! The model is best-effort: on failure or timeout the stage substitutes a
//! deterministic fallback derived from the fired alerts, so the pipeline
//! always completes.

use crate::llm::ModelClient;
use crate::models::{Advised, Alert, AlertKind, Evaluated};
use std::time::Duration;
use tracing::{debug, warn};

/// Run the recommendation stage. Infallible by design: every failure path
/// degrades to the fallback set.
pub async fn recommend(state: Evaluated, model: &dyn ModelClient, timeout: Duration) -> Advised {
    let prompt = build_prompt(&state);

    let recommendations = match tokio::time::timeout(timeout, model.generate(&prompt)).await {
        Ok(Ok(text)) => {
            debug!(response_chars = text.len(), "Model response received");
            parse_recommendations(&text)
        }
        Ok(Err(e)) => {
            warn!(error = %e, "Model call failed; using fallback recommendations");
            fallback_recommendations(&state.alerts)
        }
        Err(_) => {
            warn!(
                timeout_secs = timeout.as_secs_f64(),
                "Model call timed out; using fallback recommendations"
            );
            fallback_recommendations(&state.alerts)
        }
    };

    let Evaluated {
        today,
        yesterday,
        metrics,
        alerts,
    } = state;

    Advised {
        today,
        yesterday,
        metrics,
        alerts,
        recommendations,
    }
}

/// Build the consultant prompt embedding both day summaries, the computed
/// metrics, and any fired alerts. Deterministic for a given state.
fn build_prompt(state: &Evaluated) -> String {
    let m = &state.metrics;
    let today = &state.today;
    let yesterday = &state.yesterday;

    let alert_lines = if state.alerts.is_empty() {
        "none".to_string()
    } else {
        state
            .alerts
            .iter()
            .map(|a| format!("- {}", a.message))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let cac_line = match m.today_cac {
        Some(cac) => format!("${:.2}", cac),
        None => "undefined (no customers)".to_string(),
    };

    format!(
        "You are a business consultant. Based on the following data, provide \
         3-5 specific and actionable recommendations covering immediate \
         actions, cost optimization, growth strategies, and risk management. \
         Write the response as a clear list.\n\n\
         Today's data:\n\
         - Revenue: ${:.2}\n\
         - Cost: ${:.2}\n\
         - Customers: {}\n\
         - Marketing cost: ${:.2}\n\
         - Profit: ${:.2}\n\n\
         Yesterday's data:\n\
         - Revenue: ${:.2}\n\
         - Cost: ${:.2}\n\
         - Customers: {}\n\
         - Profit: ${:.2}\n\n\
         Changes:\n\
         - Revenue change: {:.1}%\n\
         - Cost change: {:.1}%\n\
         - Profit change: {:.1}%\n\
         - CAC change: {:.1}%\n\
         - Customer growth: {:.1}%\n\
         - CAC today: {}\n\
         - ROI today: {:.1}%\n\n\
         Alerts:\n{}",
        today.revenue,
        today.cost,
        today.customers,
        today.marketing_cost,
        m.today_profit,
        yesterday.revenue,
        yesterday.cost,
        yesterday.customers,
        m.yesterday_profit,
        m.revenue_change,
        m.cost_change,
        m.profit_change,
        m.cac_change,
        m.customer_growth,
        cac_line,
        m.today_roi,
        alert_lines,
    )
}

/// Split free text into discrete recommendations: trimmed lines that look
/// like list items. When fewer than two parse, the whole trimmed response
/// becomes a single recommendation.
fn parse_recommendations(text: &str) -> Vec<String> {
    let items: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && is_list_item(line))
        .map(str::to_string)
        .collect();

    if items.len() < 2 {
        vec![text.trim().to_string()]
    } else {
        items
    }
}

fn is_list_item(line: &str) -> bool {
    if line.starts_with('-') || line.starts_with('•') || line.starts_with('*') {
        return true;
    }

    // Numbered markers: "1." / "12)" etc.
    let digits: usize = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        matches!(line.chars().nth(digits), Some('.') | Some(')'))
    } else {
        false
    }
}

/// Generic recommendations used when the model is unavailable. Derived only
/// from which alerts fired, so degraded runs stay deterministic.
fn fallback_recommendations(alerts: &[Alert]) -> Vec<String> {
    let mut recommendations = vec![
        "Review and control operational costs".to_string(),
        "Analyze marketing channel performance".to_string(),
        "Optimize product pricing strategy".to_string(),
    ];

    for alert in alerts {
        let extra = match alert.kind {
            AlertKind::Critical => "Profit is negative: cut discretionary spend and review the cost structure",
            AlertKind::Warning => "Acquisition cost is rising sharply: audit marketing campaigns",
            AlertKind::Alert => "Acquisition cost is above target: shift budget to cheaper channels",
            AlertKind::Urgent => "Revenue dropped significantly: investigate demand and pricing",
            AlertKind::LowRoi => "ROI is below the floor: reassess pricing and cost of goods",
        };
        recommendations.push(extra.to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{FailingModel, ModelClient, StaticModel};
    use crate::models::{AlertPriority, DailyRecord, Metrics};
    use async_trait::async_trait;

    /// Model double that never answers within any sane deadline.
    struct SlowModel;

    #[async_trait]
    impl ModelClient for SlowModel {
        async fn generate(&self, _prompt: &str) -> crate::Result<String> {
            tokio::time::sleep(Duration::from_secs(600)).await;
            Ok("too late".to_string())
        }
    }

    fn evaluated(alerts: Vec<Alert>) -> Evaluated {
        let record = DailyRecord {
            revenue: 12000.0,
            cost: 8000.0,
            customers: 150,
            marketing_cost: 2000.0,
        };
        Evaluated {
            today: record,
            yesterday: DailyRecord {
                revenue: 10000.0,
                cost: 7500.0,
                customers: 120,
                marketing_cost: 1800.0,
            },
            metrics: Metrics {
                today_profit: 4000.0,
                yesterday_profit: 2500.0,
                today_roi: 50.0,
                yesterday_roi: 33.3,
                profit_margin: 33.3,
                today_cac: Some(13.33),
                yesterday_cac: Some(15.0),
                revenue_change: 20.0,
                cost_change: 6.7,
                profit_change: 60.0,
                cac_change: -11.1,
                customer_growth: 25.0,
            },
            alerts,
        }
    }

    fn critical_alert() -> Alert {
        Alert {
            kind: AlertKind::Critical,
            message: "You have losses today (profit: $-1000.00)".to_string(),
            priority: AlertPriority::High,
        }
    }

    #[test]
    fn test_parse_numbered_list() {
        let text = "Here is my advice:\n1. Trim fixed costs.\n2. Revisit ad spend.\n3) Bundle products.";
        let parsed = parse_recommendations(text);
        assert_eq!(
            parsed,
            vec![
                "1. Trim fixed costs.",
                "2. Revisit ad spend.",
                "3) Bundle products.",
            ]
        );
    }

    #[test]
    fn test_parse_bulleted_list() {
        let text = "- keep cash reserves\n• watch churn\n* renegotiate rent";
        assert_eq!(parse_recommendations(text).len(), 3);
    }

    #[test]
    fn test_unstructured_response_becomes_single_item() {
        let text = "Everything looks healthy. Keep doing what you are doing.";
        let parsed = parse_recommendations(text);
        assert_eq!(parsed, vec![text.to_string()]);
    }

    #[test]
    fn test_parser_is_deterministic() {
        let text = "1. a\n2. b\nnoise\n3. c";
        assert_eq!(parse_recommendations(text), parse_recommendations(text));
    }

    #[test]
    fn test_fallback_without_alerts_is_nonempty() {
        let fallback = fallback_recommendations(&[]);
        assert_eq!(fallback.len(), 3);
    }

    #[test]
    fn test_fallback_appends_one_entry_per_alert() {
        let fallback = fallback_recommendations(&[critical_alert()]);
        assert_eq!(fallback.len(), 4);
        assert!(fallback[3].contains("Profit is negative"));
    }

    #[tokio::test]
    async fn test_model_response_is_parsed() {
        let model = StaticModel::new("1. one\n2. two\n3. three");
        let result = recommend(evaluated(vec![]), &model, Duration::from_secs(5)).await;
        assert_eq!(result.recommendations.len(), 3);
    }

    #[tokio::test]
    async fn test_model_failure_degrades_to_fallback() {
        let result = recommend(
            evaluated(vec![critical_alert()]),
            &FailingModel,
            Duration::from_secs(5),
        )
        .await;

        assert!(!result.recommendations.is_empty());
        assert_eq!(
            result.recommendations,
            fallback_recommendations(&[critical_alert()])
        );
        // The fired alerts survive the degraded path untouched.
        assert_eq!(result.alerts.len(), 1);
    }

    #[tokio::test]
    async fn test_model_timeout_degrades_to_fallback() {
        let result = recommend(
            evaluated(vec![critical_alert()]),
            &SlowModel,
            Duration::from_millis(100),
        )
        .await;

        // The deadline, not the model, bounds the stage: same deterministic
        // fallback as an outright failure.
        assert_eq!(
            result.recommendations,
            fallback_recommendations(&[critical_alert()])
        );
        assert_eq!(result.recommendations.len(), 4);
        assert!(result
            .recommendations
            .iter()
            .any(|r| r.contains("Profit is negative")));
    }

    #[test]
    fn test_prompt_mentions_alerts_and_both_days() {
        let state = evaluated(vec![critical_alert()]);
        let prompt = build_prompt(&state);
        assert!(prompt.contains("12000"));
        assert!(prompt.contains("10000"));
        assert!(prompt.contains("You have losses today"));
    }
}
