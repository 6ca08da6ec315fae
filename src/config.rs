//! Pipeline configuration
//!
//! Alert thresholds are tunable with documented defaults rather than
//! hard constants. Values come from the environment (see `.env.example`);
//! anything unset falls back to the defaults below.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Thresholds for the alert rule table.
///
/// Exactly five rules; tuning a threshold never adds or removes one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertThresholds {
    /// CAC day-over-day increase (%) above which the WARNING rule fires.
    pub cac_change_pct: f64,
    /// Absolute CAC ($) above which the ALERT rule fires.
    pub cac_ceiling: f64,
    /// Revenue day-over-day change (%) below which the URGENT rule fires.
    pub revenue_drop_pct: f64,
    /// ROI (%) below which the LOW_ROI rule fires.
    pub roi_floor_pct: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            cac_change_pct: 20.0,
            cac_ceiling: 50.0,
            revenue_drop_pct: -10.0,
            roi_floor_pct: 10.0,
        }
    }
}

/// Configuration for the language-model collaborator call.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Gemini API key; empty means no real model is available and callers
    /// should wire up a deterministic stand-in.
    pub api_key: String,
    /// Single-attempt timeout for the generate call. On expiry the
    /// recommendation stage falls back, it never retries.
    pub timeout: Duration,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub thresholds: AlertThresholds,
    pub model: ModelConfig,
}

impl PipelineConfig {
    /// Load configuration from the environment, keeping defaults for
    /// anything unset or unparseable.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = env_f64("ALERT_CAC_CHANGE_PCT") {
            config.thresholds.cac_change_pct = v;
        }
        if let Some(v) = env_f64("ALERT_CAC_CEILING") {
            config.thresholds.cac_ceiling = v;
        }
        if let Some(v) = env_f64("ALERT_REVENUE_DROP_PCT") {
            config.thresholds.revenue_drop_pct = v;
        }
        if let Some(v) = env_f64("ALERT_ROI_FLOOR_PCT") {
            config.thresholds.roi_floor_pct = v;
        }

        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            config.model.api_key = key;
        }
        if let Some(secs) = env_f64("MODEL_TIMEOUT_SECS") {
            if secs > 0.0 {
                config.model.timeout = Duration::from_secs_f64(secs);
            }
        }

        config
    }
}

fn env_f64(name: &str) -> Option<f64> {
    std::env::var(name).ok()?.trim().parse().ok()
}

/// Resolve the API server port from `PORT`/`API_PORT`, defaulting to 8080.
/// A set-but-unparseable value is a configuration error, not a silent default.
pub fn api_port_from_env() -> crate::Result<u16> {
    let raw = std::env::var("PORT")
        .or_else(|_| std::env::var("API_PORT"))
        .unwrap_or_else(|_| "8080".to_string());
    parse_port(&raw)
}

fn parse_port(raw: &str) -> crate::Result<u16> {
    raw.trim().parse().map_err(|_| {
        crate::error::AnalysisError::Configuration(format!("invalid API port: {:?}", raw))
    })
}
