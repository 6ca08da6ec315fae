use daily_business_analytics::{
    config::PipelineConfig,
    llm::{GeminiClient, ModelClient, StaticModel},
    models::RawDailyRecord,
    pipeline::Pipeline,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = PipelineConfig::from_env();

    // Real model when a key is configured, deterministic stand-in otherwise
    // so the demo works offline.
    let model: Arc<dyn ModelClient> = if config.model.api_key.is_empty() {
        info!("GEMINI_API_KEY not set; using the deterministic stand-in model");
        Arc::new(StaticModel::default())
    } else {
        Arc::new(GeminiClient::new(
            config.model.api_key.clone(),
            config.model.timeout,
        ))
    };

    let pipeline = Pipeline::new(model, config);

    // Sample data for the demo run.
    let today = RawDailyRecord::new(12000.0, 8000.0, 150.0, 2000.0);
    let yesterday = RawDailyRecord::new(10000.0, 7500.0, 120.0, 1800.0);

    info!("Running daily business analysis");

    match pipeline.run(&today, &yesterday).await {
        Ok(report) => {
            println!("\n=== BUSINESS ANALYTICS REPORT ===");
            println!(
                "Financial status: {}",
                report.business_summary.profit_loss_status
            );
            println!("Today's profit:   ${}", report.business_summary.total_profit);
            println!("Today's revenue:  ${}", report.business_summary.revenue);
            println!("Today's cost:     ${}", report.business_summary.cost);
            println!("Customer count:   {}", report.business_summary.customers);

            println!("\nKey metrics:");
            match report.key_metrics.cac_today {
                Some(cac) => println!("  CAC today:       ${}", cac),
                None => println!("  CAC today:       undefined"),
            }
            println!("  ROI today:       {}%", report.key_metrics.roi_today);
            println!("  Profit margin:   {}%", report.key_metrics.profit_margin);
            println!("  Revenue change:  {}", report.key_metrics.revenue_change);
            println!("  Cost change:     {}", report.key_metrics.cost_change);
            println!("  Profit change:   {}", report.key_metrics.profit_change);
            println!("  Customer growth: {}", report.key_metrics.customer_growth);

            if !report.alerts.is_empty() {
                println!("\nAlerts:");
                for alert in &report.alerts {
                    println!("  [{}] {}", alert.priority, alert.message);
                }
            }

            println!("\nRecommendations:");
            for (i, rec) in report.recommendations.iter().take(5).enumerate() {
                println!("  {}. {}", i + 1, rec);
            }

            println!("\nAction priority: {}", report.action_priority);

            println!("\n=== JSON OUTPUT ===");
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("Analysis failed: {}", e);
            Err(Box::new(e) as Box<dyn std::error::Error>)
        }
    }
}
