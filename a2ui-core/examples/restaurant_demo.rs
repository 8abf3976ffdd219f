//! Restaurant finder demo
//!
//! Drives the UI agent with a canned model that first answers without a UI
//! block and then corrects itself, showing the retry loop, progress
//! notifications and the per-request timing summary.
//!
//! Run with: RUST_LOG=info cargo run --example restaurant_demo

use a2ui_core::agent::{ModelError, ModelEvent, ModelEventStream, ModelInvoker};
use a2ui_core::{PipelineConfig, RequestStats, RunContext, TelemetrySink, UiAgent, UiRequest};
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Answers badly once, then with a restaurant list
struct CannedModel {
    calls: AtomicUsize,
}

#[async_trait]
impl ModelInvoker for CannedModel {
    async fn invoke(
        &self,
        prompt: &str,
        session_id: &str,
        telemetry: &dyn TelemetrySink,
    ) -> Result<ModelEventStream, ModelError> {
        println!("→ model prompt [{}]: {}", session_id, prompt);

        let started = Instant::now();
        tokio::time::sleep(Duration::from_millis(20)).await;
        telemetry.track_tool_call("get_restaurants", started.elapsed());

        let parts = if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            vec!["Here are some places you might like!".to_string()]
        } else {
            let body = json!({
                "widgets": [{
                    "type": "restaurant_list",
                    "data": {
                        "restaurants": [{
                            "name": "Xi'an Famous Foods",
                            "rating": "★★★★☆",
                            "detail": "Spicy and savory hand-pulled noodles.",
                            "imageUrl": "http://localhost:10002/static/shrimpchowmein.jpeg",
                            "address": "81 St Marks Pl, New York, NY 10003",
                            "infoLink": "[More Info](https://www.xianfoods.com/)"
                        }]
                    }
                }]
            });
            vec![
                "Here are some places you might like!".to_string(),
                format!("```a2ui\n{}\n```", body),
            ]
        };

        Ok(Box::pin(futures::stream::iter(vec![
            Ok(ModelEvent::progress()),
            Ok(ModelEvent::final_parts(parts)),
        ])))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("\n🍜 A2UI Restaurant Finder Demo\n");

    let model = Arc::new(CannedModel {
        calls: AtomicUsize::new(0),
    });
    let agent = UiAgent::from_config(model, PipelineConfig::default()).await?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(update) = rx.recv().await {
            println!("… {:?}", update);
        }
    });

    let stats = RequestStats::start();
    let request = UiRequest::new("Top 5 chinese restaurants in New York.", "demo-session");
    let response = agent
        .run(&request, &RunContext::new(&stats).with_progress(tx))
        .await?;
    stats.finish();
    printer.await?;

    println!("\n✅ Outcome: {:?} after {} attempt(s)", response.outcome, response.attempts);
    println!("Text: {}", response.text);
    println!("Messages:");
    println!("{}", serde_json::to_string_pretty(&response.messages)?);

    Ok(())
}
