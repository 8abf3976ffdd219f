//! Request-scoped timing statistics
//!
//! A [`RequestStats`] handle is created by the caller when a request starts
//! and passed explicitly down the invocation path. Clones share one buffer,
//! but no two requests ever share a handle.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::info;
use uuid::Uuid;

/// Receives timing samples for one request
pub trait TelemetrySink: Send + Sync {
    /// Record the duration of one model inference
    fn track_inference(&self, duration: Duration);

    /// Record the duration of one tool call made during inference
    fn track_tool_call(&self, tool_name: &str, duration: Duration);
}

/// One model inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceStat {
    pub duration_ms: f64,
}

/// One tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallStat {
    pub tool_name: String,
    pub duration_ms: f64,
}

/// Snapshot of a finished request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub request_id: Uuid,
    pub total_ms: f64,
    pub inferences: Vec<InferenceStat>,
    pub tool_calls: Vec<ToolCallStat>,
}

#[derive(Debug, Default)]
struct StatsBuffer {
    inferences: Vec<InferenceStat>,
    tool_calls: Vec<ToolCallStat>,
}

/// Timing statistics for a single request
#[derive(Debug, Clone)]
pub struct RequestStats {
    request_id: Uuid,
    start_time: Instant,
    buffer: Arc<Mutex<StatsBuffer>>,
}

impl Default for RequestStats {
    fn default() -> Self {
        Self::start()
    }
}

impl RequestStats {
    /// Begin tracking a new request
    pub fn start() -> Self {
        let request_id = Uuid::new_v4();
        info!("Request stats started [request_id: {}]", request_id);
        Self {
            request_id,
            start_time: Instant::now(),
            buffer: Arc::new(Mutex::new(StatsBuffer::default())),
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Time since the request started
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Number of inferences recorded so far
    pub fn inference_count(&self) -> usize {
        self.lock().inferences.len()
    }

    /// Copy of everything recorded so far
    pub fn snapshot(&self) -> StatsSummary {
        let buffer = self.lock();
        StatsSummary {
            request_id: self.request_id,
            total_ms: duration_ms(self.elapsed()),
            inferences: buffer.inferences.clone(),
            tool_calls: buffer.tool_calls.clone(),
        }
    }

    /// End the request: log the collected samples and return them
    pub fn finish(self) -> StatsSummary {
        let summary = self.snapshot();
        info!(
            "Total request time: {:.2} milliseconds [request_id: {}]",
            summary.total_ms, summary.request_id
        );
        info!("Number of inferences: {}", summary.inferences.len());
        for (i, inference) in summary.inferences.iter().enumerate() {
            info!("    - Inference {}: {:.2} milliseconds", i, inference.duration_ms);
        }
        if !summary.tool_calls.is_empty() {
            info!("Tool calls:");
            for tool in &summary.tool_calls {
                info!("   - {}: {:.2} milliseconds", tool.tool_name, tool.duration_ms);
            }
        }
        summary
    }

    // Every write is a single push; a poisoned buffer is still consistent.
    fn lock(&self) -> MutexGuard<'_, StatsBuffer> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TelemetrySink for RequestStats {
    fn track_inference(&self, duration: Duration) {
        self.lock().inferences.push(InferenceStat {
            duration_ms: duration_ms(duration),
        });
    }

    fn track_tool_call(&self, tool_name: &str, duration: Duration) {
        self.lock().tool_calls.push(ToolCallStat {
            tool_name: tool_name.to_string(),
            duration_ms: duration_ms(duration),
        });
    }
}

fn duration_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_are_recorded_in_order() {
        let stats = RequestStats::start();
        stats.track_inference(Duration::from_millis(120));
        stats.track_tool_call("get_restaurants", Duration::from_millis(15));
        stats.track_inference(Duration::from_millis(80));

        let summary = stats.finish();
        assert_eq!(summary.inferences.len(), 2);
        assert_eq!(summary.inferences[0].duration_ms, 120.0);
        assert_eq!(summary.inferences[1].duration_ms, 80.0);
        assert_eq!(summary.tool_calls[0].tool_name, "get_restaurants");
        assert_eq!(summary.tool_calls[0].duration_ms, 15.0);
    }

    #[test]
    fn test_clones_share_one_request() {
        let stats = RequestStats::start();
        let handle = stats.clone();
        handle.track_inference(Duration::from_millis(1));
        assert_eq!(stats.inference_count(), 1);
        assert_eq!(stats.request_id(), handle.request_id());
    }

    #[tokio::test]
    async fn test_concurrent_requests_are_isolated() {
        let first = RequestStats::start();
        let second = RequestStats::start();

        let a = {
            let stats = first.clone();
            tokio::spawn(async move {
                for _ in 0..10 {
                    stats.track_inference(Duration::from_millis(1));
                    tokio::task::yield_now().await;
                }
            })
        };
        let b = {
            let stats = second.clone();
            tokio::spawn(async move {
                for _ in 0..3 {
                    stats.track_inference(Duration::from_millis(1));
                    tokio::task::yield_now().await;
                }
            })
        };
        a.await.unwrap();
        b.await.unwrap();

        assert_eq!(first.inference_count(), 10);
        assert_eq!(second.inference_count(), 3);
        assert_ne!(first.request_id(), second.request_id());
    }
}
