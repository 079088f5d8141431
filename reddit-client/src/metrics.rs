use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMetrics {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub rate_limited_requests: u64,
    pub average_response_time: Duration,
    pub last_request_time: Option<SystemTime>,
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self {
            total_requests: 0,
            successful_requests: 0,
            failed_requests: 0,
            rate_limited_requests: 0,
            average_response_time: Duration::from_millis(0),
            last_request_time: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequestMetrics {
    pub response_time: Duration,
    pub success: bool,
    pub rate_limited: bool,
}

/// Shared counters over the outbound search calls.
#[derive(Debug)]
pub struct MetricsCollector {
    metrics: Arc<RwLock<ApiMetrics>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            metrics: Arc::new(RwLock::new(ApiMetrics::default())),
        }
    }

    pub async fn record_request(&self, request_metrics: RequestMetrics) {
        let mut metrics = self.metrics.write().await;

        metrics.total_requests += 1;
        metrics.last_request_time = Some(SystemTime::now());

        if request_metrics.success {
            metrics.successful_requests += 1;
        } else {
            metrics.failed_requests += 1;
        }

        if request_metrics.rate_limited {
            metrics.rate_limited_requests += 1;
        }

        // Running mean over all requests so far
        let total_time = metrics.average_response_time * (metrics.total_requests - 1) as u32
            + request_metrics.response_time;
        metrics.average_response_time = total_time / metrics.total_requests as u32;
    }

    pub async fn get_metrics(&self) -> ApiMetrics {
        self.metrics.read().await.clone()
    }

    pub async fn reset_metrics(&self) {
        let mut metrics = self.metrics.write().await;
        *metrics = ApiMetrics::default();
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_metrics_collection() {
        let collector = MetricsCollector::new();

        collector
            .record_request(RequestMetrics {
                response_time: Duration::from_millis(150),
                success: true,
                rate_limited: false,
            })
            .await;

        let metrics = collector.get_metrics().await;
        assert_eq!(metrics.total_requests, 1);
        assert_eq!(metrics.successful_requests, 1);
        assert_eq!(metrics.failed_requests, 0);
        assert_eq!(metrics.average_response_time, Duration::from_millis(150));
        assert!(metrics.last_request_time.is_some());
    }

    #[tokio::test]
    async fn test_failure_and_rate_limit_counters() {
        let collector = MetricsCollector::new();

        collector
            .record_request(RequestMetrics {
                response_time: Duration::from_millis(100),
                success: false,
                rate_limited: true,
            })
            .await;
        collector
            .record_request(RequestMetrics {
                response_time: Duration::from_millis(200),
                success: true,
                rate_limited: false,
            })
            .await;

        let metrics = collector.get_metrics().await;
        assert_eq!(metrics.total_requests, 2);
        assert_eq!(metrics.failed_requests, 1);
        assert_eq!(metrics.rate_limited_requests, 1);
        assert_eq!(metrics.average_response_time, Duration::from_millis(150));
    }

    #[tokio::test]
    async fn test_reset() {
        let collector = MetricsCollector::new();
        collector
            .record_request(RequestMetrics {
                response_time: Duration::from_millis(10),
                success: true,
                rate_limited: false,
            })
            .await;

        collector.reset_metrics().await;
        let metrics = collector.get_metrics().await;
        assert_eq!(metrics.total_requests, 0);
        assert!(metrics.last_request_time.is_none());
    }
}
