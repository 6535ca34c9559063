//! Metrics collection and monitoring for the songbook service
//!
//! Counters live in a registry owned by the application state rather than
//! Prometheus' default registry, so several instances (tests) can coexist.

use crate::core::Result;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};
use std::time::Duration;

/// GraphQL request and catalog size metrics
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    /// Total number of GraphQL requests executed
    pub requests: IntCounter,
    /// Total number of GraphQL requests whose response carried errors
    pub request_errors: IntCounter,
    /// Histogram of request execution durations in seconds
    pub request_duration: Histogram,
    /// Current number of stored songs
    pub songs: IntGauge,
    /// Current number of stored authors
    pub authors: IntGauge,
}

impl Metrics {
    /// Create metrics registered in a fresh registry
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let requests = IntCounter::new(
            "songbook_graphql_requests_total",
            "Total number of GraphQL requests executed",
        )?;
        let request_errors = IntCounter::new(
            "songbook_graphql_request_errors_total",
            "Total number of GraphQL requests answered with errors",
        )?;
        let request_duration = Histogram::with_opts(
            HistogramOpts::new(
                "songbook_graphql_request_duration_seconds",
                "GraphQL request execution duration in seconds",
            )
            .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
        )?;
        let songs = IntGauge::new("songbook_songs", "Number of songs in the catalog")?;
        let authors = IntGauge::new("songbook_authors", "Number of authors in the catalog")?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(request_errors.clone()))?;
        registry.register(Box::new(request_duration.clone()))?;
        registry.register(Box::new(songs.clone()))?;
        registry.register(Box::new(authors.clone()))?;

        Ok(Self {
            registry,
            requests,
            request_errors,
            request_duration,
            songs,
            authors,
        })
    }

    /// Record one executed request
    pub fn observe_request(&self, elapsed: Duration, failed: bool) {
        self.requests.inc();
        if failed {
            self.request_errors.inc();
        }
        self.request_duration.observe(elapsed.as_secs_f64());
    }

    /// Update catalog size gauges
    pub fn set_catalog_size(&self, songs: usize, authors: usize) {
        self.songs.set(songs as i64);
        self.authors.set(authors as i64);
    }

    /// Render all metrics in the Prometheus text format
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| crate::core::Error::internal(format!("metrics are not UTF-8: {}", e)))
    }
}

/// Simple timer for measuring operation durations
pub struct Timer {
    start: std::time::Instant,
}

impl Timer {
    /// Start a new timer
    pub fn start() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }

    /// Time elapsed since start
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_and_render() {
        let metrics = Metrics::new().unwrap();
        metrics.observe_request(Duration::from_millis(2), false);
        metrics.observe_request(Duration::from_millis(3), true);
        metrics.set_catalog_size(5, 3);

        assert_eq!(metrics.requests.get(), 2);
        assert_eq!(metrics.request_errors.get(), 1);

        let text = metrics.render().unwrap();
        assert!(text.contains("songbook_graphql_requests_total 2"));
        assert!(text.contains("songbook_songs 5"));
        assert!(text.contains("songbook_authors 3"));
    }

    #[test]
    fn test_independent_registries() {
        let first = Metrics::new().unwrap();
        let second = Metrics::new().unwrap();
        first.requests.inc();
        assert_eq!(second.requests.get(), 0);
    }
}
