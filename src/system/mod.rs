//! System utilities and monitoring
//!
//! Metrics and health reporting for the running service.

pub mod metrics;

pub use metrics::{Metrics, Timer};

pub mod health {
    //! Health checks
    use serde::Serialize;
    use std::time::{Duration, Instant};

    /// Process start reference for uptime reporting
    #[derive(Debug, Clone, Copy)]
    pub struct Uptime {
        started: Instant,
    }

    impl Uptime {
        /// Start counting from now
        pub fn start() -> Self {
            Self { started: Instant::now() }
        }

        /// Time since start
        pub fn elapsed(&self) -> Duration {
            self.started.elapsed()
        }
    }

    /// Health report served on `/health`
    #[derive(Debug, Clone, Serialize)]
    pub struct HealthStatus {
        /// Current system status
        pub status: String,
        /// Uptime formatted as `1h 2m 3s`
        pub uptime: String,
        /// Service version
        pub version: String,
    }

    impl HealthStatus {
        /// Healthy report for the given uptime
        pub fn healthy(uptime: Duration) -> Self {
            Self {
                status: "healthy".to_string(),
                uptime: format_uptime(uptime),
                version: crate::VERSION.to_string(),
            }
        }
    }

    /// Format a duration as `1h 2m 3s`
    pub fn format_uptime(uptime: Duration) -> String {
        let secs = uptime.as_secs();
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_format_uptime() {
            assert_eq!(format_uptime(Duration::from_secs(5025)), "1h 23m 45s");
            assert_eq!(format_uptime(Duration::ZERO), "0h 0m 0s");
        }
    }
}
