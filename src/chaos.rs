//! Injectable latency and failure strategy for the simulated backend.

use rand::Rng;
use std::time::Duration;

use crate::config::Config;

/// Per-call random latency and failure injection. Each call draws
/// independently; a zeroed strategy makes the backend deterministic.
#[derive(Debug, Clone, Copy)]
pub struct Chaos {
    latency_min_ms: u64,
    latency_max_ms: u64,
    error_rate: f64,
}

impl Chaos {
    pub fn new(config: &Config) -> Self {
        Self::with_params(
            config.latency_min_ms,
            config.latency_max_ms,
            config.error_rate,
        )
    }

    pub fn with_params(latency_min_ms: u64, latency_max_ms: u64, error_rate: f64) -> Self {
        // A non-finite rate disables failure injection; clamp would pass
        // NaN through and gen_bool panics on it.
        let error_rate = if error_rate.is_finite() {
            error_rate.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            latency_min_ms,
            latency_max_ms: latency_max_ms.max(latency_min_ms),
            error_rate,
        }
    }

    /// No latency, no failures. Used by tests.
    pub fn disabled() -> Self {
        Self::with_params(0, 0, 0.0)
    }

    /// No latency, every write fails. Used by rollback tests.
    pub fn always_fail() -> Self {
        Self::with_params(0, 0, 1.0)
    }

    /// Suspend the current task for a random duration in the configured
    /// window. The rendering thread is never blocked.
    pub async fn latency(&self) {
        if self.latency_max_ms == 0 {
            return;
        }
        let ms = rand::thread_rng().gen_range(self.latency_min_ms..=self.latency_max_ms);
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    pub fn should_fail(&self) -> bool {
        self.error_rate > 0.0 && rand::thread_rng().gen_bool(self.error_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_error_rate_never_fails() {
        assert!(!Chaos::with_params(0, 0, f64::NAN).should_fail());
        assert!(!Chaos::with_params(0, 0, f64::INFINITY).should_fail());
    }

    #[test]
    fn error_rate_is_clamped_to_unit_interval() {
        assert!(Chaos::with_params(0, 0, 7.0).should_fail());
        assert!(!Chaos::with_params(0, 0, -1.0).should_fail());
    }
}
