//! Monitor configuration.
//!
//! All tunables live in one immutable struct constructed at startup
//! and passed into the refresh loop. Nothing here is a global.

use std::time::Duration;

/// Configuration for the refresh loop and renderer.
///
/// # Example
///
/// ```rust
/// use agmon_tui::config::MonitorConfig;
///
/// let config = MonitorConfig::with_interval(2);
/// assert_eq!(config.refresh_interval.as_secs(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Sleep between refresh ticks.
    pub refresh_interval: Duration,

    /// Timeout for the HTTPS status request.
    pub request_timeout: Duration,

    /// Timeout for each `ps`/`lsof` subprocess call.
    pub lookup_timeout: Duration,

    /// Width of the aggregate credit bars.
    pub aggregate_bar_width: usize,

    /// Width of the per-model quota bars.
    pub model_bar_width: usize,

    /// Separator lines size to `min(terminal width, this cap)`.
    pub separator_cap: usize,

    /// Column width the model label is padded to.
    pub label_width: usize,

    /// Maximum characters of a model label before truncation.
    pub label_max: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(1),
            request_timeout: Duration::from_secs(1),
            lookup_timeout: Duration::from_secs(2),
            aggregate_bar_width: 20,
            model_bar_width: 15,
            separator_cap: 80,
            label_width: 35,
            label_max: 34,
        }
    }
}

impl MonitorConfig {
    /// Creates a configuration with a custom refresh interval in seconds.
    ///
    /// Intervals below one second are clamped up: the lookups behind a
    /// tick are subprocess calls and should not be spammed.
    pub fn with_interval(secs: u64) -> Self {
        Self {
            refresh_interval: Duration::from_secs(secs.max(1)),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = MonitorConfig::default();
        assert_eq!(config.refresh_interval, Duration::from_secs(1));
        assert_eq!(config.request_timeout, Duration::from_secs(1));
        assert_eq!(config.lookup_timeout, Duration::from_secs(2));
        assert_eq!(config.aggregate_bar_width, 20);
        assert_eq!(config.model_bar_width, 15);
        assert_eq!(config.separator_cap, 80);
        assert_eq!(config.label_width, 35);
        assert_eq!(config.label_max, 34);
    }

    #[test]
    fn test_with_interval() {
        let config = MonitorConfig::with_interval(5);
        assert_eq!(config.refresh_interval, Duration::from_secs(5));
        // Other fields keep their defaults
        assert_eq!(config.model_bar_width, 15);
    }

    #[test]
    fn test_with_interval_clamps_zero() {
        let config = MonitorConfig::with_interval(0);
        assert_eq!(config.refresh_interval, Duration::from_secs(1));
    }
}
