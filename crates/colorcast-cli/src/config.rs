//! Shell configuration read from the environment.

use std::time::Duration;

/// Quiet period before a pending intensity change is rendered.
const DEFAULT_DEBOUNCE_MS: u64 = 50;
/// Tracing filter used when `COLORCAST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info";
/// Starting blend strength, in percent.
pub const DEFAULT_INTENSITY_PERCENT: f32 = 85.0;

/// Runtime configuration for the `colorcast` shell.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Debounce window for interactive intensity changes.
    pub debounce: Duration,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl AppConfig {
    /// Build from a variable lookup, falling back to defaults for anything
    /// missing or unparsable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            debounce: Duration::from_millis(
                lookup("COLORCAST_DEBOUNCE_MS")
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or(DEFAULT_DEBOUNCE_MS),
            ),
            log_filter: lookup("COLORCAST_LOG")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

/// Convert a slider percentage to a blend intensity.
pub fn percent_to_intensity(percent: f32) -> f32 {
    percent / 100.0
}
