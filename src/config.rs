//! Viewer configuration.
//!
//! Defaults can be overridden from the environment:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `PIXCAT_COLOR` | `color_profile` (`truecolor`, `256`, `ansi`) |
//! | `PIXCAT_HTTP_TIMEOUT` | `http_timeout_secs` |
//! | `PIXCAT_LOG` | `log_file` |
//! | `PIXCAT_LOG_LEVEL` | `log_level` |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::animation::DEFAULT_MIN_FRAME_DELAY_CS;
use crate::color::ColorProfile;

pub const ENV_COLOR: &str = "PIXCAT_COLOR";
pub const ENV_HTTP_TIMEOUT: &str = "PIXCAT_HTTP_TIMEOUT";
pub const ENV_LOG: &str = "PIXCAT_LOG";
pub const ENV_LOG_LEVEL: &str = "PIXCAT_LOG_LEVEL";

/// Configuration for a viewer session.
///
/// # Example
///
/// ```
/// use pixcat::config::ViewerConfig;
///
/// let config = ViewerConfig::default()
///     .with_vertical_margin(2)
///     .with_http_timeout_secs(5);
/// assert_eq!(config.vertical_margin, 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Forced color profile; `None` means detect from the terminal
    pub color_profile: Option<ColorProfile>,
    /// Pixel rows kept free below the image (default: 4)
    pub vertical_margin: u32,
    /// Request timeout for network sources (default: 30)
    pub http_timeout_secs: u64,
    /// Write logs to this file when set
    pub log_file: Option<PathBuf>,
    /// Log filter directive (default: "info")
    pub log_level: String,
    /// Delay used for frames that declare none (default: 10)
    pub min_frame_delay_cs: u16,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            color_profile: None,
            vertical_margin: 4,
            http_timeout_secs: 30,
            log_file: None,
            log_level: "info".to_string(),
            min_frame_delay_cs: DEFAULT_MIN_FRAME_DELAY_CS,
        }
    }
}

impl ViewerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color_profile(mut self, profile: ColorProfile) -> Self {
        self.color_profile = Some(profile);
        self
    }

    pub fn with_vertical_margin(mut self, margin: u32) -> Self {
        self.vertical_margin = margin;
        self
    }

    pub fn with_http_timeout_secs(mut self, secs: u64) -> Self {
        self.http_timeout_secs = secs;
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Zero is raised to one so playback can never spin.
    pub fn with_min_frame_delay_cs(mut self, delay_cs: u16) -> Self {
        self.min_frame_delay_cs = delay_cs.max(1);
        self
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// The configured profile, or the detected one when none is forced.
    pub fn resolve_color_profile(&self) -> ColorProfile {
        self.color_profile.unwrap_or_else(ColorProfile::detect)
    }

    /// Defaults with any `PIXCAT_*` overrides applied.
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = env::var(ENV_COLOR) {
            match value.parse::<ColorProfile>() {
                Ok(profile) => config.color_profile = Some(profile),
                Err(e) => tracing::warn!("Ignoring {}: {}", ENV_COLOR, e),
            }
        }

        if let Ok(value) = env::var(ENV_HTTP_TIMEOUT) {
            match value.trim().parse::<u64>() {
                Ok(secs) => config.http_timeout_secs = secs,
                Err(_) => tracing::warn!("Ignoring {}: not a number: {}", ENV_HTTP_TIMEOUT, value),
            }
        }

        if let Some(path) = env::var_os(ENV_LOG).filter(|p| !p.is_empty()) {
            config.log_file = Some(PathBuf::from(path));
        }

        if let Ok(level) = env::var(ENV_LOG_LEVEL) {
            if !level.trim().is_empty() {
                config.log_level = level.trim().to_string();
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [ENV_COLOR, ENV_HTTP_TIMEOUT, ENV_LOG, ENV_LOG_LEVEL] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.color_profile, None);
        assert_eq!(config.vertical_margin, 4);
        assert_eq!(config.http_timeout(), Duration::from_secs(30));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.min_frame_delay_cs, 10);
    }

    #[test]
    fn test_builder() {
        let config = ViewerConfig::new()
            .with_color_profile(ColorProfile::Ansi256)
            .with_log_file("/tmp/pixcat.log")
            .with_log_level("debug")
            .with_min_frame_delay_cs(0);
        assert_eq!(config.resolve_color_profile(), ColorProfile::Ansi256);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/pixcat.log")));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.min_frame_delay_cs, 1);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        env::set_var(ENV_COLOR, "256");
        env::set_var(ENV_HTTP_TIMEOUT, "5");
        env::set_var(ENV_LOG, "/tmp/pixcat-test.log");
        env::set_var(ENV_LOG_LEVEL, "pixcat=trace");

        let config = ViewerConfig::from_env();
        assert_eq!(config.color_profile, Some(ColorProfile::Ansi256));
        assert_eq!(config.http_timeout_secs, 5);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/pixcat-test.log")));
        assert_eq!(config.log_level, "pixcat=trace");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_garbage() {
        clear_env();
        env::set_var(ENV_COLOR, "sepia");
        env::set_var(ENV_HTTP_TIMEOUT, "soon");
        env::set_var(ENV_LOG, "");

        let config = ViewerConfig::from_env();
        assert_eq!(config, ViewerConfig::default());
        clear_env();
    }
}
