//! Carousel tuning parameters.
//!
//! Every threshold the gesture interpreter and the navigation lock rely on lives in
//! [`CarouselConfig`]. Values are plain numbers (pixels, pixels per millisecond and
//! milliseconds) so they can be written directly in a TOML file when the `config`
//! feature is enabled.

use crate::error::{CarouselError, Result};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "config")]
use std::path::{Path, PathBuf};

/// Tuning for a single carousel controller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "config",
    derive(serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct CarouselConfig {
    /// Horizontal travel (px) that commits a swipe on its own
    pub distance_threshold: f64,

    /// Release velocity (px/ms) that commits a short flick
    pub velocity_threshold: f64,

    /// Minimum travel (px) a flick needs before velocity is considered
    pub secondary_distance_threshold: f64,

    /// Gestures held longer than this never commit
    pub max_gesture_time_ms: u64,

    /// Minimum gap between accepted navigation commands
    pub min_command_interval_ms: u64,

    /// How long a committed transition keeps the navigation lock
    pub transition_duration_ms: u64,

    /// Age limit for velocity samples
    pub sample_window_ms: u64,

    /// Multiplier from finger travel to preview offset
    pub feedback_scale: f64,

    /// Preview offset is clamped to `±feedback_limit` px
    pub feedback_limit: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            distance_threshold: 50.0,
            velocity_threshold: 0.3,
            secondary_distance_threshold: 15.0,
            max_gesture_time_ms: 500,
            min_command_interval_ms: 300,
            transition_duration_ms: 300,
            sample_window_ms: 100,
            feedback_scale: 0.2,
            feedback_limit: 40.0,
        }
    }
}

/// Named parameter sets for common carousel styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigProfile {
    /// Photo-card carousel: long throw, generous preview
    #[default]
    Standard,
    /// Touch-first card deck: short throw, quick transitions, subtle preview
    Touch,
    /// Small-screen card deck: slow 400 ms transitions, 350 ms command spacing, a
    /// 25 px flick distance and a modest ±25 px preview
    Compact,
}

impl ConfigProfile {
    pub fn name(self) -> &'static str {
        match self {
            ConfigProfile::Standard => "standard",
            ConfigProfile::Touch => "touch",
            ConfigProfile::Compact => "compact",
        }
    }

    /// Build the configuration this profile stands for.
    pub fn config(self) -> CarouselConfig {
        match self {
            ConfigProfile::Standard => CarouselConfig::default(),
            ConfigProfile::Touch => CarouselConfig {
                distance_threshold: 25.0,
                transition_duration_ms: 200,
                feedback_scale: 0.05,
                feedback_limit: 15.0,
                ..CarouselConfig::default()
            },
            ConfigProfile::Compact => CarouselConfig {
                secondary_distance_threshold: 25.0,
                min_command_interval_ms: 350,
                transition_duration_ms: 400,
                feedback_scale: 0.1,
                feedback_limit: 25.0,
                ..CarouselConfig::default()
            },
        }
    }
}

impl fmt::Display for ConfigProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigProfile {
    type Err = CarouselError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(ConfigProfile::Standard),
            "touch" => Ok(ConfigProfile::Touch),
            "compact" => Ok(ConfigProfile::Compact),
            other => Err(CarouselError::invalid_config(format!(
                "unknown profile '{other}' (expected standard, touch or compact)"
            ))),
        }
    }
}

impl CarouselConfig {
    /// Start a builder seeded with the default values.
    pub fn builder() -> CarouselConfigBuilder {
        CarouselConfigBuilder::new(Self::default())
    }

    /// Check the invariants the controller depends on.
    pub fn validate(&self) -> Result<()> {
        let thresholds = [
            ("distance_threshold", self.distance_threshold),
            ("velocity_threshold", self.velocity_threshold),
            (
                "secondary_distance_threshold",
                self.secondary_distance_threshold,
            ),
            ("feedback_scale", self.feedback_scale),
            ("feedback_limit", self.feedback_limit),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(CarouselError::invalid_config(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }

        if self.secondary_distance_threshold > self.distance_threshold {
            return Err(CarouselError::invalid_config(
                "secondary_distance_threshold must not exceed distance_threshold",
            ));
        }
        if self.sample_window_ms == 0 {
            return Err(CarouselError::invalid_config(
                "sample_window_ms must be positive",
            ));
        }
        if self.max_gesture_time_ms == 0 {
            return Err(CarouselError::invalid_config(
                "max_gesture_time_ms must be positive",
            ));
        }

        Ok(())
    }

    /// Clamp a raw horizontal displacement into the preview offset.
    pub fn feedback_offset(&self, dx: f64) -> f64 {
        (dx * self.feedback_scale).clamp(-self.feedback_limit, self.feedback_limit)
    }

    /// Read and validate a TOML configuration file.
    #[cfg(feature = "config")]
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            CarouselError::file_error(format!("cannot read {}", path.display()), err)
        })?;
        let config: CarouselConfig = toml::from_str(&raw)
            .map_err(|err| CarouselError::config(format!("{}: {err}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `<config dir>/swipedeck/config.toml`, falling back to defaults when absent.
    #[cfg(feature = "config")]
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    #[cfg(feature = "config")]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("swipedeck").join("config.toml"))
    }
}

/// Builder for [`CarouselConfig`] that validates on [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct CarouselConfigBuilder {
    config: CarouselConfig,
}

impl CarouselConfigBuilder {
    pub fn new(base: CarouselConfig) -> Self {
        Self { config: base }
    }

    pub fn from_profile(profile: ConfigProfile) -> Self {
        Self::new(profile.config())
    }

    pub fn distance_threshold(mut self, px: f64) -> Self {
        self.config.distance_threshold = px;
        self
    }

    pub fn velocity_threshold(mut self, px_per_ms: f64) -> Self {
        self.config.velocity_threshold = px_per_ms;
        self
    }

    pub fn secondary_distance_threshold(mut self, px: f64) -> Self {
        self.config.secondary_distance_threshold = px;
        self
    }

    pub fn max_gesture_time_ms(mut self, ms: u64) -> Self {
        self.config.max_gesture_time_ms = ms;
        self
    }

    pub fn min_command_interval_ms(mut self, ms: u64) -> Self {
        self.config.min_command_interval_ms = ms;
        self
    }

    pub fn transition_duration_ms(mut self, ms: u64) -> Self {
        self.config.transition_duration_ms = ms;
        self
    }

    pub fn sample_window_ms(mut self, ms: u64) -> Self {
        self.config.sample_window_ms = ms;
        self
    }

    pub fn feedback(mut self, scale: f64, limit: f64) -> Self {
        self.config.feedback_scale = scale;
        self.config.feedback_limit = limit;
        self
    }

    pub fn build(self) -> Result<CarouselConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CarouselConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.distance_threshold, 50.0);
        assert_eq!(config.min_command_interval_ms, 300);
    }

    #[test]
    fn every_profile_is_valid() {
        for profile in [
            ConfigProfile::Standard,
            ConfigProfile::Touch,
            ConfigProfile::Compact,
        ] {
            assert!(profile.config().validate().is_ok(), "{profile} is invalid");
        }
        assert_eq!(ConfigProfile::Touch.config().transition_duration_ms, 200);
        let compact = ConfigProfile::Compact.config();
        assert_eq!(compact.min_command_interval_ms, 350);
        assert_eq!(compact.transition_duration_ms, 400);
        assert_eq!(compact.distance_threshold, 50.0);
        assert_eq!(compact.secondary_distance_threshold, 25.0);
        assert_eq!(compact.feedback_offset(-400.0), -25.0);
    }

    #[test]
    fn profile_names_round_trip() {
        assert_eq!(
            "Touch".parse::<ConfigProfile>().unwrap(),
            ConfigProfile::Touch
        );
        assert_eq!(ConfigProfile::Compact.to_string(), "compact");
        assert!("wobbly".parse::<ConfigProfile>().is_err());
    }

    #[test]
    fn builder_overrides_fields() {
        let config = CarouselConfig::builder()
            .distance_threshold(60.0)
            .transition_duration_ms(450)
            .feedback(0.1, 20.0)
            .build()
            .unwrap();

        assert_eq!(config.distance_threshold, 60.0);
        assert_eq!(config.transition_duration_ms, 450);
        assert_eq!(config.feedback_limit, 20.0);
        assert_eq!(config.velocity_threshold, 0.3);
    }

    #[test]
    fn builder_rejects_inconsistent_thresholds() {
        let err = CarouselConfig::builder()
            .distance_threshold(10.0)
            .secondary_distance_threshold(20.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, CarouselError::InvalidConfig { .. }));

        assert!(CarouselConfig::builder()
            .velocity_threshold(f64::NAN)
            .build()
            .is_err());
        assert!(CarouselConfig::builder().sample_window_ms(0).build().is_err());
    }

    #[test]
    fn feedback_offset_is_scaled_and_clamped() {
        let config = CarouselConfig::default();
        assert_eq!(config.feedback_offset(50.0), 10.0);
        assert_eq!(config.feedback_offset(-500.0), -40.0);
        assert_eq!(config.feedback_offset(1000.0), 40.0);
    }

    #[cfg(feature = "config")]
    #[test]
    fn loads_partial_toml_with_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            "distance_threshold = 35.0\ntransition_duration_ms = 250\n",
        )
        .unwrap();

        let config = CarouselConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.distance_threshold, 35.0);
        assert_eq!(config.transition_duration_ms, 250);
        assert_eq!(config.min_command_interval_ms, 300);
    }

    #[cfg(feature = "config")]
    #[test]
    fn rejects_unknown_keys_and_invalid_values() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "swipe_magic = 3\n").unwrap();
        assert!(matches!(
            CarouselConfig::load_from_path(file.path()),
            Err(CarouselError::ConfigError { .. })
        ));

        std::fs::write(file.path(), "sample_window_ms = 0\n").unwrap();
        assert!(matches!(
            CarouselConfig::load_from_path(file.path()),
            Err(CarouselError::InvalidConfig { .. })
        ));
    }
}
