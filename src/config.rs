//! Application configuration.
//!
//! Settings are stored as JSON. Fields missing from a file take their
//! default values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Current configuration file format version.
pub const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Drawing and interaction constants for the annotation surface.
///
/// Distances and widths are in native image pixels and do not change with
/// zoom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSettings {
    /// A polygon click closer than this to the first vertex closes it.
    pub close_radius: f32,
    pub marker_radius: f32,
    pub crosshair_half_length: f32,
    pub crosshair_width: f32,
    pub vertex_radius: f32,
    pub outline_width: f32,
    /// Fill alpha for translucent interiors, 0-255.
    pub fill_alpha: u8,
    pub dash_length: f32,
    pub dash_gap: f32,
    pub default_zoom_percent: f32,
    pub min_zoom_percent: f32,
    pub max_zoom_percent: f32,
    pub zoom_step_percent: f32,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            close_radius: 20.0,
            marker_radius: 12.0,
            crosshair_half_length: 8.0,
            crosshair_width: 2.0,
            vertex_radius: 5.0,
            outline_width: 3.0,
            fill_alpha: 0x40,
            dash_length: 5.0,
            dash_gap: 5.0,
            default_zoom_percent: 100.0,
            min_zoom_percent: 25.0,
            max_zoom_percent: 400.0,
            zoom_step_percent: 25.0,
        }
    }
}

impl SurfaceSettings {
    /// Panics on a range that [`SurfaceSettings::validate`] would reject.
    pub fn clamp_zoom(&self, percent: f32) -> f32 {
        percent.clamp(self.min_zoom_percent, self.max_zoom_percent)
    }

    /// Checks that every length is finite and positive and that the zoom
    /// range is ordered and contains the default.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lengths = [
            ("close_radius", self.close_radius),
            ("marker_radius", self.marker_radius),
            ("crosshair_half_length", self.crosshair_half_length),
            ("crosshair_width", self.crosshair_width),
            ("vertex_radius", self.vertex_radius),
            ("outline_width", self.outline_width),
            ("dash_length", self.dash_length),
            ("dash_gap", self.dash_gap),
            ("default_zoom_percent", self.default_zoom_percent),
            ("min_zoom_percent", self.min_zoom_percent),
            ("max_zoom_percent", self.max_zoom_percent),
            ("zoom_step_percent", self.zoom_step_percent),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if self.min_zoom_percent > self.max_zoom_percent {
            return Err(ConfigError::Invalid(format!(
                "min_zoom_percent ({}) is above max_zoom_percent ({})",
                self.min_zoom_percent, self.max_zoom_percent
            )));
        }
        if !(self.min_zoom_percent..=self.max_zoom_percent).contains(&self.default_zoom_percent) {
            return Err(ConfigError::Invalid(format!(
                "default_zoom_percent ({}) is outside {}..={}",
                self.default_zoom_percent, self.min_zoom_percent, self.max_zoom_percent
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub version: u32,

    #[serde(default)]
    pub log_level: LogLevel,

    #[serde(default)]
    pub surface: SurfaceSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            log_level: LogLevel::default(),
            surface: SurfaceSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }
        config.surface.validate()?;

        Ok(config)
    }

    pub fn default_filename() -> &'static str {
        "defect-annotate.json"
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("defect-annotate").join(Self::default_filename()))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The file to read: `explicit` if given, else the default location
    /// when a file exists there.
    pub fn locate(explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit.or_else(|| Self::default_path().filter(|p| p.exists()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = SurfaceSettings::default();
        assert_eq!(s.close_radius, 20.0);
        assert_eq!(s.marker_radius, 12.0);
        assert_eq!(s.fill_alpha, 0x40);
        assert_eq!(AppConfig::default().version, CONFIG_VERSION);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = AppConfig::from_json(r#"{"version":1,"surface":{"close_radius":30.0}}"#)
            .unwrap();
        assert_eq!(config.surface.close_radius, 30.0);
        assert_eq!(config.surface.marker_radius, 12.0);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_newer_version_rejected() {
        let err = AppConfig::from_json(r#"{"version":99}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::VersionTooNew {
                file_version: 99,
                ..
            }
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = AppConfig::default();
        config.log_level = LogLevel::Debug;
        let back = AppConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AppConfig::load(Path::new("/nonexistent/defect-annotate/config.json"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_explicit_path_wins() {
        let explicit = PathBuf::from("/tmp/custom.json");
        assert_eq!(AppConfig::locate(Some(explicit.clone())), Some(explicit));
    }

    #[test]
    fn test_inverted_zoom_range_rejected() {
        let err = AppConfig::from_json(r#"{"version":1,"surface":{"min_zoom_percent":500.0}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_non_positive_lengths_rejected() {
        for field in ["close_radius", "outline_width", "dash_gap", "zoom_step_percent"] {
            let json = format!(r#"{{"version":1,"surface":{{"{}":0.0}}}}"#, field);
            let err = AppConfig::from_json(&json).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid(ref msg) if msg.contains(field)),
                "{} was accepted",
                field
            );
        }
    }

    #[test]
    fn test_default_zoom_outside_range_rejected() {
        let json = r#"{"version":1,"surface":{"default_zoom_percent":10.0}}"#;
        assert!(matches!(AppConfig::from_json(json), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(SurfaceSettings::default().validate().is_ok());
    }

    #[test]
    fn test_clamp_zoom() {
        let s = SurfaceSettings::default();
        assert_eq!(s.clamp_zoom(10.0), 25.0);
        assert_eq!(s.clamp_zoom(150.0), 150.0);
        assert_eq!(s.clamp_zoom(1000.0), 400.0);
    }
}
