//! qrform runtime configuration handling
//!
//! Configuration only feeds the command-line front end; the library
//! operations take explicit arguments.

use crate::error::{Error, Result};
use crate::export::{DEFAULT_ALBUM, DEFAULT_FILE_NAME, PermissionStatus};
use crate::qr::{DEFAULT_SIZE, EccLevel, QrEncoder};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration structure persisted to disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrformConfig {
    /// QR rendering options
    pub render: RenderOptions,
    /// Export destination and permission handling
    pub export: ExportOptions,
    /// URI dispatch options
    pub dispatch: DispatchOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl QrformConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No qrform.toml / qrform.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrform.toml", "qrform.yaml", "qrform.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        let config_home = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(dirs::config_dir);
        if let Some(config_home) = config_home {
            let base = config_home.join("qrform");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply environment variable overrides after file/default loading.
    fn apply_env_overrides(&mut self) {
        self.render.apply_env_overrides();
        self.export.apply_env_overrides();
        self.dispatch.apply_env_overrides();
        self.logging.apply_env_overrides();
    }

    /// Build an encoder from the render options
    pub fn encoder(&self) -> QrEncoder {
        self.render.to_encoder()
    }
}

/// QR rendering options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Minimum edge length of exported images in pixels
    pub size: u32,
    /// Error correction level (L, M, Q, H)
    pub ecc: EccLevel,
    /// Draw the blank border around the code
    pub quiet_zone: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            ecc: EccLevel::M,
            quiet_zone: true,
        }
    }
}

impl RenderOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(size) = env::var("QRFORM_RENDER_SIZE") {
            if let Ok(parsed) = size.parse::<u32>() {
                self.size = parsed.max(21);
            }
        }
        if let Ok(ecc) = env::var("QRFORM_RENDER_ECC") {
            match ecc.parse::<EccLevel>() {
                Ok(level) => self.ecc = level,
                Err(err) => tracing::warn!("Ignoring QRFORM_RENDER_ECC: {err}"),
            }
        }
        if let Ok(quiet) = env::var("QRFORM_RENDER_QUIET_ZONE") {
            if let Some(flag) = parse_flag(&quiet) {
                self.quiet_zone = flag;
            }
        }
    }

    /// Produce an encoder with these settings
    pub fn to_encoder(&self) -> QrEncoder {
        QrEncoder::new()
            .with_size(self.size)
            .with_ecc_level(self.ecc)
            .with_quiet_zone(self.quiet_zone)
    }
}

/// How storage permission is obtained
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PermissionMode {
    /// Ask interactively on the terminal
    #[default]
    Prompt,
    /// Treat permission as already granted
    Granted,
    /// Always refuse
    Denied,
}

impl PermissionMode {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "prompt" | "ask" => Some(Self::Prompt),
            "granted" | "grant" | "yes" => Some(Self::Granted),
            "denied" | "deny" | "no" => Some(Self::Denied),
            _ => None,
        }
    }

    /// Fixed status for non-interactive modes
    pub fn fixed_status(self) -> Option<PermissionStatus> {
        match self {
            PermissionMode::Prompt => None,
            PermissionMode::Granted => Some(PermissionStatus::Granted),
            PermissionMode::Denied => Some(PermissionStatus::Denied),
        }
    }
}

/// Export destination options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Private working directory; defaults to `<data dir>/qrform`
    pub private_dir: Option<PathBuf>,
    /// Gallery root; defaults to the user's pictures directory
    pub gallery_dir: Option<PathBuf>,
    /// Album directory under the gallery root
    pub album: String,
    /// File name used for the staged image
    pub file_name: String,
    /// Permission handling
    pub permission: PermissionMode,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            private_dir: None,
            gallery_dir: None,
            album: DEFAULT_ALBUM.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            permission: PermissionMode::Prompt,
        }
    }
}

impl ExportOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(dir) = env::var("QRFORM_PRIVATE_DIR") {
            self.private_dir = Some(PathBuf::from(dir));
        }
        if let Ok(dir) = env::var("QRFORM_GALLERY_DIR") {
            self.gallery_dir = Some(PathBuf::from(dir));
        }
        if let Ok(album) = env::var("QRFORM_ALBUM") {
            if !album.trim().is_empty() {
                self.album = album;
            }
        }
        if let Ok(mode) = env::var("QRFORM_PERMISSION") {
            if let Some(parsed) = PermissionMode::parse(&mode) {
                self.permission = parsed;
            }
        }
    }

    /// Resolved private working directory
    pub fn resolved_private_dir(&self) -> Result<PathBuf> {
        match &self.private_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_local_dir()
                .map(|dir| dir.join("qrform"))
                .ok_or_else(|| {
                    Error::Config(
                        "Could not determine a data directory, set export.private_dir".to_string(),
                    )
                }),
        }
    }

    /// Resolved gallery root
    pub fn resolved_gallery_dir(&self) -> Result<PathBuf> {
        match &self.gallery_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::picture_dir()
                .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
                .ok_or_else(|| {
                    Error::Config(
                        "Could not determine a pictures directory, set export.gallery_dir"
                            .to_string(),
                    )
                }),
        }
    }
}

/// URI dispatch options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchOptions {
    /// Program used to open `sms:` / `mailto:` URIs (default `xdg-open` / `open`)
    pub opener: Option<String>,
}

impl DispatchOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(opener) = env::var("QRFORM_OPENER") {
            if opener.trim().is_empty() {
                self.opener = None;
            } else {
                self.opener = Some(opener);
            }
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRFORM_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in terminal logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("QRFORM_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("QRFORM_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("QRFORM_LOG_COLOR") {
            if let Some(flag) = parse_flag(&color) {
                self.color = flag;
            }
        }
        if let Ok(rotation) = env::var("QRFORM_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::from_str(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Some(true),
        "0" | "false" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = QrformConfig::default();
        assert_eq!(config.render.size, DEFAULT_SIZE);
        assert_eq!(config.export.album, "Download");
        assert_eq!(config.export.file_name, "qrcode.png");
        assert_eq!(config.export.permission, PermissionMode::Prompt);
    }

    #[test]
    fn test_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qrform.toml");
        fs::write(
            &path,
            r#"
[render]
size = 320
ecc = "H"

[export]
album = "QR Codes"
gallery_dir = "/tmp/gallery"
permission = "granted"

[logging]
level = "debug"
rotation = "daily"
"#,
        )
        .unwrap();

        let config = QrformConfig::from_file(&path).unwrap();
        assert_eq!(config.render.size, 320);
        assert_eq!(config.render.ecc, EccLevel::H);
        assert!(config.render.quiet_zone);
        assert_eq!(config.export.album, "QR Codes");
        assert_eq!(
            config.export.resolved_gallery_dir().unwrap(),
            PathBuf::from("/tmp/gallery")
        );
        assert_eq!(
            config.export.permission.fixed_status(),
            Some(PermissionStatus::Granted)
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.rotation, Some(LogRotation::Daily));
    }

    #[test]
    fn test_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qrform.yaml");
        fs::write(&path, "export:\n  permission: denied\ndispatch:\n  opener: firefox\n").unwrap();

        let config = QrformConfig::from_file(&path).unwrap();
        assert_eq!(config.export.permission, PermissionMode::Denied);
        assert_eq!(config.dispatch.opener.as_deref(), Some("firefox"));
        assert_eq!(config.render.size, DEFAULT_SIZE);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qrform.ini");
        fs::write(&path, "").unwrap();
        assert!(matches!(
            QrformConfig::from_file(&path),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_permission_mode_parse() {
        assert_eq!(PermissionMode::parse("ASK"), Some(PermissionMode::Prompt));
        assert_eq!(PermissionMode::parse("deny"), Some(PermissionMode::Denied));
        assert_eq!(PermissionMode::parse("maybe"), None);
    }
}
