//! Configuration loading from TOML files.
//!
//! Lookup order:
//! 1. `$MTX_CONFIG` environment variable (the file must exist)
//! 2. `~/.config/mtx/config.toml` (skipped when absent)
//! 3. Built-in defaults (every key is optional)

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::{env, fmt, fs};

use anyhow::{Context, Result};
use mtx_core::Border;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub trace: TraceConfig,
}

/// Matrix rendering settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Fixed number of decimals per cell. Default: shortest exact form.
    pub precision: Option<usize>,
    pub border: Border,
}

/// Extra logging switches layered on top of `RUST_LOG`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Log matrix copies, moves and drops at debug level.
    pub lifecycle: bool,
}

/// Where the configuration is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path named by `$MTX_CONFIG`. It must exist.
    Explicit(PathBuf),
    /// `~/.config/mtx/config.toml`. Optional.
    Home(PathBuf),
    /// No `$MTX_CONFIG` and no `$HOME`.
    Defaults,
}

impl ConfigSource {
    pub fn resolve() -> Self {
        Self::from_vars(env::var_os("MTX_CONFIG"), env::var_os("HOME"))
    }

    fn from_vars(explicit: Option<OsString>, home: Option<OsString>) -> Self {
        match (explicit, home) {
            (Some(p), _) if !p.is_empty() => Self::Explicit(PathBuf::from(p)),
            (_, Some(h)) if !h.is_empty() => {
                Self::Home(Path::new(&h).join(".config").join("mtx").join("config.toml"))
            }
            _ => Self::Defaults,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Home(p) => Some(p),
            Self::Defaults => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "{} (from $MTX_CONFIG)", p.display()),
            Self::Home(p) if p.exists() => write!(f, "{} (loaded)", p.display()),
            Self::Home(p) => write!(f, "{} (not found, using defaults)", p.display()),
            Self::Defaults => write!(f, "no config path resolved (using defaults)"),
        }
    }
}

impl Config {
    /// Read the config named by `source`. A missing home config falls back
    /// to defaults; a missing `$MTX_CONFIG` file is an error.
    pub fn load(source: &ConfigSource) -> Result<Self> {
        match source {
            ConfigSource::Explicit(p) => Self::from_file(p),
            ConfigSource::Home(p) if p.exists() => Self::from_file(p),
            ConfigSource::Home(_) | ConfigSource::Defaults => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.display.precision, None);
        assert_eq!(config.display.border, Border::Unicode);
        assert!(!config.trace.lifecycle);
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
[display]
precision = 3
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.display.precision, Some(3));
        // Other fields should be defaults
        assert_eq!(config.display.border, Border::Unicode);
        assert!(!config.trace.lifecycle);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[display]
precision = 2
border = "ascii"

[trace]
lifecycle = true
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.display.precision, Some(2));
        assert_eq!(config.display.border, Border::Ascii);
        assert!(config.trace.lifecycle);
    }

    #[test]
    fn test_source_prefers_explicit_path() {
        let source = ConfigSource::from_vars(Some("/etc/mtx.toml".into()), Some("/home/u".into()));
        assert_eq!(source, ConfigSource::Explicit(PathBuf::from("/etc/mtx.toml")));
    }

    #[test]
    fn test_source_falls_back_to_home() {
        let source = ConfigSource::from_vars(Some("".into()), Some("/home/u".into()));
        assert_eq!(
            source.path(),
            Some(Path::new("/home/u/.config/mtx/config.toml"))
        );
        assert_eq!(ConfigSource::from_vars(None, None), ConfigSource::Defaults);
    }

    #[test]
    fn test_load_missing_home_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let source = ConfigSource::Home(dir.path().join("config.toml"));
        let config = Config::load(&source).unwrap();
        assert_eq!(config.display.border, Border::Unicode);
        assert!(source.to_string().contains("not found"));
    }

    #[test]
    fn test_load_missing_explicit_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = ConfigSource::Explicit(dir.path().join("absent.toml"));
        let err = Config::load(&source).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[display]\nborder = \"ascii\"\n").unwrap();

        let config = Config::load(&ConfigSource::Home(path.clone())).unwrap();
        assert_eq!(config.display.border, Border::Ascii);
        assert!(ConfigSource::Home(path).to_string().contains("(loaded)"));
    }

    #[test]
    fn test_parse_bad_border() {
        let toml_str = r#"
[display]
border = "double"
"#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }
}
