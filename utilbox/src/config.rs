// src/config.rs
use crate::core::password::PasswordOptions;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const APP_DIR: &str = "utilbox";
pub const CONFIG_FILE: &str = "config.toml";

/// User preferences persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub dark_mode: bool,
    pub password: PasswordDefaults,
    pub json: JsonDefaults,
    pub text: TextDefaults,
    pub qr: QrDefaults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordDefaults {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
    pub exclude_similar: bool,
    pub exclude_ambiguous: bool,
}

impl Default for PasswordDefaults {
    fn default() -> Self {
        PasswordOptions::default().into()
    }
}

impl From<PasswordOptions> for PasswordDefaults {
    fn from(options: PasswordOptions) -> Self {
        Self {
            length: options.length,
            uppercase: options.uppercase,
            lowercase: options.lowercase,
            numbers: options.numbers,
            symbols: options.symbols,
            exclude_similar: options.exclude_similar,
            exclude_ambiguous: options.exclude_ambiguous,
        }
    }
}

impl From<PasswordDefaults> for PasswordOptions {
    fn from(defaults: PasswordDefaults) -> Self {
        Self {
            length: defaults.length,
            uppercase: defaults.uppercase,
            lowercase: defaults.lowercase,
            numbers: defaults.numbers,
            symbols: defaults.symbols,
            exclude_similar: defaults.exclude_similar,
            exclude_ambiguous: defaults.exclude_ambiguous,
        }
    }
}

/// `indent` is stored as text (`"2"`, `"4"`, `"8"` or `"tab"`) and parsed on use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonDefaults {
    pub indent: String,
    pub sort_keys: bool,
}

impl Default for JsonDefaults {
    fn default() -> Self {
        Self {
            indent: String::from("2"),
            sort_keys: false,
        }
    }
}

/// Writing goals shown as progress by `count`. Zero turns a goal off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextDefaults {
    pub word_target: usize,
    pub character_target: usize,
}

impl Default for TextDefaults {
    fn default() -> Self {
        Self {
            word_target: 500,
            character_target: 2500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrDefaults {
    pub size: u32,
    pub error_level: String,
}

impl Default for QrDefaults {
    fn default() -> Self {
        Self {
            size: crate::core::qr::DEFAULT_SIZE,
            error_level: String::from("M"),
        }
    }
}

impl Preferences {
    /// Loads preferences from `path`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::Io`] if the file exists but cannot be read
    /// * [`ConfigError::Parse`] if it is not valid TOML for this schema
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no preferences file, using defaults");
            return Ok(Self::default());
        }
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let prefs = toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        debug!(path = %path.display(), "loaded preferences");
        Ok(prefs)
    }

    /// Writes preferences to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::Serialize`] if encoding fails
    /// * [`ConfigError::Io`] if the directory or file cannot be written
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io(parent.to_path_buf(), e))?;
        }
        fs::write(path, content).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "saved preferences");
        Ok(())
    }

    pub const fn set_dark_mode(&mut self, enabled: bool) {
        self.dark_mode = enabled;
    }

    /// Flips dark mode and returns the new value.
    pub const fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }
}

/// `<user config dir>/utilbox/config.toml`.
///
/// # Errors
///
/// [`ConfigError::NoConfigDir`] when the platform has no such directory.
pub fn default_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or(ConfigError::NoConfigDir)
}

/// The explicit path if given, otherwise [`default_path`].
///
/// # Errors
///
/// See [`default_path`].
pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    explicit.map_or_else(default_path, |path| Ok(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() -> Result<()> {
        let dir = TempDir::new()?;
        let prefs = Preferences::load(&dir.path().join("absent.toml"))?;
        assert_eq!(prefs, Preferences::default());
        assert!(!prefs.dark_mode);
        assert_eq!(prefs.password.length, 12);
        assert_eq!(prefs.qr.size, 256);
        assert_eq!(prefs.text.word_target, 500);
        Ok(())
    }

    #[test]
    fn test_save_then_load() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let mut prefs = Preferences::default();
        prefs.set_dark_mode(true);
        prefs.text.word_target = 750;
        prefs.save(&path)?;

        assert_eq!(Preferences::load(&path)?, prefs);
        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "dark_mode = true\n[password]\nlength = 20\n")?;

        let prefs = Preferences::load(&path)?;
        assert!(prefs.dark_mode);
        assert_eq!(prefs.password.length, 20);
        assert!(prefs.password.symbols);
        assert_eq!(prefs.json.indent, "2");
        Ok(())
    }

    #[test]
    fn test_invalid_file_is_parse_error() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "dark_mode = \"maybe\"")?;
        assert!(matches!(Preferences::load(&path), Err(ConfigError::Parse(..))));
        Ok(())
    }

    #[test]
    fn test_toggle_dark_mode() {
        let mut prefs = Preferences::default();
        assert!(prefs.toggle_dark_mode());
        assert!(!prefs.toggle_dark_mode());
    }

    #[test]
    fn test_resolve_path_prefers_explicit() -> Result<()> {
        let explicit = Path::new("/tmp/custom.toml");
        assert_eq!(resolve_path(Some(explicit))?, explicit.to_path_buf());
        Ok(())
    }
}
