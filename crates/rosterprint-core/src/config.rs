//! Application configuration management.
//!
//! Holds the store URL and the fixed text printed on every sheet (school,
//! event, signing director, logo).
//!
//! Configuration is stored at `~/.config/rosterprint/config.json`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Application name used for config directory paths
const APP_NAME: &str = "rosterprint";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable that overrides `script_url`
pub const SCRIPT_URL_ENV: &str = "ROSTERPRINT_SCRIPT_URL";

/// Logo shown at the top right of every sheet
pub const DEFAULT_LOGO_URL: &str =
    "https://img2.pic.in.th/pic/Gemini_Generated_Image_u2dku8u2dku8u2dk.png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Published Apps Script web app URL.
    pub script_url: Option<String>,
    pub school_name: String,
    pub event_name: String,
    /// Director who signs the certification, printed under the signature line.
    pub director_name: String,
    pub logo_url: Option<String>,
    pub show_signature: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            script_url: None,
            school_name: "โรงเรียนเทศบาล 1 วัดพรหมวิหาร".to_string(),
            event_name:
                "การแข่งขันกีฬากลุ่มเคลือข่ายพัฒนาการศึกษาท้องถิ่นเชียงรายสุดถิ่นไทย “แม่จันเกมส์”"
                    .to_string(),
            director_name: "นายประเทือง  เสนรังสี".to_string(),
            logo_url: Some(DEFAULT_LOGO_URL.to_string()),
            show_signature: true,
        }
    }
}

/// A config field that can be changed from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ScriptUrl,
    SchoolName,
    EventName,
    DirectorName,
    LogoUrl,
    ShowSignature,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 6] = [
        ConfigKey::ScriptUrl,
        ConfigKey::SchoolName,
        ConfigKey::EventName,
        ConfigKey::DirectorName,
        ConfigKey::LogoUrl,
        ConfigKey::ShowSignature,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::ScriptUrl => "script_url",
            ConfigKey::SchoolName => "school_name",
            ConfigKey::EventName => "event_name",
            ConfigKey::DirectorName => "director_name",
            ConfigKey::LogoUrl => "logo_url",
            ConfigKey::ShowSignature => "show_signature",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ConfigKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = ConfigKey::ALL.iter().map(|k| k.name()).collect();
                format!("unknown config key '{}' (expected one of {})", s, names.join(", "))
            })
    }
}

impl Config {
    /// Load the config file, then apply the environment override.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_script_url_override(std::env::var(SCRIPT_URL_ENV).ok());
        Ok(config)
    }

    /// Load the config file as stored, without environment overrides.
    pub fn load_file() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };
        debug!(path = %path.display(), has_url = config.script_url.is_some(), "Loaded config");
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        debug!(path = %path.display(), "Saved config");
        Ok(())
    }

    /// Set one field from its text form. A blank value clears the optional
    /// URL fields.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        let value = value.trim();
        let optional = || (!value.is_empty()).then(|| value.to_string());
        match key {
            ConfigKey::ScriptUrl => self.script_url = optional(),
            ConfigKey::SchoolName => self.school_name = value.to_string(),
            ConfigKey::EventName => self.event_name = value.to_string(),
            ConfigKey::DirectorName => self.director_name = value.to_string(),
            ConfigKey::LogoUrl => self.logo_url = optional(),
            ConfigKey::ShowSignature => {
                self.show_signature = match value.to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    other => bail!("show_signature must be true or false, got '{}'", other),
                }
            }
        }
        Ok(())
    }

    /// Current value of one field, `None` when an optional field is unset.
    pub fn get(&self, key: ConfigKey) -> Option<String> {
        match key {
            ConfigKey::ScriptUrl => self.script_url.clone(),
            ConfigKey::SchoolName => Some(self.school_name.clone()),
            ConfigKey::EventName => Some(self.event_name.clone()),
            ConfigKey::DirectorName => Some(self.director_name.clone()),
            ConfigKey::LogoUrl => self.logo_url.clone(),
            ConfigKey::ShowSignature => Some(self.show_signature.to_string()),
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// A non-blank override replaces the configured URL.
    fn apply_script_url_override(&mut self, value: Option<String>) {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            self.script_url = Some(url.trim().to_string());
        }
    }

    pub fn script_url(&self) -> Result<&str> {
        self.script_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No store URL configured. Set {} or add \"script_url\" to {}",
                    SCRIPT_URL_ENV,
                    Self::config_path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|_| CONFIG_FILE.to_string())
                )
            })
    }
}
