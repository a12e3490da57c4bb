use anyhow::{Context, anyhow, bail};
use serde::{Deserialize, Serialize};

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// If set, logs are written to this file instead of stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Filter directives in `RUST_LOG` syntax; `RUST_LOG` takes precedence
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: None,
            filter: default_log_filter(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Whether to pretty print the extracted records
    #[serde(default)]
    pub pretty: bool,
    /// Whether to skip input lines which are not a valid envelope instead of failing
    #[serde(default = "default_true")]
    pub skip_invalid: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            skip_invalid: true,
        }
    }
}

impl Config {
    /// Loads the configuration from `path` if given, otherwise from one of the default locations:
    ///
    /// 1. $XDG_CONFIG_HOME/instabot/instabot.toml
    /// 2. $XDG_CONFIG_HOME/instabot.toml
    /// 3. $HOME/.instabot.toml
    ///
    /// If no config is found, the default config is returned.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(installed_config()
                .map(Self::load)
                .transpose()?
                .unwrap_or_default()),
        }
    }

    /// Saves a new config file in case it does not exist.
    pub fn save_new(&self) -> anyhow::Result<()> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow!("could not find default config directory"))?;
        self.save_new_at(config_dir.join("instabot/instabot.toml"))
    }

    /// Saves a new config file at `path` in case it does not exist.
    pub fn save_new_at(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        // check that config won't be overridden
        if path.as_ref().exists() {
            bail!(
                "will not override config file at: {}",
                path.as_ref().display()
            );
        }
        self.save(path)
    }

    fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at: {}", path.display()))?;
        let config = toml::de::from_str(&content)
            .with_context(|| format!("invalid config at: {}", path.display()))?;
        Ok(config)
    }

    fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = toml::ser::to_string(self)?;
        let parent_dir = path
            .parent()
            .ok_or_else(|| anyhow!("invalid config path {}: no parent dir", path.display()))?;
        fs::create_dir_all(parent_dir).context("could not create config dir")?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Get the location of the first found default config file paths
/// according to the following order:
///
/// 1. $XDG_CONFIG_HOME/instabot/instabot.toml
/// 2. $XDG_CONFIG_HOME/instabot.toml
/// 3. $HOME/.instabot.toml
fn installed_config() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    let config_file = config_dir.join("instabot/instabot.toml");
    if config_file.exists() {
        return Some(config_file);
    }

    let config_file = config_dir.join("instabot.toml");
    if config_file.exists() {
        return Some(config_file);
    }

    let home_dir = dirs::home_dir()?;
    let config_file = home_dir.join(".instabot.toml");
    if config_file.exists() {
        return Some(config_file);
    }

    None
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
