use anyhow::{anyhow, bail, Context, Result};
use dotenv::dotenv;
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

const CONFIG_FILE: &str = "zettel2obsidian.toml";
const MEDIA_DIR_VAR: &str = "ZETTEL2OBSIDIAN_MEDIA_DIR";
const CONFIRM_CLEAR_VAR: &str = "ZETTEL2OBSIDIAN_CONFIRM_CLEAR";
const REPORT_VAR: &str = "ZETTEL2OBSIDIAN_REPORT";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Subdirectory of the input copied recursively into the output.
    pub media_dir: String,
    /// Ask before clearing an output directory that already has contents.
    pub confirm_clear: bool,
    /// Where to write a JSON summary of the run, if anywhere.
    pub report_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            media_dir: String::from("media"),
            confirm_clear: false,
            report_path: None,
        }
    }
}

impl Config {
    /// Loads `.env`, then the first config file found, then environment
    /// overrides on top. Built-in defaults fill whatever is left.
    pub fn new() -> Result<Self> {
        dotenv().ok();

        let mut config = Self::from_file()?.unwrap_or_default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        if let Ok(home) = std::env::var("HOME") {
            paths.push(
                Path::new(&home)
                    .join(".config")
                    .join("zettel2obsidian")
                    .join("config.toml"),
            );
        }
        paths
    }

    fn from_file() -> Result<Option<Self>> {
        for path in Self::config_paths() {
            if let Ok(content) = std::fs::read_to_string(&path) {
                let config = Self::from_toml(&content)
                    .with_context(|| format!("invalid config file '{}'", path.display()))?;
                return Ok(Some(config));
            }
        }
        Ok(None)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Applies overrides looked up by environment variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(media_dir) = lookup(MEDIA_DIR_VAR) {
            self.media_dir = media_dir;
        }
        if let Some(value) = lookup(CONFIRM_CLEAR_VAR) {
            self.confirm_clear = parse_bool(CONFIRM_CLEAR_VAR, &value)?;
        }
        if let Some(path) = lookup(REPORT_VAR) {
            self.report_path = (!path.is_empty()).then(|| PathBuf::from(path));
        }
        Ok(())
    }

    /// The media directory must be a single plain path component so the copy
    /// stays inside the input and output roots.
    pub fn validate(&self) -> Result<()> {
        let mut components = Path::new(&self.media_dir).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => bail!(
                "media_dir must be a single directory name, got '{}'",
                self.media_dir
            ),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow!("{key} must be a boolean, got '{other}'")),
    }
}
