//! Global setting of the charting tools.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use super::utility::get_file_path;

/// Setting filename inside the temp directory
const SETTING_FILENAME: &str = "engine_setting.json";

/// Default settings
fn default_settings() -> HashMap<String, SettingValue> {
    let mut settings = HashMap::new();

    // Log settings
    settings.insert("log.active".to_string(), SettingValue::Bool(true));
    settings.insert("log.level".to_string(), SettingValue::Int(20)); // INFO level
    settings.insert("log.console".to_string(), SettingValue::Bool(true));
    settings.insert("log.file".to_string(), SettingValue::Bool(true));

    // Datafeed settings
    settings.insert("datafeed.name".to_string(), SettingValue::String("yahoo".to_string()));
    settings.insert(
        "datafeed.host".to_string(),
        SettingValue::String("https://query1.finance.yahoo.com".to_string()),
    );
    settings.insert("datafeed.timeout".to_string(), SettingValue::Int(30));

    // Chart settings
    settings.insert("chart.folder".to_string(), SettingValue::String("charts".to_string()));
    settings.insert(
        "chart.plotly_js".to_string(),
        SettingValue::String("https://cdn.plot.ly/plotly-2.35.2.min.js".to_string()),
    );

    settings
}

/// A value of the settings file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Read-only settings: built-in defaults overlaid by a JSON file
#[derive(Debug, Clone)]
pub struct Settings {
    values: HashMap<String, SettingValue>,
}

impl Settings {
    /// Defaults overlaid by `engine_setting.json` of the temp directory
    pub fn new() -> Self {
        Self::from_file(&get_file_path(SETTING_FILENAME))
    }

    /// Defaults overlaid by the JSON object in `path`.
    ///
    /// A missing or malformed file leaves the defaults untouched.
    pub fn from_file(path: &Path) -> Self {
        let mut values = default_settings();
        match load_settings_file(path) {
            Ok(Some(overrides)) => values.extend(overrides),
            Ok(None) => {}
            Err(e) => eprintln!("ignoring settings file {}: {}", path.display(), e),
        }
        Self { values }
    }

    /// Only the built-in defaults
    pub fn with_defaults() -> Self {
        Self {
            values: default_settings(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            SettingValue::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            SettingValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

fn load_settings_file(
    path: &Path,
) -> Result<Option<HashMap<String, SettingValue>>, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&content)?))
}

/// Global settings instance
pub static SETTINGS: LazyLock<Settings> = LazyLock::new(Settings::new);
