use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ParcelaError, Result};
use crate::expander::DEFAULT_DUE_DAY;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_due_day")]
    pub due_day: u32,
}

fn default_due_day() -> u32 {
    DEFAULT_DUE_DAY
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            due_day: default_due_day(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("parcela")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Missing or corrupt settings fall back to defaults rather than failing —
/// the file is a convenience, not a requirement.
pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    if !(1..=31).contains(&settings.due_day) {
        return Err(ParcelaError::Settings(format!(
            "due day must be between 1 and 31, got {}",
            settings.due_day
        )));
    }
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| ParcelaError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}
