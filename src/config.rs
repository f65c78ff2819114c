use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Appended to a document's viewer-script URL to get its data URL.
    #[serde(default = "default_data_url_suffix")]
    pub data_url_suffix: String,
    #[serde(default = "default_dialog_width")]
    pub dialog_width: String,
    /// Word placed before the document title in the dialog heading.
    #[serde(default = "default_title_prefix")]
    pub title_prefix: String,
    #[serde(default = "default_spinner")]
    pub spinner: bool,
}

fn default_data_url_suffix() -> String { "on".into() }
fn default_dialog_width() -> String { "90%".into() }
fn default_title_prefix() -> String { "Embed".into() }
fn default_spinner() -> bool { true }

impl Default for PublishConfig {
    fn default() -> Self {
        PublishConfig {
            data_url_suffix: default_data_url_suffix(),
            dialog_width: default_dialog_width(),
            title_prefix: default_title_prefix(),
            spinner: default_spinner(),
        }
    }
}

impl PublishConfig {
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Read settings from `path`. A missing file yields the defaults; an
    /// unreadable or invalid one is reported and also yields the defaults.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %path.display(), "invalid publish config ({e}), using defaults");
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                warn!(path = %path.display(), "unreadable publish config ({e}), using defaults");
                Self::default()
            }
        }
    }

    pub fn config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("embed-preview");
        path.push("publish.json");
        path
    }
}
