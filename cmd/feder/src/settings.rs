//! User-level defaults for the feder CLI.
//!
//! Stored in ~/.giztoy/feder/config.yaml. A missing file means no defaults.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use giztoy_feder::{SearchParams, ViewParams};
use serde::{Deserialize, Serialize};

use crate::request::load_document;

/// Default base configuration directory name.
pub const DEFAULT_BASE_DIR: &str = ".giztoy";
/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
/// Application directory under the base directory.
pub const APP_NAME: &str = "feder";

/// Defaults applied under every request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Library module URL, e.g. a local dev build of feder.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub library_url: String,

    #[serde(default, skip_serializing_if = "ViewParams::is_empty")]
    pub view_params: ViewParams,

    #[serde(default, skip_serializing_if = "SearchParams::is_empty")]
    pub search_params: SearchParams,
}

impl Settings {
    /// Gets the default settings file path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| {
            home.join(DEFAULT_BASE_DIR)
                .join(APP_NAME)
                .join(DEFAULT_CONFIG_FILE)
        })
    }
}

/// Loads settings from `custom_path`, or from the default path if it exists.
///
/// An explicit path must exist; the default path may be absent.
pub fn load_settings(custom_path: Option<&Path>) -> anyhow::Result<Settings> {
    let path = match custom_path {
        Some(p) => p.to_path_buf(),
        None => match Settings::default_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(Settings::default()),
        },
    };

    tracing::debug!(path = %path.display(), "loading settings");
    load_document(&path).with_context(|| format!("failed to load settings {}", path.display()))
}
