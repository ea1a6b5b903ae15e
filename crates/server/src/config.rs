use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

pub const SERVER_SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    /// Lexicon model file; the built-in lexicon is used when unset.
    pub model_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:5000".into(),
            model_path: None,
        }
    }
}

impl Settings {
    pub fn model_path(&self) -> Option<PathBuf> {
        self.model_path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SERVER_SETTINGS_FILE), |name| {
        std::env::var(name).ok()
    })
}

pub fn load_settings_from(file: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(file) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("bind_addr") {
                    settings.server_bind = v.clone();
                }
                if let Some(v) = file_cfg.get("model_path") {
                    settings.model_path = Some(v.clone());
                }
            }
            Err(err) => {
                tracing::warn!(path = %file.display(), %err, "ignoring unreadable server settings file");
            }
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("MODEL_PATH") {
        settings.model_path = Some(v);
    }
    if let Some(v) = env("APP__MODEL_PATH") {
        settings.model_path = Some(v);
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
