use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

use crate::DEFAULT_SERVER_URL;

pub const CLIENT_SETTINGS_FILE: &str = "client.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSettings {
    pub server_url: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
        }
    }
}

impl ClientSettings {
    /// An explicit value (e.g. a CLI flag) wins over everything loaded.
    pub fn with_server_url(mut self, server_url: Option<String>) -> Self {
        if let Some(v) = server_url.filter(|v| !v.trim().is_empty()) {
            self.server_url = v;
        }
        self
    }
}

pub fn load_client_settings() -> ClientSettings {
    load_client_settings_from(Path::new(CLIENT_SETTINGS_FILE), |name| {
        std::env::var(name).ok()
    })
}

pub fn load_client_settings_from(
    file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(file) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("server_url") {
                    settings.server_url = v.clone();
                }
            }
            Err(err) => {
                tracing::warn!(path = %file.display(), %err, "ignoring unreadable client settings file");
            }
        }
    }

    if let Some(v) = env("CLASSIFIER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    settings
}
