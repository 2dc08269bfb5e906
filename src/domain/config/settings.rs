// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::infrastructure::constants::{
    CONFIG_ENV, CONFIG_RELATIVE_PATH, DEFAULT_API_URL, DEFAULT_CLIENT_ID, DEFAULT_TOKEN_URL,
    REFRESH_TOKEN_ENV, TOKEN_ENV, URL_ENV,
};
use crate::shared::error::RosaError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Cluster management API connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConf {
    pub url: String,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub token_url: String,
    pub client_id: String,
}

impl Default for ApiConf {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            token: None,
            refresh_token: None,
            token_url: DEFAULT_TOKEN_URL.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsConf {
    pub profile: Option<String>,
    pub region: Option<String>,
}

/// Resolved tool configuration. Built once per invocation and passed by
/// reference from then on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiConf,
    pub aws: AwsConf,
}

/// Values supplied on the command line. They take precedence over
/// everything else.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub config_path: Option<PathBuf>,
    pub profile: Option<String>,
    pub region: Option<String>,
}

impl Settings {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RosaError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RosaError::config_error(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, RosaError> {
        Ok(toml::from_str(content)?)
    }

    /// Priority: command line > environment > config file > defaults
    pub fn load(overrides: &SettingsOverrides) -> Result<Self, RosaError> {
        Self::load_with_env(overrides, |name| std::env::var(name).ok())
    }

    pub fn load_with_env<F>(overrides: &SettingsOverrides, env: F) -> Result<Self, RosaError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit = overrides
            .config_path
            .clone()
            .or_else(|| env(CONFIG_ENV).map(PathBuf::from));

        let mut settings = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(RosaError::config_error(format!(
                        "Configuration file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(&path)?
            }
            None => match default_config_path(&env) {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        if let Some(url) = env(URL_ENV).filter(|v| !v.is_empty()) {
            settings.api.url = url;
        }
        if let Some(token) = env(TOKEN_ENV).filter(|v| !v.is_empty()) {
            settings.api.token = Some(token);
        }
        if let Some(token) = env(REFRESH_TOKEN_ENV).filter(|v| !v.is_empty()) {
            settings.api.refresh_token = Some(token);
        }

        if overrides.profile.is_some() {
            settings.aws.profile = overrides.profile.clone();
        }
        if overrides.region.is_some() {
            settings.aws.region = overrides.region.clone();
        }

        settings.api.url = settings.api.url.trim_end_matches('/').to_string();
        Ok(settings)
    }
}

fn default_config_path<F>(env: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    env("HOME").map(|home| PathBuf::from(home).join(CONFIG_RELATIVE_PATH))
}
