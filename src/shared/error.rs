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

use thiserror::Error;
pub type Result<T> = std::result::Result<T, RosaError>;

#[derive(Error, Debug)]
pub enum RosaError {
    /// Bad or missing arguments. Raised before any network call.
    #[error("{0}")]
    Usage(String),

    /// Missing credentials, region or identity.
    #[error("{0}")]
    Auth(String),

    #[error("Failed to {operation} cluster '{key}': {message}")]
    Remote {
        operation: String,
        key: String,
        message: String,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Cluster management API error: {0}")]
    Api(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for RosaError {
    fn from(err: reqwest::Error) -> Self {
        RosaError::Api(err.to_string())
    }
}

impl RosaError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    pub fn config_error(context: impl Into<String>) -> Self {
        Self::ConfigError(context.into())
    }

    pub fn remote(
        operation: impl Into<String>,
        key: impl Into<String>,
        source: impl std::fmt::Display,
    ) -> Self {
        Self::Remote {
            operation: operation.into(),
            key: key.into(),
            message: source.to_string(),
        }
    }

    /// True for errors caused by the invocation itself rather than by a
    /// remote service.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}
