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

use crate::domain::cluster::{Cluster, ClusterKey, ClusterSpec};
use crate::domain::config::ApiConf;
use crate::infrastructure::constants::{
    CLUSTERS_PATH, MAX_GET_ATTEMPTS, REQUEST_TIMEOUT_SECS, RETRY_MIN_DELAY_MS, USER_AGENT,
};
use crate::shared::error::RosaError;
use backon::{BackoffBuilder, ExponentialBuilder};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Cluster lookups and updates, scoped by the ARN of the caller so clusters
/// with the same name in different accounts never collide.
#[async_trait::async_trait]
pub trait ClusterManagementClient: Send + Sync {
    async fn get_cluster(&self, key: &ClusterKey, creator_arn: &str) -> Result<Cluster, RosaError>;

    async fn update_cluster(
        &self,
        key: &ClusterKey,
        creator_arn: &str,
        spec: &ClusterSpec,
    ) -> Result<(), RosaError>;
}

#[derive(Debug, Deserialize)]
struct ClusterList {
    #[serde(default)]
    items: Vec<Cluster>,
    #[serde(default)]
    total: i64,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct OcmClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl OcmClient {
    /// Open a connection, exchanging the refresh token for an access token
    /// when no access token is configured.
    pub async fn connect(conf: &ApiConf) -> Result<Self, RosaError> {
        let http = build_http_client()?;

        let token = match (&conf.token, &conf.refresh_token) {
            (Some(token), _) if !token.is_empty() => token.clone(),
            (_, Some(refresh)) if !refresh.is_empty() => {
                exchange_refresh_token(&http, conf, refresh).await?
            }
            _ => {
                return Err(RosaError::auth(
                    "Not logged in: set an access or refresh token in the configuration file \
                     or the ROSA_TOKEN environment variable",
                ))
            }
        };

        debug!(url = %conf.url, "Opened cluster management connection");
        Ok(Self {
            http,
            base_url: conf.url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, RosaError> {
        Ok(Self {
            http: build_http_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn clusters_url(&self) -> String {
        format!("{}{}", self.base_url, CLUSTERS_PATH)
    }

    /// GET with exponential backoff on connection failures and 5xx answers.
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Response, RosaError> {
        let mut delays = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(RETRY_MIN_DELAY_MS))
            .with_max_times(MAX_GET_ATTEMPTS - 1)
            .build();

        loop {
            debug!(url = %url, "GET");
            let result = self
                .http
                .get(url)
                .bearer_auth(&self.token)
                .query(query)
                .send()
                .await;

            let transient = match &result {
                Ok(response) => response.status().is_server_error(),
                Err(e) => e.is_connect() || e.is_timeout(),
            };

            match (transient, delays.next()) {
                (true, Some(delay)) => {
                    warn!(url = %url, ?delay, "Transient failure from cluster management API, retrying");
                    tokio::time::sleep(delay).await;
                }
                _ => return check_status(result?).await,
            }
        }
    }

    async fn find_cluster(&self, key: &ClusterKey, creator_arn: &str) -> Result<Cluster, RosaError> {
        let search = cluster_search_query(key, creator_arn);
        let response = self
            .get(&self.clusters_url(), &[("search", search.as_str()), ("size", "1")])
            .await?;
        let list: ClusterList = response.json().await?;

        match list.total {
            0 => Err(RosaError::NotFound(format!(
                "There is no cluster with identifier or name '{}'",
                key
            ))),
            1 => list.items.into_iter().next().ok_or_else(|| {
                RosaError::Api(format!("Cluster '{}' listed but not returned", key))
            }),
            n => Err(RosaError::Api(format!(
                "There are {} clusters with identifier or name '{}'",
                n, key
            ))),
        }
    }
}

impl Drop for OcmClient {
    fn drop(&mut self) {
        debug!("Closed cluster management connection");
    }
}

#[async_trait::async_trait]
impl ClusterManagementClient for OcmClient {
    async fn get_cluster(&self, key: &ClusterKey, creator_arn: &str) -> Result<Cluster, RosaError> {
        self.find_cluster(key, creator_arn).await
    }

    async fn update_cluster(
        &self,
        key: &ClusterKey,
        creator_arn: &str,
        spec: &ClusterSpec,
    ) -> Result<(), RosaError> {
        let cluster = self.find_cluster(key, creator_arn).await?;
        let url = format!("{}/{}", self.clusters_url(), cluster.id);

        debug!(url = %url, "PATCH");
        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.token)
            .json(&spec.to_patch())
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Search expression matching the key against id, name and external id,
/// restricted to clusters created by `creator_arn`.
pub fn cluster_search_query(key: &ClusterKey, creator_arn: &str) -> String {
    format!(
        "(id = '{key}' or name = '{key}' or external_id = '{key}') and creator.arn = '{arn}'",
        key = key,
        arn = creator_arn
    )
}

fn build_http_client() -> Result<reqwest::Client, RosaError> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?)
}

async fn exchange_refresh_token(
    http: &reqwest::Client,
    conf: &ApiConf,
    refresh_token: &str,
) -> Result<String, RosaError> {
    debug!(token_url = %conf.token_url, "Exchanging refresh token");
    let response = http
        .post(&conf.token_url)
        .form(&[
            ("grant_type", "refresh_token"),
            ("client_id", conf.client_id.as_str()),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await
        .map_err(|e| RosaError::auth(format!("Failed to refresh access token: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(RosaError::auth(format!(
            "Failed to refresh access token: token endpoint returned {}",
            status
        )));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| RosaError::auth(format!("Failed to refresh access token: {}", e)))?;
    Ok(token.access_token)
}

async fn check_status(response: Response) -> Result<Response, RosaError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(RosaError::Api(describe_api_error(status, &body)))
}

fn describe_api_error(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody {
            reason: Some(reason),
            code,
        }) => match code {
            Some(code) => format!("{} ({}, status {})", reason, code, status.as_u16()),
            None => format!("{} (status {})", reason, status.as_u16()),
        },
        _ if body.trim().is_empty() => format!("status {}", status),
        _ => format!("status {}: {}", status.as_u16(), body.trim()),
    }
}
