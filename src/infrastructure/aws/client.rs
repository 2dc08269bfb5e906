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

use super::arn::Arn;
use crate::domain::cluster::CallerIdentity;
use crate::domain::config::AwsConf;
use crate::shared::error::RosaError;
use aws_config::BehaviorVersion;
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_sts::config::Region;
use aws_sdk_sts::error::DisplayErrorContext;
use tracing::debug;

#[async_trait::async_trait]
pub trait CloudProviderClient: Send + Sync {
    fn region(&self) -> &str;

    async fn validate_credentials(&self) -> Result<bool, RosaError>;

    /// Principal behind the active credentials
    async fn get_creator(&self) -> Result<CallerIdentity, RosaError>;
}

/// Builder for [`AwsClient`]. Credentials come from the ambient provider
/// chain (environment, shared profile, role chain).
#[derive(Debug, Clone, Default)]
pub struct AwsClientBuilder {
    profile: Option<String>,
    region: Option<String>,
}

impl AwsClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_conf(conf: &AwsConf) -> Self {
        Self {
            profile: conf.profile.clone(),
            region: conf.region.clone(),
        }
    }

    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub async fn build(self) -> Result<AwsClient, RosaError> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = self.profile.filter(|p| !p.is_empty()) {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = self.region.filter(|r| !r.is_empty()) {
            loader = loader.region(Region::new(region));
        }
        let config = loader.load().await;

        let region = config
            .region()
            .map(|r| r.as_ref().to_string())
            .unwrap_or_default();
        if region.is_empty() {
            return Err(RosaError::auth("region is not set"));
        }

        let provider = config.credentials_provider().ok_or_else(|| {
            RosaError::auth("can't find credentials: no credentials provider configured")
        })?;
        provider
            .provide_credentials()
            .await
            .map_err(|e| RosaError::auth(format!("can't find credentials: {}", e)))?;

        debug!(region = %region, "Created AWS client");
        Ok(AwsClient {
            sts: aws_sdk_sts::Client::new(&config),
            region,
        })
    }
}

pub struct AwsClient {
    sts: aws_sdk_sts::Client,
    region: String,
}

impl AwsClient {
    pub fn builder() -> AwsClientBuilder {
        AwsClientBuilder::new()
    }

    async fn caller_arn(&self) -> Result<String, RosaError> {
        let output = self
            .sts
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| RosaError::auth(format!("{}", DisplayErrorContext(e))))?;

        output
            .arn()
            .map(str::to_string)
            .ok_or_else(|| RosaError::auth("caller identity has no ARN"))
    }
}

#[async_trait::async_trait]
impl CloudProviderClient for AwsClient {
    fn region(&self) -> &str {
        &self.region
    }

    async fn validate_credentials(&self) -> Result<bool, RosaError> {
        self.caller_arn().await?;
        Ok(true)
    }

    async fn get_creator(&self) -> Result<CallerIdentity, RosaError> {
        let arn = self.caller_arn().await?;
        caller_identity_from_arn(&arn)
    }
}

/// Extract the account identifier from the structured form of `arn`.
pub fn caller_identity_from_arn(arn: &str) -> Result<CallerIdentity, RosaError> {
    let parsed: Arn = arn.parse()?;
    Ok(CallerIdentity {
        arn: arn.to_string(),
        account_id: parsed.account_id,
    })
}
