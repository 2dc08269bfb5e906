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

use super::model::{CallerIdentity, Cluster, ClusterSpec, EditOutcome, EditRequest};
use super::negotiator::{negotiate_bool, FieldDecision, FieldInput, Prompter, PRIVATE_FIELD};
use super::validator::ClusterKey;
use crate::infrastructure::aws::CloudProviderClient;
use crate::infrastructure::ocm::ClusterManagementClient;
use crate::shared::error::RosaError;
use tracing::debug;

/// Runs cluster operations against the cluster management service on behalf
/// of the principal behind the active cloud credentials.
///
/// An edit moves through identity resolution, cluster lookup, field
/// negotiation and the update call; each step returns early on failure and
/// nothing is sent to the service before the identity is known.
pub struct ClusterDescriptor {
    clusters: Box<dyn ClusterManagementClient>,
    cloud: Box<dyn CloudProviderClient>,
}

impl ClusterDescriptor {
    pub fn new(
        clusters: Box<dyn ClusterManagementClient>,
        cloud: Box<dyn CloudProviderClient>,
    ) -> Self {
        Self { clusters, cloud }
    }

    pub fn region(&self) -> &str {
        self.cloud.region()
    }

    pub async fn caller_identity(&self) -> Result<CallerIdentity, RosaError> {
        self.cloud
            .get_creator()
            .await
            .map_err(|e| RosaError::auth(format!("Failed to get AWS creator: {}", e)))
    }

    pub async fn validate_credentials(&self) -> Result<bool, RosaError> {
        self.cloud.validate_credentials().await
    }

    pub async fn fetch_cluster(
        &self,
        key: &ClusterKey,
        identity: &CallerIdentity,
    ) -> Result<Cluster, RosaError> {
        debug!("Loading cluster '{}'", key);
        self.clusters
            .get_cluster(key, &identity.arn)
            .await
            .map_err(|e| RosaError::remote("get", key.as_str(), e))
    }

    pub async fn describe_cluster(&self, key: &ClusterKey) -> Result<Cluster, RosaError> {
        let identity = self.caller_identity().await?;
        self.fetch_cluster(key, &identity).await
    }

    pub async fn edit_cluster<P>(
        &self,
        request: &EditRequest,
        prompter: &P,
    ) -> Result<EditOutcome, RosaError>
    where
        P: Prompter + ?Sized,
    {
        let key = &request.key;
        let identity = self.caller_identity().await?;
        let cluster = self.fetch_cluster(key, &identity).await?;

        let private = match negotiate_bool(
            &PRIVATE_FIELD,
            key.as_str(),
            FieldInput {
                explicit: request.private,
                current: cluster.is_private(),
                interactive: request.interactive,
                assume_yes: request.assume_yes,
            },
            prompter,
        )
        .await?
        {
            FieldDecision::Declined => return Ok(EditOutcome::Declined),
            decision => decision.value(),
        };

        let spec = ClusterSpec {
            expiration: request.expiration,
            private,
        };

        debug!("Updating cluster '{}'", key);
        self.clusters
            .update_cluster(key, &identity.arn, &spec)
            .await
            .map_err(|e| RosaError::remote("update", key.as_str(), e))?;

        Ok(EditOutcome::Updated(spec))
    }
}
