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

//! Cluster state as returned by the cluster management service, and the
//! sparse patch sent back to it.

use super::validator::ClusterKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Network exposure of the cluster API endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListeningMethod {
    Internal,
    #[default]
    External,
    #[serde(other)]
    Unknown,
}

impl ListeningMethod {
    pub fn from_private(private: bool) -> Self {
        if private {
            ListeningMethod::Internal
        } else {
            ListeningMethod::External
        }
    }

    pub fn is_private(&self) -> bool {
        *self == ListeningMethod::Internal
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterApi {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub listening: ListeningMethod,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openshift_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console: Option<Link>,
    #[serde(default)]
    pub api: ClusterApi,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_timestamp: Option<DateTime<Utc>>,
}

impl Cluster {
    pub fn is_private(&self) -> bool {
        self.api.listening.is_private()
    }
}

/// Identity of the principal behind the active cloud credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallerIdentity {
    pub arn: String,
    pub account_id: String,
}

/// Sparse cluster patch. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterSpec {
    pub expiration: Option<DateTime<Utc>>,
    pub private: Option<bool>,
}

impl ClusterSpec {
    pub fn is_empty(&self) -> bool {
        self.expiration.is_none() && self.private.is_none()
    }

    /// Body for the cluster PATCH call
    pub fn to_patch(&self) -> ClusterPatch {
        ClusterPatch {
            expiration_timestamp: self.expiration,
            api: self.private.map(|private| ApiPatch {
                listening: ListeningMethod::from_private(private),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiPatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiPatch {
    pub listening: ListeningMethod,
}

/// A validated `edit cluster` invocation
#[derive(Debug, Clone, PartialEq)]
pub struct EditRequest {
    pub key: ClusterKey,
    pub expiration: Option<DateTime<Utc>>,
    /// Value of `--private` when it was given on the command line
    pub private: Option<bool>,
    pub interactive: bool,
    /// Global `--interactive` was set (as opposed to interactivity implied by
    /// the absence of mutation flags)
    pub interactive_requested: bool,
    pub assume_yes: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Updated(ClusterSpec),
    /// The operator refused a confirmation. Not an error.
    Declined,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_cluster_deserialize() {
        let json = r#"{
            "kind": "Cluster",
            "id": "1a2b3c",
            "name": "mycluster",
            "external_id": "ext-1",
            "state": "ready",
            "region": {"id": "us-east-1"},
            "api": {"url": "https://api.mycluster.example.com:6443", "listening": "internal"}
        }"#;
        let cluster: Cluster = serde_json::from_str(json).unwrap();
        assert_eq!(cluster.id, "1a2b3c");
        assert!(cluster.is_private());
        assert_eq!(cluster.region.unwrap().id.as_deref(), Some("us-east-1"));
    }

    #[test]
    fn test_unknown_listening_is_tolerated() {
        let cluster: Cluster =
            serde_json::from_str(r#"{"id": "x", "api": {"listening": "hybrid"}}"#).unwrap();
        assert_eq!(cluster.api.listening, ListeningMethod::Unknown);
        assert!(!cluster.is_private());
    }

    #[test]
    fn test_patch_omits_absent_fields() {
        let spec = ClusterSpec {
            expiration: None,
            private: Some(true),
        };
        let body = serde_json::to_value(spec.to_patch()).unwrap();
        assert_eq!(body, serde_json::json!({"api": {"listening": "internal"}}));

        let body = serde_json::to_value(ClusterSpec::default().to_patch()).unwrap();
        assert_eq!(body, serde_json::json!({}));
    }

    #[test]
    fn test_patch_expiration() {
        let spec = ClusterSpec {
            expiration: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            private: Some(false),
        };
        let body = serde_json::to_value(spec.to_patch()).unwrap();
        assert_eq!(body["expiration_timestamp"], "2024-01-01T00:00:00Z");
        assert_eq!(body["api"]["listening"], "external");
    }
}
