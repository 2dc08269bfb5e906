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

/// Cluster management service
pub const DEFAULT_API_URL: &str = "https://api.openshift.com";
pub const CLUSTERS_PATH: &str = "/api/clusters_mgmt/v1/clusters";

/// SSO token exchange
pub const DEFAULT_TOKEN_URL: &str =
    "https://sso.redhat.com/auth/realms/redhat-external/protocol/openid-connect/token";
pub const DEFAULT_CLIENT_ID: &str = "cloud-services";

/// Configuration file and environment
pub const CONFIG_RELATIVE_PATH: &str = ".config/rosa-kube/config.toml";
pub const CONFIG_ENV: &str = "ROSA_KUBE_CONFIG";
pub const URL_ENV: &str = "ROSA_API_URL";
pub const TOKEN_ENV: &str = "ROSA_TOKEN";
pub const REFRESH_TOKEN_ENV: &str = "ROSA_REFRESH_TOKEN";

/// HTTP transport
pub const USER_AGENT: &str = concat!("rosa-kube/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MAX_GET_ATTEMPTS: usize = 3;
pub const RETRY_MIN_DELAY_MS: u64 = 200;
