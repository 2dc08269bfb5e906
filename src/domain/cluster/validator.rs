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

use crate::shared::error::RosaError;
use chrono::{DateTime, Duration, Timelike, Utc};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static CLUSTER_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid cluster key pattern"));

/// Name, identifier or external identifier of a cluster.
///
/// Only letters, digits, dashes and underscores are accepted since the key is
/// interpolated into search queries sent to the cluster management service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClusterKey(String);

impl ClusterKey {
    pub fn parse(key: &str) -> Result<Self, RosaError> {
        if !is_valid_cluster_key(key) {
            return Err(RosaError::usage(format!(
                "Cluster name, identifier or external identifier '{}' isn't valid: it \
                 must contain only letters, digits, dashes and underscores",
                key
            )));
        }
        Ok(Self(key.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ClusterKey {
    type Err = RosaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ClusterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn is_valid_cluster_key(key: &str) -> bool {
    CLUSTER_KEY_RE.is_match(key)
}

/// Pick the cluster key from the `--cluster` flag or the single positional
/// argument.
pub fn resolve_cluster_key(flag: Option<&str>, positional: &[String]) -> Result<ClusterKey, RosaError> {
    let key = match flag.filter(|k| !k.is_empty()) {
        Some(key) => key,
        None => match positional {
            [key] => key.as_str(),
            _ => {
                return Err(RosaError::usage(
                    "Expected exactly one command line argument or flag containing the name \
                     or identifier of the cluster",
                ))
            }
        },
    };
    ClusterKey::parse(key)
}

/// Compute the requested expiration from either an absolute RFC3339 time or
/// a duration relative to `now`. A zero duration counts as unset.
pub fn resolve_expiration(
    expiration_time: Option<&str>,
    expiration: Option<Duration>,
    now: DateTime<Utc>,
) -> Result<Option<DateTime<Utc>>, RosaError> {
    let expiration_time = expiration_time.filter(|t| !t.is_empty());
    let expiration = expiration.filter(|d| *d != Duration::zero());

    match (expiration_time, expiration) {
        (Some(_), Some(_)) => Err(RosaError::usage(
            "At most one of 'expiration-time' or 'expiration' may be specified",
        )),
        (Some(time), None) => parse_rfc3339(time)
            .map(Some)
            .map_err(|e| RosaError::usage(format!("Failed to parse expiration-time: {}", e))),
        (None, Some(duration)) => Ok(Some(round_to_second(now + duration))),
        (None, None) => Ok(None),
    }
}

/// Parse an RFC3339 timestamp, trying the fractional-second grammar before
/// the whole-second one.
pub fn parse_rfc3339(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%:z")
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .map(|t| t.with_timezone(&Utc))
}

/// Round to the nearest whole second, half-way values rounding up.
pub fn round_to_second(t: DateTime<Utc>) -> DateTime<Utc> {
    let nanos = t.nanosecond() % 1_000_000_000;
    let truncated = t.with_nanosecond(0).unwrap_or(t);
    if nanos >= 500_000_000 {
        truncated + Duration::seconds(1)
    } else {
        truncated
    }
}
