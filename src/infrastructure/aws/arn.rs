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
use std::str::FromStr;

/// Structured form of an Amazon Resource Name:
/// `arn:partition:service:region:account-id:resource`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account_id: String,
    /// May itself contain `:` and `/`
    pub resource: String,
}

impl FromStr for Arn {
    type Err = RosaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sections: Vec<&str> = s.splitn(6, ':').collect();
        if sections.len() != 6 {
            return Err(RosaError::auth(format!(
                "arn: not enough sections in '{}'",
                s
            )));
        }
        if sections[0] != "arn" {
            return Err(RosaError::auth(format!("arn: invalid prefix in '{}'", s)));
        }

        Ok(Self {
            partition: sections[1].to_string(),
            service: sections[2].to_string(),
            region: sections[3].to_string(),
            account_id: sections[4].to_string(),
            resource: sections[5].to_string(),
        })
    }
}
