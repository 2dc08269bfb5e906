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

//! Cluster domain

pub mod descriptor;
pub mod duration;
pub mod model;
pub mod negotiator;
pub mod validator;

pub use self::descriptor::ClusterDescriptor;
pub use self::duration::parse_duration;
pub use self::model::{
    CallerIdentity, Cluster, ClusterApi, ClusterSpec, EditOutcome, EditRequest, ListeningMethod,
};
pub use self::negotiator::{
    is_interactive, negotiate_bool, FieldDecision, FieldInput, MutableField, Prompter,
    MUTATION_FLAGS, PRIVATE_FIELD,
};
pub use self::validator::{
    is_valid_cluster_key, parse_rfc3339, resolve_cluster_key, resolve_expiration,
    round_to_second, ClusterKey,
};
