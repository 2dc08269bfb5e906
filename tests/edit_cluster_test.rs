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

use chrono::{TimeZone, Utc};
use clap::Parser;
use rosa_kube::cli::commands::{Commands, EditCommands};
use rosa_kube::cli::CliArgs;
use rosa_kube::domain::cluster::{ClusterApi, ListeningMethod};
use rosa_kube::*;
use std::sync::{Arc, Mutex};

const CALLER_ARN: &str = "arn:aws:iam::123456789012:user/dev";

#[derive(Default)]
struct Calls {
    identity: usize,
    gets: Vec<(String, String)>,
    updates: Vec<(String, String, ClusterSpec)>,
    questions: Vec<(String, bool)>,
    confirmations: Vec<String>,
    warnings: Vec<String>,
}

type Recorder = Arc<Mutex<Calls>>;

struct FakeClusters {
    calls: Recorder,
    clusters: Vec<Cluster>,
}

#[async_trait::async_trait]
impl ClusterManagementClient for FakeClusters {
    async fn get_cluster(&self, key: &ClusterKey, creator_arn: &str) -> Result<Cluster> {
        self.calls
            .lock()
            .unwrap()
            .gets
            .push((key.to_string(), creator_arn.to_string()));
        self.clusters
            .iter()
            .find(|c| c.id == key.as_str() || c.name == key.as_str())
            .cloned()
            .ok_or_else(|| {
                RosaError::NotFound(format!(
                    "There is no cluster with identifier or name '{}'",
                    key
                ))
            })
    }

    async fn update_cluster(
        &self,
        key: &ClusterKey,
        creator_arn: &str,
        spec: &ClusterSpec,
    ) -> Result<()> {
        self.calls.lock().unwrap().updates.push((
            key.to_string(),
            creator_arn.to_string(),
            spec.clone(),
        ));
        Ok(())
    }
}

struct FakeCloud {
    calls: Recorder,
    fail: bool,
}

#[async_trait::async_trait]
impl CloudProviderClient for FakeCloud {
    fn region(&self) -> &str {
        "us-east-1"
    }

    async fn validate_credentials(&self) -> Result<bool> {
        Ok(!self.fail)
    }

    async fn get_creator(&self) -> Result<CallerIdentity> {
        self.calls.lock().unwrap().identity += 1;
        if self.fail {
            return Err(RosaError::auth("can't find credentials"));
        }
        Ok(CallerIdentity {
            arn: CALLER_ARN.to_string(),
            account_id: "123456789012".to_string(),
        })
    }
}

struct FakePrompter {
    calls: Recorder,
    answer: bool,
    confirm: bool,
}

#[async_trait::async_trait]
impl Prompter for FakePrompter {
    async fn ask_bool(&self, question: &str, _help: &str, default: bool) -> Result<bool> {
        self.calls
            .lock()
            .unwrap()
            .questions
            .push((question.to_string(), default));
        Ok(self.answer)
    }

    async fn confirm(&self, action: &str) -> Result<bool> {
        self.calls
            .lock()
            .unwrap()
            .confirmations
            .push(action.to_string());
        Ok(self.confirm)
    }

    fn warn(&self, message: &str) {
        self.calls.lock().unwrap().warnings.push(message.to_string());
    }
}

fn cluster(name: &str, listening: ListeningMethod) -> Cluster {
    Cluster {
        id: format!("{}-id", name),
        name: name.to_string(),
        state: Some("ready".to_string()),
        api: ClusterApi {
            url: None,
            listening,
        },
        ..Default::default()
    }
}

struct Harness {
    calls: Recorder,
    descriptor: ClusterDescriptor,
}

fn harness(clusters: Vec<Cluster>, identity_fails: bool) -> Harness {
    let calls = Recorder::default();
    let descriptor = ClusterDescriptor::new(
        Box::new(FakeClusters {
            calls: calls.clone(),
            clusters,
        }),
        Box::new(FakeCloud {
            calls: calls.clone(),
            fail: identity_fails,
        }),
    );
    Harness { calls, descriptor }
}

fn prompter(calls: &Recorder, answer: bool, confirm: bool) -> FakePrompter {
    FakePrompter {
        calls: calls.clone(),
        answer,
        confirm,
    }
}

/// Parse a command line and turn it into an edit request
fn edit_request(argv: &[&str]) -> Result<EditRequest> {
    let mut full = vec!["rosa-kube"];
    full.extend_from_slice(argv);
    let args = CliArgs::try_parse_from(full).expect("command line should parse");
    match args.command {
        Commands::Edit(EditCommands::Cluster(cmd)) => cmd.resolve(
            &args.global,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        ),
        other => panic!("unexpected command {:?}", other),
    }
}

#[tokio::test]
async fn test_edit_private_cluster_updates_without_prompting() {
    let request = edit_request(&["edit", "cluster", "mycluster", "--private"]).unwrap();
    assert_eq!(request.private, Some(true));
    assert!(!request.interactive);

    let h = harness(vec![cluster("mycluster", ListeningMethod::External)], false);
    let p = prompter(&h.calls, false, false);
    let outcome = h.descriptor.edit_cluster(&request, &p).await.unwrap();

    assert_eq!(
        outcome,
        EditOutcome::Updated(ClusterSpec {
            expiration: None,
            private: Some(true),
        })
    );

    let calls = h.calls.lock().unwrap();
    assert_eq!(calls.identity, 1);
    assert_eq!(
        calls.gets,
        vec![("mycluster".to_string(), CALLER_ARN.to_string())]
    );
    assert_eq!(calls.updates.len(), 1);
    assert_eq!(calls.updates[0].1, CALLER_ARN);
    assert_eq!(calls.updates[0].2.private, Some(true));
    assert!(calls.questions.is_empty());
    assert!(calls.confirmations.is_empty());
    assert_eq!(calls.warnings.len(), 1);
}

#[tokio::test]
async fn test_explicit_private_ignores_global_interactive() {
    let request =
        edit_request(&["--interactive", "edit", "cluster", "-c", "mycluster", "--private"]).unwrap();
    assert!(request.interactive);

    let h = harness(vec![cluster("mycluster", ListeningMethod::External)], false);
    let p = prompter(&h.calls, false, false);
    h.descriptor.edit_cluster(&request, &p).await.unwrap();

    let calls = h.calls.lock().unwrap();
    assert!(calls.questions.is_empty());
    assert_eq!(calls.updates[0].2.private, Some(true));
}

#[tokio::test]
async fn test_explicit_private_false_skips_warning() {
    let request = edit_request(&["edit", "cluster", "mycluster", "--private=false"]).unwrap();
    assert_eq!(request.private, Some(false));

    let h = harness(vec![cluster("mycluster", ListeningMethod::Internal)], false);
    let p = prompter(&h.calls, true, false);
    h.descriptor.edit_cluster(&request, &p).await.unwrap();

    let calls = h.calls.lock().unwrap();
    assert!(calls.warnings.is_empty());
    assert!(calls.confirmations.is_empty());
    assert_eq!(calls.updates[0].2.private, Some(false));
}

#[test]
fn test_missing_cluster_key_is_usage_error() {
    let err = edit_request(&["edit", "cluster"]).unwrap_err();
    assert!(err.is_usage());
    assert!(err
        .to_string()
        .contains("Expected exactly one command line argument or flag"));
}

#[test]
fn test_two_cluster_keys_is_usage_error() {
    let err = edit_request(&["edit", "cluster", "a", "b"]).unwrap_err();
    assert!(err.is_usage());
}

#[test]
fn test_cluster_flag_takes_precedence() {
    let request = edit_request(&["edit", "cluster", "a", "-c", "b", "--private"]).unwrap();
    assert_eq!(request.key.as_str(), "b");
}

#[test]
fn test_invalid_cluster_key_is_rejected() {
    let err = edit_request(&["edit", "cluster", "my.cluster"]).unwrap_err();
    assert!(err.is_usage());
}

#[test]
fn test_both_expiration_flags_conflict() {
    let err = edit_request(&[
        "edit",
        "cluster",
        "mycluster",
        "--expiration-time",
        "2024-02-01T00:00:00Z",
        "--expiration",
        "2h",
    ])
    .unwrap_err();
    assert!(err.to_string().contains("At most one"));
}

#[test]
fn test_relative_expiration_is_resolved_against_now() {
    let request = edit_request(&["edit", "cluster", "mycluster", "--expiration", "90s"]).unwrap();
    assert_eq!(
        request.expiration,
        Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 1, 30).unwrap())
    );
}

#[test]
fn test_bad_expiration_time_is_rejected() {
    let err = edit_request(&[
        "edit",
        "cluster",
        "mycluster",
        "--expiration-time",
        "not-a-date",
    ])
    .unwrap_err();
    assert!(err.to_string().contains("Failed to parse expiration-time"));
}

#[tokio::test]
async fn test_no_mutation_flags_prompts_for_private() {
    let request = edit_request(&["edit", "cluster", "mycluster"]).unwrap();
    assert!(request.interactive);
    assert!(!request.interactive_requested);

    let h = harness(vec![cluster("mycluster", ListeningMethod::Internal)], false);
    let p = prompter(&h.calls, false, false);
    let outcome = h.descriptor.edit_cluster(&request, &p).await.unwrap();

    assert_eq!(
        outcome,
        EditOutcome::Updated(ClusterSpec {
            expiration: None,
            private: Some(false),
        })
    );
    let calls = h.calls.lock().unwrap();
    assert_eq!(calls.questions.len(), 1);
    // Current listening mode is the default answer.
    assert!(calls.questions[0].1);
}

#[tokio::test]
async fn test_non_interactive_private_cluster_declined() {
    let request = EditRequest {
        key: ClusterKey::parse("mycluster").unwrap(),
        expiration: None,
        private: None,
        interactive: false,
        interactive_requested: false,
        assume_yes: false,
    };

    let h = harness(vec![cluster("mycluster", ListeningMethod::Internal)], false);
    let p = prompter(&h.calls, false, false);
    let outcome = h.descriptor.edit_cluster(&request, &p).await.unwrap();

    assert_eq!(outcome, EditOutcome::Declined);
    let calls = h.calls.lock().unwrap();
    assert_eq!(
        calls.confirmations,
        vec!["set cluster 'mycluster' as private".to_string()]
    );
    assert!(calls.updates.is_empty());
}

#[tokio::test]
async fn test_assume_yes_skips_confirmation() {
    let request = EditRequest {
        key: ClusterKey::parse("mycluster").unwrap(),
        expiration: Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
        private: None,
        interactive: false,
        interactive_requested: false,
        assume_yes: true,
    };

    let h = harness(vec![cluster("mycluster", ListeningMethod::Internal)], false);
    let p = prompter(&h.calls, false, false);
    let outcome = h.descriptor.edit_cluster(&request, &p).await.unwrap();

    assert!(matches!(outcome, EditOutcome::Updated(_)));
    let calls = h.calls.lock().unwrap();
    assert!(calls.confirmations.is_empty());
    assert_eq!(calls.updates[0].2.private, None);
    assert!(calls.updates[0].2.expiration.is_some());
}

#[tokio::test]
async fn test_identity_failure_aborts_before_lookup() {
    let request = edit_request(&["edit", "cluster", "mycluster", "--private"]).unwrap();

    let h = harness(vec![cluster("mycluster", ListeningMethod::External)], true);
    let p = prompter(&h.calls, false, false);
    let err = h.descriptor.edit_cluster(&request, &p).await.unwrap_err();

    assert!(matches!(err, RosaError::Auth(_)));
    assert!(err.to_string().contains("Failed to get AWS creator"));
    let calls = h.calls.lock().unwrap();
    assert!(calls.gets.is_empty());
    assert!(calls.updates.is_empty());
}

#[tokio::test]
async fn test_unknown_cluster_reports_key() {
    let request = edit_request(&["edit", "cluster", "ghost", "--private"]).unwrap();

    let h = harness(vec![cluster("mycluster", ListeningMethod::External)], false);
    let p = prompter(&h.calls, false, false);
    let err = h.descriptor.edit_cluster(&request, &p).await.unwrap_err();

    let message = err.to_string();
    assert!(message.contains("Failed to get cluster 'ghost'"));
    assert!(message.contains("There is no cluster with identifier or name 'ghost'"));
    assert!(h.calls.lock().unwrap().updates.is_empty());
}

#[tokio::test]
async fn test_describe_cluster_scopes_lookup_by_caller() {
    let h = harness(vec![cluster("mycluster", ListeningMethod::Internal)], false);
    let found = h
        .descriptor
        .describe_cluster(&ClusterKey::parse("mycluster-id").unwrap())
        .await
        .unwrap();

    assert!(found.is_private());
    assert_eq!(h.descriptor.region(), "us-east-1");
    assert_eq!(h.calls.lock().unwrap().gets[0].1, CALLER_ARN);
}
