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

//! Decides, field by field, whether an edit takes its value from the command
//! line, from an interactive prompt, or leaves the field untouched.

use crate::shared::error::RosaError;

/// Operator interaction used while negotiating optional fields
#[async_trait::async_trait]
pub trait Prompter: Send + Sync {
    /// Ask a yes/no question, returning `default` on an empty answer.
    async fn ask_bool(&self, question: &str, help: &str, default: bool)
        -> Result<bool, RosaError>;

    /// Ask the operator to confirm `action`.
    async fn confirm(&self, action: &str) -> Result<bool, RosaError>;

    /// Surface a warning to the operator.
    fn warn(&self, message: &str);
}

/// Descriptor of a mutable boolean cluster field
#[derive(Debug, Clone, Copy)]
pub struct MutableField {
    /// Command line flag that sets the field
    pub flag: &'static str,
    pub question: &'static str,
    pub help: &'static str,
    /// Shown when the field is about to become `true`
    pub warning: &'static str,
    /// Action shown in the confirmation prompt; `{}` is replaced with the
    /// cluster key.
    pub confirm_action: &'static str,
}

pub const PRIVATE_FIELD: MutableField = MutableField {
    flag: "private",
    question: "Private cluster",
    help: "Restrict master API endpoint to direct, private connectivity.",
    warning: "You will not be able to access your cluster until you edit network settings \
              in your cloud provider.",
    confirm_action: "set cluster '{}' as private",
};

/// Flags that change cluster state. Supplying none of them turns the
/// invocation interactive.
pub const MUTATION_FLAGS: &[&str] = &[PRIVATE_FIELD.flag];

/// Result of negotiating a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDecision<T> {
    Set(T),
    Unchanged,
    /// The operator refused the confirmation; the whole edit stops.
    Declined,
}

impl<T> FieldDecision<T> {
    pub fn value(self) -> Option<T> {
        match self {
            FieldDecision::Set(v) => Some(v),
            _ => None,
        }
    }
}

/// Inputs of the per-field policy
#[derive(Debug, Clone, Copy)]
pub struct FieldInput {
    /// Value given on the command line, if the flag was supplied
    pub explicit: Option<bool>,
    /// Value derived from the current cluster state
    pub current: bool,
    pub interactive: bool,
    /// Answer confirmations with yes without asking
    pub assume_yes: bool,
}

/// The invocation is interactive when requested globally or when no
/// mutation flag was supplied.
pub fn is_interactive(interactive_flag: bool, changed_flags: &[&str]) -> bool {
    interactive_flag || !changed_flags.iter().any(|f| MUTATION_FLAGS.contains(f))
}

pub async fn negotiate_bool<P>(
    field: &MutableField,
    key: &str,
    input: FieldInput,
    prompter: &P,
) -> Result<FieldDecision<bool>, RosaError>
where
    P: Prompter + ?Sized,
{
    if let Some(value) = input.explicit {
        if value {
            prompter.warn(&format!(
                "You are choosing to set '{}' on cluster '{}'. {}",
                field.flag, key, field.warning
            ));
        }
        return Ok(FieldDecision::Set(value));
    }

    if input.interactive {
        let help = format!("{} {}", field.help, field.warning);
        let value = prompter
            .ask_bool(field.question, &help, input.current)
            .await
            .map_err(|e| match e {
                RosaError::Prompt(m) => {
                    RosaError::Prompt(format!("Expected a valid {} value: {}", field.flag, m))
                }
                other => other,
            })?;
        return Ok(FieldDecision::Set(value));
    }

    if input.current {
        prompter.warn(&format!("{} {}", field.question, field.warning));
        let confirmed = input.assume_yes
            || prompter
                .confirm(&field.confirm_action.replace("{}", key))
                .await?;
        if !confirmed {
            return Ok(FieldDecision::Declined);
        }
    }

    Ok(FieldDecision::Unchanged)
}
