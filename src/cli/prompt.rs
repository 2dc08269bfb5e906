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

//! Terminal prompts

use crate::cli::display::Reporter;
use crate::domain::cluster::Prompter;
use crate::shared::error::RosaError;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};
use tokio::sync::Mutex;

/// Answer typed by the operator to a yes/no question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Help,
    Invalid,
}

pub fn parse_answer(input: &str, default: bool) -> Answer {
    match input.trim().to_ascii_lowercase().as_str() {
        "" => {
            if default {
                Answer::Yes
            } else {
                Answer::No
            }
        }
        "y" | "yes" | "true" => Answer::Yes,
        "n" | "no" | "false" => Answer::No,
        "?" => Answer::Help,
        _ => Answer::Invalid,
    }
}

fn choices(default: bool) -> &'static str {
    if default {
        "[Y/n]"
    } else {
        "[y/N]"
    }
}

pub struct TerminalPrompter {
    reporter: Reporter,
    stdin: Mutex<BufReader<Stdin>>,
}

impl TerminalPrompter {
    pub fn new(reporter: Reporter) -> Self {
        Self {
            reporter,
            stdin: Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }

    async fn read_line(&self, prompt: &str) -> Result<String, RosaError> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(prompt.as_bytes()).await?;
        stdout.flush().await?;

        let mut input = String::new();
        let read = self.stdin.lock().await.read_line(&mut input).await?;
        if read == 0 {
            return Err(RosaError::Prompt("unexpected end of input".to_string()));
        }
        Ok(input)
    }

    async fn ask(&self, question: &str, help: Option<&str>, default: bool) -> Result<bool, RosaError> {
        let prompt = format!("? {} {}: ", question, choices(default));
        loop {
            match parse_answer(&self.read_line(&prompt).await?, default) {
                Answer::Yes => return Ok(true),
                Answer::No => return Ok(false),
                Answer::Help => match help {
                    Some(help) => println!("{}", help),
                    None => println!("Answer yes or no."),
                },
                Answer::Invalid => println!("Please answer yes or no."),
            }
        }
    }
}

#[async_trait::async_trait]
impl Prompter for TerminalPrompter {
    async fn ask_bool(&self, question: &str, help: &str, default: bool) -> Result<bool, RosaError> {
        let question = format!("{} (optional, type ? for help)", question);
        self.ask(&question, Some(help), default).await
    }

    async fn confirm(&self, action: &str) -> Result<bool, RosaError> {
        self.ask(&format!("Are you sure you want to {}?", action), None, false)
            .await
    }

    fn warn(&self, message: &str) {
        self.reporter.warn(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("", true), Answer::Yes);
        assert_eq!(parse_answer("\n", false), Answer::No);
        assert_eq!(parse_answer("Y\n", false), Answer::Yes);
        assert_eq!(parse_answer("yes", false), Answer::Yes);
        assert_eq!(parse_answer("No", true), Answer::No);
        assert_eq!(parse_answer("?", true), Answer::Help);
        assert_eq!(parse_answer("maybe", true), Answer::Invalid);
    }

    #[test]
    fn test_choices_show_default() {
        assert_eq!(choices(true), "[Y/n]");
        assert_eq!(choices(false), "[y/N]");
    }
}
