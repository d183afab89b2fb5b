// Copyright 2025 Fernando Borretti
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

use std::time::Duration;

use clap::ValueEnum;
use serde::Deserialize;

/// How long a feedback screen stays up before auto-advancing.
pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(2000);

#[derive(ValueEnum, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "kebab-case")]
pub enum AdvanceMode {
    /// Move on after a fixed delay.
    Auto,
    /// Wait for the user to press "Next".
    Manual,
}

#[derive(ValueEnum, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "kebab-case")]
pub enum MissPolicy {
    /// Stay on a missed card until it is answered correctly.
    Retry,
    /// Move past a card after one answer, right or wrong.
    SingleAttempt,
}

#[derive(ValueEnum, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "kebab-case")]
pub enum FeedbackStyle {
    /// Mark the input as wrong and pre-fill it with the correct word.
    Hint,
    /// Replace the input with a label showing the correct word.
    Label,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AdvancePolicy {
    Auto { delay: Duration },
    Manual,
}

impl AdvancePolicy {
    pub fn new(mode: AdvanceMode, delay: Duration) -> Self {
        match mode {
            AdvanceMode::Auto => AdvancePolicy::Auto { delay },
            AdvanceMode::Manual => AdvancePolicy::Manual,
        }
    }
}

/// The session-wide choices for how answers move the session forward and
/// how feedback is shown. Applied uniformly to every card.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Policy {
    pub advance: AdvancePolicy,
    pub miss: MissPolicy,
    pub feedback: FeedbackStyle,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            advance: AdvancePolicy::Auto {
                delay: DEFAULT_ADVANCE_DELAY,
            },
            miss: MissPolicy::Retry,
            feedback: FeedbackStyle::Label,
        }
    }
}
