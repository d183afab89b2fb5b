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

use serde::Deserialize;
use serde::Serialize;

use crate::types::card::CardId;

/// The server's record of one answered card, returned after the answers are
/// submitted and by the results endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResult {
    #[serde(default)]
    pub card_id: Option<CardId>,
    pub word: String,
    #[serde(default)]
    pub translation: String,
    #[serde(alias = "correct")]
    pub is_correct: bool,
    #[serde(default)]
    pub due_formatted: Option<String>,
}
