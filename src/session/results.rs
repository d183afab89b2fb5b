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

use serde::Serialize;

use crate::types::answer::AnswerResult;
use crate::types::card::Card;
use crate::types::card::CardId;
use crate::types::ledger::Ledger;

/// One line of the results summary.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntry {
    pub card_id: Option<CardId>,
    pub word: String,
    pub translation: String,
    pub correct: bool,
    /// When the card is due again, if known.
    pub due: Option<String>,
}

impl ResultEntry {
    pub fn line(&self) -> String {
        let mark = if self.correct { "ok" } else { "miss" };
        match &self.due {
            Some(due) => format!("{} - {} [{mark}] ({due})", self.word, self.translation),
            None => format!("{} - {} [{mark}]", self.word, self.translation),
        }
    }
}

impl From<AnswerResult> for ResultEntry {
    fn from(value: AnswerResult) -> Self {
        Self {
            card_id: value.card_id,
            word: value.word,
            translation: value.translation,
            correct: value.is_correct,
            due: value.due_formatted,
        }
    }
}

/// Builds the results summary from the local ledger, one entry per card in
/// deck order. Due dates come from the server's acknowledgement when it has
/// one for the card, otherwise from the card's own preview.
pub fn session_results(deck: &[Card], ledger: &Ledger, saved: &[AnswerResult]) -> Vec<ResultEntry> {
    deck.iter()
        .map(|card| {
            let correct = ledger.get(card.id()).unwrap_or(false);
            let acknowledged = saved
                .iter()
                .find(|r| r.card_id.as_ref() == Some(card.id()))
                .and_then(|r| r.due_formatted.clone());
            let due = acknowledged.or_else(|| card.due_preview(correct).map(str::to_string));
            ResultEntry {
                card_id: Some(card.id().clone()),
                word: card.word().to_string(),
                translation: card.translation().to_string(),
                correct,
                due,
            }
        })
        .collect()
}
