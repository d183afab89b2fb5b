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

use indexmap::IndexMap;
use serde::Serialize;

use crate::types::card::Card;
use crate::types::card::CardId;

/// The per-card correctness record accumulated during a session.
///
/// Entries keep the order in which cards were first answered, which is deck
/// order, since the controller never skips a card. Recording an answer for a
/// card that already has an entry overwrites it in place.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: IndexMap<CardId, bool>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, id: CardId, correct: bool) {
        self.entries.insert(id, correct);
    }

    pub fn get(&self, id: &CardId) -> Option<bool> {
        self.entries.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (&CardId, bool)> {
        self.entries.iter().map(|(id, correct)| (id, *correct))
    }

    /// True if the ledger has exactly one entry per card in the deck and no
    /// other entries.
    pub fn covers(&self, deck: &[Card]) -> bool {
        self.entries.len() == deck.len() && deck.iter().all(|c| self.entries.contains_key(c.id()))
    }
}
