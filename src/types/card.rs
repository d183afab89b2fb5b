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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Visitor;

/// The value the server sends as the last-reviewed string for cards that
/// have never been reviewed.
pub const NEVER_REVIEWED: &str = "Нове слово";

/// A server-assigned card identifier. The server may send it as a JSON
/// integer or string; it is always serialized as a string, since it is used
/// as an object key in the answer payload.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct CardId(String);

#[cfg(test)]
impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CardId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
impl From<u64> for CardId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for CardId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CardId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CardIdVisitor)
    }
}

struct CardIdVisitor;

impl Visitor<'_> for CardIdVisitor {
    type Value = CardId;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "an integer or string card identifier")
    }

    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<CardId, E> {
        Ok(CardId(v.to_string()))
    }

    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<CardId, E> {
        Ok(CardId(v.to_string()))
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<CardId, E> {
        Ok(CardId(v.to_string()))
    }
}

/// A fill-in-the-blank review card, as sent by the learning server.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(rename = "cardId")]
    id: CardId,
    /// The sentence containing the target word. May wrap the word in
    /// asterisks for emphasis.
    sentence: String,
    /// The word the user must type.
    word: String,
    #[serde(default)]
    translation: String,
    #[serde(default)]
    synonyms: Option<String>,
    /// The part of speech, if the server knows it.
    #[serde(rename = "type", default)]
    kind: Option<String>,
    /// Human-readable time since the card was last reviewed.
    #[serde(rename = "lastAnsweredFormatted", default = "never_reviewed")]
    last_reviewed: String,
    /// When the card will be due again if answered correctly.
    #[serde(rename = "dueFormattedTrue", default)]
    due_if_correct: Option<String>,
    /// When the card will be due again if answered incorrectly.
    #[serde(rename = "dueFormattedFalse", default)]
    due_if_wrong: Option<String>,
}

fn never_reviewed() -> String {
    NEVER_REVIEWED.to_string()
}

impl Card {
    #[cfg(test)]
    pub fn new(
        id: CardId,
        sentence: impl Into<String>,
        word: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            id,
            sentence: sentence.into(),
            word: word.into(),
            translation: translation.into(),
            synonyms: None,
            kind: None,
            last_reviewed: never_reviewed(),
            due_if_correct: None,
            due_if_wrong: None,
        }
    }

    #[cfg(test)]
    pub fn with_synonyms(mut self, synonyms: impl Into<String>) -> Self {
        self.synonyms = Some(synonyms.into());
        self
    }

    #[cfg(test)]
    pub fn with_schedule(
        mut self,
        last_reviewed: impl Into<String>,
        due_if_correct: impl Into<String>,
        due_if_wrong: impl Into<String>,
    ) -> Self {
        self.last_reviewed = last_reviewed.into();
        self.due_if_correct = Some(due_if_correct.into());
        self.due_if_wrong = Some(due_if_wrong.into());
        self
    }

    pub fn id(&self) -> &CardId {
        &self.id
    }

    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    pub fn synonyms(&self) -> Option<&str> {
        self.synonyms.as_deref()
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn last_reviewed(&self) -> &str {
        &self.last_reviewed
    }

    pub fn is_new(&self) -> bool {
        self.last_reviewed == NEVER_REVIEWED
    }

    /// The server's preview of the next due date for the given outcome.
    pub fn due_preview(&self, correct: bool) -> Option<&str> {
        if correct {
            self.due_if_correct.as_deref()
        } else {
            self.due_if_wrong.as_deref()
        }
    }
}

/// The ordered set of cards fetched for one session.
pub type Deck = Vec<Card>;
