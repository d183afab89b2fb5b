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

use crate::session::ticket::Ticket;
use crate::types::card::Card;

/// Markers used to emphasize the target word in a sentence.
const EMPHASIS: char = '*';

/// A card's sentence split around the blank the user fills in.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Prompt {
    before: String,
    word: String,
    after: String,
}

impl Prompt {
    pub fn new(card: &Card) -> Self {
        let sentence: String = card.sentence().replace(EMPHASIS, "");
        let word = card.word();
        match find_word(&sentence, word) {
            Some((start, end)) => Self {
                before: sentence[..start].to_string(),
                word: sentence[start..end].to_string(),
                after: sentence[end..].to_string(),
            },
            None => {
                // The word isn't in the sentence: put the blank at the end so
                // the card can still be answered.
                log::debug!("Word {word:?} not found in sentence {sentence:?}.");
                Self {
                    before: format!("{} ", sentence.trim_end()),
                    word: word.to_string(),
                    after: String::new(),
                }
            }
        }
    }

    /// The text before the blank.
    pub fn before(&self) -> &str {
        &self.before
    }

    /// The word as it appears in the sentence.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// The text after the blank.
    pub fn after(&self) -> &str {
        &self.after
    }

    /// The width of the input, in characters.
    pub fn input_width(&self) -> usize {
        self.word.chars().count().max(1)
    }
}

/// Finds the byte range of the first occurrence of `word` in `sentence`.
/// Tries a literal match first, then a case-insensitive one.
fn find_word(sentence: &str, word: &str) -> Option<(usize, usize)> {
    if word.is_empty() {
        return None;
    }
    if let Some(start) = sentence.find(word) {
        return Some((start, start + word.len()));
    }
    let lower_sentence = sentence.to_lowercase();
    let lower_word = word.to_lowercase();
    // Offsets into the lowercased text only line up with the sentence when
    // lowercasing didn't change any lengths.
    if lower_sentence.len() != sentence.len() || lower_word.len() != word.len() {
        return None;
    }
    let start = lower_sentence.find(&lower_word)?;
    let end = start + word.len();
    sentence.get(start..end).map(|_| (start, end))
}

/// The position of the current card in the deck.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Progress {
    /// One-based position of the current card.
    pub position: usize,
    pub total: usize,
}

impl Display for Progress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.position, self.total)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Feedback {
    pub correct: bool,
    /// Whether the card will be shown again after this feedback.
    pub will_retry: bool,
}

/// Puts cards and answer feedback in front of the user.
pub trait Presenter {
    /// Shows a card with an empty input in place of the target word.
    fn present_card(&mut self, card: &Card, prompt: &Prompt, progress: Progress, ticket: Ticket);

    /// Shows whether the answer to the current card was right.
    fn present_feedback(
        &mut self,
        card: &Card,
        prompt: &Prompt,
        progress: Progress,
        feedback: Feedback,
        ticket: Ticket,
    );
}
