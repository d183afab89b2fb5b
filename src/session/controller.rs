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

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::session::policy::AdvancePolicy;
use crate::session::policy::MissPolicy;
use crate::session::policy::Policy;
use crate::session::presenter::Feedback;
use crate::session::presenter::Presenter;
use crate::session::presenter::Progress;
use crate::session::presenter::Prompt;
use crate::session::results::ResultEntry;
use crate::session::results::session_results;
use crate::session::ticket::Ticket;
use crate::session::validator::is_correct;
use crate::types::answer::AnswerResult;
use crate::types::card::Deck;
use crate::types::ledger::Ledger;

#[derive(Clone, PartialEq, Debug)]
pub enum Phase {
    /// Waiting for the deck.
    Loading,
    /// The card at the cursor is waiting for an answer.
    Reviewing,
    /// The card at the cursor has been answered, and its feedback is on
    /// screen. Waiting for the advance timer or the user.
    Answered { correct: bool },
    /// Every card has been reviewed and the answers were handed off for
    /// submission.
    Finished(Submission),
    /// The server had no cards for us.
    NothingToReview,
    /// The deck could not be fetched.
    Failed(String),
}

#[derive(Clone, PartialEq, Debug)]
pub enum Submission {
    Pending,
    Saved(Vec<AnswerResult>),
    Failed(String),
}

/// Work the controller needs done outside of itself.
#[derive(Clone, PartialEq, Debug)]
pub enum Effect {
    /// Call `timer_fired` with this ticket once the delay has elapsed.
    ScheduleAdvance { ticket: Ticket, delay: Duration },
    /// Send the answers to the server and report back through
    /// `submission_settled`.
    Submit(Ledger),
}

/// The review session state machine. Owns the deck, the cursor, and the
/// ledger, and drives the presenter.
pub struct Controller<P: Presenter> {
    policy: Policy,
    presenter: P,
    deck: Deck,
    cursor: usize,
    ledger: Ledger,
    phase: Phase,
    ticket: Option<Ticket>,
    generation: u64,
}

impl<P: Presenter> Controller<P> {
    pub fn new(policy: Policy, presenter: P) -> Self {
        Self {
            policy,
            presenter,
            deck: Vec::new(),
            cursor: 0,
            ledger: Ledger::new(),
            phase: Phase::Loading,
            ticket: None,
            generation: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.ticket == Some(ticket)
    }

    fn progress(&self) -> Progress {
        Progress {
            position: self.cursor + 1,
            total: self.deck.len(),
        }
    }

    pub fn deck_loaded(&mut self, deck: Deck) {
        if self.phase != Phase::Loading {
            log::debug!("Ignoring deck delivered outside of loading.");
            return;
        }
        log::debug!("Deck loaded with {} cards.", deck.len());
        self.deck = deck;
        if self.deck.is_empty() {
            self.phase = Phase::NothingToReview;
            return;
        }
        self.cursor = 0;
        self.present_current();
    }

    pub fn fetch_failed(&mut self, error: &ErrorReport) {
        if self.phase != Phase::Loading {
            return;
        }
        log::error!("Failed to fetch cards: {}", error.message());
        self.phase = Phase::Failed(error.message().to_string());
    }

    /// The user committed an answer for the card with the given ticket.
    pub fn commit(&mut self, ticket: Ticket, input: &str) -> Option<Effect> {
        if self.phase != Phase::Reviewing || !self.is_current(ticket) {
            log::debug!("Ignoring answer for stale ticket {ticket:?}.");
            return None;
        }
        let progress = self.progress();
        let card = &self.deck[self.cursor];
        let correct = is_correct(input, card.word());
        log::debug!(
            "Card {} answered {}.",
            card.id(),
            if correct { "correctly" } else { "incorrectly" }
        );
        self.ledger.record(card.id().clone(), correct);
        self.phase = Phase::Answered { correct };
        let feedback = Feedback {
            correct,
            will_retry: !correct && self.policy.miss == MissPolicy::Retry,
        };
        let prompt = Prompt::new(card);
        self.presenter
            .present_feedback(card, &prompt, progress, feedback, ticket);
        match self.policy.advance {
            AdvancePolicy::Auto { delay } => Some(Effect::ScheduleAdvance { ticket, delay }),
            AdvancePolicy::Manual => None,
        }
    }

    /// The user asked to move on from the feedback screen.
    pub fn next(&mut self, ticket: Ticket) -> Option<Effect> {
        if !self.is_answered() || !self.is_current(ticket) {
            log::debug!("Ignoring next for stale ticket {ticket:?}.");
            return None;
        }
        self.advance()
    }

    /// An advance timer scheduled for the given ticket went off.
    pub fn timer_fired(&mut self, ticket: Ticket) -> Option<Effect> {
        if !self.is_answered() || !self.is_current(ticket) {
            log::debug!("Ignoring timer for stale ticket {ticket:?}.");
            return None;
        }
        self.advance()
    }

    pub fn submission_settled(&mut self, outcome: Fallible<Vec<AnswerResult>>) {
        if self.phase != Phase::Finished(Submission::Pending) {
            log::debug!("Ignoring submission outcome outside of a pending submission.");
            return;
        }
        let submission = match outcome {
            Ok(results) => {
                log::debug!("Answers saved.");
                Submission::Saved(results)
            }
            Err(e) => {
                log::error!("Failed to submit answers: {}", e.message());
                Submission::Failed(e.message().to_string())
            }
        };
        self.phase = Phase::Finished(submission);
    }

    /// The results summary, in deck order. Built from the local ledger, so it
    /// is available whether or not the submission went through.
    pub fn results(&self) -> Vec<ResultEntry> {
        let saved: &[AnswerResult] = match &self.phase {
            Phase::Finished(Submission::Saved(results)) => results,
            _ => &[],
        };
        session_results(&self.deck, &self.ledger, saved)
    }

    fn is_answered(&self) -> bool {
        matches!(self.phase, Phase::Answered { .. })
    }

    fn advance(&mut self) -> Option<Effect> {
        let Phase::Answered { correct } = self.phase else {
            return None;
        };
        // A missed card under the retry policy is shown again.
        if correct || self.policy.miss == MissPolicy::SingleAttempt {
            self.cursor += 1;
        }
        if self.cursor == self.deck.len() {
            return Some(self.finalize());
        }
        self.present_current();
        None
    }

    fn present_current(&mut self) {
        self.generation += 1;
        let ticket = Ticket {
            cursor: self.cursor,
            generation: self.generation,
        };
        self.ticket = Some(ticket);
        self.phase = Phase::Reviewing;
        let progress = self.progress();
        let card = &self.deck[self.cursor];
        let prompt = Prompt::new(card);
        self.presenter.present_card(card, &prompt, progress, ticket);
    }

    fn finalize(&mut self) -> Effect {
        log::debug!("Session completed.");
        if !self.ledger.covers(&self.deck) {
            log::error!("Ledger does not match the deck.");
        }
        self.ticket = None;
        self.phase = Phase::Finished(Submission::Pending);
        Effect::Submit(self.ledger.clone())
    }
}

#[cfg(test)]
impl<P: Presenter> Controller<P> {
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The ticket of the card currently on screen, if any.
    pub fn ticket(&self) -> Option<Ticket> {
        self.ticket
    }
}
