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

use maud::Markup;
use maud::html;

use crate::session::controller::Submission;
use crate::session::policy::AdvancePolicy;
use crate::session::policy::FeedbackStyle;
use crate::session::policy::Policy;
use crate::session::presenter::Feedback;
use crate::session::presenter::Presenter;
use crate::session::presenter::Progress;
use crate::session::presenter::Prompt;
use crate::session::results::ResultEntry;
use crate::session::ticket::Ticket;
use crate::types::card::Card;

/// Extra time before the browser reloads, so the advance timer has fired by
/// the time the page is fetched again.
const REFRESH_SLACK_MS: u64 = 150;

/// How often the results page checks whether the answers were saved.
const PENDING_REFRESH_MS: u64 = 1000;

/// Renders cards as HTML. Keeps the most recent screen, which the GET
/// handler serves while a card is on screen.
pub struct HtmlPresenter {
    policy: Policy,
    screen: Markup,
}

impl HtmlPresenter {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            screen: html! {},
        }
    }

    pub fn screen(&self) -> &Markup {
        &self.screen
    }

    fn refresh_ms(&self) -> Option<u64> {
        match self.policy.advance {
            AdvancePolicy::Auto { delay } => {
                let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
                Some(delay_ms.saturating_add(REFRESH_SLACK_MS))
            }
            AdvancePolicy::Manual => None,
        }
    }
}

impl Presenter for HtmlPresenter {
    fn present_card(&mut self, card: &Card, prompt: &Prompt, progress: Progress, ticket: Ticket) {
        let sentence = html! {
            form #answer-form action="/" method="post" {
                (ticket_fields("Answer", ticket))
                p.sentence {
                    (prompt.before())
                    input #answer type="text" name="answer" size=(prompt.input_width()) autocomplete="off" autofocus;
                    (prompt.after())
                }
            }
        };
        self.screen = card_screen(card, progress, sentence, html! {}, None);
    }

    fn present_feedback(
        &mut self,
        card: &Card,
        prompt: &Prompt,
        progress: Progress,
        feedback: Feedback,
        ticket: Ticket,
    ) {
        let blank = if feedback.correct {
            html! { span.correct { (prompt.word()) } }
        } else {
            match self.policy.feedback {
                FeedbackStyle::Hint => html! {
                    input.error type="text" value=(card.word()) size=(prompt.input_width()) readonly;
                },
                FeedbackStyle::Label => html! { span.incorrect { (prompt.word()) } },
            }
        };
        let sentence = html! {
            p.sentence {
                (prompt.before())
                (blank)
                (prompt.after())
            }
        };
        let message = if feedback.correct {
            "Correct!"
        } else if feedback.will_retry {
            "Not quite. Try again."
        } else {
            "Not quite."
        };
        let controls = html! {
            div.feedback {
                p.message { (message) }
                @if let Some(due) = card.due_preview(feedback.correct) {
                    p.due { "Next review " (due) }
                }
            }
            div.controls {
                form action="/" method="post" {
                    (ticket_fields("Next", ticket))
                    input #next type="submit" value="Next";
                }
            }
        };
        self.screen = card_screen(card, progress, sentence, controls, self.refresh_ms());
    }
}

fn ticket_fields(action: &str, ticket: Ticket) -> Markup {
    html! {
        input type="hidden" name="action" value=(action);
        input type="hidden" name="cursor" value=(ticket.cursor);
        input type="hidden" name="generation" value=(ticket.generation);
    }
}

fn card_screen(
    card: &Card,
    progress: Progress,
    sentence: Markup,
    controls: Markup,
    refresh_ms: Option<u64>,
) -> Markup {
    html! {
        div.root {
            div.card data-refresh-ms=[refresh_ms] {
                div.header {
                    @if card.is_new() {
                        span.badge { "New word" }
                    } @else {
                        span.last-reviewed { "Last reviewed " (card.last_reviewed()) }
                    }
                    div #counter .progress {
                        (progress.to_string())
                    }
                }
                div.content {
                    (sentence)
                    div #translation .translation {
                        (card.translation())
                        @if let Some(kind) = card.kind() {
                            " " span.kind { "(" (kind) ")" }
                        }
                    }
                    @if let Some(synonyms) = card.synonyms() {
                        div #synonyms .synonyms { (synonyms) }
                    }
                }
                (controls)
            }
        }
    }
}

pub fn results_view(entries: &[ResultEntry], submission: &Submission) -> Markup {
    let correct = entries.iter().filter(|e| e.correct).count();
    let refresh_ms = match submission {
        Submission::Pending => Some(PENDING_REFRESH_MS),
        _ => None,
    };
    html! {
        div.root {
            div.finished data-refresh-ms=[refresh_ms] {
                h1 { "Session Completed" }
                p.score { (format!("{correct} / {} correct", entries.len())) }
                @match submission {
                    Submission::Pending => {
                        p.status { "Saving your answers..." }
                    }
                    Submission::Saved(_) => {
                        p.status { "Your answers were saved." }
                    }
                    Submission::Failed(message) => {
                        p.status.error { "Your answers could not be saved: " (message) }
                    }
                }
                div #results {
                    @for entry in entries {
                        div class=(if entry.correct { "result correct" } else { "result incorrect" }) {
                            (entry.word) " - " (entry.translation)
                            @if let Some(due) = &entry.due {
                                span.due { (due) }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn loading_view() -> Markup {
    html! {
        div.root {
            div.message data-refresh-ms=(PENDING_REFRESH_MS) {
                p { "Loading cards..." }
            }
        }
    }
}

pub fn nothing_to_review_view() -> Markup {
    html! {
        div.root {
            div.finished {
                h1 { "Nothing to review" }
                p { "No cards are due right now." }
            }
        }
    }
}

pub fn error_view(message: &str) -> Markup {
    html! {
        div.root {
            div.message.error {
                h1 { "Could not load cards" }
                p { (message) }
            }
        }
    }
}
