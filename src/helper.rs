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

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use chrono::NaiveDate;
use serde_json::Map;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::spawn;
use tokio::time::sleep;

use crate::error::Fallible;
use crate::types::answer::AnswerResult;
use crate::types::card::Card;
use crate::types::card::CardId;
use crate::types::stats::UserStats;

/// How the mock server answers a submission.
#[derive(Clone, Copy, PartialEq)]
pub enum SubmitMode {
    /// Respond with per-card results.
    Results,
    /// Respond with an empty body.
    Empty,
    /// Respond with a server error.
    Fail,
}

pub struct MockOptions {
    pub cards: Vec<Card>,
    pub fail_fetch: bool,
    /// How long the card endpoint waits before answering.
    pub fetch_delay: Duration,
    pub submit: SubmitMode,
}

impl MockOptions {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards,
            fail_fetch: false,
            fetch_delay: Duration::ZERO,
            submit: SubmitMode::Results,
        }
    }
}

#[derive(Clone)]
struct MockState {
    options: Arc<MockOptions>,
    submissions: Arc<Mutex<Vec<Map<String, Value>>>>,
}

/// A stand-in for the learning server, listening on a free local port.
pub struct MockServer {
    url: String,
    state: MockState,
}

impl MockServer {
    pub async fn start(options: MockOptions) -> Fallible<Self> {
        let state = MockState {
            options: Arc::new(options),
            submissions: Arc::new(Mutex::new(Vec::new())),
        };
        let app = Router::new();
        let app = app.route("/api/learn/get-cards", get(get_cards));
        let app = app.route("/api/learn/answer", get(get_answers).post(post_answers));
        let app = app.route("/api/stats", get(get_stats));
        let app = app.with_state(state.clone());
        let port = portpicker::pick_unused_port().unwrap();
        let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;
        spawn(async move { axum::serve(listener, app).await });
        Ok(Self {
            url: format!("http://127.0.0.1:{port}"),
            state,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The answer payloads received so far.
    pub fn submissions(&self) -> Vec<Map<String, Value>> {
        self.state.submissions.lock().unwrap().clone()
    }
}

/// Three cards, with the server's scheduling metadata filled in on the
/// first.
pub fn sample_deck() -> Vec<Card> {
    vec![
        Card::new(CardId::from(11), "I *run* every morning.", "run", "бігати")
            .with_synonyms("jog, sprint")
            .with_schedule("2 години назад", "через 30 хвилин", "через 1 хвилину"),
        Card::new(CardId::from(12), "The cat sleeps.", "cat", "кіт"),
        Card::new(CardId::from(13), "The sky is blue.", "blue", "синій"),
    ]
}

async fn get_cards(State(state): State<MockState>) -> Response {
    sleep(state.options.fetch_delay).await;
    if state.options.fail_fetch {
        (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
    } else {
        Json(state.options.cards.clone()).into_response()
    }
}

async fn post_answers(
    State(state): State<MockState>,
    Json(answers): Json<Map<String, Value>>,
) -> Response {
    state.submissions.lock().unwrap().push(answers.clone());
    match state.options.submit {
        SubmitMode::Results => Json(results_for(&state.options.cards, &answers)).into_response(),
        SubmitMode::Empty => StatusCode::OK.into_response(),
        SubmitMode::Fail => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
    }
}

async fn get_answers(State(state): State<MockState>) -> Json<Vec<AnswerResult>> {
    let submissions = state.submissions.lock().unwrap();
    let results = match submissions.last() {
        Some(answers) => results_for(&state.options.cards, answers),
        None => Vec::new(),
    };
    Json(results)
}

async fn get_stats() -> Json<UserStats> {
    Json(UserStats {
        total_words_learned: 42,
        words_learned_today: 3,
        words_learned_this_week: 10,
        words_learned_this_month: 20,
        last_updated_date: NaiveDate::from_ymd_opt(2025, 3, 14),
    })
}

fn results_for(cards: &[Card], answers: &Map<String, Value>) -> Vec<AnswerResult> {
    cards
        .iter()
        .filter(|c| answers.contains_key(c.id().as_str()))
        .map(|card| {
            let correct = answers
                .get(card.id().as_str())
                .and_then(Value::as_bool)
                .unwrap_or(false);
            AnswerResult {
                card_id: Some(card.id().clone()),
                word: card.word().to_string(),
                translation: card.translation().to_string(),
                is_correct: correct,
                due_formatted: Some(
                    if correct {
                        "через 1 день"
                    } else {
                        "через 1 хвилину"
                    }
                    .to_string(),
                ),
            }
        })
        .collect()
}
