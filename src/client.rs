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

use reqwest::Response;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::answer::AnswerResult;
use crate::types::card::Deck;
use crate::types::ledger::Ledger;
use crate::types::stats::UserStats;

const CARDS_PATH: &str = "/api/learn/get-cards";
const ANSWER_PATH: &str = "/api/learn/answer";
const STATS_PATH: &str = "/api/stats";

/// A client for the learning server's HTTP API.
#[derive(Clone)]
pub struct LearnClient {
    base_url: String,
    http: reqwest::Client,
}

impl LearnClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Fetches the cards due for review. An empty deck means nothing is due.
    pub async fn fetch_deck(&self) -> Fallible<Deck> {
        let url = self.url(CARDS_PATH);
        log::debug!("GET {url}");
        let response = check_status(self.http.get(&url).send().await?)?;
        let deck: Deck = response.json().await?;
        log::debug!("Fetched {} cards.", deck.len());
        Ok(deck)
    }

    /// Sends the session's answers. A success status is all the server owes
    /// us; if it also sends back per-card results, those are returned.
    pub async fn submit_answers(&self, ledger: &Ledger) -> Fallible<Vec<AnswerResult>> {
        let url = self.url(ANSWER_PATH);
        log::debug!("POST {url} ({} answers)", ledger.len());
        let response = check_status(self.http.post(&url).json(ledger).send().await?)?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str(&body) {
            Ok(results) => Ok(results),
            Err(e) => {
                log::debug!("Ignoring unrecognized submission response: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// Fetches the results of the last submitted session.
    pub async fn fetch_results(&self) -> Fallible<Vec<AnswerResult>> {
        let url = self.url(ANSWER_PATH);
        log::debug!("GET {url}");
        let response = check_status(self.http.get(&url).send().await?)?;
        Ok(response.json().await?)
    }

    pub async fn fetch_stats(&self) -> Fallible<UserStats> {
        let url = self.url(STATS_PATH);
        log::debug!("GET {url}");
        let response = check_status(self.http.get(&url).send().await?)?;
        Ok(response.json().await?)
    }
}

fn check_status(response: Response) -> Fallible<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        fail(format!(
            "server responded with {status} to {}",
            response.url().path()
        ))
    }
}
