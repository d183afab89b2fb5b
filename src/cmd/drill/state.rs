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
use std::sync::MutexGuard;

use tokio::time::sleep;

use crate::client::LearnClient;
use crate::cmd::drill::view::HtmlPresenter;
use crate::session::controller::Controller;
use crate::session::controller::Effect;

#[derive(Clone)]
pub struct ServerState {
    pub client: LearnClient,
    pub session: Arc<Mutex<Controller<HtmlPresenter>>>,
}

impl ServerState {
    pub fn new(client: LearnClient, controller: Controller<HtmlPresenter>) -> Self {
        Self {
            client,
            session: Arc::new(Mutex::new(controller)),
        }
    }

    pub fn acquire(&self) -> MutexGuard<'_, Controller<HtmlPresenter>> {
        self.session.lock().unwrap()
    }

    /// Fetches the deck in the background. The page shows the loading screen
    /// until the controller has the outcome.
    pub fn load(&self) {
        let state = self.clone();
        tokio::spawn(async move {
            log::debug!("Fetching cards...");
            let outcome = state.client.fetch_deck().await;
            let mut controller = state.acquire();
            match outcome {
                Ok(deck) => controller.deck_loaded(deck),
                Err(e) => controller.fetch_failed(&e),
            }
        });
    }

    /// Carries out an effect requested by the controller. Both kinds run in
    /// the background and only take the lock to report back.
    pub fn dispatch(&self, effect: Effect) {
        match effect {
            Effect::ScheduleAdvance { ticket, delay } => {
                let state = self.clone();
                tokio::spawn(async move {
                    sleep(delay).await;
                    let effect = state.acquire().timer_fired(ticket);
                    if let Some(effect) = effect {
                        state.dispatch(effect);
                    }
                });
            }
            Effect::Submit(ledger) => {
                let state = self.clone();
                tokio::spawn(async move {
                    let outcome = state.client.submit_answers(&ledger).await;
                    state.acquire().submission_settled(outcome);
                });
            }
        }
    }
}
