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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::cmd::drill::state::ServerState;
use crate::session::ticket::Ticket;

#[derive(Debug, Deserialize)]
enum Action {
    Answer,
    Next,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    cursor: usize,
    generation: u64,
    #[serde(default)]
    answer: String,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Redirect {
    let ticket = Ticket {
        cursor: form.cursor,
        generation: form.generation,
    };
    let effect = {
        let mut controller = state.acquire();
        match form.action {
            Action::Answer => controller.commit(ticket, &form.answer),
            Action::Next => controller.next(ticket),
        }
    };
    if let Some(effect) = effect {
        state.dispatch(effect);
    }
    Redirect::to("/")
}
