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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;

use crate::cmd::drill::state::ServerState;
use crate::cmd::drill::template::page_template;
use crate::cmd::drill::view::error_view;
use crate::cmd::drill::view::loading_view;
use crate::cmd::drill::view::nothing_to_review_view;
use crate::cmd::drill::view::results_view;
use crate::session::controller::Phase;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let controller = state.acquire();
    let body = match controller.phase() {
        Phase::Loading => loading_view(),
        Phase::Reviewing | Phase::Answered { .. } => controller.presenter().screen().clone(),
        Phase::Finished(submission) => results_view(&controller.results(), submission),
        Phase::NothingToReview => nothing_to_review_view(),
        Phase::Failed(message) => error_view(message),
    };
    let html = page_template(body);
    (StatusCode::OK, Html(html.into_string()))
}
