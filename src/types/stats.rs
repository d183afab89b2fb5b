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

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

/// The user's learning statistics, as reported by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    #[serde(default)]
    pub total_words_learned: u64,
    #[serde(default)]
    pub words_learned_today: u64,
    #[serde(default)]
    pub words_learned_this_week: u64,
    #[serde(default)]
    pub words_learned_this_month: u64,
    #[serde(default)]
    pub last_updated_date: Option<NaiveDate>,
}
