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

/// Identifies one presentation of a card. A new ticket is issued every time
/// a card is put in front of the user, including when a missed card is shown
/// again. Answers, "next" clicks, and timers carry the ticket they were
/// issued for, and are ignored if it is no longer current.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Ticket {
    pub cursor: usize,
    pub generation: u64,
}
