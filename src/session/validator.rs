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

/// Checks a typed answer against the target word. Leading and trailing
/// whitespace is ignored on both sides, and the comparison is
/// case-insensitive. There is no partial credit.
pub fn is_correct(input: &str, word: &str) -> bool {
    input.trim().to_lowercase() == word.trim().to_lowercase()
}
