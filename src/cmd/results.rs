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

use crate::client::LearnClient;
use crate::cmd::OutputFormat;
use crate::config::Config;
use crate::error::Fallible;
use crate::session::results::ResultEntry;

/// Prints the results of the last session, as the server recorded them.
pub async fn print_results(config: &Config, format: OutputFormat) -> Fallible<()> {
    let client = LearnClient::new(&config.api_url);
    let entries: Vec<ResultEntry> = client
        .fetch_results()
        .await?
        .into_iter()
        .map(ResultEntry::from)
        .collect();
    println!("{}", render_results(&entries, format)?);
    Ok(())
}

fn render_results(entries: &[ResultEntry], format: OutputFormat) -> Fallible<String> {
    match format {
        OutputFormat::Text => {
            if entries.is_empty() {
                return Ok("No results.".to_string());
            }
            let correct = entries.iter().filter(|e| e.correct).count();
            let mut lines: Vec<String> = entries.iter().map(ResultEntry::line).collect();
            lines.push(format!("{correct} / {} correct", entries.len()));
            Ok(lines.join("\n"))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
    }
}
