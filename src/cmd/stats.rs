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
use crate::types::stats::UserStats;

pub async fn print_stats(config: &Config, format: OutputFormat) -> Fallible<()> {
    let client = LearnClient::new(&config.api_url);
    let stats = client.fetch_stats().await?;
    println!("{}", render_stats(&stats, format)?);
    Ok(())
}

fn render_stats(stats: &UserStats, format: OutputFormat) -> Fallible<String> {
    match format {
        OutputFormat::Text => {
            let updated = match stats.last_updated_date {
                Some(date) => date.format("%Y-%m-%d").to_string(),
                None => "never".to_string(),
            };
            Ok(format!(
                "Words learned: {}\nToday: {}\nThis week: {}\nThis month: {}\nLast updated: {updated}",
                stats.total_words_learned,
                stats.words_learned_today,
                stats.words_learned_this_week,
                stats.words_learned_this_month,
            ))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
    }
}
