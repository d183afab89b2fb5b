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

use clap::Args;
use clap::Parser;

use crate::cmd::OutputFormat;
use crate::cmd::drill::server::start_server;
use crate::cmd::results::print_results;
use crate::cmd::stats::print_stats;
use crate::config::Config;
use crate::config::Overrides;
use crate::error::Fallible;
use crate::session::policy::AdvanceMode;
use crate::session::policy::FeedbackStyle;
use crate::session::policy::MissPolicy;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Review the cards that are due.
    Drill {
        #[command(flatten)]
        common: CommonArgs,
        /// Port for the local drill server.
        #[arg(long)]
        port: Option<u16>,
        /// Whether to move on after a delay or wait for "Next".
        #[arg(long)]
        advance: Option<AdvanceMode>,
        /// How long feedback stays on screen before moving on, in milliseconds.
        #[arg(long)]
        delay_ms: Option<u64>,
        /// What happens after a wrong answer.
        #[arg(long)]
        on_miss: Option<MissPolicy>,
        /// How wrong answers are shown.
        #[arg(long)]
        feedback: Option<FeedbackStyle>,
        /// Don't open the browser.
        #[arg(long)]
        no_open: bool,
    },
    /// Print the results of the last session.
    Results {
        #[command(flatten)]
        common: CommonArgs,
        #[arg(long, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print learning statistics.
    Stats {
        #[command(flatten)]
        common: CommonArgs,
        #[arg(long, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Base URL of the learning server.
    #[arg(long)]
    api: Option<String>,
    /// Path to the configuration file.
    #[arg(long)]
    config: Option<String>,
}

impl CommonArgs {
    fn load(self, overrides: Overrides) -> Fallible<Config> {
        let config = Config::load(self.config)?;
        Ok(config.apply(Overrides {
            api_url: self.api,
            ..overrides
        }))
    }
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            common,
            port,
            advance,
            delay_ms,
            on_miss,
            feedback,
            no_open,
        } => {
            let config = common.load(Overrides {
                port,
                advance,
                advance_delay_ms: delay_ms,
                on_miss,
                feedback,
                no_open,
                ..Overrides::default()
            })?;
            start_server(config).await
        }
        Command::Results { common, format } => {
            let config = common.load(Overrides::default())?;
            print_results(&config, format).await
        }
        Command::Stats { common, format } => {
            let config = common.load(Overrides::default())?;
            print_stats(&config, format).await
        }
    }
}
