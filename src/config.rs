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

use std::env::current_dir;
use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::session::policy::AdvanceMode;
use crate::session::policy::AdvancePolicy;
use crate::session::policy::DEFAULT_ADVANCE_DELAY;
use crate::session::policy::FeedbackStyle;
use crate::session::policy::MissPolicy;
use crate::session::policy::Policy;

/// The name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "vocabdrill.toml";

#[derive(Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Base URL of the learning server.
    pub api_url: String,
    /// Port for the local drill server.
    pub port: u16,
    pub advance: AdvanceMode,
    pub advance_delay_ms: u64,
    pub on_miss: MissPolicy,
    pub feedback: FeedbackStyle,
    /// Whether to open the drill page in a browser on startup.
    pub open_browser: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            port: 8000,
            advance: AdvanceMode::Auto,
            advance_delay_ms: DEFAULT_ADVANCE_DELAY.as_millis() as u64,
            on_miss: MissPolicy::Retry,
            feedback: FeedbackStyle::Label,
            open_browser: true,
        }
    }
}

/// Values given on the command line, which take precedence over the file.
#[derive(Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub port: Option<u16>,
    pub advance: Option<AdvanceMode>,
    pub advance_delay_ms: Option<u64>,
    pub on_miss: Option<MissPolicy>,
    pub feedback: Option<FeedbackStyle>,
    pub no_open: bool,
}

impl Config {
    /// Loads the configuration from an explicit path, which must exist, or
    /// from `vocabdrill.toml` in the working directory if there is one.
    pub fn load(path: Option<String>) -> Fallible<Self> {
        match path {
            Some(path) => {
                let path = PathBuf::from(path);
                if !path.exists() {
                    return fail("config file does not exist.");
                }
                Self::from_file(&path)
            }
            None => {
                let path = current_dir()?.join(CONFIG_FILE);
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    log::debug!("No config file found, using defaults.");
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Fallible<Self> {
        log::debug!("Loading config from {}", path.display());
        let content = read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(api_url) = overrides.api_url {
            self.api_url = api_url;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(advance) = overrides.advance {
            self.advance = advance;
        }
        if let Some(delay) = overrides.advance_delay_ms {
            self.advance_delay_ms = delay;
        }
        if let Some(on_miss) = overrides.on_miss {
            self.on_miss = on_miss;
        }
        if let Some(feedback) = overrides.feedback {
            self.feedback = feedback;
        }
        if overrides.no_open {
            self.open_browser = false;
        }
        self
    }

    pub fn policy(&self) -> Policy {
        Policy {
            advance: AdvancePolicy::new(
                self.advance,
                Duration::from_millis(self.advance_delay_ms),
            ),
            miss: self.on_miss,
            feedback: self.feedback,
        }
    }
}
