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

mod get;
mod post;
pub mod server;
mod state;
mod template;
mod view;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::StatusCode;
    use tokio::net::TcpStream;
    use tokio::spawn;
    use tokio::time::sleep;

    use crate::cmd::drill::server::start_server;
    use crate::config::Config;
    use crate::error::Fallible;
    use crate::helper::MockOptions;
    use crate::helper::MockServer;
    use crate::helper::SubmitMode;
    use crate::helper::sample_deck;
    use crate::session::policy::AdvanceMode;
    use crate::session::policy::FeedbackStyle;
    use crate::session::policy::MissPolicy;

    fn config(api: &MockServer, advance: AdvanceMode, on_miss: MissPolicy) -> Config {
        Config {
            api_url: api.url().to_string(),
            port: portpicker::pick_unused_port().unwrap(),
            advance,
            advance_delay_ms: 10,
            on_miss,
            feedback: FeedbackStyle::Label,
            open_browser: false,
        }
    }

    /// Starts the drill server in the background and waits until it accepts
    /// connections. Returns the root URL.
    async fn start_listening(config: Config) -> String {
        let bind = format!("127.0.0.1:{}", config.port);
        spawn(async move { start_server(config).await });
        loop {
            if let Ok(stream) = TcpStream::connect(&bind).await {
                drop(stream);
                break;
            }
            sleep(Duration::from_millis(1)).await;
        }
        format!("http://{bind}/")
    }

    /// Fetches the root page until it is no longer the loading screen.
    async fn page_after_loading(url: &str) -> Fallible<String> {
        loop {
            let html = reqwest::get(url).await?.text().await?;
            if !html.contains("Loading cards...") {
                return Ok(html);
            }
            sleep(Duration::from_millis(5)).await;
        }
    }

    /// Like `start_listening`, but also waits for the deck to arrive.
    async fn start_drill(config: Config) -> String {
        let url = start_listening(config).await;
        page_after_loading(&url).await.unwrap();
        url
    }

    async fn post(
        url: &str,
        action: &str,
        cursor: usize,
        generation: u64,
        answer: &str,
    ) -> Fallible<String> {
        let cursor = cursor.to_string();
        let generation = generation.to_string();
        let response = reqwest::Client::new()
            .post(url)
            .form(&[
                ("action", action),
                ("cursor", cursor.as_str()),
                ("generation", generation.as_str()),
                ("answer", answer),
            ])
            .send()
            .await?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        Ok(response.text().await?)
    }

    async fn wait_for_submission(api: &MockServer) {
        while api.submissions().is_empty() {
            sleep(Duration::from_millis(5)).await;
        }
    }

    #[tokio::test]
    async fn test_loading_page_until_deck_arrives() -> Fallible<()> {
        let mut options = MockOptions::new(sample_deck());
        options.fetch_delay = Duration::from_millis(500);
        let api = MockServer::start(options).await?;
        let url = start_listening(config(&api, AdvanceMode::Manual, MissPolicy::Retry)).await;

        let html = reqwest::get(&url).await?.text().await?;
        assert!(html.contains("Loading cards..."));
        assert!(html.contains("data-refresh-ms=\"1000\""));
        // Answers sent before the deck arrives are ignored.
        let html = post(&url, "Answer", 0, 1, "run").await?;
        assert!(html.contains("Loading cards..."));

        let html = page_after_loading(&url).await?;
        assert!(html.contains("1/3"));
        assert!(html.contains("I <input"));
        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_api_shows_error_page() -> Fallible<()> {
        let port = portpicker::pick_unused_port().unwrap();
        let config = Config {
            api_url: format!("http://127.0.0.1:{port}"),
            port: portpicker::pick_unused_port().unwrap(),
            open_browser: false,
            ..Config::default()
        };
        let url = start_listening(config).await;
        let html = page_after_loading(&url).await?;
        assert!(html.contains("Could not load cards"));
        assert!(!html.contains("data-refresh-ms"));
        Ok(())
    }

    #[tokio::test]
    async fn test_server_error_shows_error_page() -> Fallible<()> {
        let mut options = MockOptions::new(sample_deck());
        options.fail_fetch = true;
        let api = MockServer::start(options).await?;
        let url = start_listening(config(&api, AdvanceMode::Manual, MissPolicy::Retry)).await;
        let html = page_after_loading(&url).await?;
        assert!(html.contains("Could not load cards"));
        assert!(html.contains("server responded with 500 Internal Server Error"));
        // The error is terminal.
        let html = post(&url, "Answer", 0, 1, "run").await?;
        assert!(html.contains("Could not load cards"));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_deck_shows_nothing_to_review() -> Fallible<()> {
        let api = MockServer::start(MockOptions::new(Vec::new())).await?;
        let url = start_listening(config(&api, AdvanceMode::Manual, MissPolicy::Retry)).await;
        let html = page_after_loading(&url).await?;
        assert!(html.contains("Nothing to review"));
        assert!(!html.contains("<input"));
        let html = post(&url, "Next", 0, 1, "").await?;
        assert!(html.contains("Nothing to review"));
        assert!(api.submissions().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_static_assets() -> Fallible<()> {
        let api = MockServer::start(MockOptions::new(sample_deck())).await?;
        let url = start_drill(config(&api, AdvanceMode::Manual, MissPolicy::Retry)).await;

        let response = reqwest::get(format!("{url}style.css")).await?;
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        let response = reqwest::get(format!("{url}script.js")).await?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/javascript"
        );

        let response = reqwest::get(format!("{url}herp-derp")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn test_e2e_single_attempt() -> Fallible<()> {
        let api = MockServer::start(MockOptions::new(sample_deck())).await?;
        let url = start_drill(config(&api, AdvanceMode::Manual, MissPolicy::SingleAttempt)).await;

        let response = reqwest::get(&url).await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("1/3"));
        assert!(html.contains("I <input"));
        assert!(html.contains("jog, sprint"));

        // Card 1: right.
        let html = post(&url, "Answer", 0, 1, " RUN ").await?;
        assert!(html.contains("I <span class=\"correct\">run</span> every morning."));
        assert!(html.contains("через 30 хвилин"));
        let html = post(&url, "Next", 0, 1, "").await?;
        assert!(html.contains("2/3"));

        // Card 2: wrong, and no second chance.
        let html = post(&url, "Answer", 1, 2, "dog").await?;
        assert!(html.contains("<span class=\"incorrect\">cat</span>"));
        let html = post(&url, "Next", 1, 2, "").await?;
        assert!(html.contains("3/3"));

        // Card 3: right.
        post(&url, "Answer", 2, 3, "blue").await?;
        let html = post(&url, "Next", 2, 3, "").await?;
        assert!(html.contains("Session Completed"));
        assert!(html.contains("2 / 3 correct"));
        assert_eq!(html.matches("class=\"result correct\"").count(), 2);
        assert_eq!(html.matches("class=\"result incorrect\"").count(), 1);
        let run = html.find("run - бігати").unwrap();
        let cat = html.find("cat - кіт").unwrap();
        let blue = html.find("blue - синій").unwrap();
        assert!(run < cat && cat < blue);

        wait_for_submission(&api).await;
        assert_eq!(
            serde_json::to_string(&api.submissions()[0])?,
            r#"{"11":true,"12":false,"13":true}"#
        );

        // Late posts don't reopen the session.
        let html = post(&url, "Answer", 2, 3, "blue").await?;
        assert!(html.contains("Session Completed"));
        Ok(())
    }

    #[tokio::test]
    async fn test_stale_answer_ignored() -> Fallible<()> {
        let api = MockServer::start(MockOptions::new(sample_deck())).await?;
        let url = start_drill(config(&api, AdvanceMode::Manual, MissPolicy::Retry)).await;
        let html = post(&url, "Answer", 0, 99, "run").await?;
        assert!(html.contains("I <input"));
        assert!(!html.contains("Correct!"));
        Ok(())
    }

    #[tokio::test]
    async fn test_auto_advance_with_retry() -> Fallible<()> {
        let api = MockServer::start(MockOptions::new(sample_deck())).await?;
        let mut config = config(&api, AdvanceMode::Auto, MissPolicy::Retry);
        config.advance_delay_ms = 150;
        let url = start_drill(config).await;

        let html = post(&url, "Answer", 0, 1, "walk").await?;
        assert!(html.contains("Try again"));
        assert!(html.contains("data-refresh-ms=\"300\""));
        sleep(Duration::from_millis(400)).await;

        // The same card is back, under a new ticket.
        let html = reqwest::get(&url).await?.text().await?;
        assert!(html.contains("1/3"));
        assert!(html.contains("I <input"));
        assert!(html.contains("name=\"generation\" value=\"2\""));

        post(&url, "Answer", 0, 2, "run").await?;
        sleep(Duration::from_millis(400)).await;
        let html = reqwest::get(&url).await?.text().await?;
        assert!(html.contains("2/3"));
        Ok(())
    }

    #[tokio::test]
    async fn test_huge_delay_keeps_serving() -> Fallible<()> {
        let api = MockServer::start(MockOptions::new(sample_deck())).await?;
        let mut config = config(&api, AdvanceMode::Auto, MissPolicy::SingleAttempt);
        config.advance_delay_ms = u64::MAX;
        let url = start_drill(config).await;

        let html = post(&url, "Answer", 0, 1, "run").await?;
        assert!(html.contains("Correct!"));
        assert!(html.contains(&format!("data-refresh-ms=\"{}\"", u64::MAX)));
        // The user can still move on by hand.
        let html = post(&url, "Next", 0, 1, "").await?;
        assert!(html.contains("2/3"));
        Ok(())
    }

    #[tokio::test]
    async fn test_submission_failure_still_shows_results() -> Fallible<()> {
        let mut options = MockOptions::new(sample_deck());
        options.submit = SubmitMode::Fail;
        let api = MockServer::start(options).await?;
        let url = start_drill(config(&api, AdvanceMode::Manual, MissPolicy::SingleAttempt)).await;

        post(&url, "Answer", 0, 1, "run").await?;
        post(&url, "Next", 0, 1, "").await?;
        post(&url, "Answer", 1, 2, "cat").await?;
        post(&url, "Next", 1, 2, "").await?;
        post(&url, "Answer", 2, 3, "red").await?;
        post(&url, "Next", 2, 3, "").await?;

        wait_for_submission(&api).await;
        let mut html = String::new();
        for _ in 0..200 {
            html = reqwest::get(&url).await?.text().await?;
            if html.contains("could not be saved") {
                break;
            }
            sleep(Duration::from_millis(5)).await;
        }
        assert!(html.contains("could not be saved"));
        assert!(html.contains("2 / 3 correct"));
        assert_eq!(html.matches("class=\"result").count(), 3);
        Ok(())
    }
}
