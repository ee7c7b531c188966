use reqwest::redirect::Policy;
use std::time::{Duration, Instant};

use crate::config::ProbeSettings;
use crate::core::constants::{display, http, tool};
use crate::core::error::{AnalyzerError, Result};
use crate::ui::Logger;
use crate::ui::color::{Colors, colorize};

/// URLs split by whether they answered the probe, each in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeOutcome {
    pub accessible: Vec<String>,
    pub inaccessible: Vec<String>,
}

/// Sends one HEAD request per URL to check it is reachable before auditing.
pub struct Prober {
    client: reqwest::Client,
}

impl Prober {
    pub fn new(settings: &ProbeSettings) -> Result<Self> {
        let redirect_policy = if settings.follow_redirects {
            Policy::limited(http::MAX_REDIRECTS)
        } else {
            Policy::none()
        };
        let user_agent = settings
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("{}/{}", tool::NAME, tool::VERSION));

        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .redirect(redirect_policy)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    /// Prober with default settings and a custom timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Self::new(&ProbeSettings {
            timeout,
            ..ProbeSettings::default()
        })
    }

    /// Any response below 400 counts; errors and timeouts do not.
    pub async fn is_accessible(&self, url: &str, logger: &Logger) -> bool {
        match self.client.head(url).send().await {
            Ok(response) => {
                let status = response.status();
                logger.verbose(&format!("Response status for {url}: {status}"));
                status.as_u16() < http::FIRST_ERROR_STATUS
            }
            Err(err) => {
                logger.verbose(&format!("Accessibility check failed for {url}: {err}"));
                false
            }
        }
    }

    /// Probe every URL in order, one at a time
    pub async fn probe_all(&self, urls: &[String], logger: &Logger) -> Result<ProbeOutcome> {
        logger.info(&colorize("🔍 Checking URL accessibility...", Colors::BLUE));
        logger.verbose(&format!(
            "Starting accessibility check for {} URLs",
            urls.len()
        ));

        let mut outcome = ProbeOutcome::default();
        for (index, url) in urls.iter().enumerate() {
            logger.verbose(&format!("Checking URL {}/{}: {url}", index + 1, urls.len()));
            logger.inline(&format!("  Checking {url}... "));

            let started = Instant::now();
            let accessible = self.is_accessible(url, logger).await;
            let elapsed = started.elapsed().as_millis();

            if accessible {
                logger.info(&colorize(display::SUCCESS_EMOJI, Colors::GREEN));
                logger.verbose(&format!("Accessible in {elapsed}ms"));
                outcome.accessible.push(url.clone());
            } else {
                logger.info(&colorize(display::ERROR_EMOJI, Colors::RED));
                logger.verbose(&format!("Not accessible (checked in {elapsed}ms)"));
                outcome.inaccessible.push(url.clone());
            }
        }

        if !outcome.inaccessible.is_empty() {
            logger.warn(&format!(
                "Warning: {} URL(s) are not accessible and will be skipped:",
                outcome.inaccessible.len()
            ));
            for url in &outcome.inaccessible {
                logger.warn(&format!("  - {url}"));
            }
        }

        if outcome.accessible.is_empty() {
            return Err(AnalyzerError::NoAccessibleUrls);
        }

        logger.success(&format!(
            "{} URL(s) are accessible and will be analyzed",
            outcome.accessible.len()
        ));
        logger.blank();
        Ok(outcome)
    }
}
