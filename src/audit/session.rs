//! Transient headless browser sessions.
//!
//! Each audit gets its own browser process with a throwaway profile. The
//! browser picks a free debugging port and announces it on stderr; the
//! session is torn down with `close`, or killed on drop if the audit
//! bails out early.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tempfile::TempDir;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use url::Url;

use crate::core::constants::browser;
use crate::core::error::{AnalyzerError, Result};
use crate::ui::Logger;

/// Extract the debugging port from a "DevTools listening on ws://..." line
pub fn parse_devtools_endpoint(line: &str) -> Option<u16> {
    let start = line.find(browser::DEVTOOLS_MARKER)? + browser::DEVTOOLS_MARKER.len();
    let endpoint = Url::parse(line[start..].trim()).ok()?;
    endpoint.port()
}

/// Find a browser binary: configured path, then `CHROME_PATH`, then `PATH`.
pub fn locate_browser(configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = configured {
        return Some(path.to_path_buf());
    }

    if let Some(path) = env::var_os(browser::PATH_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }

    let search_path = env::var_os("PATH")?;
    env::split_paths(&search_path).find_map(|dir| {
        browser::CANDIDATE_BINARIES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// Starts browser sessions from a fixed binary and startup budget
#[derive(Debug, Clone)]
pub struct BrowserLauncher {
    binary: Option<PathBuf>,
    start_timeout: Duration,
}

impl BrowserLauncher {
    pub fn new(configured: Option<&Path>, start_timeout: Duration) -> Self {
        Self {
            binary: locate_browser(configured),
            start_timeout,
        }
    }

    pub fn binary(&self) -> Option<&Path> {
        self.binary.as_deref()
    }

    pub async fn launch(&self, logger: &Logger) -> Result<BrowserSession> {
        let binary = self.binary.as_ref().ok_or_else(|| {
            AnalyzerError::Browser(format!(
                "no Chrome or Chromium binary found; set --browser-path or {}",
                browser::PATH_ENV
            ))
        })?;
        logger.verbose(&format!("Launching browser: {}", binary.display()));

        let profile = tempfile::Builder::new().prefix("fpa-profile-").tempdir()?;
        let mut child = Command::new(binary)
            .args(browser::LAUNCH_ARGS)
            .arg(format!("--user-data-dir={}", profile.path().display()))
            .arg("about:blank")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                AnalyzerError::Browser(format!("could not start '{}': {e}", binary.display()))
            })?;

        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| AnalyzerError::Browser("browser stderr was not captured".to_string()))?;
        let mut lines = BufReader::new(stderr).lines();

        let announced = tokio::time::timeout(self.start_timeout, async {
            while let Some(line) = lines.next_line().await? {
                log::trace!("browser: {line}");
                if let Some(port) = parse_devtools_endpoint(&line) {
                    return Ok(Some(port));
                }
            }
            Ok::<_, std::io::Error>(None)
        })
        .await;

        let port = match announced {
            Ok(Ok(Some(port))) => port,
            Ok(Ok(None)) => {
                let _ = child.kill().await;
                return Err(AnalyzerError::Browser(
                    "browser exited before exposing a debugging endpoint".to_string(),
                ));
            }
            Ok(Err(e)) => {
                let _ = child.kill().await;
                return Err(AnalyzerError::Browser(format!(
                    "could not read browser output: {e}"
                )));
            }
            Err(_) => {
                let _ = child.kill().await;
                return Err(AnalyzerError::Browser(format!(
                    "browser did not expose a debugging endpoint within {} seconds",
                    self.start_timeout.as_secs_f64()
                )));
            }
        };

        // Keep reading so a chatty browser never blocks on a full pipe
        tokio::spawn(async move {
            while let Ok(Some(line)) = lines.next_line().await {
                log::trace!("browser: {line}");
            }
        });

        log::debug!("browser debugging endpoint on port {port}");
        Ok(BrowserSession {
            child,
            port,
            _profile: profile,
        })
    }
}

/// A running browser owned by one audit
#[derive(Debug)]
pub struct BrowserSession {
    child: Child,
    port: u16,
    // Dropped after `child` so the profile outlives the process
    _profile: TempDir,
}

impl BrowserSession {
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn endpoint(&self) -> String {
        format!("http://127.0.0.1:{}/json/version", self.port)
    }

    /// Stop the browser and wait for it to exit
    pub async fn close(mut self) -> Result<()> {
        if let Ok(Some(_)) = self.child.try_wait() {
            return Ok(());
        }
        self.child
            .kill()
            .await
            .map_err(|e| AnalyzerError::Browser(format!("could not stop browser: {e}")))
    }
}
