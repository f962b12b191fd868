use crate::config::SiteConfig;
use crate::domain::{RawRow, RecordSet};
use crate::error::{HarvestError, Result};
use crate::infrastructure::extract::live;
use crate::services::{Readiness, TableSource};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info};

const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(60);
/// Coarse settle time after navigation, before the readiness poll starts.
/// The table widget is attached by client-side script well after load.
const NAVIGATION_SETTLE_DELAY: Duration = Duration::from_secs(5);
const READINESS_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Locates a Chrome/Chromium binary: explicit path first, then PATH.
pub fn find_chrome(configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = configured {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    for name in ["google-chrome", "chromium", "chromium-browser", "chrome"] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    None
}

/// One headless browser session, owned by a single pipeline run. The
/// browser process is released by `close`, which consumes the session so
/// it cannot run twice.
pub struct Session {
    browser: Browser,
    page: Page,
    events: JoinHandle<()>,
    site: SiteConfig,
    readiness_timeout: Duration,
}

impl Session {
    /// Launches a headless, sandboxless, GPU-less browser carrying the
    /// configured user agent, and opens a blank page.
    pub async fn open(
        site: SiteConfig,
        readiness_timeout: Duration,
        chrome_path: Option<&Path>,
    ) -> Result<Self> {
        let chrome = find_chrome(chrome_path).ok_or_else(|| {
            HarvestError::Browser(
                "no Chrome/Chromium binary found; set --chrome-path or GOLDHARVEST_CHROME"
                    .to_string(),
            )
        })?;

        let config = BrowserConfig::builder()
            .chrome_executable(chrome)
            .arg("--headless=new")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .arg(format!("--user-agent={}", site.user_agent))
            .build()
            .map_err(HarvestError::Browser)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| HarvestError::Browser(e.to_string()))?;

        // Drain the CDP event stream for the lifetime of the session
        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| HarvestError::Browser(e.to_string()))?;

        Ok(Self {
            browser,
            page,
            events,
            site,
            readiness_timeout,
        })
    }

    async fn evaluate<T: serde::de::DeserializeOwned>(&self, script: &str) -> Result<T> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| HarvestError::Browser(e.to_string()))?;

        result
            .into_value()
            .map_err(|e| HarvestError::Browser(format!("unexpected evaluation result: {e}")))
    }
}

#[async_trait]
impl TableSource for Session {
    async fn navigate(&mut self) -> Result<()> {
        info!("Loading page: {}", self.site.url);

        let url = self.site.url.clone();
        match tokio::time::timeout(NAVIGATION_TIMEOUT, self.page.goto(url)).await {
            Ok(Ok(_)) => {
                let _ = self.page.wait_for_navigation().await;
                tokio::time::sleep(NAVIGATION_SETTLE_DELAY).await;
                Ok(())
            }
            Ok(Err(e)) => Err(HarvestError::Navigation(e.to_string())),
            Err(_) => Err(HarvestError::Navigation(format!(
                "timed out loading {}",
                self.site.url
            ))),
        }
    }

    /// Polls for the table-widget root until it attaches or the timeout
    /// elapses. A timeout is not a failure; the chain compensates with a
    /// grace delay and proceeds.
    async fn await_readiness(&mut self) -> Readiness {
        let probe = format!(
            "document.querySelector({}) !== null",
            live::js_string(&self.site.readiness_selector)
        );
        let deadline = Instant::now() + self.readiness_timeout;

        loop {
            match self.evaluate::<bool>(&probe).await {
                Ok(true) => {
                    info!("Table widget attached");
                    return Readiness::Ready;
                }
                Ok(false) => {}
                Err(e) => debug!("Readiness probe failed: {e}"),
            }

            if Instant::now() >= deadline {
                return Readiness::TimedOut;
            }
            tokio::time::sleep(READINESS_POLL_INTERVAL).await;
        }
    }

    async fn capture(&mut self) -> Result<String> {
        self.evaluate("document.documentElement.outerHTML").await
    }

    async fn evaluate_rows(&mut self) -> Result<RecordSet> {
        let rows: Vec<RawRow> = self.evaluate(&live::build_row_script(&self.site)).await?;
        Ok(live::rows_from_values(rows))
    }

    /// Releases the browser process.
    async fn close(mut self) {
        let _ = self.page.close().await;
        let _ = self.browser.close().await;
        let _ = self.browser.wait().await;
        self.events.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE_PAGE: &str = concat!(
        "data:text/html,",
        r#"<div id="example-table"><div class="tabulator-row">"#,
        r#"<div class="tabulator-cell">2024.01.02</div>"#,
        r#"<div class="tabulator-cell">2050.00</div>"#,
        r#"<div class="tabulator-cell">2060.00</div>"#,
        r#"<div class="tabulator-cell">2050.00</div>"#,
        r#"<div class="tabulator-cell">98,765</div>"#,
        "</div></div>",
    );

    #[tokio::test]
    #[ignore] // Requires a Chrome/Chromium binary
    async fn session_captures_and_evaluates_a_rendered_table() {
        let site = SiteConfig {
            url: TABLE_PAGE.to_string(),
            ..SiteConfig::default()
        };

        let mut session = Session::open(site, Duration::from_secs(5), None)
            .await
            .expect("failed to open session");

        session.navigate().await.expect("navigation failed");

        let markup = session.capture().await.expect("capture failed");
        assert!(markup.contains("example-table"));

        let rows = session.evaluate_rows().await.expect("evaluation failed");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.records()[0].quote_date, "2024.01.02");

        session.close().await;
    }
}
