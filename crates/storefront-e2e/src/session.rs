// Browser session - one Playwright server and browser per suite run
//
// Every scenario gets its own BrowserContext, the Playwright equivalent of a
// fresh incognito profile, so cookies and local storage never leak from one
// scenario into the next.

use crate::config::{BrowserKind, SuiteConfig};
use crate::driver::BrowserDriver;
use crate::error::Result;
use crate::runner::PageSource;
use async_trait::async_trait;
use playwright_rs::{Browser, Playwright};
use std::time::Duration;

/// A launched browser that hands out isolated pages.
pub struct BrowserSession {
    playwright: Playwright,
    browser: Browser,
    expect_timeout: Duration,
}

impl BrowserSession {
    /// Starts the Playwright server and launches the configured browser.
    pub async fn launch(config: &SuiteConfig) -> Result<Self> {
        let playwright = Playwright::launch().await?;
        let browser_type = match config.browser {
            BrowserKind::Chromium => playwright.chromium(),
            BrowserKind::Firefox => playwright.firefox(),
            BrowserKind::Webkit => playwright.webkit(),
        };
        let browser = browser_type
            .launch_with_options(config.launch_options())
            .await?;

        tracing::info!(
            "Launched {} {} (headless: {})",
            browser.name(),
            browser.version(),
            config.headless
        );

        Ok(Self {
            playwright,
            browser,
            expect_timeout: config.expect_timeout,
        })
    }

    /// Closes the browser and stops the Playwright server.
    pub async fn close(self) -> Result<()> {
        self.browser.close().await?;
        self.playwright.shutdown().await?;
        Ok(())
    }
}

#[async_trait]
impl PageSource for BrowserSession {
    type Driver = BrowserDriver;

    async fn open(&self) -> Result<BrowserDriver> {
        let context = self.browser.new_context().await?;
        let page = context.new_page().await?;
        Ok(BrowserDriver::new(page)
            .with_context(context)
            .with_expect_timeout(self.expect_timeout))
    }
}

impl std::fmt::Debug for BrowserSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserSession")
            .field("browser", &self.browser.name())
            .field("expect_timeout", &self.expect_timeout)
            .finish()
    }
}
