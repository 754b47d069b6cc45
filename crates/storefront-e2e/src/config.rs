// Suite configuration
//
// Everything is read from STOREFRONT_* environment variables with defaults
// that run the bundled fixtures headless in Chromium. Browser launch
// settings map onto playwright_rs::LaunchOptions.

use crate::error::{Error, Result};
use playwright_rs::LaunchOptions;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default fixture file shipped with the crate
pub const DEFAULT_FIXTURES_PATH: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/customer_flow.json");

/// Default timeout for polling assertions (5 seconds, matching Playwright)
pub const DEFAULT_EXPECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Browser engine to launch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BrowserKind {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl FromStr for BrowserKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chromium" | "chrome" => Ok(BrowserKind::Chromium),
            "firefox" => Ok(BrowserKind::Firefox),
            "webkit" => Ok(BrowserKind::Webkit),
            other => Err(Error::Config(format!(
                "unknown browser '{}' (expected chromium, firefox or webkit)",
                other
            ))),
        }
    }
}

/// Settings for one run of the customer flow.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Fixture JSON file
    pub fixtures_path: PathBuf,
    /// Overrides the fixture `testUrl`
    pub base_url: Option<String>,
    pub browser: BrowserKind,
    pub headless: bool,
    /// Delay between browser operations in milliseconds
    pub slow_mo_ms: Option<f64>,
    /// Browser launch timeout in milliseconds
    pub launch_timeout_ms: f64,
    /// Timeout for expect-style assertions
    pub expect_timeout: Duration,
    /// Where to write the JSON report, if anywhere
    pub report_path: Option<PathBuf>,
    /// Whether the live run against the remote storefront is enabled
    pub live: bool,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            fixtures_path: PathBuf::from(DEFAULT_FIXTURES_PATH),
            base_url: None,
            browser: BrowserKind::Chromium,
            headless: true,
            slow_mo_ms: None,
            launch_timeout_ms: playwright_rs::DEFAULT_TIMEOUT_MS,
            expect_timeout: DEFAULT_EXPECT_TIMEOUT,
            report_path: None,
            live: false,
        }
    }
}

impl SuiteConfig {
    /// Reads configuration from the process environment.
    ///
    /// | variable | meaning |
    /// |---|---|
    /// | `STOREFRONT_FIXTURES` | fixture file path |
    /// | `STOREFRONT_BASE_URL` | target URL override |
    /// | `STOREFRONT_BROWSER` | `chromium`, `firefox` or `webkit` |
    /// | `STOREFRONT_HEADLESS` | `true` / `false` |
    /// | `STOREFRONT_SLOW_MO_MS` | slow motion delay |
    /// | `STOREFRONT_TIMEOUT_MS` | launch timeout |
    /// | `STOREFRONT_EXPECT_TIMEOUT_MS` | assertion timeout |
    /// | `STOREFRONT_REPORT` | JSON report output path |
    /// | `STOREFRONT_E2E` | set to `1`/`true` to run the live suite |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get("STOREFRONT_FIXTURES") {
            config.fixtures_path = PathBuf::from(path);
        }
        config.base_url = get("STOREFRONT_BASE_URL");
        if let Some(browser) = get("STOREFRONT_BROWSER") {
            config.browser = browser.parse()?;
        }
        if let Some(headless) = get("STOREFRONT_HEADLESS") {
            config.headless = parse_bool("STOREFRONT_HEADLESS", &headless)?;
        }
        if let Some(slow_mo) = get("STOREFRONT_SLOW_MO_MS") {
            config.slow_mo_ms = Some(parse_millis("STOREFRONT_SLOW_MO_MS", &slow_mo)?);
        }
        if let Some(timeout) = get("STOREFRONT_TIMEOUT_MS") {
            config.launch_timeout_ms = parse_millis("STOREFRONT_TIMEOUT_MS", &timeout)?;
        }
        if let Some(timeout) = get("STOREFRONT_EXPECT_TIMEOUT_MS") {
            let ms = parse_millis("STOREFRONT_EXPECT_TIMEOUT_MS", &timeout)?;
            config.expect_timeout = Duration::from_millis(ms as u64);
        }
        config.report_path = get("STOREFRONT_REPORT").map(PathBuf::from);
        if let Some(live) = get("STOREFRONT_E2E") {
            config.live = parse_bool("STOREFRONT_E2E", &live)?;
        }

        Ok(config)
    }

    pub fn with_fixtures_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.fixtures_path = path.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_browser(mut self, browser: BrowserKind) -> Self {
        self.browser = browser;
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_expect_timeout(mut self, timeout: Duration) -> Self {
        self.expect_timeout = timeout;
        self
    }

    /// Launch options for the configured browser.
    pub fn launch_options(&self) -> LaunchOptions {
        let mut options = LaunchOptions::new()
            .headless(self.headless)
            .timeout(self.launch_timeout_ms);
        if let Some(slow_mo) = self.slow_mo_ms {
            options = options.slow_mo(slow_mo);
        }
        options
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!("{}: '{}' is not a boolean", key, other))),
    }
}

fn parse_millis(key: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|ms| ms.is_finite() && *ms >= 0.0)
        .ok_or_else(|| {
            Error::Config(format!(
                "{}: '{}' is not a non-negative number of milliseconds",
                key, value
            ))
        })
}
