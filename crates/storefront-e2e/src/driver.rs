// Driver - the seam between the page object and the browser
//
// The page object never holds Playwright types. It describes *what* to
// touch with a Selector and asks a Driver to do it. BrowserDriver is the
// production implementation: it turns each Selector into a fresh
// playwright_rs::Locator at call time and delegates, so auto-waiting and
// strictness are Playwright's.
//
// Failures are not retried or translated here; playwright_rs::Error is
// wrapped into the crate error and returned as-is.

use crate::config::DEFAULT_EXPECT_TIMEOUT;
use crate::error::Result;
use crate::selector::Selector;
use async_trait::async_trait;
use playwright_rs::{BrowserContext, Locator, Page, expect};
use std::path::Path;
use std::time::Duration;

/// Browser operations the page object and scenarios rely on.
///
/// Actions (`click`, `fill`, ...) auto-wait for the element to become
/// actionable. Queries (`is_visible`, `count`, ...) report current state
/// without waiting. `expect_*` methods poll until the condition holds or the
/// assertion timeout elapses.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigates the page to `url`.
    async fn goto(&self, url: &str) -> Result<()>;

    async fn click(&self, selector: &Selector) -> Result<()>;

    /// Replaces the value of an input or textarea.
    async fn fill(&self, selector: &Selector, value: &str) -> Result<()>;

    /// Current value of an input, textarea or select.
    async fn input_value(&self, selector: &Selector) -> Result<String>;

    /// Selects an option of a `<select>` by its value attribute.
    async fn select_option(&self, selector: &Selector, value: &str) -> Result<()>;

    /// Attaches a file from disk to a file input.
    async fn set_input_files(&self, selector: &Selector, path: &Path) -> Result<()>;

    async fn is_visible(&self, selector: &Selector) -> Result<bool>;

    async fn is_enabled(&self, selector: &Selector) -> Result<bool>;

    /// Raw `textContent` of the element, `None` if it has none.
    async fn text_content(&self, selector: &Selector) -> Result<Option<String>>;

    /// Rendered text of the element.
    async fn inner_text(&self, selector: &Selector) -> Result<String>;

    /// Number of elements currently matching.
    async fn count(&self, selector: &Selector) -> Result<usize>;

    async fn expect_visible(&self, selector: &Selector) -> Result<()>;

    async fn expect_hidden(&self, selector: &Selector) -> Result<()>;

    /// Polls until the element's trimmed text equals `expected`.
    async fn expect_text(&self, selector: &Selector, expected: &str) -> Result<()>;

    /// Releases the page (and its context, if the driver owns one).
    async fn close(&self) -> Result<()>;
}

/// Driver backed by a live Playwright page.
#[derive(Clone)]
pub struct BrowserDriver {
    page: Page,
    context: Option<BrowserContext>,
    expect_timeout: Duration,
}

impl BrowserDriver {
    /// Wraps a page. Closing the driver closes only the page.
    pub fn new(page: Page) -> Self {
        Self {
            page,
            context: None,
            expect_timeout: DEFAULT_EXPECT_TIMEOUT,
        }
    }

    /// Hands ownership of the page's isolated context to the driver, so
    /// closing the driver tears down cookies and storage with it.
    pub fn with_context(mut self, context: BrowserContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Sets the timeout used by the `expect_*` assertions.
    pub fn with_expect_timeout(mut self, timeout: Duration) -> Self {
        self.expect_timeout = timeout;
        self
    }

    async fn locate(&self, selector: &Selector) -> Locator {
        self.page.locator(&selector.to_playwright()).await
    }
}

#[async_trait]
impl Driver for BrowserDriver {
    async fn goto(&self, url: &str) -> Result<()> {
        tracing::debug!("goto {}", url);
        self.page.goto(url, None).await?;
        Ok(())
    }

    async fn click(&self, selector: &Selector) -> Result<()> {
        tracing::debug!("click {}", selector);
        self.locate(selector).await.click(None).await?;
        Ok(())
    }

    async fn fill(&self, selector: &Selector, value: &str) -> Result<()> {
        tracing::debug!("fill {}", selector);
        self.locate(selector).await.fill(value, None).await?;
        Ok(())
    }

    async fn input_value(&self, selector: &Selector) -> Result<String> {
        Ok(self.locate(selector).await.input_value(None).await?)
    }

    async fn select_option(&self, selector: &Selector, value: &str) -> Result<()> {
        tracing::debug!("select '{}' in {}", value, selector);
        self.locate(selector).await.select_option(value, None).await?;
        Ok(())
    }

    async fn set_input_files(&self, selector: &Selector, path: &Path) -> Result<()> {
        tracing::debug!("attach {} to {}", path.display(), selector);
        self.locate(selector)
            .await
            .set_input_files(&path.to_path_buf(), None)
            .await?;
        Ok(())
    }

    async fn is_visible(&self, selector: &Selector) -> Result<bool> {
        Ok(self.locate(selector).await.is_visible().await?)
    }

    async fn is_enabled(&self, selector: &Selector) -> Result<bool> {
        Ok(self.locate(selector).await.is_enabled().await?)
    }

    async fn text_content(&self, selector: &Selector) -> Result<Option<String>> {
        Ok(self.locate(selector).await.text_content().await?)
    }

    async fn inner_text(&self, selector: &Selector) -> Result<String> {
        Ok(self.locate(selector).await.inner_text().await?)
    }

    async fn count(&self, selector: &Selector) -> Result<usize> {
        Ok(self.locate(selector).await.count().await?)
    }

    async fn expect_visible(&self, selector: &Selector) -> Result<()> {
        expect(self.locate(selector).await)
            .with_timeout(self.expect_timeout)
            .to_be_visible()
            .await?;
        Ok(())
    }

    async fn expect_hidden(&self, selector: &Selector) -> Result<()> {
        expect(self.locate(selector).await)
            .with_timeout(self.expect_timeout)
            .to_be_hidden()
            .await?;
        Ok(())
    }

    async fn expect_text(&self, selector: &Selector, expected: &str) -> Result<()> {
        expect(self.locate(selector).await)
            .with_timeout(self.expect_timeout)
            .to_have_text(expected)
            .await?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        match &self.context {
            Some(context) => context.close().await?,
            None => self.page.close().await?,
        }
        Ok(())
    }
}

impl std::fmt::Debug for BrowserDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserDriver")
            .field("url", &self.page.url())
            .field("owns_context", &self.context.is_some())
            .field("expect_timeout", &self.expect_timeout)
            .finish()
    }
}
