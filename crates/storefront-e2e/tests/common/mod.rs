// Shared helpers for integration tests
//
// RecordingDriver stands in for a browser: it remembers every write and
// assertion it receives and answers queries from canned state keyed by the
// rendered selector string. Clones share state, so a test can keep a handle
// while the runner owns another.

// Each test binary compiles this module separately and uses a different
// subset of it.
#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use storefront_e2e::selector::Selector;
use storefront_e2e::{Driver, Error, Fixtures, PageSource, Result};
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

pub fn bundled_fixtures() -> Fixtures {
    Fixtures::load(storefront_e2e::config::DEFAULT_FIXTURES_PATH)
        .expect("bundled fixtures should load")
}

/// A side effect or assertion observed by the fake driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Goto(String),
    Click(String),
    Fill(String, String),
    Select(String, String),
    Attach(String, PathBuf),
    ExpectVisible(String),
    ExpectHidden(String),
    ExpectText(String, String),
    Close,
}

#[derive(Default)]
struct State {
    actions: Vec<Action>,
    values: HashMap<String, String>,
    texts: HashMap<String, String>,
    visible: HashMap<String, bool>,
    enabled: HashMap<String, bool>,
    counts: HashMap<String, usize>,
}

#[derive(Clone, Default)]
pub struct RecordingDriver {
    state: Arc<Mutex<State>>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_value(&self, selector: &Selector, value: &str) {
        self.state
            .lock()
            .values
            .insert(selector.to_playwright(), value.to_string());
    }

    pub fn set_text(&self, selector: &Selector, text: &str) {
        self.state
            .lock()
            .texts
            .insert(selector.to_playwright(), text.to_string());
    }

    pub fn set_visible(&self, selector: &Selector, visible: bool) {
        self.state
            .lock()
            .visible
            .insert(selector.to_playwright(), visible);
    }

    pub fn set_enabled(&self, selector: &Selector, enabled: bool) {
        self.state
            .lock()
            .enabled
            .insert(selector.to_playwright(), enabled);
    }

    /// Makes `base` match the given texts, reachable through `nth`.
    pub fn set_texts(&self, base: &Selector, texts: &[&str]) {
        let mut state = self.state.lock();
        state.counts.insert(base.to_playwright(), texts.len());
        for (index, text) in texts.iter().enumerate() {
            state
                .texts
                .insert(base.clone().nth(index).to_playwright(), text.to_string());
        }
    }

    pub fn actions(&self) -> Vec<Action> {
        self.state.lock().actions.clone()
    }

    pub fn clear_actions(&self) {
        self.state.lock().actions.clear();
    }

    /// Fill actions only, in order.
    pub fn fills(&self) -> Vec<(String, String)> {
        self.actions()
            .into_iter()
            .filter_map(|action| match action {
                Action::Fill(selector, value) => Some((selector, value)),
                _ => None,
            })
            .collect()
    }

    pub fn clicks_on(&self, selector: &Selector) -> usize {
        let key = selector.to_playwright();
        self.actions()
            .iter()
            .filter(|action| matches!(action, Action::Click(s) if *s == key))
            .count()
    }

    fn record(&self, action: Action) {
        self.state.lock().actions.push(action);
    }
}

#[async_trait]
impl Driver for RecordingDriver {
    async fn goto(&self, url: &str) -> Result<()> {
        self.record(Action::Goto(url.to_string()));
        Ok(())
    }

    async fn click(&self, selector: &Selector) -> Result<()> {
        self.record(Action::Click(selector.to_playwright()));
        Ok(())
    }

    async fn fill(&self, selector: &Selector, value: &str) -> Result<()> {
        let key = selector.to_playwright();
        let mut state = self.state.lock();
        state.values.insert(key.clone(), value.to_string());
        state.actions.push(Action::Fill(key, value.to_string()));
        Ok(())
    }

    async fn input_value(&self, selector: &Selector) -> Result<String> {
        Ok(self
            .state
            .lock()
            .values
            .get(&selector.to_playwright())
            .cloned()
            .unwrap_or_default())
    }

    async fn select_option(&self, selector: &Selector, value: &str) -> Result<()> {
        self.record(Action::Select(selector.to_playwright(), value.to_string()));
        Ok(())
    }

    async fn set_input_files(&self, selector: &Selector, path: &Path) -> Result<()> {
        self.record(Action::Attach(selector.to_playwright(), path.to_path_buf()));
        Ok(())
    }

    async fn is_visible(&self, selector: &Selector) -> Result<bool> {
        Ok(self
            .state
            .lock()
            .visible
            .get(&selector.to_playwright())
            .copied()
            .unwrap_or(false))
    }

    async fn is_enabled(&self, selector: &Selector) -> Result<bool> {
        Ok(self
            .state
            .lock()
            .enabled
            .get(&selector.to_playwright())
            .copied()
            .unwrap_or(true))
    }

    async fn text_content(&self, selector: &Selector) -> Result<Option<String>> {
        Ok(self
            .state
            .lock()
            .texts
            .get(&selector.to_playwright())
            .cloned())
    }

    async fn inner_text(&self, selector: &Selector) -> Result<String> {
        Ok(self.text_content(selector).await?.unwrap_or_default())
    }

    async fn count(&self, selector: &Selector) -> Result<usize> {
        Ok(self
            .state
            .lock()
            .counts
            .get(&selector.to_playwright())
            .copied()
            .unwrap_or(0))
    }

    async fn expect_visible(&self, selector: &Selector) -> Result<()> {
        let key = selector.to_playwright();
        self.record(Action::ExpectVisible(key.clone()));
        match self.state.lock().visible.get(&key) {
            Some(false) => Err(Error::Assertion(format!("'{}' is not visible", key))),
            _ => Ok(()),
        }
    }

    async fn expect_hidden(&self, selector: &Selector) -> Result<()> {
        let key = selector.to_playwright();
        self.record(Action::ExpectHidden(key.clone()));
        match self.state.lock().visible.get(&key) {
            Some(true) => Err(Error::Assertion(format!("'{}' is visible", key))),
            _ => Ok(()),
        }
    }

    async fn expect_text(&self, selector: &Selector, expected: &str) -> Result<()> {
        let key = selector.to_playwright();
        self.record(Action::ExpectText(key.clone(), expected.to_string()));
        match self.state.lock().texts.get(&key) {
            Some(actual) if actual.trim() != expected.trim() => Err(Error::Assertion(format!(
                "'{}' has text '{}', expected '{}'",
                key, actual, expected
            ))),
            _ => Ok(()),
        }
    }

    async fn close(&self) -> Result<()> {
        self.record(Action::Close);
        Ok(())
    }
}

/// PageSource that hands out clones of one RecordingDriver.
#[derive(Clone, Default)]
pub struct RecordingSource {
    pub driver: RecordingDriver,
}

#[async_trait]
impl PageSource for RecordingSource {
    type Driver = RecordingDriver;

    async fn open(&self) -> Result<RecordingDriver> {
        Ok(self.driver.clone())
    }
}
