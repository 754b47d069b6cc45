//! storefront-e2e: customer journey suite for the toolshop storefront
//!
//! Drives a real browser through Playwright (via `playwright-rs`) across the
//! storefront's customer journeys: registration, login, favorites, cart,
//! checkout, category browsing, sorting, filtering, localization and the
//! contact form.
//!
//! The crate is split in three layers:
//!
//! - [`selector`] and [`page`]: a page object mapping semantic names to
//!   selectors, plus the multi-step actions scenarios share.
//! - [`driver`]: the async seam to the browser. [`BrowserDriver`] backs it
//!   with a Playwright page; tests can substitute a recording fake.
//! - [`scenarios`] and [`runner`]: the ordered scenario group, sharing a
//!   [`SuiteContext`] that carries the registered identity.
//!
//! # Example
//!
//! ```ignore
//! use storefront_e2e::{BrowserSession, Fixtures, SerialGroup, SuiteConfig, SuiteContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SuiteConfig::from_env()?;
//!     let fixtures = Fixtures::load(&config.fixtures_path)?;
//!     let mut ctx = SuiteContext::new(fixtures);
//!
//!     let session = BrowserSession::launch(&config).await?;
//!     let report = SerialGroup::customer_flow().run(&session, &mut ctx).await;
//!     session.close().await?;
//!
//!     assert!(report.success(), "{} scenario(s) failed", report.failed);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod context;
pub mod driver;
mod error;
pub mod fixtures;
pub mod identity;
pub mod page;
pub mod runner;
pub mod scenarios;
pub mod selector;
pub mod session;

pub use error::{Error, Result};

pub use config::{BrowserKind, SuiteConfig};
pub use context::SuiteContext;
pub use driver::{BrowserDriver, Driver};
pub use fixtures::Fixtures;
pub use identity::Identity;
pub use page::{ContactMessage, CustomerFlowPage, Registration};
pub use runner::{PageSource, ScenarioOutcome, SerialGroup, SuiteReport};
pub use scenarios::Scenario;
pub use selector::{AccessibleName, AriaRole, Selector};
pub use session::BrowserSession;
