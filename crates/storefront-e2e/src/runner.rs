// Serial group runner
//
// Runs scenarios strictly one after another, each on a page handed out by
// a PageSource and released afterwards whether the scenario passed or not.
// A failing scenario does not stop the group; later scenarios that depend
// on it fail quickly on their own unmet preconditions.

use crate::context::SuiteContext;
use crate::driver::Driver;
use crate::error::Result;
use crate::page::CustomerFlowPage;
use crate::scenarios::Scenario;
use async_trait::async_trait;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// Hands out one isolated page per scenario.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Driver: Driver;

    /// Opens a fresh page with no cookies or storage from earlier scenarios.
    async fn open(&self) -> Result<Self::Driver>;

    /// Releases a page obtained from [`open`](Self::open).
    async fn release(&self, driver: Self::Driver) -> Result<()> {
        driver.close().await
    }
}

/// Outcome of a single scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    pub title: &'static str,
    pub passed: bool,
    pub duration_ms: u64,
    pub error: Option<String>,
}

/// Outcome of a whole serial group.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub group: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    pub fn success(&self) -> bool {
        self.failed == 0
    }

    /// Writes the report as pretty-printed JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_vec_pretty(self)?)?;
        tracing::info!("Wrote report to {}", path.display());
        Ok(())
    }
}

/// Ordered list of scenarios that must not run concurrently.
#[derive(Debug, Clone)]
pub struct SerialGroup {
    name: String,
    scenarios: Vec<Scenario>,
}

impl SerialGroup {
    pub fn new(name: impl Into<String>, scenarios: impl Into<Vec<Scenario>>) -> Self {
        Self {
            name: name.into(),
            scenarios: scenarios.into(),
        }
    }

    /// The full customer flow in declared order.
    pub fn customer_flow() -> Self {
        Self::new("Customer Flow", Scenario::SERIAL_ORDER)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Runs every scenario in order and collects the outcomes.
    pub async fn run<S: PageSource>(&self, source: &S, ctx: &mut SuiteContext) -> SuiteReport {
        let started = Instant::now();
        let mut outcomes = Vec::with_capacity(self.scenarios.len());

        tracing::info!(
            "Running serial group '{}' ({} scenarios) against {}",
            self.name,
            self.scenarios.len(),
            ctx.base_url()
        );

        for scenario in &self.scenarios {
            let scenario_started = Instant::now();
            tracing::info!("Running scenario: {}", scenario.title());

            let result = run_scenario(source, *scenario, ctx).await;
            let duration_ms = scenario_started.elapsed().as_millis() as u64;

            let error = match result {
                Ok(()) => {
                    tracing::info!("Passed: {} ({} ms)", scenario.title(), duration_ms);
                    None
                }
                Err(e) => {
                    let e = e.context(scenario.title());
                    tracing::error!("Failed: {} ({} ms): {}", scenario.title(), duration_ms, e);
                    Some(e.to_string())
                }
            };

            outcomes.push(ScenarioOutcome {
                scenario: *scenario,
                title: scenario.title(),
                passed: error.is_none(),
                duration_ms,
                error,
            });
        }

        let passed = outcomes.iter().filter(|o| o.passed).count();
        let report = SuiteReport {
            group: self.name.clone(),
            total: outcomes.len(),
            passed,
            failed: outcomes.len() - passed,
            duration_ms: started.elapsed().as_millis() as u64,
            outcomes,
        };

        tracing::info!(
            "Serial group '{}' finished: {} passed, {} failed",
            report.group,
            report.passed,
            report.failed
        );
        report
    }
}

async fn run_scenario<S: PageSource>(
    source: &S,
    scenario: Scenario,
    ctx: &mut SuiteContext,
) -> Result<()> {
    // Unmet preconditions fail without spending a browser context.
    if scenario.requires_identity() {
        ctx.identity()?;
    }

    let page = CustomerFlowPage::new(source.open().await?);
    let result = scenario.run(&page, ctx).await;

    let released = source.release(page.into_driver()).await;
    match (result, released) {
        (Err(e), Err(release_error)) => {
            tracing::warn!("Failed to release page after failure: {}", release_error);
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), released) => released,
    }
}
