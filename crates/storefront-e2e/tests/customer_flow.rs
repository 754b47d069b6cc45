//! Live customer flow entry point
//!
//! Runs the full serial group against the real storefront. Skipped unless
//! `STOREFRONT_E2E=1`, since it creates an account and places an order.
//!
//! Run with: STOREFRONT_E2E=1 cargo test --package storefront-e2e --test customer_flow

use storefront_e2e::{BrowserSession, Fixtures, SerialGroup, SuiteConfig, SuiteContext};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match SuiteConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    if !config.live {
        println!("customer_flow: skipped (set STOREFRONT_E2E=1 to run against the storefront)");
        return;
    }

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    match rt.block_on(async_main(config)) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    }
}

async fn async_main(config: SuiteConfig) -> anyhow::Result<bool> {
    let fixtures = Fixtures::load(&config.fixtures_path)?;
    let mut ctx = SuiteContext::new(fixtures);
    if let Some(base_url) = &config.base_url {
        ctx = ctx.with_base_url(base_url.clone());
    }

    let session = BrowserSession::launch(&config).await?;
    let report = SerialGroup::customer_flow().run(&session, &mut ctx).await;
    session.close().await?;

    if let Some(path) = &config.report_path {
        report.write_json(path)?;
    }

    println!();
    println!("{}", "=".repeat(60));
    println!("{}", report.group);
    println!("{}", "=".repeat(60));
    for outcome in &report.outcomes {
        let status = if outcome.passed { "ok" } else { "FAILED" };
        println!("  {:<40} {:>6} ({} ms)", outcome.title, status, outcome.duration_ms);
        if let Some(error) = &outcome.error {
            println!("      {}", error);
        }
    }
    println!(
        "\n{} passed, {} failed, {} total in {} ms",
        report.passed, report.failed, report.total, report.duration_ms
    );

    Ok(report.success())
}
