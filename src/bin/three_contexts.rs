//! Demo: three isolated browsing contexts sharing one browser
//!
//! Launches a single browser, opens three contexts concurrently, navigates
//! each to the practice site and prints the titles. Each context gets its
//! own cookies and storage, so the three pages are fully isolated.

use anyhow::Context;
use std::sync::Arc;
use tracing::info;

use e2e_oxide::driver::{CdpDriver, Driver, LoadState};
use e2e_oxide::{logging, SessionHandle, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;
    let _log_guard = logging::init(&settings)?;

    let driver: Arc<dyn Driver> = Arc::new(CdpDriver::new());
    let session = SessionHandle::launch(driver, &settings)
        .await
        .context("launching browser")?;
    info!(engine = %session.engine(), "Browser up");

    let (first, second, third) = tokio::join!(
        visit(&session, &settings, "first", &settings.base_url),
        visit(&session, &settings, "second", "https://ultimateqa.com/complicated-page"),
        visit(&session, &settings, "third", "https://ultimateqa.com/fake-landing-page"),
    );
    first?;
    second?;
    third?;

    session.close().await?;
    info!("All contexts closed, browser shut down");
    Ok(())
}

async fn visit(
    session: &SessionHandle,
    settings: &Settings,
    label: &str,
    url: &str,
) -> anyhow::Result<()> {
    let context = session.new_context(settings).await?;
    let page = context.new_page().await?;

    page.goto(url, LoadState::Load, 30_000).await?;
    let title = page.title().await?;
    println!("[{}] {} -> {}", label, url, title);

    page.close().await?;
    context.close().await?;
    Ok(())
}
