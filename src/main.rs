// Segment a live page and print its bands as JSON.
//
// Usage: kodegen-segment <URL> [--width N] [--height N] [--overflow MODE] [--refine] [--headed]

use anyhow::{Context, Result};
use clap::Parser;
use kodegen_tools_segmenter::{SegmentConfig, browser_setup::launch_browser, segment_page};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;

/// Poll `document.readyState` until the page settles or `max_wait` passes
async fn wait_for_page_load(page: &chromiumoxide::Page, max_wait: Duration) {
    let start = Instant::now();
    while start.elapsed() < max_wait {
        let complete = page
            .evaluate("document.readyState === 'complete'")
            .await
            .ok()
            .and_then(|result| result.into_value::<bool>().ok())
            .unwrap_or(false);
        if complete {
            return;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    tracing::warn!("Timeout waiting for page load after {max_wait:?}, segmenting anyway");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,chromiumoxide=off")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let config = SegmentConfig::builder()
        .viewport(args.width, args.height)
        .band_overflow(args.overflow.into())
        .refine_from_point(args.refine)
        .build()?;

    let (mut browser, handler) = launch_browser(&config, !args.headed).await?;

    let result = async {
        let page = browser
            .new_page(args.url.as_str())
            .await
            .context("Failed to open page")?;
        page.wait_for_navigation()
            .await
            .context("Failed to wait for navigation")?;
        wait_for_page_load(&page, Duration::from_secs(10)).await;

        let records = segment_page(&page, &config).await?;
        Ok::<_, anyhow::Error>(serde_json::to_string(&records)?)
    }
    .await;

    if let Err(e) = browser.close().await {
        tracing::warn!("Failed to close browser: {e}");
    }
    handler.abort();

    println!("{}", result?);
    Ok(())
}
