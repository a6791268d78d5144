//! wxpop - Weather popup for the desktop
//!
//! Fetches a Weather Underground forecast (through the on-disk cache),
//! then either emits the panel-applet summary (`--update`) or opens the
//! tabbed popup with the rendered forecast pages.

use std::error::Error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wxpop::cache::CacheStore;
use wxpop::cli::Cli;
use wxpop::config::{self, Config};
use wxpop::data::provider::{WeatherStation, WxClient};
use wxpop::error::WxError;
use wxpop::icons;
use wxpop::render::Renderer;
use wxpop::shell::{self, TabSpec};
use wxpop::summary;

/// Freshness window used at launch; tighter than the config default so a
/// popup opened right after an applet refresh reuses its fetch
const LAUNCH_FRESHNESS_MINUTES: u64 = 2;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let store = CacheStore::new().ok_or_else(|| {
        WxError::Config("cannot determine the per-user cache directory".to_string())
    })?;
    let api_key = config::resolve_api_key(cli.key.as_deref(), &store)?;
    let cfg = Config::from_cli(&cli, api_key).with_freshness(LAUNCH_FRESHNESS_MINUTES);

    let station = WeatherStation::new(store.clone(), WxClient::new(), cfg.clone());
    let payload = station.resolve().await?;

    let renderer = Renderer::new(cfg.mult, icons::default_asset_root(), payload.has_alerts());

    // Summary message and exit, no window.
    if cli.update {
        let message = summary::compose(&renderer, &payload, &cfg, &store)?;
        println!("{message}");
        return Ok(());
    }

    let mut tabs = vec![
        TabSpec::new(renderer.main_page(&payload)?, "Summary", cfg.mult),
        TabSpec::new(renderer.hours_extended(&payload)?, "Next 24 hours", cfg.mult),
        TabSpec::new(
            renderer.days_extended(&payload)?,
            "Forecast 10 days",
            cfg.mult,
        ),
        TabSpec::new(renderer.text_forecast(&payload)?, "Text forecast", cfg.mult),
    ];
    if payload.has_alerts() {
        tabs.push(TabSpec::new(
            renderer.alerts_view(&payload)?,
            "*** ALERT ***",
            cfg.mult,
        ));
    }

    shell::run(tabs, cfg.mult)?;
    Ok(())
}
