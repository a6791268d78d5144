//! Command-line interface parsing for wxpop
//!
//! This module handles parsing of CLI arguments using clap: the positional
//! weather location plus the resize, API-key, update-only and font-size
//! options.

use clap::Parser;

/// wxpop - Fetch weather and show results in a tabbed popup
#[derive(Parser, Debug)]
#[command(name = "wxpop")]
#[command(about = "Fetch Weather Underground forecasts and show them in a popup")]
#[command(version)]
pub struct Cli {
    /// Weather location query, e.g. "Boston" or "CA/San_Francisco"
    pub location: String,

    /// Resize the popup and its contents by the given factor
    #[arg(short, long, default_value_t = 1.0)]
    pub mult: f64,

    /// Weather Underground API key (persisted for later invocations)
    #[arg(short, long)]
    pub key: Option<String>,

    /// Emit the panel-applet summary message and exit without opening a window
    #[arg(short, long, default_value_t = false)]
    pub update: bool,

    /// Font size for the summary message string
    #[arg(short, long, default_value_t = 12)]
    pub size: u16,
}
