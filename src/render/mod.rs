//! HTML fragment rendering
//!
//! This module turns payload subtrees into the self-contained HTML fragments
//! the popup tabs display, one file per view. All rendering is a pure
//! transformation of the payload; pixel dimensions scale linearly with the
//! configured multiplier, and a missing subtree fails only the call that
//! touches it.

pub mod alerts;
pub mod current;
pub mod daily;
pub mod hourly;
pub mod text;

use std::path::PathBuf;

use crate::data::{FormatError, Payload};
use crate::icons;

/// Renders payload subtrees into HTML fragments
#[derive(Debug, Clone)]
pub struct Renderer {
    /// Linear multiplier applied to pixel dimensions
    mult: f64,
    /// Directory holding the `png/` and `png_white/` asset sets
    asset_root: PathBuf,
    /// Whether the payload carries active alerts
    alert: bool,
}

impl Renderer {
    /// Creates a renderer for the given scale, asset location and alert flag
    pub fn new(mult: f64, asset_root: PathBuf, alert: bool) -> Self {
        Self {
            mult,
            asset_root,
            alert,
        }
    }

    /// Scales a base pixel dimension by the multiplier
    fn px(&self, base: u32) -> u32 {
        (f64::from(base) * self.mult) as u32
    }

    /// Asset URL for a condition, regular icon set
    fn icon(&self, name: &str, url: &str, code: &str) -> String {
        icons::asset_url(icons::resolve(name, url, code), false, &self.asset_root)
    }

    /// Asset URL for a condition, white-on-transparent icon set
    pub(crate) fn icon_white(&self, name: &str, url: &str, code: &str) -> String {
        icons::asset_url(icons::resolve(name, url, code), true, &self.asset_root)
    }

    /// Asset URL for a condition known only by name
    fn named_icon(&self, name: &str) -> String {
        self.icon(name, "", "0")
    }

    /// Composes the main summary page: current conditions, provider credits,
    /// the compact hourly strip and the compact daily strip
    pub fn main_page(&self, payload: &Payload) -> Result<String, FormatError> {
        let start = r#"<html><body style="background-color: white;">
        <div style="width:100%;">
        <table style="margin:auto;"><tr>"#;
        let end = "</tr></table></div></body></html>";
        Ok(format!(
            "{start}{current}{credits}</tr>{hours}{days}{end}",
            current = self.current(payload)?,
            credits = self.credits(payload)?,
            hours = self.hours(payload)?,
            days = self.days(payload)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use std::path::PathBuf;

    fn renderer(mult: f64) -> Renderer {
        Renderer::new(mult, PathBuf::from("/opt/wxpop"), false)
    }

    #[test]
    fn test_px_scales_linearly() {
        assert_eq!(renderer(1.0).px(180), 180);
        assert_eq!(renderer(2.0).px(180), 360);
        assert_eq!(renderer(0.5).px(180), 90);
    }

    #[test]
    fn test_icon_urls_use_asset_root() {
        let r = renderer(1.0);
        assert_eq!(r.named_icon("rain"), "file:/opt/wxpop/png/12.png");
        assert_eq!(
            r.icon_white("rain", "", "0"),
            "file:/opt/wxpop/png_white/12.png"
        );
    }

    #[test]
    fn test_main_page_composes_all_sections() {
        let payload = fixtures::sample();
        let html = renderer(1.0).main_page(&payload).expect("Should render");

        assert!(html.starts_with("<html>"));
        assert!(html.ends_with("</html>"));
        assert!(html.contains("22.5&deg;"), "current temperature present");
        assert!(html.contains("14:00"), "hourly strip present");
        assert!(html.contains("Mon"), "daily strip present");
        assert!(
            html.contains("wunderground.com"),
            "credits link present"
        );
    }

    #[test]
    fn test_main_page_fails_without_forecast() {
        let payload = crate::data::Payload::new(serde_json::json!({
            "current_observation": {}
        }));

        assert!(renderer(1.0).main_page(&payload).is_err());
    }
}
