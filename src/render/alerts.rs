//! Active-alerts fragment

use super::Renderer;
use crate::data::{FormatError, Payload};

impl Renderer {
    /// Renders the alerts page, one paragraph per active alert
    ///
    /// Returns an empty string when the payload carries no alerts, so the
    /// caller can skip the tab entirely.
    pub fn alerts_view(&self, payload: &Payload) -> Result<String, FormatError> {
        let alerts = payload.alerts()?;
        if alerts.is_empty() {
            return Ok(String::new());
        }

        let mut html = String::from(r#"<html><body style="background-color: white;">"#);
        for alert in &alerts {
            let message = collapse_whitespace(&alert.message.replace("\n\n", "<br/>"));
            html.push_str(&format!(
                r#"<p> <b> {description} </b> Expires: {expires}.<br/>
            {message}</p>"#,
                description = alert.description,
                expires = alert.expires,
            ));
        }
        html.push_str("</body></html>");
        Ok(html)
    }
}

/// Collapses every whitespace run to a single space
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
