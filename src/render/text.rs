//! Textual day/night forecast fragment

use super::Renderer;
use crate::data::{FormatError, Payload};

impl Renderer {
    /// Renders the textual forecast page, one row per day/night entry
    pub fn text_forecast(&self, payload: &Payload) -> Result<String, FormatError> {
        let days = payload.textual()?;

        let mut html = String::from(r#"<body style="background-color: white;"><table>"#);
        for day in &days {
            let icon = self.icon(&day.icon, &day.icon_url, "0");
            html.push_str(&format!(
                r#"
            <tr><td>
        <img src="{icon}" width="{icon_width}" align="left"
        style="padding:0; margin:0;"/></td><td>
            <strong>{title}:</strong><br/> {text} </td></tr>
        "#,
                icon_width = self.px(80),
                title = day.title,
                text = day.fcttext_metric,
            ));
        }
        html.push_str("</table></body>");
        Ok(html)
    }
}
