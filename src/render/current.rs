//! Current-conditions and provider-credit fragments

use super::Renderer;
use crate::data::{FormatError, Payload};
use crate::icons;

impl Renderer {
    /// Renders the current-conditions cell of the main page
    ///
    /// The local time is shown with the timezone offset stripped; when the
    /// payload carries alerts the time line is flagged in red.
    pub fn current(&self, payload: &Payload) -> Result<String, FormatError> {
        let curr = payload.current()?;
        let icon = self.icon(&curr.icon, &curr.icon_url, "0");

        let mut time = curr.local_time_rfc822.replace(&curr.local_tz_offset, "");
        time = time.trim_end().to_string();
        if self.alert {
            time = format!(r#"<span style="color:red;">{time} * ALERT *</span>"#);
        }

        Ok(format!(
            r#"
        <td style="font-size: 120%;" colspan="8">
        <img src="{icon}" width="{icon_width}" align="left"
        style="padding:0; margin:0;"/>{time}<br/><br/>
        <span style="color:green; font-size:200%;">{temp:.1}&deg;</span>
        (feels like {feels:.1}&deg;) <br/>
        <span style="font-size:120%;">{weather}</span><br/>
        <span style="font-size:80%;">Wind: <span
        style="font-size:80%;">{wind_dir}</span> {wind_kph}</span><span
        style="font-size:64%;">kph</span><br/>
        <span style="font-size:80%;">{pressure}<span
        style="font-size:64%;">hPa</span>{trend}</span></td>
        "#,
            icon_width = self.px(180),
            temp = curr.temp_c,
            feels = curr.feelslike_c,
            weather = curr.weather,
            wind_dir = curr.wind_dir,
            wind_kph = curr.wind_kph,
            pressure = curr.pressure_mb,
            trend = icons::trend_arrow(&curr.pressure_trend),
        ))
    }

    /// Renders the provider logo cell linking to the full forecast page
    pub fn credits(&self, payload: &Payload) -> Result<String, FormatError> {
        let curr = payload.current()?;
        let icon = self.named_icon("WU");
        Ok(format!(
            r#"<td colspan="2"> <a href="{url}"> <img src="{icon}" width="{width}"/></a>
        </td>
        "#,
            url = curr.forecast_url,
            width = self.px(100),
        ))
    }
}
