//! Daily-forecast fragments: the compact strip and the full-page table

use super::Renderer;
use crate::data::{FormatError, Payload, SimpleForecastDay};

/// Snow rows appear only when the whole forecast carries at least this much
const SNOW_DISPLAY_THRESHOLD_CM: f64 = 0.1;

impl Renderer {
    /// Renders the compact daily strip of the main page
    pub fn days(&self, payload: &Payload) -> Result<String, FormatError> {
        let days = payload.daily()?;
        let rain = self.named_icon("rain");
        let snow = self.named_icon("snow");
        let show_snow = total_snow_cm(&days) >= SNOW_DISPLAY_THRESHOLD_CM;

        let mut html = String::from("<tr>");
        for day in days.iter().take(10) {
            let icon = self.icon(&day.icon, &day.icon_url, "0");
            html.push_str(&format!(
                r#"
            <td style="font-size: 100%; padding:10px 0; text-align:center;">
            <div style="width: 100%;">
            <span style="display:block;">{weekday}</span>
            </div>
            <img src="{icon}" width="{icon_width}" style="padding:0 5px;"/><br/>
            <div style="width: 100%;">
            <span style="display:block;">
            <span style="color:red;">{high}&deg;</span>
            <span style="color:blue;">{low}&deg;</span>
            </span></div>
            <div style="width: 100%;">
            <span style="display:block; color:blue;">
            <img src="{rain}" width="{rain_width}" style="padding:0;"/>{pop}<span
            style="font-size:80%;">%</span></span>
            </div>
            "#,
                weekday = day.date.weekday_short,
                icon_width = self.px(50),
                high = day.high.celsius,
                low = day.low.celsius,
                rain_width = self.px(12),
                pop = day.pop,
            ));
            if show_snow {
                html.push_str(&format!(
                    r#"
                <div style="width: 100%;">
                <span style="display:block;">
                <img src="{snow}" width="{snow_width}" style="padding:0;"/><span
                style="font-size:80%;">{cm}</span><span
                style="font-size:64%;">cm</span></span></div>
                "#,
                    snow_width = self.px(10),
                    cm = day.snow_allday.cm,
                ));
            }
            html.push_str("</td>");
        }
        html.push_str("</tr>");
        Ok(html)
    }

    /// Renders the full-page ten-day forecast, five days per row
    pub fn days_extended(&self, payload: &Payload) -> Result<String, FormatError> {
        let days = payload.daily()?;
        let rain = self.named_icon("rain");
        let snow = self.named_icon("snow");
        let wind = self.named_icon("windy");
        let show_snow = total_snow_cm(&days) >= SNOW_DISPLAY_THRESHOLD_CM;

        let mut html = String::from(
            r#"<body style="background-color: white;">
        <div style="width:100%;">
        <table style="margin:auto;"><tr>"#,
        );
        for (i, day) in days.iter().take(10).enumerate() {
            if i > 0 && i % 5 == 0 {
                html.push_str("</tr><tr>");
            }
            let icon = self.icon(&day.icon, &day.icon_url, "0");
            html.push_str(&format!(
                r#"
            <td style="font-size: 100%; padding:20 10; text-align:center;">
            <div style="width: 100%;">
            <b style="display:block;">{weekday}</b>
            </div>
            <img src="{icon}" width="{icon_width}" style="padding:0;"/><br/>
            <div style="width: 100%;">
            <span style="display:block;">{conditions}</span>
            </div>
            <div style="width: 100%;">
            <span style="display:block; font-size:120%;">
            <span style="color:red;">{high}&deg;</span>
            <span style="color:blue;">{low}&deg;</span>
            </span></div>
            <div style="width: 100%;">
            <span style="display:block;">
            <img src="{rain}" width="{small_width}" style="padding:0;"/><span
            style="font-size:120%; color:blue;">{pop}</span><span
            style="font-size:80%; color:blue;">%</span> {qpf}<span
            style="font-size:80%;">mm</span></span>
            </div>
            <div style="width: 100%;">
            <span style="display:block;">
            <img src="{wind}" width="{small_width}"
            style="padding:0;"/><span
            style="font-size:70%;">{wind_dir}</span> {wind_kph}({max_kph})<span
            style="font-size:80%;">kph</span></span>
            </div>
            "#,
                weekday = day.date.weekday_short,
                icon_width = self.px(80),
                conditions = day.conditions,
                high = day.high.celsius,
                low = day.low.celsius,
                small_width = self.px(16),
                pop = day.pop,
                qpf = day.qpf_allday.mm,
                wind_dir = day.avewind.dir,
                wind_kph = day.avewind.kph,
                max_kph = day.maxwind.kph,
            ));
            if show_snow {
                html.push_str(&format!(
                    r#"
                <div style="width: 100%;">
                <span style="display:block;">
                <img src="{snow}" width="{snow_width}"
                style="padding:0;"/> {cm}<span
                style="font-size:80%;">cm</span></span></div>
                "#,
                    snow_width = self.px(16),
                    cm = day.snow_allday.cm,
                ));
            }
            html.push_str("</td>");
        }
        html.push_str("</tr></table></div></body>");
        Ok(html)
    }
}

/// Total forecast snowfall across all days
fn total_snow_cm(days: &[SimpleForecastDay]) -> f64 {
    days.iter().map(|day| day.snow_allday.cm).sum()
}
