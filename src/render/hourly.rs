//! Hourly-forecast fragments: the compact strip and the full-page table

use super::Renderer;
use crate::data::{FormatError, HourlyForecast, Payload};

/// Snow rows appear only when the whole forecast carries at least this much
const SNOW_DISPLAY_THRESHOLD_CM: f64 = 0.1;

impl Renderer {
    /// Renders the compact strip of the next ten hours for the main page
    pub fn hours(&self, payload: &Payload) -> Result<String, FormatError> {
        let hours = payload.hourly()?;
        let rain = self.named_icon("rain");
        let snow = self.named_icon("snow");
        let cloud = self.named_icon("cloudy");
        let show_snow = total_snow_mm(&hours) >= SNOW_DISPLAY_THRESHOLD_CM;

        let mut html = String::from("<tr>");
        for hour in hours.iter().take(10) {
            let icon = self.icon(&hour.icon, &hour.icon_url, &hour.fctcode);
            html.push_str(&format!(
                r#"
            <td style="font-size: 100%; padding:10px 0; text-align:center;">
            <div style="width: 100%;">
            <span style="display:block;">{clock}:00</span>
            </div>
            <img src="{icon}" width="{icon_width}" style="padding:0 5px;"/><br/>
            <div style="width: 100%;">
            <span style="display:block;">
            <span style="color:green;font-size:120%;">{temp}&deg;</span><span
            style="font-size:90%;">({feels}&deg;)</span>
            </span></div>
            <div style="width: 100%;">
            <span style="display:block;color:blue;">
            <img src="{rain}" width="{rain_width}" style="padding:0;"/>{pop}<span
            style="font-size:80%;">%</span></span>
            </div>
            <div style="width: 100%;">
            <span style="display:block;">
            <img src="{cloud}" width="{cloud_width}" style="padding:0;"/><span
            style="font-size:80%;">{sky}</span><span
            style="font-size:60%;">%</span></span>
            </div>
            "#,
                clock = hour.fcttime.hour,
                icon_width = self.px(50),
                temp = hour.temp.metric,
                feels = hour.feelslike.metric,
                rain_width = self.px(12),
                pop = hour.pop,
                cloud_width = self.px(10),
                sky = hour.sky,
            ));
            if show_snow {
                html.push_str(&format!(
                    r#"
                <div style="width: 100%;">
                <span style="display:block;">
                <img src="{snow}" width="{snow_width}" style="padding:0;"/><span
                style="font-size:80%;">{amount}</span><span
                style="font-size:64%;">mm</span></span></div>
                "#,
                    snow_width = self.px(10),
                    amount = hour.snow.metric,
                ));
            }
            html.push_str("</td>");
        }
        html.push_str("</tr>");
        Ok(html)
    }

    /// Renders the full-page 24-hour forecast, five hours per row
    pub fn hours_extended(&self, payload: &Payload) -> Result<String, FormatError> {
        let hours = payload.hourly()?;
        let rain = self.named_icon("rain");
        let snow = self.named_icon("snow");
        let wind = self.named_icon("windy");
        let cloud = self.named_icon("cloudy");
        let show_snow = total_snow_mm(&hours) >= SNOW_DISPLAY_THRESHOLD_CM;

        let mut html = String::from(
            r#"<body style="background-color: white;">
        <div style="width:100%;">
        <table style="margin:auto;"><tr>"#,
        );
        for (i, hour) in hours.iter().take(24).enumerate() {
            if i > 0 && i % 5 == 0 {
                html.push_str("</tr><tr>");
            }
            let icon = self.icon(&hour.icon, &hour.icon_url, &hour.fctcode);
            html.push_str(&format!(
                r#"
            <td style="font-size: 100%; padding:20 10; text-align:center;">
            <div style="width: 100%;">
            <b style="display:block;">{clock}:00</b>
            </div>
            <img src="{icon}" width="{icon_width}" style="padding:0;"/><br/>
            <div style="width: 100%;">
            <span style="display:block;">{condition}</span>
            </div>
            <div style="width: 100%;">
            <span style="display:block; font-size:120%;">
            <span style="font-size:120%; color:green;">{temp}&deg;</span><span
            style="font-size:80%;">({feels}&deg;)</span>
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
            style="font-size:70%;">{wind_dir}</span> {wind_kph}<span
            style="font-size:80%;">kph</span></span>
            </div>
            <div style="width: 100%;">
            <span style="display:block;">
            <img src="{cloud}" width="{small_width}"
            style="padding:0;"/>{sky}<span
            style="font-size:80%;">%</span></span>
            </div>
            "#,
                clock = hour.fcttime.hour,
                icon_width = self.px(80),
                condition = hour.condition,
                temp = hour.temp.metric,
                feels = hour.feelslike.metric,
                small_width = self.px(16),
                pop = hour.pop,
                qpf = hour.qpf.metric,
                wind_dir = hour.wdir.dir,
                wind_kph = hour.wspd.metric,
                sky = hour.sky,
            ));
            if show_snow {
                html.push_str(&format!(
                    r#"
                <div style="width: 100%;">
                <span style="display:block;">
                <img src="{snow}" width="{snow_width}"
                style="padding:0;"/>{amount}<span
                style="font-size:80%;">mm</span></span></div>
                "#,
                    snow_width = self.px(16),
                    amount = hour.snow.metric,
                ));
            }
            html.push_str(&format!(
                r#"
            <div style="width: 100%;">
            <span style="display:block;">{mslp}<span
            style="font-size:80%;">hPa</span></span>
            </div>
            </td>"#,
                mslp = hour.mslp.metric,
            ));
        }
        html.push_str("</tr></table></div></body>");
        Ok(html)
    }
}

/// Total forecast snowfall across all hours
fn total_snow_mm(hours: &[HourlyForecast]) -> f64 {
    hours.iter().map(|hour| hour.snow.as_f64()).sum()
}
