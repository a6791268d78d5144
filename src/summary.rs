//! Panel-applet summary message and click-action script
//!
//! `--update` mode emits a marked-up text blob for a desktop-panel applet
//! host: current conditions followed by every second of the next few forecast
//! hours. The message references a click-action script written next to the
//! cache; the script re-invokes wxpop under an exclusive `flock(1)` so that
//! repeated applet clicks cannot spawn overlapping popups.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::data::Payload;
use crate::error::WxError;
use crate::render::Renderer;

/// Font sizes derived from the configured base size
///
/// The `O` item is a superscript degree-sign stand-in; its size and bottom
/// padding are derived so it rides at the cap height of the temperature.
struct FontSizes {
    base: u32,
    small: u32,
    pad: u32,
    text: u32,
    icon: u32,
}

fn font_sizes(base: u16) -> FontSizes {
    let base = u32::from(base);
    let small = (f64::from(base) * 0.45) as u32;
    FontSizes {
        base,
        small,
        pad: base.saturating_sub(small).saturating_sub(base % 4),
        text: (f64::from(base) * 0.8) as u32,
        icon: (f64::from(base) * 1.1) as u32,
    }
}

/// Composes the applet message and writes the click-action script
///
/// The returned string is intended for standard output; the script side
/// effect lands under the cache directory.
///
/// # Errors
/// Fails when the payload lacks the current observation or hourly forecast,
/// or when the script cannot be written.
pub fn compose(
    renderer: &Renderer,
    payload: &Payload,
    config: &Config,
    store: &CacheStore,
) -> Result<String, WxError> {
    let curr = payload.current()?;
    let hours = payload.hourly()?;
    let action = write_click_action(store, config)?;

    let icon = renderer.icon_white(&curr.icon, &curr.icon_url, "0");
    let f = font_sizes(config.font_size);
    let mut message = format!(
        r#"
        <xml>
        <appsettings>
            <tooltip>Weather summary for {query}.
            Current conditions, then next few hours. </tooltip>
            <clickaction>{action}</clickaction>
        </appsettings>
        <item>
            <type>icon</type>
            <value>{icon}</value>
            <attr>
                <style>icon-size: {icon_pt}pt;</style>
            </attr>
        </item>
        <item>
            <type>text</type>
            <value> {weather} </value>
            <attr>
                <style>font-size: {text_pt}pt; color:white</style>
            </attr>
        </item>
        <item>
            <type>text</type>
            <value>{temp}</value>
            <attr>
                <style>font-size: {base_pt}pt; color:white</style>
            </attr>
        </item>
        <item>
            <type>text</type>
            <value>O</value>
            <attr>
            <style>font-size: {small_pt}pt; color:white; padding-bottom:{pad_pt}pt;</style>
            </attr>
        </item>
        <item>
            <type>text</type>
            <value> | </value>
            <attr>
                <style>font-size: {base_pt}pt; color:white</style>
            </attr>
        </item>
        "#,
        query = config.query,
        action = action.display(),
        weather = curr.weather,
        temp = curr.temp_c as i64,
        base_pt = f.base,
        small_pt = f.small,
        pad_pt = f.pad,
        text_pt = f.text,
        icon_pt = f.icon,
    );

    // Forecast items shrink slightly relative to the header.
    let f = font_sizes((f64::from(config.font_size) * 0.85) as u16);
    for hour in hours.iter().step_by(2).take(3) {
        let icon = renderer.icon_white(&hour.icon, &hour.icon_url, &hour.fctcode);
        message.push_str(&format!(
            r#"
            <item>
            <type>icon</type>
            <value>{icon}</value>
            <attr>
                <style>icon-size: {icon_pt}pt;</style>
            </attr>
            </item>
            <item>
                <type>text</type>
                <value>{temp}</value>
                <attr>
                    <style>font-size: {base_pt}pt; color:white</style>
                </attr>
            </item>
            <item>
                <type>text</type>
                <value>O</value>
                <attr>
                <style>font-size: {small_pt}pt; color:white; padding-bottom:{pad_pt}pt;
                </style>
                </attr>
            </item>
            <item>
                <type>text</type>
                <value>{pop}% </value>
                <attr>
                    <style>font-size: {text_pt}pt; color:white</style>
                </attr>
            </item>
            "#,
            temp = hour.temp.metric,
            pop = hour.pop,
            base_pt = f.base,
            small_pt = f.small,
            pad_pt = f.pad,
            text_pt = f.text,
            icon_pt = f.icon,
        ));
    }
    message.push_str("</xml>");
    Ok(message)
}

/// Writes the executable click-action script and returns its path
///
/// # Errors
/// Fails when the binary path cannot be determined or the script cannot be
/// written or made executable.
pub fn write_click_action(store: &CacheStore, config: &Config) -> Result<PathBuf, WxError> {
    let exe = std::env::current_exe()?;
    let script = click_action_script(&exe, config);

    store.ensure_dir()?;
    let path = store.click_action_path();
    fs::write(&path, script)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
    }
    Ok(path)
}

/// Shell script re-invoking wxpop under an exclusive advisory lock
fn click_action_script(exe: &Path, config: &Config) -> String {
    format!(
        "#!/bin/bash\n\
         (\n  \
         flock -xn 200 || exit 1\n  \
         {exe} \"{query}\" -m{mult} -k {key}\n\
         ) 200>/var/lock/.wxpop.exclusivelock\n",
        exe = exe.display(),
        query = config.query,
        mult = config.mult,
        key = config.api_key,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn test_setup() -> (Renderer, Config, CacheStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let renderer = Renderer::new(1.0, PathBuf::from("/opt/wxpop"), false);
        let config = Config::new("Boston", "testkey");
        let store = CacheStore::with_dir(temp_dir.path().to_path_buf());
        (renderer, config, store, temp_dir)
    }

    #[test]
    fn test_compose_includes_current_conditions() {
        let (renderer, config, store, _temp_dir) = test_setup();
        let payload = fixtures::sample();

        let message = compose(&renderer, &payload, &config, &store).expect("Should compose");

        assert!(message.contains("<value>22</value>"), "truncated temperature");
        assert!(message.contains("<value> Partly Cloudy </value>"));
        assert!(message.contains("Weather summary for Boston."));
        assert!(message.contains("png_white"), "white icon variant");
        assert!(message.ends_with("</xml>"));
    }

    #[test]
    fn test_compose_references_click_action() {
        let (renderer, config, store, temp_dir) = test_setup();
        let payload = fixtures::sample();

        let message = compose(&renderer, &payload, &config, &store).expect("Should compose");

        let action = temp_dir.path().join("clickaction");
        assert!(message.contains(&format!("<clickaction>{}</clickaction>", action.display())));
        assert!(action.exists(), "script written as a side effect");
    }

    #[test]
    fn test_compose_emits_every_second_forecast_hour() {
        let (renderer, config, store, _temp_dir) = test_setup();
        let payload = fixtures::sample();

        let message = compose(&renderer, &payload, &config, &store).expect("Should compose");

        // One header icon plus forecast hours 0, 2, 4.
        assert_eq!(message.matches("<type>icon</type>").count(), 4);
        assert_eq!(message.matches("<value>20% </value>").count(), 3);
    }

    #[test]
    fn test_compose_derives_font_sizes_from_config() {
        let (renderer, mut config, store, _temp_dir) = test_setup();
        config.font_size = 12;
        let payload = fixtures::sample();

        let message = compose(&renderer, &payload, &config, &store).expect("Should compose");

        assert!(message.contains("icon-size: 13pt;"), "header icon at 1.1x");
        assert!(message.contains("icon-size: 11pt;"), "forecast icons at 0.85 * 1.1x");
        assert!(message.contains("font-size: 12pt;"));
    }

    #[test]
    fn test_font_sizes_do_not_underflow() {
        let f = font_sizes(3);
        assert_eq!(f.pad, 0, "saturates instead of wrapping");
    }

    #[test]
    fn test_click_action_script_shape() {
        let config = Config::new("New York", "deadbeef");
        let script = click_action_script(Path::new("/usr/bin/wxpop"), &config);

        assert!(script.starts_with("#!/bin/bash\n"));
        assert!(script.contains("flock -xn 200 || exit 1"));
        assert!(script.contains(r#"/usr/bin/wxpop "New York" -m1 -k deadbeef"#));
        assert!(script.contains("/var/lock/.wxpop.exclusivelock"));
    }

    #[test]
    fn test_write_click_action_creates_script() {
        let (_renderer, config, store, temp_dir) = test_setup();

        let path = write_click_action(&store, &config).expect("Should write");

        assert_eq!(path, temp_dir.path().join("clickaction"));
        let content = std::fs::read_to_string(&path).expect("Should read script");
        assert!(content.starts_with("#!/bin/bash"));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_click_action_is_executable() {
        use std::os::unix::fs::PermissionsExt;
        let (_renderer, config, store, _temp_dir) = test_setup();

        let path = write_click_action(&store, &config).expect("Should write");

        let mode = std::fs::metadata(&path)
            .expect("Should stat script")
            .permissions()
            .mode();
        assert_eq!(mode & 0o111, 0o111, "script is executable");
    }
}
