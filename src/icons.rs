//! Condition-to-asset icon mapping
//!
//! Maps Weather Underground condition names and hourly condition codes to
//! the numbered icon assets shipped next to the binary. Names and numbers
//! follow the provider's phrase glossary; `windy` and the provider logo have
//! no official icon but assets exist for them. The lookup is total: anything
//! unknown resolves to the "not available" asset.

use std::path::{Path, PathBuf};

/// An icon asset index, either shared or split into day/night variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSlot {
    /// One asset for all hours
    Single(&'static str),
    /// Separate day and night assets
    DayNight(&'static str, &'static str),
}

/// Fallback asset index for unknown conditions
const NOT_AVAILABLE: &str = "na";

/// Looks up the asset slot for an hourly condition code
///
/// Codes are consulted before names; `"0"` is the "no code" placeholder and
/// never matches.
fn by_code(code: &str) -> Option<IconSlot> {
    use IconSlot::Single;
    match code {
        "7" => Some(Single("36")),
        "9" | "24" => Some(Single("15")),
        "11" => Some(Single("12")),
        "13" => Some(Single("11")),
        "16" => Some(Single("13")),
        "19" => Some(Single("16")),
        "21" => Some(Single("14")),
        "22" | "23" => Some(Single("18")),
        _ => None,
    }
}

/// Looks up the asset slot for a condition name (night prefix stripped)
fn by_name(name: &str) -> Option<IconSlot> {
    use IconSlot::{DayNight, Single};
    match name {
        "chanceflurries" | "chancesnow" => Some(DayNight("41", "46")),
        "chancerain" => Some(DayNight("39", "45")),
        "chancesleet" => Some(Single("05")),
        "chancetstorms" => Some(DayNight("37", "47")),
        "clear" => Some(DayNight("32", "31")),
        "cloudy" => Some(Single("26")),
        "flurries" => Some(Single("14")),
        "fog" => Some(Single("20")),
        "hazy" => Some(DayNight("19", "21")),
        "mostlycloudy" => Some(DayNight("28", "27")),
        "mostlysunny" => Some(DayNight("34", "33")),
        "partlycloudy" | "partlysunny" => Some(DayNight("30", "29")),
        "rain" => Some(Single("12")),
        "sleet" => Some(Single("07")),
        "snow" => Some(Single("16")),
        "sunny" => Some(Single("32")),
        "tstorms" => Some(Single("00")),
        "windy" => Some(Single("24")),
        "WU" => Some(Single("WU")),
        _ => None,
    }
}

/// Resolves a condition to a concrete asset index
///
/// The `nt_` marker in the icon name or URL selects the night variant of a
/// day/night slot. Total function: unknown conditions resolve to the
/// "not available" asset.
pub fn resolve(name: &str, url: &str, code: &str) -> &'static str {
    let night = url.contains("/nt_") || name.contains("nt_");
    let name = name.replace("nt_", "");

    let slot = by_code(code)
        .or_else(|| by_name(&name))
        .unwrap_or(IconSlot::Single(NOT_AVAILABLE));

    match slot {
        IconSlot::Single(index) => index,
        IconSlot::DayNight(day, night_index) => {
            if night {
                night_index
            } else {
                day
            }
        }
    }
}

/// Renders a `file:` URL for an asset index
///
/// White-on-transparent variants live in `png_white/`, the regular set in
/// `png/`, both under the asset root.
pub fn asset_url(index: &str, white: bool, root: &Path) -> String {
    let dir = if white { "png_white" } else { "png" };
    format!("file:{}/{}/{}.png", root.display(), dir, index)
}

/// Default asset root: the directory containing the running binary
pub fn default_asset_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// HTML arrow entity for a pressure trend marker; unknown markers render
/// as nothing
pub fn trend_arrow(marker: &str) -> &'static str {
    match marker {
        "+" => "&nearr;",
        "-" => "&searr;",
        _ => "",
    }
}
