use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use egui_sdl2_gl::egui::Color32;

pub const DEFAULT_BACKGROUND: Color32 = Color32::BLACK;
pub const EARTH_DAY_BACKGROUND: Color32 = Color32::from_rgb(12, 156, 91);

const SWITCH_SPINNER_RED: Color32 = Color32::from_rgb(220, 50, 50);
const EARTH_DAY_SPINNER_GREEN: Color32 = Color32::from_rgb(90, 200, 120);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Switch,
    WiiU,
    ThreeDs,
}

impl Platform {
    pub fn current() -> Platform {
        if cfg!(feature = "wiiu") {
            Platform::WiiU
        } else if cfg!(feature = "ctr") {
            Platform::ThreeDs
        } else {
            // `switch` is the default target
            Platform::Switch
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Platform::Switch => "Switch",
            Platform::WiiU => "Wii U",
            Platform::ThreeDs => "3DS",
        }
    }

    pub fn default_repo_url(self) -> &'static str {
        match self {
            Platform::Switch => "https://switch.cdn.fortheusers.org",
            Platform::WiiU => "https://wiiu.cdn.fortheusers.org",
            Platform::ThreeDs => "https://3ds.cdn.fortheusers.org",
        }
    }

    // Only the Wii U build ships with sound on out of the box
    pub fn default_audio_enabled(self) -> bool {
        matches!(self, Platform::WiiU)
    }
}

// Everything platform-conditional, resolved once at startup and passed around
// explicitly instead of being scattered through the code.
pub struct PlatformConfig {
    pub platform: Platform,
    pub home_path: PathBuf,
    pub sound_toggle_path: PathBuf,
}

impl PlatformConfig {
    pub fn resolve(platform: Platform) -> PlatformConfig {
        let home_path = PathBuf::from("./get");
        let sound_toggle_path = home_path.join("sound_off");
        PlatformConfig {
            platform,
            home_path,
            sound_toggle_path,
        }
    }

    pub fn audio_enabled(&self) -> bool {
        resolve_audio(
            self.platform.default_audio_enabled(),
            self.sound_toggle_path.exists(),
        )
    }
}

// The toggle file inverts whatever the platform default is
pub fn resolve_audio(default_enabled: bool, toggle_present: bool) -> bool {
    default_enabled != toggle_present
}

pub fn is_earth_day(date: NaiveDate) -> bool {
    date.month() == 4 && date.day() == 22
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpinnerStyle {
    pub spinner: Color32,
    pub background: Color32,
}

impl Default for SpinnerStyle {
    fn default() -> SpinnerStyle {
        SpinnerStyle {
            spinner: Color32::WHITE,
            background: DEFAULT_BACKGROUND,
        }
    }
}

pub fn spinner_style(platform: Platform, today: NaiveDate) -> SpinnerStyle {
    let mut style = SpinnerStyle::default();

    if platform == Platform::Switch {
        // the Switch gets a red spinner
        style.spinner = SWITCH_SPINNER_RED;
    }

    if is_earth_day(today) {
        style.spinner = EARTH_DAY_SPINNER_GREEN;
        style.background = EARTH_DAY_BACKGROUND;
    }

    style
}
