use log::{debug, info};

mod app_list;
mod app_state;
mod platform;
mod repo;
mod startup;
mod ui;

use app_state::AppStateManager;
use platform::{Platform, PlatformConfig};

// Error type for the application
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let platform = Platform::current();
    let config = PlatformConfig::resolve(platform);

    info!(
        "Homebrew App Store {} on {} (home: {})",
        env!("CARGO_PKG_VERSION"),
        platform.name(),
        config.home_path.display()
    );

    // Playback is handled by the platform's mixer; only the decision is ours
    debug!(
        "Audio {}",
        if config.audio_enabled() {
            "enabled"
        } else {
            "muted"
        }
    );

    let app_state: &'static AppStateManager = Box::leak(Box::new(AppStateManager::new()));

    ui::run_ui(app_state, config)
}
