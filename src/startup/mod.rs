use std::time::Instant;

use log::{info, warn};

use crate::app_state::AppStateManager;
use crate::platform::{Platform, PlatformConfig};
use crate::repo::RepoClient;

use self::presentation::ErrorPresentation;
use self::probes::ProbeResult;
use self::throttle::ProgressThrottle;

pub mod presentation;
pub mod probes;
pub mod throttle;

#[derive(Clone, Debug)]
pub enum LoadState {
    ShowingSplash,
    RunningProbes,
    Error(ErrorPresentation),
    Ready,
}

// Drives the one-shot startup sequence: splash until the first idle tick,
// then the blocking probes, then either the error screen or the app list.
#[derive(Debug)]
pub struct Sequencer {
    state: LoadState,
    splash_rendered: bool,
}

impl Sequencer {
    pub fn new() -> Sequencer {
        Sequencer {
            state: LoadState::ShowingSplash,
            splash_rendered: false,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn note_splash_rendered(&mut self) {
        if matches!(self.state, LoadState::ShowingSplash) {
            self.splash_rendered = true;
        }
    }

    // The splash must have painted at least once before any blocking work
    // starts.
    pub fn wants_probes(&self, idle_tick: bool) -> bool {
        matches!(self.state, LoadState::ShowingSplash) && self.splash_rendered && idle_tick
    }

    pub fn begin_probes(&mut self) {
        if matches!(self.state, LoadState::ShowingSplash) {
            self.state = LoadState::RunningProbes;
        }
    }

    pub fn complete(&mut self, result: &ProbeResult, platform: Platform) {
        self.state = match presentation::describe(result, platform) {
            Some(p) => LoadState::Error(p),
            None => LoadState::Ready,
        };
    }

    // "Ignore This": the user accepts the degraded state, so the sequence
    // jumps straight to ready without re-running any probe.
    pub fn dismiss_error(&mut self) {
        if matches!(self.state, LoadState::Error(_)) {
            self.state = LoadState::Ready;
        }
    }
}

// First failure wins; the storage probe only runs once the network probe has
// fully passed.
pub fn run_probes(client: &RepoClient) -> ProbeResult {
    let network = probes::network_probe(client.repos());
    if network != ProbeResult::Ok {
        return network;
    }

    probes::storage_probe(client.tmp_path())
}

// The blocking half of the startup sequence. Runs on the render thread once
// the spinner frame is on screen; progress updates go through the throttle.
pub fn run_initial_load(app_state: &AppStateManager, config: &PlatformConfig) {
    let mut client = RepoClient::load(&config.home_path, config.platform.default_repo_url());

    let mut throttle = ProgressThrottle::new();
    let started = Instant::now();

    client.refresh(|total, downloaded, _ultotal, _ulnow| {
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_emit(now_ms, downloaded, total) {
            let fraction = if total > 0.0 { downloaded / total } else { 0.0 };
            app_state.update_progress(fraction as f32);
        }
        0
    });

    let result = run_probes(&client);
    match &result {
        ProbeResult::Ok => info!("Initial load complete"),
        other => warn!("Startup probe failed: {other:?}"),
    }

    app_state.finish_initial_load(client, result, config.platform);
}
