use egui_sdl2_gl::egui::Color32;
use parking_lot::Mutex;

use crate::app_list::{AppList, AppRow};
use crate::platform::{Platform, SpinnerStyle, DEFAULT_BACKGROUND};
use crate::repo::RepoClient;
use crate::startup::probes::ProbeResult;
use crate::startup::{LoadState, Sequencer};

// Application state shared between the render loop and the startup sequence
struct AppState {
    sequencer: Sequencer,
    probes_started: bool,
    spinner: Option<SpinnerStyle>,
    background: Color32,
    current_operation: Option<String>,
    progress: Option<f32>,
    client: Option<RepoClient>,
    app_list: AppList,
    hint: Option<String>,
    should_quit: bool,
}

pub struct AppStateManager {
    state: Mutex<AppState>,
}

impl AppStateManager {
    pub fn new() -> AppStateManager {
        AppStateManager {
            state: Mutex::new(AppState {
                sequencer: Sequencer::new(),
                probes_started: false,
                spinner: None,
                background: DEFAULT_BACKGROUND,
                current_operation: None,
                progress: None,
                client: None,
                app_list: AppList::new(),
                hint: None,
                should_quit: false,
            }),
        }
    }

    // Getter methods
    pub fn load_state(&self) -> LoadState {
        self.state.lock().sequencer.state().clone()
    }

    pub fn spinner(&self) -> Option<SpinnerStyle> {
        self.state.lock().spinner
    }

    pub fn background(&self) -> Color32 {
        self.state.lock().background
    }

    pub fn current_operation(&self) -> Option<String> {
        self.state.lock().current_operation.clone()
    }

    pub fn progress(&self) -> Option<f32> {
        self.state.lock().progress
    }

    pub fn hint(&self) -> Option<String> {
        self.state.lock().hint.clone()
    }

    pub fn should_quit(&self) -> bool {
        self.state.lock().should_quit
    }

    pub fn rows(&self) -> Vec<AppRow> {
        self.state.lock().app_list.rows().to_vec()
    }

    pub fn sidebar_hints(&self) -> Vec<&'static str> {
        self.state.lock().app_list.sidebar.hints.clone()
    }

    pub fn selected_category(&self) -> usize {
        self.state.lock().app_list.selected_category
    }

    // Setter methods
    pub fn set_hint(&self, hint: Option<String>) {
        self.state.lock().hint = hint;
    }

    pub fn set_should_quit(&self, should_quit: bool) {
        self.state.lock().should_quit = should_quit;
    }

    pub fn update_progress(&self, progress: f32) {
        self.state.lock().progress = Some(progress);
    }

    // Startup sequence operations
    pub fn note_splash_rendered(&self) {
        self.state.lock().sequencer.note_splash_rendered();
    }

    pub fn wants_initial_load(&self, idle_tick: bool) -> bool {
        self.state.lock().sequencer.wants_probes(idle_tick)
    }

    pub fn begin_probes(&self, style: SpinnerStyle) {
        let mut state = self.state.lock();
        state.sequencer.begin_probes();
        state.spinner = Some(style);
        state.background = style.background;
        state.current_operation = Some("Fetching repositories...".to_string());
    }

    // True exactly once per load attempt, after the spinner frame has been
    // painted; the caller then runs the blocking probe sequence.
    pub fn take_probe_run(&self) -> bool {
        let mut state = self.state.lock();
        if matches!(state.sequencer.state(), LoadState::RunningProbes) && !state.probes_started {
            state.probes_started = true;
            return true;
        }
        false
    }

    pub fn finish_initial_load(&self, client: RepoClient, result: ProbeResult, platform: Platform) {
        let mut state = self.state.lock();
        let state = &mut *state;

        state.sequencer.complete(&result, platform);
        state.client = Some(client);
        state.current_operation = None;
        state.progress = None;

        if matches!(state.sequencer.state(), LoadState::Ready) {
            begin_initial_load(state);
        }
    }

    // "Ignore This" on the error screen: fall back to a synthetic local-only
    // repo and complete the load without re-running the probes.
    pub fn ignore_errors_and_continue(&self) {
        let mut state = self.state.lock();
        let state = &mut *state;

        if let Some(client) = &mut state.client {
            client.add_local_repo();
        }
        state.sequencer.dismiss_error();
        begin_initial_load(state);
    }

    pub fn select_category(&self, index: usize) {
        let mut state = self.state.lock();
        let state = &mut *state;

        state.app_list.selected_category = index;
        if let Some(client) = &state.client {
            state.app_list.update(client);
        }
    }
}

// Hands the loaded client to the app list and takes down the spinner.
fn begin_initial_load(state: &mut AppState) {
    state.spinner = None;
    state.progress = None;
    state.hint = None;

    if let Some(client) = &state.client {
        state.app_list.update(client);
        state.app_list.sidebar.add_hints();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with(repos: Vec<crate::repo::Repo>) -> RepoClient {
        RepoClient::from_parts(std::path::Path::new("."), repos)
    }

    #[test]
    fn initial_load_waits_for_a_rendered_splash() {
        let manager = AppStateManager::new();
        assert!(!manager.wants_initial_load(true));

        manager.note_splash_rendered();
        assert!(!manager.wants_initial_load(false));
        assert!(manager.wants_initial_load(true));
    }

    #[test]
    fn probe_run_fires_exactly_once() {
        let manager = AppStateManager::new();
        manager.begin_probes(SpinnerStyle::default());

        assert!(manager.take_probe_run());
        assert!(!manager.take_probe_run());
    }

    #[test]
    fn successful_load_reaches_ready_with_hints() {
        let manager = AppStateManager::new();
        manager.finish_initial_load(client_with(vec![]), ProbeResult::Ok, Platform::Switch);

        assert!(matches!(manager.load_state(), LoadState::Ready));
        assert!(!manager.sidebar_hints().is_empty());
        assert!(manager.spinner().is_none());
    }

    #[test]
    fn failed_probe_presents_the_error_screen() {
        let manager = AppStateManager::new();
        manager.finish_initial_load(
            client_with(vec![]),
            ProbeResult::NoEnabledRepos,
            Platform::Switch,
        );

        match manager.load_state() {
            LoadState::Error(p) => assert_eq!(p.title, "Couldn't connect to a server!"),
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn ignoring_an_error_completes_the_load() {
        let manager = AppStateManager::new();
        manager.finish_initial_load(
            client_with(vec![]),
            ProbeResult::NoEnabledRepos,
            Platform::Switch,
        );

        manager.ignore_errors_and_continue();

        assert!(matches!(manager.load_state(), LoadState::Ready));
        assert!(!manager.sidebar_hints().is_empty());
    }
}
