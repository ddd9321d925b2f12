use std::time::Instant;

use chrono::Local;
use egui::{Button, Color32, FullOutput, ProgressBar};
use egui_backend::egui;
use egui_backend::{sdl2::event::Event, DpiScaling, ShaderVersion};
use egui_sdl2_gl as egui_backend;
use egui_sdl2_gl::egui::{CornerRadius, RichText, Spinner, Vec2};

use crate::app_list::CATEGORIES;
use crate::app_state::AppStateManager;
use crate::platform::{self, PlatformConfig};
use crate::startup::presentation::{ErrorAction, ErrorPresentation};
use crate::startup::{self, LoadState};
use crate::Result;

const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;
const DPI_SCALE: f32 = 2.0;

const DIM_TEXT: Color32 = Color32::from_rgb(150, 150, 150);

fn splash_ui(ui: &mut egui::Ui) {
    ui.add_space(64.0);
    ui.heading("Homebrew App Store");
    ui.add_space(4.0);
    ui.label(
        RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
            .color(DIM_TEXT)
            .size(10.0),
    );
}

fn loading_ui(ui: &mut egui::Ui, app_state: &'static AppStateManager) {
    let style = app_state.spinner().unwrap_or_default();

    ui.add_space(90.0);
    ui.add(Spinner::new().size(90.0).color(style.spinner));
    ui.add_space(16.0);

    if let Some(operation) = app_state.current_operation() {
        ui.label(RichText::new(operation).color(DIM_TEXT).size(10.0));
    }

    if let Some(progress) = app_state.progress() {
        ui.add_space(8.0);
        let mut progress_bar = ProgressBar::new(progress);
        // Show percentage only if progress is > 10% to avoid text
        // escaping the progress bar
        if progress > 0.1 {
            progress_bar = progress_bar.show_percentage();
        }
        ui.add(progress_bar);
    }
}

fn error_ui(
    ui: &mut egui::Ui,
    app_state: &'static AppStateManager,
    presentation: &ErrorPresentation,
) {
    ui.add_space(24.0);
    ui.label(
        RichText::new("Homebrew App Store")
            .color(DIM_TEXT)
            .size(12.0),
    );
    ui.add_space(24.0);
    ui.heading(presentation.title.as_str());
    ui.add_space(16.0);
    ui.label(
        RichText::new(format!("Troubleshooting:\n{}", presentation.troubleshooting)).size(10.0),
    );
    ui.add_space(16.0);

    let mut first_button = None;
    let mut focused_hint = None;

    for action in &presentation.actions {
        let button = ui.add(Button::new(action.label()));

        if button.clicked() {
            match action {
                ErrorAction::Quit => app_state.set_should_quit(true),
                ErrorAction::Ignore => app_state.ignore_errors_and_continue(),
            }
        }

        if button.has_focus() {
            focused_hint = Some(action.hint().to_string());
        }

        if first_button.is_none() {
            first_button = Some(button.id);
        }

        ui.add_space(4.0);
    }

    app_state.set_hint(focused_hint);

    // Focus the first action for controller navigation
    if let Some(id) = first_button {
        ui.memory_mut(|r| {
            if r.focused().is_none() {
                r.request_focus(id);
            }
        });
    }
}

fn sidebar_ui(ui: &mut egui::Ui, app_state: &'static AppStateManager) {
    ui.add_space(8.0);
    ui.label(
        RichText::new("Homebrew App Store")
            .color(DIM_TEXT)
            .size(10.0),
    );
    ui.separator();

    let selected = app_state.selected_category();
    for (index, (label, _tag)) in CATEGORIES.iter().enumerate() {
        if ui.selectable_label(index == selected, *label).clicked() {
            app_state.select_category(index);
        }
    }

    let hints = app_state.sidebar_hints();
    if !hints.is_empty() {
        ui.separator();
        for hint in hints {
            ui.label(RichText::new(hint).color(DIM_TEXT).size(8.0));
        }
    }
}

fn app_list_ui(ui: &mut egui::Ui, app_state: &'static AppStateManager) {
    let rows = app_state.rows();

    if rows.is_empty() {
        ui.add_space(32.0);
        ui.label(RichText::new("No apps available in this category").size(10.0));
        return;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for row in &rows {
            ui.horizontal(|ui| {
                ui.label(RichText::new(row.title.as_str()).size(12.0));
                if !row.version.is_empty() {
                    ui.label(
                        RichText::new(format!("v{}", row.version))
                            .color(DIM_TEXT)
                            .size(9.0),
                    );
                }
                ui.label(RichText::new(row.repo.as_str()).color(DIM_TEXT).size(9.0));
            });
            ui.separator();
        }
    });
}

// Map controller buttons to keyboard keys
fn controller_to_key(button: sdl2::controller::Button) -> Option<sdl2::keyboard::Keycode> {
    match button {
        sdl2::controller::Button::DPadUp => Some(sdl2::keyboard::Keycode::Up),
        sdl2::controller::Button::DPadDown => Some(sdl2::keyboard::Keycode::Down),
        sdl2::controller::Button::DPadLeft => Some(sdl2::keyboard::Keycode::Left),
        sdl2::controller::Button::DPadRight => Some(sdl2::keyboard::Keycode::Right),
        sdl2::controller::Button::B => Some(sdl2::keyboard::Keycode::Return),
        sdl2::controller::Button::A => Some(sdl2::keyboard::Keycode::Escape),
        sdl2::controller::Button::Y => Some(sdl2::keyboard::Keycode::X),
        _ => None,
    }
}

fn setup_ui_style() -> egui::Style {
    let mut style = egui::Style::default();
    style.spacing.button_padding = Vec2::new(8.0, 2.0);

    style.visuals.panel_fill = Color32::from_rgb(0, 0, 0);
    style.visuals.selection.bg_fill = Color32::WHITE;
    style.visuals.selection.stroke.color = Color32::GRAY;

    style.visuals.widgets.inactive.fg_stroke.color = Color32::WHITE;
    style.visuals.widgets.inactive.weak_bg_fill = Color32::TRANSPARENT;

    style.visuals.widgets.active.bg_fill = Color32::WHITE;
    style.visuals.widgets.active.weak_bg_fill = Color32::WHITE;
    style.visuals.widgets.active.fg_stroke.color = Color32::BLACK;
    style.visuals.widgets.active.corner_radius = CornerRadius::same(255);

    style.visuals.widgets.noninteractive.fg_stroke.color = Color32::WHITE;
    style.visuals.widgets.noninteractive.bg_fill = Color32::TRANSPARENT;

    style.visuals.widgets.hovered.bg_fill = Color32::WHITE;
    style.visuals.widgets.hovered.weak_bg_fill = Color32::TRANSPARENT;
    style.visuals.widgets.hovered.corner_radius = CornerRadius::same(255);

    style
}

fn init_sdl() -> Result<(
    sdl2::Sdl,
    sdl2::video::Window,
    sdl2::EventPump,
    Option<sdl2::controller::GameController>,
)> {
    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;

    // Initialize game controller subsystem
    let game_controller_subsystem = sdl_context.game_controller()?;
    let available = game_controller_subsystem.num_joysticks()?;

    // Attempt to open the first available game controller
    let controller = (0..available).find_map(|id| {
        if !game_controller_subsystem.is_game_controller(id) {
            return None;
        }

        match game_controller_subsystem.open(id) {
            Ok(c) => Some(c),
            Err(e) => {
                log::warn!("Failed to open controller {id}: {e:?}");
                None
            }
        }
    });

    // Create a window
    let window = video_subsystem
        .window(
            &format!("Homebrew App Store {}", env!("CARGO_PKG_VERSION")),
            WINDOW_WIDTH,
            WINDOW_HEIGHT,
        )
        .position_centered()
        .opengl()
        .build()?;

    let event_pump = sdl_context.event_pump()?;

    Ok((sdl_context, window, event_pump, controller))
}

#[allow(clippy::too_many_lines)]
pub fn run_ui(app_state: &'static AppStateManager, config: PlatformConfig) -> Result<()> {
    // Initialize SDL and create window
    let (_sdl_context, window, mut event_pump, _controller) = init_sdl()?;

    // Create OpenGL context and egui painter
    let _gl_context = window.gl_create_context()?;
    let shader_ver = ShaderVersion::Adaptive;
    let (mut painter, mut egui_state) =
        egui_backend::with_sdl2(&window, shader_ver, DpiScaling::Custom(DPI_SCALE));

    // Create egui context and set style
    let egui_ctx = egui::Context::default();
    egui_ctx.set_style(setup_ui_style());

    let start_time: Instant = Instant::now();

    loop {
        if app_state.should_quit() {
            break;
        }

        egui_state.input.time = Some(start_time.elapsed().as_secs_f64());
        egui_ctx.begin_pass(egui_state.input.take());

        let load_state = app_state.load_state();

        if matches!(load_state, LoadState::Ready) {
            egui::SidePanel::left("sidebar")
                .resizable(false)
                .show(&egui_ctx, |ui| sidebar_ui(ui, app_state));
        }

        if let Some(hint) = app_state.hint() {
            egui::TopBottomPanel::bottom("hints").show(&egui_ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(hint).size(10.0));
                });
            });
        }

        let frame = egui::Frame::central_panel(&egui_ctx.style()).fill(app_state.background());
        egui::CentralPanel::default()
            .frame(frame)
            .show(&egui_ctx, |ui| {
                ui.vertical_centered(|ui| match &load_state {
                    LoadState::ShowingSplash => {
                        splash_ui(ui);
                        app_state.note_splash_rendered();
                    }
                    LoadState::RunningProbes => loading_ui(ui, app_state),
                    LoadState::Error(presentation) => error_ui(ui, app_state, presentation),
                    LoadState::Ready => app_list_ui(ui, app_state),
                });
            });

        // End frame and render
        let FullOutput {
            platform_output,
            textures_delta,
            shapes,
            pixels_per_point,
            viewport_output,
        } = egui_ctx.end_pass();

        let repaint_after = viewport_output
            .get(&egui::ViewportId::ROOT)
            .expect("Missing ViewportId::ROOT")
            .repaint_delay;

        // Process output
        egui_state.process_output(&window, &platform_output);

        // Paint and swap buffers
        let paint_jobs = egui_ctx.tessellate(shapes, pixels_per_point);
        painter.paint_jobs(None, textures_delta, paint_jobs);
        window.gl_swap_window();

        // The frame just presented is the spinner; the blocking load
        // sequence can run now
        if app_state.take_probe_run() {
            startup::run_initial_load(app_state, &config);
        }

        // Process events
        let mut saw_input = false;
        let mut process_event = |event| match event {
            Event::Quit { .. } => app_state.set_should_quit(true),
            Event::ControllerButtonDown {
                timestamp, button, ..
            } => {
                if let Some(keycode) = controller_to_key(button) {
                    let key_event = Event::KeyDown {
                        keycode: Some(keycode),
                        timestamp,
                        window_id: window.id(),
                        scancode: Some(sdl2::keyboard::Scancode::Down),
                        keymod: sdl2::keyboard::Mod::empty(),
                        repeat: false,
                    };
                    egui_state.process_input(&window, key_event, &mut painter);
                }
            }
            Event::ControllerButtonUp {
                timestamp, button, ..
            } => {
                if let Some(keycode) = controller_to_key(button) {
                    let key_event = Event::KeyUp {
                        keycode: Some(keycode),
                        timestamp,
                        window_id: window.id(),
                        scancode: Some(sdl2::keyboard::Scancode::Down),
                        keymod: sdl2::keyboard::Mod::empty(),
                        repeat: false,
                    };
                    egui_state.process_input(&window, key_event, &mut painter);
                }
            }
            // for easy testing on desktop
            Event::KeyDown {
                keycode: Some(sdl2::keyboard::Keycode::Escape),
                ..
            } => {
                app_state.set_should_quit(true);
            }
            _ => {
                // Process other input events
                egui_state.process_input(&window, event, &mut painter);
            }
        };

        if repaint_after.is_zero() {
            for event in event_pump.poll_iter() {
                saw_input = true;
                process_event(event);
            }
        } else if let Some(event) = event_pump.wait_event_timeout(50) {
            saw_input = true;
            process_event(event);
        }

        // The first idle tick after the splash has painted arms the load
        if app_state.wants_initial_load(!saw_input) {
            let style = platform::spinner_style(config.platform, Local::now().date_naive());
            app_state.begin_probes(style);
        }
    }

    Ok(())
}
