// main.rs - Desktop stand-in for the 128x64 OLED panel

use std::process::ExitCode;
use std::time::{Duration, Instant};

use conway::patterns::PATTERNS;
use conway::{ConfigError, GenerationEngine, LifeConfig, MonoFramebuffer, render_cells, seeded_rng};
use eframe::egui;
use egui::Color32;
use rand::rngs::SmallRng;
use tracing::{error, info};

mod ui;

fn main() -> ExitCode {
    init_tracing();

    let app = match LifeConfig::from_env().and_then(OledApp::new) {
        Ok(app) => app,
        Err(err) => {
            error!(%err, "invalid configuration, not starting");
            return ExitCode::FAILURE;
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 560.0]),
        ..Default::default()
    };

    match eframe::run_native("Game of Life OLED", options, Box::new(|_cc| Box::new(app))) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "window closed with an error");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// The engine plus an emulated panel, driven by egui's repaint loop.
pub struct OledApp {
    config: LifeConfig,
    engine: GenerationEngine<SmallRng>,
    display: MonoFramebuffer,

    pub is_running: bool,
    pub last_update: Instant,
    pub update_interval: Duration,
    pub last_frame_time: Duration,
    pub pixel_size: f32,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
}

impl OledApp {
    pub fn new(config: LifeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let engine = GenerationEngine::new(config.engine(), seeded_rng(config.seed))?;
        let display = MonoFramebuffer::new(config.display_width, config.display_height);
        info!(
            cells_w = config.grid_width(),
            cells_h = config.grid_height(),
            "emulated display ready"
        );

        let mut app = Self {
            update_interval: config.frame_interval(),
            config,
            engine,
            display,
            is_running: true,
            last_update: Instant::now(),
            last_frame_time: Duration::ZERO,
            pixel_size: 5.0,
            live_color: Color32::from_rgb(120, 200, 255),
            dead_color: Color32::BLACK,
            selected_pattern: 0,
        };
        app.redraw();
        Ok(app)
    }

    pub fn engine(&self) -> &GenerationEngine<SmallRng> { &self.engine }
    pub fn display(&self) -> &MonoFramebuffer { &self.display }
    pub fn config(&self) -> &LifeConfig { &self.config }

    /// One simulation frame onto the emulated panel.
    pub fn advance(&mut self) {
        let started = Instant::now();
        let Ok(()) = conway::driver::run_frame(&mut self.engine, &mut self.display);
        self.last_frame_time = started.elapsed();
    }

    pub fn reseed(&mut self) {
        self.engine.reseed();
        self.redraw();
    }

    pub fn clear_grid(&mut self) {
        self.engine.clear();
        self.redraw();
    }

    pub fn apply_selected_pattern(&mut self) {
        if let Some(pattern) = PATTERNS.get(self.selected_pattern) {
            self.engine.load_pattern_centered(pattern);
            info!(pattern = pattern.name, "pattern loaded");
            self.redraw();
        }
    }

    pub fn toggle_cell(&mut self, x: usize, y: usize) {
        let alive = self.engine.cell(x, y);
        self.engine.set_cell(x, y, !alive);
        self.redraw();
    }

    pub fn selected_pattern_name(&self) -> &'static str {
        PATTERNS.get(self.selected_pattern).map_or("", |p| p.name)
    }

    // Show the current generation without stepping
    fn redraw(&mut self) {
        let cell_size = self.engine.cell_size();
        let Ok(()) = render_cells(&mut self.display, self.engine.alive_cells(), cell_size);
    }
}
