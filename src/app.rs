use std::path::Path;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{info, warn};

use crate::analysis::measure::{self, Measurement};
use crate::cli::Args;
use crate::config::AppConfig;
use crate::export;
use crate::session::SessionStore;
use crate::sim::physics::{self, PhysicsResult, Scenario};
use crate::sim::signals::{self, SignalConfig, TrialSignals};
use crate::ui::playback::Playback;
use crate::ui::selection::SelectionState;

/// One generated run: frozen physics plus its synthesized trace.
pub struct Trial {
    pub physics: PhysicsResult,
    pub signals: TrialSignals,
    pub seed: u32,
    pub noise_enabled: bool,
}

/// All mutable state behind the lab bench UI. Single owner, single thread;
/// every derived value is recomputed from here after each input event.
pub struct LabState {
    pub config: AppConfig,
    pub scenario: Scenario,
    pub preset_id: String,
    pub hanging_mass_kg: f64,
    pub noise_enabled: bool,
    pub seed: u32,
    pub trial: Option<Trial>,
    pub force_sel: SelectionState,
    pub velocity_sel: SelectionState,
    pub playback: Playback,
    pub store: SessionStore,
    pub measurement: Measurement,
    pub status: String,
}

impl LabState {
    pub fn new(config: AppConfig, args: &Args) -> Self {
        let scenario = match args.scenario.as_str() {
            "cart-friction" => Scenario::CartFriction,
            _ => Scenario::CartOnly,
        };
        let preset_id = if physics::preset_for(scenario, &args.preset).is_some() {
            args.preset.clone()
        } else {
            physics::presets(scenario)[0].id.to_string()
        };
        let noise_enabled = if args.no_noise {
            false
        } else {
            config.signal.noise_default
        };
        let seed = args.seed.unwrap_or_else(|| rand::rng().random());
        let duration = config.signal.duration_s;

        Self {
            config,
            scenario,
            preset_id,
            hanging_mass_kg: args.mass_kg.clamp(0.0, 2.0),
            noise_enabled,
            seed,
            trial: None,
            force_sel: SelectionState::new(),
            velocity_sel: SelectionState::new(),
            playback: Playback::new(duration),
            store: SessionStore::new(),
            measurement: Measurement::default(),
            status: String::new(),
        }
    }

    pub fn signal_config(&self) -> SignalConfig {
        SignalConfig {
            duration_s: self.config.signal.duration_s,
            sample_rate_hz: self.config.signal.sample_rate_hz,
            noise_enabled: self.noise_enabled,
            seed: self.seed,
        }
    }

    /// Generate a fresh trial from the current controls and reset the
    /// selections, playback and measurement.
    pub fn run_trial(&mut self) {
        let Some(preset) = physics::preset_for(self.scenario, &self.preset_id) else {
            // Controls only offer known ids; reaching this is a wiring bug.
            warn!(preset = %self.preset_id, "unknown preset id, trial skipped");
            self.status = format!("unknown preset: {}", self.preset_id);
            return;
        };
        let result = physics::compute_physics(self.scenario, preset, self.hanging_mass_kg);
        let trace = signals::generate(&result, &self.signal_config());

        let domain = Some(trace.domain());
        let hint = trace.motion_window;
        self.force_sel.set_data(domain, hint);
        self.velocity_sel.set_data(domain, hint);
        self.playback = Playback::new(self.config.signal.duration_s);
        self.measurement = Measurement::default();
        self.status = if result.moved {
            format!(
                "cart moved: a = {:.3} m/s², tension = {:.3} N",
                result.acceleration_mps2, result.tension_n
            )
        } else {
            "cart did not move (static friction holds)".to_string()
        };
        info!(
            scenario = self.scenario.key(),
            preset = %self.preset_id,
            mass_kg = self.hanging_mass_kg,
            seed = self.seed,
            moved = result.moved,
            "trial generated"
        );

        self.trial = Some(Trial {
            physics: result,
            signals: trace,
            seed: self.seed,
            noise_enabled: self.noise_enabled,
        });
    }

    pub fn reroll_seed(&mut self) {
        self.seed = rand::rng().random();
    }

    /// Recompute the scalar measurements from the latest selections.
    pub fn recompute_measurement(&mut self) {
        self.measurement = match &self.trial {
            Some(trial) => measure::measure(
                &trial.signals,
                self.force_sel.selection(),
                self.velocity_sel.selection(),
            ),
            None => Measurement::default(),
        };
    }

    /// Commit the current trial's measurements to the session table.
    pub fn accept_current(&mut self) {
        let Some(trial) = &self.trial else {
            return;
        };
        let (Some(force), Some(accel)) = (
            self.measurement.force_mean_n,
            self.measurement.acceleration_mps2,
        ) else {
            self.status = "insufficient data: widen both selections".to_string();
            return;
        };
        let (Some(fw), Some(vw)) = (self.force_sel.selection(), self.velocity_sel.selection())
        else {
            return;
        };
        let recorded_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let id = self.store.accept_trial(
            self.scenario,
            &self.preset_id,
            self.hanging_mass_kg,
            force,
            accel,
            fw,
            vw,
            trial.noise_enabled,
            trial.seed,
            recorded_at,
        );
        self.status = format!("trial #{id} accepted");
    }

    pub fn export_csv(&mut self) {
        let path = self.config.export.csv_path.clone();
        match export::write_csv(Path::new(&path), self.store.records()) {
            Ok(()) => {
                info!(path = %path, records = self.store.records().len(), "CSV written");
                self.status = format!("wrote {path}");
            }
            Err(err) => {
                warn!(path = %path, %err, "CSV export failed");
                self.status = format!("export failed: {err}");
            }
        }
    }
}

pub struct App {
    state: LabState,
    exiting: Arc<AtomicBool>,
}

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        args: &Args,
        stop_flag: Arc<AtomicBool>,
    ) -> Self {
        cc.egui_ctx.set_pixels_per_point(1.25);
        let mut state = LabState::new(config, args);
        state.run_trial();
        Self {
            state,
            exiting: stop_flag,
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.exiting.load(Ordering::SeqCst) {
            eprintln!("SIGINT received: closing window.");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        self.state.playback.tick(Instant::now());

        crate::ui::windows::main_window(ctx, &mut self.state);

        let repaint = Duration::from_millis(self.state.config.ui.repaint_ms);
        ctx.request_repaint_after(repaint);
    }
}
