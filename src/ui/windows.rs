use egui::{CentralPanel, TopBottomPanel};

use crate::app::LabState;
use crate::sim::physics::{self, Scenario};
use crate::ui::graphs::series_plot;

/// === Main window ===
pub fn main_window(ctx: &egui::Context, state: &mut LabState) {
    TopBottomPanel::top("top").show(ctx, |ui| {
        ui.heading("Cartlab — force & acceleration bench");
        ui.label("Pull a cart with a hanging mass, window the traces, build the F–a fit");
    });

    CentralPanel::default().show(ctx, |ui| {
        controls_row(ui, state);
        ui.separator();

        graphs_section(ui, state);
        // Graph input may have just moved a selection; measurements must be
        // current before the results panel reads them.
        state.recompute_measurement();
        ui.separator();

        results_panel(ui, state);
        ui.separator();

        trial_table(ui, state);
        fit_summary(ui, state);
    });
}

fn controls_row(ui: &mut egui::Ui, state: &mut LabState) {
    ui.horizontal(|ui| {
        let prev_scenario = state.scenario;
        egui::ComboBox::from_id_salt("scenario")
            .selected_text(state.scenario.label())
            .show_ui(ui, |ui| {
                for s in [Scenario::CartOnly, Scenario::CartFriction] {
                    ui.selectable_value(&mut state.scenario, s, s.label());
                }
            });
        if state.scenario != prev_scenario {
            state.preset_id = physics::presets(state.scenario)[0].id.to_string();
        }

        let selected_label = physics::preset_for(state.scenario, &state.preset_id)
            .map(|p| p.label)
            .unwrap_or("?");
        egui::ComboBox::from_id_salt("preset")
            .selected_text(selected_label)
            .show_ui(ui, |ui| {
                for p in physics::presets(state.scenario) {
                    ui.selectable_value(&mut state.preset_id, p.id.to_string(), p.label);
                }
            });

        ui.label("hanging mass");
        ui.add(
            egui::DragValue::new(&mut state.hanging_mass_kg)
                .speed(0.005)
                .range(0.01..=0.6)
                .suffix(" kg"),
        );

        ui.checkbox(&mut state.noise_enabled, "noise");
        ui.label("seed");
        ui.add(egui::DragValue::new(&mut state.seed).speed(1.0));
        if ui.button("🎲").clicked() {
            state.reroll_seed();
        }

        if ui.button("New trial").clicked() {
            state.run_trial();
        }
    });

    ui.horizontal(|ui| {
        if state.playback.is_playing() {
            if ui.button("⏸ pause").clicked() {
                state.playback.pause();
            }
        } else if ui.button("▶ play").clicked() {
            state.playback.play();
        }
        if ui.button("⏮ rewind").clicked() {
            state.playback.rewind();
        }
        ui.label(format!("t = {:.2} s", state.playback.cursor_s()));
    });
}

fn graphs_section(ui: &mut egui::Ui, state: &mut LabState) {
    let Some(trial) = &state.trial else {
        ui.label("No trial yet. Set up the cart and press New trial.");
        return;
    };

    let hint = if state.config.ui.show_motion_hint {
        trial.signals.motion_window
    } else {
        None
    };
    let cursor_s = state.playback.cursor_s();
    let cursor = (state.playback.is_playing() || cursor_s > 0.0).then_some(cursor_s);

    series_plot(
        ui,
        "force_plot",
        "Force (N)",
        "force",
        &trial.signals.times_s,
        &trial.signals.force_n,
        hint,
        cursor,
        &mut state.force_sel,
    );
    series_plot(
        ui,
        "velocity_plot",
        "Velocity (m/s)",
        "velocity",
        &trial.signals.times_s,
        &trial.signals.velocity_mps,
        hint,
        cursor,
        &mut state.velocity_sel,
    );
    ui.label("Drag on a graph to select a window; arrows nudge the end bound (Shift: start, Alt: fine).");
}

fn results_panel(ui: &mut egui::Ui, state: &mut LabState) {
    ui.horizontal(|ui| {
        match state.measurement.force_mean_n {
            Some(f) => ui.label(format!("mean force: {f:.3} N")),
            None => ui.label("mean force: insufficient data"),
        };
        ui.separator();
        match state.measurement.acceleration_mps2 {
            Some(a) => ui.label(format!("acceleration: {a:.3} m/s²")),
            None => ui.label("acceleration: insufficient data"),
        };
        ui.separator();

        let can_accept = state.trial.is_some() && state.measurement.is_complete();
        if ui
            .add_enabled(can_accept, egui::Button::new("Accept trial"))
            .clicked()
        {
            state.accept_current();
        }
    });
    if !state.status.is_empty() {
        ui.label(&state.status);
    }
}

fn trial_table(ui: &mut egui::Ui, state: &mut LabState) {
    ui.heading("Accepted trials");
    if state.store.records().is_empty() {
        ui.label("none yet");
        return;
    }

    let mut remove_id = None;
    egui::Grid::new("trial_table").striped(true).show(ui, |ui| {
        ui.label("id");
        ui.label("preset");
        ui.label("m_h (kg)");
        ui.label("F (N)");
        ui.label("a (m/s²)");
        ui.label("noise");
        ui.label("recorded");
        ui.label("");
        ui.end_row();

        for rec in state.store.records_for(state.scenario) {
            ui.label(rec.id.to_string());
            ui.label(&rec.preset_id);
            ui.label(format!("{:.3}", rec.hanging_mass_kg));
            ui.label(format!("{:.3}", rec.force_mean_n));
            ui.label(format!("{:.3}", rec.acceleration_mps2));
            ui.label(if rec.noise_enabled { "on" } else { "off" });
            ui.label(&rec.recorded_at);
            if ui.button("✖").clicked() {
                remove_id = Some(rec.id);
            }
            ui.end_row();
        }
    });
    if let Some(id) = remove_id {
        state.store.remove(id);
    }

    if ui.button("Export CSV").clicked() {
        state.export_csv();
    }
}

fn fit_summary(ui: &mut egui::Ui, state: &mut LabState) {
    ui.separator();
    match state.store.fit_for(state.scenario) {
        Some(fit) => {
            ui.label(format!(
                "F = {:.3}·a + {:.3}   (R² = {:.4}, n = {})",
                fit.slope, fit.intercept, fit.r2, fit.count
            ));
        }
        None => {
            ui.label("Fit: accept at least two trials in this scenario.");
        }
    }
}
