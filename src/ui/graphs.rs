//! Time-series plots with motion-window, selection and handle overlays.

use egui::Color32;
use egui_plot::{Line, Plot, PlotPoints, Polygon, VLine};

use crate::sim::interval::Interval;
use crate::ui::selection::{Bound, HANDLE_HIT_RADIUS_PX, SelectionState, nudge_step};

const MOTION_HINT_COLOR: Color32 = Color32::from_rgb(90, 120, 90);
const SELECTION_FILL: Color32 = Color32::from_rgba_premultiplied(60, 100, 160, 40);
const HANDLE_COLOR: Color32 = Color32::from_rgb(120, 170, 255);
const CURSOR_COLOR: Color32 = Color32::from_rgb(220, 180, 80);

/// One measurement graph: series line, overlays, and the pointer/keyboard
/// wiring that drives its selection machine.
#[allow(clippy::too_many_arguments)]
pub fn series_plot(
    ui: &mut egui::Ui,
    id: &str,
    heading: &str,
    y_label: &str,
    times: &[f64],
    values: &[f64],
    motion_window: Option<Interval>,
    cursor_s: Option<f64>,
    sel: &mut SelectionState,
) {
    ui.label(heading);

    let domain_end = times.last().copied().unwrap_or(1.0);
    let plot = Plot::new(id)
        .height(180.0)
        .allow_scroll(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .include_x(0.0)
        .include_x(domain_end)
        .x_axis_formatter(|mark, _| format!("{:.2} s", mark.value))
        .y_axis_formatter(|mark, _| format!("{:.2}", mark.value));

    let response = plot.show(ui, |plot_ui| {
        let bounds = plot_ui.plot_bounds();
        let (y_min, y_max) = (bounds.min()[1], bounds.max()[1]);

        // Motion window hint: a pair of guide lines, not a hard constraint.
        if let Some(hint) = motion_window {
            plot_ui.vline(VLine::new("", hint.start_s).color(MOTION_HINT_COLOR));
            plot_ui.vline(VLine::new("", hint.end_s).color(MOTION_HINT_COLOR));
        }

        // Selection band with draggable bound handles.
        if let Some(raw) = sel.raw_selection() {
            let n = raw.normalized();
            let band: PlotPoints = vec![
                [n.start_s, y_min],
                [n.start_s, y_max],
                [n.end_s, y_max],
                [n.end_s, y_min],
            ]
            .into();
            plot_ui.polygon(Polygon::new("", band).fill_color(SELECTION_FILL));
            plot_ui.vline(VLine::new("", raw.start_s).color(HANDLE_COLOR).width(2.5));
            plot_ui.vline(VLine::new("", raw.end_s).color(HANDLE_COLOR).width(2.5));
        }

        if let Some(cursor) = cursor_s {
            plot_ui.vline(VLine::new("", cursor).color(CURSOR_COLOR));
        }

        let points: PlotPoints = times
            .iter()
            .zip(values.iter())
            .map(|(t, v)| [*t, *v])
            .collect();
        plot_ui.line(Line::new(y_label, points));

        let pointer_t = plot_ui.pointer_coordinate().map(|p| p.x);
        let rect_w = plot_ui.response().rect.width() as f64;
        let sec_per_px = if rect_w > 0.0 {
            plot_ui.plot_bounds().width() / rect_w
        } else {
            0.0
        };
        (pointer_t, sec_per_px)
    });

    let (pointer_t, sec_per_px) = response.inner;
    let resp = response.response;

    if resp.drag_started() {
        if let Some(t) = pointer_t {
            sel.pointer_down(t, HANDLE_HIT_RADIUS_PX as f64 * sec_per_px);
        }
    }
    if resp.dragged() {
        if let Some(t) = pointer_t {
            sel.pointer_move(t);
        }
    }
    if resp.drag_stopped() {
        sel.pointer_up();
    }

    // Arrow keys adjust the end bound; Shift targets the start bound and Alt
    // switches to the fine step.
    if resp.hovered() {
        ui.input(|i| {
            let bound = if i.modifiers.shift {
                Bound::Start
            } else {
                Bound::End
            };
            let step = nudge_step(i.modifiers.alt);
            if i.key_pressed(egui::Key::ArrowLeft) {
                sel.nudge(bound, -step);
            }
            if i.key_pressed(egui::Key::ArrowRight) {
                sel.nudge(bound, step);
            }
        });
    }
}
