use cartlab::sim::interval::Interval;
use cartlab::sim::physics::{Scenario, compute_physics, preset_for};
use cartlab::sim::signals::{SignalConfig, generate};
use cartlab::ui::selection::{Bound, DragState, NUDGE_STEP_S, SelectionState, nudge_step};

fn machine_over_trial() -> SelectionState {
    let preset = preset_for(Scenario::CartOnly, "standard").unwrap();
    let physics = compute_physics(Scenario::CartOnly, preset, 0.15);
    let trace = generate(
        &physics,
        &SignalConfig {
            noise_enabled: false,
            seed: 0,
            ..SignalConfig::default()
        },
    );
    let mut sel = SelectionState::new();
    sel.set_data(Some(trace.domain()), trace.motion_window);
    sel
}

#[test]
fn drag_create_adjust_release() {
    let mut sel = machine_over_trial();
    assert_eq!(sel.drag_state(), DragState::Idle);

    sel.pointer_down(1.0, 0.03);
    assert_eq!(sel.drag_state(), DragState::SelectingNew);
    sel.pointer_move(1.6);
    sel.pointer_up();
    assert_eq!(sel.drag_state(), DragState::Idle);
    assert_eq!(sel.selection().unwrap(), Interval::new(1.0, 1.6));

    // Re-grab the end handle and drag it past the start: consumers still see
    // a normalized interval.
    sel.pointer_down(1.6, 0.03);
    assert_eq!(sel.drag_state(), DragState::DraggingEnd);
    sel.pointer_move(0.4);
    let sel_now = sel.selection().unwrap();
    assert!(sel_now.start_s <= sel_now.end_s);
    assert_eq!(sel_now, Interval::new(0.4, 1.0));
    sel.pointer_up();
}

#[test]
fn keyboard_flow_without_prior_selection() {
    let mut sel = machine_over_trial();
    // First nudge seeds a selection inside the motion window, then steps.
    sel.nudge(Bound::End, nudge_step(false));
    let seeded = sel.selection().expect("nudge seeds a selection");
    assert!(seeded.width_s() > 0.0);

    let before = sel.selection().unwrap().end_s;
    sel.nudge(Bound::End, -NUDGE_STEP_S);
    let after = sel.selection().unwrap().end_s;
    assert!((before - after - NUDGE_STEP_S).abs() < 1e-12);
}

#[test]
fn fine_step_is_half_the_coarse_step() {
    assert_eq!(nudge_step(true) * 2.0, nudge_step(false));
}

#[test]
fn events_without_data_are_ignored() {
    let mut sel = SelectionState::new();
    sel.pointer_down(1.0, 0.03);
    sel.pointer_move(2.0);
    sel.pointer_up();
    sel.nudge(Bound::Start, 0.02);
    assert!(sel.selection().is_none());
}

#[test]
fn reset_clears_selection_for_next_trial() {
    let mut sel = machine_over_trial();
    sel.pointer_down(1.0, 0.03);
    sel.pointer_move(2.0);
    sel.pointer_up();
    assert!(sel.selection().is_some());

    sel.set_data(Some(Interval::new(0.0, 4.5)), None);
    assert!(sel.selection().is_none());
    assert_eq!(sel.drag_state(), DragState::Idle);
}
