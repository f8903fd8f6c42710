//! End-to-end: synthesized trial -> windowed statistics -> accepted fit.

use cartlab::analysis::measure::{cross_trial_fit, measure};
use cartlab::analysis::stats::{linear_regression, linear_regression_in_window};
use cartlab::sim::interval::Interval;
use cartlab::sim::physics::{Scenario, compute_physics, preset_for};
use cartlab::sim::signals::{SignalConfig, generate};

fn quiet() -> SignalConfig {
    SignalConfig {
        noise_enabled: false,
        seed: 0,
        ..SignalConfig::default()
    }
}

#[test]
fn regression_is_exact_on_a_perfect_line() {
    let fit = linear_regression(&[0.0, 1.0, 2.0, 3.0, 4.0], &[2.0, 5.0, 8.0, 11.0, 14.0]).unwrap();
    assert!((fit.slope - 3.0).abs() < 1e-12);
    assert!((fit.intercept - 2.0).abs() < 1e-12);
    assert!((fit.r2 - 1.0).abs() < 1e-12);
    assert_eq!(fit.count, 5);
}

#[test]
fn windowed_regression_keeps_inclusive_bounds() {
    let fit = linear_regression_in_window(
        &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
        &[1.0, 3.0, 5.0, 7.0, 10.0, 13.0],
        Interval::new(1.0, 3.0),
    )
    .unwrap();
    assert_eq!(fit.count, 3);
    assert!((fit.slope - 2.0).abs() < 1e-12);
    assert!((fit.intercept - 1.0).abs() < 1e-12);
}

#[test]
fn motion_window_measurement_recovers_the_physics() {
    let preset = preset_for(Scenario::CartOnly, "standard").unwrap();
    let physics = compute_physics(Scenario::CartOnly, preset, 0.15);
    let trace = generate(&physics, &quiet());
    let window = trace.motion_window.unwrap();

    let m = measure(&trace, Some(window), Some(window));
    let force = m.force_mean_n.expect("window is wide enough");
    let accel = m.acceleration_mps2.expect("window is wide enough");

    // The transient rings around tension and averages out.
    assert!(
        (force - physics.tension_n).abs() < physics.tension_n * 0.03,
        "force {force} vs tension {}",
        physics.tension_n
    );
    // Ramp smoothing biases the fitted slope above the plateau value, but it
    // stays in the neighborhood of the true acceleration.
    assert!(
        (accel - physics.acceleration_mps2).abs() < physics.acceleration_mps2 * 0.2,
        "slope {accel} vs a {}",
        physics.acceleration_mps2
    );
    assert!(accel > 0.0);
}

#[test]
fn undersized_windows_measure_nothing() {
    let preset = preset_for(Scenario::CartOnly, "standard").unwrap();
    let physics = compute_physics(Scenario::CartOnly, preset, 0.15);
    let trace = generate(&physics, &quiet());

    // Narrower than the width gate.
    let narrow = Interval::new(1.0, 1.1);
    let m = measure(&trace, Some(narrow), Some(narrow));
    assert!(m.force_mean_n.is_none());
    assert!(m.acceleration_mps2.is_none());

    // No selection at all.
    let m = measure(&trace, None, None);
    assert!(!m.is_complete());
}

#[test]
fn accepted_trials_recover_the_cart_mass_scale() {
    let preset = preset_for(Scenario::CartOnly, "standard").unwrap();
    let mut points = Vec::new();
    for mass in [0.05, 0.1, 0.2, 0.3] {
        let physics = compute_physics(Scenario::CartOnly, preset, mass);
        let trace = generate(&physics, &quiet());
        let window = trace.motion_window.unwrap();
        let m = measure(&trace, Some(window), Some(window));
        points.push((m.acceleration_mps2.unwrap(), m.force_mean_n.unwrap()));
    }

    let fit = cross_trial_fit(&points).unwrap();
    assert_eq!(fit.count, 4);
    assert!(fit.r2 > 0.98, "r2 = {}", fit.r2);
    // Slope of tension vs measured acceleration tracks the cart mass.
    assert!(
        fit.slope > 0.3 && fit.slope < 0.65,
        "slope = {} for a 0.5 kg cart",
        fit.slope
    );
}
