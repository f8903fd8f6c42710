//! Measurement gating and cross-trial aggregation.
//!
//! The statistics layer computes whatever it is handed; this layer decides
//! when a selection is wide enough to trust. Below the gate a measurement is
//! None ("insufficient data"), never a guess over too few points.

use crate::analysis::stats::{self, FitResult};
use crate::sim::interval::Interval;
use crate::sim::signals::TrialSignals;

/// Narrower selections than this never produce a measurement.
pub const MIN_WINDOW_WIDTH_S: f64 = 0.12;
/// A usable window must contain at least this many samples.
pub const MIN_WINDOW_SAMPLES: usize = 6;

/// Count samples falling inside the normalized window.
fn samples_in(times: &[f64], window: Interval) -> usize {
    let w = window.normalized();
    times
        .iter()
        .filter(|&&t| t >= w.start_s && t <= w.end_s)
        .count()
}

pub fn window_usable(times: &[f64], window: Interval) -> bool {
    window.width_s() >= MIN_WINDOW_WIDTH_S && samples_in(times, window) >= MIN_WINDOW_SAMPLES
}

/// Mean of `values` inside the window, None below the gate.
pub fn gated_mean(times: &[f64], values: &[f64], window: Interval) -> Option<f64> {
    if !window_usable(times, window) {
        return None;
    }
    let m = stats::mean_in_window(times, values, window);
    m.is_finite().then_some(m)
}

/// OLS slope of `values` against time inside the window, None below the gate.
pub fn gated_slope(times: &[f64], values: &[f64], window: Interval) -> Option<f64> {
    if !window_usable(times, window) {
        return None;
    }
    stats::linear_regression_in_window(times, values, window).map(|fit| fit.slope)
}

/// Scalar measurements derived from the two selections of one trial.
#[derive(Clone, Copy, Debug, Default)]
pub struct Measurement {
    pub force_mean_n: Option<f64>,
    pub acceleration_mps2: Option<f64>,
}

impl Measurement {
    pub fn is_complete(&self) -> bool {
        self.force_mean_n.is_some() && self.acceleration_mps2.is_some()
    }
}

/// Force mean from the force selection, acceleration slope from the velocity
/// selection. Either may be None independently.
pub fn measure(
    signals: &TrialSignals,
    force_window: Option<Interval>,
    velocity_window: Option<Interval>,
) -> Measurement {
    let force_mean_n =
        force_window.and_then(|w| gated_mean(&signals.times_s, &signals.force_n, w));
    let acceleration_mps2 =
        velocity_window.and_then(|w| gated_slope(&signals.times_s, &signals.velocity_mps, w));
    Measurement {
        force_mean_n,
        acceleration_mps2,
    }
}

/// Fit force against acceleration across accepted trials. Every point counts
/// equally; fewer than two points means no fit.
pub fn cross_trial_fit(points: &[(f64, f64)]) -> Option<FitResult> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = points.iter().copied().unzip();
    stats::linear_regression(&xs, &ys)
}
