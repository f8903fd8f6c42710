//! Windowed statistics over (time, value) series.
//!
//! Degenerate inputs never panic: an empty mean is NaN, a regression over
//! fewer than two points or zero x-variance is None. Callers surface these
//! as "insufficient data", never as zero.

use crate::sim::interval::Interval;

/// Ordinary least-squares fit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitResult {
    pub slope: f64,
    pub intercept: f64,
    pub r2: f64,
    pub count: usize,
}

/// Parallel subsequence with `start <= time <= end` (inclusive, normalized
/// before use). All windowed operations are defined through this slice.
pub fn slice_window(times: &[f64], values: &[f64], window: Interval) -> (Vec<f64>, Vec<f64>) {
    let w = window.normalized();
    let mut ts = Vec::new();
    let mut vs = Vec::new();
    for (&t, &v) in times.iter().zip(values.iter()) {
        if t >= w.start_s && t <= w.end_s {
            ts.push(t);
            vs.push(v);
        }
    }
    (ts, vs)
}

/// Arithmetic mean; NaN for an empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// OLS over paired samples. None when fewer than two points or all x equal.
pub fn linear_regression(x: &[f64], y: &[f64]) -> Option<FitResult> {
    let n = x.len();
    if n != y.len() || n < 2 {
        return None;
    }

    let x_mean = mean(x);
    let y_mean = mean(y);

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - x_mean;
        sxx += dx * dx;
        sxy += dx * (yi - y_mean);
    }
    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let fit = slope * xi + intercept;
        ss_res += (yi - fit) * (yi - fit);
        ss_tot += (yi - y_mean) * (yi - y_mean);
    }
    // All-identical y means the line fits exactly.
    let r2 = if ss_tot == 0.0 {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    };

    Some(FitResult {
        slope,
        intercept,
        r2,
        count: n,
    })
}

pub fn mean_in_window(times: &[f64], values: &[f64], window: Interval) -> f64 {
    let (_, vs) = slice_window(times, values, window);
    mean(&vs)
}

pub fn linear_regression_in_window(
    times: &[f64],
    values: &[f64],
    window: Interval,
) -> Option<FitResult> {
    let (ts, vs) = slice_window(times, values, window);
    linear_regression(&ts, &vs)
}
