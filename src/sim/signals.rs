//! Synthetic force/velocity traces for one trial.
//!
//! The trace is built from five kinematic phases derived from the physics
//! result: pre-roll, smoothed constant acceleration, exponential
//! deceleration, settle, and (for a cart that never breaks static friction)
//! a single oscillatory hold phase. Amplitude and timing constants below are
//! calibration values; changing them changes every recorded trace.

use crate::sim::interval::Interval;
use crate::sim::noise::NoiseSampler;
use crate::sim::physics::PhysicsResult;
use std::f64::consts::TAU;

/// Fixed pre-roll before the cart is released.
const PRE_ROLL_S: f64 = 0.7;
/// Exponential velocity decay rate once the cart reaches the end stop.
const DECEL_RATE_PER_S: f64 = 3.2;
/// Force decay rate over the deceleration phase.
const FORCE_DECAY_PER_S: f64 = 4.0;
/// Uniform-draw threshold for a stick-slip pulse in the static branch.
const PULSE_THRESHOLD: f64 = 0.82;
/// Peak pulse amplitude as a fraction of the pulling force.
const PULSE_AMP: f64 = 0.15;

/// Per-channel gaussian noise scales. Force noise is larger than velocity
/// noise; the static branch is quieter than the moved branch.
const FORCE_NOISE_MOVED: f64 = 0.045;
const VEL_NOISE_MOVED: f64 = 0.012;
const FORCE_NOISE_STATIC: f64 = 0.02;
const VEL_NOISE_STATIC: f64 = 0.003;

#[derive(Clone, Copy, Debug)]
pub struct SignalConfig {
    pub duration_s: f64,
    pub sample_rate_hz: f64,
    pub noise_enabled: bool,
    pub seed: u32,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            duration_s: 4.5,
            sample_rate_hz: 60.0,
            noise_enabled: true,
            seed: 0,
        }
    }
}

impl SignalConfig {
    /// Keep the phase construction well-posed for off-default configs.
    fn sanitized(&self) -> Self {
        Self {
            duration_s: self.duration_s.max(3.5),
            sample_rate_hz: self.sample_rate_hz.max(1.0),
            ..*self
        }
    }
}

/// Phase boundaries carving the trial duration. For a moved trial
/// `initial_start_s < accel_start_s < accel_end_s < stop_end_s`; for a static
/// trial the motion phases collapse onto `accel_start_s`.
#[derive(Clone, Copy, Debug)]
pub struct SignalPhases {
    pub initial_start_s: f64,
    pub accel_start_s: f64,
    pub accel_end_s: f64,
    pub stop_end_s: f64,
}

/// One trial's full time series. Created once, immutable thereafter.
#[derive(Clone, Debug)]
pub struct TrialSignals {
    pub times_s: Vec<f64>,
    pub force_n: Vec<f64>,
    pub velocity_mps: Vec<f64>,
    pub motion_window: Option<Interval>,
    pub phases: SignalPhases,
}

impl TrialSignals {
    pub fn len(&self) -> usize {
        self.times_s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times_s.is_empty()
    }

    /// Full time domain of the trace.
    pub fn domain(&self) -> Interval {
        Interval::new(
            self.times_s.first().copied().unwrap_or(0.0),
            self.times_s.last().copied().unwrap_or(0.0),
        )
    }
}

fn derive_phases(physics: &PhysicsResult, duration_s: f64) -> (SignalPhases, f64) {
    let accel_start_s = PRE_ROLL_S;
    if !physics.moved {
        let phases = SignalPhases {
            initial_start_s: 0.0,
            accel_start_s,
            accel_end_s: accel_start_s,
            stop_end_s: accel_start_s,
        };
        return (phases, 0.0);
    }

    let travel = physics.travel_time_s.unwrap_or(duration_s);
    let accel_duration = (0.8 * travel).clamp(1.1, 2.0);
    // Lower bound wins if a short duration squeezes the band.
    let accel_end_s = (accel_start_s + accel_duration)
        .min(duration_s - 1.2)
        .max(1.8);
    let ramp_s = (0.14 * (accel_end_s - accel_start_s)).clamp(0.12, 0.24);
    let stop_end_s = (accel_end_s + 0.45)
        .min(duration_s - 0.35)
        .max(accel_end_s + 0.35);

    let phases = SignalPhases {
        initial_start_s: 0.0,
        accel_start_s,
        accel_end_s,
        stop_end_s,
    };
    (phases, ramp_s)
}

/// Smoothed velocity over the acceleration phase: quadratic ramp-in, linear
/// middle, quadratic ramp-out. The effective slope is raised so the integral
/// over the whole phase still equals `a * d` (continuity, no kink).
fn accel_phase_velocity(tau: f64, a: f64, d: f64, ramp: f64) -> f64 {
    let a_eff = a * d / (d - ramp);
    if tau < ramp {
        a_eff * tau * tau / (2.0 * ramp)
    } else if tau <= d - ramp {
        a_eff * (tau - ramp / 2.0)
    } else {
        let u = d - tau;
        a_eff * (d - ramp) - a_eff * u * u / (2.0 * ramp)
    }
}

/// Synthesize the force/velocity trace for one trial.
pub fn generate(physics: &PhysicsResult, cfg: &SignalConfig) -> TrialSignals {
    let cfg = cfg.sanitized();
    let (phases, ramp_s) = derive_phases(physics, cfg.duration_s);
    let mut noise = NoiseSampler::new(cfg.noise_enabled, cfg.seed);

    let n = (cfg.duration_s * cfg.sample_rate_hz).floor() as usize;
    let mut times_s = Vec::with_capacity(n + 1);
    let mut force_n = Vec::with_capacity(n + 1);
    let mut velocity_mps = Vec::with_capacity(n + 1);

    let tension = physics.tension_n;
    let pulling = physics.pulling_force_n;
    let a = physics.acceleration_mps2;
    let accel_d = phases.accel_end_s - phases.accel_start_s;
    let peak_v = a * accel_d;
    let stop_d = phases.stop_end_s - phases.accel_end_s;
    let v_at_stop = peak_v * (-DECEL_RATE_PER_S * stop_d).exp();
    let f_at_stop = tension * (-FORCE_DECAY_PER_S * stop_d).exp();

    for i in 0..=n {
        let t = i as f64 / cfg.sample_rate_hz;
        let (mut f, mut v);

        if physics.moved {
            if t < phases.accel_start_s {
                // Tension builds while the operator holds the cart back.
                let p = t / phases.accel_start_s;
                f = tension * (0.15 + 0.85 * p);
                v = 0.004 * (TAU * 7.0 * t).sin();
            } else if t <= phases.accel_end_s {
                let tau = t - phases.accel_start_s;
                f = tension * (1.0 + 0.16 * (-6.0 * tau).exp() * (TAU * 8.5 * tau).sin());
                v = accel_phase_velocity(tau, a, accel_d, ramp_s);
            } else if t <= phases.stop_end_s {
                let tau = t - phases.accel_end_s;
                f = tension * (-FORCE_DECAY_PER_S * tau).exp();
                v = peak_v * (-DECEL_RATE_PER_S * tau).exp();
            } else {
                let tau = t - phases.stop_end_s;
                f = f_at_stop * (-7.0 * tau).exp()
                    + 0.01 * tension * (-2.5 * tau).exp() * (TAU * 10.0 * tau).sin();
                v = v_at_stop * (-6.0 * tau).exp()
                    + 0.004 * (-2.0 * tau).exp() * (TAU * 13.0 * tau).sin();
            }
            f += FORCE_NOISE_MOVED * tension.max(0.4) * noise.gaussian();
            v += VEL_NOISE_MOVED * peak_v.max(0.15) * noise.gaussian();
        } else {
            // Cart pressed against static friction: force hovers near the
            // hanging weight with occasional stick-slip pulses.
            f = pulling * (1.0 + 0.04 * (TAU * 2.2 * t).sin());
            let u = noise.uniform();
            if u > PULSE_THRESHOLD {
                f += pulling * PULSE_AMP * (u - PULSE_THRESHOLD) / (1.0 - PULSE_THRESHOLD);
            }
            v = 0.002 * (TAU * 9.0 * t).sin();
            f += FORCE_NOISE_STATIC * pulling.max(0.3) * noise.gaussian();
            v += VEL_NOISE_STATIC * noise.gaussian();
        }

        times_s.push(t);
        force_n.push(f);
        velocity_mps.push(v);
    }

    let motion_window = physics
        .moved
        .then(|| Interval::new(phases.accel_start_s, phases.accel_end_s));

    TrialSignals {
        times_s,
        force_n,
        velocity_mps,
        motion_window,
        phases,
    }
}
