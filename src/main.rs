// Entry point: parses the CLI, then either runs one headless trial or
// launches the egui/eframe bench.

use std::path::Path;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use clap::Parser;
use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cartlab::analysis::measure;
use cartlab::app::App;
use cartlab::cli::Args;
use cartlab::config::AppConfig;
use cartlab::export;
use cartlab::session::SessionStore;
use cartlab::sim::interval::Interval;
use cartlab::sim::physics::{self, Scenario};
use cartlab::sim::signals::{self, SignalConfig};

fn parse_scenario(s: &str) -> Option<Scenario> {
    match s {
        "cart-only" => Some(Scenario::CartOnly),
        "cart-friction" => Some(Scenario::CartFriction),
        _ => None,
    }
}

fn run_headless(args: &Args, config: &AppConfig) -> Result<(), String> {
    let scenario = parse_scenario(&args.scenario)
        .ok_or_else(|| format!("unknown scenario: {}", args.scenario))?;
    let preset = physics::preset_for(scenario, &args.preset)
        .ok_or_else(|| format!("unknown preset '{}' for {}", args.preset, scenario.key()))?;

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let result = physics::compute_physics(scenario, preset, args.mass_kg);
    let signal_cfg = SignalConfig {
        duration_s: config.signal.duration_s,
        sample_rate_hz: config.signal.sample_rate_hz,
        noise_enabled: !args.no_noise,
        seed,
    };
    let trace = signals::generate(&result, &signal_cfg);
    info!(seed, moved = result.moved, "headless trial generated");

    // Measure over the motion window, or a fallback span for a static cart.
    let window = trace.motion_window.unwrap_or_else(|| {
        let d = trace.domain();
        let span = d.width_s();
        Interval::new(d.start_s + 0.2 * span, d.start_s + 0.4 * span)
    });
    let m = measure::measure(&trace, Some(window), Some(window));

    match m.force_mean_n {
        Some(f) => println!("mean force:   {f:.4} N"),
        None => println!("mean force:   insufficient data"),
    }
    match m.acceleration_mps2 {
        Some(a) => println!("acceleration: {a:.4} m/s²"),
        None => println!("acceleration: insufficient data"),
    }

    if let (Some(f), Some(a)) = (m.force_mean_n, m.acceleration_mps2) {
        let mut store = SessionStore::new();
        store.accept_trial(
            scenario,
            preset.id,
            args.mass_kg,
            f,
            a,
            window,
            window,
            signal_cfg.noise_enabled,
            seed,
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        let path = args
            .csv
            .clone()
            .unwrap_or_else(|| config.export.csv_path.clone());
        export::write_csv(Path::new(&path), store.records())
            .map_err(|err| format!("failed to write {path}: {err}"))?;
        println!("wrote {path}");
    }
    Ok(())
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if parse_scenario(&args.scenario).is_none() {
        eprintln!("unknown scenario: {} (use cart-only or cart-friction)", args.scenario);
        std::process::exit(2);
    }
    let config = AppConfig::load_or_default(&args.config);

    if args.headless {
        if let Err(err) = run_headless(&args, &config) {
            eprintln!("{err}");
            std::process::exit(1);
        }
        return Ok(());
    }

    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_flag_for_ctrlc = stop_flag.clone();
    ctrlc::set_handler(move || {
        stop_flag_for_ctrlc.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 900.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Cartlab",
        native_options,
        Box::new(move |cc| Ok(Box::new(App::new(cc, config, &args, stop_flag.clone())))),
    )
}
