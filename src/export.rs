//! CSV export of accepted trial records.
//!
//! Fixed 13-column layout; string fields are always double-quoted (embedded
//! quotes doubled), numbers and booleans pass through verbatim. This file is
//! the only artifact the app persists.

use std::fs;
use std::io;
use std::path::Path;

use crate::session::TrialRecord;

pub const CSV_HEADER: &str = "trial_id,scenario,preset_id,hanging_mass_kg,force_mean_n,\
acceleration_mps2,force_window_start_s,force_window_end_s,velocity_window_start_s,\
velocity_window_end_s,noise_enabled,seed,recorded_at";

fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn record_row(r: &TrialRecord) -> String {
    let fw = r.force_window.normalized();
    let vw = r.velocity_window.normalized();
    format!(
        "{},{},{},{},{},{},{},{},{},{},{},{},{}",
        r.id,
        quoted(r.scenario.key()),
        quoted(&r.preset_id),
        r.hanging_mass_kg,
        r.force_mean_n,
        r.acceleration_mps2,
        fw.start_s,
        fw.end_s,
        vw.start_s,
        vw.end_s,
        r.noise_enabled,
        r.seed,
        quoted(&r.recorded_at),
    )
}

/// Header plus one row per record, newline-terminated.
pub fn records_to_csv(records: &[TrialRecord]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for r in records {
        out.push_str(&record_row(r));
        out.push('\n');
    }
    out
}

pub fn write_csv(path: &Path, records: &[TrialRecord]) -> io::Result<()> {
    fs::write(path, records_to_csv(records))
}
