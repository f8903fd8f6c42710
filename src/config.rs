use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalSettings {
    #[serde(default = "SignalSettings::default_duration_s")]
    pub duration_s: f64,
    #[serde(default = "SignalSettings::default_sample_rate_hz")]
    pub sample_rate_hz: f64,
    #[serde(default = "SignalSettings::default_noise_default")]
    pub noise_default: bool,
}

impl SignalSettings {
    fn default_duration_s() -> f64 {
        4.5
    }
    fn default_sample_rate_hz() -> f64 {
        60.0
    }
    fn default_noise_default() -> bool {
        true
    }
}

impl Default for SignalSettings {
    fn default() -> Self {
        Self {
            duration_s: Self::default_duration_s(),
            sample_rate_hz: Self::default_sample_rate_hz(),
            noise_default: Self::default_noise_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default = "UiSettings::default_show_motion_hint")]
    pub show_motion_hint: bool,
    #[serde(default = "UiSettings::default_repaint_ms")]
    pub repaint_ms: u64,
}

impl UiSettings {
    fn default_show_motion_hint() -> bool {
        true
    }
    fn default_repaint_ms() -> u64 {
        16
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            show_motion_hint: Self::default_show_motion_hint(),
            repaint_ms: Self::default_repaint_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    #[serde(default = "ExportSettings::default_csv_path")]
    pub csv_path: String,
}

impl ExportSettings {
    fn default_csv_path() -> String {
        "cartlab_trials.csv".to_string()
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            csv_path: Self::default_csv_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub signal: SignalSettings,
    #[serde(default)]
    pub ui: UiSettings,
    #[serde(default)]
    pub export: ExportSettings,
}

impl AppConfig {
    fn format_f64_compact(x: f64) -> String {
        let mut s = format!("{:.6}", x);
        while s.contains('.') && s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
        if s.is_empty() { "0".to_string() } else { s }
    }

    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        eprintln!("Failed to parse config {path}: {err}. Using defaults.");
                    }
                },
                Err(err) => {
                    eprintln!("Failed to read config {path}: {err}. Using defaults.");
                }
            }
            return Self::default();
        }

        // File does not exist: write commented defaults and return them.
        let default_cfg = Self::default();
        if let Ok(text) = toml::to_string_pretty(&default_cfg) {
            let mut commented = String::new();
            for line in text.lines() {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    commented.push('\n');
                } else if trimmed.starts_with('[') && trimmed.ends_with(']') {
                    commented.push_str(line);
                    commented.push('\n');
                } else {
                    let mut out_line = line.to_string();
                    if let Some((lhs, rhs)) = line.split_once('=') {
                        let rhs_trim = rhs.trim();
                        let has_decimal = rhs_trim.contains('.');
                        if (has_decimal || rhs_trim.contains('e') || rhs_trim.contains('E'))
                            && !rhs_trim.contains('"')
                            && rhs_trim != "true"
                            && rhs_trim != "false"
                        {
                            if let Ok(val) = rhs_trim.parse::<f64>() {
                                let mut formatted = Self::format_f64_compact(val);
                                if has_decimal && !formatted.contains('.') {
                                    formatted.push_str(".0");
                                }
                                out_line = format!("{} = {}", lhs.trim(), formatted);
                            }
                        }
                    }
                    commented.push_str("# ");
                    commented.push_str(&out_line);
                    commented.push('\n');
                }
            }
            if let Err(err) = fs::write(path_obj, commented) {
                eprintln!("Failed to write default config to {path}: {err}");
            }
        } else {
            eprintln!("Failed to serialize default config; continuing with defaults");
        }
        default_cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn unique_path(name: &str) -> std::path::PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!(
            "cartlab_config_test_{}_{}",
            name,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        p
    }

    #[test]
    fn load_or_default_writes_defaults_cleanly() {
        let path = unique_path("defaults.toml");
        let path_str = path.to_string_lossy().to_string();
        let _ = fs::remove_file(&path);

        let cfg = AppConfig::load_or_default(&path_str);
        assert!(path.exists(), "config file should be created");
        assert_eq!(cfg.signal.duration_s, 4.5);
        assert_eq!(cfg.signal.sample_rate_hz, 60.0);
        assert!(cfg.signal.noise_default);
        assert!(cfg.ui.show_motion_hint);
        assert_eq!(cfg.export.csv_path, "cartlab_trials.csv");

        let contents = fs::read_to_string(&path).expect("read written config");
        assert!(
            contents.contains("# duration_s = 4.5"),
            "should write commented duration_s"
        );
        assert!(
            contents.contains("# sample_rate_hz = 60.0"),
            "should write commented sample_rate_hz"
        );
        assert!(
            contents.contains("# noise_default = true"),
            "should write commented noise_default"
        );

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn load_or_default_reads_existing() {
        let path = unique_path("custom.toml");
        let path_str = path.to_string_lossy().to_string();
        let custom = AppConfig {
            signal: SignalSettings {
                duration_s: 6.0,
                sample_rate_hz: 120.0,
                noise_default: false,
            },
            ui: UiSettings {
                show_motion_hint: false,
                repaint_ms: 33,
            },
            export: ExportSettings {
                csv_path: "out/trials.csv".to_string(),
            },
        };
        let text = toml::to_string_pretty(&custom).unwrap();
        fs::write(&path, text).unwrap();

        let cfg = AppConfig::load_or_default(&path_str);
        assert_eq!(cfg.signal.duration_s, 6.0);
        assert_eq!(cfg.signal.sample_rate_hz, 120.0);
        assert!(!cfg.signal.noise_default);
        assert!(!cfg.ui.show_motion_hint);
        assert_eq!(cfg.ui.repaint_ms, 33);
        assert_eq!(cfg.export.csv_path, "out/trials.csv");

        let _ = fs::remove_file(&path);
    }
}
