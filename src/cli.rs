use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Scenario: "cart-only" or "cart-friction"
    #[arg(long, default_value = "cart-only")]
    pub scenario: String,

    /// Preset id within the scenario
    #[arg(long, default_value = "standard")]
    pub preset: String,

    /// Hanging mass in kilograms
    #[arg(long, default_value_t = 0.1)]
    pub mass_kg: f64,

    /// Noise seed for the first trial (random if omitted)
    #[arg(long)]
    pub seed: Option<u32>,

    /// Disable sensor noise
    #[arg(long, default_value_t = false)]
    pub no_noise: bool,

    /// Path to config TOML
    #[arg(long, default_value = "cartlab.toml")]
    pub config: String,

    /// Run one trial without GUI, print measurements, write the CSV
    #[arg(long, default_value_t = false)]
    pub headless: bool,

    /// CSV output path (overrides config)
    #[arg(long)]
    pub csv: Option<String>,
}
