//! Half-Atwood cart model: a cart on a level track pulled through a pulley
//! by a hanging mass, optionally with a friction pad under the cart.

use serde::{Deserialize, Serialize};

pub const G_MPS2: f64 = 9.81;
/// Usable track length from release point to the end stop.
pub const TRACK_LENGTH_M: f64 = 1.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    CartOnly,
    CartFriction,
}

impl Scenario {
    pub fn label(&self) -> &'static str {
        match self {
            Scenario::CartOnly => "cart only",
            Scenario::CartFriction => "cart + friction pad",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Scenario::CartOnly => "cart-only",
            Scenario::CartFriction => "cart-friction",
        }
    }
}

/// One selectable cart configuration.
#[derive(Clone, Copy, Debug)]
pub struct Preset {
    pub id: &'static str,
    pub label: &'static str,
    pub cart_mass_kg: f64,
    pub friction_mu_s: f64,
    pub friction_mu_k: f64,
}

const CART_ONLY_PRESETS: [Preset; 3] = [
    Preset {
        id: "light",
        label: "light cart (250 g)",
        cart_mass_kg: 0.25,
        friction_mu_s: 0.0,
        friction_mu_k: 0.0,
    },
    Preset {
        id: "standard",
        label: "standard cart (500 g)",
        cart_mass_kg: 0.5,
        friction_mu_s: 0.0,
        friction_mu_k: 0.0,
    },
    Preset {
        id: "loaded",
        label: "loaded cart (1 kg)",
        cart_mass_kg: 1.0,
        friction_mu_s: 0.0,
        friction_mu_k: 0.0,
    },
];

const CART_FRICTION_PRESETS: [Preset; 3] = [
    Preset {
        id: "felt",
        label: "felt pad (500 g cart)",
        cart_mass_kg: 0.5,
        friction_mu_s: 0.30,
        friction_mu_k: 0.22,
    },
    Preset {
        id: "cork",
        label: "cork pad (500 g cart)",
        cart_mass_kg: 0.5,
        friction_mu_s: 0.42,
        friction_mu_k: 0.33,
    },
    Preset {
        id: "rubber",
        label: "rubber pad (500 g cart)",
        cart_mass_kg: 0.5,
        friction_mu_s: 0.65,
        friction_mu_k: 0.52,
    },
];

pub fn presets(scenario: Scenario) -> &'static [Preset] {
    match scenario {
        Scenario::CartOnly => &CART_ONLY_PRESETS,
        Scenario::CartFriction => &CART_FRICTION_PRESETS,
    }
}

/// Lookup by id. Unknown ids are a caller error; callers fail fast on None.
pub fn preset_for(scenario: Scenario, id: &str) -> Option<&'static Preset> {
    presets(scenario).iter().find(|p| p.id == id)
}

/// Outcome of one trial configuration. Immutable per trial.
#[derive(Clone, Copy, Debug)]
pub struct PhysicsResult {
    pub moved: bool,
    pub acceleration_mps2: f64,
    pub tension_n: f64,
    pub pulling_force_n: f64,
    pub travel_time_s: Option<f64>,
}

/// Solve the half-Atwood system for one (preset, hanging mass) pair.
pub fn compute_physics(scenario: Scenario, preset: &Preset, hanging_mass_kg: f64) -> PhysicsResult {
    let m_c = preset.cart_mass_kg;
    let m_h = hanging_mass_kg.max(0.0);
    let pulling_force_n = m_h * G_MPS2;

    let (mu_s, mu_k) = match scenario {
        Scenario::CartOnly => (0.0, 0.0),
        Scenario::CartFriction => (preset.friction_mu_s, preset.friction_mu_k),
    };

    let static_threshold_n = mu_s * m_c * G_MPS2;
    if m_h <= 0.0 || pulling_force_n <= static_threshold_n {
        // Cart stays pressed against static friction; string carries the
        // full hanging weight.
        return PhysicsResult {
            moved: false,
            acceleration_mps2: 0.0,
            tension_n: pulling_force_n,
            pulling_force_n,
            travel_time_s: None,
        };
    }

    let acceleration_mps2 = (m_h * G_MPS2 - mu_k * m_c * G_MPS2) / (m_c + m_h);
    if acceleration_mps2 <= 0.0 {
        return PhysicsResult {
            moved: false,
            acceleration_mps2: 0.0,
            tension_n: pulling_force_n,
            pulling_force_n,
            travel_time_s: None,
        };
    }

    let tension_n = m_h * (G_MPS2 - acceleration_mps2);
    let travel_time_s = (2.0 * TRACK_LENGTH_M / acceleration_mps2).sqrt();

    PhysicsResult {
        moved: true,
        acceleration_mps2,
        tension_n,
        pulling_force_n,
        travel_time_s: Some(travel_time_s),
    }
}
