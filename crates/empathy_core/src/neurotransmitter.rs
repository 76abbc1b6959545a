//! Live neurotransmitter levels.
//!
//! Every level is a scalar in [0.0, 2.0] where 1.0 is the healthy reference
//! baseline. The state is owned by a game session, read by every subsystem
//! each tick and mutated only by external actions (medication, console edits).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lowest representable level.
pub const NT_MIN: f64 = 0.0;
/// Highest representable level.
pub const NT_MAX: f64 = 2.0;
/// Healthy reference level; also the value read for absent names.
pub const NT_BASELINE: f64 = 1.0;

/// Names that are always present in a session's state.
pub const BUILTIN_NEUROTRANSMITTERS: [&str; 6] = [
    "serotonin",
    "dopamine",
    "norepinephrine",
    "cortisol",
    "gaba",
    "substance_p",
];

/// Canonical key for a neurotransmitter name: lowercase, spaces become `_`,
/// parentheses are dropped ("Substance P" -> `substance_p`).
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .filter(|c| *c != '(' && *c != ')')
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

/// Clamp a level into [0, 2]. Non-finite input falls back to the baseline.
pub fn clamp_level(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(NT_MIN, NT_MAX)
    } else {
        tracing::warn!("Non-finite neurotransmitter level {}, using baseline", value);
        NT_BASELINE
    }
}

/// Mapping of normalized NT name -> clamped level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct NeurotransmitterState {
    levels: BTreeMap<String, f64>,
}

impl Default for NeurotransmitterState {
    fn default() -> Self {
        Self::new()
    }
}

impl NeurotransmitterState {
    /// Built-in names at the healthy baseline.
    pub fn new() -> Self {
        let levels = BUILTIN_NEUROTRANSMITTERS
            .iter()
            .map(|name| (name.to_string(), NT_BASELINE))
            .collect();
        Self { levels }
    }

    /// Built-ins plus every entry of the profile, at the profile's baselines.
    pub fn from_profile(profile: &crate::PhysiologyProfile) -> Self {
        let mut state = Self::new();
        for entry in &profile.neurotransmitters {
            state.set(&entry.name, entry.baseline);
        }
        state
    }

    /// Current level; absent names read as 1.0.
    pub fn get(&self, name: &str) -> f64 {
        self.levels
            .get(&normalize_name(name))
            .copied()
            .unwrap_or(NT_BASELINE)
    }

    /// Insert or overwrite a level, clamped to [0, 2].
    pub fn set(&mut self, name: &str, value: f64) {
        self.levels.insert(normalize_name(name), clamp_level(value));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.levels.contains_key(&normalize_name(name))
    }

    /// Add `delta` to a known level and clamp. Unknown names are left alone
    /// and reported as `false`.
    pub fn adjust(&mut self, name: &str, delta: f64) -> bool {
        match self.levels.get_mut(&normalize_name(name)) {
            Some(level) => {
                let delta = if delta.is_finite() { delta } else { 0.0 };
                *level = clamp_level(*level + delta);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.levels.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn serotonin(&self) -> f64 {
        self.get("serotonin")
    }

    pub fn dopamine(&self) -> f64 {
        self.get("dopamine")
    }

    pub fn norepinephrine(&self) -> f64 {
        self.get("norepinephrine")
    }

    pub fn cortisol(&self) -> f64 {
        self.get("cortisol")
    }

    pub fn gaba(&self) -> f64 {
        self.get("gaba")
    }

    pub fn substance_p(&self) -> f64 {
        self.get("substance_p")
    }
}

impl From<BTreeMap<String, f64>> for NeurotransmitterState {
    fn from(raw: BTreeMap<String, f64>) -> Self {
        let mut state = Self::new();
        for (name, value) in raw {
            state.set(&name, value);
        }
        state
    }
}

impl From<NeurotransmitterState> for BTreeMap<String, f64> {
    fn from(state: NeurotransmitterState) -> Self {
        state.levels
    }
}
