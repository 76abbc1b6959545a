//! Medication presets: named NT deltas applied to a live state.

use crate::neurotransmitter::{normalize_name, NeurotransmitterState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicationPreset {
    pub name: String,
    /// Normalized NT name -> delta
    #[serde(default)]
    pub deltas: BTreeMap<String, f64>,
}

impl MedicationPreset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            deltas: BTreeMap::new(),
        }
    }

    /// Builder-style delta. Repeated names accumulate.
    pub fn with(mut self, nt: &str, delta: f64) -> Self {
        *self.deltas.entry(normalize_name(nt)).or_insert(0.0) += delta;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }
}

/// `state[name] = clamp(state[name] + delta, 0, 2)` for every entry whose
/// name already exists in `state`; unknown names are skipped.
///
/// Returns the number of entries that were applied.
pub fn apply_preset(state: &mut NeurotransmitterState, preset: &MedicationPreset) -> usize {
    let mut applied = 0;
    for (name, delta) in &preset.deltas {
        if state.adjust(name, *delta) {
            applied += 1;
        } else {
            tracing::debug!(preset = %preset.name, "Skipping unknown neurotransmitter {}", name);
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_preset_clamps_and_skips_unknown() {
        let mut state = NeurotransmitterState::new();
        state.set("serotonin", 0.4);
        state.set("dopamine", 1.9);

        let preset = MedicationPreset::new("mixed")
            .with("Serotonin", 0.3)
            .with("dopamine", 0.5)
            .with("endorphins", 0.2);

        let applied = apply_preset(&mut state, &preset);
        assert_eq!(applied, 2);
        assert!((state.serotonin() - 0.7).abs() < 1e-12);
        assert_eq!(state.dopamine(), 2.0);
        assert!(!state.contains("endorphins"));
    }

    #[test]
    fn test_repeated_deltas_accumulate() {
        let preset = MedicationPreset::new("double")
            .with("gaba", 0.2)
            .with("GABA", 0.2);
        assert!((preset.deltas["gaba"] - 0.4).abs() < 1e-12);
    }
}
