//! Physiology profiles: the static NT baselines of a condition.
//!
//! A profile is data handed to the engine by whoever picked the condition.
//! The engine reads names and baselines only.

use crate::neurotransmitter::{normalize_name, NT_BASELINE, NT_MAX, NT_MIN};
use serde::{Deserialize, Serialize};

/// One `(name, baseline)` pair of a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeurotransmitterBaseline {
    pub name: String,
    /// 0.0 - 2.0; 1.0 = healthy
    pub baseline: f64,
    /// Free-form physiological role, shown by consoles; ignored by the engine.
    #[serde(default)]
    pub role: String,
}

impl NeurotransmitterBaseline {
    pub fn new(name: impl Into<String>, baseline: f64) -> Self {
        Self {
            name: name.into(),
            baseline,
            role: String::new(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }
}

/// Ordered set of NT baselines for one condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysiologyProfile {
    pub condition_name: String,
    #[serde(default)]
    pub neurotransmitters: Vec<NeurotransmitterBaseline>,
}

impl PhysiologyProfile {
    pub fn new(condition_name: impl Into<String>) -> Self {
        Self {
            condition_name: condition_name.into(),
            neurotransmitters: Vec::new(),
        }
    }

    /// Builder-style append.
    pub fn with(mut self, name: impl Into<String>, baseline: f64) -> Self {
        self.neurotransmitters
            .push(NeurotransmitterBaseline::new(name, baseline));
        self
    }

    pub fn with_entry(mut self, entry: NeurotransmitterBaseline) -> Self {
        self.neurotransmitters.push(entry);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.neurotransmitters.is_empty()
    }

    /// Raw baseline for a name (normalized match). The last entry wins when a
    /// name repeats.
    pub fn baseline(&self, name: &str) -> Option<f64> {
        let key = normalize_name(name);
        self.neurotransmitters
            .iter()
            .rev()
            .find(|nt| normalize_name(&nt.name) == key)
            .map(|nt| nt.baseline)
    }

    /// Baseline clamped to [0, 2]; absent names read as 1.0.
    ///
    /// Out-of-range or non-finite baselines are clamped here and only ever
    /// reported through a warning.
    pub fn level(&self, name: &str) -> f64 {
        match self.baseline(name) {
            None => NT_BASELINE,
            Some(v) if !v.is_finite() => {
                tracing::warn!(
                    condition = %self.condition_name,
                    "Non-finite baseline for {}, reading as {}",
                    name,
                    NT_BASELINE
                );
                NT_BASELINE
            }
            Some(v) if !(NT_MIN..=NT_MAX).contains(&v) => {
                tracing::warn!(
                    condition = %self.condition_name,
                    "Baseline {} for {} outside [0, 2], clamping",
                    v,
                    name
                );
                v.clamp(NT_MIN, NT_MAX)
            }
            Some(v) => v,
        }
    }
}
