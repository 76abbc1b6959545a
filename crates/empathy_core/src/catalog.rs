//! Built-in reference conditions.
//!
//! The catalog is an owned value handed to whoever selects a condition; the
//! engine never consults it during a session. Callers can extend their own
//! copy with [`ConditionCatalog::define_condition`].

use crate::error::CatalogError;
use crate::mechanic::MechanicKind;
use crate::medication::MedicationPreset;
use crate::profile::{NeurotransmitterBaseline, PhysiologyProfile};
use crate::stamina::StaminaParameters;
use std::collections::BTreeMap;

/// One registered condition.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionEntry {
    pub key: String,
    pub profile: PhysiologyProfile,
    /// Mechanics enabled by default for this condition
    pub mechanics: Vec<MechanicKind>,
    pub medication: Option<MedicationPreset>,
}

impl ConditionEntry {
    pub fn stamina_parameters(&self) -> StaminaParameters {
        StaminaParameters::derive(&self.profile)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConditionCatalog {
    entries: BTreeMap<String, ConditionEntry>,
}

/// Catalog keys: lowercase with spaces as `_`.
fn catalog_key(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

impl ConditionCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The eight reference conditions.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();

        catalog.define_condition(
            "depression",
            PhysiologyProfile::new("Major Depressive Disorder")
                .with_entry(nt("Serotonin", 0.40, "mood/reward"))
                .with_entry(nt("Dopamine", 0.35, "motivation/pleasure"))
                .with_entry(nt("Norepinephrine", 0.45, "arousal/attention")),
            vec![
                MechanicKind::VitalEnergy,
                MechanicKind::HeavyMovement,
                MechanicKind::RewardBlunting,
            ],
            Some(
                MedicationPreset::new("SSRI/SNRI/bupropion")
                    .with("serotonin", 0.3)
                    .with("dopamine", 0.2)
                    .with("norepinephrine", 0.2),
            ),
        );

        catalog.define_condition(
            "adhd",
            PhysiologyProfile::new("Attention-Deficit/Hyperactivity Disorder")
                .with_entry(nt("Dopamine", 0.55, "salience/reward"))
                .with_entry(nt("Norepinephrine", 0.50, "executive function")),
            vec![MechanicKind::Distractor, MechanicKind::TimeWarp],
            Some(
                MedicationPreset::new("stimulant")
                    .with("dopamine", 0.3)
                    .with("norepinephrine", 0.25),
            ),
        );

        catalog.define_condition(
            "autism",
            PhysiologyProfile::new("Autism Spectrum Condition")
                .with_entry(nt("GABA", 0.60, "inhibition/filtering"))
                .with_entry(nt("Glutamate", 1.40, "excitation"))
                .with_entry(nt("Serotonin", 0.70, "social/routine")),
            vec![MechanicKind::Masking],
            Some(
                MedicationPreset::new("symptom-targeted")
                    .with("gaba", 0.3)
                    .with("glutamate", -0.2),
            ),
        );

        catalog.define_condition(
            "anxiety",
            PhysiologyProfile::new("Generalised Anxiety Disorder")
                .with_entry(nt("GABA", 0.45, "inhibition"))
                .with_entry(nt("Cortisol", 1.70, "stress response"))
                .with_entry(nt("Norepinephrine", 1.60, "fight-or-flight")),
            vec![MechanicKind::ThreatAlert],
            Some(
                MedicationPreset::new("SSRI/benzodiazepine")
                    .with("gaba", 0.4)
                    .with("cortisol", -0.5),
            ),
        );

        catalog.define_condition(
            "chronic_pain",
            PhysiologyProfile::new("Chronic Pain Syndrome")
                .with_entry(nt("Substance P", 1.80, "pain amplification"))
                .with_entry(nt("Endorphins", 0.30, "pain suppression"))
                .with_entry(nt("Serotonin", 0.50, "descending inhibition")),
            vec![],
            Some(
                MedicationPreset::new("SNRI/gabapentinoid")
                    .with("substance_p", -0.4)
                    .with("serotonin", 0.3)
                    .with("endorphins", 0.2),
            ),
        );

        catalog.define_condition(
            "ptsd",
            PhysiologyProfile::new("Post-Traumatic Stress Disorder")
                .with_entry(nt("Cortisol", 0.30, "HPA dysregulation"))
                .with_entry(nt("Norepinephrine", 1.80, "hyperarousal"))
                .with_entry(nt("Serotonin", 0.45, "mood/memory")),
            vec![MechanicKind::Flashback],
            Some(
                MedicationPreset::new("SSRI/prazosin")
                    .with("norepinephrine", -0.4)
                    .with("serotonin", 0.3),
            ),
        );

        catalog.define_condition(
            "schizophrenia",
            PhysiologyProfile::new("Schizophrenia")
                .with_entry(nt("Dopamine_mesolimbic", 1.90, "salience attribution"))
                .with_entry(nt("Dopamine_mesocortical", 0.40, "cognition"))
                .with_entry(nt("Glutamate_NMDA", 0.50, "reality testing")),
            vec![],
            Some(
                MedicationPreset::new("antipsychotic")
                    .with("dopamine_mesolimbic", -0.5)
                    .with("glutamate_nmda", 0.2),
            ),
        );

        catalog.define_condition(
            "bipolar",
            PhysiologyProfile::new("Bipolar I Disorder")
                .with_entry(nt("Dopamine", 1.9, "mania drive"))
                .with_entry(nt("Serotonin", 0.3, "mood"))
                .with_entry(nt("Glutamate", 1.5, "mania excitation")),
            vec![MechanicKind::MoodCycle],
            Some(
                MedicationPreset::new("lithium")
                    .with("dopamine", -0.5)
                    .with("serotonin", 0.3),
            ),
        );

        catalog
    }

    /// Register a new condition or replace an existing one.
    pub fn define_condition(
        &mut self,
        name: &str,
        profile: PhysiologyProfile,
        mechanics: Vec<MechanicKind>,
        medication: Option<MedicationPreset>,
    ) {
        let key = catalog_key(name);
        if self.entries.contains_key(&key) {
            tracing::debug!("Replacing condition '{}'", key);
        }
        self.entries.insert(
            key.clone(),
            ConditionEntry {
                key,
                profile,
                mechanics,
                medication,
            },
        );
    }

    pub fn get(&self, name: &str) -> Result<&ConditionEntry, CatalogError> {
        self.entries
            .get(&catalog_key(name))
            .ok_or_else(|| CatalogError::UnknownCondition {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    pub fn medication(&self, name: &str) -> Result<&MedicationPreset, CatalogError> {
        self.get(name)?
            .medication
            .as_ref()
            .ok_or_else(|| CatalogError::NoMedication(catalog_key(name)))
    }

    /// Sorted condition keys.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn nt(name: &str, baseline: f64, role: &str) -> NeurotransmitterBaseline {
    NeurotransmitterBaseline::new(name, baseline).with_role(role)
}
