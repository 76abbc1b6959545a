//! # Empathy Core
//!
//! Data model and pure derivations for neurotransmitter-driven empathy games.
//!
//! A condition is described by a [`PhysiologyProfile`] (NT baselines, where
//! 1.0 is healthy). From it the engine derives immutable
//! [`StaminaParameters`] once per generated game, and seeds the live
//! [`NeurotransmitterState`] a session mutates with medication.
//!
//! Nothing here holds process-wide state: the [`ConditionCatalog`] is a plain
//! value owned by whoever picks the condition.

pub mod catalog;
pub mod config;
pub mod error;
pub mod mechanic;
pub mod medication;
pub mod neurotransmitter;
pub mod profile;
pub mod stamina;

pub use catalog::{ConditionCatalog, ConditionEntry};
pub use config::{
    AlertConfig, DistractorConfig, EnergyConfig, EngineConfig, MaskingConfig, MoodConfig,
    SessionConfig,
};
pub use error::CatalogError;
pub use mechanic::{MechanicKind, TICK_ORDER};
pub use medication::{apply_preset, MedicationPreset};
pub use neurotransmitter::{
    clamp_level, normalize_name, NeurotransmitterState, BUILTIN_NEUROTRANSMITTERS, NT_BASELINE,
    NT_MAX, NT_MIN,
};
pub use profile::{NeurotransmitterBaseline, PhysiologyProfile};
pub use stamina::{gaba_gate, round_to, StaminaParameters};
