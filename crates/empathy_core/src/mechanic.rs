//! Mechanic kinds a generated game can compose.
//!
//! Stamina is always simulated and is not listed here. Everything else is
//! opt-in per game; the runtime ticks enabled mechanics in [`TICK_ORDER`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MechanicKind {
    /// Serotonin-driven energy bar; optionally drives colour saturation
    VitalEnergy,
    /// Static move/jump penalty
    HeavyMovement,
    /// Static reward multiplier penalty
    RewardBlunting,
    /// Displayed clock runs faster than real time
    TimeWarp,
    /// Mania / euthymia / depression / euthymia cycle
    MoodCycle,
    /// Masking meter that ends in a meltdown
    Masking,
    /// Externally-armed input lockout
    Flashback,
    /// Periodic distractor with a click-triggered freeze
    Distractor,
    /// Probabilistic false-positive threat alerts
    ThreatAlert,
}

/// Order in which stateful mechanics run each tick (after stamina).
/// Static modifiers are absent: they hold no state and only shape the
/// snapshot.
pub const TICK_ORDER: [MechanicKind; 6] = [
    MechanicKind::VitalEnergy,
    MechanicKind::MoodCycle,
    MechanicKind::Masking,
    MechanicKind::Flashback,
    MechanicKind::Distractor,
    MechanicKind::ThreatAlert,
];

impl MechanicKind {
    pub const ALL: [MechanicKind; 9] = [
        MechanicKind::VitalEnergy,
        MechanicKind::HeavyMovement,
        MechanicKind::RewardBlunting,
        MechanicKind::TimeWarp,
        MechanicKind::MoodCycle,
        MechanicKind::Masking,
        MechanicKind::Flashback,
        MechanicKind::Distractor,
        MechanicKind::ThreatAlert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MechanicKind::VitalEnergy => "vital_energy",
            MechanicKind::HeavyMovement => "heavy_movement",
            MechanicKind::RewardBlunting => "reward_blunting",
            MechanicKind::TimeWarp => "time_warp",
            MechanicKind::MoodCycle => "mood_cycle",
            MechanicKind::Masking => "masking",
            MechanicKind::Flashback => "flashback",
            MechanicKind::Distractor => "distractor",
            MechanicKind::ThreatAlert => "threat_alert",
        }
    }

    /// Whether this kind carries per-tick state.
    pub fn is_stateful(&self) -> bool {
        TICK_ORDER.contains(self)
    }
}

impl fmt::Display for MechanicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MechanicKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = crate::neurotransmitter::normalize_name(s).replace('-', "_");
        MechanicKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == key)
            .ok_or_else(|| format!("unknown mechanic '{}'", s))
    }
}
