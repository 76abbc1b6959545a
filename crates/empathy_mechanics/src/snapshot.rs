//! Per-tick gameplay parameters.
//!
//! The assembler is read-only: it combines the live NT levels with what the
//! subsystems contributed this tick and never writes back into either.
//!
//! Precedence, later wins:
//! 1. NT-driven base values
//! 2. vital energy replaces colour saturation (when enabled)
//! 3. static modifiers (heavy movement, reward blunting, time warp)
//! 4. mood phase multipliers and colour/energy overrides
//! 5. `input_frozen` = meltdown OR flashback OR distractor freeze

use crate::mechanic::{ColorOverride, MechanicEffects};
use crate::mood::MoodPhase;
use empathy_core::NeurotransmitterState;
use serde::Serialize;

pub const MIN_MOVE_SPEED: f64 = 40.0;
pub const BASE_MOVE_SPEED: f64 = 220.0;
pub const MIN_JUMP_SPEED: f64 = 200.0;
pub const BASE_JUMP_SPEED: f64 = 480.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SnapshotFlags {
    pub show_alert: bool,
    pub meltdown: bool,
    pub screen_flash: bool,
    pub show_distractor: bool,
    /// Stamina below the rest threshold
    pub rest_warning: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameplayParameterSnapshot {
    pub move_speed: f64,
    pub jump_speed: f64,
    pub reward_mult: f64,
    pub color_sat: f64,
    pub input_frozen: bool,
    pub stamina: f64,
    /// `None` when the mood cycle is not enabled
    pub mood_phase: Option<MoodPhase>,
    pub energy: f64,
    pub dread: f64,
    pub clock_speed: f64,
    pub flags: SnapshotFlags,
}

impl GameplayParameterSnapshot {
    pub fn mood_label(&self) -> Option<&'static str> {
        self.mood_phase.map(|p| p.label())
    }
}

pub struct SnapshotAssembler;

impl SnapshotAssembler {
    pub fn assemble(
        nt: &NeurotransmitterState,
        effects: &MechanicEffects,
    ) -> GameplayParameterSnapshot {
        let ne = nt.norepinephrine();
        let mut move_speed = (BASE_MOVE_SPEED * ne).max(MIN_MOVE_SPEED);
        let mut jump_speed = (BASE_JUMP_SPEED * ne.max(0.3)).max(MIN_JUMP_SPEED);
        let mut reward_mult = nt.dopamine();
        let mut color_sat = (nt.serotonin() + 0.15).min(1.0);
        let mut energy = effects.energy.unwrap_or(1.0);

        if effects.energy.is_some() && effects.energy_drives_saturation {
            color_sat = energy;
        }

        move_speed *= effects.move_mult;
        jump_speed *= effects.jump_mult;
        reward_mult *= effects.reward_scale;

        let mood_phase = effects.mood.map(|(phase, ov)| {
            move_speed *= ov.move_mult;
            jump_speed *= ov.jump_mult;
            match ov.color {
                ColorOverride::Keep => {}
                ColorOverride::Replace(v) => color_sat = v,
                ColorOverride::Scale(s) => color_sat *= s,
            }
            if let Some(e) = ov.energy {
                energy = e;
            }
            phase
        });

        GameplayParameterSnapshot {
            move_speed,
            jump_speed,
            reward_mult,
            color_sat,
            input_frozen: effects.freeze.any(),
            stamina: effects.stamina,
            mood_phase,
            energy,
            dread: effects.dread,
            clock_speed: effects.clock_speed,
            flags: SnapshotFlags {
                show_alert: effects.show_alert,
                meltdown: effects.meltdown,
                screen_flash: effects.screen_flash,
                show_distractor: effects.show_distractor,
                rest_warning: effects.rest_warning,
            },
        }
    }
}
