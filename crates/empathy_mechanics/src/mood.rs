use crate::mechanic::{
    timer_reached, ColorOverride, Mechanic, MechanicEffects, PhaseOverride, TickContext,
};
use crate::state::SimulationState;
use empathy_core::MoodConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodPhase {
    Mania,
    Euthymia,
    Depression,
}

impl MoodPhase {
    pub fn label(&self) -> &'static str {
        match self {
            MoodPhase::Mania => "mania",
            MoodPhase::Euthymia => "euthymia",
            MoodPhase::Depression => "depression",
        }
    }

    /// Snapshot effects of this phase.
    pub fn overrides(&self, config: &MoodConfig) -> PhaseOverride {
        match self {
            MoodPhase::Mania => PhaseOverride {
                move_mult: config.mania_move_mult,
                jump_mult: config.mania_jump_mult,
                color: ColorOverride::Replace(config.mania_color_sat),
                energy: Some(1.0),
            },
            MoodPhase::Depression => PhaseOverride {
                move_mult: config.depression_move_mult,
                jump_mult: 1.0,
                color: ColorOverride::Scale(config.depression_color_mult),
                energy: None,
            },
            MoodPhase::Euthymia => PhaseOverride::NONE,
        }
    }
}

impl fmt::Display for MoodPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The four-step cycle. Euthymia appears twice.
pub const PHASES: [MoodPhase; 4] = [
    MoodPhase::Mania,
    MoodPhase::Euthymia,
    MoodPhase::Depression,
    MoodPhase::Euthymia,
];

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MoodState {
    /// Index into [`PHASES`], always in 0..4
    pub phase_index: usize,
    pub phase_elapsed: f64,
}

impl MoodState {
    pub fn phase(&self) -> MoodPhase {
        PHASES[self.phase_index % PHASES.len()]
    }
}

pub struct MoodCycle {
    config: MoodConfig,
    state: MoodState,
}

impl MoodCycle {
    pub fn new(config: MoodConfig) -> Self {
        Self {
            config,
            state: MoodState::default(),
        }
    }

    pub fn state(&self) -> &MoodState {
        &self.state
    }
}

impl Mechanic for MoodCycle {
    fn name(&self) -> &'static str {
        "mood_cycle"
    }

    fn tick(&mut self, ctx: &mut TickContext<'_>) {
        self.state.phase_elapsed += ctx.dt;
        let duration = self.config.phase_durations[self.state.phase_index];
        // At most one phase per tick, even for a huge dt
        if timer_reached(self.state.phase_elapsed, duration) {
            self.state.phase_elapsed = 0.0;
            self.state.phase_index = (self.state.phase_index + 1) % PHASES.len();
            tracing::debug!("Mood phase advanced to {}", self.state.phase());
        }
    }

    fn contribute(&self, effects: &mut MechanicEffects) {
        let phase = self.state.phase();
        effects.mood = Some((phase, phase.overrides(&self.config)));
    }

    fn record(&self, state: &mut SimulationState) {
        state.mood = Some(self.state);
    }
}
