use crate::mechanic::{Action, Mechanic, MechanicEffects, TickContext, TIMER_EPSILON};
use crate::state::SimulationState;
use empathy_core::MaskingConfig;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaskingState {
    pub meter: f64,
    pub meltdown: bool,
}

impl Default for MaskingState {
    fn default() -> Self {
        Self {
            meter: 1.0,
            meltdown: false,
        }
    }
}

/// Social masking meter. Decays monotonically; once empty the player melts
/// down and input stays frozen until an explicit reset.
pub struct Masking {
    config: MaskingConfig,
    state: MaskingState,
}

impl Masking {
    pub fn new(config: MaskingConfig) -> Self {
        Self {
            config,
            state: MaskingState::default(),
        }
    }

    pub fn state(&self) -> &MaskingState {
        &self.state
    }
}

impl Mechanic for Masking {
    fn name(&self) -> &'static str {
        "masking"
    }

    fn tick(&mut self, ctx: &mut TickContext<'_>) {
        let mut meter = self.state.meter - self.config.decay_per_sec * ctx.dt;
        if meter <= TIMER_EPSILON {
            meter = 0.0;
        }
        self.state.meter = meter.min(self.state.meter).max(0.0);

        if self.state.meter <= 0.0 && !self.state.meltdown {
            self.state.meltdown = true;
            tracing::debug!("Masking exhausted, meltdown");
        }
    }

    fn handle(&mut self, action: &Action) -> bool {
        match action {
            Action::ResetMeltdown => {
                self.state.meltdown = false;
                if self.config.reset_meter_on_recover {
                    self.state.meter = 1.0;
                }
                tracing::debug!(meter = self.state.meter, "Meltdown reset");
                true
            }
            _ => false,
        }
    }

    fn contribute(&self, effects: &mut MechanicEffects) {
        effects.meltdown = self.state.meltdown;
        effects.freeze.meltdown = self.state.meltdown;
    }

    fn record(&self, state: &mut SimulationState) {
        state.masking = Some(self.state);
    }
}
