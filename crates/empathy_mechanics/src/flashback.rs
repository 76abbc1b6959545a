use crate::mechanic::{count_down, sanitize_secs, Action, Mechanic, MechanicEffects, TickContext};
use crate::state::SimulationState;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FlashbackState {
    pub countdown: f64,
    pub active: bool,
}

/// Inert until armed by [`Action::TriggerFlashback`].
#[derive(Default)]
pub struct Flashback {
    state: FlashbackState,
}

impl Flashback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FlashbackState {
        &self.state
    }
}

impl Mechanic for Flashback {
    fn name(&self) -> &'static str {
        "flashback"
    }

    fn tick(&mut self, ctx: &mut TickContext<'_>) {
        if self.state.countdown > 0.0 {
            self.state.countdown = count_down(self.state.countdown, ctx.dt);
            self.state.active = true;
        } else if self.state.active {
            self.state.active = false;
            tracing::debug!("Flashback ended");
        }
    }

    fn handle(&mut self, action: &Action) -> bool {
        match action {
            Action::TriggerFlashback(seconds) => {
                let seconds = sanitize_secs(*seconds, "flashback duration");
                self.state.countdown = seconds;
                self.state.active = seconds > 0.0;
                tracing::debug!(seconds, "Flashback triggered");
                true
            }
            _ => false,
        }
    }

    fn contribute(&self, effects: &mut MechanicEffects) {
        effects.screen_flash = self.state.active;
        effects.freeze.flashback = self.state.active;
    }

    fn record(&self, state: &mut SimulationState) {
        state.flashback = Some(self.state);
    }
}
