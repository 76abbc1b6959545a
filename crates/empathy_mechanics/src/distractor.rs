use crate::mechanic::{count_down, timer_reached, Action, Mechanic, MechanicEffects, TickContext};
use crate::state::SimulationState;
use empathy_core::DistractorConfig;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DistractorState {
    /// Seconds since the last spawn
    pub timer: f64,
    /// Remaining click-freeze seconds
    pub freeze: f64,
    pub frozen: bool,
    /// Spawn pulse, true for exactly one tick
    pub show: bool,
}

/// Spawns a distractor every `interval_secs`; clicking one freezes input.
/// The spawn timer keeps running while frozen.
pub struct Distractor {
    config: DistractorConfig,
    state: DistractorState,
}

impl Distractor {
    pub fn new(config: DistractorConfig) -> Self {
        Self {
            config,
            state: DistractorState::default(),
        }
    }

    pub fn state(&self) -> &DistractorState {
        &self.state
    }
}

impl Mechanic for Distractor {
    fn name(&self) -> &'static str {
        "distractor"
    }

    fn tick(&mut self, ctx: &mut TickContext<'_>) {
        self.state.timer += ctx.dt;

        if self.state.freeze > 0.0 {
            self.state.freeze = count_down(self.state.freeze, ctx.dt);
            self.state.frozen = true;
        } else {
            self.state.frozen = false;
        }

        if timer_reached(self.state.timer, self.config.interval_secs) {
            self.state.timer = 0.0;
            self.state.show = true;
            tracing::debug!("Distractor spawned");
        } else {
            self.state.show = false;
        }
    }

    fn handle(&mut self, action: &Action) -> bool {
        match action {
            Action::DistractorClicked => {
                self.state.freeze = self.config.freeze_secs.max(0.0);
                self.state.frozen = self.state.freeze > 0.0;
                tracing::debug!(freeze = self.state.freeze, "Distractor clicked");
                true
            }
            _ => false,
        }
    }

    fn contribute(&self, effects: &mut MechanicEffects) {
        effects.show_distractor = self.state.show;
        effects.freeze.distractor = self.state.frozen;
    }

    fn record(&self, state: &mut SimulationState) {
        state.distractor = Some(self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use empathy_core::NeurotransmitterState;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tick(d: &mut Distractor, dt: f64) -> MechanicEffects {
        let nt = NeurotransmitterState::new();
        let mut rng = StdRng::seed_from_u64(0);
        let mut ctx = TickContext {
            dt,
            nt: &nt,
            rng: &mut rng,
        };
        d.tick(&mut ctx);
        let mut effects = MechanicEffects::default();
        d.contribute(&mut effects);
        effects
    }

    #[test]
    fn test_spawn_is_a_pulse() {
        let mut d = Distractor::new(DistractorConfig::default());
        for i in 0..7 {
            assert!(!tick(&mut d, 1.0).show_distractor, "tick {}", i + 1);
        }
        assert!(tick(&mut d, 1.0).show_distractor);
        assert!(!tick(&mut d, 1.0).show_distractor);
        assert_eq!(d.state().timer, 1.0);
    }

    #[test]
    fn test_click_freezes_for_five_seconds() {
        let mut d = Distractor::new(DistractorConfig::default());
        assert!(d.handle(&Action::DistractorClicked));
        for i in 0..5 {
            assert!(tick(&mut d, 1.0).freeze.distractor, "tick {}", i + 1);
        }
        assert!(!tick(&mut d, 1.0).freeze.distractor);
    }

    #[test]
    fn test_timer_runs_while_frozen() {
        let mut d = Distractor::new(DistractorConfig::default());
        d.handle(&Action::DistractorClicked);
        let spawned = (0..8).filter(|_| tick(&mut d, 1.0).show_distractor).count();
        assert_eq!(spawned, 1);
    }

    #[test]
    fn test_frame_dt_timing_does_not_slip() {
        let mut d = Distractor::new(DistractorConfig::default());
        let pulses: Vec<usize> = (1..=240)
            .filter(|_| tick(&mut d, 0.1).show_distractor)
            .collect();
        assert_eq!(pulses, vec![80, 160, 240]);

        d.handle(&Action::DistractorClicked);
        let frozen = (0..60).filter(|_| tick(&mut d, 0.1).freeze.distractor).count();
        assert_eq!(frozen, 50);
    }

    #[test]
    fn test_custom_interval() {
        let cfg = DistractorConfig {
            interval_secs: 2.0,
            freeze_secs: 1.0,
        };
        let mut d = Distractor::new(cfg);
        let pulses: Vec<bool> = (0..6).map(|_| tick(&mut d, 1.0).show_distractor).collect();
        assert_eq!(pulses, vec![false, true, false, true, false, true]);
    }
}
