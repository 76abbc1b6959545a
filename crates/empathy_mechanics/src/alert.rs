//! False-positive threat alerts.
//!
//! Every `interval_secs` of accumulated time the subsystem draws once
//! against `probability_per_ne * norepinephrine`. A hit raises an alert
//! that stays up until dismissed; dread builds while it is showing and is
//! kept after dismissal.

use crate::mechanic::{timer_reached, Action, Mechanic, MechanicEffects, TickContext};
use crate::state::SimulationState;
use empathy_core::AlertConfig;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AlertState {
    pub timer: f64,
    pub active: bool,
    pub dread: f64,
}

pub struct ThreatAlert {
    config: AlertConfig,
    state: AlertState,
}

impl ThreatAlert {
    pub fn new(config: AlertConfig) -> Self {
        Self {
            config,
            state: AlertState::default(),
        }
    }

    pub fn state(&self) -> &AlertState {
        &self.state
    }

    /// Probability that a draw raises an alert at this NE level.
    pub fn trigger_probability(&self, norepinephrine: f64) -> f64 {
        (self.config.probability_per_ne * norepinephrine).clamp(0.0, 1.0)
    }
}

impl Mechanic for ThreatAlert {
    fn name(&self) -> &'static str {
        "threat_alert"
    }

    fn tick(&mut self, ctx: &mut TickContext<'_>) {
        self.state.timer += ctx.dt;
        if timer_reached(self.state.timer, self.config.interval_secs) {
            self.state.timer = 0.0;
            let p = self.trigger_probability(ctx.nt.norepinephrine());
            let draw: f64 = ctx.rng.gen();
            if draw < p {
                if !self.state.active {
                    tracing::debug!(p, draw, "Threat alert raised");
                }
                self.state.active = true;
            } else {
                tracing::trace!(p, draw, "Threat alert draw missed");
            }
        }

        if self.state.active {
            self.state.dread = (self.state.dread + self.config.dread_rate * ctx.dt).min(1.0);
        }
    }

    fn handle(&mut self, action: &Action) -> bool {
        match action {
            Action::DismissAlert => {
                self.state.active = false;
                true
            }
            _ => false,
        }
    }

    fn contribute(&self, effects: &mut MechanicEffects) {
        effects.show_alert = self.state.active;
        effects.dread = self.state.dread;
    }

    fn record(&self, state: &mut SimulationState) {
        state.alert = Some(self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use empathy_core::NeurotransmitterState;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    fn tick(a: &mut ThreatAlert, nt: &NeurotransmitterState, rng: &mut dyn RngCore, dt: f64) {
        let mut ctx = TickContext { dt, nt, rng };
        a.tick(&mut ctx);
    }

    #[test]
    fn test_no_draw_before_interval() {
        let mut a = ThreatAlert::new(AlertConfig::default());
        // StepRng(0, 0) always draws 0.0, which hits any p > 0
        let mut rng = StepRng::new(0, 0);
        let nt = NeurotransmitterState::new();
        for _ in 0..14 {
            tick(&mut a, &nt, &mut rng, 1.0);
        }
        assert!(!a.state().active);
        tick(&mut a, &nt, &mut rng, 1.0);
        assert!(a.state().active);
        assert_eq!(a.state().timer, 0.0);
    }

    #[test]
    fn test_draws_on_schedule_at_frame_dt() {
        let mut a = ThreatAlert::new(AlertConfig::default());
        let mut rng = StepRng::new(0, 0);
        let nt = NeurotransmitterState::new();
        let mut raised = Vec::new();
        for i in 1..=450 {
            tick(&mut a, &nt, &mut rng, 0.1);
            if a.state().active {
                raised.push(i);
                a.handle(&Action::DismissAlert);
            }
        }
        assert_eq!(raised, vec![150, 300, 450]);
    }

    #[test]
    fn test_zero_norepinephrine_never_fires() {
        let mut a = ThreatAlert::new(AlertConfig::default());
        let mut rng = StepRng::new(0, 0);
        let mut nt = NeurotransmitterState::new();
        nt.set("norepinephrine", 0.0);
        for _ in 0..100 {
            tick(&mut a, &nt, &mut rng, 15.0);
        }
        assert!(!a.state().active);
        assert_eq!(a.state().dread, 0.0);
    }

    #[test]
    fn test_high_norepinephrine_always_fires() {
        let a = ThreatAlert::new(AlertConfig::default());
        assert_eq!(a.trigger_probability(2.0), 0.5);
        let cfg = AlertConfig {
            probability_per_ne: 1.0,
            ..AlertConfig::default()
        };
        let mut a = ThreatAlert::new(cfg);
        assert_eq!(a.trigger_probability(2.0), 1.0);
        let mut rng = StdRng::seed_from_u64(99);
        let mut nt = NeurotransmitterState::new();
        nt.set("norepinephrine", 2.0);
        tick(&mut a, &nt, &mut rng, 15.0);
        assert!(a.state().active);
    }

    #[test]
    fn test_dread_accumulates_and_survives_dismiss() {
        let mut a = ThreatAlert::new(AlertConfig::default());
        let mut rng = StepRng::new(0, 0);
        let nt = NeurotransmitterState::new();
        tick(&mut a, &nt, &mut rng, 15.0);
        assert!(a.state().active);
        // Raised on this tick: 0.05 * 15
        assert!((a.state().dread - 0.75).abs() < 1e-12);
        tick(&mut a, &nt, &mut rng, 10.0);
        assert_eq!(a.state().dread, 1.0);

        assert!(a.handle(&Action::DismissAlert));
        assert!(!a.state().active);
        assert_eq!(a.state().dread, 1.0);

        let mut effects = MechanicEffects::default();
        a.contribute(&mut effects);
        assert!(!effects.show_alert);
        assert_eq!(effects.dread, 1.0);
    }

    #[test]
    fn test_seeded_sequence_is_reproducible() {
        let nt = NeurotransmitterState::new();
        let run = |seed: u64| {
            let mut a = ThreatAlert::new(AlertConfig::default());
            let mut rng = StdRng::seed_from_u64(seed);
            let mut fired = Vec::new();
            for _ in 0..40 {
                tick(&mut a, &nt, &mut rng, 15.0);
                fired.push(a.state().active);
                a.handle(&Action::DismissAlert);
            }
            fired
        };
        assert_eq!(run(7), run(7));
    }
}
