//! Regenerative stamina.
//!
//! The single place the regen/drain formula lives. Regen is recomputed from
//! the live NT vector each tick, so medication changes take effect on the
//! next frame without re-deriving parameters.
//!
//! | Activity | Cap                        | Below cap | At/above cap        |
//! |----------|----------------------------|-----------|---------------------|
//! | sleeping | `max_stamina`              | regen     | drain, floored at cap |
//! | resting  | `regen_cap * max_stamina`  | regen     | drain, floored at cap |
//! | active   | current stamina            | -         | drain               |

use crate::mechanic::{sanitize_secs, Mechanic, MechanicEffects, TickContext};
use crate::state::SimulationState;
use empathy_core::{gaba_gate, NeurotransmitterState, StaminaParameters};

/// Advance `stamina` by `dt` seconds. The result is always in
/// `[0, params.max_stamina]`; a non-finite or negative `dt` counts as 0.
pub fn tick_stamina(
    stamina: f64,
    nt: &NeurotransmitterState,
    params: &StaminaParameters,
    dt: f64,
    is_resting: bool,
    is_sleeping: bool,
) -> f64 {
    let mut stamina = if stamina.is_finite() {
        stamina
    } else {
        tracing::warn!("Non-finite stamina {}, resetting to 0", stamina);
        0.0
    };
    let dt = sanitize_secs(dt, "stamina dt");

    let live_regen =
        params.regen_rate * nt.serotonin() * gaba_gate(nt.gaba()) / nt.cortisol().max(0.5);

    let cap = if is_sleeping {
        params.max_stamina
    } else if is_resting {
        params.rest_ceiling()
    } else {
        stamina
    };

    if stamina < cap {
        stamina = (stamina + live_regen * dt).min(cap);
    } else if is_resting || is_sleeping {
        stamina = (stamina - params.drain_rate * dt).max(cap);
    } else {
        stamina -= params.drain_rate * dt;
    }

    if params.overshoot_penalty && nt.dopamine() > 1.5 && stamina > params.max_stamina {
        stamina -= (nt.dopamine() - 1.5) * 0.05 * dt;
    }

    stamina.clamp(0.0, params.max_stamina)
}

/// Always-on stamina subsystem. Owns the stamina scalar and the
/// resting/sleeping activity flags.
pub struct StaminaSubsystem {
    params: StaminaParameters,
    stamina: f64,
    resting: bool,
    sleeping: bool,
}

impl StaminaSubsystem {
    /// Starts full.
    pub fn new(params: StaminaParameters) -> Self {
        Self {
            params,
            stamina: params.max_stamina,
            resting: false,
            sleeping: false,
        }
    }

    pub fn stamina(&self) -> f64 {
        self.stamina
    }

    pub fn params(&self) -> &StaminaParameters {
        &self.params
    }
}

impl Mechanic for StaminaSubsystem {
    fn name(&self) -> &'static str {
        "stamina"
    }

    fn tick(&mut self, ctx: &mut TickContext<'_>) {
        self.stamina = tick_stamina(
            self.stamina,
            ctx.nt,
            &self.params,
            ctx.dt,
            self.resting,
            self.sleeping,
        );
    }

    fn handle(&mut self, action: &crate::Action) -> bool {
        match action {
            crate::Action::SetResting(on) => {
                self.resting = *on;
                true
            }
            crate::Action::SetSleeping(on) => {
                self.sleeping = *on;
                true
            }
            _ => false,
        }
    }

    fn contribute(&self, effects: &mut MechanicEffects) {
        effects.stamina = self.stamina;
        effects.rest_warning = self.params.needs_rest(self.stamina);
    }

    fn record(&self, state: &mut SimulationState) {
        state.stamina = self.stamina;
        state.max_stamina = self.params.max_stamina;
        state.resting = self.resting;
        state.sleeping = self.sleeping;
    }
}
