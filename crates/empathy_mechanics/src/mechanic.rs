//! The capability every subsystem implements.
//!
//! A session holds an ordered list of `Box<dyn Mechanic>`; enabling a
//! mechanic is inclusion in that list. Each tick the session walks the list
//! in order, so later mechanics observe this tick's updates from earlier ones.
//! Afterwards every mechanic contributes its outputs to a fresh
//! [`MechanicEffects`], which the assembler turns into a snapshot.

use crate::state::SimulationState;
use empathy_core::{MedicationPreset, NeurotransmitterState};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Per-tick inputs shared by every mechanic.
pub struct TickContext<'a> {
    /// Seconds since the previous tick (already sanitized, >= 0)
    pub dt: f64,
    /// Live NT levels; read-only inside a tick
    pub nt: &'a NeurotransmitterState,
    /// Injected random source (only the alert draw uses it)
    pub rng: &'a mut dyn RngCore,
}

/// Session-scoped commands. Actions aimed at a mechanic that is not enabled
/// are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "value")]
pub enum Action {
    DismissAlert,
    ResetMeltdown,
    DistractorClicked,
    TriggerFlashback(f64),
    SetResting(bool),
    SetSleeping(bool),
    ApplyMedication(MedicationPreset),
    /// Console edit of a single NT level
    SetLevel(String, f64),
}

pub trait Mechanic: Send {
    /// Stable name for logs.
    fn name(&self) -> &'static str;

    /// Advance internal state by `ctx.dt`.
    fn tick(&mut self, ctx: &mut TickContext<'_>);

    /// React to an action. Returns `true` if the action was consumed.
    fn handle(&mut self, _action: &Action) -> bool {
        false
    }

    /// Write this mechanic's current outputs. Must not mutate state.
    fn contribute(&self, effects: &mut MechanicEffects);

    /// Copy internal state into the inspection view.
    fn record(&self, _state: &mut SimulationState) {}
}

/// What the mood phase does to the snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseOverride {
    pub move_mult: f64,
    pub jump_mult: f64,
    pub color: ColorOverride,
    pub energy: Option<f64>,
}

impl PhaseOverride {
    pub const NONE: PhaseOverride = PhaseOverride {
        move_mult: 1.0,
        jump_mult: 1.0,
        color: ColorOverride::Keep,
        energy: None,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorOverride {
    Keep,
    Replace(f64),
    Scale(f64),
}

/// Why input is frozen this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FreezeSources {
    pub meltdown: bool,
    pub flashback: bool,
    pub distractor: bool,
}

impl FreezeSources {
    pub fn any(&self) -> bool {
        self.meltdown || self.flashback || self.distractor
    }
}

/// Accumulated subsystem outputs for one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct MechanicEffects {
    pub stamina: f64,
    pub rest_warning: bool,
    pub energy: Option<f64>,
    pub energy_drives_saturation: bool,
    pub mood: Option<(crate::mood::MoodPhase, PhaseOverride)>,
    pub move_mult: f64,
    pub jump_mult: f64,
    pub reward_scale: f64,
    pub clock_speed: f64,
    pub show_alert: bool,
    pub dread: f64,
    pub meltdown: bool,
    pub screen_flash: bool,
    pub show_distractor: bool,
    pub freeze: FreezeSources,
}

impl Default for MechanicEffects {
    fn default() -> Self {
        Self {
            stamina: 0.0,
            rest_warning: false,
            energy: None,
            energy_drives_saturation: false,
            mood: None,
            move_mult: 1.0,
            jump_mult: 1.0,
            reward_scale: 1.0,
            clock_speed: 1.0,
            show_alert: false,
            dread: 0.0,
            meltdown: false,
            screen_flash: false,
            show_distractor: false,
            freeze: FreezeSources::default(),
        }
    }
}

/// Accumulated float error below this is ignored by every dt-driven timer.
pub(crate) const TIMER_EPSILON: f64 = 1e-9;

/// Whether an accumulated timer has reached `threshold`.
pub(crate) fn timer_reached(elapsed: f64, threshold: f64) -> bool {
    elapsed + TIMER_EPSILON >= threshold
}

/// Count a countdown down by `dt`, snapping leftovers below the epsilon to 0.
pub(crate) fn count_down(remaining: f64, dt: f64) -> f64 {
    let next = remaining - dt;
    if next <= TIMER_EPSILON {
        0.0
    } else {
        next
    }
}

/// Replace a non-finite or negative duration with zero.
pub(crate) fn sanitize_secs(value: f64, what: &str) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        tracing::warn!("Invalid {} {}, using 0", what, value);
        0.0
    }
}
