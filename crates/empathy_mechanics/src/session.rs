//! One game session: the live NT vector, the ordered subsystem list and the
//! injected random source.
//!
//! ```text
//! tick(dt) ─► sanitize dt ─► stamina ─► vital_energy ─► mood ─► masking
//!                                  ─► flashback ─► distractor ─► alert
//!                                  ─► contribute ─► SnapshotAssembler
//! ```
//!
//! Sessions share nothing: two sessions built from the same condition have
//! independent state.

use crate::alert::ThreatAlert;
use crate::distractor::Distractor;
use crate::energy::VitalEnergy;
use crate::flashback::Flashback;
use crate::masking::Masking;
use crate::mechanic::{sanitize_secs, Action, Mechanic, MechanicEffects, TickContext};
use crate::modifiers::StaticModifier;
use crate::mood::MoodCycle;
use crate::snapshot::{GameplayParameterSnapshot, SnapshotAssembler};
use crate::stamina::StaminaSubsystem;
use crate::state::SimulationState;
use empathy_core::{
    apply_preset, ConditionEntry, EngineConfig, MechanicKind, MedicationPreset,
    NeurotransmitterState, StaminaParameters, TICK_ORDER,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use uuid::Uuid;

pub struct GameSession {
    id: Uuid,
    params: StaminaParameters,
    nt: NeurotransmitterState,
    /// Stamina first, then stateful mechanics in tick order, then static
    /// modifiers
    mechanics: Vec<Box<dyn Mechanic>>,
    enabled: Vec<MechanicKind>,
    rng: Box<dyn RngCore + Send>,
    elapsed: f64,
    ticks: u64,
}

impl GameSession {
    /// Session with default tuning and an entropy-seeded RNG.
    pub fn new(
        params: StaminaParameters,
        nt: NeurotransmitterState,
        mechanics: &[MechanicKind],
    ) -> Self {
        Self::with_config(params, nt, mechanics, &EngineConfig::default())
    }

    /// Session with explicit tuning. The RNG is seeded from
    /// `config.session.seed` when present.
    pub fn with_config(
        params: StaminaParameters,
        nt: NeurotransmitterState,
        mechanics: &[MechanicKind],
        config: &EngineConfig,
    ) -> Self {
        let rng: Box<dyn RngCore + Send> = match config.session.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_entropy()),
        };
        let enabled = canonical_order(mechanics);
        let id = Uuid::new_v4();

        tracing::info!(
            session = %id,
            mechanics = ?enabled,
            params = %params,
            "Game session created"
        );

        Self {
            id,
            params,
            nt,
            mechanics: build_mechanics(params, &enabled, config),
            enabled,
            rng,
            elapsed: 0.0,
            ticks: 0,
        }
    }

    /// Session for a catalog condition. `config.session.mechanics` replaces
    /// the condition's default mechanic list when set.
    pub fn from_condition(entry: &ConditionEntry, config: &EngineConfig) -> Self {
        let mechanics = config
            .session
            .mechanics
            .as_deref()
            .unwrap_or(entry.mechanics.as_slice());
        Self::with_config(
            entry.stamina_parameters(),
            NeurotransmitterState::from_profile(&entry.profile),
            mechanics,
            config,
        )
    }

    /// Replace the random source (tests, replays).
    pub fn with_rng<R: RngCore + Send + 'static>(mut self, rng: R) -> Self {
        self.rng = Box::new(rng);
        self
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advance every enabled subsystem by `dt` seconds and assemble the
    /// snapshot. Negative or non-finite `dt` counts as 0.
    pub fn tick(&mut self, dt: f64) -> GameplayParameterSnapshot {
        let dt = sanitize_secs(dt, "dt");

        let mut ctx = TickContext {
            dt,
            nt: &self.nt,
            rng: &mut *self.rng,
        };
        for mechanic in self.mechanics.iter_mut() {
            mechanic.tick(&mut ctx);
        }

        self.elapsed += dt;
        self.ticks += 1;

        let snapshot = self.current_snapshot();
        tracing::trace!(
            session = %self.id,
            tick = self.ticks,
            stamina = snapshot.stamina,
            frozen = snapshot.input_frozen,
            "Tick"
        );
        snapshot
    }

    /// Snapshot of the current state without advancing time.
    pub fn current_snapshot(&self) -> GameplayParameterSnapshot {
        SnapshotAssembler::assemble(&self.nt, &self.effects())
    }

    fn effects(&self) -> MechanicEffects {
        let mut effects = MechanicEffects::default();
        for mechanic in &self.mechanics {
            mechanic.contribute(&mut effects);
        }
        effects
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Route an action to its owner. Returns `false` when nothing consumed
    /// it (its mechanic is not enabled, or the NT name is unknown).
    pub fn dispatch(&mut self, action: Action) -> bool {
        match &action {
            Action::ApplyMedication(preset) => {
                self.apply_medication(preset);
                true
            }
            Action::SetLevel(name, value) => self.set_level(name, *value),
            _ => {
                let mut handled = false;
                for mechanic in self.mechanics.iter_mut() {
                    handled |= mechanic.handle(&action);
                }
                if !handled {
                    tracing::debug!(session = %self.id, ?action, "Action ignored, mechanic not enabled");
                }
                handled
            }
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.dispatch(Action::DismissAlert);
    }

    pub fn reset_meltdown(&mut self) {
        self.dispatch(Action::ResetMeltdown);
    }

    pub fn distractor_clicked(&mut self) {
        self.dispatch(Action::DistractorClicked);
    }

    pub fn trigger_flashback(&mut self, seconds: f64) {
        self.dispatch(Action::TriggerFlashback(seconds));
    }

    pub fn set_resting_mode(&mut self, on: bool) {
        self.dispatch(Action::SetResting(on));
    }

    pub fn set_sleeping_mode(&mut self, on: bool) {
        self.dispatch(Action::SetSleeping(on));
    }

    /// Returns how many NT levels changed.
    pub fn apply_medication(&mut self, preset: &MedicationPreset) -> usize {
        let applied = apply_preset(&mut self.nt, preset);
        tracing::info!(session = %self.id, preset = %preset.name, applied, "Medication applied");
        applied
    }

    /// Set one known NT level (clamped). Unknown names are ignored.
    pub fn set_level(&mut self, name: &str, value: f64) -> bool {
        if !self.nt.contains(name) {
            tracing::debug!(session = %self.id, name, "Unknown neurotransmitter");
            return false;
        }
        self.nt.set(name, value);
        true
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn params(&self) -> &StaminaParameters {
        &self.params
    }

    pub fn nt(&self) -> &NeurotransmitterState {
        &self.nt
    }

    /// Enabled mechanics in tick order (static modifiers last).
    pub fn enabled(&self) -> &[MechanicKind] {
        &self.enabled
    }

    pub fn is_enabled(&self, kind: MechanicKind) -> bool {
        self.enabled.contains(&kind)
    }

    pub fn stamina(&self) -> f64 {
        self.effects().stamina
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn state(&self) -> SimulationState {
        let mut state = SimulationState {
            elapsed: self.elapsed,
            ticks: self.ticks,
            ..SimulationState::default()
        };
        for mechanic in &self.mechanics {
            mechanic.record(&mut state);
        }
        state
    }
}

/// Dedup and sort into tick order, static modifiers after stateful ones.
fn canonical_order(kinds: &[MechanicKind]) -> Vec<MechanicKind> {
    let mut ordered: Vec<MechanicKind> = TICK_ORDER
        .iter()
        .copied()
        .filter(|k| kinds.contains(k))
        .collect();
    for kind in MechanicKind::ALL {
        if !kind.is_stateful() && kinds.contains(&kind) {
            ordered.push(kind);
        }
    }
    ordered
}

fn build_mechanics(
    params: StaminaParameters,
    enabled: &[MechanicKind],
    config: &EngineConfig,
) -> Vec<Box<dyn Mechanic>> {
    let mut mechanics: Vec<Box<dyn Mechanic>> = vec![Box::new(StaminaSubsystem::new(params))];
    for &kind in enabled {
        let mechanic: Box<dyn Mechanic> = match kind {
            MechanicKind::VitalEnergy => Box::new(VitalEnergy::new(config.energy.clone())),
            MechanicKind::MoodCycle => Box::new(MoodCycle::new(config.mood.clone())),
            MechanicKind::Masking => Box::new(Masking::new(config.masking.clone())),
            MechanicKind::Flashback => Box::new(Flashback::new()),
            MechanicKind::Distractor => Box::new(Distractor::new(config.distractor.clone())),
            MechanicKind::ThreatAlert => Box::new(ThreatAlert::new(config.alert.clone())),
            MechanicKind::HeavyMovement | MechanicKind::RewardBlunting | MechanicKind::TimeWarp => {
                match StaticModifier::new(kind) {
                    Some(m) => Box::new(m),
                    None => continue,
                }
            }
        };
        mechanics.push(mechanic);
    }
    mechanics
}
