//! # Empathy Mechanics
//!
//! The per-tick runtime of a generated empathy game.
//!
//! ## Architecture
//!
//! A [`GameSession`] owns the live NT vector and an ordered list of
//! subsystems implementing [`Mechanic`]. Every tick, with one `dt`:
//! 1. Stamina regenerates or drains against the live NT levels
//! 2. Enabled subsystems advance in a fixed order (vital energy, mood,
//!    masking, flashback, distractor, alert)
//! 3. The [`SnapshotAssembler`] combines NT-driven base values with each
//!    subsystem's contribution into a [`GameplayParameterSnapshot`]
//!
//! All timers accumulate `dt`; nothing samples the wall clock. The alert
//! draw is the only randomness and comes from an injected RNG.
//!
//! [`SessionDriver`] is an optional tokio heartbeat that owns a session on a
//! background task.

pub mod alert;
pub mod distractor;
mod driver;
pub mod energy;
pub mod flashback;
mod heartbeat;
pub mod masking;
pub mod mechanic;
pub mod modifiers;
pub mod mood;
mod session;
pub mod snapshot;
pub mod stamina;
mod state;

pub use alert::{AlertState, ThreatAlert};
pub use distractor::{Distractor, DistractorState};
pub use driver::SessionDriver;
pub use energy::VitalEnergy;
pub use flashback::{Flashback, FlashbackState};
pub use heartbeat::HeartbeatConfig;
pub use masking::{Masking, MaskingState};
pub use mechanic::{
    Action, ColorOverride, FreezeSources, Mechanic, MechanicEffects, PhaseOverride, TickContext,
};
pub use modifiers::StaticModifier;
pub use mood::{MoodCycle, MoodPhase, MoodState, PHASES};
pub use session::GameSession;
pub use snapshot::{GameplayParameterSnapshot, SnapshotAssembler, SnapshotFlags};
pub use stamina::{tick_stamina, StaminaSubsystem};
pub use state::SimulationState;
