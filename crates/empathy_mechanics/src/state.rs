use crate::alert::AlertState;
use crate::distractor::DistractorState;
use crate::flashback::FlashbackState;
use crate::masking::MaskingState;
use crate::mood::MoodState;
use serde::Serialize;

/// Inspection view of a session's mutable state.
///
/// Built on demand by [`crate::GameSession::state`]; each subsystem fills in
/// its own part. A `None` sub-state means that mechanic is not enabled.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationState {
    pub stamina: f64,
    pub max_stamina: f64,
    pub resting: bool,
    pub sleeping: bool,
    /// Seconds of accumulated (sanitized) dt
    pub elapsed: f64,
    pub ticks: u64,
    pub energy: Option<f64>,
    pub mood: Option<MoodState>,
    pub masking: Option<MaskingState>,
    pub flashback: Option<FlashbackState>,
    pub distractor: Option<DistractorState>,
    pub alert: Option<AlertState>,
}
