use crate::mechanic::{Mechanic, MechanicEffects, TickContext};
use empathy_core::MechanicKind;

pub const HEAVY_MOVEMENT_MULT: f64 = 0.6;
pub const REWARD_BLUNTING_MULT: f64 = 0.5;
pub const TIME_WARP_CLOCK_SPEED: f64 = 3.0;

/// A stateless snapshot modifier (heavy movement, reward blunting, time
/// warp).
pub struct StaticModifier {
    kind: MechanicKind,
}

impl StaticModifier {
    /// `None` for kinds that carry state.
    pub fn new(kind: MechanicKind) -> Option<Self> {
        match kind {
            MechanicKind::HeavyMovement | MechanicKind::RewardBlunting | MechanicKind::TimeWarp => {
                Some(Self { kind })
            }
            _ => None,
        }
    }

    pub fn kind(&self) -> MechanicKind {
        self.kind
    }
}

impl Mechanic for StaticModifier {
    fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    fn tick(&mut self, _ctx: &mut TickContext<'_>) {}

    fn contribute(&self, effects: &mut MechanicEffects) {
        match self.kind {
            MechanicKind::HeavyMovement => {
                effects.move_mult *= HEAVY_MOVEMENT_MULT;
                effects.jump_mult *= HEAVY_MOVEMENT_MULT;
            }
            MechanicKind::RewardBlunting => effects.reward_scale *= REWARD_BLUNTING_MULT,
            MechanicKind::TimeWarp => effects.clock_speed = TIME_WARP_CLOCK_SPEED,
            _ => {}
        }
    }
}
