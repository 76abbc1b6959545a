//! Vital energy: a serotonin-driven meter that only ever drains.

use crate::mechanic::{Mechanic, MechanicEffects, TickContext};
use crate::state::SimulationState;
use empathy_core::EnergyConfig;

pub struct VitalEnergy {
    config: EnergyConfig,
    energy: f64,
}

impl VitalEnergy {
    pub fn new(config: EnergyConfig) -> Self {
        Self {
            config,
            energy: 1.0,
        }
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Energy lost per second at the given serotonin level.
    pub fn drain_per_sec(&self, serotonin: f64) -> f64 {
        (0.8 / serotonin.max(self.config.serotonin_floor)) * self.config.drain_factor
    }
}

impl Mechanic for VitalEnergy {
    fn name(&self) -> &'static str {
        "vital_energy"
    }

    fn tick(&mut self, ctx: &mut TickContext<'_>) {
        let drain = self.drain_per_sec(ctx.nt.serotonin()) * ctx.dt;
        self.energy = (self.energy - drain).clamp(0.0, 1.0);
        tracing::trace!(energy = self.energy, drain, "Vital energy tick");
    }

    fn contribute(&self, effects: &mut MechanicEffects) {
        effects.energy = Some(self.energy);
        effects.energy_drives_saturation = self.config.drives_saturation;
    }

    fn record(&self, state: &mut SimulationState) {
        state.energy = Some(self.energy);
    }
}
