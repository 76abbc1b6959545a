//! Stamina parameter derivation.
//!
//! Converts a static physiology profile into the immutable parameters of the
//! regenerative stamina model. Serotonin is the primary regen driver; the
//! other NTs shape the ceiling, the drain and the rest cap:
//!
//! - Norepinephrine (high) → faster drain
//! - Dopamine (high)       → overshoot penalty (mania)
//! - Cortisol (high)       → lower max, lower regen, hard rest cap
//! - GABA (low)            → rest "lands" less, regen gated down to 50%
//! - Substance P (high)    → lower max, faster drain

use crate::profile::PhysiologyProfile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Regen rate (stamina/s) at healthy serotonin.
pub const BASE_REGEN: f64 = 0.08;
/// Passive drain (stamina/s) for a healthy profile.
pub const BASE_DRAIN: f64 = 0.01;
/// Fraction of max recoverable without sleep, healthy.
pub const BASE_CAP: f64 = 1.0;

/// Immutable stamina model for one profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaminaParameters {
    /// Absolute ceiling, 0.3 - 1.0
    pub max_stamina: f64,
    /// Stamina/s regained below the cap, >= 0.002
    pub regen_rate: f64,
    /// Stamina/s lost at or above the cap, 0.0 - 0.20
    pub drain_rate: f64,
    /// Fraction of `max_stamina` reachable by resting (not sleeping), 0.3 - 1.0
    pub regen_cap: f64,
    pub serotonin_weight: f64,
    /// Below this the player gets a forced-rest warning, >= 0.10
    pub rest_threshold: f64,
    /// Mania: stamina above max decays under high dopamine
    pub overshoot_penalty: bool,
}

impl Default for StaminaParameters {
    fn default() -> Self {
        Self {
            max_stamina: 1.0,
            regen_rate: BASE_REGEN,
            drain_rate: BASE_DRAIN,
            regen_cap: BASE_CAP,
            serotonin_weight: 1.0,
            rest_threshold: 0.25,
            overshoot_penalty: false,
        }
    }
}

impl StaminaParameters {
    /// Derive parameters from a profile. Absent NTs read as 1.0, out-of-range
    /// baselines are clamped. An empty profile yields [`Default`].
    pub fn derive(profile: &PhysiologyProfile) -> Self {
        if profile.is_empty() {
            tracing::debug!(
                condition = %profile.condition_name,
                "Empty profile, using default stamina parameters"
            );
            return Self::default();
        }

        let serotonin = profile.level("serotonin");
        let dopamine = profile.level("dopamine");
        let norepinephrine = profile.level("norepinephrine");
        let cortisol = profile.level("cortisol");
        let gaba = profile.level("gaba");
        let substance_p = profile.level("substance_p");

        let serotonin_weight = round_to(serotonin, 3);
        let gaba_gate = gaba_gate(gaba);

        let max_stamina = round_to(
            (1.0 - 0.15 * (1.0 - serotonin)
                - 0.10 * (cortisol - 1.0).max(0.0)
                - 0.20 * (substance_p - 1.0).max(0.0))
            .clamp(0.3, 1.0),
            3,
        );

        let regen_rate = round_to(
            (BASE_REGEN * serotonin_weight * gaba_gate / cortisol.max(0.5)).max(0.002),
            4,
        );

        let drain_rate = round_to(
            (BASE_DRAIN
                + 0.015 * (norepinephrine - 1.0).max(0.0)
                + 0.020 * (substance_p - 1.0).max(0.0)
                + 0.005 * (cortisol - 1.0).max(0.0))
            .min(0.20),
            4,
        );

        let regen_cap = round_to(
            (BASE_CAP
                - 0.30 * (cortisol - 1.0).max(0.0)
                - 0.15 * (1.0 - gaba)
                - 0.10 * (1.0 - serotonin))
                .clamp(0.30, 1.0),
            3,
        );

        let rest_threshold = round_to((0.25 * (1.0 - serotonin * 0.5)).max(0.10), 3);

        let params = Self {
            max_stamina,
            regen_rate,
            drain_rate,
            regen_cap,
            serotonin_weight,
            rest_threshold,
            overshoot_penalty: dopamine > 1.5,
        };
        tracing::trace!(condition = %profile.condition_name, ?params, "Derived stamina parameters");
        params
    }

    /// Highest stamina reachable by resting without a sleep checkpoint.
    pub fn rest_ceiling(&self) -> f64 {
        self.regen_cap * self.max_stamina
    }

    /// 0 = healthy regen, 1 = severest.
    pub fn severity(&self) -> f64 {
        round_to(1.0 - self.regen_rate / BASE_REGEN, 2).clamp(0.0, 1.0)
    }

    pub fn needs_rest(&self, stamina: f64) -> bool {
        stamina < self.rest_threshold
    }

    /// Human-readable formula for consoles and generated docs.
    pub fn formula(&self) -> String {
        let mut text = format!(
            "stamina += ({:.4} * serotonin_ratio - {:.4}) * dt\n  \
             where serotonin_ratio = NT['serotonin'] / 1.0  (healthy baseline)\n  \
             regen blocked above cap={:.2} unless sleep checkpoint reached\n  \
             max_stamina={:.2}  rest_threshold={:.2}",
            self.regen_rate, self.drain_rate, self.regen_cap, self.max_stamina, self.rest_threshold,
        );
        if self.overshoot_penalty {
            text.push_str("\n  MANIA: stamina decays if > max_stamina (overshoot penalty active)");
        }
        text
    }
}

impl From<&PhysiologyProfile> for StaminaParameters {
    fn from(profile: &PhysiologyProfile) -> Self {
        Self::derive(profile)
    }
}

impl fmt::Display for StaminaParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "max={:.3} regen={:.4}/s drain={:.4}/s cap={:.0}% rest<{:.3}{}",
            self.max_stamina,
            self.regen_rate,
            self.drain_rate,
            self.regen_cap * 100.0,
            self.rest_threshold,
            if self.overshoot_penalty { " [overshoot]" } else { "" },
        )
    }
}

/// GABA gate on regen: 0.5 (no inhibition) to 1.0 (healthy or above).
pub fn gaba_gate(gaba: f64) -> f64 {
    0.5 + 0.5 * gaba.min(1.0)
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depression() -> PhysiologyProfile {
        PhysiologyProfile::new("Major Depressive Disorder")
            .with("Serotonin", 0.40)
            .with("Dopamine", 0.35)
            .with("Norepinephrine", 0.45)
    }

    #[test]
    fn test_depression_parameters() {
        let p = StaminaParameters::derive(&depression());
        assert_eq!(p.max_stamina, 0.91);
        assert_eq!(p.serotonin_weight, 0.4);
        assert_eq!(p.regen_rate, 0.032);
        assert_eq!(p.drain_rate, 0.01);
        assert_eq!(p.regen_cap, 0.94);
        assert_eq!(p.rest_threshold, 0.2);
        assert!(!p.overshoot_penalty);
    }

    #[test]
    fn test_bipolar_overshoot() {
        let bipolar = PhysiologyProfile::new("Bipolar I Disorder")
            .with("Dopamine", 1.9)
            .with("Serotonin", 0.3)
            .with("Glutamate", 1.5);
        assert!(StaminaParameters::derive(&bipolar).overshoot_penalty);
    }

    #[test]
    fn test_empty_profile_uses_default() {
        let p = StaminaParameters::derive(&PhysiologyProfile::new("Nothing"));
        assert_eq!(p, StaminaParameters::default());
        assert_eq!(p.rest_threshold, 0.25);
        assert_eq!(p.regen_rate, 0.08);
    }

    #[test]
    fn test_anxiety_cortisol_caps_rest() {
        let anxiety = PhysiologyProfile::new("Generalised Anxiety Disorder")
            .with("GABA", 0.45)
            .with("Cortisol", 1.70)
            .with("Norepinephrine", 1.60);
        let p = StaminaParameters::derive(&anxiety);
        // 1 - 0.30*0.7 - 0.15*0.55 = 0.7075 (serotonin at baseline)
        assert!((p.regen_cap - 0.7075).abs() < 0.0006, "regen_cap={}", p.regen_cap);
        // 0.01 + 0.015*0.6 + 0.005*0.7 = 0.0225
        assert!((p.drain_rate - 0.0225).abs() < 1e-9, "drain_rate={}", p.drain_rate);
        assert!(p.regen_rate < BASE_REGEN);
    }

    #[test]
    fn test_clamps_hold_at_extremes() {
        let worst = PhysiologyProfile::new("Worst")
            .with("Serotonin", 0.0)
            .with("Cortisol", 2.0)
            .with("Substance P", 2.0)
            .with("Norepinephrine", 2.0)
            .with("GABA", 0.0);
        let p = StaminaParameters::derive(&worst);
        assert!(p.max_stamina >= 0.3 && p.max_stamina <= 1.0);
        assert!(p.regen_cap >= 0.3 && p.regen_cap <= 1.0);
        assert!(p.regen_rate >= 0.002);
        assert!(p.drain_rate <= 0.20);
        assert!(p.rest_threshold >= 0.10);
    }

    #[test]
    fn test_out_of_range_baselines_are_clamped() {
        let wild = PhysiologyProfile::new("Wild").with("Serotonin", 9.0);
        let capped = PhysiologyProfile::new("Capped").with("Serotonin", 2.0);
        assert_eq!(
            StaminaParameters::derive(&wild),
            StaminaParameters::derive(&capped)
        );
    }

    #[test]
    fn test_severity() {
        assert_eq!(StaminaParameters::default().severity(), 0.0);
        let p = StaminaParameters::derive(&depression());
        assert!((p.severity() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_formula_mentions_mania_only_with_overshoot() {
        let mut p = StaminaParameters::default();
        assert!(!p.formula().contains("MANIA"));
        p.overshoot_penalty = true;
        assert!(p.formula().contains("MANIA"));
        assert!(p.formula().starts_with("stamina += (0.0800"));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.12346, 4), 0.1235);
        assert_eq!(round_to(0.9099999999, 3), 0.91);
    }
}
