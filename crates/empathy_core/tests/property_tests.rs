//! Property-based tests for empathy_core.
//!
//! Verifies that stamina parameter derivation stays within its documented
//! ranges for any profile, is deterministic, and that NT state never leaves
//! [0, 2] under arbitrary writes and medication.

use empathy_core::{
    apply_preset, MedicationPreset, NeurotransmitterState, PhysiologyProfile, StaminaParameters,
    NT_MAX, NT_MIN,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Baselines deliberately include out-of-range values: derivation must clamp.
fn arb_level() -> impl Strategy<Value = f64> {
    -1.0f64..=3.0
}

fn arb_profile() -> impl Strategy<Value = PhysiologyProfile> {
    (
        arb_level(),
        arb_level(),
        arb_level(),
        arb_level(),
        arb_level(),
        arb_level(),
    )
        .prop_map(|(serotonin, dopamine, ne, cortisol, gaba, substance_p)| {
            PhysiologyProfile::new("Arbitrary")
                .with("Serotonin", serotonin)
                .with("Dopamine", dopamine)
                .with("Norepinephrine", ne)
                .with("Cortisol", cortisol)
                .with("GABA", gaba)
                .with("Substance P", substance_p)
        })
}

fn arb_preset() -> impl Strategy<Value = MedicationPreset> {
    (-3.0f64..=3.0, -3.0f64..=3.0, -3.0f64..=3.0).prop_map(|(a, b, c)| {
        MedicationPreset::new("arbitrary")
            .with("serotonin", a)
            .with("cortisol", b)
            .with("endorphins", c)
    })
}

// ============================================================================
// Derivation Properties
// ============================================================================

proptest! {
    /// **Core invariant**: every derived parameter lies in its documented range.
    #[test]
    fn derived_parameters_always_in_bounds(profile in arb_profile()) {
        let p = StaminaParameters::derive(&profile);

        prop_assert!(p.max_stamina >= 0.3 && p.max_stamina <= 1.0,
            "max_stamina out of range: {}", p.max_stamina);
        prop_assert!(p.regen_rate >= 0.002, "regen_rate too low: {}", p.regen_rate);
        prop_assert!(p.drain_rate >= 0.0 && p.drain_rate <= 0.20,
            "drain_rate out of range: {}", p.drain_rate);
        prop_assert!(p.regen_cap >= 0.3 && p.regen_cap <= 1.0,
            "regen_cap out of range: {}", p.regen_cap);
        prop_assert!(p.rest_threshold >= 0.10, "rest_threshold too low: {}", p.rest_threshold);
        prop_assert!(p.serotonin_weight >= 0.0 && p.serotonin_weight <= 2.0);
        prop_assert!(p.severity() >= 0.0 && p.severity() <= 1.0);
    }

    /// **Determinism**: identical profiles give bit-identical parameters.
    #[test]
    fn derivation_is_deterministic(profile in arb_profile()) {
        let a = StaminaParameters::derive(&profile);
        let b = StaminaParameters::derive(&profile.clone());
        prop_assert_eq!(a.max_stamina.to_bits(), b.max_stamina.to_bits());
        prop_assert_eq!(a.regen_rate.to_bits(), b.regen_rate.to_bits());
        prop_assert_eq!(a.drain_rate.to_bits(), b.drain_rate.to_bits());
        prop_assert_eq!(a.regen_cap.to_bits(), b.regen_cap.to_bits());
        prop_assert_eq!(a.rest_threshold.to_bits(), b.rest_threshold.to_bits());
        prop_assert_eq!(a.overshoot_penalty, b.overshoot_penalty);
    }

    /// **Rounding**: values carry at most 3 (or 4) decimals.
    #[test]
    fn derivation_respects_rounding(profile in arb_profile()) {
        let p = StaminaParameters::derive(&profile);
        for v in [p.max_stamina, p.regen_cap, p.rest_threshold, p.serotonin_weight] {
            prop_assert!(((v * 1000.0).round() - v * 1000.0).abs() < 1e-6, "{} not 3dp", v);
        }
        for v in [p.regen_rate, p.drain_rate] {
            prop_assert!(((v * 10000.0).round() - v * 10000.0).abs() < 1e-6, "{} not 4dp", v);
        }
    }

    /// **Monotonicity**: more serotonin never lowers regen (all else equal).
    #[test]
    fn regen_monotonic_in_serotonin(lo in 0.0f64..=1.0, hi in 1.0f64..=2.0) {
        let p_lo = StaminaParameters::derive(&PhysiologyProfile::new("lo").with("Serotonin", lo));
        let p_hi = StaminaParameters::derive(&PhysiologyProfile::new("hi").with("Serotonin", hi));
        prop_assert!(p_hi.regen_rate >= p_lo.regen_rate);
        prop_assert!(p_hi.max_stamina >= p_lo.max_stamina);
    }
}

// ============================================================================
// NT State Properties
// ============================================================================

proptest! {
    /// Arbitrary writes never leave [0, 2].
    #[test]
    fn nt_state_writes_stay_clamped(values in prop::collection::vec(-10.0f64..10.0, 1..20)) {
        let mut state = NeurotransmitterState::new();
        for v in values {
            state.set("serotonin", v);
            prop_assert!(state.serotonin() >= NT_MIN && state.serotonin() <= NT_MAX);
        }
    }

    /// Repeated medication never leaves [0, 2] and never invents new names.
    #[test]
    fn medication_stays_clamped(presets in prop::collection::vec(arb_preset(), 1..10)) {
        let mut state = NeurotransmitterState::new();
        let names_before = state.len();
        for preset in &presets {
            apply_preset(&mut state, preset);
            for (_, level) in state.iter() {
                prop_assert!((NT_MIN..=NT_MAX).contains(&level), "level {} escaped", level);
            }
        }
        prop_assert_eq!(state.len(), names_before);
        prop_assert!(!state.contains("endorphins"));
    }
}

// ============================================================================
// Reference Examples
// ============================================================================

#[test]
fn depression_reference_values() {
    let profile = PhysiologyProfile::new("Major Depressive Disorder")
        .with("Serotonin", 0.40)
        .with("Dopamine", 0.35)
        .with("Norepinephrine", 0.45);
    let p = StaminaParameters::derive(&profile);
    assert_eq!(p.max_stamina, 0.910);
    assert_eq!(p.serotonin_weight, 0.400);
    assert_eq!(p.regen_rate, 0.0320);
    assert_eq!(p.drain_rate, 0.0100);
    assert_eq!(p.regen_cap, 0.940);
    assert_eq!(p.rest_threshold, 0.200);
    assert!(!p.overshoot_penalty);
}

#[test]
fn empty_profile_default_values() {
    let p = StaminaParameters::derive(&PhysiologyProfile::default());
    assert_eq!(p.max_stamina, 1.0);
    assert_eq!(p.regen_rate, 0.08);
    assert_eq!(p.drain_rate, 0.01);
    assert_eq!(p.regen_cap, 1.0);
    assert_eq!(p.serotonin_weight, 1.0);
    assert_eq!(p.rest_threshold, 0.25);
    assert!(!p.overshoot_penalty);
}
