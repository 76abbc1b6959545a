use crate::mechanic::MechanicKind;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

// ============================================================================
// Top-level config
// ============================================================================

/// Tuning for every mechanic plus session-level options.
///
/// All sections are optional in TOML; anything missing keeps the reference
/// values of the reference game design.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub session: SessionConfig,
    pub energy: EnergyConfig,
    pub mood: MoodConfig,
    pub alert: AlertConfig,
    pub masking: MaskingConfig,
    pub distractor: DistractorConfig,
}

impl EngineConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config = Self::from_toml(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if the file doesn't exist or is invalid, return
    /// defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({:#}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    /// Parse without touching the environment.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse TOML config")
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("EMPATHY_SEED") {
            if let Ok(n) = v.parse() {
                self.session.seed = Some(n);
            }
        }
        if let Ok(v) = std::env::var("EMPATHY_TICK_MS") {
            if let Ok(n) = v.parse() {
                self.session.tick_interval_ms = n;
            }
        }
        if let Ok(v) = std::env::var("EMPATHY_MECHANICS") {
            let mut kinds = Vec::new();
            for part in v.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                match part.parse::<MechanicKind>() {
                    Ok(kind) => kinds.push(kind),
                    Err(e) => tracing::warn!("Ignoring EMPATHY_MECHANICS entry: {}", e),
                }
            }
            self.session.mechanics = Some(kinds);
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seed for the alert RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Explicit mechanic list; `None` uses the condition's defaults.
    pub mechanics: Option<Vec<MechanicKind>>,
    /// Heartbeat period for the async driver (~60 FPS by default).
    pub tick_interval_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            mechanics: None,
            tick_interval_ms: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    /// Energy/s lost per unit of `0.8 / serotonin`
    pub drain_factor: f64,
    pub serotonin_floor: f64,
    /// Energy replaces the base colour saturation (desaturation mechanic)
    pub drives_saturation: bool,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            drain_factor: 0.008,
            serotonin_floor: 0.01,
            drives_saturation: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MoodConfig {
    /// Seconds spent in mania, euthymia, depression, euthymia
    pub phase_durations: [f64; 4],
    pub mania_move_mult: f64,
    pub mania_jump_mult: f64,
    pub mania_color_sat: f64,
    pub depression_move_mult: f64,
    pub depression_color_mult: f64,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            phase_durations: [60.0, 30.0, 90.0, 30.0],
            mania_move_mult: 3.0,
            mania_jump_mult: 2.0,
            mania_color_sat: 2.0,
            depression_move_mult: 0.4,
            depression_color_mult: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub interval_secs: f64,
    /// Trigger probability per unit of norepinephrine
    pub probability_per_ne: f64,
    /// Dread/s accumulated while an alert is showing
    pub dread_rate: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            interval_secs: 15.0,
            probability_per_ne: 0.25,
            dread_rate: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MaskingConfig {
    pub decay_per_sec: f64,
    /// Recovering from a meltdown also refills the meter
    pub reset_meter_on_recover: bool,
}

impl Default for MaskingConfig {
    fn default() -> Self {
        Self {
            decay_per_sec: 0.002,
            reset_meter_on_recover: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DistractorConfig {
    pub interval_secs: f64,
    pub freeze_secs: f64,
}

impl Default for DistractorConfig {
    fn default() -> Self {
        Self {
            interval_secs: 8.0,
            freeze_secs: 5.0,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.mood.phase_durations, [60.0, 30.0, 90.0, 30.0]);
        assert_eq!(cfg.alert.interval_secs, 15.0);
        assert_eq!(cfg.masking.decay_per_sec, 0.002);
        assert_eq!(cfg.distractor.freeze_secs, 5.0);
        assert!(cfg.session.seed.is_none());
        assert!(cfg.session.mechanics.is_none());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
[alert]
interval_secs = 5.0
"#;
        let cfg = EngineConfig::from_toml(toml_str).unwrap();
        assert_eq!(cfg.alert.interval_secs, 5.0);
        // Defaults for unspecified fields
        assert_eq!(cfg.alert.probability_per_ne, 0.25);
        assert_eq!(cfg.distractor.interval_secs, 8.0);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[session]
seed = 42
mechanics = ["mood_cycle", "threat_alert"]
tick_interval_ms = 33

[energy]
drain_factor = 0.01
drives_saturation = false

[mood]
phase_durations = [10.0, 5.0, 10.0, 5.0]
mania_move_mult = 2.5

[alert]
interval_secs = 10.0
probability_per_ne = 0.5
dread_rate = 0.1

[masking]
decay_per_sec = 0.01
reset_meter_on_recover = false

[distractor]
interval_secs = 4.0
freeze_secs = 2.0
"#;
        let cfg = EngineConfig::from_toml(toml_str).unwrap();
        assert_eq!(cfg.session.seed, Some(42));
        assert_eq!(
            cfg.session.mechanics,
            Some(vec![MechanicKind::MoodCycle, MechanicKind::ThreatAlert])
        );
        assert_eq!(cfg.session.tick_interval_ms, 33);
        assert!(!cfg.energy.drives_saturation);
        assert_eq!(cfg.mood.phase_durations, [10.0, 5.0, 10.0, 5.0]);
        assert_eq!(cfg.mood.mania_move_mult, 2.5);
        assert_eq!(cfg.mood.mania_jump_mult, 2.0);
        assert_eq!(cfg.alert.probability_per_ne, 0.5);
        assert!(!cfg.masking.reset_meter_on_recover);
        assert_eq!(cfg.distractor.freeze_secs, 2.0);
    }

    #[test]
    fn test_unknown_mechanic_is_a_parse_error() {
        let toml_str = r#"
[session]
mechanics = ["juggling"]
"#;
        assert!(EngineConfig::from_toml(toml_str).is_err());
    }

    #[test]
    fn test_env_overrides_and_defaults() {
        // Part 1: env overrides
        std::env::set_var("EMPATHY_SEED", "7");
        std::env::set_var("EMPATHY_MECHANICS", "masking, flashback, juggling");

        let mut cfg = EngineConfig::default();
        cfg.apply_env_overrides();

        assert_eq!(cfg.session.seed, Some(7));
        assert_eq!(
            cfg.session.mechanics,
            Some(vec![MechanicKind::Masking, MechanicKind::Flashback])
        );

        // Clean up env vars before testing defaults
        std::env::remove_var("EMPATHY_SEED");
        std::env::remove_var("EMPATHY_MECHANICS");

        // Part 2: nonexistent path returns defaults (no env interference)
        let cfg = EngineConfig::load_or_default("/nonexistent/empathy.toml");
        assert_eq!(cfg, EngineConfig::default());
    }
}
