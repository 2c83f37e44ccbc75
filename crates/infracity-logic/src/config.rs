//! Generation parameters: population targets, landmark spacing, naming.
//!
//! ```
//! use infracity_logic::config::{validate_config, CityConfig};
//!
//! let mut config = CityConfig::default();
//! config.seed = Some(7);
//! assert!(validate_config(&config).is_empty());
//! ```

use crate::model::{Env, Tier};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest per-tier population accepted by [`validate_config`].
pub const MAX_TIER_POPULATION: u32 = 1000;

/// Number of buildings of each tier in one environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TierCounts {
    pub skyscrapers: u32,
    pub mid_rises: u32,
}

impl TierCounts {
    pub const fn new(skyscrapers: u32, mid_rises: u32) -> Self {
        Self {
            skyscrapers,
            mid_rises,
        }
    }

    pub fn get(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Skyscraper => self.skyscrapers,
            Tier::MidRise => self.mid_rises,
        }
    }

    pub fn total(&self) -> u32 {
        self.skyscrapers + self.mid_rises
    }
}

/// Population targets per environment. DR only uses `mid_rises`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationTargets {
    pub prod: TierCounts,
    pub dev: TierCounts,
    pub qa: TierCounts,
    pub dr: TierCounts,
}

impl Default for PopulationTargets {
    fn default() -> Self {
        Self {
            prod: TierCounts::new(10, 40),
            dev: TierCounts::new(10, 25),
            qa: TierCounts::new(5, 10),
            dr: TierCounts::new(0, 2),
        }
    }
}

impl PopulationTargets {
    /// Targets for one environment. Central has no generated buildings.
    pub fn for_env(&self, env: Env) -> TierCounts {
        match env {
            Env::Prod => self.prod,
            Env::Dev => self.dev,
            Env::Qa => self.qa,
            Env::Dr => TierCounts::new(0, self.dr.mid_rises),
            Env::Central => TierCounts::default(),
        }
    }

    /// Tenants produced from these targets, singletons excluded.
    pub fn generated_total(&self) -> u32 {
        self.prod.total() + self.dev.total() + self.qa.total() + self.dr.mid_rises
    }
}

/// How tiered tenants are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStyle {
    /// `"PROD Skyscraper 3"`, `"QA Building 7"`.
    #[default]
    Numbered,
    /// `"Staging Cluster 7"` from the environment vocabularies.
    Descriptive,
}

/// Full set of generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    pub population: PopulationTargets,
    /// Minimum distance between the landmark and earlier buildings.
    pub landmark_spacing: f32,
    /// Rejection-sampling cap for landmark placement.
    pub max_placement_attempts: u32,
    /// Random seed (None = OS entropy).
    pub seed: Option<u64>,
    pub naming: NamingStyle,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            population: PopulationTargets::default(),
            landmark_spacing: 15.0,
            max_placement_attempts: 100,
            seed: None,
            naming: NamingStyle::Numbered,
        }
    }
}

impl CityConfig {
    /// Total tenants this config yields, including the two singletons.
    pub fn expected_tenant_count(&self) -> usize {
        self.population.generated_total() as usize + 2
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("landmark spacing must be a positive finite distance, got {0}")]
    InvalidSpacing(f32),
    #[error("placement attempt cap must be at least 1")]
    ZeroAttemptCap,
    #[error("{env} {tier:?} population {count} exceeds {max}", max = MAX_TIER_POPULATION)]
    PopulationTooLarge { env: Env, tier: Tier, count: u32 },
}

/// Validate a config, returning all errors found.
pub fn validate_config(config: &CityConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if !config.landmark_spacing.is_finite() || config.landmark_spacing <= 0.0 {
        errors.push(ConfigError::InvalidSpacing(config.landmark_spacing));
    }
    if config.max_placement_attempts == 0 {
        errors.push(ConfigError::ZeroAttemptCap);
    }

    for env in [Env::Prod, Env::Dev, Env::Qa, Env::Dr] {
        let counts = config.population.for_env(env);
        for tier in [Tier::Skyscraper, Tier::MidRise] {
            let count = counts.get(tier);
            if count > MAX_TIER_POPULATION {
                errors.push(ConfigError::PopulationTooLarge { env, tier, count });
            }
        }
    }

    errors
}
