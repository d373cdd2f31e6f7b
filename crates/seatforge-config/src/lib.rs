//! Configuration system for SeatForge.
//!
//! Load generator configuration from TOML or YAML files to control search
//! budgets, uniqueness pressure, scoring weights and restriction handling
//! without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use seatforge_config::{GeneratorConfig, RestrictionPolicy};
//! use std::time::Duration;
//!
//! let config = GeneratorConfig::from_toml_str(r#"
//!     random_seed = 7
//!     restriction_policy = "union"
//!
//!     [termination]
//!     seconds_spent_limit = 5
//!
//!     [premium]
//!     target_plans = 40
//!     max_attempts = 800
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(5)));
//! assert_eq!(config.restriction_policy, RestrictionPolicy::Union);
//! assert_eq!(config.budget(true).target_plans, 40);
//! assert_eq!(config.budget(false).target_plans, 10);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use seatforge_config::GeneratorConfig;
//!
//! let config = GeneratorConfig::load("seating.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use seatforge_core::SeatForgeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for SeatForgeError {
    fn from(err: ConfigError) -> Self {
        SeatForgeError::Config(err.to_string())
    }
}

/// Main generator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GeneratorConfig {
    /// Random seed for reproducible results.
    pub random_seed: Option<u64>,

    /// Budget for free-tier callers.
    pub free: BudgetConfig,

    /// Budget for premium callers.
    pub premium: BudgetConfig,

    /// Wall-clock termination.
    pub termination: Option<TerminationConfig>,

    /// Plan diversity filtering.
    pub uniqueness: UniquenessConfig,

    /// Plan scoring weights.
    pub scoring: ScoringConfig,

    /// How table restrictions of group members combine.
    pub restriction_policy: RestrictionPolicy,

    /// Attempts between cooperative yields in async generation.
    pub yield_interval: YieldInterval,

    /// Worker threads for parallel generation.
    pub thread_count: ThreadCount,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            random_seed: None,
            free: BudgetConfig::FREE,
            premium: BudgetConfig::PREMIUM,
            termination: None,
            uniqueness: UniquenessConfig::default(),
            scoring: ScoringConfig::default(),
            restriction_policy: RestrictionPolicy::default(),
            yield_interval: YieldInterval::default(),
            thread_count: ThreadCount::default(),
        }
    }
}

impl GeneratorConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the wall-clock limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: None,
            millis_spent_limit: Some(limit.as_millis() as u64),
        });
        self
    }

    pub fn with_restriction_policy(mut self, policy: RestrictionPolicy) -> Self {
        self.restriction_policy = policy;
        self
    }

    /// Replaces the budget of one tier.
    pub fn with_budget(mut self, premium: bool, budget: BudgetConfig) -> Self {
        if premium {
            self.premium = budget;
        } else {
            self.free = budget;
        }
        self
    }

    pub fn with_thread_count(mut self, thread_count: ThreadCount) -> Self {
        self.thread_count = thread_count;
        self
    }

    /// Returns the budget for the given tier.
    pub fn budget(&self, premium: bool) -> BudgetConfig {
        if premium {
            self.premium
        } else {
            self.free
        }
    }

    /// Returns the termination time limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (tier, budget) in [("free", self.free), ("premium", self.premium)] {
            if budget.target_plans == 0 || budget.max_attempts == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{tier} budget must allow at least one plan and one attempt"
                )));
            }
        }
        let u = &self.uniqueness;
        if !(0.0..=1.0).contains(&u.initial_threshold) || !(0.0..=1.0).contains(&u.floor) {
            return Err(ConfigError::Invalid(
                "uniqueness thresholds must lie in 0.0..=1.0".to_string(),
            ));
        }
        if u.step < 0.0 {
            return Err(ConfigError::Invalid(
                "uniqueness step must not be negative".to_string(),
            ));
        }
        if u.floor > u.initial_threshold {
            return Err(ConfigError::Invalid(
                "uniqueness floor must not exceed the initial threshold".to_string(),
            ));
        }
        if self.yield_interval.0 == 0 {
            return Err(ConfigError::Invalid(
                "yield_interval must be positive".to_string(),
            ));
        }
        if self.thread_count == ThreadCount::Count(0) {
            return Err(ConfigError::Invalid(
                "thread_count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Target plan count and attempt budget for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BudgetConfig {
    /// Stop once this many distinct plans were accepted.
    pub target_plans: usize,

    /// Maximum placement attempts.
    pub max_attempts: u64,
}

impl BudgetConfig {
    pub const FREE: BudgetConfig = BudgetConfig {
        target_plans: 10,
        max_attempts: 200,
    };

    pub const PREMIUM: BudgetConfig = BudgetConfig {
        target_plans: 30,
        max_attempts: 500,
    };

    pub fn new(target_plans: usize, max_attempts: u64) -> Self {
        Self {
            target_plans,
            max_attempts,
        }
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend generating.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend generating.
    pub millis_spent_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis =
            self.seconds_spent_limit.unwrap_or(0) * 1000 + self.millis_spent_limit.unwrap_or(0);
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }
}

/// Plan diversity filtering.
///
/// A candidate is rejected when its overlap with an accepted plan exceeds
/// `max(initial_threshold - step * accepted, floor)`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct UniquenessConfig {
    pub initial_threshold: f64,
    pub step: f64,
    pub floor: f64,
}

impl Default for UniquenessConfig {
    fn default() -> Self {
        Self {
            initial_threshold: 0.8,
            step: 0.05,
            floor: 0.5,
        }
    }
}

/// Plan scoring weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ScoringConfig {
    /// Reward per seated individual.
    pub seat_reward: i64,

    /// Reward per co-seated `must` pair.
    pub must_pair_reward: i64,

    /// Penalty per co-seated `cannot` pair.
    pub cannot_pair_penalty: i64,

    /// Reward per satisfied adjacency preference.
    pub adjacency_reward: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            seat_reward: 10,
            must_pair_reward: 100,
            cannot_pair_penalty: 200,
            adjacency_reward: 50,
        }
    }
}

/// How the table restrictions of a group's members combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionPolicy {
    /// Only tables every restricted member allows; no fallback.
    #[default]
    Intersection,

    /// Tables any restricted member allows first, then every other table.
    Union,
}

/// Attempts between cooperative yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct YieldInterval(pub u64);

impl Default for YieldInterval {
    fn default() -> Self {
        YieldInterval(10)
    }
}

/// Worker thread count for parallel generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// Use the rayon global pool.
    Auto,

    /// Run attempts on the calling thread.
    #[default]
    None,

    /// Dedicated pool with this many threads.
    Count(usize),
}
