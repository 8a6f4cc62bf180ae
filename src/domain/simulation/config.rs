use std::time::Duration;

use thiserror::Error;

pub const SEED_ENV: &str = "MOLE_RUSH_SEED";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("the board needs at least one hole")]
    NoHoles,
    #[error("a round must start with at least one life")]
    NoLives,
    #[error("the target score must be positive")]
    NoTarget,
    #[error("{0} must be longer than zero")]
    ZeroDuration(&'static str),
    #[error("{name} is not a valid seed: {value:?}")]
    BadSeed { name: &'static str, value: String },
}

/// Fixed constants of a round. Every session plays with the same numbers.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundConfig {
    pub hole_count: usize,
    pub starting_lives: u32,
    pub target_score: u32,
    pub spawn_interval: Duration,
    pub expiry: Duration,
    /// How long a hit mole stays on screen before its hole empties.
    pub hit_display: Duration,
    pub seed: Option<u64>,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            hole_count: 16,
            starting_lives: 3,
            target_score: 50,
            spawn_interval: Duration::from_millis(800),
            expiry: Duration::from_millis(1200),
            hit_display: Duration::from_millis(300),
            seed: None,
        }
    }
}

impl RoundConfig {
    /// Defaults plus the optional seed from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(SEED_ENV) {
            config.seed = Some(parse_seed(&raw)?);
        }
        config.validate()
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.hole_count == 0 {
            return Err(ConfigError::NoHoles);
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.target_score == 0 {
            return Err(ConfigError::NoTarget);
        }
        for (name, d) in [
            ("spawn_interval", self.spawn_interval),
            ("expiry", self.expiry),
            ("hit_display", self.hit_display),
        ] {
            if d.is_zero() {
                return Err(ConfigError::ZeroDuration(name));
            }
        }
        Ok(self)
    }
}

fn parse_seed(raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::BadSeed {
        name: SEED_ENV,
        value: raw.to_string(),
    })
}
