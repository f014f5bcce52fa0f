//! Tuning loaded from a RON file.
//!
//! Every field has a default, so a config file only needs the values it
//! changes. The level formulas themselves are not configurable; they live in
//! `boss`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::entities::{Arena, RunRules, Upgrades};
use crate::error::ConfigError;

#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct VulnerabilityConfig {
    /// Closed ticks before the window reopens.
    pub interval_ticks: f32,
    /// Open ticks; anything above 1200 is capped.
    pub duration_ticks: f32,
}

impl Default for VulnerabilityConfig {
    fn default() -> Self {
        Self {
            interval_ticks: 900.0,
            duration_ticks: 1200.0,
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub arena: ArenaConfig,
    /// Target frame time of the frontend, in milliseconds.
    pub frame_ms: u64,
    pub start_level: i32,
    pub upgrades: Upgrades,
    pub vulnerability: VulnerabilityConfig,
    /// Bullet speed cut per bullet-slow level (0.05 = 5%).
    pub bullet_slow_per_level: f32,
    /// Dodge chance per lucky-dodge level.
    pub lucky_dodge_per_level: f32,
    pub lucky_dodge_cap: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            frame_ms: 16,
            start_level: 1,
            upgrades: Upgrades::default(),
            vulnerability: VulnerabilityConfig::default(),
            bullet_slow_per_level: 0.05,
            lucky_dodge_per_level: 0.03,
            lucky_dodge_cap: 0.3,
        }
    }
}

impl GameConfig {
    pub fn from_ron_str(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(contents).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            details: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_ron_str(&contents, &path.display().to_string())?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Defaults when the file does not exist; a broken file is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::warn!("Config not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.arena.width > 0.0 && self.arena.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "arena must be positive, got {}x{}",
                self.arena.width, self.arena.height
            )));
        }
        if self.frame_ms == 0 {
            return Err(ConfigError::Invalid("frame_ms must be at least 1".to_string()));
        }
        let rates = [
            ("vulnerability.interval_ticks", self.vulnerability.interval_ticks),
            ("vulnerability.duration_ticks", self.vulnerability.duration_ticks),
            ("bullet_slow_per_level", self.bullet_slow_per_level),
            ("lucky_dodge_per_level", self.lucky_dodge_per_level),
            ("lucky_dodge_cap", self.lucky_dodge_cap),
        ];
        for (name, value) in rates {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be >= 0, got {value}")));
            }
        }
        Ok(())
    }

    pub fn arena(&self) -> Arena {
        Arena {
            width: self.arena.width,
            height: self.arena.height,
        }
    }

    pub fn rules(&self) -> RunRules {
        RunRules {
            vulnerability_interval: self.vulnerability.interval_ticks,
            vulnerability_duration: self.vulnerability.duration_ticks,
            bullet_slow_per_level: self.bullet_slow_per_level,
            lucky_dodge_per_level: self.lucky_dodge_per_level,
            lucky_dodge_cap: self.lucky_dodge_cap,
        }
    }
}
