//! Boss AI and projectile pattern engine for a one-hit bullet-hell boss fight.
//!
//! The player survives the boss's bullet patterns and beam hazards, and wins
//! by ramming the boss while its vulnerability window is open.
//!
//! - `entities`: pure data, no logic
//! - `boss`, `patterns`, `projectile`, `beam`: the simulation core
//! - `player`: the ship the boss is shooting at
//! - `combat`: collision and win/loss resolution
//! - `compute`: per-tick orchestration of a whole run
//! - `config`, `error`: RON tuning file and its load errors

pub mod beam;
pub mod boss;
pub mod combat;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod patterns;
pub mod player;
pub mod projectile;
