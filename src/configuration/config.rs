//! Configuration types for loading and saving simulations as JSON.
//!
//! This module defines a thin, `serde`-(de)serializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]   – run options (scheme, single-step, tolerance, cadence)
//! - [`SettingsConfig`] – coupling constants and run span
//! - [`ParticleConfig`] – initial state for each particle
//! - [`ScenarioConfig`] – top-level wrapper used to load a scenario file
//!
//! The particle and settings records keep the key names of the save files
//! this engine inherits, so existing files load unchanged. Unknown keys are
//! ignored; a missing `color` or `max_points` falls back to `"blue"` / 1000,
//! and every settings key has a default.
//!
//! # JSON format
//! An example scenario matching these types:
//!
//! ```json
//! {
//!   "engine": {
//!     "scheme": "verlet",
//!     "tolerance": 1e-8
//!   },
//!   "settings": {
//!     "G": 1.0,
//!     "k": 1.0,
//!     "tneeded": 10.0,
//!     "use_point_limits": false
//!   },
//!   "particles": [
//!     {
//!       "posx": 0.0, "posy": 0.0,
//!       "charge": -1.0, "mass": 1.0,
//!       "velocity": 1.0, "angle": 45.0, "dt": 1e-4,
//!       "is_moving_ch": true, "is_moving_m": false,
//!       "color": "red", "max_points": 1000
//!     }
//!   ]
//! }
//! ```
//!
//! The engine then maps this configuration into its internal runtime scenario
//! representation, which may use different structs optimized for performance.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which stepping scheme the engine runs
/// `scheme: "verlet" | "leapfrog" | "rk4" | "bulirsch-stoer"`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum IntegratorConfig {
    #[serde(rename = "verlet")] // Two-point position recurrence, one force pass per step
    Verlet,

    #[serde(rename = "leapfrog")] // Kick-drift-kick, reuses the previous step's acceleration
    Leapfrog,

    #[serde(rename = "rk4")] // Classical 4th-order Runge-Kutta, four force passes per step
    Rk4,

    #[serde(rename = "bulirsch-stoer")] // Modified midpoint plus a refinement ladder
    BulirschStoer,
}

/// High-level engine configuration
/// Controls how a run is driven rather than what is simulated
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub scheme: IntegratorConfig, // stepping scheme for the run
    #[serde(default)]
    pub single_step: bool, // run exactly one step instead of the full span
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>, // Bulirsch-Stoer acceptance tolerance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_period: Option<usize>, // observer cadence for Engine::run_with
}

/// Coupling constants and run span, the `settings` record of the save files
///
/// Serializes to exactly the four legacy keys so a settings file round-trips
/// unchanged; on load, each missing key takes its legacy default
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SettingsConfig {
    #[serde(rename = "G", default = "default_g")]
    pub g: f64, // gravitational constant
    #[serde(default = "default_k")]
    pub k: f64, // Coulomb constant
    #[serde(default = "default_tneeded")]
    pub tneeded: f64, // total simulated time span
    #[serde(default)]
    pub use_point_limits: bool, // trim histories to each particle's max_points
}

fn default_g() -> f64 {
    1.0
}

fn default_k() -> f64 {
    1.0
}

fn default_tneeded() -> f64 {
    10.0
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            g: default_g(),
            k: default_k(),
            tneeded: default_tneeded(),
            use_point_limits: false,
        }
    }
}

/// Initial state for a single particle, one record of the `particles` list
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ParticleConfig {
    pub posx: f64, // seed x position
    pub posy: f64, // seed y position
    pub charge: f64, // signed charge
    pub mass: f64, // mass, must be positive
    pub velocity: f64, // seed speed (the legacy key name)
    pub angle: f64, // launch angle in degrees
    pub dt: f64, // step size, must be positive
    pub is_moving_ch: bool, // Coulomb force may move this particle
    pub is_moving_m: bool, // gravity may move this particle
    #[serde(default = "default_color")]
    pub color: String, // display tag
    #[serde(default = "default_max_points")]
    pub max_points: usize, // history cap when point limits are on
}

fn default_color() -> String {
    "blue".to_string()
}

fn default_max_points() -> usize {
    1000
}

/// Top-level scenario configuration loaded from a JSON file
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig, // run options (scheme, single-step, tolerance)
    #[serde(default)]
    pub settings: SettingsConfig, // coupling constants and run span
    pub particles: Vec<ParticleConfig>, // initial state of the system
}

/// Errors surfaced while loading, validating, or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("particle {index}: mass must be positive, got {value}")]
    NonPositiveMass { index: usize, value: f64 },

    #[error("particle {index}: dt must be positive, got {value}")]
    NonPositiveTimeStep { index: usize, value: f64 },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Reject particle records the integrators cannot run: divisions by mass and
/// steps of size `dt` both need strictly positive, non-NaN values
pub fn validate_particles(particles: &[ParticleConfig]) -> Result<()> {
    for (index, p) in particles.iter().enumerate() {
        if p.mass.is_nan() || p.mass <= 0.0 {
            return Err(ConfigError::NonPositiveMass {
                index,
                value: p.mass,
            });
        }
        if p.dt.is_nan() || p.dt <= 0.0 {
            return Err(ConfigError::NonPositiveTimeStep {
                index,
                value: p.dt,
            });
        }
    }
    Ok(())
}

/// Load a full scenario file, validating its particle list
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let cfg: ScenarioConfig = serde_json::from_reader(reader)?;
    validate_particles(&cfg.particles)?;
    Ok(cfg)
}

/// Load a bare ordered particle list (the legacy save format), validating it
pub fn load_particles<P: AsRef<Path>>(path: P) -> Result<Vec<ParticleConfig>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let particles: Vec<ParticleConfig> = serde_json::from_reader(reader)?;
    validate_particles(&particles)?;
    Ok(particles)
}

/// Save a particle list in the legacy format, preserving order
pub fn save_particles<P: AsRef<Path>>(path: P, particles: &[ParticleConfig]) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, particles)?;
    Ok(())
}

/// Load a settings record; missing keys take their legacy defaults
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<SettingsConfig> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let settings = serde_json::from_reader(reader)?;
    Ok(settings)
}

/// Save a settings record with exactly the four legacy keys
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &SettingsConfig) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, settings)?;
    Ok(())
}
