//! Turn loaded configuration into a ready-to-run scenario
//!
//! Takes a `ScenarioConfig` (JSON-facing) and produces the runtime bundle
//! (`Scenario`) containing:
//! - run control (`Engine`)
//! - physical constants and run length (`Parameters`)
//! - system state (`World` with seeded particle histories)
//! - active force set (`InteractionSet` with Coulomb + gravity)
//!
//! Conversions between `ParticleConfig` records and runtime `Particle`s also
//! live here, so save/load round-trips go through one place.

use crate::configuration::config::{ParticleConfig, ScenarioConfig};
use crate::simulation::engine::Engine;
use crate::simulation::forces::{Coulomb, InteractionSet, NewtonianGravity};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Particle, World};

/// Fallback Bulirsch-Stoer tolerance when the file does not set one
const DEFAULT_TOLERANCE: f64 = 1e-8;

/// Fallback observer cadence for `Engine::run_with`
const DEFAULT_UPDATE_PERIOD: usize = 10;

/// A fully-initialized simulation scenario
///
/// The runtime counterpart of a [`ScenarioConfig`]: run control, numerical
/// parameters, the particle system itself, and the active force laws
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: World,
    pub forces: InteractionSet,
}

/// Map a save-file record onto a seeded runtime particle
pub fn particle_from_config(pc: &ParticleConfig) -> Particle {
    Particle::new(
        pc.posx,
        pc.posy,
        pc.charge,
        pc.mass,
        pc.velocity,
        pc.angle,
        pc.dt,
        pc.is_moving_ch,
        pc.is_moving_m,
        pc.max_points,
    )
    .with_color(pc.color.clone())
}

/// Map a runtime particle back onto its save-file record
///
/// Serializes the seed state (`origin`, `speed`, `angle`), not the newest
/// sample, so a record loaded and saved again is unchanged even mid-run
pub fn particle_to_config(p: &Particle) -> ParticleConfig {
    ParticleConfig {
        posx: p.origin.x,
        posy: p.origin.y,
        charge: p.charge,
        mass: p.mass,
        velocity: p.speed,
        angle: p.angle,
        dt: p.dt,
        is_moving_ch: p.electrically_movable,
        is_moving_m: p.gravitationally_movable,
        color: p.color.clone(),
        max_points: p.max_points(),
    }
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Self {
        // Particles: map `ParticleConfig` -> runtime `Particle` with seeded
        // two-sample histories
        let particles: Vec<Particle> = cfg.particles.iter().map(particle_from_config).collect();

        // Initial system state
        let system = World { particles };

        // Parameters (runtime) from SettingsConfig, plus the tolerance the
        // engine block may override
        let s_cfg = cfg.settings;
        let parameters = Parameters {
            g: s_cfg.g,
            k: s_cfg.k,
            t_needed: s_cfg.tneeded,
            use_point_limits: s_cfg.use_point_limits,
            tolerance: cfg.engine.tolerance.unwrap_or(DEFAULT_TOLERANCE),
        };

        // Run control from the engine block
        let e_cfg = cfg.engine;
        let engine = Engine {
            scheme: e_cfg.scheme,
            single_step: e_cfg.single_step,
            paused: false,
            update_period: e_cfg.update_period.unwrap_or(DEFAULT_UPDATE_PERIOD),
        };

        // Forces: both laws are always registered; a run switches one off by
        // zeroing its constant
        let forces = InteractionSet::new()
            .with(Coulomb { k: parameters.k })
            .with(NewtonianGravity { g: parameters.g });

        Self {
            engine,
            parameters,
            system,
            forces,
        }
    }

    /// Snapshot the current particle list as save-file records, in order
    pub fn particle_configs(&self) -> Vec<ParticleConfig> {
        self.system.particles.iter().map(particle_to_config).collect()
    }
}
