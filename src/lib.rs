pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{History, Particle, World, NVec2};
pub use simulation::forces::{Interaction, InteractionSet, Coulomb, NewtonianGravity};
pub use simulation::integrator::{step, verlet_integrator, leapfrog_integrator, rk4_integrator, bulirsch_stoer_integrator, Convergence};
pub use simulation::params::Parameters;
pub use simulation::engine::Engine;
pub use simulation::scenario::{Scenario, particle_from_config, particle_to_config};
pub use simulation::energy::{EnergyModel, EnergyBreakdown, energy_at, energy_series, energy_deviation};
pub use simulation::density::{Axis, AxisHistogram, DensityGrid, axis_histogram, density_grid};
pub use simulation::units::{electrostatic_timescale, gravitational_timescale};

pub use configuration::config::{IntegratorConfig, EngineConfig, SettingsConfig, ParticleConfig, ScenarioConfig, ConfigError};
pub use configuration::config::{load_scenario, load_particles, save_particles, load_settings, save_settings, validate_particles};

pub use benchmark::benchmark::{bench_forces, bench_schemes};
