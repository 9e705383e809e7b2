use cpsim::configuration::config;
use cpsim::{bench_forces, bench_schemes};
use cpsim::{energy_at, EnergyModel};
use cpsim::{EngineConfig, IntegratorConfig, ParticleConfig, ScenarioConfig, SettingsConfig};
use cpsim::Scenario;

use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, default_value = "scenario.json")]
    file_name: String,

    /// Run the built-in three-particle demo instead of loading a file
    #[arg(long)]
    demo: bool,

    /// Run the force/scheme benchmarks and exit
    #[arg(long)]
    bench: bool,
}

/// The built-in demo: a launched light charge between two pinned heavy ones
fn demo_config() -> ScenarioConfig {
    ScenarioConfig {
        engine: EngineConfig {
            scheme: IntegratorConfig::Verlet,
            single_step: false,
            tolerance: None,
            update_period: None,
        },
        settings: SettingsConfig {
            tneeded: 1.0,
            ..SettingsConfig::default()
        },
        particles: vec![
            ParticleConfig {
                posx: 0.0, posy: 0.0, charge: -1.0, mass: 1.0,
                velocity: 1.0, angle: 45.0, dt: 1e-4,
                is_moving_ch: true, is_moving_m: false,
                color: "red".to_string(), max_points: 1000,
            },
            ParticleConfig {
                posx: -1.0, posy: 0.0, charge: 1.0, mass: 1836.0,
                velocity: 0.0, angle: 0.0, dt: 1e-4,
                is_moving_ch: false, is_moving_m: false,
                color: "green".to_string(), max_points: 1000,
            },
            ParticleConfig {
                posx: 1.0, posy: 0.0, charge: 1.0, mass: 1836.0,
                velocity: 0.0, angle: 0.0, dt: 1e-4,
                is_moving_ch: false, is_moving_m: false,
                color: "blue".to_string(), max_points: 1000,
            },
        ],
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_forces();
        bench_schemes();
        return Ok(());
    }

    let cfg = if args.demo {
        demo_config()
    } else {
        config::load_scenario(&args.file_name)?
    };

    let mut scenario = Scenario::build_scenario(cfg);
    scenario.engine.run(
        &mut scenario.system,
        &scenario.forces,
        &scenario.parameters,
    );

    // Final energy audit over the shortest recorded history
    let len = scenario
        .system
        .particles
        .iter()
        .map(|p| p.history.len())
        .min()
        .unwrap_or(0);
    if len > 0 {
        let t_last = len - 1;
        let electric = energy_at(
            &scenario.system,
            t_last,
            EnergyModel::Electric,
            &scenario.parameters,
        );
        let gravitational = energy_at(
            &scenario.system,
            t_last,
            EnergyModel::Gravitational,
            &scenario.parameters,
        );
        log::info!(
            "final electric energy: kinetic {:.6e}, potential {:.6e}, total {:.6e}",
            electric.kinetic,
            electric.potential,
            electric.total
        );
        log::info!(
            "final gravitational energy: kinetic {:.6e}, potential {:.6e}, total {:.6e}",
            gravitational.kinetic,
            gravitational.potential,
            gravitational.total
        );
    }

    Ok(())
}
