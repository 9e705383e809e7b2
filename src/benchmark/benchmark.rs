use std::time::Instant;

use crate::configuration::config::IntegratorConfig;
use crate::simulation::forces::{Coulomb, InteractionSet, NewtonianGravity};
use crate::simulation::integrator;
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec2, Particle, World};

/// Helper to build a manual World of size `n` with alternating charges
fn make_world(n: usize) -> World {
    let mut sys = World::new();

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let posx = (i_f * 0.37).sin() * 5.0;
        let posy = (i_f * 0.13).cos() * 5.0;
        let charge = if i % 2 == 0 { 1.0 } else { -1.0 };

        sys.add(Particle::new(
            posx, posy, charge, 1.0, 0.0, 0.0, 1e-4, true, true, 1000,
        ));
    }

    sys
}

/// Shared parameter template for the benchmarks
fn make_params() -> Parameters {
    Parameters {
        g: 0.1,
        k: 1.0,
        t_needed: 1.0,
        use_point_limits: false,
        tolerance: 1e-8,
    }
}

/// Time one force pass for a range of system sizes, Coulomb alone against
/// Coulomb plus gravity
pub fn bench_forces() {
    // Different system sizes to test
    let ns = [200, 400, 800, 1600, 3200, 6400];

    for n in ns {
        let sys = make_world(n);
        let params = make_params();
        let positions = sys.current_positions();
        let mut out = vec![NVec2::zeros(); n];

        // Set up the two force stacks
        let coulomb = InteractionSet::new().with(Coulomb { k: params.k });
        let both = InteractionSet::new()
            .with(Coulomb { k: params.k })
            .with(NewtonianGravity { g: params.g });

        // Warm up
        coulomb.accumulate_accels(&sys, &positions, &mut out);
        both.accumulate_accels(&sys, &positions, &mut out);

        // Time Coulomb alone
        let t0 = Instant::now();
        coulomb.accumulate_accels(&sys, &positions, &mut out);
        let dt_coulomb = t0.elapsed().as_secs_f64();

        // Time Coulomb + gravity
        let t1 = Instant::now();
        both.accumulate_accels(&sys, &positions, &mut out);
        let dt_both = t1.elapsed().as_secs_f64();

        println!(
            "N = {n:5}, coulomb = {:8.6} s, coulomb+gravity = {:8.6} s",
            dt_coulomb, dt_both
        );
    }
}

/// Time each stepping scheme over a few steps of the same mid-size system
/// Paste output directly into a spreadsheet to graph
pub fn bench_schemes() {
    let n = 200;
    let steps = 5;

    let template = make_world(n);
    let params = make_params();

    let schemes = [
        IntegratorConfig::Verlet,
        IntegratorConfig::Leapfrog,
        IntegratorConfig::Rk4,
        IntegratorConfig::BulirschStoer,
    ];

    println!("scheme,ms_per_step (N = {n})");
    for scheme in schemes {
        let mut sys = template.clone();
        let forces = InteractionSet::new()
            .with(Coulomb { k: params.k })
            .with(NewtonianGravity { g: params.g });

        // Warm-up
        integrator::step(&mut sys, &forces, &params, &scheme);

        let t0 = Instant::now();
        for _ in 0..steps {
            integrator::step(&mut sys, &forces, &params, &scheme);
        }
        let ms_per_step = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{:?},{:.6}", scheme, ms_per_step);
    }
}
