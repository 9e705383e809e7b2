//! Fixed-step time integrators for the particle system
//!
//! Provides four schemes, all driven by `InteractionSet` and `Parameters`:
//! two-point position-Verlet, kick-drift-kick leapfrog, classical RK4, and
//! a Bulirsch-Stoer step (modified midpoint plus a fixed refinement ladder).
//! Every scheme appends exactly one history sample per particle per step,
//! duplicating the committed state for frozen particles so all histories
//! stay the same length.

use nalgebra::DVector;

use super::forces::InteractionSet;
use super::params::Parameters;
use super::states::{NVec2, World};
use crate::configuration::config::IntegratorConfig;

/// Advance the system by one step using the two-point position-Verlet
/// recurrence
///
/// One force evaluation per step. The recorded velocity is the forward
/// difference `(x_{n+1} - x_n) / h`, one order below the positions; frozen
/// particles hold their position and record a zero velocity.
pub fn verlet_integrator(sys: &mut World, forces: &InteractionSet, params: &Parameters) {
    let n = sys.len();
    if n == 0 { // no particles, return
        return;
    }
    let h = sys.particles[0].dt; // shared step size
    let bounded = params.use_point_limits;

    // a_n for every particle, evaluated at the committed positions x_n
    forces.refresh(sys);

    for p in sys.particles.iter_mut() {
        if p.movable() {
            let x_n = p.history.last_position();
            let x_prev = p.history.prev_position();

            // x_n+1 = 2 x_n - x_n-1 + h^2 a_n
            let x_next = 2.0 * x_n - x_prev + h * h * p.acc;

            // Forward difference, recorded alongside the new position
            p.vel = (x_next - x_n) / h;
            p.history.push(x_next, p.vel, bounded);
        } else {
            p.vel = NVec2::zeros();
            let x_n = p.history.last_position();
            p.history.push(x_n, p.vel, bounded);
        }
    }
}

/// Advance the system by one step using kick-drift-kick leapfrog
///
/// The first half-kick reuses the acceleration left on each particle by the
/// previous step (zero right after construction or reset, which degrades
/// only the very first step); the second half-kick uses fresh accelerations
/// at the drifted positions.
pub fn leapfrog_integrator(sys: &mut World, forces: &InteractionSet, params: &Parameters) {
    let n = sys.len();
    if n == 0 { // no particles, return
        return;
    }
    let h = sys.particles[0].dt;
    let half_h = 0.5 * h;
    let bounded = params.use_point_limits;

    // First kick: v_n+1/2 = v_n + (h/2) a_n
    for p in sys.particles.iter_mut() {
        if p.movable() {
            p.vel += half_h * p.acc;
        }
    }

    // Drift: x_n+1 = x_n + h v_n+1/2. Staged in a scratch buffer so each
    // history commits its position and velocity together at the end
    let mut next_positions = Vec::with_capacity(n);
    for p in sys.particles.iter() {
        if p.movable() {
            next_positions.push(p.history.last_position() + h * p.vel);
        } else {
            next_positions.push(p.history.last_position());
        }
    }

    // a_n+1 at the drifted positions
    let mut accel = vec![NVec2::zeros(); n];
    forces.accumulate_accels(sys, &next_positions, &mut accel);
    for (p, a) in sys.particles.iter_mut().zip(accel.iter()) {
        p.acc = *a;
    }

    // Second kick: v_n+1 = v_n+1/2 + (h/2) a_n+1, then commit
    for (p, x_next) in sys.particles.iter_mut().zip(next_positions) {
        if p.movable() {
            p.vel += half_h * p.acc;
        }
        p.history.push(x_next, p.vel, bounded);
    }
}

/// Advance the system by one step using classical fourth-order Runge-Kutta
///
/// Frozen particles stay pinned to their committed state through all four
/// stages while still sourcing forces from there; movable particles probe
/// the usual half- and full-step trial states.
pub fn rk4_integrator(sys: &mut World, forces: &InteractionSet, params: &Parameters) {
    let n = sys.len();
    if n == 0 { // no particles, return
        return;
    }
    let h = sys.particles[0].dt;
    let bounded = params.use_point_limits;

    let pos0 = sys.current_positions();
    let vel0: Vec<NVec2> = sys.particles.iter().map(|p| p.vel).collect();

    // Stage 1: derivatives at the committed state
    let mut a1 = vec![NVec2::zeros(); n];
    forces.accumulate_accels(sys, &pos0, &mut a1);
    let k1_x = vel0.clone();
    let k1_v = a1;

    // Stage 2: half-step trial state along k1
    let (p2, k2_x) = trial_state(sys, &pos0, &vel0, &k1_x, &k1_v, 0.5 * h);
    let mut k2_v = vec![NVec2::zeros(); n];
    forces.accumulate_accels(sys, &p2, &mut k2_v);

    // Stage 3: half-step trial state along k2
    let (p3, k3_x) = trial_state(sys, &pos0, &vel0, &k2_x, &k2_v, 0.5 * h);
    let mut k3_v = vec![NVec2::zeros(); n];
    forces.accumulate_accels(sys, &p3, &mut k3_v);

    // Stage 4: full-step trial state along k3
    let (p4, k4_x) = trial_state(sys, &pos0, &vel0, &k3_x, &k3_v, h);
    let mut k4_v = vec![NVec2::zeros(); n];
    forces.accumulate_accels(sys, &p4, &mut k4_v);

    // Weighted combination: y_n+1 = y_n + (h/6)(k1 + 2 k2 + 2 k3 + k4)
    let sixth = h / 6.0;
    for (i, p) in sys.particles.iter_mut().enumerate() {
        if p.movable() {
            p.vel = vel0[i] + sixth * (k1_v[i] + 2.0 * k2_v[i] + 2.0 * k3_v[i] + k4_v[i]);
            let x_next = pos0[i] + sixth * (k1_x[i] + 2.0 * k2_x[i] + 2.0 * k3_x[i] + k4_x[i]);
            p.history.push(x_next, p.vel, bounded);
        } else {
            let x_n = p.history.last_position();
            p.history.push(x_n, p.vel, bounded);
        }
    }
}

/// Trial positions and velocities `c` ahead along the stage derivatives
/// (`c` carries the step factor, h/2 or h). Frozen particles keep their
/// committed position and velocity so they keep exerting force from there.
fn trial_state(
    sys: &World,
    pos0: &[NVec2],
    vel0: &[NVec2],
    kx: &[NVec2],
    kv: &[NVec2],
    c: f64,
) -> (Vec<NVec2>, Vec<NVec2>) {
    let n = pos0.len();
    let mut pos = Vec::with_capacity(n);
    let mut vel = Vec::with_capacity(n);
    for i in 0..n {
        if sys.particles[i].movable() {
            pos.push(pos0[i] + c * kx[i]);
            vel.push(vel0[i] + c * kv[i]);
        } else {
            pos.push(pos0[i]);
            vel.push(vel0[i]);
        }
    }
    (pos, vel)
}

// =========================================================================================
// Bulirsch-Stoer
// =========================================================================================

/// Substep ladder for the modified-midpoint refinements
const MIDPOINT_SEQUENCE: [usize; 11] = [2, 4, 6, 8, 12, 16, 24, 32, 48, 64, 96];

/// Outcome of one Bulirsch-Stoer step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Convergence {
    pub error: f64, // max componentwise gap between the two finest refinements
    pub substeps: usize, // substep count of the committed refinement
    pub converged: bool, // whether the gap dropped below the tolerance
}

/// Advance the system by one Bulirsch-Stoer step: modified-midpoint
/// refinements over a fixed substep ladder, accepted once two successive
/// refinements agree within `params.tolerance`
///
/// When the ladder runs out the finest refinement is still committed; the
/// returned [`Convergence`] says so with `converged == false`, leaving it to
/// the caller how loudly to complain.
pub fn bulirsch_stoer_integrator(
    sys: &mut World,
    forces: &InteractionSet,
    params: &Parameters,
) -> Convergence {
    let n = sys.len();
    if n == 0 { // no particles, return
        return Convergence {
            error: 0.0,
            substeps: 0,
            converged: true,
        };
    }
    let h = sys.particles[0].dt;
    let bounded = params.use_point_limits;

    // Pack the whole system into one state vector: all positions first,
    // then all velocities
    let mut state = DVector::zeros(4 * n);
    for (i, p) in sys.particles.iter().enumerate() {
        let x = p.history.last_position();
        state[2 * i] = x.x;
        state[2 * i + 1] = x.y;
        state[2 * n + 2 * i] = p.vel.x;
        state[2 * n + 2 * i + 1] = p.vel.y;
    }

    let (next, report) = midpoint_extrapolation(sys, forces, &state, h, params.tolerance);

    // Commit: movable particles take the refined state, frozen particles
    // duplicate their committed sample
    for (i, p) in sys.particles.iter_mut().enumerate() {
        if p.movable() {
            let x_next = NVec2::new(next[2 * i], next[2 * i + 1]);
            p.vel = NVec2::new(next[2 * n + 2 * i], next[2 * n + 2 * i + 1]);
            p.history.push(x_next, p.vel, bounded);
        } else {
            let x_n = p.history.last_position();
            p.history.push(x_n, p.vel, bounded);
        }
    }

    report
}

/// Run the refinement ladder at step `h` from `state`, returning the
/// accepted state and its convergence report
///
/// The gap between successive refinements only means anything once three of
/// them exist, so acceptance starts at the third rung.
fn midpoint_extrapolation(
    sys: &World,
    forces: &InteractionSet,
    state: &DVector<f64>,
    h: f64,
    tolerance: f64,
) -> (DVector<f64>, Convergence) {
    let mut last = modified_midpoint(sys, forces, state, h, MIDPOINT_SEQUENCE[0]);
    let mut error = f64::INFINITY;

    for (rung, &substeps) in MIDPOINT_SEQUENCE.iter().enumerate().skip(1) {
        let candidate = modified_midpoint(sys, forces, state, h, substeps);
        if rung >= 2 {
            error = (&candidate - &last).amax();
            if error < tolerance {
                return (
                    candidate,
                    Convergence {
                        error,
                        substeps,
                        converged: true,
                    },
                );
            }
        }
        last = candidate;
    }

    // Ladder exhausted: commit the finest refinement anyway and report the
    // residual gap
    let substeps = MIDPOINT_SEQUENCE[MIDPOINT_SEQUENCE.len() - 1];
    (
        last,
        Convergence {
            error,
            substeps,
            converged: false,
        },
    )
}

/// One modified-midpoint pass: `substeps` equal substeps across `h`, closed
/// with the standard endpoint smoothing
fn modified_midpoint(
    sys: &World,
    forces: &InteractionSet,
    state: &DVector<f64>,
    h: f64,
    substeps: usize,
) -> DVector<f64> {
    let hs = h / substeps as f64;

    // z_0 and z_1 seed the three-term recurrence
    let mut z_prev = state.clone();
    let mut z = &z_prev + hs * system_derivatives(sys, forces, &z_prev);

    // z_m+1 = z_m-1 + 2 h_s f(z_m)
    for _ in 1..substeps {
        let z_next = &z_prev + 2.0 * hs * system_derivatives(sys, forces, &z);
        z_prev = std::mem::replace(&mut z, z_next);
    }

    // Endpoint smoothing: 0.5 (z_n + z_n-1 + h_s f(z_n))
    0.5 * (&z + &z_prev + hs * system_derivatives(sys, forces, &z))
}

/// State-space derivative: dx/dt is the velocity block verbatim, dv/dt the
/// flag-gated accelerations at the state's positions
fn system_derivatives(sys: &World, forces: &InteractionSet, state: &DVector<f64>) -> DVector<f64> {
    let n = sys.len();
    let mut deriv = DVector::zeros(4 * n);

    // dx/dt = v, copied straight from the velocity block
    for i in 0..2 * n {
        deriv[i] = state[2 * n + i];
    }

    // dv/dt = a at the state's positions
    let positions: Vec<NVec2> = (0..n)
        .map(|i| NVec2::new(state[2 * i], state[2 * i + 1]))
        .collect();
    let mut accel = vec![NVec2::zeros(); n];
    forces.accumulate_accels(sys, &positions, &mut accel);
    for (i, a) in accel.iter().enumerate() {
        deriv[2 * n + 2 * i] = a.x;
        deriv[2 * n + 2 * i + 1] = a.y;
    }

    deriv
}

// =========================================================================================
// Scheme dispatch
// =========================================================================================

/// Advance the system by one step of the selected scheme
///
/// The Bulirsch-Stoer report is folded into a warning here; callers that
/// want the numbers call [`bulirsch_stoer_integrator`] directly.
pub fn step(sys: &mut World, forces: &InteractionSet, params: &Parameters, scheme: &IntegratorConfig) {
    match scheme {
        IntegratorConfig::Verlet => verlet_integrator(sys, forces, params),
        IntegratorConfig::Leapfrog => leapfrog_integrator(sys, forces, params),
        IntegratorConfig::Rk4 => rk4_integrator(sys, forces, params),
        IntegratorConfig::BulirschStoer => {
            let report = bulirsch_stoer_integrator(sys, forces, params);
            if !report.converged {
                log::warn!(
                    "bulirsch-stoer step did not reach tolerance {:.1e}: residual {:.3e} after {} substeps",
                    params.tolerance,
                    report.error,
                    report.substeps
                );
            }
        }
    }
}
