//! Force / acceleration contributors for the particle engine
//!
//! Defines the pairwise interaction trait and the two laws the engine
//! ships: Coulomb's law and direct Newtonian gravity. Contributions are
//! evaluated from an explicit position slice so integrators can probe
//! trial states without committing them to the trajectory histories.

use crate::simulation::states::{NVec2, World};

/// Collection of interaction terms (Coulomb, gravity, etc.)
/// Each term implements [`Interaction`] and their contributions are summed
/// into a single acceleration vector per particle
pub struct InteractionSet {
    terms: Vec<Box<dyn Interaction + Send + Sync>>,
}

impl InteractionSet {
    /// Create an empty interaction set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add an interaction term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Interaction + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations for all particles in `sys`, evaluated at
    /// `positions` (one entry per particle, in index order)
    /// - `out[i]` receives the summed contribution of every term
    pub fn accumulate_accels(&self, sys: &World, positions: &[NVec2], out: &mut [NVec2]) {
        // Clear the accumulator first
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        // Sum each interaction term on top
        for term in &self.terms {
            term.acceleration(sys, positions, out);
        }
    }

    /// Evaluate all terms at the committed positions and store the result in
    /// each particle's scratch `acc`
    pub fn refresh(&self, sys: &mut World) {
        let positions = sys.current_positions();
        let mut accel = vec![NVec2::zeros(); sys.len()];
        self.accumulate_accels(sys, &positions, &mut accel);
        for (p, a) in sys.particles.iter_mut().zip(accel) {
            p.acc = a;
        }
    }
}

/// Trait for pairwise acceleration sources operating on [`World`]
/// Implementations add their contribution into `out[i]` for each particle,
/// reading charges/masses/flags from `sys` but geometry from `positions`
pub trait Interaction {
    fn acceleration(&self, sys: &World, positions: &[NVec2], out: &mut [NVec2]);
}

/// Coulomb's law over every unordered particle pair
///
/// A pair at zero separation contributes nothing (no singular force), and a
/// particle with `electrically_movable` off never receives the electric
/// contribution while still exerting it on the partner
pub struct Coulomb {
    pub k: f64, // Coulomb constant
}

impl Interaction for Coulomb {
    fn acceleration(&self, sys: &World, positions: &[NVec2], out: &mut [NVec2]) {
        let n = sys.particles.len();
        if n == 0 { // No particles, return
            return;
        }

        // Walk every unordered pair (i, j), i < j
        for i in 0..n {
            // pi: particle i (left side of the pair)
            let pi = &sys.particles[i];

            for j in (i + 1)..n {
                // pj: particle j (right side of the pair)
                let pj = &sys.particles[j];

                // d points from j toward i, so like charges (q_i q_j > 0)
                // push i along +d and j along -d: repulsion
                let d = positions[i] - positions[j];
                let r = d.norm();
                if r == 0.0 {
                    // Coincident pair: skip instead of dividing by zero
                    continue;
                }

                // Force on particle i:
                //   f = k q_i q_j d / r^3
                // The force on j is the exact negation (Newton's third law)
                let f = self.k * pi.charge * pj.charge / (r * r * r) * d;

                // Receiving the electric force is gated per particle; the
                // partner still feels its half of the pair either way
                if pi.electrically_movable {
                    out[i] += f / pi.mass;
                }
                if pj.electrically_movable {
                    out[j] -= f / pj.mass;
                }
            }
        }
    }
}

/// Direct Newtonian gravity over every unordered particle pair
///
/// Same pair walk as [`Coulomb`] with the attractive sign baked in, gated
/// per particle by `gravitationally_movable`
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant
}

impl Interaction for NewtonianGravity {
    fn acceleration(&self, sys: &World, positions: &[NVec2], out: &mut [NVec2]) {
        let n = sys.particles.len();
        if n == 0 { // No particles, return
            return;
        }

        // Same pair walk as the Coulomb term
        for i in 0..n {
            let pi = &sys.particles[i];

            for j in (i + 1)..n {
                let pj = &sys.particles[j];

                // d points from j toward i, as in the Coulomb term
                let d = positions[i] - positions[j];
                let r = d.norm();
                if r == 0.0 {
                    continue;
                }

                // Force on particle i:
                //   f = -G m_i m_j d / r^3
                // The minus sign pulls i along -d, toward j: always attractive
                let f = -self.g * pi.mass * pj.mass / (r * r * r) * d;

                if pi.gravitationally_movable {
                    out[i] += f / pi.mass;
                }
                if pj.gravitationally_movable {
                    out[j] -= f / pj.mass;
                }
            }
        }
    }
}
