//! Core state types for the charged-particle simulation.
//!
//! Defines the trajectory buffer plus particle/world structs:
//! - `History`  paired position/velocity samples for one particle
//! - `Particle` charge, mass, motion flags, and its trajectory
//! - `World`    the ordered particle collection
//!
//! Each particle carries its own history so diagnostics (energy curves,
//! density maps) can be computed after a run without replaying it.

use std::collections::VecDeque;

use nalgebra::Vector2;

pub type NVec2 = Vector2<f64>;

/// Paired position/velocity samples for one particle, oldest first.
///
/// A history always holds at least the two seed samples (start position and
/// the Euler point one `dt` later); integrators append one sample per step.
/// Both buffers advance and trim together, so the velocity at index `t`
/// always belongs to the position at index `t`.
#[derive(Debug, Clone)]
pub struct History {
    positions: VecDeque<NVec2>,
    velocities: VecDeque<NVec2>,
    max_points: usize, // kept as configured; clamped to >= 2 when trimming
}

impl History {
    /// Seed a history with two starting samples sharing velocity `vel`.
    pub fn with_seed(first: NVec2, second: NVec2, vel: NVec2, max_points: usize) -> Self {
        let mut positions = VecDeque::new();
        positions.push_back(first);
        positions.push_back(second);
        let mut velocities = VecDeque::new();
        velocities.push_back(vel);
        velocities.push_back(vel);
        Self {
            positions,
            velocities,
            max_points,
        }
    }

    /// Append one aligned sample pair. When `bounded`, drop the oldest pairs
    /// until at most `max_points` remain; a window below two samples would
    /// starve the two-point integrators, so the cap never goes under 2.
    pub fn push(&mut self, pos: NVec2, vel: NVec2, bounded: bool) {
        self.positions.push_back(pos);
        self.velocities.push_back(vel);
        if bounded {
            let cap = self.max_points.max(2);
            while self.positions.len() > cap {
                self.positions.pop_front();
                self.velocities.pop_front();
            }
        }
    }

    /// Number of recorded samples.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Newest recorded position.
    pub fn last_position(&self) -> NVec2 {
        self.positions[self.positions.len() - 1]
    }

    /// Second-newest recorded position (the Verlet back-point).
    pub fn prev_position(&self) -> NVec2 {
        self.positions[self.positions.len() - 2]
    }

    /// Position sample at index `t`. `t` must be a recorded index.
    pub fn position(&self, t: usize) -> NVec2 {
        self.positions[t]
    }

    /// Velocity sample at index `t`. `t` must be a recorded index.
    pub fn velocity(&self, t: usize) -> NVec2 {
        self.velocities[t]
    }

    /// Configured retention cap (meaningful only when point limits are on).
    pub fn max_points(&self) -> usize {
        self.max_points
    }

    /// Iterate over recorded positions, oldest first.
    pub fn positions(&self) -> impl Iterator<Item = &NVec2> {
        self.positions.iter()
    }
}

/// A charged point mass with per-force motion flags and its trajectory.
///
/// The two flags gate whether the matching force law may accelerate this
/// particle; a particle with both flags off is frozen in place but still
/// exerts forces on the others.
#[derive(Debug, Clone)]
pub struct Particle {
    pub charge: f64, // signed charge
    pub mass: f64, // mass, positive
    pub electrically_movable: bool, // Coulomb force may move this particle
    pub gravitationally_movable: bool, // gravity may move this particle
    pub dt: f64, // step size, positive
    pub color: String, // display tag carried through save files
    pub origin: NVec2, // seed position, restored on reset
    pub speed: f64, // seed speed, restored on reset
    pub angle: f64, // launch angle in degrees
    pub vel: NVec2, // current velocity
    pub acc: NVec2, // scratch acceleration from the latest force pass
    pub history: History,
}

impl Particle {
    /// Create a particle at (`posx`, `posy`) launched at `speed` along
    /// `angle` (degrees). The history is seeded with the start position and
    /// the Euler point one `dt` later, both carrying the launch velocity.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        posx: f64,
        posy: f64,
        charge: f64,
        mass: f64,
        speed: f64,
        angle: f64,
        dt: f64,
        electrically_movable: bool,
        gravitationally_movable: bool,
        max_points: usize,
    ) -> Self {
        let origin = NVec2::new(posx, posy);
        let rad = angle.to_radians();
        let vel = NVec2::new(speed * rad.cos(), speed * rad.sin());
        let history = History::with_seed(origin, origin + dt * vel, vel, max_points);
        Self {
            charge,
            mass,
            electrically_movable,
            gravitationally_movable,
            dt,
            color: "blue".to_string(),
            origin,
            speed,
            angle,
            vel,
            acc: NVec2::zeros(),
            history,
        }
    }

    /// Builder-style color override.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Whether any force law is allowed to move this particle.
    pub fn movable(&self) -> bool {
        self.electrically_movable || self.gravitationally_movable
    }

    /// Newest recorded position.
    pub fn position(&self) -> NVec2 {
        self.history.last_position()
    }

    /// Configured history retention cap.
    pub fn max_points(&self) -> usize {
        self.history.max_points()
    }

    /// Return the particle to its seed state: recompute the launch velocity
    /// from `speed`/`angle`, reseed the two-sample history from `origin`, and
    /// clear the scratch acceleration. Works even after a bounded run has
    /// trimmed the seed samples out of the window.
    pub fn reset(&mut self) {
        let rad = self.angle.to_radians();
        self.vel = NVec2::new(self.speed * rad.cos(), self.speed * rad.sin());
        self.acc = NVec2::zeros();
        self.history = History::with_seed(
            self.origin,
            self.origin + self.dt * self.vel,
            self.vel,
            self.history.max_points(),
        );
    }
}

/// The ordered particle collection driven by the integrators.
///
/// Order matters: force passes visit pairs in index order and save files
/// preserve it.
#[derive(Debug, Clone, Default)]
pub struct World {
    pub particles: Vec<Particle>,
}

impl World {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Append a particle at the end of the order.
    pub fn add(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Remove and return the particle at `index`; out-of-range indices are a
    /// no-op returning `None`.
    pub fn remove(&mut self, index: usize) -> Option<Particle> {
        if index < self.particles.len() {
            Some(self.particles.remove(index))
        } else {
            None
        }
    }

    /// Swap the particles at `a` and `b`; out-of-range indices are a no-op.
    pub fn reorder(&mut self, a: usize, b: usize) {
        if a < self.particles.len() && b < self.particles.len() {
            self.particles.swap(a, b);
        }
    }

    /// Step size for the current run, read from the first particle.
    pub fn dt(&self) -> Option<f64> {
        self.particles.first().map(|p| p.dt)
    }

    /// Newest recorded position of every particle, in index order.
    pub fn current_positions(&self) -> Vec<NVec2> {
        self.particles.iter().map(|p| p.position()).collect()
    }

    /// Reset every particle to its seed state.
    pub fn reset(&mut self) {
        for p in self.particles.iter_mut() {
            p.reset();
        }
    }
}
