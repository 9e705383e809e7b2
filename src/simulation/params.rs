//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - coupling constants for the two force laws (`g`, `k`),
//! - total simulated time span,
//! - trajectory history bounding,
//! - acceptance tolerance for the Bulirsch-Stoer step

#[derive(Debug, Clone)]
pub struct Parameters {
    pub g: f64, // gravitational constant
    pub k: f64, // Coulomb constant
    pub t_needed: f64, // total simulated time span
    pub use_point_limits: bool, // trim histories to each particle's max_points
    pub tolerance: f64, // Bulirsch-Stoer acceptance tolerance
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            g: 1.0,
            k: 1.0,
            t_needed: 10.0,
            use_point_limits: false,
            tolerance: 1e-8,
        }
    }
}
