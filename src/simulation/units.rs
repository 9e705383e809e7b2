//! Conversion between simulation time and SI seconds
//!
//! A run in natural units (G = k = 1, unit masses and separations) maps onto
//! a physical system through the characteristic time of the matching SI
//! configuration; multiply simulated time by the scale to get seconds.

/// Coulomb constant, rounded to the usual two-figure value (N m^2 / C^2)
pub const COULOMB_CONSTANT_SI: f64 = 9.0e9;

/// CODATA gravitational constant (m^3 / (kg s^2))
pub const GRAVITATIONAL_CONSTANT_SI: f64 = 6.674_30e-11;

/// Characteristic time of an electrostatic two-body system: a particle of
/// `mass` kg circling a partner `distance` m away, charges in coulombs
///
/// t = sqrt(m r^3 / (k |q_a| |q_b|))
pub fn electrostatic_timescale(mass: f64, distance: f64, charge_a: f64, charge_b: f64) -> f64 {
    (mass * distance.powi(3) / (COULOMB_CONSTANT_SI * charge_a.abs() * charge_b.abs())).sqrt()
}

/// Characteristic time of a gravitational two-body system dominated by a
/// central mass of `central_mass` kg at `distance` m
///
/// t = sqrt(r^3 / (G M))
pub fn gravitational_timescale(distance: f64, central_mass: f64) -> f64 {
    (distance.powi(3) / (GRAVITATIONAL_CONSTANT_SI * central_mass)).sqrt()
}
