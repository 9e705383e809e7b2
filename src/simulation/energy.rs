//! Total-energy diagnostics over recorded trajectories
//!
//! Kinetic energy always sums over every particle; the potential term picks
//! one force law via [`EnergyModel`], so electric and gravitational runs are
//! audited separately. Everything reads history samples, so the curves can
//! be computed after a run without replaying it.

use super::params::Parameters;
use super::states::World;

/// Which potential-energy law to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyModel {
    Electric,
    Gravitational,
}

/// Kinetic/potential split at one history index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyBreakdown {
    pub kinetic: f64,
    pub potential: f64,
    pub total: f64,
}

/// Energy of the whole system at history index `t`
///
/// `t` must be a recorded index for every particle. A coincident pair has
/// zero separation; its pair term divides by zero and the breakdown reports
/// the resulting infinity rather than masking it.
pub fn energy_at(sys: &World, t: usize, model: EnergyModel, params: &Parameters) -> EnergyBreakdown {
    // Kinetic: sum over every particle, movable or not
    let mut kinetic = 0.0;
    for p in &sys.particles {
        let v = p.history.velocity(t);
        kinetic += 0.5 * p.mass * v.norm_squared();
    }

    // Potential: sum over unordered pairs under the chosen law
    let mut potential = 0.0;
    let n = sys.len();
    for i in 0..n {
        let pi = &sys.particles[i];
        for j in (i + 1)..n {
            let pj = &sys.particles[j];
            let r = (pi.history.position(t) - pj.history.position(t)).norm();
            potential += match model {
                EnergyModel::Electric => params.k * pi.charge * pj.charge / r,
                EnergyModel::Gravitational => -params.g * pi.mass * pj.mass / r,
            };
        }
    }

    EnergyBreakdown {
        kinetic,
        potential,
        total: kinetic + potential,
    }
}

/// Energy at each interior history index, 1 ..= len-2
///
/// The seed sample and the newest sample are skipped, leaving the window
/// where every scheme has fully settled samples on both sides. `len` is the
/// shortest history in the world, so mixed retention caps stay in range.
pub fn energy_series(sys: &World, model: EnergyModel, params: &Parameters) -> Vec<EnergyBreakdown> {
    let len = sys
        .particles
        .iter()
        .map(|p| p.history.len())
        .min()
        .unwrap_or(0);
    (1..len.saturating_sub(1))
        .map(|t| energy_at(sys, t, model, params))
        .collect()
}

/// Signed drift of total energy from `target` over the interior window
pub fn energy_deviation(
    sys: &World,
    model: EnergyModel,
    params: &Parameters,
    target: f64,
) -> Vec<f64> {
    energy_series(sys, model, params)
        .iter()
        .map(|e| e.total - target)
        .collect()
}
