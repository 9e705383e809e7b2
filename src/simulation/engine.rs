//! High-level run control for the simulation
//!
//! `Engine` bundles the run policy (scheme choice, pause flag, single-step
//! mode, observer cadence) and drives the selected integrator over the
//! configured span. It owns no simulation state; the world, forces, and
//! parameters are passed in per run.

use crate::configuration::config::IntegratorConfig;

use super::forces::InteractionSet;
use super::integrator;
use super::params::Parameters;
use super::states::World;

#[derive(Debug, Clone)]
pub struct Engine {
    pub scheme: IntegratorConfig, // which stepping scheme drives the run
    pub single_step: bool, // run exactly one step, for inspecting a single update
    pub paused: bool, // cooperative pause: iterations tick but do not step
    pub update_period: usize, // observer cadence for run_with, in steps
}

impl Engine {
    pub fn new(scheme: IntegratorConfig) -> Self {
        Self {
            scheme,
            single_step: false,
            paused: false,
            update_period: 10,
        }
    }

    /// Number of integrator ticks covering `t_needed` at the world's step
    /// size. Spans shorter than two steps plan zero ticks.
    pub fn planned_steps(&self, sys: &World, params: &Parameters) -> usize {
        match sys.dt() {
            Some(h) => ((params.t_needed / h) as usize).saturating_sub(2),
            None => 0,
        }
    }

    /// Flip the cooperative pause flag.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Run the full span (or one step in single-step mode) with no observer.
    pub fn run(&self, sys: &mut World, forces: &InteractionSet, params: &Parameters) {
        self.run_with(sys, forces, params, |_, _| {});
    }

    /// Run like [`Engine::run`], invoking `observer` with the world and the
    /// step index every `update_period` steps, starting at step 0
    pub fn run_with<F>(
        &self,
        sys: &mut World,
        forces: &InteractionSet,
        params: &Parameters,
        mut observer: F,
    ) where
        F: FnMut(&World, usize),
    {
        if sys.is_empty() {
            return;
        }
        let steps = if self.single_step {
            1
        } else {
            self.planned_steps(sys, params)
        };
        log::info!(
            "running {} particles for {} steps with {:?}",
            sys.len(),
            steps,
            self.scheme
        );

        for i in 0..steps {
            // A paused iteration is consumed, not deferred
            if self.paused {
                continue;
            }
            integrator::step(sys, forces, params, &self.scheme);
            if self.update_period > 0 && i % self.update_period == 0 {
                observer(sys, i);
            }
        }
    }
}
