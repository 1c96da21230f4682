//! Explicit Euler integration with an adaptive or a caller-chosen step.
//!
//! The adaptive search rescales `dt` until the largest displacement of any
//! body in one step lands inside `[min_travel, max_travel]`:
//! - too far: `dt ← dt · max_travel / travel`
//! - too short: `dt ← dt · min_travel / travel`
//!
//! Trials never touch the bodies; only an accepted [`Trial`] is committed.

use tracing::{debug, trace, warn};

use crate::body::Body;
use crate::collision::{self, Merge};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::forces::ForceField;
use crate::vector::Vector2;

/// Proposed state of every body after one Euler step of size `dt`.
#[derive(Clone, Debug, PartialEq)]
pub struct Trial {
    pub dt: f64,
    pub positions: Vec<Vector2>,
    pub velocities: Vec<Vector2>,
    /// Largest `|v'·dt|` over all bodies.
    pub max_travel: f64,
}

impl Trial {
    /// Semi-implicit Euler: `v' = v + a·dt`, then `p' = p + v'·dt`.
    pub fn euler(bodies: &[Body], accels: &[Vector2], dt: f64) -> Self {
        let n = bodies.len();
        let mut positions = Vec::with_capacity(n);
        let mut velocities = Vec::with_capacity(n);
        let mut max_travel = 0.0_f64;

        for (body, a) in bodies.iter().zip(accels) {
            let dv = *a * dt;
            let v = dv + body.velocity();
            let step = v * dt;
            let p = body.pos() + step;

            // measured on the step itself; |p' - p| loses sub-ulp moves far from the origin
            let travel = step.mag();
            if travel > max_travel || travel.is_nan() {
                max_travel = travel;
            }

            velocities.push(v);
            positions.push(p);
        }

        Self {
            dt,
            positions,
            velocities,
            max_travel,
        }
    }

    /// Writes the proposed positions and velocities back to `bodies`.
    pub fn commit(&self, bodies: &mut [Body]) {
        for ((body, p), v) in bodies.iter_mut().zip(&self.positions).zip(&self.velocities) {
            body.set_pos(*p);
            body.set_velocity(*v);
        }
    }
}

/// Drives both integration policies over a body list.
#[derive(Clone, Copy, Debug)]
pub struct StepController {
    /// Gravity used to derive accelerations.
    pub field: ForceField,
    /// Smallest accepted per-step displacement of the fastest body.
    pub min_travel: f64,
    /// Largest accepted per-step displacement of the fastest body.
    pub max_travel: f64,
    /// Rescale attempts before [`adapt`](Self::adapt) gives up.
    pub max_iterations: u32,
}

impl Default for StepController {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl StepController {
    /// Controller using the gravity and travel band of `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            field: ForceField::new(config.gravitational_constant),
            min_travel: config.min_travel,
            max_travel: config.max_travel,
            max_iterations: config.max_iterations,
        }
    }

    /// Searches for a step size, starting from `dt`, whose largest
    /// displacement lies inside the travel band.
    ///
    /// An empty body list yields an empty trial at the unchanged `dt`.
    pub fn adapt(&self, bodies: &[Body], mut dt: f64) -> Result<Trial> {
        if bodies.is_empty() {
            return Ok(Trial::euler(bodies, &[], dt));
        }

        // forces depend on positions only, not on dt
        let accels = self.field.accelerations(bodies)?;

        for iteration in 1..=self.max_iterations {
            let trial = Trial::euler(bodies, &accels, dt);
            let travel = trial.max_travel;

            if !travel.is_finite() || travel == 0.0 {
                warn!(dt, travel, "step size cannot be rescaled");
                return Err(EngineError::StepConvergence {
                    iterations: iteration,
                    dt,
                    max_travel: travel,
                });
            }

            if travel > self.max_travel {
                dt = dt * self.max_travel / travel;
                debug!(iteration, travel, dt, "shrinking step");
            } else if travel < self.min_travel {
                dt = dt * self.min_travel / travel;
                debug!(iteration, travel, dt, "growing step");
            } else {
                trace!(iteration, travel, dt, "step accepted");
                return Ok(trial);
            }
        }

        let last = Trial::euler(bodies, &accels, dt);
        warn!(
            iterations = self.max_iterations,
            dt,
            travel = last.max_travel,
            "step size search exhausted"
        );
        Err(EngineError::StepConvergence {
            iterations: self.max_iterations,
            dt,
            max_travel: last.max_travel,
        })
    }

    /// Advances `bodies` by exactly `dt`.
    ///
    /// Every pair is first tested for overlap: overlapping bodies merge and
    /// contribute no force, all other pairs accumulate gravity. The summed
    /// forces are then applied with one Euler update. On error `bodies` may be
    /// partially merged, so callers should work on a copy.
    pub fn step_by(&self, bodies: &mut Vec<Body>, dt: f64) -> Result<Vec<Merge>> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(EngineError::InvalidStep(dt));
        }

        let mut forces = vec![Vector2::zero(); bodies.len()];
        let mut merges = Vec::new();

        let mut i = 0;
        while i + 1 < bodies.len() {
            let mut j = i + 1;
            while j < bodies.len() {
                if collision::overlaps(&bodies[i], &bodies[j]) {
                    let m = collision::merge(bodies, i, j);
                    forces.swap_remove(m.removed);
                    if m.removed == i {
                        // slot i now holds another body; scan its pairs from the start
                        j = i + 1;
                    }
                    // otherwise slot j holds the moved body and is examined next
                    merges.push(m);
                    continue;
                }

                let f = self.field.pair_force(&bodies[i], &bodies[j])?;
                forces[i] += f;
                forces[j] += -f;
                j += 1;
            }
            i += 1;
        }

        for (body, f) in bodies.iter_mut().zip(forces) {
            let a = f / body.mass();
            let v = body.velocity() + a * dt;
            body.set_velocity(v);
            body.set_pos(body.pos() + v * dt);
        }

        trace!(dt, bodies = bodies.len(), merges = merges.len(), "fixed step applied");
        Ok(merges)
    }
}
