use crate::{
    body::{Body, BodyId},
    collision::{self, Merge},
    config::EngineConfig,
    error::{EngineError, Result},
    events::SimulationEvents,
    stepper::StepController,
    vector::Vector2,
};

use tracing::{debug, info, trace};

/// Owns the bodies and advances them under mutual gravity.
///
/// Two integration policies are offered:
/// - [`step`](Self::step) picks `dt` itself so that the largest displacement
///   stays inside the configured travel band. It never merges bodies.
/// - [`step_by`](Self::step_by) uses the caller's `dt` and merges overlapping
///   pairs before applying forces.
///
/// Every call either commits a whole tick or leaves the engine untouched.
pub struct SimulationEngine {
    /// Live bodies. Order is only meaningful for pair iteration.
    bodies: Vec<Body>,
    /// Step size used as the first guess of the next adaptive step.
    dt: f64,
    /// Next id to hand out. Ids are never reused.
    next_id: u64,
    /// Completed ticks, both policies.
    frame: usize,
    config: EngineConfig,
    controller: StepController,
    observers: Vec<Box<dyn SimulationEvents>>,
}

impl std::fmt::Debug for SimulationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationEngine")
            .field("bodies", &self.bodies)
            .field("dt", &self.dt)
            .field("next_id", &self.next_id)
            .field("frame", &self.frame)
            .field("config", &self.config)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationEngine {
    pub fn new() -> Self {
        Self::build(EngineConfig::default())
    }

    /// Creates an engine with custom tuning, rejecting invalid settings.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        Self {
            bodies: Vec::new(),
            dt: config.initial_dt,
            next_id: 0,
            frame: 0,
            controller: StepController::from_config(&config),
            config,
            observers: Vec::new(),
        }
    }

    /// Registers a listener. Listeners are notified in registration order.
    pub fn add_events_observer(&mut self, observer: Box<dyn SimulationEvents>) {
        self.observers.push(observer);
    }

    /// Adds a body and returns the id stamped on it.
    pub fn add_object(&mut self, mut body: Body) -> Result<BodyId> {
        if let Some(reason) = body.invalid_reason() {
            return Err(EngineError::InvalidBody(reason));
        }

        let id = BodyId(self.next_id);
        self.next_id += 1;
        body.set_id(id);
        self.bodies.push(body);

        debug!(%id, mass = body.mass(), radius = body.radius(), "body added");
        for observer in &mut self.observers {
            observer.object_created(id, &body);
        }

        Ok(id)
    }

    /// Advances every body by exactly `dt`, merging overlapping pairs.
    pub fn step_by(&mut self, dt: f64) -> Result<()> {
        let mut bodies = self.bodies.clone();
        let merges = self.controller.step_by(&mut bodies, dt)?;

        self.bodies = bodies;
        self.frame += 1;

        self.notify_merges(&merges);
        self.notify_updated();
        Ok(())
    }

    /// Advances every body by an adaptively chosen step and returns it.
    ///
    /// With no bodies this is a no-op returning the current step size.
    pub fn step(&mut self) -> Result<f64> {
        if self.bodies.is_empty() {
            return Ok(self.dt);
        }

        let trial = self.controller.adapt(&self.bodies, self.dt)?;
        trial.commit(&mut self.bodies);
        self.dt = trial.dt;
        self.frame += 1;

        trace!(frame = self.frame, dt = self.dt, travel = trial.max_travel, "adaptive step committed");
        self.notify_updated();
        Ok(trial.dt)
    }

    /// Merges every overlapping pair without advancing time.
    ///
    /// Returns the number of merges performed.
    pub fn check_for_collisions(&mut self) -> usize {
        let merges = collision::resolve_overlaps(&mut self.bodies);
        self.notify_merges(&merges);
        merges.len()
    }

    /// Live bodies, in iteration order.
    pub fn objects(&self) -> &[Body] {
        &self.bodies
    }

    pub fn find(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id() == id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Current step size; the starting guess of the next [`step`](Self::step).
    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Sum of all body masses; unchanged by merges.
    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(Body::mass).sum()
    }

    /// Sum of `m·v` over live bodies.
    ///
    /// Not conserved across merges: the survivor keeps its own velocity.
    pub fn total_momentum(&self) -> Vector2 {
        self.bodies
            .iter()
            .fold(Vector2::zero(), |acc, b| acc + b.momentum())
    }

    fn notify_merges(&mut self, merges: &[Merge]) {
        for m in merges {
            info!(
                heavier = %m.heavier.id(),
                lighter = %m.lighter.id(),
                mass = m.heavier.mass(),
                radius = m.heavier.radius(),
                "bodies merged"
            );
            for observer in &mut self.observers {
                observer.objects_collided(&m.heavier, &m.lighter);
                observer.object_annihilated(&m.lighter);
            }
        }
    }

    fn notify_updated(&mut self) {
        for body in &self.bodies {
            for observer in &mut self.observers {
                observer.object_updated(body.id(), body);
            }
        }
    }
}
