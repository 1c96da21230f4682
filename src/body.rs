use crate::vector::Vector2;

/// Stable identity of a body, assigned by the engine.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub u64);

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A point mass taking part in the simulation.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Position vector.
    pos: Vector2,
    /// Velocity vector.
    vel: Vector2,
    /// Mass of the body, always positive.
    mass: f64,
    /// Collision radius, never negative.
    radius: f64,
    /// Engine-assigned identity.
    id: BodyId,
}

impl Body {
    /// Creates a body at rest at `(x, y)`.
    /// The id stays `BodyId(0)` until the engine stamps it.
    pub fn new(x: f64, y: f64, mass: f64, radius: f64) -> Self {
        Self {
            pos: Vector2::new(x, y),
            vel: Vector2::zero(),
            mass,
            radius,
            id: BodyId::default(),
        }
    }

    /// Sets the initial velocity.
    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.vel = Vector2::new(vx, vy);
        self
    }

    /// Identity stamped by the engine.
    pub fn id(&self) -> BodyId {
        self.id
    }

    /// Position vector.
    pub fn pos(&self) -> Vector2 {
        self.pos
    }

    /// Velocity vector.
    pub fn velocity(&self) -> Vector2 {
        self.vel
    }

    /// Mass of the body.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Collision radius of the body.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Moves the body to `pos`.
    pub fn set_pos(&mut self, pos: Vector2) {
        self.pos = pos;
    }

    /// Replaces the velocity.
    pub fn set_velocity(&mut self, vel: Vector2) {
        self.vel = vel;
    }

    /// Replaces the mass.
    pub fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
    }

    /// Replaces the collision radius.
    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    pub(crate) fn set_id(&mut self, id: BodyId) {
        self.id = id;
    }

    /// Linear momentum `m·v`.
    pub fn momentum(&self) -> Vector2 {
        self.vel * self.mass
    }

    /// Kinetic energy `m·v²/2`.
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.vel.mag_sq()
    }

    /// Checks the construction invariants: finite state, positive mass,
    /// non-negative radius. Returns a description of the first violation.
    pub(crate) fn invalid_reason(&self) -> Option<&'static str> {
        let finite = self.pos.x.is_finite()
            && self.pos.y.is_finite()
            && self.vel.x.is_finite()
            && self.vel.y.is_finite();
        if !finite {
            Some("position and velocity must be finite")
        } else if !(self.mass.is_finite() && self.mass > 0.0) {
            Some("mass must be positive and finite")
        } else if !(self.radius.is_finite() && self.radius >= 0.0) {
            Some("radius must be non-negative and finite")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_body_is_at_rest() {
        let b = Body::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(b.pos(), Vector2::new(1.0, 2.0));
        assert_eq!(b.velocity(), Vector2::zero());
        assert_eq!(b.mass(), 3.0);
        assert_eq!(b.radius(), 4.0);
        assert_eq!(b.id(), BodyId(0));
    }

    #[test]
    fn momentum_and_energy() {
        let b = Body::new(0.0, 0.0, 2.0, 1.0).with_velocity(3.0, 4.0);
        assert_eq!(b.momentum(), Vector2::new(6.0, 8.0));
        assert_eq!(b.kinetic_energy(), 25.0);
    }

    #[test]
    fn validation_rejects_bad_mass_and_radius() {
        assert!(Body::new(0.0, 0.0, 1.0, 0.0).invalid_reason().is_none());
        assert!(Body::new(0.0, 0.0, 0.0, 1.0).invalid_reason().is_some());
        assert!(Body::new(0.0, 0.0, -1.0, 1.0).invalid_reason().is_some());
        assert!(Body::new(0.0, 0.0, 1.0, -0.5).invalid_reason().is_some());
        assert!(Body::new(f64::NAN, 0.0, 1.0, 1.0).invalid_reason().is_some());
        assert!(
            Body::new(0.0, 0.0, 1.0, 1.0)
                .with_velocity(f64::INFINITY, 0.0)
                .invalid_reason()
                .is_some()
        );
    }
}
