//! Direct pairwise Newtonian gravity.

use crate::body::Body;
use crate::config::G;
use crate::error::{EngineError, Result};
use crate::vector::{Vector2, distance};

/// Computes gravitational forces by direct O(N²) summation.
///
/// Pairs are always visited as `(i, j)` with `i < j` in ascending order, so a
/// given body list produces bit-identical results on every evaluation.
#[derive(Clone, Copy, Debug)]
pub struct ForceField {
    /// Gravitational constant.
    pub g: f64,
}

impl Default for ForceField {
    fn default() -> Self {
        Self::new(G)
    }
}

impl ForceField {
    pub fn new(g: f64) -> Self {
        Self { g }
    }

    /// Force exerted on `a` by `b`, pointing from `a` towards `b`.
    ///
    /// Fails with [`EngineError::DegenerateGeometry`] when both bodies share a
    /// position.
    pub fn pair_force(&self, a: &Body, b: &Body) -> Result<Vector2> {
        let dist = distance(a.pos(), b.pos());
        if dist == 0.0 {
            return Err(EngineError::DegenerateGeometry {
                first: a.id(),
                second: b.id(),
            });
        }

        let masses = a.mass() * b.mass();
        let fg = self.g * masses / (dist * dist);

        let direction = (b.pos() - a.pos()) / dist;
        Ok(direction * fg)
    }

    /// Net force on every body, indexed like `bodies`.
    pub fn net_forces(&self, bodies: &[Body]) -> Result<Vec<Vector2>> {
        let n = bodies.len();
        let mut forces = vec![Vector2::zero(); n];

        for i in 0..n {
            for j in (i + 1)..n {
                let f = self.pair_force(&bodies[i], &bodies[j])?;
                forces[i] += f;
                forces[j] += -f;
            }
        }

        Ok(forces)
    }

    /// Acceleration `F / m` of every body, indexed like `bodies`.
    pub fn accelerations(&self, bodies: &[Body]) -> Result<Vec<Vector2>> {
        let forces = self.net_forces(bodies)?;
        Ok(forces
            .into_iter()
            .zip(bodies)
            .map(|(f, b)| f / b.mass())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyId;

    fn body(id: u64, x: f64, y: f64, mass: f64) -> Body {
        let mut b = Body::new(x, y, mass, 0.0);
        b.set_id(BodyId(id));
        b
    }

    #[test]
    fn two_body_magnitude_matches_newton() {
        let a = body(0, 0.0, 0.0, 5.97e24);
        let b = body(1, 3.84e8, 0.0, 7.35e22);

        let forces = ForceField::default().net_forces(&[a, b]).unwrap();
        let expected = G * 5.97e24 * 7.35e22 / (3.84e8 * 3.84e8);

        assert!((forces[0].mag() - expected).abs() / expected < 1e-12);
        assert!((forces[1].mag() - expected).abs() / expected < 1e-12);
        // attractive: a is pulled towards +x, b towards -x
        assert!(forces[0].x > 0.0);
        assert!(forces[1].x < 0.0);
        assert_eq!(forces[0].y, 0.0);
    }

    #[test]
    fn pair_forces_are_reciprocal() {
        let bodies = [
            body(0, 0.0, 0.0, 1.0e20),
            body(1, 1.0e6, 2.0e6, 3.0e21),
            body(2, -4.0e6, 5.0e5, 7.0e19),
            body(3, 2.5e6, -3.0e6, 1.1e22),
        ];
        let field = ForceField::default();

        for i in 0..bodies.len() {
            for j in 0..bodies.len() {
                if i == j {
                    continue;
                }
                let f_ij = field.pair_force(&bodies[i], &bodies[j]).unwrap();
                let f_ji = field.pair_force(&bodies[j], &bodies[i]).unwrap();
                assert_eq!(f_ij, -f_ji);
            }
        }
    }

    #[test]
    fn net_forces_sum_to_zero() {
        let bodies = [
            body(0, 0.0, 0.0, 1.0e20),
            body(1, 1.0e6, 2.0e6, 3.0e21),
            body(2, -4.0e6, 5.0e5, 7.0e19),
        ];
        let forces = ForceField::default().net_forces(&bodies).unwrap();
        let total = forces.iter().fold(Vector2::zero(), |acc, f| acc + *f);
        let scale = forces.iter().map(|f| f.mag()).fold(0.0, f64::max);

        assert!(total.mag() / scale < 1e-12);
    }

    #[test]
    fn coincident_bodies_are_degenerate() {
        let bodies = [body(4, 1.0, 1.0, 1.0), body(9, 1.0, 1.0, 2.0)];
        let err = ForceField::default().net_forces(&bodies).unwrap_err();

        assert_eq!(
            err,
            EngineError::DegenerateGeometry {
                first: BodyId(4),
                second: BodyId(9)
            }
        );
    }

    #[test]
    fn accelerations_divide_by_own_mass() {
        let bodies = [body(0, 0.0, 0.0, 2.0e10), body(1, 100.0, 0.0, 4.0e10)];
        let field = ForceField::default();
        let forces = field.net_forces(&bodies).unwrap();
        let accels = field.accelerations(&bodies).unwrap();

        assert_eq!(accels[0], forces[0] / 2.0e10);
        assert_eq!(accels[1], forces[1] / 4.0e10);
    }

    #[test]
    fn empty_and_single_body_have_no_force() {
        let field = ForceField::default();
        assert!(field.net_forces(&[]).unwrap().is_empty());
        assert_eq!(
            field.net_forces(&[body(0, 1.0, 2.0, 3.0)]).unwrap(),
            vec![Vector2::zero()]
        );
    }
}
