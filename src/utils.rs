use crate::body::Body;
use crate::config::G;
use crate::vector::Vector2;

/// Generates `n` bodies on circular orbits in a disc around a heavy centre.
///
/// - Body 0 is the central mass `central_mass` at the origin, at rest.
/// - The others are spread uniformly by area between `inner_radius` and an
///   outer radius growing with `sqrt(n)`.
/// - Orbital speeds use the mass enclosed by each orbit: `v = sqrt(G·M / r)`.
///
/// The same `seed` always produces the same bodies.
pub fn uniform_disc(n: usize, central_mass: f64, inner_radius: f64, seed: u64) -> Vec<Body> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let outer_radius = inner_radius * 4.0 * (n.max(1) as f64).sqrt();

    let mut bodies: Vec<Body> = Vec::with_capacity(n);
    if n == 0 {
        return bodies;
    }
    bodies.push(Body::new(0.0, 0.0, central_mass, inner_radius * 0.1));

    let satellite_mass = central_mass * 1e-6;
    while bodies.len() < n {
        let a = rng.f64() * std::f64::consts::TAU;
        let (sin, cos) = a.sin_cos();

        // uniform in area between the two radii
        let t = inner_radius / outer_radius;
        let r = (rng.f64() * (1.0 - t * t) + t * t).sqrt() * outer_radius;

        bodies.push(Body::new(cos * r, sin * r, satellite_mass, 1.0).with_velocity(sin, -cos));
    }

    // closest first, so the enclosed mass can be accumulated
    bodies.sort_by(|a, b| a.pos().mag_sq().total_cmp(&b.pos().mag_sq()));

    let mut enclosed = 0.0;
    for body in &mut bodies {
        enclosed += body.mass();
        if body.pos() == Vector2::zero() {
            continue;
        }
        let v = (G * enclosed / body.pos().mag()).sqrt();
        body.set_velocity(body.velocity() * v);
    }

    bodies
}
