//! Overlap detection and perfectly inelastic merging.
//!
//! When two bodies overlap the heavier one absorbs the lighter:
//! - mass adds up: `m = m_h + m_l`
//! - radius becomes the mass-weighted mean `(r_h·m_h + r_l·m_l) / m`
//! - position and velocity of the heavier body are kept as they are
//!
//! Momentum is deliberately not conserved by this rule.

use crate::body::Body;
use crate::vector::distance;

/// Result of absorbing one body into another.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Merge {
    /// The surviving body, already grown.
    pub heavier: Body,
    /// The absorbed body as it was before the merge.
    pub lighter: Body,
    /// Slot the lighter body occupied before it was removed.
    pub removed: usize,
}

/// True when the bodies are closer than the sum of their radii.
pub fn overlaps(a: &Body, b: &Body) -> bool {
    a.radius() + b.radius() > distance(a.pos(), b.pos())
}

/// Orders the pair `(i, j)` as `(heavier, lighter)`.
///
/// Equal masses resolve in favour of the lower id.
pub fn heavier_first(bodies: &[Body], i: usize, j: usize) -> (usize, usize) {
    let (a, b) = (&bodies[i], &bodies[j]);
    let a_wins = a.mass() > b.mass() || (a.mass() == b.mass() && a.id() < b.id());
    if a_wins { (i, j) } else { (j, i) }
}

/// Grown state of `heavy` after absorbing `light`.
pub fn absorb(heavy: &Body, light: &Body) -> Body {
    let mass = heavy.mass() + light.mass();
    let radius = (heavy.radius() * heavy.mass() + light.radius() * light.mass()) / mass;

    let mut merged = *heavy;
    merged.set_mass(mass);
    merged.set_radius(radius);
    merged
}

/// Merges the bodies at `i` and `j` in place.
///
/// The lighter body is removed with `swap_remove`, so the last body in the
/// list may move into its slot. No other body changes.
pub fn merge(bodies: &mut Vec<Body>, i: usize, j: usize) -> Merge {
    let (h, l) = heavier_first(bodies, i, j);
    let lighter = bodies[l];

    bodies[h] = absorb(&bodies[h], &lighter);
    let heavier = bodies[h];
    bodies.swap_remove(l);

    Merge {
        heavier,
        lighter,
        removed: l,
    }
}

/// Merges overlapping pairs until no two bodies overlap.
///
/// Each round merges the first overlapping pair in ascending `(i, j)` order,
/// so a radius that grows during a merge is checked against every body again.
pub fn resolve_overlaps(bodies: &mut Vec<Body>) -> Vec<Merge> {
    let mut merges = Vec::new();

    while let Some((i, j)) = first_overlap(bodies) {
        merges.push(merge(bodies, i, j));
    }

    merges
}

fn first_overlap(bodies: &[Body]) -> Option<(usize, usize)> {
    let n = bodies.len();
    (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .find(|&(i, j)| overlaps(&bodies[i], &bodies[j]))
}
