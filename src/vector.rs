//! 2D vector type used for positions, velocities and forces.

/// Double precision 2D vector.
///
/// All arithmetic (`+`, `-`, unary `-`, `* f64`, `/ f64`) returns a new value.
pub type Vector2 = ultraviolet::DVec2;

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Vector2, b: Vector2) -> f64 {
    (a - b).mag()
}

/// Unit vector pointing from `from` towards `to`.
///
/// Returns `None` when the two points coincide.
#[inline]
pub fn unit_vector(from: Vector2, to: Vector2) -> Option<Vector2> {
    let d = to - from;
    let dist = d.mag();
    if dist == 0.0 {
        return None;
    }
    Some(d / dist)
}
