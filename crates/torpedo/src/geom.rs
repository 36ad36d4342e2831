//! Geometry aliases over `euclid`.

pub type Unit = euclid::UnknownUnit;

pub type Position = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type BoundingBox = euclid::Box2D<f64, Unit>;

pub fn position(x: f64, y: f64) -> Position {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

/// Unit-length direction from `from` to `to`.
///
/// Returns the zero vector when the two positions coincide. Forces multiply
/// this result by an intensity scalar, so the zero fallback is a contract:
/// a NaN here would silently poison every later iteration.
pub fn unit_vector(from: Position, to: Position) -> Vector {
    let v = to - from;
    let length = v.length();
    if length == 0.0 { Vector::zero() } else { v / length }
}
