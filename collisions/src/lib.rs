use common::shapes::{Circle, Rect, ShapeEnum, Vec2};
use nalgebra::clamp;

/// Payload delivered for every circle-vs-rectangle overlap. `normal`
/// points from the nearest point on the rectangle's center segment
/// towards the circle center and is deliberately left unnormalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleRectCollideInfo {
    pub normal: Vec2,
    pub circle_id: u32,
    pub rect_id: u32,
}

/// Closest-point test of a circle against an extruded segment.
///
/// The circle center is projected onto `[start, end]` with the scalar
/// projection clamped to the segment; the shapes overlap iff the squared
/// distance to that point is strictly below `(radius + height)^2`. A
/// zero-length segment is treated as the point `start`.
pub fn circle_rect_normal(rect: &Rect, circle: &Circle) -> Option<Vec2> {
    let axis = rect.end - rect.start;
    let len_sq = axis.dot(&axis);
    let t = if len_sq > 0.0 {
        clamp(axis.dot(&(circle.pos - rect.start)) / len_sq, 0.0, 1.0)
    } else {
        0.0
    };
    let nearest = rect.start + axis * t;
    let offset = circle.pos - nearest;
    let range = circle.radius + rect.height;
    if offset.dot(&offset) < range * range {
        Some(offset)
    } else {
        None
    }
}

/// Pairwise narrow-phase dispatch over the two shape kinds.
///
/// Only circle/rect pairings produce an event; the info always names the
/// circle and rectangle ids by role, regardless of argument order.
/// Circle-vs-circle and rect-vs-rect are defined no-ops, not omissions.
pub fn test_pair(
    id_a: u32,
    a: &ShapeEnum,
    id_b: u32,
    b: &ShapeEnum,
) -> Option<CircleRectCollideInfo> {
    match (a, b) {
        (ShapeEnum::Circle(circle), ShapeEnum::Rect(rect)) => {
            circle_rect_normal(rect, circle).map(|normal| CircleRectCollideInfo {
                normal,
                circle_id: id_a,
                rect_id: id_b,
            })
        }
        (ShapeEnum::Rect(rect), ShapeEnum::Circle(circle)) => {
            circle_rect_normal(rect, circle).map(|normal| CircleRectCollideInfo {
                normal,
                circle_id: id_b,
                rect_id: id_a,
            })
        }
        (ShapeEnum::Circle(_), ShapeEnum::Circle(_)) => None,
        (ShapeEnum::Rect(_), ShapeEnum::Rect(_)) => None,
    }
}
