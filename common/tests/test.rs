use approx::assert_relative_eq;
use common::shapes::{transform_point, Aabb, Circle, Mat3, Rect, ShapeEnum, Vec2};

#[test]
fn test_aabb_overlap_is_strict() {
    let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
    let b = Aabb::new(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));
    // Touching edges do not count as overlapping.
    assert!(!a.intersects(&b));
    assert!(!b.intersects(&a));

    let c = Aabb::new(Vec2::new(0.5, 0.5), Vec2::new(1.5, 1.5));
    assert!(a.intersects(&c));
    assert!(c.intersects(&a));

    let far = Aabb::new(Vec2::new(5.0, 5.0), Vec2::new(6.0, 6.0));
    assert!(!a.intersects(&far));
}

#[test]
fn test_aabb_containment_is_strict() {
    let outer = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    let inner = Aabb::new(Vec2::new(1.0, 1.0), Vec2::new(9.0, 9.0));
    assert!(outer.contains(&inner));
    assert!(!inner.contains(&outer));

    let flush = Aabb::new(Vec2::new(0.0, 1.0), Vec2::new(9.0, 9.0));
    assert!(!outer.contains(&flush));
    assert!(!outer.contains(&outer));
}

#[test]
fn test_circle_bounding_box() {
    let circle = Circle::new(Vec2::new(3.0, -2.0), 1.5);
    let bb = circle.bounding_box();
    assert_relative_eq!(bb.min.x, 1.5);
    assert_relative_eq!(bb.min.y, -3.5);
    assert_relative_eq!(bb.max.x, 4.5);
    assert_relative_eq!(bb.max.y, -0.5);
}

#[test]
fn test_rect_bounding_box_axis_aligned() {
    let rect = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 2.0);
    let bb = rect.bounding_box();
    assert_relative_eq!(bb.min.x, 0.0);
    assert_relative_eq!(bb.min.y, -1.0);
    assert_relative_eq!(bb.max.x, 10.0);
    assert_relative_eq!(bb.max.y, 1.0);
}

#[test]
fn test_rect_bounding_box_diagonal() {
    // 45 degree segment; extrusion half-width of 1 along the perpendicular.
    let h = 2.0 * std::f32::consts::SQRT_2;
    let rect = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0), h);
    let bb = rect.bounding_box();
    assert_relative_eq!(bb.min.x, -1.0, epsilon = 1e-5);
    assert_relative_eq!(bb.min.y, -1.0, epsilon = 1e-5);
    assert_relative_eq!(bb.max.x, 11.0, epsilon = 1e-5);
    assert_relative_eq!(bb.max.y, 11.0, epsilon = 1e-5);
}

#[test]
fn test_rect_zero_length_segment_is_a_point() {
    let rect = Rect::new(Vec2::new(3.0, 4.0), Vec2::new(3.0, 4.0), 2.0);
    let bb = rect.bounding_box();
    assert!(bb.min.x.is_finite() && bb.min.y.is_finite());
    assert_relative_eq!(bb.min.x, 3.0);
    assert_relative_eq!(bb.max.x, 3.0);
    assert_relative_eq!(bb.min.y, 4.0);
    assert_relative_eq!(bb.max.y, 4.0);
}

#[test]
fn test_transform_point_translation() {
    let m = Mat3::new_translation(&Vec2::new(2.0, -3.0));
    let p = transform_point(&m, Vec2::new(1.0, 1.0));
    assert_relative_eq!(p.x, 3.0);
    assert_relative_eq!(p.y, -2.0);
}

#[test]
fn test_shape_transform_recomputes_bounding_box() {
    let mut shape = ShapeEnum::Circle(Circle::new(Vec2::new(0.0, 0.0), 1.0));
    shape.transform(&Mat3::new_translation(&Vec2::new(5.0, 0.0)));
    let bb = shape.bounding_box();
    assert_relative_eq!(bb.min.x, 4.0);
    assert_relative_eq!(bb.max.x, 6.0);

    let mut wall = ShapeEnum::Rect(Rect::new(
        Vec2::new(0.0, 0.0),
        Vec2::new(4.0, 0.0),
        1.0,
    ));
    wall.transform(&Mat3::new_rotation(std::f32::consts::FRAC_PI_2));
    let bb = wall.bounding_box();
    // Segment now runs from (0, 0) to (0, 4).
    assert_relative_eq!(bb.min.y, 0.0, epsilon = 1e-5);
    assert_relative_eq!(bb.max.y, 4.0, epsilon = 1e-5);
    assert_relative_eq!(bb.min.x, -0.5, epsilon = 1e-5);
    assert_relative_eq!(bb.max.x, 0.5, epsilon = 1e-5);
}
