use approx::assert_relative_eq;
use collisions::{circle_rect_normal, test_pair};
use common::shapes::{Circle, Rect, ShapeEnum, Vec2};

fn wall() -> Rect {
    Rect::new(Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0), 0.5)
}

#[test]
fn test_circle_above_segment() {
    let circle = Circle::new(Vec2::new(0.0, 1.0), 1.0);
    let normal = circle_rect_normal(&wall(), &circle).expect("within range");
    assert_relative_eq!(normal.x, 0.0);
    assert_relative_eq!(normal.y, 1.0);
}

#[test]
fn test_boundary_distance_does_not_trigger() {
    // Distance is exactly radius + height; the comparison is strict.
    let circle = Circle::new(Vec2::new(0.0, 1.5), 1.0);
    assert!(circle_rect_normal(&wall(), &circle).is_none());

    let circle = Circle::new(Vec2::new(0.0, 1.499), 1.0);
    assert!(circle_rect_normal(&wall(), &circle).is_some());
}

#[test]
fn test_projection_clamps_to_segment_end() {
    let circle = Circle::new(Vec2::new(6.0, 0.0), 1.0);
    let normal = circle_rect_normal(&wall(), &circle).expect("clamped to end");
    assert_relative_eq!(normal.x, 1.0);
    assert_relative_eq!(normal.y, 0.0);

    let circle = Circle::new(Vec2::new(7.0, 0.0), 1.0);
    assert!(circle_rect_normal(&wall(), &circle).is_none());
}

#[test]
fn test_zero_length_segment_acts_as_point() {
    let point_rect = Rect::new(Vec2::new(2.0, 2.0), Vec2::new(2.0, 2.0), 0.5);
    let circle = Circle::new(Vec2::new(2.0, 3.0), 1.0);
    let normal = circle_rect_normal(&point_rect, &circle).expect("point within range");
    assert_relative_eq!(normal.x, 0.0);
    assert_relative_eq!(normal.y, 1.0);
}

#[test]
fn test_dispatch_is_asymmetric() {
    let a = ShapeEnum::Circle(Circle::new(Vec2::new(0.0, 0.0), 2.0));
    let b = ShapeEnum::Circle(Circle::new(Vec2::new(0.5, 0.0), 2.0));
    assert!(test_pair(1, &a, 2, &b).is_none());

    let r1 = ShapeEnum::Rect(wall());
    let r2 = ShapeEnum::Rect(Rect::new(Vec2::new(0.0, -1.0), Vec2::new(0.0, 1.0), 0.5));
    assert!(test_pair(3, &r1, 4, &r2).is_none());
}

#[test]
fn test_dispatch_assigns_ids_by_role() {
    let circle = ShapeEnum::Circle(Circle::new(Vec2::new(0.0, 1.0), 1.0));
    let rect = ShapeEnum::Rect(wall());

    let info = test_pair(10, &circle, 20, &rect).expect("overlapping pair");
    assert_eq!(info.circle_id, 10);
    assert_eq!(info.rect_id, 20);

    // Reversed argument order still reports the circle and rect ids by role.
    let info = test_pair(20, &rect, 10, &circle).expect("overlapping pair");
    assert_eq!(info.circle_id, 10);
    assert_eq!(info.rect_id, 20);
    assert_relative_eq!(info.normal.y, 1.0);
}
