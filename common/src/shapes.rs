use nalgebra::{Matrix3, Vector2, Vector3};

pub type Vec2 = Vector2<f32>;
pub type Mat3 = Matrix3<f32>;

/// Applies a 3x3 homogeneous transform to a 2D point.
#[inline]
pub fn transform_point(transformation: &Mat3, point: Vec2) -> Vec2 {
    let h = transformation * Vector3::new(point.x, point.y, 1.0);
    Vec2::new(h.x, h.y)
}

/// Axis-aligned bounding box with a closed-interval convention: two boxes
/// that merely touch along an edge do not intersect.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Vec2]) -> Self {
        let mut min = points[0];
        let mut max = points[0];
        for p in &points[1..] {
            min.x = f32::min(min.x, p.x);
            min.y = f32::min(min.y, p.y);
            max.x = f32::max(max.x, p.x);
            max.y = f32::max(max.y, p.y);
        }
        Self { min, max }
    }

    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && other.max.x > self.min.x
            && self.max.y > other.min.y
            && other.max.y > self.min.y
    }

    /// Strict containment: `other` touching an edge of `self` does not count.
    #[inline]
    pub fn contains(&self, other: &Aabb) -> bool {
        self.min.x < other.min.x
            && other.max.x < self.max.x
            && self.min.y < other.min.y
            && other.max.y < self.max.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Circle {
    pub pos: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self { pos, radius }
    }

    pub fn bounding_box(&self) -> Aabb {
        let r = Vec2::new(self.radius, self.radius);
        Aabb::new(self.pos - r, self.pos + r)
    }

    pub fn transform(&mut self, transformation: &Mat3) {
        self.pos = transform_point(transformation, self.pos);
    }
}

/// A segment from `start` to `end` extruded perpendicular to itself, with
/// `height` as the extrusion half-width. A zero-length segment degenerates
/// to a point with no extrusion.
#[derive(Debug, Copy, Clone)]
pub struct Rect {
    pub start: Vec2,
    pub end: Vec2,
    pub height: f32,
}

impl Rect {
    pub fn new(start: Vec2, end: Vec2, height: f32) -> Self {
        Self { start, end, height }
    }

    pub fn bounding_box(&self) -> Aabb {
        let axis = self.end - self.start;
        let len_sq = axis.norm_squared();
        let n = if len_sq > 0.0 {
            Vec2::new(-axis.y, axis.x) * (self.height * 0.5 / len_sq.sqrt())
        } else {
            Vec2::zeros()
        };
        Aabb::from_points(&[
            self.end - n,
            self.end + n,
            self.start - n,
            self.start + n,
        ])
    }

    pub fn transform(&mut self, transformation: &Mat3) {
        self.start = transform_point(transformation, self.start);
        self.end = transform_point(transformation, self.end);
    }
}

#[derive(Debug, Clone)]
pub enum ShapeEnum {
    Circle(Circle),
    Rect(Rect),
}

impl ShapeEnum {
    pub fn bounding_box(&self) -> Aabb {
        match self {
            ShapeEnum::Circle(circle) => circle.bounding_box(),
            ShapeEnum::Rect(rect) => rect.bounding_box(),
        }
    }

    pub fn transform(&mut self, transformation: &Mat3) {
        match self {
            ShapeEnum::Circle(circle) => circle.transform(transformation),
            ShapeEnum::Rect(rect) => rect.transform(transformation),
        }
    }
}
