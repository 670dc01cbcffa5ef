//! Shape intersection primitives
//!
//! Every collision query in the simulation bottoms out here, thousands of
//! times per second, so these tests are exact: no epsilon fudging, no
//! approximation. Rect-rect overlap is strict - rectangles that merely touch
//! along an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (origin at top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Circle described by center and radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// A collidable shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rect(Rect),
    Circle(Circle),
}

impl From<Rect> for Shape {
    fn from(rect: Rect) -> Self {
        Shape::Rect(rect)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

/// Strict AABB overlap: touching edges do not count as colliding
#[inline]
pub fn rects_intersect(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Circle-circle: centers closer than the sum of radii
#[inline]
pub fn circles_intersect(a: &Circle, b: &Circle) -> bool {
    a.center.distance_squared(b.center) < (a.radius + b.radius) * (a.radius + b.radius)
}

/// Circle-rect: squared distance from the circle center to the closest point
/// on the rect, compared against the squared radius
#[inline]
pub fn circle_rect_intersect(circle: &Circle, rect: &Rect) -> bool {
    let closest_x = circle.center.x.clamp(rect.x, rect.x + rect.width);
    let closest_y = circle.center.y.clamp(rect.y, rect.y + rect.height);
    let dx = circle.center.x - closest_x;
    let dy = circle.center.y - closest_y;
    dx * dx + dy * dy < circle.radius * circle.radius
}

/// Polymorphic intersection test over shape kinds
pub fn intersects(a: &Shape, b: &Shape) -> bool {
    match (a, b) {
        (Shape::Rect(a), Shape::Rect(b)) => rects_intersect(a, b),
        (Shape::Circle(a), Shape::Circle(b)) => circles_intersect(a, b),
        (Shape::Circle(c), Shape::Rect(r)) | (Shape::Rect(r), Shape::Circle(c)) => {
            circle_rect_intersect(c, r)
        }
    }
}
