//! Rectangle/circle clipping for destructible platforms.
//!
//! A circular impact is approximated by its bounding square: whatever part
//! of the platform lies outside that square survives as up to four
//! axis-aligned remnants. This keeps the cost O(1) per platform and gives
//! the blocky, excavated look the arena is built around.

use glam::Vec2;

/// Axis-aligned rectangle stored as centre plus half extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self { center, half_extents }
    }

    /// Build from edges. Callers must pass `left <= right` and `bottom <= top`.
    pub fn from_edges(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            center: Vec2::new((left + right) * 0.5, (bottom + top) * 0.5),
            half_extents: Vec2::new((right - left) * 0.5, (top - bottom) * 0.5),
        }
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.half_extents.x
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.half_extents.x
    }

    pub fn bottom(&self) -> f32 {
        self.center.y - self.half_extents.y
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.half_extents.y
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Closest point on (or inside) the rectangle to `p`.
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }

    pub fn distance_squared_to(&self, p: Vec2) -> f32 {
        self.closest_point(p).distance_squared(p)
    }

    /// Whether `other` lies inside this rectangle, allowing `eps` of slack.
    pub fn contains_rect(&self, other: &Rect, eps: f32) -> bool {
        other.left() >= self.left() - eps
            && other.right() <= self.right() + eps
            && other.bottom() >= self.bottom() - eps
            && other.top() <= self.top() + eps
    }

    /// Usable as live geometry: finite and strictly positive extents.
    pub fn is_valid(&self) -> bool {
        self.center.is_finite()
            && self.half_extents.is_finite()
            && self.half_extents.x > 0.0
            && self.half_extents.y > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Exact rectangle test via the closest point, so a circle sitting just
    /// off a corner does not count as a hit.
    pub fn intersects(&self, rect: &Rect) -> bool {
        rect.distance_squared_to(self.center) < self.radius * self.radius
    }

    /// The axis-aligned bounding square of the circle.
    pub fn bounding_box(&self) -> Rect {
        Rect::new(self.center, Vec2::splat(self.radius))
    }
}

/// Minimum half extents a remnant needs to be instantiated.
///
/// Zero (or negative) limits still never admit an empty rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemnantLimits {
    pub min_half_width: f32,
    pub min_half_height: f32,
}

impl RemnantLimits {
    pub fn admits(&self, rect: &Rect) -> bool {
        rect.is_valid()
            && rect.half_extents.x >= self.min_half_width
            && rect.half_extents.y >= self.min_half_height
    }
}

/// The circle's bounding square clamped to `rect`.
pub fn carved_box(rect: &Rect, circle: &Circle) -> Rect {
    let bounds = circle.bounding_box();
    let min = bounds.min().clamp(rect.min(), rect.max());
    let max = bounds.max().clamp(rect.min(), rect.max());
    Rect::from_edges(min.x, max.x, min.y, max.y)
}

/// Pieces of `rect` left standing after carving `circle` out of it.
///
/// Left and right strips take the full height; bottom and top strips only
/// span the carved columns. Empty when the circle misses the rectangle, in
/// which case the rectangle is untouched rather than carved.
pub fn carve_remnants(rect: &Rect, circle: &Circle, limits: RemnantLimits) -> Vec<Rect> {
    if !circle.intersects(rect) {
        return Vec::new();
    }

    let carved = carved_box(rect, circle);
    let candidates = [
        Rect::from_edges(rect.left(), carved.left(), rect.bottom(), rect.top()),
        Rect::from_edges(carved.right(), rect.right(), rect.bottom(), rect.top()),
        Rect::from_edges(carved.left(), carved.right(), rect.bottom(), carved.bottom()),
        Rect::from_edges(carved.left(), carved.right(), carved.top(), rect.top()),
    ];

    candidates
        .into_iter()
        .filter(|candidate| limits.admits(candidate))
        .collect()
}

/// Lateral pieces of a platform destroyed by damage.
///
/// Everything within `window_half_width` of `impact_x` is blown away; the
/// strips to either side keep the full height and survive when at least
/// `min_half_width` wide and not empty.
pub fn blast_fragments(rect: &Rect, impact_x: f32, window_half_width: f32, min_half_width: f32) -> Vec<Rect> {
    let window_left = (impact_x - window_half_width).clamp(rect.left(), rect.right());
    let window_right = (impact_x + window_half_width).clamp(rect.left(), rect.right());

    [
        Rect::from_edges(rect.left(), window_left, rect.bottom(), rect.top()),
        Rect::from_edges(window_right, rect.right(), rect.bottom(), rect.top()),
    ]
    .into_iter()
    .filter(|fragment| fragment.is_valid() && fragment.half_extents.x >= min_half_width)
    .collect()
}

/// Linear damage falloff, never below `floor`.
pub fn falloff(distance: f32, radius: f32, floor: f32) -> f32 {
    (1.0 - distance / radius).max(floor)
}
