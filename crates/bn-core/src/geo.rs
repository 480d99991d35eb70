//! Planar geometry in simulation (canvas) space.
//!
//! Everything is `f32`: the engine runs at interactive rates on a few
//! thousand points at most, and renderers consume single-precision anyway.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Distance substituted for coincident points so force and direction
/// computations never divide by zero.
pub const COINCIDENT_DISTANCE: f32 = 1.0;

/// A point or displacement in simulation space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    /// Euclidean distance, replaced by [`COINCIDENT_DISTANCE`] when the two
    /// points coincide (or the result is not finite).
    #[inline]
    pub fn distance_or_default(self, other: Vec2) -> f32 {
        let d = self.distance(other);
        if d > 0.0 && d.is_finite() { d } else { COINCIDENT_DISTANCE }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Shortest distance from `self` to the segment `a`–`b`.
    ///
    /// A degenerate segment (`a == b`) measures the distance to `a`.
    pub fn distance_to_segment(self, a: Vec2, b: Vec2) -> f32 {
        let ab = b - a;
        let len_sq = ab.length_squared();
        let closest = if len_sq > 0.0 {
            let t = ((self - a).dot(ab) / len_sq).clamp(0.0, 1.0);
            a + ab * t
        } else {
            a
        };
        self.distance(closest)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

// ── Bounds ────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle: the playable area of a scenario.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Canvas-style bounds anchored at the origin.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self { min: Vec2::ZERO, max: Vec2::new(width, height) }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// `true` if `p` lies inside the rectangle (edges inclusive).  Non-finite
    /// points are never contained.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.is_finite()
            && p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
    }

    /// The rectangle shrunk by `margin` on every side.  Collapses to the
    /// centre line rather than inverting when `margin` is too large.
    pub fn inset(&self, margin: f32) -> Bounds {
        let mx = margin.min(self.width() * 0.5).max(0.0);
        let my = margin.min(self.height() * 0.5).max(0.0);
        Bounds {
            min: Vec2::new(self.min.x + mx, self.min.y + my),
            max: Vec2::new(self.max.x - mx, self.max.y - my),
        }
    }

    /// Sub-rectangle covering the fractional range `[lo, hi]` of each axis,
    /// e.g. `fraction(0.1, 0.9)` keeps the central 80 %.
    pub fn fraction(&self, lo: f32, hi: f32) -> Bounds {
        Bounds {
            min: Vec2::new(self.min.x + self.width() * lo, self.min.y + self.height() * lo),
            max: Vec2::new(self.min.x + self.width() * hi, self.min.y + self.height() * hi),
        }
    }

    #[inline]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(self.min.x, self.max.x), p.y.clamp(self.min.y, self.max.y))
    }
}
