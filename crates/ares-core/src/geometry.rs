//! Integer grid positions, floating direction vectors and cone membership.
//!
//! `Pos` is the address of a grid cell.  Coordinates are signed so that
//! vector differences (`a - b`) and flee vectors can go negative before they
//! are clamped back into a grid.

use std::fmt;
use std::ops::{Add, Sub};

// ── Pos ───────────────────────────────────────────────────────────────────────

/// An integer `(x, y)` grid coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shift by `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Pos {
        Pos::new(self.x + dx, self.y + dy)
    }

    /// Chebyshev (chessboard) distance: `max(|dx|, |dy|)`.
    #[inline]
    pub fn chebyshev(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Clamp each component into `[0, width-1] × [0, height-1]`.
    ///
    /// `width` and `height` must be non-zero.
    #[inline]
    pub fn clamp_to(self, width: u32, height: u32) -> Pos {
        let max_x = width.saturating_sub(1) as i32;
        let max_y = height.saturating_sub(1) as i32;
        Pos::new(self.x.clamp(0, max_x), self.y.clamp(0, max_y))
    }

    /// This position seen as a vector from the origin.
    #[inline]
    pub fn as_vector(self) -> DirectionVector {
        DirectionVector::new(self.x as f64, self.y as f64)
    }
}

impl Add for Pos {
    type Output = Pos;
    #[inline]
    fn add(self, rhs: Pos) -> Pos {
        Pos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Pos {
    type Output = Pos;
    #[inline]
    fn sub(self, rhs: Pos) -> Pos {
        Pos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for Pos {
    #[inline]
    fn from((x, y): (i32, i32)) -> Pos {
        Pos::new(x, y)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── DirectionVector ───────────────────────────────────────────────────────────

/// A 2-D direction in continuous space.
///
/// Not normalized on construction; call [`normalized`](Self::normalized) when
/// only the heading matters.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectionVector {
    pub x: f64,
    pub y: f64,
}

impl DirectionVector {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Unit vector with the same heading, or `None` for the zero vector.
    pub fn normalized(self) -> Option<DirectionVector> {
        let m = self.magnitude();
        if m == 0.0 || !m.is_finite() {
            return None;
        }
        Some(DirectionVector::new(self.x / m, self.y / m))
    }

    #[inline]
    pub fn dot(self, other: DirectionVector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Angle between `self` and `other` in radians, in `[0, π]`.
    ///
    /// Returns `None` if either vector is zero.
    pub fn angle_to(self, other: DirectionVector) -> Option<f64> {
        let a = self.normalized()?;
        let b = other.normalized()?;
        // Rounding can push the dot product a hair outside [-1, 1].
        Some(a.dot(b).clamp(-1.0, 1.0).acos())
    }
}

impl fmt::Display for DirectionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.x, self.y)
    }
}

// ── Cone membership ───────────────────────────────────────────────────────────

/// Slack for boundary comparisons; `acos` of a normalized dot product is
/// only accurate to a few ulps.
const TOLERANCE: f64 = 1e-9;

/// `true` if `pos` lies inside the cone opening from `center` along `dir`.
///
/// The cone has half-angle `half_angle_deg` (degrees) and Euclidean reach
/// `distance`.  `center` itself is never inside its own cone, and a zero
/// direction contains nothing.
pub fn inside_cone(
    pos:            Pos,
    center:         Pos,
    dir:            DirectionVector,
    distance:       f64,
    half_angle_deg: f64,
) -> bool {
    let to_pos = (pos - center).as_vector();
    match dir.angle_to(to_pos) {
        None => false,
        Some(angle) => {
            angle <= half_angle_deg.to_radians() + TOLERANCE
                && to_pos.magnitude() <= distance + TOLERANCE
        }
    }
}
