//! Strongly-typed numeric primitives for layout (zero-cost newtypes).
//!
//! Every coordinate the engine hands to a renderer is a [`Px`]. Raw `f64`
//! only appears at the edges: config constants, glyph tables and `glam`
//! vector math.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use glam::{DVec2, dvec2};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Length in device pixels
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Px(pub f64);

impl Px {
    pub const ZERO: Px = Px(0.0);

    /// Create a Px (const-friendly, unchecked).
    /// Use `try_new` for caller-provided values.
    #[inline]
    pub const fn new(val: f64) -> Px {
        Px(val)
    }

    /// Create a Px with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(val: f64) -> Result<Px, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else {
            Ok(Px(val))
        }
    }

    /// Create a strictly positive Px with validation
    #[inline]
    pub fn try_positive(val: f64) -> Result<Px, NumericError> {
        let px = Px::try_new(val)?;
        if val == 0.0 {
            Err(NumericError::Zero)
        } else if val < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(px)
        }
    }

    /// Create a non-negative Px with validation
    #[inline]
    pub fn try_non_negative(val: f64) -> Result<Px, NumericError> {
        let px = Px::try_new(val)?;
        if val < 0.0 { Err(NumericError::Negative) } else { Ok(px) }
    }

    #[inline]
    pub fn abs(self) -> Px {
        Px(self.0.abs())
    }

    #[inline]
    pub fn min(self, other: Px) -> Px {
        Px(self.0.min(other.0))
    }

    #[inline]
    pub fn max(self, other: Px) -> Px {
        Px(self.0.max(other.0))
    }

    /// Get the raw value (use sparingly, prefer typed operations)
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    /// Checked ratio returning None if divisor is zero
    #[inline]
    pub fn checked_div(self, rhs: Px) -> Option<f64> {
        if rhs.0 == 0.0 { None } else { Some(self.0 / rhs.0) }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Px {
    type Output = Px;
    fn add(self, rhs: Px) -> Px { Px(self.0 + rhs.0) }
}
impl Sub for Px {
    type Output = Px;
    fn sub(self, rhs: Px) -> Px { Px(self.0 - rhs.0) }
}
impl Mul<f64> for Px {
    type Output = Px;
    fn mul(self, rhs: f64) -> Px { Px(self.0 * rhs) }
}
impl Div<f64> for Px {
    type Output = Px;
    fn div(self, rhs: f64) -> Px { Px(self.0 / rhs) }
}

// NOTE: Px / Px is intentionally NOT implemented as a trait.
// Use Px::checked_div() which handles a zero divisor.

impl Neg for Px {
    type Output = Px;
    fn neg(self) -> Px { Px(-self.0) }
}

impl AddAssign for Px {
    fn add_assign(&mut self, rhs: Px) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Px {
    fn sub_assign(&mut self, rhs: Px) {
        self.0 -= rhs.0;
    }
}

impl std::iter::Sum for Px {
    fn sum<I: Iterator<Item = Px>>(iter: I) -> Px {
        Px(iter.map(|p| p.0).sum())
    }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

/// Simple color model for style tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, u8),
}

impl Color {
    /// Build an opaque color from a packed `0xRRGGBB` value.
    pub const fn hex(rgb: u32) -> Color {
        Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Same color with the given opacity in `0.0..=1.0`.
    pub fn with_alpha(self, alpha: f64) -> Color {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        match self {
            Color::Rgb(r, g, b) | Color::Rgba(r, g, b, _) => Color::Rgba(r, g, b, a),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb(r, g, b) => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
            Color::Rgba(r, g, b, a) => write!(f, "rgba({},{},{},{:.3})", r, g, b, *a as f64 / 255.0),
        }
    }
}

/// Generic 2D point
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub fn new(x: T, y: T) -> Self { Point { x, y } }
}

impl Point<Px> {
    /// Calculate the midpoint between two points
    pub fn midpoint(self, other: Self) -> Self {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    pub fn to_dvec2(self) -> DVec2 {
        dvec2(self.x.0, self.y.0)
    }

    pub fn from_dvec2(v: DVec2) -> Self {
        Point { x: Px(v.x), y: Px(v.y) }
    }
}

/// Shorthand for a pixel-space point.
pub fn pt(x: f64, y: f64) -> PtPx {
    Point::new(Px(x), Px(y))
}

/// 2D size
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size<T> {
    pub w: T,
    pub h: T,
}

impl Size<Px> {
    pub fn new(w: f64, h: f64) -> Self {
        Size { w: Px(w), h: Px(h) }
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox<T> {
    pub min: Point<T>,
    pub max: Point<T>,
}

impl BBox<Px> {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: Point { x: Px(f64::MAX), y: Px(f64::MAX) },
            max: Point { x: Px(f64::MIN), y: Px(f64::MIN) },
        }
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x.0 > self.max.x.0 || self.min.y.0 > self.max.y.0
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: PtPx) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Expand to include a rectangle given by its top-left corner and size
    pub fn expand_rect(&mut self, top_left: PtPx, size: Size<Px>) {
        self.expand_point(top_left);
        self.expand_point(Point { x: top_left.x + size.w, y: top_left.y + size.h });
    }

    pub fn width(&self) -> Px { self.max.x - self.min.x }

    pub fn height(&self) -> Px { self.max.y - self.min.y }

    pub fn center(&self) -> PtPx {
        Point {
            x: (self.min.x + self.max.x) / 2.0,
            y: (self.min.y + self.max.y) / 2.0,
        }
    }

    /// True if `other` lies entirely inside `self` (edges inclusive).
    pub fn contains(&self, other: &BBox<Px>) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }
}

impl Default for BBox<Px> {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenient aliases
pub type PtPx = Point<Px>;
pub type BoxPx = BBox<Px>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_try_new_rejects_nan_and_infinity() {
        assert_eq!(Px::try_new(f64::NAN), Err(NumericError::NaN));
        assert_eq!(Px::try_new(f64::INFINITY), Err(NumericError::Infinite));
        assert!(Px::try_new(-3.0).is_ok());
    }

    #[test]
    fn px_try_positive() {
        assert_eq!(Px::try_positive(0.0), Err(NumericError::Zero));
        assert_eq!(Px::try_positive(-1.0), Err(NumericError::Negative));
        assert_eq!(Px::try_positive(2.5), Ok(Px(2.5)));
    }

    #[test]
    fn px_arithmetic() {
        let a = Px(3.0);
        let b = Px(2.0);
        assert_eq!(a + b, Px(5.0));
        assert_eq!(a - b, Px(1.0));
        assert_eq!(a * 2.0, Px(6.0));
        assert_eq!(a / 2.0, Px(1.5));
        assert_eq!(-a, Px(-3.0));
        assert_eq!([a, b, b].into_iter().sum::<Px>(), Px(7.0));
    }

    #[test]
    fn px_checked_div_by_zero() {
        assert_eq!(Px(6.0).checked_div(Px(0.0)), None);
        assert_eq!(Px(6.0).checked_div(Px(2.0)), Some(3.0));
    }

    #[test]
    fn color_hex_and_display() {
        let c = Color::hex(0x015c0b);
        assert_eq!(c, Color::Rgb(0x01, 0x5c, 0x0b));
        assert_eq!(c.to_string(), "#015c0b");
        assert_eq!(Color::hex(0xd3d3d3).with_alpha(1.0), Color::Rgba(0xd3, 0xd3, 0xd3, 255));
    }

    #[test]
    fn point_midpoint_and_dvec_round_trip() {
        let mid = pt(0.0, 0.0).midpoint(pt(4.0, 6.0));
        assert_eq!(mid, pt(2.0, 3.0));
        assert_eq!(Point::from_dvec2(mid.to_dvec2()), mid);
    }

    #[test]
    fn bbox_expand_and_contains() {
        let mut outer = BBox::new();
        assert!(outer.is_empty());
        outer.expand_rect(pt(0.0, 0.0), Size::new(10.0, 10.0));

        let mut inner = BBox::new();
        inner.expand_rect(pt(2.0, 3.0), Size::new(4.0, 2.0));

        assert_eq!(outer.width(), Px(10.0));
        assert_eq!(inner.center(), pt(4.0, 4.0));
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
    }
}
