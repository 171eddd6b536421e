//! Orthogonal connector paths.
//!
//! Every connector the layouts emit is an axis-aligned polyline. Paths are
//! built incrementally with [`PathBuilder`]: consecutive moves along the same
//! heading extend the current point, a change of heading starts a new one.
//!
//! Screen coordinates: `x` grows to the right, `y` grows downward.

use glam::{DVec2, dvec2};

use super::PlacedBox;
use crate::types::{Point, Px, PtPx};

/// Points closer than this are treated as coincident
const EPSILON: f64 = 1e-9;

/// Heading of a path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// An axis-aligned polyline, optionally ending in an arrowhead
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConnectorPath {
    pub points: Vec<PtPx>,
    pub arrowhead: bool,
}

impl ConnectorPath {
    pub fn start(&self) -> Option<PtPx> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<PtPx> {
        self.points.last().copied()
    }

    /// Consecutive point pairs
    pub fn segments(&self) -> impl Iterator<Item = (PtPx, PtPx)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// True when every segment is horizontal or vertical.
    pub fn is_orthogonal(&self) -> bool {
        self.segments().all(|(a, b)| {
            (a.x.raw() - b.x.raw()).abs() < EPSILON || (a.y.raw() - b.y.raw()).abs() < EPSILON
        })
    }

    /// Total length along the path
    pub fn length(&self) -> Px {
        self.segments()
            .map(|(a, b)| Px(a.to_dvec2().distance(b.to_dvec2())))
            .sum()
    }

    /// Triangle for the arrowhead at the end of the path: tip first, then the
    /// two base corners. `None` when the path has no arrowhead or no length.
    pub fn arrowhead_polygon(&self, len: Px, width: Px) -> Option<[PtPx; 3]> {
        if !self.arrowhead {
            return None;
        }
        let (start, end) = self.segments().last()?;
        let (start, end) = (start.to_dvec2(), end.to_dvec2());
        let delta = end - start;
        let seg_len = delta.length();
        if seg_len < 0.001 {
            return None;
        }

        let unit = delta / seg_len;
        let perp = dvec2(-unit.y, unit.x);
        let base = end - unit * len.raw();
        let half_width = width.raw() / 2.0;

        Some([
            Point::from_dvec2(end),
            Point::from_dvec2(base + perp * half_width),
            Point::from_dvec2(base - perp * half_width),
        ])
    }
}

/// Incremental builder for orthogonal paths
#[derive(Debug)]
pub struct PathBuilder {
    points: Vec<PtPx>,
    heading: Option<Direction>,
    arrowhead: bool,
}

impl PathBuilder {
    pub fn new(start: PtPx) -> Self {
        Self { points: vec![start], heading: None, arrowhead: false }
    }

    fn current(&self) -> PtPx {
        // points always holds the start point
        self.points.last().copied().unwrap_or_default()
    }

    fn step_to(&mut self, dir: Direction, next: PtPx) {
        if self.heading == Some(dir) && self.points.len() > 1 {
            if let Some(last) = self.points.last_mut() {
                *last = next;
            }
        } else {
            self.points.push(next);
        }
        self.heading = Some(dir);
    }

    /// Move `distance` along `dir`.
    pub fn go(mut self, dir: Direction, distance: Px) -> Self {
        let cur = self.current();
        let next = match dir {
            Direction::Right => Point::new(cur.x + distance, cur.y),
            Direction::Left => Point::new(cur.x - distance, cur.y),
            Direction::Up => Point::new(cur.x, cur.y - distance),
            Direction::Down => Point::new(cur.x, cur.y + distance),
        };
        self.step_to(dir, next);
        self
    }

    /// Move along `dir` until the matching coordinate equals the target's.
    pub fn until_even_with(mut self, dir: Direction, target: PtPx) -> Self {
        let cur = self.current();
        let next = if dir.is_horizontal() {
            Point::new(target.x, cur.y)
        } else {
            Point::new(cur.x, target.y)
        };
        self.step_to(dir, next);
        self
    }

    /// Horizontal move to `x`, heading chosen from the sign of the offset.
    pub fn horizontal_to(self, x: Px) -> Self {
        let dir = if x < self.current().x { Direction::Left } else { Direction::Right };
        self.until_even_with(dir, Point::new(x, Px::ZERO))
    }

    /// Vertical move to `y`, heading chosen from the sign of the offset.
    pub fn vertical_to(self, y: Px) -> Self {
        let dir = if y < self.current().y { Direction::Up } else { Direction::Down };
        self.until_even_with(dir, Point::new(Px::ZERO, y))
    }

    pub fn with_arrowhead(mut self) -> Self {
        self.arrowhead = true;
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Finish the path, dropping zero-length segments and merging collinear
    /// runs.
    pub fn build(self) -> ConnectorPath {
        let mut points: Vec<PtPx> = Vec::with_capacity(self.points.len());
        for p in self.points {
            if points.last().is_some_and(|q| same_point(*q, p)) {
                continue;
            }
            if points.len() >= 2 {
                let a = points[points.len() - 2];
                let b = points[points.len() - 1];
                if collinear(a, b, p) {
                    if let Some(last) = points.last_mut() {
                        *last = p;
                    }
                    continue;
                }
            }
            points.push(p);
        }
        ConnectorPath { points, arrowhead: self.arrowhead }
    }
}

fn same_point(a: PtPx, b: PtPx) -> bool {
    a.to_dvec2().distance(b.to_dvec2()) < EPSILON
}

/// `b` lies on the straight run from `a` to `c` without doubling back
fn collinear(a: PtPx, b: PtPx, c: PtPx) -> bool {
    let ab: DVec2 = b.to_dvec2() - a.to_dvec2();
    let bc: DVec2 = c.to_dvec2() - b.to_dvec2();
    ab.perp_dot(bc).abs() < EPSILON && ab.dot(bc) > 0.0
}

// ============================================================================
// Routing helpers
// ============================================================================

/// Parent-to-child connector through a vertical spine at `spine_x`.
///
/// The path leaves the parent at its left-edge midpoint when the spine is left
/// of the box, at its right-edge midpoint when the spine is right of it, and
/// from the bottom edge when the spine crosses the box. It then follows the
/// spine to the child's mid height and ends on the child's left edge.
pub fn spine_route(parent: &PlacedBox, child: &PlacedBox, spine_x: Px) -> ConnectorPath {
    let start = if spine_x < parent.left() {
        Point::new(parent.left(), parent.mid_y())
    } else if spine_x > parent.right() {
        Point::new(parent.right(), parent.mid_y())
    } else {
        Point::new(spine_x, parent.bottom())
    };
    PathBuilder::new(start)
        .horizontal_to(spine_x)
        .vertical_to(child.mid_y())
        .horizontal_to(child.left())
        .build()
}

/// Connector from the bottom centre of `title` to a level-one box: down to a
/// bus at `bus_y`, across to the box's spine, down the spine, then into the box.
pub fn bus_route(title: &PlacedBox, child: &PlacedBox, bus_y: Px, spine_x: Px) -> ConnectorPath {
    PathBuilder::new(Point::new(title.center_x, title.bottom()))
        .vertical_to(bus_y)
        .horizontal_to(spine_x)
        .vertical_to(child.mid_y())
        .horizontal_to(child.left())
        .build()
}

/// Dependency arrow: horizontal at the predecessor's height, then vertical
/// into the successor.
pub fn dependency_elbow(from: PtPx, to: PtPx) -> ConnectorPath {
    PathBuilder::new(from)
        .horizontal_to(to.x)
        .vertical_to(to.y)
        .with_arrowhead()
        .build()
}

/// Straight vertical stem from a point on the axis to `tip_y`.
pub fn stagger_stem(axis_point: PtPx, tip_y: Px) -> ConnectorPath {
    PathBuilder::new(axis_point).vertical_to(tip_y).build()
}
