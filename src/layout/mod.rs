//! Diagram layout: positions, sizes, fitted text and connectors.
//!
//! Each diagram kind has its own module producing a [`LayoutResult`]. The
//! result is plain geometry; drawing it is up to the caller.

pub mod config;
pub mod connector;
pub mod defaults;
pub mod gantt;
pub mod milestone;
pub mod wbs;

use std::collections::HashMap;

use crate::errors::LayoutWarning;
use crate::log;
use crate::text::{Font, TextBlock};
use crate::types::{BoxPx, Point, Px, PtPx, Size};

pub use config::{BoxStyle, GanttConfig, LineStyle, MilestoneConfig, WbsConfig};
pub use connector::{ConnectorPath, Direction, PathBuilder};

/// Style category a renderer maps to colours through the diagram's config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    /// Level-0 title box of a tree
    Title,
    /// Tree box at the given depth (1 for roots)
    Level(usize),
    /// Task bar coloured by group index
    Bar { group: usize },
    /// Milestone diamond
    MilestoneMarker,
    /// Full-width row background; `None` for milestone rows
    RowBand { group: Option<usize> },
    /// Timeline axis body and head
    Axis,
}

/// A placed rectangle, anchored at its horizontal centre and top edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedBox {
    pub center_x: Px,
    pub top_y: Px,
    pub width: Px,
    pub height: Px,
    pub style: StyleTag,
}

impl PlacedBox {
    pub fn new(center_x: Px, top_y: Px, size: Size<Px>, style: StyleTag) -> Self {
        Self { center_x, top_y, width: size.w, height: size.h, style }
    }

    /// Box given by its left edge instead of its centre.
    pub fn from_left(left: Px, top_y: Px, size: Size<Px>, style: StyleTag) -> Self {
        Self::new(left + size.w / 2.0, top_y, size, style)
    }

    /// Box centred on `center`.
    pub fn centered(center: PtPx, size: Size<Px>, style: StyleTag) -> Self {
        Self::new(center.x, center.y - size.h / 2.0, size, style)
    }

    pub fn left(&self) -> Px {
        self.center_x - self.width / 2.0
    }

    pub fn right(&self) -> Px {
        self.center_x + self.width / 2.0
    }

    pub fn bottom(&self) -> Px {
        self.top_y + self.height
    }

    pub fn mid_y(&self) -> Px {
        self.top_y + self.height / 2.0
    }

    pub fn center(&self) -> PtPx {
        Point::new(self.center_x, self.mid_y())
    }

    pub fn size(&self) -> Size<Px> {
        Size { w: self.width, h: self.height }
    }

    pub fn bbox(&self) -> BoxPx {
        let mut bbox = BoxPx::new();
        bbox.expand_rect(Point::new(self.left(), self.top_y), self.size());
        bbox
    }
}

/// Identity of a laid-out element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementKey {
    /// The synthetic title box of a tree
    Title,
    /// Tree node by id
    Node(String),
    /// Schedule event by its position in the input
    Event(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// How a text block hangs off its anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextAlign {
    pub h: HAlign,
    pub v: VAlign,
}

impl TextAlign {
    pub const fn new(h: HAlign, v: VAlign) -> Self {
        Self { h, v }
    }
}

/// A box with its fitted caption and outgoing connectors
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub key: ElementKey,
    pub rect: PlacedBox,
    pub text: TextBlock,
    pub text_anchor: PtPx,
    pub align: TextAlign,
    pub connectors: Vec<ConnectorPath>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelRole {
    Title,
    ColumnHeader,
    RowId,
    Date,
    AxisTick,
}

/// Free-standing text not owned by an element
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub anchor: PtPx,
    pub align: TextAlign,
    pub font: Font,
    pub role: LabelRole,
}

/// Non-interactive background geometry
#[derive(Debug, Clone, PartialEq)]
pub enum Decoration {
    /// Filled background rectangle
    Band(PlacedBox),
    /// Straight grid or tick line
    GridLine { from: PtPx, to: PtPx, major: bool },
    /// Closed filled polygon
    Polygon { points: Vec<PtPx>, style: StyleTag },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub label: String,
    pub style: StyleTag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramKind {
    Wbs,
    Gantt,
    Milestones,
}

/// Complete geometry for one diagram
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub kind: DiagramKind,
    pub canvas: Size<Px>,
    /// Elements in placement order
    pub elements: Vec<Element>,
    index: HashMap<ElementKey, usize>,
    pub labels: Vec<Label>,
    pub decorations: Vec<Decoration>,
    pub legend: Vec<LegendEntry>,
    pub warnings: Vec<LayoutWarning>,
}

impl LayoutResult {
    pub(crate) fn new(kind: DiagramKind) -> Self {
        Self {
            kind,
            canvas: Size::default(),
            elements: Vec::new(),
            index: HashMap::new(),
            labels: Vec::new(),
            decorations: Vec::new(),
            legend: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn get(&self, key: &ElementKey) -> Option<&Element> {
        self.index.get(key).map(|&i| &self.elements[i])
    }

    /// Tree node element by id
    pub fn node(&self, id: &str) -> Option<&Element> {
        self.get(&ElementKey::Node(id.to_string()))
    }

    /// Every connector of every element
    pub fn connectors(&self) -> impl Iterator<Item = &ConnectorPath> {
        self.elements.iter().flat_map(|e| e.connectors.iter())
    }

    /// Bounding box of all element rectangles and connector points.
    pub fn bounds(&self) -> BoxPx {
        let mut bbox = BoxPx::new();
        for element in &self.elements {
            let r = element.rect;
            bbox.expand_rect(Point::new(r.left(), r.top_y), r.size());
            for path in &element.connectors {
                for &p in &path.points {
                    bbox.expand_point(p);
                }
            }
        }
        bbox
    }

    /// The canvas as a box anchored at the origin
    pub fn canvas_box(&self) -> BoxPx {
        let mut bbox = BoxPx::new();
        bbox.expand_rect(Point::new(Px::ZERO, Px::ZERO), self.canvas);
        bbox
    }

    pub(crate) fn push(&mut self, element: Element) {
        self.index.insert(element.key.clone(), self.elements.len());
        self.elements.push(element);
    }

    /// Attach an outgoing connector to an already placed element.
    pub(crate) fn attach(&mut self, key: &ElementKey, path: ConnectorPath) {
        if let Some(&i) = self.index.get(key) {
            self.elements[i].connectors.push(path);
        }
    }

    pub(crate) fn warn(&mut self, warning: LayoutWarning) {
        log::report(&warning);
        self.warnings.push(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::pt;

    #[test]
    fn placed_box_edges() {
        let b = PlacedBox::new(Px(100.0), Px(10.0), Size::new(40.0, 20.0), StyleTag::Title);
        assert_eq!(b.left(), Px(80.0));
        assert_eq!(b.right(), Px(120.0));
        assert_eq!(b.bottom(), Px(30.0));
        assert_eq!(b.center(), pt(100.0, 20.0));
        assert_eq!(PlacedBox::from_left(Px(80.0), Px(10.0), b.size(), StyleTag::Title), b);
        assert_eq!(PlacedBox::centered(pt(100.0, 20.0), b.size(), StyleTag::Title), b);
    }

    #[test]
    fn lookup_and_attach_by_key() {
        let mut result = LayoutResult::new(DiagramKind::Wbs);
        let rect = PlacedBox::new(Px(50.0), Px(0.0), Size::new(20.0, 10.0), StyleTag::Level(1));
        result.push(Element {
            key: ElementKey::Node("1".into()),
            rect,
            text: TextBlock::default(),
            text_anchor: pt(40.0, 0.0),
            align: TextAlign::default(),
            connectors: Vec::new(),
        });
        let path = PathBuilder::new(pt(40.0, 5.0)).horizontal_to(Px(0.0)).build();
        result.attach(&ElementKey::Node("1".into()), path);
        result.attach(&ElementKey::Node("missing".into()), ConnectorPath::default());

        assert_eq!(result.node("1").map(|e| e.connectors.len()), Some(1));
        assert_eq!(result.connectors().count(), 1);

        let bounds = result.bounds();
        assert_eq!(bounds.min, pt(0.0, 0.0));
        assert_eq!(bounds.max, pt(60.0, 10.0));
    }
}
