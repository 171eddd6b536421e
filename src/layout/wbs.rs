//! Work-breakdown tree layout.
//!
//! A title box spans the top of the canvas. Every root gets its own column;
//! its descendants stack beneath it, second-level nodes aligned with the root
//! and deeper clusters indented one step per level. Connectors run along
//! vertical spines to the left of each cluster.

use super::connector::{bus_route, spine_route};
use super::{
    DiagramKind, Element, ElementKey, HAlign, LayoutResult, PlacedBox, StyleTag, TextAlign, VAlign,
    WbsConfig,
};
use crate::errors::{LayoutError, LayoutWarning};
use crate::extent::tallest_column;
use crate::hierarchy::Forest;
use crate::log;
use crate::text::{GlyphMetrics, TextBlock, TextFitter};
use crate::types::{Point, Px, Size};

const TEXT_ALIGN: TextAlign = TextAlign::new(HAlign::Left, VAlign::Top);

/// Horizontal space reserved for the column of `root`.
///
/// The base pitch fits a root and its aligned children; every indented level
/// below them adds one indent step, so `column_gap` stays clear whatever the
/// indent.
pub fn column_pitch(forest: &Forest, root: &str, config: &WbsConfig) -> Px {
    let indented_levels = forest.subtree_depth(root).saturating_sub(2);
    config.box_size.w + config.column_gap + config.indent * indented_levels as f64
}

/// Lay out `forest` under a title box reading `title`.
pub fn layout_wbs(
    forest: &Forest,
    title: &str,
    metrics: &dyn GlyphMetrics,
    config: &WbsConfig,
) -> Result<LayoutResult, LayoutError> {
    config.validate()?;
    if forest.is_empty() {
        return Err(LayoutError::EmptyInput);
    }

    let mut result = LayoutResult::new(DiagramKind::Wbs);
    result.warnings.extend(forest.warnings().iter().cloned());

    let dims = config.extent_dims();
    let box_w = config.box_size.w;
    let columns_top = config.title_top + config.title_size.h + config.title_gap;

    // Column geometry is known before anything is placed
    let mut columns = Vec::with_capacity(forest.roots().len());
    let mut col_left = config.column_gap / 2.0;
    let mut right_edge = Px::ZERO;
    for root in forest.roots() {
        let center_x = col_left + box_w / 2.0;
        let nested = forest.subtree_depth(root).saturating_sub(2);
        right_edge = right_edge.max(center_x + config.indent * nested as f64 + box_w / 2.0);
        columns.push((root.as_str(), center_x));
        col_left += column_pitch(forest, root, config);
    }

    let width = config
        .min_canvas
        .w
        .max(col_left + config.column_gap / 2.0)
        .max(right_edge + config.column_gap / 2.0)
        .max(config.title_size.w + config.title_top * 2.0);
    let tallest = tallest_column(forest, &dims);
    let height = config.min_canvas.h.max(columns_top + tallest * config.height_overshoot);
    result.canvas = Size { w: width, h: height };

    log::debug!(
        width = width.raw(),
        height = height.raw(),
        columns = columns.len(),
        "wbs canvas"
    );

    let mut placer = Placer {
        forest,
        config,
        fitter: TextFitter::new(metrics, config.font).line_spacing(config.line_spacing),
        result,
    };
    if let Some(cap) = config.max_lines {
        placer.fitter = placer.fitter.max_lines(cap);
    }

    let title_box = PlacedBox::new(width / 2.0, config.title_top, config.title_size, StyleTag::Title);
    let title_fitter = TextFitter::new(metrics, config.title_font).line_spacing(config.line_spacing);
    let title_text = title_fitter.wrap(title, config.text_area(config.title_size));
    placer.push(ElementKey::Title, title_box, title_text, "title");
    let bus_y = title_box.bottom() + config.title_gap / 2.0;

    for (root, center_x) in columns {
        let root_box = PlacedBox::new(center_x, columns_top, config.box_size, StyleTag::Level(1));
        placer.place_node(root, root_box);

        let spine_x = root_box.left() - config.spine_offset;
        placer
            .result
            .attach(&ElementKey::Title, bus_route(&title_box, &root_box, bus_y, spine_x));

        let mut y = root_box.bottom() + config.level_gap;
        for child in forest.children(root) {
            let child_box = PlacedBox::new(center_x, y, config.box_size, StyleTag::Level(2));
            placer.place_node(child, child_box);
            placer.connect(root, &root_box, &child_box, spine_x);
            y = child_box.bottom() + config.level_gap;
            y = placer.place_cluster(child, &child_box, y, 2);
        }

        log::debug!(
            root = %root,
            used = (y - columns_top).raw(),
            "column placed"
        );
    }

    Ok(placer.result)
}

struct Placer<'a> {
    forest: &'a Forest,
    config: &'a WbsConfig,
    fitter: TextFitter<'a>,
    result: LayoutResult,
}

impl Placer<'_> {
    fn push(&mut self, key: ElementKey, rect: PlacedBox, text: TextBlock, name: &str) {
        let area = self.config.text_area(rect.size());
        if text.degenerate {
            self.result.warn(LayoutWarning::DegenerateText {
                element: name.to_string(),
                width: area.w.raw(),
            });
        }
        let text_anchor = Point::new(
            rect.left() + self.config.padding_x,
            rect.top_y + self.config.padding_y,
        );
        self.result.push(Element {
            key,
            rect,
            text,
            text_anchor,
            align: TEXT_ALIGN,
            connectors: Vec::new(),
        });
    }

    fn place_node(&mut self, id: &str, rect: PlacedBox) {
        let label = match self.forest.get(id) {
            Some(node) => node.label(),
            None => id.to_string(),
        };
        let text = self.fitter.wrap(&label, self.config.text_area(rect.size()));
        self.push(ElementKey::Node(id.to_string()), rect, text, id);
    }

    fn connect(&mut self, parent: &str, parent_box: &PlacedBox, child_box: &PlacedBox, spine_x: Px) {
        let path = spine_route(parent_box, child_box, spine_x);
        self.result.attach(&ElementKey::Node(parent.to_string()), path);
    }

    /// Place the children of a non-root node as an indented cluster starting
    /// at `y`; returns the cursor below the cluster.
    fn place_cluster(&mut self, parent: &str, parent_box: &PlacedBox, y: Px, depth: usize) -> Px {
        let forest = self.forest;
        let children = forest.children(parent);
        if children.is_empty() {
            return y;
        }

        let config = self.config;
        let center_x = parent_box.center_x + config.indent;
        let spine_x = center_x - config.box_size.w / 2.0 - config.spine_inset;
        let mut y = y + config.cluster_gap;

        for child in children {
            let child_box = PlacedBox::new(center_x, y, config.box_size, StyleTag::Level(depth + 1));
            self.place_node(child, child_box);
            self.connect(parent, parent_box, &child_box, spine_x);
            y = child_box.bottom() + config.level_gap;
            y = self.place_cluster(child, &child_box, y, depth + 1);
        }
        y
    }
}
