//! Milestone timeline layout.
//!
//! Milestones sit on a single horizontal axis that ends in an arrowhead.
//! Labels alternate above and below the axis on a repeating set of stagger
//! levels, each joined to its marker by a vertical stem.

use super::connector::stagger_stem;
use super::{
    DiagramKind, Decoration, Element, ElementKey, HAlign, Label, LabelRole, LayoutResult,
    MilestoneConfig, PlacedBox, StyleTag, TextAlign, VAlign,
};
use crate::errors::{LayoutError, LayoutWarning};
use crate::log;
use crate::schedule::{Row, Schedule, TimeScale};
use crate::text::{GlyphMetrics, TextBlock, TextFitter};
use crate::types::{Point, Px, Size};

/// Length of the month tick marks below the plot area
const TICK_LENGTH: Px = Px::new(6.0);

/// Lay out the milestones of `schedule` on a timeline headed by `title`.
pub fn layout_milestones(
    schedule: &Schedule,
    title: &str,
    metrics: &dyn GlyphMetrics,
    config: &MilestoneConfig,
) -> Result<LayoutResult, LayoutError> {
    config.validate()?;
    let milestones: Vec<&Row> = schedule.milestones().collect();
    let (Some(first), Some(last)) = (milestones.first(), milestones.last()) else {
        return Err(LayoutError::NoMilestones);
    };

    let mut result = LayoutResult::new(DiagramKind::Milestones);
    let unit = config.level_unit;
    let text_gap = unit * config.text_gap;
    let date_line = Px(config.date_font.size_px * config.line_spacing);

    let fitter = TextFitter::new(metrics, config.font)
        .line_spacing(config.line_spacing)
        .max_lines(config.max_label_lines);
    let bounds = Size { w: config.label_width, h: Px(f64::INFINITY) };
    let blocks: Vec<TextBlock> = milestones.iter().map(|r| fitter.wrap(&r.event.title, bounds)).collect();
    let levels: Vec<f64> = (0..milestones.len())
        .map(|i| config.levels[i % config.levels.len()])
        .collect();

    // Grow the canvas when the tallest stack would leave the plot area
    let reach = levels
        .iter()
        .zip(&blocks)
        .map(|(level, block)| unit * level.abs() + text_gap + block.height() + config.date_gap + date_line)
        .fold(Px::ZERO, Px::max);
    let half = (config.canvas.h / 2.0).max(reach + config.margin);
    let canvas = Size { w: config.canvas.w, h: half * 2.0 };
    let axis_y = half;
    result.canvas = canvas;

    let pad = config.pad_days;
    let padded = TimeScale::padded(first.event.start, last.event.start, pad, pad, Px::ZERO, Px(1.0));
    let scale = TimeScale::fitted(padded.origin, padded.end, config.margin, canvas.w - config.margin * 2.0);

    log::debug!(
        width = canvas.w.raw(),
        height = canvas.h.raw(),
        milestones = milestones.len(),
        "milestone canvas"
    );

    result.labels.push(Label {
        text: title.to_string(),
        anchor: Point::new(canvas.w / 2.0, config.margin / 2.0),
        align: TextAlign::new(HAlign::Center, VAlign::Middle),
        font: config.title_font,
        role: LabelRole::Title,
    });

    axis(&mut result, &scale, axis_y, config);
    month_ticks(&mut result, &scale, canvas.h - config.margin, config);

    for ((row, block), level) in milestones.iter().zip(blocks).zip(levels) {
        let x = scale.x(row.event.start);
        let on_axis = Point::new(x, axis_y);
        let above = level > 0.0;
        let tip_y = axis_y - unit * level;

        let (text_y, v, date_y) = if above {
            let text_y = tip_y - text_gap;
            (text_y, VAlign::Bottom, text_y - block.height() - config.date_gap)
        } else {
            let text_y = tip_y + text_gap;
            (text_y, VAlign::Top, text_y + block.height() + config.date_gap)
        };

        if block.degenerate {
            result.warn(LayoutWarning::DegenerateText {
                element: row.event.title.clone(),
                width: config.label_width.raw(),
            });
        }

        result.labels.push(Label {
            text: row.event.start.format("%b %d, %Y").to_string(),
            anchor: Point::new(x, date_y),
            align: TextAlign::new(HAlign::Center, v),
            font: config.date_font,
            role: LabelRole::Date,
        });

        let stem = stagger_stem(on_axis, tip_y);
        let connectors = if stem.points.len() >= 2 { vec![stem] } else { Vec::new() };
        let marker = Size { w: config.marker_size, h: config.marker_size };
        result.push(Element {
            key: ElementKey::Event(row.index),
            rect: PlacedBox::centered(on_axis, marker, StyleTag::MilestoneMarker),
            text: block,
            text_anchor: Point::new(x, text_y),
            align: TextAlign::new(HAlign::Center, v),
            connectors,
        });
    }

    Ok(result)
}

/// Axis body and arrowhead as two polygons.
fn axis(result: &mut LayoutResult, scale: &TimeScale, axis_y: Px, config: &MilestoneConfig) {
    let half = config.level_unit * config.axis_half_height;
    let span_days = scale.days().max(1) as f64;
    let head_days = (span_days * config.head_ratio).max(config.head_min_days).min(span_days);
    let body_right = scale.x_days(span_days - head_days);
    let (left, right) = (scale.left, scale.right());

    result.decorations.push(Decoration::Polygon {
        points: vec![
            Point::new(left, axis_y - half),
            Point::new(body_right, axis_y - half),
            Point::new(body_right, axis_y + half),
            Point::new(left, axis_y + half),
        ],
        style: StyleTag::Axis,
    });
    result.decorations.push(Decoration::Polygon {
        points: vec![
            Point::new(body_right, axis_y - half),
            Point::new(right, axis_y),
            Point::new(body_right, axis_y + half),
        ],
        style: StyleTag::Axis,
    });
}

/// Month ticks hanging below `baseline`, each labelled `%b %Y`.
fn month_ticks(result: &mut LayoutResult, scale: &TimeScale, baseline: Px, config: &MilestoneConfig) {
    for month in scale.month_starts() {
        let x = scale.x(month);
        result.decorations.push(Decoration::GridLine {
            from: Point::new(x, baseline),
            to: Point::new(x, baseline + TICK_LENGTH),
            major: true,
        });
        result.labels.push(Label {
            text: month.format("%b %Y").to_string(),
            anchor: Point::new(x, baseline + TICK_LENGTH * 1.5),
            align: TextAlign::new(HAlign::Center, VAlign::Top),
            font: config.date_font,
            role: LabelRole::AxisTick,
        });
    }
}
