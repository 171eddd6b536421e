//! Gantt chart layout.
//!
//! One row per event in chronological order. Two right-aligned label columns
//! (id and task) sit left of the time axis. Tasks are bars, milestones are
//! diamonds with a date label, and dependencies are elbow arrows from the
//! predecessor's anchor into the successor.

use super::connector::dependency_elbow;
use super::{
    DiagramKind, Decoration, Element, ElementKey, GanttConfig, HAlign, Label, LabelRole,
    LayoutResult, LegendEntry, PlacedBox, StyleTag, TextAlign, VAlign,
};
use crate::errors::{LayoutError, LayoutWarning};
use crate::log;
use crate::schedule::{Row, Schedule, TimeScale};
use crate::text::{GlyphMetrics, TextFitter};
use crate::types::{Point, Px, PtPx, Size};

const ID_HEADER: &str = "ID";
const TASK_HEADER: &str = "Task";
const MILESTONE_LEGEND: &str = "Milestone";
const ROW_LABEL: TextAlign = TextAlign::new(HAlign::Right, VAlign::Middle);
/// Gap between the last row and the month labels
const TICK_LABEL_GAP: Px = Px::new(4.0);

/// Lay out `schedule` as a Gantt chart headed by `title`.
pub fn layout_gantt(
    schedule: &Schedule,
    title: &str,
    metrics: &dyn GlyphMetrics,
    config: &GanttConfig,
) -> Result<LayoutResult, LayoutError> {
    config.validate()?;
    let (first, last) = schedule.span().ok_or(LayoutError::EmptyInput)?;
    let rows = schedule.rows();

    let mut result = LayoutResult::new(DiagramKind::Gantt);
    result.warnings.extend(schedule.warnings().iter().cloned());

    let label_font = config.label_font;
    let header_font = label_font.bold();
    let fitter = TextFitter::new(metrics, label_font).max_lines(1);

    // Label columns
    let id_width = rows
        .iter()
        .filter_map(|r| r.event.id.as_deref())
        .map(|id| fitter.measure(id))
        .fold(metrics.width(ID_HEADER, &header_font), Px::max);
    let task_width = rows
        .iter()
        .map(|r| fitter.measure(&r.event.title))
        .fold(metrics.width(TASK_HEADER, &header_font), Px::max)
        .min(config.max_label_width);
    let id_right = config.margin + id_width;
    let task_right = id_right + config.label_column_gap + task_width;
    let chart_left = task_right + config.label_column_gap;

    let scale = TimeScale::padded(first, last, config.lead_days, config.tail_days, chart_left, config.day_width);
    let rows_top = config.margin + config.header_height;
    let rows_bottom = rows_top + config.row_pitch * rows.len() as f64;
    let row_center = |i: usize| rows_top + config.row_pitch * (i as f64 + 0.5);

    result.canvas = Size {
        w: scale.right() + config.margin,
        h: rows_bottom + config.footer_height + config.margin,
    };
    log::debug!(
        width = result.canvas.w.raw(),
        height = result.canvas.h.raw(),
        rows = rows.len(),
        "gantt canvas"
    );

    // Header
    result.labels.push(Label {
        text: title.to_string(),
        anchor: Point::new((scale.left + scale.right()) / 2.0, config.margin),
        align: TextAlign::new(HAlign::Center, VAlign::Top),
        font: config.title_font,
        role: LabelRole::Title,
    });
    for (text, x) in [(ID_HEADER, id_right), (TASK_HEADER, task_right)] {
        result.labels.push(Label {
            text: text.to_string(),
            anchor: Point::new(x, rows_top),
            align: TextAlign::new(HAlign::Right, VAlign::Bottom),
            font: header_font,
            role: LabelRole::ColumnHeader,
        });
    }

    grid(&mut result, &scale, rows_top, rows_bottom, config);

    let band_height = config.band_height();
    let bar_height = config.bar_height();
    for (i, row) in rows.iter().enumerate() {
        let center_y = row_center(i);
        let band_group = if row.event.is_milestone { None } else { Some(row.group) };
        result.decorations.push(Decoration::Band(PlacedBox::from_left(
            scale.left,
            center_y - band_height / 2.0,
            Size { w: scale.width(), h: band_height },
            StyleTag::RowBand { group: band_group },
        )));

        let rect = if row.event.is_milestone {
            let marker = Size { w: config.marker_size, h: config.marker_size };
            let center = Point::new(scale.x(row.event.start), center_y);
            result.labels.push(date_label(row, center, &scale, metrics, config));
            PlacedBox::centered(center, marker, StyleTag::MilestoneMarker)
        } else {
            let days = ((row.event.finish - row.event.start).num_days() as f64).max(config.min_bar_days);
            PlacedBox::from_left(
                scale.x(row.event.start),
                center_y - bar_height / 2.0,
                Size { w: config.day_width * days, h: bar_height },
                StyleTag::Bar { group: row.group },
            )
        };

        if let Some(id) = &row.event.id {
            result.labels.push(Label {
                text: id.clone(),
                anchor: Point::new(id_right, center_y),
                align: ROW_LABEL,
                font: label_font,
                role: LabelRole::RowId,
            });
        }

        let text = fitter.wrap(&row.event.title, Size { w: task_width, h: config.row_pitch });
        if text.degenerate {
            result.warn(LayoutWarning::DegenerateText {
                element: row.event.title.clone(),
                width: task_width.raw(),
            });
        }
        result.push(Element {
            key: ElementKey::Event(row.index),
            rect,
            text,
            text_anchor: Point::new(task_right, center_y),
            align: ROW_LABEL,
            connectors: Vec::new(),
        });
    }

    dependencies(&mut result, schedule);

    for (name, group) in schedule.legend() {
        result.legend.push(LegendEntry { label: name.to_string(), style: StyleTag::Bar { group } });
    }
    result.legend.push(LegendEntry {
        label: MILESTONE_LEGEND.to_string(),
        style: StyleTag::MilestoneMarker,
    });

    Ok(result)
}

/// `%Y-%m-%d` label right of a milestone marker, pulled left if it would
/// run past the end of the axis.
fn date_label(
    row: &Row,
    marker: PtPx,
    scale: &TimeScale,
    metrics: &dyn GlyphMetrics,
    config: &GanttConfig,
) -> Label {
    let text = row.event.start.format("%Y-%m-%d").to_string();
    let width = metrics.width(&text, &config.label_font);
    let x = (marker.x + config.day_width * config.date_label_days).min(scale.right() - width);
    Label {
        text,
        anchor: Point::new(x, marker.y),
        align: TextAlign::new(HAlign::Left, VAlign::Middle),
        font: config.label_font,
        role: LabelRole::Date,
    }
}

/// Monthly major lines with labels and Monday minor lines.
fn grid(result: &mut LayoutResult, scale: &TimeScale, top: Px, bottom: Px, config: &GanttConfig) {
    for month in scale.month_starts() {
        let x = scale.x(month);
        result.decorations.push(Decoration::GridLine {
            from: Point::new(x, top),
            to: Point::new(x, bottom),
            major: true,
        });
        result.labels.push(Label {
            text: month.format("%b %Y").to_string(),
            anchor: Point::new(x, bottom + TICK_LABEL_GAP),
            align: TextAlign::new(HAlign::Center, VAlign::Top),
            font: config.label_font,
            role: LabelRole::AxisTick,
        });
    }
    for monday in scale.mondays() {
        let x = scale.x(monday);
        result.decorations.push(Decoration::GridLine {
            from: Point::new(x, top),
            to: Point::new(x, bottom),
            major: false,
        });
    }
}

/// Route every dependency edge; edges naming an unknown id or the event itself
/// are dropped with a warning.
fn dependencies(result: &mut LayoutResult, schedule: &Schedule) {
    let rows = schedule.rows();
    let mut routed = Vec::new();

    for (succ_pos, succ) in rows.iter().enumerate() {
        for dep in &succ.event.depends_on {
            let Some(pred_pos) = schedule.row_of(dep) else {
                result.warn(LayoutWarning::UnknownDependency {
                    event: succ.event.key().unwrap_or(&succ.event.title).to_string(),
                    missing: dep.trim().to_string(),
                });
                continue;
            };
            if pred_pos == succ_pos {
                result.warn(LayoutWarning::SelfDependency {
                    event: succ.event.key().unwrap_or(&succ.event.title).to_string(),
                });
                continue;
            }

            let pred = &rows[pred_pos];
            let (Some(from), Some(to)) = (
                result.get(&ElementKey::Event(pred.index)).map(|e| e.rect),
                result.get(&ElementKey::Event(succ.index)).map(|e| e.rect),
            ) else {
                continue;
            };

            // milestones hand off from their date, tasks from their finish
            let start = if pred.event.is_milestone {
                from.center()
            } else {
                Point::new(from.right(), from.mid_y())
            };
            let end_x = if succ.event.is_milestone { to.center_x } else { to.left() };
            let end_y = if pred_pos < succ_pos { to.top_y } else { to.bottom() };
            let path = dependency_elbow(start, Point::new(end_x, end_y));
            if path.points.len() >= 2 {
                routed.push((ElementKey::Event(pred.index), path));
            }
        }
    }

    for (key, path) in routed {
        result.attach(&key, path);
    }
}
