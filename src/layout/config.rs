//! Immutable layout configuration.
//!
//! Each diagram has its own config struct. `Default` draws every value from
//! [`super::defaults`]; `validate` rejects non-finite and non-positive sizes
//! before any geometry is computed.

use super::StyleTag;
use super::defaults::*;
use crate::errors::LayoutError;
use crate::extent::ExtentDims;
use crate::text::Font;
use crate::types::{Color, Px, Size};

/// Fill and outline for a box-like element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStyle {
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f64,
}

/// Stroke for connector paths
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
}

fn positive(name: &'static str, value: Px) -> Result<(), LayoutError> {
    Px::try_positive(value.raw()).map(|_| ()).map_err(LayoutError::invalid(name))
}

fn non_negative(name: &'static str, value: Px) -> Result<(), LayoutError> {
    Px::try_non_negative(value.raw()).map(|_| ()).map_err(LayoutError::invalid(name))
}

fn positive_f64(name: &'static str, value: f64) -> Result<(), LayoutError> {
    positive(name, Px(value))
}

// ============================================================================
// Work-breakdown tree
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct WbsConfig {
    pub box_size: Size<Px>,
    pub column_gap: Px,
    /// Vertical gap below every box
    pub level_gap: Px,
    /// Extra gap above the children of a nested node
    pub cluster_gap: Px,
    /// Horizontal shift of nested children relative to their parent
    pub indent: Px,
    /// Distance of a root's spine left of the root box
    pub spine_offset: Px,
    /// Distance of a nested spine left of the indented children
    pub spine_inset: Px,
    pub padding_x: Px,
    pub padding_y: Px,
    pub text_width_factor: f64,
    pub font: Font,
    pub line_spacing: f64,
    pub max_lines: Option<usize>,
    pub title_size: Size<Px>,
    pub title_top: Px,
    pub title_gap: Px,
    pub title_font: Font,
    pub min_canvas: Size<Px>,
    pub height_overshoot: f64,
    pub column_margin: Px,
    /// Index 0 styles the title box, index `d` styles depth `d` (last entry repeats)
    pub box_styles: Vec<BoxStyle>,
    pub connector: LineStyle,
}

impl Default for WbsConfig {
    fn default() -> Self {
        let box_styles = WBS_FILLS
            .iter()
            .zip(WBS_EDGES.iter())
            .zip(WBS_EDGE_WIDTHS.iter())
            .map(|((&fill, &stroke), &stroke_width)| BoxStyle { fill, stroke, stroke_width })
            .collect::<Vec<_>>();
        // the title is drawn in the level-one palette
        let mut box_styles = box_styles;
        box_styles[0] = box_styles[1];

        Self {
            box_size: Size { w: WBS_BOX_WIDTH, h: WBS_BOX_HEIGHT },
            column_gap: WBS_COLUMN_GAP,
            level_gap: WBS_LEVEL_GAP,
            cluster_gap: WBS_CLUSTER_GAP,
            indent: WBS_INDENT,
            spine_offset: WBS_SPINE_OFFSET,
            spine_inset: WBS_SPINE_INSET,
            padding_x: WBS_PADDING_X,
            padding_y: WBS_PADDING_Y,
            text_width_factor: WBS_TEXT_WIDTH_FACTOR,
            font: Font::from_points(WBS_FONT_PT, WBS_DPI),
            line_spacing: WBS_LINE_SPACING,
            max_lines: None,
            title_size: Size { w: WBS_TITLE_WIDTH, h: WBS_TITLE_HEIGHT },
            title_top: WBS_TITLE_TOP,
            title_gap: WBS_TITLE_GAP,
            title_font: Font::from_points(WBS_TITLE_FONT_PT, WBS_DPI),
            min_canvas: Size { w: WBS_MIN_CANVAS_WIDTH, h: WBS_MIN_CANVAS_HEIGHT },
            height_overshoot: WBS_HEIGHT_OVERSHOOT,
            column_margin: WBS_COLUMN_MARGIN,
            box_styles,
            connector: LineStyle { color: WBS_CONNECTOR, width: WBS_CONNECTOR_WIDTH },
        }
    }
}

impl WbsConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        positive("box_width", self.box_size.w)?;
        positive("box_height", self.box_size.h)?;
        positive("title_width", self.title_size.w)?;
        positive("title_height", self.title_size.h)?;
        positive_f64("font_size", self.font.size_px)?;
        positive_f64("title_font_size", self.title_font.size_px)?;
        positive_f64("line_spacing", self.line_spacing)?;
        positive_f64("text_width_factor", self.text_width_factor)?;
        positive_f64("height_overshoot", self.height_overshoot)?;
        for (name, value) in [
            ("column_gap", self.column_gap),
            ("level_gap", self.level_gap),
            ("cluster_gap", self.cluster_gap),
            ("indent", self.indent),
            ("spine_offset", self.spine_offset),
            ("spine_inset", self.spine_inset),
            ("padding_x", self.padding_x),
            ("padding_y", self.padding_y),
            ("title_top", self.title_top),
            ("title_gap", self.title_gap),
            ("column_margin", self.column_margin),
            ("min_canvas_width", self.min_canvas.w),
            ("min_canvas_height", self.min_canvas.h),
        ] {
            non_negative(name, value)?;
        }
        Ok(())
    }

    pub fn extent_dims(&self) -> ExtentDims {
        ExtentDims {
            box_height: self.box_size.h,
            level_gap: self.level_gap,
            cluster_gap: self.cluster_gap,
            margin: self.column_margin,
        }
    }

    /// Area inside a box available to its caption
    pub fn text_area(&self, box_size: Size<Px>) -> Size<Px> {
        let w = (box_size.w - self.padding_x * 2.0) * self.text_width_factor;
        let h = box_size.h - self.padding_y * 2.0;
        Size { w: w.max(Px(1.0)), h: h.max(Px(1.0)) }
    }

    pub fn style(&self, tag: StyleTag) -> Option<BoxStyle> {
        let depth = match tag {
            StyleTag::Title => 0,
            StyleTag::Level(depth) => depth,
            _ => return None,
        };
        self.box_styles.get(depth).or(self.box_styles.last()).copied()
    }
}

// ============================================================================
// Gantt chart
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GanttConfig {
    pub day_width: Px,
    pub row_pitch: Px,
    /// Bar height as a share of the row pitch
    pub bar_ratio: f64,
    /// Row band height as a multiple of the bar height
    pub band_ratio: f64,
    pub band_alpha: f64,
    pub lead_days: u64,
    pub tail_days: u64,
    pub min_bar_days: f64,
    /// Gap between a milestone marker and its date label, in days
    pub date_label_days: f64,
    pub marker_size: Px,
    pub label_font: Font,
    pub title_font: Font,
    pub max_label_width: Px,
    pub label_column_gap: Px,
    pub margin: Px,
    pub header_height: Px,
    pub footer_height: Px,
    pub palette: Vec<Color>,
    pub default_bar: Color,
    pub milestone_band: Color,
    pub arrow: LineStyle,
}

impl Default for GanttConfig {
    fn default() -> Self {
        Self {
            day_width: GANTT_DAY_WIDTH,
            row_pitch: GANTT_ROW_PITCH,
            bar_ratio: GANTT_BAR_RATIO,
            band_ratio: GANTT_BAND_RATIO,
            band_alpha: GANTT_BAND_ALPHA,
            lead_days: GANTT_LEAD_DAYS,
            tail_days: GANTT_TAIL_DAYS,
            min_bar_days: GANTT_MIN_BAR_DAYS,
            date_label_days: GANTT_DATE_LABEL_DAYS,
            marker_size: GANTT_MARKER_SIZE,
            label_font: Font::px(GANTT_LABEL_FONT_PX).mono(),
            title_font: Font::px(GANTT_TITLE_FONT_PX),
            max_label_width: GANTT_MAX_LABEL_WIDTH,
            label_column_gap: GANTT_LABEL_COLUMN_GAP,
            margin: GANTT_MARGIN,
            header_height: GANTT_HEADER_HEIGHT,
            footer_height: GANTT_FOOTER_HEIGHT,
            palette: GROUP_PALETTE.to_vec(),
            default_bar: GANTT_DEFAULT_BAR,
            milestone_band: GANTT_MILESTONE_BAND,
            arrow: LineStyle { color: GANTT_ARROW_COLOR, width: GANTT_ARROW_WIDTH },
        }
    }
}

impl GanttConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        positive("day_width", self.day_width)?;
        positive("row_pitch", self.row_pitch)?;
        positive("marker_size", self.marker_size)?;
        positive("max_label_width", self.max_label_width)?;
        positive_f64("bar_ratio", self.bar_ratio)?;
        positive_f64("band_ratio", self.band_ratio)?;
        positive_f64("label_font_size", self.label_font.size_px)?;
        positive_f64("title_font_size", self.title_font.size_px)?;
        positive_f64("min_bar_days", self.min_bar_days)?;
        non_negative("date_label_days", Px(self.date_label_days))?;
        non_negative("label_column_gap", self.label_column_gap)?;
        non_negative("margin", self.margin)?;
        non_negative("header_height", self.header_height)?;
        non_negative("footer_height", self.footer_height)?;
        Ok(())
    }

    pub fn bar_height(&self) -> Px {
        self.row_pitch * self.bar_ratio
    }

    pub fn band_height(&self) -> Px {
        self.bar_height() * self.band_ratio
    }

    pub fn group_color(&self, group: usize) -> Color {
        if self.palette.is_empty() {
            self.default_bar
        } else {
            self.palette[group % self.palette.len()]
        }
    }

    pub fn style(&self, tag: StyleTag) -> Option<BoxStyle> {
        let outline = self.arrow.color;
        match tag {
            StyleTag::Bar { group } => Some(BoxStyle {
                fill: self.group_color(group),
                stroke: outline,
                stroke_width: 1.0,
            }),
            StyleTag::RowBand { group } => {
                let fill = match group {
                    Some(g) => self.group_color(g),
                    None => self.milestone_band,
                };
                let fill = fill.with_alpha(self.band_alpha);
                Some(BoxStyle { fill, stroke: fill, stroke_width: 0.0 })
            }
            StyleTag::MilestoneMarker => Some(BoxStyle { fill: outline, stroke: outline, stroke_width: 1.0 }),
            _ => None,
        }
    }
}

// ============================================================================
// Milestone timeline
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneConfig {
    pub canvas: Size<Px>,
    pub margin: Px,
    pub level_unit: Px,
    /// Stagger offsets in level units, cycled; positive is above the axis
    pub levels: Vec<f64>,
    /// Level units between connector tip and label
    pub text_gap: f64,
    /// Pixels between the wrapped label and the date line
    pub date_gap: Px,
    pub pad_days: u64,
    pub axis_half_height: f64,
    pub head_ratio: f64,
    pub head_min_days: f64,
    pub label_width: Px,
    pub max_label_lines: usize,
    pub font: Font,
    pub date_font: Font,
    pub title_font: Font,
    pub line_spacing: f64,
    pub marker_size: Px,
    pub marker: Color,
    pub stem: LineStyle,
    pub date_text: Color,
    pub axis_gradient: Vec<Color>,
}

impl Default for MilestoneConfig {
    fn default() -> Self {
        Self {
            canvas: Size { w: MILESTONE_CANVAS_WIDTH, h: MILESTONE_CANVAS_HEIGHT },
            margin: MILESTONE_MARGIN,
            level_unit: MILESTONE_LEVEL_UNIT,
            levels: MILESTONE_LEVELS.to_vec(),
            text_gap: MILESTONE_TEXT_GAP,
            date_gap: MILESTONE_DATE_GAP,
            pad_days: MILESTONE_PAD_DAYS,
            axis_half_height: MILESTONE_AXIS_HALF_HEIGHT,
            head_ratio: MILESTONE_HEAD_RATIO,
            head_min_days: MILESTONE_HEAD_MIN_DAYS,
            label_width: MILESTONE_LABEL_WIDTH,
            max_label_lines: MILESTONE_MAX_LABEL_LINES,
            font: Font::px(MILESTONE_FONT_PX).bold(),
            date_font: Font::px(MILESTONE_FONT_PX - 1.0),
            title_font: Font::px(MILESTONE_TITLE_FONT_PX),
            line_spacing: MILESTONE_LINE_SPACING,
            marker_size: MILESTONE_MARKER_SIZE,
            marker: MILESTONE_MARKER,
            stem: LineStyle { color: MILESTONE_STEM, width: 1.0 },
            date_text: MILESTONE_DATE_TEXT,
            axis_gradient: MILESTONE_AXIS_GRADIENT.to_vec(),
        }
    }
}

impl MilestoneConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        positive("canvas_width", self.canvas.w)?;
        positive("canvas_height", self.canvas.h)?;
        positive("level_unit", self.level_unit)?;
        positive("label_width", self.label_width)?;
        positive("marker_size", self.marker_size)?;
        positive_f64("font_size", self.font.size_px)?;
        positive_f64("date_font_size", self.date_font.size_px)?;
        positive_f64("title_font_size", self.title_font.size_px)?;
        positive_f64("line_spacing", self.line_spacing)?;
        positive_f64("max_label_lines", self.max_label_lines as f64)?;
        non_negative("margin", self.margin)?;
        non_negative("date_gap", self.date_gap)?;
        non_negative("text_gap", Px(self.text_gap))?;
        non_negative("axis_half_height", Px(self.axis_half_height))?;
        non_negative("head_min_days", Px(self.head_min_days))?;
        if self.levels.is_empty() {
            return Err(LayoutError::invalid("levels")(crate::types::NumericError::Zero));
        }
        for &level in &self.levels {
            Px::try_new(level).map_err(LayoutError::invalid("levels"))?;
        }
        if self.margin * 2.0 >= self.canvas.w {
            return Err(LayoutError::invalid("margin")(crate::types::NumericError::Negative));
        }
        Ok(())
    }

    pub fn style(&self, tag: StyleTag) -> Option<BoxStyle> {
        match tag {
            StyleTag::MilestoneMarker => {
                Some(BoxStyle { fill: self.marker, stroke: self.marker, stroke_width: 1.0 })
            }
            StyleTag::Axis => {
                let fill = self.axis_gradient.first().copied().unwrap_or(self.marker);
                Some(BoxStyle { fill, stroke: fill, stroke_width: 0.0 })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NumericError;

    #[test]
    fn defaults_validate() {
        WbsConfig::default().validate().unwrap();
        GanttConfig::default().validate().unwrap();
        MilestoneConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_zero_box() {
        let config = WbsConfig {
            box_size: Size::new(0.0, 100.0),
            ..WbsConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(LayoutError::InvalidConfig { name: "box_width", source: NumericError::Zero })
        );
    }

    #[test]
    fn rejects_nan_gap() {
        let config = GanttConfig { margin: Px(f64::NAN), ..GanttConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidConfig { name: "margin", source: NumericError::NaN })
        ));
    }

    #[test]
    fn wbs_text_area_matches_padding() {
        let config = WbsConfig::default();
        let area = config.text_area(config.box_size);
        assert!((area.w.raw() - 912.0).abs() < 1e-9);
        assert_eq!(area.h, Px(600.0));
    }

    #[test]
    fn deep_levels_reuse_last_style() {
        let config = WbsConfig::default();
        assert_eq!(config.style(StyleTag::Level(7)), config.style(StyleTag::Level(3)));
        assert_eq!(config.style(StyleTag::Title), config.style(StyleTag::Level(1)));
        assert_eq!(config.style(StyleTag::Axis), None);
    }

    #[test]
    fn group_colors_cycle() {
        let config = GanttConfig::default();
        assert_eq!(config.group_color(0), config.group_color(20));
        assert_ne!(config.group_color(0), config.group_color(1));
    }
}
