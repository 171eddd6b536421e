//! Default sizes and settings (all in pixels unless noted)

use crate::types::{Color, Px};

// ============================================================================
// Work-breakdown tree (sized for 200 dpi output)
// ============================================================================

pub const WBS_DPI: f64 = 200.0;
pub const WBS_BOX_WIDTH: Px = Px::new(1320.0);
pub const WBS_BOX_HEIGHT: Px = Px::new(720.0);
pub const WBS_COLUMN_GAP: Px = Px::new(1350.0);
pub const WBS_LEVEL_GAP: Px = Px::new(300.0);
pub const WBS_CLUSTER_GAP: Px = Px::new(360.0);
pub const WBS_INDENT: Px = Px::new(840.0);
pub const WBS_SPINE_OFFSET: Px = Px::new(72.0);
pub const WBS_SPINE_INSET: Px = Px::new(60.0);
pub const WBS_PADDING_X: Px = Px::new(90.0);
pub const WBS_PADDING_Y: Px = Px::new(60.0);
/// Share of the padded box width text may use
pub const WBS_TEXT_WIDTH_FACTOR: f64 = 0.8;
/// Points
pub const WBS_FONT_PT: f64 = 31.0;
pub const WBS_LINE_SPACING: f64 = 2.0;

pub const WBS_TITLE_WIDTH: Px = Px::new(1600.0);
pub const WBS_TITLE_HEIGHT: Px = Px::new(420.0);
pub const WBS_TITLE_TOP: Px = Px::new(60.0);
pub const WBS_TITLE_GAP: Px = Px::new(180.0);
/// Points
pub const WBS_TITLE_FONT_PT: f64 = 22.0;

pub const WBS_MIN_CANVAS_WIDTH: Px = Px::new(14400.0);
pub const WBS_MIN_CANVAS_HEIGHT: Px = Px::new(6600.0);
pub const WBS_HEIGHT_OVERSHOOT: f64 = 1.2;
pub const WBS_COLUMN_MARGIN: Px = Px::new(400.0);

/// Fill per depth: title, level 1, level 2, level 3+
pub const WBS_FILLS: [Color; 4] = [
    Color::hex(0x015c0b),
    Color::hex(0x4ea72e),
    Color::hex(0xd0e1cd),
    Color::hex(0xe9f1e8),
];
pub const WBS_EDGES: [Color; 4] = [
    Color::hex(0x015c0b),
    Color::hex(0x2d6a34),
    Color::hex(0x409140),
    Color::hex(0x94bb9d),
];
pub const WBS_EDGE_WIDTHS: [f64; 4] = [3.0, 3.0, 2.5, 2.5];
pub const WBS_CONNECTOR: Color = Color::hex(0x1b4332);
pub const WBS_CONNECTOR_WIDTH: f64 = 2.0;

// ============================================================================
// Gantt chart
// ============================================================================

pub const GANTT_DAY_WIDTH: Px = Px::new(12.0);
pub const GANTT_ROW_PITCH: Px = Px::new(38.0);
pub const GANTT_BAR_RATIO: f64 = 0.6;
/// Row band height as a multiple of the bar height
pub const GANTT_BAND_RATIO: f64 = 1.8;
pub const GANTT_BAND_ALPHA: f64 = 0.16;
pub const GANTT_LEAD_DAYS: u64 = 3;
pub const GANTT_TAIL_DAYS: u64 = 7;
pub const GANTT_MIN_BAR_DAYS: f64 = 0.5;
pub const GANTT_DATE_LABEL_DAYS: f64 = 0.6;
pub const GANTT_MARKER_SIZE: Px = Px::new(10.0);
pub const GANTT_LABEL_FONT_PX: f64 = 13.0;
pub const GANTT_TITLE_FONT_PX: f64 = 19.0;
pub const GANTT_MAX_LABEL_WIDTH: Px = Px::new(420.0);
pub const GANTT_LABEL_COLUMN_GAP: Px = Px::new(24.0);
pub const GANTT_MARGIN: Px = Px::new(20.0);
pub const GANTT_HEADER_HEIGHT: Px = Px::new(60.0);
pub const GANTT_FOOTER_HEIGHT: Px = Px::new(48.0);
pub const GANTT_ARROW_COLOR: Color = Color::hex(0x000000);
pub const GANTT_ARROW_WIDTH: f64 = 0.8;
pub const GANTT_MILESTONE_BAND: Color = Color::hex(0xd3d3d3);
pub const GANTT_DEFAULT_BAR: Color = Color::hex(0x66bb6a);

/// Twenty-entry categorical palette, cycled by group
pub const GROUP_PALETTE: [Color; 20] = [
    Color::hex(0x1f77b4), Color::hex(0xaec7e8), Color::hex(0xff7f0e), Color::hex(0xffbb78),
    Color::hex(0x2ca02c), Color::hex(0x98df8a), Color::hex(0xd62728), Color::hex(0xff9896),
    Color::hex(0x9467bd), Color::hex(0xc5b0d5), Color::hex(0x8c564b), Color::hex(0xc49c94),
    Color::hex(0xe377c2), Color::hex(0xf7b6d2), Color::hex(0x7f7f7f), Color::hex(0xc7c7c7),
    Color::hex(0xbcbd22), Color::hex(0xdbdb8d), Color::hex(0x17becf), Color::hex(0x9edae5),
];

// ============================================================================
// Milestone timeline
// ============================================================================

pub const MILESTONE_CANVAS_WIDTH: Px = Px::new(2200.0);
pub const MILESTONE_CANVAS_HEIGHT: Px = Px::new(700.0);
pub const MILESTONE_MARGIN: Px = Px::new(60.0);
/// Pixels per stagger level unit
pub const MILESTONE_LEVEL_UNIT: Px = Px::new(60.0);
/// Repeating stagger offsets, positive above the axis
pub const MILESTONE_LEVELS: [f64; 6] = [3.0, -3.0, 2.0, -2.0, 1.0, -1.0];
/// Level units between the connector tip and the label
pub const MILESTONE_TEXT_GAP: f64 = 0.35;
pub const MILESTONE_DATE_GAP: Px = Px::new(6.0);
pub const MILESTONE_PAD_DAYS: u64 = 10;
/// Half the axis band height, in level units
pub const MILESTONE_AXIS_HALF_HEIGHT: f64 = 0.6;
pub const MILESTONE_HEAD_RATIO: f64 = 0.03;
pub const MILESTONE_HEAD_MIN_DAYS: f64 = 5.0;
pub const MILESTONE_LABEL_WIDTH: Px = Px::new(200.0);
pub const MILESTONE_MAX_LABEL_LINES: usize = 3;
pub const MILESTONE_FONT_PX: f64 = 14.0;
pub const MILESTONE_TITLE_FONT_PX: f64 = 22.0;
pub const MILESTONE_LINE_SPACING: f64 = 1.15;
pub const MILESTONE_MARKER_SIZE: Px = Px::new(12.0);
pub const MILESTONE_MARKER: Color = Color::hex(0x000000);
pub const MILESTONE_STEM: Color = Color::hex(0x666666);
pub const MILESTONE_DATE_TEXT: Color = Color::hex(0x333333);
/// Axis gradient, left to right
pub const MILESTONE_AXIS_GRADIENT: [Color; 3] = [
    Color::hex(0x4ea72e),
    Color::hex(0xd0e1cd),
    Color::hex(0xe9f1e8),
];
