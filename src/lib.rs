//! Layout and text fitting for project-management diagrams.
//!
//! Three diagram kinds share one geometry model:
//!
//! - work-breakdown trees from dotted ids ([`wbs`])
//! - Gantt charts from dated events ([`gantt`])
//! - milestone timelines ([`milestones`])
//!
//! Every entry point returns a [`LayoutResult`]: boxes, fitted text,
//! orthogonal connectors and the warnings collected along the way. Rendering
//! is left to the caller.

pub mod errors;
pub mod extent;
pub mod hierarchy;
pub mod layout;
mod log;
pub mod path_key;
pub mod schedule;
pub mod text;
pub mod types;

pub use errors::{LayoutError, LayoutWarning};
pub use hierarchy::{Forest, Node, WbsRecord};
pub use layout::{
    ConnectorPath, Element, ElementKey, GanttConfig, LayoutResult, MilestoneConfig, PlacedBox,
    StyleTag, WbsConfig,
};
pub use path_key::PathKey;
pub use schedule::{Event, Schedule};
pub use text::{Font, GlyphMetrics, ProportionalMetrics, TextBlock, TextFitter};
pub use types::{Color, Px, Size};

/// Lay out a work-breakdown table as a tree under `title`.
pub fn wbs(
    records: &[WbsRecord],
    title: &str,
    metrics: &dyn GlyphMetrics,
    config: &WbsConfig,
) -> Result<LayoutResult, LayoutError> {
    let forest = Forest::build(records)?;
    layout::wbs::layout_wbs(&forest, title, metrics, config)
}

/// Lay out `events` as a Gantt chart.
pub fn gantt(
    events: &[Event],
    title: &str,
    metrics: &dyn GlyphMetrics,
    config: &GanttConfig,
) -> Result<LayoutResult, LayoutError> {
    let schedule = Schedule::build(events)?;
    layout::gantt::layout_gantt(&schedule, title, metrics, config)
}

/// Lay out the milestones among `events` on a timeline.
pub fn milestones(
    events: &[Event],
    title: &str,
    metrics: &dyn GlyphMetrics,
    config: &MilestoneConfig,
) -> Result<LayoutResult, LayoutError> {
    let schedule = Schedule::build(events)?;
    layout::milestone::layout_milestones(&schedule, title, metrics, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn wbs_rejects_duplicates_before_layout() {
        let records = [WbsRecord::new("1", "a"), WbsRecord::new("1", "b")];
        let err = wbs(&records, "T", &ProportionalMetrics, &WbsConfig::default()).unwrap_err();
        assert!(matches!(err, LayoutError::DuplicateId { .. }));
    }

    #[test]
    fn entry_points_report_kind() {
        let date = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();
        let events = [Event::milestone("Go", date)];
        let g = gantt(&events, "T", &ProportionalMetrics, &GanttConfig::default()).unwrap();
        let m = milestones(&events, "T", &ProportionalMetrics, &MilestoneConfig::default()).unwrap();
        assert_eq!(g.kind, layout::DiagramKind::Gantt);
        assert_eq!(m.kind, layout::DiagramKind::Milestones);
        assert_eq!(g.elements.len(), 1);
        assert_eq!(m.elements.len(), 1);
    }

    #[test]
    fn errors_convert_into_miette_reports() {
        fn run() -> miette::Result<LayoutResult> {
            Ok(wbs(&[], "T", &ProportionalMetrics, &WbsConfig::default())?)
        }
        let report = run().unwrap_err();
        assert!(report.to_string().contains("no records"));
    }
}
