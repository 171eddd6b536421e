//! Schedule model shared by the Gantt and milestone layouts.
//!
//! Events are normalised once: milestones collapse to a single day, rows are
//! put in chronological order and groups get stable palette indices.

use std::collections::HashMap;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::errors::{LayoutError, LayoutWarning};
use crate::log;
use crate::types::Px;

/// Group name used when an event has none
pub const DEFAULT_GROUP: &str = "Default";
/// Group excluded from the legend
const MILESTONE_GROUP: &str = "milestone";
/// Legend order by first letter of the group name
const LEGEND_PRIORITY: [char; 9] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'M'];

/// One scheduled task or milestone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: Option<String>,
    pub title: String,
    pub start: NaiveDate,
    pub finish: NaiveDate,
    pub is_milestone: bool,
    pub group: Option<String>,
    /// Predecessor ids
    pub depends_on: Vec<String>,
}

impl Event {
    pub fn task(title: impl Into<String>, start: NaiveDate, finish: NaiveDate) -> Self {
        Self {
            id: None,
            title: title.into(),
            start,
            finish,
            is_milestone: false,
            group: None,
            depends_on: Vec::new(),
        }
    }

    pub fn milestone(title: impl Into<String>, date: NaiveDate) -> Self {
        Self { is_milestone: true, ..Self::task(title, date, date) }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn after(mut self, predecessor: impl Into<String>) -> Self {
        self.depends_on.push(predecessor.into());
        self
    }

    /// Trimmed id, `None` when absent or blank
    pub fn key(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    /// Display name of the event, preferring its id
    fn name(&self) -> String {
        self.key().map(str::to_owned).unwrap_or_else(|| self.title.clone())
    }
}

/// Split a predecessor list on `,` or `;`, dropping blanks.
pub fn parse_dependencies(list: &str) -> Vec<String> {
    list.split([',', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// An event placed in chronological order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Position in the caller's input
    pub index: usize,
    pub event: Event,
    /// Palette index of the event's group
    pub group: usize,
}

/// Events in display order with lookup tables
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    rows: Vec<Row>,
    by_id: HashMap<String, usize>,
    groups: Vec<String>,
    warnings: Vec<LayoutWarning>,
}

impl Schedule {
    /// Normalise and order `events`.
    ///
    /// Rows are sorted by `(start, finish, title)`. A milestone's finish is
    /// forced to its start. A task finishing before it starts is kept and an
    /// [`LayoutWarning::InvertedDates`] is recorded.
    pub fn build(events: &[Event]) -> Result<Schedule, LayoutError> {
        if events.is_empty() {
            return Err(LayoutError::EmptyInput);
        }

        let mut first_seen: HashMap<&str, usize> = HashMap::new();
        let mut warnings = Vec::new();
        let mut rows = Vec::with_capacity(events.len());

        for (index, event) in events.iter().enumerate() {
            if event.title.trim().is_empty() {
                return Err(LayoutError::MissingField { index, field: "title" });
            }
            if let Some(id) = event.key() {
                if let Some(&first) = first_seen.get(id) {
                    return Err(LayoutError::DuplicateId { id: id.to_string(), first, second: index });
                }
                first_seen.insert(id, index);
            }

            let mut event = event.clone();
            event.title = event.title.trim().to_string();
            event.id = event.key().map(str::to_owned);
            if event.is_milestone {
                event.finish = event.start;
            } else if event.finish < event.start {
                let warning = LayoutWarning::InvertedDates { event: event.name() };
                log::report(&warning);
                warnings.push(warning);
            }
            rows.push(Row { index, event, group: 0 });
        }

        rows.sort_by(|a, b| {
            (a.event.start, a.event.finish, &a.event.title).cmp(&(
                b.event.start,
                b.event.finish,
                &b.event.title,
            ))
        });

        let mut groups: Vec<String> = Vec::new();
        let mut by_id = HashMap::new();
        for (pos, row) in rows.iter_mut().enumerate() {
            let name = row.event.group.as_deref().map(str::trim).unwrap_or(DEFAULT_GROUP);
            row.group = match groups.iter().position(|g| g == name) {
                Some(i) => i,
                None => {
                    groups.push(name.to_string());
                    groups.len() - 1
                }
            };
            if let Some(id) = &row.event.id {
                by_id.insert(id.clone(), pos);
            }
        }

        log::debug!(rows = rows.len(), groups = groups.len(), "schedule built");

        Ok(Schedule { rows, by_id, groups, warnings })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row position of the event with `id`
    pub fn row_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id.trim()).copied()
    }

    /// Group names in palette order
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn warnings(&self) -> &[LayoutWarning] {
        &self.warnings
    }

    /// Earliest start and latest finish over all rows
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.rows.iter().map(|r| r.event.start).min()?;
        let finish = self.rows.iter().map(|r| r.event.finish.max(r.event.start)).max()?;
        Some((start, finish))
    }

    /// Milestone rows ordered by date
    pub fn milestones(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|r| r.event.is_milestone)
    }

    /// Groups for the legend with their palette index, in display order.
    ///
    /// Names starting with `A`..`H` come first in letter order, then `M`, then
    /// everything else; ties break on the name. The milestone group is left
    /// out.
    pub fn legend(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .groups
            .iter()
            .enumerate()
            .filter(|(_, g)| !g.trim().eq_ignore_ascii_case(MILESTONE_GROUP) && !g.trim().is_empty())
            .map(|(i, g)| (g.as_str(), i))
            .collect();
        entries.sort_by(|a, b| (legend_priority(a.0), a.0).cmp(&(legend_priority(b.0), b.0)));
        entries
    }
}

fn legend_priority(name: &str) -> usize {
    name.trim()
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase())
        .and_then(|c| LEGEND_PRIORITY.iter().position(|&p| p == c))
        .unwrap_or(LEGEND_PRIORITY.len())
}

// ============================================================================
// Time axis
// ============================================================================

/// Linear date-to-pixel mapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    pub origin: NaiveDate,
    pub end: NaiveDate,
    /// Pixel position of `origin`
    pub left: Px,
    pub day_width: Px,
}

impl TimeScale {
    /// Axis from `lead` days before `first` to `tail` days after `last`.
    pub fn padded(first: NaiveDate, last: NaiveDate, lead: u64, tail: u64, left: Px, day_width: Px) -> Self {
        let origin = first.checked_sub_days(Days::new(lead)).unwrap_or(first);
        let end = last.checked_add_days(Days::new(tail)).unwrap_or(last);
        Self { origin, end, left, day_width }
    }

    /// Scale that maps `[origin, end]` onto `[left, left + width]`.
    pub fn fitted(origin: NaiveDate, end: NaiveDate, left: Px, width: Px) -> Self {
        let days = (end - origin).num_days().max(1) as f64;
        Self { origin, end, left, day_width: width / days }
    }

    pub fn days(&self) -> i64 {
        (self.end - self.origin).num_days()
    }

    pub fn width(&self) -> Px {
        self.day_width * self.days() as f64
    }

    pub fn right(&self) -> Px {
        self.left + self.width()
    }

    pub fn x(&self, date: NaiveDate) -> Px {
        self.x_days((date - self.origin).num_days() as f64)
    }

    /// Pixel position `days` after the origin
    pub fn x_days(&self, days: f64) -> Px {
        self.left + self.day_width * days
    }

    /// First day of every month within the axis, origin excluded.
    pub fn month_starts(&self) -> Vec<NaiveDate> {
        let mut out = Vec::new();
        let mut cursor = NaiveDate::from_ymd_opt(self.origin.year(), self.origin.month(), 1);
        while let Some(date) = cursor {
            if date > self.end {
                break;
            }
            if date > self.origin {
                out.push(date);
            }
            cursor = date.checked_add_months(Months::new(1));
        }
        out
    }

    /// Every Monday within the axis.
    pub fn mondays(&self) -> Vec<NaiveDate> {
        let offset = (7 + Weekday::Mon.num_days_from_monday() as u64
            - self.origin.weekday().num_days_from_monday() as u64)
            % 7;
        let mut out = Vec::new();
        let mut cursor = self.origin.checked_add_days(Days::new(offset));
        while let Some(date) = cursor {
            if date > self.end {
                break;
            }
            out.push(date);
            cursor = date.checked_add_days(Days::new(7));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn rows_sorted_by_start_finish_title() {
        let events = vec![
            Event::task("Build", d(2026, 1, 10), d(2026, 1, 20)),
            Event::task("Audit", d(2026, 1, 10), d(2026, 1, 20)),
            Event::task("Plan", d(2026, 1, 1), d(2026, 1, 9)),
            Event::task("Short", d(2026, 1, 10), d(2026, 1, 12)),
        ];
        let schedule = Schedule::build(&events).unwrap();
        let titles: Vec<&str> = schedule.rows().iter().map(|r| r.event.title.as_str()).collect();
        assert_eq!(titles, ["Plan", "Short", "Audit", "Build"]);
        assert_eq!(schedule.rows()[0].index, 2);
    }

    #[test]
    fn milestone_finish_forced_to_start() {
        let mut m = Event::milestone("Go live", d(2026, 3, 1));
        m.finish = d(2026, 4, 1);
        let schedule = Schedule::build(&[m]).unwrap();
        assert_eq!(schedule.rows()[0].event.finish, d(2026, 3, 1));
        assert!(schedule.warnings().is_empty());
    }

    #[test]
    fn inverted_task_warns() {
        let e = Event::task("Oops", d(2026, 3, 5), d(2026, 3, 1)).with_id("7");
        let schedule = Schedule::build(&[e]).unwrap();
        assert_eq!(schedule.warnings(), [LayoutWarning::InvertedDates { event: "7".into() }]);
        assert_eq!(schedule.span(), Some((d(2026, 3, 5), d(2026, 3, 5))));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(Schedule::build(&[]).unwrap_err(), LayoutError::EmptyInput);
        let blank = Event::task(" ", d(2026, 1, 1), d(2026, 1, 2));
        assert_eq!(
            Schedule::build(&[blank]).unwrap_err(),
            LayoutError::MissingField { index: 0, field: "title" }
        );
        let a = Event::task("a", d(2026, 1, 1), d(2026, 1, 2)).with_id("1");
        let b = Event::task("b", d(2026, 1, 1), d(2026, 1, 2)).with_id(" 1 ");
        assert_eq!(
            Schedule::build(&[a, b]).unwrap_err(),
            LayoutError::DuplicateId { id: "1".into(), first: 0, second: 1 }
        );
    }

    #[test]
    fn blank_ids_are_not_duplicates() {
        let a = Event::task("a", d(2026, 1, 1), d(2026, 1, 2)).with_id("");
        let b = Event::task("b", d(2026, 1, 1), d(2026, 1, 2)).with_id("  ");
        let schedule = Schedule::build(&[a, b]).unwrap();
        assert_eq!(schedule.row_of(""), None);
    }

    #[test]
    fn groups_indexed_by_first_appearance_in_row_order() {
        let events = vec![
            Event::task("late", d(2026, 2, 1), d(2026, 2, 2)).in_group("B Build"),
            Event::task("early", d(2026, 1, 1), d(2026, 1, 2)).in_group("A Design"),
            Event::task("none", d(2026, 1, 5), d(2026, 1, 6)),
        ];
        let schedule = Schedule::build(&events).unwrap();
        assert_eq!(schedule.groups(), ["A Design", DEFAULT_GROUP, "B Build"]);
        assert_eq!(schedule.rows()[2].group, 2);
    }

    #[test]
    fn legend_priority_order() {
        let events: Vec<Event> = ["Zeta", "M Mgmt", "milestone", "B Build", "A Design", "Alpha"]
            .iter()
            .enumerate()
            .map(|(i, g)| Event::task(format!("t{i}"), d(2026, 1, 1 + i as u32), d(2026, 1, 2 + i as u32)).in_group(*g))
            .collect();
        let schedule = Schedule::build(&events).unwrap();
        let names: Vec<&str> = schedule.legend().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["A Design", "Alpha", "B Build", "M Mgmt", "Zeta"]);
    }

    #[test]
    fn dependency_lists_split_on_comma_and_semicolon() {
        assert_eq!(parse_dependencies(" 1, 2;3 ,, "), ["1", "2", "3"]);
        assert!(parse_dependencies("").is_empty());
    }

    #[test]
    fn time_scale_maps_days_linearly() {
        let scale = TimeScale::padded(d(2026, 1, 10), d(2026, 1, 20), 3, 7, Px(100.0), Px(12.0));
        assert_eq!(scale.origin, d(2026, 1, 7));
        assert_eq!(scale.end, d(2026, 1, 27));
        assert_eq!(scale.days(), 20);
        assert_eq!(scale.x(d(2026, 1, 10)), Px(136.0));
        assert_eq!(scale.right(), Px(340.0));
    }

    #[test]
    fn ticks_within_axis() {
        let scale = TimeScale::padded(d(2026, 1, 28), d(2026, 3, 2), 0, 0, Px(0.0), Px(1.0));
        assert_eq!(scale.month_starts(), [d(2026, 2, 1), d(2026, 3, 1)]);
        let mondays = scale.mondays();
        // 2026-02-02 is a Monday
        assert_eq!(mondays.first(), Some(&d(2026, 2, 2)));
        assert!(mondays.iter().all(|m| m.weekday() == Weekday::Mon));
        assert_eq!(mondays.last(), Some(&d(2026, 3, 2)));
    }

    #[test]
    fn fitted_scale_spans_width() {
        let scale = TimeScale::fitted(d(2026, 1, 1), d(2026, 1, 11), Px(60.0), Px(1000.0));
        assert_eq!(scale.x(d(2026, 1, 1)), Px(60.0));
        assert_eq!(scale.right(), Px(1060.0));
    }
}
