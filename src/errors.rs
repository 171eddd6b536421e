//! Error and warning types with diagnostics using miette
//!
//! [`LayoutError`] aborts a layout before any geometry exists.
//! [`LayoutWarning`] is recoverable: the offending edge or node is skipped or
//! promoted and the warning travels back with the finished layout.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::NumericError;

// ============================================================================
// Fatal errors
// ============================================================================

/// Errors that stop a layout request
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("no records to lay out")]
    #[diagnostic(
        code(pmlayout::config::empty_input),
        help("the table must contain at least one row")
    )]
    EmptyInput,

    #[error("record {index} is missing its {field}")]
    #[diagnostic(
        code(pmlayout::config::missing_field),
        help("every row needs a non-empty identifier and title")
    )]
    MissingField { index: usize, field: &'static str },

    #[error("duplicate id `{id}` (rows {first} and {second})")]
    #[diagnostic(
        code(pmlayout::config::duplicate_id),
        help("ids must be unique; rename or merge one of the rows")
    )]
    DuplicateId { id: String, first: usize, second: usize },

    #[error("no milestones found")]
    #[diagnostic(
        code(pmlayout::config::no_milestones),
        help("mark at least one event as a milestone")
    )]
    NoMilestones,

    #[error("invalid configuration value `{name}`: {source}")]
    #[diagnostic(code(pmlayout::config::invalid_value))]
    InvalidConfig {
        name: &'static str,
        #[source]
        source: NumericError,
    },
}

impl LayoutError {
    pub(crate) fn invalid(name: &'static str) -> impl FnOnce(NumericError) -> LayoutError {
        move |source| LayoutError::InvalidConfig { name, source }
    }
}

// ============================================================================
// Recoverable warnings
// ============================================================================

/// Data-quality and degenerate-geometry conditions that did not stop layout
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum LayoutWarning {
    #[error("`{event}` depends on unknown id `{missing}`; dependency arrow dropped")]
    #[diagnostic(code(pmlayout::data::unknown_dependency), severity(Warning))]
    UnknownDependency { event: String, missing: String },

    #[error("`{id}` refers to missing parent `{parent}`; promoted to a root")]
    #[diagnostic(code(pmlayout::data::orphaned_parent), severity(Warning))]
    OrphanedParent { id: String, parent: String },

    #[error("text for `{element}` does not fit a {width}px box; output truncated")]
    #[diagnostic(
        code(pmlayout::geometry::degenerate_text),
        severity(Warning),
        help("widen the box or reduce the font size")
    )]
    DegenerateText { element: String, width: f64 },

    #[error("`{event}` finishes before it starts; drawn with minimum width")]
    #[diagnostic(code(pmlayout::data::inverted_dates), severity(Warning))]
    InvertedDates { event: String },

    #[error("`{event}` depends on itself; dependency arrow dropped")]
    #[diagnostic(code(pmlayout::data::self_dependency), severity(Warning))]
    SelfDependency { event: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_id_message_names_both_rows() {
        let err = LayoutError::DuplicateId { id: "1.2".into(), first: 1, second: 4 };
        assert_eq!(err.to_string(), "duplicate id `1.2` (rows 1 and 4)");
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("pmlayout::config::duplicate_id")
        );
    }

    #[test]
    fn warnings_carry_warning_severity() {
        let w = LayoutWarning::UnknownDependency { event: "7".into(), missing: "99".into() };
        assert_eq!(w.severity(), Some(miette::Severity::Warning));
        assert!(w.to_string().contains("99"));
    }

    #[test]
    fn invalid_config_wraps_numeric_error() {
        let err = LayoutError::invalid("box_width")(NumericError::Negative);
        assert_eq!(
            err,
            LayoutError::InvalidConfig { name: "box_width", source: NumericError::Negative }
        );
        assert!(err.to_string().contains("value is negative"));
    }
}
