//! Logging shim.
//!
//! With the `tracing` feature, `log::debug!` and `log::warn!` are the
//! `tracing` macros. Without it they expand to nothing.

use crate::errors::LayoutWarning;

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __pmlayout_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __pmlayout_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use crate::{__pmlayout_debug as debug, __pmlayout_warn as warn};

/// Emit a data-quality warning, tagged with its diagnostic code.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub(crate) fn report(warning: &LayoutWarning) {
    warn!(
        code = %miette::Diagnostic::code(warning).map(|c| c.to_string()).unwrap_or_default(),
        %warning,
        "layout warning"
    );
}
