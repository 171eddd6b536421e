//! Text measurement and fitting
//!
//! - `metrics`: the [`GlyphMetrics`] seam and a table-driven implementation
//! - `fit`: [`TextFitter`], wrapping text into a bounded box

pub mod fit;
pub mod metrics;

pub use fit::{TextBlock, TextFitter};
pub use metrics::{Font, GlyphMetrics, ProportionalMetrics};
