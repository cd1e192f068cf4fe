//! report: presenting a fitted model.
//!
//! Purpose
//! -------
//! Show how predicted probabilities move across a small grid of predictor
//! values: build the grid, score it, tabulate the result, and draw it.
//!
//! Key behaviors
//! -------------
//! - [`grid`] expands named axes into every combination of values, in the
//!   fitted feature order.
//! - [`summary::GridSummary`] scores the grid and keeps one probability per
//!   `(x, group)` cell. It prints as a wide table and exports long-format
//!   CSV (`csv` + `serde`).
//! - [`chart::render_grouped_bar_chart`] draws the summary as an SVG grouped
//!   bar chart (`plotters`).
//!
//! Conventions
//! -----------
//! - Axes other than the x and group axes must be held at one value.
//! - Failures surface as [`errors::ReportError`].

pub mod chart;
pub mod errors;
pub mod grid;
pub mod summary;

pub use self::chart::render_grouped_bar_chart;
pub use self::errors::{ReportError, ReportResult};
pub use self::grid::{GridAxis, PredictionGrid};
pub use self::summary::{GridSummary, SummaryRow};
