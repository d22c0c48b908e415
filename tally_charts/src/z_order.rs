// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for chart-generated marks.
//!
//! Marks carry an explicit `z_index`; the chart layer assigns these
//! consistently so callers never hand-tune paint order. Renderers sort by
//! `(z_index, MarkId)` for a deterministic tie-break.

/// Plot background fill.
pub const PLOT_BACKGROUND: i32 = -100;

/// Filled series marks (bars, donut sectors).
pub const SERIES_FILL: i32 = 0;
/// Count/percent annotations attached to bars and sectors.
pub const BAR_LABELS: i32 = 15;

/// Plot frame spines, axis domain lines, and tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick and category labels.
pub const AXIS_LABELS: i32 = 40;
/// Axis title labels.
pub const AXIS_TITLES: i32 = 50;

/// Legend swatches.
pub const LEGEND_SWATCHES: i32 = 60;
/// Legend labels.
pub const LEGEND_LABELS: i32 = 70;
/// Chart-level titles and center annotations.
pub const TITLES: i32 = 80;
