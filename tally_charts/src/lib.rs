// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Annotated categorical count charts over `tally_frame` summaries.
//!
//! This crate is a small, reusable layer above `tally_core`:
//! - **Scales** map counts and band positions into surface coordinates.
//! - **Guides** (axes, legends, titles, the plot frame) are generated as
//!   `tally_core::Mark`s.
//! - **Charts** compose both: the annotated count plot, its 100%-stacked
//!   hue breakdown, and a donut variant.
//!
//! Charts draw onto caller-supplied surfaces and never own them; all
//! styling travels explicitly on the spec types, so two charts with the
//! same spec and table always produce identical mark lists.
//!
//! Text shaping and layout are out of scope; guide layout uses a
//! [`TextMeasurer`] for rough extents.

#![no_std]

extern crate alloc;

mod axis;
mod breakdown_plot;
#[cfg(test)]
mod chart_tests;
mod count_plot;
mod donut_plot;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod frame_style;
mod label;
mod layout;
mod legend;
mod measure;
mod palette;
mod scale;
mod title;
mod z_order;

pub use axis::{AxisOrient, AxisStyle, CategoryAxisSpec, CountAxisSpec, StrokeStyle};
pub use breakdown_plot::BreakdownPlotSpec;
pub use count_plot::{CountPlotSpec, Orientation};
pub use donut_plot::DonutPlotSpec;
pub use error::ChartError;
pub use frame_style::FrameStyle;
pub use label::BarLabelStyle;
pub use layout::{ChartLayout, ChartLayoutSpec, Size};
pub use legend::{LegendItem, LegendSwatchesSpec};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use palette::default_palette;
pub use scale::{ScaleBand, ScaleBandSpec, ScaleLinear, ScaleLinearSpec};
pub use title::TitleSpec;
pub use z_order::*;
