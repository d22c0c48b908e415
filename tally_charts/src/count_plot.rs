// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Annotated categorical count charts.
//!
//! A count plot draws one bar per distinct value of a column, each annotated
//! with its raw count and its percent of the *unfiltered* table row count.
//! With a hue column configured, [`CountPlotSpec::render_grid`] adds a
//! second, 100%-stacked chart showing the hue composition of every category
//! in the exact same category order (see [`crate::BreakdownPlotSpec`]).

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Brush;
use tally_core::{Mark, MarkId, Surface, SurfaceGrid};
use tally_frame::{CategoryCounts, CategoryOrder, RecordTable};

use crate::axis::{AxisStyle, CategoryAxisSpec, CountAxisSpec};
use crate::breakdown_plot::BreakdownPlotSpec;
use crate::error::ChartError;
use crate::frame_style::FrameStyle;
use crate::label::BarLabelStyle;
use crate::layout::{ChartLayout, ChartLayoutSpec};
use crate::measure::TextMeasurer;
use crate::palette::default_palette;
use crate::scale::{ScaleBandSpec, ScaleLinearSpec};
use crate::title::TitleSpec;
use crate::z_order;

// Mark-id group offsets within one chart.
const IDS_FRAME: u64 = 0x000;
const IDS_BARS: u64 = 0x100;
const IDS_LABELS: u64 = 0x300;
const IDS_CAT_AXIS: u64 = 0x600;
const IDS_COUNT_AXIS: u64 = 0x800;
const IDS_TITLE: u64 = 0xA00;
const IDS_BREAKDOWN: u64 = 0x10_000;

/// Bar direction, derived from which primary column is supplied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Categories along x, bars grow upward (`with_x`).
    Vertical,
    /// Categories along y, bars grow rightward (`with_y`).
    Horizontal,
}

/// An annotated categorical count chart.
///
/// Exactly one of [`CountPlotSpec::with_x`] (vertical bars) or
/// [`CountPlotSpec::with_y`] (horizontal bars) must be supplied; anything
/// else fails with [`ChartError::AmbiguousAxis`]. Rendering never mutates
/// the table, and a failed render leaves the surface untouched.
#[derive(Clone, Debug)]
pub struct CountPlotSpec {
    /// Stable-id base; generated marks use deterministic offsets from it.
    pub id_base: u64,
    /// Primary column along x (vertical bars).
    pub x: Option<String>,
    /// Primary column along y (horizontal bars).
    pub y: Option<String>,
    /// Category ordering.
    pub order: CategoryOrder,
    /// Keep only the N most frequent categories.
    ///
    /// Percentages keep the full table as denominator and may sum to less
    /// than 100%.
    pub top: Option<usize>,
    /// Secondary categorical column for the stacked breakdown chart.
    pub hue: Option<String>,
    /// Per-category bar fills; empty means the default palette.
    pub palette: Vec<Brush>,
    /// Optional chart title.
    pub title: Option<String>,
    /// Optional chart subtitle.
    pub subtitle: Option<String>,
    /// Optional count-axis title.
    pub count_axis_title: Option<String>,
    /// Plot frame styling.
    pub frame: FrameStyle,
    /// Axis styling.
    pub axis_style: AxisStyle,
    /// Bar annotation styling.
    pub label: BarLabelStyle,
    /// Category label rotation angle in degrees (vertical bars only).
    pub label_angle: f64,
    /// Approximate count-axis tick count.
    pub tick_count: usize,
    /// Padding inside the surface edges.
    pub outer_padding: f64,
}

impl CountPlotSpec {
    /// Creates a count plot spec with report-style defaults.
    pub fn new(id_base: u64) -> Self {
        Self {
            id_base,
            x: None,
            y: None,
            order: CategoryOrder::FrequencyDesc,
            top: None,
            hue: None,
            palette: Vec::new(),
            title: None,
            subtitle: None,
            count_axis_title: None,
            frame: FrameStyle::default(),
            axis_style: AxisStyle::default(),
            label: BarLabelStyle::default(),
            label_angle: 0.0,
            tick_count: 5,
            outer_padding: 8.0,
        }
    }

    /// Summarizes `column` along x: vertical bars.
    pub fn with_x(mut self, column: impl Into<String>) -> Self {
        self.x = Some(column.into());
        self
    }

    /// Summarizes `column` along y: horizontal bars.
    pub fn with_y(mut self, column: impl Into<String>) -> Self {
        self.y = Some(column.into());
        self
    }

    /// Sets the category ordering.
    pub fn with_order(mut self, order: CategoryOrder) -> Self {
        self.order = order;
        self
    }

    /// Keeps only the `n` most frequent categories.
    pub fn with_top(mut self, n: usize) -> Self {
        self.top = Some(n);
        self
    }

    /// Adds a stacked hue breakdown chart (see [`Self::render_grid`]).
    pub fn with_hue(mut self, column: impl Into<String>) -> Self {
        self.hue = Some(column.into());
        self
    }

    /// Sets the per-category bar fills.
    pub fn with_palette(mut self, palette: Vec<Brush>) -> Self {
        self.palette = palette;
        self
    }

    /// Sets the chart title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the chart subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Sets the count-axis title.
    pub fn with_count_axis_title(mut self, title: impl Into<String>) -> Self {
        self.count_axis_title = Some(title.into());
        self
    }

    /// Sets the plot frame styling.
    pub fn with_frame(mut self, frame: FrameStyle) -> Self {
        self.frame = frame;
        self
    }

    /// Sets the category label rotation angle in degrees.
    pub fn with_label_angle(mut self, angle: f64) -> Self {
        self.label_angle = angle;
        self
    }

    /// Resolves the primary column and orientation.
    pub fn primary(&self) -> Result<(&str, Orientation), ChartError> {
        match (self.x.as_deref(), self.y.as_deref()) {
            (Some(x), None) => Ok((x, Orientation::Vertical)),
            (None, Some(y)) => Ok((y, Orientation::Horizontal)),
            _ => Err(ChartError::AmbiguousAxis),
        }
    }

    /// Computes the category counts this chart will draw.
    pub fn counts(&self, table: &RecordTable) -> Result<CategoryCounts, ChartError> {
        let (column, _) = self.primary()?;
        let mut counts = CategoryCounts::from_table(table, column, self.order)?;
        if let Some(n) = self.top {
            counts = counts.with_top(n);
        }
        Ok(counts)
    }

    /// Renders the count chart onto `surface`.
    ///
    /// A configured hue is ignored here; use [`Self::render_grid`] for the
    /// paired breakdown chart.
    pub fn render(
        &self,
        table: &RecordTable,
        measurer: &dyn TextMeasurer,
        surface: &mut Surface,
    ) -> Result<(), ChartError> {
        let (_, orient) = self.primary()?;
        let counts = self.counts(table)?;
        let marks = self.build_marks(&counts, orient, surface.area(), measurer);
        surface.extend(marks);
        Ok(())
    }

    /// Renders into a surface grid: the count chart in cell `(0, 0)` and,
    /// when a hue is configured, the stacked breakdown chart in cell
    /// `(1, 0)` using the identical category order.
    ///
    /// Either both charts are drawn or neither: all fallible work happens
    /// before any cell is touched.
    pub fn render_grid(
        &self,
        table: &RecordTable,
        measurer: &dyn TextMeasurer,
        grid: &mut SurfaceGrid,
    ) -> Result<(), ChartError> {
        let (column, orient) = self.primary()?;
        let counts = self.counts(table)?;

        let count_area = grid
            .cell(0, 0)
            .ok_or(ChartError::MissingSurface { row: 0, col: 0 })?
            .area();
        let count_marks = self.build_marks(&counts, orient, count_area, measurer);

        let breakdown_marks = match &self.hue {
            None => None,
            Some(hue) => {
                let area = grid
                    .cell(1, 0)
                    .ok_or(ChartError::MissingSurface { row: 1, col: 0 })?
                    .area();
                let spec = self.breakdown_spec(column, hue);
                Some(spec.build_marks(table, &counts, area, measurer)?)
            }
        };

        if let Some(cell) = grid.cell_mut(0, 0) {
            cell.extend(count_marks);
        }
        if let Some(marks) = breakdown_marks
            && let Some(cell) = grid.cell_mut(1, 0)
        {
            cell.extend(marks);
        }
        Ok(())
    }

    fn breakdown_spec(&self, column: &str, hue: &str) -> BreakdownPlotSpec {
        let mut spec = BreakdownPlotSpec::new(self.id_base + IDS_BREAKDOWN, hue)
            .with_title(format!("{column} by {hue}"))
            .with_label_angle(self.label_angle);
        spec.frame = self.frame.clone();
        spec.axis_style = self.axis_style.clone();
        spec.tick_count = self.tick_count;
        spec.outer_padding = self.outer_padding;
        spec
    }

    fn build_marks(
        &self,
        counts: &CategoryCounts,
        orient: Orientation,
        view: Rect,
        measurer: &dyn TextMeasurer,
    ) -> Vec<Mark> {
        let id = |group: u64| MarkId::from_raw(self.id_base + group);
        let labels: Vec<String> = counts.entries().iter().map(|e| e.value.label()).collect();
        let fills = if self.palette.is_empty() {
            default_palette(counts.len())
        } else {
            self.palette.clone()
        };

        let max = counts.max_count().max(1) as f64;
        let count_scale = ScaleLinearSpec::new((0.0, max)).with_nice(true);

        let mut count_axis = match orient {
            Orientation::Vertical => CountAxisSpec::left(self.id_base + IDS_COUNT_AXIS, count_scale),
            Orientation::Horizontal => {
                CountAxisSpec::bottom(self.id_base + IDS_COUNT_AXIS, count_scale)
            }
        }
        .with_tick_count(self.tick_count)
        .with_style(self.axis_style.clone());
        if let Some(t) = &self.count_axis_title {
            count_axis = count_axis.with_title(t.clone());
        }

        let cat_axis = match orient {
            Orientation::Vertical => {
                CategoryAxisSpec::bottom(self.id_base + IDS_CAT_AXIS, labels)
                    .with_angle(self.label_angle)
            }
            Orientation::Horizontal => CategoryAxisSpec::left(self.id_base + IDS_CAT_AXIS, labels),
        }
        .with_title(counts.column())
        .with_style(self.axis_style.clone());

        let title = self.title.as_ref().map(|t| {
            let mut spec = TitleSpec::new(id(IDS_TITLE), t.clone());
            if let Some(sub) = &self.subtitle {
                spec = spec.with_subtitle(sub.clone());
            }
            spec
        });

        let (axis_left, axis_bottom) = match orient {
            Orientation::Vertical => (count_axis.measure(measurer), cat_axis.measure(measurer)),
            Orientation::Horizontal => (cat_axis.measure(measurer), count_axis.measure(measurer)),
        };
        let layout = ChartLayout::arrange(
            &ChartLayoutSpec {
                outer_padding: self.outer_padding,
                title_top: title.as_ref().map(|t| t.measure(measurer)),
                axis_left: Some(axis_left),
                axis_bottom: Some(axis_bottom),
                legend: None,
                legend_gap: 0.0,
            },
            view,
        );
        let plot = layout.plot;

        let mut out = self.frame.marks(self.id_base + IDS_FRAME, plot);

        match orient {
            Orientation::Vertical => {
                let band = ScaleBandSpec::new(counts.len()).instantiate((plot.x0, plot.x1));
                let scale = count_scale.instantiate((plot.y1, plot.y0), self.tick_count);
                let baseline = scale.map(0.0);

                for (i, entry) in counts.entries().iter().enumerate() {
                    let x0 = band.position(i);
                    let top = scale.map(entry.count as f64);
                    out.push(
                        Mark::rect(
                            id(IDS_BARS).offset(i as u64),
                            Rect::new(x0, top.min(baseline), x0 + band.band_width(), baseline),
                            fills[i % fills.len()].clone(),
                        )
                        .with_z_index(z_order::SERIES_FILL),
                    );
                    out.extend(self.label.above(
                        id(IDS_LABELS).offset(2 * i as u64),
                        band.center(i),
                        top,
                        &[
                            entry.count.to_string(),
                            counts.percent_label(entry.count),
                        ],
                    ));
                }

                if let Some(rect) = layout.axis_left {
                    out.extend(count_axis.marks(plot, rect));
                }
                if let Some(rect) = layout.axis_bottom {
                    out.extend(cat_axis.marks(&band, plot, rect));
                }
            }
            Orientation::Horizontal => {
                let band = ScaleBandSpec::new(counts.len()).instantiate((plot.y0, plot.y1));
                let scale = count_scale.instantiate((plot.x0, plot.x1), self.tick_count);
                let baseline = scale.map(0.0);

                for (i, entry) in counts.entries().iter().enumerate() {
                    let y0 = band.position(i);
                    let end = scale.map(entry.count as f64);
                    out.push(
                        Mark::rect(
                            id(IDS_BARS).offset(i as u64),
                            Rect::new(baseline, y0, end.max(baseline), y0 + band.band_width()),
                            fills[i % fills.len()].clone(),
                        )
                        .with_z_index(z_order::SERIES_FILL),
                    );
                    out.push(self.label.beside(
                        id(IDS_LABELS).offset(i as u64),
                        end,
                        band.center(i),
                        format!("{} ({})", entry.count, counts.percent_label(entry.count)),
                    ));
                }

                if let Some(rect) = layout.axis_bottom {
                    out.extend(count_axis.marks(plot, rect));
                }
                if let Some(rect) = layout.axis_left {
                    out.extend(cat_axis.marks(&band, plot, rect));
                }
            }
        }

        if let (Some(title), Some(strip)) = (title, layout.title_top) {
            out.extend(title.marks(measurer, strip));
        }
        out
    }
}
