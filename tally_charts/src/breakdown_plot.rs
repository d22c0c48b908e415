// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 100%-stacked hue breakdown charts.
//!
//! A breakdown chart shows, for each primary category, the proportion
//! contributed by each value of a secondary ("hue") column. The category
//! order always comes from the [`CategoryCounts`] the chart is given — the
//! count chart's order is the source of truth and the breakdown never
//! re-sorts it.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::{Brush, Color};
use tally_core::{Mark, MarkId, Surface};
use tally_frame::{Breakdown, CategoryCounts, RecordTable};

use crate::axis::{AxisStyle, CategoryAxisSpec, CountAxisSpec};
use crate::error::ChartError;
use crate::frame_style::FrameStyle;
use crate::label::BarLabelStyle;
use crate::layout::{ChartLayout, ChartLayoutSpec};
use crate::legend::{LegendItem, LegendSwatchesSpec};
use crate::measure::TextMeasurer;
use crate::palette::default_palette;
use crate::scale::{ScaleBandSpec, ScaleLinearSpec};
use crate::title::TitleSpec;
use crate::z_order;

const IDS_FRAME: u64 = 0x000;
const IDS_SEGMENTS: u64 = 0x100;
const IDS_SEGMENT_LABELS: u64 = 0x1100;
const IDS_CAT_AXIS: u64 = 0x2100;
const IDS_SHARE_AXIS: u64 = 0x2300;
const IDS_LEGEND: u64 = 0x2500;
const IDS_TITLE: u64 = 0x2C00;

/// A 100%-stacked bar chart of a secondary column within each primary
/// category.
#[derive(Clone, Debug)]
pub struct BreakdownPlotSpec {
    /// Stable-id base; generated marks use deterministic offsets from it.
    pub id_base: u64,
    /// The secondary ("hue") column.
    pub secondary: String,
    /// Per-level segment fills; empty means the default palette.
    pub palette: Vec<Brush>,
    /// Optional chart title.
    pub title: Option<String>,
    /// Plot frame styling.
    pub frame: FrameStyle,
    /// Axis styling.
    pub axis_style: AxisStyle,
    /// Segment label styling; defaults to white text inside segments.
    pub label: BarLabelStyle,
    /// Category label rotation angle in degrees.
    pub label_angle: f64,
    /// Approximate share-axis tick count.
    pub tick_count: usize,
    /// Padding inside the surface edges.
    pub outer_padding: f64,
}

impl BreakdownPlotSpec {
    /// Creates a breakdown chart spec for a secondary column.
    pub fn new(id_base: u64, secondary: impl Into<String>) -> Self {
        Self {
            id_base,
            secondary: secondary.into(),
            palette: Vec::new(),
            title: None,
            frame: FrameStyle::default(),
            axis_style: AxisStyle::default(),
            label: BarLabelStyle::default().with_fill(Color::WHITE),
            label_angle: 0.0,
            tick_count: 5,
            outer_padding: 8.0,
        }
    }

    /// Sets the per-level segment fills.
    pub fn with_palette(mut self, palette: Vec<Brush>) -> Self {
        self.palette = palette;
        self
    }

    /// Sets the chart title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the category label rotation angle in degrees.
    pub fn with_label_angle(mut self, angle: f64) -> Self {
        self.label_angle = angle;
        self
    }

    /// Renders the breakdown chart onto `surface`.
    ///
    /// `counts` supplies both the primary column and the category order; a
    /// failed render leaves the surface untouched.
    pub fn render(
        &self,
        table: &RecordTable,
        counts: &CategoryCounts,
        measurer: &dyn TextMeasurer,
        surface: &mut Surface,
    ) -> Result<(), ChartError> {
        let marks = self.build_marks(table, counts, surface.area(), measurer)?;
        surface.extend(marks);
        Ok(())
    }

    pub(crate) fn build_marks(
        &self,
        table: &RecordTable,
        counts: &CategoryCounts,
        view: Rect,
        measurer: &dyn TextMeasurer,
    ) -> Result<Vec<Mark>, ChartError> {
        let breakdown = Breakdown::from_table(table, &self.secondary, counts)?;
        let levels = breakdown.levels();
        let fills = if self.palette.is_empty() {
            default_palette(levels.len())
        } else {
            self.palette.clone()
        };

        let share_scale = ScaleLinearSpec::new((0.0, 1.0));
        let share_axis = CountAxisSpec::left(self.id_base + IDS_SHARE_AXIS, share_scale)
            .with_tick_count(self.tick_count)
            .with_formatter(|v| format!("{:.0}%", v * 100.0))
            .with_style(self.axis_style.clone());

        let labels: Vec<String> = counts.entries().iter().map(|e| e.value.label()).collect();
        let cat_axis = CategoryAxisSpec::bottom(self.id_base + IDS_CAT_AXIS, labels)
            .with_angle(self.label_angle)
            .with_title(counts.column())
            .with_style(self.axis_style.clone());

        let legend = LegendSwatchesSpec::new(
            self.id_base + IDS_LEGEND,
            levels
                .iter()
                .zip(fills.iter().cycle())
                .map(|(level, fill)| LegendItem {
                    label: level.label(),
                    fill: fill.clone(),
                })
                .collect(),
        )
        .with_heading(self.secondary.clone());

        let title = self
            .title
            .as_ref()
            .map(|t| TitleSpec::new(MarkId::from_raw(self.id_base + IDS_TITLE), t.clone()));

        let layout = ChartLayout::arrange(
            &ChartLayoutSpec {
                outer_padding: self.outer_padding,
                title_top: title.as_ref().map(|t| t.measure(measurer)),
                axis_left: Some(share_axis.measure(measurer)),
                axis_bottom: Some(cat_axis.measure(measurer)),
                legend: Some(legend.measure(measurer)),
                legend_gap: 10.0,
            },
            view,
        );
        let plot = layout.plot;

        let band = ScaleBandSpec::new(counts.len()).instantiate((plot.x0, plot.x1));
        let scale = share_scale.instantiate((plot.y1, plot.y0), self.tick_count);

        let mut out = self.frame.marks(self.id_base + IDS_FRAME, plot);

        for (i, row) in breakdown.rows().iter().enumerate() {
            let x0 = band.position(i);
            let x1 = x0 + band.band_width();
            let mut cum = 0.0;
            for level in 0..levels.len() {
                let share = row.share(level);
                if share <= 0.0 {
                    continue;
                }
                let y_bottom = scale.map(cum);
                let y_top = scale.map(cum + share);
                cum += share;

                let seg = (i * levels.len() + level) as u64;
                out.push(
                    Mark::rect(
                        MarkId::from_raw(self.id_base + IDS_SEGMENTS + seg),
                        Rect::new(x0, y_top, x1, y_bottom),
                        fills[level % fills.len()].clone(),
                    )
                    .with_z_index(z_order::SERIES_FILL),
                );
                out.push(self.label.centered(
                    MarkId::from_raw(self.id_base + IDS_SEGMENT_LABELS + seg),
                    Point::new(band.center(i), 0.5 * (y_top + y_bottom)),
                    row.percent_label(level),
                ));
            }
        }

        if let Some(rect) = layout.axis_left {
            out.extend(share_axis.marks(plot, rect));
        }
        if let Some(rect) = layout.axis_bottom {
            out.extend(cat_axis.marks(&band, plot, rect));
        }
        if let Some(rect) = layout.legend {
            out.extend(legend.marks(rect.x0, rect.y0));
        }
        if let (Some(title), Some(strip)) = (title, layout.title_top) {
            out.extend(title.marks(measurer, strip));
        }
        Ok(out)
    }
}
