// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Donut charts over category counts.
//!
//! Slices start at twelve o'clock and sweep clockwise in the counts'
//! display order. Percent labels here are relative to the *displayed*
//! slices: dropping trailing categories via [`DonutPlotSpec::drop_last`]
//! renormalizes the ring (unlike count-plot `top` truncation, which keeps
//! the full-table denominator).

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use kurbo::{Circle, Point, Shape};
use peniko::Brush;
use tally_core::{Mark, MarkId, Surface, TextAnchor, TextBaseline};
use tally_frame::{CategoryCounts, FrameError, percent_label};

use crate::error::ChartError;
use crate::layout::{ChartLayout, ChartLayoutSpec};
use crate::measure::TextMeasurer;
use crate::palette::default_palette;
use crate::title::TitleSpec;
use crate::z_order;

const IDS_SECTORS: u64 = 0x000;
const IDS_SLICE_LABELS: u64 = 0x100;
const IDS_NAME_LABELS: u64 = 0x300;
const IDS_CENTER: u64 = 0x400;
const IDS_TITLE: u64 = 0x500;

/// A donut chart of category counts.
#[derive(Clone, Debug)]
pub struct DonutPlotSpec {
    /// Stable-id base; generated marks use deterministic offsets from it.
    pub id_base: u64,
    /// Hole radius as a fraction of the outer radius, clamped to `[0, 0.95]`.
    pub inner_ratio: f64,
    /// Per-slice fills; empty means the default palette.
    pub palette: Vec<Brush>,
    /// Number of trailing categories (in display order) to suppress.
    pub drop_last: usize,
    /// Optional text placed in the donut hole.
    pub center_text: Option<String>,
    /// Optional chart title.
    pub title: Option<String>,
    /// Font size for slice and category labels.
    pub label_font_size: f64,
    /// Font size for the center text.
    pub center_font_size: f64,
    /// Padding inside the surface edges.
    pub outer_padding: f64,
}

impl DonutPlotSpec {
    /// Creates a donut chart spec with defaults.
    pub fn new(id_base: u64) -> Self {
        Self {
            id_base,
            inner_ratio: 0.6,
            palette: Vec::new(),
            drop_last: 0,
            center_text: None,
            title: None,
            label_font_size: 10.0,
            center_font_size: 18.0,
            outer_padding: 8.0,
        }
    }

    /// Sets the hole radius as a fraction of the outer radius.
    pub fn with_inner_ratio(mut self, ratio: f64) -> Self {
        self.inner_ratio = ratio;
        self
    }

    /// Sets the per-slice fills.
    pub fn with_palette(mut self, palette: Vec<Brush>) -> Self {
        self.palette = palette;
        self
    }

    /// Suppresses the last `n` categories of the counts' display order.
    pub fn drop_last(mut self, n: usize) -> Self {
        self.drop_last = n;
        self
    }

    /// Sets the text placed in the donut hole.
    pub fn with_center_text(mut self, text: impl Into<String>) -> Self {
        self.center_text = Some(text.into());
        self
    }

    /// Sets the chart title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Renders the donut onto `surface`.
    ///
    /// Fails with [`FrameError::EmptyTable`] when `drop_last` suppresses
    /// every category; a failed render leaves the surface untouched.
    pub fn render(
        &self,
        counts: &CategoryCounts,
        measurer: &dyn TextMeasurer,
        surface: &mut Surface,
    ) -> Result<(), ChartError> {
        let shown = &counts.entries()[..counts.len().saturating_sub(self.drop_last)];
        if shown.is_empty() {
            return Err(ChartError::Frame(FrameError::EmptyTable));
        }
        let denom: usize = shown.iter().map(|e| e.count).sum();
        if denom == 0 {
            return Err(ChartError::Frame(FrameError::EmptyTable));
        }

        let fills = if self.palette.is_empty() {
            default_palette(shown.len())
        } else {
            self.palette.clone()
        };

        let title = self
            .title
            .as_ref()
            .map(|t| TitleSpec::new(MarkId::from_raw(self.id_base + IDS_TITLE), t.clone()));

        let layout = ChartLayout::arrange(
            &ChartLayoutSpec {
                outer_padding: self.outer_padding,
                title_top: title.as_ref().map(|t| t.measure(measurer)),
                ..ChartLayoutSpec::default()
            },
            surface.area(),
        );
        let plot = layout.plot;

        // Reserve room outside the ring for category name labels.
        let name_margin = shown
            .iter()
            .map(|e| measurer.measure(&e.value.label(), self.label_font_size).0)
            .fold(0.0_f64, f64::max)
            + 6.0;
        let center = Point::new(plot.x0 + 0.5 * plot.width(), plot.y0 + 0.5 * plot.height());
        let outer = (0.5 * plot.width().min(plot.height()) - name_margin).max(8.0);
        let inner = outer * self.inner_ratio.clamp(0.0, 0.95);

        let mut out = Vec::new();
        let circle = Circle::new(center, outer);
        let mut start = -core::f64::consts::FRAC_PI_2;

        for (i, entry) in shown.iter().enumerate() {
            let sweep = entry.count as f64 / denom as f64 * core::f64::consts::TAU;
            let segment = circle.segment(inner, start, sweep);
            let path = segment.path_elements(0.1).collect();
            out.push(
                Mark::path(
                    MarkId::from_raw(self.id_base + IDS_SECTORS + i as u64),
                    path,
                    fills[i % fills.len()].clone(),
                )
                .with_z_index(z_order::SERIES_FILL),
            );

            let mid = start + 0.5 * sweep;
            let (sin, cos) = (mid.sin(), mid.cos());

            // Percent over count, stacked at mid-ring like an autopct label.
            let r_label = 0.5 * (inner + outer);
            let label_pos = Point::new(center.x + r_label * cos, center.y + r_label * sin);
            let line = 1.15 * self.label_font_size;
            out.push(
                Mark::text(
                    MarkId::from_raw(self.id_base + IDS_SLICE_LABELS + 2 * i as u64),
                    Point::new(label_pos.x, label_pos.y - 0.5 * line),
                    percent_label(entry.count, denom),
                    self.label_font_size,
                )
                .with_text_alignment(TextAnchor::Middle, TextBaseline::Middle)
                .with_z_index(z_order::BAR_LABELS),
            );
            out.push(
                Mark::text(
                    MarkId::from_raw(self.id_base + IDS_SLICE_LABELS + 2 * i as u64 + 1),
                    Point::new(label_pos.x, label_pos.y + 0.5 * line),
                    format!("({})", entry.count),
                    self.label_font_size,
                )
                .with_text_alignment(TextAnchor::Middle, TextBaseline::Middle)
                .with_z_index(z_order::BAR_LABELS),
            );

            // Category name just outside the ring.
            let r_name = outer + 6.0;
            let anchor = if cos > 0.05 {
                TextAnchor::Start
            } else if cos < -0.05 {
                TextAnchor::End
            } else {
                TextAnchor::Middle
            };
            out.push(
                Mark::text(
                    MarkId::from_raw(self.id_base + IDS_NAME_LABELS + i as u64),
                    Point::new(center.x + r_name * cos, center.y + r_name * sin),
                    entry.value.label(),
                    self.label_font_size,
                )
                .with_text_alignment(anchor, TextBaseline::Middle)
                .with_z_index(z_order::AXIS_LABELS),
            );

            start += sweep;
        }

        if let Some(text) = &self.center_text {
            out.push(
                Mark::text(
                    MarkId::from_raw(self.id_base + IDS_CENTER),
                    center,
                    text.clone(),
                    self.center_font_size,
                )
                .with_text_alignment(TextAnchor::Middle, TextBaseline::Middle)
                .with_z_index(z_order::TITLES),
            );
        }
        if let (Some(title), Some(strip)) = (title, layout.title_top) {
            out.extend(title.marks(measurer, strip));
        }

        surface.extend(out);
        Ok(())
    }
}
