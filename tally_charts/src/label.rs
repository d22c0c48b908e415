// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar annotation text.
//!
//! Count charts attach a count and a percent-of-total to every bar. The
//! placement differs by orientation: vertical bars stack the lines above the
//! bar top, horizontal bars put a single line just past the bar end, and
//! stacked segments center their label inside the segment.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use peniko::Brush;
use peniko::color::palette::css;
use tally_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::z_order;

/// Styling for bar annotations.
#[derive(Clone, Debug, PartialEq)]
pub struct BarLabelStyle {
    /// Annotation font size.
    pub font_size: f64,
    /// Annotation fill paint.
    pub fill: Brush,
    /// Gap between the bar edge and the annotation.
    pub offset: f64,
}

impl Default for BarLabelStyle {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            fill: css::BLACK.into(),
            offset: 2.0,
        }
    }
}

impl BarLabelStyle {
    /// Creates a style with a custom fill (e.g. white for in-segment labels).
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the annotation font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Stacks `lines` above a vertical bar top, first line uppermost.
    pub fn above(&self, id_base: MarkId, x_center: f64, bar_top: f64, lines: &[String]) -> Vec<Mark> {
        let line_height = 1.15 * self.font_size;
        let n = lines.len();
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                // Last line sits closest to the bar.
                let up = (n - 1 - i) as f64;
                let y = bar_top - self.offset - up * line_height;
                Mark::text(id_base.offset(i as u64), Point::new(x_center, y), line.clone(), self.font_size)
                    .with_text_alignment(TextAnchor::Middle, TextBaseline::Alphabetic)
                    .with_fill(self.fill.clone())
                    .with_z_index(z_order::BAR_LABELS)
            })
            .collect()
    }

    /// Places a single line just past the end of a horizontal bar.
    pub fn beside(&self, id: MarkId, bar_end: f64, y_center: f64, text: String) -> Mark {
        Mark::text(id, Point::new(bar_end + self.offset, y_center), text, self.font_size)
            .with_text_alignment(TextAnchor::Start, TextBaseline::Middle)
            .with_fill(self.fill.clone())
            .with_z_index(z_order::BAR_LABELS)
    }

    /// Centers a label inside a stacked segment.
    pub fn centered(&self, id: MarkId, pos: Point, text: String) -> Mark {
        Mark::text(id, pos, text, self.font_size)
            .with_text_alignment(TextAnchor::Middle, TextBaseline::Middle)
            .with_fill(self.fill.clone())
            .with_z_index(z_order::BAR_LABELS)
    }
}
