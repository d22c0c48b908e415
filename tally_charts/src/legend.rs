// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend mark generation.
//!
//! Breakdown charts need a small "swatches + labels" legend listing the
//! secondary categories. Legends are measured first (to reserve a margin)
//! and then arranged at a concrete origin.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::color::palette::css;
use peniko::{Brush, Color};
use tally_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::layout::Size;
use crate::measure::TextMeasurer;
use crate::z_order;

/// A simple legend row item.
#[derive(Clone, Debug)]
pub struct LegendItem {
    /// The label string shown next to the swatch.
    pub label: String,
    /// The swatch fill paint.
    pub fill: Brush,
}

impl LegendItem {
    /// Convenience constructor for a solid-color swatch.
    pub fn solid(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            fill: Brush::Solid(color),
        }
    }
}

/// A vertical list of color swatches with labels and an optional heading.
#[derive(Clone, Debug)]
pub struct LegendSwatchesSpec {
    /// Stable-id base; generated marks use deterministic offsets from it.
    pub id_base: u64,
    /// Optional heading above the items (typically the hue column name).
    pub heading: Option<String>,
    /// Swatch square size.
    pub swatch_size: f64,
    /// Vertical gap between rows.
    pub row_gap: f64,
    /// Horizontal gap between swatch and label.
    pub label_dx: f64,
    /// Label font size.
    pub font_size: f64,
    /// Label and heading color.
    pub text_fill: Brush,
    /// Items in display order.
    pub items: Vec<LegendItem>,
}

impl LegendSwatchesSpec {
    /// Creates a legend spec with defaults.
    pub fn new(id_base: u64, items: Vec<LegendItem>) -> Self {
        Self {
            id_base,
            heading: None,
            swatch_size: 10.0,
            row_gap: 6.0,
            label_dx: 6.0,
            font_size: 10.0,
            text_fill: css::BLACK.into(),
            items,
        }
    }

    /// Sets the heading shown above the items.
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    /// Sets the label font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    fn row_height(&self) -> f64 {
        self.swatch_size.max(self.font_size)
    }

    fn heading_height(&self) -> f64 {
        if self.heading.is_some() {
            self.font_size + self.row_gap
        } else {
            0.0
        }
    }

    /// Measures the desired legend size.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> Size {
        let mut width = self
            .heading
            .as_ref()
            .map(|h| measurer.measure(h, self.font_size).0)
            .unwrap_or(0.0);
        for item in &self.items {
            let (w, _h) = measurer.measure(&item.label, self.font_size);
            width = width.max(self.swatch_size + self.label_dx + w);
        }
        let rows = self.items.len();
        let height = self.heading_height()
            + rows as f64 * self.row_height()
            + rows.saturating_sub(1) as f64 * self.row_gap;
        Size { width, height }
    }

    /// Generates legend marks with the top-left corner at `(x, y)`.
    pub fn marks(&self, x: f64, y: f64) -> Vec<Mark> {
        let mut out = Vec::new();

        if let Some(heading) = &self.heading {
            out.push(
                Mark::text(
                    MarkId::from_raw(self.id_base + 0x500),
                    Point::new(x, y + 0.5 * self.font_size),
                    heading.clone(),
                    self.font_size,
                )
                .with_text_alignment(TextAnchor::Start, TextBaseline::Middle)
                .with_fill(self.text_fill.clone())
                .with_z_index(z_order::LEGEND_LABELS),
            );
        }

        let row_height = self.row_height();
        for (i, item) in self.items.iter().enumerate() {
            let row_y = y + self.heading_height() + i as f64 * (row_height + self.row_gap);
            let swatch_y = row_y + 0.5 * (row_height - self.swatch_size);
            out.push(
                Mark::rect(
                    MarkId::from_raw(self.id_base + i as u64),
                    Rect::new(x, swatch_y, x + self.swatch_size, swatch_y + self.swatch_size),
                    item.fill.clone(),
                )
                .with_z_index(z_order::LEGEND_SWATCHES),
            );
            out.push(
                Mark::text(
                    MarkId::from_raw(self.id_base + 0x100 + i as u64),
                    Point::new(x + self.swatch_size + self.label_dx, row_y + 0.5 * row_height),
                    item.label.clone(),
                    self.font_size,
                )
                .with_text_alignment(TextAnchor::Start, TextBaseline::Middle)
                .with_fill(self.text_fill.clone())
                .with_z_index(z_order::LEGEND_LABELS),
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::measure::HeuristicTextMeasurer;

    #[test]
    fn measure_grows_with_items_and_heading() {
        let measurer = HeuristicTextMeasurer;
        let items = vec![
            LegendItem::solid("2017", css::BLACK),
            LegendItem::solid("2018", css::BLACK),
        ];
        let plain = LegendSwatchesSpec::new(1, items.clone());
        let with_heading = LegendSwatchesSpec::new(1, items).with_heading("year");

        let a = plain.measure(&measurer);
        let b = with_heading.measure(&measurer);
        assert!(b.height > a.height);
        assert!(a.height > 0.0);
    }

    #[test]
    fn marks_pair_a_swatch_with_each_label() {
        let items = vec![
            LegendItem::solid("credit card", css::BLACK),
            LegendItem::solid("boleto", css::BLACK),
        ];
        let marks = LegendSwatchesSpec::new(1, items).marks(0.0, 0.0);
        assert_eq!(marks.len(), 4);
    }
}
