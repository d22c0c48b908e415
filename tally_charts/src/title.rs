// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart titles.
//!
//! Titles participate in layout (they reserve a strip above the plot and
//! axes) and render as ordinary text marks.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;
use tally_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::measure::TextMeasurer;
use crate::z_order;

/// A chart-level title with an optional subtitle.
#[derive(Clone, Debug)]
pub struct TitleSpec {
    /// Stable mark id; the subtitle uses the next id.
    pub id: MarkId,
    /// Title text (unshaped).
    pub text: String,
    /// Optional subtitle text (unshaped).
    pub subtitle: Option<String>,
    /// Title font size.
    pub font_size: f64,
    /// Subtitle font size.
    pub subtitle_font_size: f64,
    /// Title fill paint.
    pub fill: Brush,
    /// Subtitle fill paint.
    pub subtitle_fill: Brush,
    /// Vertical padding above and below the text block.
    pub padding: f64,
    /// Vertical gap between title and subtitle.
    pub subtitle_gap: f64,
    /// Horizontal anchor within the title strip.
    pub anchor: TextAnchor,
}

impl TitleSpec {
    /// Creates a title spec with report-style defaults.
    pub fn new(id: MarkId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            subtitle: None,
            font_size: 14.0,
            subtitle_font_size: 10.0,
            fill: css::DIM_GRAY.into(),
            subtitle_fill: css::DARK_GRAY.into(),
            padding: 6.0,
            subtitle_gap: 2.0,
            anchor: TextAnchor::Middle,
        }
    }

    /// Sets the subtitle text.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Sets the title font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the title fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the horizontal anchor within the title strip.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Returns the strip height this title reserves.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> f64 {
        let (_w, th) = measurer.measure(&self.text, self.font_size);
        let mut total = 2.0 * self.padding.max(0.0) + th;
        if let Some(sub) = &self.subtitle {
            let (_w, sh) = measurer.measure(sub, self.subtitle_font_size);
            total += self.subtitle_gap.max(0.0) + sh;
        }
        total
    }

    /// Emits the title marks placed within the reserved strip.
    pub fn marks(&self, measurer: &dyn TextMeasurer, strip: Rect) -> Vec<Mark> {
        let x = match self.anchor {
            TextAnchor::Start => strip.x0,
            TextAnchor::Middle => 0.5 * (strip.x0 + strip.x1),
            TextAnchor::End => strip.x1,
        };
        let (_w, th) = measurer.measure(&self.text, self.font_size);
        let y_title = strip.y0 + self.padding.max(0.0) + 0.5 * th;

        let mut out = Vec::new();
        out.push(
            Mark::text(self.id, Point::new(x, y_title), self.text.clone(), self.font_size)
                .with_text_alignment(self.anchor, TextBaseline::Middle)
                .with_fill(self.fill.clone())
                .with_z_index(z_order::TITLES),
        );

        if let Some(subtitle) = &self.subtitle {
            let (_w, sh) = measurer.measure(subtitle, self.subtitle_font_size);
            let y_sub = y_title + 0.5 * th + self.subtitle_gap.max(0.0) + 0.5 * sh;
            out.push(
                Mark::text(
                    self.id.offset(1),
                    Point::new(x, y_sub),
                    subtitle.clone(),
                    self.subtitle_font_size,
                )
                .with_text_alignment(self.anchor, TextBaseline::Middle)
                .with_fill(self.subtitle_fill.clone())
                .with_z_index(z_order::TITLES),
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::measure::HeuristicTextMeasurer;

    #[test]
    fn subtitle_increases_measured_height_and_emits_two_marks() {
        let measurer = HeuristicTextMeasurer;
        let plain = TitleSpec::new(MarkId::from_raw(1), "Orders by status");
        let with_sub = plain.clone().with_subtitle("share of all orders");

        assert!(with_sub.measure(&measurer) > plain.measure(&measurer));

        let strip = Rect::new(0.0, 0.0, 200.0, with_sub.measure(&measurer));
        assert_eq!(with_sub.marks(&measurer, strip).len(), 2);
    }
}
