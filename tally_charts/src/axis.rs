// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! Count charts need two axis kinds: a category axis (band positions with
//! one label per category) and a count axis (linear ticks with numeric
//! labels). Both are measured first (for layout margins) and then arranged
//! into the reserved axis rectangle.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use kurbo::{BezPath, Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;
use tally_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::measure::TextMeasurer;
use crate::scale::{ScaleBand, ScaleLinearSpec};
use crate::z_order;

/// A paint + width pair for stroked lines (spines, ticks).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in surface coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for tick marks.
    pub rule: StrokeStyle,
    /// Fill paint for tick and category labels.
    pub label_fill: Brush,
    /// Font size for tick and category labels.
    pub label_font_size: f64,
    /// Fill paint for the axis title.
    pub title_fill: Brush,
    /// Font size for the axis title.
    pub title_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokeStyle::default();
        Self {
            rule: rule.clone(),
            label_fill: rule.brush.clone(),
            label_font_size: 10.0,
            title_fill: rule.brush,
            title_font_size: 11.0,
        }
    }
}

/// Axis placement relative to the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A vertical axis to the left of the plot.
    Left,
    /// A horizontal axis below the plot.
    Bottom,
}

fn tick_rule(id: MarkId, x0: f64, y0: f64, x1: f64, y1: f64, stroke: &StrokeStyle) -> Mark {
    let mut p = BezPath::new();
    p.move_to((x0, y0));
    p.line_to((x1, y1));
    Mark::stroked_path(id, p, stroke.brush.clone(), stroke.stroke_width)
        .with_z_index(z_order::AXIS_RULES)
}

/// A category axis: one label per band position.
#[derive(Clone, Debug)]
pub struct CategoryAxisSpec {
    /// Stable-id base; generated marks use deterministic offsets from it.
    pub id_base: u64,
    /// Axis placement.
    pub orient: AxisOrient,
    /// Category labels in band order.
    pub labels: Vec<String>,
    /// Padding between the plot edge and the labels.
    pub tick_padding: f64,
    /// Label rotation angle in degrees (bottom orientation only).
    pub label_angle: f64,
    /// Axis styling.
    pub style: AxisStyle,
    /// Optional axis title.
    pub title: Option<String>,
    /// Distance from the labels to the title.
    pub title_offset: f64,
}

impl CategoryAxisSpec {
    /// Creates a bottom category axis.
    pub fn bottom(id_base: u64, labels: Vec<String>) -> Self {
        Self {
            id_base,
            orient: AxisOrient::Bottom,
            labels,
            tick_padding: 4.0,
            label_angle: 0.0,
            style: AxisStyle::default(),
            title: None,
            title_offset: 6.0,
        }
    }

    /// Creates a left category axis.
    pub fn left(id_base: u64, labels: Vec<String>) -> Self {
        Self {
            orient: AxisOrient::Left,
            ..Self::bottom(id_base, labels)
        }
    }

    /// Sets the label rotation angle in degrees.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.label_angle = angle;
        self
    }

    /// Sets the axis title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the axis styling.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns the margin thickness this axis needs.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> f64 {
        let font = self.style.label_font_size;
        let max_w = self
            .labels
            .iter()
            .map(|s| measurer.measure(s, font).0)
            .fold(0.0_f64, f64::max);
        let labels = match self.orient {
            AxisOrient::Bottom => {
                if self.label_angle == 0.0 {
                    font
                } else {
                    let rad = self.label_angle.abs().to_radians();
                    max_w * rad.sin() + font * rad.cos()
                }
            }
            AxisOrient::Left => max_w,
        };
        let title = self
            .title
            .as_ref()
            .map(|_| self.title_offset + self.style.title_font_size)
            .unwrap_or(0.0);
        self.tick_padding.max(0.0) + labels + title
    }

    /// Generates axis marks for a resolved band scale and layout rectangles.
    pub fn marks(&self, band: &ScaleBand, plot: Rect, axis_rect: Rect) -> Vec<Mark> {
        let mut out = Vec::new();
        let font = self.style.label_font_size;

        for (i, label) in self.labels.iter().enumerate() {
            let id = MarkId::from_raw(self.id_base + i as u64);
            let mark = match self.orient {
                AxisOrient::Bottom => {
                    let x = band.center(i);
                    let y = axis_rect.y0 + self.tick_padding;
                    let (anchor, angle) = if self.label_angle == 0.0 {
                        (TextAnchor::Middle, 0.0)
                    } else {
                        (TextAnchor::End, -self.label_angle)
                    };
                    Mark::text(id, Point::new(x, y), label.clone(), font)
                        .with_text_alignment(anchor, TextBaseline::Hanging)
                        .with_angle(angle)
                }
                AxisOrient::Left => {
                    let x = axis_rect.x1 - self.tick_padding;
                    let y = band.center(i);
                    Mark::text(id, Point::new(x, y), label.clone(), font)
                        .with_text_alignment(TextAnchor::End, TextBaseline::Middle)
                }
            };
            out.push(
                mark.with_fill(self.style.label_fill.clone())
                    .with_z_index(z_order::AXIS_LABELS),
            );
        }

        if let Some(title) = &self.title {
            out.push(self.title_mark(title, plot, axis_rect));
        }
        out
    }

    fn title_mark(&self, title: &str, plot: Rect, axis_rect: Rect) -> Mark {
        let id = MarkId::from_raw(self.id_base + 0x200);
        let font = self.style.title_font_size;
        let mark = match self.orient {
            AxisOrient::Bottom => Mark::text(
                id,
                Point::new(0.5 * (plot.x0 + plot.x1), axis_rect.y1 - 0.5 * font),
                title,
                font,
            ),
            AxisOrient::Left => Mark::text(
                id,
                Point::new(axis_rect.x0 + 0.5 * font, 0.5 * (plot.y0 + plot.y1)),
                title,
                font,
            )
            .with_angle(-90.0),
        };
        mark.with_text_alignment(TextAnchor::Middle, TextBaseline::Middle)
            .with_fill(self.style.title_fill.clone())
            .with_z_index(z_order::AXIS_TITLES)
    }
}

/// A count axis: linear ticks with numeric labels.
#[derive(Clone)]
pub struct CountAxisSpec {
    /// Stable-id base; generated marks use deterministic offsets from it.
    pub id_base: u64,
    /// Axis placement.
    pub orient: AxisOrient,
    /// The axis scale specification.
    pub scale: ScaleLinearSpec,
    /// Approximate number of ticks.
    pub tick_count: usize,
    /// Tick line length.
    pub tick_size: f64,
    /// Padding between the tick end and the tick label.
    pub tick_padding: f64,
    /// Axis styling.
    pub style: AxisStyle,
    /// Optional axis title.
    pub title: Option<String>,
    /// Distance from the labels to the title.
    pub title_offset: f64,
    /// Optional tick label formatter; the default trims whole numbers.
    pub formatter: Option<Arc<dyn Fn(f64) -> String>>,
}

impl core::fmt::Debug for CountAxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CountAxisSpec")
            .field("id_base", &self.id_base)
            .field("orient", &self.orient)
            .field("scale", &self.scale)
            .field("tick_count", &self.tick_count)
            .field("tick_size", &self.tick_size)
            .field("tick_padding", &self.tick_padding)
            .field("style", &self.style)
            .field("title", &self.title)
            .field("title_offset", &self.title_offset)
            .field("formatter", &self.formatter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl CountAxisSpec {
    /// Creates a left count axis.
    pub fn left(id_base: u64, scale: ScaleLinearSpec) -> Self {
        Self {
            id_base,
            orient: AxisOrient::Left,
            scale,
            tick_count: 5,
            tick_size: 4.0,
            tick_padding: 3.0,
            style: AxisStyle::default(),
            title: None,
            title_offset: 6.0,
            formatter: None,
        }
    }

    /// Creates a bottom count axis.
    pub fn bottom(id_base: u64, scale: ScaleLinearSpec) -> Self {
        Self {
            orient: AxisOrient::Bottom,
            ..Self::left(id_base, scale)
        }
    }

    /// Sets the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Sets the axis title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the axis styling.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the tick label formatter.
    pub fn with_formatter(mut self, f: impl Fn(f64) -> String + 'static) -> Self {
        self.formatter = Some(Arc::new(f));
        self
    }

    fn format_tick(&self, v: f64) -> String {
        if let Some(f) = &self.formatter {
            return f(v);
        }
        if v.is_finite() && v % 1.0 == 0.0 {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "whole-valued and finite here"
            )]
            let whole = v as i64;
            format!("{whole}")
        } else {
            format!("{v:.1}")
        }
    }

    /// Returns the margin thickness this axis needs.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> f64 {
        let font = self.style.label_font_size;
        let labels = match self.orient {
            AxisOrient::Left => self
                .scale
                .ticks(self.tick_count)
                .iter()
                .map(|&v| measurer.measure(&self.format_tick(v), font).0)
                .fold(0.0_f64, f64::max),
            AxisOrient::Bottom => font,
        };
        let title = self
            .title
            .as_ref()
            .map(|_| self.title_offset + self.style.title_font_size)
            .unwrap_or(0.0);
        self.tick_size.abs() + self.tick_padding.max(0.0) + labels + title
    }

    /// Generates axis marks for the plot and reserved axis rectangles.
    pub fn marks(&self, plot: Rect, axis_rect: Rect) -> Vec<Mark> {
        let range = match self.orient {
            AxisOrient::Left => (plot.y1, plot.y0),
            AxisOrient::Bottom => (plot.x0, plot.x1),
        };
        let scale = self.scale.instantiate(range, self.tick_count);
        let font = self.style.label_font_size;
        let mut out = Vec::new();

        for (i, v) in scale.ticks(self.tick_count).into_iter().enumerate() {
            let pos = scale.map(v);
            let label_id = MarkId::from_raw(self.id_base + i as u64);
            let tick_id = MarkId::from_raw(self.id_base + 0x100 + i as u64);
            match self.orient {
                AxisOrient::Left => {
                    if self.tick_size > 0.0 {
                        out.push(tick_rule(
                            tick_id,
                            plot.x0 - self.tick_size,
                            pos,
                            plot.x0,
                            pos,
                            &self.style.rule,
                        ));
                    }
                    out.push(
                        Mark::text(
                            label_id,
                            Point::new(plot.x0 - self.tick_size - self.tick_padding, pos),
                            self.format_tick(v),
                            font,
                        )
                        .with_text_alignment(TextAnchor::End, TextBaseline::Middle)
                        .with_fill(self.style.label_fill.clone())
                        .with_z_index(z_order::AXIS_LABELS),
                    );
                }
                AxisOrient::Bottom => {
                    if self.tick_size > 0.0 {
                        out.push(tick_rule(
                            tick_id,
                            pos,
                            plot.y1,
                            pos,
                            plot.y1 + self.tick_size,
                            &self.style.rule,
                        ));
                    }
                    out.push(
                        Mark::text(
                            label_id,
                            Point::new(pos, plot.y1 + self.tick_size + self.tick_padding),
                            self.format_tick(v),
                            font,
                        )
                        .with_text_alignment(TextAnchor::Middle, TextBaseline::Hanging)
                        .with_fill(self.style.label_fill.clone())
                        .with_z_index(z_order::AXIS_LABELS),
                    );
                }
            }
        }

        if let Some(title) = &self.title {
            let id = MarkId::from_raw(self.id_base + 0x200);
            let tfont = self.style.title_font_size;
            let mark = match self.orient {
                AxisOrient::Left => Mark::text(
                    id,
                    Point::new(axis_rect.x0 + 0.5 * tfont, 0.5 * (plot.y0 + plot.y1)),
                    title.clone(),
                    tfont,
                )
                .with_angle(-90.0),
                AxisOrient::Bottom => Mark::text(
                    id,
                    Point::new(0.5 * (plot.x0 + plot.x1), axis_rect.y1 - 0.5 * tfont),
                    title.clone(),
                    tfont,
                ),
            };
            out.push(
                mark.with_text_alignment(TextAnchor::Middle, TextBaseline::Middle)
                    .with_fill(self.style.title_fill.clone())
                    .with_z_index(z_order::AXIS_TITLES),
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use alloc::vec;

    use tally_core::MarkPayload;

    use super::*;
    use crate::measure::HeuristicTextMeasurer;

    fn label_texts(marks: &[Mark]) -> std::vec::Vec<String> {
        marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn bottom_category_axis_centers_labels_on_bands() {
        let band = ScaleBand::new((0.0, 100.0), 2).with_padding(0.0, 0.0);
        let plot = Rect::new(0.0, 0.0, 100.0, 50.0);
        let axis_rect = Rect::new(0.0, 50.0, 100.0, 70.0);
        let axis = CategoryAxisSpec::bottom(1, vec!["a".to_string(), "b".to_string()]);

        let marks = axis.marks(&band, plot, axis_rect);
        assert_eq!(label_texts(&marks), vec!["a", "b"]);
        let MarkPayload::Text(t) = &marks[0].payload else {
            panic!("expected text");
        };
        assert_eq!(t.pos.x, 25.0);
        assert!(t.pos.y >= 50.0);
    }

    #[test]
    fn rotated_labels_need_a_deeper_margin() {
        let measurer = HeuristicTextMeasurer;
        let labels = vec!["september".to_string(), "october".to_string()];
        let flat = CategoryAxisSpec::bottom(1, labels.clone());
        let slanted = CategoryAxisSpec::bottom(1, labels).with_angle(45.0);
        assert!(slanted.measure(&measurer) > flat.measure(&measurer));
    }

    #[test]
    fn left_count_axis_emits_tick_labels_in_domain_order() {
        let axis = CountAxisSpec::left(1, ScaleLinearSpec::new((0.0, 4.0)).with_nice(true))
            .with_tick_count(4);
        let plot = Rect::new(40.0, 0.0, 100.0, 100.0);
        let axis_rect = Rect::new(10.0, 0.0, 40.0, 100.0);
        let labels = label_texts(&axis.marks(plot, axis_rect));
        assert_eq!(labels.first().map(String::as_str), Some("0"));
        assert_eq!(labels.last().map(String::as_str), Some("4"));
    }

    #[test]
    fn formatter_overrides_tick_text() {
        let axis = CountAxisSpec::left(1, ScaleLinearSpec::new((0.0, 1.0)))
            .with_tick_count(2)
            .with_formatter(|v| format!("{:.0}%", v * 100.0));
        let plot = Rect::new(40.0, 0.0, 100.0, 100.0);
        let axis_rect = Rect::new(10.0, 0.0, 40.0, 100.0);
        let labels = label_texts(&axis.marks(plot, axis_rect));
        assert!(labels.contains(&"100%".to_string()));
    }
}
