// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measure/arrange layout for a single chart.
//!
//! Layout runs in two passes:
//! - **Measure**: guides (title, axes, legend) report their desired
//!   thickness via a [`crate::TextMeasurer`].
//! - **Arrange**: [`ChartLayout::arrange`] carves those margins out of the
//!   caller's surface rectangle and returns the plot rectangle plus one
//!   rectangle per reserved guide strip.
//!
//! Unlike a window system, the outer rectangle is fixed (it is the surface
//! area); the plot shrinks to fit the guides.

use kurbo::Rect;

/// A width/height pair used by chart layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in surface coordinate units.
    pub width: f64,
    /// Height in surface coordinate units.
    pub height: f64,
}

/// Layout inputs for a single chart.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChartLayoutSpec {
    /// Padding applied inside all four edges of the view rectangle.
    pub outer_padding: f64,
    /// Title strip thickness reserved above the plot (and axes).
    pub title_top: Option<f64>,
    /// Left axis margin thickness.
    pub axis_left: Option<f64>,
    /// Bottom axis margin thickness.
    pub axis_bottom: Option<f64>,
    /// Legend size, reserved to the right of the plot.
    pub legend: Option<Size>,
    /// Gap between the plot (or right edge) and the legend.
    pub legend_gap: f64,
}

/// Output of the arrange pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// The full view rectangle handed to `arrange`.
    pub view: Rect,
    /// Reserved rectangle for the chart title (if any).
    pub title_top: Option<Rect>,
    /// The plot rectangle bars are drawn into.
    pub plot: Rect,
    /// Reserved rectangle for the left axis (if any).
    pub axis_left: Option<Rect>,
    /// Reserved rectangle for the bottom axis (if any).
    pub axis_bottom: Option<Rect>,
    /// Legend placement rectangle (if any).
    pub legend: Option<Rect>,
}

impl ChartLayout {
    /// Computes a layout inside `view` from the provided specification.
    pub fn arrange(spec: &ChartLayoutSpec, view: Rect) -> Self {
        let pad = spec.outer_padding.max(0.0);
        let title_h = spec.title_top.unwrap_or(0.0).max(0.0);
        let axis_left_w = spec.axis_left.unwrap_or(0.0).max(0.0);
        let axis_bottom_h = spec.axis_bottom.unwrap_or(0.0).max(0.0);
        let legend_w = spec
            .legend
            .map(|s| s.width.max(0.0) + spec.legend_gap.max(0.0))
            .unwrap_or(0.0);

        let x0 = view.x0 + pad + axis_left_w;
        let y0 = view.y0 + pad + title_h;
        let x1 = (view.x1 - pad - legend_w).max(x0);
        let y1 = (view.y1 - pad - axis_bottom_h).max(y0);
        let plot = Rect::new(x0, y0, x1, y1);

        let title_top = (title_h > 0.0).then(|| {
            Rect::new(
                view.x0 + pad,
                view.y0 + pad,
                view.x1 - pad,
                view.y0 + pad + title_h,
            )
        });

        let axis_left = (axis_left_w > 0.0)
            .then(|| Rect::new(plot.x0 - axis_left_w, plot.y0, plot.x0, plot.y1));

        let axis_bottom = (axis_bottom_h > 0.0)
            .then(|| Rect::new(plot.x0, plot.y1, plot.x1, plot.y1 + axis_bottom_h));

        let legend = spec.legend.map(|s| {
            let lx0 = plot.x1 + spec.legend_gap.max(0.0);
            Rect::new(lx0, plot.y0, lx0 + s.width.max(0.0), plot.y0 + s.height.max(0.0))
        });

        Self {
            view,
            title_top,
            plot,
            axis_left,
            axis_bottom,
            legend,
        }
    }
}
