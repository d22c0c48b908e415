// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plot frame styling: background and spines.
//!
//! The frame is explicit, scoped configuration carried by each chart spec;
//! there is no process-wide styling state. The defaults follow a light
//! report style: white background, light-gray bottom/left spines, no top
//! spine, and an optional right spine.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{BezPath, Rect};
use peniko::{Brush, Color};
use tally_core::{Mark, MarkId};

use crate::axis::StrokeStyle;
use crate::z_order;

/// Light gray used for visible spines.
fn spine_gray() -> Color {
    Color::from_rgb8(0xCC, 0xCC, 0xCC)
}

/// Background and spine configuration for one plot rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameStyle {
    /// Background fill behind the plot, if any.
    pub background: Option<Brush>,
    /// Stroke used for all visible spines.
    pub spine: StrokeStyle,
    /// Whether to draw the left spine.
    pub left: bool,
    /// Whether to draw the bottom spine.
    pub bottom: bool,
    /// Whether to draw the top spine.
    pub top: bool,
    /// Whether to draw the right spine.
    pub right: bool,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            background: Some(Brush::Solid(Color::WHITE)),
            spine: StrokeStyle::solid(spine_gray(), 1.0),
            left: true,
            bottom: true,
            top: false,
            right: false,
        }
    }
}

impl FrameStyle {
    /// Enables or disables the right spine.
    pub fn with_right_border(mut self, right: bool) -> Self {
        self.right = right;
        self
    }

    /// Removes the background fill.
    pub fn without_background(mut self) -> Self {
        self.background = None;
        self
    }

    /// Generates frame marks for a plot rectangle.
    pub fn marks(&self, id_base: u64, plot: Rect) -> Vec<Mark> {
        let mut out = Vec::new();

        if let Some(bg) = &self.background {
            out.push(
                Mark::rect(MarkId::from_raw(id_base), plot, bg.clone())
                    .with_z_index(z_order::PLOT_BACKGROUND),
            );
        }

        let sides = [
            (self.left, (plot.x0, plot.y0), (plot.x0, plot.y1)),
            (self.bottom, (plot.x0, plot.y1), (plot.x1, plot.y1)),
            (self.top, (plot.x0, plot.y0), (plot.x1, plot.y0)),
            (self.right, (plot.x1, plot.y0), (plot.x1, plot.y1)),
        ];
        for (i, (enabled, from, to)) in sides.into_iter().enumerate() {
            if !enabled {
                continue;
            }
            let mut p = BezPath::new();
            p.move_to(from);
            p.line_to(to);
            out.push(
                Mark::stroked_path(
                    MarkId::from_raw(id_base + 1 + i as u64),
                    p,
                    self.spine.brush.clone(),
                    self.spine.stroke_width,
                )
                .with_z_index(z_order::AXIS_RULES),
            );
        }
        out
    }
}
