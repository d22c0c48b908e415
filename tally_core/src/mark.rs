// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolved mark primitives.

extern crate alloc;

use alloc::string::String;

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::Brush;

/// A stable mark identity.
///
/// Ids only need to be unique within one [`crate::Surface`]. Chart generators
/// derive them deterministically from an `id_base` plus a per-mark offset so
/// repeated calls with identical inputs produce identical mark lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Creates a mark id from a raw value.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives an id for the `index`-th mark of a group rooted at `self`.
    pub fn offset(self, index: u64) -> Self {
        Self(self.0.wrapping_add(index))
    }
}

/// Horizontal text anchoring relative to the mark position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// The position is the start (left edge for LTR text).
    Start,
    /// The position is the horizontal center.
    Middle,
    /// The position is the end (right edge for LTR text).
    End,
}

/// Vertical text baseline relative to the mark position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The position is the alphabetic baseline.
    Alphabetic,
    /// The position is the vertical center.
    Middle,
    /// The position is the top (hanging baseline).
    Hanging,
}

/// A filled axis-aligned rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RectMark {
    /// Rectangle in surface coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
}

/// A run of unshaped text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    /// Anchor position in surface coordinates.
    pub pos: Point,
    /// Text content (unshaped).
    pub text: String,
    /// Font size in surface coordinates.
    pub font_size: f64,
    /// Rotation angle in degrees around `pos`.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// A filled and/or stroked Bézier path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMark {
    /// Path in surface coordinates.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint, ignored when `stroke_width` is zero.
    pub stroke: Brush,
    /// Stroke width in surface coordinates.
    pub stroke_width: f64,
}

/// The shape-specific part of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// A filled rectangle.
    Rect(RectMark),
    /// A text run.
    Text(TextMark),
    /// A path.
    Path(PathMark),
}

impl MarkPayload {
    /// Returns geometry bounds, if the payload has intrinsic geometry.
    ///
    /// Text marks return `None`; their extent depends on shaping, which is a
    /// downstream concern.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            Self::Text(_) => None,
            Self::Path(p) => Some(p.path.bounding_box()),
        }
    }
}

/// A resolved mark: identity, paint order, and payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity within a surface.
    pub id: MarkId,
    /// Rendering order hint; renderers sort by `(z_index, id)`.
    pub z_index: i32,
    /// Shape payload.
    pub payload: MarkPayload,
}

impl Mark {
    /// Creates a rect mark with `z_index = 0`.
    pub fn rect(id: MarkId, rect: Rect, fill: impl Into<Brush>) -> Self {
        Self {
            id,
            z_index: 0,
            payload: MarkPayload::Rect(RectMark {
                rect,
                fill: fill.into(),
            }),
        }
    }

    /// Creates a text mark with default anchoring and `z_index = 0`.
    pub fn text(id: MarkId, pos: Point, text: impl Into<String>, font_size: f64) -> Self {
        Self {
            id,
            z_index: 0,
            payload: MarkPayload::Text(TextMark {
                pos,
                text: text.into(),
                font_size,
                angle: 0.0,
                anchor: TextAnchor::Start,
                baseline: TextBaseline::Middle,
                fill: Brush::default(),
            }),
        }
    }

    /// Creates a filled path mark with no stroke and `z_index = 0`.
    pub fn path(id: MarkId, path: BezPath, fill: impl Into<Brush>) -> Self {
        Self {
            id,
            z_index: 0,
            payload: MarkPayload::Path(PathMark {
                path,
                fill: fill.into(),
                stroke: Brush::default(),
                stroke_width: 0.0,
            }),
        }
    }

    /// Creates a stroked path mark with a transparent fill and `z_index = 0`.
    pub fn stroked_path(
        id: MarkId,
        path: BezPath,
        stroke: impl Into<Brush>,
        stroke_width: f64,
    ) -> Self {
        Self {
            id,
            z_index: 0,
            payload: MarkPayload::Path(PathMark {
                path,
                fill: Brush::Solid(peniko::Color::TRANSPARENT),
                stroke: stroke.into(),
                stroke_width,
            }),
        }
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets the fill paint on any payload kind.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        let fill = fill.into();
        match &mut self.payload {
            MarkPayload::Rect(r) => r.fill = fill,
            MarkPayload::Text(t) => t.fill = fill,
            MarkPayload::Path(p) => p.fill = fill,
        }
        self
    }

    /// Sets anchor and baseline on a text payload; no-op for other kinds.
    pub fn with_text_alignment(mut self, anchor: TextAnchor, baseline: TextBaseline) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.anchor = anchor;
            t.baseline = baseline;
        }
        self
    }

    /// Sets the rotation angle (degrees) on a text payload; no-op otherwise.
    pub fn with_angle(mut self, angle: f64) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.angle = angle;
        }
        self
    }
}
