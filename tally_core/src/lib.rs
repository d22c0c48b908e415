// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolved mark model and drawing surfaces for tally charts.
//!
//! This crate provides:
//! - **Marks**: fully resolved drawing primitives (rects, text, paths) with
//!   stable identities and explicit z-ordering.
//! - **Surfaces**: caller-owned chart areas that collect marks, plus a grid
//!   of surfaces with uniform 2-D addressing for multi-chart figures.
//!
//! Chart generators append marks to a surface; they never own the surface or
//! render it. Rendering (SVG, a GPU scene, a terminal) is a downstream
//! concern and consumes [`Surface::marks_sorted`].
//!
//! Text shaping and layout are out of scope; text marks store unshaped
//! strings.

#![no_std]

extern crate alloc;

mod mark;
mod surface;

pub use mark::{
    Mark, MarkId, MarkPayload, PathMark, RectMark, TextAnchor, TextBaseline, TextMark,
};
pub use surface::{Surface, SurfaceGrid};
