// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart-level errors.

extern crate alloc;

use tally_frame::FrameError;

/// Errors returned when building or rendering a chart.
///
/// All of these are caller-visible failures: nothing is retried and no
/// partial chart is drawn. When a render call fails, the target surface is
/// left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// The underlying table access or summary failed.
    Frame(FrameError),
    /// Exactly one of the x/y primary columns must be supplied; got neither
    /// or both.
    AmbiguousAxis,
    /// A hue was configured but the grid lacks the cell the chart needs.
    MissingSurface {
        /// Grid row of the missing cell.
        row: usize,
        /// Grid column of the missing cell.
        col: usize,
    },
}

impl From<FrameError> for ChartError {
    fn from(err: FrameError) -> Self {
        Self::Frame(err)
    }
}
