// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory record tables and categorical count summaries.
//!
//! This crate provides:
//! - a small columnar [`RecordTable`] of typed [`Value`]s, and
//! - the categorical summaries charts are built from: [`CategoryCounts`]
//!   (frequency and percent-of-total per category) and [`Breakdown`]
//!   (per-category proportions of a secondary categorical column).
//!
//! Summaries are computed fresh per call and hold no reference to the input
//! table; nothing here mutates a table. Ordering is always deterministic:
//! first-appearance order of distinct values, optionally re-sorted by
//! descending frequency with first-appearance tie-breaks. Iteration order of
//! the underlying hash maps is never observable.

#![no_std]

extern crate alloc;

mod overview;
mod summarize;
mod table;
mod value;

pub use overview::{ColumnProfile, DType, TableOverview};
pub use summarize::{
    Breakdown, BreakdownRow, CategoryCount, CategoryCounts, CategoryOrder, percent_label,
};
pub use table::{Column, FrameError, RecordTable};
pub use value::Value;
