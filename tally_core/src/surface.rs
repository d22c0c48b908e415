// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing surfaces and the surface grid.
//!
//! A [`Surface`] is one renderable chart area: a rectangle in figure
//! coordinates plus the marks drawn into it. Surfaces are caller-owned;
//! chart generators only append marks and never clear or resize them.
//!
//! [`SurfaceGrid`] arranges surfaces in rows and columns and always exposes
//! 2-D `(row, col)` addressing, including for a single row or a single
//! column. This removes the need for callers to branch on grid shape when
//! composing multi-chart figures.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;

use crate::mark::Mark;

/// One renderable chart area and the marks drawn into it.
#[derive(Clone, Debug, Default)]
pub struct Surface {
    area: Rect,
    marks: Vec<Mark>,
}

impl Surface {
    /// Creates an empty surface covering `area`.
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            marks: Vec::new(),
        }
    }

    /// Returns the surface area in figure coordinates.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Appends one mark.
    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }

    /// Appends a batch of marks.
    pub fn extend(&mut self, marks: impl IntoIterator<Item = Mark>) {
        self.marks.extend(marks);
    }

    /// Returns the marks in insertion order.
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Returns the number of marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` when no marks have been drawn.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Returns the marks in draw order: sorted by `(z_index, id)`.
    ///
    /// The sort is recomputed per call; surfaces hold insertion order so that
    /// appends stay cheap.
    pub fn marks_sorted(&self) -> Vec<&Mark> {
        let mut out: Vec<&Mark> = self.marks.iter().collect();
        out.sort_by_key(|m| (m.z_index, m.id));
        out
    }
}

/// A row-major grid of surfaces with uniform 2-D addressing.
#[derive(Clone, Debug)]
pub struct SurfaceGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Surface>,
}

impl SurfaceGrid {
    /// Creates a `rows x cols` grid of `cell_width x cell_height` surfaces
    /// separated by `gap`.
    ///
    /// A zero-row or zero-column grid is valid and simply has no cells.
    pub fn new(rows: usize, cols: usize, cell_width: f64, cell_height: f64, gap: f64) -> Self {
        let w = cell_width.max(0.0);
        let h = cell_height.max(0.0);
        let gap = gap.max(0.0);

        let mut cells = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                let x0 = c as f64 * (w + gap);
                let y0 = r as f64 * (h + gap);
                cells.push(Surface::new(Rect::new(x0, y0, x0 + w, y0 + h)));
            }
        }
        Self { rows, cols, cells }
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the cell at `(row, col)`, if in range.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Surface> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Returns the cell at `(row, col)` mutably, if in range.
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Surface> {
        if row < self.rows && col < self.cols {
            self.cells.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    /// Iterates cells in row-major order as `(row, col, surface)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Surface)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, s)| (i / cols, i % cols, s))
    }

    /// Returns the bounding rectangle of all cells.
    pub fn view(&self) -> Rect {
        let mut out: Option<Rect> = None;
        for s in &self.cells {
            let a = s.area();
            out = Some(match out {
                None => a,
                Some(r) => Rect::new(
                    r.x0.min(a.x0),
                    r.y0.min(a.y0),
                    r.x1.max(a.x1),
                    r.y1.max(a.y1),
                ),
            });
        }
        out.unwrap_or(Rect::ZERO)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::Point;
    use peniko::Brush;

    use super::*;
    use crate::mark::MarkId;

    #[test]
    fn marks_sorted_orders_by_z_then_id() {
        let mut s = Surface::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        s.push(
            Mark::text(MarkId::from_raw(2), Point::new(0.0, 0.0), "b", 10.0).with_z_index(5),
        );
        s.push(
            Mark::text(MarkId::from_raw(1), Point::new(0.0, 0.0), "a", 10.0).with_z_index(5),
        );
        s.push(
            Mark::rect(
                MarkId::from_raw(9),
                Rect::new(0.0, 0.0, 1.0, 1.0),
                Brush::default(),
            )
            .with_z_index(-10),
        );

        let order: std::vec::Vec<u64> = s.marks_sorted().iter().map(|m| m.id.0).collect();
        assert_eq!(order, std::vec![9, 1, 2]);
    }

    #[test]
    fn single_row_grid_still_uses_two_indices() {
        let grid = SurfaceGrid::new(1, 3, 100.0, 50.0, 10.0);
        assert!(grid.cell(0, 2).is_some());
        assert!(grid.cell(1, 0).is_none());
        assert_eq!(grid.cell(0, 1).map(|s| s.area().x0), Some(110.0));
    }

    #[test]
    fn single_column_grid_still_uses_two_indices() {
        let grid = SurfaceGrid::new(2, 1, 100.0, 50.0, 10.0);
        assert!(grid.cell(1, 0).is_some());
        assert!(grid.cell(0, 1).is_none());
        assert_eq!(grid.cell(1, 0).map(|s| s.area().y0), Some(60.0));
    }

    #[test]
    fn grid_view_covers_all_cells() {
        let grid = SurfaceGrid::new(2, 2, 100.0, 50.0, 10.0);
        assert_eq!(grid.view(), Rect::new(0.0, 0.0, 210.0, 110.0));
    }
}
