// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use kurbo::Rect;
use tally_core::{MarkPayload, Surface, SurfaceGrid};
use tally_frame::{CategoryCounts, CategoryOrder, Column, FrameError, RecordTable};

use crate::{
    BreakdownPlotSpec, ChartError, CountPlotSpec, DonutPlotSpec, HeuristicTextMeasurer,
    SERIES_FILL,
};

fn status_table() -> RecordTable {
    RecordTable::from_columns(vec![Column::from_strs(
        "status",
        ["delivered", "delivered", "shipped", "canceled"],
    )])
    .unwrap()
}

fn status_by_year() -> RecordTable {
    RecordTable::from_columns(vec![
        Column::from_strs(
            "status",
            [
                "delivered",
                "delivered",
                "delivered",
                "shipped",
                "shipped",
                "canceled",
            ],
        ),
        Column::from_nums("year", [2017.0, 2018.0, 2018.0, 2017.0, 2018.0, 2018.0]),
    ])
    .unwrap()
}

fn texts(surface: &Surface) -> Vec<String> {
    surface
        .marks()
        .iter()
        .filter_map(|m| match &m.payload {
            MarkPayload::Text(t) => Some(t.text.clone()),
            _ => None,
        })
        .collect()
}

fn series_rects(surface: &Surface) -> Vec<Rect> {
    surface
        .marks()
        .iter()
        .filter_map(|m| match &m.payload {
            MarkPayload::Rect(r) if m.z_index == SERIES_FILL => Some(r.rect),
            _ => None,
        })
        .collect()
}

#[test]
fn vertical_count_plot_draws_a_bar_and_labels_per_category() {
    let table = status_table();
    let mut surface = Surface::new(Rect::new(0.0, 0.0, 400.0, 300.0));
    let spec = CountPlotSpec::new(0x1000)
        .with_x("status")
        .with_order(CategoryOrder::FirstAppearance)
        .with_title("Orders by status");

    spec.render(&table, &HeuristicTextMeasurer, &mut surface)
        .unwrap();

    assert_eq!(series_rects(&surface).len(), 3);
    let texts = texts(&surface);
    for expected in ["50.0%", "25.0%", "2", "1", "delivered", "Orders by status"] {
        assert!(
            texts.iter().any(|t| t == expected),
            "missing label {expected:?} in {texts:?}"
        );
    }
}

#[test]
fn taller_counts_produce_taller_bars() {
    let table = status_table();
    let mut surface = Surface::new(Rect::new(0.0, 0.0, 400.0, 300.0));
    CountPlotSpec::new(1)
        .with_x("status")
        .with_order(CategoryOrder::FrequencyDesc)
        .render(&table, &HeuristicTextMeasurer, &mut surface)
        .unwrap();

    let bars = series_rects(&surface);
    // Frequency order: delivered (2) first, then the two singles.
    assert!(bars[0].height() > bars[1].height());
    assert!((bars[1].height() - bars[2].height()).abs() < 1e-9);
}

#[test]
fn top_truncation_keeps_the_full_table_denominator() {
    let table = status_table();
    let mut surface = Surface::new(Rect::new(0.0, 0.0, 400.0, 300.0));
    CountPlotSpec::new(1)
        .with_x("status")
        .with_top(1)
        .render(&table, &HeuristicTextMeasurer, &mut surface)
        .unwrap();

    assert_eq!(series_rects(&surface).len(), 1);
    let texts = texts(&surface);
    // Still 50% of all four rows, not 100% of the filtered subset.
    assert!(texts.iter().any(|t| t == "50.0%"));
    assert!(!texts.iter().any(|t| t == "100.0%"));
}

#[test]
fn horizontal_bars_use_inline_count_percent_labels() {
    let table = status_table();
    let mut surface = Surface::new(Rect::new(0.0, 0.0, 400.0, 300.0));
    CountPlotSpec::new(1)
        .with_y("status")
        .render(&table, &HeuristicTextMeasurer, &mut surface)
        .unwrap();

    let texts = texts(&surface);
    assert!(texts.iter().any(|t| t == "2 (50.0%)"), "got {texts:?}");
    let bars = series_rects(&surface);
    assert!(bars[0].width() > bars[1].width());
}

#[test]
fn both_axis_columns_is_ambiguous_and_renders_nothing() {
    let table = status_table();
    let mut surface = Surface::new(Rect::new(0.0, 0.0, 400.0, 300.0));
    let err = CountPlotSpec::new(1)
        .with_x("status")
        .with_y("status")
        .render(&table, &HeuristicTextMeasurer, &mut surface)
        .unwrap_err();
    assert_eq!(err, ChartError::AmbiguousAxis);
    assert!(surface.is_empty());
}

#[test]
fn neither_axis_column_is_ambiguous() {
    let table = status_table();
    let mut surface = Surface::new(Rect::new(0.0, 0.0, 400.0, 300.0));
    let err = CountPlotSpec::new(1)
        .render(&table, &HeuristicTextMeasurer, &mut surface)
        .unwrap_err();
    assert_eq!(err, ChartError::AmbiguousAxis);
    assert!(surface.is_empty());
}

#[test]
fn missing_column_surfaces_the_frame_error_and_renders_nothing() {
    let table = status_table();
    let mut surface = Surface::new(Rect::new(0.0, 0.0, 400.0, 300.0));
    let err = CountPlotSpec::new(1)
        .with_x("region")
        .render(&table, &HeuristicTextMeasurer, &mut surface)
        .unwrap_err();
    assert_eq!(
        err,
        ChartError::Frame(FrameError::ColumnNotFound(String::from("region")))
    );
    assert!(surface.is_empty());
}

#[test]
fn empty_table_is_rejected_before_any_drawing() {
    let table = RecordTable::from_columns(vec![Column::from_strs("status", [])]).unwrap();
    let mut surface = Surface::new(Rect::new(0.0, 0.0, 400.0, 300.0));
    let err = CountPlotSpec::new(1)
        .with_x("status")
        .render(&table, &HeuristicTextMeasurer, &mut surface)
        .unwrap_err();
    assert_eq!(err, ChartError::Frame(FrameError::EmptyTable));
    assert!(surface.is_empty());
}

#[test]
fn hue_grid_renders_count_chart_and_stacked_breakdown() {
    let table = status_by_year();
    let mut grid = SurfaceGrid::new(2, 1, 500.0, 300.0, 20.0);
    CountPlotSpec::new(1)
        .with_x("status")
        .with_hue("year")
        .render_grid(&table, &HeuristicTextMeasurer, &mut grid)
        .unwrap();

    let counts_cell = grid.cell(0, 0).unwrap();
    let breakdown_cell = grid.cell(1, 0).unwrap();
    assert!(!counts_cell.is_empty());
    assert!(!breakdown_cell.is_empty());

    // delivered splits 1/3 + 2/3, shipped 1/2 + 1/2, canceled is all 2018:
    // five non-empty segments in total.
    assert_eq!(series_rects(breakdown_cell).len(), 5);
    let texts = texts(breakdown_cell);
    for expected in ["33.3%", "66.7%", "50.0%", "100.0%", "year", "2017", "2018"] {
        assert!(
            texts.iter().any(|t| t == expected),
            "missing {expected:?} in {texts:?}"
        );
    }
}

#[test]
fn breakdown_keeps_the_count_charts_category_order() {
    let table = status_by_year();
    let mut grid = SurfaceGrid::new(2, 1, 500.0, 300.0, 20.0);
    let spec = CountPlotSpec::new(1).with_x("status").with_hue("year");
    spec.render_grid(&table, &HeuristicTextMeasurer, &mut grid)
        .unwrap();

    let order: Vec<String> = spec
        .counts(&table)
        .unwrap()
        .entries()
        .iter()
        .map(|e| e.value.label())
        .collect();

    // Category axis labels appear in both cells in the same order.
    for cell in [grid.cell(0, 0).unwrap(), grid.cell(1, 0).unwrap()] {
        let labels: Vec<String> = texts(cell)
            .into_iter()
            .filter(|t| order.contains(t))
            .collect();
        assert_eq!(&labels[..order.len()], &order[..]);
    }
}

#[test]
fn breakdown_segments_fill_each_band_completely() {
    let table = status_by_year();
    let mut grid = SurfaceGrid::new(2, 1, 500.0, 300.0, 20.0);
    CountPlotSpec::new(1)
        .with_x("status")
        .with_hue("year")
        .render_grid(&table, &HeuristicTextMeasurer, &mut grid)
        .unwrap();

    let segments = series_rects(grid.cell(1, 0).unwrap());
    // Group segments by x and check each stack spans the same total height.
    let mut heights: std::collections::BTreeMap<i64, f64> = std::collections::BTreeMap::new();
    for r in &segments {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "plot coordinates are small in tests"
        )]
        let key = (r.x0 * 1000.0) as i64;
        *heights.entry(key).or_insert(0.0) += r.height();
    }
    let total: Vec<f64> = heights.values().copied().collect();
    assert_eq!(total.len(), 3);
    for h in &total[1..] {
        assert!((h - total[0]).abs() < 1e-6, "stacks differ: {total:?}");
    }
}

#[test]
fn hue_with_a_one_row_grid_reports_the_missing_cell() {
    let table = status_by_year();
    let mut grid = SurfaceGrid::new(1, 1, 500.0, 300.0, 20.0);
    let err = CountPlotSpec::new(1)
        .with_x("status")
        .with_hue("year")
        .render_grid(&table, &HeuristicTextMeasurer, &mut grid)
        .unwrap_err();
    assert_eq!(err, ChartError::MissingSurface { row: 1, col: 0 });
    assert!(grid.cell(0, 0).unwrap().is_empty());
}

#[test]
fn standalone_breakdown_render_respects_the_given_counts() {
    let table = status_by_year();
    // Truncate to the two most frequent categories before handing over.
    let counts = CategoryCounts::from_table(&table, "status", CategoryOrder::FrequencyDesc)
        .unwrap()
        .with_top(2);
    let mut surface = Surface::new(Rect::new(0.0, 0.0, 500.0, 300.0));
    BreakdownPlotSpec::new(9, "year")
        .with_title("status by year")
        .render(&table, &counts, &HeuristicTextMeasurer, &mut surface)
        .unwrap();

    // Only delivered and shipped stacks remain: 2 + 2 segments.
    assert_eq!(series_rects(&surface).len(), 4);
    let texts = texts(&surface);
    assert!(!texts.iter().any(|t| t == "canceled"), "got {texts:?}");
}

#[test]
fn donut_renormalizes_over_displayed_slices() {
    let table = status_table();
    let counts = CategoryCounts::from_table(&table, "status", CategoryOrder::FrequencyDesc)
        .unwrap();
    let mut surface = Surface::new(Rect::new(0.0, 0.0, 300.0, 300.0));
    DonutPlotSpec::new(1)
        .drop_last(1)
        .with_center_text("orders")
        .render(&counts, &HeuristicTextMeasurer, &mut surface)
        .unwrap();

    // Two slices survive: delivered (2 of 3) and shipped (1 of 3).
    let sectors = surface
        .marks()
        .iter()
        .filter(|m| matches!(m.payload, MarkPayload::Path(_)) && m.z_index == SERIES_FILL)
        .count();
    assert_eq!(sectors, 2);
    let texts = texts(&surface);
    for expected in ["66.7%", "33.3%", "(2)", "(1)", "orders"] {
        assert!(
            texts.iter().any(|t| t == expected),
            "missing {expected:?} in {texts:?}"
        );
    }
}

#[test]
fn donut_dropping_everything_is_rejected() {
    let table = status_table();
    let counts = CategoryCounts::from_table(&table, "status", CategoryOrder::FrequencyDesc)
        .unwrap();
    let mut surface = Surface::new(Rect::new(0.0, 0.0, 300.0, 300.0));
    let err = DonutPlotSpec::new(1)
        .drop_last(3)
        .render(&counts, &HeuristicTextMeasurer, &mut surface)
        .unwrap_err();
    assert_eq!(err, ChartError::Frame(FrameError::EmptyTable));
    assert!(surface.is_empty());
}

#[test]
fn repeated_renders_produce_identical_mark_lists() {
    let table = status_by_year();
    let mut a = Surface::new(Rect::new(0.0, 0.0, 400.0, 300.0));
    let mut b = Surface::new(Rect::new(0.0, 0.0, 400.0, 300.0));
    let spec = CountPlotSpec::new(7).with_x("status").with_title("Orders");

    spec.render(&table, &HeuristicTextMeasurer, &mut a).unwrap();
    spec.render(&table, &HeuristicTextMeasurer, &mut b).unwrap();
    assert_eq!(a.marks(), b.marks());
}
