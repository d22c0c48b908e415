// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart demos for `tally_charts`.
//!
//! Builds a small in-memory order dataset and writes each chart as an SVG
//! file in the working directory.

mod svg;

use kurbo::Rect;
use tally_charts::{
    CountPlotSpec, DonutPlotSpec, HeuristicTextMeasurer, default_palette,
};
use tally_core::{Surface, SurfaceGrid};
use tally_frame::{CategoryCounts, CategoryOrder, Column, RecordTable, TableOverview, Value};

/// One synthetic order: status, weekday, period of day, payment type,
/// purchase year, customer state.
const ORDERS: [(&str, &str, &str, &str, f64, &str); 24] = [
    ("delivered", "Mon", "Morning", "credit_card", 2017.0, "SP"),
    ("delivered", "Tue", "Afternoon", "credit_card", 2018.0, "SP"),
    ("delivered", "Wed", "Night", "boleto", 2018.0, "RJ"),
    ("delivered", "Thu", "Morning", "credit_card", 2018.0, "SP"),
    ("delivered", "Fri", "Afternoon", "voucher", 2017.0, "MG"),
    ("delivered", "Sat", "Dawn", "credit_card", 2018.0, "RJ"),
    ("delivered", "Sun", "Night", "boleto", 2017.0, "SP"),
    ("delivered", "Mon", "Afternoon", "credit_card", 2018.0, "RS"),
    ("delivered", "Tue", "Morning", "credit_card", 2018.0, "SP"),
    ("delivered", "Wed", "Afternoon", "debit_card", 2018.0, "BA"),
    ("delivered", "Thu", "Night", "credit_card", 2017.0, "MG"),
    ("delivered", "Fri", "Morning", "boleto", 2018.0, "SP"),
    ("delivered", "Sat", "Afternoon", "credit_card", 2018.0, "RJ"),
    ("delivered", "Sun", "Morning", "credit_card", 2017.0, "SP"),
    ("delivered", "Mon", "Night", "voucher", 2018.0, "PR"),
    ("delivered", "Tue", "Afternoon", "credit_card", 2018.0, "SP"),
    ("shipped", "Wed", "Morning", "boleto", 2018.0, "MG"),
    ("shipped", "Thu", "Afternoon", "credit_card", 2018.0, "SP"),
    ("shipped", "Fri", "Night", "credit_card", 2017.0, "RJ"),
    ("shipped", "Sat", "Morning", "debit_card", 2018.0, "RS"),
    ("canceled", "Sun", "Afternoon", "boleto", 2017.0, "SP"),
    ("canceled", "Mon", "Dawn", "credit_card", 2018.0, "BA"),
    ("unavailable", "Tue", "Night", "voucher", 2018.0, "MG"),
    ("invoiced", "Wed", "Morning", "credit_card", 2017.0, "SP"),
];

fn orders_table() -> RecordTable {
    RecordTable::from_columns(vec![
        Column::from_strs("order_status", ORDERS.iter().map(|o| o.0)),
        Column::from_strs("purchase_weekday", ORDERS.iter().map(|o| o.1)),
        Column::from_strs("purchase_period", ORDERS.iter().map(|o| o.2)),
        Column::from_strs("payment_type", ORDERS.iter().map(|o| o.3)),
        Column::new(
            "purchase_year",
            ORDERS.iter().map(|o| Value::Num(o.4)).collect(),
        ),
        Column::from_strs("customer_state", ORDERS.iter().map(|o| o.5)),
    ])
    .expect("columns share the ORDERS length")
}

fn write_svg(name: &str, contents: String) {
    std::fs::write(name, contents).expect("write svg file");
    println!("wrote {name}");
}

fn main() {
    let table = orders_table();
    let measurer = HeuristicTextMeasurer;

    // Dataset overview, in the spirit of a notebook's first cell.
    println!("{:<18} {:<6} {:>8} {:>9}", "column", "dtype", "missing", "distinct");
    for p in TableOverview::profile(&table).profiles() {
        println!(
            "{:<18} {:<6} {:>8} {:>9}",
            p.name,
            format!("{:?}", p.dtype),
            p.missing,
            p.distinct
        );
    }

    // Order volume by status, most frequent first.
    let mut status = Surface::new(Rect::new(0.0, 0.0, 640.0, 360.0));
    CountPlotSpec::new(0x1000)
        .with_x("order_status")
        .with_title("Order volume by status")
        .with_subtitle("share of all orders on each bar")
        .with_count_axis_title("orders")
        .render(&table, &measurer, &mut status)
        .expect("render status chart");
    write_svg("orders_by_status.svg", svg::surface_svg(&status));

    // Orders by weekday, kept in weekday order rather than by frequency.
    let mut weekday = Surface::new(Rect::new(0.0, 0.0, 640.0, 360.0));
    CountPlotSpec::new(0x2000)
        .with_x("purchase_weekday")
        .with_order(CategoryOrder::FirstAppearance)
        .with_title("Orders by day of week")
        .render(&table, &measurer, &mut weekday)
        .expect("render weekday chart");
    write_svg("orders_by_weekday.svg", svg::surface_svg(&weekday));

    // Payment type, split by purchase year in a paired breakdown chart.
    let mut grid = SurfaceGrid::new(2, 1, 640.0, 360.0, 24.0);
    CountPlotSpec::new(0x3000)
        .with_x("payment_type")
        .with_hue("purchase_year")
        .with_title("Payment types")
        .with_label_angle(30.0)
        .render_grid(&table, &measurer, &mut grid)
        .expect("render payment charts");
    write_svg("payments_by_year.svg", svg::grid_svg(&grid));

    // Top five states, horizontal bars with inline annotations.
    let mut states = Surface::new(Rect::new(0.0, 0.0, 640.0, 360.0));
    CountPlotSpec::new(0x4000)
        .with_y("customer_state")
        .with_top(5)
        .with_title("Top 5 customer states")
        .with_palette(default_palette(5))
        .render(&table, &measurer, &mut states)
        .expect("render state chart");
    write_svg("orders_by_state.svg", svg::surface_svg(&states));

    // Period-of-day donut with the noisy dawn slice suppressed.
    let counts = CategoryCounts::from_table(&table, "purchase_period", CategoryOrder::FrequencyDesc)
        .expect("summarize purchase_period");
    let mut donut = Surface::new(Rect::new(0.0, 0.0, 420.0, 420.0));
    DonutPlotSpec::new(0x5000)
        .drop_last(1)
        .with_inner_ratio(0.55)
        .with_palette(default_palette(3))
        .with_center_text("orders")
        .with_title("Orders by period of day")
        .render(&counts, &measurer, &mut donut)
        .expect("render period donut");
    write_svg("orders_by_period.svg", svg::surface_svg(&donut));
}
