// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Categorical count summaries.
//!
//! [`CategoryCounts`] is the core summary: the frequency of each distinct
//! value of one column, with a percent-of-total per category. [`Breakdown`]
//! refines it: for each primary category, the proportion contributed by each
//! value of a secondary column, in the exact category order of the counts it
//! was built from.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::table::{FrameError, RecordTable};
use crate::value::Value;

/// Category ordering for summaries and the charts built from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryOrder {
    /// Descending by frequency; ties keep first-appearance order.
    FrequencyDesc,
    /// First-appearance order of distinct values in the table.
    FirstAppearance,
}

/// One category and its row count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    /// The category value.
    pub value: Value,
    /// Number of rows with this value.
    pub count: usize,
}

/// Frequencies of the distinct values of one column.
///
/// `total_rows` is fixed to the unfiltered row count of the source table at
/// construction; [`CategoryCounts::with_top`] never changes it, so percent
/// labels under truncation still refer to the whole table and need not sum
/// to 100%.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCounts {
    column: String,
    total_rows: usize,
    entries: Vec<CategoryCount>,
}

impl CategoryCounts {
    /// Counts the distinct values of `column`.
    ///
    /// Fails with [`FrameError::EmptyTable`] on a zero-row table (percent of
    /// total would be undefined) and [`FrameError::ColumnNotFound`] when the
    /// column is absent.
    pub fn from_table(
        table: &RecordTable,
        column: &str,
        order: CategoryOrder,
    ) -> Result<Self, FrameError> {
        if table.row_count() == 0 {
            return Err(FrameError::EmptyTable);
        }
        let col = table.require_column(column)?;

        let mut index: HashMap<Value, usize> = HashMap::new();
        let mut entries: Vec<CategoryCount> = Vec::new();
        for v in col.values() {
            match index.entry(v.clone()) {
                hashbrown::hash_map::Entry::Occupied(e) => {
                    entries[*e.get()].count += 1;
                }
                hashbrown::hash_map::Entry::Vacant(e) => {
                    e.insert(entries.len());
                    entries.push(CategoryCount {
                        value: v.clone(),
                        count: 1,
                    });
                }
            }
        }

        if order == CategoryOrder::FrequencyDesc {
            // Stable sort: equal counts keep their first-appearance order.
            entries.sort_by(|a, b| b.count.cmp(&a.count));
        }

        Ok(Self {
            column: String::from(column),
            total_rows: table.row_count(),
            entries,
        })
    }

    /// Keeps only the `n` most frequent categories, preserving the current
    /// display order among the survivors.
    ///
    /// `total_rows` is unchanged: percent labels keep the full table as the
    /// denominator, so the displayed percentages may sum to less than 100%.
    pub fn with_top(mut self, n: usize) -> Self {
        if n >= self.entries.len() {
            return self;
        }
        let mut by_count: Vec<usize> = (0..self.entries.len()).collect();
        // Stable: frequency ties are resolved by display position.
        by_count.sort_by_key(|&i| core::cmp::Reverse(self.entries[i].count));
        by_count.truncate(n);

        let mut keep = alloc::vec![false; self.entries.len()];
        for i in by_count {
            keep[i] = true;
        }
        let mut i = 0;
        self.entries.retain(|_| {
            let kept = keep[i];
            i += 1;
            kept
        });
        self
    }

    /// Returns the summarized column name.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Returns the unfiltered row count of the source table.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Returns the categories in display order.
    pub fn entries(&self) -> &[CategoryCount] {
        &self.entries
    }

    /// Returns the number of displayed categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no categories are displayed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the largest displayed count, or zero for an empty summary.
    pub fn max_count(&self) -> usize {
        self.entries.iter().map(|e| e.count).max().unwrap_or(0)
    }

    /// Returns the display position of a category value.
    pub fn position(&self, value: &Value) -> Option<usize> {
        self.entries.iter().position(|e| &e.value == value)
    }

    /// Returns `100 * count / total_rows` rounded to one decimal place.
    pub fn percent(&self, count: usize) -> f64 {
        percent_tenths(count, self.total_rows) as f64 / 10.0
    }

    /// Renders the percent-of-total label for a count, e.g. `"50.0%"`.
    pub fn percent_label(&self, count: usize) -> String {
        percent_label(count, self.total_rows)
    }
}

/// One primary category's composition over the secondary levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownRow {
    primary: Value,
    counts: SmallVec<[usize; 4]>,
    total: usize,
}

impl BreakdownRow {
    /// Returns the primary category value.
    pub fn primary(&self) -> &Value {
        &self.primary
    }

    /// Returns the row count for a secondary level index.
    pub fn count(&self, level: usize) -> usize {
        self.counts.get(level).copied().unwrap_or(0)
    }

    /// Returns the number of rows in this primary category.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns the proportion of a secondary level within this category.
    ///
    /// Proportions over all levels sum to 1.0 for a non-empty category.
    pub fn share(&self, level: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(level) as f64 / self.total as f64
        }
    }

    /// Renders the percent label of a secondary level, e.g. `"37.5%"`.
    pub fn percent_label(&self, level: usize) -> String {
        percent_label(self.count(level), self.total)
    }
}

/// Proportional composition of a secondary column within each primary
/// category.
///
/// Rows follow the category order of the [`CategoryCounts`] this was built
/// from; the breakdown never re-sorts. Secondary levels are in their
/// first-appearance order over the whole table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakdown {
    secondary: String,
    levels: Vec<Value>,
    rows: Vec<BreakdownRow>,
}

impl Breakdown {
    /// Cross-tabulates `secondary` against the primary column of `counts`.
    ///
    /// Primary categories that `counts` dropped (via
    /// [`CategoryCounts::with_top`]) are skipped entirely.
    pub fn from_table(
        table: &RecordTable,
        secondary: &str,
        counts: &CategoryCounts,
    ) -> Result<Self, FrameError> {
        if table.row_count() == 0 {
            return Err(FrameError::EmptyTable);
        }
        let primary_col = table.require_column(counts.column())?;
        let secondary_col = table.require_column(secondary)?;

        let mut level_index: HashMap<Value, usize> = HashMap::new();
        let mut levels: Vec<Value> = Vec::new();
        for v in secondary_col.values() {
            if !level_index.contains_key(v) {
                level_index.insert(v.clone(), levels.len());
                levels.push(v.clone());
            }
        }

        let mut primary_index: HashMap<&Value, usize> = HashMap::new();
        let mut rows: Vec<BreakdownRow> = Vec::with_capacity(counts.len());
        for entry in counts.entries() {
            primary_index.insert(&entry.value, rows.len());
            rows.push(BreakdownRow {
                primary: entry.value.clone(),
                counts: SmallVec::from_elem(0, levels.len()),
                total: 0,
            });
        }

        for row in 0..table.row_count() {
            let Some(p) = primary_col.get(row) else {
                continue;
            };
            let Some(&pi) = primary_index.get(p) else {
                continue;
            };
            let Some(s) = secondary_col.get(row) else {
                continue;
            };
            let li = level_index[s];
            rows[pi].counts[li] += 1;
            rows[pi].total += 1;
        }

        Ok(Self {
            secondary: String::from(secondary),
            levels,
            rows,
        })
    }

    /// Returns the secondary column name.
    pub fn secondary(&self) -> &str {
        &self.secondary
    }

    /// Returns the secondary levels in first-appearance order.
    pub fn levels(&self) -> &[Value] {
        &self.levels
    }

    /// Returns the per-category rows in the source counts' order.
    pub fn rows(&self) -> &[BreakdownRow] {
        &self.rows
    }
}

/// Computes `100 * count / total` in integer tenths of a percent, rounding
/// half away from zero.
///
/// Working in integer tenths keeps labels deterministic and avoids float
/// formatting drift.
fn percent_tenths(count: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    (1000 * count + total / 2) / total
}

/// Renders `100 * count / total` rounded to one decimal, e.g. `"25.0%"`.
pub fn percent_label(count: usize, total: usize) -> String {
    let tenths = percent_tenths(count, total);
    format!("{}.{}%", tenths / 10, tenths % 10)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use crate::table::Column;

    use super::*;

    fn status_table() -> RecordTable {
        RecordTable::from_columns(vec![Column::from_strs(
            "status",
            ["delivered", "delivered", "shipped", "canceled"],
        )])
        .unwrap()
    }

    #[test]
    fn counts_sum_to_row_count() {
        let t = status_table();
        let c = CategoryCounts::from_table(&t, "status", CategoryOrder::FirstAppearance).unwrap();
        let sum: usize = c.entries().iter().map(|e| e.count).sum();
        assert_eq!(sum, t.row_count());
        assert_eq!(c.total_rows(), 4);
    }

    #[test]
    fn first_appearance_order_and_percent_labels() {
        let t = status_table();
        let c = CategoryCounts::from_table(&t, "status", CategoryOrder::FirstAppearance).unwrap();
        let labels: std::vec::Vec<_> = c.entries().iter().map(|e| e.value.label()).collect();
        assert_eq!(labels, vec!["delivered", "shipped", "canceled"]);
        assert_eq!(c.percent_label(c.entries()[0].count), "50.0%");
        assert_eq!(c.percent_label(c.entries()[1].count), "25.0%");
        assert_eq!(c.percent_label(c.entries()[2].count), "25.0%");
        assert_eq!(c.percent(2), 50.0);
        assert_eq!(c.position(&Value::from("shipped")), Some(1));
        assert_eq!(c.position(&Value::from("returned")), None);
    }

    #[test]
    fn frequency_order_breaks_ties_by_first_appearance() {
        let t = RecordTable::from_columns(vec![Column::from_strs(
            "city",
            ["rio", "sao paulo", "sao paulo", "belem", "rio"],
        )])
        .unwrap();
        let c = CategoryCounts::from_table(&t, "city", CategoryOrder::FrequencyDesc).unwrap();
        let labels: std::vec::Vec<_> = c.entries().iter().map(|e| e.value.label()).collect();
        // rio and sao paulo tie at 2; rio appeared first.
        assert_eq!(labels, vec!["rio", "sao paulo", "belem"]);
    }

    #[test]
    fn ordering_is_stable_across_repeated_calls() {
        let t = status_table();
        let a = CategoryCounts::from_table(&t, "status", CategoryOrder::FrequencyDesc).unwrap();
        let b = CategoryCounts::from_table(&t, "status", CategoryOrder::FrequencyDesc).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn top_filter_keeps_full_table_denominator() {
        let t = status_table();
        let c = CategoryCounts::from_table(&t, "status", CategoryOrder::FrequencyDesc)
            .unwrap()
            .with_top(1);
        assert_eq!(c.len(), 1);
        assert_eq!(c.entries()[0].value.label(), "delivered");
        // Not renormalized: still 50% of the full 4 rows.
        assert_eq!(c.percent_label(c.entries()[0].count), "50.0%");
        assert_eq!(c.total_rows(), 4);
    }

    #[test]
    fn top_filter_selects_by_frequency_even_in_appearance_order() {
        let t = RecordTable::from_columns(vec![Column::from_strs(
            "status",
            ["shipped", "delivered", "delivered", "canceled"],
        )])
        .unwrap();
        let c = CategoryCounts::from_table(&t, "status", CategoryOrder::FirstAppearance)
            .unwrap()
            .with_top(1);
        // delivered wins on count despite appearing second.
        assert_eq!(c.entries()[0].value.label(), "delivered");
    }

    #[test]
    fn empty_table_is_rejected() {
        let t = RecordTable::from_columns(vec![Column::from_strs("status", [])]).unwrap();
        assert_eq!(
            CategoryCounts::from_table(&t, "status", CategoryOrder::FrequencyDesc),
            Err(FrameError::EmptyTable)
        );
    }

    #[test]
    fn missing_column_is_rejected() {
        let t = status_table();
        assert_eq!(
            CategoryCounts::from_table(&t, "state", CategoryOrder::FrequencyDesc),
            Err(FrameError::ColumnNotFound(String::from("state")))
        );
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

    #[test]
    fn breakdown_shares_sum_to_one_per_primary_category() {
        let t = status_by_year();
        let counts =
            CategoryCounts::from_table(&t, "status", CategoryOrder::FrequencyDesc).unwrap();
        let b = Breakdown::from_table(&t, "year", &counts).unwrap();
        for row in b.rows() {
            let sum: f64 = (0..b.levels().len()).map(|l| row.share(l)).sum();
            assert!((sum - 1.0).abs() < 1e-9, "shares must sum to 1, got {sum}");
        }
    }

    #[test]
    fn breakdown_follows_counts_order_not_its_own() {
        let t = status_by_year();
        let counts =
            CategoryCounts::from_table(&t, "status", CategoryOrder::FrequencyDesc).unwrap();
        let b = Breakdown::from_table(&t, "year", &counts).unwrap();
        let primaries: std::vec::Vec<_> =
            b.rows().iter().map(|r| r.primary().label()).collect();
        let expected: std::vec::Vec<_> =
            counts.entries().iter().map(|e| e.value.label()).collect();
        assert_eq!(primaries, expected);
    }

    #[test]
    fn breakdown_levels_are_in_first_appearance_order() {
        let t = status_by_year();
        let counts =
            CategoryCounts::from_table(&t, "status", CategoryOrder::FirstAppearance).unwrap();
        let b = Breakdown::from_table(&t, "year", &counts).unwrap();
        let levels: std::vec::Vec<_> = b.levels().iter().map(Value::label).collect();
        assert_eq!(levels, vec!["2017", "2018"]);
    }

    #[test]
    fn breakdown_skips_categories_dropped_by_top() {
        let t = status_by_year();
        let counts = CategoryCounts::from_table(&t, "status", CategoryOrder::FrequencyDesc)
            .unwrap()
            .with_top(2);
        let b = Breakdown::from_table(&t, "year", &counts).unwrap();
        assert_eq!(b.rows().len(), 2);
        assert!(b.rows().iter().all(|r| r.primary().label() != "canceled"));
    }

    #[test]
    fn breakdown_missing_secondary_column_is_rejected() {
        let t = status_by_year();
        let counts =
            CategoryCounts::from_table(&t, "status", CategoryOrder::FrequencyDesc).unwrap();
        assert_eq!(
            Breakdown::from_table(&t, "month", &counts),
            Err(FrameError::ColumnNotFound(String::from("month")))
        );
    }

    #[test]
    fn percent_label_rounds_to_one_decimal() {
        assert_eq!(percent_label(1, 3), "33.3%");
        assert_eq!(percent_label(2, 3), "66.7%");
        assert_eq!(percent_label(1, 8), "12.5%");
        assert_eq!(percent_label(0, 5), "0.0%");
        assert_eq!(percent_label(5, 5), "100.0%");
    }
}
