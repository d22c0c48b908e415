// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column profiling for quick dataset overviews.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::table::RecordTable;
use crate::value::Value;

/// Coarse column type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    /// All non-missing values are strings.
    Str,
    /// All non-missing values are numeric.
    Num,
    /// All non-missing values are booleans.
    Bool,
    /// All non-missing values are timestamps.
    Time,
    /// The column mixes value kinds, or has no non-missing values.
    Mixed,
}

/// Profile of one column: missingness, cardinality, and type tag.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Coarse type tag.
    pub dtype: DType,
    /// Number of missing values (empty strings, `NaN`).
    pub missing: usize,
    /// `missing / row_count`, or 0 for an empty table.
    pub missing_ratio: f64,
    /// Number of distinct values, missing included.
    pub distinct: usize,
}

/// A per-column overview of a table, sorted by descending missing count.
#[derive(Debug, Clone, PartialEq)]
pub struct TableOverview {
    profiles: Vec<ColumnProfile>,
}

impl TableOverview {
    /// Profiles every column of `table`.
    ///
    /// Columns are sorted by descending missing count; ties keep the table's
    /// column order.
    pub fn profile(table: &RecordTable) -> Self {
        let rows = table.row_count();
        let mut profiles: Vec<ColumnProfile> = table
            .columns()
            .iter()
            .map(|col| {
                let mut missing = 0;
                let mut distinct: HashSet<&Value> = HashSet::new();
                let mut tag: Option<DType> = None;
                for v in col.values() {
                    distinct.insert(v);
                    if v.is_missing() {
                        missing += 1;
                        continue;
                    }
                    let kind = match v {
                        Value::Str(_) => DType::Str,
                        Value::Num(_) => DType::Num,
                        Value::Bool(_) => DType::Bool,
                        Value::Time(_) => DType::Time,
                    };
                    tag = Some(match tag {
                        None => kind,
                        Some(t) if t == kind => t,
                        Some(_) => DType::Mixed,
                    });
                }
                ColumnProfile {
                    name: String::from(col.name()),
                    dtype: tag.unwrap_or(DType::Mixed),
                    missing,
                    missing_ratio: if rows == 0 {
                        0.0
                    } else {
                        missing as f64 / rows as f64
                    },
                    distinct: distinct.len(),
                }
            })
            .collect();

        profiles.sort_by(|a, b| b.missing.cmp(&a.missing));
        Self { profiles }
    }

    /// Returns the column profiles, worst missingness first.
    pub fn profiles(&self) -> &[ColumnProfile] {
        &self.profiles
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use crate::table::Column;

    use super::*;

    #[test]
    fn profile_counts_missing_and_distinct() {
        let t = RecordTable::from_columns(vec![
            Column::from_strs("city", ["rio", "", "rio", "belem"]),
            Column::from_nums("price", [10.0, 20.0, f64::NAN, 20.0]),
        ])
        .unwrap();

        let overview = TableOverview::profile(&t);
        let by_name = |n: &str| {
            overview
                .profiles()
                .iter()
                .find(|p| p.name == n)
                .unwrap()
                .clone()
        };

        let city = by_name("city");
        assert_eq!(city.missing, 1);
        assert_eq!(city.distinct, 3);
        assert_eq!(city.dtype, DType::Str);
        assert!((city.missing_ratio - 0.25).abs() < 1e-12);

        let price = by_name("price");
        assert_eq!(price.missing, 1);
        assert_eq!(price.distinct, 3);
        assert_eq!(price.dtype, DType::Num);
    }

    #[test]
    fn bool_and_time_columns_get_their_own_tags() {
        let t = RecordTable::from_columns(vec![
            Column::from_bools("is_late", [true, false, true]),
            Column::from_times("purchased_at", [1_500_000_000, 1_500_086_400, 1_500_000_000]),
        ])
        .unwrap();
        let overview = TableOverview::profile(&t);
        let tags: std::vec::Vec<DType> = overview.profiles().iter().map(|p| p.dtype).collect();
        assert!(tags.contains(&DType::Bool));
        assert!(tags.contains(&DType::Time));
        assert!(overview.profiles().iter().all(|p| p.missing == 0));
    }

    #[test]
    fn columns_sort_by_missing_count() {
        let t = RecordTable::from_columns(vec![
            Column::from_strs("clean", ["a", "b", "c"]),
            Column::from_strs("dirty", ["", "", "x"]),
        ])
        .unwrap();
        let overview = TableOverview::profile(&t);
        assert_eq!(overview.profiles()[0].name, "dirty");
    }
}
