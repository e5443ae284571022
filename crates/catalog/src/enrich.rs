// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Array dimension enrichment
//!
//! `information_schema.columns` reports array columns as `ARRAY` without
//! saying how many dimensions they have. The services read that number from
//! `pg_attribute` with a second probe query and join it back onto the column
//! rows with [`enrich_array_dimensions`].

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, warn};

use crate::metadata::{ArrayColumnProbe, Column};

/// Copy array dimensions from `probes` onto the matching `columns`
///
/// Rows are joined on `(table_name, column_name)`. A probe without a matching
/// column is ignored. If several columns share a key, only the first one in
/// result order is updated. Running this twice with the same probes leaves
/// the columns as after the first run.
pub fn enrich_array_dimensions(columns: &mut [Column], probes: &[ArrayColumnProbe]) {
    let mut index: HashMap<(&str, &str), usize> = HashMap::with_capacity(columns.len());
    for (position, column) in columns.iter().enumerate() {
        let (Some(table), Some(name)) = (column.table_name.as_deref(), column.column_name.as_deref())
        else {
            continue;
        };
        match index.entry((table, name)) {
            Entry::Occupied(_) => {
                warn!(table, column = name, "duplicate column key in catalog result")
            }
            Entry::Vacant(slot) => {
                slot.insert(position);
            }
        }
    }

    let mut updates = Vec::with_capacity(probes.len());
    for probe in probes {
        let (Some(table), Some(name)) = (probe.table_name.as_deref(), probe.column_name.as_deref())
        else {
            continue;
        };
        match index.get(&(table, name)) {
            Some(&position) => updates.push((position, probe.array_dimension)),
            None => debug!(table, column = name, "array probe has no matching column"),
        }
    }

    for (position, dimension) in updates {
        columns[position].array_dimension = dimension;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrich_sets_matching_dimension() {
        let mut columns = vec![Column::new("t", "a"), Column::new("t", "b")];
        let probes = vec![ArrayColumnProbe::new("t", "a", 1)];

        enrich_array_dimensions(&mut columns, &probes);

        assert_eq!(columns[0].array_dimension, Some(1));
        assert_eq!(columns[1].array_dimension, None);
    }

    #[test]
    fn test_enrich_is_idempotent() {
        let mut once = vec![Column::new("t", "a"), Column::new("u", "a")];
        let probes = vec![ArrayColumnProbe::new("t", "a", 2), ArrayColumnProbe::new("u", "a", 3)];

        enrich_array_dimensions(&mut once, &probes);
        let mut twice = once.clone();
        enrich_array_dimensions(&mut twice, &probes);

        assert_eq!(once, twice);
        assert_eq!(twice[0].array_dimension, Some(2));
        assert_eq!(twice[1].array_dimension, Some(3));
    }

    #[test]
    fn test_enrich_ignores_unmatched_probe() {
        let mut columns = vec![Column::new("t", "a")];
        let probes = vec![ArrayColumnProbe::new("gone", "a", 1), ArrayColumnProbe::new("t", "z", 4)];

        enrich_array_dimensions(&mut columns, &probes);

        assert_eq!(columns[0].array_dimension, None);
    }

    #[test]
    fn test_enrich_matches_table_and_column_together() {
        let mut columns = vec![Column::new("t", "a"), Column::new("u", "b")];
        let probes = vec![ArrayColumnProbe::new("t", "b", 1)];

        enrich_array_dimensions(&mut columns, &probes);

        assert!(columns.iter().all(|c| c.array_dimension.is_none()));
    }

    #[test]
    fn test_enrich_duplicate_key_updates_first_row() {
        let mut columns = vec![Column::new("t", "a"), Column::new("t", "a")];
        let probes = vec![ArrayColumnProbe::new("t", "a", 2)];

        enrich_array_dimensions(&mut columns, &probes);

        assert_eq!(columns[0].array_dimension, Some(2));
        assert_eq!(columns[1].array_dimension, None);
    }

    #[test]
    fn test_enrich_empty_inputs() {
        let mut columns: Vec<Column> = Vec::new();
        enrich_array_dimensions(&mut columns, &[ArrayColumnProbe::new("t", "a", 1)]);
        assert!(columns.is_empty());

        let mut columns = vec![Column::new("t", "a")];
        enrich_array_dimensions(&mut columns, &[]);
        assert_eq!(columns[0].array_dimension, None);
    }
}
