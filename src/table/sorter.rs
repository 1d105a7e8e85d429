//! Stable reordering of one table
//!
//! The comparator may fail; the first failure aborts the sort and is
//! returned as-is. Rows that compare equal keep their original order.

use std::cmp::Ordering;

use crate::database::{Database, DbError, Row, Table};
use crate::observability::{log_event_with_fields, Event};

impl Database {
    /// Returns a new database whose `table` rows are stably sorted by
    /// `compare`. `self` is never modified.
    pub fn sort_table<E, F>(&self, table: &str, compare: F) -> Result<Database, E>
    where
        E: From<DbError>,
        F: FnMut(&Row, &Row) -> Result<Ordering, E>,
    {
        let rows = self
            .table(table)
            .ok_or_else(|| DbError::unknown_table(table))?
            .rows();

        let sorted = TableSorter::new(compare).sort(rows)?;
        log_event_with_fields(
            Event::TableSorted,
            &[("rows", sorted.len().to_string().as_str()), ("table", table)],
        );

        Ok(self.replace_table(table, Table::new(sorted)))
    }
}

/// Stable merge sort driven by a fallible comparator
pub struct TableSorter<F> {
    compare: F,
}

impl<F> TableSorter<F> {
    pub fn new(compare: F) -> Self {
        Self { compare }
    }

    /// Sorts a copy of `rows`.
    pub fn sort<E>(mut self, rows: &[Row]) -> Result<Vec<Row>, E>
    where
        F: FnMut(&Row, &Row) -> Result<Ordering, E>,
    {
        let mut order: Vec<usize> = (0..rows.len()).collect();
        self.merge_sort(rows, &mut order)?;
        Ok(order.into_iter().map(|i| rows[i].clone()).collect())
    }

    fn merge_sort<E>(&mut self, rows: &[Row], order: &mut [usize]) -> Result<(), E>
    where
        F: FnMut(&Row, &Row) -> Result<Ordering, E>,
    {
        if order.len() < 2 {
            return Ok(());
        }

        let mid = order.len() / 2;
        self.merge_sort(rows, &mut order[..mid])?;
        self.merge_sort(rows, &mut order[mid..])?;

        let (left, right) = order.split_at(mid);
        let mut merged = Vec::with_capacity(order.len());
        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            // Ties take from the left run
            if (self.compare)(&rows[left[i]], &rows[right[j]])? == Ordering::Greater {
                merged.push(right[j]);
                j += 1;
            } else {
                merged.push(left[i]);
                i += 1;
            }
        }
        merged.extend_from_slice(&left[i..]);
        merged.extend_from_slice(&right[j..]);

        order.copy_from_slice(&merged);
        Ok(())
    }
}
