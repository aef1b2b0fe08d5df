//! Lot size aggregation: size-row editing, derived averages and totals

use std::collections::HashMap;

use tracing::debug;

use super::measure::{format_weight, measure_or_zero, set_divisor};
use crate::types::{
    is_present, LotField, LotNotice, LotTotals, RowAverages, SavedLot, SizeGroupSummary, SizeRow,
    Specification,
};

/// Working list of size rows for one drawer session.
///
/// Row order is display order. Sizes are unique across rows: the check runs
/// when a size is picked, so the list never holds a duplicate.
#[derive(Debug, Clone)]
pub struct LotSizeAggregator {
    rows: Vec<SizeRow>,
    specification: Specification,
    size_options: Vec<String>,
}

impl LotSizeAggregator {
    /// Start from prior rows verbatim, or a single blank row when there are none
    pub fn seeded(
        prior_rows: Vec<SizeRow>,
        specification: Specification,
        size_options: Vec<String>,
    ) -> Self {
        let rows = if prior_rows.is_empty() {
            vec![SizeRow::default()]
        } else {
            prior_rows
        };
        Self {
            rows,
            specification,
            size_options,
        }
    }

    pub fn rows(&self) -> &[SizeRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn specification(&self) -> &Specification {
        &self.specification
    }

    pub fn size_options(&self) -> &[String] {
        &self.size_options
    }

    /// Per-set averages of one row under the given specification mode
    pub fn compute_averages(row: &SizeRow, specification: &Specification) -> RowAverages {
        let divisor = set_divisor(&row.set);
        let gross_wt = measure_or_zero(&row.gross_wt);
        let net_wt = measure_or_zero(&row.net_wt);

        let avg_spec_wt = if specification.is_plane() {
            format_weight(0.0)
        } else {
            format_weight((gross_wt - net_wt) / divisor)
        };

        RowAverages {
            avg_gross_wt: format_weight(gross_wt / divisor),
            avg_net_wt: format_weight(net_wt / divisor),
            avg_spec_wt,
        }
    }

    /// Index of another row already holding `size`
    pub fn duplicate_of(&self, index: usize, size: &str) -> Option<usize> {
        self.rows
            .iter()
            .enumerate()
            .find(|(i, row)| *i != index && row.size == size)
            .map(|(i, _)| i)
    }

    /// Set one editable field of a row.
    ///
    /// Picking a size another row already uses is refused with
    /// [`LotNotice::DuplicateSize`] naming that row; the host is expected to
    /// highlight and focus it. Numeric edits recompute the row's averages in
    /// the same update.
    pub fn update_field(
        &mut self,
        index: usize,
        field: LotField,
        value: impl Into<String>,
    ) -> Result<(), LotNotice> {
        let value = value.into();
        let current = self.rows.get(index).ok_or(LotNotice::RowOutOfRange {
            index,
            len: self.rows.len(),
        })?;

        if field == LotField::Size && is_present(&value) {
            if let Some(row) = self.duplicate_of(index, &value) {
                debug!(index, size = %value, conflict = row, "duplicate size rejected");
                return Err(LotNotice::DuplicateSize { row });
            }
        }

        let mut updated = current.clone();
        *updated.field_mut(field) = value;
        if field.affects_averages() {
            let averages = Self::compute_averages(&updated, &self.specification);
            updated.set_averages(averages);
        }
        self.rows[index] = updated;
        Ok(())
    }

    /// Allowed sizes no row has taken yet, in catalog order
    pub fn unused_sizes(&self) -> Vec<&str> {
        self.size_options
            .iter()
            .filter(|size| !self.rows.iter().any(|row| &row.size == *size))
            .map(String::as_str)
            .collect()
    }

    /// Sizes row `index` may pick: everything not held by another row
    pub fn available_sizes(&self, index: usize) -> Vec<&str> {
        self.size_options
            .iter()
            .filter(|size| self.duplicate_of(index, size).is_none())
            .map(String::as_str)
            .collect()
    }

    /// Whether the "add size" affordance is enabled
    pub fn can_add_row(&self) -> bool {
        self.rows.len() < self.size_options.len()
    }

    /// Whether the "remove" affordance is enabled
    pub fn can_remove_row(&self) -> bool {
        self.rows.len() > 1
    }

    /// Append a blank row; returns its index. The new row has no size yet.
    pub fn add_row(&mut self) -> Result<usize, LotNotice> {
        if self.unused_sizes().is_empty() {
            debug!(rows = self.rows.len(), "no sizes left to add");
            return Err(LotNotice::NoSizesAvailable);
        }
        self.rows.push(SizeRow::default());
        Ok(self.rows.len() - 1)
    }

    /// Remove a row, keeping the order of the rest. The last row is kept.
    pub fn remove_row(&mut self, index: usize) -> Result<SizeRow, LotNotice> {
        if index >= self.rows.len() {
            return Err(LotNotice::RowOutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        if !self.can_remove_row() {
            return Err(LotNotice::LastRow);
        }
        Ok(self.rows.remove(index))
    }

    /// Summaries per size, in the order sizes first appear.
    ///
    /// Only rows with both a size and a net weight take part. Sizes are
    /// unique so every group currently holds one row; the grouping still
    /// averages over however many rows share a size.
    pub fn group_by_size(&self) -> Vec<SizeGroupSummary> {
        let mut order: Vec<SizeGroupSummary> = Vec::new();
        let mut index_of: HashMap<&str, usize> = HashMap::new();

        for row in &self.rows {
            if !is_present(&row.size) || !is_present(&row.net_wt) {
                continue;
            }

            let slot = *index_of.entry(row.size.as_str()).or_insert_with(|| {
                order.push(SizeGroupSummary {
                    size: row.size.clone(),
                    count: 0,
                    average_net_wt: 0.0,
                    total_sets: 0.0,
                    average_gross_wt: 0.0,
                });
                order.len() - 1
            });

            // Accumulate sums first; divided into averages below
            let group = &mut order[slot];
            group.count = group.count.saturating_add(1);
            group.average_net_wt += measure_or_zero(&row.net_wt);
            group.total_sets += measure_or_zero(&row.set);
            group.average_gross_wt += measure_or_zero(&row.gross_wt);
        }

        for group in &mut order {
            let count = group.count as f64;
            group.average_net_wt /= count;
            group.average_gross_wt /= count;
        }

        order
    }

    /// Sums over every row; unparseable values count as 0
    pub fn compute_totals(&self) -> LotTotals {
        self.rows
            .iter()
            .fold(LotTotals::default(), |mut totals, row| {
                totals.total_sets += measure_or_zero(&row.set);
                totals.total_gross_wt += measure_or_zero(&row.gross_wt);
                totals.total_net_wt += measure_or_zero(&row.net_wt);
                totals
            })
    }

    /// Every row has size, set, gross and net weight entered
    pub fn is_valid(&self) -> bool {
        self.rows.iter().all(SizeRow::is_complete)
    }

    /// Snapshot of the lot with freshly computed averages.
    ///
    /// Callers gate this on [`is_valid`](Self::is_valid); it does not check.
    pub fn save(&self) -> SavedLot {
        let lot_sizes = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                let averages = Self::compute_averages(&row, &self.specification);
                row.set_averages(averages);
                row
            })
            .collect();

        SavedLot {
            lot_sizes,
            totals: self.compute_totals(),
        }
    }
}
