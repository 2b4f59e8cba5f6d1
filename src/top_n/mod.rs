use crate::result::{ReportRow, ReportTable, SortField};

/// Keeps the `max_size` rows with the largest `sort_field`, ascending.
///
/// Tables that already fit are returned as they are. The sort is stable, so
/// rows with equal values stay in input order and the cut is reproducible.
pub fn select_top(mut rows: Vec<ReportRow>, max_size: usize, sort_field: SortField) -> ReportTable {
    if rows.len() <= max_size {
        return rows;
    }

    rows.sort_by(|a, b| sort_field.value(a).total_cmp(&sort_field.value(b)));

    let cut = rows.len() - max_size;
    rows.split_off(cut)
}
