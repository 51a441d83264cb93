//! Day-of-month batch rotation.
//!
//! The sorted corpus is cut into `ceil(N / batch_size)` contiguous batches and
//! the calendar day picks one: `(day - 1) mod total_batches`. No state is kept
//! between runs, so the rotation shifts whenever the corpus grows or shrinks.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::info;

/// The slice chosen for a run, with its position in the rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSelection {
    /// Selected variations, in corpus order
    pub names: Vec<String>,
    pub total_variations: usize,
    pub batch_size: usize,
    pub total_batches: usize,
    /// 1-based day of month the selection was keyed on
    pub day_of_month: u32,
    /// 0-based index of the selected batch
    pub current_batch: usize,
    /// Slice bounds `[start, end)` into the corpus
    pub start: usize,
    pub end: usize,
}

impl BatchSelection {
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Select today's batch from the sorted corpus.
///
/// ```
/// use chrono::NaiveDate;
/// use domain_hunter_lib::select_batch;
///
/// let corpus: Vec<String> = (0..10).map(|i| format!("name{:02}", i)).collect();
/// let day3 = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
/// // 4 batches of 3; day 3 -> batch 2 -> indices 6..9
/// assert_eq!(select_batch(&corpus, 3, day3), vec!["name06", "name07", "name08"]);
/// ```
pub fn select_batch(all_variations: &[String], batch_size: usize, reference_date: NaiveDate) -> Vec<String> {
    select_batch_with_info(all_variations, batch_size, reference_date).names
}

/// Like [`select_batch`] but also reports where the slice sits in the rotation.
pub fn select_batch_with_info(
    all_variations: &[String],
    batch_size: usize,
    reference_date: NaiveDate,
) -> BatchSelection {
    let total = all_variations.len();
    let day_of_month = reference_date.day();

    let total_batches = if batch_size == 0 {
        0
    } else {
        total.div_ceil(batch_size)
    };

    if total_batches == 0 {
        return BatchSelection {
            names: Vec::new(),
            total_variations: total,
            batch_size,
            total_batches: 0,
            day_of_month,
            current_batch: 0,
            start: 0,
            end: 0,
        };
    }

    let current_batch = (day_of_month as usize - 1) % total_batches;
    let start = current_batch * batch_size;
    let end = (start + batch_size).min(total);

    info!(
        total_variations = total,
        batch_size,
        total_batches,
        day_of_month,
        batch = current_batch + 1,
        start,
        end,
        "Selected daily batch"
    );

    BatchSelection {
        names: all_variations[start..end].to_vec(),
        total_variations: total,
        batch_size,
        total_batches,
        day_of_month,
        current_batch,
        start,
        end,
    }
}
