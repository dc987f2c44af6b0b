//! Window filtering and category summaries for the summary screen.

use serde::{Deserialize, Serialize};

use crate::{period::DateWindow, records::Record};

/// Glyph used when no icon table knows the category.
pub const FALLBACK_ICON: &str = "❓";

/// How many categories the summary screen shows. Anything past the cut is
/// dropped outright rather than folded into an "Other" row.
pub const DEFAULT_TOP_CATEGORIES: usize = 5;

/// Resolves a category or source name to its current display icon.
pub trait IconLookup {
    fn lookup(&self, name: &str) -> Option<&str>;
}

/// One row of the top-categories list. Derived at read time, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySummary {
    pub label: String,
    pub emoji: String,
    pub amount: f64,
    pub percentage: f64,
}

/// Records whose date falls inside the window, bounds inclusive. A record
/// whose date cannot be parsed is logged and left out; it never aborts the
/// filter.
pub fn filter_by_window<'a>(records: &'a [Record], window: &DateWindow) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|record| match record.parsed_date() {
            Some(date) => window.contains(date),
            None => {
                tracing::warn!(id = %record.id, date = %record.date, "skipping record with unparsable date");
                false
            }
        })
        .collect()
}

/// Sum of record amounts; unparsable amounts contribute zero.
pub fn sum_amounts<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .map(|record| record.amount_value())
        .sum()
}

/// Groups `records` by label, sums each group, and returns the top `limit`
/// groups by amount.
///
/// Icons come from the lookup collaborator so renames show the current
/// glyph, not whatever was stamped on the record; a lookup miss falls back
/// to [`FALLBACK_ICON`]. Percentages are of the grand total across all
/// groups and are computed before the list is truncated. The descending
/// sort is stable, so equal amounts keep first-encountered order. Records
/// with an empty label are ignored.
pub fn summarize_by_category(
    records: &[&Record],
    icons: &dyn IconLookup,
    limit: usize,
) -> Vec<CategorySummary> {
    let total = sum_amounts(records.iter().copied());
    if total <= 0.0 {
        return Vec::new();
    }

    let mut groups: Vec<CategorySummary> = Vec::new();
    for record in records {
        if record.label.is_empty() {
            continue;
        }
        let amount = record.amount_value();
        match groups.iter_mut().find(|group| group.label == record.label) {
            Some(group) => group.amount += amount,
            None => groups.push(CategorySummary {
                label: record.label.clone(),
                emoji: icons
                    .lookup(&record.label)
                    .unwrap_or(FALLBACK_ICON)
                    .to_string(),
                amount,
                percentage: 0.0,
            }),
        }
    }

    for group in &mut groups {
        group.percentage = group.amount / total * 100.0;
    }

    groups.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(std::cmp::Ordering::Equal));
    groups.truncate(limit);
    groups
}
