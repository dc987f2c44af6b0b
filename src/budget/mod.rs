//! Budget figures per period and their derivation from a monthly total.

use serde::{Deserialize, Serialize};

use crate::{period::Period, storage::KeyValueStore};

/// Storage key holding the serialized [`BudgetBook`].
pub const BUDGET_KEY: &str = "budgetData";

/// Average length of a month, used to scale the monthly figure down.
pub const AVERAGE_DAYS_PER_MONTH: f64 = 30.44;

/// Average number of weeks in a month.
pub const WEEKS_PER_MONTH: f64 = AVERAGE_DAYS_PER_MONTH / 7.0;

/// Budget state for one period. Only `total` is authoritative: `spent` is a
/// stale placeholder kept for the stored shape and must never feed display
/// logic — live spend always comes from the aggregation over records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BudgetFigure {
    pub spent: f64,
    pub total: f64,
}

/// Per-period budget figures, persisted as one JSON object keyed by period
/// name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BudgetBook {
    #[serde(rename = "Day")]
    pub day: BudgetFigure,
    #[serde(rename = "Week")]
    pub week: BudgetFigure,
    #[serde(rename = "Month")]
    pub month: BudgetFigure,
}

impl BudgetBook {
    /// Derives daily and weekly totals proportionally from one monthly
    /// figure. Every `spent` resets to zero: derivation never preserves
    /// stale spend.
    pub fn from_monthly(monthly_total: f64) -> Self {
        let figure = |total: f64| BudgetFigure {
            spent: 0.0,
            total: round2(total),
        };
        Self {
            day: figure(monthly_total / AVERAGE_DAYS_PER_MONTH),
            week: figure(monthly_total / WEEKS_PER_MONTH),
            month: figure(monthly_total),
        }
    }

    pub fn figure(&self, period: Period) -> BudgetFigure {
        match period {
            Period::Day => self.day,
            Period::Week => self.week,
            Period::Month => self.month,
        }
    }

    /// Overwrites a single period's total. The other periods keep their
    /// previous totals, so the book can drift out of proportion with the
    /// original monthly figure; resync only happens on the next
    /// [`from_monthly`] derivation.
    ///
    /// [`from_monthly`]: BudgetBook::from_monthly
    pub fn set_total(&mut self, period: Period, new_total: f64) {
        let figure = match period {
            Period::Day => &mut self.day,
            Period::Week => &mut self.week,
            Period::Month => &mut self.month,
        };
        figure.total = new_total;
    }

    /// Reads the stored book, or `None` when nothing usable is stored.
    pub fn load(kv: &dyn KeyValueStore) -> Option<Self> {
        let data = kv.get(BUDGET_KEY)?;
        match serde_json::from_str(&data) {
            Ok(book) => Some(book),
            Err(err) => {
                tracing::warn!(%err, "discarding corrupt budget data");
                None
            }
        }
    }

    pub fn save(&self, kv: &dyn KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => kv.set(BUDGET_KEY, &json),
            Err(err) => tracing::error!(%err, "failed to serialize budget data"),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
