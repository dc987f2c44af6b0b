//! Persisted user selections: display currency and the active budget period.

use std::sync::Arc;

use crate::{period::Period, storage::KeyValueStore};

pub const CURRENCY_CODE_KEY: &str = "selectedCurrencyCode";
pub const CURRENCY_SYMBOL_KEY: &str = "selectedCurrencySymbol";
pub const SELECTED_PERIOD_KEY: &str = "selectedPeriod";

const DEFAULT_CURRENCY_CODE: &str = "USD";
const DEFAULT_CURRENCY_SYMBOL: &str = "$";

pub struct Preferences {
    currency_code: String,
    currency_symbol: String,
    selected_period: Period,
    kv: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn load(kv: Arc<dyn KeyValueStore>) -> Self {
        let currency_code = kv
            .get(CURRENCY_CODE_KEY)
            .unwrap_or_else(|| DEFAULT_CURRENCY_CODE.to_string());
        let currency_symbol = kv
            .get(CURRENCY_SYMBOL_KEY)
            .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string());
        let selected_period = kv
            .get(SELECTED_PERIOD_KEY)
            .as_deref()
            .and_then(Period::parse)
            .unwrap_or(Period::Month);
        Self {
            currency_code,
            currency_symbol,
            selected_period,
            kv,
        }
    }

    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn selected_period(&self) -> Period {
        self.selected_period
    }

    pub fn set_currency(&mut self, code: impl Into<String>, symbol: impl Into<String>) {
        self.currency_code = code.into();
        self.currency_symbol = symbol.into();
        self.kv.set(CURRENCY_CODE_KEY, &self.currency_code);
        self.kv.set(CURRENCY_SYMBOL_KEY, &self.currency_symbol);
    }

    pub fn set_selected_period(&mut self, period: Period) {
        self.selected_period = period;
        self.kv.set(SELECTED_PERIOD_KEY, period.as_str());
    }
}
