//! Category and income-source icon tables.

use std::{collections::HashMap, sync::Arc};

use crate::{storage::KeyValueStore, summary::IconLookup};

pub const CUSTOM_CATEGORIES_KEY: &str = "createdCustomCategories";
pub const INCOME_SOURCES_KEY: &str = "incomeCategoryIcons";

/// Built-in expense categories and their icons.
pub const MASTER_CATEGORIES: [(&str, &str); 7] = [
    ("Dining", "🍕"),
    ("Groceries", "🛒"),
    ("Rent", "🏠"),
    ("Transport", "🚗"),
    ("Entertainment", "🎥"),
    ("Utilities", "💡"),
    ("Shopping", "🛍️"),
];

/// Built-in income sources and their icons.
pub const DEFAULT_INCOME_SOURCES: [(&str, &str); 5] = [
    ("Salary", "💰"),
    ("Freelance", "💼"),
    ("Gifts", "🎁"),
    ("Investments", "📈"),
    ("Other", "🪙"),
];

/// Owns the master icon table, the user's custom categories, and the income
/// source icons. Custom and income tables are persisted; the master table is
/// compiled in. Icon resolution is an ordered chain: master table first,
/// then custom, then the caller's fallback.
pub struct CategoryCatalog {
    master: HashMap<String, String>,
    custom: HashMap<String, String>,
    income: HashMap<String, String>,
    kv: Arc<dyn KeyValueStore>,
}

impl CategoryCatalog {
    pub fn load(kv: Arc<dyn KeyValueStore>) -> Self {
        let master = MASTER_CATEGORIES
            .iter()
            .map(|(name, emoji)| (name.to_string(), emoji.to_string()))
            .collect();
        let custom = load_table(kv.as_ref(), CUSTOM_CATEGORIES_KEY).unwrap_or_default();
        let income = load_table(kv.as_ref(), INCOME_SOURCES_KEY).unwrap_or_else(|| {
            DEFAULT_INCOME_SOURCES
                .iter()
                .map(|(name, emoji)| (name.to_string(), emoji.to_string()))
                .collect()
        });
        Self {
            master,
            custom,
            income,
            kv,
        }
    }

    /// Registers a user-created category and persists the custom table.
    pub fn add_custom(&mut self, name: impl Into<String>, emoji: impl Into<String>) {
        self.custom.insert(name.into(), emoji.into());
        save_table(self.kv.as_ref(), CUSTOM_CATEGORIES_KEY, &self.custom);
    }

    /// Registers an income source and persists the income table.
    pub fn add_income_source(&mut self, name: impl Into<String>, emoji: impl Into<String>) {
        self.income.insert(name.into(), emoji.into());
        save_table(self.kv.as_ref(), INCOME_SOURCES_KEY, &self.income);
    }

    pub fn income_icon(&self, name: &str) -> Option<&str> {
        self.income.get(name).map(String::as_str)
    }

    pub fn custom_categories(&self) -> &HashMap<String, String> {
        &self.custom
    }
}

impl IconLookup for CategoryCatalog {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.master
            .get(name)
            .or_else(|| self.custom.get(name))
            .map(String::as_str)
    }
}

fn load_table(kv: &dyn KeyValueStore, key: &str) -> Option<HashMap<String, String>> {
    let data = kv.get(key)?;
    match serde_json::from_str(&data) {
        Ok(table) => Some(table),
        Err(err) => {
            tracing::warn!(key, %err, "discarding corrupt icon table");
            None
        }
    }
}

fn save_table(kv: &dyn KeyValueStore, key: &str, table: &HashMap<String, String>) {
    match serde_json::to_string(table) {
        Ok(json) => kv.set(key, &json),
        Err(err) => tracing::error!(key, %err, "failed to serialize icon table"),
    }
}
