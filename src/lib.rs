#![doc(test(attr(deny(warnings))))]

//! Spendy Core provides the record stores, period windows, and aggregation
//! primitives behind a personal expense and income tracker.

pub mod budget;
pub mod categories;
pub mod errors;
pub mod period;
pub mod prefs;
pub mod records;
pub mod storage;
pub mod summary;
pub mod trend;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Spendy Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
