//! Financial records and the stores that own them.

pub mod record;
pub mod store;

pub use record::{parse_record_date, validate_draft, Amount, Record, RecordDraft};
pub use store::{RecordStore, EXPENSES_KEY, INCOMES_KEY};
