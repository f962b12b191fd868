mod manifest;
mod record;
pub(crate) mod storage;

pub use manifest::Manifest;
pub use record::{PriceRecord, RawRow, RecordSet, MAX_RECORDS};
