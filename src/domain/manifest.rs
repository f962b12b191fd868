use crate::domain::PriceRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub source: String,
    pub captured_at: DateTime<Utc>,
    pub total_records: usize,
    pub records: Vec<PriceRecord>,
    pub version: String,
}

impl Manifest {
    pub fn new(source: String, records: Vec<PriceRecord>) -> Self {
        Self {
            source,
            captured_at: Utc::now(),
            total_records: records.len(),
            records,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
