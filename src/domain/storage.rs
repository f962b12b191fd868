use crate::domain::Manifest;
use crate::error::Result;
use std::path::PathBuf;

pub trait Storage: Send + Sync {
    /// Writes the complete ordered record set once, after a successful run.
    fn save_records(&self, manifest: &Manifest) -> Result<PathBuf>;
    /// Archives raw page markup so a failed run can be retried offline.
    fn save_snapshot(&self, markup: &str) -> Result<PathBuf>;
}

pub struct StorageKeys;

impl StorageKeys {
    pub const RECORDS_PREFIX: &'static str = "gold_prices";
    pub const SNAPSHOT: &'static str = "last_snapshot";
}
