use crate::domain::storage::{Storage, StorageKeys};
use crate::domain::Manifest;
use crate::error::Result;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Clone)]
pub struct FileSystemStore {
    data_dir: PathBuf,
}

impl FileSystemStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir)?;
        }
        Ok(())
    }
}

impl Storage for FileSystemStore {
    fn save_records(&self, manifest: &Manifest) -> Result<PathBuf> {
        self.ensure_dir()?;
        let timestamp = manifest.captured_at.timestamp();

        let csv_path = self
            .data_dir
            .join(format!("{}_{}.csv", StorageKeys::RECORDS_PREFIX, timestamp));
        let mut writer = csv::Writer::from_path(&csv_path)?;
        for record in &manifest.records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        // JSON copy carries the capture metadata alongside the rows
        let manifest_path = self
            .data_dir
            .join(format!("{}_{}.json", StorageKeys::RECORDS_PREFIX, timestamp));
        fs::write(&manifest_path, serde_json::to_string_pretty(manifest)?)?;

        info!("Wrote {} records to {:?}", manifest.total_records, csv_path);
        Ok(csv_path)
    }

    fn save_snapshot(&self, markup: &str) -> Result<PathBuf> {
        self.ensure_dir()?;
        let path = self
            .data_dir
            .join(format!("{}.html", StorageKeys::SNAPSHOT));
        fs::write(&path, markup)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceRecord;

    fn record(date: &str) -> PriceRecord {
        PriceRecord {
            quote_date: date.to_string(),
            bid: "2050.00".to_string(),
            ask: "2060.00".to_string(),
            international_price: "2050.00".to_string(),
            domestic_reference_price: "98,765".to_string(),
        }
    }

    #[test]
    fn writes_csv_with_schema_header_and_json_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSystemStore::new(dir.path());

        let manifest = Manifest::new(
            "https://example.com/prices".to_string(),
            vec![record("2024.01.02"), record("2024.01.03")],
        );
        let csv_path = store.save_records(&manifest).unwrap();

        let csv_content = fs::read_to_string(&csv_path).unwrap();
        let mut lines = csv_content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "quote_date,bid,ask,international_price,domestic_reference_price"
        );
        assert_eq!(lines.clone().count(), 2);
        assert!(lines.next().unwrap().starts_with("2024.01.02,"));

        let json_path = csv_path.with_extension("json");
        let roundtrip: Manifest =
            serde_json::from_str(&fs::read_to_string(json_path).unwrap()).unwrap();
        assert_eq!(roundtrip.total_records, 2);
        assert_eq!(roundtrip.records, manifest.records);
        assert_eq!(roundtrip.source, "https://example.com/prices");
    }

    #[test]
    fn snapshot_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSystemStore::new(dir.path());

        let path = store.save_snapshot("<html><body>archived</body></html>").unwrap();
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "<html><body>archived</body></html>"
        );
    }
}
