use super::Selectors;
use crate::domain::{RecordSet, MAX_RECORDS};
use scraper::Html;

/// Extracts quotation rows from a static markup snapshot.
///
/// An empty result is a normal outcome, not an error: it covers both a
/// missing container and a container with no valid rows (header-only
/// markup, an in-flight render). The strategy chain treats both the same
/// way and moves on to the next technique.
pub struct SnapshotExtractor;

impl SnapshotExtractor {
    pub fn extract(&self, markup: &str, selectors: &Selectors) -> RecordSet {
        let document = Html::parse_document(markup);

        let container = document
            .select(&selectors.container_id)
            .next()
            .or_else(|| document.select(&selectors.container_class).next());

        let Some(container) = container else {
            return RecordSet::new();
        };

        let rows = container.select(&selectors.row).take(MAX_RECORDS).map(|row| {
            row.select(&selectors.cell)
                .map(|cell| cell.text().collect::<String>().trim().to_string())
                .collect::<Vec<String>>()
        });

        RecordSet::from_rows(rows)
    }
}
