use serde::{Deserialize, Serialize};

/// Extraction stops accepting rows once this many have been collected.
pub const MAX_RECORDS: usize = 100;

const FIELD_COUNT: usize = 5;

/// One table row as the extractors hand it over: an ordered sequence of
/// cell texts, not yet validated against the record schema.
pub type RawRow = Vec<String>;

/// One quotation event. Numeric fields keep their raw textual form
/// (separators included); parsing them is a downstream concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub quote_date: String,
    pub bid: String,
    pub ask: String,
    /// Quoted per troy ounce in USD.
    pub international_price: String,
    /// Quoted per gram in local currency.
    pub domestic_reference_price: String,
}

impl PriceRecord {
    /// Validates a raw row into a record. Cells 0..4 map positionally to
    /// the five fields; the row is dropped when it is short or any of the
    /// first five cells is blank after trimming.
    pub fn from_cells(cells: &[String]) -> Option<Self> {
        if cells.len() < FIELD_COUNT {
            return None;
        }

        let trimmed: Vec<&str> = cells[..FIELD_COUNT].iter().map(|c| c.trim()).collect();
        if trimmed.iter().any(|c| c.is_empty()) {
            return None;
        }

        Some(Self {
            quote_date: trimmed[0].to_string(),
            bid: trimmed[1].to_string(),
            ask: trimmed[2].to_string(),
            international_price: trimmed[3].to_string(),
            domestic_reference_price: trimmed[4].to_string(),
        })
    }
}

/// Ordered, capacity-bounded set of accepted records. Insertion order is
/// DOM row order; the top of the table is the first element.
#[derive(Debug, Default)]
pub struct RecordSet {
    records: Vec<PriceRecord>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates each row in order, silently dropping malformed ones,
    /// until the cap is reached.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut set = Self::new();
        for row in rows {
            if set.is_full() {
                break;
            }
            if let Some(record) = PriceRecord::from_cells(&row) {
                set.records.push(record);
            }
        }
        set
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= MAX_RECORDS
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<PriceRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> RawRow {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn accepts_five_cells_and_trims() {
        let record = PriceRecord::from_cells(&row(&[
            " 2024.01.02 ",
            "2050.00",
            "2060.00",
            "2050.00",
            " 98,765 ",
        ]))
        .unwrap();

        assert_eq!(record.quote_date, "2024.01.02");
        assert_eq!(record.bid, "2050.00");
        assert_eq!(record.ask, "2060.00");
        assert_eq!(record.international_price, "2050.00");
        assert_eq!(record.domestic_reference_price, "98,765");
    }

    #[test]
    fn extra_cells_beyond_the_fifth_are_ignored() {
        let record = PriceRecord::from_cells(&row(&[
            "2024.01.02",
            "2050.00",
            "2060.00",
            "2050.00",
            "98,765",
            "extra",
        ]))
        .unwrap();
        assert_eq!(record.domestic_reference_price, "98,765");
    }

    #[test]
    fn rejects_short_rows() {
        assert!(PriceRecord::from_cells(&row(&["2024.01.02", "2050.00"])).is_none());
        assert!(PriceRecord::from_cells(&[]).is_none());
    }

    #[test]
    fn rejects_blank_required_cells() {
        assert!(PriceRecord::from_cells(&row(&[
            "2024.01.02",
            "   ",
            "2060.00",
            "2050.00",
            "98,765",
        ]))
        .is_none());
    }

    #[test]
    fn record_set_drops_malformed_rows_and_keeps_order() {
        let set = RecordSet::from_rows(vec![
            row(&["2024.01.02", "2050.00", "2060.00", "2050.00", "98,765"]),
            row(&["too", "short"]),
            row(&["2024.01.03", "2051.00", "2061.00", "2051.00", "98,800"]),
        ]);

        assert_eq!(set.len(), 2);
        assert_eq!(set.records()[0].quote_date, "2024.01.02");
        assert_eq!(set.records()[1].quote_date, "2024.01.03");
    }

    #[test]
    fn record_set_never_exceeds_the_cap() {
        let rows: Vec<RawRow> = (0..150)
            .map(|i| {
                vec![
                    format!("2024.01.{:02}", i % 28 + 1),
                    "2050.00".to_string(),
                    "2060.00".to_string(),
                    "2050.00".to_string(),
                    "98,765".to_string(),
                ]
            })
            .collect();

        let set = RecordSet::from_rows(rows);
        assert_eq!(set.len(), MAX_RECORDS);
    }
}
