use std::collections::HashMap;

use super::column_map::ColumnMap;
use crate::errors::Error;

/// A parsed sheet: CSV records with headers resolved to canonical field
/// names through a [`ColumnMap`]. Unmapped columns are simply unreachable.
pub(crate) struct SheetRows {
    field_index: HashMap<String, usize>,
    records: Vec<csv::StringRecord>,
}

impl SheetRows {
    pub(crate) fn parse(text: &str, columns: &ColumnMap) -> Result<Self, Error> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(text.as_bytes());
        let mut field_index = HashMap::new();
        for (i, header) in reader.headers()?.iter().enumerate() {
            if let Some(field) = columns.resolve(header) {
                // First mapped column wins on duplicates.
                field_index.entry(field.to_string()).or_insert(i);
            }
        }
        let records = reader.records().collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            field_index,
            records,
        })
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.records.iter().map(move |record| Row {
            sheet: self,
            record,
        })
    }
}

pub(crate) struct Row<'a> {
    sheet: &'a SheetRows,
    record: &'a csv::StringRecord,
}

impl<'a> Row<'a> {
    /// Non-empty cell for the canonical field, if the column exists.
    pub(crate) fn get(&self, field: &str) -> Option<&'a str> {
        self.sheet
            .field_index
            .get(field)
            .and_then(|i| self.record.get(*i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub(crate) fn text(&self, field: &str) -> &'a str {
        self.get(field).unwrap_or("")
    }
}
