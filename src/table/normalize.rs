use crate::{progress::Progress,
            table::{record::{Field, Record},
                    schema::Schema}};

/// Map one raw row onto the canonical record, or `None` when the row is not a record
///
/// Only rows with exactly the schema's cell count are records; header fragments,
/// pager remnants and any other short or long row are skipped without error.
pub fn normalize(row: &[String], schema: &Schema) -> Option<Record> {
    if row.len() != schema.expected_cell_count() {
        return None;
    }

    let mut record = Record::default();
    for field in Field::ALL {
        if schema.is_absent(field) {
            continue;
        }
        if let Some(cell) = schema.column(field).and_then(|column| row.get(column)) {
            record.set(field, cell.as_str());
        }
    }

    Some(record)
}

/// Normalizes rows for one schema and ticks progress for each accepted record
pub struct RowNormalizer<'a> {
    schema: &'a Schema,
    progress: &'a mut dyn Progress,
}

impl<'a> RowNormalizer<'a> {
    pub fn new(schema: &'a Schema, progress: &'a mut dyn Progress) -> Self {
        Self { schema, progress }
    }

    pub fn normalize(&mut self, row: &[String]) -> Option<Record> {
        let record = normalize(row, self.schema)?;
        self.progress.advance();
        Some(record)
    }
}
