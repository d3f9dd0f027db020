use crate::{error::{Result, SearchError},
            table::record::Field};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// Column arrangements seen across the court-system deployments behind the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Layout {
    /// Nine cells, no row-index column, full field set
    Plain9,
    /// Row-index column followed by eight cells without CreditorClaimDue
    Indexed9,
    /// Eight cells, no row-index column, no CreditorClaimDue
    Plain8,
    /// Row-index column followed by the full field set
    Indexed10,
}

impl Layout {
    pub fn has_index_column(self) -> bool {
        matches!(self, Layout::Indexed9 | Layout::Indexed10)
    }

    pub fn has_creditor_claim_due(self) -> bool {
        matches!(self, Layout::Plain9 | Layout::Indexed10)
    }

    /// Build the schema a jurisdiction using this layout reads its rows with
    pub fn schema(self, jurisdiction_id: impl Into<String>) -> Schema {
        let mut field_index_map = IndexMap::new();
        let mut absent_fields = IndexSet::new();
        let mut column = usize::from(self.has_index_column());

        for field in Field::ALL {
            if field == Field::CreditorClaimDue && !self.has_creditor_claim_due() {
                absent_fields.insert(field);
                continue;
            }
            field_index_map.insert(field, column);
            column += 1;
        }

        Schema {
            jurisdiction_id: jurisdiction_id.into(),
            expected_cell_count: column,
            field_index_map,
            absent_fields,
        }
    }
}

/// How one jurisdiction's result rows map onto [`Field`]s
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    jurisdiction_id: String,
    expected_cell_count: usize,
    field_index_map: IndexMap<Field, usize>,
    absent_fields: IndexSet<Field>,
}

impl Schema {
    pub fn jurisdiction_id(&self) -> &str {
        &self.jurisdiction_id
    }

    /// Rows with any other cell count are not records
    pub fn expected_cell_count(&self) -> usize {
        self.expected_cell_count
    }

    /// Column holding `field`, `None` for absent fields
    pub fn column(&self, field: Field) -> Option<usize> {
        self.field_index_map.get(&field).copied()
    }

    pub fn field_index_map(&self) -> &IndexMap<Field, usize> {
        &self.field_index_map
    }

    /// Fields this jurisdiction never renders; always exported as ""
    pub fn absent_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.absent_fields.iter().copied()
    }

    pub fn is_absent(&self, field: Field) -> bool {
        self.absent_fields.contains(&field)
    }
}

/// Jurisdictions with a known results layout, keyed by the site's selector text.
/// Greenwood, Saluda and York are offered by the site but have no known layout.
const STANDARD_JURISDICTIONS: &[(&str, Layout)] = &[
    ("Aiken", Layout::Plain9),
    ("Bamberg", Layout::Indexed10),
    ("Barnwell", Layout::Plain8),
    ("Beaufort", Layout::Plain8),
    ("Charleston Probate", Layout::Indexed10),
    ("Cherokee", Layout::Indexed10),
    ("Chester", Layout::Indexed9),
    ("Colleton", Layout::Indexed10),
    ("Dorchester Probate", Layout::Indexed9),
    ("Florence", Layout::Indexed10),
    ("Georgetown", Layout::Indexed10),
    ("Jasper", Layout::Plain8),
    ("Kershaw", Layout::Indexed10),
    ("Lancaster", Layout::Indexed10),
    ("Marlboro", Layout::Indexed10),
    ("Newberry", Layout::Indexed10),
    ("Oconee", Layout::Indexed10),
    ("Orangeburg", Layout::Indexed10),
    ("Sumter", Layout::Indexed10),
];

/// Closed table of jurisdiction layouts
///
/// Built once, then only read. Adding a jurisdiction is one more entry, never a new code path.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: IndexMap<String, Schema>,
}

impl SchemaRegistry {
    /// Registry covering every jurisdiction with a known layout
    pub fn standard() -> Self {
        Self::from_entries(STANDARD_JURISDICTIONS.iter().copied())
    }

    /// Build a registry from `(jurisdiction id, layout)` pairs; later duplicates win
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Layout)>,
        S: Into<String>,
    {
        let schemas = entries
            .into_iter()
            .map(|(id, layout)| {
                let id = id.into();
                let schema = layout.schema(id.clone());
                (id, schema)
            })
            .collect();

        Self { schemas }
    }

    /// Schema for a resolved jurisdiction id
    pub fn lookup(&self, jurisdiction_id: &str) -> Result<&Schema> {
        self.schemas
            .get(jurisdiction_id)
            .ok_or_else(|| SearchError::SchemaNotFound(jurisdiction_id.to_string()))
    }

    pub fn contains(&self, jurisdiction_id: &str) -> bool {
        self.schemas.contains_key(jurisdiction_id)
    }

    /// Registered jurisdiction ids in registration order
    pub fn jurisdictions(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_standard_schema_has_known_width() {
        let registry = SchemaRegistry::standard();
        assert_eq!(registry.len(), STANDARD_JURISDICTIONS.len());

        for id in registry.jurisdictions() {
            let schema = registry.lookup(id).unwrap();
            assert!(
                [8, 9, 10].contains(&schema.expected_cell_count()),
                "{} has {} cells",
                id,
                schema.expected_cell_count()
            );
            assert_eq!(schema.jurisdiction_id(), id);
        }
    }

    #[test]
    fn test_plain9_reads_columns_from_zero() {
        let schema = Layout::Plain9.schema("Aiken");

        assert_eq!(schema.expected_cell_count(), 9);
        assert_eq!(schema.column(Field::CaseNumber), Some(0));
        assert_eq!(schema.column(Field::CreditorClaimDue), Some(7));
        assert_eq!(schema.column(Field::CaseStatus), Some(8));
        assert_eq!(schema.absent_fields().count(), 0);
    }

    #[test]
    fn test_indexed9_skips_index_column_and_claim_due() {
        let schema = Layout::Indexed9.schema("Chester");

        assert_eq!(schema.expected_cell_count(), 9);
        assert_eq!(schema.column(Field::CaseNumber), Some(1));
        assert_eq!(schema.column(Field::AppointmentDate), Some(7));
        assert_eq!(schema.column(Field::CreditorClaimDue), None);
        assert_eq!(schema.column(Field::CaseStatus), Some(8));
        assert!(schema.is_absent(Field::CreditorClaimDue));
    }

    #[test]
    fn test_plain8_has_no_claim_due() {
        let schema = Layout::Plain8.schema("Jasper");

        assert_eq!(schema.expected_cell_count(), 8);
        assert_eq!(schema.column(Field::CaseNumber), Some(0));
        assert_eq!(schema.column(Field::CaseStatus), Some(7));
        assert_eq!(schema.absent_fields().collect::<Vec<_>>(), vec![Field::CreditorClaimDue]);
    }

    #[test]
    fn test_indexed10_full_field_set() {
        let schema = Layout::Indexed10.schema("Sumter");

        assert_eq!(schema.expected_cell_count(), 10);
        assert_eq!(schema.column(Field::CaseNumber), Some(1));
        assert_eq!(schema.column(Field::CreditorClaimDue), Some(8));
        assert_eq!(schema.column(Field::CaseStatus), Some(9));
        assert_eq!(schema.field_index_map().len(), 9);
    }

    #[test]
    fn test_lookup_by_selector_text() {
        let registry = SchemaRegistry::standard();

        let charleston = registry.lookup("Charleston Probate").unwrap();
        assert_eq!(charleston.expected_cell_count(), 10);

        let dorchester = registry.lookup("Dorchester Probate").unwrap();
        assert!(dorchester.is_absent(Field::CreditorClaimDue));
    }

    #[test]
    fn test_unknown_jurisdiction_is_schema_not_found() {
        let registry = SchemaRegistry::standard();

        for id in ["York", "Greenwood", "Saluda", "Charleston", ""] {
            match registry.lookup(id) {
                Err(SearchError::SchemaNotFound(name)) => assert_eq!(name, id),
                other => panic!("expected SchemaNotFound for {:?}, got {:?}", id, other),
            }
        }
    }

    #[test]
    fn test_from_entries_preserves_order() {
        let registry = SchemaRegistry::from_entries(vec![("Zeta", Layout::Plain8), ("Alpha", Layout::Plain9)]);
        assert_eq!(registry.jurisdictions().collect::<Vec<_>>(), vec!["Zeta", "Alpha"]);
        assert!(registry.contains("Alpha"));
        assert!(!registry.contains("Beta"));
    }
}
