use crate::{error::{Result, SearchError},
            table::SchemaRegistry};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Display names whose selector text on the site differs from the name itself
const JURISDICTION_ALIASES: &[(&str, &str)] = &[
    ("Charleston", "Charleston Probate"),
    ("Dorchester", "Dorchester Probate"),
];

/// Selector text for a caller-facing jurisdiction name; unaliased names pass through
pub fn resolve_alias(display_name: &str) -> &str {
    JURISDICTION_ALIASES
        .iter()
        .find(|(name, _)| *name == display_name)
        .map_or(display_name, |(_, id)| *id)
}

/// Caller-facing name for a selector text, the inverse of [`resolve_alias`]
pub fn display_name(jurisdiction_id: &str) -> &str {
    JURISDICTION_ALIASES
        .iter()
        .find(|(_, id)| *id == jurisdiction_id)
        .map_or(jurisdiction_id, |(name, _)| *name)
}

/// Caller-facing names of every jurisdiction the registry can read
pub fn display_names(registry: &SchemaRegistry) -> impl Iterator<Item = &str> {
    registry.jurisdictions().map(display_name)
}

/// Record families the probate index can search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordType {
    #[default]
    Estate,
    /// Listed by the site; no results layout is known for it
    Marriage,
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::Estate => f.write_str("Estate"),
            RecordType::Marriage => f.write_str("Marriage"),
        }
    }
}

impl FromStr for RecordType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "estate" => Ok(RecordType::Estate),
            "marriage" => Ok(RecordType::Marriage),
            _ => Err(SearchError::InvalidQuery(format!(
                "unknown record type '{}', expected Estate or Marriage",
                s
            ))),
        }
    }
}

/// The name inputs of the search form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePart {
    Last,
    First,
    Middle,
}

/// One search to submit: a jurisdiction plus optional name criteria
///
/// Name parts may contain the site's `%` wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetQuery {
    pub jurisdiction_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub record_type: RecordType,
}

impl TargetQuery {
    /// Estate search in the given jurisdiction, no name criteria yet
    pub fn estate(jurisdiction_id: impl Into<String>) -> Self {
        Self {
            jurisdiction_id: jurisdiction_id.into(),
            last_name: None,
            first_name: None,
            middle_name: None,
            record_type: RecordType::Estate,
        }
    }

    /// Builder method: set last (or business) name
    pub fn with_last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = Some(name.into());
        self
    }

    /// Builder method: set first name
    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    /// Builder method: set middle name
    pub fn with_middle_name(mut self, name: impl Into<String>) -> Self {
        self.middle_name = Some(name.into());
        self
    }

    /// Builder method: set record type
    pub fn with_record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = record_type;
        self
    }

    /// Jurisdiction id as the site's selector knows it
    pub fn resolved_jurisdiction(&self) -> &str {
        resolve_alias(&self.jurisdiction_id)
    }

    /// Name criteria that carry text, in form order, exactly as given
    pub fn name_parts(&self) -> impl Iterator<Item = (NamePart, &str)> {
        [
            (NamePart::Last, &self.last_name),
            (NamePart::First, &self.first_name),
            (NamePart::Middle, &self.middle_name),
        ]
        .into_iter()
        .filter_map(|(part, value)| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| (part, v))
        })
    }

    /// Reject queries the core cannot run
    pub fn validate(&self) -> Result<()> {
        if self.record_type != RecordType::Estate {
            return Err(SearchError::UnsupportedRecordType(self.record_type.to_string()));
        }
        if self.jurisdiction_id.trim().is_empty() {
            return Err(SearchError::InvalidQuery("no jurisdiction given".to_string()));
        }
        if self.name_parts().next().is_none() {
            return Err(SearchError::InvalidQuery(format!(
                "search in '{}' needs at least a last, first or middle name",
                self.jurisdiction_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_resolve() {
        assert_eq!(resolve_alias("Charleston"), "Charleston Probate");
        assert_eq!(resolve_alias("Dorchester"), "Dorchester Probate");
        assert_eq!(resolve_alias("Aiken"), "Aiken");
        assert_eq!(resolve_alias("Charleston Probate"), "Charleston Probate");
        assert_eq!(resolve_alias("charleston"), "charleston");
    }

    #[test]
    fn test_display_name_inverts_alias() {
        assert_eq!(display_name("Charleston Probate"), "Charleston");
        assert_eq!(display_name("Dorchester Probate"), "Dorchester");
        assert_eq!(display_name("Sumter"), "Sumter");
    }

    #[test]
    fn test_display_names_round_trip_through_registry() {
        let registry = SchemaRegistry::standard();
        let names: Vec<&str> = display_names(&registry).collect();

        assert!(names.contains(&"Charleston"));
        assert!(!names.contains(&"Charleston Probate"));
        for name in names {
            assert!(registry.contains(resolve_alias(name)), "{} does not resolve", name);
        }
    }

    #[test]
    fn test_record_type_parse() {
        assert_eq!("Estate".parse::<RecordType>().unwrap(), RecordType::Estate);
        assert_eq!("marriage".parse::<RecordType>().unwrap(), RecordType::Marriage);
        assert!(matches!("Deed".parse::<RecordType>(), Err(SearchError::InvalidQuery(_))));
    }

    #[test]
    fn test_name_parts_skip_blank() {
        let query = TargetQuery::estate("Aiken")
            .with_last_name("Sm%")
            .with_first_name("   ")
            .with_middle_name("Lee");

        let parts: Vec<_> = query.name_parts().collect();
        assert_eq!(parts, vec![(NamePart::Last, "Sm%"), (NamePart::Middle, "Lee")]);
    }

    #[test]
    fn test_name_parts_keep_surrounding_whitespace() {
        let query = TargetQuery::estate("Aiken").with_last_name(" Smith ");

        let parts: Vec<_> = query.name_parts().collect();
        assert_eq!(parts, vec![(NamePart::Last, " Smith ")]);
    }

    #[test]
    fn test_validate() {
        assert!(TargetQuery::estate("Aiken").with_last_name("Smith").validate().is_ok());

        let marriage = TargetQuery::estate("Aiken")
            .with_last_name("Smith")
            .with_record_type(RecordType::Marriage);
        assert!(matches!(marriage.validate(), Err(SearchError::UnsupportedRecordType(t)) if t == "Marriage"));

        let no_names = TargetQuery::estate("Aiken").with_first_name("");
        assert!(matches!(no_names.validate(), Err(SearchError::InvalidQuery(_))));

        let no_county = TargetQuery::estate(" ").with_last_name("Smith");
        assert!(matches!(no_county.validate(), Err(SearchError::InvalidQuery(_))));
    }

    #[test]
    fn test_deserialize_defaults_to_estate() {
        let query: TargetQuery = serde_json::from_value(serde_json::json!({
            "jurisdiction_id": "Charleston",
            "last_name": "Rivers"
        }))
        .unwrap();

        assert_eq!(query.record_type, RecordType::Estate);
        assert_eq!(query.resolved_jurisdiction(), "Charleston Probate");
        assert_eq!(query.first_name, None);
    }
}
