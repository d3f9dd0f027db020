use serde::{Deserialize, Serialize};
use std::fmt;

/// The nine canonical columns every jurisdiction layout is mapped into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    CaseNumber,
    CaseName,
    Party,
    CaseType,
    FilingDate,
    County,
    AppointmentDate,
    CreditorClaimDue,
    CaseStatus,
}

impl Field {
    /// All fields in export order
    pub const ALL: [Field; 9] = [
        Field::CaseNumber,
        Field::CaseName,
        Field::Party,
        Field::CaseType,
        Field::FilingDate,
        Field::County,
        Field::AppointmentDate,
        Field::CreditorClaimDue,
        Field::CaseStatus,
    ];

    /// Column heading used in exports
    pub fn name(self) -> &'static str {
        match self {
            Field::CaseNumber => "CaseNumber",
            Field::CaseName => "CaseName",
            Field::Party => "Party",
            Field::CaseType => "CaseType",
            Field::FilingDate => "FilingDate",
            Field::County => "County",
            Field::AppointmentDate => "AppointmentDate",
            Field::CreditorClaimDue => "CreditorClaimDue",
            Field::CaseStatus => "CaseStatus",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One probate case in canonical form
///
/// Values are the cell texts as rendered by the site; nothing is parsed or validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    pub case_number: String,
    pub case_name: String,
    pub party: String,
    pub case_type: String,
    pub filing_date: String,
    pub county: String,
    pub appointment_date: String,
    pub creditor_claim_due: String,
    pub case_status: String,
}

impl Record {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::CaseNumber => &self.case_number,
            Field::CaseName => &self.case_name,
            Field::Party => &self.party,
            Field::CaseType => &self.case_type,
            Field::FilingDate => &self.filing_date,
            Field::County => &self.county,
            Field::AppointmentDate => &self.appointment_date,
            Field::CreditorClaimDue => &self.creditor_claim_due,
            Field::CaseStatus => &self.case_status,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::CaseNumber => &mut self.case_number,
            Field::CaseName => &mut self.case_name,
            Field::Party => &mut self.party,
            Field::CaseType => &mut self.case_type,
            Field::FilingDate => &mut self.filing_date,
            Field::County => &mut self.county,
            Field::AppointmentDate => &mut self.appointment_date,
            Field::CreditorClaimDue => &mut self.creditor_claim_due,
            Field::CaseStatus => &mut self.case_status,
        };
        *slot = value.into();
    }

    /// Field values in export order
    pub fn values(&self) -> [&str; 9] {
        Field::ALL.map(|field| self.get(field))
    }
}

/// Records collected over a whole run, in target, page, then row order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one target's records after everything collected so far
    pub fn extend(&mut self, records: impl IntoIterator<Item = Record>) {
        self.records.extend(records);
    }

    /// Number of accepted records
    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
