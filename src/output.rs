use crate::{error::Result,
            table::{Field, Record}};
use std::{fs::File, io::Write, path::Path};

/// Write records as CSV with the canonical header row, even when there are no records
pub fn write_csv<'r, W, I>(writer: W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'r Record>,
{
    let mut csv = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    csv.write_record(Field::ALL.map(Field::name))?;
    for record in records {
        csv.serialize(record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write the records to it
pub fn save_csv<'r, I>(path: impl AsRef<Path>, records: I) -> Result<()>
where
    I: IntoIterator<Item = &'r Record>,
{
    let file = File::create(path.as_ref())?;
    write_csv(file, records)?;
    log::debug!("Wrote {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RecordSet;

    fn record(case: &str, name: &str) -> Record {
        Record {
            case_number: case.to_string(),
            case_name: name.to_string(),
            party: "Doe, Jane".to_string(),
            case_type: "Estate".to_string(),
            filing_date: "01/02/2024".to_string(),
            county: "Aiken".to_string(),
            appointment_date: "01/15/2024".to_string(),
            creditor_claim_due: String::new(),
            case_status: "Open".to_string(),
        }
    }

    #[test]
    fn test_header_row() {
        let mut out = Vec::new();
        write_csv(&mut out, &RecordSet::new()).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap().trim_end(),
            "CaseNumber,CaseName,Party,CaseType,FilingDate,County,AppointmentDate,CreditorClaimDue,CaseStatus"
        );
    }

    #[test]
    fn test_rows_in_order_with_quoting() {
        let mut set = RecordSet::new();
        set.extend(vec![
            record("2024ES0200001", "Estate of Jane Doe"),
            record("2024ES0200002", "Doe, John \"Jack\""),
        ]);

        let mut out = Vec::new();
        write_csv(&mut out, &set).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "2024ES0200001,Estate of Jane Doe,\"Doe, Jane\",Estate,01/02/2024,Aiken,01/15/2024,,Open"
        );
        assert!(lines[2].starts_with("2024ES0200002,\"Doe, John \"\"Jack\"\"\","));
    }

    #[test]
    fn test_save_csv_creates_file() {
        let path = std::env::temp_dir().join(format!("probate-search-{}.csv", std::process::id()));
        save_csv(&path, &[record("C1", "N1")]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(text.starts_with("CaseNumber,"));
        assert!(text.contains("C1,N1,"));
    }
}
