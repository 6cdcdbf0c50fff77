//! CSV ingestion.
//!
//! The first line is the header. The id and parent columns are required;
//! every other column is kept as an auxiliary field on the record. An empty
//! parent cell marks the root.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::node::Record;
use crate::error::DataLoadError;

/// Column names used to read records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnConfig {
    /// Header of the unique id column.
    pub id_column: String,
    /// Header of the parent id column.
    pub parent_column: String,
    /// Optional header whose value is used as the node label.
    pub label_column: Option<String>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            id_column: "id".to_string(),
            parent_column: "parentId".to_string(),
            label_column: None,
        }
    }
}

/// Parse CSV text into records.
pub fn parse_records(text: &str, columns: &ColumnConfig) -> Result<Vec<Record>, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataLoadError::MissingColumn(name.to_string()))
    };
    let id_idx = column(&columns.id_column)?;
    let parent_idx = column(&columns.parent_column)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.iter().all(str::is_empty) {
            continue;
        }

        let id = row.get(id_idx).unwrap_or_default();
        if id.is_empty() {
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            return Err(DataLoadError::MissingId { line });
        }

        let mut record = Record::new(id, row.get(parent_idx));
        for (i, (header, value)) in headers.iter().zip(row.iter()).enumerate() {
            if i != id_idx && i != parent_idx {
                record.fields.insert(header.to_string(), value.to_string());
            }
        }
        records.push(record);
    }

    if records.is_empty() {
        return Err(DataLoadError::Empty);
    }

    debug!(rows = records.len(), "parsed CSV records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let text = "id,parentId,name\nroot,,Root\nindustry1,root,Industry One\n";
        let records = parse_records(text, &ColumnConfig::default()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "root");
        assert_eq!(records[0].parent_id, None);
        assert_eq!(records[1].parent_id.as_deref(), Some("root"));
        assert_eq!(records[1].field("name"), Some("Industry One"));
        assert_eq!(records[1].field("id"), None);
    }

    #[test]
    fn test_whitespace_trimmed_and_blank_rows_skipped() {
        let text = "id , parentId\n root , \n\n a , root \n,\n";
        let records = parse_records(text, &ColumnConfig::default()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].parent_id, None);
        assert_eq!(records[1].id, "a");
        assert_eq!(records[1].parent_id.as_deref(), Some("root"));
    }

    #[test]
    fn test_custom_columns() {
        let columns = ColumnConfig {
            id_column: "key".to_string(),
            parent_column: "up".to_string(),
            label_column: Some("title".to_string()),
        };
        let text = "title,key,up\nTop,t,\nChild,c,t\n";
        let records = parse_records(text, &columns).unwrap();

        assert_eq!(records[1].id, "c");
        assert_eq!(records[1].label(columns.label_column.as_deref()), "Child");
    }

    #[test]
    fn test_missing_parent_column() {
        let err = parse_records("id,name\nroot,Root\n", &ColumnConfig::default()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn(ref c) if c == "parentId"));
    }

    #[test]
    fn test_header_only_is_empty() {
        let err = parse_records("id,parentId\n", &ColumnConfig::default()).unwrap_err();
        assert!(matches!(err, DataLoadError::Empty));
    }

    #[test]
    fn test_missing_id_reports_line() {
        let err =
            parse_records("id,parentId\nroot,\n,root\n", &ColumnConfig::default()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingId { line: 3 }));
    }

    #[test]
    fn test_ragged_row_is_csv_error() {
        let err =
            parse_records("id,parentId\nroot,,extra\n", &ColumnConfig::default()).unwrap_err();
        assert!(matches!(err, DataLoadError::Csv(_)));
    }
}
