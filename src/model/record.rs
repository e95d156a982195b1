//! Rows and datasets

use super::cell::CellValue;
use crate::error::{BricksError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A row the table can display. The id is what selection reports.
pub trait Record {
    fn id(&self) -> &str;

    /// Value of a field, `CellValue::Empty` when the row has none
    fn field(&self, key: &str) -> CellValue;
}

/// General-purpose record: an id plus named fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRow {
    pub id: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, CellValue>,
}

impl DataRow {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

impl Record for DataRow {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> CellValue {
        if key == "id" {
            return CellValue::from(self.id.as_str());
        }
        self.fields.get(key).cloned().unwrap_or_default()
    }
}

/// Rows loaded from a file, with field names in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub fields: Vec<String>,
    pub rows: Vec<DataRow>,
}

impl Dataset {
    /// Load a `.csv` or `.json` file
    pub fn load(path: &Path) -> Result<Dataset> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let dataset = match extension.as_str() {
            "csv" => Self::from_csv_reader(File::open(path)?)?,
            "json" => {
                let mut contents = String::new();
                File::open(path)?.read_to_string(&mut contents)?;
                Self::from_json_str(&contents)?
            }
            other => return Err(BricksError::UnsupportedFormat(other.to_string())),
        };

        tracing::info!(
            path = %path.display(),
            rows = dataset.rows.len(),
            fields = dataset.fields.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// CSV with a header row. One column must be named `id`.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
        let fields: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
        let id_index = fields
            .iter()
            .position(|f| f == "id")
            .ok_or(BricksError::MissingIdColumn)?;

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let id = record.get(id_index).map(str::trim).unwrap_or_default();
            if id.is_empty() {
                return Err(BricksError::MissingRowId(index));
            }

            let mut row = DataRow::new(id);
            for (i, (name, raw)) in fields.iter().zip(record.iter()).enumerate() {
                if i != id_index {
                    row.fields.insert(name.clone(), CellValue::from_raw(raw));
                }
            }
            rows.push(row);
        }

        Ok(Dataset { fields, rows })
    }

    /// JSON array of objects, each with a string or numeric `id`
    pub fn from_json_str(contents: &str) -> Result<Dataset> {
        let objects: Vec<serde_json::Map<String, serde_json::Value>> =
            serde_json::from_str(contents)?;

        let mut fields = vec!["id".to_string()];
        let mut rows = Vec::with_capacity(objects.len());

        for (index, object) in objects.into_iter().enumerate() {
            let id = match object.get("id") {
                Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
                Some(serde_json::Value::Number(n)) => n.to_string(),
                _ => return Err(BricksError::MissingRowId(index)),
            };

            let mut row = DataRow::new(id);
            for (key, value) in object {
                if key == "id" {
                    continue;
                }
                if !fields.contains(&key) {
                    fields.push(key.clone());
                }
                let cell = serde_json::from_value(value).unwrap_or_default();
                row.fields.insert(key, cell);
            }
            rows.push(row);
        }

        Ok(Dataset { fields, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_dataset() {
        let csv = "id,name,age\n1,John Doe,30\n2,Jane Smith,25\n";
        let dataset = Dataset::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.fields, vec!["id", "name", "age"]);
        assert_eq!(dataset.rows.len(), 2);
        assert_eq!(dataset.rows[1].id(), "2");
        assert_eq!(dataset.rows[1].field("name"), CellValue::from("Jane Smith"));
        assert_eq!(dataset.rows[0].field("age"), CellValue::Number(30.0));
        assert_eq!(dataset.rows[0].field("id"), CellValue::from("1"));
    }

    #[test]
    fn test_csv_without_id_column() {
        let err = Dataset::from_csv_reader("name\nJohn\n".as_bytes()).unwrap_err();
        assert!(matches!(err, BricksError::MissingIdColumn));
    }

    #[test]
    fn test_csv_blank_id() {
        let err = Dataset::from_csv_reader("id,name\n1,a\n ,b\n".as_bytes()).unwrap_err();
        assert!(matches!(err, BricksError::MissingRowId(1)));
    }

    #[test]
    fn test_json_dataset() {
        let json = r#"[
            {"id": 7, "name": "Bob", "active": true},
            {"id": "x", "name": "Ann", "joined": "2023-05-01"}
        ]"#;
        let dataset = Dataset::from_json_str(json).unwrap();
        assert_eq!(dataset.rows[0].id(), "7");
        assert_eq!(dataset.rows[0].field("active"), CellValue::Bool(true));
        assert_eq!(dataset.rows[1].field("active"), CellValue::Empty);
        assert!(matches!(dataset.rows[1].field("joined"), CellValue::Date(_)));
        assert_eq!(dataset.fields[0], "id");
        assert!(dataset.fields.contains(&"joined".to_string()));
    }

    #[test]
    fn test_json_missing_id() {
        let err = Dataset::from_json_str(r#"[{"name": "no id"}]"#).unwrap_err();
        assert!(matches!(err, BricksError::MissingRowId(0)));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = Dataset::load(Path::new("rows.xml")).unwrap_err();
        assert!(matches!(err, BricksError::UnsupportedFormat(ext) if ext == "xml"));
    }
}
