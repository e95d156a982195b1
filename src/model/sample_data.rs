//! Built-in demo rows for the gallery

use super::cell::CellValue;
use super::record::{DataRow, Dataset};

pub const MEMBER_FIELDS: [&str; 7] = ["id", "name", "email", "role", "status", "joined", "score"];

const MEMBERS: &[(&str, &str, &str, &str, &str, i64)] = &[
    ("John Doe", "john@example.com", "Owner", "active", "2021-03-14", 92),
    ("Jane Smith", "jane@example.com", "Admin", "active", "2021-07-02", 88),
    ("Bob Johnson", "bob@example.com", "Editor", "suspended", "2022-01-19", 41),
    ("Alice Martin", "alice@example.com", "Viewer", "active", "2022-02-28", 67),
    ("Carlos Diaz", "carlos@example.com", "Editor", "invited", "2022-05-09", 0),
    ("Mei Tanaka", "mei@example.com", "Admin", "active", "2022-06-21", 95),
    ("Omar Haddad", "omar@example.com", "Viewer", "active", "2022-09-03", 54),
    ("Priya Nair", "priya@example.com", "Editor", "active", "2022-11-30", 79),
    ("Lukas Weber", "lukas@example.com", "Viewer", "suspended", "2023-01-08", 12),
    ("Sofia Rossi", "sofia@example.com", "Editor", "active", "2023-02-17", 83),
    ("Noah Kim", "noah@example.com", "Viewer", "invited", "2023-03-22", 0),
    ("Emma Dubois", "emma@example.com", "Admin", "active", "2023-04-11", 90),
    ("Ivan Petrov", "ivan@example.com", "Editor", "active", "2023-05-25", 71),
    ("Chloe Martin", "chloe@example.com", "Viewer", "active", "2023-06-06", 58),
    ("Ahmed Saleh", "ahmed@example.com", "Editor", "suspended", "2023-07-19", 33),
    ("Grace Lee", "grace@example.com", "Viewer", "active", "2023-08-27", 62),
    ("Mateo Garcia", "mateo@example.com", "Editor", "active", "2023-10-02", 76),
    ("Hannah Berg", "hannah@example.com", "Viewer", "invited", "2023-11-15", 0),
    ("Yusuf Demir", "yusuf@example.com", "Admin", "active", "2024-01-09", 87),
    ("Olivia Brown", "olivia@example.com", "Viewer", "active", "2024-02-20", 49),
    ("Kenji Sato", "kenji@example.com", "Editor", "active", "2024-04-04", 81),
    ("Fatima Zahra", "fatima@example.com", "Viewer", "active", "2024-05-13", 65),
    ("Liam O'Brien", "liam@example.com", "Editor", "suspended", "2024-07-01", 27),
    ("Zoe Clarke", "zoe@example.com", "Viewer", "active", "2024-08-18", 70),
];

/// Team members with name, email, role, status, joined date and score
pub fn sample_members() -> Vec<DataRow> {
    MEMBERS
        .iter()
        .enumerate()
        .map(|(i, (name, email, role, status, joined, score))| {
            DataRow::new((i + 1).to_string())
                .with("name", *name)
                .with("email", *email)
                .with("role", *role)
                .with("status", *status)
                .with("joined", CellValue::from_raw(joined))
                .with("score", *score)
        })
        .collect()
}

/// The members wrapped as a dataset, fields in display order
pub fn sample_dataset() -> Dataset {
    Dataset {
        fields: MEMBER_FIELDS.iter().map(|f| f.to_string()).collect(),
        rows: sample_members(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::Record;

    #[test]
    fn test_sample_members() {
        let members = sample_members();
        assert_eq!(members.len(), 24);
        assert_eq!(members[0].id(), "1");
        assert!(matches!(members[0].field("joined"), CellValue::Date(_)));
        assert_eq!(members[2].field("status"), CellValue::from("suspended"));
    }

    #[test]
    fn test_sample_dataset_fields_cover_rows() {
        let dataset = sample_dataset();
        for field in &dataset.fields {
            assert!(!dataset.rows[0].field(field).is_empty(), "{}", field);
        }
    }
}
