use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Read records from a JSON array file or a JSON Lines file.
///
/// `.jsonl` and `.ndjson` files are read line by line; anything else must
/// hold a single JSON array.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let is_lines = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl") || ext.eq_ignore_ascii_case("ndjson"));

    if is_lines {
        let records = serde_jsonlines::json_lines(path)
            .with_context(|| format!("failed to open {}", path.display()))?
            .collect::<std::io::Result<Vec<T>>>()
            .with_context(|| format!("invalid JSON Lines in {}", path.display()))?;
        return Ok(records);
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("{} must contain a JSON array of records", path.display()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::load_records;

    #[test]
    fn reads_json_array() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let path = dir.path().join("rows.json");
        std::fs::write(&path, r#"[{"INDEXNO": "9001"}, {"INDEXNO": "9002"}]"#).expect("write");

        let rows: Vec<Value> = load_records(&path).expect("array should load");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], json!({"INDEXNO": "9002"}));
    }

    #[test]
    fn reads_json_lines() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let path = dir.path().join("rows.jsonl");
        std::fs::write(&path, "{\"indexNumber\": 1}\n{\"indexNumber\": 2}\n").expect("write");

        let rows: Vec<Value> = load_records(&path).expect("lines should load");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn object_file_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let path = dir.path().join("rows.json");
        std::fs::write(&path, r#"{"INDEXNO": "9001"}"#).expect("write");

        let err = load_records::<Value>(&path).expect_err("object should fail");
        assert!(err.to_string().contains("JSON array"));
    }
}
