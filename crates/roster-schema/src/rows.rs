//! Upload row validation.
//!
//! Every raw row passes through [`RowValidator::validate`] before ingestion:
//! 1. The row must be a JSON object.
//! 2. Known column aliases are mapped onto canonical keys (see [`canonical_key`]).
//! 3. Numeric text is coerced for `score`, `admissionYear`, and `semester`.
//! 4. Batch defaults fill `admissionYear`, `semester`, and `department` when absent.
//! 5. The result is checked against the `roster_row` schema and deserialized.
//!
//! The output is a tagged [`RowOutcome`] per row; nothing is coerced later.

use roster_core::rows::{BatchMeta, RosterRow, RowOutcome, RowRejection};
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::registry::{check, SchemaRegistry, ROSTER_ROW};

const EXTERNAL_INDEX: &str = "externalIndex";
const RAW_NAME: &str = "rawName";
const SCORE: &str = "score";
const ADMISSION_YEAR: &str = "admissionYear";
const DEPARTMENT: &str = "department";
const SEMESTER: &str = "semester";

const CANONICAL_KEYS: [&str; 6] = [
    EXTERNAL_INDEX,
    RAW_NAME,
    SCORE,
    ADMISSION_YEAR,
    DEPARTMENT,
    SEMESTER,
];

/// Map an upload column name onto its canonical row key.
///
/// Matching ignores case, spaces, dashes, and underscores, so `INDEXNO`,
/// `index_number`, and `Index Number` all resolve to `externalIndex`.
#[must_use]
pub fn canonical_key(column: &str) -> Option<&'static str> {
    let folded: String = column
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect();
    match folded.as_str() {
        "externalindex" | "indexnumber" | "indexno" | "index" => Some(EXTERNAL_INDEX),
        "rawname" | "name" | "originalname" | "fullname" => Some(RAW_NAME),
        "score" | "cwa" | "currentcwa" => Some(SCORE),
        "admissionyear" | "yearofadmission" | "yeargroup" | "year" => Some(ADMISSION_YEAR),
        "department" | "dept" => Some(DEPARTMENT),
        "semester" | "sem" => Some(SEMESTER),
        _ => None,
    }
}

/// Validates raw upload rows against the `roster_row` schema.
pub struct RowValidator {
    validator: jsonschema::Validator,
    defaults: BatchMeta,
}

impl RowValidator {
    /// Compile the row schema from the registry.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if the row schema is missing or does not compile.
    pub fn new(registry: &SchemaRegistry) -> Result<Self, SchemaError> {
        Ok(Self {
            validator: registry.compile(ROSTER_ROW)?,
            defaults: BatchMeta::default(),
        })
    }

    /// Values used for `admissionYear`, `semester`, and `department` when a row omits them.
    #[must_use]
    pub fn with_defaults(mut self, defaults: BatchMeta) -> Self {
        self.defaults = defaults;
        self
    }

    /// Validate every row, preserving input order.
    #[must_use]
    pub fn validate_all(&self, rows: &[Value]) -> Vec<RowOutcome> {
        rows.iter()
            .enumerate()
            .map(|(position, row)| self.validate(position, row))
            .collect()
    }

    /// Validate one raw row.
    pub fn validate(&self, position: usize, raw: &Value) -> RowOutcome {
        let Some(object) = raw.as_object() else {
            return Err(reject(position, None, "row must be a JSON object"));
        };

        let mut row = canonicalize(object);
        coerce_index(&mut row);
        let external_index = row
            .get(EXTERNAL_INDEX)
            .and_then(Value::as_str)
            .map(str::to_string)
            .filter(|index| !index.is_empty());

        if external_index.is_none() {
            return Err(reject(position, None, "externalIndex is required"));
        }

        coerce_score(&mut row);
        coerce_integer(&mut row, ADMISSION_YEAR);
        coerce_integer(&mut row, SEMESTER);
        self.fill_defaults(&mut row);

        let value = Value::Object(row);
        if let Err(error) = check(ROSTER_ROW, &self.validator, &value) {
            let reason = match error {
                SchemaError::Invalid { errors, .. } => errors.join("; "),
                other => other.to_string(),
            };
            tracing::debug!(position, %reason, "upload row failed schema validation");
            return Err(reject(position, external_index, &reason));
        }

        let row = serde_json::from_value::<RosterRow>(value)
            .map_err(|e| reject(position, external_index.clone(), &e.to_string()))?;
        match row.score {
            Some(score) if !(0.0..=100.0).contains(&score) => Err(reject(
                position,
                external_index,
                &format!("score {score} is outside 0..=100"),
            )),
            _ => Ok(row),
        }
    }

    fn fill_defaults(&self, row: &mut Map<String, Value>) {
        let missing = |row: &Map<String, Value>, key: &str| row.get(key).is_none_or(Value::is_null);

        if missing(row, ADMISSION_YEAR) {
            if let Some(year) = self.defaults.admission_year {
                row.insert(ADMISSION_YEAR.into(), Value::from(year));
            }
        }
        if missing(row, SEMESTER) {
            if let Some(semester) = self.defaults.semester {
                row.insert(SEMESTER.into(), Value::from(semester));
            }
        }
        if missing(row, DEPARTMENT) {
            if let Some(department) = self.defaults.department() {
                row.insert(DEPARTMENT.into(), Value::from(department));
            }
        }
    }
}

fn reject(position: usize, external_index: Option<String>, reason: &str) -> RowRejection {
    RowRejection {
        position,
        external_index,
        reason: reason.to_string(),
    }
}

/// Rename aliased columns. Canonical spellings win over aliases; unknown columns are dropped.
fn canonicalize(object: &Map<String, Value>) -> Map<String, Value> {
    let mut row = Map::new();
    for key in CANONICAL_KEYS {
        if let Some(value) = object.get(key) {
            row.insert(key.to_string(), value.clone());
        }
    }
    for (column, value) in object {
        if let Some(key) = canonical_key(column) {
            row.entry(key.to_string()).or_insert_with(|| value.clone());
        }
    }
    row
}

/// Index numbers exported as spreadsheet numbers become strings; text is trimmed.
fn coerce_index(row: &mut Map<String, Value>) {
    let coerced = match row.get(EXTERNAL_INDEX) {
        Some(Value::String(s)) => Value::String(s.trim().to_string()),
        Some(Value::Number(n)) => Value::String(n.to_string()),
        _ => return,
    };
    row.insert(EXTERNAL_INDEX.into(), coerced);
}

/// Numeric text becomes a number; blank text becomes null. Other text is left
/// as-is so schema validation reports it.
fn coerce_score(row: &mut Map<String, Value>) {
    let Some(Value::String(text)) = row.get(SCORE) else {
        return;
    };
    let text = text.trim();
    let coerced = if text.is_empty() {
        Value::Null
    } else {
        match text.parse::<f64>() {
            Ok(score) if score.is_finite() => Value::from(score),
            _ => return,
        }
    };
    row.insert(SCORE.into(), coerced);
}

/// Integer text or whole floats (`1.0`) become integers.
fn coerce_integer(row: &mut Map<String, Value>, key: &str) {
    let coerced = match row.get(key) {
        Some(Value::String(text)) => match text.trim().parse::<u64>() {
            Ok(n) => Value::from(n),
            Err(_) => return,
        },
        Some(Value::Number(n)) if n.as_u64().is_none() => match n.as_f64() {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX) => {
                Value::from(f as u64)
            }
            _ => return,
        },
        _ => return,
    };
    row.insert(key.to_string(), coerced);
}
