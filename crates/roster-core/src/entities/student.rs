use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A student, keyed by the index number supplied in roster uploads.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Student {
    pub external_index: String,
    /// Given name followed by any middle names.
    pub given_name: String,
    pub family_name: String,
    pub score: Option<f64>,
    pub admission_year: u16,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Score used for ranking. An absent score ranks as zero.
    #[must_use]
    pub fn ranking_score(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
            .trim()
            .to_string()
    }
}

/// Mutable student fields sent to `StudentStore::upsert_student`.
///
/// Everything except `external_index` is overwritten on conflict.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NewStudent {
    pub external_index: String,
    pub given_name: String,
    pub family_name: String,
    pub score: Option<f64>,
    pub admission_year: u16,
    pub department: Option<String>,
}

impl NewStudent {
    /// Materialize the stored form, preserving `created_at` from a prior record.
    #[must_use]
    pub fn into_student(self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Student {
        Student {
            external_index: self.external_index,
            given_name: self.given_name,
            family_name: self.family_name,
            score: self.score,
            admission_year: self.admission_year,
            department: self.department,
            created_at,
            updated_at,
        }
    }
}
