use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub profile_id: Uuid,
    /// Object key inside the resumes bucket.
    pub file_path: String,
    /// Free-form, user-editable. Conventionally `{ "text": ... }`.
    pub parsed: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl ResumeRow {
    /// Returns `parsed.text` as a string.
    /// Non-string scalars are stringified; null, arrays and objects yield `None`.
    pub fn parsed_text(&self) -> Option<String> {
        match self.parsed.as_ref()?.get("text")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}
