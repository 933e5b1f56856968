use serde::Deserialize;

/// Skills as sent by clients: either a JSON list or a comma-separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    List(Vec<String>),
    Csv(String),
}

impl Default for SkillsInput {
    fn default() -> Self {
        SkillsInput::List(Vec::new())
    }
}

impl SkillsInput {
    /// Trimmed, non-empty skills in input order.
    pub fn normalize(self) -> Vec<String> {
        let raw: Vec<String> = match self {
            SkillsInput::List(items) => items,
            SkillsInput::Csv(text) => text.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
