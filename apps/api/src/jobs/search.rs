use serde::Deserialize;

/// `GET /api/search/jobs` query. Blank values impose no filter.
#[derive(Debug, Default, Deserialize)]
pub struct JobSearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub city: String,
}

/// Normalized search filters.
#[derive(Debug, PartialEq, Eq)]
pub struct JobFilter {
    /// `ILIKE` pattern matched against title and description.
    pub text_pattern: Option<String>,
    /// Exact city match.
    pub city: Option<String>,
}

impl JobSearchQuery {
    /// Whitespace-only values count as blank; anything else is used verbatim.
    pub fn into_filter(self) -> JobFilter {
        JobFilter {
            text_pattern: non_blank(self.q).map(|q| format!("%{}%", escape_like(&q))),
            city: non_blank(self.city),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}

/// Escapes `LIKE` metacharacters so the term matches literally (default `\` escape).
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
