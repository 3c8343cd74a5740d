//! Builds parameterized WHERE clauses from optional search filters.
//! Column expressions come from code only; user values are always bound as parameters.

use super::params::BoundParam;
use crate::error::AppError;

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BoundParam>,
}

/// Escape LIKE metacharacters and wrap in `%` for a substring match.
pub fn contains_pattern(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    out.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('%');
    out
}

/// Parse a path or query id. Non-numeric input is an InvalidInput error naming the parameter.
pub fn parse_id(name: &str, raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::InvalidInput(format!("{} must be an integer", name)))
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Accumulates AND-joined conditions and their parameters.
#[derive(Default)]
pub struct FilterBuilder {
    conditions: Vec<String>,
    params: Vec<BoundParam>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_param(&mut self, p: BoundParam) -> usize {
        self.params.push(p);
        self.params.len()
    }

    /// `<expr> ILIKE $n` for a case-insensitive substring match.
    pub fn contains(mut self, name: &'static str, expr: &str, value: Option<&str>) -> Self {
        if let Some(v) = present(value) {
            let n = self.push_param(BoundParam::text(name, contains_pattern(v)));
            self.conditions.push(format!("{} ILIKE ${}", expr, n));
        }
        self
    }

    /// `EXISTS (SELECT 1 FROM <from> WHERE <correlation> AND <expr> ILIKE $n)`.
    pub fn exists_contains(
        mut self,
        name: &'static str,
        from: &str,
        correlation: &str,
        expr: &str,
        value: Option<&str>,
    ) -> Self {
        if let Some(v) = present(value) {
            let n = self.push_param(BoundParam::text(name, contains_pattern(v)));
            self.conditions.push(format!(
                "EXISTS (SELECT 1 FROM {} WHERE {} AND {} ILIKE ${})",
                from, correlation, expr, n
            ));
        }
        self
    }

    /// `<expr> = $n` with the value parsed as an integer id.
    pub fn equals_id(mut self, name: &'static str, expr: &str, value: Option<&str>) -> Result<Self, AppError> {
        if let Some(v) = present(value) {
            let id = parse_id(name, v)?;
            let n = self.push_param(BoundParam::int(name, id));
            self.conditions.push(format!("{} = ${}", expr, n));
        }
        Ok(self)
    }

    /// `" WHERE a AND b"` (leading space) or empty, with parameters in placeholder order.
    pub fn build(self) -> QueryBuf {
        let sql = if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        };
        QueryBuf {
            sql,
            params: self.params,
        }
    }
}

/// Appends ` LIMIT $n OFFSET $m` after the filter parameters already in `params`.
pub fn push_limit_offset(sql: &mut String, params: &mut Vec<BoundParam>, limit: i64, offset: i64) {
    params.push(BoundParam::int("limit", limit));
    let limit_ph = params.len();
    params.push(BoundParam::int("offset", offset));
    let offset_ph = params.len();
    sql.push_str(&format!(" LIMIT ${} OFFSET ${}", limit_ph, offset_ph));
}
