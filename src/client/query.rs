//! Query expression assembly.
//!
//! The ftrack query language is passed to the server as opaque text. This
//! module only assembles `select ... from ... where ...` expressions from
//! structured filters; literal values always go through [`quote`].

use std::fmt;

/// Quote a literal value for use in a query expression.
///
/// Backslashes and double quotes inside the value are backslash-escaped, so a
/// value can never terminate the literal early.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Check that `path` is an attribute path such as `Task` or `status.name`.
pub fn is_attribute_path(path: &str) -> bool {
    !path.is_empty()
        && path.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

/// Sort direction for an `order by` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Builder for a `select` expression.
#[derive(Debug, Clone)]
pub struct Select {
    entity_type: String,
    projections: Vec<String>,
    clauses: Vec<String>,
    order_by: Option<(String, SortOrder)>,
    limit: Option<u32>,
}

impl Select {
    /// Start a `select` over `entity_type`. An empty projection selects `*`.
    pub fn new<I, S>(entity_type: impl Into<String>, projections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entity_type: entity_type.into(),
            projections: projections.into_iter().map(Into::into).collect(),
            clauses: Vec::new(),
            order_by: None,
            limit: None,
        }
    }

    /// Add `<field> is "<value>"`.
    pub fn is(self, field: &str, value: &str) -> Self {
        let clause = format!("{} is {}", field, quote(value));
        self.filter(clause)
    }

    /// Add `<field> is_not "<value>"`.
    pub fn is_not(self, field: &str, value: &str) -> Self {
        let clause = format!("{} is_not {}", field, quote(value));
        self.filter(clause)
    }

    /// Add `<relation> any (<field> is "<value>")`.
    pub fn any(self, relation: &str, field: &str, value: &str) -> Self {
        let clause = format!("{} any ({} is {})", relation, field, quote(value));
        self.filter(clause)
    }

    /// Add a pre-built clause. Clauses are joined with `and`.
    pub fn filter(mut self, clause: impl Into<String>) -> Self {
        self.clauses.push(clause.into());
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.order_by = Some((field.into(), order));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Render the expression text.
    pub fn build(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.projections.is_empty() {
            write!(f, "select * from {}", self.entity_type)?;
        } else {
            write!(
                f,
                "select {} from {}",
                self.projections.join(", "),
                self.entity_type
            )?;
        }

        if !self.clauses.is_empty() {
            write!(f, " where {}", self.clauses.join(" and "))?;
        }

        if let Some((field, order)) = &self.order_by {
            write!(f, " order by {}", field)?;
            if *order == SortOrder::Descending {
                f.write_str(" descending")?;
            }
        }

        if let Some(limit) = self.limit {
            write!(f, " limit {}", limit)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_plain_value() {
        assert_eq!(quote("In Progress"), "\"In Progress\"");
    }

    #[test]
    fn test_quote_escapes_embedded_quotes() {
        assert_eq!(quote(r#"a" or name like "%"#), r#""a\" or name like \"%""#);
        assert_eq!(quote(r"back\slash"), r#""back\\slash""#);
    }

    #[test]
    fn test_attribute_path() {
        assert!(is_attribute_path("Task"));
        assert!(is_attribute_path("status.name"));
        assert!(is_attribute_path("_private.field_2"));
        assert!(!is_attribute_path(""));
        assert!(!is_attribute_path("status."));
        assert!(!is_attribute_path("1abc"));
        assert!(!is_attribute_path("Task where id is \"x\""));
        assert!(!is_attribute_path("name, id"));
    }

    #[test]
    fn test_select_without_filters() {
        let expr = Select::new("Status", ["id", "name"])
            .order_by("sort", SortOrder::Ascending)
            .build();
        assert_eq!(expr, "select id, name from Status order by sort");
    }

    #[test]
    fn test_select_empty_projection_selects_all() {
        let expr = Select::new("Shot", Vec::<String>::new()).is("id", "42").build();
        assert_eq!(expr, "select * from Shot where id is \"42\"");
    }

    #[test]
    fn test_select_joins_clauses_in_order() {
        let expr = Select::new("AssetVersion", ["id"])
            .is("asset_id", "a1")
            .any("assignments", "resource_id", "u1")
            .is_not("status", "hidden")
            .order_by("version", SortOrder::Descending)
            .limit(50)
            .build();
        assert_eq!(
            expr,
            "select id from AssetVersion where asset_id is \"a1\" and \
             assignments any (resource_id is \"u1\") and status is_not \"hidden\" \
             order by version descending limit 50"
        );
    }
}
