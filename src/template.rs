//! Placeholder scanning for SQL templates.
//!
//! A template names its parameters with `#{field}` tokens. Parsing rewrites every token to a
//! positional marker and returns the token names in order of appearance, so that value `i`
//! can later be bound at position `i + 1`.
//!
//! The scan is purely textual: `#{` inside a quoted SQL literal is still treated as a
//! placeholder, and there is no escape for a literal `#{`.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

const OPEN: &str = "#{";
const CLOSE: char = '}';

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*$").expect("identifier pattern is valid"));

/// Positional marker syntax understood by a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerStyle {
    /// `?` for every parameter (SQLite, JDBC-style drivers)
    #[default]
    Question,
    /// `$1`, `$2`, ... (PostgreSQL)
    Numbered,
}

impl MarkerStyle {
    fn write(self, out: &mut String, position: usize) {
        match self {
            MarkerStyle::Question => out.push('?'),
            MarkerStyle::Numbered => {
                out.push('$');
                out.push_str(&position.to_string());
            }
        }
    }
}

/// A template with its placeholders rewritten to positional markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTemplate {
    pub sql: String,
    pub tokens: Vec<String>,
}

impl ParsedTemplate {
    pub fn has_placeholders(&self) -> bool {
        !self.tokens.is_empty()
    }
}

/// Parse a template using `?` markers.
pub fn parse(template: &str) -> Result<ParsedTemplate> {
    parse_with(template, MarkerStyle::Question)
}

/// Parse a template, writing markers in the given style.
pub fn parse_with(template: &str, style: MarkerStyle) -> Result<ParsedTemplate> {
    let mut sql = String::with_capacity(template.len());
    let mut tokens = Vec::new();
    let mut offset = 0;

    while let Some(found) = template[offset..].find(OPEN) {
        let start = offset + found;
        let name_start = start + OPEN.len();
        let Some(len) = template[name_start..].find(CLOSE) else {
            return Err(Error::MalformedTemplate {
                position: start,
                reason: "unterminated placeholder".to_string(),
            });
        };
        let name = &template[name_start..name_start + len];
        if !IDENTIFIER.is_match(name) {
            return Err(Error::MalformedTemplate {
                position: start,
                reason: format!("invalid placeholder name '{}'", name),
            });
        }

        sql.push_str(&template[offset..start]);
        tokens.push(name.to_string());
        style.write(&mut sql, tokens.len());
        offset = name_start + len + 1;
    }
    sql.push_str(&template[offset..]);

    Ok(ParsedTemplate { sql, tokens })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_rewrites_in_order() {
        let parsed = parse("SELECT * FROM users WHERE id=#{id} AND name=#{name}").unwrap();
        assert_eq!(parsed.sql, "SELECT * FROM users WHERE id=? AND name=?");
        assert_eq!(parsed.tokens, vec!["id", "name"]);
    }

    #[rstest]
    #[case("SELECT 1")]
    #[case("")]
    #[case("SELECT '#' || '{' FROM t")]
    #[case("UPDATE t SET a = 1 WHERE b = '}'")]
    fn test_no_placeholders_is_unchanged(#[case] template: &str) {
        let parsed = parse(template).unwrap();
        assert_eq!(parsed.sql, template);
        assert!(!parsed.has_placeholders());
    }

    #[rstest]
    fn test_duplicates_each_get_a_marker() {
        let parsed = parse("SELECT #{a}, #{b}, #{a}").unwrap();
        assert_eq!(parsed.sql, "SELECT ?, ?, ?");
        assert_eq!(parsed.tokens, vec!["a", "b", "a"]);
    }

    #[rstest]
    fn test_adjacent_placeholders() {
        let parsed = parse("#{a}#{b}").unwrap();
        assert_eq!(parsed.sql, "??");
        assert_eq!(parsed.tokens, vec!["a", "b"]);
    }

    #[rstest]
    fn test_numbered_markers() {
        let parsed = parse_with("INSERT INTO t VALUES (#{id}, #{name}, #{id})", MarkerStyle::Numbered)
            .unwrap();
        assert_eq!(parsed.sql, "INSERT INTO t VALUES ($1, $2, $3)");
        assert_eq!(parsed.tokens, vec!["id", "name", "id"]);
    }

    #[rstest]
    fn test_unterminated_placeholder() {
        let err = parse("SELECT * FROM t WHERE id = #{id").unwrap_err();
        assert!(matches!(err, Error::MalformedTemplate { position: 27, .. }));
    }

    #[rstest]
    fn test_unterminated_after_valid_placeholder() {
        let err = parse("WHERE a = #{a} AND b = #{b").unwrap_err();
        assert!(matches!(err, Error::MalformedTemplate { position: 23, .. }));
    }

    #[rstest]
    #[case("WHERE a = #{}")]
    #[case("WHERE a = #{1abc}")]
    #[case("WHERE a = #{ a }")]
    #[case("WHERE a = #{user_name}")]
    #[case("WHERE a = #{a#{b}}")]
    fn test_invalid_names(#[case] template: &str) {
        assert!(matches!(parse(template), Err(Error::MalformedTemplate { .. })));
    }

    #[rstest]
    fn test_names_are_case_sensitive() {
        let parsed = parse("#{userId} #{UserId}").unwrap();
        assert_eq!(parsed.tokens, vec!["userId", "UserId"]);
    }

    #[rstest]
    fn test_placeholder_inside_literal_is_still_rewritten() {
        let parsed = parse("SELECT '#{x}'").unwrap();
        assert_eq!(parsed.sql, "SELECT '?'");
        assert_eq!(parsed.tokens, vec!["x"]);
    }

    #[rstest]
    fn test_multibyte_text_around_placeholders() {
        let parsed = parse("SELECT 'héllo' WHERE n = #{name} -- ✓").unwrap();
        assert_eq!(parsed.sql, "SELECT 'héllo' WHERE n = ? -- ✓");
    }
}
