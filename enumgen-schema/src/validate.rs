//! Validation utilities for names that end up as Go identifiers.

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Validation context that carries source information.
///
/// Names are reported together with the enum they belong to, e.g.
/// "variant in 'Color'".
#[derive(Debug, Clone)]
pub(crate) struct ParseContext<'a> {
    source: &'a SourceContext,
    enum_name: Option<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(source: &'a SourceContext) -> Self {
        Self {
            source,
            enum_name: None,
        }
    }

    /// Context for names nested inside the enum `name`.
    pub fn for_enum(&self, name: &'a str) -> Self {
        Self {
            source: self.source,
            enum_name: Some(name),
        }
    }

    pub fn source(&self) -> &'a SourceContext {
        self.source
    }

    /// Describe `kind` for error messages, e.g. "variant in 'Color'".
    pub fn context_for(&self, kind: &str) -> String {
        match self.enum_name {
            Some(name) => format!("{} in '{}'", kind, name),
            None => kind.to_string(),
        }
    }

    /// Span of the table header or dotted key that declares this context's enum.
    pub fn enum_span(&self) -> Option<SourceSpan> {
        self.enum_name
            .and_then(|name| find_table_span(self.source.src(), name))
    }

    /// Span of `key` inside this context's enum table.
    pub fn key_span(&self, key: &str) -> Option<SourceSpan> {
        let start = self
            .enum_span()
            .map(|span| span.offset() + span.len())
            .unwrap_or(0);
        find_key_span(self.source.src(), key, start)
    }

    /// Span of the quoted string `value` inside this context's enum table.
    pub fn value_span(&self, value: &str) -> Option<SourceSpan> {
        let start = self
            .enum_span()
            .map(|span| span.offset() + span.len())
            .unwrap_or(0);
        find_value_span(self.source.src(), value, start)
    }

    /// Validate a name that is used verbatim as a Go identifier.
    pub fn validate_name(&self, name: &str, kind: &str, span: Option<SourceSpan>) -> Result<()> {
        if is_go_keyword(name) {
            return Err(self
                .source
                .reserved_keyword_error(name, self.context_for(kind), span));
        }

        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                span,
            ));
        }

        Ok(())
    }

    /// Validate a name that is appended to another identifier.
    ///
    /// Variant names become `<Enum><Variant>`, so keywords and a leading
    /// digit are fine; only the character set matters.
    pub fn validate_suffix(&self, name: &str, kind: &str, span: Option<SourceSpan>) -> Result<()> {
        let reason = if name.is_empty() {
            Some("name cannot be empty")
        } else if !name.chars().all(is_identifier_char) {
            Some("name contains characters that are not allowed in Go identifiers")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                span,
            )),
            None => Ok(()),
        }
    }
}

/// Go reserved keywords that cannot be used as identifiers
/// Source: https://go.dev/ref/spec#Keywords
pub const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough", "for",
    "func", "go", "goto", "if", "import", "interface", "map", "package", "range", "return",
    "select", "struct", "switch", "type", "var",
];

/// Check if a name is a Go reserved keyword
pub fn is_go_keyword(name: &str) -> bool {
    GO_KEYWORDS.contains(&name)
}

/// Validate that a name is a valid Go identifier.
/// Returns None if valid, Some(reason) if invalid.
pub fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    let Some(first) = chars.next() else {
        return Some("name cannot be empty");
    };

    if is_go_keyword(name) {
        return Some("name is a Go reserved keyword");
    }

    if !(first.is_alphabetic() || first == '_') {
        return Some("name must start with a letter or underscore");
    }

    if !chars.all(is_identifier_char) {
        return Some("name contains characters that are not allowed in Go identifiers");
    }

    None
}

/// Validate a reference to a named Go type: `Kind` or `pkg.Kind`.
pub fn validate_type_reference(name: &str) -> Option<&'static str> {
    match name.split_once('.') {
        Some((package, ty)) => validate_identifier(package)
            .or_else(|| validate_identifier(ty))
            .map(|_| "expected a Go type name such as `Kind` or `pkg.Kind`"),
        None => validate_identifier(name),
    }
}

/// Payload types are written out verbatim (`*Data`, `[]pkg.Item`), so only
/// the characters that would break the surrounding statement are rejected.
pub fn validate_payload_type(ty: &str) -> Option<&'static str> {
    if ty.is_empty() {
        Some("payload type cannot be empty")
    } else if ty.chars().any(|c| c.is_whitespace() || c.is_control()) {
        Some("payload type cannot contain whitespace or control characters")
    } else {
        None
    }
}

/// Packages and predeclared identifiers the generated code refers to.
/// A package-level type with one of these names would shadow it.
pub const GENERATED_CODE_NAMES: &[&str] = &[
    "bson", "byte", "bytes", "error", "errors", "json", "len", "nil", "panic", "string",
];

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Find where the enum `name` is declared: `[name]`, `[name.variants]`,
/// or a dotted/inline key at the start of a line.
fn find_table_span(src: &str, name: &str) -> Option<SourceSpan> {
    let headers = [format!("[{}]", name), format!("[{}.", name)];
    for header in &headers {
        if let Some(pos) = src.find(header.as_str()) {
            // +1 to skip the opening bracket
            return Some(SourceSpan::from((pos + 1, name.len())));
        }
    }

    line_start_key(src, name, 0)
}

/// Find `key` written as a TOML key (`key =` or `key.`) at or after `start`.
fn find_key_span(src: &str, key: &str, start: usize) -> Option<SourceSpan> {
    let tail = src.get(start..)?;
    let patterns = [
        format!("{} =", key),
        format!("{}=", key),
        format!("\"{}\" =", key),
    ];

    patterns
        .iter()
        .filter_map(|pattern| {
            tail.match_indices(pattern.as_str())
                .find(|(pos, _)| is_key_boundary(tail, *pos))
                .map(|(pos, _)| pos)
        })
        .min()
        .map(|pos| {
            let offset = usize::from(tail[pos..].starts_with('"'));
            SourceSpan::from((start + pos + offset, key.len()))
        })
        .or_else(|| line_start_key(src, key, start))
}

/// Find the quoted string `value` at or after `start`.
fn find_value_span(src: &str, value: &str, start: usize) -> Option<SourceSpan> {
    let quoted = format!("\"{}\"", value);
    let tail = src.get(start..)?;
    tail.find(quoted.as_str())
        // +1 to skip the opening quote
        .map(|pos| SourceSpan::from((start + pos + 1, value.len())))
}

fn line_start_key(src: &str, key: &str, start: usize) -> Option<SourceSpan> {
    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();
        if offset >= start
            && let Some(rest) = trimmed.strip_prefix(key)
            && (rest.starts_with('.') || rest.trim_start().starts_with('='))
        {
            return Some(SourceSpan::from((offset + indent, key.len())));
        }
        offset += line.len();
    }
    None
}

/// A key match must not be the tail of a longer key (`Red` inside `DarkRed`).
fn is_key_boundary(text: &str, pos: usize) -> bool {
    text[..pos]
        .chars()
        .next_back()
        .is_none_or(|c| !(is_identifier_char(c) || c == '"'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_keywords() {
        assert!(is_go_keyword("type"));
        assert!(is_go_keyword("func"));
        assert!(!is_go_keyword("Type"));
        assert!(!is_go_keyword("string"));
    }

    #[test]
    fn test_validate_identifier() {
        assert_eq!(validate_identifier("Color"), None);
        assert_eq!(validate_identifier("_private"), None);
        assert_eq!(validate_identifier("Ärger"), None);
        assert_eq!(validate_identifier(""), Some("name cannot be empty"));
        assert_eq!(
            validate_identifier("2d"),
            Some("name must start with a letter or underscore")
        );
        assert!(validate_identifier("my-enum").is_some());
        assert_eq!(
            validate_identifier("select"),
            Some("name is a Go reserved keyword")
        );
    }

    #[test]
    fn test_validate_type_reference() {
        assert_eq!(validate_type_reference("ShapeKind"), None);
        assert_eq!(validate_type_reference("events.Kind"), None);
        assert_eq!(validate_type_reference(""), Some("name cannot be empty"));
        assert!(validate_type_reference("a.b.C").is_some());
        assert!(validate_type_reference(".Kind").is_some());
        assert!(validate_type_reference("Shape Kind").is_some());
    }

    #[test]
    fn test_validate_payload_type() {
        assert_eq!(validate_payload_type("CircleData"), None);
        assert_eq!(validate_payload_type("*geo.Point"), None);
        assert_eq!(validate_payload_type("map[string]int"), None);
        assert_eq!(validate_payload_type(""), Some("payload type cannot be empty"));
        assert!(validate_payload_type("foo bar").is_some());
        assert!(validate_payload_type("A\nfunc init() {}").is_some());
    }

    #[test]
    fn test_find_table_span() {
        let src = "[Color]\nvariants = { Red = \"red\" }\n";
        let span = find_table_span(src, "Color").unwrap();
        assert_eq!(span.offset(), 1);
        assert_eq!(span.len(), 5);

        let src = "[Color.variants]\nRed = \"red\"\n";
        assert_eq!(find_table_span(src, "Color").unwrap().offset(), 1);

        let src = "Color = { variants = { Red = \"red\" } }\n";
        assert_eq!(find_table_span(src, "Color").unwrap().offset(), 0);
    }

    #[test]
    fn test_find_key_span_skips_longer_keys() {
        let src = "[Color]\nvariants = { DarkRed = \"dark\", Red = \"red\" }\n";
        let span = find_key_span(src, "Red", 0).unwrap();
        assert_eq!(&src[span.offset()..span.offset() + span.len()], "Red");
        assert!(span.offset() > src.find("DarkRed").unwrap());
    }

    #[test]
    fn test_find_value_span() {
        let src = "[Status]\ndefault = \"Waiting\"\n";
        let span = find_value_span(src, "Waiting", 0).unwrap();
        assert_eq!(&src[span.offset()..span.offset() + span.len()], "Waiting");
    }
}
