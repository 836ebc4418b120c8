//! Output templates for list commands.
//!
//! A template is a string with `{{ .Field }}` placeholders that is rendered
//! once per row. Rows are any `Serialize` value; placeholders are resolved
//! against the row's JSON form, matching field names case-insensitively so
//! that `{{ .DisplayName }}` finds a `displayName` property.
//!
//! Besides plain fields a template understands:
//!
//! - `{{ json . }}` and `{{ jsonPretty . }}`, which print the whole row.
//! - A leading `table` directive, which adds a header row and aligns the
//!   tab separated columns.
//! - The two character sequences `\t` and `\n`, which stand for a tab and a
//!   newline so they can be typed on a command line.

use crate::format::FormattingError;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::OnceLock;

pub const TABLE_DIRECTIVE: &str = "table";

const COLUMN_PADDING: usize = 3;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    let pattern =
        PATTERN.get_or_init(|| Regex::new(r"\{\{\s*(.*?)\s*\}\}").expect("valid regex"));
    pattern
}

fn field_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    let pattern =
        PATTERN.get_or_init(|| Regex::new(r"^\.([A-Za-z_][A-Za-z0-9_]*)$").expect("valid regex"));
    pattern
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Field(String),
    Json { pretty: bool },
}

/// A parsed output template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    table: bool,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template string.
    pub fn parse(source: &str) -> Result<Template, FormattingError> {
        let source = unescape(source);
        let (table, body) = split_table_directive(&source);

        let mut segments = Vec::new();
        let mut cursor = 0;
        for captures in placeholder_pattern().captures_iter(body) {
            let (Some(whole), Some(expression)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            if whole.start() > cursor {
                segments.push(Segment::Literal(body[cursor..whole.start()].to_string()));
            }
            segments.push(parse_expression(expression.as_str())?);
            cursor = whole.end();
        }
        if cursor < body.len() {
            segments.push(Segment::Literal(body[cursor..].to_string()));
        }

        if segments.is_empty() {
            return Err(FormattingError::EmptyTemplate);
        }

        Ok(Template { table, segments })
    }

    /// Whether the template starts with the `table` directive.
    pub fn is_table(&self) -> bool {
        self.table
    }

    /// Render all rows. Table templates get a header line and aligned
    /// columns; other templates produce one rendering per row.
    pub fn render<T: Serialize>(&self, rows: &[T]) -> Result<String, FormattingError> {
        let mut lines = Vec::with_capacity(rows.len() + 1);
        if self.table {
            lines.push(self.header());
        }
        for row in rows {
            let value = serde_json::to_value(row)?;
            lines.push(self.render_row(&value)?);
        }

        if self.table {
            Ok(align_columns(&lines.join("\n")))
        } else {
            Ok(lines.join("\n"))
        }
    }

    fn render_row(&self, row: &Value) -> Result<String, FormattingError> {
        let mut output = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Field(name) => {
                    let value = lookup_field(row, name)
                        .ok_or_else(|| FormattingError::UnknownField(name.clone()))?;
                    output.push_str(&value_to_text(value));
                }
                Segment::Json { pretty: true } => {
                    output.push_str(&serde_json::to_string_pretty(row)?)
                }
                Segment::Json { pretty: false } => output.push_str(&serde_json::to_string(row)?),
            }
        }
        Ok(output)
    }

    fn header(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Field(name) => header_for(name),
                Segment::Json { .. } => "JSON".to_string(),
            })
            .collect()
    }
}

fn unescape(source: &str) -> String {
    source.replace("\\t", "\t").replace("\\n", "\n")
}

fn split_table_directive(source: &str) -> (bool, &str) {
    let trimmed = source.trim_start();
    match trimmed.strip_prefix(TABLE_DIRECTIVE) {
        Some("") => (true, ""),
        Some(rest) if rest.starts_with(char::is_whitespace) => (true, rest.trim_start()),
        _ => (false, source),
    }
}

fn parse_expression(expression: &str) -> Result<Segment, FormattingError> {
    if let Some(captures) = field_pattern().captures(expression) {
        return Ok(Segment::Field(captures[1].to_string()));
    }

    let words: Vec<&str> = expression.split_whitespace().collect();
    match words.as_slice() {
        ["json", "."] => Ok(Segment::Json { pretty: false }),
        ["jsonPretty", "."] => Ok(Segment::Json { pretty: true }),
        _ => Err(FormattingError::UnsupportedTemplateExpression(
            expression.to_string(),
        )),
    }
}

fn lookup_field<'a>(row: &'a Value, name: &str) -> Option<&'a Value> {
    let object = row.as_object()?;
    object.get(name).or_else(|| {
        object
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Bool(_) | Value::Number(_) | Value::Object(_) => value.to_string(),
    }
}

/// Turn a field name into a column header: `DisplayName` becomes
/// `DISPLAY NAME`, `isAPISpecific` becomes `IS API SPECIFIC`.
pub fn header_for(field: &str) -> String {
    let chars: Vec<char> = field.chars().collect();
    let mut header = String::with_capacity(field.len() + 4);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let previous = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if previous.is_lowercase()
                || previous.is_ascii_digit()
                || (previous.is_uppercase() && next_is_lower)
            {
                header.push(' ');
            }
        }
        header.extend(c.to_uppercase());
    }
    header
}

/// Left-align tab separated cells into columns. The last cell of each line
/// is not padded.
fn align_columns(text: &str) -> String {
    let rows: Vec<Vec<&str>> = text.lines().map(|line| line.split('\t').collect()).collect();

    let mut widths: Vec<usize> = Vec::new();
    for cells in &rows {
        for (column, cell) in cells.iter().enumerate() {
            let width = cell.chars().count();
            match widths.get_mut(column) {
                Some(current) => *current = (*current).max(width),
                None => widths.push(width),
            }
        }
    }

    rows.iter()
        .map(|cells| {
            let mut line = String::new();
            for (column, cell) in cells.iter().enumerate() {
                line.push_str(cell);
                if column + 1 < cells.len() {
                    let pad = widths[column] - cell.chars().count() + COLUMN_PADDING;
                    line.push_str(&" ".repeat(pad));
                }
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
