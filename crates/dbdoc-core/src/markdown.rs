//! Markdown fragments for schema documentation
//!
//! Every primitive here is a fixed string template. Consumers diff generated
//! files between runs, so the output must stay byte-for-byte stable.

use crate::error::{Error, Result};

/// Line separator used between generated lines
pub const LINE_SEPARATOR: &str = "\n";

/// Separator between cells of a pipe table
const CELL_SEPARATOR: &str = " | ";

/// Column alignment token for the second line of a pipe table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    /// Renderer default
    Unspecified,
}

impl Alignment {
    pub fn token(self) -> &'static str {
        match self {
            Alignment::Left => ":---",
            Alignment::Center => ":---:",
            Alignment::Right => "---:",
            Alignment::Unspecified => "---",
        }
    }
}

/// Input for [`MarkdownBuilder::table`]
#[derive(Debug, Clone, Default)]
pub struct TableSpec {
    /// Header cells
    pub titles: Vec<String>,
    /// Per-column alignment; every column is left-aligned when absent
    pub alignment: Option<Vec<Alignment>>,
    /// Data rows, one value list per line
    pub rows: Vec<Vec<String>>,
}

impl TableSpec {
    pub fn new<T: Into<String>>(titles: impl IntoIterator<Item = T>) -> Self {
        Self {
            titles: titles.into_iter().map(Into::into).collect(),
            alignment: None,
            rows: Vec::new(),
        }
    }

    pub fn with_alignment(mut self, alignment: Vec<Alignment>) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn row<T: Into<String>>(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.rows.push(values.into_iter().map(Into::into).collect());
        self
    }
}

/// Markdown template primitives
pub struct MarkdownBuilder;

impl MarkdownBuilder {
    /// Heading of the given level (1-5)
    pub fn title(text: &str, level: u8) -> Result<String> {
        if !(1..=5).contains(&level) {
            return Err(Error::invalid_argument(format!(
                "heading level must be between 1 and 5, got {}",
                level
            )));
        }
        Ok(format!("{} {}", "#".repeat(level as usize), text))
    }

    pub fn bold(text: &str) -> String {
        format!("**{}**", text)
    }

    /// Single-line block quote followed by a line separator
    pub fn comment(text: &str) -> String {
        format!("> {}{}", text, LINE_SEPARATOR)
    }

    /// Inline code span
    pub fn highline(text: &str) -> String {
        format!("`{}`", text)
    }

    /// Fenced code block with an optional language tag
    pub fn code(text: &str, language: &str) -> String {
        format!(
            "```{}{}{}{}```",
            language, LINE_SEPARATOR, text, LINE_SEPARATOR
        )
    }

    /// Horizontal rule
    pub fn rule() -> &'static str {
        "---"
    }

    /// Collapsible disclosure block around `body`
    pub fn details(summary: &str, body: &str) -> String {
        let sep = LINE_SEPARATOR;
        format!(
            "<details>{sep}<summary>{summary}</summary>{sep}{sep}{body}{sep}{sep}</details>"
        )
    }

    /// Make a value safe to place inside a pipe-table cell
    pub fn cell(text: &str) -> String {
        let folded = text
            .split(['\r', '\n'])
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        folded.replace('|', "\\|")
    }

    /// Pipe table: header, alignment line, then one line per row
    ///
    /// Rows shorter than the header are padded with empty cells; longer rows
    /// are written out in full.
    pub fn table(spec: &TableSpec) -> Result<String> {
        if spec.titles.is_empty() {
            return Err(Error::invalid_argument("table titles must not be empty"));
        }
        if spec.rows.is_empty() {
            return Err(Error::invalid_argument("table data must not be empty"));
        }

        let width = spec.titles.len();
        let alignment: Vec<&str> = match &spec.alignment {
            Some(alignment) if alignment.len() != width => {
                return Err(Error::invalid_argument(format!(
                    "expected {} alignment tokens, got {}",
                    width,
                    alignment.len()
                )));
            }
            Some(alignment) => alignment.iter().map(|a| a.token()).collect(),
            None => vec![Alignment::Left.token(); width],
        };

        let mut lines = Vec::with_capacity(spec.rows.len() + 2);
        lines.push(spec.titles.join(CELL_SEPARATOR));
        lines.push(alignment.join(CELL_SEPARATOR));

        for row in &spec.rows {
            let mut line = row.join(CELL_SEPARATOR);
            if row.len() < width {
                line.push_str(&CELL_SEPARATOR.repeat(width - row.len()));
            }
            lines.push(line);
        }

        Ok(lines.join(LINE_SEPARATOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_levels() {
        assert_eq!(MarkdownBuilder::title("Users", 2).unwrap(), "## Users");
        assert_eq!(MarkdownBuilder::title("Users", 5).unwrap(), "##### Users");
        assert!(matches!(
            MarkdownBuilder::title("X", 0),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            MarkdownBuilder::title("X", 6),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_literal_templates() {
        assert_eq!(MarkdownBuilder::bold("id"), "**id**");
        assert_eq!(MarkdownBuilder::comment("Users"), "> Users\n");
        assert_eq!(MarkdownBuilder::highline("InnoDB"), "`InnoDB`");
        assert_eq!(MarkdownBuilder::code("SELECT 1;", "sql"), "```sql\nSELECT 1;\n```");
        assert_eq!(MarkdownBuilder::code("x", ""), "```\nx\n```");
        assert_eq!(MarkdownBuilder::rule(), "---");
    }

    #[test]
    fn test_table_line_count_and_alignment() {
        let spec = TableSpec::new(["a", "b", "c"])
            .row(["1", "2", "3"])
            .row(["4", "5", "6"]);
        let table = MarkdownBuilder::table(&spec).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "a | b | c");
        assert_eq!(lines[1], ":--- | :--- | :---");
        assert_eq!(lines[1].split(" | ").count(), 3);
        assert_eq!(lines[3], "4 | 5 | 6");
    }

    #[test]
    fn test_short_rows_are_padded() {
        let spec = TableSpec::new(["a", "b"]).row(["x"]);
        let table = MarkdownBuilder::table(&spec).unwrap();
        assert_eq!(table, "a | b\n:--- | :---\nx | ");

        let spec = TableSpec::new(["a", "b", "c"]).row(["x"]);
        let table = MarkdownBuilder::table(&spec).unwrap();
        assert_eq!(table.lines().last(), Some("x |  | "));
    }

    #[test]
    fn test_long_rows_are_kept() {
        let spec = TableSpec::new(["a"]).row(["x", "y"]);
        let table = MarkdownBuilder::table(&spec).unwrap();
        assert_eq!(table.lines().last(), Some("x | y"));
    }

    #[test]
    fn test_alignment_override() {
        let spec = TableSpec::new(["a", "b"])
            .with_alignment(vec![Alignment::Right, Alignment::Center])
            .row(["1", "2"]);
        let table = MarkdownBuilder::table(&spec).unwrap();
        assert_eq!(table.lines().nth(1), Some("---: | :---:"));

        let bad = TableSpec::new(["a", "b"])
            .with_alignment(vec![Alignment::Right])
            .row(["1", "2"]);
        assert!(matches!(
            MarkdownBuilder::table(&bad),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_empty_table_input_is_rejected() {
        let no_titles = TableSpec::new(Vec::<String>::new()).row(["x"]);
        assert!(matches!(
            MarkdownBuilder::table(&no_titles),
            Err(Error::InvalidArgument { .. })
        ));

        let no_rows = TableSpec::new(["a"]);
        assert!(matches!(
            MarkdownBuilder::table(&no_rows),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_cell_escaping() {
        assert_eq!(MarkdownBuilder::cell("a|b"), "a\\|b");
        assert_eq!(MarkdownBuilder::cell("line one\r\nline two"), "line one line two");
        assert_eq!(MarkdownBuilder::cell("plain"), "plain");
    }

    #[test]
    fn test_details_block() {
        assert_eq!(
            MarkdownBuilder::details("Columns", "a | b"),
            "<details>\n<summary>Columns</summary>\n\na | b\n\n</details>"
        );
    }
}
