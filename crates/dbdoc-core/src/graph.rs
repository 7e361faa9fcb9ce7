//! Graphviz (DOT) fragments for schema diagrams
//!
//! Each table becomes one plaintext node whose label is an HTML-like table:
//! a coloured title row followed by one row per column.

use crate::error::{Error, Result};

/// Default prefix for node identifiers
pub const DEFAULT_NODE_PREFIX: &str = "mis_models_";

const GRAPH_FONT: &str = "Helvetica";
const TITLE_COLOR: &str = "olivedrab4";
const TABLE_COLOR: &str = "palegoldenrod";

/// Input for [`GraphBuilder::label`]
#[derive(Debug, Clone, Default)]
pub struct LabelSpec {
    pub table_name: String,
    pub table_comment: String,
    /// One value list per column row
    pub rows: Vec<Vec<String>>,
}

/// Builder for DOT node labels and the surrounding digraph
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    node_prefix: String,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::with_node_prefix(DEFAULT_NODE_PREFIX)
    }

    pub fn with_node_prefix(prefix: impl Into<String>) -> Self {
        Self {
            node_prefix: prefix.into(),
        }
    }

    /// Complete digraph document around node and edge statements
    ///
    /// Edges are not derived from foreign keys yet, so callers currently pass
    /// an empty `relations` slice.
    pub fn graph(&self, labels: &str, relations: &[String]) -> String {
        let font = GRAPH_FONT;
        let relations = relations.join("\n  ");
        format!(
            "digraph model_graph {{
  fontname = \"{font}\"
  fontsize = 8
  splines = true

  node [
    fontname = \"{font}\"
    fontsize = 8
    shape = \"plaintext\"
  ]

  edge [
    fontname = \"{font}\"
    fontsize = 8
  ]

  {labels}

  {relations}
}}
"
        )
    }

    /// One table row of cells
    pub fn field<S: AsRef<str>>(&self, cells: &[S]) -> String {
        let cells: String = cells
            .iter()
            .map(|cell| {
                format!(
                    "<TD ALIGN=\"LEFT\" BORDER=\"0\"><FONT FACE=\"{}\">{}</FONT></TD>",
                    GRAPH_FONT,
                    escape_cell(cell.as_ref())
                )
            })
            .collect();
        format!("<TR>{}</TR>", cells)
    }

    /// Title row spanning `colspan` columns
    pub fn title(&self, text: &str, colspan: usize) -> String {
        format!(
            "<TR><TD COLSPAN=\"{}\" CELLPADDING=\"4\" ALIGN=\"CENTER\" BGCOLOR=\"{}\">\
             <FONT FACE=\"{} Bold\" COLOR=\"white\">{}</FONT></TD></TR>",
            colspan.max(1),
            TITLE_COLOR,
            GRAPH_FONT,
            escape_cell(text)
        )
    }

    /// HTML-like table used as a node label
    pub fn table(&self, spec: &LabelSpec) -> Result<String> {
        if spec.table_name.is_empty() {
            return Err(Error::invalid_argument("graph label needs a table name"));
        }
        if spec.rows.is_empty() {
            return Err(Error::invalid_argument(format!(
                "graph label for {} has no rows",
                spec.table_name
            )));
        }

        let colspan = spec.rows.iter().map(Vec::len).max().unwrap_or(1);
        let title = format!("{}({})", spec.table_name, spec.table_comment);

        let mut lines = Vec::with_capacity(spec.rows.len() + 3);
        lines.push(format!(
            "<TABLE BGCOLOR=\"{}\" BORDER=\"0\" CELLBORDER=\"0\" CELLSPACING=\"0\">",
            TABLE_COLOR
        ));
        lines.push(self.title(&title, colspan));
        for row in &spec.rows {
            lines.push(self.field(row));
        }
        lines.push("</TABLE>".to_string());

        Ok(lines.join("\n"))
    }

    /// Node statement whose label is the table for `spec`
    pub fn label(&self, spec: &LabelSpec) -> Result<String> {
        let table = self.table(spec)?;
        Ok(format!(
            "{}[label = <{}>]",
            self.node_id(&spec.table_name),
            table
        ))
    }

    /// DOT identifier for a table, quoted when it is not a plain identifier
    pub fn node_id(&self, table_name: &str) -> String {
        let id = format!("{}{}", self.node_prefix, table_name);
        let plain = id
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if plain {
            id
        } else {
            format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
        }
    }
}

/// Strip line breaks and escape HTML metacharacters for a label cell
fn escape_cell(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\r' | '\n' => {}
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
