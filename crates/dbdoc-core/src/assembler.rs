//! Document assembly
//!
//! Walks every table the provider reports, resolves its comment, renders it
//! with the builder for the selected [`OutputMode`] and joins the fragments
//! into a single document that is written in one step.

use crate::comment::CommentPolicy;
use crate::error::{Error, Result};
use crate::graph::{GraphBuilder, LabelSpec};
use crate::markdown::{MarkdownBuilder, TableSpec, LINE_SEPARATOR};
use crate::provider::SchemaProvider;
use crate::schema::{ColumnInfo, CommentOverrides, TableInfo};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Column headings of the Markdown column table
pub const DEFAULT_COLUMN_TITLES: [&str; 4] = ["Field", "Type", "Null", "Comment"];

/// Summary line of the collapsible column block
const DETAILS_SUMMARY: &str = "Columns";

/// Shown for an engine or collation the server does not report, e.g. for views
const MISSING_VALUE: &str = "-";

/// Selected output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Markdown, optionally folding column tables into `<details>` blocks
    Markdown { collapsible: bool },
    /// Graphviz digraph
    Graph,
}

impl Default for OutputMode {
    fn default() -> Self {
        OutputMode::Markdown { collapsible: false }
    }
}

impl OutputMode {
    /// Resolve the command-line flags; graph output wins over collapsible Markdown
    pub fn from_flags(graph: bool, collapsible: bool) -> Self {
        if graph {
            OutputMode::Graph
        } else {
            OutputMode::Markdown { collapsible }
        }
    }
}

/// Rendering settings that do not change during a run
#[derive(Debug, Clone)]
pub struct AssemblerOptions {
    pub mode: OutputMode,
    /// Comment fallback for Markdown output
    pub markdown_policy: CommentPolicy,
    /// Comment fallback for graph output
    pub graph_policy: CommentPolicy,
    /// Headings of the Markdown column table
    pub column_titles: Vec<String>,
    pub graph: GraphBuilder,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            mode: OutputMode::default(),
            markdown_policy: CommentPolicy::default(),
            graph_policy: CommentPolicy::silent(),
            column_titles: DEFAULT_COLUMN_TITLES.iter().map(|s| s.to_string()).collect(),
            graph: GraphBuilder::new(),
        }
    }
}

impl AssemblerOptions {
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Builds a documentation file from a schema provider
pub struct DocumentAssembler<P> {
    provider: P,
    overrides: CommentOverrides,
    options: AssemblerOptions,
}

impl<P: SchemaProvider> DocumentAssembler<P> {
    pub fn new(provider: P, overrides: CommentOverrides, options: AssemblerOptions) -> Self {
        Self {
            provider,
            overrides,
            options,
        }
    }

    /// Give the provider back, e.g. to reuse its connection
    pub fn into_provider(self) -> P {
        self.provider
    }

    /// Render the whole document in memory
    #[instrument(skip(self), fields(mode = ?self.options.mode))]
    pub fn render(&mut self) -> Result<String> {
        let tables = self.provider.list_tables()?;
        debug!(count = tables.len(), "Rendering tables");

        let mut fragments = Vec::with_capacity(tables.len());
        for name in &tables {
            let table = self.provider.table_info(name)?;
            if table.name.is_empty() {
                return Err(Error::invalid_argument(format!(
                    "provider returned an unnamed table for {}",
                    name
                )));
            }
            let columns = self.provider.columns(name)?;
            debug!(table = %table.name, columns = columns.len(), "Rendering table");

            let fragment = match self.options.mode {
                OutputMode::Markdown { collapsible } => {
                    self.markdown_table(&table, &columns, collapsible)?
                }
                OutputMode::Graph => self.graph_label(&table, &columns)?,
            };
            fragments.push(fragment);
        }

        let document = match self.options.mode {
            OutputMode::Markdown { .. } => fragments.join(&LINE_SEPARATOR.repeat(2)),
            OutputMode::Graph => self.options.graph.graph(&fragments.concat(), &[]),
        };

        info!(tables = tables.len(), bytes = document.len(), "Document rendered");
        Ok(document)
    }

    /// Render and write the document to `dest`
    ///
    /// An existing `dest` is only replaced when `force` is set; that check
    /// runs before the provider is queried. Missing parent directories are
    /// created.
    #[instrument(skip(self, dest), fields(dest = %dest.display()))]
    pub fn output(&mut self, dest: &Path, force: bool) -> Result<()> {
        if !force && dest.exists() {
            return Err(Error::DestinationExists {
                path: dest.to_path_buf(),
            });
        }

        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                debug!(dir = %parent.display(), "Creating output directory");
                fs::create_dir_all(parent)?;
            }
        }

        let document = self.render()?;
        fs::write(dest, document)?;

        info!(dest = %dest.display(), "Documentation written");
        Ok(())
    }

    fn markdown_table(
        &self,
        table: &TableInfo,
        columns: &[ColumnInfo],
        collapsible: bool,
    ) -> Result<String> {
        let comment = self.options.markdown_policy.resolve(table, &self.overrides);

        let mut spec = TableSpec::new(self.options.column_titles.iter().cloned());
        for column in columns {
            spec = spec.row([
                MarkdownBuilder::cell(&column.name),
                MarkdownBuilder::cell(&column.field_type),
                MarkdownBuilder::cell(&column.nullable),
                MarkdownBuilder::cell(&column.comment),
            ]);
        }
        let mut column_table = MarkdownBuilder::table(&spec)?;
        if collapsible {
            column_table = MarkdownBuilder::details(DETAILS_SUMMARY, &column_table);
        }

        let lines = [
            MarkdownBuilder::title(&table.name, 2)?,
            MarkdownBuilder::comment(comment),
            format!(
                "{} {}",
                MarkdownBuilder::highline(or_missing(table.engine.as_deref())),
                MarkdownBuilder::highline(or_missing(table.collation.as_deref()))
            ),
            column_table,
            LINE_SEPARATOR.to_string(),
            MarkdownBuilder::rule().to_string(),
        ];
        Ok(lines.join(LINE_SEPARATOR))
    }

    fn graph_label(&self, table: &TableInfo, columns: &[ColumnInfo]) -> Result<String> {
        let comment = self.options.graph_policy.resolve(table, &self.overrides);
        let spec = LabelSpec {
            table_name: table.name.clone(),
            table_comment: comment.to_string(),
            rows: columns
                .iter()
                .map(|c| {
                    vec![
                        c.name.clone(),
                        c.field_type.clone(),
                        c.nullable.clone(),
                        c.comment.clone(),
                    ]
                })
                .collect(),
        };
        self.options.graph.label(&spec)
    }
}

fn or_missing(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(MISSING_VALUE)
}
