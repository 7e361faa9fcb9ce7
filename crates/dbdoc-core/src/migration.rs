//! Table comments recovered from migration source files
//!
//! Projects that create their schema through framework migrations often keep
//! table descriptions there instead of in the database. The scanner walks a
//! migration directory and collects them into [`CommentOverrides`].

use crate::error::{Error, Result};
use crate::schema::CommentOverrides;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Extensions scanned when none are configured
pub const DEFAULT_EXTENSIONS: &[&str] = &["php"];

static BLUEPRINT_REGEX: OnceLock<Regex> = OnceLock::new();
static TABLE_COMMENT_REGEX: OnceLock<Regex> = OnceLock::new();
static ALTER_COMMENT_REGEX: OnceLock<Regex> = OnceLock::new();

/// `Schema::create('users', function (Blueprint $table) {` or `Schema::table('users', ...`
fn blueprint_regex() -> &'static Regex {
    BLUEPRINT_REGEX.get_or_init(|| {
        Regex::new(r#"Schema::(?:create|table)\(\s*['"]([^'"]+)['"]"#).unwrap()
    })
}

/// `$table->comment('User accounts');`
fn table_comment_regex() -> &'static Regex {
    TABLE_COMMENT_REGEX.get_or_init(|| {
        Regex::new(r#"\$table->comment\(\s*(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)")\s*\)"#)
            .unwrap()
    })
}

/// `ALTER TABLE `users` COMMENT 'User accounts'`
fn alter_comment_regex() -> &'static Regex {
    ALTER_COMMENT_REGEX.get_or_init(|| {
        Regex::new(r#"(?i)ALTER\s+TABLE\s+`?(\w+)`?\s+COMMENT\s*=?\s*'((?:[^'\\]|\\.)*)'"#)
            .unwrap()
    })
}

/// Source of table comments that live outside the database
pub trait CommentSource {
    fn scan(&self, root: &Path) -> Result<CommentOverrides>;
}

/// Scans a migration directory tree for table comments
#[derive(Debug, Clone)]
pub struct MigrationScanner {
    extensions: Vec<String>,
}

impl Default for MigrationScanner {
    fn default() -> Self {
        Self::with_extensions(DEFAULT_EXTENSIONS.iter().copied())
    }
}

impl MigrationScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scanner that considers files with any of `extensions` (without dot)
    pub fn with_extensions<S: Into<String>>(extensions: impl IntoIterator<Item = S>) -> Self {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.into().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    fn is_candidate(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

impl CommentSource for MigrationScanner {
    fn scan(&self, root: &Path) -> Result<CommentOverrides> {
        if !root.is_dir() {
            return Err(Error::InvalidPath {
                path: root.to_path_buf(),
            });
        }

        let mut overrides = CommentOverrides::new();
        let mut candidates = 0usize;

        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file() || !self.is_candidate(path) {
                continue;
            }
            candidates += 1;

            let content = match fs::read(path).map(String::from_utf8) {
                Ok(Ok(content)) => content,
                Ok(Err(_)) => {
                    debug!(file = %path.display(), "Skipping file that is not valid UTF-8");
                    continue;
                }
                Err(e) => {
                    debug!(file = %path.display(), error = %e, "Skipping unreadable file");
                    continue;
                }
            };

            for (table, comment) in extract_comments(&content) {
                debug!(file = %path.display(), table = %table, "Found table comment");
                overrides.insert(table, comment);
            }
        }

        if candidates == 0 {
            return Err(Error::NoFilesToProcess {
                path: root.to_path_buf(),
            });
        }

        info!(
            files = candidates,
            tables = overrides.len(),
            root = %root.display(),
            "Migration comments collected"
        );
        Ok(overrides)
    }
}

/// `(table, comment)` pairs in the order they appear in `content`
pub fn extract_comments(content: &str) -> Vec<(String, String)> {
    let mut found: Vec<(usize, String, String)> = Vec::new();

    let blocks: Vec<_> = blueprint_regex().captures_iter(content).collect();
    for (i, block) in blocks.iter().enumerate() {
        let (Some(whole), Some(table)) = (block.get(0), block.get(1)) else {
            continue;
        };
        // A blueprint block ends where the next create or alter starts
        let end = blocks
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(content.len(), |m| m.start());
        let body = &content[whole.end()..end];

        if let Some(caps) = table_comment_regex().captures(body) {
            let comment = match (caps.get(1), caps.get(2)) {
                (Some(single), _) => unescape(single.as_str(), '\''),
                (None, Some(double)) => unescape(double.as_str(), '"'),
                (None, None) => String::new(),
            };
            found.push((whole.start(), table.as_str().to_string(), comment));
        }
    }

    for caps in alter_comment_regex().captures_iter(content) {
        if let (Some(whole), Some(table), Some(comment)) = (caps.get(0), caps.get(1), caps.get(2)) {
            found.push((
                whole.start(),
                table.as_str().to_string(),
                unescape(comment.as_str(), '\''),
            ));
        }
    }

    found.sort_by_key(|(pos, _, _)| *pos);
    found
        .into_iter()
        .map(|(_, table, comment)| (table, comment))
        .collect()
}

/// Resolve `\\` and an escaped `quote` inside a quoted literal; other
/// backslashes are kept as written
fn unescape(raw: &str, quote: char) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if next == quote || next == '\\' {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}
