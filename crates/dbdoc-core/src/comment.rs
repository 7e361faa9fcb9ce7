//! Table comment resolution

use crate::schema::{CommentOverrides, TableInfo};

/// Placeholder shown in Markdown output when a table has no comment anywhere
pub const DEFAULT_PLACEHOLDER: &str = "no comment provided";

/// Chooses the comment displayed for a table
///
/// The database's own comment wins, then a migration-derived override, then
/// the placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentPolicy {
    placeholder: String,
}

impl Default for CommentPolicy {
    fn default() -> Self {
        Self::with_placeholder(DEFAULT_PLACEHOLDER)
    }
}

impl CommentPolicy {
    pub fn with_placeholder(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }

    /// Policy whose fallback is the empty string
    pub fn silent() -> Self {
        Self::with_placeholder("")
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn resolve<'a>(&'a self, table: &'a TableInfo, overrides: &'a CommentOverrides) -> &'a str {
        if !table.comment.is_empty() {
            return &table.comment;
        }
        overrides
            .get(&table.name)
            .unwrap_or(self.placeholder.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_comment_wins() {
        let table = TableInfo::new("t1").with_comment("C1");
        let overrides: CommentOverrides = [("t1", "C2")].into_iter().collect();
        assert_eq!(CommentPolicy::default().resolve(&table, &overrides), "C1");
    }

    #[test]
    fn test_override_used_when_native_empty() {
        let table = TableInfo::new("t1");
        let overrides: CommentOverrides = [("t1", "C2")].into_iter().collect();
        assert_eq!(CommentPolicy::default().resolve(&table, &overrides), "C2");
    }

    #[test]
    fn test_placeholder_last() {
        let table = TableInfo::new("t1");
        let overrides = CommentOverrides::new();

        assert_eq!(
            CommentPolicy::default().resolve(&table, &overrides),
            "no comment provided"
        );
        assert_eq!(CommentPolicy::silent().resolve(&table, &overrides), "");
        assert_eq!(
            CommentPolicy::with_placeholder("-").resolve(&table, &overrides),
            "-"
        );
    }

    #[test]
    fn test_resolution_leaves_table_untouched() {
        let table = TableInfo::new("t1");
        let before = table.clone();
        let overrides: CommentOverrides = [("t1", "C2")].into_iter().collect();

        let _ = CommentPolicy::default().resolve(&table, &overrides);
        assert_eq!(table, before);
    }
}
