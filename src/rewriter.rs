//! Pure content transform: quoted URL substitution and import insertion.
//!
//! Nothing here touches the filesystem. `FileProcessor` feeds file contents
//! through [`rewrite`] and decides what to do with the result.

use crate::replacements::ReplacementTable;

/// When and what to prepend after substitutions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRule {
    /// Identifier whose presence in rewritten content calls for the import.
    pub marker: String,
    /// Full import statement, without trailing newline.
    pub import_line: String,
    /// Substrings that count as "already imported".
    pub recognized: Vec<String>,
}

impl ImportRule {
    pub fn new(
        marker: impl Into<String>,
        import_line: impl Into<String>,
        recognized: Vec<String>,
    ) -> Self {
        Self {
            marker: marker.into(),
            import_line: import_line.into(),
            recognized,
        }
    }

    /// Only the listed spellings are checked. An import of the same module
    /// through any other relative path is not seen, so a second import line
    /// can be added.
    pub fn is_already_imported(&self, content: &str) -> bool {
        self.recognized.iter().any(|s| content.contains(s.as_str()))
    }

    pub fn needs_import(&self, content: &str, modified: bool) -> bool {
        modified && content.contains(self.marker.as_str()) && !self.is_already_imported(content)
    }

    fn prepend_to(&self, content: &mut String) {
        content.insert(0, '\n');
        content.insert_str(0, &self.import_line);
    }
}

/// Result of running one file's content through the transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    /// At least one quoted variant was substituted.
    pub modified: bool,
    /// The import line was prepended.
    pub import_added: bool,
    /// Total number of quoted occurrences replaced.
    pub replacements: usize,
}

/// Replace every quoted occurrence of each table key, in table order.
///
/// Returns the number of occurrences replaced. Unquoted occurrences, and
/// occurrences wrapped in anything other than `'`, `"` or `` ` ``, are left
/// alone.
pub fn apply_replacements(content: &mut String, table: &ReplacementTable) -> usize {
    let mut count = 0;

    for entry in table {
        if !content.contains(entry.from.as_str()) {
            continue;
        }

        for quoted in entry.quoted_variants() {
            let hits = content.matches(quoted.as_str()).count();
            if hits > 0 {
                *content = content.replace(quoted.as_str(), &entry.to);
                count += hits;
            }
        }
    }

    count
}

/// Prepend the import line if `rule` asks for it. Returns whether it did.
pub fn insert_import(content: &mut String, rule: &ImportRule, modified: bool) -> bool {
    if !rule.needs_import(content, modified) {
        return false;
    }

    rule.prepend_to(content);
    true
}

pub fn rewrite(content: &str, table: &ReplacementTable, rule: &ImportRule) -> Rewrite {
    let mut current = content.to_string();
    let replacements = apply_replacements(&mut current, table);
    let modified = replacements > 0;
    let import_added = insert_import(&mut current, rule, modified);

    Rewrite {
        content: current,
        modified,
        import_added,
        replacements,
    }
}
