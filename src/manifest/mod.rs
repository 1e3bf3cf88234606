//! The reference manifest: a text file with a tool-owned block of
//! `/// <reference path="..." />` directives.
//!
//! ```text
//! <prefix, untouched>
//! //grunt-start
//! /// <reference path="src/one.ts" />
//! /// <reference path="src/two.ts" />
//! //grunt-end
//! <suffix, untouched>
//! ```
//!
//! - [`parser`] splits an existing file into retained lines and the owned
//!   references
//! - [`merge`] regenerates the owned block and decides whether anything changed
//! - [`writer`] persists the result

/// Owned-section regeneration
pub mod merge;
/// Manifest parsing
pub mod parser;
/// Manifest rendering and persistence
pub mod writer;

pub use merge::{MergeResult, merge};
pub use parser::{ManifestDocument, parse, parse_str};
pub use writer::write_manifest;

use std::collections::HashSet;

/// Marker line opening the owned section.
pub const START_MARKER: &str = "//grunt-start";

/// Marker line closing the owned section.
pub const END_MARKER: &str = "//grunt-end";

/// Text preceding the path in a reference directive.
pub const DIRECTIVE_PREFIX: &str = "/// <reference path=\"";

/// Text following the path in a rendered reference directive.
pub const DIRECTIVE_SUFFIX: &str = "\" />";

/// Classification of a single manifest line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Contains [`START_MARKER`].
    StartMarker,
    /// Contains [`END_MARKER`].
    EndMarker,
    /// A reference directive and the path it declares.
    Directive(String),
    /// Starts like a directive but has no closing quote.
    MalformedDirective,
    /// Anything else.
    Plain,
}

/// Classifies a line. Matching is done on the trimmed text; markers only
/// need to be contained in the line, and take precedence over directives.
#[must_use]
pub fn classify(line: &str) -> LineKind {
    let trimmed = line.trim();

    if trimmed.contains(START_MARKER) {
        return LineKind::StartMarker;
    }
    if trimmed.contains(END_MARKER) {
        return LineKind::EndMarker;
    }

    let Some(start) = trimmed.find(DIRECTIVE_PREFIX) else {
        return LineKind::Plain;
    };
    let rest = &trimmed[start + DIRECTIVE_PREFIX.len()..];
    match rest.find('"') {
        Some(end) => LineKind::Directive(rest[..end].to_string()),
        None => LineKind::MalformedDirective,
    }
}

/// Renders the directive line declaring `path`.
#[must_use]
pub fn render_directive(path: &str) -> String {
    format!("{DIRECTIVE_PREFIX}{path}{DIRECTIVE_SUFFIX}")
}

/// A declared dependency: its relative path and the line it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEntry {
    /// Forward-slash relative path, compared by string equality.
    pub path: String,
    /// The directive text as it appeared in the manifest. Only used for
    /// diagnostics; regenerated sections always use the canonical form.
    pub directive: String,
}

impl ReferenceEntry {
    /// Creates an entry whose directive is the canonical rendering of `path`.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let directive = render_directive(&path);
        Self { path, directive }
    }
}

/// Insertion-ordered set of references, unique by path string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSet {
    entries: Vec<ReferenceEntry>,
    seen: HashSet<String>,
}

impl ReferenceSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `entry` unless its path is already present.
    ///
    /// Returns `true` if the entry was added.
    pub fn insert(&mut self, entry: ReferenceEntry) -> bool {
        if self.seen.contains(&entry.path) {
            return false;
        }
        self.seen.insert(entry.path.clone());
        self.entries.push(entry);
        true
    }

    /// Returns whether a reference with exactly this path string exists.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.seen.contains(path)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ReferenceEntry> {
        self.entries.iter()
    }

    /// Paths in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.path.as_str())
    }

    /// Number of references.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no references are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ReferenceEntry> for ReferenceSet {
    fn from_iter<I: IntoIterator<Item = ReferenceEntry>>(iter: I) -> Self {
        let mut set = Self::new();
        for entry in iter {
            set.insert(entry);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("//grunt-start", LineKind::StartMarker)]
    #[case("   //grunt-start  ", LineKind::StartMarker)]
    #[case("//grunt-end", LineKind::EndMarker)]
    #[case("// trailing //grunt-end marker", LineKind::EndMarker)]
    #[case(
        "/// <reference path=\"src/a.ts\" />",
        LineKind::Directive("src/a.ts".to_string())
    )]
    #[case(
        "\t/// <reference path=\"../lib/b.d.ts\"/>",
        LineKind::Directive("../lib/b.d.ts".to_string())
    )]
    #[case("/// <reference path=\"unterminated.ts />", LineKind::MalformedDirective)]
    #[case("/// <reference path=\"\" />", LineKind::Directive(String::new()))]
    #[case("/// <reference types=\"node\" />", LineKind::Plain)]
    #[case("const x = 1;", LineKind::Plain)]
    #[case("", LineKind::Plain)]
    fn test_classify(#[case] line: &str, #[case] expected: LineKind) {
        assert_eq!(classify(line), expected);
    }

    #[test]
    fn test_render_directive_round_trips_through_classify() {
        let line = render_directive("src/a.ts");
        assert_eq!(line, "/// <reference path=\"src/a.ts\" />");
        assert_eq!(classify(&line), LineKind::Directive("src/a.ts".to_string()));
    }

    #[test]
    fn test_reference_set_keeps_first_occurrence() {
        let mut set = ReferenceSet::new();
        assert!(set.insert(ReferenceEntry::new("b.ts")));
        assert!(set.insert(ReferenceEntry::new("a.ts")));
        assert!(!set.insert(ReferenceEntry::new("b.ts")));

        assert_eq!(set.len(), 2);
        assert_eq!(set.paths().collect::<Vec<_>>(), vec!["b.ts", "a.ts"]);
    }

    #[test]
    fn test_reference_set_compares_strings_not_files() {
        let set: ReferenceSet = ["src/a.ts", "./src/a.ts"]
            .into_iter()
            .map(ReferenceEntry::new)
            .collect();

        assert_eq!(set.len(), 2);
        assert!(set.contains("./src/a.ts"));
        assert!(!set.contains("src//a.ts"));
    }
}
