use super::parser::ManifestDocument;
use super::writer::render;
use super::{END_MARKER, START_MARKER, render_directive};
use crate::utils::paths;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A regenerated manifest and how it relates to the one it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    /// The full document: prefix, owned section, suffix.
    pub lines: Vec<String>,
    /// References appended to the owned section by this merge.
    pub added: Vec<String>,
    /// Previously owned references carried over.
    pub retained: usize,
    /// Whether `lines`, rendered with the platform line ending, differs from
    /// the document's original text.
    pub changed: bool,
}

/// Regenerates the owned section of `doc` for the current `selection`.
///
/// Every previously owned reference is re-emitted in its original order,
/// whether or not its file is still selected. Each selected file is then
/// rendered relative to `manifest_dir` and appended, in selection order,
/// unless that exact string is already declared in the original document.
#[must_use]
pub fn merge(doc: &ManifestDocument, selection: &[PathBuf], manifest_dir: &Path) -> MergeResult {
    let mut section = Vec::with_capacity(doc.owned.len() + selection.len() + 2);
    section.push(START_MARKER.to_string());
    for entry in doc.owned.iter() {
        let directive = render_directive(&entry.path);
        if directive != entry.directive {
            debug!(
                from = %entry.directive,
                to = %directive,
                "Normalizing reference directive"
            );
        }
        section.push(directive);
    }

    let mut added = Vec::new();
    for file in selection {
        let reference = paths::reference_path(manifest_dir, file);
        if doc.declares(&reference) {
            continue;
        }
        section.push(render_directive(&reference));
        added.push(reference);
    }
    section.push(END_MARKER.to_string());

    let mut lines = Vec::with_capacity(doc.retained_lines.len() + section.len());
    lines.extend_from_slice(doc.prefix());
    lines.extend(section);
    lines.extend_from_slice(doc.suffix());

    let changed = render(&lines) != doc.original_text;
    debug!(
        retained = doc.owned.len(),
        added = added.len(),
        changed,
        "Merged owned section"
    );

    MergeResult {
        lines,
        added,
        retained: doc.owned.len(),
        changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::parse_str;
    use crate::manifest::writer::LINE_ENDING;

    fn selection(paths: &[&str]) -> Vec<PathBuf> {
        paths.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_empty_manifest_gets_new_section() {
        let doc = parse_str("");
        let result = merge(
            &doc,
            &selection(&["/p/src/a.ts", "/p/src/b.ts"]),
            Path::new("/p"),
        );

        assert_eq!(
            result.lines.join("\n"),
            "//grunt-start\n/// <reference path=\"src/a.ts\" />\n/// <reference path=\"src/b.ts\" />\n//grunt-end"
        );
        assert_eq!(result.added, vec!["src/a.ts", "src/b.ts"]);
        assert_eq!(result.retained, 0);
        assert!(result.changed);
    }

    #[test]
    fn test_new_file_appended_after_existing() {
        let doc = parse_str("//grunt-start\n/// <reference path=\"src/a.ts\" />\n//grunt-end");
        let result = merge(
            &doc,
            &selection(&["/p/src/a.ts", "/p/src/c.ts"]),
            Path::new("/p"),
        );

        assert_eq!(
            result.lines,
            vec![
                "//grunt-start",
                "/// <reference path=\"src/a.ts\" />",
                "/// <reference path=\"src/c.ts\" />",
                "//grunt-end",
            ]
        );
        assert_eq!(result.added, vec!["src/c.ts"]);
        assert!(result.changed);
    }

    #[test]
    fn test_removed_file_is_still_declared() {
        let text = [
            "//grunt-start",
            "/// <reference path=\"src/removed.ts\" />",
            "//grunt-end",
        ]
        .join(LINE_ENDING);
        let doc = parse_str(&text);
        let result = merge(&doc, &[], Path::new("/p"));

        assert_eq!(render(&result.lines), text);
        assert!(result.added.is_empty());
        assert_eq!(result.retained, 1);
        assert!(!result.changed);
    }

    #[test]
    fn test_existing_order_is_never_rearranged() {
        let doc = parse_str(
            "//grunt-start\n/// <reference path=\"z.ts\" />\n/// <reference path=\"a.ts\" />\n//grunt-end",
        );
        let result = merge(&doc, &selection(&["/p/a.ts", "/p/m.ts", "/p/z.ts"]), Path::new("/p"));

        assert_eq!(
            result.lines,
            vec![
                "//grunt-start",
                "/// <reference path=\"z.ts\" />",
                "/// <reference path=\"a.ts\" />",
                "/// <reference path=\"m.ts\" />",
                "//grunt-end",
            ]
        );
    }

    #[test]
    fn test_prefix_and_suffix_are_preserved() {
        let doc = parse_str("// top\n\n//grunt-start\n//grunt-end\nexport {};\n");
        let result = merge(&doc, &selection(&["/p/a.ts"]), Path::new("/p"));

        assert_eq!(
            result.lines,
            vec![
                "// top",
                "",
                "//grunt-start",
                "/// <reference path=\"a.ts\" />",
                "//grunt-end",
                "export {};",
                "",
            ]
        );
    }

    #[test]
    fn test_section_appended_when_no_markers() {
        let doc = parse_str("// hand written");
        let result = merge(&doc, &selection(&["/p/a.ts"]), Path::new("/p"));

        assert_eq!(result.lines[0], "// hand written");
        assert_eq!(result.lines[1], "//grunt-start");
        assert_eq!(result.lines.len(), 4);
        assert!(result.changed);
    }

    #[test]
    fn test_hand_written_reference_is_not_duplicated() {
        let doc = parse_str("/// <reference path=\"a.ts\" />");
        let result = merge(&doc, &selection(&["/p/a.ts", "/p/b.ts"]), Path::new("/p"));

        assert_eq!(result.added, vec!["b.ts"]);
        assert_eq!(result.lines[0], "/// <reference path=\"a.ts\" />");
    }

    #[test]
    fn test_references_relative_to_manifest_directory() {
        let doc = parse_str("");
        let result = merge(&doc, &selection(&["/p/src/a.ts"]), Path::new("/p/typings"));

        assert_eq!(result.added, vec!["../src/a.ts"]);
    }

    #[test]
    fn test_differently_spelled_reference_is_distinct() {
        let doc = parse_str("//grunt-start\n/// <reference path=\"./a.ts\" />\n//grunt-end");
        let result = merge(&doc, &selection(&["/p/a.ts"]), Path::new("/p"));

        assert_eq!(result.added, vec!["a.ts"]);
        assert_eq!(result.retained, 1);
    }

    #[test]
    fn test_empty_path_directive_is_kept() {
        let doc = parse_str("//grunt-start\n/// <reference path=\"\" />\n//grunt-end");
        let result = merge(&doc, &selection(&["/p/a.ts"]), Path::new("/p"));

        assert_eq!(result.retained, 1);
        assert_eq!(result.lines[1], "/// <reference path=\"\" />");
        assert_eq!(result.added, vec!["a.ts"]);
    }

    #[test]
    fn test_non_canonical_directive_is_rewritten() {
        let doc = parse_str("//grunt-start\n  /// <reference path=\"a.ts\"/>\n//grunt-end");
        let result = merge(&doc, &selection(&["/p/a.ts"]), Path::new("/p"));

        assert_eq!(result.lines[1], "/// <reference path=\"a.ts\" />");
        assert!(result.changed);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let files = selection(&["/p/src/a.ts", "/p/src/b.ts"]);
        let first = merge(&parse_str("// header"), &files, Path::new("/p"));
        let second = merge(&parse_str(&render(&first.lines)), &files, Path::new("/p"));

        assert!(first.changed);
        assert!(!second.changed);
        assert_eq!(first.lines, second.lines);
    }

    #[test]
    fn test_rerun_on_platform_line_endings_is_unchanged() {
        let files = selection(&["/p/src/a.ts"]);
        let first = merge(&parse_str("// header\n\nexport {};"), &files, Path::new("/p"));
        let written = first.lines.join(LINE_ENDING);
        let second = merge(&parse_str(&written), &files, Path::new("/p"));

        assert!(!second.changed);
        assert_eq!(render(&second.lines), written);
    }

    #[test]
    fn test_foreign_line_endings_count_as_change() {
        let foreign = if LINE_ENDING == "\n" { "\r\n" } else { "\n" };
        let files = selection(&["/p/src/a.ts"]);
        let first = merge(&parse_str(""), &files, Path::new("/p"));
        let second = merge(&parse_str(&first.lines.join(foreign)), &files, Path::new("/p"));

        assert!(second.changed);
        assert_eq!(second.lines, first.lines);
    }
}
